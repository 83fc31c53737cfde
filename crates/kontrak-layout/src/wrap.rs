//! Greedy word wrapping measured in display columns.
//!
//! Indentation and runs of spaces inside a row are kept as written; tabs
//! expand to the next tab stop. Whitespace is only dropped where a row
//! breaks.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns between tab stops
pub const TAB_STOP: usize = 4;

/// Display width of `text` in terminal-style columns
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Replace tabs with spaces up to the next tab stop
pub fn expand_tabs(line: &str) -> String {
    let mut expanded = String::with_capacity(line.len());
    let mut column = 0;
    for ch in line.chars() {
        if ch == '\t' {
            let pad = TAB_STOP - column % TAB_STOP;
            expanded.extend(std::iter::repeat(' ').take(pad));
            column += pad;
        } else {
            expanded.push(ch);
            column += UnicodeWidthChar::width(ch).unwrap_or(0);
        }
    }
    expanded
}

/// Alternating whitespace and word runs of `line`
fn runs(line: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, ch) in line.char_indices() {
        let space = ch.is_whitespace();
        match in_space {
            Some(current) if current != space => {
                runs.push((current, &line[start..i]));
                start = i;
            }
            _ => {}
        }
        in_space = Some(space);
    }
    if let Some(space) = in_space {
        runs.push((space, &line[start..]));
    }
    runs
}

struct Rows {
    columns: usize,
    rows: Vec<String>,
    current: String,
    width: usize,
}

impl Rows {
    fn push_str(&mut self, text: &str) {
        self.current.push_str(text);
        self.width += display_width(text);
    }

    /// Append char by char, breaking whenever the row is full
    fn push_chars(&mut self, text: &str) {
        for ch in text.chars() {
            let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
            if self.width > 0 && self.width + ch_width > self.columns {
                self.break_row();
            }
            self.current.push(ch);
            self.width += ch_width;
        }
    }

    fn break_row(&mut self) {
        self.rows.push(std::mem::take(&mut self.current));
        self.width = 0;
    }

    /// Start `word` on a fresh row, splitting it if wider than a row
    fn place_word(&mut self, word: &str) {
        if display_width(word) <= self.columns {
            self.push_str(word);
        } else {
            self.push_chars(word);
        }
    }
}

/// Wrap one line into rows no wider than `columns`
///
/// Breaks between words; a word wider than a row is split into row-sized
/// pieces. Never drops non-whitespace text. An empty line yields one empty
/// row.
pub fn wrap_line(line: &str, columns: usize) -> Vec<String> {
    let expanded = expand_tabs(line);
    let mut out = Rows {
        columns: columns.max(1),
        rows: Vec::new(),
        current: String::new(),
        width: 0,
    };
    let mut pending = "";

    for (is_space, token) in runs(&expanded) {
        if is_space {
            pending = token;
            continue;
        }

        let word_width = display_width(token);
        if out.width + display_width(pending) + word_width <= out.columns {
            out.push_str(pending);
            out.push_str(token);
        } else if out.width > 0 {
            // the whitespace at a break point is dropped
            out.break_row();
            out.place_word(token);
        } else {
            // indentation wider than the rest of the row
            out.push_chars(pending);
            if out.width > 0 && out.width + word_width > out.columns {
                out.break_row();
            }
            out.place_word(token);
        }
        pending = "";
    }

    if !out.current.is_empty() || out.rows.is_empty() {
        out.rows.push(out.current);
    }
    out.rows
}
