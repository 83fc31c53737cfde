//! Page-break layout of assembled document text.
//!
//! The first non-empty line is the title and is set once in the title
//! style; every later line uses the body style. Each line is wrapped to the
//! usable width and placed as one block. A block that does not fit the
//! space left on the page moves to the next page whole; a block taller than
//! a full page is split between wrapped rows, never inside one.

use serde::Serialize;
use tracing::debug;

use crate::page::{PageLayout, TextStyle};
use crate::wrap::wrap_line;

/// Tolerance for accumulated floating point error in cursor arithmetic
const EPSILON: f64 = 1e-6;

/// One block of wrapped rows drawn at a position on a page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Zero-based page index
    pub page: usize,
    pub x: f64,
    /// Top of the first row
    pub y: f64,
    pub style: TextStyle,
    pub line_height: f64,
    pub rows: Vec<String>,
}

impl Placement {
    pub fn text(&self) -> String {
        self.rows.join("\n")
    }

    /// Y coordinate just below the last row
    pub fn bottom(&self) -> f64 {
        self.y + self.rows.len() as f64 * self.line_height
    }
}

/// Laid-out document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pagination {
    pub placements: Vec<Placement>,
    pub page_count: usize,
}

impl Pagination {
    pub fn placements_on(&self, page: usize) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(move |p| p.page == page)
    }

    /// Plain-text rendering of each page, rows separated by newlines
    pub fn page_texts(&self) -> Vec<String> {
        (0..self.page_count)
            .map(|page| {
                self.placements_on(page)
                    .map(|p| p.text())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .collect()
    }
}

/// Running state of one layout pass
struct Cursor<'a> {
    layout: &'a PageLayout,
    page: usize,
    y: f64,
    placements: Vec<Placement>,
}

impl<'a> Cursor<'a> {
    fn new(layout: &'a PageLayout) -> Self {
        Self {
            layout,
            page: 0,
            y: layout.margin_top,
            placements: Vec::new(),
        }
    }

    fn at_top(&self) -> bool {
        self.y <= self.layout.margin_top + EPSILON
    }

    /// Whole rows of `line_height` that fit between the cursor and the bottom margin
    fn rows_left(&self, line_height: f64) -> usize {
        let remaining = self.layout.bottom() - self.y;
        if remaining <= 0.0 {
            return 0;
        }
        ((remaining + EPSILON) / line_height).floor() as usize
    }

    fn new_page(&mut self) {
        self.page += 1;
        self.y = self.layout.margin_top;
        debug!(page = self.page, "page break");
    }

    fn place(&mut self, style: TextStyle, line_height: f64, rows: &[String]) {
        self.placements.push(Placement {
            page: self.page,
            x: self.layout.margin_left,
            y: self.y,
            style,
            line_height,
            rows: rows.to_vec(),
        });
        self.y += rows.len() as f64 * line_height;
    }

    fn blank_line(&mut self) {
        if !self.at_top() {
            self.y += self.layout.blank_line_advance;
        }
    }

    fn block(&mut self, style: TextStyle, rows: &[String]) {
        let line_height = self.layout.line_height(style);
        let block_height = rows.len() as f64 * line_height;
        let mut rows = rows;

        while !rows.is_empty() {
            let fit = self.rows_left(line_height);
            if fit >= rows.len() {
                self.place(style, line_height, rows);
                return;
            }

            if !self.at_top()
                && (fit == 0 || block_height <= self.layout.usable_height() + EPSILON)
            {
                self.new_page();
                continue;
            }

            // Taller than a page: fill this one row by row. A page too
            // short for a single row still takes one so layout progresses.
            let take = fit.max(1);
            self.place(style, line_height, &rows[..take]);
            rows = &rows[take..];
            self.new_page();
        }
    }

    fn finish(self) -> Pagination {
        let page_count = self
            .placements
            .last()
            .map(|p| p.page + 1)
            .unwrap_or(1);
        Pagination {
            placements: self.placements,
            page_count,
        }
    }
}

/// Lays document text out on pages
pub struct Paginator;

impl Paginator {
    /// Paginate `document`
    ///
    /// Total: every non-whitespace character of the input appears in exactly
    /// one placement, in input order.
    pub fn paginate(document: &str, layout: &PageLayout) -> Pagination {
        let mut cursor = Cursor::new(layout);
        let mut title_pending = true;

        for line in document.lines() {
            if line.trim().is_empty() {
                cursor.blank_line();
                continue;
            }

            let style = if title_pending {
                title_pending = false;
                TextStyle::Title
            } else {
                TextStyle::Body
            };
            let rows = wrap_line(line, layout.columns(style));
            cursor.block(style, &rows);
        }

        let pagination = cursor.finish();
        debug!(
            pages = pagination.page_count,
            blocks = pagination.placements.len(),
            "paginated document"
        );
        pagination
    }
}
