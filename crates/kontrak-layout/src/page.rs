//! Page geometry and font metrics.
//!
//! All lengths are millimetres. Font sizes are points.

use serde::{Deserialize, Serialize};

/// Millimetres per typographic point
pub const MM_PER_PT: f64 = 0.3528;

/// Text style of a rendered block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    Title,
    Body,
}

/// Size and weight of one text style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub size_pt: f64,
    #[serde(default)]
    pub bold: bool,
}

/// Page size, margins and font metrics used for pagination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub title_font: FontSpec,
    pub body_font: FontSpec,
    /// Line height as a multiple of the font size
    pub line_height_factor: f64,
    /// Cursor advance for an empty line
    pub blank_line_advance: f64,
    /// Average glyph width as a fraction of the font size
    pub glyph_width_em: f64,
}

impl Default for PageLayout {
    /// A4 portrait, 20 mm margins
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            margin_top: 20.0,
            margin_bottom: 20.0,
            margin_left: 20.0,
            margin_right: 20.0,
            title_font: FontSpec {
                size_pt: 16.0,
                bold: true,
            },
            body_font: FontSpec {
                size_pt: 11.0,
                bold: false,
            },
            line_height_factor: 1.15,
            blank_line_advance: 4.0,
            glyph_width_em: 0.5,
        }
    }
}

impl PageLayout {
    pub fn font(&self, style: TextStyle) -> FontSpec {
        match style {
            TextStyle::Title => self.title_font,
            TextStyle::Body => self.body_font,
        }
    }

    /// Vertical space between the top and bottom margins
    pub fn usable_height(&self) -> f64 {
        (self.page_height - self.margin_top - self.margin_bottom).max(0.0)
    }

    pub fn usable_width(&self) -> f64 {
        (self.page_width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Y coordinate past which nothing may be drawn
    pub fn bottom(&self) -> f64 {
        self.margin_top + self.usable_height()
    }

    pub fn line_height(&self, style: TextStyle) -> f64 {
        (self.font(style).size_pt * MM_PER_PT * self.line_height_factor).max(f64::EPSILON)
    }

    /// Display columns that fit on one line, at least one
    pub fn columns(&self, style: TextStyle) -> usize {
        let glyph = self.font(style).size_pt * MM_PER_PT * self.glyph_width_em;
        if glyph <= 0.0 {
            return 1;
        }
        ((self.usable_width() / glyph).floor() as usize).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_defaults() {
        let layout = PageLayout::default();
        assert_eq!(layout.usable_height(), 257.0);
        assert_eq!(layout.usable_width(), 170.0);
        assert_eq!(layout.bottom(), 277.0);
        // 11pt body: 170 / (11 * 0.3528 * 0.5) = 87.6
        assert_eq!(layout.columns(TextStyle::Body), 87);
        assert!(layout.columns(TextStyle::Title) < layout.columns(TextStyle::Body));
        assert!(layout.line_height(TextStyle::Title) > layout.line_height(TextStyle::Body));
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let layout: PageLayout = serde_yaml::from_str("page_height: 100\nmargin_top: 10\n").unwrap();
        assert_eq!(layout.page_height, 100.0);
        assert_eq!(layout.margin_top, 10.0);
        assert_eq!(layout.page_width, 210.0);
        assert_eq!(layout.usable_height(), 70.0);
    }

    #[test]
    fn test_degenerate_geometry_still_has_a_column() {
        let layout = PageLayout {
            margin_left: 200.0,
            margin_right: 200.0,
            ..PageLayout::default()
        };
        assert_eq!(layout.usable_width(), 0.0);
        assert_eq!(layout.columns(TextStyle::Body), 1);
    }
}
