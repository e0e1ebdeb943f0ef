//! Paginator — wraps composed blocks into lines and places them on pages.
//!
//! Coordinates are PDF user space: origin bottom-left, y grows upwards, units
//! are points. Lines flow top to bottom and start a new page once the next
//! line would cross the bottom margin. There is no widow/orphan control.

use crate::layout::composer::{Block, TextStyle};
use crate::layout::font_metrics::get_metrics;

/// Line advance as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Baseline offset from the top of a line as a multiple of the font size.
const ASCENT_FACTOR: f32 = 0.8;

/// Physical page geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    pub width_pt: f32,
    pub height_pt: f32,
    pub margin_pt: f32,
}

impl PageSpec {
    /// ISO A4 with 50pt margins on every side.
    pub const A4: PageSpec = PageSpec {
        width_pt: 595.28,
        height_pt: 841.89,
        margin_pt: 50.0,
    };

    pub fn content_width_pt(&self) -> f32 {
        self.width_pt - 2.0 * self.margin_pt
    }

    fn bottom_limit_pt(&self) -> f32 {
        self.height_pt - self.margin_pt
    }
}

/// A single line of text with its final position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: TextStyle,
    pub x_pt: f32,
    /// Baseline y in PDF user space.
    pub baseline_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Flows blocks onto as many pages as needed. Always returns at least one page.
pub fn paginate(blocks: &[Block], spec: &PageSpec) -> Vec<Page> {
    let mut cursor = Cursor::new(*spec);
    let mut last_size = TextStyle::BODY.size_pt;

    for block in blocks {
        match block {
            Block::Text {
                text,
                style,
                indent_pt,
            } => {
                let width = spec.content_width_pt() - indent_pt;
                for line in wrap_paragraphs(text, style, width) {
                    cursor.place(line, *style, spec.margin_pt + indent_pt);
                }
                last_size = style.size_pt;
            }
            Block::MoveDown => cursor.advance(last_size * LINE_HEIGHT_FACTOR),
        }
    }

    cursor.finish()
}

/// Wraps text paragraph by paragraph. Blank paragraphs keep one empty line so
/// that an empty field still occupies its slot on the template.
fn wrap_paragraphs(text: &str, style: &TextStyle, width_pt: f32) -> Vec<String> {
    let metrics = get_metrics(style.font);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let wrapped = metrics.wrap(paragraph, style.size_pt, width_pt);
        if wrapped.is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrapped);
        }
    }
    lines
}

struct Cursor {
    spec: PageSpec,
    pages: Vec<Page>,
    current: Page,
    /// Distance from the top edge of the page to the top of the next line.
    y_from_top: f32,
}

impl Cursor {
    fn new(spec: PageSpec) -> Self {
        Self {
            spec,
            pages: Vec::new(),
            current: Page::default(),
            y_from_top: spec.margin_pt,
        }
    }

    fn place(&mut self, text: String, style: TextStyle, x_pt: f32) {
        let line_height = style.size_pt * LINE_HEIGHT_FACTOR;
        if self.y_from_top + line_height > self.spec.bottom_limit_pt()
            && !self.current.lines.is_empty()
        {
            self.break_page();
        }

        let baseline_pt = self.spec.height_pt - self.y_from_top - style.size_pt * ASCENT_FACTOR;
        self.current.lines.push(PlacedLine {
            text,
            style,
            x_pt,
            baseline_pt,
        });
        self.y_from_top += line_height;
    }

    fn advance(&mut self, gap_pt: f32) {
        self.y_from_top += gap_pt;
    }

    fn break_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y_from_top = self.spec.margin_pt;
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.lines.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::composer::compose;
    use crate::models::resume::StructuredResume;

    fn body(text: &str) -> Block {
        Block::Text {
            text: text.to_string(),
            style: TextStyle::BODY,
            indent_pt: 0.0,
        }
    }

    #[test]
    fn test_empty_input_still_yields_one_page() {
        let pages = paginate(&[], &PageSpec::A4);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_first_line_sits_below_top_margin() {
        let pages = paginate(&[body("Hello")], &PageSpec::A4);
        let line = &pages[0].lines[0];
        assert_eq!(line.x_pt, 50.0);
        assert!(line.baseline_pt < PageSpec::A4.height_pt - 50.0);
        assert!(line.baseline_pt > PageSpec::A4.height_pt - 50.0 - 12.0);
    }

    #[test]
    fn test_lines_descend_and_move_down_adds_gap() {
        let pages = paginate(&[body("a"), body("b"), Block::MoveDown, body("c")], &PageSpec::A4);
        let ys: Vec<f32> = pages[0].lines.iter().map(|l| l.baseline_pt).collect();
        let step = ys[0] - ys[1];
        assert!((step - 12.0).abs() < 1e-3, "10pt * 1.2 = 12pt, got {step}");
        assert!((ys[1] - ys[2] - 2.0 * step).abs() < 1e-3);
    }

    #[test]
    fn test_indent_shifts_x_and_narrows_width() {
        let block = Block::Text {
            text: "• indented".to_string(),
            style: TextStyle::BODY,
            indent_pt: 10.0,
        };
        let pages = paginate(&[block], &PageSpec::A4);
        assert_eq!(pages[0].lines[0].x_pt, 60.0);
    }

    #[test]
    fn test_newlines_split_paragraphs_and_blank_keeps_a_line() {
        let pages = paginate(&[body("first\nsecond"), body("")], &PageSpec::A4);
        let texts: Vec<&str> = pages[0].lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", ""]);
    }

    #[test]
    fn test_overflow_starts_new_page_and_nothing_crosses_bottom_margin() {
        let blocks: Vec<Block> = (0..150).map(|i| body(&format!("line {i}"))).collect();
        let pages = paginate(&blocks, &PageSpec::A4);

        assert!(pages.len() >= 3, "150 lines at 12pt cannot fit on two pages");
        let total: usize = pages.iter().map(|p| p.lines.len()).sum();
        assert_eq!(total, 150);
        for page in &pages {
            for line in &page.lines {
                assert!(line.baseline_pt > PageSpec::A4.margin_pt - 12.0);
            }
        }
        assert_eq!(pages[1].lines[0].baseline_pt, pages[0].lines[0].baseline_pt);
    }

    #[test]
    fn test_same_resume_same_layout() {
        let resume = StructuredResume {
            name: "A".to_string(),
            skills: vec!["Rust".to_string()],
            ..StructuredResume::default()
        };
        let first = paginate(&compose(&resume), &PageSpec::A4);
        let second = paginate(&compose(&resume), &PageSpec::A4);
        assert_eq!(first, second);
    }
}
