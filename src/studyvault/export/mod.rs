//! # Exporter
//!
//! Turns a library's raw text into printable lines and lays them out on
//! fixed-size pages. Drawing goes through [`DrawingSurface`] so the layout can
//! be tested without producing a PDF; [`pdf::PdfSurface`] is the real one.

use crate::error::Result;
use std::path::Path;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub mod pdf;

/// Maximum printed columns per line.
pub const WRAP_WIDTH: usize = 100;

/// Columns between tab stops.
pub const TAB_WIDTH: usize = 8;

/// US Letter, in points.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;

pub const MARGIN: f32 = 40.0;
pub const LINE_SPACING: f32 = 15.0;
pub const FONT_SIZE: f32 = 12.0;

/// Something text can be drawn on, one page at a time.
pub trait DrawingSurface {
    /// Draw `text` with its baseline at (`x`, `y`), origin bottom-left.
    fn draw_text(&mut self, text: &str, x: f32, y: f32) -> Result<()>;

    /// Finish the current page and start a new one.
    fn new_page(&mut self) -> Result<()>;

    /// Write the document to `path`.
    fn save(self, path: &Path) -> Result<()>;
}

/// Split text into output lines: blank lines pass through, others are
/// word-wrapped to `WRAP_WIDTH` columns.
pub fn layout(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push(String::new());
        } else {
            out.extend(wrap(line, WRAP_WIDTH));
        }
    }
    out
}

/// Draw `lines` top to bottom, breaking pages when the cursor drops below the
/// bottom margin.
pub fn paginate<S: DrawingSurface>(surface: &mut S, lines: &[String]) -> Result<usize> {
    let top = PAGE_HEIGHT - MARGIN;
    let mut y = top;
    let mut pages = 1;

    for line in lines {
        if y < MARGIN {
            surface.new_page()?;
            pages += 1;
            y = top;
        }
        if !line.is_empty() {
            surface.draw_text(line, MARGIN, y)?;
        }
        y -= LINE_SPACING;
    }
    Ok(pages)
}

/// Greedy word wrap by display width.
///
/// Tabs are expanded and runs of spaces inside a line are kept as written.
/// Whitespace is only dropped where a line breaks: at the end of a wrapped
/// line and at the start of the next one. The first line keeps its indent.
/// Words wider than `width` are split.
pub fn wrap(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    // Reversed so the next chunk is at the end.
    let mut chunks = split_chunks(&expand_tabs(line));
    chunks.reverse();

    let mut lines = Vec::new();
    while !chunks.is_empty() {
        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        let mut current = String::new();
        let mut current_width = 0;
        let mut trailing_blank = 0;
        while let Some(chunk) = chunks.last() {
            let chunk_width = chunk.width();
            if current_width + chunk_width > width {
                break;
            }
            trailing_blank = if is_blank(chunk) { chunk.len() } else { 0 };
            current_width += chunk_width;
            current.push_str(chunk);
            chunks.pop();
        }

        if let Some(chunk) = chunks.pop() {
            if chunk.width() > width {
                let room = width - current_width;
                let (head, tail) = split_at_width(&chunk, room, current.is_empty());
                if !head.is_empty() {
                    trailing_blank = if is_blank(&head) { head.len() } else { 0 };
                    current.push_str(&head);
                }
                if !tail.is_empty() {
                    chunks.push(tail);
                }
            } else {
                chunks.push(chunk);
            }
        }

        current.truncate(current.len() - trailing_blank);
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Replace tabs with spaces up to the next tab stop and any other whitespace
/// with a single space.
fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            out.push_str(&" ".repeat(pad));
            column += pad;
        } else if c.is_whitespace() {
            out.push(' ');
            column += 1;
        } else {
            out.push(c);
            column += c.width().unwrap_or(0);
        }
    }
    out
}

/// Alternating runs of whitespace and non-whitespace.
fn split_chunks(line: &str) -> Vec<String> {
    let mut chunks: Vec<String> = Vec::new();
    let mut last_blank = None;
    for c in line.chars() {
        let blank = c.is_whitespace();
        match chunks.last_mut() {
            Some(chunk) if last_blank == Some(blank) => chunk.push(c),
            _ => chunks.push(c.to_string()),
        }
        last_blank = Some(blank);
    }
    chunks
}

/// Longest prefix of `chunk` that fits in `room` columns, and the rest. With
/// `force` at least one character is taken.
fn split_at_width(chunk: &str, room: usize, force: bool) -> (String, String) {
    let mut taken = 0;
    let mut end = 0;
    for (i, c) in chunk.char_indices() {
        let w = c.width().unwrap_or(0);
        if taken + w > room && !(force && end == 0) {
            break;
        }
        taken += w;
        end = i + c.len_utf8();
    }
    (chunk[..end].to_string(), chunk[end..].to_string())
}

fn is_blank(chunk: &str) -> bool {
    chunk.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        pages: Vec<Vec<(String, f32, f32)>>,
    }

    impl DrawingSurface for Recorder {
        fn draw_text(&mut self, text: &str, x: f32, y: f32) -> Result<()> {
            if self.pages.is_empty() {
                self.pages.push(Vec::new());
            }
            if let Some(page) = self.pages.last_mut() {
                page.push((text.to_string(), x, y));
            }
            Ok(())
        }

        fn new_page(&mut self) -> Result<()> {
            self.pages.push(Vec::new());
            Ok(())
        }

        fn save(self, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn short_lines_are_untouched() {
        assert_eq!(wrap("hello world", 100), vec!["hello world"]);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let line = "aaa bbb ccc ddd";
        assert_eq!(wrap(line, 7), vec!["aaa bbb", "ccc ddd"]);
        assert_eq!(wrap(line, 8), vec!["aaa bbb", "ccc ddd"]);
        assert_eq!(wrap(line, 11), vec!["aaa bbb ccc", "ddd"]);
    }

    #[test]
    fn every_wrapped_line_fits() {
        let words: Vec<String> = (0..60).map(|i| format!("word{}", i)).collect();
        let line = words.join(" ");
        let wrapped = wrap(&line, WRAP_WIDTH);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| l.width() <= WRAP_WIDTH));
        assert_eq!(wrapped.join(" "), line);
    }

    #[test]
    fn long_words_are_split() {
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn keeps_leading_indent() {
        assert_eq!(wrap("    - item", 100), vec!["    - item"]);
    }

    #[test]
    fn interior_spacing_is_kept() {
        assert_eq!(wrap("a    b   c", 100), vec!["a    b   c"]);
        assert_eq!(
            layout("| col1 |    col2 |\n|------|---------|"),
            vec!["| col1 |    col2 |", "|------|---------|"]
        );
    }

    #[test]
    fn tabs_expand_to_stops() {
        assert_eq!(wrap("x\ty", 100), vec!["x       y"]);
        assert_eq!(wrap("\tcode", 100), vec!["        code"]);
        assert_eq!(wrap("abcdefgh\ti", 100), vec!["abcdefgh        i"]);
    }

    #[test]
    fn whitespace_is_dropped_at_breaks() {
        assert_eq!(wrap("aaa    bbb", 5), vec!["aaa", "bbb"]);
        assert_eq!(wrap("aa  bb  cc", 6), vec!["aa  bb", "cc"]);
        assert_eq!(wrap("ab cdefghij", 4), vec!["ab c", "defg", "hij"]);
    }

    #[test]
    fn layout_passes_blank_lines_through() {
        let lines = layout("# Title\n\n   \n## Section\ntext");
        assert_eq!(lines, vec!["# Title", "", "", "## Section", "text"]);
    }

    #[test]
    fn paginates_48_lines_per_page() {
        let lines: Vec<String> = (1..=49).map(|i| format!("line {}", i)).collect();
        let mut surface = Recorder::default();
        let pages = paginate(&mut surface, &lines).unwrap();

        assert_eq!(pages, 2);
        assert_eq!(surface.pages.len(), 2);
        assert_eq!(surface.pages[0].len(), 48);
        assert_eq!(surface.pages[0][0], ("line 1".to_string(), MARGIN, 752.0));
        assert_eq!(surface.pages[0][47].2, 752.0 - 47.0 * LINE_SPACING);
        assert_eq!(surface.pages[1], vec![("line 49".to_string(), MARGIN, 752.0)]);
    }

    #[test]
    fn blank_lines_advance_cursor() {
        let lines = vec!["a".to_string(), String::new(), "b".to_string()];
        let mut surface = Recorder::default();
        paginate(&mut surface, &lines).unwrap();
        let ys: Vec<f32> = surface.pages[0].iter().map(|(_, _, y)| *y).collect();
        assert_eq!(ys, vec![752.0, 722.0]);
    }
}
