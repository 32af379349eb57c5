//! A small flow layout for paginated text documents.
//!
//! Text is placed top-down from a cursor, wrapped to the page width and
//! continued on a new page when it would cross the bottom margin. Positions
//! are in PDF points with the origin at the bottom-left corner.

use super::win_ansi::text_width;

/// US Letter.
pub const PAGE_WIDTH: f32 = 612.0;
pub const PAGE_HEIGHT: f32 = 792.0;
pub const MARGIN: f32 = 50.0;

const LINE_SPACING: f32 = 1.2;
/// Helvetica ascender height as a fraction of the font size.
const ASCENT: f32 = 0.718;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub align: Align,
    pub indent: f32,
    pub underline: bool,
}

impl TextStyle {
    pub fn left() -> Self {
        Self {
            align: Align::Left,
            indent: 0.0,
            underline: false,
        }
    }

    pub fn centered() -> Self {
        Self {
            align: Align::Center,
            ..Self::left()
        }
    }

    pub fn indented(indent: f32) -> Self {
        Self {
            indent,
            ..Self::left()
        }
    }

    pub fn underlined(mut self) -> Self {
        self.underline = true;
        self
    }
}

/// One line of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub width: f32,
    pub underline: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedText>,
}

impl Page {
    pub fn text(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.text.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct PageLayout {
    pages: Vec<Page>,
    /// Distance from the top edge of the current page
    cursor: f32,
    font_size: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLayout {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: MARGIN,
            font_size: 12.0,
        }
    }

    pub fn font_size(&mut self, size: f32) -> &mut Self {
        self.font_size = size;
        self
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_SPACING
    }

    /// Advance the cursor by a number of lines at the current font size.
    pub fn move_down(&mut self, lines: f32) -> &mut Self {
        self.cursor += lines * self.line_height();
        self
    }

    /// Place `text`, wrapping at word boundaries to fit between the margins.
    pub fn text(&mut self, text: &str, style: TextStyle) -> &mut Self {
        let available = PAGE_WIDTH - 2.0 * MARGIN - style.indent;
        for line in wrap(text, self.font_size, available) {
            self.place(line, style, available);
        }
        self
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    fn place(&mut self, text: String, style: TextStyle, available: f32) {
        let overflows = self.cursor + self.line_height() > PAGE_HEIGHT - MARGIN;
        let page_has_content = self.pages.last().is_some_and(|p| !p.lines.is_empty());
        if overflows && page_has_content {
            self.pages.push(Page::default());
            self.cursor = MARGIN;
        }

        let width = text_width(&text, self.font_size);
        let left = MARGIN + style.indent;
        let x = match style.align {
            Align::Left => left,
            Align::Center => left + ((available - width) / 2.0).max(0.0),
        };
        let baseline = PAGE_HEIGHT - self.cursor - self.font_size * ASCENT;

        let line = PlacedText {
            text,
            x,
            baseline,
            size: self.font_size,
            width,
            underline: style.underline,
        };
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(line);
        }
        self.cursor += self.line_height();
    }
}

/// Greedy word wrap. Words wider than `max_width` are broken between glyphs.
fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        // Every piece but the last fills a line, so no two pieces of one word share a line
        for piece in break_word(word, size, max_width) {
            if current.is_empty() {
                current = piece;
                continue;
            }
            let candidate = format!("{current} {piece}");
            if text_width(&candidate, size) > max_width {
                lines.push(std::mem::replace(&mut current, piece));
            } else {
                current = candidate;
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split a word into the longest prefixes that fit. Each piece has at least one character.
fn break_word(word: &str, size: f32, max_width: f32) -> Vec<String> {
    if text_width(word, size) <= max_width {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        piece.push(c);
        if piece.chars().count() > 1 && text_width(&piece, size) > max_width {
            piece.pop();
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_flow_down_the_page() {
        let mut layout = PageLayout::new();
        layout.font_size(10.0);
        layout.text("first", TextStyle::left());
        layout.text("second", TextStyle::indented(20.0));

        let page = &layout.pages()[0];
        assert_eq!(page.lines.len(), 2);
        assert_eq!(page.lines[0].x, MARGIN);
        assert_eq!(page.lines[1].x, MARGIN + 20.0);
        assert!((page.lines[0].baseline - page.lines[1].baseline - 12.0).abs() < 0.001);
    }

    #[test]
    fn test_centered_text_is_centered() {
        let mut layout = PageLayout::new();
        layout.font_size(20.0).text("Title", TextStyle::centered());
        let line = &layout.pages()[0].lines[0];
        let right_gap = PAGE_WIDTH - MARGIN - (line.x + line.width);
        assert!((line.x - MARGIN - right_gap).abs() < 0.001);
    }

    #[test]
    fn test_move_down_scales_with_font_size() {
        let mut small = PageLayout::new();
        small.font_size(10.0).move_down(2.0).text("x", TextStyle::left());
        let mut large = PageLayout::new();
        large.font_size(20.0).move_down(2.0).text("x", TextStyle::left());
        assert!(small.pages()[0].lines[0].baseline > large.pages()[0].lines[0].baseline);
    }

    #[test]
    fn test_long_text_wraps() {
        let mut layout = PageLayout::new();
        let long = "word ".repeat(200);
        layout.font_size(12.0).text(&long, TextStyle::indented(40.0));
        let lines = &layout.pages()[0].lines;
        assert!(lines.len() > 1);
        for line in lines {
            assert!(line.x + line.width <= PAGE_WIDTH - MARGIN + 0.001);
        }
    }

    #[test]
    fn test_long_word_is_broken_to_fit() {
        let url = format!("https://example.com/{}", "receipt".repeat(40));
        let mut layout = PageLayout::new();
        layout
            .font_size(10.0)
            .text(&format!("Paid via {url}"), TextStyle::indented(40.0));

        let lines = &layout.pages()[0].lines;
        assert!(lines.len() > 2);
        for line in lines {
            assert!(line.x + line.width <= PAGE_WIDTH - MARGIN + 0.001, "{}", line.text);
        }
        assert_eq!(lines[0].text, "Paid via");
        let rejoined: String = lines[1..].iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rejoined, url);
    }

    #[test]
    fn test_overflow_starts_a_new_page() {
        let mut layout = PageLayout::new();
        layout.font_size(12.0);
        for i in 0..100 {
            layout.text(&format!("line {i}"), TextStyle::left());
        }
        let pages = layout.into_pages();
        assert!(pages.len() >= 2);
        assert_eq!(pages.iter().map(|p| p.lines.len()).sum::<usize>(), 100);
        for page in &pages {
            for line in &page.lines {
                assert!(line.baseline >= MARGIN - 0.001);
            }
        }
        assert_eq!(pages[1].text().next(), Some(format!("line {}", pages[0].lines.len()).as_str()));
    }

    #[test]
    fn test_empty_text_still_takes_a_line() {
        let mut layout = PageLayout::new();
        layout.text("", TextStyle::left());
        assert_eq!(layout.pages()[0].lines.len(), 1);
    }
}
