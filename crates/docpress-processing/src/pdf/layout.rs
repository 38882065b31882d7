use super::encoding::text_width;

/// Spaces a tab expands to.
const TAB_WIDTH: usize = 4;

/// Helvetica ascender, as a fraction of the font size.
const ASCENT: f32 = 0.718;

/// Line advance, as a fraction of the font size.
const LINE_HEIGHT: f32 = 1.156;

/// Geometry of generated text pages, in points. Coordinates of `origin`
/// are measured from the top-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub font_size: f32,
    pub right_margin: f32,
    pub bottom_margin: f32,
    /// Where text starts on continuation pages.
    pub top_margin: f32,
}

impl Default for PageLayout {
    /// US Letter, text at (50, 50), 12 pt, one inch right/bottom/top margins.
    fn default() -> Self {
        PageLayout {
            page_width: 612.0,
            page_height: 792.0,
            origin_x: 50.0,
            origin_y: 50.0,
            font_size: 12.0,
            right_margin: 72.0,
            bottom_margin: 72.0,
            top_margin: 72.0,
        }
    }
}

/// One laid-out line: text and its baseline in PDF coordinates.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
}

impl PageLayout {
    pub fn line_height(&self) -> f32 {
        self.font_size * LINE_HEIGHT
    }

    /// Width available to a line.
    pub fn text_width(&self) -> f32 {
        (self.page_width - self.origin_x - self.right_margin).max(self.font_size)
    }

    fn bottom_limit(&self) -> f32 {
        self.page_height - self.bottom_margin
    }

    /// Break `text` into wrapped lines. Each input line wraps on its own;
    /// empty input lines are kept as blank lines.
    pub(crate) fn wrap(&self, text: &str) -> Vec<String> {
        let max_width = self.text_width();
        let mut lines = Vec::new();

        for raw in text.split('\n') {
            let raw = raw.trim_end_matches('\r').replace('\t', &" ".repeat(TAB_WIDTH));
            if raw.is_empty() {
                lines.push(String::new());
                continue;
            }
            self.wrap_line(&raw, max_width, &mut lines);
        }

        lines
    }

    fn wrap_line(&self, line: &str, max_width: f32, out: &mut Vec<String>) {
        let mut current = String::new();

        for word in line.split(' ') {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, self.font_size) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }

            if text_width(word, self.font_size) <= max_width {
                current = word.to_string();
            } else {
                current = self.break_word(word, max_width, out);
            }
        }

        out.push(current);
    }

    /// Split a word wider than the line by character; returns the remainder.
    fn break_word(&self, word: &str, max_width: f32, out: &mut Vec<String>) -> String {
        let mut chunk = String::new();
        for c in word.chars() {
            chunk.push(c);
            if chunk.chars().count() > 1 && text_width(&chunk, self.font_size) > max_width {
                chunk.pop();
                out.push(std::mem::take(&mut chunk));
                chunk.push(c);
            }
        }
        chunk
    }

    /// Wrap and paginate `text`. Always returns at least one page.
    pub(crate) fn paginate(&self, text: &str) -> Vec<Vec<PlacedLine>> {
        let mut pages: Vec<Vec<PlacedLine>> = vec![Vec::new()];
        let mut y = self.origin_y;
        let line_height = self.line_height();

        for line in self.wrap(text) {
            let on_fresh_page = pages.last().map(|p| p.is_empty()).unwrap_or(true);
            if y + line_height > self.bottom_limit() && !on_fresh_page {
                pages.push(Vec::new());
                y = self.top_margin;
            }

            if let Some(page) = pages.last_mut() {
                page.push(PlacedLine {
                    baseline: self.page_height - (y + self.font_size * ASCENT),
                    x: self.origin_x,
                    text: line,
                });
            }
            y += line_height;
        }

        // Trailing blank lines never justify their own page.
        while pages.len() > 1
            && pages
                .last()
                .map(|p| p.iter().all(|l| l.text.trim().is_empty()))
                .unwrap_or(false)
        {
            pages.pop();
        }

        pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_ws(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    #[test]
    fn test_default_geometry() {
        let layout = PageLayout::default();
        assert_eq!(layout.text_width(), 490.0);
        assert!((layout.line_height() - 13.872).abs() < 1e-3);
    }

    #[test]
    fn test_short_text_is_one_line() {
        let layout = PageLayout::default();
        assert_eq!(layout.wrap("Hello world"), vec!["Hello world".to_string()]);
    }

    #[test]
    fn test_wrap_respects_width_and_keeps_words() {
        let layout = PageLayout::default();
        let text = "lorem ipsum dolor sit amet ".repeat(40);
        let lines = layout.wrap(text.trim_end());

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, layout.font_size) <= layout.text_width());
        }
        assert_eq!(non_ws(&lines.concat()), non_ws(&text));
    }

    #[test]
    fn test_long_word_is_broken_by_character() {
        let layout = PageLayout::default();
        let word = "W".repeat(200);
        let lines = layout.wrap(&word);

        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(text_width(line, layout.font_size) <= layout.text_width());
        }
    }

    #[test]
    fn test_blank_lines_and_tabs() {
        let layout = PageLayout::default();
        let lines = layout.wrap("a\tb\n\nc");
        assert_eq!(lines, vec!["a    b".to_string(), String::new(), "c".to_string()]);
    }

    #[test]
    fn test_first_baseline_matches_origin() {
        let layout = PageLayout::default();
        let pages = layout.paginate("Hello");
        assert_eq!(pages.len(), 1);
        let line = &pages[0][0];
        assert_eq!(line.x, 50.0);
        assert!((line.baseline - (792.0 - 50.0 - 12.0 * 0.718)).abs() < 1e-3);
    }

    #[test]
    fn test_paginates_when_crossing_bottom_margin() {
        let layout = PageLayout::default();
        let text = (0..100).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let pages = layout.paginate(&text);

        assert!(pages.len() >= 2);
        for page in &pages {
            for line in page {
                assert!(line.baseline >= layout.bottom_margin);
            }
        }
        let second_first = &pages[1][0];
        assert!((second_first.baseline - (792.0 - 72.0 - 12.0 * 0.718)).abs() < 1e-3);

        let total: usize = pages.iter().map(|p| p.len()).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_empty_text_yields_one_blank_page() {
        let pages = PageLayout::default().paginate("");
        assert_eq!(pages.len(), 1);
    }
}
