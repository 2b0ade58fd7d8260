//! Virtual terminal for headless testing.

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::Terminal;

/// A virtual terminal for testing TUI applications.
pub struct TestTerminal {
    terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a new test terminal with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create terminal");
        Self { terminal }
    }

    pub fn size(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    /// Draw to the terminal.
    pub fn draw<F>(&mut self, f: F)
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f).expect("Failed to draw to terminal");
    }

    /// Get a reference to the current buffer.
    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// The whole buffer as text, one line per row.
    pub fn contents(&self) -> String {
        let area = self.buffer().area;
        (0..area.height)
            .map(|row| self.row_text(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The buffer with trailing spaces trimmed from every row.
    pub fn contents_trimmed(&self) -> String {
        let area = self.buffer().area;
        (0..area.height)
            .map(|row| self.line(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Content of one row, trailing spaces trimmed.
    pub fn line(&self, row: u16) -> String {
        self.row_text(row).trim_end().to_string()
    }

    fn row_text(&self, row: u16) -> String {
        let buffer = self.buffer();
        let area = buffer.area;
        let y = area.y + row;
        if y >= area.y + area.height {
            return String::new();
        }

        let mut result = String::new();
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        result
    }

    /// Assert that the buffer contains the given substring.
    pub fn assert_contains(&self, needle: &str) {
        let content = self.contents();
        if !content.contains(needle) {
            panic!("Buffer does not contain \"{}\":\n{}", needle, content);
        }
    }

    /// Assert that the buffer does not contain the given substring.
    pub fn assert_not_contains(&self, needle: &str) {
        let content = self.contents();
        if content.contains(needle) {
            panic!("Buffer unexpectedly contains \"{}\":\n{}", needle, content);
        }
    }

    /// Position `(column, row)` of the first occurrence of `needle`.
    ///
    /// Matches within a single row only. Columns count cells, so `needle`
    /// should be made of single-width characters.
    pub fn find(&self, needle: &str) -> Option<(u16, u16)> {
        let buffer = self.buffer();
        let area = buffer.area;
        let needle: Vec<String> = needle.chars().map(String::from).collect();
        if needle.is_empty() || needle.len() > area.width as usize {
            return None;
        }

        for y in area.y..area.y + area.height {
            let symbols: Vec<&str> = (area.x..area.x + area.width)
                .map(|x| buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
                .collect();
            for start in 0..=symbols.len() - needle.len() {
                let window = &symbols[start..start + needle.len()];
                if window.iter().zip(&needle).all(|(a, b)| *a == b.as_str()) {
                    return Some((area.x + start as u16, y));
                }
            }
        }
        None
    }

    /// Style of the cell at `(column, row)`.
    pub fn style_at(&self, column: u16, row: u16) -> Option<Style> {
        self.buffer().cell((column, row)).map(|c| c.style())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
