//! Character grid the terminal UI renders into
//!
//! Rendering targets this grid instead of the terminal so frames can be
//! compared as plain lines in tests; the binary copies rows to the screen.

/// Row-major character grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGrid {
    cells: Vec<char>,
    width: u16,
    height: u16,
}

impl TextGrid {
    /// Creates a grid filled with spaces
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![' '; usize::from(width) * usize::from(height)],
            width,
            height,
        }
    }

    /// Grid width
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Grid height
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    /// Character at (x, y)
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<char> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Sets the character at (x, y); out-of-bounds writes are dropped
    pub fn set(&mut self, x: u16, y: u16, ch: char) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx] = ch;
        }
    }

    /// Fills with spaces
    pub fn clear(&mut self) {
        self.cells.fill(' ');
    }

    /// Writes `s` from (x, y), truncating at the right edge
    pub fn write_str(&mut self, x: u16, y: u16, s: &str) {
        for (offset, ch) in s.chars().enumerate() {
            let Ok(offset) = u16::try_from(offset) else {
                break;
            };
            let col = x.saturating_add(offset);
            if col >= self.width {
                break;
            }
            self.set(col, y, ch);
        }
    }

    /// Writes `s` inside columns `left..right`, flush against `right`.
    ///
    /// Text wider than the span keeps its tail, starting at `left`.
    pub fn write_right_aligned(&mut self, left: u16, right: u16, y: u16, s: &str) {
        let span = right.saturating_sub(left);
        if span == 0 {
            return;
        }
        let len = u16::try_from(s.chars().count()).unwrap_or(u16::MAX);
        if len > span {
            // keep the tail, which is the most recent input
            let skip = usize::from(len - span);
            let tail: String = s.chars().skip(skip).collect();
            self.write_str(left, y, &tail);
        } else {
            self.write_str(right - len, y, s);
        }
    }

    /// Draws a single-line box border
    pub fn draw_box(&mut self, x: u16, y: u16, width: u16, height: u16) {
        if width < 2 || height < 2 {
            return;
        }
        let right = x + width - 1;
        let bottom = y + height - 1;
        for col in x + 1..right {
            self.set(col, y, '─');
            self.set(col, bottom, '─');
        }
        for row in y + 1..bottom {
            self.set(x, row, '│');
            self.set(right, row, '│');
        }
        self.set(x, y, '┌');
        self.set(right, y, '┐');
        self.set(x, bottom, '└');
        self.set(right, bottom, '┘');
    }

    /// Rows as strings with trailing spaces trimmed
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.width.max(1)))
            .take(usize::from(self.height))
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect()
    }
}
