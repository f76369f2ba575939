use crossterm::terminal::window_size;
use std::io;

/// The size of the terminal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WindowSize {
    pub(crate) rows: u16,
    pub(crate) columns: u16,
}

impl WindowSize {
    /// Get the current window size.
    pub(crate) fn current() -> io::Result<Self> {
        let size = window_size()?;
        Ok(size.into())
    }

    /// Cap the number of columns in this window.
    pub(crate) fn cap_columns(self, max_columns: u16) -> Self {
        Self { rows: self.rows, columns: self.columns.min(max_columns) }
    }
}

impl From<crossterm::terminal::WindowSize> for WindowSize {
    fn from(size: crossterm::terminal::WindowSize) -> Self {
        Self { rows: size.rows, columns: size.columns }
    }
}

/// A rectangular area of the screen, measured in cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Rect {
    pub(crate) column: u16,
    pub(crate) row: u16,
    pub(crate) columns: u16,
    pub(crate) rows: u16,
}

impl Rect {
    pub(crate) const fn new(column: u16, row: u16, columns: u16, rows: u16) -> Self {
        Self { column, row, columns, rows }
    }

    /// Shrink this rect by the given amount of cells on every side.
    pub(crate) fn shrink(&self, horizontal: u16, vertical: u16) -> Self {
        let columns = self.columns.saturating_sub(horizontal.saturating_mul(2));
        let rows = self.rows.saturating_sub(vertical.saturating_mul(2));
        Self {
            column: self.column.saturating_add(horizontal.min(self.columns / 2)),
            row: self.row.saturating_add(vertical.min(self.rows / 2)),
            columns,
            rows,
        }
    }

    /// Take the top `rows` rows of this rect.
    pub(crate) fn top(&self, rows: u16) -> Self {
        Self { rows: rows.min(self.rows), ..*self }
    }

    /// Drop the top `rows` rows off this rect.
    pub(crate) fn skip_rows(&self, rows: u16) -> Self {
        let rows = rows.min(self.rows);
        Self { row: self.row + rows, rows: self.rows - rows, ..*self }
    }

    /// Split this rect into `count` columns separated by `gap` cells.
    ///
    /// Any leftover cells go to the first columns.
    pub(crate) fn split_columns(&self, count: u16, gap: u16) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let total_gap = gap.saturating_mul(count - 1);
        let usable = self.columns.saturating_sub(total_gap);
        let width = usable / count;
        let mut extra = usable % count;
        let mut column = self.column;
        let mut output = Vec::new();
        for _ in 0..count {
            let mut columns = width;
            if extra > 0 {
                columns += 1;
                extra -= 1;
            }
            output.push(Rect { column, columns, ..*self });
            column = column.saturating_add(columns).saturating_add(gap);
        }
        output
    }

    /// Center a rect of the given size within this one.
    pub(crate) fn center(&self, columns: u16, rows: u16) -> Self {
        let columns = columns.min(self.columns);
        let rows = rows.min(self.rows);
        Self {
            column: self.column + (self.columns - columns) / 2,
            row: self.row + (self.rows - rows) / 2,
            columns,
            rows,
        }
    }

    /// Checks whether the given cell is within this rect.
    pub(crate) fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.column && column < self.right() && row >= self.row && row < self.bottom_edge()
    }

    /// The first column to the right of this rect.
    pub(crate) fn right(&self) -> u16 {
        self.column.saturating_add(self.columns)
    }

    /// The first row below this rect.
    pub(crate) fn bottom_edge(&self) -> u16 {
        self.row.saturating_add(self.rows)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}
