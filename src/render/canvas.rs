use super::{
    properties::{Rect, WindowSize},
    text::Text,
};
use crate::{
    style::{Color, Colors, TextStyle},
    terminal::printer::TerminalCommand,
};
use unicode_width::UnicodeWidthChar;

/// A single cell in a [Canvas].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StyledChar {
    pub(crate) character: char,
    pub(crate) style: TextStyle,

    /// Whether this cell is covered by the wide character in the cell to its left.
    pub(crate) continuation: bool,
}

impl Default for StyledChar {
    fn default() -> Self {
        Self { character: ' ', style: Default::default(), continuation: false }
    }
}

/// An in-memory grid of styled cells.
///
/// Everything is drawn here first so later layers can be painted on top of earlier ones, like the
/// navigation controls floating over a slide or text on top of a gradient, and the result is then
/// flushed to the terminal in one go.
pub(crate) struct Canvas {
    dimensions: WindowSize,
    rows: Vec<Vec<StyledChar>>,
}

impl Canvas {
    pub(crate) fn new(dimensions: WindowSize) -> Self {
        let rows = vec![vec![StyledChar::default(); dimensions.columns as usize]; dimensions.rows as usize];
        Self { dimensions, rows }
    }

    /// Reset every cell using the given background color.
    pub(crate) fn clear(&mut self, background: Option<Color>) {
        let style = TextStyle::colored(Colors { background, foreground: None });
        for row in &mut self.rows {
            for cell in row {
                *cell = StyledChar { character: ' ', style, continuation: false };
            }
        }
    }

    /// Fill the given rect with blank cells using the given background color.
    pub(crate) fn fill(&mut self, rect: Rect, color: Color) {
        self.fill_with(rect, |_, _| color);
    }

    /// Fill the given rect with blank cells using a background color computed per cell.
    ///
    /// The closure receives the column and row relative to the rect's origin.
    pub(crate) fn fill_with<F>(&mut self, rect: Rect, color: F)
    where
        F: Fn(u16, u16) -> Color,
    {
        for row in rect.row..rect.bottom_edge() {
            for column in rect.column..rect.right() {
                let background = color(column - rect.column, row - rect.row);
                if let Some(cell) = self.cell_mut(column, row) {
                    let style = TextStyle::default().bg_color(background);
                    *cell = StyledChar { character: ' ', style, continuation: false };
                }
            }
        }
    }

    /// Blend the background of every cell in the rect towards the given color.
    pub(crate) fn tint(&mut self, rect: Rect, color: Color, ratio: f64) {
        for row in rect.row..rect.bottom_edge() {
            for column in rect.column..rect.right() {
                if let Some(cell) = self.cell_mut(column, row) {
                    let colors = &mut cell.style.colors;
                    colors.background = Some(colors.background.map(|c| c.blend(color, ratio)).unwrap_or(color));
                    colors.foreground = colors.foreground.map(|c| c.blend(color, ratio));
                }
            }
        }
    }

    /// Print text starting at the given position, without going past `max_column`.
    ///
    /// Text that doesn't set a background color inherits the background already in each cell.
    /// Returns the number of columns the text took up.
    pub(crate) fn print(&mut self, column: u16, row: u16, text: &Text, max_column: u16) -> u16 {
        let max_column = max_column.min(self.dimensions.columns);
        let mut current = column;
        for c in text.content.chars() {
            let width = c.width().unwrap_or(0) as u16;
            if width == 0 {
                continue;
            }
            if current.saturating_add(width) > max_column {
                break;
            }
            self.set(current, row, c, text.style);
            if width == 2 {
                if let Some(cell) = self.cell_mut(current + 1, row) {
                    cell.character = ' ';
                    cell.continuation = true;
                }
            }
            current += width;
        }
        current - column
    }

    /// Set a single cell.
    ///
    /// The background already in the cell is kept unless the style sets one.
    pub(crate) fn set(&mut self, column: u16, row: u16, character: char, style: TextStyle) {
        let Some(cell) = self.cell(column, row) else {
            return;
        };
        let background = cell.style.colors.background;
        // If we're overwriting half of a wide character, blank it out entirely.
        if cell.continuation && column > 0 {
            if let Some(previous) = self.cell_mut(column - 1, row) {
                previous.character = ' ';
            }
        }
        if let Some(next) = self.cell_mut(column + 1, row) {
            if next.continuation {
                *next = StyledChar { continuation: false, ..*next };
            }
        }
        let style = style.merged(&TextStyle::colored(Colors { background, foreground: None }));
        if let Some(cell) = self.cell_mut(column, row) {
            *cell = StyledChar { character, style, continuation: false };
        }
    }

    /// Get a cell.
    pub(crate) fn cell(&self, column: u16, row: u16) -> Option<&StyledChar> {
        self.rows.get(row as usize).and_then(|cells| cells.get(column as usize))
    }

    fn cell_mut(&mut self, column: u16, row: u16) -> Option<&mut StyledChar> {
        self.rows.get_mut(row as usize).and_then(|cells| cells.get_mut(column as usize))
    }

    /// Get the plain text contents of every row.
    pub(crate) fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| !cell.continuation).map(|cell| cell.character).collect())
            .collect()
    }

    /// Build the terminal commands that draw this canvas.
    ///
    /// Consecutive cells sharing a style are printed in a single command.
    pub(crate) fn commands(&self) -> Vec<TerminalCommand> {
        let mut commands = Vec::new();
        for (row_index, row) in self.rows.iter().enumerate() {
            commands.push(TerminalCommand::MoveTo { column: 0, row: row_index as u16 });
            let mut run = String::new();
            let mut run_style = None;
            for cell in row.iter().filter(|cell| !cell.continuation) {
                if run_style != Some(cell.style) {
                    if let Some(style) = run_style.take() {
                        commands.push(TerminalCommand::PrintText { content: std::mem::take(&mut run), style });
                    }
                    run_style = Some(cell.style);
                }
                run.push(cell.character);
            }
            if let Some(style) = run_style {
                commands.push(TerminalCommand::PrintText { content: run, style });
            }
        }
        commands
    }
}
