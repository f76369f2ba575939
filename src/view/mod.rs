//! Turns a slide into render operations.
//!
//! Everything in here is a pure function of the slide being shown and the state of the
//! presentation around it: no input is read and nothing is drawn on the terminal.

pub(crate) mod animation;
pub(crate) mod chart;
pub(crate) mod controls;
pub(crate) mod frame;
pub(crate) mod templates;

use crate::{
    deck::{Direction, SlideRecord},
    navigation::NavigationState,
    palette::ThemeColor,
    render::{
        layout::{reading_order, Alignment},
        operation::RenderOperation,
        properties::{Rect, WindowSize},
        text::{Line, Text},
        RenderError,
    },
    resource::SlideImages,
};
use animation::AnimationClock;
use unicode_width::UnicodeWidthStr;

/// The smallest window a slide can be laid out in.
pub(crate) const MIN_WINDOW_SIZE: WindowSize = WindowSize { columns: 40, rows: 12 };

/// Everything around a slide that affects how it looks.
pub(crate) struct ViewContext<'a> {
    pub(crate) navigation: &'a NavigationState,
    pub(crate) direction: Direction,
    pub(crate) default_theme: ThemeColor,
    pub(crate) images: &'a SlideImages,
    pub(crate) clock: AnimationClock,

    /// The cell the mouse pointer is over, if known.
    pub(crate) hover: Option<(u16, u16)>,
    pub(crate) dimensions: WindowSize,
}

/// Something on screen that reacts to the mouse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum HitTarget {
    Retreat,
    Advance,
    Reset,
    Chart,
}

/// A fully laid out slide.
#[derive(Debug, Default)]
pub(crate) struct Frame {
    pub(crate) operations: Vec<RenderOperation>,
    hits: Vec<(Rect, HitTarget)>,
}

impl Frame {
    pub(crate) fn add_hit(&mut self, rect: Rect, target: HitTarget) {
        self.hits.push((rect, target));
    }

    /// Find what's under the given cell.
    ///
    /// Regions added later are drawn on top so they take precedence.
    pub(crate) fn hit(&self, column: u16, row: u16) -> Option<HitTarget> {
        self.hits.iter().rev().find(|(rect, _)| rect.contains(column, row)).map(|(_, target)| *target)
    }
}

/// Lay out a slide, its frame and the navigation controls.
pub(crate) fn render_slide(slide: &SlideRecord, context: &ViewContext) -> Result<Frame, RenderError> {
    let WindowSize { columns, rows } = context.dimensions;
    if columns < MIN_WINDOW_SIZE.columns || rows < MIN_WINDOW_SIZE.rows {
        return Err(RenderError::TerminalTooSmall);
    }
    let mut frame = Frame::default();
    let area = frame::draw_frame(slide, context, &mut frame.operations);
    templates::render_body(slide, &area, context, &mut frame);
    controls::draw_controls(context, &mut frame);
    Ok(frame)
}

/// Writes lines of text top to bottom within an area.
///
/// Anything that doesn't fit vertically is dropped.
pub(crate) struct TextFlow<'a> {
    operations: &'a mut Vec<RenderOperation>,
    area: Rect,
    row: u16,
    direction: Direction,
    alignment: Alignment,
}

impl<'a> TextFlow<'a> {
    pub(crate) fn new(area: Rect, direction: Direction, operations: &'a mut Vec<RenderOperation>) -> Self {
        Self { operations, area, row: area.row, direction, alignment: Alignment::reading(direction) }
    }

    pub(crate) fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// The part of the area that hasn't been written to yet.
    pub(crate) fn remaining(&self) -> Rect {
        self.area.skip_rows(self.row - self.area.row)
    }

    pub(crate) fn is_full(&self) -> bool {
        self.row >= self.area.bottom_edge()
    }

    pub(crate) fn skip(&mut self, rows: u16) {
        self.row = self.row.saturating_add(rows).min(self.area.bottom_edge());
    }

    /// Write a single line, cutting it if it's too wide.
    pub(crate) fn push_line(&mut self, line: Line) {
        if self.is_full() {
            return;
        }
        let area = Rect { row: self.row, rows: 1, ..self.area };
        self.operations.push(RenderOperation::RenderText { line, area, alignment: self.alignment });
        self.row += 1;
    }

    /// Write a line, wrapping it so it fits the area's width.
    pub(crate) fn push_wrapped(&mut self, line: Line) {
        for line in line.wrap(self.area.columns as usize) {
            self.push_line(line);
        }
    }

    /// Write a line preceded by a marker, like a bullet.
    ///
    /// The marker goes on the side reading starts from and wrapped lines are indented past it.
    pub(crate) fn push_marked(&mut self, marker: Text, line: Line) {
        let indent = marker.width() + 1;
        let width = (self.area.columns as usize).saturating_sub(indent);
        for (index, mut line) in line.wrap(width).into_iter().enumerate() {
            let lead = match index {
                0 => vec![marker.clone(), Text::new(" ", marker.style)],
                _ => vec![Text::from(" ".repeat(indent))],
            };
            line.0 = match self.direction {
                Direction::Rtl => line.0.into_iter().chain(reading_order(lead, self.direction)).collect(),
                Direction::Ltr => lead.into_iter().chain(line.0).collect(),
            };
            self.push_line(line);
        }
    }
}

/// Build a line out of chunks given in reading order.
pub(crate) fn reading_line(chunks: Vec<Text>, direction: Direction) -> Line {
    Line(reading_order(chunks, direction))
}

/// The width of a string in terminal cells, capped to fit in a `u16`.
pub(crate) fn text_width(text: &str) -> u16 {
    text.width().min(u16::MAX as usize) as u16
}
