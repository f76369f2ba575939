//! A line chart of seismogram samples drawn using braille characters.
//!
//! Every terminal cell holds a 2x4 grid of dots, so the chart has twice as many horizontal and
//! four times as many vertical points as the cells it covers.

use super::{text_width, Frame, HitTarget, TextFlow, ViewContext};
use crate::{
    deck::ChartSample,
    palette::colors,
    render::{
        layout::Alignment,
        operation::RenderOperation,
        properties::Rect,
        text::{Line, Text},
    },
    style::{Color, TextStyle},
};

const TITLE: &str = "Seismogram simulation";
const CAPTION: &str = "* Simulation: note how S waves arrive after P waves";
const AMPLITUDE_PADDING: f64 = 10.0;
const MIN_TIME: f64 = 0.0;
const MAX_TIME: f64 = 100.0;

// The bit for each dot in a braille cell, indexed by row and then column.
const DOTS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

struct Marker {
    time: f64,
    label: &'static str,
    color: Color,
}

const MARKERS: [Marker; 3] = [
    Marker { time: 20.0, label: "P-Wave", color: colors::P_WAVE },
    Marker { time: 45.0, label: "S-Wave", color: colors::S_WAVE },
    Marker { time: 75.0, label: "Surface", color: colors::SURFACE_WAVE },
];

/// The range of values a chart covers on each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ChartDomain {
    time: (f64, f64),
    amplitude: (f64, f64),
}

impl ChartDomain {
    /// Fit a domain around a set of samples.
    ///
    /// The time axis always covers the reference markers.
    pub(crate) fn new(samples: &[ChartSample]) -> Self {
        let (min_time, max_time) = bounds(samples.iter().map(|s| s.time)).unwrap_or((MIN_TIME, MAX_TIME));
        let (min_amplitude, max_amplitude) = bounds(samples.iter().map(|s| s.amplitude)).unwrap_or((0.0, 0.0));
        Self {
            time: (min_time.min(MIN_TIME), max_time.max(MAX_TIME)),
            amplitude: (min_amplitude - AMPLITUDE_PADDING, max_amplitude + AMPLITUDE_PADDING),
        }
    }

    /// The horizontal dot a time falls on, out of `width` dots.
    fn x(&self, time: f64, width: usize) -> usize {
        scale(time, self.time, width)
    }

    /// The vertical dot an amplitude falls on, out of `height` dots. Higher amplitudes go up.
    fn y(&self, amplitude: f64, height: usize) -> usize {
        height.saturating_sub(1) - scale(amplitude, self.amplitude, height)
    }

    /// The time at the given horizontal dot.
    fn time_at(&self, x: usize, width: usize) -> f64 {
        let (min, max) = self.time;
        let ratio = x as f64 / width.saturating_sub(1).max(1) as f64;
        min + ratio * (max - min)
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.filter(|value| value.is_finite()).fold(None, |bounds, value| match bounds {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

fn scale(value: f64, (min, max): (f64, f64), size: usize) -> usize {
    let last = size.saturating_sub(1);
    if max <= min || !value.is_finite() {
        return 0;
    }
    let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
    (ratio * last as f64).round() as usize
}

/// The position of every sample in a grid of dots.
pub(crate) fn sample_points(
    samples: &[ChartSample],
    domain: &ChartDomain,
    width: usize,
    height: usize,
) -> Vec<(usize, usize)> {
    samples.iter().map(|sample| (domain.x(sample.time, width), domain.y(sample.amplitude, height))).collect()
}

/// The sample closest in time to the given one.
pub(crate) fn nearest_sample(samples: &[ChartSample], time: f64) -> Option<&ChartSample> {
    samples.iter().min_by(|a, b| (a.time - time).abs().total_cmp(&(b.time - time).abs()))
}

/// A grid of braille cells where dots can be turned on individually.
pub(crate) struct BrailleGrid {
    columns: usize,
    rows: usize,
    cells: Vec<(u8, Option<Color>)>,
}

impl BrailleGrid {
    pub(crate) fn new(columns: u16, rows: u16) -> Self {
        let (columns, rows) = (columns as usize, rows as usize);
        Self { columns, rows, cells: vec![(0, None); columns * rows] }
    }

    pub(crate) fn width(&self) -> usize {
        self.columns * 2
    }

    pub(crate) fn height(&self) -> usize {
        self.rows * 4
    }

    /// Turn on a dot. The cell it's in takes the given color.
    pub(crate) fn set(&mut self, x: usize, y: usize, color: Color) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        let cell = &mut self.cells[(y / 4) * self.columns + x / 2];
        cell.0 |= DOTS[y % 4][x % 2];
        cell.1 = Some(color);
    }

    /// Draw a straight line between two dots, skipping any dot at or past `limit` horizontally.
    pub(crate) fn line(&mut self, from: (usize, usize), to: (usize, usize), color: Color, limit: f64) {
        let (mut x, mut y) = (from.0 as i64, from.1 as i64);
        let (target_x, target_y) = (to.0 as i64, to.1 as i64);
        let dx = (target_x - x).abs();
        let dy = -(target_y - y).abs();
        let step_x = if x < target_x { 1 } else { -1 };
        let step_y = if y < target_y { 1 } else { -1 };
        let mut error = dx + dy;
        loop {
            if (x as f64) < limit {
                self.set(x as usize, y as usize, color);
            }
            if x == target_x && y == target_y {
                break;
            }
            let doubled = error * 2;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }
    }

    /// Get the character for a cell, if any of its dots are on.
    pub(crate) fn cell(&self, column: usize, row: usize) -> Option<(char, Color)> {
        let (dots, color) = *self.cells.get(row * self.columns + column)?;
        let character = char::from_u32(0x2800 + dots as u32)?;
        match (dots, color) {
            (0, _) | (_, None) => None,
            (_, Some(color)) => Some((character, color)),
        }
    }

    fn operations(&self, origin: Rect) -> impl Iterator<Item = RenderOperation> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).filter_map(move |column| {
                let (character, color) = self.cell(column, row)?;
                Some(RenderOperation::SetCell {
                    column: origin.column + column as u16,
                    row: origin.row + row as u16,
                    character,
                    style: TextStyle::default().fg_color(color),
                })
            })
        })
    }
}

/// Draw the chart widget and its caption within an area.
pub(crate) fn draw_chart(samples: &[ChartSample], area: Rect, context: &ViewContext, frame: &mut Frame) {
    let caption_style = TextStyle::default().fg_color(colors::MUTED).italics();
    let caption = Line::from(Text::new(CAPTION, caption_style)).wrap(area.columns as usize);
    let widget = Rect { rows: area.rows.saturating_sub(caption.len() as u16 + 1), ..area };
    let inner = widget.shrink(1, 0);
    // Title, marker labels and at least a couple of rows to plot on.
    if inner.rows < 4 || inner.columns < 10 {
        return;
    }
    let operations = &mut frame.operations;
    operations.push(RenderOperation::Fill { rect: widget, color: colors::PANEL });
    operations.push(RenderOperation::RenderText {
        line: Text::new(TITLE, TextStyle::default().fg_color(colors::TABLE_CELL).bold()).into(),
        area: inner.top(1),
        alignment: Alignment::Center,
    });

    let labels_row = inner.row + 1;
    let plot = inner.skip_rows(2);
    let domain = ChartDomain::new(samples);
    let mut grid = BrailleGrid::new(plot.columns, plot.rows);
    let (width, height) = (grid.width(), grid.height());

    if domain.amplitude.0 < 0.0 && domain.amplitude.1 > 0.0 {
        let baseline = domain.y(0.0, height);
        for x in (0..width).filter(|x| x % 4 < 2) {
            grid.set(x, baseline, colors::CHART_GRID);
        }
    }
    for marker in &MARKERS {
        let x = domain.x(marker.time, width);
        for y in (0..height).filter(|y| y % 4 < 2) {
            grid.set(x, y, marker.color);
        }
        let label_width = text_width(marker.label);
        let center = plot.column + (x / 2) as u16;
        let start =
            center.saturating_sub(label_width / 2).min(plot.right().saturating_sub(label_width)).max(plot.column);
        operations.push(RenderOperation::RenderText {
            line: Text::new(marker.label, TextStyle::default().fg_color(marker.color).bold()).into(),
            area: Rect::new(start, labels_row, label_width, 1),
            alignment: Alignment::Left,
        });
    }

    let visible = context.clock.chart_progress() * width as f64;
    let points = sample_points(samples, &domain, width, height);
    match points.as_slice() {
        [point] => grid.line(*point, *point, colors::CHART_LINE, visible),
        points => {
            for segment in points.windows(2) {
                grid.line(segment[0], segment[1], colors::CHART_LINE, visible);
            }
        }
    };
    operations.extend(grid.operations(plot));

    if let Some((column, row)) = context.hover.filter(|(column, row)| plot.contains(*column, *row)) {
        let time = domain.time_at((column - plot.column) as usize * 2, width);
        if let Some(sample) = nearest_sample(samples, time) {
            let text = format!(" Amplitude: {:.2} ", sample.amplitude);
            let tooltip_width = text_width(&text);
            let row = if row > plot.row { row - 1 } else { row + 1 };
            let start = (column + 2).min(widget.right().saturating_sub(tooltip_width)).max(widget.column);
            let style = TextStyle::default().fg_color(colors::TABLE_CELL).bg_color(colors::TOOLTIP);
            operations.push(RenderOperation::RenderText {
                line: Text::new(text, style).into(),
                area: Rect::new(start, row, tooltip_width, 1),
                alignment: Alignment::Left,
            });
        }
    }

    let caption_area = Rect { row: widget.bottom_edge() + 1, rows: caption.len() as u16, ..area };
    let mut flow = TextFlow::new(caption_area, context.direction, operations);
    for line in caption {
        flow.push_line(line);
    }
    frame.add_hit(plot, HitTarget::Chart);
}
