use super::{layout::Alignment, properties::Rect, text::Line};
use crate::{
    media::{Image, ImageFit},
    style::{Color, TextStyle},
};

/// A render operation.
///
/// Render operations are primitives that decouple what a slide looks like from how it's drawn.
/// They're applied in order so later operations are drawn on top of earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum RenderOperation {
    /// Clear the entire screen using this background color.
    ClearScreen(Color),

    /// Fill an area with a solid color.
    Fill { rect: Rect, color: Color },

    /// Fill an area with a diagonal gradient going from its top left corner to its bottom right one.
    FillGradient { rect: Rect, from: Color, to: Color },

    /// Blend everything in an area towards a color.
    Tint { rect: Rect, color: Color, ratio: f64 },

    /// Render a single line of text within an area's first row.
    ///
    /// Text that doesn't fit the area's width is cut.
    RenderText { line: Line, area: Rect, alignment: Alignment },

    /// Render an image.
    RenderImage { image: Image, rect: Rect, fit: ImageFit },

    /// Set a single cell.
    SetCell { column: u16, row: u16, character: char, style: TextStyle },
}
