use super::image::Image;
use crate::{
    render::{canvas::Canvas, properties::Rect},
    style::{Color, TextStyle},
};
use image::{imageops::FilterType, Rgba};
use itertools::Itertools;

const TOP_CHAR: char = '▀';
const BOTTOM_CHAR: char = '▄';

/// How an image is scaled into the area it's drawn on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ImageFit {
    /// Fill the entire area, cropping whatever doesn't fit.
    Cover,

    /// Fit the entire image in the area, centered, keeping its aspect ratio.
    Contain,
}

/// Draws images onto a canvas using half blocks.
///
/// Each cell fits 2 vertical pixels: the top one is the foreground color of a `▀` and the bottom
/// one is its background color.
pub(crate) struct AsciiRasterizer;

impl AsciiRasterizer {
    pub(crate) fn draw(image: &Image, rect: Rect, fit: ImageFit, canvas: &mut Canvas) {
        if rect.is_empty() {
            return;
        }
        let (width, height) = (rect.columns as u32, rect.rows as u32 * 2);
        let (resized, area) = match fit {
            ImageFit::Cover => (image.original().resize_to_fill(width, height, FilterType::Triangle), rect),
            ImageFit::Contain => {
                let resized = image.original().resize(width, height, FilterType::Triangle);
                let columns = resized.width() as u16;
                let rows = resized.height().div_ceil(2) as u16;
                (resized, rect.center(columns, rows))
            }
        };
        let pixels = resized.into_rgba8();

        // Iterate pixel rows in pairs to merge both pixels in a single cell. The last pair may
        // only have a top row, in which case the bottom one is treated as transparent.
        let chunks = pixels.rows().chunks(2);
        for (row_offset, mut rows) in (&chunks).into_iter().enumerate() {
            let Some(top_row) = rows.next() else {
                break;
            };
            let mut bottom_row = rows.next();
            let row = area.row + row_offset as u16;
            for (column_offset, top_pixel) in top_row.enumerate() {
                let column = area.column + column_offset as u16;
                let background = canvas.cell(column, row).and_then(|cell| cell.style.colors.background);
                let bottom_pixel = bottom_row.as_mut().and_then(|pixels| pixels.next());
                let top = Self::pixel_color(top_pixel, background);
                let bottom = bottom_pixel.and_then(|pixel| Self::pixel_color(pixel, background));
                let (character, style) = match (top, bottom) {
                    (Some(top), Some(bottom)) => (TOP_CHAR, TextStyle::default().fg_color(top).bg_color(bottom)),
                    (Some(top), None) => (TOP_CHAR, TextStyle::default().fg_color(top)),
                    (None, Some(bottom)) => (BOTTOM_CHAR, TextStyle::default().fg_color(bottom)),
                    (None, None) => continue,
                };
                canvas.set(column, row, character, style);
            }
        }
    }

    fn pixel_color(pixel: &Rgba<u8>, background: Option<Color>) -> Option<Color> {
        let [r, g, b, alpha] = pixel.0;
        let color = Color::new(r, g, b);
        match (alpha, background) {
            (0, _) => None,
            (255, _) | (_, None) => Some(color),
            // Partially transparent pixels are blended with whatever is behind them.
            (alpha, Some(background)) => Some(background.blend(color, alpha as f64 / 255.0)),
        }
    }
}
