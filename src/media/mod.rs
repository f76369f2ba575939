pub(crate) mod ascii;
pub(crate) mod image;

pub(crate) use ascii::{AsciiRasterizer, ImageFit};
pub(crate) use image::{Image, ImageSource, InvalidImage};
