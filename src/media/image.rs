use image::{DynamicImage, GenericImageView, ImageError};
use std::{fmt, path::PathBuf, rc::Rc};

/// An image.
///
/// This stores the decoded image in an [std::rc::Rc] so it's cheap to clone.
#[derive(Clone)]
pub(crate) struct Image {
    inner: Rc<DynamicImage>,
    pub(crate) source: ImageSource,
}

impl Image {
    /// Decode an image from its encoded contents.
    pub(crate) fn decode(contents: &[u8], source: ImageSource) -> Result<Self, InvalidImage> {
        let image = image::load_from_memory(contents)?;
        Ok(Self { inner: Rc::new(image), source })
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    pub(crate) fn original(&self) -> &DynamicImage {
        &self.inner
    }
}

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.dimensions();
        write!(f, "Image<{width}x{height}>")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ImageSource {
    Filesystem(PathBuf),
}

#[derive(thiserror::Error, Debug)]
#[error("invalid image: {0}")]
pub struct InvalidImage(#[from] ImageError);
