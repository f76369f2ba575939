use crate::{
    deck::{SlideBody, SlideRecord},
    media::{Image, ImageSource, InvalidImage},
};
use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::warn;

/// Manages resources pulled from the filesystem such as images.
pub struct Resources {
    base_path: PathBuf,

    // Failed loads are cached too so they're only reported once.
    images: HashMap<String, Option<Image>>,
}

impl Resources {
    /// Construct a new resource manager over the provided based path.
    ///
    /// Any relative paths will be assumed to be relative to the given base.
    pub fn new<P: Into<PathBuf>>(base_path: P) -> Self {
        Self { base_path: base_path.into(), images: Default::default() }
    }

    /// Get the image at the given location.
    ///
    /// Remote images are never fetched.
    pub(crate) fn image(&self, location: &str) -> Result<Image, LoadImageError> {
        if is_remote(location) {
            return Err(LoadImageError::Remote(location.to_string()));
        }
        let path = self.base_path.join(Path::new(location));
        let contents = fs::read(&path).map_err(|e| LoadImageError::Io(path.clone(), e))?;
        let image = Image::decode(&contents, ImageSource::Filesystem(path))?;
        Ok(image)
    }

    /// Load every image a slide references.
    ///
    /// Images are cached so subsequent lookups for the same location will be quick.
    pub(crate) fn slide_images(&mut self, slide: &SlideRecord) -> SlideImages {
        let locations: Vec<&str> = match &slide.body {
            SlideBody::Title { background_image: Some(image), .. } => vec![image.as_str()],
            SlideBody::ImageGrid { images } => images.iter().map(|image| image.url.as_str()).collect(),
            _ => Vec::new(),
        };
        let mut output = SlideImages::default();
        for location in locations {
            if location.trim().is_empty() {
                continue;
            }
            if !self.images.contains_key(location) {
                let image = match self.image(location) {
                    Ok(image) => Some(image),
                    Err(e) => {
                        warn!("cannot show image in slide {}: {e}", slide.id);
                        None
                    }
                };
                self.images.insert(location.to_string(), image);
            }
            if let Some(Some(image)) = self.images.get(location) {
                output.0.insert(location.to_string(), image.clone());
            }
        }
        output
    }
}

fn is_remote(location: &str) -> bool {
    let location = location.trim_start();
    ["http://", "https://"].iter().any(|scheme| location.starts_with(scheme))
}

/// The images that could be loaded for a slide, by location.
#[derive(Clone, Debug, Default)]
pub(crate) struct SlideImages(HashMap<String, Image>);

impl SlideImages {
    pub(crate) fn get(&self, location: &str) -> Option<&Image> {
        self.0.get(location)
    }
}

/// An error loading an image.
#[derive(thiserror::Error, Debug)]
pub enum LoadImageError {
    #[error("io error opening {0}: {1}")]
    Io(PathBuf, io::Error),

    #[error("remote images are not fetched: {0}")]
    Remote(String),

    #[error("processing image: {0}")]
    InvalidImage(#[from] InvalidImage),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::deck::ImageRef;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use rstest::rstest;

    fn grid(urls: &[&str]) -> SlideRecord {
        let images = urls.iter().map(|url| ImageRef { url: url.to_string(), caption: None }).collect();
        SlideRecord { id: 1, title: String::new(), theme: None, body: SlideBody::ImageGrid { images } }
    }

    #[rstest]
    #[case::https("https://example.com/a.png", true)]
    #[case::http("http://example.com/a.png", true)]
    #[case::relative("images/a.png", false)]
    #[case::absolute("/tmp/a.png", false)]
    fn remote(#[case] location: &str, #[case] expected: bool) {
        assert_eq!(is_remote(location), expected);
    }

    #[test]
    fn loads_relative_images() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        let image = DynamicImage::ImageRgb8(RgbImage::new(4, 2));
        image.save_with_format(dir.path().join("wave.png"), ImageFormat::Png).expect("failed to save");

        let mut resources = Resources::new(dir.path());
        let images = resources.slide_images(&grid(&["wave.png", "missing.png", "https://example.com/x.png"]));
        assert_eq!(images.get("wave.png").map(Image::dimensions), Some((4, 2)));
        assert!(images.get("missing.png").is_none());
        assert!(images.get("https://example.com/x.png").is_none());
    }

    #[test]
    fn invalid_image() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        fs::write(dir.path().join("bogus.png"), b"not an image").unwrap();
        let resources = Resources::new(dir.path());
        let result = resources.image("bogus.png");
        assert!(matches!(result, Err(LoadImageError::InvalidImage(_))));
    }
}
