//! The slides being presented.

use serde::Deserialize;
use slide::RawSlide;
use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

pub(crate) mod builtin;
pub(crate) mod slide;

pub(crate) use slide::{ChartSample, Decoration, ImageRef, SlideBody, SlideRecord};

/// The direction text flows in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Right to left.
    #[default]
    Rtl,

    /// Left to right.
    Ltr,
}

/// A deck of slides.
#[derive(Clone, Debug)]
pub struct Deck {
    pub(crate) direction: Direction,
    pub(crate) slides: Vec<SlideRecord>,

    /// The directory relative image paths are resolved against.
    pub(crate) base_path: PathBuf,
}

impl Deck {
    /// Load a deck from a YAML file.
    pub fn load(path: &Path) -> Result<Self, DeckLoadError> {
        let contents = fs::read(path)?;
        let base_path = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let deck = Self::parse(&contents, base_path)?;
        info!("loaded deck with {} slides from {}", deck.slides.len(), path.display());
        Ok(deck)
    }

    /// Load the deck that's bundled in the binary.
    pub fn builtin() -> Result<Self, DeckLoadError> {
        Self::builtin_named(builtin::DEFAULT_DECK)
    }

    pub(crate) fn builtin_named(name: &str) -> Result<Self, DeckLoadError> {
        let contents = builtin::deck_contents(name).ok_or_else(|| DeckLoadError::MissingBuiltin(name.into()))?;
        let deck = Self::parse(contents, PathBuf::from("."))?;
        info!("loaded built-in deck '{name}' with {} slides", deck.slides.len());
        Ok(deck)
    }

    pub(crate) fn parse(contents: &[u8], base_path: PathBuf) -> Result<Self, DeckLoadError> {
        let raw: RawDeck = serde_yaml::from_slice(contents)?;
        if raw.slides.is_empty() {
            return Err(DeckLoadError::Empty);
        }
        let slides: Vec<SlideRecord> = raw.slides.into_iter().map(SlideRecord::from).collect();
        let mut ids = HashSet::new();
        for slide in &slides {
            if !ids.insert(slide.id) {
                warn!("duplicate slide id {}", slide.id);
            }
        }
        Ok(Self { direction: raw.direction, slides, base_path })
    }

    /// Override the deck's text direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Decks are never empty but this keeps clippy happy.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

#[derive(Deserialize)]
struct RawDeck {
    #[serde(default)]
    direction: Direction,

    #[serde(default)]
    slides: Vec<RawSlide>,
}

/// An error loading a deck.
#[derive(Debug, thiserror::Error)]
pub enum DeckLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("invalid deck: {0}")]
    Invalid(#[from] serde_yaml::Error),

    #[error("deck has no slides")]
    Empty,

    #[error("built-in deck '{0}' not found")]
    MissingBuiltin(String),
}
