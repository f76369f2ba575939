//! wavedeck: a terminal slideshow about seismic waves.
//!
//! This is not meant to be used as a crate!

pub(crate) mod commands;
pub(crate) mod config;
pub(crate) mod deck;
pub(crate) mod export;
pub(crate) mod logging;
pub(crate) mod markup;
pub(crate) mod media;
pub(crate) mod navigation;
pub(crate) mod palette;
pub(crate) mod presenter;
pub(crate) mod render;
pub(crate) mod resource;
pub(crate) mod style;
pub(crate) mod terminal;
pub(crate) mod view;

pub use crate::{
    config::{Config, ConfigLoadError},
    deck::{Deck, DeckLoadError, Direction},
    export::{ExportError, ExportOptions, TextExporter},
    logging::{init_logging, LoggingError},
    palette::ThemeColor,
    presenter::{PresentationError, Presenter, PresenterOptions},
};
