use crate::{
    deck::Deck,
    navigation::NavigationState,
    palette::ThemeColor,
    render::{draw_canvas, properties::WindowSize, RenderError},
    resource::Resources,
    view::{animation::AnimationClock, render_slide, ViewContext},
};
use std::io::{self, Write};
use tracing::info;

pub struct ExportOptions {
    pub columns: u16,
    pub rows: u16,
    pub default_theme: ThemeColor,
}

/// Allows exporting decks as plain text.
///
/// Every slide is laid out exactly as it would be shown with animations disabled, and only the
/// characters on screen are kept.
pub struct TextExporter {
    deck: Deck,
    resources: Resources,
    options: ExportOptions,
}

impl TextExporter {
    /// Construct a new exporter for a deck, loading its images relative to the deck's location.
    pub fn new(deck: Deck, options: ExportOptions) -> Self {
        let resources = Resources::new(deck.base_path.clone());
        Self { deck, resources, options }
    }

    /// Export every slide in the deck into the given writer.
    pub fn export<W: Write>(&mut self, mut writer: W) -> Result<(), ExportError> {
        let deck = &self.deck;
        let dimensions = WindowSize { columns: self.options.columns, rows: self.options.rows };
        info!("exporting {} slides as {}x{} text", deck.len(), dimensions.columns, dimensions.rows);
        for index in 0..deck.len() {
            let navigation = NavigationState::new(deck.len(), index);
            let slide = &deck.slides[index];
            let images = self.resources.slide_images(slide);
            let context = ViewContext {
                navigation: &navigation,
                direction: deck.direction,
                default_theme: self.options.default_theme,
                images: &images,
                clock: AnimationClock::Disabled,
                hover: None,
                dimensions,
            };
            let frame = render_slide(slide, &context)?;
            let canvas = draw_canvas(dimensions, frame.operations.iter());
            if index > 0 {
                writeln!(writer)?;
            }
            writeln!(writer, "--- {} ---", navigation.position_label())?;
            for line in canvas.lines() {
                writeln!(writer, "{}", line.trim_end())?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

/// An error during an export.
#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    const DECK: &str = r#"
direction: ltr
slides:
  - id: 1
    type: content_columns
    title: Kinds
    content: ["**Body waves**", "Travel inside", "**Surface waves**", "Travel along the crust"]
  - id: 2
    type: table
    title: Speeds
    table_headers: [A, B]
    table_rows: [[x, y]]
"#;

    fn export(columns: u16, rows: u16) -> Result<String, ExportError> {
        let deck = Deck::parse(DECK.as_bytes(), ".".into()).expect("invalid deck");
        let options = ExportOptions { columns, rows, default_theme: ThemeColor::Slate };
        let mut output = Vec::new();
        TextExporter::new(deck, options).export(&mut output)?;
        Ok(String::from_utf8(output).expect("not utf8"))
    }

    #[test]
    fn every_slide_exported() {
        let output = export(80, 24).expect("export failed");
        assert!(output.contains("--- 1 / 2 ---"));
        assert!(output.contains("--- 2 / 2 ---"));
        assert_eq!(output.lines().count(), 2 * 25 + 1);
    }

    #[test]
    fn markers_are_stripped() {
        let output = export(80, 24).expect("export failed");
        assert!(output.contains("Body waves"));
        assert!(output.contains("Surface waves"));
        assert!(!output.contains("**"));
    }

    #[test]
    fn table_rows_under_headers() {
        let output = export(80, 24).expect("export failed");
        let lines: Vec<_> = output.lines().collect();
        let header_row = lines.iter().position(|line| line.contains(" A  B")).expect("no headers");
        assert!(lines[header_row + 2].contains(" x  y"), "{:?}", lines[header_row + 2]);
    }

    #[test]
    fn images_resolved_from_deck_location() {
        let dir = tempfile::tempdir().expect("failed to create dir");
        let contents = "slides:\n  - id: 1\n    type: image_grid\n    images: [{url: station.png}]\n";
        let path = dir.path().join("deck.yaml");
        std::fs::write(&path, contents).expect("failed to write deck");
        let deck = Deck::load(&path).expect("invalid deck");
        let options = ExportOptions { columns: 80, rows: 24, default_theme: ThemeColor::Slate };

        // Missing images render as placeholders that show their path.
        let mut output = Vec::new();
        TextExporter::new(deck.clone(), options).export(&mut output).expect("export failed");
        assert!(String::from_utf8(output).expect("not utf8").contains("station.png"));

        image::RgbImage::new(8, 8).save(dir.path().join("station.png")).expect("failed to write image");
        let options = ExportOptions { columns: 80, rows: 24, default_theme: ThemeColor::Slate };
        let mut output = Vec::new();
        TextExporter::new(deck, options).export(&mut output).expect("export failed");
        assert!(!String::from_utf8(output).expect("not utf8").contains("station.png"));
    }

    #[test]
    fn trailing_whitespace_trimmed() {
        let output = export(80, 24).expect("export failed");
        assert!(output.lines().all(|line| !line.ends_with(' ')));
    }

    #[rstest]
    #[case::narrow(39, 24)]
    #[case::short(80, 11)]
    fn too_small(#[case] columns: u16, #[case] rows: u16) {
        assert!(matches!(export(columns, rows), Err(ExportError::Render(RenderError::TerminalTooSmall))));
    }
}
