use super::ViewContext;
use crate::{
    deck::SlideRecord,
    media::ImageFit,
    palette::{colors, ThemeColor},
    render::{operation::RenderOperation, properties::Rect},
    style::{Color, TextStyle},
};

const OVERLAY_TINT_RATIO: f64 = 0.6;

/// How the container a slide is drawn in looks.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum FrameMode {
    /// A gradient using a palette entry.
    Themed(ThemeColor),

    /// A tinted background image.
    ImageOverlay { image: String },
}

impl FrameMode {
    /// Select the mode for a slide.
    ///
    /// Only title slides with a background image use an image overlay.
    pub(crate) fn select(slide: &SlideRecord, default_theme: ThemeColor) -> Self {
        match slide.body.overlay_image() {
            Some(image) => Self::ImageOverlay { image: image.to_string() },
            None => Self::Themed(slide.theme.unwrap_or(default_theme)),
        }
    }
}

/// The area inside a slide's frame where content goes.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SlideArea {
    pub(crate) content: Rect,

    /// The color text is drawn with.
    pub(crate) foreground: Color,

    /// The color that best represents the background, used to fade text in.
    pub(crate) background: Color,
}

impl SlideArea {
    pub(crate) fn text_style(&self) -> TextStyle {
        TextStyle::default().fg_color(self.foreground)
    }
}

/// Draw the page and the slide's container, returning where its content should go.
pub(crate) fn draw_frame(
    slide: &SlideRecord,
    context: &ViewContext,
    operations: &mut Vec<RenderOperation>,
) -> SlideArea {
    let dimensions = context.dimensions;
    let container = Rect::new(2, 1, dimensions.columns.saturating_sub(5), dimensions.rows.saturating_sub(3));
    let shadow = Rect { column: container.column + 1, row: container.row + 1, ..container };
    operations.push(RenderOperation::ClearScreen(colors::PAGE));
    operations.push(RenderOperation::Fill { rect: shadow, color: colors::SHADOW });

    let (foreground, background) = match FrameMode::select(slide, context.default_theme) {
        FrameMode::Themed(theme) => {
            let palette = theme.palette();
            operations.push(RenderOperation::FillGradient { rect: container, from: palette.start, to: palette.end });
            (palette.foreground, palette.start.blend(palette.end, 0.5))
        }
        FrameMode::ImageOverlay { image } => {
            operations.push(RenderOperation::Fill { rect: container, color: colors::OVERLAY_TINT });
            if let Some(image) = context.images.get(&image) {
                let image = image.clone();
                operations.push(RenderOperation::RenderImage { image, rect: container, fit: ImageFit::Cover });
                operations.push(RenderOperation::Tint {
                    rect: container,
                    color: colors::OVERLAY_TINT,
                    ratio: OVERLAY_TINT_RATIO,
                });
            }
            (colors::WHITE, colors::OVERLAY_TINT)
        }
    };
    round_corners(container, operations);
    SlideArea { content: container.shrink(4, 1), foreground, background }
}

fn round_corners(container: Rect, operations: &mut Vec<RenderOperation>) {
    if container.is_empty() {
        return;
    }
    let (left, right) = (container.column, container.right() - 1);
    let (top, bottom) = (container.row, container.bottom_edge() - 1);
    let corners = [
        (left, top, colors::PAGE),
        (right, top, colors::PAGE),
        (left, bottom, colors::PAGE),
        (right, bottom, colors::SHADOW),
    ];
    for (column, row, color) in corners {
        let style = TextStyle::default().bg_color(color);
        operations.push(RenderOperation::SetCell { column, row, character: ' ', style });
    }
}
