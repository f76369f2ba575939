use crate::palette::ThemeColor;
use serde::Deserialize;
use std::str::FromStr;
use strum::{Display, EnumString};
use tracing::warn;

/// A single slide in a deck.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SlideRecord {
    pub(crate) id: u32,
    pub(crate) title: String,

    /// The palette entry for this slide, if it declared a valid one.
    pub(crate) theme: Option<ThemeColor>,
    pub(crate) body: SlideBody,
}

/// The content of a slide, which depends on its type.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum SlideBody {
    Title { subtitle: Option<String>, background_image: Option<String> },
    ContentList { items: Vec<String> },
    ContentColumns { paragraphs: Vec<String> },
    Table { headers: Vec<String>, rows: Vec<Vec<String>> },
    Chart { bullets: Vec<String>, samples: Vec<ChartSample> },
    Quote { paragraphs: Vec<String> },
    Diagram { lines: Vec<String>, decorations: Vec<Decoration> },
    ImageGrid { images: Vec<ImageRef> },
    Unknown { kind: String },
}

impl SlideBody {
    /// The background image for a slide that should be drawn in image overlay mode.
    pub(crate) fn overlay_image(&self) -> Option<&str> {
        match self {
            Self::Title { background_image: Some(image), .. } if !image.trim().is_empty() => Some(image),
            _ => None,
        }
    }
}

/// The type of a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub(crate) enum SlideKind {
    Title,
    ContentList,
    ContentColumns,
    Table,
    Chart,
    Quote,
    Diagram,
    ImageGrid,
}

/// A single point in a chart.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub(crate) struct ChartSample {
    pub(crate) time: f64,
    pub(crate) amplitude: f64,
}

/// An image shown in an image grid.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct ImageRef {
    pub(crate) url: String,

    #[serde(default)]
    pub(crate) caption: Option<String>,
}

/// An extra illustration drawn on a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub(crate) enum Decoration {
    /// The P and S wave shadow zones left by the earth's core.
    ShadowZones,
}

/// A slide as written in a deck file.
///
/// Every field that isn't meaningful for the slide's type is ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct RawSlide {
    id: u32,

    #[serde(rename = "type")]
    kind: String,

    #[serde(default)]
    title: String,

    #[serde(default)]
    subtitle: Option<String>,

    #[serde(default)]
    content: Vec<String>,

    #[serde(default, alias = "tableHeaders")]
    table_headers: Vec<String>,

    #[serde(default, alias = "tableRows")]
    table_rows: Vec<Vec<String>>,

    #[serde(default, alias = "chartData")]
    chart_data: Vec<ChartSample>,

    #[serde(default)]
    images: Vec<ImageRef>,

    #[serde(default, alias = "backgroundImage")]
    background_image: Option<String>,

    #[serde(default, alias = "themeColor")]
    theme_color: Option<String>,

    #[serde(default)]
    decorations: Vec<String>,
}

impl From<RawSlide> for SlideRecord {
    fn from(raw: RawSlide) -> Self {
        let RawSlide {
            id,
            kind,
            title,
            subtitle,
            content,
            table_headers,
            table_rows,
            chart_data,
            images,
            background_image,
            theme_color,
            decorations,
        } = raw;
        let theme = theme_color.as_deref().and_then(|name| match ThemeColor::from_str(name.trim()) {
            Ok(theme) => Some(theme),
            Err(_) => {
                warn!("slide {id} has unknown theme color '{name}'");
                None
            }
        });
        let body = match SlideKind::from_str(kind.trim()) {
            Ok(SlideKind::Title) => SlideBody::Title { subtitle, background_image },
            Ok(SlideKind::ContentList) => SlideBody::ContentList { items: content },
            Ok(SlideKind::ContentColumns) => SlideBody::ContentColumns { paragraphs: content },
            Ok(SlideKind::Table) => SlideBody::Table { headers: table_headers, rows: table_rows },
            Ok(SlideKind::Chart) => SlideBody::Chart { bullets: content, samples: chart_data },
            Ok(SlideKind::Quote) => SlideBody::Quote { paragraphs: content },
            Ok(SlideKind::Diagram) => {
                let decorations = decorations
                    .iter()
                    .filter_map(|name| match Decoration::from_str(name.trim()) {
                        Ok(decoration) => Some(decoration),
                        Err(_) => {
                            warn!("slide {id} has unknown decoration '{name}'");
                            None
                        }
                    })
                    .collect();
                SlideBody::Diagram { lines: content, decorations }
            }
            Ok(SlideKind::ImageGrid) => SlideBody::ImageGrid { images },
            Err(_) => {
                warn!("slide {id} has unknown type '{kind}'");
                SlideBody::Unknown { kind }
            }
        };
        Self { id, title, theme, body }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    fn parse(input: &str) -> SlideRecord {
        let raw: RawSlide = serde_yaml::from_str(input).expect("invalid slide");
        raw.into()
    }

    #[rstest]
    #[case::snake_case("content_list")]
    #[case::upper_case("CONTENT_LIST")]
    #[case::mixed_case("Content_List")]
    fn case_insensitive_type(#[case] kind: &str) {
        let slide = parse(&format!("{{id: 1, type: {kind}, content: [a, b]}}"));
        assert_eq!(slide.body, SlideBody::ContentList { items: vec!["a".into(), "b".into()] });
    }

    #[test]
    fn unknown_type() {
        let slide = parse("{id: 3, type: video, title: hi}");
        assert_eq!(slide.body, SlideBody::Unknown { kind: "video".into() });
        assert_eq!(slide.title, "hi");
    }

    #[test]
    fn irrelevant_fields_ignored() {
        let slide = parse("{id: 1, type: quote, content: [q], table_headers: [a], subtitle: s, extra: 42}");
        assert_eq!(slide.body, SlideBody::Quote { paragraphs: vec!["q".into()] });
    }

    #[test]
    fn table() {
        let slide = parse("{id: 1, type: table, table_headers: [A, B], table_rows: [[x, y]]}");
        let headers = vec!["A".into(), "B".into()];
        let rows = vec![vec!["x".into(), "y".into()]];
        assert_eq!(slide.body, SlideBody::Table { headers, rows });
    }

    #[test]
    fn camel_case_fields() {
        let slide = parse("{id: 1, type: TITLE, backgroundImage: bg.png, themeColor: indigo}");
        assert_eq!(slide.body, SlideBody::Title { subtitle: None, background_image: Some("bg.png".into()) });
        assert_eq!(slide.theme, Some(ThemeColor::Indigo));
    }

    #[test]
    fn chart() {
        let slide = parse("{id: 8, type: chart, chart_data: [{time: 0, amplitude: 0}, {time: 50, amplitude: 10.5}]}");
        let SlideBody::Chart { samples, bullets } = slide.body else { panic!("not a chart") };
        assert!(bullets.is_empty());
        assert_eq!(samples, &[ChartSample { time: 0.0, amplitude: 0.0 }, ChartSample { time: 50.0, amplitude: 10.5 }]);
    }

    #[test]
    fn images() {
        let slide = parse("{id: 1, type: image_grid, images: [{url: a.png, caption: A}, {url: b.png}]}");
        let expected = vec![
            ImageRef { url: "a.png".into(), caption: Some("A".into()) },
            ImageRef { url: "b.png".into(), caption: None },
        ];
        assert_eq!(slide.body, SlideBody::ImageGrid { images: expected });
    }

    #[rstest]
    #[case::known("[shadow_zones]", vec![Decoration::ShadowZones])]
    #[case::unknown("[sparkles]", vec![])]
    #[case::absent("[]", vec![])]
    fn decorations(#[case] names: &str, #[case] expected: Vec<Decoration>) {
        let slide = parse(&format!("{{id: 12, type: diagram, decorations: {names}}}"));
        assert_eq!(slide.body, SlideBody::Diagram { lines: vec![], decorations: expected });
    }

    #[rstest]
    #[case::valid(Some("teal"), Some(ThemeColor::Teal))]
    #[case::invalid(Some("bg-pink-500"), None)]
    #[case::absent(None, None)]
    fn theme(#[case] name: Option<&str>, #[case] expected: Option<ThemeColor>) {
        let field = name.map(|name| format!(", theme_color: {name}")).unwrap_or_default();
        let slide = parse(&format!("{{id: 1, type: quote{field}}}"));
        assert_eq!(slide.theme, expected);
    }

    #[rstest]
    #[case::present(Some("bg.png"), Some("bg.png"))]
    #[case::blank(Some("  "), None)]
    #[case::absent(None, None)]
    fn overlay_image(#[case] image: Option<&str>, #[case] expected: Option<&str>) {
        let body = SlideBody::Title { subtitle: None, background_image: image.map(String::from) };
        assert_eq!(body.overlay_image(), expected);
    }

    #[test]
    fn overlay_only_for_titles() {
        let body = SlideBody::Quote { paragraphs: vec![] };
        assert_eq!(body.overlay_image(), None);
    }
}
