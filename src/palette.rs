use crate::style::Color;
use serde_with::DeserializeFromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// One of the fixed palette entries a slide can use as its theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter, DeserializeFromStr)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ThemeColor {
    Indigo,
    #[default]
    Slate,
    Amber,
    Emerald,
    Blue,
    Red,
    Orange,
    Zinc,
    Teal,
    Violet,
}

impl ThemeColor {
    pub(crate) fn palette(&self) -> Palette {
        use ThemeColor::*;
        let (start, end, foreground) = match self {
            Indigo => (Color::new(0x31, 0x2e, 0x81), Color::new(0x43, 0x38, 0xca), Color::new(0xff, 0xff, 0xff)),
            Slate => (Color::new(0xf8, 0xfa, 0xfc), Color::new(0xf1, 0xf5, 0xf9), Color::new(0x0f, 0x17, 0x2a)),
            Amber => (Color::new(0xff, 0xfb, 0xeb), Color::new(0xfe, 0xf3, 0xc7), Color::new(0x78, 0x35, 0x0f)),
            Emerald => (Color::new(0xec, 0xfd, 0xf5), Color::new(0xd1, 0xfa, 0xe5), Color::new(0x06, 0x4e, 0x3b)),
            Blue => (Color::new(0xef, 0xf6, 0xff), Color::new(0xdb, 0xea, 0xfe), Color::new(0x1e, 0x3a, 0x8a)),
            Red => (Color::new(0xfe, 0xf2, 0xf2), Color::new(0xfe, 0xe2, 0xe2), Color::new(0x7f, 0x1d, 0x1d)),
            Orange => (Color::new(0xff, 0xf7, 0xed), Color::new(0xff, 0xed, 0xd5), Color::new(0x7c, 0x2d, 0x12)),
            Zinc => (Color::new(0xfa, 0xfa, 0xfa), Color::new(0xf4, 0xf4, 0xf5), Color::new(0x18, 0x18, 0x1b)),
            Teal => (Color::new(0xf0, 0xfd, 0xfa), Color::new(0xcc, 0xfb, 0xf1), Color::new(0x13, 0x4e, 0x4a)),
            Violet => (Color::new(0xf5, 0xf3, 0xff), Color::new(0xed, 0xe9, 0xfe), Color::new(0x4c, 0x1d, 0x95)),
        };
        Palette { start, end, foreground }
    }

    /// All the palette entries in declaration order.
    pub fn all() -> impl Iterator<Item = ThemeColor> {
        Self::iter()
    }
}

/// The colors a themed slide is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Palette {
    /// The gradient's top left color.
    pub(crate) start: Color,

    /// The gradient's bottom right color.
    pub(crate) end: Color,

    /// The text color.
    pub(crate) foreground: Color,
}

/// Fixed colors used across templates.
pub(crate) mod colors {
    use crate::style::Color;

    pub(crate) const PAGE: Color = Color::new(0xe7, 0xe5, 0xe4);
    pub(crate) const SHADOW: Color = Color::new(0xa8, 0xa2, 0x9e);
    pub(crate) const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub(crate) const OVERLAY_TINT: Color = Color::new(0x31, 0x2e, 0x81);
    pub(crate) const SUB_HEADING: Color = Color::new(0x06, 0x5f, 0x46);
    pub(crate) const DIAGRAM_ICON: Color = Color::new(0xd9, 0x77, 0x06);
    pub(crate) const TABLE_HEADER: Color = Color::new(0x1e, 0x40, 0xaf);
    pub(crate) const TABLE_FIRST_CELL: Color = Color::new(0x1e, 0x3a, 0x8a);
    pub(crate) const TABLE_CELL: Color = Color::new(0x33, 0x41, 0x55);
    pub(crate) const TABLE_STRIPE: Color = Color::new(0xf8, 0xfa, 0xfc);
    pub(crate) const QUOTE_TEXT: Color = Color::new(0x78, 0x35, 0x0f);
    pub(crate) const QUOTE_BACKGROUND: Color = Color::new(0xff, 0xfb, 0xeb);
    pub(crate) const QUOTE_ICON: Color = Color::new(0xf5, 0x9e, 0x0b);
    pub(crate) const CHART_LINE: Color = Color::new(0x25, 0x63, 0xeb);
    pub(crate) const CHART_GRID: Color = Color::new(0xd1, 0xd5, 0xdb);
    pub(crate) const P_WAVE: Color = Color::new(0x16, 0xa3, 0x4a);
    pub(crate) const S_WAVE: Color = Color::new(0xea, 0x58, 0x0c);
    pub(crate) const SURFACE_WAVE: Color = Color::new(0xdc, 0x26, 0x26);
    pub(crate) const TOOLTIP: Color = Color::new(0xf3, 0xf4, 0xf6);
    pub(crate) const MUTED: Color = Color::new(0x64, 0x74, 0x8b);
    pub(crate) const PANEL: Color = Color::new(0xff, 0xff, 0xff);
    pub(crate) const CONTROLS: Color = Color::new(0xff, 0xff, 0xff);
    pub(crate) const CONTROLS_BORDER: Color = Color::new(0xe5, 0xe7, 0xeb);
    pub(crate) const CONTROLS_TEXT: Color = Color::new(0x33, 0x41, 0x55);
    pub(crate) const SHADOW_ZONE: Color = Color::new(0x4b, 0x55, 0x63);
    pub(crate) const LIQUID_CORE: Color = Color::new(0xf9, 0x73, 0x16);
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::exact("teal", Some(ThemeColor::Teal))]
    #[case::uppercase("VIOLET", Some(ThemeColor::Violet))]
    #[case::unknown("pink", None)]
    #[case::tailwind_class("bg-red-50", None)]
    #[case::empty("", None)]
    fn parse(#[case] name: &str, #[case] expected: Option<ThemeColor>) {
        assert_eq!(name.parse::<ThemeColor>().ok(), expected);
    }

    #[test]
    fn ten_entries() {
        assert_eq!(ThemeColor::all().count(), 10);
    }

    #[test]
    fn indigo_palette() {
        let palette = ThemeColor::Indigo.palette();
        assert_eq!(palette.start, "312e81".parse().unwrap());
        assert_eq!(palette.end, "4338ca".parse().unwrap());
        assert_eq!(palette.foreground, "ffffff".parse().unwrap());
    }

    #[test]
    fn names() {
        assert_eq!(ThemeColor::Emerald.to_string(), "emerald");
        assert_eq!(ThemeColor::default(), ThemeColor::Slate);
    }
}
