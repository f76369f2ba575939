use crossterm::style::{StyledContent, Stylize};

/// The style of a piece of text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextStyle {
    flags: u8,
    pub(crate) colors: Colors,
}

impl TextStyle {
    pub(crate) fn colored(colors: Colors) -> Self {
        Self { flags: Default::default(), colors }
    }

    /// Add bold to this style.
    pub(crate) fn bold(self) -> Self {
        self.add_flag(TextFormatFlags::Bold)
    }

    /// Add italics to this style.
    pub(crate) fn italics(self) -> Self {
        self.add_flag(TextFormatFlags::Italics)
    }

    /// Set the background color for this text style.
    pub(crate) fn bg_color(mut self, color: Color) -> Self {
        self.colors.background = Some(color);
        self
    }

    /// Set the foreground color for this text style.
    pub(crate) fn fg_color(mut self, color: Color) -> Self {
        self.colors.foreground = Some(color);
        self
    }

    /// Check whether this text style is bold.
    pub(crate) fn is_bold(&self) -> bool {
        self.has_flag(TextFormatFlags::Bold)
    }

    /// Check whether this text style has italics.
    pub(crate) fn is_italics(&self) -> bool {
        self.has_flag(TextFormatFlags::Italics)
    }

    /// Merge this style with another one.
    ///
    /// Colors already set in this style take precedence over the other one's.
    pub(crate) fn merged(mut self, other: &TextStyle) -> Self {
        self.flags |= other.flags;
        self.colors = self.colors.merge(&other.colors);
        self
    }

    /// Apply this style to a piece of text.
    pub(crate) fn apply<T: Into<String>>(&self, text: T) -> StyledContent<String> {
        let text: String = text.into();
        let mut styled = text.stylize();
        if self.is_bold() {
            styled = styled.bold();
        }
        if self.is_italics() {
            styled = styled.italic();
        }
        if let Some(color) = self.colors.background {
            styled = styled.on(color.into());
        }
        if let Some(color) = self.colors.foreground {
            styled = styled.with(color.into());
        }
        styled
    }

    fn add_flag(mut self, flag: TextFormatFlags) -> Self {
        self.flags |= flag as u8;
        self
    }

    fn has_flag(&self, flag: TextFormatFlags) -> bool {
        self.flags & flag as u8 != 0
    }
}

#[derive(Debug)]
enum TextFormatFlags {
    Bold = 1,
    Italics = 2,
}

/// An RGB color.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub(crate) const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend this color towards another one.
    ///
    /// A ratio of 0 yields this color and a ratio of 1 yields the other one.
    pub(crate) fn blend(self, other: Color, ratio: f64) -> Color {
        let ratio = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * ratio).round() as u8;
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl From<Color> for crossterm::style::Color {
    fn from(Color { r, g, b }: Color) -> Self {
        Self::Rgb { r, g, b }
    }
}

/// Text colors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Colors {
    /// The background color.
    pub(crate) background: Option<Color>,

    /// The foreground color.
    pub(crate) foreground: Option<Color>,
}

impl Colors {
    pub(crate) fn merge(&self, other: &Colors) -> Self {
        let background = self.background.or(other.background);
        let foreground = self.foreground.or(other.foreground);
        Self { background, foreground }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::start(0.0, Color::new(0, 0, 0))]
    #[case::middle(0.5, Color::new(50, 100, 128))]
    #[case::end(1.0, Color::new(100, 200, 255))]
    #[case::clamped(3.0, Color::new(100, 200, 255))]
    fn blend_rgb(#[case] ratio: f64, #[case] expected: Color) {
        let blended = Color::new(0, 0, 0).blend(Color::new(100, 200, 255), ratio);
        assert_eq!(blended, expected);
    }

    #[test]
    fn merge_keeps_own_colors() {
        let (red, blue, white) = (Color::new(255, 0, 0), Color::new(0, 0, 255), Color::new(255, 255, 255));
        let style = TextStyle::default().fg_color(red);
        let other = TextStyle::default().bold().fg_color(blue).bg_color(white);
        let merged = style.merged(&other);
        assert!(merged.is_bold());
        assert_eq!(merged.colors.foreground, Some(red));
        assert_eq!(merged.colors.background, Some(white));
    }
}
