use super::properties::Rect;
use crate::deck::Direction;

/// The horizontal alignment of a piece of text within an area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Alignment {
    #[default]
    Left,
    Right,
    Center,
}

impl Alignment {
    /// The alignment for body text flowing in the given direction.
    pub(crate) fn reading(direction: Direction) -> Self {
        match direction {
            Direction::Rtl => Self::Right,
            Direction::Ltr => Self::Left,
        }
    }

    /// Compute where text of the given width starts within an area.
    ///
    /// Text wider than the area always starts at the area's first column.
    pub(crate) fn compute(&self, area: &Rect, text_width: u16) -> Positioning {
        let text_width = text_width.min(area.columns);
        let slack = area.columns - text_width;
        let offset = match self {
            Self::Left => 0,
            Self::Right => slack,
            Self::Center => slack / 2,
        };
        Positioning { start_column: area.column + offset, max_line_length: area.columns - offset }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Positioning {
    pub(crate) start_column: u16,
    pub(crate) max_line_length: u16,
}

/// Order a set of columns so the first one sits on the side reading starts from.
pub(crate) fn reading_order<T>(mut columns: Vec<T>, direction: Direction) -> Vec<T> {
    if direction == Direction::Rtl {
        columns.reverse();
    }
    columns
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::left(Alignment::Left, 4, 10, 10)]
    #[case::right(Alignment::Right, 4, 16, 4)]
    #[case::center(Alignment::Center, 4, 13, 7)]
    #[case::center_odd(Alignment::Center, 5, 12, 8)]
    #[case::overflow_right(Alignment::Right, 30, 10, 10)]
    #[case::overflow_center(Alignment::Center, 30, 10, 10)]
    fn positioning(
        #[case] alignment: Alignment,
        #[case] text_width: u16,
        #[case] start_column: u16,
        #[case] max_line_length: u16,
    ) {
        let area = Rect::new(10, 0, 10, 1);
        let expected = Positioning { start_column, max_line_length };
        assert_eq!(alignment.compute(&area, text_width), expected);
    }

    #[test]
    fn columns_in_reading_order() {
        assert_eq!(reading_order(vec![1, 2], Direction::Rtl), &[2, 1]);
        assert_eq!(reading_order(vec![1, 2], Direction::Ltr), &[1, 2]);
    }
}
