use super::{text_width, Frame, HitTarget, ViewContext};
use crate::{
    deck::Direction,
    palette::colors,
    render::{
        layout::{reading_order, Alignment},
        operation::RenderOperation,
        properties::Rect,
        text::Text,
    },
    style::TextStyle,
};

const DISABLED_OPACITY: f64 = 0.3;

enum Control {
    Button { glyph: char, target: HitTarget, enabled: bool },
    Label(String),
    Separator,
}

impl Control {
    fn width(&self) -> u16 {
        match self {
            Self::Button { .. } => 3,
            Self::Label(label) => text_width(label) + 2,
            Self::Separator => 1,
        }
    }
}

/// Draw the navigation buttons floating at the bottom of the screen.
///
/// Only buttons that can be used get a hit region.
pub(crate) fn draw_controls(context: &ViewContext, frame: &mut Frame) {
    let navigation = context.navigation;
    // The retreat button points towards where reading starts.
    let (retreat, advance) = match context.direction {
        Direction::Rtl => ('▶', '◀'),
        Direction::Ltr => ('◀', '▶'),
    };
    let controls = vec![
        Control::Button { glyph: retreat, target: HitTarget::Retreat, enabled: !navigation.is_first() },
        Control::Label(navigation.position_label()),
        Control::Button { glyph: advance, target: HitTarget::Advance, enabled: !navigation.is_last() },
        Control::Separator,
        Control::Button { glyph: '↺', target: HitTarget::Reset, enabled: true },
    ];
    let controls = reading_order(controls, context.direction);

    let width = controls.iter().map(Control::width).sum::<u16>() + 2;
    let dimensions = context.dimensions;
    let row = dimensions.rows.saturating_sub(3);
    let cluster = Rect::new(dimensions.columns.saturating_sub(width) / 2, row, width, 1);
    frame.operations.push(RenderOperation::Fill { rect: cluster, color: colors::CONTROLS });

    let mut column = cluster.column + 1;
    for control in controls {
        let width = control.width();
        let rect = Rect::new(column, row, width, 1);
        match control {
            Control::Button { glyph, target, enabled } => {
                let color = match enabled {
                    true => colors::CONTROLS_TEXT,
                    false => colors::CONTROLS.blend(colors::CONTROLS_TEXT, DISABLED_OPACITY),
                };
                let style = TextStyle::default().fg_color(color).bold();
                frame.operations.push(RenderOperation::SetCell { column: column + 1, row, character: glyph, style });
                if enabled {
                    frame.add_hit(rect, target);
                }
            }
            Control::Label(label) => {
                let style = TextStyle::default().fg_color(colors::CONTROLS_TEXT);
                let line = Text::new(label, style).into();
                frame.operations.push(RenderOperation::RenderText { line, area: rect, alignment: Alignment::Center });
            }
            Control::Separator => {
                let style = TextStyle::default().fg_color(colors::CONTROLS_BORDER);
                frame.operations.push(RenderOperation::SetCell { column, row, character: '│', style });
            }
        };
        column += width;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        navigation::NavigationState,
        render::{canvas::Canvas, draw_canvas},
        resource::SlideImages,
        view::test::context,
    };
    use rstest::rstest;

    fn draw(navigation: &NavigationState, direction: Direction) -> (Canvas, Frame) {
        let images = SlideImages::default();
        let context = ViewContext { direction, ..context(navigation, &images) };
        let mut frame = Frame::default();
        draw_controls(&context, &mut frame);
        (draw_canvas(context.dimensions, frame.operations.iter()), frame)
    }

    fn targets(frame: &Frame) -> Vec<HitTarget> {
        frame.hits.iter().map(|(_, target)| *target).collect()
    }

    #[rstest]
    #[case::first(0, &[HitTarget::Advance, HitTarget::Reset])]
    #[case::middle(1, &[HitTarget::Retreat, HitTarget::Advance, HitTarget::Reset])]
    #[case::last(2, &[HitTarget::Retreat, HitTarget::Reset])]
    fn enabled_buttons(#[case] index: usize, #[case] expected: &[HitTarget]) {
        let (_, frame) = draw(&NavigationState::new(3, index), Direction::Ltr);
        assert_eq!(targets(&frame), expected);
    }

    #[test]
    fn single_slide() {
        let (_, frame) = draw(&NavigationState::new(1, 0), Direction::Rtl);
        assert_eq!(targets(&frame), &[HitTarget::Reset]);
    }

    #[rstest]
    #[case::ltr(Direction::Ltr, " ◀  2 / 3  ▶ │ ↺ ")]
    #[case::rtl(Direction::Rtl, " ↺ │ ◀  2 / 3  ▶ ")]
    fn layout(#[case] direction: Direction, #[case] expected: &str) {
        let navigation = NavigationState::new(3, 1);
        let (canvas, frame) = draw(&navigation, direction);
        let line = &canvas.lines()[21];
        assert_eq!(line.trim(), expected.trim());

        let column_of = |target| frame.hits.iter().find(|(_, t)| *t == target).map(|(rect, _)| rect.column);
        let (retreat, advance) = (column_of(HitTarget::Retreat), column_of(HitTarget::Advance));
        match direction {
            Direction::Ltr => assert!(retreat < advance),
            Direction::Rtl => assert!(retreat > advance),
        };
    }

    #[test]
    fn disabled_buttons_are_dimmed() {
        let (canvas, frame) = draw(&NavigationState::new(3, 0), Direction::Ltr);
        let advance = frame.hits.iter().find(|(_, t)| *t == HitTarget::Advance).map(|(rect, _)| *rect).unwrap();
        let retreat = canvas.cell(advance.column - 9, advance.row).unwrap();
        assert_eq!(retreat.character, '◀');
        let dimmed = colors::CONTROLS.blend(colors::CONTROLS_TEXT, DISABLED_OPACITY);
        assert_eq!(retreat.style.colors.foreground, Some(dimmed));

        let advance = canvas.cell(advance.column + 1, advance.row).unwrap();
        assert_eq!(advance.style.colors.foreground, Some(colors::CONTROLS_TEXT));
    }
}
