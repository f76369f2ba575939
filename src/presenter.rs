use crate::{
    commands::{
        keyboard::KeyBindingsValidationError,
        listener::{Command, CommandListener},
    },
    config::KeyBindingsConfig,
    deck::{Deck, SlideRecord},
    navigation::NavigationState,
    palette::{colors, ThemeColor},
    render::{
        layout::Alignment,
        operation::RenderOperation,
        properties::{Rect, WindowSize},
        text::Text,
        RenderError, RenderResult, TerminalDrawer,
    },
    resource::Resources,
    style::TextStyle,
    view::{animation::AnimationClock, render_slide, Frame, HitTarget, ViewContext},
};
use std::{
    io::{self, Stdout},
    time::{Duration, Instant},
};
use tracing::{debug, info};

// How long to wait for input while an animation is running and while nothing is moving.
const ANIMATION_TICK: Duration = Duration::from_millis(33);
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct PresenterOptions {
    pub default_theme: ThemeColor,
    pub animations: bool,
    pub max_columns: u16,

    /// The 0-based index of the slide to start at.
    pub start_slide: usize,
}

/// A slideshow presenter.
///
/// This owns the navigation state and the terminal, and runs the event loop.
pub struct Presenter {
    deck: Deck,
    resources: Resources,
    commands: CommandListener,
    navigation: NavigationState,
    options: PresenterOptions,
    shown_at: Instant,
    hover: Option<(u16, u16)>,
    frame: Frame,
}

impl Presenter {
    /// Construct a new presenter.
    pub fn new(
        deck: Deck,
        bindings: KeyBindingsConfig,
        options: PresenterOptions,
    ) -> Result<Self, PresentationError> {
        let commands = CommandListener::new(bindings)?;
        let resources = Resources::new(deck.base_path.clone());
        let navigation = NavigationState::new(deck.len(), options.start_slide);
        Ok(Self {
            deck,
            resources,
            commands,
            navigation,
            options,
            shown_at: Instant::now(),
            hover: None,
            frame: Frame::default(),
        })
    }

    /// Run the presentation until the user exits.
    pub fn present(mut self) -> Result<(), PresentationError> {
        info!("presenting {} slides starting at slide {}", self.deck.len(), self.navigation.index() + 1);
        let mut drawer = TerminalDrawer::new(io::stdout())?;
        self.shown_at = Instant::now();
        self.render(&mut drawer)?;
        loop {
            let animating = !self.clock().is_settled(self.current_slide());
            let timeout = if animating { ANIMATION_TICK } else { IDLE_POLL };
            let effect = match self.commands.try_next_command(timeout)? {
                Some(command) => self.apply_command(command),
                // Keep redrawing until the animations settle.
                None if animating => CommandSideEffect::Redraw,
                None => CommandSideEffect::None,
            };
            match effect {
                CommandSideEffect::Exit => return Ok(()),
                CommandSideEffect::Suspend => {
                    self.suspend(&mut drawer);
                    self.render(&mut drawer)?;
                }
                CommandSideEffect::Redraw => self.render(&mut drawer)?,
                CommandSideEffect::None => (),
            };
        }
    }

    fn apply_command(&mut self, command: Command) -> CommandSideEffect {
        debug!("applying command {command:?}");
        match command {
            Command::Redraw => CommandSideEffect::Redraw,
            Command::Next => self.navigate(NavigationState::advance),
            Command::Previous => self.navigate(NavigationState::retreat),
            Command::FirstSlide => self.navigate(NavigationState::reset),
            Command::Exit => CommandSideEffect::Exit,
            Command::Suspend => CommandSideEffect::Suspend,
            Command::Click { column, row } => match self.frame.hit(column, row) {
                Some(HitTarget::Retreat) => self.navigate(NavigationState::retreat),
                Some(HitTarget::Advance) => self.navigate(NavigationState::advance),
                Some(HitTarget::Reset) => self.navigate(NavigationState::reset),
                Some(HitTarget::Chart) | None => CommandSideEffect::None,
            },
            Command::Hover { column, row } => {
                let was_hovering = self.hover.is_some();
                let over_chart = self.frame.hit(column, row) == Some(HitTarget::Chart);
                self.hover = over_chart.then_some((column, row));
                match over_chart || was_hovering {
                    true => CommandSideEffect::Redraw,
                    false => CommandSideEffect::None,
                }
            }
        }
    }

    fn navigate(&mut self, action: fn(&mut NavigationState) -> bool) -> CommandSideEffect {
        if !action(&mut self.navigation) {
            return CommandSideEffect::None;
        }
        debug!("moved to slide {}", self.navigation.position_label());
        self.shown_at = Instant::now();
        self.hover = None;
        CommandSideEffect::Redraw
    }

    fn current_slide(&self) -> &SlideRecord {
        &self.deck.slides[self.navigation.index()]
    }

    fn clock(&self) -> AnimationClock {
        match self.options.animations {
            true => AnimationClock::Elapsed(self.shown_at.elapsed()),
            false => AnimationClock::Disabled,
        }
    }

    /// Lay out the current slide for a window of the given size.
    fn build_frame(&mut self, dimensions: WindowSize) -> Result<Frame, RenderError> {
        let clock = self.clock();
        let slide = &self.deck.slides[self.navigation.index()];
        let images = self.resources.slide_images(slide);
        let context = ViewContext {
            navigation: &self.navigation,
            direction: self.deck.direction,
            default_theme: self.options.default_theme,
            images: &images,
            clock,
            hover: self.hover,
            dimensions,
        };
        render_slide(slide, &context)
    }

    fn render(&mut self, drawer: &mut TerminalDrawer<Stdout>) -> RenderResult {
        let dimensions = WindowSize::current()?.cap_columns(self.options.max_columns);
        match self.build_frame(dimensions) {
            Ok(frame) => {
                drawer.render_operations(dimensions, frame.operations.iter())?;
                self.frame = frame;
            }
            // Nothing can be shown until the terminal is resized.
            Err(RenderError::TerminalTooSmall) => {
                self.frame = Frame::default();
                drawer.render_operations(dimensions, too_small_notice(dimensions).iter())?;
            }
            Err(e) => return Err(e),
        };
        Ok(())
    }

    fn suspend(&self, drawer: &mut TerminalDrawer<Stdout>) {
        #[cfg(unix)]
        unsafe {
            drawer.terminal.suspend();
            libc::raise(libc::SIGTSTP);
            drawer.terminal.resume();
        }
    }
}

fn too_small_notice(dimensions: WindowSize) -> Vec<RenderOperation> {
    let style = TextStyle::default().fg_color(colors::CONTROLS_TEXT);
    let area = Rect::new(0, dimensions.rows / 2, dimensions.columns, 1);
    vec![
        RenderOperation::ClearScreen(colors::PAGE),
        RenderOperation::RenderText {
            line: Text::new("terminal too small", style).into(),
            area,
            alignment: Alignment::Center,
        },
    ]
}

enum CommandSideEffect {
    Exit,
    Suspend,
    Redraw,
    None,
}

/// An error during a presentation.
#[derive(thiserror::Error, Debug)]
pub enum PresentationError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("invalid key bindings: {0}")]
    Bindings(#[from] KeyBindingsValidationError),
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        commands::keyboard::{test::KeyEventSource, CommandKeyBindings, KeyboardListener},
        render::draw_canvas,
    };
    use crossterm::event::KeyCode;

    const DIMENSIONS: WindowSize = WindowSize { columns: 80, rows: 24 };

    const DECK: &str = r#"
direction: ltr
slides:
  - id: 1
    type: title
    title: Seismic waves
  - id: 2
    type: content_list
    title: Kinds
    content: [Body waves, Surface waves]
  - id: 3
    type: table
    title: Speeds
    table_headers: [A, B]
    table_rows: [[x, y]]
"#;

    fn presenter() -> Presenter {
        let deck = Deck::parse(DECK.as_bytes(), ".".into()).expect("invalid deck");
        let options =
            PresenterOptions { default_theme: ThemeColor::Slate, animations: false, max_columns: 80, start_slide: 0 };
        Presenter::new(deck, KeyBindingsConfig::default(), options).expect("failed to build presenter")
    }

    fn press(presenter: &mut Presenter, keyboard: &mut KeyboardListener, key: KeyCode) {
        if let Some(command) = keyboard.on_key(key.into_event()) {
            presenter.apply_command(command);
        }
    }

    fn keyboard() -> KeyboardListener {
        let bindings = CommandKeyBindings::try_from(KeyBindingsConfig::default()).expect("invalid bindings");
        KeyboardListener::new(bindings)
    }

    fn find_hit(frame: &Frame, target: HitTarget) -> Option<(u16, u16)> {
        let mut cells = (0..DIMENSIONS.rows).flat_map(|row| (0..DIMENSIONS.columns).map(move |column| (column, row)));
        cells.find(|(column, row)| frame.hit(*column, *row) == Some(target))
    }

    fn lines(presenter: &mut Presenter) -> Vec<String> {
        let frame = presenter.build_frame(DIMENSIONS).expect("render failed");
        presenter.frame = frame;
        draw_canvas(DIMENSIONS, presenter.frame.operations.iter()).lines()
    }

    #[test]
    fn forward_keys_stop_at_last_slide() {
        let mut presenter = presenter();
        let mut keyboard = keyboard();
        press(&mut presenter, &mut keyboard, KeyCode::Left);
        press(&mut presenter, &mut keyboard, KeyCode::Down);
        assert_eq!(presenter.navigation.index(), 2);

        let lines = lines(&mut presenter);
        let header_row = lines.iter().position(|line| line.contains(" A  B ")).expect("no headers");
        assert!(lines[header_row + 2].contains(" x  y "), "{:?}", lines[header_row + 2]);

        press(&mut presenter, &mut keyboard, KeyCode::Char(' '));
        assert_eq!(presenter.navigation.index(), 2);
    }

    #[test]
    fn backward_keys_stop_at_first_slide() {
        let mut presenter = presenter();
        let mut keyboard = keyboard();
        press(&mut presenter, &mut keyboard, KeyCode::Down);
        press(&mut presenter, &mut keyboard, KeyCode::Right);
        press(&mut presenter, &mut keyboard, KeyCode::Up);
        assert_eq!(presenter.navigation.index(), 0);
    }

    #[test]
    fn first_slide_sequence() {
        let mut presenter = presenter();
        let mut keyboard = keyboard();
        press(&mut presenter, &mut keyboard, KeyCode::Left);
        press(&mut presenter, &mut keyboard, KeyCode::Left);
        press(&mut presenter, &mut keyboard, KeyCode::Char('g'));
        assert_eq!(presenter.navigation.index(), 2);
        press(&mut presenter, &mut keyboard, KeyCode::Char('g'));
        assert_eq!(presenter.navigation.index(), 0);
    }

    #[test]
    fn clicks_use_hit_regions() {
        let mut presenter = presenter();
        lines(&mut presenter);
        let (column, row) = find_hit(&presenter.frame, HitTarget::Advance).expect("no advance button");
        assert!(find_hit(&presenter.frame, HitTarget::Retreat).is_none());

        let effect = presenter.apply_command(Command::Click { column, row });
        assert!(matches!(effect, CommandSideEffect::Redraw));
        assert_eq!(presenter.navigation.index(), 1);

        // Nothing reacts to clicks on the page around the slide.
        let effect = presenter.apply_command(Command::Click { column: 0, row: 0 });
        assert!(matches!(effect, CommandSideEffect::None));
        assert_eq!(presenter.navigation.index(), 1);
    }

    #[test]
    fn start_slide_is_clamped() {
        let deck = Deck::parse(DECK.as_bytes(), ".".into()).expect("invalid deck");
        let options =
            PresenterOptions { default_theme: ThemeColor::Teal, animations: true, max_columns: 80, start_slide: 42 };
        let presenter = Presenter::new(deck, KeyBindingsConfig::default(), options).expect("failed to build");
        assert_eq!(presenter.navigation.index(), 2);
    }

    #[test]
    fn hovering_outside_chart_is_ignored() {
        let mut presenter = presenter();
        lines(&mut presenter);
        let effect = presenter.apply_command(Command::Hover { column: 10, row: 10 });
        assert!(matches!(effect, CommandSideEffect::None));
        assert_eq!(presenter.hover, None);
    }
}
