use super::keyboard::{CommandKeyBindings, KeyBindingsValidationError, KeyboardListener};
use crate::config::KeyBindingsConfig;
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use std::{io, time::Duration};
use strum::EnumDiscriminants;

/// A command listener that polls the terminal for keyboard and mouse input.
pub(crate) struct CommandListener {
    keyboard: KeyboardListener,
}

impl CommandListener {
    pub(crate) fn new(config: KeyBindingsConfig) -> Result<Self, KeyBindingsValidationError> {
        let bindings = CommandKeyBindings::try_from(config)?;
        Ok(Self { keyboard: KeyboardListener::new(bindings) })
    }

    /// Try to get the next command.
    ///
    /// This waits for at most `timeout` and returns `Ok(None)` if nothing relevant happened.
    pub(crate) fn try_next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !poll(timeout)? {
            return Ok(None);
        }
        let command = self.on_event(read()?);
        Ok(command)
    }

    fn on_event(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Key(event) => self.keyboard.on_key(event),
            Event::Mouse(event) => Self::on_mouse(event),
            Event::Resize(..) => Some(Command::Redraw),
            _ => None,
        }
    }

    fn on_mouse(event: MouseEvent) -> Option<Command> {
        let MouseEvent { column, row, .. } = event;
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Command::Click { column, row }),
            MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Command::Hover { column, row }),
            _ => None,
        }
    }
}

/// A command.
#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
pub(crate) enum Command {
    /// Redraw the presentation.
    ///
    /// This can happen on terminal resize.
    Redraw,

    /// Move to the next slide.
    Next,

    /// Move to the previous slide.
    Previous,

    /// Go back to the first slide.
    FirstSlide,

    /// Exit the presentation.
    Exit,

    /// Suspend the presentation.
    Suspend,

    /// The left mouse button was pressed at this position.
    Click { column: u16, row: u16 },

    /// The mouse pointer moved to this position.
    Hover { column: u16, row: u16 },
}

#[cfg(test)]
mod test {
    use super::*;
    use crossterm::event::KeyModifiers;
    use rstest::rstest;

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent { kind, column: 4, row: 2, modifiers: KeyModifiers::empty() })
    }

    #[rstest]
    #[case::click(mouse(MouseEventKind::Down(MouseButton::Left)), Some(Command::Click { column: 4, row: 2 }))]
    #[case::right_click(mouse(MouseEventKind::Down(MouseButton::Right)), None)]
    #[case::release(mouse(MouseEventKind::Up(MouseButton::Left)), None)]
    #[case::moved(mouse(MouseEventKind::Moved), Some(Command::Hover { column: 4, row: 2 }))]
    #[case::resize(Event::Resize(10, 10), Some(Command::Redraw))]
    #[case::focus(Event::FocusGained, None)]
    fn events(#[case] event: Event, #[case] expected: Option<Command>) {
        let mut listener = CommandListener::new(KeyBindingsConfig::default()).expect("invalid bindings");
        assert_eq!(listener.on_event(event), expected);
    }
}
