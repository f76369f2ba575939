use super::listener::{Command, CommandDiscriminants};
use crate::config::KeyBindingsConfig;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_with::DeserializeFromStr;
use std::{cmp::Ordering, fmt, iter, mem, str::FromStr};

/// Turns key presses into commands.
///
/// Key presses that only partially match a multi key binding (like `gg`) are buffered until the
/// binding is either completed or can no longer match.
pub(crate) struct KeyboardListener {
    bindings: CommandKeyBindings,
    events: Vec<KeyEvent>,
}

impl KeyboardListener {
    pub(crate) fn new(bindings: CommandKeyBindings) -> Self {
        Self { bindings, events: Vec::new() }
    }

    /// Feed a key event, getting back the command it completes, if any.
    pub(crate) fn on_key(&mut self, event: KeyEvent) -> Option<Command> {
        // Ignore release events
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let mut events = mem::take(&mut self.events);
        events.push(event);
        match self.bindings.apply(&events) {
            InputAction::Emit(command) => Some(command),
            InputAction::Buffer => {
                self.events = events;
                None
            }
            // The key that broke a sequence may still start or complete a binding on its own.
            InputAction::Reset if events.len() > 1 => self.on_key(event),
            InputAction::Reset => None,
        }
    }
}

enum InputAction {
    Buffer,
    Reset,
    Emit(Command),
}

pub(crate) struct CommandKeyBindings {
    bindings: Vec<(KeyBinding, CommandDiscriminants)>,
}

impl CommandKeyBindings {
    fn apply(&self, events: &[KeyEvent]) -> InputAction {
        let mut any_partials = false;
        for (binding, identifier) in &self.bindings {
            match binding.match_events(events) {
                BindingMatch::Full => {
                    if let Some(command) = Self::instantiate(identifier) {
                        return InputAction::Emit(command);
                    }
                }
                BindingMatch::Partial => any_partials = true,
                BindingMatch::None => (),
            }
        }
        if any_partials { InputAction::Buffer } else { InputAction::Reset }
    }

    fn instantiate(discriminant: &CommandDiscriminants) -> Option<Command> {
        use CommandDiscriminants::*;
        let command = match discriminant {
            Redraw => Command::Redraw,
            Next => Command::Next,
            Previous => Command::Previous,
            FirstSlide => Command::FirstSlide,
            Exit => Command::Exit,
            Suspend => Command::Suspend,
            // pointer commands carry a position and can't be bound to keys
            Click | Hover => return None,
        };
        Some(command)
    }

    fn validate_conflicts<'a>(
        bindings: impl Iterator<Item = &'a KeyBinding>,
    ) -> Result<(), KeyBindingsValidationError> {
        let mut bindings: Vec<_> = bindings.map(|binding| &binding.0).collect();
        bindings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        for window in bindings.windows(2) {
            if window[0].iter().eq(window[1].iter().take(window[0].len())) {
                return Err(KeyBindingsValidationError::Conflict(
                    KeyBinding(window[0].clone()),
                    KeyBinding(window[1].clone()),
                ));
            }
        }
        Ok(())
    }
}

impl TryFrom<KeyBindingsConfig> for CommandKeyBindings {
    type Error = KeyBindingsValidationError;

    fn try_from(config: KeyBindingsConfig) -> Result<Self, Self::Error> {
        let zip = |discriminant, bindings: Vec<KeyBinding>| bindings.into_iter().zip(iter::repeat(discriminant));
        let bindings: Vec<_> = iter::empty()
            .chain(zip(CommandDiscriminants::Next, config.next))
            .chain(zip(CommandDiscriminants::Previous, config.previous))
            .chain(zip(CommandDiscriminants::FirstSlide, config.first_slide))
            .chain(zip(CommandDiscriminants::Exit, config.exit))
            .chain(zip(CommandDiscriminants::Suspend, config.suspend))
            .collect();
        Self::validate_conflicts(bindings.iter().map(|binding| &binding.0))?;
        Ok(Self { bindings })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyBindingsValidationError {
    #[error("conflicting keybindings: {0} and {1}")]
    Conflict(KeyBinding, KeyBinding),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum BindingMatch {
    Full,
    Partial,
    None,
}

#[derive(Clone, Debug, PartialEq, Eq, DeserializeFromStr)]
pub struct KeyBinding(Vec<KeyCombination>);

impl KeyBinding {
    fn match_events(&self, events: &[KeyEvent]) -> BindingMatch {
        if events.len() > self.0.len() {
            return BindingMatch::None;
        }
        if !self.0.iter().zip(events).all(|(combo, event)| combo.matches(event)) {
            return BindingMatch::None;
        }
        if events.len() == self.0.len() { BindingMatch::Full } else { BindingMatch::Partial }
    }
}

impl FromStr for KeyBinding {
    type Err = KeyBindingParseError;

    fn from_str(mut input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(KeyBindingParseError::NoInput);
        }
        let mut combos = Vec::new();
        while !input.is_empty() {
            let (combo, rest) = KeyCombination::parse(input)?;
            combos.push(combo);
            input = rest;
        }
        Ok(Self(combos))
    }
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for combo in &self.0 {
            write!(f, "{combo}")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyBindingParseError {
    #[error("no input")]
    NoInput,

    #[error("not a valid key: {0}")]
    InvalidKey(char),

    #[error("invalid control sequence")]
    InvalidControlSequence,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd)]
struct KeyCombination {
    key: KeyCode,
    control: bool,
}

impl KeyCombination {
    fn matches(&self, event: &KeyEvent) -> bool {
        let is_control = event.modifiers == KeyModifiers::CONTROL;
        self.key == event.code && self.control == is_control
    }

    fn parse(input: &str) -> Result<(Self, &str), KeyBindingParseError> {
        if let Some(input) = Self::try_match_input(input, &["<c-", "<C-"]) {
            let (key, input) = Self::parse_key_code(input)?;
            let Some(input) = input.strip_prefix('>') else {
                return Err(KeyBindingParseError::InvalidControlSequence);
            };
            Ok((Self { key, control: true }, input))
        } else {
            let (key, input) = Self::parse_key_code(input)?;
            Ok((Self { key, control: false }, input))
        }
    }

    fn parse_key_code(input: &str) -> Result<(KeyCode, &str), KeyBindingParseError> {
        const NAMED_KEYS: &[(&[&str], KeyCode)] = &[
            (&["<PageUp>", "<page_up>"], KeyCode::PageUp),
            (&["<PageDown>", "<page_down>"], KeyCode::PageDown),
            (&["<cr>", "<CR>", "<Enter>", "<enter>"], KeyCode::Enter),
            (&["<Home>", "<home>"], KeyCode::Home),
            (&["<End>", "<end>"], KeyCode::End),
            (&["<Left>", "<left>"], KeyCode::Left),
            (&["<Right>", "<right>"], KeyCode::Right),
            (&["<Up>", "<up>"], KeyCode::Up),
            (&["<Down>", "<down>"], KeyCode::Down),
            (&["<Esc>", "<esc>"], KeyCode::Esc),
            (&["<Tab>", "<tab>"], KeyCode::Tab),
            (&["<Backspace>", "<backspace>"], KeyCode::Backspace),
        ];
        for (aliases, key) in NAMED_KEYS {
            if let Some(input) = Self::try_match_input(input, aliases) {
                return Ok((*key, input));
            }
        }
        if let Some(input) = Self::try_match_input(input, &["<F", "<f"]) {
            let (number, rest) = input.split_once('>').ok_or(KeyBindingParseError::InvalidControlSequence)?;
            let number: u8 = number.parse().map_err(|_| KeyBindingParseError::InvalidControlSequence)?;
            return if (1..=12).contains(&number) {
                Ok((KeyCode::F(number), rest))
            } else {
                Err(KeyBindingParseError::InvalidControlSequence)
            };
        }
        let next = input.chars().next().ok_or(KeyBindingParseError::NoInput)?;
        // don't allow these as they create ambiguity
        if next == '<' || next == '>' {
            Err(KeyBindingParseError::InvalidKey(next))
        } else if next.is_alphanumeric() || next.is_ascii_punctuation() || next == ' ' {
            Ok((KeyCode::Char(next), &input[next.len_utf8()..]))
        } else {
            Err(KeyBindingParseError::InvalidKey(next))
        }
    }

    fn try_match_input<'a>(input: &'a str, aliases: &[&str]) -> Option<&'a str> {
        aliases.iter().find_map(|alias| input.strip_prefix(alias))
    }

    #[cfg(test)]
    fn char(c: char) -> Self {
        Self { key: KeyCode::Char(c), control: false }
    }

    #[cfg(test)]
    fn control_char(c: char) -> Self {
        Self { key: KeyCode::Char(c), control: true }
    }
}

impl From<KeyCode> for KeyCombination {
    fn from(key: KeyCode) -> Self {
        Self { key, control: false }
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.control {
            write!(f, "<c-")?;
        }
        match self.key {
            KeyCode::Char(' ') => write!(f, "' '")?,
            KeyCode::Char(c) => write!(f, "{c}")?,
            KeyCode::F(number) => write!(f, "<f{number}>")?,
            other => write!(f, "<{other:?}>")?,
        };
        if self.control {
            write!(f, ">")?;
        }
        Ok(())
    }
}
