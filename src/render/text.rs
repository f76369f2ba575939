use crate::style::TextStyle;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// A styled piece of text.
///
/// This is the most granular text representation: a `String` and a style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Text {
    pub(crate) content: String,
    pub(crate) style: TextStyle,
}

impl Text {
    /// Construct a new styled text.
    pub(crate) fn new<S: Into<String>>(content: S, style: TextStyle) -> Self {
        Self { content: content.into(), style }
    }

    /// The width of this text in terminal cells.
    pub(crate) fn width(&self) -> usize {
        self.content.width()
    }
}

impl From<String> for Text {
    fn from(text: String) -> Self {
        Self { content: text, style: TextStyle::default() }
    }
}

impl From<&str> for Text {
    fn from(text: &str) -> Self {
        Self { content: text.into(), style: TextStyle::default() }
    }
}

/// A line of text made up of differently styled chunks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Line(pub(crate) Vec<Text>);

impl Line {
    /// The width of this line in terminal cells.
    pub(crate) fn width(&self) -> usize {
        self.0.iter().map(Text::width).sum()
    }

    /// Word wrap this line so that each output line is at most `max_width` cells wide.
    ///
    /// Words longer than the maximum width are split at character boundaries.
    pub(crate) fn wrap(&self, max_width: usize) -> Vec<Line> {
        let max_width = max_width.max(1);
        let mut wrapper = Wrapper::new(max_width);
        for text in &self.0 {
            for token in tokenize(&text.content) {
                wrapper.push(token, text.style);
            }
        }
        wrapper.finish()
    }
}

impl<T: Into<Text>> From<T> for Line {
    fn from(text: T) -> Self {
        Self(vec![text.into()])
    }
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Word(&'a str),
    Space(&'a str),
}

fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (index, c) in input.char_indices() {
        let is_space = c == ' ';
        match in_space {
            Some(previous) if previous != is_space => {
                let chunk = &input[start..index];
                tokens.push(if previous { Token::Space(chunk) } else { Token::Word(chunk) });
                start = index;
            }
            _ => (),
        };
        in_space = Some(is_space);
    }
    if let Some(is_space) = in_space {
        let chunk = &input[start..];
        tokens.push(if is_space { Token::Space(chunk) } else { Token::Word(chunk) });
    }
    tokens
}

struct Wrapper {
    max_width: usize,
    lines: Vec<Line>,
    current: Vec<Text>,
    current_width: usize,
    pending_space: Option<(String, TextStyle)>,
}

impl Wrapper {
    fn new(max_width: usize) -> Self {
        Self { max_width, lines: Vec::new(), current: Vec::new(), current_width: 0, pending_space: None }
    }

    fn push(&mut self, token: Token, style: TextStyle) {
        match token {
            Token::Space(space) => {
                // Spaces are only emitted if a word follows them on the same line.
                if self.current_width > 0 {
                    self.pending_space = Some((space.to_string(), style));
                }
            }
            Token::Word(word) => self.push_word(word, style),
        }
    }

    fn push_word(&mut self, word: &str, style: TextStyle) {
        let word_width = word.width();
        let space_width = self.pending_space.as_ref().map(|(space, _)| space.width()).unwrap_or(0);
        if self.current_width > 0 && self.current_width + space_width + word_width > self.max_width {
            self.break_line();
        }
        if let Some((space, style)) = self.pending_space.take() {
            self.append(&space, style);
        }
        if word_width <= self.max_width - self.current_width {
            self.append(word, style);
            return;
        }
        // The word doesn't fit in an empty line so split it.
        let mut chunk = String::new();
        for c in word.chars() {
            let width = c.width().unwrap_or(0);
            if self.current_width + chunk.width() + width > self.max_width && !chunk.is_empty() {
                self.append(&chunk, style);
                chunk.clear();
                self.break_line();
            }
            chunk.push(c);
        }
        if !chunk.is_empty() {
            self.append(&chunk, style);
        }
    }

    fn append(&mut self, content: &str, style: TextStyle) {
        self.current_width += content.width();
        match self.current.last_mut() {
            Some(last) if last.style == style => last.content.push_str(content),
            _ => self.current.push(Text::new(content, style)),
        }
    }

    fn break_line(&mut self) {
        self.pending_space = None;
        self.lines.push(Line(std::mem::take(&mut self.current)));
        self.current_width = 0;
    }

    fn finish(mut self) -> Vec<Line> {
        if !self.current.is_empty() || self.lines.is_empty() {
            self.lines.push(Line(self.current));
        }
        self.lines
    }
}
