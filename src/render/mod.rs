pub(crate) mod canvas;
pub(crate) mod engine;
pub(crate) mod layout;
pub(crate) mod operation;
pub(crate) mod properties;
pub(crate) mod text;

use crate::{
    render::{canvas::Canvas, engine::RenderEngine, operation::RenderOperation, properties::WindowSize},
    terminal::printer::{Terminal, TerminalCommand, TerminalError, TerminalIo, TerminalWrite},
};
use std::io;

/// The result of a render operation.
pub(crate) type RenderResult = Result<(), RenderError>;

/// Draw render operations onto a fresh canvas of the given size.
pub(crate) fn draw_canvas<'a>(
    dimensions: WindowSize,
    operations: impl Iterator<Item = &'a RenderOperation>,
) -> Canvas {
    let mut canvas = Canvas::new(dimensions);
    RenderEngine::new(&mut canvas).render(operations);
    canvas
}

/// Allows drawing on the terminal.
pub(crate) struct TerminalDrawer<W: TerminalWrite> {
    pub(crate) terminal: Terminal<W>,
}

impl<W> TerminalDrawer<W>
where
    W: TerminalWrite,
{
    pub(crate) fn new(handle: W) -> io::Result<Self> {
        let terminal = Terminal::new(handle)?;
        Ok(Self { terminal })
    }

    /// Draw render operations on a canvas of the given size and flush it to the terminal.
    pub(crate) fn render_operations<'a>(
        &mut self,
        dimensions: WindowSize,
        operations: impl Iterator<Item = &'a RenderOperation>,
    ) -> RenderResult {
        let canvas = draw_canvas(dimensions, operations);
        self.terminal.execute(&TerminalCommand::BeginUpdate)?;
        self.terminal.execute(&TerminalCommand::ClearScreen)?;
        for command in canvas.commands() {
            self.terminal.execute(&command)?;
        }
        self.terminal.execute(&TerminalCommand::EndUpdate)?;
        self.terminal.execute(&TerminalCommand::Flush)?;
        Ok(())
    }
}

/// A rendering error.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("terminal: {0}")]
    Terminal(#[from] TerminalError),

    #[error("screen is too small")]
    TerminalTooSmall,
}
