use crate::logging::{color_choice, write_styled_message};
use std::io::IsTerminal;
use termcolor::{Color, StandardStream};

/// Sink for the user-facing status lines of a command.
pub(crate) trait Console {
    /// Prints the message followed by a newline, optionally in the given color.
    fn secho(&mut self, message: &str, color: Option<Color>);
}

pub(crate) struct TerminalConsole {
    stream: StandardStream,
}

impl TerminalConsole {
    pub(crate) fn stdout() -> Self {
        Self {
            stream: StandardStream::stdout(color_choice(std::io::stdout().is_terminal())),
        }
    }
}

impl Console for TerminalConsole {
    fn secho(&mut self, message: &str, color: Option<Color>) {
        if let Err(error) = write_styled_message(&mut self.stream, message, color) {
            log::warn!("Unable to write to stdout: {error}");
        }
    }
}
