use crate::exit_code;
use std::io::{IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

pub(crate) fn setup_logging(debug: bool) {
    if let Err(error) = stderrlog::new()
        .verbosity(if debug { 3 } else { 1 }) // LevelFilter::Debug or LevelFilter::Warn
        .init()
    {
        eprintln!("Unable to initialize logger: {error}");
        std::process::exit(exit_code::USER_ERROR);
    }
}

/// Prints an error message to stderr, in red when stderr is a terminal.
pub(crate) fn log_error(message: impl AsRef<str>) {
    let mut stream = StandardStream::stderr(color_choice(std::io::stderr().is_terminal()));

    if let Err(error) = write_styled_message(
        &mut stream,
        format!("Error: {}", message.as_ref()),
        Some(Color::Red),
    ) {
        log::warn!("Unable to write to stderr: {error}");
    }
}

pub(crate) fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

// Styles each line of text separately, so that the line colour doesn't leak into prefixes added
// by tools that capture the output.
pub(crate) fn write_styled_message(
    stream: &mut impl WriteColor,
    message: impl AsRef<str>,
    color: Option<Color>,
) -> std::io::Result<()> {
    let mut spec = ColorSpec::new();
    spec.set_fg(color);

    // Using `.split('\n')` rather than `.lines()` since the latter eats trailing newlines.
    for line in message.as_ref().split('\n') {
        stream.set_color(&spec)?;
        write!(stream, "{line}")?;
        stream.reset()?;
        writeln!(stream)?;
    }

    stream.flush()
}
