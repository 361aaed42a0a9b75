use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use lox_core::utils::prelude::Error;
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

pub(crate) fn print_running(text: &str) {
    print_colourful_prefix("Running", Color::Magenta, text)
}

pub(crate) fn print_finished(duration: Duration) {
    print_colourful_prefix("Finished", Color::Green, &format!("in {}", seconds(duration)))
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    let written = write_colourful_prefix(&mut buffer, prefix, color, text)
        .and_then(|()| buffer_writer.print(&buffer));

    if let Err(err) = written {
        log::warn!("failed to write status line: {err}");
    }
}

fn write_colourful_prefix(buffer: &mut Buffer, prefix: &str, color: Color, text: &str) -> std::io::Result<()> {
    buffer.set_color(
        ColorSpec::new()
            .set_intense(true)
            .set_bold(true)
            .set_fg(Some(color)),
    )?;
    write!(buffer, "{prefix: >11}")?;
    buffer.set_color(&ColorSpec::new())?;
    writeln!(buffer, " {text}")
}

/// Writes `err` to stderr, as source snippets when `pretty` is set and as the plain
/// `[line N] Error...` lines otherwise.
pub fn print_error(err: &Error, pretty: bool) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();

    let written = match pretty {
        true => err.pretty(&mut buffer).map_err(|err| err.to_string()),
        false => err.messages()
            .iter()
            .try_for_each(|message| writeln!(buffer, "{message}"))
            .map_err(|err| err.to_string()),
    };

    let printed = written.and_then(|()| buffer_writer
        .print(&buffer)
        .map_err(|err| err.to_string())
    );

    if let Err(reason) = printed {
        log::warn!("failed to write error to stderr: {reason}");
    }
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
