use std::{io::Write, path::PathBuf};

use codespan_reporting::{
    diagnostic::{Diagnostic as CodespanDiagnostic, Label as CodespanLabel, LabelStyle},
    files::{Error as FilesError, SimpleFiles},
    term::{self, Config},
};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use super::src_span::SrcSpan;

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize) -> CodespanLabel<usize> {
        let label = CodespanLabel::new(LabelStyle::Primary, file_id, self.span.as_range());

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

/// A single rendered error: a title, optional notes and the source it points at.
pub struct Diagnostic<'a> {
    pub title: String,
    pub notes: Vec<String>,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) -> Result<(), FilesError> {
        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }
    }

    fn write_span(&self, location: &Location, buf: &mut Buffer) -> Result<(), FilesError> {
        let mut files = SimpleFiles::new();

        let file_id = files.add(location.path.display().to_string(), location.src);

        // a span past the end of the source is clamped so the end-of-file marker still renders
        let len = location.src.len() as u32;
        let span = SrcSpan::from(location.label.span.start.min(len), location.label.span.end.min(len));
        let label = Label { text: location.label.text.clone(), span };

        let diagnostic = CodespanDiagnostic::error()
            .with_message(&self.title)
            .with_labels(vec![label.to_codespan_label(file_id)])
            .with_notes(self.notes.clone());

        term::emit(buf, &Config::default(), &files, &diagnostic)
    }

    fn write_title(&self, buf: &mut Buffer) -> Result<(), FilesError> {
        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Red)))?;
        write!(buf, "error")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(buf, ": {}", self.title)?;

        buf.set_color(&ColorSpec::new())?;

        for note in &self.notes {
            writeln!(buf, "  = {note}")?;
        }

        Ok(())
    }
}
