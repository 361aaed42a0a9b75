use std::path::PathBuf;

use codespan_reporting::files::Error as FilesError;
use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::ParseError,
};
use super::{
    diagnostic::{Diagnostic, Label, Location},
    reporter::SyntaxError,
};

pub const EXIT_USAGE: u8 = 64;
pub const EXIT_DATA: u8 = 65;
pub const EXIT_SOFTWARE: u8 = 70;
pub const EXIT_IO: u8 = 74;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to parse source code")]
    Syntax {
        path: PathBuf,
        src: String,
        errors: Vec<SyntaxError>
    },
    #[error("execution stopped by a runtime error")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed: {err}")]
    StdIo {
        err: std::io::ErrorKind
    }
}

impl Error {
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Syntax { .. } => EXIT_DATA,
            Error::Runtime { .. } => EXIT_SOFTWARE,
            Error::StdIo { .. } => EXIT_IO,
        }
    }

    /// Plain one-problem-per-entry rendering, `[line N] Error...` for syntax errors.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Error::Syntax { errors, .. } => errors.iter()
                .map(|error| error.to_string())
                .collect(),
            Error::Runtime { error, .. } => vec![error.to_string()],
            Error::StdIo { .. } => vec![self.to_string()],
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();

        match self.pretty(&mut nocolor) {
            Ok(()) => String::from_utf8_lossy(&nocolor.into_inner()).into_owned(),
            Err(_) => self.messages().join("\n"),
        }
    }

    pub fn pretty(&self, buf: &mut Buffer) -> Result<(), FilesError> {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic<'_>> {
        match self {
            Error::Syntax { path, src, errors } => errors.iter()
                .map(|error| {
                    let (title, label, notes) = match error {
                        SyntaxError::Lexical(error) => lexical_parts(error),
                        SyntaxError::Parse(error) => parse_parts(error),
                    };

                    Diagnostic {
                        title,
                        notes,
                        location: Some(Location {
                            src,
                            path: path.clone(),
                            label: Label {
                                text: Some(label),
                                span: error.location(),
                            },
                        }),
                    }
                })
                .collect(),
            Error::Runtime { path, src, error } => vec![Diagnostic {
                title: "Runtime error".into(),
                notes: vec![format!("execution stopped at line {}", error.token.line)],
                location: Some(Location {
                    src,
                    path: path.clone(),
                    label: Label {
                        text: Some(error.error.to_string()),
                        span: error.token.location,
                    },
                }),
            }],
            Error::StdIo { err } => vec![Diagnostic {
                title: "Standard IO error".into(),
                notes: vec![format!("{err}")],
                location: None,
            }],
        }
    }
}

fn lexical_parts(error: &LexicalError) -> (String, String, Vec<String>) {
    let (message, notes) = error.details();

    ("Lexical error".into(), message.into(), notes)
}

fn parse_parts(error: &ParseError) -> (String, String, Vec<String>) {
    ("Syntax error".into(), error.message(), vec![format!("Found {}", error.found())])
}
