#[cfg(test)]
mod tests;

use std::{
    io::{BufReader, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use utf8_chars::BufReadCharsExt;

use crate::{
    eval::prelude::Interpreter,
    lexer::prelude::{scan, Token},
    parser::prelude::{parse_tokens, Statement},
    utils::prelude::{Error, Reporter, VectorReporterIO},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    SyntaxError,
    RuntimeError,
}

pub fn tokenize(src: &str, reporter: &Reporter) -> Vec<Token> {
    scan(src, reporter)
}

pub fn parse(src: &str, reporter: &Reporter) -> Vec<Statement> {
    parse_tokens(scan(src, reporter), reporter)
}

/// Scans, parses and, when this call reported no syntax error, interprets `src`.
pub fn run_source<W: Write>(
    src: &str,
    interpreter: &mut Interpreter<W>,
    reporter: &Reporter
) -> Outcome {
    let syntax_errors = reporter.syntax_error_count();
    let runtime_errors = reporter.runtime_error_count();

    let statements = parse(src, reporter);

    if reporter.syntax_error_count() > syntax_errors {
        return Outcome::SyntaxError;
    }

    interpreter.interpret(&statements, reporter);

    match reporter.runtime_error_count() > runtime_errors {
        true => Outcome::RuntimeError,
        false => Outcome::Ok,
    }
}

/// Reads a whole file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let file = std::fs::File::open(path)
        .map_err(|err| Error::StdIo { err: err.kind() })?;

    let capacity = file.metadata()
        .map(|metadata| metadata.len() as usize)
        .unwrap_or_default();

    let mut src = String::with_capacity(capacity);
    let mut reader = BufReader::new(file);

    for ch in reader.chars() {
        let ch = ch.map_err(|err| Error::StdIo { err: err.kind() })?;

        src.push(ch);
    }

    log::debug!("read {} bytes from {}", src.len(), path.display());

    Ok(src)
}

pub fn run_file<W: Write>(path: impl AsRef<Path>, interpreter: &mut Interpreter<W>) -> Result<(), Error> {
    let path = path.as_ref().to_path_buf();
    let src = read_source(&path)?;

    let sink = Rc::new(VectorReporterIO::new());
    let reporter = Reporter::new(sink.clone());

    match run_source(&src, interpreter, &reporter) {
        Outcome::Ok => Ok(()),
        Outcome::SyntaxError => Err(Error::Syntax {
            path,
            src,
            errors: sink.take_syntax_errors(),
        }),
        Outcome::RuntimeError => match sink.take_runtime_errors().into_iter().next() {
            Some(error) => Err(Error::Runtime { path, src, error }),
            None => Ok(()),
        },
    }
}

/// Scans a file. Any lexical error fails the whole file.
pub fn tokenize_file(path: impl AsRef<Path>) -> Result<Vec<Token>, Error> {
    with_file(path, tokenize)
}

/// Parses a file without running it.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<Statement>, Error> {
    with_file(path, parse)
}

fn with_file<T>(
    path: impl AsRef<Path>,
    pass: impl FnOnce(&str, &Reporter) -> T
) -> Result<T, Error> {
    let path: PathBuf = path.as_ref().to_path_buf();
    let src = read_source(&path)?;

    let sink = Rc::new(VectorReporterIO::new());
    let reporter = Reporter::new(sink.clone());

    let result = pass(&src, &reporter);

    match reporter.had_syntax_error() {
        true => Err(Error::Syntax {
            path,
            src,
            errors: sink.take_syntax_errors(),
        }),
        false => Ok(result),
    }
}
