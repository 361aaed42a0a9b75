use std::{path::PathBuf, rc::Rc};

use crate::{
    eval::prelude::Interpreter,
    lexer::prelude::TokenKind,
    utils::prelude::{Error, Reporter, VectorReporterIO, EXIT_DATA, EXIT_IO, EXIT_SOFTWARE},
};

use super::{parse, parse_file, read_source, run_file, run_source, tokenize, tokenize_file, Outcome};

fn source_file(name: &str, src: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("lox-runner-{}-{name}.lox", std::process::id()));

    std::fs::write(&path, src).unwrap();

    path
}

#[test]
fn test_tokenize() {
    let reporter = Reporter::null();

    let kinds = tokenize("var a = 1;", &reporter).iter()
        .map(|token| token.kind)
        .collect::<Vec<TokenKind>>();

    assert_eq!(kinds, vec![
        TokenKind::Var,
        TokenKind::Identifier,
        TokenKind::Equal,
        TokenKind::Number,
        TokenKind::Semicolon,
        TokenKind::Eof,
    ]);
}

#[test]
fn test_parse() {
    let reporter = Reporter::null();

    let statements = parse("print 1 + 2 * 3;", &reporter);

    assert_eq!(statements.len(), 1);
    assert_eq!(statements[0].to_string(), "(print (+ 1 (* 2 3)))");
    assert!(!reporter.had_syntax_error());
}

#[test]
fn test_outcomes_are_per_call() {
    let sink = Rc::new(VectorReporterIO::new());
    let reporter = Reporter::new(sink.clone());
    let mut interpreter = Interpreter::new(Vec::new());

    assert_eq!(run_source("print ;", &mut interpreter, &reporter), Outcome::SyntaxError);
    assert_eq!(run_source("print nope;", &mut interpreter, &reporter), Outcome::RuntimeError);

    // earlier failures do not leak into later runs
    assert_eq!(run_source("print 1;", &mut interpreter, &reporter), Outcome::Ok);

    assert_eq!(reporter.syntax_error_count(), 1);
    assert_eq!(reporter.runtime_error_count(), 1);
    assert_eq!(interpreter.output().as_slice(), b"1\n");
}

#[test]
fn test_run_file() {
    let path = source_file("ok", "var greeting = \"hi\";\nprint greeting + \" there\";\n");
    let mut interpreter = Interpreter::new(Vec::new());

    assert_eq!(run_file(&path, &mut interpreter), Ok(()));
    assert_eq!(interpreter.into_output(), b"hi there\n");

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_run_file_syntax_error() {
    let path = source_file("syntax", "print 1\nprint 2;\nvar = 3;\n");
    let mut interpreter = Interpreter::new(Vec::new());

    let err = run_file(&path, &mut interpreter).unwrap_err();

    assert_eq!(err.exit_code(), EXIT_DATA);
    assert_eq!(err.messages(), vec![
        "[line 2] Error at 'print': Expect ';' after value.",
        "[line 3] Error at '=': Expect variable name.",
    ]);
    assert!(interpreter.output().is_empty());

    let Error::Syntax { path: reported, src, .. } = err else {
        panic!("expected a syntax error");
    };

    assert_eq!(reported, path);
    assert!(src.starts_with("print 1"));

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_run_file_runtime_error() {
    let path = source_file("runtime", "print \"start\";\n{\n  print -nil;\n}\n");
    let mut interpreter = Interpreter::new(Vec::new());

    let err = run_file(&path, &mut interpreter).unwrap_err();

    assert_eq!(err.exit_code(), EXIT_SOFTWARE);
    assert_eq!(err.messages(), vec!["Operand must be a number.\n[line 3]"]);
    assert_eq!(interpreter.output().as_slice(), b"start\n");

    let pretty = err.pretty_string();

    assert!(pretty.contains("Runtime error"), "{pretty}");
    assert!(pretty.contains("Operand must be a number."), "{pretty}");

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_missing_file() {
    let path = std::env::temp_dir().join("lox-runner-does-not-exist.lox");

    let err = read_source(&path).unwrap_err();

    assert_eq!(err, Error::StdIo { err: std::io::ErrorKind::NotFound });
    assert_eq!(err.exit_code(), EXIT_IO);
}

#[test]
fn test_invalid_utf8() {
    let path = std::env::temp_dir().join(format!("lox-runner-{}-bytes.lox", std::process::id()));

    std::fs::write(&path, [b'p', 0xff, 0xfe]).unwrap();

    let err = read_source(&path).unwrap_err();

    assert_eq!(err.exit_code(), EXIT_IO);

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_single_passes_on_files() {
    let path = source_file("passes", "print (1);\n");

    let tokens = tokenize_file(&path).unwrap();
    let statements = parse_file(&path).unwrap();

    assert_eq!(tokens.len(), 6);
    assert_eq!(statements[0].to_string(), "(print (group 1))");

    let _ = std::fs::remove_file(path);

    let path = source_file("lexical", "print #;\n");

    let err = tokenize_file(&path).unwrap_err();

    assert_eq!(err.messages(), vec!["[line 1] Error: Unexpected character."]);

    let _ = std::fs::remove_file(path);
}

#[test]
fn test_diagnostics_point_into_the_source() {
    let path = source_file("diagnostics", "print 1");
    let err = parse_file(&path).unwrap_err();

    let diagnostics = err.to_diagnostics();

    assert_eq!(diagnostics.len(), 1);

    let location = diagnostics[0].location.as_ref().unwrap();

    // the missing `;` is blamed on the end of input
    assert_eq!(location.src, "print 1");
    assert_eq!(location.label.span, crate::utils::prelude::SrcSpan::point(7));

    let _ = std::fs::remove_file(path);
}
