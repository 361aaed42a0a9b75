use std::rc::Rc;

use crate::{
    lexer::prelude::{scan, Literal, TokenKind},
    parser::prelude::{parse_tokens, Binary, Expression, ParseErrorType, Statement},
    utils::prelude::{Reporter, SyntaxError, VectorReporterIO},
};

fn parse_with_errors(input: &str) -> (Vec<Statement>, Vec<SyntaxError>) {
    let sink = Rc::new(VectorReporterIO::new());
    let reporter = Reporter::new(sink.clone());

    let statements = parse_tokens(scan(input, &reporter), &reporter);

    (statements, sink.take_syntax_errors())
}

fn printed(input: &str) -> Vec<String> {
    let (statements, errors) = parse_with_errors(input);

    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    statements.iter()
        .map(|statement| statement.to_string())
        .collect()
}

#[test]
fn test_precedence() {
    let (statements, errors) = parse_with_errors("1 + 2 * 3;");

    assert!(errors.is_empty());
    assert_eq!(statements.len(), 1);

    let Statement::Expression(Expression::Binary(Binary { left, operator, right })) = &statements[0] else {
        panic!("expected a binary expression statement, got {:?}", statements[0]);
    };

    assert_eq!(**left, Expression::Literal(Literal::Number(1.0)));
    assert_eq!(operator.kind, TokenKind::Plus);

    match right.as_ref() {
        Expression::Binary(inner) => {
            assert_eq!(inner.operator.kind, TokenKind::Star);
            assert_eq!(*inner.left, Expression::Literal(Literal::Number(2.0)));
            assert_eq!(*inner.right, Expression::Literal(Literal::Number(3.0)));
        },
        other => panic!("expected `2 * 3` on the right, got {other:?}"),
    }
}

#[test]
fn test_infixes() {
    let parsed = printed(r#"
        1 - 2 - 3;
        8 / 4 / 2;
        1 < 2 == 3 >= 4;
        -a * (b + c);
        !!true != false;
        "a" + "b";
    "#);

    assert_eq!(parsed, vec![
        "(expr (- (- 1 2) 3))",
        "(expr (/ (/ 8 4) 2))",
        "(expr (== (< 1 2) (>= 3 4)))",
        "(expr (* (- a) (group (+ b c))))",
        "(expr (!= (! (! true)) false))",
        "(expr (+ \"a\" \"b\"))",
    ]);
}

#[test]
fn test_logical() {
    let parsed = printed("a or b and c; a and b or c == d;");

    assert_eq!(parsed, vec![
        "(expr (or a (and b c)))",
        "(expr (or (and a b) (== c d)))",
    ]);

    let (statements, _) = parse_with_errors("x or y;");

    assert!(matches!(&statements[0], Statement::Expression(Expression::Logical(_))));
}

#[test]
fn test_assignment() {
    let parsed = printed("a = 1; a = b = c or d; a = nil;");

    assert_eq!(parsed, vec![
        "(expr (= a 1))",
        "(expr (= a (= b (or c d))))",
        "(expr (= a nil))",
    ]);
}

#[test]
fn test_invalid_assignment_target() {
    let (statements, errors) = parse_with_errors("a + b = c; print 1;");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "[line 1] Error at '=': Invalid assignment target.");

    // the error does not unwind, both statements survive
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].to_string(), "(expr (+ a b))");
}

#[test]
fn test_declarations() {
    let parsed = printed("var a; var b = 1 + 2; var c = \"s\";");

    assert_eq!(parsed, vec![
        "(var a)",
        "(var b (+ 1 2))",
        "(var c \"s\")",
    ]);
}

#[test]
fn test_blocks() {
    let parsed = printed("{ var a = 1; { print a; } } {}");

    assert_eq!(parsed, vec![
        "(block (var a 1) (block (print a)))",
        "(block)",
    ]);
}

#[test]
fn test_conditionals() {
    let parsed = printed(r#"
        if (a) print 1;
        if (a) print 1; else print 2;
        if (a) if (b) print 1; else print 2;
        if (a) { print 1; } else if (b) print 2;
    "#);

    assert_eq!(parsed, vec![
        "(if a (print 1))",
        "(if a (print 1) (print 2))",
        "(if a (if b (print 1) (print 2)))",
        "(if a (block (print 1)) (if b (print 2)))",
    ]);
}

#[test]
fn test_declaration_not_allowed_as_branch() {
    let (_, errors) = parse_with_errors("if (true) var a = 1;");

    assert_eq!(errors[0].to_string(), "[line 1] Error at 'var': Expect expression.");
}

#[test]
fn test_recovers_from_missing_semicolons() {
    let input = r#"
        var a = 1
        print a;
        print a
        var b = 2;
        print b;
    "#;

    let (statements, errors) = parse_with_errors(input);

    assert_eq!(errors.len(), 2, "{errors:?}");
    assert_eq!(errors[0].to_string(), "[line 3] Error at 'print': Expect ';' after variable declaration.");
    assert_eq!(errors[1].to_string(), "[line 5] Error at 'var': Expect ';' after value.");

    // synchronizing skips the rest of the statement the parser was standing on
    let parsed = statements.iter()
        .map(|statement| statement.to_string())
        .collect::<Vec<String>>();

    assert_eq!(parsed, vec!["(print b)"]);
}

#[test]
fn test_error_kinds() {
    let cases = vec![
        ("print;", ParseErrorType::ExpectExpression, "[line 1] Error at ';': Expect expression."),
        ("var 1 = 2;", ParseErrorType::ExpectVariableName, "[line 1] Error at '1': Expect variable name."),
        ("if true) print 1;", ParseErrorType::ExpectLeftParen { after: "'if'" }, "[line 1] Error at 'true': Expect '(' after 'if'."),
        ("if (true print 1;", ParseErrorType::ExpectRightParen { after: "if condition" }, "[line 1] Error at 'print': Expect ')' after if condition."),
        ("(1 + 2;", ParseErrorType::ExpectRightParen { after: "expression" }, "[line 1] Error at ';': Expect ')' after expression."),
        ("{ print 1;", ParseErrorType::ExpectRightBrace, "[line 1] Error at end: Expect '}' after block."),
        ("1 + 2", ParseErrorType::ExpectSemicolon { after: "expression" }, "[line 1] Error at end: Expect ';' after expression."),
    ];

    for (input, expected, message) in cases {
        let (_, errors) = parse_with_errors(input);

        match errors.first() {
            Some(SyntaxError::Parse(error)) => {
                assert_eq!(error.error, expected, "input {input:?}");
                assert_eq!(error.to_string(), message, "input {input:?}");
            },
            other => panic!("input {input:?}: expected a parse error, got {other:?}"),
        }
    }
}

#[test]
fn test_lexical_and_parse_errors_in_one_pass() {
    let (_, errors) = parse_with_errors("var a = @;\nprint a");

    let messages = errors.iter()
        .map(|error| error.to_string())
        .collect::<Vec<String>>();

    assert_eq!(messages, vec![
        "[line 1] Error: Unexpected character.",
        "[line 1] Error at ';': Expect expression.",
        "[line 2] Error at end: Expect ';' after value.",
    ]);
}

#[test]
fn test_empty_program() {
    let (statements, errors) = parse_with_errors("  // nothing here\n");

    assert!(statements.is_empty());
    assert!(errors.is_empty());
}
