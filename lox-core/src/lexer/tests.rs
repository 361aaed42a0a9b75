use std::rc::Rc;

use super::prelude::{scan, Lexer, LexicalError, LexicalErrorType, Literal, Token, TokenKind};
use crate::utils::prelude::{Reporter, SrcSpan, SyntaxError, VectorReporterIO};

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|token| token.kind).collect()
}

fn scan_with_errors(input: &str) -> (Vec<Token>, Vec<SyntaxError>) {
    let sink = Rc::new(VectorReporterIO::new());
    let reporter = Reporter::new(sink.clone());

    let tokens = scan(input, &reporter);

    (tokens, sink.take_syntax_errors())
}

#[test]
fn test_punctuation_and_operators() {
    let input = "(){},.-+;*/ ! != = == < <= > >=";

    let (tokens, errors) = scan_with_errors(input);

    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(kinds(&tokens), vec![
        TokenKind::LeftParen,
        TokenKind::RightParen,
        TokenKind::LeftBrace,
        TokenKind::RightBrace,
        TokenKind::Comma,
        TokenKind::Dot,
        TokenKind::Minus,
        TokenKind::Plus,
        TokenKind::Semicolon,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Bang,
        TokenKind::BangEqual,
        TokenKind::Equal,
        TokenKind::EqualEqual,
        TokenKind::Less,
        TokenKind::LessEqual,
        TokenKind::Greater,
        TokenKind::GreaterEqual,
        TokenKind::Eof,
    ]);

    assert_eq!(tokens[12].lexeme, "!=");
    assert_eq!(tokens[12].location.start, 14);
    assert_eq!(tokens[12].location.end, 16);
}

#[test]
fn test_numbers() -> Result<(), LexicalError> {
    let input = "3 3.5 10 0.25";

    let mut lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

    let numbers = vec![
        ("3", 3.0),
        ("3.5", 3.5),
        ("10", 10.0),
        ("0.25", 0.25),
    ];

    for (idx, (lexeme, value)) in numbers.into_iter().enumerate() {
        let token = lexer.next_token()?;

        assert_eq!(token.kind, TokenKind::Number, "token {idx} is not a number");
        assert_eq!(token.lexeme, lexeme);
        assert_eq!(token.literal, Some(Literal::Number(value)));
    }

    assert!(lexer.next_token()?.is_eof());

    Ok(())
}

#[test]
fn test_dangling_dots_are_not_numbers() {
    let (tokens, errors) = scan_with_errors("3. .5");

    assert!(errors.is_empty());
    assert_eq!(kinds(&tokens), vec![
        TokenKind::Number,
        TokenKind::Dot,
        TokenKind::Dot,
        TokenKind::Number,
        TokenKind::Eof,
    ]);
    assert_eq!(tokens[0].literal, Some(Literal::Number(3.0)));
    assert_eq!(tokens[3].literal, Some(Literal::Number(5.0)));
}

#[test]
fn test_keywords_and_identifiers() {
    let input = "and class else false for fun if nil or print return super this true var while _x foo1 orchid";

    let (tokens, errors) = scan_with_errors(input);

    assert!(errors.is_empty());
    assert_eq!(kinds(&tokens), vec![
        TokenKind::And,
        TokenKind::Class,
        TokenKind::Else,
        TokenKind::False,
        TokenKind::For,
        TokenKind::Fun,
        TokenKind::If,
        TokenKind::Nil,
        TokenKind::Or,
        TokenKind::Print,
        TokenKind::Return,
        TokenKind::Super,
        TokenKind::This,
        TokenKind::True,
        TokenKind::Var,
        TokenKind::While,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Eof,
    ]);

    assert!(tokens[..16].iter().all(|token| token.kind.is_reserved_word()));
    assert_eq!(tokens[18].lexeme, "orchid");
    assert_eq!(tokens[3].literal, Some(Literal::Bool(false)));
    assert_eq!(tokens[7].literal, Some(Literal::Nil));
}

#[test]
fn test_strings_span_lines() {
    let input = "\"one\ntwo\nthree\" after";

    let (tokens, errors) = scan_with_errors(input);

    assert!(errors.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].lexeme, "\"one\ntwo\nthree\"");
    assert_eq!(tokens[0].literal, Some(Literal::String("one\ntwo\nthree".into())));
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[1].line, 3, "two embedded newlines move the line counter by two");
}

#[test]
fn test_comments_and_lines() {
    let input = r#"// a comment with "quotes" and ( symbols
var a = 1; // trailing
a / 2;
"#;

    let (tokens, errors) = scan_with_errors(input);

    assert!(errors.is_empty());
    assert_eq!(kinds(&tokens), vec![
        TokenKind::Var,
        TokenKind::Identifier,
        TokenKind::Equal,
        TokenKind::Number,
        TokenKind::Semicolon,
        TokenKind::Identifier,
        TokenKind::Slash,
        TokenKind::Number,
        TokenKind::Semicolon,
        TokenKind::Eof,
    ]);

    let lines = tokens.iter().map(|token| token.line).collect::<Vec<usize>>();
    assert_eq!(lines, vec![2, 2, 2, 2, 2, 3, 3, 3, 3, 4]);
}

#[test]
fn test_unexpected_characters_do_not_stop_scanning() {
    let input = "var @ a = 1;\n# print a;";

    let (tokens, errors) = scan_with_errors(input);

    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].to_string(), "[line 1] Error: Unexpected character.");
    assert_eq!(errors[1].line(), 2);

    match &errors[0] {
        SyntaxError::Lexical(error) => {
            assert_eq!(error.error, LexicalErrorType::UnexpectedCharacter { ch: '@' })
        },
        other => panic!("expected a lexical error, got {other:?}"),
    }

    assert_eq!(kinds(&tokens), vec![
        TokenKind::Var,
        TokenKind::Identifier,
        TokenKind::Equal,
        TokenKind::Number,
        TokenKind::Semicolon,
        TokenKind::Print,
        TokenKind::Identifier,
        TokenKind::Semicolon,
        TokenKind::Eof,
    ]);
}

#[test]
fn test_unterminated_string() {
    let (tokens, errors) = scan_with_errors("print \"never\nclosed");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "[line 2] Error: Unterminated string.");
    assert_eq!(kinds(&tokens), vec![TokenKind::Print, TokenKind::Eof]);
}

#[test]
fn test_single_eof() {
    for input in ["", "   \n\t", "1 + 2", "\"open"] {
        let (tokens, _) = scan_with_errors(input);

        let eofs = tokens.iter().filter(|token| token.is_eof()).count();

        assert_eq!(eofs, 1, "input {input:?}");
        assert!(tokens.last().is_some_and(|token| token.is_eof()));
    }
}

#[test]
fn test_token_listing() {
    let (tokens, _) = scan_with_errors("x = 3;\n\"s\"");

    let listing = tokens.iter()
        .map(|token| token.to_string())
        .collect::<Vec<String>>();

    assert_eq!(listing, vec![
        "IDENTIFIER x null",
        "EQUAL = null",
        "NUMBER 3 3.0",
        "SEMICOLON ; null",
        "STRING \"s\" s",
        "EOF  null",
    ]);
}

#[test]
fn test_eof_is_an_empty_span_at_the_end() {
    let (tokens, _) = scan_with_errors("1 + 2");

    let eof = tokens.last().unwrap();

    assert!(eof.is_eof());
    assert_eq!(eof.location, SrcSpan::point(5));
    assert_eq!(eof.location.as_range(), 5..5);
}
