use super::error::{LexicalError, LexicalErrorType};
use super::token::{Literal, Token, TokenKind};
use crate::utils::prelude::{Reporter, SrcSpan};

pub type LexResult = std::result::Result<Token, LexicalError>;

pub fn str_to_keyword(word: &str) -> Option<TokenKind> {
	Some(match word {
		"and" => TokenKind::And,
		"class" => TokenKind::Class,
		"else" => TokenKind::Else,
		"false" => TokenKind::False,
		"for" => TokenKind::For,
		"fun" => TokenKind::Fun,
		"if" => TokenKind::If,
		"nil" => TokenKind::Nil,
		"or" => TokenKind::Or,
		"print" => TokenKind::Print,
		"return" => TokenKind::Return,
		"super" => TokenKind::Super,
		"this" => TokenKind::This,
		"true" => TokenKind::True,
		"var" => TokenKind::Var,
		"while" => TokenKind::While,

		_ => return None
	})
}

fn is_ident_start(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_'
}

/// Scans a whole source string, reporting lexical errors and carrying on past them.
pub fn scan(src: &str, reporter: &Reporter) -> Vec<Token> {
	Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c))).scan_tokens(reporter)
}

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	line: usize,
	finished: bool,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			line: 1,
			finished: false,
			input,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	/// Drains the lexer. The result always ends with exactly one `Eof` token.
	pub fn scan_tokens(self, reporter: &Reporter) -> Vec<Token> {
		let mut tokens = vec![];

		for result in self {
			match result {
				Ok(token) => tokens.push(token),
				Err(err) => reporter.syntax_error(err.into()),
			}
		}

		log::debug!("scanned {} tokens", tokens.len());

		tokens
	}

	pub fn next_token(&mut self) -> LexResult {
		loop {
			let start = self.position;
			let line = self.line;

			let ch = match self.ch {
				Some(ch) => ch,
				None => return Ok(Token::eof(line, start)),
			};

			let token = match ch {
				'(' => self.eat_one_char(TokenKind::LeftParen),
				')' => self.eat_one_char(TokenKind::RightParen),
				'{' => self.eat_one_char(TokenKind::LeftBrace),
				'}' => self.eat_one_char(TokenKind::RightBrace),
				',' => self.eat_one_char(TokenKind::Comma),
				'.' => self.eat_one_char(TokenKind::Dot),
				'-' => self.eat_one_char(TokenKind::Minus),
				'+' => self.eat_one_char(TokenKind::Plus),
				';' => self.eat_one_char(TokenKind::Semicolon),
				'*' => self.eat_one_char(TokenKind::Star),
				'!' => self.eat_one_or_two('=', TokenKind::BangEqual, TokenKind::Bang),
				'=' => self.eat_one_or_two('=', TokenKind::EqualEqual, TokenKind::Equal),
				'<' => self.eat_one_or_two('=', TokenKind::LessEqual, TokenKind::Less),
				'>' => self.eat_one_or_two('=', TokenKind::GreaterEqual, TokenKind::Greater),
				'/' => {
					if self.next_ch == Some('/') {
						self.skip_comment();
						continue;
					}

					self.eat_one_char(TokenKind::Slash)
				},
				'"' => return self.lex_string(),
				'0'..='9' => return self.lex_number(),
				c if is_ident_start(c) => self.lex_ident(),
				' ' | '\r' | '\t' | '\n' => {
					self.next_char();
					continue;
				},
				c => {
					self.next_char();

					return Err(LexicalError {
						error: LexicalErrorType::UnexpectedCharacter { ch: c },
						line,
						location: SrcSpan::from(start, self.position),
					});
				}
			};

			return Ok(token);
		}
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				self.next_position += self.next_ch.map_or(0, |ch| ch.len_utf8() as u32);

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		if ch == Some('\n') {
			self.line += 1;
		}

		ch
	}

	fn eat_one_char(&mut self, kind: TokenKind) -> Token {
		let start_pos = self.position;
		let line = self.line;
		let lexeme = self.next_char().map(String::from).unwrap_or_default();
		let end_pos = self.position;

		Token::new(kind, lexeme, None, line, SrcSpan::from(start_pos, end_pos))
	}

	fn eat_one_or_two(&mut self, second: char, double: TokenKind, single: TokenKind) -> Token {
		if self.next_ch != Some(second) {
			return self.eat_one_char(single);
		}

		let start_pos = self.position;
		let line = self.line;
		let mut lexeme = String::with_capacity(2);
		lexeme.extend(self.next_char());
		lexeme.extend(self.next_char());
		let end_pos = self.position;

		Token::new(double, lexeme, None, line, SrcSpan::from(start_pos, end_pos))
	}

	fn skip_comment(&mut self) {
		while !matches!(self.ch, Some('\n') | None) {
			self.next_char();
		}
	}

	fn lex_ident(&mut self) -> Token {
		let start_pos = self.position;
		let line = self.line;
		let mut ident = String::new();

		while let Some(ch) = self.ch.filter(|ch| is_ident_continue(*ch)) {
			ident.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		let (kind, literal) = match str_to_keyword(&ident) {
			Some(TokenKind::True) => (TokenKind::True, Some(Literal::Bool(true))),
			Some(TokenKind::False) => (TokenKind::False, Some(Literal::Bool(false))),
			Some(TokenKind::Nil) => (TokenKind::Nil, Some(Literal::Nil)),
			Some(keyword) => (keyword, None),
			None => (TokenKind::Identifier, None),
		};

		Token::new(kind, ident, literal, line, SrcSpan::from(start_pos, end_pos))
	}

	fn lex_number(&mut self) -> LexResult {
		let start_pos = self.position;
		let line = self.line;
		let mut value = String::new();

		self.eat_digits(&mut value);

		// a fractional part needs digits on both sides of the dot
		if self.ch == Some('.') && self.next_ch.is_some_and(|ch| ch.is_ascii_digit()) {
			value.extend(self.next_char());
			self.eat_digits(&mut value);
		}

		let end_pos = self.position;
		let location = SrcSpan::from(start_pos, end_pos);

		match value.parse::<f64>() {
			Ok(number) => Ok(Token::new(
				TokenKind::Number,
				value,
				Some(Literal::Number(number)),
				line,
				location
			)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::InvalidNumber,
				line,
				location
			})
		}
	}

	fn eat_digits(&mut self, value: &mut String) {
		while let Some(ch) = self.ch.filter(|ch| ch.is_ascii_digit()) {
			value.push(ch);
			self.next_char();
		}
	}

	fn lex_string(&mut self) -> LexResult {
		let start_pos = self.position;
		let line = self.line;

		self.next_char(); // skip opening quote

		let mut value = String::new();

		loop {
			match self.ch {
				Some('"') => break,
				Some(ch) => {
					value.push(ch);
					self.next_char();
				},
				None => {
					return Err(LexicalError {
						error: LexicalErrorType::UnterminatedString,
						line: self.line,
						location: SrcSpan::from(start_pos, self.position)
					})
				}
			}
		}

		self.next_char(); // skip closing quote

		let end_pos = self.position;

		Ok(Token::new(
			TokenKind::String,
			format!("\"{value}\""),
			Some(Literal::String(value)),
			line,
			SrcSpan::from(start_pos, end_pos)
		))
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if matches!(&token, Ok(token) if token.is_eof()) {
			self.finished = true;
		}

		Some(token)
	}
}
