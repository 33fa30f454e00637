mod cursor;
mod error;
#[cfg(test)]
mod tests;
mod token;

use crate::{config::Limits, symbol};
use super::SourcePos;
pub use cursor::Cursor;
pub use error::{Error, ErrorKind, Warning};
pub use token::{Keyword, Layout, Operator, Token, TokenKind};


/// Width of a tab character in the transcript layout.
const TAB_WIDTH: u32 = 5;


/// Character classes, used to dispatch on the first character of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
	Letter,
	Digit,
	Colon,
	Lower,
	Greater,
	/// A character that forms a token on its own.
	Single(TokenKind),
	Other,
}


/// The class of every byte, built at compile time.
static CHAR_CLASSES: [CharClass; 256] = char_classes();


const fn char_classes() -> [CharClass; 256] {
	let mut table = [CharClass::Other; 256];

	let mut c = 0;
	while c < 256 {
		let byte = c as u8;
		if byte.is_ascii_digit() {
			table[c] = CharClass::Digit;
		} else if byte.is_ascii_alphabetic() {
			table[c] = CharClass::Letter;
		}
		c += 1;
	}

	table[b':' as usize] = CharClass::Colon;
	table[b'<' as usize] = CharClass::Lower;
	table[b'>' as usize] = CharClass::Greater;
	table[b'+' as usize] = CharClass::Single(TokenKind::Operator(Operator::Plus));
	table[b'-' as usize] = CharClass::Single(TokenKind::Operator(Operator::Minus));
	table[b'*' as usize] = CharClass::Single(TokenKind::Operator(Operator::Times));
	table[b'/' as usize] = CharClass::Single(TokenKind::Operator(Operator::Div));
	table[b'=' as usize] = CharClass::Single(TokenKind::Operator(Operator::Equals));
	table[b'(' as usize] = CharClass::Single(TokenKind::OpenParens);
	table[b')' as usize] = CharClass::Single(TokenKind::CloseParens);
	table[b',' as usize] = CharClass::Single(TokenKind::Comma);
	table[b'.' as usize] = CharClass::Single(TokenKind::Period);
	table[b';' as usize] = CharClass::Single(TokenKind::Semicolon);

	table
}


/// A token along with the whitespace that preceded it and any recoverable problem found
/// while scanning it.
#[derive(Debug, Clone, Copy)]
pub struct Scanned {
	pub token: Token,
	pub layout: Layout,
	pub warning: Option<Warning>,
}


/// The lexer for PL/0' source code. Tokens are produced on demand, one at a time.
#[derive(Debug)]
pub struct Lexer<'a, 'b> {
	cursor: Cursor<'a>,
	interner: &'b mut symbol::Interner,
	limits: Limits,
	/// Whether the end of input token was already produced.
	finished: bool,
}


impl<'a, 'b> Lexer<'a, 'b> {
	pub fn new(cursor: Cursor<'a>, interner: &'b mut symbol::Interner, limits: Limits) -> Self {
		Self { cursor, interner, limits, finished: false }
	}


	/// Scan the next token.
	/// Requesting a token after EndOfInput has been produced is an error.
	pub fn next_token(&mut self) -> Result<Scanned, Error> {
		if self.finished {
			return Err(Error::unexpected_eof(self.cursor.pos()));
		}

		let layout = self.skip_whitespace()?;
		let pos = self.cursor.pos();
		let mut warning = None;

		let kind = match self.cursor.peek() {
			None => {
				self.finished = true;
				TokenKind::EndOfInput
			}

			Some(c) => match CHAR_CLASSES[c as usize] {
				CharClass::Letter => self.scan_word(&mut warning)?,

				CharClass::Digit => self.scan_number(&mut warning)?,

				CharClass::Colon => {
					self.step()?;
					if self.eat(b'=')? {
						Operator::Assign.into()
					} else {
						TokenKind::Null
					}
				}

				CharClass::Lower => {
					self.step()?;
					if self.eat(b'=')? {
						Operator::LowerEquals.into()
					} else if self.eat(b'>')? {
						Operator::NotEquals.into()
					} else {
						Operator::Lower.into()
					}
				}

				CharClass::Greater => {
					self.step()?;
					if self.eat(b'=')? {
						Operator::GreaterEquals.into()
					} else {
						Operator::Greater.into()
					}
				}

				CharClass::Single(kind) => {
					self.step()?;
					kind
				}

				CharClass::Other => {
					self.step()?;
					TokenKind::Null
				}
			},
		};

		Ok(Scanned { token: Token { kind, pos }, layout, warning })
	}


	/// Step the cursor, checking the line length limit.
	fn step(&mut self) -> Result<(), Error> {
		self.cursor.step();

		if self.cursor.line_len() > self.limits.max_line {
			Err(Error::line_too_long(self.limits.max_line, self.cursor.pos()))
		} else {
			Ok(())
		}
	}


	/// Step over the given character if it is the next one.
	fn eat(&mut self, expected: u8) -> Result<bool, Error> {
		if self.cursor.peek() == Some(expected) {
			self.step()?;
			Ok(true)
		} else {
			Ok(false)
		}
	}


	/// Skip blanks, counting them for the transcript layout.
	fn skip_whitespace(&mut self) -> Result<Layout, Error> {
		let mut layout = Layout::default();

		loop {
			match self.cursor.peek() {
				Some(b' ') => layout.spaces += 1,
				Some(b'\t') => layout.spaces += TAB_WIDTH,
				Some(b'\r') => (),
				Some(b'\n') => {
					layout.spaces = 0;
					layout.newlines += 1;
				}
				_ => return Ok(layout),
			}

			self.step()?;
		}
	}


	/// Scan an identifier or a reserved word.
	fn scan_word(&mut self, warning: &mut Option<Warning>) -> Result<TokenKind, Error> {
		let mut word = Vec::with_capacity(self.limits.max_name);
		let mut len = 0;

		while let Some(c) = self.cursor.peek() {
			if !matches!(CHAR_CLASSES[c as usize], CharClass::Letter | CharClass::Digit) {
				break;
			}

			// Excess characters are consumed but dropped.
			if len + 1 < self.limits.max_name {
				word.push(c);
			}
			len += 1;

			self.step()?;
		}

		if len >= self.limits.max_name {
			*warning = Some(Warning::TooLongToken);
		}

		Ok(
			match Keyword::from_bytes(&word) {
				Some(keyword) => keyword.into(),
				None => TokenKind::Identifier(self.interner.get_or_intern(word)),
			}
		)
	}


	/// Scan an unsigned integer literal.
	fn scan_number(&mut self, warning: &mut Option<Warning>) -> Result<TokenKind, Error> {
		let mut value: i64 = 0;
		let mut digits = 0;

		while let Some(c) = self.cursor.peek() {
			if !c.is_ascii_digit() {
				break;
			}

			value = value
				.wrapping_mul(10)
				.wrapping_add(i64::from(c - b'0'));
			digits += 1;

			self.step()?;
		}

		if digits > self.limits.max_digits {
			*warning = Some(Warning::TooLargeNumber);
		}

		Ok(TokenKind::Number(value))
	}
}
