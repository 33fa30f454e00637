mod fmt;

use super::SourcePos;
use crate::symbol::Symbol;


/// All reserved words in the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
	Begin,
	End,
	If,
	Then,
	While,
	Do,
	Return,
	Function,
	Var,
	Const,
	Odd,
	Write,
	WriteLn,
}


impl Keyword {
	/// Match a spelling against the reserved words.
	pub fn from_bytes(word: &[u8]) -> Option<Self> {
		match word {
			b"begin" => Some(Self::Begin),
			b"end" => Some(Self::End),
			b"if" => Some(Self::If),
			b"then" => Some(Self::Then),
			b"while" => Some(Self::While),
			b"do" => Some(Self::Do),
			b"return" => Some(Self::Return),
			b"function" => Some(Self::Function),
			b"var" => Some(Self::Var),
			b"const" => Some(Self::Const),
			b"odd" => Some(Self::Odd),
			b"write" => Some(Self::Write),
			b"writeln" => Some(Self::WriteLn),
			_ => None,
		}
	}


	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Begin => "begin",
			Self::End => "end",
			Self::If => "if",
			Self::Then => "then",
			Self::While => "while",
			Self::Do => "do",
			Self::Return => "return",
			Self::Function => "function",
			Self::Var => "var",
			Self::Const => "const",
			Self::Odd => "odd",
			Self::Write => "write",
			Self::WriteLn => "writeln",
		}
	}
}


/// Arithmetic, relational and assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	Plus,  // +
	Minus, // -
	Times, // *
	Div,   // /

	Equals,        // =
	NotEquals,     // <>
	Greater,       // >
	GreaterEquals, // >=
	Lower,         // <
	LowerEquals,   // <=

	Assign, // :=
}


impl Operator {
	/// Additive arithmetic operators (+, -).
	pub fn is_term(&self) -> bool {
		matches!(self, Self::Plus | Self::Minus)
	}


	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Plus => "+",
			Self::Minus => "-",
			Self::Times => "*",
			Self::Div => "/",
			Self::Equals => "=",
			Self::NotEquals => "<>",
			Self::Greater => ">",
			Self::GreaterEquals => ">=",
			Self::Lower => "<",
			Self::LowerEquals => "<=",
			Self::Assign => ":=",
		}
	}
}


/// All possible kinds of token in PL/0'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
	Identifier(Symbol),
	Number(i64),
	Keyword(Keyword),
	Operator(Operator),

	OpenParens,  // (
	CloseParens, // )
	Comma,       // ,
	Period,      // .
	Semicolon,   // ;

	/// A character that starts no token, including a lone colon.
	Null,
	EndOfInput,
}


impl TokenKind {
	/// Check if the token is a reserved word.
	pub fn is_keyword(&self) -> bool {
		matches!(self, Self::Keyword(_))
	}


	/// Check if the token is an operator or a punctuation symbol.
	pub fn is_symbol(&self) -> bool {
		matches!(
			self,
			Self::Operator(_)
				| Self::OpenParens
				| Self::CloseParens
				| Self::Comma
				| Self::Period
				| Self::Semicolon
		)
	}


	/// Check if the token may only appear at the start of a statement.
	pub fn is_statement_start(&self) -> bool {
		matches!(
			self,
			Self::Keyword(
				Keyword::If
					| Keyword::Begin
					| Keyword::Return
					| Keyword::While
					| Keyword::Write
					| Keyword::WriteLn
			)
		)
	}


	/// Check if the token starts a factor.
	pub fn is_factor_start(&self) -> bool {
		matches!(self, Self::Identifier(_) | Self::Number(_) | Self::OpenParens)
	}


	/// Check if the token terminates a statement.
	pub fn is_statement_terminator(&self) -> bool {
		matches!(
			self,
			Self::Semicolon | Self::Period | Self::Keyword(Keyword::End) | Self::EndOfInput
		)
	}


	/// The fixed spelling of reserved words and symbols.
	pub fn as_str(&self) -> Option<&'static str> {
		match self {
			Self::Keyword(keyword) => Some(keyword.as_str()),
			Self::Operator(op) => Some(op.as_str()),
			Self::OpenParens => Some("("),
			Self::CloseParens => Some(")"),
			Self::Comma => Some(","),
			Self::Period => Some("."),
			Self::Semicolon => Some(";"),
			Self::Identifier(_) | Self::Number(_) | Self::Null | Self::EndOfInput => None,
		}
	}
}


impl From<Keyword> for TokenKind {
	fn from(keyword: Keyword) -> Self {
		Self::Keyword(keyword)
	}
}


impl From<Operator> for TokenKind {
	fn from(op: Operator) -> Self {
		Self::Operator(op)
	}
}


/// Whitespace preceding a token. Used only for rendering transcripts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
	/// Line breaks before the token.
	pub newlines: u32,
	/// Columns of blank space since the last line break. A tab counts as five.
	pub spaces: u32,
}


/// A lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
	pub kind: TokenKind,
	pub pos: SourcePos,
}
