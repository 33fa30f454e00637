use std::fmt::{self, Display};

use super::SourcePos;


/// The kind of fatal lexical error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
	/// A token was requested after the end of input was already reached.
	UnexpectedEof,
	/// A source line longer than the allowed maximum.
	LineTooLong { limit: usize },
}


impl Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::UnexpectedEof => write!(f, "unexpected end of file"),
			Self::LineTooLong { limit } => write!(f, "line longer than {} characters", limit),
		}
	}
}


/// A fatal lexical error. Scanning can't proceed after such error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
	pub error: ErrorKind,
	pub pos: SourcePos,
}


impl Error {
	pub fn unexpected_eof(pos: SourcePos) -> Self {
		Self { error: ErrorKind::UnexpectedEof, pos }
	}

	pub fn line_too_long(limit: usize, pos: SourcePos) -> Self {
		Self { error: ErrorKind::LineTooLong { limit }, pos }
	}
}


impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} - {}", self.pos, self.error)
	}
}


impl std::error::Error for Error {}


/// A recoverable lexical problem. The token is still produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Warning {
	/// Identifier longer than the maximum name length. The name was truncated.
	TooLongToken,
	/// Numeral with more digits than allowed. The value may have overflowed.
	TooLargeNumber,
}


impl Warning {
	pub fn message(&self) -> &'static str {
		match self {
			Self::TooLongToken => "too long token",
			Self::TooLargeNumber => "too large number",
		}
	}
}


impl Display for Warning {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		self.message().fmt(f)
	}
}
