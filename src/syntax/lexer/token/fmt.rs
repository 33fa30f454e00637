use std::fmt::Display as _;

use super::{Keyword, Operator, Token, TokenKind};
use crate::{
	fmt::Display,
	symbol,
	term::color,
};


impl std::fmt::Display for Keyword {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		color::Fg(color::Blue, self.as_str()).fmt(f)
	}
}


impl std::fmt::Display for Operator {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		color::Fg(color::Yellow, self.as_str()).fmt(f)
	}
}


impl<'a> Display<'a> for TokenKind {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Identifier(symbol) => symbol.fmt(f, context),
			Self::Number(value) => value.fmt(f),
			Self::Keyword(keyword) => keyword.fmt(f),
			Self::Operator(op) => op.fmt(f),
			Self::Null => "invalid character".fmt(f),
			Self::EndOfInput => "end of input".fmt(f),
			punctuation => punctuation
				.as_str()
				.unwrap_or_default()
				.fmt(f),
		}
	}
}


impl<'a> Display<'a> for Token {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		self.kind.fmt(f, context)
	}
}
