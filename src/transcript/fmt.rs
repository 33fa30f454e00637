use std::fmt::Display as _;

use super::Event;
use crate::{
	fmt::{Display, Show},
	symbol,
	term::color,
};


impl<'a> Display<'a> for Event {
	type Context = &'a symbol::Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter, context: Self::Context) -> std::fmt::Result {
		match self {
			Self::Token { token, .. } => token.fmt(f, context),

			Self::Delete { token, .. } => write!(
				f,
				"{} - unexpected {}, deleted",
				token.pos,
				Show(token, context),
			),

			Self::Insert { kind, pos } => write!(
				f,
				"{} - missing {}, inserted",
				pos,
				Show(kind, context),
			),

			Self::Replace { token, expected, .. } => write!(
				f,
				"{} - unexpected {}, replaced by {}",
				token.pos,
				Show(token, context),
				Show(expected, context),
			),

			Self::TypeError { token, message, .. } => write!(
				f,
				"{} - {}: {}",
				token.pos,
				Show(token, context),
				color::Fg(color::Magenta, message),
			),

			Self::MissingIdent { pos } => write!(f, "{} - missing identifier", pos),

			Self::MissingOperator { pos } => write!(f, "{} - missing operator", pos),

			Self::Message { message, pos } => write!(f, "{} - {}", pos, message),

			Self::Fatal { message } => message.fmt(f),
		}
	}
}
