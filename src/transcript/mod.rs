mod fmt;
mod latex;

use crate::{
	syntax::{
		lexer::{Layout, Token, TokenKind},
		SourcePos,
	},
	table::Kind,
};
pub use latex::Latex;


/// A transcript event. The sequence of events reproduces the source token stream,
/// annotated with the corrections made by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	/// A token, as it was read. Identifiers carry their resolved kind, if any.
	Token {
		token: Token,
		layout: Layout,
		ident: Option<Kind>,
	},
	/// A token discarded by the parser.
	Delete { token: Token, layout: Layout },
	/// A token assumed missing by the parser.
	Insert { kind: TokenKind, pos: SourcePos },
	/// A token taken as a different token of the same class.
	Replace {
		token: Token,
		layout: Layout,
		expected: TokenKind,
	},
	/// A token of the wrong kind.
	TypeError {
		token: Token,
		layout: Layout,
		message: &'static str,
	},
	/// An identifier was expected.
	MissingIdent { pos: SourcePos },
	/// An operator was expected between two factors.
	MissingOperator { pos: SourcePos },
	/// Some other error.
	Message { message: &'static str, pos: SourcePos },
	/// Compilation was aborted.
	Fatal { message: String },
}


impl Event {
	/// Whether this event is an error annotation, as opposed to a plain token.
	pub fn is_error(&self) -> bool {
		!matches!(self, Self::Token { .. })
	}
}


/// The annotated token stream of a compilation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Transcript {
	events: Vec<Event>,
}


impl Transcript {
	pub fn record(&mut self, event: Event) {
		self.events.push(event);
	}


	pub fn events(&self) -> &[Event] {
		&self.events
	}


	/// Error annotations, in order.
	pub fn errors(&self) -> impl Iterator<Item = &Event> {
		self.events
			.iter()
			.filter(|event| event.is_error())
	}
}
