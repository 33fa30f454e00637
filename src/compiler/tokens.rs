use super::Fatal;
use crate::{
	syntax::{
		lexer::{Layout, Lexer, Token, TokenKind},
		SourcePos,
	},
	table::Kind,
	transcript::{Event, Transcript},
};


/// How an expected token was matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recovery {
	/// The token was the expected one, and was consumed.
	Consumed,
	/// The token was of the same class as the expected one (both reserved words or both
	/// symbols). It was consumed as if it were the expected token.
	Replaced,
	/// The token was kept, and the expected token assumed missing.
	Inserted,
}


/// The token stream seen by the parser: one token of lookahead, plus the bookkeeping for
/// the transcript and the error count.
#[derive(Debug)]
pub struct TokenStream<'a, 'b> {
	lexer: Lexer<'a, 'b>,
	token: Token,
	layout: Layout,
	/// Whether the current token was already rendered by an error annotation.
	printed: bool,
	/// The resolved kind of the current token, if it is an identifier.
	ident: Option<Kind>,
	transcript: Transcript,
	errors: usize,
	max_errors: usize,
}


impl<'a, 'b> TokenStream<'a, 'b> {
	/// Create a new stream. `step` must be called to read the first token.
	pub fn new(lexer: Lexer<'a, 'b>, max_errors: usize) -> Self {
		Self {
			lexer,
			token: Token { kind: TokenKind::Null, pos: SourcePos::default() },
			layout: Layout::default(),
			printed: true,
			ident: None,
			transcript: Transcript::default(),
			errors: 0,
			max_errors,
		}
	}


	/// The kind of the current token.
	pub fn kind(&self) -> TokenKind {
		self.token.kind
	}


	/// The number of reported errors.
	pub fn errors(&self) -> usize {
		self.errors
	}


	#[cfg(test)]
	pub fn transcript(&self) -> &Transcript {
		&self.transcript
	}


	/// Set the resolved kind of the current identifier, for the transcript.
	pub fn set_ident_kind(&mut self, kind: Kind) {
		self.ident = Some(kind);
	}


	/// Record the current token and read the next one.
	pub fn step(&mut self) -> Result<(), Fatal> {
		self.flush();

		let scanned = self.lexer.next_token()?;

		self.token = scanned.token;
		self.layout = scanned.layout;
		self.printed = false;
		self.ident = None;

		if let Some(warning) = scanned.warning {
			self.message(warning.message())?;
		}

		Ok(())
	}


	/// Match the current token against the expected one:
	/// - the expected token is consumed.
	/// - a token of the same class (both reserved words, or both symbols) is reported as
	///   replaced and consumed.
	/// - any other token is kept, and the expected token is reported as inserted.
	pub fn expect(&mut self, expected: TokenKind) -> Result<Recovery, Fatal> {
		let kind = self.kind();

		if kind == expected {
			self.step()?;
			return Ok(Recovery::Consumed);
		}

		let same_class =
			(kind.is_keyword() && expected.is_keyword())
			|| (kind.is_symbol() && expected.is_symbol());

		if same_class {
			self.printed = true;
			self.report(
				Event::Replace { token: self.token, layout: self.layout, expected }
			)?;
			self.step()?;
			Ok(Recovery::Replaced)
		} else {
			self.insert(expected)?;
			Ok(Recovery::Inserted)
		}
	}


	/// Discard the current token and read the next one. Deletions are annotated, but not
	/// counted as errors.
	pub fn delete(&mut self) -> Result<(), Fatal> {
		self.printed = true;
		self.transcript.record(Event::Delete { token: self.token, layout: self.layout });
		self.step()
	}


	/// Report a missing token, keeping the current one.
	pub fn insert(&mut self, kind: TokenKind) -> Result<(), Fatal> {
		self.report(Event::Insert { kind, pos: self.token.pos })
	}


	/// Report the current token as being of the wrong kind.
	pub fn type_error(&mut self, message: &'static str) -> Result<(), Fatal> {
		self.printed = true;
		self.report(
			Event::TypeError { token: self.token, layout: self.layout, message }
		)
	}


	pub fn missing_ident(&mut self) -> Result<(), Fatal> {
		self.report(Event::MissingIdent { pos: self.token.pos })
	}


	pub fn missing_operator(&mut self) -> Result<(), Fatal> {
		self.report(Event::MissingOperator { pos: self.token.pos })
	}


	pub fn message(&mut self, message: &'static str) -> Result<(), Fatal> {
		self.report(Event::Message { message, pos: self.token.pos })
	}


	/// Check for the final period and close the transcript.
	pub fn finish(&mut self) -> Result<(), Fatal> {
		if self.kind() == TokenKind::Period {
			self.flush();
			Ok(())
		} else {
			self.insert(TokenKind::Period)
		}
	}


	/// Consume the stream, yielding the transcript.
	pub fn into_transcript(self) -> Transcript {
		self.transcript
	}


	/// Record the current token, unless it was already rendered.
	fn flush(&mut self) {
		if !self.printed {
			self.printed = true;
			self.transcript.record(
				Event::Token { token: self.token, layout: self.layout, ident: self.ident }
			);
		}
	}


	/// Record an error and count it.
	fn report(&mut self, event: Event) -> Result<(), Fatal> {
		self.transcript.record(event);
		self.errors += 1;

		if self.errors > self.max_errors {
			Err(Fatal::too_many_errors(self.max_errors))
		} else {
			Ok(())
		}
	}
}
