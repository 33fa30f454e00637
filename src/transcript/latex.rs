use std::fmt::{self, Write};

use super::{Event, Transcript};
use crate::{
	symbol,
	syntax::lexer::{Layout, Token, TokenKind},
	table::Kind,
};


const PREAMBLE: &str = "\
\\documentclass[12pt]{article}
\\begin{document}
\\fboxsep=0pt
\\def\\insert#1{$\\fbox{#1}$}
\\def\\delete#1{$\\fboxrule=.5mm\\fbox{#1}$}
\\rm
";


/// Render a transcript as a LaTeX document.
/// Reserved words are bold, symbols are typeset in math mode, and identifiers are styled
/// according to their kind.
#[derive(Debug, Clone, Copy)]
pub struct Latex<'a> {
	pub transcript: &'a Transcript,
	pub interner: &'a symbol::Interner,
}


impl<'a> Latex<'a> {
	pub fn new(transcript: &'a Transcript, interner: &'a symbol::Interner) -> Self {
		Self { transcript, interner }
	}


	fn layout(&self, f: &mut fmt::Formatter, layout: Layout) -> fmt::Result {
		for _ in 0 .. layout.newlines {
			f.write_str("\\ \\par\n")?;
		}

		for _ in 0 .. layout.spaces {
			f.write_str("\\ ")?;
		}

		Ok(())
	}


	fn token(&self, f: &mut fmt::Formatter, token: &Token, ident: Option<Kind>) -> fmt::Result {
		match token.kind {
			TokenKind::Keyword(keyword) => write!(f, "{{\\bf {}}}", keyword.as_str()),

			TokenKind::Identifier(symbol) => {
				let name = symbol.spelling(self.interner);

				match ident {
					Some(Kind::Param) => write!(f, "{{\\sl {}}}", name),
					Some(Kind::Func) => write!(f, "{{\\it {}}}", name),
					Some(Kind::Const) => write!(f, "{{\\sf {}}}", name),
					Some(Kind::Var) | None => write!(f, "{}", name),
				}
			}

			TokenKind::Number(value) => write!(f, "{}", value),

			TokenKind::Null | TokenKind::EndOfInput => Ok(()),

			kind => match kind.as_str() {
				Some(symbol) => write!(f, "${}$", symbol),
				None => Ok(()),
			},
		}
	}


	fn event(&self, f: &mut fmt::Formatter, event: &Event) -> fmt::Result {
		match event {
			Event::Token { token, layout, ident } => {
				self.layout(f, *layout)?;
				self.token(f, token, *ident)
			}

			Event::Delete { token, layout } => {
				self.layout(f, *layout)?;
				self.delete(f, token)
			}

			Event::Insert { kind, .. } => self.insert(f, *kind),

			Event::Replace { token, layout, expected } => {
				self.layout(f, *layout)?;
				self.delete(f, token)?;
				self.insert(f, *expected)
			}

			Event::TypeError { token, layout, message } => {
				self.layout(f, *layout)?;
				write!(f, "\\(\\stackrel{{\\mbox{{\\scriptsize {}}}}}{{\\mbox{{", Escaped(message))?;
				self.token(f, token, None)?;
				f.write_str("}}\\)")
			}

			Event::MissingIdent { .. } => f.write_str("\\insert{Id}"),

			Event::MissingOperator { .. } => f.write_str("\\insert{$\\otimes$}"),

			Event::Message { message, .. } => write!(f, "$^{{{}}}$", Escaped(message)),

			Event::Fatal { message } => write!(f, "$^{{{}}}$\nfatal errors\n", Escaped(message)),
		}
	}


	fn delete(&self, f: &mut fmt::Formatter, token: &Token) -> fmt::Result {
		f.write_str("\\delete{")?;
		self.token(f, token, None)?;
		f.write_char('}')
	}


	fn insert(&self, f: &mut fmt::Formatter, kind: TokenKind) -> fmt::Result {
		match kind {
			TokenKind::Keyword(keyword) => write!(f, "\\ \\insert{{{{\\bf {}}}}}", keyword.as_str()),
			kind => write!(f, "\\ \\insert{{${}$}}", kind.as_str().unwrap_or("?")),
		}
	}
}


impl<'a> fmt::Display for Latex<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(PREAMBLE)?;

		for event in self.transcript.events() {
			self.event(f, event)?;
		}

		f.write_str("\n\\end{document}\n")
	}
}


/// Escape LaTeX special characters.
struct Escaped<'a>(&'a str);


impl<'a> fmt::Display for Escaped<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for c in self.0.chars() {
			match c {
				'#' | '$' | '%' | '&' | '_' | '{' | '}' => {
					f.write_char('\\')?;
					f.write_char(c)?;
				}
				c => f.write_char(c)?,
			}
		}

		Ok(())
	}
}
