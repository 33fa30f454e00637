use std::fmt::{self, Display};

use crate::{
	program::CodeOverflow,
	syntax::lexer,
	table,
};


/// An error that aborts compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fatal {
	/// The source could not be scanned any further.
	Lexer(lexer::Error),
	/// Too many names or nested blocks.
	Table(table::Error),
	/// Too many instructions.
	Code(CodeOverflow),
	/// More errors than the allowed maximum.
	TooManyErrors { limit: usize },
	/// Statements or expressions nested too deeply.
	TooDeep { limit: usize },
}


impl Fatal {
	pub fn too_many_errors(limit: usize) -> Self {
		Self::TooManyErrors { limit }
	}


	pub fn too_deep(limit: usize) -> Self {
		Self::TooDeep { limit }
	}
}


impl From<lexer::Error> for Fatal {
	fn from(error: lexer::Error) -> Self {
		Self::Lexer(error)
	}
}


impl From<table::Error> for Fatal {
	fn from(error: table::Error) -> Self {
		Self::Table(error)
	}
}


impl From<CodeOverflow> for Fatal {
	fn from(error: CodeOverflow) -> Self {
		Self::Code(error)
	}
}


impl Display for Fatal {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Lexer(error) => error.fmt(f),
			Self::Table(error) => error.fmt(f),
			Self::Code(error) => error.fmt(f),
			Self::TooManyErrors { limit } => write!(f, "too many errors (more than {})", limit),
			Self::TooDeep { limit } => write!(f, "nesting deeper than {} levels", limit),
		}
	}
}


impl std::error::Error for Fatal {}
