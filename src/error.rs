use std::{
	fmt::{self, Display},
	io,
	path::{Path, PathBuf},
};

use crate::{compiler::Fatal, runtime::Panic};


/// An error that stops the driver.
#[derive(Debug)]
pub enum Error {
	/// A file could not be read or written.
	Io {
		path: PathBuf,
		error: io::Error,
	},
	/// Compilation was aborted.
	Compile(Fatal),
	/// Execution faulted.
	Runtime(Panic),
}


impl Error {
	pub fn io<P: AsRef<Path>>(error: io::Error, path: P) -> Self {
		Self::Io { path: path.as_ref().to_owned(), error }
	}
}


impl From<Fatal> for Error {
	fn from(fatal: Fatal) -> Self {
		Self::Compile(fatal)
	}
}


impl From<Panic> for Error {
	fn from(panic: Panic) -> Self {
		Self::Runtime(panic)
	}
}


impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Io { path, error } => write!(f, "{}: {}", path.display(), error),
			Self::Compile(fatal) => write!(f, "compilation aborted: {}", fatal),
			Self::Runtime(panic) => write!(f, "runtime error: {}", panic),
		}
	}
}


impl std::error::Error for Error {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io { error, .. } => Some(error),
			Self::Compile(fatal) => Some(fatal),
			Self::Runtime(panic) => Some(panic),
		}
	}
}
