use std::{
	io,
	fmt::{self, Display},
};

use crate::program::Word;


/// A runtime fault. Execution stops at the faulting instruction.
#[derive(Debug)]
pub enum Panic {
	StackOverflow { pc: usize },
	DivisionByZero { pc: usize },
	/// A stack cell outside of the stack.
	InvalidAddress {
		address: Word,
		pc: usize,
	},
	/// A display entry outside of the display.
	InvalidLevel {
		level: usize,
		pc: usize,
	},
	/// A jump or call outside of the code.
	InvalidJump {
		target: Word,
		pc: usize,
	},
	Io(io::Error),
}


impl Panic {
	pub fn stack_overflow(pc: usize) -> Self {
		Self::StackOverflow { pc }
	}


	pub fn division_by_zero(pc: usize) -> Self {
		Self::DivisionByZero { pc }
	}


	pub fn invalid_address(address: Word, pc: usize) -> Self {
		Self::InvalidAddress { address, pc }
	}


	pub fn invalid_level(level: usize, pc: usize) -> Self {
		Self::InvalidLevel { level, pc }
	}


	pub fn invalid_jump(target: Word, pc: usize) -> Self {
		Self::InvalidJump { target, pc }
	}
}


impl From<io::Error> for Panic {
	fn from(error: io::Error) -> Self {
		Self::Io(error)
	}
}


impl Display for Panic {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::StackOverflow { pc } => write!(f, "stack overflow at {}", pc),

			Self::DivisionByZero { pc } => write!(f, "division by zero at {}", pc),

			Self::InvalidAddress { address, pc } => {
				write!(f, "invalid stack address {} at {}", address, pc)
			}

			Self::InvalidLevel { level, pc } => write!(f, "invalid level {} at {}", level, pc),

			Self::InvalidJump { target, pc } => write!(f, "invalid jump to {} at {}", target, pc),

			Self::Io(error) => write!(f, "{}", error),
		}
	}
}


impl std::error::Error for Panic {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io(error) => Some(error),
			_ => None,
		}
	}
}
