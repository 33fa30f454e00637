use std::fmt::{self, Display};

use super::{Instruction, Operator, Program, RelAddr};
use crate::{fmt::sep_by, term::color};


impl Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let name = match self {
			Self::Neg => "neg",
			Self::Add => "add",
			Self::Sub => "sub",
			Self::Mul => "mul",
			Self::Div => "div",
			Self::Odd => "odd",
			Self::Eq => "eq",
			Self::Ls => "ls",
			Self::Gr => "gr",
			Self::Neq => "neq",
			Self::Lseq => "lseq",
			Self::Greq => "greq",
			Self::Wrt => "wrt",
			Self::Wrl => "wrl",
		};

		name.fmt(f)
	}
}


impl Display for RelAddr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}, {}", self.level, self.offset)
	}
}


impl Display for Instruction {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let mnemonic = |name: &'static str| color::Fg(color::Blue, name);

		match self {
			Self::Lit(value) => write!(f, "{} {}", mnemonic("lit"), value),
			Self::Opr(op) => write!(f, "{} {}", mnemonic("opr"), color::Fg(color::Yellow, op)),
			Self::Lod(addr) => write!(f, "{} {}", mnemonic("lod"), addr),
			Self::Sto(addr) => write!(f, "{} {}", mnemonic("sto"), addr),
			Self::Cal { level, address } => write!(f, "{} {}, {}", mnemonic("cal"), level, address),
			Self::Ret { level, params } => write!(f, "{} {}, {}", mnemonic("ret"), level, params),
			Self::Ict(size) => write!(f, "{} {}", mnemonic("ict"), size),
			Self::Jmp(target) => write!(f, "{} {}", mnemonic("jmp"), target),
			Self::Jpc(target) => write!(f, "{} {}", mnemonic("jpc"), target),
		}
	}
}


/// One instruction per line, prefixed by its address.
impl Display for Program {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		sep_by(
			self.code.iter().enumerate(),
			f,
			|(address, instruction), f| write!(f, "{:>4}: {}", address, instruction),
			"\n",
		)
	}
}
