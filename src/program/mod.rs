mod codegen;
mod fmt;

pub use codegen::{CodeBuffer, CodeOverflow};


/// A machine word. All values in PL/0' are integers.
pub type Word = i64;


/// A variable location: the lexical level of the declaring block and the offset from
/// that block's frame base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelAddr {
	pub level: usize,
	pub offset: Word,
}


/// Micro operations for the `opr` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
	Neg,
	Add,
	Sub,
	Mul,
	Div,
	Odd,
	Eq,
	Ls,
	Gr,
	Neq,
	Lseq,
	Greq,
	/// Pop and print the top of the stack.
	Wrt,
	/// Print a line break.
	Wrl,
}


/// A virtual machine instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Instruction {
	/// Push an immediate value.
	Lit(Word),
	/// Arithmetic, relational or output operation on the top of the stack.
	Opr(Operator),
	/// Push the value of a variable.
	Lod(RelAddr),
	/// Pop a value into a variable.
	Sto(RelAddr),
	/// Call the function declared at `level`, whose code starts at `address`.
	Cal { level: usize, address: usize },
	/// Return from a block at `level`, releasing `params` argument slots.
	Ret { level: usize, params: usize },
	/// Reserve stack cells for a frame.
	Ict(usize),
	/// Unconditional jump.
	Jmp(usize),
	/// Pop a value and jump if it is zero.
	Jpc(usize),
}


/// A compiled program: a flat instruction array, starting at address zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
	pub code: Box<[Instruction]>,
}
