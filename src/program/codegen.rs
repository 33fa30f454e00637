use std::fmt::{self, Display};

use super::{Instruction, Program};


/// The instruction limit was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeOverflow {
	pub limit: usize,
}


impl Display for CodeOverflow {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "too many instructions (limit is {})", self.limit)
	}
}


impl std::error::Error for CodeOverflow {}


/// An append only instruction store.
/// The only allowed mutation is patching the target of a forward jump.
#[derive(Debug)]
pub struct CodeBuffer {
	code: Vec<Instruction>,
	limit: usize,
	/// The highest address targeted by a jump so far.
	furthest_target: usize,
}


impl CodeBuffer {
	/// Create an empty buffer holding at most `limit` instructions.
	pub fn new(limit: usize) -> Self {
		Self { code: Vec::new(), limit, furthest_target: 0 }
	}


	/// Append an instruction, returning its address.
	pub fn emit(&mut self, instruction: Instruction) -> Result<usize, CodeOverflow> {
		if self.code.len() >= self.limit {
			return Err(CodeOverflow { limit: self.limit });
		}

		if let Instruction::Jmp(target) | Instruction::Jpc(target) = instruction {
			self.furthest_target = self.furthest_target.max(target);
		}

		self.code.push(instruction);

		Ok(self.code.len() - 1)
	}


	/// Append a return instruction, unless the last instruction is already a return.
	/// The return is always emitted if some jump targets the next address, as the previous
	/// return may be skipped.
	/// Returns the address of the last return.
	pub fn emit_return(&mut self, level: usize, params: usize) -> Result<usize, CodeOverflow> {
		let targeted = self.furthest_target >= self.code.len();

		match self.code.last() {
			Some(Instruction::Ret { .. }) if !targeted => Ok(self.code.len() - 1),
			_ => self.emit(Instruction::Ret { level, params }),
		}
	}


	/// Set the frame size of the `ict` instruction at `address`.
	/// Panics if there is no `ict` at the given address.
	pub fn resize_frame(&mut self, address: usize, cells: usize) {
		match self.code.get_mut(address) {
			Some(Instruction::Ict(old)) => *old = cells,
			other => panic!("attempt to resize frame of non-ict instruction {:?}", other),
		}
	}


	/// Set the target of the jump at `address`.
	/// Panics if there is no jump at the given address.
	pub fn backpatch(&mut self, address: usize, target: usize) {
		match self.code.get_mut(address) {
			Some(Instruction::Jmp(old)) | Some(Instruction::Jpc(old)) => {
				*old = target;
				self.furthest_target = self.furthest_target.max(target);
			}
			other => panic!("attempt to backpatch non-jump instruction {:?}", other),
		}
	}


	/// The address of the next emitted instruction.
	pub fn next_address(&self) -> usize {
		self.code.len()
	}


	/// The instructions emitted so far.
	#[cfg(test)]
	pub fn code(&self) -> &[Instruction] {
		&self.code
	}


	pub fn into_program(self) -> Program {
		Program { code: self.code.into() }
	}
}
