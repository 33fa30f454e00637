mod panic;

use std::{convert::TryFrom, io::Write};

use crate::{
	config::Limits,
	program::{Instruction, Operator, Program, RelAddr, Word},
};
pub use panic::Panic;


/// A stack machine with a display. Each active block has a frame on the stack, and the
/// display holds the frame base of the most recent active block of each level.
///
/// Frame layout, from the base: the saved display entry, the return address, then the
/// local variables. Arguments are pushed by the caller right below the frame base.
#[derive(Debug)]
pub struct Vm<'a, W> {
	code: &'a [Instruction],
	stack: Box<[Word]>,
	display: Box<[usize]>,
	/// Address of the next instruction.
	pc: usize,
	/// Address of the instruction being executed.
	current: usize,
	/// Number of used stack cells.
	top: usize,
	/// Frames may not extend past this cell.
	frame_limit: usize,
	output: W,
}


impl<'a, W> Vm<'a, W>
where
	W: Write,
{
	/// Prepare a machine to run the given program. Printed values go to `output`.
	pub fn new(program: &'a Program, limits: &Limits, output: W) -> Self {
		Self {
			code: &program.code,
			stack: vec![0; limits.max_stack].into(),
			display: vec![0; limits.max_level].into(),
			pc: 0,
			current: 0,
			top: 0,
			frame_limit: limits.max_stack.saturating_sub(limits.register_margin),
			output,
		}
	}


	/// Run the program until the main block returns.
	/// The output is flushed even if execution faults.
	pub fn run(&mut self) -> Result<(), Panic> {
		let result = loop {
			match self.step() {
				Ok(true) => (),
				Ok(false) => break Ok(()),
				Err(panic) => break Err(panic),
			}
		};

		self.output.flush()?;

		result
	}


	/// Execute a single instruction. Returns whether the machine is still running.
	pub fn step(&mut self) -> Result<bool, Panic> {
		self.current = self.pc;

		let instruction = *self.code
			.get(self.pc)
			.ok_or_else(|| Panic::invalid_jump(self.pc as Word, self.pc))?;

		self.pc += 1;

		match instruction {
			Instruction::Lit(value) => self.push(value)?,

			Instruction::Opr(operator) => self.operate(operator)?,

			Instruction::Lod(addr) => {
				let cell = self.cell(addr)?;
				self.push(self.stack[cell])?;
			}

			Instruction::Sto(addr) => {
				let cell = self.cell(addr)?;
				self.stack[cell] = self.pop()?;
			}

			Instruction::Cal { level, address } => {
				let level = self.level(level + 1)?;

				if self.top + 2 > self.stack.len() {
					return Err(Panic::stack_overflow(self.current));
				}

				if address >= self.code.len() {
					return Err(Panic::invalid_jump(address as Word, self.current));
				}

				self.stack[self.top] = self.display[level] as Word;
				self.stack[self.top + 1] = self.pc as Word;
				self.display[level] = self.top;
				self.pc = address;
			}

			Instruction::Ret { level, params } => {
				let level = self.level(level)?;
				let value = self.pop()?;

				self.top = self.display[level];
				self.display[level] = self.read_index(self.top)?;
				self.pc = self.read_index(self.top + 1)?;
				self.top = self.top
					.checked_sub(params)
					.ok_or_else(|| Panic::invalid_address(-(params as Word), self.current))?;

				self.push(value)?;
			}

			Instruction::Ict(cells) => {
				self.top += cells;

				if self.top >= self.frame_limit {
					return Err(Panic::stack_overflow(self.current));
				}
			}

			Instruction::Jmp(target) => self.pc = target,

			Instruction::Jpc(target) => {
				if self.pop()? == 0 {
					self.pc = target;
				}
			}
		}

		Ok(self.pc != 0)
	}


	fn operate(&mut self, operator: Operator) -> Result<(), Panic> {
		match operator {
			Operator::Neg => {
				let value = self.pop()?;
				self.push(value.wrapping_neg())
			}

			Operator::Odd => {
				let value = self.pop()?;
				self.push(Word::from(value % 2 != 0))
			}

			Operator::Add => self.binary(|lhs, rhs| Ok(lhs.wrapping_add(rhs))),
			Operator::Sub => self.binary(|lhs, rhs| Ok(lhs.wrapping_sub(rhs))),
			Operator::Mul => self.binary(|lhs, rhs| Ok(lhs.wrapping_mul(rhs))),

			Operator::Div => {
				let pc = self.current;
				self.binary(
					|lhs, rhs| {
						if rhs == 0 {
							Err(Panic::division_by_zero(pc))
						} else {
							Ok(lhs.wrapping_div(rhs))
						}
					}
				)
			}

			Operator::Eq => self.compare(|lhs, rhs| lhs == rhs),
			Operator::Neq => self.compare(|lhs, rhs| lhs != rhs),
			Operator::Ls => self.compare(|lhs, rhs| lhs < rhs),
			Operator::Gr => self.compare(|lhs, rhs| lhs > rhs),
			Operator::Lseq => self.compare(|lhs, rhs| lhs <= rhs),
			Operator::Greq => self.compare(|lhs, rhs| lhs >= rhs),

			Operator::Wrt => {
				let value = self.pop()?;
				write!(self.output, "{} ", value)?;
				Ok(())
			}

			Operator::Wrl => {
				writeln!(self.output)?;
				Ok(())
			}
		}
	}


	fn binary<F>(&mut self, op: F) -> Result<(), Panic>
	where
		F: FnOnce(Word, Word) -> Result<Word, Panic>,
	{
		let rhs = self.pop()?;
		let lhs = self.pop()?;
		let value = op(lhs, rhs)?;
		self.push(value)
	}


	fn compare<F>(&mut self, op: F) -> Result<(), Panic>
	where
		F: FnOnce(Word, Word) -> bool,
	{
		self.binary(|lhs, rhs| Ok(Word::from(op(lhs, rhs))))
	}


	fn push(&mut self, value: Word) -> Result<(), Panic> {
		let pc = self.current;
		let cell = self.stack
			.get_mut(self.top)
			.ok_or_else(|| Panic::stack_overflow(pc))?;

		*cell = value;
		self.top += 1;

		Ok(())
	}


	fn pop(&mut self) -> Result<Word, Panic> {
		if self.top == 0 {
			return Err(Panic::invalid_address(-1, self.current));
		}

		self.top -= 1;

		Ok(self.stack[self.top])
	}


	/// Check a display index.
	fn level(&self, level: usize) -> Result<usize, Panic> {
		if level < self.display.len() {
			Ok(level)
		} else {
			Err(Panic::invalid_level(level, self.current))
		}
	}


	/// The stack cell of a variable.
	fn cell(&self, addr: RelAddr) -> Result<usize, Panic> {
		let level = self.level(addr.level)?;
		let address = self.display[level] as Word + addr.offset;

		usize::try_from(address)
			.ok()
			.filter(|&cell| cell < self.stack.len())
			.ok_or_else(|| Panic::invalid_address(address, self.current))
	}


	/// Read a stack cell holding an address.
	fn read_index(&self, cell: usize) -> Result<usize, Panic> {
		let value = *self.stack
			.get(cell)
			.ok_or_else(|| Panic::invalid_address(cell as Word, self.current))?;

		usize::try_from(value).map_err(|_| Panic::invalid_address(value, self.current))
	}
}
