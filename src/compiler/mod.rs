mod decl;
mod error;
mod expr;
mod statement;
#[cfg(test)]
mod tests;
mod tokens;

use crate::{
	config::Limits,
	program::{CodeBuffer, Instruction, Program, Word},
	symbol::{Interner, Symbol},
	syntax::{
		lexer::{Cursor, Keyword, Lexer, TokenKind},
		Source,
	},
	table::{Entry, EntryIx, Kind, Resolution, Table},
	transcript::{Event, Transcript},
};
pub use error::Fatal;
use tokens::TokenStream;


/// The outcome of a compilation. Compilation always produces a transcript, even when it
/// was aborted.
#[derive(Debug)]
pub struct Compilation {
	pub transcript: Transcript,
	/// The number of reported errors.
	pub errors: usize,
	pub result: Result<Program, Fatal>,
}


impl Compilation {
	/// The compiled program, if it may be executed: compilation was not aborted and fewer
	/// than `min_error` errors were reported.
	pub fn runnable(&self, min_error: usize) -> Option<&Program> {
		match &self.result {
			Ok(program) if self.errors < min_error => Some(program),
			_ => None,
		}
	}
}


/// Compile a PL/0' program in a single pass.
pub fn compile(source: &Source, interner: &mut Interner, limits: &Limits) -> Compilation {
	let cursor = Cursor::from(source.contents.as_ref());
	let lexer = Lexer::new(cursor, interner, *limits);
	let mut compiler = Compiler::new(lexer, limits);

	let result = compiler.program();

	let Compiler { tokens, code, .. } = compiler;
	let errors = tokens.errors();
	let mut transcript = tokens.into_transcript();

	let result = match result {
		Ok(()) => Ok(code.into_program()),
		Err(fatal) => {
			transcript.record(Event::Fatal { message: fatal.to_string() });
			Err(fatal)
		}
	};

	Compilation { transcript, errors, result }
}


/// Recursive descent compiler. Code is generated as the source is parsed, and forward
/// jumps are backpatched once their targets are known.
#[derive(Debug)]
struct Compiler<'a, 'b> {
	tokens: TokenStream<'a, 'b>,
	table: Table,
	code: CodeBuffer,
	/// Offset of the first local variable of a frame.
	first_addr: Word,
	/// Current depth of nested statements and parenthesized expressions.
	nesting: usize,
	max_nesting: usize,
}


impl<'a, 'b> Compiler<'a, 'b> {
	fn new(lexer: Lexer<'a, 'b>, limits: &Limits) -> Self {
		Self {
			tokens: TokenStream::new(lexer, limits.max_error),
			table: Table::new(limits),
			code: CodeBuffer::new(limits.max_code),
			first_addr: limits.first_addr,
			nesting: 0,
			max_nesting: limits.max_nesting,
		}
	}


	/// program = block "." .
	fn program(&mut self) -> Result<(), Fatal> {
		self.tokens.step()?;
		self.table.enter_scope(self.first_addr)?;
		self.block(None)?;
		self.tokens.finish()
	}


	/// block = { declaration } statement .
	/// The scope of the block must have been entered already, and is left at the end.
	/// `function` is the function whose body this block is, if any.
	fn block(&mut self, function: Option<EntryIx>) -> Result<(), Fatal> {
		// Skip over the nested functions.
		let skip = self.emit(Instruction::Jmp(0))?;

		loop {
			match self.tokens.kind() {
				TokenKind::Keyword(Keyword::Const) => {
					self.tokens.step()?;
					self.const_decl()?;
				}

				TokenKind::Keyword(Keyword::Var) => {
					self.tokens.step()?;
					self.var_decl()?;
				}

				TokenKind::Keyword(Keyword::Function) => {
					self.tokens.step()?;
					self.func_decl()?;
				}

				_ => break,
			}
		}

		let body = self.code.next_address();
		self.code.backpatch(skip, body);
		if let Some(function) = function {
			self.table.patch_func_address(function, body);
		}

		let frame = self.emit(Instruction::Ict(0))?;
		self.statement()?;
		// Undefined names may have been declared in the body.
		self.code.resize_frame(frame, self.table.frame_size());
		self.emit_return()?;

		self.table.leave_scope();

		Ok(())
	}


	fn emit(&mut self, instruction: Instruction) -> Result<usize, Fatal> {
		Ok(self.code.emit(instruction)?)
	}


	/// Emit the return of the current block.
	fn emit_return(&mut self) -> Result<usize, Fatal> {
		let level = self.table.current_level();
		let params = self.table.enclosing_param_count();

		Ok(self.code.emit_return(level, params)?)
	}


	/// Parse a nested construct, aborting if the nesting is too deep.
	fn nested<F>(&mut self, parse: F) -> Result<(), Fatal>
	where
		F: FnOnce(&mut Self) -> Result<(), Fatal>,
	{
		if self.nesting >= self.max_nesting {
			return Err(Fatal::too_deep(self.max_nesting));
		}

		self.nesting += 1;
		let result = parse(self);
		self.nesting -= 1;

		result
	}


	/// Resolve a name, reporting it if undefined.
	/// Undefined names are provisionally declared when a variable is expected.
	fn resolve(&mut self, name: Symbol, expected: Kind) -> Result<Option<Entry>, Fatal> {
		match self.table.resolve(name, expected)? {
			Resolution::Found(ix) => {
				let entry = *self.table.get(ix);
				self.tokens.set_ident_kind(entry.kind());
				Ok(Some(entry))
			}

			Resolution::Undefined(provisional) => {
				self.tokens.type_error("undefined")?;
				Ok(provisional.map(|ix| *self.table.get(ix)))
			}
		}
	}


	/// After an item of a comma separated list, consume the comma. An identifier right
	/// after the item is taken as the next item, with the comma reported as missing.
	/// Returns whether the list continues.
	fn list_continues(&mut self) -> Result<bool, Fatal> {
		match self.tokens.kind() {
			TokenKind::Comma => {
				self.tokens.step()?;
				Ok(true)
			}

			TokenKind::Identifier(_) => {
				self.tokens.insert(TokenKind::Comma)?;
				Ok(true)
			}

			_ => Ok(false),
		}
	}
}

