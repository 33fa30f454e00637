use super::{Compiler, Fatal};
use crate::{
	program::{self, Instruction},
	symbol::Symbol,
	syntax::lexer::{Keyword, Operator, TokenKind},
	table::{Entry, Kind},
};


impl<'a, 'b> Compiler<'a, 'b> {
	/// statement = [ ident ":=" expression
	///             | "begin" statement { ";" statement } "end"
	///             | "if" condition "then" statement
	///             | "while" condition "do" statement
	///             | "return" expression
	///             | "write" [ expression ]
	///             | "writeln" ] .
	/// Unexpected tokens are deleted until a statement or a terminator is found.
	pub(super) fn statement(&mut self) -> Result<(), Fatal> {
		loop {
			match self.tokens.kind() {
				TokenKind::Identifier(name) => return self.assignment(name),

				TokenKind::Keyword(Keyword::Begin) => {
					self.tokens.step()?;
					return self.nested(Self::compound);
				}

				TokenKind::Keyword(Keyword::If) => {
					self.tokens.step()?;
					return self.nested(Self::if_then);
				}

				TokenKind::Keyword(Keyword::While) => {
					self.tokens.step()?;
					return self.nested(Self::while_do);
				}

				TokenKind::Keyword(Keyword::Return) => {
					self.tokens.step()?;
					self.expression()?;
					self.emit_return()?;
					return Ok(());
				}

				TokenKind::Keyword(Keyword::Write) => {
					self.tokens.step()?;

					if self.tokens.kind().is_statement_terminator() {
						self.emit(Instruction::Opr(program::Operator::Wrl))?;
					} else {
						self.expression()?;
						self.emit(Instruction::Opr(program::Operator::Wrt))?;
					}

					return Ok(());
				}

				TokenKind::Keyword(Keyword::WriteLn) => {
					self.tokens.step()?;
					self.emit(Instruction::Opr(program::Operator::Wrl))?;
					return Ok(());
				}

				// Empty statement.
				kind if kind.is_statement_terminator() => return Ok(()),

				_ => self.tokens.delete()?,
			}
		}
	}


	/// ident ":=" expression
	fn assignment(&mut self, name: Symbol) -> Result<(), Fatal> {
		let target = match self.resolve(name, Kind::Var)? {
			Some(Entry::Var { addr, .. }) | Some(Entry::Param { addr, .. }) => Some(addr),

			Some(_) => {
				self.tokens.type_error("var/par")?;
				None
			}

			None => None,
		};

		self.tokens.step()?;
		self.tokens.expect(Operator::Assign.into())?;
		self.expression()?;

		if let Some(addr) = target {
			self.emit(Instruction::Sto(addr))?;
		}

		Ok(())
	}


	/// The statement list of a compound statement, after "begin".
	fn compound(&mut self) -> Result<(), Fatal> {
		loop {
			self.statement()?;

			loop {
				match self.tokens.kind() {
					TokenKind::Semicolon => {
						self.tokens.step()?;
						break;
					}

					TokenKind::Keyword(Keyword::End) => {
						self.tokens.step()?;
						return Ok(());
					}

					kind if kind.is_statement_start() => {
						self.tokens.insert(TokenKind::Semicolon)?;
						break;
					}

					TokenKind::EndOfInput => {
						self.tokens.insert(Keyword::End.into())?;
						return Ok(());
					}

					_ => self.tokens.delete()?,
				}
			}
		}
	}


	/// condition "then" statement, after "if".
	fn if_then(&mut self) -> Result<(), Fatal> {
		self.condition()?;
		self.tokens.expect(Keyword::Then.into())?;

		let skip = self.emit(Instruction::Jpc(0))?;
		self.statement()?;
		self.code.backpatch(skip, self.code.next_address());

		Ok(())
	}


	/// condition "do" statement, after "while".
	fn while_do(&mut self) -> Result<(), Fatal> {
		let head = self.code.next_address();

		self.condition()?;
		self.tokens.expect(Keyword::Do.into())?;

		let exit = self.emit(Instruction::Jpc(0))?;
		self.statement()?;
		self.emit(Instruction::Jmp(head))?;
		self.code.backpatch(exit, self.code.next_address());

		Ok(())
	}
}
