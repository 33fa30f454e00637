use super::{Compiler, Fatal};
use crate::{
	program::{self, Instruction},
	syntax::lexer::{Keyword, Operator, TokenKind},
	table::{Entry, Kind},
};


impl<'a, 'b> Compiler<'a, 'b> {
	/// expression = [ "+" | "-" ] term { ( "+" | "-" ) term } .
	pub(super) fn expression(&mut self) -> Result<(), Fatal> {
		match self.tokens.kind() {
			TokenKind::Operator(op) if op.is_term() => {
				self.tokens.step()?;
				self.term()?;

				if op == Operator::Minus {
					self.emit(Instruction::Opr(program::Operator::Neg))?;
				}
			}

			_ => self.term()?,
		}

		loop {
			let operator = match self.tokens.kind() {
				TokenKind::Operator(Operator::Plus) => program::Operator::Add,
				TokenKind::Operator(Operator::Minus) => program::Operator::Sub,
				_ => return Ok(()),
			};

			self.tokens.step()?;
			self.term()?;
			self.emit(Instruction::Opr(operator))?;
		}
	}


	/// term = factor { ( "*" | "/" ) factor } .
	fn term(&mut self) -> Result<(), Fatal> {
		self.factor()?;

		loop {
			let operator = match self.tokens.kind() {
				TokenKind::Operator(Operator::Times) => program::Operator::Mul,
				TokenKind::Operator(Operator::Div) => program::Operator::Div,
				_ => return Ok(()),
			};

			self.tokens.step()?;
			self.factor()?;
			self.emit(Instruction::Opr(operator))?;
		}
	}


	/// factor = ident | number | ident "(" [ expression { "," expression } ] ")"
	///        | "(" expression ")" .
	fn factor(&mut self) -> Result<(), Fatal> {
		match self.tokens.kind() {
			TokenKind::Identifier(name) => {
				let entry = self.resolve(name, Kind::Var)?;
				self.tokens.step()?;

				match entry {
					Some(Entry::Var { addr, .. }) | Some(Entry::Param { addr, .. }) => {
						self.emit(Instruction::Lod(addr))?;
					}

					Some(Entry::Const { value, .. }) => {
						self.emit(Instruction::Lit(value))?;
					}

					Some(Entry::Func { level, address, params, .. }) => {
						self.call(params)?;
						self.emit(Instruction::Cal { level, address })?;
					}

					None => (),
				}
			}

			TokenKind::Number(value) => {
				self.emit(Instruction::Lit(value))?;
				self.tokens.step()?;
			}

			TokenKind::OpenParens => {
				self.tokens.step()?;
				self.nested(Self::expression)?;
				self.tokens.expect(TokenKind::CloseParens)?;
			}

			_ => {
				self.tokens.missing_ident()?;
				// Keep the operand stack balanced.
				self.emit(Instruction::Lit(0))?;
			}
		}

		// Two adjacent factors.
		if self.tokens.kind().is_factor_start() {
			self.tokens.missing_operator()?;
			self.factor()?;
		}

		Ok(())
	}


	/// The argument list of a call, after the function name. The arguments are left on the
	/// stack, and their count is checked against `params`.
	fn call(&mut self, params: usize) -> Result<(), Fatal> {
		if self.tokens.kind() != TokenKind::OpenParens {
			self.tokens.insert(TokenKind::OpenParens)?;
			self.tokens.insert(TokenKind::CloseParens)?;
			return self.check_arguments(0, params);
		}

		self.tokens.step()?;

		let mut count = 0;

		if self.tokens.kind() == TokenKind::CloseParens {
			self.tokens.step()?;
		} else {
			loop {
				self.nested(Self::expression)?;
				count += 1;

				if self.tokens.kind() == TokenKind::Comma {
					self.tokens.step()?;
				} else {
					self.tokens.expect(TokenKind::CloseParens)?;
					break;
				}
			}
		}

		self.check_arguments(count, params)
	}


	fn check_arguments(&mut self, count: usize, params: usize) -> Result<(), Fatal> {
		if count != params {
			self.tokens.message("#par")
		} else {
			Ok(())
		}
	}


	/// condition = "odd" expression | expression relOp expression .
	pub(super) fn condition(&mut self) -> Result<(), Fatal> {
		if self.tokens.kind() == TokenKind::Keyword(Keyword::Odd) {
			self.tokens.step()?;
			self.expression()?;
			self.emit(Instruction::Opr(program::Operator::Odd))?;
			return Ok(());
		}

		self.expression()?;

		let operator = match self.tokens.kind() {
			TokenKind::Operator(Operator::Equals) => Some(program::Operator::Eq),
			TokenKind::Operator(Operator::NotEquals) => Some(program::Operator::Neq),
			TokenKind::Operator(Operator::Lower) => Some(program::Operator::Ls),
			TokenKind::Operator(Operator::Greater) => Some(program::Operator::Gr),
			TokenKind::Operator(Operator::LowerEquals) => Some(program::Operator::Lseq),
			TokenKind::Operator(Operator::GreaterEquals) => Some(program::Operator::Greq),
			_ => {
				self.tokens.type_error("rel-op")?;
				None
			}
		};

		self.tokens.step()?;
		self.expression()?;

		if let Some(operator) = operator {
			self.emit(Instruction::Opr(operator))?;
		}

		Ok(())
	}
}
