use super::{Compiler, Fatal};
use crate::{
	syntax::lexer::{Operator, TokenKind},
	table::Kind,
};


impl<'a, 'b> Compiler<'a, 'b> {
	/// constDecl = "const" ident "=" number { "," ident "=" number } ";" .
	/// The leading keyword must have been consumed.
	pub(super) fn const_decl(&mut self) -> Result<(), Fatal> {
		loop {
			match self.tokens.kind() {
				TokenKind::Identifier(name) => {
					self.tokens.set_ident_kind(Kind::Const);
					self.tokens.step()?;
					self.tokens.expect(Operator::Equals.into())?;

					match self.tokens.kind() {
						TokenKind::Number(value) => {
							self.table.declare_const(name, value)?;
						}

						_ => self.tokens.type_error("number")?,
					}

					self.tokens.step()?;
				}

				_ => self.tokens.missing_ident()?,
			}

			if !self.list_continues()? {
				break;
			}
		}

		self.tokens.expect(TokenKind::Semicolon)?;

		Ok(())
	}


	/// varDecl = "var" ident { "," ident } ";" .
	/// The leading keyword must have been consumed.
	pub(super) fn var_decl(&mut self) -> Result<(), Fatal> {
		loop {
			match self.tokens.kind() {
				TokenKind::Identifier(name) => {
					self.tokens.set_ident_kind(Kind::Var);
					self.table.declare_var(name)?;
					self.tokens.step()?;
				}

				_ => self.tokens.missing_ident()?,
			}

			if !self.list_continues()? {
				break;
			}
		}

		self.tokens.expect(TokenKind::Semicolon)?;

		Ok(())
	}


	/// funcDecl = "function" ident "(" [ ident { "," ident } ] ")" [ ";" ] block ";" .
	/// The leading keyword must have been consumed.
	pub(super) fn func_decl(&mut self) -> Result<(), Fatal> {
		let name = match self.tokens.kind() {
			TokenKind::Identifier(name) => name,
			_ => return self.tokens.missing_ident(),
		};

		self.tokens.set_ident_kind(Kind::Func);
		// Until the body is compiled, calls go through the jump over the nested functions,
		// which is the first instruction of the block.
		let function = self.table.declare_func(name, self.code.next_address())?;
		self.tokens.step()?;

		self.tokens.expect(TokenKind::OpenParens)?;

		self.table.enter_scope(self.first_addr)?;

		while let TokenKind::Identifier(param) = self.tokens.kind() {
			self.tokens.set_ident_kind(Kind::Param);
			self.table.declare_param(param)?;
			self.tokens.step()?;

			if !self.list_continues()? {
				break;
			}
		}

		self.tokens.expect(TokenKind::CloseParens)?;
		self.table.finalize_params();

		if self.tokens.kind() == TokenKind::Semicolon {
			self.tokens.delete()?;
		}

		self.block(Some(function))?;

		self.tokens.expect(TokenKind::Semicolon)?;

		Ok(())
	}
}
