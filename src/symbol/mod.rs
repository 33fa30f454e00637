mod fmt;

use intaglio::{Symbol as SymbolInner, bytes::SymbolTable};


/// An interned identifier spelling.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Symbol(SymbolInner);


/// A symbol interner for identifier spellings.
#[derive(Debug)]
pub struct Interner(SymbolTable);


impl Interner {
	pub fn new() -> Self {
		Self(SymbolTable::new())
	}


	/// Get the symbol for a value, if it was interned.
	#[cfg(test)]
	pub fn get<T>(&self, value: T) -> Option<Symbol>
	where
		T: AsRef<[u8]>,
	{
		self.0
			.check_interned(value.as_ref())
			.map(Symbol)
	}


	/// Get the symbol for a value. The value is interned if needed.
	pub fn get_or_intern<T>(&mut self, value: T) -> Symbol
	where
		T: AsRef<[u8]>,
	{
		let value = value.as_ref().to_owned();

		Symbol(
			self.0
				.intern(value)
				.expect("failed to intern symbol")
		)
	}


	/// Resolve the spelling of a symbol.
	pub fn resolve(&self, symbol: Symbol) -> Option<&[u8]> {
		self.0.get(symbol.0)
	}
}


impl Default for Interner {
	fn default() -> Self {
		Self::new()
	}
}
