
use std::fmt::{self, Display};

use crate::{
	config::Limits,
	program::{RelAddr, Word},
	symbol::Symbol,
};


/// The kind of a declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	Var,
	Const,
	Func,
	Param,
}


/// A symbol table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
	Var { name: Symbol, addr: RelAddr },
	Param { name: Symbol, addr: RelAddr },
	Const { name: Symbol, value: Word },
	Func {
		name: Symbol,
		/// Level where the function name was declared. The body is one level deeper.
		level: usize,
		/// Address of the first instruction of the body.
		address: usize,
		params: usize,
	},
}


impl Entry {
	pub fn name(&self) -> Symbol {
		match self {
			Self::Var { name, .. }
			| Self::Param { name, .. }
			| Self::Const { name, .. }
			| Self::Func { name, .. } => *name,
		}
	}


	pub fn kind(&self) -> Kind {
		match self {
			Self::Var { .. } => Kind::Var,
			Self::Param { .. } => Kind::Param,
			Self::Const { .. } => Kind::Const,
			Self::Func { .. } => Kind::Func,
		}
	}
}


/// The position of an entry in the scope stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryIx {
	scope: usize,
	slot: usize,
}


/// The outcome of resolving a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
	Found(EntryIx),
	/// The name is not declared. When a variable was expected, it has been provisionally
	/// declared in the current scope.
	Undefined(Option<EntryIx>),
}


/// A capacity limit of the table was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
	TooManyNames { limit: usize },
	TooManyLevels { limit: usize },
}


impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::TooManyNames { limit } => write!(f, "too many names (limit is {})", limit),
			Self::TooManyLevels { limit } => write!(f, "too many nested blocks (limit is {})", limit),
		}
	}
}


impl std::error::Error for Error {}


/// A lexical scope: the names declared in one block.
#[derive(Debug)]
struct Scope {
	entries: Vec<Entry>,
	/// Offset of the next local variable.
	next_offset: Word,
	/// The function whose body this scope is, if any.
	function: Option<EntryIx>,
}


/// The symbol table, as a stack of scopes. The bottom scope is the main block, at level 0.
#[derive(Debug)]
pub struct Table {
	scopes: Vec<Scope>,
	/// Total number of live entries.
	len: usize,
	/// The last declared function, whose scope is yet to be entered.
	pending_function: Option<EntryIx>,
	max_level: usize,
	max_table: usize,
}


impl Table {
	pub fn new(limits: &Limits) -> Self {
		Self {
			scopes: Vec::new(),
			len: 0,
			pending_function: None,
			max_level: limits.max_level,
			max_table: limits.max_table,
		}
	}


	/// Enter a new scope. If a function was just declared, the scope is its body.
	pub fn enter_scope(&mut self, first_offset: Word) -> Result<(), Error> {
		if self.scopes.len() >= self.max_level {
			return Err(Error::TooManyLevels { limit: self.max_level });
		}

		self.scopes.push(
			Scope {
				entries: Vec::new(),
				next_offset: first_offset,
				function: self.pending_function.take(),
			}
		);

		Ok(())
	}


	/// Exit the current scope, dropping all names declared in it.
	/// Panics if the stack is empty.
	pub fn leave_scope(&mut self) {
		let scope = self.scopes
			.pop()
			.expect("attempt to exit empty stack");

		self.len -= scope.entries.len();
	}


	pub fn declare_var(&mut self, name: Symbol) -> Result<EntryIx, Error> {
		let level = self.current_level();
		let scope = self.current_mut();
		let addr = RelAddr { level, offset: scope.next_offset };
		scope.next_offset += 1;

		self.declare(Entry::Var { name, addr })
	}


	pub fn declare_const(&mut self, name: Symbol, value: Word) -> Result<EntryIx, Error> {
		self.declare(Entry::Const { name, value })
	}


	/// Declare a function in the current scope. The next entered scope will be its body.
	pub fn declare_func(&mut self, name: Symbol, address: usize) -> Result<EntryIx, Error> {
		let level = self.current_level();
		let ix = self.declare(Entry::Func { name, level, address, params: 0 })?;
		self.pending_function = Some(ix);

		Ok(ix)
	}


	/// Declare a parameter of the function whose scope is the current one.
	/// The address is only valid after `finalize_params`.
	/// Panics if the current scope is not a function body.
	pub fn declare_param(&mut self, name: Symbol) -> Result<EntryIx, Error> {
		let function = self.current()
			.function
			.expect("parameter declared outside of function scope");

		let addr = RelAddr { level: self.current_level(), offset: 0 };
		let ix = self.declare(Entry::Param { name, addr })?;

		if let Entry::Func { params, .. } = self.get_mut(function) {
			*params += 1;
		}

		Ok(ix)
	}


	/// Assign the final offsets to the parameters of the current function.
	/// The i-th of n parameters lives at offset i - 1 - n, below the frame base.
	pub fn finalize_params(&mut self) {
		let count = self.enclosing_param_count() as Word;
		let mut position = 0;

		for entry in self.current_mut().entries.iter_mut() {
			if let Entry::Param { addr, .. } = entry {
				position += 1;
				addr.offset = position - 1 - count;
			}
		}
	}


	/// Set the start address of a function.
	/// Panics if the entry is not a function.
	pub fn patch_func_address(&mut self, ix: EntryIx, new_address: usize) {
		match self.get_mut(ix) {
			Entry::Func { address, .. } => *address = new_address,
			entry => panic!("attempt to patch address of non-function {:?}", entry),
		}
	}


	/// Find the innermost, most recent declaration of a name.
	pub fn lookup(&self, name: Symbol) -> Option<EntryIx> {
		self.scopes
			.iter()
			.enumerate()
			.rev()
			.find_map(
				|(scope_ix, scope)| scope.entries
					.iter()
					.rposition(|entry| entry.name() == name)
					.map(|slot| EntryIx { scope: scope_ix, slot })
			)
	}


	/// Find a name. Undefined names are provisionally declared as variables when a
	/// variable was expected, so that later uses resolve.
	pub fn resolve(&mut self, name: Symbol, expected: Kind) -> Result<Resolution, Error> {
		if let Some(ix) = self.lookup(name) {
			return Ok(Resolution::Found(ix));
		}

		let provisional =
			if expected == Kind::Var {
				Some(self.declare_var(name)?)
			} else {
				None
			};

		Ok(Resolution::Undefined(provisional))
	}


	/// Get an entry.
	/// Panics if the index refers to a scope that was already exited.
	pub fn get(&self, ix: EntryIx) -> &Entry {
		&self.scopes[ix.scope].entries[ix.slot]
	}


	/// The level of the current block. The main block is level 0.
	pub fn current_level(&self) -> usize {
		self.scopes.len().saturating_sub(1)
	}


	/// The number of stack cells the current block needs, including the reserved slots.
	pub fn frame_size(&self) -> usize {
		self.current().next_offset as usize
	}


	/// The number of parameters of the function whose body is the current scope.
	/// Zero for the main block.
	pub fn enclosing_param_count(&self) -> usize {
		match self.current().function.map(|ix| self.get(ix)) {
			Some(Entry::Func { params, .. }) => *params,
			_ => 0,
		}
	}


	/// The total number of live names.
	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.len
	}


	fn declare(&mut self, entry: Entry) -> Result<EntryIx, Error> {
		if self.len >= self.max_table {
			return Err(Error::TooManyNames { limit: self.max_table });
		}

		let scope = self.scopes.len() - 1;
		let entries = &mut self.current_mut().entries;
		entries.push(entry);
		let slot = entries.len() - 1;
		self.len += 1;

		Ok(EntryIx { scope, slot })
	}


	fn get_mut(&mut self, ix: EntryIx) -> &mut Entry {
		&mut self.scopes[ix.scope].entries[ix.slot]
	}


	fn current(&self) -> &Scope {
		self.scopes.last().expect("empty scope stack")
	}


	fn current_mut(&mut self) -> &mut Scope {
		self.scopes.last_mut().expect("empty scope stack")
	}
}
