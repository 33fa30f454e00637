use std::fmt::Display as _;

use bstr::{BStr, ByteSlice};

use super::{Interner, Symbol};
use crate::{
	fmt::Display,
	term::color,
};


/// Placeholder for symbols missing from the interner.
const INVALID: &str = "<invalid symbol>";


impl Symbol {
	/// The raw spelling, without coloring.
	pub fn spelling<'a>(&self, interner: &'a Interner) -> &'a BStr {
		interner
			.resolve(*self)
			.unwrap_or(INVALID.as_bytes())
			.as_bstr()
	}
}


impl<'a> Display<'a> for Symbol {
	type Context = &'a Interner;

	fn fmt(&self, f: &mut std::fmt::Formatter<'_>, context: Self::Context) -> std::fmt::Result {
		color::Fg(color::Green, self.spelling(context)).fmt(f)
	}
}
