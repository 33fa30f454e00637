/// Capacity limits and thresholds used by the compiler and the virtual machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Limits {
	/// Maximum number of instructions in a program.
	pub max_code: usize,
	/// Number of cells in the runtime stack.
	pub max_stack: usize,
	/// Cells at the top of the stack kept free for expression temporaries.
	pub register_margin: usize,
	/// Maximum block nesting depth. This is also the size of the display.
	pub max_level: usize,
	/// Identifiers longer than this are truncated.
	pub max_name: usize,
	/// Numerals with more digits than this are flagged.
	pub max_digits: usize,
	/// Maximum depth of nested statements and parenthesized expressions.
	pub max_nesting: usize,
	/// Maximum length of a source line, in bytes.
	pub max_line: usize,
	/// Maximum number of live names in the symbol table.
	pub max_table: usize,
	/// Execution is only allowed when the error count is below this value.
	pub min_error: usize,
	/// Compilation aborts when the error count goes above this value.
	pub max_error: usize,
	/// Offset of the first local variable in a frame.
	/// Slots before it hold the saved display entry and the return address.
	pub first_addr: i64,
}


impl Default for Limits {
	fn default() -> Self {
		Self {
			max_code: 200,
			max_stack: 2000,
			register_margin: 20,
			max_level: 5,
			max_name: 31,
			max_digits: 14,
			max_nesting: 64,
			max_line: 120,
			max_table: 100,
			min_error: 3,
			max_error: 30,
			first_addr: 2,
		}
	}
}
