use super::SourcePos;


/// A cursor for the source code.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
	input: &'a [u8],
	offset: usize,
	pos: SourcePos,
	/// How many bytes of the current line were consumed.
	line_len: usize,
}


impl<'a> Cursor<'a> {
	pub fn pos(&self) -> SourcePos {
		self.pos
	}


	pub fn line_len(&self) -> usize {
		self.line_len
	}


	pub fn is_eof(&self) -> bool {
		self.offset == self.input.len()
	}


	pub fn peek(&self) -> Option<u8> {
		self.input.get(self.offset).copied()
	}


	pub fn step(&mut self) {
		if self.is_eof() {
			return;
		}

		let input = self.input[self.offset];

		self.pos.visit(input);
		self.offset += 1;

		if input == b'\n' {
			self.line_len = 0;
		} else {
			self.line_len += 1;
		}
	}
}


impl<'a> From<&'a [u8]> for Cursor<'a> {
	fn from(input: &'a [u8]) -> Self {
		Self {
			input,
			offset: 0,
			pos: SourcePos::default(),
			line_len: 0,
		}
	}
}
