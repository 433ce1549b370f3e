use std::io::{self, Write};

use super::LineSink;

/// [`LineSink`] over any [`Write`] implementation.
#[derive(Debug, Default)]
pub struct LineWriter<W> {
	inner: W,
}

impl<W: Write> LineWriter<W> {
	pub fn new(inner: W) -> Self {
		Self { inner }
	}

	pub fn get_ref(&self) -> &W {
		&self.inner
	}

	pub fn into_inner(self) -> W {
		self.inner
	}
}

impl LineWriter<Vec<u8>> {
	/// Returns everything written so far as text.
	pub fn into_string(self) -> String {
		String::from_utf8_lossy(&self.inner).into_owned()
	}
}

impl<W: Write> LineSink for LineWriter<W> {
	fn write_line(&mut self, prefix: &str, content: &str) -> io::Result<()> {
		writeln!(self.inner, "{prefix}{content}")
	}
}
