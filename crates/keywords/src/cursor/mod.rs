//! Text cursors: where keywords pull argument tokens from and push lines to.
//!
//! Keywords only see the [`ArgumentCursor`] and [`LineSink`] traits. The token
//! grammar (whitespace separated words, quoting, comments) belongs to the
//! cursor implementation, here [`LineParser`].

use std::borrow::Cow;
use std::io;

use crate::error::CursorError;

mod parser;
mod writer;

#[cfg(test)]
mod tests;

pub use parser::LineParser;
pub use writer::LineWriter;

/// Read side of a text cursor.
pub trait ArgumentCursor {
	/// Returns the argument at `index` on the current line.
	fn argument(&self, index: usize) -> Option<&str>;

	/// Number of arguments on the current line.
	fn argument_count(&self) -> usize;

	/// Advances to the next line holding at least one argument.
	///
	/// Returns `false` once the input is exhausted.
	fn next_line(&mut self) -> Result<bool, CursorError>;

	/// One-based number of the current physical line (0 before the first read).
	fn line_number(&self) -> usize;

	/// Collects the arguments from `start` to the end of the current line.
	fn arguments(&self, start: usize) -> Vec<&str> {
		(start..self.argument_count()).filter_map(|i| self.argument(i)).collect()
	}
}

/// Write side of a text cursor.
pub trait LineSink {
	/// Writes `content` as one line, preceded by `prefix`.
	fn write_line(&mut self, prefix: &str, content: &str) -> io::Result<()>;
}

/// Quotes a token if the line parser would otherwise split or drop it.
pub fn quote_argument(token: &str) -> Cow<'_, str> {
	let needs_quotes = token.is_empty() || token.chars().any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\''));
	if !needs_quotes {
		return Cow::Borrowed(token);
	}
	let quote = if token.contains('"') { '\'' } else { '"' };
	Cow::Owned(format!("{quote}{token}{quote}"))
}

/// Writes `<prefix><keyword_name> <arg> <arg> ...` as a single line.
pub(crate) fn write_arguments<I, S>(sink: &mut dyn LineSink, prefix: &str, keyword_name: &str, arguments: I) -> io::Result<()>
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut line = keyword_name.to_string();
	for argument in arguments {
		line.push(' ');
		line.push_str(argument.as_ref());
	}
	sink.write_line(prefix, &line)
}
