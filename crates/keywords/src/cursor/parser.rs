use std::io::{self, BufRead};

use super::ArgumentCursor;
use crate::error::CursorError;

/// Line-oriented tokenizer over any buffered reader.
///
/// Arguments are separated by whitespace. Single or double quotes group words
/// containing whitespace into one argument (the quotes are stripped), and `#`
/// outside quotes starts a comment running to the end of the line. Lines with
/// no arguments are skipped by [`next_line`](ArgumentCursor::next_line).
#[derive(Debug)]
pub struct LineParser<R> {
	reader: R,
	line_number: usize,
	arguments: Vec<String>,
	buffer: String,
}

impl<R: BufRead> LineParser<R> {
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			line_number: 0,
			arguments: Vec::new(),
			buffer: String::new(),
		}
	}

	/// Replaces the current arguments with the tokens of `line`.
	///
	/// The line counter is not advanced.
	pub fn set_line(&mut self, line: &str) -> Result<(), CursorError> {
		self.arguments = tokenize(line, self.line_number)?;
		Ok(())
	}
}

impl LineParser<io::Cursor<String>> {
	/// Creates a parser over an in-memory string.
	pub fn from_text(text: impl Into<String>) -> Self {
		Self::new(io::Cursor::new(text.into()))
	}
}

impl<R: BufRead> ArgumentCursor for LineParser<R> {
	fn argument(&self, index: usize) -> Option<&str> {
		self.arguments.get(index).map(String::as_str)
	}

	fn argument_count(&self) -> usize {
		self.arguments.len()
	}

	fn next_line(&mut self) -> Result<bool, CursorError> {
		loop {
			self.buffer.clear();
			if self.reader.read_line(&mut self.buffer)? == 0 {
				self.arguments.clear();
				return Ok(false);
			}
			self.line_number += 1;
			self.arguments = tokenize(&self.buffer, self.line_number)?;
			if !self.arguments.is_empty() {
				return Ok(true);
			}
		}
	}

	fn line_number(&self) -> usize {
		self.line_number
	}
}

fn tokenize(line: &str, line_number: usize) -> Result<Vec<String>, CursorError> {
	let mut arguments = Vec::new();
	let mut chars = line.chars().peekable();

	while let Some(&c) = chars.peek() {
		if c.is_whitespace() {
			chars.next();
			continue;
		}
		if c == '#' {
			break;
		}
		if c == '"' || c == '\'' {
			chars.next();
			let mut token = String::new();
			loop {
				match chars.next() {
					Some(q) if q == c => break,
					Some(other) => token.push(other),
					None => return Err(CursorError::UnterminatedQuote { line: line_number }),
				}
			}
			arguments.push(token);
			continue;
		}
		let mut token = String::new();
		while let Some(&c) = chars.peek() {
			if c.is_whitespace() || c == '#' {
				break;
			}
			token.push(c);
			chars.next();
		}
		arguments.push(token);
	}

	Ok(arguments)
}
