//! Owner-side keyword collections and the block load/save driver.
//!
//! An object that is configured from text owns one [`KeywordList`]. The list
//! identifies and registers each keyword as it is added, dispatches input
//! lines by their first token, and writes set keywords back out in the order
//! they were added.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tessera_primitives::EntityDirectory;

use crate::config::{FailurePolicy, KeywordConfig};
use crate::cursor::{ArgumentCursor, LineSink};
use crate::error::{CursorError, KeywordError};
use crate::registry::{KeywordRegistry, Registered};
use crate::{Keyword, KeywordOptions};


/// Outcome of offering one line to a [`KeywordList`].
#[derive(Debug)]
pub enum ParseResult {
	/// No keyword in the list has the line's first token as its name.
	Unrecognised,
	/// The keyword was found but rejected its arguments.
	Failed(KeywordError),
	Success,
}

/// Selects which keywords [`KeywordList::write`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteFilter {
	/// Every keyword that has been set.
	#[default]
	All,
	/// Only set keywords flagged [`KeywordOptions::IN_RESTART_FILE`].
	Restart,
}

/// A line that failed to load under [`FailurePolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
	pub line: usize,
	/// First token of the failed line.
	pub keyword: String,
	pub message: String,
}

impl std::fmt::Display for LoadWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "line {}: {}", self.line, self.message)
	}
}

/// Failures while loading a keyword block.
#[derive(Debug, thiserror::Error)]
pub enum KeywordListError {
	#[error("line {line}: {source}")]
	Keyword {
		line: usize,
		#[source]
		source: KeywordError,
	},

	#[error("line {line}: unrecognised keyword '{name}'")]
	Unrecognised { line: usize, name: String },

	/// Input ran out before the block's closing marker.
	#[error("input ended before '{expected}'")]
	UnexpectedEnd { expected: String },

	#[error(transparent)]
	Cursor(#[from] CursorError),
}

/// Named keywords belonging to one input block.
#[derive(Debug)]
pub struct KeywordList {
	registry: KeywordRegistry,
	keywords: Vec<Registered<dyn Keyword>>,
	index: FxHashMap<String, usize>,
	setup_required: bool,
}

impl Default for KeywordList {
	fn default() -> Self {
		Self::new()
	}
}

impl KeywordList {
	/// Creates an empty list registering into the thread's global registry.
	pub fn new() -> Self {
		Self::with_registry(KeywordRegistry::global())
	}

	pub fn with_registry(registry: KeywordRegistry) -> Self {
		Self {
			registry,
			keywords: Vec::new(),
			index: FxHashMap::default(),
			setup_required: false,
		}
	}

	/// Identifies `keyword`, registers it, and adds it to the list.
	///
	/// Returns a handle for reading the typed value. The registration lives
	/// as long as the list.
	///
	/// # Panics
	///
	/// Panics if a keyword with the same name is already in the list.
	pub fn add<K: Keyword + 'static>(&mut self, mut keyword: K, name: &str, description: &str, arguments_usage: &str, options: KeywordOptions) -> Rc<RefCell<K>> {
		assert!(!self.index.contains_key(name), "keyword '{name}' added to the same list twice");
		keyword.identify(name, description, arguments_usage, options);

		let registered = self.registry.register(keyword);
		let handle = registered.shared();
		self.index.insert(name.to_string(), self.keywords.len());
		self.keywords.push(registered.into_dyn());
		handle
	}

	pub fn len(&self) -> usize {
		self.keywords.len()
	}

	pub fn is_empty(&self) -> bool {
		self.keywords.is_empty()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.index.contains_key(name)
	}

	pub fn find(&self, name: &str) -> Option<Ref<'_, dyn Keyword>> {
		self.index.get(name).map(|&i| self.keywords[i].borrow())
	}

	/// Returns and clears the flag raised when a keyword flagged
	/// [`KeywordOptions::MODIFICATION_REQUIRES_SET_UP`] was parsed.
	pub fn take_setup_required(&mut self) -> bool {
		std::mem::take(&mut self.setup_required)
	}

	/// Offers the cursor's current line to the keyword named by its first token.
	///
	/// # Panics
	///
	/// Panics if that keyword is currently borrowed through a handle.
	pub fn parse_line(&mut self, cursor: &mut dyn ArgumentCursor, directory: &dyn EntityDirectory) -> ParseResult {
		self.registry.settle_deferred();
		let Some(&index) = cursor.argument(0).and_then(|name| self.index.get(name)) else {
			return ParseResult::Unrecognised;
		};

		let mut keyword = self.keywords[index].borrow_mut();
		match keyword.parse(cursor, 1, directory) {
			Ok(()) => {
				if keyword.has_option(KeywordOptions::MODIFICATION_REQUIRES_SET_UP) {
					self.setup_required = true;
				}
				ParseResult::Success
			}
			Err(err) => ParseResult::Failed(err),
		}
	}

	/// Reads lines until `end_marker` (or end of input when `None`).
	///
	/// Failed and unrecognised lines either abort the load or are skipped,
	/// per `config.failure_policy`. Skipped lines are returned as warnings.
	pub fn load(
		&mut self,
		cursor: &mut dyn ArgumentCursor,
		directory: &dyn EntityDirectory,
		end_marker: Option<&str>,
		config: &KeywordConfig,
	) -> Result<Vec<LoadWarning>, KeywordListError> {
		let mut warnings = Vec::new();

		while cursor.next_line()? {
			let line = cursor.line_number();
			let name = cursor.argument(0).unwrap_or_default().to_string();
			if end_marker == Some(name.as_str()) {
				tracing::debug!(domain = "keywords", block = %name, skipped = warnings.len(), "keyword block loaded");
				return Ok(warnings);
			}

			let error = match self.parse_line(cursor, directory) {
				ParseResult::Success => continue,
				ParseResult::Unrecognised => KeywordListError::Unrecognised { line, name: name.clone() },
				ParseResult::Failed(source) => KeywordListError::Keyword { line, source },
			};
			// A failed block keyword may stop on this block's own end marker.
			let reached_end = end_marker.is_some() && cursor.argument(0) == end_marker;
			match config.failure_policy {
				FailurePolicy::Abort => return Err(error),
				FailurePolicy::Skip => {
					tracing::warn!(domain = "keywords", keyword = %name, line, error = %error, "skipping line");
					let message = match error {
						KeywordListError::Keyword { source, .. } => source.to_string(),
						_ => format!("unrecognised keyword '{name}'"),
					};
					warnings.push(LoadWarning { line, keyword: name, message });
				}
			}
			if reached_end {
				tracing::debug!(domain = "keywords", line = cursor.line_number(), skipped = warnings.len(), "keyword block loaded");
				return Ok(warnings);
			}
		}

		match end_marker {
			Some(expected) => Err(KeywordListError::UnexpectedEnd {
				expected: expected.to_string(),
			}),
			None => Ok(warnings),
		}
	}

	/// Writes keywords selected by `filter` in the order they were added.
	///
	/// Keywords that were never set are skipped unless `config.write_unset`.
	pub fn write(&self, sink: &mut dyn LineSink, prefix: &str, config: &KeywordConfig, filter: WriteFilter) -> Result<(), KeywordError> {
		self.registry.settle_deferred();
		for registered in &self.keywords {
			let keyword = registered.borrow();
			if filter == WriteFilter::Restart && !keyword.has_option(KeywordOptions::IN_RESTART_FILE) {
				continue;
			}
			if !config.write_unset && !keyword.has_been_set() {
				continue;
			}
			keyword.write(sink, keyword.name(), prefix)?;
		}
		Ok(())
	}

	/// Writes the list as a block: `block_name`, indented keywords, `End<block_name>`.
	pub fn write_block(&self, sink: &mut dyn LineSink, block_name: &str, prefix: &str, config: &KeywordConfig, filter: WriteFilter) -> Result<(), KeywordError> {
		sink.write_line(prefix, block_name)?;
		self.write(sink, &format!("{prefix}{}", config.indent), config, filter)?;
		sink.write_line(prefix, &format!("End{block_name}"))?;
		Ok(())
	}
}
