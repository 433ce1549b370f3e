use tessera_primitives::EntityDirectory;

use crate::base::impl_keyword_base;
use crate::cursor::{ArgumentCursor, LineSink, write_arguments};
use crate::error::KeywordError;
use crate::{DataKind, Keyword, KeywordBase};

/// Option set usable by an [`EnumOptionsKeyword`].
///
/// Implemented for any enum deriving `strum::VariantArray` and
/// `strum::IntoStaticStr`; the static string is the keyword spelling.
pub trait KeywordEnum: Copy + PartialEq + std::fmt::Debug + 'static {
	fn options() -> &'static [Self];

	fn keyword(self) -> &'static str;
}

impl<E> KeywordEnum for E
where
	E: Copy + PartialEq + std::fmt::Debug + strum::VariantArray + Into<&'static str> + 'static,
{
	fn options() -> &'static [Self] {
		E::VARIANTS
	}

	fn keyword(self) -> &'static str {
		self.into()
	}
}

/// Keyword holding one value from a fixed option set.
///
/// Tokens are matched case-sensitively.
#[derive(Debug, Clone)]
pub struct EnumOptionsKeyword<E> {
	base: KeywordBase,
	value: E,
}

impl<E: KeywordEnum> EnumOptionsKeyword<E> {
	pub fn new(default: E) -> Self {
		Self {
			base: KeywordBase::new(DataKind::EnumOptionsData),
			value: default,
		}
	}

	pub fn value(&self) -> E {
		self.value
	}

	pub fn set_value(&mut self, value: E) {
		self.value = value;
		self.base.mark_modified();
	}

	/// Comma-separated list of the valid spellings.
	pub fn valid_options() -> String {
		E::options().iter().map(|o| o.keyword()).collect::<Vec<_>>().join(", ")
	}
}

impl<E: KeywordEnum> Keyword for EnumOptionsKeyword<E> {
	impl_keyword_base!();

	fn min_arguments(&self) -> usize {
		1
	}

	fn max_arguments(&self) -> Option<usize> {
		Some(1)
	}

	fn read(&mut self, cursor: &mut dyn ArgumentCursor, start: usize, _directory: &dyn EntityDirectory) -> Result<(), KeywordError> {
		let token = cursor.argument(start).unwrap_or_default();
		let Some(&value) = E::options().iter().find(|o| o.keyword() == token) else {
			return Err(self.base.format_error(format!("'{token}' is not a valid option (valid options are: {})", Self::valid_options())));
		};
		self.value = value;
		Ok(())
	}

	fn write(&self, sink: &mut dyn LineSink, keyword_name: &str, prefix: &str) -> Result<(), KeywordError> {
		write_arguments(sink, prefix, keyword_name, [self.value.keyword()])?;
		Ok(())
	}

	fn as_string(&self) -> Result<String, KeywordError> {
		Ok(self.value.keyword().to_string())
	}
}
