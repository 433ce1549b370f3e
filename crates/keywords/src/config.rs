//! Load and save settings for keyword lists.
//!
//! Settings are plain data with defaults for every field, so an empty TOML
//! document yields [`KeywordConfig::default`].

use serde::Deserialize;

/// What a keyword list does when a line fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FailurePolicy {
	/// Stop at the first failure and return it.
	#[default]
	Abort,
	/// Log the failure, record a warning, and carry on with the next line.
	Skip,
}

/// Settings consumed by [`KeywordList`](crate::KeywordList) load and save.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct KeywordConfig {
	pub failure_policy: FailurePolicy,
	/// Indent applied to lines nested inside a block.
	pub indent: String,
	/// Write keywords that were never set, using their defaults.
	pub write_unset: bool,
}

impl Default for KeywordConfig {
	fn default() -> Self {
		Self {
			failure_policy: FailurePolicy::Abort,
			indent: "  ".to_string(),
			write_unset: false,
		}
	}
}

impl KeywordConfig {
	/// Parses settings from a TOML document.
	pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(text)?)
	}
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_document_uses_defaults() {
		assert_eq!(KeywordConfig::from_toml("").unwrap(), KeywordConfig::default());
	}

	#[test]
	fn fields_are_kebab_case() {
		let config = KeywordConfig::from_toml("failure-policy = \"skip\"\nindent = \"\\t\"\nwrite-unset = true\n").unwrap();
		assert_eq!(config.failure_policy, FailurePolicy::Skip);
		assert_eq!(config.indent, "\t");
		assert!(config.write_unset);
	}

	#[test]
	fn unknown_fields_and_policies_are_rejected() {
		assert!(KeywordConfig::from_toml("verbose = true").is_err());
		let err = KeywordConfig::from_toml("failure-policy = \"retry\"").unwrap_err();
		assert!(err.to_string().starts_with("TOML parse error"), "{err}");
	}

	#[test]
	fn policy_displays_lowercase() {
		assert_eq!(FailurePolicy::Skip.to_string(), "skip");
	}
}
