//! Typed, self-describing configuration keywords.
//!
//! A keyword is a named value read from and written back to line-oriented
//! text. Every variant implements [`Keyword`] and carries a [`KeywordBase`]
//! with its identity, [`DataKind`], and set-state.
//!
//! # Modules
//!
//! - [`cursor`] - Argument cursor and line sink traits, plus the text parser and writer
//! - [`registry`] - Weak registry of live keywords and entity invalidation
//! - [`types`] - Concrete keyword variants
//! - [`list`] - Named keyword collections with block load and save
//! - [`config`] - Load and save settings
//!
//! # Entity references
//!
//! Keywords that refer to domain entities hold [`tessera_primitives::EntityRef`]s
//! resolved through an [`EntityDirectory`](tessera_primitives::EntityDirectory).
//! Before an entity is destroyed its owner calls
//! [`KeywordRegistry::notify_entity_invalid`], usually by passing the registry
//! as the sink to [`EntityStore::destroy`](tessera_primitives::EntityStore::destroy).

mod base;
pub mod config;
pub mod cursor;
mod error;
mod keyword;
mod kind;
pub mod list;
pub mod registry;
pub mod types;

pub use base::{KeywordBase, KeywordOptions};
pub use config::{ConfigError, FailurePolicy, KeywordConfig};
pub use cursor::{ArgumentCursor, LineParser, LineSink, LineWriter, quote_argument};
pub use error::{CursorError, KeywordError};
pub use keyword::Keyword;
pub use kind::DataKind;
pub use list::{KeywordList, KeywordListError, LoadWarning, ParseResult, WriteFilter};
pub use registry::{KeywordRegistry, Registered};
pub use types::{
	AtomTypeVectorKeyword, BoolKeyword, ConfigurationVectorKeyword, DoubleKeyword, EntityKeyword, EntityVectorKeyword, EnumOptionsKeyword,
	GeometryArity, GeometryEntry, GeometryListKeyword, IntegerKeyword, IsotopologueSetKeyword, IsotopologueWeight, KeywordEnum, ModuleKeyword,
	ModuleVectorKeyword, NodeKeyword, NodeVectorKeyword, SpeciesKeyword, SpeciesSiteKeyword, SpeciesSiteVectorKeyword, SpeciesVectorKeyword,
	StringKeyword, Vec3DoubleKeyword, Vec3IntegerKeyword, Vec3Keyword,
};
