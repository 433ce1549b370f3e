//! Concrete keyword variants, one per payload shape.

mod entity;
mod enum_options;
mod geometry_list;
mod isotopologue_set;
mod scalar;
mod vec3;


pub use entity::{
	AtomTypeVectorKeyword, ConfigurationVectorKeyword, EntityKeyword, EntityMarker, EntityVectorKeyword, ModuleKeyword, ModuleVectorKeyword,
	NodeKeyword, NodeVectorKeyword, SingleEntityMarker, SpeciesKeyword, SpeciesSiteKeyword, SpeciesSiteVectorKeyword, SpeciesVectorKeyword,
	marker,
};
pub use enum_options::{EnumOptionsKeyword, KeywordEnum};
pub use geometry_list::{GeometryArity, GeometryEntry, GeometryListKeyword};
pub use isotopologue_set::{IsotopologueSetKeyword, IsotopologueWeight};
pub use scalar::{BoolKeyword, DoubleKeyword, IntegerKeyword, StringKeyword, parse_bool, parse_double, parse_int};
pub use vec3::{Vec3Component, Vec3DoubleKeyword, Vec3IntegerKeyword, Vec3Keyword};
