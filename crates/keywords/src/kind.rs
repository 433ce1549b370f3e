/// Tag identifying the payload shape a keyword holds.
///
/// The set is closed: every keyword reports exactly one of these for its whole
/// lifetime, and it always matches the payload of the concrete variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr, strum::EnumCount, strum::VariantArray)]
pub enum DataKind {
	AtomTypeRefListData,
	AtomTypeSelectionData,
	BoolData,
	ConfigurationVectorData,
	Data1DStoreData,
	Data2DStoreData,
	Data3DStoreData,
	DoubleData,
	DynamicSiteNodesData,
	ElementVectorData,
	EnumOptionsData,
	ExpressionData,
	ExpressionVariableVectorData,
	FileAndFormatData,
	Function1DData,
	GeometryListData,
	IntegerData,
	IsotopologueListData,
	IsotopologueSetData,
	LinkToKeywordData,
	ModuleData,
	ModuleGroupsData,
	ModuleRefListData,
	NodeData,
	NodeAndIntegerData,
	NodeBranchData,
	NodeValueData,
	NodeValueEnumOptionsData,
	NodeVectorData,
	ProcedureData,
	RangeData,
	SpeciesData,
	SpeciesSiteData,
	SpeciesSiteVectorData,
	SpeciesVectorData,
	StringData,
	ValueStoreData,
	Vec3DoubleData,
	Vec3IntegerData,
	Vec3NodeValueData,
	VectorIntegerDoubleData,
	VectorIntegerStringData,
	VectorStringPairData,
}

impl DataKind {
	/// Returns the tag name.
	pub fn name(self) -> &'static str {
		self.into()
	}
}

#[cfg(test)]
mod tests {
	use strum::{EnumCount, VariantArray};

	use super::*;

	#[test]
	fn names_are_unique() {
		let mut names: Vec<_> = DataKind::VARIANTS.iter().map(|k| k.name()).collect();
		names.sort_unstable();
		names.dedup();
		assert_eq!(names.len(), DataKind::COUNT);
	}

	#[test]
	fn display_matches_name() {
		assert_eq!(DataKind::Vec3IntegerData.to_string(), DataKind::Vec3IntegerData.name());
		assert_eq!(DataKind::ModuleRefListData.name(), "ModuleRefListData");
	}
}
