use crate::config::BuiltinTable;
use crate::config::types::TableConfig;
use crate::error::Result;
use crate::rules::layout::RecordLayout;
use crate::rules::matcher::{CompiledRule, compile_rules};

/// A compiled, read-only rule table.
///
/// Built once and shared freely; applying it never mutates the table.
#[derive(Debug, Clone)]
pub struct RuleTable {
	pub name: String,
	pub layout: RecordLayout,
	pub rules: Vec<CompiledRule>,
}

impl RuleTable {
	/// Compile a parsed table.
	pub fn from_config(config: &TableConfig) -> Result<Self> {
		Ok(RuleTable {
			name: config.name.clone(),
			layout: RecordLayout::new(config.encoding, config.fields.clone()),
			rules: compile_rules(config)?,
		})
	}

	/// Load and compile one of the embedded tables.
	pub fn builtin(table: BuiltinTable) -> Result<Self> {
		Self::from_config(&table.load()?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::Encoding;

	#[test]
	fn test_builtin_tables_compile() {
		for table in BuiltinTable::ALL {
			let compiled = RuleTable::builtin(table).unwrap();
			assert_eq!(compiled.name, table.as_str());
			assert_eq!(compiled.rules.len(), 8);
		}
	}

	#[test]
	fn test_builtin_layouts() {
		let udev = RuleTable::builtin(BuiltinTable::Udev).unwrap();
		assert_eq!(udev.layout.encoding, Encoding::Tagged);

		let uevents = RuleTable::builtin(BuiltinTable::Uevents).unwrap();
		assert_eq!(uevents.layout.encoding, Encoding::Plain);
		assert_eq!(uevents.layout.fields.devpath, "devpath");
	}
}
