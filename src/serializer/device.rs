use crate::config::BuiltinTable;
use crate::error::Result;
use crate::normalize::{decode_record, normalize_text};
use crate::rules::RuleTable;
use crate::serializer::{Rendered, Snapshot, SnapshotSerializer};

/// Rewrites volatile device keys and fields through a rule table, then
/// renders the record canonically.
#[derive(Debug, Clone)]
pub struct DeviceSerializer {
	table: RuleTable,
}

impl DeviceSerializer {
	pub fn new(table: RuleTable) -> Self {
		DeviceSerializer { table }
	}

	/// A serializer over one of the embedded rule tables.
	pub fn builtin(table: BuiltinTable) -> Result<Self> {
		Ok(Self::new(RuleTable::builtin(table)?))
	}

	pub fn table(&self) -> &RuleTable {
		&self.table
	}

	fn render(&self, value: &Snapshot) -> Result<String> {
		normalize_text(&self.table, value.as_text()?)
	}
}

impl SnapshotSerializer for DeviceSerializer {
	/// Raw bytes are always claimed; text only when it decodes to a record.
	fn test(&self, value: &Snapshot) -> bool {
		match value {
			Snapshot::Bytes(bytes) => !bytes.is_empty(),
			Snapshot::Text(text) => decode_record(text).is_ok(),
		}
	}

	fn print(&self, value: &Snapshot) -> Rendered {
		Rendered::from_attempt(&self.table.name, value, self.render(value))
	}
}
