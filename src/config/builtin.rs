use crate::config::parser::parse_table_str;
use crate::config::types::TableConfig;
use crate::error::Result;

const UDEV_TABLE: &str = include_str!("tables/udev.toml");
const UEVENTS_TABLE: &str = include_str!("tables/uevents.toml");

/// Rule tables compiled into the crate.
///
/// Tables are fixed at build time and cannot be loaded from a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BuiltinTable {
	/// udev database snapshots in the tagged encoding.
	Udev,

	/// device-scanner daemon state in the plain encoding.
	Uevents,
}

impl BuiltinTable {
	pub const ALL: [BuiltinTable; 2] = [BuiltinTable::Udev, BuiltinTable::Uevents];

	pub fn as_str(&self) -> &'static str {
		match self {
			BuiltinTable::Udev => "udev",
			BuiltinTable::Uevents => "uevents",
		}
	}

	/// The embedded TOML source of this table.
	pub fn source(&self) -> &'static str {
		match self {
			BuiltinTable::Udev => UDEV_TABLE,
			BuiltinTable::Uevents => UEVENTS_TABLE,
		}
	}

	/// Parse and validate this table.
	pub fn load(&self) -> Result<TableConfig> {
		parse_table_str(self.source(), &format!("{}.toml", self.as_str()))
	}
}
