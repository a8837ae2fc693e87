use crate::config::types::TableConfig;
use crate::error::{DevsnapError, Result};

/// Parse a rule table from a TOML string.
///
/// `name` is only used to label parse errors; the table's own `name` field
/// is what the rest of the crate reports.
pub fn parse_table_str(content: &str, name: &str) -> Result<TableConfig> {
	let table: TableConfig =
		toml::from_str(content).map_err(|source| DevsnapError::TableParseError {
			name: name.to_string(),
			source,
		})?;

	// Validate the parsed table
	table.validate()?;

	Ok(table)
}
