use serde::Deserialize;
use std::collections::HashSet;

/// Top-level rule table as authored in an embedded `.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TableConfig {
	/// Short name used in diagnostics and on the command line.
	pub name: String,

	/// How device entries are encoded in snapshots this table applies to.
	#[serde(default)]
	pub encoding: Encoding,

	/// Names of the fields the rewrite actions target.
	#[serde(default)]
	pub fields: FieldNames,

	/// Rules for matching and rewriting device entries.
	/// First matching rule wins.
	#[serde(default)]
	pub rules: Vec<RuleConfig>,
}

/// Container and scalar encoding of a device entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
	/// JSON objects, bare strings and bare arrays.
	#[default]
	Plain,

	/// `{"Object": [[name, value], ...]}` containers, `{"String": s}` scalars
	/// and `{"Array": [...]}` lists.
	Tagged,
}

impl Encoding {
	pub fn as_str(&self) -> &'static str {
		match self {
			Encoding::Plain => "plain",
			Encoding::Tagged => "tagged",
		}
	}
}

/// Field names inside a device entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldNames {
	pub paths: String,
	pub devpath: String,
	pub dm_uuid: String,
}

impl Default for FieldNames {
	fn default() -> Self {
		FieldNames {
			paths: "PATHS".to_string(),
			devpath: "DEVPATH".to_string(),
			dm_uuid: "DM_UUID".to_string(),
		}
	}
}

/// A rule matching top-level snapshot keys and rewriting their entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RuleConfig {
	/// Regex tested against each top-level key (substring match).
	pub key_pattern: String,

	/// Stable key the matched entry is stored under.
	pub canonical_key: String,

	/// Rewrites applied in order to the matched entry.
	#[serde(default)]
	pub actions: Vec<ActionConfig>,
}

/// One rewrite action, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ActionConfig {
	/// Run every element of the paths field through the substitutions.
	Paths { substitutions: Vec<SubstitutionConfig> },

	/// Overwrite the devpath field.
	Devpath { value: String },

	/// Overwrite the device-mapper UUID field.
	DmUuid { value: String },
}

/// A path pattern and the literal path that replaces any match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubstitutionConfig {
	pub pattern: String,
	pub replacement: String,
}

impl TableConfig {
	/// Validate canonical keys: non-empty and unique within the table.
	pub fn validate(&self) -> Result<(), crate::error::DevsnapError> {
		let mut seen = HashSet::new();

		for (index, rule) in self.rules.iter().enumerate() {
			if rule.canonical_key.is_empty() {
				return Err(crate::error::DevsnapError::EmptyCanonicalKey {
					table: self.name.clone(),
					index: index + 1,
				});
			}

			if !seen.insert(rule.canonical_key.as_str()) {
				return Err(crate::error::DevsnapError::DuplicateCanonicalKey {
					table: self.name.clone(),
					key: rule.canonical_key.clone(),
				});
			}
		}

		Ok(())
	}
}
