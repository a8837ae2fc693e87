use crate::config::types::{ActionConfig, SubstitutionConfig};
use crate::error::{Result, ShapeError};
use crate::rules::layout::{RecordLayout, as_list, as_str};
use crate::rules::matcher::compile_regex;
use regex::Regex;
use serde_json::Value;

/// A compiled path pattern and its fixed replacement.
#[derive(Debug, Clone)]
pub struct PathSubstitution {
	/// Matched anywhere in the path.
	pub pattern: Regex,

	/// The whole path becomes this literal on a match.
	pub replacement: String,
}

impl PathSubstitution {
	pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
		Ok(PathSubstitution {
			pattern: compile_regex(pattern)?,
			replacement: replacement.to_string(),
		})
	}

	pub fn from_config(config: &SubstitutionConfig) -> Result<Self> {
		Self::new(&config.pattern, &config.replacement)
	}
}

/// Return the replacement of the first substitution matching `path`, or
/// `path` itself when none match.
pub fn match_path<'a>(path: &'a str, substitutions: &'a [PathSubstitution]) -> &'a str {
	substitutions
		.iter()
		.find(|sub| sub.pattern.is_match(path))
		.map_or(path, |sub| sub.replacement.as_str())
}

/// A rewrite applied to one device entry.
///
/// Actions only ever replace the value of their own field; everything else in
/// the entry is carried over untouched. A missing field is inserted.
#[derive(Debug, Clone)]
pub enum RewriteAction {
	/// Run every element of the paths field through [`match_path`].
	Paths(Vec<PathSubstitution>),

	/// Overwrite the devpath field with a literal.
	DevPath(String),

	/// Overwrite the device-mapper UUID field with a literal.
	DmUuid(String),
}

impl RewriteAction {
	pub fn from_config(config: &ActionConfig) -> Result<Self> {
		Ok(match config {
			ActionConfig::Paths { substitutions } => RewriteAction::Paths(
				substitutions
					.iter()
					.map(PathSubstitution::from_config)
					.collect::<Result<_>>()?,
			),
			ActionConfig::Devpath { value } => RewriteAction::DevPath(value.clone()),
			ActionConfig::DmUuid { value } => RewriteAction::DmUuid(value.clone()),
		})
	}

	/// Apply this action to an owned entry and return the rewritten entry.
	pub fn apply(&self, mut entry: Value, layout: &RecordLayout) -> std::result::Result<Value, ShapeError> {
		match self {
			RewriteAction::Paths(substitutions) => {
				let field = &layout.fields.paths;
				let rewritten = rewrite_paths(&entry, field, substitutions, layout)?;
				layout.upsert(&mut entry, field, rewritten)?;
			}
			RewriteAction::DevPath(devpath) => {
				overwrite_string(&mut entry, &layout.fields.devpath, devpath, layout)?;
			}
			RewriteAction::DmUuid(uuid) => {
				overwrite_string(&mut entry, &layout.fields.dm_uuid, uuid, layout)?;
			}
		}
		Ok(entry)
	}

	/// Short label for listings and logs.
	pub fn describe(&self) -> String {
		match self {
			RewriteAction::Paths(substitutions) => {
				let pairs: Vec<String> = substitutions
					.iter()
					.map(|sub| format!("{} -> {}", sub.pattern.as_str(), sub.replacement))
					.collect();
				format!("paths [{}]", pairs.join(", "))
			}
			RewriteAction::DevPath(devpath) => format!("devpath = {}", devpath),
			RewriteAction::DmUuid(uuid) => format!("dm-uuid = {}", uuid),
		}
	}
}

fn rewrite_paths(
	entry: &Value,
	field: &str,
	substitutions: &[PathSubstitution],
	layout: &RecordLayout,
) -> std::result::Result<Value, ShapeError> {
	let existing = layout.get(entry, field)?;

	let items = match existing {
		Some(value) => as_list(value).ok_or_else(|| ShapeError::NotAList {
			field: field.to_string(),
		})?,
		None => return Ok(layout.list_like(None, Vec::new())),
	};

	let rewritten = items
		.iter()
		.enumerate()
		.map(|(index, item)| -> std::result::Result<Value, ShapeError> {
			let path = as_str(item).ok_or_else(|| ShapeError::NotAString {
				field: field.to_string(),
				index,
			})?;
			Ok(layout.string_like(Some(item), match_path(path, substitutions)))
		})
		.collect::<std::result::Result<Vec<_>, _>>()?;

	Ok(layout.list_like(existing, rewritten))
}

fn overwrite_string(
	entry: &mut Value,
	field: &str,
	literal: &str,
	layout: &RecordLayout,
) -> std::result::Result<(), ShapeError> {
	let value = layout.string_like(layout.get(entry, field)?, literal);
	layout.upsert(entry, field, value)
}
