//! Snapshot normalization for devsnap.
//!
//! This module handles:
//! - Decoding snapshot text into a record of device entries
//! - Applying a rule table to every top-level entry
//! - Canonical, key-sorted pretty printing

pub mod canonical;

pub use canonical::{canonicalize, pretty};

use crate::error::{DevsnapError, Result};
use crate::rules::{RuleTable, find_matching_rule};
use serde_json::{Map, Value};

/// A snapshot: device path keys mapped to device entries.
pub type Record = Map<String, Value>;

/// Decode snapshot text into a record.
pub fn decode_record(text: &str) -> Result<Record> {
	let value: Value = serde_json::from_str(text).map_err(|source| DevsnapError::Decode { source })?;

	match value {
		Value::Object(record) => Ok(record),
		other => Err(DevsnapError::NotARecord {
			found: value_kind(&other),
		}),
	}
}

/// Apply a rule table to a record, returning a new record.
///
/// Each key is matched against the rules in declaration order and the first
/// match wins. A matched entry is rewritten by that rule's actions and stored
/// under the rule's canonical key; an unmatched entry is copied unchanged.
/// Two keys renamed onto the same canonical key overwrite each other, and
/// the one that sorts last in the input survives.
pub fn apply_rules(table: &RuleTable, input: &Record) -> Result<Record> {
	let mut output = Record::new();

	for (key, entry) in input {
		match find_matching_rule(&table.rules, key) {
			Some(rule) => {
				log::debug!("{}: {} -> {}", table.name, key, rule.canonical_key);
				let rewritten = rule.rewrite(key, entry, &table.layout)?;
				output.insert(rule.canonical_key.clone(), rewritten);
			}
			None => {
				output.insert(key.clone(), entry.clone());
			}
		}
	}

	Ok(output)
}

/// Decode, apply the rule table and canonicalize in one step.
pub fn normalize_text(table: &RuleTable, text: &str) -> Result<String> {
	let record = decode_record(text)?;
	let normalized = apply_rules(table, &record)?;
	canonicalize(&normalized)
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::BuiltinTable;
	use crate::config::parse_table_str;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	fn record(value: Value) -> Record {
		match value {
			Value::Object(map) => map,
			_ => panic!("test record must be an object"),
		}
	}

	fn udev() -> RuleTable {
		RuleTable::builtin(BuiltinTable::Udev).unwrap()
	}

	fn uevents() -> RuleTable {
		RuleTable::builtin(BuiltinTable::Uevents).unwrap()
	}

	#[test]
	fn test_decode_record_rejects_non_object() {
		match decode_record("[1, 2]").unwrap_err() {
			DevsnapError::NotARecord { found } => assert_eq!(found, "array"),
			other => panic!("Expected NotARecord, got {other:?}"),
		}
	}

	#[test]
	fn test_decode_record_rejects_malformed_text() {
		assert!(matches!(
			decode_record("{ not json"),
			Err(DevsnapError::Decode { .. })
		));
	}

	#[test]
	fn test_sda1_paths_are_renamed_and_rewritten() {
		let table = RuleTable::from_config(
			&parse_table_str(
				r#"
name = "example"
encoding = "plain"

[[rules]]
key_pattern = '.+/block/sda/sda1'
canonical_key = "/block/sda/sda1"

[[rules.actions]]
kind = "paths"
substitutions = [
	{ pattern = '/dev/disk/by-uuid', replacement = "/dev/disk/by-uuid/74b3fabd-dbf5-4cc0-a967-2c12f8113fa6" },
]
"#,
				"example.toml",
			)
			.unwrap(),
		)
		.unwrap();

		let input = record(json!({
			"/sys/devices/pci0000:00/0000:00:01.1/ata1/host0/target0:0:0/0:0:0:0/block/sda/sda1": {
				"PATHS": { "Array": [{ "String": "/dev/disk/by-uuid/XXXX" }] }
			}
		}));

		let output = apply_rules(&table, &input).unwrap();

		assert_eq!(
			Value::Object(output),
			json!({
				"/block/sda/sda1": {
					"PATHS": { "Array": [{ "String": "/dev/disk/by-uuid/74b3fabd-dbf5-4cc0-a967-2c12f8113fa6" }] }
				}
			})
		);
	}

	#[test]
	fn test_unmatched_entries_pass_through() {
		let input = record(json!({
			"/devices/virtual/block/loop0": { "Object": [["DEVNAME", { "String": "/dev/loop0" }]] },
			"/devices/virtual/block/ram0": { "Object": [] }
		}));

		let output = apply_rules(&udev(), &input).unwrap();
		assert_eq!(output, input);
	}

	#[test]
	fn test_udev_dm_entry_gets_paths_and_uuid() {
		let input = record(json!({
			"/devices/virtual/block/dm-0": { "Object": [
				["DEVNAME", { "String": "/dev/dm-0" }],
				["PATHS", { "Array": [
					{ "String": "/dev/mapper/centos-root" },
					{ "String": "/dev/disk/by-id/dm-uuid-LVM-random" },
					{ "String": "/dev/disk/by-uuid/random" }
				] }],
				["DM_UUID", { "String": "LVM-random" }]
			] }
		}));

		let output = apply_rules(&udev(), &input).unwrap();

		assert_eq!(
			Value::Object(output),
			json!({
				"/devices/virtual/block/dm-0": { "Object": [
					["DEVNAME", { "String": "/dev/dm-0" }],
					["PATHS", { "Array": [
						{ "String": "/dev/mapper/centos-root" },
						{ "String": "/dev/disk/by-id/dm-uuid-LVM-FpAffE3HiAwoAvd81g8dBirIbkC3Ogu58AIfMI4SXo1AodrQkxuO2yuvd2JOPi5j" },
						{ "String": "/dev/disk/by-uuid/45252d52-d8d6-468e-aaa0-c117b042944a" }
					] }],
					["DM_UUID", { "String": "LVM-FpAffE3HiAwoAvd81g8dBirIbkC3Ogu58AIfMI4SXo1AodrQkxuO2yuvd2JOPi5j" }]
				] }
			})
		);
	}

	#[test]
	fn test_iscsi_keys_collapse_onto_fixed_devpaths() {
		let input = record(json!({
			"/devices/platform/host3/session1/target3:0:0/3:0:0:0/block/sdae": {
				"devpath": "/devices/platform/host3/session1/target3:0:0/3:0:0:0/block/sdae",
				"devname": "/dev/sdae"
			},
			"/devices/platform/host4/session2/target4:0:0/4:0:0:1/block/sdah": {
				"devname": "/dev/sdah"
			}
		}));

		let output = apply_rules(&uevents(), &input).unwrap();

		assert_eq!(
			Value::Object(output),
			json!({
				"/devices/platform/host38/session7/target38:0:0/38:0:0:0/block/sdae": {
					"devpath": "/devices/platform/host38/session7/target38:0:0/38:0:0:0/block/sdae",
					"devname": "/dev/sdae"
				},
				"/devices/platform/host39/session8/target39:0:0/39:0:0:1/block/sdah": {
					"devpath": "/devices/platform/host39/session8/target39:0:0/39:0:0:1/block/sdah",
					"devname": "/dev/sdah"
				}
			})
		);
	}

	#[test]
	fn test_colliding_keys_keep_the_last_in_key_order() {
		let input = record(json!({
			"/devices/platform/host1/session1/target1:0:0/1:0:0:0/block/sdae": { "devname": "A" },
			"/devices/platform/host2/session2/target2:0:0/2:0:0:0/block/sdae": { "devname": "B" }
		}));

		let output = apply_rules(&uevents(), &input).unwrap();

		assert_eq!(output.len(), 1);
		assert_eq!(
			Value::Object(output),
			json!({
				"/devices/platform/host38/session7/target38:0:0/38:0:0:0/block/sdae": {
					"devname": "B",
					"devpath": "/devices/platform/host38/session7/target38:0:0/38:0:0:0/block/sdae"
				}
			})
		);
	}

	#[test]
	fn test_input_record_is_not_mutated() {
		let input = record(json!({
			"/devices/virtual/block/dm-1": { "paths": ["/dev/disk/by-uuid/random"] }
		}));
		let before = input.clone();

		let output = apply_rules(&uevents(), &input).unwrap();

		assert_eq!(input, before);
		assert_ne!(output, input);
	}

	#[test]
	fn test_shape_error_names_the_entry() {
		let input = record(json!({ "/devices/virtual/block/dm-0": "oops" }));

		match apply_rules(&udev(), &input).unwrap_err() {
			DevsnapError::UnexpectedShape { key, .. } => {
				assert_eq!(key, "/devices/virtual/block/dm-0");
			}
			other => panic!("Expected UnexpectedShape, got {other:?}"),
		}
	}

	#[test]
	fn test_normalize_text_is_repeatable() {
		let text = r#"{
			"/devices/virtual/block/dm-1": { "paths": ["/dev/disk/by-uuid/a"] },
			"/devices/virtual/block/loop0": { "paths": [] }
		}"#;
		let table = uevents();

		let first = normalize_text(&table, text).unwrap();
		let _other = normalize_text(&table, r#"{ "/devices/virtual/block/dm-0": {} }"#).unwrap();
		let second = normalize_text(&table, text).unwrap();

		assert_eq!(first, second);
	}
}
