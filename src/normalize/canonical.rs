use crate::error::{DevsnapError, Result};
use crate::normalize::Record;
use serde_json::Value;
use std::collections::BTreeMap;

/// Serialize a record with its keys in lexicographic order, indented by two
/// spaces.
///
/// Output only depends on the record's entries, never on the order they were
/// inserted in.
pub fn canonicalize(record: &Record) -> Result<String> {
	let sorted: BTreeMap<&str, &Value> = record.iter().map(|(key, value)| (key.as_str(), value)).collect();
	serde_json::to_string_pretty(&sorted).map_err(|source| DevsnapError::Encode { source })
}

/// Pretty-print any value with two-space indentation.
pub fn pretty(value: &Value) -> Result<String> {
	serde_json::to_string_pretty(value).map_err(|source| DevsnapError::Encode { source })
}

#[cfg(test)]
mod tests {
	use super::*;
	use insta::assert_snapshot;
	use serde_json::json;

	fn record_from_pairs(pairs: &[(&str, Value)]) -> Record {
		let mut record = Record::new();
		for (key, value) in pairs {
			record.insert(key.to_string(), value.clone());
		}
		record
	}

	#[test]
	fn test_canonical_output_is_sorted_and_indented() {
		let record = record_from_pairs(&[
			("/devices/virtual/block/dm-1", json!({ "paths": ["/dev/dm-1"] })),
			("/block/sda/sda1", json!({ "paths": [] })),
		]);

		assert_snapshot!(canonicalize(&record).unwrap(), @r#"
		{
		  "/block/sda/sda1": {
		    "paths": []
		  },
		  "/devices/virtual/block/dm-1": {
		    "paths": [
		      "/dev/dm-1"
		    ]
		  }
		}
		"#);
	}

	#[test]
	fn test_canonical_output_ignores_insertion_order() {
		let entries = [
			("/devices/virtual/block/dm-0", json!({ "devname": "/dev/dm-0" })),
			("/block/sda/sda2", json!({ "devname": "/dev/sda2" })),
			("/block/sda/sda1", json!({ "devname": "/dev/sda1" })),
		];
		let forward = record_from_pairs(&entries);

		let mut reversed_entries = entries.clone();
		reversed_entries.reverse();
		let reversed = record_from_pairs(&reversed_entries);

		let rotated = record_from_pairs(&[entries[1].clone(), entries[2].clone(), entries[0].clone()]);

		let expected = canonicalize(&forward).unwrap();
		assert_eq!(canonicalize(&reversed).unwrap(), expected);
		assert_eq!(canonicalize(&rotated).unwrap(), expected);
	}

	#[test]
	fn test_empty_record() {
		assert_eq!(canonicalize(&Record::new()).unwrap(), "{}");
	}

	#[test]
	fn test_pretty_non_record_value() {
		assert_eq!(pretty(&json!([1, "a"])).unwrap(), "[\n  1,\n  \"a\"\n]");
	}
}
