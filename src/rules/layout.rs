use crate::config::types::{Encoding, FieldNames};
use crate::error::ShapeError;
use serde_json::{Map, Value};

const OBJECT_TAG: &str = "Object";
const STRING_TAG: &str = "String";
const ARRAY_TAG: &str = "Array";

/// How fields are read from and written into one device entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
	pub encoding: Encoding,
	pub fields: FieldNames,
}

impl RecordLayout {
	pub fn new(encoding: Encoding, fields: FieldNames) -> Self {
		RecordLayout { encoding, fields }
	}

	/// Look up a field in a device entry. `Ok(None)` means the field is absent.
	///
	/// Tagged layouts also accept entries that are plain objects.
	pub fn get<'v>(&self, entry: &'v Value, field: &str) -> Result<Option<&'v Value>, ShapeError> {
		if self.encoding == Encoding::Tagged && is_pairs_container(entry) {
			let pairs = tagged_pairs(entry)?;
			for (index, pair) in pairs.iter().enumerate() {
				let (name, value) = split_pair(pair, index)?;
				if name == field {
					return Ok(Some(value));
				}
			}
			return Ok(None);
		}
		Ok(self.map_container(entry)?.get(field))
	}

	/// Set a field whether or not it was present before.
	///
	/// The entry keeps its container: pairs stay pairs, objects stay objects.
	/// Every other field keeps its value, and in a pairs container its
	/// position.
	pub fn upsert(&self, entry: &mut Value, field: &str, value: Value) -> Result<(), ShapeError> {
		if self.encoding == Encoding::Tagged && is_pairs_container(entry) {
			let pairs = tagged_pairs_mut(entry)?;
			for (index, pair) in pairs.iter_mut().enumerate() {
				let is_field = split_pair(pair, index)?.0 == field;
				if is_field && let Some(slot) = pair.as_array_mut().and_then(|p| p.get_mut(1)) {
					*slot = value;
					return Ok(());
				}
			}
			pairs.push(Value::Array(vec![Value::String(field.to_string()), value]));
			return Ok(());
		}
		self.map_container_mut(entry)?.insert(field.to_string(), value);
		Ok(())
	}

	fn map_container<'v>(&self, entry: &'v Value) -> Result<&'v Map<String, Value>, ShapeError> {
		entry.as_object().ok_or(ShapeError::NotAContainer {
			expected: self.encoding.as_str(),
		})
	}

	fn map_container_mut<'v>(&self, entry: &'v mut Value) -> Result<&'v mut Map<String, Value>, ShapeError> {
		entry.as_object_mut().ok_or(ShapeError::NotAContainer {
			expected: self.encoding.as_str(),
		})
	}

	/// Build a string value, keeping the wrapping of `existing` when there is one.
	pub fn string_like(&self, existing: Option<&Value>, s: &str) -> Value {
		let tagged = match existing {
			Some(value) => is_tagged(value, STRING_TAG),
			None => self.encoding == Encoding::Tagged,
		};
		wrap_string(s, tagged)
	}

	/// Build a list value, keeping the wrapping of `existing` when there is one.
	pub fn list_like(&self, existing: Option<&Value>, items: Vec<Value>) -> Value {
		let tagged = match existing {
			Some(value) => is_tagged(value, ARRAY_TAG),
			None => self.encoding == Encoding::Tagged,
		};
		if tagged {
			let mut map = Map::new();
			map.insert(ARRAY_TAG.to_string(), Value::Array(items));
			Value::Object(map)
		} else {
			Value::Array(items)
		}
	}
}

/// Read a string that may be bare or wrapped as `{"String": s}`.
pub fn as_str(value: &Value) -> Option<&str> {
	match value {
		Value::String(s) => Some(s),
		Value::Object(map) if map.len() == 1 => map.get(STRING_TAG).and_then(Value::as_str),
		_ => None,
	}
}

/// Read a list that may be bare or wrapped as `{"Array": [...]}`.
pub fn as_list(value: &Value) -> Option<&Vec<Value>> {
	match value {
		Value::Array(items) => Some(items),
		Value::Object(map) if map.len() == 1 => map.get(ARRAY_TAG).and_then(Value::as_array),
		_ => None,
	}
}

fn wrap_string(s: &str, tagged: bool) -> Value {
	if tagged {
		let mut map = Map::new();
		map.insert(STRING_TAG.to_string(), Value::String(s.to_string()));
		Value::Object(map)
	} else {
		Value::String(s.to_string())
	}
}

fn is_tagged(value: &Value, tag: &str) -> bool {
	matches!(value, Value::Object(map) if map.len() == 1 && map.contains_key(tag))
}

/// `{"Object": [...]}` and nothing else.
fn is_pairs_container(entry: &Value) -> bool {
	matches!(entry, Value::Object(map) if map.len() == 1 && map.get(OBJECT_TAG).is_some_and(Value::is_array))
}

fn tagged_pairs(entry: &Value) -> Result<&Vec<Value>, ShapeError> {
	entry
		.get(OBJECT_TAG)
		.and_then(Value::as_array)
		.ok_or(ShapeError::NotAContainer {
			expected: Encoding::Tagged.as_str(),
		})
}

fn tagged_pairs_mut(entry: &mut Value) -> Result<&mut Vec<Value>, ShapeError> {
	entry
		.get_mut(OBJECT_TAG)
		.and_then(Value::as_array_mut)
		.ok_or(ShapeError::NotAContainer {
			expected: Encoding::Tagged.as_str(),
		})
}

fn split_pair(pair: &Value, index: usize) -> Result<(&str, &Value), ShapeError> {
	match pair.as_array().map(Vec::as_slice) {
		Some([Value::String(name), value]) => Ok((name.as_str(), value)),
		_ => Err(ShapeError::MalformedPair { index }),
	}
}
