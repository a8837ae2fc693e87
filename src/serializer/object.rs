use crate::error::{DevsnapError, Result};
use crate::normalize::pretty;
use crate::serializer::{Rendered, Snapshot, SnapshotSerializer};
use serde_json::Value;

/// Pretty-prints any structured value without rewriting it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectSerializer;

impl ObjectSerializer {
	fn render(value: &Snapshot) -> Result<String> {
		let decoded: Value =
			serde_json::from_str(value.as_text()?).map_err(|source| DevsnapError::Decode { source })?;
		pretty(&decoded)
	}
}

impl SnapshotSerializer for ObjectSerializer {
	fn test(&self, value: &Snapshot) -> bool {
		!value.is_empty()
	}

	fn print(&self, value: &Snapshot) -> Rendered {
		Rendered::from_attempt("object", value, Self::render(value))
	}
}
