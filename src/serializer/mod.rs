//! Snapshot serializers for devsnap.
//!
//! A serializer is what a test harness plugs in to render a captured value:
//! `test` decides whether the serializer handles the value and `print` turns
//! it into comparable text. `print` never fails; when a value cannot be
//! decoded or rewritten the original text comes back as a
//! [`Rendered::Passthrough`] carrying the cause.

pub mod device;
pub mod object;

pub use device::DeviceSerializer;
pub use object::ObjectSerializer;

use crate::error::{DevsnapError, Result};
use std::borrow::Cow;

/// One captured value handed over by the test harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Snapshot<'a> {
	Text(&'a str),
	Bytes(&'a [u8]),
}

impl<'a> Snapshot<'a> {
	pub fn is_empty(&self) -> bool {
		match self {
			Snapshot::Text(text) => text.is_empty(),
			Snapshot::Bytes(bytes) => bytes.is_empty(),
		}
	}

	/// The value as text, failing on bytes that are not UTF-8.
	pub fn as_text(&self) -> Result<&'a str> {
		match *self {
			Snapshot::Text(text) => Ok(text),
			Snapshot::Bytes(bytes) => std::str::from_utf8(bytes).map_err(|source| DevsnapError::NotUtf8 { source }),
		}
	}

	/// The value as text for passthrough output, replacing invalid UTF-8.
	pub fn to_text_lossy(&self) -> Cow<'a, str> {
		match *self {
			Snapshot::Text(text) => Cow::Borrowed(text),
			Snapshot::Bytes(bytes) => String::from_utf8_lossy(bytes),
		}
	}
}

/// Outcome of [`SnapshotSerializer::print`].
#[derive(Debug)]
pub enum Rendered {
	/// The value was decoded and rendered canonically.
	Normalized(String),

	/// The value is returned as it came in.
	Passthrough { text: String, cause: DevsnapError },
}

impl Rendered {
	pub fn text(&self) -> &str {
		match self {
			Rendered::Normalized(text) => text,
			Rendered::Passthrough { text, .. } => text,
		}
	}

	pub fn into_text(self) -> String {
		match self {
			Rendered::Normalized(text) => text,
			Rendered::Passthrough { text, .. } => text,
		}
	}

	pub fn is_normalized(&self) -> bool {
		matches!(self, Rendered::Normalized(_))
	}

	/// Wrap a rendering attempt, falling back to the original value on error.
	pub(crate) fn from_attempt(name: &str, value: &Snapshot, attempt: Result<String>) -> Self {
		match attempt {
			Ok(text) => Rendered::Normalized(text),
			Err(cause) => {
				log::warn!("{name}: returning snapshot unchanged: {cause}");
				Rendered::Passthrough {
					text: value.to_text_lossy().into_owned(),
					cause,
				}
			}
		}
	}
}

/// The `test`/`print` pair a snapshot harness calls.
pub trait SnapshotSerializer {
	/// Whether this serializer should handle `value`.
	fn test(&self, value: &Snapshot) -> bool;

	/// Render `value`. Never fails; see [`Rendered`].
	fn print(&self, value: &Snapshot) -> Rendered;
}
