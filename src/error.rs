/// Library-level structured errors for devsnap.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum DevsnapError {
	#[error("Failed to parse rule table: {name}")]
	TableParseError {
		name: String,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid regex pattern in rule table: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Rule {index} in table {table} has an empty canonical key")]
	EmptyCanonicalKey { table: String, index: usize },

	#[error("Canonical key {key} is declared by more than one rule in table {table}")]
	DuplicateCanonicalKey { table: String, key: String },

	#[error("Snapshot is not valid UTF-8")]
	NotUtf8 {
		#[source]
		source: std::str::Utf8Error,
	},

	#[error("Failed to decode snapshot")]
	Decode {
		#[source]
		source: serde_json::Error,
	},

	#[error("Snapshot is not a record of devices (found {found})")]
	NotARecord { found: &'static str },

	#[error("Device entry has an unexpected shape: {key}")]
	UnexpectedShape {
		key: String,
		#[source]
		source: ShapeError,
	},

	#[error("Failed to encode snapshot")]
	Encode {
		#[source]
		source: serde_json::Error,
	},
}

/// Ways a single device entry can fail to fit its table's layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
	#[error("entry is not a {expected} container")]
	NotAContainer { expected: &'static str },

	#[error("field pair {index} is not a [name, value] pair")]
	MalformedPair { index: usize },

	#[error("field {field} is not a list")]
	NotAList { field: String },

	#[error("element {index} of field {field} is not a string")]
	NotAString { field: String, index: usize },
}

/// Result type alias using DevsnapError.
pub type Result<T> = std::result::Result<T, DevsnapError>;
