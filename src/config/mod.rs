//! Rule table configuration for devsnap.
//!
//! This module handles:
//! - TOML rule table parsing and validation
//! - The rule tables embedded in the crate

pub mod builtin;
pub mod parser;
pub mod types;

pub use builtin::BuiltinTable;
pub use parser::parse_table_str;
pub use types::{ActionConfig, Encoding, FieldNames, RuleConfig, SubstitutionConfig, TableConfig};
