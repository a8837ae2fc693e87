//! Rule matching and rewriting for devsnap.
//!
//! This module handles:
//! - Key matching of snapshot entries against compiled rule tables
//! - Field rewrites (paths, devpath, device-mapper UUID) inside an entry
//! - Reading and upserting fields in both entry encodings

pub mod layout;
pub mod matcher;
pub mod rewriter;
pub mod table;

pub use layout::RecordLayout;
pub use matcher::{CompiledRule, compile_rules, find_matching_rule};
pub use rewriter::{PathSubstitution, RewriteAction, match_path};
pub use table::RuleTable;
