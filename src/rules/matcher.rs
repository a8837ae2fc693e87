use crate::config::types::{RuleConfig, TableConfig};
use crate::error::{DevsnapError, Result};
use crate::rules::layout::RecordLayout;
use crate::rules::rewriter::RewriteAction;
use regex::Regex;
use serde_json::Value;

/// A compiled rule ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledRule {
	/// Compiled key pattern regex.
	pub key_regex: Regex,

	/// Key the rewritten entry is stored under.
	pub canonical_key: String,

	/// Rewrites applied in declaration order.
	pub actions: Vec<RewriteAction>,
}

impl CompiledRule {
	/// Compile a rule from its table entry.
	pub fn from_config(config: &RuleConfig) -> Result<Self> {
		let key_regex = compile_regex(&config.key_pattern)?;
		let actions = config
			.actions
			.iter()
			.map(RewriteAction::from_config)
			.collect::<Result<Vec<_>>>()?;

		Ok(CompiledRule {
			key_regex,
			canonical_key: config.canonical_key.clone(),
			actions,
		})
	}

	/// Check if this rule matches the given top-level key.
	pub fn matches(&self, key: &str) -> bool {
		self.key_regex.is_match(key)
	}

	/// Run every action over a copy of `entry`, each feeding the next.
	pub fn rewrite(&self, key: &str, entry: &Value, layout: &RecordLayout) -> Result<Value> {
		self.actions
			.iter()
			.try_fold(entry.clone(), |acc, action| action.apply(acc, layout))
			.map_err(|source| DevsnapError::UnexpectedShape {
				key: key.to_string(),
				source,
			})
	}
}

/// Compile a regex pattern string.
pub(crate) fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| DevsnapError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// Compile all rules in a table.
pub fn compile_rules(table: &TableConfig) -> Result<Vec<CompiledRule>> {
	table.rules.iter().map(CompiledRule::from_config).collect()
}

/// Find the first rule matching a top-level key.
pub fn find_matching_rule<'a>(rules: &'a [CompiledRule], key: &str) -> Option<&'a CompiledRule> {
	rules.iter().find(|rule| rule.matches(key))
}
