use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use devsnap::config::BuiltinTable;
use devsnap::rules::RuleTable;
use devsnap::serializer::{DeviceSerializer, ObjectSerializer, Snapshot, SnapshotSerializer};

#[derive(Parser)]
#[command(name = "devsnap")]
#[command(
	author,
	version,
	about = "Normalize device enumeration snapshots into stable, sorted text"
)]
#[command(arg_required_else_help = true)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Normalize a snapshot from a file or stdin and print it
	Print {
		/// Snapshot file to read (stdin when omitted)
		#[arg(value_name = "FILE")]
		file: Option<PathBuf>,

		/// Rule table to apply
		#[arg(long, value_enum, default_value_t = BuiltinTable::Udev)]
		table: BuiltinTable,

		/// Only pretty-print, without applying any rules
		#[arg(long, conflicts_with = "table")]
		no_rules: bool,
	},
	/// Inspect the built-in rule tables
	Rules {
		#[command(subcommand)]
		action: RulesAction,
	},
}

#[derive(Subcommand)]
enum RulesAction {
	/// List the rules of a table
	Show {
		#[arg(long, value_enum, default_value_t = BuiltinTable::Udev)]
		table: BuiltinTable,
	},
	/// Compile every built-in table and report errors
	Validate,
}

fn main() -> ExitCode {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Print {
			file,
			table,
			no_rules,
		} => handle_print(file.as_deref(), table, no_rules),
		Commands::Rules { action } => match action {
			RulesAction::Show { table } => handle_rules_show(table),
			RulesAction::Validate => Ok(handle_rules_validate()),
		},
	}
}

fn handle_print(file: Option<&Path>, table: BuiltinTable, no_rules: bool) -> Result<ExitCode> {
	let raw = read_input(file)?;
	let snapshot = Snapshot::Bytes(&raw);

	let rendered = if no_rules {
		render(&ObjectSerializer, &snapshot)
	} else {
		let serializer = DeviceSerializer::builtin(table)
			.with_context(|| format!("Failed to load rule table: {}", table.as_str()))?;
		render(&serializer, &snapshot)
	};

	let mut stdout = std::io::stdout().lock();
	writeln!(stdout, "{}", rendered).context("Failed to write output")?;

	Ok(ExitCode::SUCCESS)
}

/// Run a serializer the way a test harness would: values it does not claim
/// are printed unchanged.
fn render(serializer: &impl SnapshotSerializer, snapshot: &Snapshot) -> String {
	if serializer.test(snapshot) {
		serializer.print(snapshot).into_text()
	} else {
		snapshot.to_text_lossy().into_owned()
	}
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
	match file {
		Some(path) => std::fs::read(path).with_context(|| format!("Failed to read {}", path.display())),
		None => {
			let mut buf = Vec::new();
			std::io::stdin()
				.read_to_end(&mut buf)
				.context("Failed to read stdin")?;
			Ok(buf)
		}
	}
}

fn handle_rules_show(table: BuiltinTable) -> Result<ExitCode> {
	let compiled = RuleTable::builtin(table)
		.with_context(|| format!("Failed to load rule table: {}", table.as_str()))?;

	println!("# table: {}", compiled.name);
	println!("# encoding: {}", compiled.layout.encoding.as_str());
	println!(
		"# fields: paths={} devpath={} dm_uuid={}",
		compiled.layout.fields.paths, compiled.layout.fields.devpath, compiled.layout.fields.dm_uuid
	);
	println!("# rules: {}", compiled.rules.len());
	println!();

	for (i, rule) in compiled.rules.iter().enumerate() {
		println!("  Rule {}:", i + 1);
		println!("    key_pattern: {}", rule.key_regex.as_str());
		println!("    canonical_key: {}", rule.canonical_key);
		for action in &rule.actions {
			println!("    action: {}", action.describe());
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_rules_validate() -> ExitCode {
	let mut failed = false;

	for table in BuiltinTable::ALL {
		match RuleTable::builtin(table) {
			Ok(compiled) => println!("  {} ({} rules)", compiled.name, compiled.rules.len()),
			Err(e) => {
				eprintln!("Rule table error in {}: {}", table.as_str(), e);
				failed = true;
			}
		}
	}

	if failed {
		ExitCode::FAILURE
	} else {
		println!("All rule tables are valid");
		ExitCode::SUCCESS
	}
}
