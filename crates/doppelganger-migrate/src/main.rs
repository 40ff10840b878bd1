//! Rewrites legacy `{key,type,value}` shorthand params to the canonical
//! `EQUALS(left,right)` form (spec §4.5). Mirrors
//! `examples/original_source/migrators/params_migrator.py`'s `sys.argv`
//! handling rather than pulling in a CLI framework for two positional
//! arguments.

use std::env;
use std::process::ExitCode;

use doppelganger::migrate::migrate_value;

fn main() -> ExitCode {
	let args: Vec<String> = env::args().collect();
	if args.len() != 3 {
		eprintln!("Usage: {} input.json output.json", program_name(&args));
		return ExitCode::FAILURE;
	}

	if let Err(err) = run(&args[1], &args[2]) {
		eprintln!("{err}");
		return ExitCode::FAILURE;
	}

	ExitCode::SUCCESS
}

fn program_name(args: &[String]) -> &str {
	args.first().map(String::as_str).unwrap_or("doppelganger-migrate")
}

fn run(input_path: &str, output_path: &str) -> anyhow::Result<()> {
	let raw = std::fs::read_to_string(input_path)?;
	let data: serde_json::Value = serde_json::from_str(&raw)?;
	let migrated = migrate_value(data);
	let pretty = serde_json::to_string_pretty(&migrated)?;
	std::fs::write(output_path, pretty)?;
	Ok(())
}
