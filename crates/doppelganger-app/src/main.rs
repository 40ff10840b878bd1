//! The `doppelganger` binary: reads a JSON configuration file and serves one
//! HTTP listener per virtual server it describes (spec §6.3).

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use doppelganger::config::Configuration;
use doppelganger_app::server;

/// A declarative HTTP mock server.
#[derive(Parser, Debug)]
#[command(name = "doppelganger")]
struct Cli {
	/// Path to the JSON configuration file.
	config_file: PathBuf,

	/// Log every request body as it is received.
	#[arg(long = "verbose", action = clap::ArgAction::SetTrue)]
	verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
	doppel_core::telemetry::init("info");

	let cli = Cli::parse_from(normalize_args(std::env::args()));

	let servers = match doppelganger::config::load_file(&cli.config_file) {
		Ok(servers) => servers,
		Err(err) => {
			eprintln!("failed to load configuration: {err}");
			return ExitCode::from(2);
		}
	};

	let mut tasks = tokio::task::JoinSet::new();
	for configuration in servers.configurations {
		let verbose = cli.verbose;
		tasks.spawn(async move { run_server(configuration, verbose).await });
	}

	tokio::select! {
		_ = shutdown_signal() => {
			tracing::info!("shutdown signal received");
		}
		_ = drain(&mut tasks) => {
			tracing::warn!("every server task exited on its own");
		}
	}

	ExitCode::SUCCESS
}

async fn drain(tasks: &mut tokio::task::JoinSet<()>) {
	while tasks.join_next().await.is_some() {}
}

async fn run_server(configuration: Configuration, verbose: bool) {
	let port = configuration.port;
	if let Err(err) = serve(configuration, verbose).await {
		tracing::error!(error = %err, port, "server task failed");
	}
}

async fn serve(configuration: Configuration, verbose: bool) -> anyhow::Result<()> {
	let port = configuration.port;
	let router = server::router(&configuration, verbose);
	let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
	tracing::info!(port, "listening");
	axum::serve(listener, router).await?;
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		let _ = tokio::signal::ctrl_c().await;
	};

	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			}
			Err(err) => {
				tracing::error!(error = %err, "failed to install SIGTERM handler");
				std::future::pending::<()>().await;
			}
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}
}

/// `-verbose` is a single-dash synonym for `--verbose`; clap's long flags
/// are always double-dash, so the alternate spelling is normalized before
/// parsing.
fn normalize_args(args: impl Iterator<Item = String>) -> Vec<String> {
	args.map(|arg| if arg == "-verbose" { "--verbose".to_string() } else { arg }).collect()
}
