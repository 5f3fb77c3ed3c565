use std::path::PathBuf;

use clap::Parser;

use gcp_vault_secret::app;
use gcp_vault_secret::error::format_error_chain;
use gcp_vault_secret::response::Response;
use gcp_vault_secret::runner::{CancellableRunner, Outcome};

/// Ansible module: fetch the latest version of a secret from Google Cloud
/// Secret Manager.
#[derive(Parser)]
#[command(name = "gcp_vault_secret", version)]
struct Cli {
    /// Path to the JSON parameter file supplied by Ansible.
    args_file: Option<PathBuf>,
}

fn init_tracing() {
    // Diagnostics go to stderr only; stdout is reserved for the one JSON
    // response line.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let runner = CancellableRunner::new();
    let cancel = runner.cancellation_token();

    let outcome = match runner.run(app::produce_response(cli.args_file, cancel)).await {
        Ok(outcome) => outcome,
        Err(err) => Outcome::Completed(Response::failure(format_error_chain(&err))),
    };

    let exit_code = outcome.exit_code();
    println!("{}", outcome.into_response().render());
    std::process::exit(exit_code);
}
