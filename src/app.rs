//! The fetch-and-respond workflow.
//!
//! Runs as the background half of the cancellable pair: load the parameter
//! file, build the client, fetch the secret, and turn whatever happened into
//! a [`Response`]. The secret client is owned entirely by this workflow, so
//! it is released on every exit path, including a cancellation-triggered
//! unwind.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::app_deps::{RealSecretStoreFactory, SecretStoreFactory};
use crate::args::ModuleArgs;
use crate::error::format_error_chain;
use crate::errors::{ArgsError, CancelledError};
use crate::response::Response;

/// Run the workflow against the real Secret Manager backend.
pub async fn produce_response(args_file: Option<PathBuf>, cancel: CancellationToken) -> Response {
    produce_response_with(&RealSecretStoreFactory, args_file, cancel).await
}

/// Run the workflow with an injected backend factory.
///
/// Cancellation is cooperative: when the token fires first, the in-flight
/// fetch future is dropped, which unwinds the network call and releases the
/// client before this function returns. The caller discards the returned
/// response in that case and reports the cancellation itself.
pub async fn produce_response_with<F>(
    factory: &F,
    args_file: Option<PathBuf>,
    cancel: CancellationToken,
) -> Response
where
    F: SecretStoreFactory,
{
    tokio::select! {
        _ = cancel.cancelled() => Response::failure(CancelledError.to_string()),
        response = fetch_and_respond(factory, args_file) => response,
    }
}

async fn fetch_and_respond<F>(factory: &F, args_file: Option<PathBuf>) -> Response
where
    F: SecretStoreFactory,
{
    match fetch_secret(factory, args_file).await {
        Ok(payload) => Response::success(payload),
        Err(err) => Response::failure(format_error_chain(&err)),
    }
}

async fn fetch_secret<F>(factory: &F, args_file: Option<PathBuf>) -> Result<Vec<u8>>
where
    F: SecretStoreFactory,
{
    let path = args_file.ok_or(ArgsError::MissingArgsFile)?;
    let args = ModuleArgs::from_file(&path)?;
    let config = args.resolve()?;

    let store = factory
        .connect(&config)
        .await
        .context("Could not initialize Google API client")?;

    store
        .fetch_latest(&args.name)
        .await
        .context("Could not retrieve secret data")
}
