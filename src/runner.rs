//! Cancellable execution of the fetch workflow.
//!
//! The workflow runs on a background task while the runner waits on a single
//! race between task completion and termination-signal delivery. Whichever
//! happens first decides the outcome; when a signal wins, the runner cancels
//! the token the workflow carries, then joins the task so the secret client
//! is guaranteed to be released before the cancellation is reported. A
//! second signal while that join is pending is a no-op — the watcher is no
//! longer polled.

use std::future::Future;

use anyhow::{Context, Result};
use tokio::signal::unix::{Signal, SignalKind, signal};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::response::Response;

/// Termination signal observed while the workflow was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermSignal {
    Interrupt,
    Terminate,
}

impl TermSignal {
    pub fn name(self) -> &'static str {
        match self {
            TermSignal::Interrupt => "SIGINT",
            TermSignal::Terminate => "SIGTERM",
        }
    }

    /// Conventional 128+signo exit code.
    pub fn exit_code(self) -> i32 {
        match self {
            TermSignal::Interrupt => 130,
            TermSignal::Terminate => 143,
        }
    }
}

/// How a run ended: the workflow finished (either way), or a signal won.
#[derive(Debug)]
pub enum Outcome {
    Completed(Response),
    Cancelled(TermSignal),
}

impl Outcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Completed(response) => {
                if response.failed {
                    1
                } else {
                    0
                }
            }
            Outcome::Cancelled(sig) => sig.exit_code(),
        }
    }

    pub fn into_response(self) -> Response {
        match self {
            Outcome::Completed(response) => response,
            Outcome::Cancelled(sig) => Response::cancelled(sig.name()),
        }
    }
}

/// Races the fetch workflow against SIGINT/SIGTERM delivery.
pub struct CancellableRunner {
    token: CancellationToken,
}

impl CancellableRunner {
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Token the workflow should observe for cooperative cancellation.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Run the workflow to a single outcome.
    ///
    /// Signal handlers are registered exactly once, before the workflow is
    /// spawned, so an early signal cannot be missed.
    pub async fn run<W>(self, work: W) -> Result<Outcome>
    where
        W: Future<Output = Response> + Send + 'static,
    {
        let interrupt =
            signal(SignalKind::interrupt()).context("Failed to register SIGINT handler")?;
        let terminate =
            signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;

        Ok(self
            .run_until_signal(work, wait_for_signal(interrupt, terminate))
            .await)
    }

    async fn run_until_signal<W, S>(self, work: W, signals: S) -> Outcome
    where
        W: Future<Output = Response> + Send + 'static,
        S: Future<Output = TermSignal>,
    {
        let mut handle = tokio::spawn(work);

        tokio::select! {
            joined = &mut handle => Outcome::Completed(response_from_join(joined)),
            sig = signals => {
                warn!(signal = sig.name(), "termination signal received, cancelling fetch");
                self.token.cancel();
                // Join before reporting: the task owns the client and must
                // release it first. Its result is discarded.
                let _ = handle.await;
                Outcome::Cancelled(sig)
            }
        }
    }
}

impl Default for CancellableRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn response_from_join(joined: std::result::Result<Response, tokio::task::JoinError>) -> Response {
    match joined {
        Ok(response) => response,
        Err(err) => Response::failure(format!("Secret fetch task failed: {err}")),
    }
}

async fn wait_for_signal(mut interrupt: Signal, mut terminate: Signal) -> TermSignal {
    tokio::select! {
        _ = interrupt.recv() => TermSignal::Interrupt,
        _ = terminate.recv() => TermSignal::Terminate,
    }
}
