//! # GCP Vault Secret
//!
//! An Ansible module that fetches the latest version of a named secret from
//! Google Cloud Secret Manager.
//!
//! The module reads a JSON parameter file (its sole CLI argument), performs
//! exactly one read-only secret fetch, prints a single JSON response line on
//! stdout, and exits with a code reflecting the outcome. The fetch runs as
//! cancellable background work racing against SIGINT/SIGTERM delivery, and
//! can optionally route all outbound traffic through the private Google API
//! endpoint.
//!
//! ## Modules
//!
//! - [`args`] - Parameter file parsing, validation, and credentials resolution
//! - [`response`] - The JSON response object printed to stdout
//! - [`secrets`] - Secret Manager client
//! - [`transport`] - Outbound connection strategy (private endpoint dialing)
//! - [`runner`] - Signal-aware cancellable execution
//! - [`app`] - The fetch-and-respond workflow
//! - [`app_deps`] - Backend trait seams for testing
//! - [`validation`] - Secret name validation
//! - [`error`] - Error formatting utilities
//! - [`errors`] - Structured error types
//! - [`constants`] - Application constants

pub mod app;
pub mod app_deps;
pub mod args;
pub mod constants;
pub mod error;
pub mod errors;
pub mod response;
pub mod runner;
pub mod secrets;
pub mod transport;
pub mod validation;
