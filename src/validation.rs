//! Input validation utilities.
//!
//! This module provides validation for secret names so obviously malformed
//! requests fail locally instead of burning a round trip to the API.

use crate::constants;
use anyhow::{Context, Result};
use regex::Regex;

/// Validate a secret name according to Secret Manager resource ID rules.
///
/// # Arguments
///
/// * `name` - The secret name to validate
///
/// # Returns
///
/// Returns `Ok(())` if the name is valid, or an error with a descriptive message.
///
/// # Errors
///
/// Returns an error if:
/// - The name is empty
/// - The name exceeds the maximum length
/// - The name contains invalid characters
pub fn validate_secret_name(name: &str) -> Result<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        anyhow::bail!("Secret name cannot be empty");
    }

    if trimmed.len() > constants::validation::MAX_SECRET_NAME_LENGTH {
        anyhow::bail!(
            "Secret name cannot exceed {} characters (got {})",
            constants::validation::MAX_SECRET_NAME_LENGTH,
            trimmed.len()
        );
    }

    let re = Regex::new(constants::validation::VALID_SECRET_NAME_PATTERN)
        .context("Failed to compile validation regex")?;

    if !re.is_match(trimmed) {
        anyhow::bail!(
            "Secret name can only contain letters, numbers, underscores, and hyphens. Got: '{}'",
            trimmed
        );
    }

    Ok(())
}
