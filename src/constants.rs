//! Application constants for API endpoints, network behavior, and validation rules.
//!
//! This module contains all constant values used throughout the application,
//! including the private Google API endpoint, connection tuning parameters,
//! and secret name validation constraints.

/// Google API endpoint constants.
pub mod api {
    /// Fixed endpoint routing all Google API traffic when the private
    /// endpoint option is enabled. Covers both the Secret Manager API and
    /// the OAuth2 token exchange, so traffic can stay on a restricted
    /// network path (BGP-routed private Google access) without per-service
    /// DNS overrides.
    pub const PRIVATE_GOOGLE_API_ENDPOINT: &str = "private.googleapis.com:443";
}

/// Network tuning for outbound connections.
pub mod network {
    use std::time::Duration;

    /// Timeout applied to TCP connection establishment.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(60);

    /// TCP keep-alive probe interval on established connections.
    pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(30);
}

/// Credential discovery constants.
pub mod credentials {
    /// Default location of the service account key, used when the parameter
    /// file does not name one. Matches where the playbook stages it.
    pub const DEFAULT_CREDENTIALS_PATH: &str = "/tmp/.ansible/gcp_vault_secret_creds.json";

    /// Sentinel value for `creds_file` selecting ambient (application
    /// default) credentials instead of an explicit key file.
    pub const SYSTEM_CREDENTIALS: &str = "system";
}

/// Secret name validation constants.
pub mod validation {
    /// Maximum length for a secret name (Secret Manager resource ID limit).
    pub const MAX_SECRET_NAME_LENGTH: usize = 255;

    /// Valid characters for secret names (letters, numbers, underscore, hyphen).
    pub const VALID_SECRET_NAME_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";
}
