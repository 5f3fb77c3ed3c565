use thiserror::Error;

/// Errors that can occur while loading the module argument file.
#[derive(Error, Debug)]
pub enum ArgsError {
    #[error("No argument file provided")]
    MissingArgsFile,
    #[error("Could not read parameters file {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Parameters file {path} is not valid JSON")]
    InvalidJson {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur during parameter validation.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Parameter 'name' is mandatory")]
    MissingName,
    #[error("Secret name validation failed: {0}")]
    SecretName(String),
    #[error("Parameter 'project_id' is mandatory when 'system' credentials are used")]
    ProjectIdRequired,
}

/// Errors that can occur while reading the credentials file.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("Could not read credentials file {path}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Credentials file {path} is not valid JSON")]
    InvalidJson { path: String },
    #[error("Parameter 'project_id' is not specified and is missing in credentials file")]
    MissingProjectId,
}

/// Errors that can occur when talking to the Secret Manager backend.
///
/// The backend's error text is carried through unmodified so the response
/// message stays useful for diagnostics.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Secret Manager request failed: {0}")]
    Api(String),
    #[error("secret version response has no payload")]
    MissingPayload,
}

/// Raised when a termination signal interrupts the fetch before it completes.
#[derive(Error, Debug)]
#[error("operation cancelled by termination signal")]
pub struct CancelledError;
