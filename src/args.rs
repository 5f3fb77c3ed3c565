//! Module argument parsing and validation.
//!
//! Ansible hands the module a single JSON parameter file. This module loads
//! it, validates the mandatory fields, resolves which credentials to use,
//! and recovers the project ID from the credentials file when the caller
//! omitted it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::constants::credentials::{DEFAULT_CREDENTIALS_PATH, SYSTEM_CREDENTIALS};
use crate::errors::{ArgsError, CredentialsError, ValidationError};
use crate::validation;

/// Input parameters provided by the playbook task.
#[derive(Debug, Deserialize)]
pub struct ModuleArgs {
    /// Name of the secret to fetch.
    #[serde(default)]
    pub name: String,

    /// GCP project ID. Recovered from the credentials file when omitted.
    #[serde(default)]
    pub project_id: Option<String>,

    /// Path to a service account key file, or `"system"` for ambient
    /// (application default) credentials.
    #[serde(default, rename = "creds_file")]
    pub credentials_file: Option<String>,

    /// Route all requests via the private Google API endpoint.
    /// Don't use if not sure.
    #[serde(default, rename = "private_google_api_endpoint")]
    pub use_private_endpoint: bool,
}

/// Where the Secret Manager client gets its OAuth2 credentials.
///
/// The source is passed explicitly into client construction; the process
/// never mutates `GOOGLE_APPLICATION_CREDENTIALS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsSource {
    /// Explicit service account key file.
    File(PathBuf),
    /// Ambient application-default credentials (metadata server, gcloud).
    Ambient,
}

/// Everything client construction needs, resolved from [`ModuleArgs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub project_id: String,
    pub credentials: CredentialsSource,
    pub use_private_endpoint: bool,
}

impl ModuleArgs {
    /// Load and validate module arguments from a JSON parameter file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| ArgsError::Unreadable {
            path: path.display().to_string(),
            source,
        })?;

        let args: ModuleArgs =
            serde_json::from_str(&text).map_err(|source| ArgsError::InvalidJson {
                path: path.display().to_string(),
                source,
            })?;

        args.validate()?;
        Ok(args)
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        validation::validate_secret_name(&self.name)
            .map_err(|err| ValidationError::SecretName(err.to_string()))?;
        Ok(())
    }

    /// Effective project ID parameter, treating an empty string as absent.
    fn project_id_param(&self) -> Option<&str> {
        self.project_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Which credentials the client should use.
    ///
    /// An absent or empty `creds_file` falls back to the default staged key
    /// path; the `"system"` sentinel selects ambient credentials.
    pub fn credentials(&self) -> CredentialsSource {
        match self.credentials_file.as_deref() {
            None | Some("") => CredentialsSource::File(PathBuf::from(DEFAULT_CREDENTIALS_PATH)),
            Some(SYSTEM_CREDENTIALS) => CredentialsSource::Ambient,
            Some(path) => CredentialsSource::File(PathBuf::from(path)),
        }
    }

    /// Resolve the final client configuration.
    ///
    /// When `project_id` is omitted it is read out of the credentials file.
    /// With `"system"` credentials there is no file to consult, so a missing
    /// project ID is a validation failure before any I/O happens.
    pub fn resolve(&self) -> Result<ClientConfig> {
        let credentials = self.credentials();

        let project_id = match (self.project_id_param(), &credentials) {
            (Some(id), _) => id.to_string(),
            (None, CredentialsSource::Ambient) => {
                return Err(ValidationError::ProjectIdRequired.into());
            }
            (None, CredentialsSource::File(path)) => project_id_from_credentials(path)?,
        };

        Ok(ClientConfig {
            project_id,
            credentials,
            use_private_endpoint: self.use_private_endpoint,
        })
    }
}

/// Read the `project_id` field out of a service account key file.
fn project_id_from_credentials(path: &Path) -> Result<String> {
    #[derive(Deserialize)]
    struct CredentialsProject {
        #[serde(default)]
        project_id: Option<String>,
    }

    let text = fs::read_to_string(path).map_err(|source| CredentialsError::Unreadable {
        path: path.display().to_string(),
        source,
    })?;

    let creds: CredentialsProject =
        serde_json::from_str(&text).map_err(|_| CredentialsError::InvalidJson {
            path: path.display().to_string(),
        })?;

    creds
        .project_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| CredentialsError::MissingProjectId.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_args(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("args.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_from_file_full_args() {
        let dir = TempDir::new().unwrap();
        let path = write_args(
            &dir,
            r#"{"name":"db-password","project_id":"proj-1","creds_file":"system","private_google_api_endpoint":true}"#,
        );

        let args = ModuleArgs::from_file(&path).unwrap();
        assert_eq!(args.name, "db-password");
        assert_eq!(args.project_id.as_deref(), Some("proj-1"));
        assert!(args.use_private_endpoint);
        assert_eq!(args.credentials(), CredentialsSource::Ambient);
    }

    #[test]
    fn test_from_file_missing_name() {
        let dir = TempDir::new().unwrap();
        let path = write_args(&dir, r#"{"project_id":"proj-1"}"#);

        let err = ModuleArgs::from_file(&path).unwrap_err();
        assert_eq!(err.to_string(), "Parameter 'name' is mandatory");
    }

    #[test]
    fn test_from_file_invalid_secret_name() {
        let dir = TempDir::new().unwrap();
        let path = write_args(&dir, r#"{"name":"not a/valid name"}"#);

        let err = ModuleArgs::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Secret name validation failed"));
    }

    #[test]
    fn test_from_file_not_json() {
        let dir = TempDir::new().unwrap();
        let path = write_args(&dir, "name: yaml-not-json");

        let err = ModuleArgs::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));
    }

    #[test]
    fn test_from_file_unreadable() {
        let err = ModuleArgs::from_file(Path::new("/nonexistent/args.json")).unwrap_err();
        assert!(err.to_string().contains("Could not read parameters file"));
    }

    #[test]
    fn test_default_credentials_path() {
        let args: ModuleArgs = serde_json::from_str(r#"{"name":"s"}"#).unwrap();
        assert_eq!(
            args.credentials(),
            CredentialsSource::File(PathBuf::from(DEFAULT_CREDENTIALS_PATH))
        );
    }

    #[test]
    fn test_explicit_credentials_path() {
        let args: ModuleArgs =
            serde_json::from_str(r#"{"name":"s","creds_file":"/etc/key.json"}"#).unwrap();
        assert_eq!(
            args.credentials(),
            CredentialsSource::File(PathBuf::from("/etc/key.json"))
        );
    }

    #[test]
    fn test_resolve_system_without_project_id_fails() {
        let args: ModuleArgs =
            serde_json::from_str(r#"{"name":"s","creds_file":"system"}"#).unwrap();

        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("'project_id' is mandatory"));
    }

    #[test]
    fn test_resolve_project_id_from_credentials_file() {
        let dir = TempDir::new().unwrap();
        let creds_path = dir.path().join("key.json");
        fs::write(&creds_path, r#"{"type":"service_account","project_id":"from-creds"}"#).unwrap();

        let args: ModuleArgs = serde_json::from_str(&format!(
            r#"{{"name":"s","creds_file":"{}"}}"#,
            creds_path.display()
        ))
        .unwrap();

        let config = args.resolve().unwrap();
        assert_eq!(config.project_id, "from-creds");
        assert_eq!(config.credentials, CredentialsSource::File(creds_path));
    }

    #[test]
    fn test_resolve_explicit_project_id_wins() {
        let dir = TempDir::new().unwrap();
        let creds_path = dir.path().join("key.json");
        fs::write(&creds_path, r#"{"project_id":"from-creds"}"#).unwrap();

        let args: ModuleArgs = serde_json::from_str(&format!(
            r#"{{"name":"s","project_id":"explicit","creds_file":"{}"}}"#,
            creds_path.display()
        ))
        .unwrap();

        assert_eq!(args.resolve().unwrap().project_id, "explicit");
    }

    #[test]
    fn test_resolve_empty_project_id_treated_as_absent() {
        let args: ModuleArgs =
            serde_json::from_str(r#"{"name":"s","project_id":"","creds_file":"system"}"#).unwrap();
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_resolve_credentials_file_missing_project_id() {
        let dir = TempDir::new().unwrap();
        let creds_path = dir.path().join("key.json");
        fs::write(&creds_path, r#"{"type":"service_account"}"#).unwrap();

        let args: ModuleArgs = serde_json::from_str(&format!(
            r#"{{"name":"s","creds_file":"{}"}}"#,
            creds_path.display()
        ))
        .unwrap();

        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("missing in credentials file"));
    }

    #[test]
    fn test_resolve_credentials_file_not_json() {
        let dir = TempDir::new().unwrap();
        let creds_path = dir.path().join("key.json");
        fs::write(&creds_path, "not json").unwrap();

        let args: ModuleArgs = serde_json::from_str(&format!(
            r#"{{"name":"s","creds_file":"{}"}}"#,
            creds_path.display()
        ))
        .unwrap();

        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("is not valid JSON"));
    }

    #[test]
    fn test_resolve_credentials_file_unreadable() {
        let args: ModuleArgs =
            serde_json::from_str(r#"{"name":"s","creds_file":"/nonexistent/key.json"}"#).unwrap();

        let err = args.resolve().unwrap_err();
        assert!(err.to_string().contains("Could not read credentials file"));
    }
}
