//! Secret Manager client.
//!
//! Wraps the Secret Manager REST hub behind the one operation this module
//! performs: read the latest version of a named secret. Construction wires
//! in the credentials source and the endpoint resolution strategy, so the
//! same dialing behavior covers both the API channel and the OAuth2 token
//! exchange.

use anyhow::{Context, Result};
use google_secretmanager1::{SecretManager, hyper_util};
use tracing::debug;
use yup_oauth2::authenticator::{ApplicationDefaultCredentialsTypes, Authenticator};
use yup_oauth2::{
    ApplicationDefaultCredentialsAuthenticator, ApplicationDefaultCredentialsFlowOpts,
    ServiceAccountAuthenticator,
};

use crate::args::{ClientConfig, CredentialsSource};
use crate::errors::{CredentialsError, SecretError};
use crate::transport::{self, EndpointResolver, GoogleConnector};

/// Secret Manager client bound to one project.
pub struct SecretClient {
    hub: SecretManager<GoogleConnector>,
    project_id: String,
}

impl SecretClient {
    /// Build an authenticated client from the resolved module configuration.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let resolver = if config.use_private_endpoint {
            EndpointResolver::private_endpoint()?
        } else {
            EndpointResolver::system()
        };
        let connector = transport::https_connector(resolver)?;

        debug!(
            project_id = %config.project_id,
            private_endpoint = config.use_private_endpoint,
            "initializing Secret Manager client"
        );

        let auth = build_authenticator(&config.credentials, connector.clone()).await?;

        let client =
            hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
                .build(connector);
        let hub = SecretManager::new(client, auth);

        Ok(Self {
            hub,
            project_id: config.project_id.clone(),
        })
    }

    /// Test constructor over a preconfigured hub.
    #[doc(hidden)]
    pub fn with_hub(hub: SecretManager<GoogleConnector>, project_id: String) -> Self {
        Self { hub, project_id }
    }

    /// Fetch the raw payload of the latest version of the named secret.
    pub async fn fetch_latest(&self, name: &str) -> Result<Vec<u8>> {
        let resource = format!(
            "projects/{}/secrets/{}/versions/latest",
            self.project_id, name
        );

        debug!(resource = %resource, "accessing secret version");

        let (_, response) = self
            .hub
            .projects()
            .secrets_versions_access(&resource)
            .doit()
            .await
            .map_err(|err| SecretError::Api(err.to_string()))?;

        let data = response
            .payload
            .and_then(|payload| payload.data)
            .ok_or(SecretError::MissingPayload)?;

        Ok(data)
    }
}

/// Build the OAuth2 authenticator over its own client so the token exchange
/// uses the same dialing strategy as the API channel.
async fn build_authenticator(
    credentials: &CredentialsSource,
    connector: GoogleConnector,
) -> Result<Authenticator<GoogleConnector>> {
    let oauth_client: hyper_util::client::legacy::Client<GoogleConnector, String> =
        hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
            .build(connector);
    let client = oauth_client;

    match credentials {
        CredentialsSource::File(path) => {
            let key = yup_oauth2::read_service_account_key(path).await.map_err(|source| {
                CredentialsError::Unreadable {
                    path: path.display().to_string(),
                    source,
                }
            })?;
            ServiceAccountAuthenticator::with_client(key, client)
                .build()
                .await
                .context("Failed to build service account authenticator")
        }
        CredentialsSource::Ambient => {
            let opts = ApplicationDefaultCredentialsFlowOpts::default();
            match ApplicationDefaultCredentialsAuthenticator::with_client(opts, client).await {
                ApplicationDefaultCredentialsTypes::ServiceAccount(builder) => {
                    builder.build().await
                }
                ApplicationDefaultCredentialsTypes::InstanceMetadata(builder) => {
                    builder.build().await
                }
            }
            .context("Failed to build application default credentials authenticator")
        }
    }
}
