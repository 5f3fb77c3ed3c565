use anyhow::Result;
use async_trait::async_trait;

use crate::args::ClientConfig;
use crate::secrets;

#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn fetch_latest(&self, name: &str) -> Result<Vec<u8>>;
}

#[async_trait]
pub trait SecretStoreFactory: Send + Sync {
    async fn connect(&self, config: &ClientConfig) -> Result<Box<dyn SecretStore>>;
}

pub struct RealSecretStore {
    inner: secrets::SecretClient,
}

#[async_trait]
impl SecretStore for RealSecretStore {
    async fn fetch_latest(&self, name: &str) -> Result<Vec<u8>> {
        self.inner.fetch_latest(name).await
    }
}

pub struct RealSecretStoreFactory;

#[async_trait]
impl SecretStoreFactory for RealSecretStoreFactory {
    async fn connect(&self, config: &ClientConfig) -> Result<Box<dyn SecretStore>> {
        let client = secrets::SecretClient::connect(config).await?;
        Ok(Box::new(RealSecretStore { inner: client }))
    }
}
