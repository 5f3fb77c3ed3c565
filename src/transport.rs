//! Outbound connection strategy for Google API traffic.
//!
//! When the private endpoint option is enabled, every outbound connection
//! (Secret Manager API calls and the OAuth2 token exchange alike) must land
//! on `private.googleapis.com:443` instead of the address DNS would hand out
//! for the requested host. The override lives at the DNS resolution layer:
//! the connector still sees the original URI, so SNI and certificate
//! validation keep using the requested hostname, only the TCP connection is
//! redirected.

use std::str::FromStr;
use std::task::{Context, Poll};

use anyhow::{Context as _, Result};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::connect::dns::{GaiResolver, Name};
use tower::Service;

use crate::constants::api::PRIVATE_GOOGLE_API_ENDPOINT;
use crate::constants::network::{CONNECT_TIMEOUT, KEEPALIVE_INTERVAL};

/// HTTPS connector shared by the Secret Manager hub and the OAuth2 client.
pub type GoogleConnector = HttpsConnector<HttpConnector<EndpointResolver>>;

/// DNS resolution strategy selected by configuration.
///
/// The default variant resolves names normally via getaddrinfo. The fixed
/// variant discards the requested name and resolves the private Google API
/// endpoint instead, which is how all traffic ends up on the private path.
#[derive(Clone, Debug)]
pub struct EndpointResolver<R = GaiResolver> {
    inner: R,
    fixed: Option<Name>,
}

impl EndpointResolver {
    /// Normal resolution of whatever host the request names.
    pub fn system() -> Self {
        Self {
            inner: GaiResolver::new(),
            fixed: None,
        }
    }

    /// Fixed resolution of the private Google API endpoint.
    ///
    /// The request's port is kept as-is; every routed service and the
    /// private endpoint listen on 443.
    pub fn private_endpoint() -> Result<Self> {
        let (host, _port) = PRIVATE_GOOGLE_API_ENDPOINT
            .rsplit_once(':')
            .context("private endpoint must be in host:port form")?;
        let fixed = Name::from_str(host)
            .map_err(|err| anyhow::anyhow!("invalid private endpoint host '{host}': {err}"))?;
        Ok(Self {
            inner: GaiResolver::new(),
            fixed: Some(fixed),
        })
    }
}

#[cfg(test)]
impl<R> EndpointResolver<R> {
    fn with_resolver(inner: R, fixed: Option<Name>) -> Self {
        Self { inner, fixed }
    }
}

impl<R> Service<Name> for EndpointResolver<R>
where
    R: Service<Name>,
{
    type Response = R::Response;
    type Error = R::Error;
    type Future = R::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, name: Name) -> Self::Future {
        match &self.fixed {
            Some(endpoint) => self.inner.call(endpoint.clone()),
            None => self.inner.call(name),
        }
    }
}

/// Build the HTTPS connector carrying the given resolution strategy,
/// with the connect timeout and keep-alive probing applied underneath TLS.
pub fn https_connector(resolver: EndpointResolver) -> Result<GoogleConnector> {
    let mut http = HttpConnector::new_with_resolver(resolver);
    http.enforce_http(false);
    http.set_connect_timeout(Some(CONNECT_TIMEOUT));
    http.set_keepalive(Some(KEEPALIVE_INTERVAL));

    let connector = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .context("Failed to load native TLS roots")?
        .https_or_http()
        .enable_http2()
        .wrap_connector(http);

    Ok(connector)
}
