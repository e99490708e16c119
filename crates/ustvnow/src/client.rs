use reqwest::Client;
use rustls::{ClientConfig, crypto::ring};
use rustls_platform_verifier::BuilderVerifierExt;
use std::{sync::Arc, time::Duration};
use tracing::debug;

use crate::error::{Error, Result};

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Settings for the shared HTTP client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub timeout: Duration,
    pub user_agent: String,
    pub proxy: Option<ProxyConfig>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_UA.to_string(),
            proxy: None,
        }
    }
}

pub fn default_client() -> Result<Client> {
    create_client(&ClientOptions::default())
}

/// Build a rustls backed client verified against the platform trust store.
///
/// An unusable proxy URL is an error rather than a silent fallback to a
/// direct connection.
pub fn create_client(options: &ClientOptions) -> Result<Client> {
    let proxy = options.proxy.as_ref().map(build_proxy).transpose()?;

    let provider = Arc::new(ring::default_provider());
    let tls_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .with_platform_verifier()?
        .with_no_client_auth();

    let mut builder = Client::builder()
        .use_preconfigured_tls(tls_config)
        .user_agent(options.user_agent.as_str())
        .timeout(options.timeout);

    if let Some(proxy) = proxy {
        builder = builder.proxy(proxy);
    }

    Ok(builder.build()?)
}

fn build_proxy(config: &ProxyConfig) -> Result<reqwest::Proxy> {
    let mut proxy = reqwest::Proxy::all(&config.url)
        .map_err(|e| Error::InvalidUrl(format!("proxy '{}': {e}", config.url)))?;
    if let (Some(username), Some(password)) = (&config.username, &config.password) {
        proxy = proxy.basic_auth(username, password);
    }
    debug!("Routing requests through proxy {}", config.url);
    Ok(proxy)
}
