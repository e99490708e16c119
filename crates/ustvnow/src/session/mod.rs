//! Authenticated calls against the provider's JSON API.
//!
//! The client holds no session state: the token returned by
//! [`SessionClient::authenticate`] is threaded through the later calls by the
//! caller.

mod channel;
pub(crate) mod models;

pub use channel::Channel;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::{fmt, sync::LazyLock};
use tracing::debug;
use url::Url;

use crate::{
    error::{Error, Result},
    exchange::HttpExchange,
};
use models::{ChannelListResponse, LoginResponse, StreamResponse};

pub const DEFAULT_BASE_URL: &str = "https://m.ustvnow.com/";

static DEFAULT_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"));

/// Opaque login credential. Valid for the lifetime of the process.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

type ErrorCtor = fn(String, Option<HttpExchange>) -> Error;

#[derive(Debug, Clone)]
pub struct SessionClient {
    client: Client,
    base_url: Url,
}

impl SessionClient {
    const DEVICE: &'static str = "gtv";
    const LOGIN_PATH: &'static str = "gtv/1/live/login";
    const CHANNELS_PATH: &'static str = "gtv/1/live/listchannels";
    const STREAM_PATH: &'static str = "stream/1/live/view";

    pub fn new(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE.clone(),
        }
    }

    /// Target another API host, e.g. a mirror or a local test server.
    pub fn with_base_url(client: Client, base_url: &str) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Log in and return the session token.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<SessionToken> {
        let query = [
            ("username", username),
            ("password", password),
            ("device", Self::DEVICE),
            ("redir", "0"),
        ];
        let (data, exchange) = self
            .get_json::<LoginResponse>(Self::LOGIN_PATH, &query, Error::auth)
            .await?;

        match data.token {
            Some(token) if !token.is_empty() => Ok(SessionToken(token)),
            _ => Err(Error::auth(
                "no token was returned".to_string(),
                Some(exchange),
            )),
        }
    }

    pub async fn list_channels(&self, token: &SessionToken) -> Result<Vec<Channel>> {
        let query = [("token", token.expose())];
        let (data, _) = self
            .get_json::<ChannelListResponse>(Self::CHANNELS_PATH, &query, Error::api)
            .await?;

        let channels: Vec<Channel> = data
            .results
            .streamnames
            .into_iter()
            .map(|raw| Channel::from_stream_name(raw, &self.base_url))
            .collect();
        debug!(
            "Got {} channels ({} available)",
            channels.len(),
            channels.iter().filter(|c| c.available).count()
        );
        Ok(channels)
    }

    /// Resolve a channel code to the absolute URL of its master playlist.
    pub async fn resolve_stream_url(
        &self,
        token: &SessionToken,
        channel_code: &str,
    ) -> Result<String> {
        let query = [("token", token.expose()), ("scode", channel_code)];
        let (data, exchange) = self
            .get_json::<StreamResponse>(Self::STREAM_PATH, &query, Error::api)
            .await?;

        let stream = match data.stream {
            Some(stream) if !stream.is_empty() => stream,
            _ => {
                return Err(Error::api(
                    format!("no stream url returned for channel '{channel_code}'"),
                    Some(exchange),
                ));
            }
        };
        if let Err(e) = Url::parse(&stream) {
            return Err(Error::api(
                format!("stream url '{stream}' is not absolute: {e}"),
                Some(exchange),
            ));
        }
        debug!("Playlist url for {}: {}", channel_code, stream);
        Ok(stream)
    }

    /// Issue one GET and decode its JSON body, mapping every failure through `fail`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        fail: ErrorCtor,
    ) -> Result<(T, HttpExchange)> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| Error::InvalidUrl(format!("{path}: {e}")))?;
        let request = self
            .client
            .get(url)
            .query(query)
            .build()
            .map_err(|e| fail(e.to_string(), None))?;

        let exchange = HttpExchange::send(&self.client, request)
            .await
            .map_err(|(message, exchange)| fail(message, Some(exchange)))?;
        debug!("{}", exchange);

        if !exchange.is_success() {
            let status = exchange
                .status()
                .map(|s| s.to_string())
                .unwrap_or_default();
            return Err(fail(format!("server returned {status}"), Some(exchange)));
        }

        match serde_json::from_str::<T>(exchange.body()) {
            Ok(data) => Ok((data, exchange)),
            Err(e) => Err(fail(
                format!("unexpected response body: {e}"),
                Some(exchange),
            )),
        }
    }
}
