use reqwest::Client;
use tracing::debug;
use url::Url;

use super::master::{MasterManifest, parse_master};
use crate::{
    error::{Error, Result},
    exchange::HttpExchange,
};

/// Downloads and parses master playlists.
#[derive(Debug, Clone)]
pub struct ManifestFetcher {
    client: Client,
}

impl ManifestFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// GET `url` and parse the body as a master playlist.
    ///
    /// Transport failures and non-2xx statuses are [`Error::Fetch`]; a body
    /// that is not a master playlist is [`Error::Parse`]. Both carry the
    /// exchange.
    pub async fn fetch(&self, url: &str) -> Result<MasterManifest> {
        let source_url = Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))?;
        let request = self
            .client
            .get(source_url.clone())
            .build()
            .map_err(|e| Error::fetch(e.to_string(), None))?;

        let exchange = HttpExchange::send(&self.client, request)
            .await
            .map_err(|(message, exchange)| Error::fetch(message, Some(exchange)))?;
        debug!("{}", exchange);

        if !exchange.is_success() {
            let status = exchange
                .status()
                .map(|s| s.to_string())
                .unwrap_or_default();
            return Err(Error::fetch(
                format!("server returned {status}"),
                Some(exchange),
            ));
        }

        let mut manifest = match parse_master(exchange.body()) {
            Ok(manifest) => manifest,
            Err(e) => return Err(e.with_exchange(exchange)),
        };
        manifest.source_url = Some(source_url);
        debug!(
            "Parsed master playlist with {} variants",
            manifest.variants().len()
        );
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    const MASTER: &str = "#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=1200000,RESOLUTION=640x360\nlo.m3u8\n";

    #[tokio::test]
    async fn fetches_and_parses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/live/master.m3u8"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(MASTER)
                    .insert_header("content-type", "application/vnd.apple.mpegurl"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/live/master.m3u8", server.uri());
        let manifest = ManifestFetcher::new(Client::new()).fetch(&url).await.unwrap();
        assert_eq!(manifest.variants().len(), 1);
        assert_eq!(manifest.variants()[0].uri(), "lo.m3u8");
        assert_eq!(manifest.source_url().map(Url::as_str), Some(url.as_str()));
    }

    #[tokio::test]
    async fn not_found_is_fetch_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_string("gone"))
            .mount(&server)
            .await;

        let url = format!("{}/live/master.m3u8", server.uri());
        let err = ManifestFetcher::new(Client::new()).fetch(&url).await.unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
        let exchange = err.exchange().unwrap();
        assert_eq!(exchange.status().map(|s| s.as_u16()), Some(404));
        assert_eq!(exchange.body(), "gone");
    }

    #[tokio::test]
    async fn garbage_body_is_parse_error_with_exchange() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;

        let url = format!("{}/live/master.m3u8", server.uri());
        let err = ManifestFetcher::new(Client::new()).fetch(&url).await.unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert_eq!(err.exchange().unwrap().body(), "<html></html>");
    }

    #[tokio::test]
    async fn relative_url_is_rejected_without_request() {
        let err = ManifestFetcher::new(Client::new())
            .fetch("master.m3u8")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
