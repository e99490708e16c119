//! Client library for the USTVnow live TV service.
//!
//! The crate covers the authenticated API handshake (login, channel directory,
//! stream URL) and the HLS side of the pipeline: fetching a channel's master
//! playlist, grouping its variants by encoding profile and writing a new master
//! playlist that only references the selected variants.
//!
//! ```no_run
//! # async fn run() -> ustvnow::Result<()> {
//! use ustvnow::{ManifestFetcher, SessionClient, assemble, default_client, group_by_quality, select_by_bandwidth};
//!
//! let client = default_client()?;
//! let session = SessionClient::new(client.clone());
//! let token = session.authenticate("user@example.com", "hunter2").await?;
//! let channels = session.list_channels(&token).await?;
//! let url = session.resolve_stream_url(&token, &channels[0].code).await?;
//!
//! let manifest = ManifestFetcher::new(client).fetch(&url).await?;
//! let groups = group_by_quality(&manifest);
//! let group = select_by_bandwidth(&groups, groups[0].key.bandwidth)?;
//! let output = assemble(&group.variants)?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod exchange;
pub mod manifest;
pub mod session;

pub use client::{ClientOptions, ProxyConfig, create_client, default_client};
pub use error::{Error, Result};
pub use exchange::{HttpExchange, RecordedRequest, RecordedResponse};
pub use manifest::{
    ManifestFetcher, MasterManifest, QualityGroup, QualityKey, Resolution, VariantStream,
    assemble, group_by_quality, parse_master, select_by_bandwidth, sorted_by_bandwidth_desc,
};
pub use session::{Channel, SessionClient, SessionToken};
