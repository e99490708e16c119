//! HLS master playlist handling: fetch, parse, group by quality, re-assemble.

mod assemble;
mod fetcher;
mod group;
mod master;
mod variant;

pub use assemble::assemble;
pub use fetcher::ManifestFetcher;
pub use group::{QualityGroup, group_by_quality, select_by_bandwidth, sorted_by_bandwidth_desc};
pub use master::{MasterManifest, parse_master};
pub use variant::{QualityKey, Resolution, VariantStream};
