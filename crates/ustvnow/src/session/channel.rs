use serde::Serialize;
use std::fmt;
use url::Url;

use super::models::StreamName;

/// A live channel from the provider's directory. Identified by `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub name: String,
    pub logo_url: String,
    pub code: String,
    pub callsign: String,
    pub available: bool,
}

impl Channel {
    pub(crate) fn from_stream_name(raw: StreamName, base_url: &Url) -> Self {
        let logo_url = format!(
            "{}/{}",
            base_url.as_str().trim_end_matches('/'),
            raw.img.trim_start_matches('/')
        );
        Self {
            name: raw.sname,
            logo_url,
            code: raw.scode,
            callsign: raw.callsign,
            available: raw.t.is_set(),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.code, self.name, self.callsign)
    }
}
