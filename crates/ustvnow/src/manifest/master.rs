use m3u8_rs::{AlternativeMedia, Playlist};
use url::Url;

use super::variant::VariantStream;
use crate::error::{Error, Result};

const HEADER: &str = "#EXTM3U";
const STREAM_INF: &str = "#EXT-X-STREAM-INF:";

/// A parsed HLS master playlist. Immutable once parsed.
#[derive(Debug, Clone)]
pub struct MasterManifest {
    pub(crate) version: Option<usize>,
    pub(crate) independent_segments: bool,
    pub(crate) renditions: Vec<AlternativeMedia>,
    pub(crate) variants: Vec<VariantStream>,
    pub(crate) source_url: Option<Url>,
}

impl MasterManifest {
    /// Variant entries in document order.
    pub fn variants(&self) -> &[VariantStream] {
        &self.variants
    }

    pub fn version(&self) -> Option<usize> {
        self.version
    }

    pub fn independent_segments(&self) -> bool {
        self.independent_segments
    }

    /// `#EXT-X-MEDIA` renditions declared by the playlist.
    pub fn renditions(&self) -> &[AlternativeMedia] {
        &self.renditions
    }

    /// Where the playlist was downloaded from, if it was fetched.
    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }
}

/// Parse `body` as an HLS master playlist.
///
/// Fails when the `#EXTM3U` header is missing, when the document is a media
/// playlist, or when a variant entry has no integer `BANDWIDTH`.
/// `#EXT-X-I-FRAME-STREAM-INF` entries are not kept.
pub fn parse_master(body: &str) -> Result<MasterManifest> {
    let body = body.strip_prefix('\u{feff}').unwrap_or(body).trim_start();
    if !body.starts_with(HEADER) {
        return Err(Error::parse(
            format!("missing {HEADER} header"),
            None,
        ));
    }

    let declared = check_stream_entries(body).map_err(|message| Error::parse(message, None))?;

    let playlist = m3u8_rs::parse_playlist_res(body.as_bytes()).map_err(|e| {
        let message: String = e.to_string().chars().take(200).collect();
        Error::parse(message, None)
    })?;

    let master = match playlist {
        Playlist::MasterPlaylist(master) => master,
        Playlist::MediaPlaylist(_) => {
            return Err(Error::parse(
                "expected a master playlist, found a media playlist".to_string(),
                None,
            ));
        }
    };

    let variants: Vec<VariantStream> = master
        .variants
        .into_iter()
        .map(VariantStream::from)
        .filter(|v| !v.is_i_frame())
        .collect();

    if variants.len() != declared {
        return Err(Error::parse(
            format!(
                "{declared} variant entries declared but {} could be read",
                variants.len()
            ),
            None,
        ));
    }

    Ok(MasterManifest {
        version: master.version,
        independent_segments: master.independent_segments,
        renditions: master.alternatives,
        variants,
        source_url: None,
    })
}

/// Count `#EXT-X-STREAM-INF` entries, checking each carries a valid `BANDWIDTH`.
fn check_stream_entries(body: &str) -> std::result::Result<usize, String> {
    let mut count = 0;
    for (line_no, line) in body.lines().enumerate() {
        let Some(attributes) = line.trim().strip_prefix(STREAM_INF) else {
            continue;
        };
        let bandwidth = split_attributes(attributes)
            .find_map(|(name, value)| (name == "BANDWIDTH").then_some(value))
            .ok_or_else(|| format!("line {}: variant without BANDWIDTH", line_no + 1))?;
        bandwidth.parse::<u64>().map_err(|_| {
            format!(
                "line {}: BANDWIDTH '{}' is not an integer",
                line_no + 1,
                bandwidth
            )
        })?;
        count += 1;
    }
    Ok(count)
}

/// Split an attribute list into `(NAME, value)` pairs, honouring quoted commas.
fn split_attributes(list: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut pieces = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                pieces.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    pieces.push(&list[start..]);

    pieces.into_iter().filter_map(|piece| {
        let (name, value) = piece.split_once('=')?;
        Some((name.trim(), value.trim()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER: &str = "#EXTM3U
#EXT-X-VERSION:3
#EXT-X-INDEPENDENT-SEGMENTS
#EXT-X-STREAM-INF:BANDWIDTH=5000000,RESOLUTION=1920x1080,CODECS=\"avc1.64001f,mp4a.40.2\"
hi.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=1200000,RESOLUTION=640x360,CODECS=\"avc1.42001e,mp4a.40.2\"
lo.m3u8
";

    #[test]
    fn parses_variants_in_order() {
        let manifest = parse_master(MASTER).unwrap();
        assert_eq!(manifest.version(), Some(3));
        assert!(manifest.independent_segments());
        assert!(manifest.source_url().is_none());

        let variants = manifest.variants();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].bandwidth(), 5_000_000);
        assert_eq!(variants[0].uri(), "hi.m3u8");
        assert_eq!(variants[0].codecs(), vec!["avc1.64001f", "mp4a.40.2"]);
        assert_eq!(variants[1].bandwidth(), 1_200_000);
        assert_eq!(variants[1].resolution().unwrap().to_string(), "640x360");
        assert_eq!(variants[1].uri(), "lo.m3u8");
    }

    #[test]
    fn optional_attributes_may_be_missing() {
        let manifest = parse_master("#EXTM3U\n#EXT-X-STREAM-INF:BANDWIDTH=64000\naudio.m3u8\n").unwrap();
        let variant = &manifest.variants()[0];
        assert_eq!(variant.bandwidth(), 64_000);
        assert!(variant.resolution().is_none());
        assert!(variant.codecs().is_empty());
    }

    #[test]
    fn rejects_missing_header() {
        let err = parse_master("#EXT-X-STREAM-INF:BANDWIDTH=1\nlo.m3u8\n").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("#EXTM3U"));
    }

    #[test]
    fn rejects_variant_without_bandwidth() {
        let body = "#EXTM3U\n#EXT-X-STREAM-INF:RESOLUTION=640x360,CODECS=\"avc1.42001e,mp4a.40.2\"\nlo.m3u8\n";
        let err = parse_master(body).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("BANDWIDTH"));
    }

    #[test]
    fn average_bandwidth_is_not_bandwidth() {
        let body = "#EXTM3U\n#EXT-X-STREAM-INF:AVERAGE-BANDWIDTH=900000\nlo.m3u8\n";
        assert!(parse_master(body).is_err());
    }

    #[test]
    fn rejects_media_playlist() {
        let body = "#EXTM3U\n#EXT-X-TARGETDURATION:6\n#EXTINF:6.0,\nseg0.ts\n";
        let err = parse_master(body).unwrap_err();
        assert!(err.to_string().contains("media playlist"));
    }

    #[test]
    fn splits_quoted_attribute_lists() {
        let pairs: Vec<_> =
            split_attributes("BANDWIDTH=1,CODECS=\"a,b\",RESOLUTION=2x2").collect();
        assert_eq!(
            pairs,
            vec![
                ("BANDWIDTH", "1"),
                ("CODECS", "\"a,b\""),
                ("RESOLUTION", "2x2")
            ]
        );
    }
}
