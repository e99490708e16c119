use std::fmt;

/// Picture size of a variant, as written in its `RESOLUTION` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub width: u64,
    pub height: u64,
}

impl Resolution {
    pub fn new(width: u64, height: u64) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<Resolution> for m3u8_rs::Resolution {
    fn from(r: Resolution) -> Self {
        m3u8_rs::Resolution {
            width: r.width,
            height: r.height,
        }
    }
}

/// Encoding profile identity of a variant.
///
/// Two variants with equal keys belong to the same quality group whatever
/// their URIs. A missing resolution or codec list compares equal to another
/// missing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualityKey {
    pub bandwidth: u64,
    pub resolution: Option<Resolution>,
    pub codecs: Vec<String>,
}

impl fmt::Display for QualityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.bandwidth)?;
        if let Some(resolution) = self.resolution {
            write!(f, ", {resolution}")?;
        }
        if !self.codecs.is_empty() {
            write!(f, ", codecs: {}", self.codecs.join(","))?;
        }
        Ok(())
    }
}

/// One `#EXT-X-STREAM-INF` entry of a master playlist.
///
/// The parsed tag is kept whole so that re-serialising it reproduces every
/// attribute that was read, including ones this crate does not interpret.
#[derive(Debug, Clone)]
pub struct VariantStream {
    inner: m3u8_rs::VariantStream,
}

impl VariantStream {
    pub fn new(
        bandwidth: u64,
        resolution: Option<Resolution>,
        codecs: &[&str],
        uri: impl Into<String>,
    ) -> Self {
        let codecs = (!codecs.is_empty()).then(|| codecs.join(","));
        Self {
            inner: m3u8_rs::VariantStream {
                uri: uri.into(),
                bandwidth,
                codecs,
                resolution: resolution.map(Into::into),
                ..Default::default()
            },
        }
    }

    pub fn bandwidth(&self) -> u64 {
        self.inner.bandwidth
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.inner
            .resolution
            .as_ref()
            .map(|r| Resolution::new(r.width, r.height))
    }

    /// Codec tags in the order they are listed.
    pub fn codecs(&self) -> Vec<String> {
        self.inner
            .codecs
            .as_deref()
            .map(|codecs| {
                codecs
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn uri(&self) -> &str {
        &self.inner.uri
    }

    pub fn quality_key(&self) -> QualityKey {
        QualityKey {
            bandwidth: self.bandwidth(),
            resolution: self.resolution(),
            codecs: self.codecs(),
        }
    }

    /// Rendition group ids (`AUDIO`, `VIDEO`, `SUBTITLES`, `CLOSED-CAPTIONS`)
    /// this variant points at.
    pub(crate) fn group_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = [&self.inner.audio, &self.inner.video, &self.inner.subtitles]
            .into_iter()
            .filter_map(|id| id.as_deref())
            .collect();
        if let Some(m3u8_rs::ClosedCaptionGroupId::GroupId(id)) = &self.inner.closed_captions {
            ids.push(id);
        }
        ids
    }

    pub(crate) fn is_i_frame(&self) -> bool {
        self.inner.is_i_frame
    }

    pub(crate) fn as_m3u8(&self) -> &m3u8_rs::VariantStream {
        &self.inner
    }
}

impl From<m3u8_rs::VariantStream> for VariantStream {
    fn from(inner: m3u8_rs::VariantStream) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codecs_keep_listing_order() {
        let variant = VariantStream::new(
            5_000_000,
            Some(Resolution::new(1920, 1080)),
            &["avc1.64001f", "mp4a.40.2"],
            "hi.m3u8",
        );
        assert_eq!(variant.codecs(), vec!["avc1.64001f", "mp4a.40.2"]);
        assert_eq!(variant.uri(), "hi.m3u8");
        assert_eq!(variant.resolution().unwrap().to_string(), "1920x1080");
    }

    #[test]
    fn keys_ignore_uri_and_match_on_absence() {
        let a = VariantStream::new(800_000, None, &[], "a/index.m3u8");
        let b = VariantStream::new(800_000, None, &[], "b/index.m3u8");
        let c = VariantStream::new(800_000, Some(Resolution::new(640, 360)), &[], "c.m3u8");
        assert_eq!(a.quality_key(), b.quality_key());
        assert_ne!(a.quality_key(), c.quality_key());
        assert!(a.codecs().is_empty());
    }

    #[test]
    fn key_display() {
        let key = VariantStream::new(
            1_200_000,
            Some(Resolution::new(640, 360)),
            &["avc1.42001e", "mp4a.40.2"],
            "lo.m3u8",
        )
        .quality_key();
        assert_eq!(
            key.to_string(),
            "1200000 bps, 640x360, codecs: avc1.42001e,mp4a.40.2"
        );
    }
}
