use m3u8_rs::MasterPlaylist;
use tracing::debug;

use super::{master::MasterManifest, variant::VariantStream};
use crate::error::{Error, Result};

/// Write a master playlist containing exactly `selected`, in the given order.
///
/// Each entry is re-emitted with the attributes it was parsed with and its URI
/// unchanged. An empty selection is an error and produces no output.
pub fn assemble(selected: &[VariantStream]) -> Result<String> {
    ensure_selection(selected)?;
    render(&MasterPlaylist {
        variants: selected.iter().map(|v| v.as_m3u8().clone()).collect(),
        ..Default::default()
    })
}

impl MasterManifest {
    /// Like [`assemble`], but also carries over the version tag, the
    /// independent-segments flag and the `#EXT-X-MEDIA` renditions the
    /// selected variants refer to.
    pub fn assemble_subset(&self, selected: &[VariantStream]) -> Result<String> {
        ensure_selection(selected)?;

        let referenced: Vec<&str> = selected.iter().flat_map(|v| v.group_ids()).collect();
        let alternatives = self
            .renditions
            .iter()
            .filter(|media| referenced.contains(&media.group_id.as_str()))
            .cloned()
            .collect();

        render(&MasterPlaylist {
            version: self.version,
            independent_segments: self.independent_segments,
            alternatives,
            variants: selected.iter().map(|v| v.as_m3u8().clone()).collect(),
            ..Default::default()
        })
    }
}

fn ensure_selection(selected: &[VariantStream]) -> Result<()> {
    if selected.is_empty() {
        return Err(Error::Assemble("no variants selected".to_string()));
    }
    Ok(())
}

fn render(playlist: &MasterPlaylist) -> Result<String> {
    let mut out = Vec::new();
    playlist
        .write_to(&mut out)
        .map_err(|e| Error::Assemble(e.to_string()))?;
    let text = String::from_utf8(out).map_err(|e| Error::Assemble(e.to_string()))?;
    debug!("Assembled master playlist:\n{}", text);
    Ok(text)
}
