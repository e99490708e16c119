use rustc_hash::FxHashMap;
use std::fmt;

use super::{
    master::MasterManifest,
    variant::{QualityKey, VariantStream},
};
use crate::error::{Error, Result};

/// Variants sharing one encoding profile, in manifest order.
#[derive(Debug, Clone)]
pub struct QualityGroup {
    pub key: QualityKey,
    pub variants: Vec<VariantStream>,
}

impl fmt::Display for QualityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        for variant in &self.variants {
            write!(f, "\n  - {}", variant.uri())?;
        }
        Ok(())
    }
}

/// Group the manifest's variants by [`QualityKey`].
///
/// Groups come out in order of first appearance; members keep manifest order.
pub fn group_by_quality(manifest: &MasterManifest) -> Vec<QualityGroup> {
    let mut groups: Vec<QualityGroup> = Vec::new();
    let mut index: FxHashMap<QualityKey, usize> = FxHashMap::default();

    for variant in manifest.variants() {
        let key = variant.quality_key();
        match index.get(&key) {
            Some(&i) => groups[i].variants.push(variant.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(QualityGroup {
                    key,
                    variants: vec![variant.clone()],
                });
            }
        }
    }

    groups
}

/// Pick the group whose bandwidth is exactly `bandwidth`.
///
/// There is no nearest-match fallback. When several profiles share a
/// bandwidth the first one in manifest order is returned.
pub fn select_by_bandwidth(groups: &[QualityGroup], bandwidth: u64) -> Result<&QualityGroup> {
    groups
        .iter()
        .find(|group| group.key.bandwidth == bandwidth)
        .ok_or(Error::Selection { bandwidth })
}

/// Groups ordered from highest to lowest bandwidth, for menus.
pub fn sorted_by_bandwidth_desc(groups: &[QualityGroup]) -> Vec<&QualityGroup> {
    let mut sorted: Vec<&QualityGroup> = groups.iter().collect();
    sorted.sort_by(|a, b| b.key.bandwidth.cmp(&a.key.bandwidth));
    sorted
}
