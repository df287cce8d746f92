//! Asset manifest - every external resource path the scene refers to.
//!
//! Loading is the host's job; this only lists what must be loaded before the
//! scene starts and may be unloaded after it ends.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Kind of loader an asset needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Texture,
    Font,
    Audio,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetRef {
    pub kind: AssetKind,
    pub path: String,
}

impl AssetRef {
    pub fn new(kind: AssetKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Deduplicated, ordered set of assets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    assets: BTreeSet<AssetRef>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty paths are skipped. Returns true if the asset was new.
    pub fn insert(&mut self, kind: AssetKind, path: impl Into<String>) -> bool {
        let path = path.into();
        if path.is_empty() {
            return false;
        }
        self.assets.insert(AssetRef::new(kind, path))
    }

    pub fn contains(&self, kind: AssetKind, path: &str) -> bool {
        self.assets.contains(&AssetRef::new(kind, path))
    }

    pub fn merge(&mut self, other: AssetManifest) {
        self.assets.extend(other.assets);
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssetRef> {
        self.assets.iter()
    }

    /// Paths of one kind, in order.
    pub fn paths(&self, kind: AssetKind) -> Vec<&str> {
        self.assets
            .iter()
            .filter(|a| a.kind == kind)
            .map(|a| a.path.as_str())
            .collect()
    }
}
