// src/store.rs
//! Raw listing pages on disk: `<root>/<Region name>/<id>.html`.
//!
//! Written once on discovery, overwritten only by the repair sweep, never
//! deleted. Bodies are stored verbatim.

use std::{fs, io, path::{Path, PathBuf}};

use crate::region::{ListingKey, Region};

const EXT: &str = "html";

#[derive(Clone, Debug)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn region_dir(&self, region: Region) -> PathBuf {
        self.root.join(region.name())
    }

    pub fn path(&self, key: &ListingKey) -> PathBuf {
        self.region_dir(key.region).join(format!("{}.{EXT}", key.id))
    }

    /// Create one directory per region.
    pub fn ensure_regions(&self, regions: &[Region]) -> io::Result<()> {
        for r in regions {
            fs::create_dir_all(self.region_dir(*r))?;
        }
        Ok(())
    }

    pub fn exists(&self, key: &ListingKey) -> bool {
        self.path(key).is_file()
    }

    /// Add or replace a document.
    pub fn write(&self, key: &ListingKey, body: &str) -> io::Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, body)
    }

    pub fn read(&self, key: &ListingKey) -> io::Result<String> {
        fs::read_to_string(self.path(key))
    }

    /// Stored size in bytes.
    pub fn size(&self, key: &ListingKey) -> io::Result<u64> {
        Ok(fs::metadata(self.path(key))?.len())
    }

    /// Every stored document, regions in form order, ids sorted within a region.
    /// Directories that are not region names and non-`.html` files are ignored.
    pub fn enumerate(&self) -> io::Result<Vec<ListingKey>> {
        let mut keys = Vec::new();
        for region in Region::ALL {
            let dir = self.region_dir(region);
            if !dir.is_dir() { continue; }

            let mut ids = Vec::new();
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if !path.is_file() { continue; }
                if path.extension().and_then(|s| s.to_str()) != Some(EXT) { continue; }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(stem.to_string());
                }
            }
            ids.sort_unstable();
            keys.extend(ids.into_iter().map(|id| ListingKey::new(region, id)));
        }
        Ok(keys)
    }
}
