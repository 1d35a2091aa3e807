//! Path-keyed aggregate of the assets produced by a generation run.

use crate::asset::{Asset, Directory, File, Symlink};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use std::path::{Component, Path};

/// Insertion-ordered set of assets keyed by output path.
///
/// Insertion order drives the order in which assets are persisted, so
/// directories registered ahead of the files inside them get created first,
/// and repeated prepend/append against one path composes predictably.
#[derive(Debug, Default)]
pub struct AssetCollection {
    assets: IndexMap<String, Asset>,
}

impl AssetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an asset under its path.
    ///
    /// The path must be non-empty, relative, free of parent-directory
    /// components, and not yet claimed by another asset.
    pub fn add(&mut self, asset: impl Into<Asset>) -> Result<()> {
        let asset = asset.into();
        validate_path(asset.path())?;
        if self.assets.contains_key(asset.path()) {
            return Err(Error::DuplicatePathError {
                path: asset.path().to_string(),
            });
        }
        self.assets.insert(asset.path().to_string(), asset);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// All assets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Asset> {
        self.assets.values()
    }

    // Mutable access is reserved for the persistence pass, which updates
    // file content but never paths, keeping the keys valid.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Asset> {
        self.assets.values_mut()
    }

    /// Directories in insertion order.
    pub fn directories(&self) -> impl Iterator<Item = &Directory> {
        self.assets.values().filter_map(|asset| match asset {
            Asset::Directory(directory) => Some(directory),
            _ => None,
        })
    }

    /// Files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.assets.values().filter_map(|asset| match asset {
            Asset::File(file) => Some(file),
            _ => None,
        })
    }

    /// Symlinks in insertion order.
    pub fn symlinks(&self) -> impl Iterator<Item = &Symlink> {
        self.assets.values().filter_map(|asset| match asset {
            Asset::Symlink(symlink) => Some(symlink),
            _ => None,
        })
    }

    /// A view of all assets ordered by path ascending. The collection's own
    /// insertion order is left untouched.
    pub fn sorted(&self) -> Vec<&Asset> {
        let mut assets: Vec<&Asset> = self.assets.values().collect();
        assets.sort_by(|a, b| a.path().cmp(b.path()));
        assets
    }
}

fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidPathError {
            path: path.to_string(),
            reason: "path is empty".to_string(),
        });
    }
    for component in Path::new(path).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidPathError {
                    path: path.to_string(),
                    reason: "path must be relative".to_string(),
                });
            }
            Component::ParentDir => {
                return Err(Error::InvalidPathError {
                    path: path.to_string(),
                    reason: "path must stay inside the output directory".to_string(),
                });
            }
            _ => {}
        }
    }
    Ok(())
}
