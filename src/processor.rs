//! Write resolution and persistence.
//!
//! Decides what bytes end up on disk for each file asset, honoring its
//! write policy against whatever already exists at the target path, then
//! persists the whole collection.

use log::debug;
use std::fs;
use std::io;
use std::path::Path;

use crate::asset::{Action, Asset, File, WritePolicy};
use crate::collection::AssetCollection;
use crate::error::{Error, Result};

/// Computes the bytes to write for a file asset given the content currently
/// on disk at its path (`None` when no file exists yet). Returns `None` when
/// nothing should be written.
///
/// A custom resolver, when set, is authoritative for every case including
/// the missing-file one. Otherwise a missing file always receives the
/// generated content verbatim, and the built-in actions only come into play
/// against existing content.
pub fn resolve_content(file: &File, existing: Option<&str>) -> Option<String> {
    let generated = file.content().unwrap_or("");
    match file.policy() {
        WritePolicy::Resolver(resolver) => resolver(existing, generated),
        WritePolicy::Action(action) => match existing {
            None => Some(generated.to_string()),
            Some(existing) => match action {
                Action::Replace => Some(generated.to_string()),
                Action::Skip => None,
                Action::Prepend => {
                    let stripped = strip_header(existing, file.header_size());
                    Some(format!("{}\n{}", generated, stripped))
                }
                Action::Append => {
                    if file.header_size() == 0 && !existing.is_empty() {
                        Some(format!("{}\n{}", existing, generated))
                    } else {
                        let stripped = strip_header(existing, file.header_size());
                        Some(format!("{}{}", stripped, generated))
                    }
                }
            },
        },
    }
}

/// Drops the first `lines` lines from `content`. Only existing content is
/// ever stripped, never freshly generated content, so exactly one header
/// instance survives repeated prepend/append runs.
fn strip_header(content: &str, lines: usize) -> String {
    content.split('\n').skip(lines).collect::<Vec<_>>().join("\n")
}

/// Persists every asset in insertion order, updating each file asset with
/// the content actually written (`None` when the file was left untouched).
/// Byte-content files are copied as-is, with `content_bytes` standing as
/// the record of what was written.
///
/// Existing content is read immediately before each write decision rather
/// than cached up front, so assets targeting the same path within one run
/// compose on each other's output.
pub fn persist_assets(assets: &mut AssetCollection, output_dir: &Path) -> Result<()> {
    debug!(
        "Persisting {} assets to {}",
        assets.len(),
        output_dir.display()
    );

    for asset in assets.iter_mut() {
        match asset {
            Asset::Directory(directory) => {
                let target = output_dir.join(directory.path());
                debug!("Creating directory: {}", target.display());
                create_dir(&target, directory.mode())?;
            }
            Asset::Symlink(symlink) => {
                let target = output_dir.join(symlink.path());
                debug!(
                    "Creating symlink: {} -> {}",
                    target.display(),
                    symlink.target()
                );
                create_symlink(&target, symlink.target())?;
            }
            Asset::File(file) => {
                let target = output_dir.join(file.path());
                if let Some(bytes) = file.content_bytes() {
                    debug!("Copying file: {}", target.display());
                    write_file(&target, bytes, file.mode())?;
                    continue;
                }
                let existing = read_if_exists(&target)?;
                let resolved = resolve_content(file, existing.as_deref());
                match &resolved {
                    Some(content) => {
                        debug!("Writing file: {}", target.display());
                        write_file(&target, content.as_bytes(), file.mode())?;
                    }
                    None => {
                        debug!("Skipping file: {}", target.display());
                    }
                }
                file.set_content(resolved);
            }
        }
    }
    Ok(())
}

fn read_if_exists(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(Error::IoError(error)),
    }
}

fn write_file(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    fs::write(path, content).map_err(Error::IoError)?;
    set_mode(path, mode)
}

fn create_dir(path: &Path, mode: u32) -> Result<()> {
    fs::create_dir_all(path).map_err(Error::IoError)?;
    set_mode(path, mode)
}

#[cfg(unix)]
fn create_symlink(path: &Path, target: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    // Replace a stale link instead of failing on it. Anything else at the
    // path stays untouched and fails the run.
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.file_type().is_symlink() => {
            fs::remove_file(path).map_err(Error::IoError)?;
        }
        Ok(_) => {
            return Err(Error::IoError(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a symlink", path.display()),
            )));
        }
        Err(_) => {}
    }
    std::os::unix::fs::symlink(target, path).map_err(Error::IoError)
}

#[cfg(not(unix))]
fn create_symlink(path: &Path, _target: &str) -> Result<()> {
    Err(Error::IoError(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot create symlink {}", path.display()),
    )))
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(Error::IoError)
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}
