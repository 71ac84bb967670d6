//! File system utility functions

use super::sanitizers::clean_file_name;
use crate::github::FileUpload;
use anyhow::{Context, Result};
use std::path::{Component, Path};

/// Path segments of `path` with `.` dropped and `..` resolved lexically
///
/// Root and prefix components are ignored, and `..` never climbs above the
/// first segment.
fn normal_parts(path: &Path) -> Vec<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts
}

/// Repository path a local file is uploaded to
///
/// Relative paths keep their resolved segments; absolute paths keep only the
/// file name. `prefix` is resolved the same way and placed in front. Every
/// segment is cleaned with [`clean_file_name`].
pub fn destination_path(path: &Path, prefix: Option<&str>) -> String {
    let file_parts = if path.is_absolute() {
        path.file_name()
            .map(|name| vec![name.to_string_lossy().into_owned()])
            .unwrap_or_default()
    } else {
        normal_parts(path)
    };

    prefix
        .map(|prefix| normal_parts(Path::new(prefix)))
        .unwrap_or_default()
        .into_iter()
        .chain(file_parts)
        .map(|part| clean_file_name(&part))
        .filter(|part| !part.is_empty() && part != "." && part != "..")
        .collect::<Vec<_>>()
        .join("/")
}

/// Read a UTF-8 file to upload
///
/// Fails for missing files, directories, non-UTF-8 content, or paths that
/// clean down to nothing.
pub fn load_upload(path: &Path, prefix: Option<&str>) -> Result<FileUpload> {
    if !path.is_file() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} as UTF-8", path.display()))?;

    let destination = destination_path(path, prefix);
    if destination.is_empty() {
        anyhow::bail!("No usable file name in {}", path.display());
    }

    Ok(FileUpload {
        destination,
        contents,
    })
}
