//! Source tree packaging
//!
//! Zips every regular, non-empty file under a root directory into a single
//! archive. Entry names are relative to the root and always use `/`.

use std::fs::{self, File};
use std::io::{self, Seek, Write};
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::PackagingError;

/// A single request to package `source_root` into `destination`
#[derive(Debug, Clone)]
pub struct ArchiveRequest {
    pub source_root: PathBuf,
    pub destination: PathBuf,
}

impl ArchiveRequest {
    pub fn new(source_root: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            destination: destination.into(),
        }
    }

    /// Write the archive, returning the number of entries written
    ///
    /// The archive is finalized only when every entry was written. On error
    /// the destination holds an unfinished archive with no central directory;
    /// it is left in place for the caller to discard.
    pub fn zip(self) -> Result<usize, PackagingError> {
        let mut file = File::create(&self.destination).map_err(|source| {
            PackagingError::CreateDestination {
                path: self.destination.clone(),
                source,
            }
        })?;
        let destination = fs::canonicalize(&self.destination).map_err(|source| {
            PackagingError::CreateDestination {
                path: self.destination.clone(),
                source,
            }
        })?;

        let mut writer = ZipWriter::new(&mut file);
        let written = match self.write_entries(&mut writer, &destination) {
            Ok(written) => written,
            Err(e) => {
                // Dropping the writer would write the central directory
                std::mem::forget(writer);
                return Err(e);
            }
        };
        writer.finish()?;

        tracing::debug!(
            "Wrote {} entries from {:?} to {:?}",
            written,
            self.source_root,
            self.destination
        );
        Ok(written)
    }

    fn write_entries<W: Write + Seek>(
        &self,
        writer: &mut ZipWriter<W>,
        destination: &Path,
    ) -> Result<usize, PackagingError> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let mut written = 0;
        let walker = WalkDir::new(&self.source_root)
            .follow_links(false)
            .sort_by_file_name();
        for entry in walker {
            let entry = entry?;
            let metadata = entry.metadata()?;

            // Directories, symlinks, devices and empty files produce no entry
            if !metadata.is_file() || metadata.len() == 0 {
                continue;
            }
            if is_same_file(entry.path(), destination) {
                continue;
            }

            let name = entry_name(&self.source_root, entry.path())?;
            let io_err = |source| PackagingError::Io {
                path: entry.path().to_path_buf(),
                source,
            };

            let mut input = File::open(entry.path()).map_err(io_err)?;
            writer.start_file(name.as_str(), options)?;
            io::copy(&mut input, writer).map_err(io_err)?;

            tracing::debug!("Archived {}", name);
            written += 1;
        }
        Ok(written)
    }
}

/// Whether `path` is the archive being written
fn is_same_file(path: &Path, destination: &Path) -> bool {
    if path.file_name() != destination.file_name() {
        return false;
    }
    path == destination || fs::canonicalize(path).is_ok_and(|p| p == destination)
}

/// Archive entry name for `path`, relative to `root`
fn entry_name(root: &Path, path: &Path) -> Result<String, PackagingError> {
    let non_utf8 = || PackagingError::NonUtf8Name {
        path: path.to_path_buf(),
    };

    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(part) = component {
            parts.push(part.to_str().ok_or_else(non_utf8)?);
        }
    }

    if parts.is_empty() {
        // The root itself is a file
        let name = path.file_name().ok_or_else(non_utf8)?;
        return name.to_str().map(str::to_string).ok_or_else(non_utf8);
    }
    Ok(parts.join("/"))
}
