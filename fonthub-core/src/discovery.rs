//! Metadata document discovery for fonthub-core

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use walkdir::WalkDir;

/// Path to a candidate metadata document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataSourceRef {
    pub path: PathBuf,
}

/// Outcome of visiting one walk entry: a document, or the error the walk hit.
pub type DiscoveredEntry = Result<MetadataSourceRef>;

/// Trait for enumerating metadata documents from some backing store.
pub trait MetadataDiscovery {
    /// Every candidate document in walk order. Walk failures are reported
    /// in place so callers can decide whether they are fatal.
    fn discover(&self) -> Result<Vec<DiscoveredEntry>>;
}

/// Recursive filesystem walker that collects `.json` metadata documents.
///
/// Entries within a directory are visited in file-name order, which makes
/// "last loaded wins" deterministic for duplicate record names.
#[derive(Debug, Clone)]
pub struct PathDiscovery {
    root: PathBuf,
    follow_symlinks: bool,
}

impl PathDiscovery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
        }
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }
}

impl MetadataDiscovery for PathDiscovery {
    fn discover(&self) -> Result<Vec<DiscoveredEntry>> {
        if !self.root.exists() {
            return Err(anyhow!(
                "metadata root does not exist: {}",
                self.root.display()
            ));
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();

        let mut found = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && is_metadata_document(entry.path()) {
                        found.push(Ok(MetadataSourceRef {
                            path: entry.path().to_path_buf(),
                        }));
                    }
                }
                Err(err) => {
                    let location = err
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| self.root.display().to_string());
                    found.push(Err(anyhow!("walking {location}: {err}")));
                }
            }
        }

        Ok(found)
    }
}

pub(crate) fn is_metadata_document(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("json"),
        None => false,
    }
}
