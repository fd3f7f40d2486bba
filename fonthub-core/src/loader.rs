//! Metadata loading: discovery, parallel decoding and store population

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info, warn};

use crate::discovery::{MetadataDiscovery, PathDiscovery};
use crate::record::FontRecord;
use crate::store::FontStore;

/// What to do when a single document cannot be read or decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Abort the whole load on the first failure.
    #[default]
    FailFast,
    /// Log the failure, record it in the report and keep going.
    SkipInvalid,
}

#[derive(Debug, Default, Clone)]
pub struct LoadOptions {
    pub follow_symlinks: bool,
    pub jobs: Option<usize>,
    pub policy: LoadPolicy,
}

/// A document (or walk entry) that did not make it into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub path: Option<PathBuf>,
    pub message: String,
}

/// Summary of one load pass.
#[derive(Debug, Default, Clone)]
pub struct LoadReport {
    /// Documents decoded successfully, duplicates included.
    pub loaded: usize,
    /// Names whose earlier record was overwritten by a later document.
    pub replaced: Vec<String>,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Read and decode every metadata document under `root` into a store.
///
/// Documents are decoded in parallel but applied in walk order, so for
/// duplicate names the document visited last wins.
pub fn load_store(root: &Path, opts: &LoadOptions) -> Result<(FontStore, LoadReport)> {
    let entries = PathDiscovery::new(root)
        .follow_symlinks(opts.follow_symlinks)
        .discover()?;

    let decode = || -> Vec<(Option<PathBuf>, Result<FontRecord>)> {
        entries
            .into_par_iter()
            .map(|entry| match entry {
                Ok(source) => {
                    debug!(path = %source.path.display(), "loading metadata file");
                    let record = read_record(&source.path);
                    (Some(source.path), record)
                }
                Err(err) => (None, Err(err)),
            })
            .collect()
    };

    let decoded = if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        pool.install(decode)
    } else {
        decode()
    };

    let mut store = FontStore::new();
    let mut report = LoadReport::default();

    for (path, outcome) in decoded {
        let record = match outcome {
            Ok(record) => record,
            Err(err) if opts.policy == LoadPolicy::SkipInvalid => {
                warn!(error = %format!("{err:#}"), "skipping metadata document");
                report.failures.push(LoadFailure {
                    path,
                    message: format!("{err:#}"),
                });
                continue;
            }
            Err(err) => {
                return Err(err.context(format!("loading metadata from {}", root.display())));
            }
        };

        let name = record.name.clone();
        if store.put(record)?.is_some() {
            warn!(name = %name, "duplicate font name, keeping the later document");
            report.replaced.push(name);
        }
        report.loaded += 1;
    }

    info!(
        root = %root.display(),
        records = store.len(),
        loaded = report.loaded,
        replaced = report.replaced.len(),
        failed = report.failures.len(),
        "metadata loaded"
    );

    Ok((store, report))
}

/// Read one document and decode it into a record.
pub fn read_record(path: &Path) -> Result<FontRecord> {
    let data = fs::read(path)
        .with_context(|| format!("reading metadata document {}", path.display()))?;
    let record: FontRecord = serde_json::from_slice(&data)
        .with_context(|| format!("decoding metadata document {}", path.display()))?;

    if record.name.trim().is_empty() {
        bail!("metadata document {} has no font name", path.display());
    }

    Ok(record)
}
