//! fonthub-core: load, index and select font metadata
//!
//! A metadata set is a directory tree of JSON documents, one per font
//! family. Loading it yields a [`FontDatabase`]: a name-keyed record store
//! plus one inverted index per selectable attribute family (width, weight,
//! style, language).
//!
//! Selectors combine values with OR inside a family and AND across
//! families; an empty selector returns everything.
//!
//! ```rust,no_run
//! use std::path::Path;
//! use fonthub_core::database::FontDatabase;
//! use fonthub_core::loader::LoadOptions;
//! use fonthub_core::query::Selector;
//!
//! let (db, report) = FontDatabase::load(Path::new("metadataset"), &LoadOptions::default())?;
//! println!("{} fonts, {} replaced", db.len(), report.replaced.len());
//!
//! let selector = Selector::new()
//!     .with_widths(vec!["condensed".into()])
//!     .with_weights(vec!["bold".into(), "black".into()]);
//! for font in db.by_selector(&selector) {
//!     println!("{} ({})", font.name, font.license);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! [`FontDatabase`]: database::FontDatabase

pub mod database;
pub mod discovery;
pub mod index;
pub mod loader;
pub mod output;
pub mod query;
pub mod record;
pub mod search;
pub mod store;
