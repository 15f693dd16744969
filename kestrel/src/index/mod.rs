//! Secondary indexes.
//!
//! An [Index] groups documents by a compound key of [crate::common::Column]s
//! and keeps the groups in key order. Indexes are maintained explicitly:
//! the caller adds a document on insert, removes it on delete, and removes
//! the old handle then adds the new one on update.
//!
//! ```rust
//! use std::sync::Arc;
//! use kestrel::config::KestrelConfig;
//! use kestrel::doc;
//! use kestrel::index::{Index, IndexOptions};
//!
//! let options = IndexOptions::from_definition(&doc! { age: (-1) }, false).unwrap();
//! let index = Index::with_config(&options, &KestrelConfig::default());
//!
//! let young = Arc::new(doc! { age: 20 });
//! let old = Arc::new(doc! { age: 60 });
//! index.add(&young);
//! index.add(&old);
//!
//! let ordered = index.documents();
//! assert!(Arc::ptr_eq(&ordered[0], &old));
//! ```

#[allow(clippy::module_inception)]
mod index;
mod options;

pub use index::*;
pub use options::*;
