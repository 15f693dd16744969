use crate::collection::{Doc, DocSet, Document, List};
use crate::common::util::OrderedTree;
use crate::common::{order, Column};
use crate::config::KestrelConfig;
use crate::errors::{ErrorKind, KestrelError, KestrelResult};
use crate::index::IndexOptions;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::fmt::{Debug, Formatter};

/// An in-memory secondary index over a compound key.
///
/// Documents whose keys are equal under [order] share one entry. Entries
/// are kept in ascending key order, so iteration order and the order of
/// [crate::collection::sort_by_columns] agree.
///
/// # Uniqueness
///
/// A unique index holds at most one document per key. Adding a second
/// document with an existing key is rejected by returning `false`; the
/// entry is left untouched. [Index::try_add] maps the rejection to an
/// [ErrorKind::UniqueConstraintViolation] error.
///
/// # Identity
///
/// Membership is tracked by [Doc] handle identity. To reindex an updated
/// document, remove the old handle and add the new one.
///
/// # Thread Safety
///
/// Every operation holds the index's own mutex for its whole duration, so
/// concurrent calls on one index are serialized and never observe a
/// partially updated entry. Separate indexes do not share a lock.
///
/// ```rust
/// use std::sync::Arc;
/// use kestrel::common::Column;
/// use kestrel::doc;
/// use kestrel::index::Index;
///
/// let index = Index::new(true, vec![Column::ascending("email")]);
/// let alice = Arc::new(doc! { email: "alice@example.com" });
/// let impostor = Arc::new(doc! { email: "alice@example.com" });
///
/// assert!(index.add(&alice));
/// assert!(!index.add(&impostor));
/// assert!(index.has(&alice));
/// ```
pub struct Index {
    unique: bool,
    columns: Vec<Column>,
    entries: Mutex<OrderedTree<DocSet>>,
}

impl Index {
    /// Creates an index with the default node capacity.
    pub fn new(unique: bool, columns: Vec<Column>) -> Self {
        Index {
            unique,
            columns,
            entries: Mutex::new(OrderedTree::default()),
        }
    }

    /// Creates an index from options, sized by the configuration.
    pub fn with_config(options: &IndexOptions, config: &KestrelConfig) -> Self {
        Index {
            unique: options.is_unique(),
            columns: options.columns().to_vec(),
            entries: Mutex::new(OrderedTree::new(config.index_node_capacity())),
        }
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Adds a document under its key.
    ///
    /// Returns `false` only when the index is unique and the key is taken.
    /// Adding a handle that is already a member of a non-unique entry is a
    /// no-op that returns `true`.
    pub fn add(&self, doc: &Doc) -> bool {
        let mut entries = self.entries.lock();
        match entries.search(|entry| self.probe(entry, doc)) {
            Ok(position) => {
                if self.unique {
                    log::debug!(
                        "Rejected duplicate key on unique index [{}]",
                        self.describe_columns()
                    );
                    return false;
                }
                if let Some(entry) = entries.get_mut(position) {
                    entry.add(doc.clone());
                }
                true
            }
            Err(position) => {
                let mut entry = DocSet::new();
                entry.add(doc.clone());
                entries.insert_at(position, entry);
                true
            }
        }
    }

    /// Adds a document, failing instead of returning `false` when a unique
    /// key is taken.
    pub fn try_add(&self, doc: &Doc) -> KestrelResult<()> {
        if self.add(doc) {
            return Ok(());
        }

        log::error!(
            "Unique constraint violated for index [{}]",
            self.describe_columns()
        );
        Err(KestrelError::new(
            &format!(
                "Unique constraint violated for index [{}]",
                self.describe_columns()
            ),
            ErrorKind::UniqueConstraintViolation,
        ))
    }

    /// Returns true if the document is indexed.
    ///
    /// A unique index only checks that the key is present. A non-unique
    /// index also requires this exact handle to be a member of the entry.
    pub fn has(&self, doc: &Doc) -> bool {
        let entries = self.entries.lock();
        match entries.find(|entry| self.probe(entry, doc)) {
            Some(_) if self.unique => true,
            Some(entry) => entry.contains(doc),
            None => false,
        }
    }

    /// Removes the document from its entry, dropping the entry once it is
    /// empty. Returns false if the handle was not indexed.
    pub fn remove(&self, doc: &Doc) -> bool {
        let mut entries = self.entries.lock();
        let position = match entries.search(|entry| self.probe(entry, doc)) {
            Ok(position) => position,
            Err(_) => return false,
        };

        let last_member = match entries.get_mut(position) {
            Some(entry) if entry.contains(doc) => {
                if entry.len() > 1 {
                    return entry.remove(doc);
                }
                true
            }
            _ => false,
        };

        last_member && entries.remove_at(position).is_some()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns every indexed document in ascending key order.
    ///
    /// Documents sharing a key follow the order of their entry.
    pub fn documents(&self) -> List {
        let entries = self.entries.lock();
        let documents: List = entries
            .iter()
            .flat_map(|entry| entry.iter().cloned())
            .collect();
        log::debug!(
            "Snapshot of index [{}] with {} documents",
            self.describe_columns(),
            documents.len()
        );
        documents
    }

    /// Visits the entries in ascending key order until `visitor` returns
    /// false. The index stays locked during the walk, so the visitor must
    /// not call back into this index.
    pub fn ascend<F>(&self, mut visitor: F)
    where
        F: FnMut(&[Doc]) -> bool,
    {
        let entries = self.entries.lock();
        for entry in entries.iter() {
            if !visitor(entry.list()) {
                break;
            }
        }
    }

    fn probe(&self, entry: &DocSet, doc: &Document) -> Ordering {
        match entry.first() {
            Some(representative) => order(representative, doc, &self.columns),
            None => Ordering::Less,
        }
    }

    fn describe_columns(&self) -> String {
        self.columns
            .iter()
            .map(|column| column.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Clone for Index {
    /// Snapshots the index. Entries are copied, documents are shared, and
    /// the two indexes are independent afterwards.
    fn clone(&self) -> Self {
        let entries = self.entries.lock().clone();
        Index {
            unique: self.unique,
            columns: self.columns.clone(),
            entries: Mutex::new(entries),
        }
    }
}

impl Debug for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("unique", &self.unique)
            .field("columns", &self.columns)
            .field("entries", &self.len())
            .finish()
    }
}
