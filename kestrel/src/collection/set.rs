use crate::collection::{Doc, List};
use std::collections::HashMap;
use std::sync::Arc;

#[inline]
fn identity(doc: &Doc) -> usize {
    Arc::as_ptr(doc) as usize
}

/// A list of documents with an identity-keyed membership index.
///
/// Membership is decided by pointer identity of the shared [Doc] handle,
/// not by value: two equal documents held in different `Arc`s are
/// distinct members. The set keeps each member's `Arc` alive, so an
/// address cannot be reused while it is a key.
///
/// Removal is O(1) and moves the last member into the vacated slot, so
/// [DocSet::list] keeps insertion order only until the first removal.
#[derive(Clone, Default)]
pub struct DocSet {
    list: List,
    positions: HashMap<usize, usize>,
}

impl DocSet {
    pub fn new() -> Self {
        DocSet::default()
    }

    /// Builds a set from a list, ignoring repeated handles.
    pub fn from_list(list: &[Doc]) -> Self {
        let mut set = DocSet {
            list: Vec::with_capacity(list.len()),
            positions: HashMap::with_capacity(list.len()),
        };
        for doc in list {
            set.add(doc.clone());
        }
        set
    }

    /// Adds a document and returns false if it was already a member.
    pub fn add(&mut self, doc: Doc) -> bool {
        let key = identity(&doc);
        if self.positions.contains_key(&key) {
            return false;
        }
        self.positions.insert(key, self.list.len());
        self.list.push(doc);
        true
    }

    pub fn contains(&self, doc: &Doc) -> bool {
        self.positions.contains_key(&identity(doc))
    }

    /// Removes a document and returns false if it was not a member.
    pub fn remove(&mut self, doc: &Doc) -> bool {
        let position = match self.positions.remove(&identity(doc)) {
            Some(position) => position,
            None => return false,
        };

        self.list.swap_remove(position);
        if let Some(moved) = self.list.get(position) {
            self.positions.insert(identity(moved), position);
        }
        true
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// The first member, used as the representative of an index entry.
    pub fn first(&self) -> Option<&Doc> {
        self.list.first()
    }

    pub fn list(&self) -> &[Doc] {
        &self.list
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Doc> {
        self.list.iter()
    }

    pub fn into_list(self) -> List {
        self.list
    }
}
