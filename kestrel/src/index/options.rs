use crate::collection::Document;
use crate::common::{Column, Value};
use crate::errors::{ErrorKind, KestrelError, KestrelResult};

/// Specifies how an [crate::index::Index] is keyed and whether it is unique.
///
/// # Characteristics
/// - **Compound key**: the columns are compared in order, each ascending or
///   descending, see [crate::common::order]
/// - **Uniqueness**: a unique index holds at most one document per key
/// - **Immutable**: the columns an index is built with never change, because
///   add, lookup and removal must all use the same key
///
/// Options are usually built from an index definition document such as
/// `{ name: 1, age: -1 }`:
///
/// ```rust
/// use kestrel::doc;
/// use kestrel::index::IndexOptions;
///
/// let options = IndexOptions::from_definition(&doc! { name: 1, age: (-1) }, true).unwrap();
/// assert!(options.is_unique());
/// assert_eq!(options.columns().len(), 2);
/// assert!(options.columns()[1].is_reverse());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexOptions {
    unique: bool,
    columns: Vec<Column>,
}

impl IndexOptions {
    pub fn new(unique: bool, columns: Vec<Column>) -> IndexOptions {
        IndexOptions { unique, columns }
    }

    /// Translates an index definition document into options.
    ///
    /// Each field names a path; the value `1` makes the column ascending and
    /// `-1` descending. Integer and floating point encodings are accepted.
    ///
    /// # Errors
    ///
    /// Returns [ErrorKind::ValidationError] for an empty definition or a
    /// direction other than `1` or `-1`.
    pub fn from_definition(definition: &Document, unique: bool) -> KestrelResult<IndexOptions> {
        if definition.is_empty() {
            log::error!("Index definition must contain at least one field");
            return Err(KestrelError::new(
                "Index definition must contain at least one field",
                ErrorKind::ValidationError,
            ));
        }

        let mut columns = Vec::with_capacity(definition.len());
        for (path, direction) in definition.iter() {
            let reverse = match direction_of(direction) {
                Some(reverse) => reverse,
                None => {
                    log::error!("Invalid direction {} for index field {}", direction, path);
                    return Err(KestrelError::new(
                        &format!("Invalid direction {} for index field {}", direction, path),
                        ErrorKind::ValidationError,
                    ));
                }
            };
            columns.push(Column::new(path, reverse));
        }

        Ok(IndexOptions::new(unique, columns))
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }
}

fn direction_of(value: &Value) -> Option<bool> {
    if *value == Value::I32(1) {
        Some(false)
    } else if *value == Value::I32(-1) {
        Some(true)
    } else {
        None
    }
}

/// Creates options for a unique index over `columns`.
pub fn unique_index(columns: Vec<Column>) -> IndexOptions {
    IndexOptions::new(true, columns)
}

/// Creates options for a non-unique index over `columns`.
pub fn non_unique_index(columns: Vec<Column>) -> IndexOptions {
    IndexOptions::new(false, columns)
}
