use crate::common::value::MISSING;
use crate::common::{compare_documents, Value};
use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

/// Separates the segments of a dotted path.
pub const FIELD_SEPARATOR: char = '.';

/// An ordered mapping from field names to [Value]s.
///
/// Fields keep the order in which they were first inserted. That order is
/// part of the document's identity as a value: `{a: 1, b: 2}` and
/// `{b: 2, a: 1}` are different documents under [crate::common::compare].
///
/// Nested values are reached with dotted paths, see [Document::lookup].
///
/// ```rust
/// use kestrel::doc;
/// use kestrel::common::Value;
///
/// let doc = doc! {
///     name: "kestrel",
///     tags: ["fast", "small"],
///     location: { city: "Oslo" },
/// };
///
/// assert_eq!(doc.get("location.city"), Value::from("Oslo"));
/// assert_eq!(doc.get("tags.1"), Value::from("small"));
/// assert!(doc.get("tags.5").is_missing());
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    data: IndexMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of top-level fields.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Sets a top-level field and returns the previous value, if any.
    ///
    /// Replacing an existing field keeps its position.
    pub fn put<T: Into<Value>>(&mut self, key: &str, value: T) -> Option<Value> {
        self.data.insert(key.to_string(), value.into())
    }

    /// Removes a top-level field, keeping the order of the rest.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Returns the top-level field named `key`, without path traversal.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Reads the value at a dotted path.
    ///
    /// Documents are traversed by field name and arrays by a numeric
    /// segment. The shared [Value::Missing] sentinel is returned as soon as
    /// the traversal cannot continue: an absent field, a negative or
    /// non-numeric or out-of-range array index, or a segment below a
    /// scalar. A missing path is never an error.
    pub fn lookup(&self, path: &str) -> &Value {
        let mut segments = path.split(FIELD_SEPARATOR);
        let mut current = match segments.next().and_then(|first| self.data.get(first)) {
            Some(value) => value,
            None => return &MISSING,
        };

        for segment in segments {
            let next = match current {
                Value::Document(doc) => doc.data.get(segment),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            };

            current = match next {
                Some(value) => value,
                None => return &MISSING,
            };
        }
        current
    }

    /// Owned form of [Document::lookup].
    pub fn get(&self, path: &str) -> Value {
        self.lookup(path).clone()
    }

    /// Returns true if `path` resolves to anything but [Value::Missing].
    pub fn contains_path(&self, path: &str) -> bool {
        !self.lookup(path).is_missing()
    }

    /// Iterates the top-level fields in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.data.values()
    }
}

/// Reads the value at a dotted path of `doc`, see [Document::lookup].
pub fn get<'a>(doc: &'a Document, path: &str) -> &'a Value {
    doc.lookup(path)
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        compare_documents(self, other) == Ordering::Equal
    }
}

impl Eq for Document {}

impl PartialOrd for Document {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Document {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_documents(self, other)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.data.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document {
            data: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[doc(hidden)]
pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys may be identifiers or string literals. Values may be literals,
/// nested `{ ... }` documents, `[ ... ]` arrays or any single token tree;
/// wrap longer expressions (including negative numbers) in parentheses.
///
/// ```rust
/// use kestrel::doc;
///
/// let empty = doc!{};
/// assert!(empty.is_empty());
///
/// let doc = doc! {
///     "name": "index",
///     "keys": { "age": (-1) },
///     "tags": [1, 2, { "x": true }],
/// };
/// assert_eq!(doc.len(), 3);
/// ```
#[macro_export]
macro_rules! doc {
    () => {
        $crate::collection::Document::new()
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.put(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value));
            )*
            doc
        }
    };
}

/// Helper macro converting the value position of [doc!].
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
