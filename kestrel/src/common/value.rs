use crate::collection::Document;
use crate::common::{compare, Decimal};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};

/// Represents a [Document] value. It can be a scalar like [Value::I32] or
/// [Value::String], or a composite like [Value::Document] or [Value::Array].
///
/// # Variants
/// - Missing: the sentinel returned by path lookups that find nothing
/// - Null: an explicit null
/// - Bool, I32, I64, F64, Decimal: booleans and numbers
/// - String: UTF-8 text
/// - Binary: raw bytes tagged with a subtype
/// - ObjectId: 12 byte object identifier
/// - DateTime: UTC timestamp
/// - Document, Array: nested values
/// - Regex: a pattern with its options, stored as data
///
/// # Characteristics
/// - **Totally ordered**: `Ord` and `PartialEq` delegate to [compare], so
///   `Value::I32(1) == Value::F64(1.0)` and every pair of values has a
///   defined order, whatever their types.
/// - **Cheap to construct**: `From` is implemented for the common Rust types
///   and the [crate::val!] macro wraps it.
///
/// ```text
/// let v1: Value = 42.into();
/// let v2 = Value::from("hello");
/// let v3 = val!(true);
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// The value at a path that does not exist.
    #[default]
    Missing,
    /// Represents a null value.
    Null,
    /// Represents a boolean value.
    Bool(bool),
    /// Represents a signed 32-bit integer value.
    I32(i32),
    /// Represents a signed 64-bit integer value.
    I64(i64),
    /// Represents a 64-bit floating point value.
    F64(f64),
    /// Represents an exact decimal value.
    Decimal(Decimal),
    /// Represents a string value.
    String(String),
    /// Represents binary data with its subtype.
    Binary { subtype: u8, bytes: Vec<u8> },
    /// Represents an object identifier.
    ObjectId(ObjectId),
    /// Represents a UTC date time.
    DateTime(DateTime<Utc>),
    /// Represents a document value.
    Document(Document),
    /// Represents an array value.
    Array(Vec<Value>),
    /// Represents a regular expression.
    Regex { pattern: String, options: String },
}

/// Shared sentinel handed out by borrowing lookups.
pub(crate) static MISSING: Value = Value::Missing;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        compare(self, other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        compare(self, other)
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Missing => write!(f, "missing"),
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "bool({})", v),
            Value::I32(v) => write!(f, "i32({})", v),
            Value::I64(v) => write!(f, "i64({})", v),
            Value::F64(v) => write!(f, "f64({})", v),
            Value::Decimal(v) => write!(f, "decimal({})", v),
            Value::String(v) => write!(f, "string({:?})", v),
            Value::Binary { subtype, bytes } => write!(f, "binary({}, {:?})", subtype, bytes),
            Value::ObjectId(v) => write!(f, "object_id({})", v.to_hex()),
            Value::DateTime(v) => write!(f, "datetime({})", v.to_rfc3339()),
            Value::Document(v) => write!(f, "object({:?})", v),
            Value::Array(v) => f.debug_list().entries(v.iter()).finish(),
            Value::Regex { pattern, options } => write!(f, "regex(/{}/{})", pattern, options),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Missing => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::I32(v) => write!(f, "{}", v),
            Value::I64(v) => write!(f, "{}", v),
            Value::F64(v) => write!(f, "{}", v),
            Value::Decimal(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::Binary { bytes, .. } => write!(f, "<{} bytes>", bytes.len()),
            Value::ObjectId(v) => write!(f, "ObjectId({:?})", v.to_hex()),
            Value::DateTime(v) => write!(f, "{:?}", v.to_rfc3339()),
            Value::Document(v) => write!(f, "{}", v),
            Value::Array(v) => {
                write!(f, "[")?;
                for (i, item) in v.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Regex { pattern, options } => write!(f, "/{}/{}", pattern, options),
        }
    }
}

impl Value {
    /// Creates a new [Value] from anything that converts into one.
    pub fn from<T: Into<Value>>(value: T) -> Value {
        value.into()
    }

    /// Creates an array value from a vector of convertible items.
    pub fn from_vec<T: Into<Value>>(values: Vec<T>) -> Value {
        Value::Array(values.into_iter().map(Into::into).collect())
    }

    /// Creates a regex value. The pattern is not compiled here.
    pub fn regex(pattern: &str, options: &str) -> Value {
        Value::Regex {
            pattern: pattern.to_string(),
            options: options.to_string(),
        }
    }

    /// Creates a generic (subtype 0) binary value.
    pub fn binary(bytes: Vec<u8>) -> Value {
        Value::Binary { subtype: 0, bytes }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as `i64` if it is an integer variant.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I32(v) => Some(*v as i64),
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns an `f64` approximation of any numeric variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::I32(v) => Some(*v as f64),
            Value::I64(v) => Some(*v as f64),
            Value::F64(v) => Some(*v),
            Value::Decimal(v) => Some(v.to_f64()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::I32(_) | Value::I64(_) | Value::F64(_) | Value::Decimal(_)
        )
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_document(&self) -> bool {
        matches!(self, Value::Document(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Replaces this value with [Value::Missing] and returns the old one.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    #[inline]
    fn from(value: i32) -> Self {
        Value::I32(value)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(value: i64) -> Self {
        Value::I64(value)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(value: f64) -> Self {
        Value::F64(value)
    }
}

impl From<Decimal> for Value {
    #[inline]
    fn from(value: Decimal) -> Self {
        Value::Decimal(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<ObjectId> for Value {
    fn from(value: ObjectId) -> Self {
        Value::ObjectId(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::DateTime(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Document(value)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T> From<Vec<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Vec<T>) -> Self {
        Value::from_vec(value)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

/// A macro to create a `Value` from a given expression.
///
/// ```rust
/// use kestrel::common::Value;
/// use kestrel::val;
///
/// assert_eq!(val!(42), Value::I32(42));
/// assert_eq!(val!("hello"), Value::String("hello".to_string()));
/// assert_eq!(val!(true), Value::Bool(true));
/// ```
#[macro_export]
macro_rules! val {
    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
