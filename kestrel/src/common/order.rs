//! The total order over [Value]s.
//!
//! Every component that orders values (sorting, distinct collection,
//! secondary indexes and the comparison operators of the matcher) goes
//! through [compare]. Two call sites that order values differently would
//! make index iteration disagree with query results, so nothing else in
//! the crate compares values on its own.
//!
//! Values of different types are ordered by their [TypeClass] first:
//!
//! | class     | variants                         |
//! |-----------|----------------------------------|
//! | missing   | `Missing`                        |
//! | null      | `Null`                           |
//! | number    | `I32`, `I64`, `F64`, `Decimal`   |
//! | string    | `String`                         |
//! | document  | `Document`                       |
//! | array     | `Array`                          |
//! | binary    | `Binary`                         |
//! | object id | `ObjectId`                       |
//! | boolean   | `Bool`                           |
//! | datetime  | `DateTime`                       |
//! | regex     | `Regex`                          |
//!
//! This table is frozen. Reordering it changes the iteration order of
//! every existing index.

use crate::collection::Document;
use crate::common::{SortOrder, Value};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

/// The type classes of the value order, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeClass {
    Missing,
    Null,
    Number,
    String,
    Document,
    Array,
    Binary,
    ObjectId,
    Boolean,
    DateTime,
    Regex,
}

/// Returns the type class used to order `value` against other types.
pub fn type_class(value: &Value) -> TypeClass {
    match value {
        Value::Missing => TypeClass::Missing,
        Value::Null => TypeClass::Null,
        Value::I32(_) | Value::I64(_) | Value::F64(_) | Value::Decimal(_) => TypeClass::Number,
        Value::String(_) => TypeClass::String,
        Value::Document(_) => TypeClass::Document,
        Value::Array(_) => TypeClass::Array,
        Value::Binary { .. } => TypeClass::Binary,
        Value::ObjectId(_) => TypeClass::ObjectId,
        Value::Bool(_) => TypeClass::Boolean,
        Value::DateTime(_) => TypeClass::DateTime,
        Value::Regex { .. } => TypeClass::Regex,
    }
}

/// Compares two values under the total value order.
///
/// Numbers compare by value regardless of their representation, so
/// `I32(2)`, `I64(2)`, `F64(2.0)` and `Decimal(20, 1)` are all equal.
/// `NaN` is equal to itself and lower than every other number.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    let (class_a, class_b) = (type_class(a), type_class(b));
    if class_a != class_b {
        return class_a.cmp(&class_b);
    }

    match (a, b) {
        (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
        (Value::Document(x), Value::Document(y)) => compare_documents(x, y),
        (Value::Array(x), Value::Array(y)) => compare_arrays(x, y),
        (
            Value::Binary { subtype: sa, bytes: ba },
            Value::Binary { subtype: sb, bytes: bb },
        ) => ba
            .len()
            .cmp(&bb.len())
            .then_with(|| sa.cmp(sb))
            .then_with(|| ba.cmp(bb)),
        (Value::ObjectId(x), Value::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),
        (
            Value::Regex { pattern: pa, options: oa },
            Value::Regex { pattern: pb, options: ob },
        ) => pa.cmp(pb).then_with(|| oa.cmp(ob)),
        _ if class_a == TypeClass::Number => compare_numbers(a, b),
        // missing and null have a single member each
        _ => Ordering::Equal,
    }
}

/// Compares documents pair by pair in stored field order, field name first
/// and value second. A document that is a prefix of the other sorts first.
pub fn compare_documents(a: &Document, b: &Document) -> Ordering {
    for ((key_a, value_a), (key_b, value_b)) in a.iter().zip(b.iter()) {
        let ordering = key_a
            .as_bytes()
            .cmp(key_b.as_bytes())
            .then_with(|| compare(value_a, value_b));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_arrays(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        let ordering = compare(x, y);
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.len().cmp(&b.len())
}

fn compare_numbers(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Decimal(x), Value::Decimal(y)) => x.cmp_decimal(y),
        (Value::Decimal(x), Value::F64(y)) => x.cmp_f64(*y),
        (Value::F64(x), Value::Decimal(y)) => y.cmp_f64(*x).reverse(),
        (Value::F64(x), Value::F64(y)) => compare_f64(*x, *y),
        (Value::Decimal(x), _) => match b.as_i64() {
            Some(y) => x.cmp_i64(y),
            None => Ordering::Equal,
        },
        (_, Value::Decimal(y)) => match a.as_i64() {
            Some(x) => y.cmp_i64(x).reverse(),
            None => Ordering::Equal,
        },
        (Value::F64(x), _) => match b.as_i64() {
            Some(y) => compare_i64_f64(y, *x).reverse(),
            None => Ordering::Equal,
        },
        (_, Value::F64(y)) => match a.as_i64() {
            Some(x) => compare_i64_f64(x, *y),
            None => Ordering::Equal,
        },
        _ => match (a.as_i64(), b.as_i64()) {
            (Some(x), Some(y)) => x.cmp(&y),
            _ => Ordering::Equal,
        },
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// Exact comparison of an integer against a double, without casting the
/// integer to `f64` and losing precision above 2^53.
fn compare_i64_f64(i: i64, f: f64) -> Ordering {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return Ordering::Greater;
    }
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }

    let truncated = f.trunc();
    match i.cmp(&(truncated as i64)) {
        Ordering::Equal => compare_f64(truncated, f),
        ordering => ordering,
    }
}

/// One component of a compound key: a dotted path and its direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    path: String,
    order: SortOrder,
}

impl Column {
    pub fn new(path: &str, reverse: bool) -> Self {
        Column {
            path: path.to_string(),
            order: SortOrder::from_reverse(reverse),
        }
    }

    pub fn ascending(path: &str) -> Self {
        Column::new(path, false)
    }

    pub fn descending(path: &str) -> Self {
        Column::new(path, true)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn is_reverse(&self) -> bool {
        self.order.is_reverse()
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = if self.is_reverse() { -1 } else { 1 };
        write!(f, "{}: {}", self.path, direction)
    }
}

/// Orders two documents by a compound key.
///
/// Each column's value is read with [Document::lookup] and compared with
/// [compare]; descending columns reverse the result. The first column that
/// differs decides.
pub fn order(a: &Document, b: &Document, columns: &[Column]) -> Ordering {
    for column in columns {
        let ordering = column
            .order()
            .apply(compare(a.lookup(column.path()), b.lookup(column.path())));
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
