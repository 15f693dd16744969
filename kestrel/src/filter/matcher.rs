use crate::collection::Document;
use crate::common::{compare, type_class, Value};
use crate::errors::{ErrorKind, KestrelError, KestrelResult};
use regex::RegexBuilder;
use std::cmp::Ordering;

/// Decides whether a document satisfies a filter document.
///
/// The path resolver evaluates array filters through this trait, so any
/// query engine can plug in its own operator evaluator. Closures with the
/// matching signature implement it directly.
///
/// ```rust
/// use kestrel::collection::Document;
/// use kestrel::errors::KestrelResult;
/// use kestrel::filter::Matcher;
/// use kestrel::doc;
///
/// let always = |_: &Document, _: &Document| -> KestrelResult<bool> { Ok(true) };
/// assert!(always.matches(&doc! {}, &doc! { a: 1 }).unwrap());
/// ```
pub trait Matcher: Send + Sync {
    /// Returns true if `doc` satisfies `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error when the filter is malformed, for example when it
    /// uses an unsupported operator.
    fn matches(&self, doc: &Document, filter: &Document) -> KestrelResult<bool>;
}

impl<F> Matcher for F
where
    F: Fn(&Document, &Document) -> KestrelResult<bool> + Send + Sync,
{
    fn matches(&self, doc: &Document, filter: &Document) -> KestrelResult<bool> {
        self(doc, filter)
    }
}

/// A small evaluator for the common query operators.
///
/// # Supported filters
/// - `{path: value}`: implicit equality; a regex value matches strings
/// - comparison: `$eq`, `$ne`, `$gt`, `$gte`, `$lt`, `$lte`
/// - membership: `$in`, `$nin`
/// - element: `$exists`, `$size`
/// - pattern: `$regex` with optional `$options`
/// - negation: `$not`
/// - logical, top level only: `$and`, `$or`, `$nor`
///
/// A field holding an array matches a condition when the array itself or
/// any of its elements matches. `$size` and `$exists` look at the whole
/// value, and `$ne` and `$nin` are the negations of `$eq` and `$in`.
///
/// Ordering operators only match values of the same type class as the
/// operand, so `{a: {$lt: 0}}` never matches a string.
///
/// An equality test against `null` also matches a missing field.
///
/// ```rust
/// use kestrel::doc;
/// use kestrel::filter::{BasicMatcher, Matcher};
///
/// let doc = doc! { name: "kestrel", tags: ["bird", "fast"], weight: 190 };
/// let matcher = BasicMatcher;
///
/// assert!(matcher.matches(&doc, &doc! { tags: "fast" }).unwrap());
/// assert!(matcher.matches(&doc, &doc! { weight: { "$gt": 100, "$lte": 190 } }).unwrap());
/// assert!(!matcher.matches(&doc, &doc! { name: { "$in": ["hawk", "owl"] } }).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicMatcher;

impl Matcher for BasicMatcher {
    fn matches(&self, doc: &Document, filter: &Document) -> KestrelResult<bool> {
        match_document(doc, filter)
    }
}

fn match_document(doc: &Document, filter: &Document) -> KestrelResult<bool> {
    for (key, condition) in filter.iter() {
        let matched = match key {
            "$and" => {
                let mut all = true;
                for clause in clauses(key, condition)? {
                    if !match_document(doc, clause)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            "$or" => {
                let mut any = false;
                for clause in clauses(key, condition)? {
                    if match_document(doc, clause)? {
                        any = true;
                        break;
                    }
                }
                any
            }
            "$nor" => {
                let mut none = true;
                for clause in clauses(key, condition)? {
                    if match_document(doc, clause)? {
                        none = false;
                        break;
                    }
                }
                none
            }
            _ if key.starts_with('$') => {
                log::error!("Unknown top level operator {}", key);
                return Err(KestrelError::new(
                    &format!("Unknown top level operator {}", key),
                    ErrorKind::FilterError,
                ));
            }
            path => match_condition(doc.lookup(path), condition)?,
        };

        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}

fn clauses<'a>(operator: &str, value: &'a Value) -> KestrelResult<Vec<&'a Document>> {
    let items = match value {
        Value::Array(items) if !items.is_empty() => items,
        _ => {
            log::error!("{} expects a non-empty array of filters", operator);
            return Err(KestrelError::new(
                &format!("{} expects a non-empty array of filters", operator),
                ErrorKind::FilterError,
            ));
        }
    };

    let mut documents = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Document(doc) => documents.push(doc),
            other => {
                log::error!("{} expects filter documents, found {}", operator, other);
                return Err(KestrelError::new(
                    &format!("{} expects filter documents, found {}", operator, other),
                    ErrorKind::FilterError,
                ));
            }
        }
    }
    Ok(documents)
}

/// Returns true if the condition is an operator document such as
/// `{$gt: 1}` rather than a document to compare against.
fn is_operator_document(condition: &Document) -> KestrelResult<bool> {
    let operators = condition.keys().filter(|key| key.starts_with('$')).count();
    if operators == 0 {
        return Ok(false);
    }
    if operators != condition.len() {
        log::error!("Cannot mix operators and fields in {}", condition);
        return Err(KestrelError::new(
            &format!("Cannot mix operators and fields in {}", condition),
            ErrorKind::FilterError,
        ));
    }
    Ok(true)
}

fn match_condition(value: &Value, condition: &Value) -> KestrelResult<bool> {
    match condition {
        Value::Document(operators) if is_operator_document(operators)? => {
            for (operator, operand) in operators.iter() {
                if !match_operator(value, operator, operand, operators)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Value::Regex { pattern, options } => {
            let regex = compile(pattern, options)?;
            Ok(any_element(value, |v| {
                v.as_str().is_some_and(|s| regex.is_match(s))
            }))
        }
        _ => Ok(equals(value, condition)),
    }
}

fn match_operator(
    value: &Value,
    operator: &str,
    operand: &Value,
    siblings: &Document,
) -> KestrelResult<bool> {
    match operator {
        "$eq" => Ok(equals(value, operand)),
        "$ne" => Ok(!equals(value, operand)),
        "$gt" => Ok(ordered(value, operand, |o| o == Ordering::Greater)),
        "$gte" => Ok(ordered(value, operand, |o| o != Ordering::Less)),
        "$lt" => Ok(ordered(value, operand, |o| o == Ordering::Less)),
        "$lte" => Ok(ordered(value, operand, |o| o != Ordering::Greater)),
        "$in" => contained_in(value, operator, operand),
        "$nin" => contained_in(value, operator, operand).map(|found| !found),
        "$exists" => Ok(truthy(operand) != value.is_missing()),
        "$size" => {
            let size = match operand {
                Value::F64(f) if f.fract() == 0.0 => Some(*f as i64),
                other => other.as_i64(),
            };
            match size {
                Some(size) => Ok(value
                    .as_array()
                    .is_some_and(|items| items.len() as i64 == size)),
                None => {
                    log::error!("$size expects an integer, found {}", operand);
                    Err(KestrelError::new(
                        &format!("$size expects an integer, found {}", operand),
                        ErrorKind::FilterError,
                    ))
                }
            }
        }
        "$regex" => {
            let (pattern, options) = match operand {
                Value::String(pattern) => (
                    pattern.as_str(),
                    siblings.lookup("$options").as_str().unwrap_or(""),
                ),
                Value::Regex { pattern, options } => (pattern.as_str(), options.as_str()),
                other => {
                    log::error!("$regex expects a string or regex, found {}", other);
                    return Err(KestrelError::new(
                        &format!("$regex expects a string or regex, found {}", other),
                        ErrorKind::FilterError,
                    ));
                }
            };
            let regex = compile(pattern, options)?;
            Ok(any_element(value, |v| {
                v.as_str().is_some_and(|s| regex.is_match(s))
            }))
        }
        // consumed by $regex
        "$options" => Ok(true),
        "$not" => match operand {
            Value::Document(_) | Value::Regex { .. } => {
                match_condition(value, operand).map(|matched| !matched)
            }
            other => {
                log::error!("$not expects an operator document or regex, found {}", other);
                Err(KestrelError::new(
                    &format!("$not expects an operator document or regex, found {}", other),
                    ErrorKind::FilterError,
                ))
            }
        },
        _ => {
            log::error!("Unknown operator {}", operator);
            Err(KestrelError::new(
                &format!("Unknown operator {}", operator),
                ErrorKind::FilterError,
            ))
        }
    }
}

/// Applies `predicate` to the value and, for arrays, to each element.
fn any_element<P>(value: &Value, mut predicate: P) -> bool
where
    P: FnMut(&Value) -> bool,
{
    if predicate(value) {
        return true;
    }
    match value {
        Value::Array(items) => items.iter().any(predicate),
        _ => false,
    }
}

fn equals(value: &Value, operand: &Value) -> bool {
    if operand.is_null() && value.is_missing() {
        return true;
    }
    any_element(value, |v| compare(v, operand) == Ordering::Equal)
}

fn ordered<P>(value: &Value, operand: &Value, accept: P) -> bool
where
    P: Fn(Ordering) -> bool,
{
    let class = type_class(operand);
    any_element(value, |v| type_class(v) == class && accept(compare(v, operand)))
}

fn contained_in(value: &Value, operator: &str, operand: &Value) -> KestrelResult<bool> {
    let candidates = match operand {
        Value::Array(items) => items,
        other => {
            log::error!("{} expects an array, found {}", operator, other);
            return Err(KestrelError::new(
                &format!("{} expects an array, found {}", operator, other),
                ErrorKind::FilterError,
            ));
        }
    };

    for candidate in candidates {
        let found = match candidate {
            Value::Regex { pattern, options } => {
                let regex = compile(pattern, options)?;
                any_element(value, |v| v.as_str().is_some_and(|s| regex.is_match(s)))
            }
            _ => equals(value, candidate),
        };
        if found {
            return Ok(true);
        }
    }
    Ok(false)
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null | Value::Missing => false,
        v if v.is_number() => v.as_f64().is_some_and(|n| n != 0.0),
        _ => true,
    }
}

fn compile(pattern: &str, options: &str) -> KestrelResult<regex::Regex> {
    let mut builder = RegexBuilder::new(pattern);
    for option in options.chars() {
        match option {
            'i' => builder.case_insensitive(true),
            'm' => builder.multi_line(true),
            's' => builder.dot_matches_new_line(true),
            'x' => builder.ignore_whitespace(true),
            other => {
                log::error!("Unsupported regex option {}", other);
                return Err(KestrelError::new(
                    &format!("Unsupported regex option {}", other),
                    ErrorKind::FilterError,
                ));
            }
        };
    }
    Ok(builder.build()?)
}
