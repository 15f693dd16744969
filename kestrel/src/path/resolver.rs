use crate::collection::{Document, FIELD_SEPARATOR};
use crate::common::Value;
use crate::errors::{ErrorKind, KestrelError, KestrelResult};
use crate::filter::Matcher;
use crate::path::Segment;
use smallvec::SmallVec;
use std::iter::FusedIterator;

struct Frame {
    prefix: String,
    next: usize,
}

/// Lazily expands a dotted path with positional operators into the
/// concrete paths it addresses in one document.
///
/// Created by [resolve]. Paths are produced in document order: outer array
/// indexes ascending, then inner ones. The first error is yielded once and
/// ends the sequence.
pub struct ResolvedPaths<'a, M: Matcher + ?Sized> {
    segments: SmallVec<[&'a str; 8]>,
    doc: &'a Document,
    filters: &'a [Document],
    matcher: &'a M,
    stack: SmallVec<[Frame; 8]>,
    done: bool,
}

/// Resolves `path` against `doc`.
///
/// Plain segments are copied to every resolved path. `$[]` expands to each
/// index of the array built so far; `$[name]` expands to the indexes whose
/// element satisfies the array filter for `name`. An array filter belongs
/// to `name` when one of its keys is `name` or starts with `name.`, and it
/// is evaluated by `matcher` against the document `{name: element}`.
///
/// Resolution never modifies `doc`.
///
/// # Errors
///
/// Each error is yielded in place of a path:
/// - [ErrorKind::RootPositionalOperator] if the first segment starts with `$`
/// - [ErrorKind::ImplicitPositionalOperator] for a bare `$` segment
/// - [ErrorKind::UnknownPositionalOperator] for any other `$` segment that
///   is not `$[]` or `$[identifier]`
/// - [ErrorKind::NonArrayTarget] if an operator follows a non-array value
/// - [ErrorKind::ArrayFilterNotFound] if no array filter names the identifier
/// - [ErrorKind::FilterError] if the matcher fails
///
/// ```rust
/// use kestrel::doc;
/// use kestrel::filter::BasicMatcher;
/// use kestrel::path::resolve;
///
/// let doc = doc! { foo: [{ bar: [1, 2] }, { bar: [3] }] };
/// let paths: Vec<String> = resolve("foo.$[].bar.$[]", &doc, &[], &BasicMatcher)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(paths, vec!["foo.0.bar.0", "foo.0.bar.1", "foo.1.bar.0"]);
/// ```
pub fn resolve<'a, M: Matcher + ?Sized>(
    path: &'a str,
    doc: &'a Document,
    filters: &'a [Document],
    matcher: &'a M,
) -> ResolvedPaths<'a, M> {
    let mut stack = SmallVec::new();
    stack.push(Frame {
        prefix: String::with_capacity(path.len()),
        next: 0,
    });

    ResolvedPaths {
        segments: path.split(FIELD_SEPARATOR).collect(),
        doc,
        filters,
        matcher,
        stack,
        done: false,
    }
}

/// Calls `f` with every resolved path, stopping at the first error from
/// either the resolver or `f`.
pub fn resolve_each<M, F>(
    path: &str,
    doc: &Document,
    filters: &[Document],
    matcher: &M,
    mut f: F,
) -> KestrelResult<()>
where
    M: Matcher + ?Sized,
    F: FnMut(&str) -> KestrelResult<()>,
{
    for resolved in resolve(path, doc, filters, matcher) {
        f(&resolved?)?;
    }
    Ok(())
}

/// Collects every resolved path, or returns the first error.
pub fn resolve_all<M: Matcher + ?Sized>(
    path: &str,
    doc: &Document,
    filters: &[Document],
    matcher: &M,
) -> KestrelResult<Vec<String>> {
    resolve(path, doc, filters, matcher).collect()
}

impl<'a, M: Matcher + ?Sized> ResolvedPaths<'a, M> {
    fn fail(&mut self, error: KestrelError) -> Option<KestrelResult<String>> {
        self.done = true;
        self.stack.clear();
        Some(Err(error))
    }

    fn find_filter(&self, identifier: &str) -> Option<&'a Document> {
        let filters: &'a [Document] = self.filters;
        filters.iter().find(|filter| {
            filter
                .keys()
                .any(|key| key.split(FIELD_SEPARATOR).next() == Some(identifier))
        })
    }

    /// Collects the indexes of `items` accepted by the operator, in
    /// ascending order.
    fn accepted_indexes(
        &self,
        items: &[Value],
        identifier: Option<&str>,
    ) -> KestrelResult<SmallVec<[usize; 8]>> {
        let (identifier, filter) = match identifier {
            None => return Ok((0..items.len()).collect()),
            Some(identifier) => match self.find_filter(identifier) {
                Some(filter) => (identifier, filter),
                None => {
                    log::error!("no array filter found for identifier \"{}\"", identifier);
                    return Err(KestrelError::new(
                        &format!("no array filter found for identifier \"{}\"", identifier),
                        ErrorKind::ArrayFilterNotFound,
                    ));
                }
            },
        };

        let mut accepted = SmallVec::new();
        for (index, item) in items.iter().enumerate() {
            let mut candidate = Document::new();
            candidate.put(identifier, item.clone());

            match self.matcher.matches(&candidate, filter) {
                Ok(true) => accepted.push(index),
                Ok(false) => {}
                Err(err) => {
                    log::error!("array filter for identifier \"{}\" failed: {}", identifier, err);
                    return Err(KestrelError::new_with_cause(
                        &format!("array filter for identifier \"{}\" failed", identifier),
                        ErrorKind::FilterError,
                        err,
                    ));
                }
            }
        }
        Ok(accepted)
    }
}

impl<'a, M: Matcher + ?Sized> Iterator for ResolvedPaths<'a, M> {
    type Item = KestrelResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while let Some(Frame { mut prefix, next }) = self.stack.pop() {
            let mut position = next;
            loop {
                let segment = match self.segments.get(position) {
                    Some(segment) => *segment,
                    None => return Some(Ok(prefix)),
                };

                let identifier = match Segment::parse(segment) {
                    Segment::Field(field) => {
                        if position > 0 {
                            prefix.push(FIELD_SEPARATOR);
                        }
                        prefix.push_str(field);
                        position += 1;
                        continue;
                    }
                    _ if position == 0 => {
                        log::error!("unsupported root positional operator \"{}\"", segment);
                        return self.fail(KestrelError::new(
                            &format!("unsupported root positional operator \"{}\"", segment),
                            ErrorKind::RootPositionalOperator,
                        ));
                    }
                    Segment::Implicit => {
                        log::error!("the implicit positional operator is not yet supported");
                        return self.fail(KestrelError::new(
                            "the implicit positional operator is not yet supported",
                            ErrorKind::ImplicitPositionalOperator,
                        ));
                    }
                    Segment::Unknown(operator) => {
                        log::error!("unknown positional operator \"{}\"", operator);
                        return self.fail(KestrelError::new(
                            &format!("unknown positional operator \"{}\"", operator),
                            ErrorKind::UnknownPositionalOperator,
                        ));
                    }
                    Segment::AllPositional => None,
                    Segment::Filtered(identifier) => Some(identifier),
                };

                let doc: &'a Document = self.doc;
                let items = match doc.lookup(&prefix) {
                    Value::Array(items) => items,
                    _ => {
                        log::error!(
                            "expected array at \"{}\" to match against positional operator",
                            prefix
                        );
                        return self.fail(KestrelError::new(
                            &format!(
                                "expected array at \"{}\" to match against positional operator",
                                prefix
                            ),
                            ErrorKind::NonArrayTarget,
                        ));
                    }
                };

                let accepted = match self.accepted_indexes(items, identifier) {
                    Ok(accepted) => accepted,
                    Err(err) => return self.fail(err),
                };
                log::trace!(
                    "Expanded {} at {} into {} of {} elements",
                    segment,
                    prefix,
                    accepted.len(),
                    items.len()
                );

                // pushed in reverse so the lowest index is resolved first
                for index in accepted.into_iter().rev() {
                    self.stack.push(Frame {
                        prefix: format!("{}{}{}", prefix, FIELD_SEPARATOR, index),
                        next: position + 1,
                    });
                }
                break;
            }
        }

        self.done = true;
        None
    }
}

impl<'a, M: Matcher + ?Sized> FusedIterator for ResolvedPaths<'a, M> {}
