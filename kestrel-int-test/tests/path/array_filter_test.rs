use kestrel::collection::Document;
use kestrel::doc;
use kestrel::errors::{ErrorKind, KestrelError, KestrelResult};
use kestrel::filter::{BasicMatcher, Matcher};
use kestrel::path::resolve_all;
use kestrel_int_test::test_util::{cleanup, create_test_context, run_test};
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_single_expression() {
    run_test(
        create_test_context,
        |_ctx| {
            let doc = doc! { foo: ["bar", "baz", "quz"] };
            let filters = vec![doc! { af1: { "$ne": "quz" } }];
            assert_eq!(
                resolve_all("foo.$[af1]", &doc, &filters, &BasicMatcher)?,
                vec!["foo.0", "foo.1"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_multiple_expressions() {
    run_test(
        create_test_context,
        |_ctx| {
            let doc = doc! {
                foo: [
                    [(-10), 20, 30, (-40), 4],
                    [10, (-20), (-30), 40],
                ],
            };
            let filters = vec![
                doc! { af1: { "$size": 5 } },
                doc! { af2: { "$lt": 0 } },
            ];
            assert_eq!(
                resolve_all("foo.$[af1].$[af2]", &doc, &filters, &BasicMatcher)?,
                vec!["foo.0.0", "foo.0.3"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_complex_expressions() {
    run_test(
        create_test_context,
        |_ctx| {
            let doc = doc! {
                foo: [
                    { ok: true, val: 20, bar: ["foo", "bar"] },
                    { ok: false, val: 100, bar: ["foo", "bar"] },
                    { ok: true, val: 120, bar: ["foo", "bar"] },
                    { ok: false, val: 20, bar: ["foo", "bar"] },
                ],
            };
            let filters = vec![
                doc! { "af1.ok": true, "af1.val": { "$gt": 50 } },
                doc! { af2: "foo" },
            ];
            assert_eq!(
                resolve_all("foo.$[af1].bar.$[af2]", &doc, &filters, &BasicMatcher)?,
                vec!["foo.2.bar.0"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_filters_on_fixture_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            let filters = vec![
                doc! { big: { "$gte": 4 } },
                doc! { word: { "$regex": "^t" } },
            ];
            assert_eq!(
                resolve_all("arr.$[big]", &docs[2], &filters, &BasicMatcher)?,
                vec!["arr.0", "arr.1", "arr.2"]
            );
            assert_eq!(
                resolve_all("arr.$[big]", &docs[0], &filters, &BasicMatcher)?,
                Vec::<String>::new()
            );
            assert_eq!(
                resolve_all("list.$[word]", &docs[0], &filters, &BasicMatcher)?,
                vec!["list.1", "list.2"]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_missing_and_failing_filters() {
    run_test(
        create_test_context,
        |_ctx| {
            let doc = doc! { foo: [1, 2] };

            let err = resolve_all("foo.$[nope]", &doc, &[doc! { other: 1 }], &BasicMatcher)
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ArrayFilterNotFound);
            assert_eq!(err.message(), "no array filter found for identifier \"nope\"");

            let filters = vec![doc! { x: { "$near": 1 } }];
            let err = resolve_all("foo.$[x]", &doc, &filters, &BasicMatcher).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::FilterError);
            let cause = err.cause().map(|cause| cause.message().to_string());
            assert_eq!(cause.as_deref(), Some("Unknown operator $near"));
            Ok(())
        },
        cleanup,
    )
}

struct CountingMatcher {
    calls: AtomicUsize,
}

impl Matcher for CountingMatcher {
    fn matches(&self, doc: &Document, filter: &Document) -> KestrelResult<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        BasicMatcher.matches(doc, filter)
    }
}

#[test]
fn test_custom_matcher_sees_each_element_once() {
    run_test(
        create_test_context,
        |_ctx| {
            let matcher = CountingMatcher {
                calls: AtomicUsize::new(0),
            };
            let doc = doc! { foo: [{ bar: [1, 2, 3] }, { bar: [4] }] };
            let filters = vec![doc! { odd: { "$in": [1, 3, 5] } }];

            let resolved = resolve_all("foo.$[].bar.$[odd]", &doc, &filters, &matcher)?;
            assert_eq!(resolved, vec!["foo.0.bar.0", "foo.0.bar.2"]);
            assert_eq!(matcher.calls.load(Ordering::SeqCst), 4);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_closure_matcher_errors_carry_their_cause() {
    run_test(
        create_test_context,
        |_ctx| {
            let refusing = |_: &Document, _: &Document| -> KestrelResult<bool> {
                Err(KestrelError::new("matcher offline", ErrorKind::InternalError))
            };
            let doc = doc! { foo: [1] };
            let err = resolve_all("foo.$[x]", &doc, &[doc! { x: 1 }], &refusing).unwrap_err();

            assert_eq!(err.kind(), &ErrorKind::FilterError);
            assert_eq!(err.message(), "array filter for identifier \"x\" failed");
            assert_eq!(err.cause().map(|cause| cause.kind()), Some(&ErrorKind::InternalError));
            Ok(())
        },
        cleanup,
    )
}
