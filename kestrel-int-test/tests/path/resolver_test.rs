use kestrel::collection::Document;
use kestrel::doc;
use kestrel::errors::{ErrorKind, KestrelError, KestrelResult};
use kestrel::filter::BasicMatcher;
use kestrel::path::{resolve, resolve_all, resolve_each};
use kestrel_int_test::test_util::{cleanup, create_test_context, run_test};

fn paths(path: &str, doc: &Document) -> KestrelResult<Vec<String>> {
    resolve_all(path, doc, &[], &BasicMatcher)
}

#[test]
fn test_resolve_fixture_arrays() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            assert_eq!(paths("arr.$[]", &docs[0])?, vec!["arr.0", "arr.1", "arr.2"]);
            assert_eq!(paths("list.$[]", &docs[1])?, vec!["list.0", "list.1", "list.2"]);

            let err = paths("list.$[]", &docs[2]).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NonArrayTarget);
            assert_eq!(
                err.to_string(),
                "expected array at \"list\" to match against positional operator"
            );

            let err = paths("body.$[]", &docs[0]).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NonArrayTarget);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_nested_and_adjacent_operators() {
    run_test(
        create_test_context,
        |_ctx| {
            let nested = doc! { foo: [{ bar: [1, 2] }, { bar: [3] }] };
            assert_eq!(
                paths("foo.$[].bar.$[]", &nested)?,
                vec!["foo.0.bar.0", "foo.0.bar.1", "foo.1.bar.0"]
            );

            let adjacent = doc! { foo: [[1, 2], [3]] };
            assert_eq!(
                paths("foo.$[].$[]", &adjacent)?,
                vec!["foo.0.0", "foo.0.1", "foo.1.0"]
            );

            let trailing = doc! { foo: [[{ bar: 1 }, { bar: 2 }], [{ bar: 3 }]] };
            assert_eq!(
                paths("foo.$[].$[].bar", &trailing)?,
                vec!["foo.0.0.bar", "foo.0.1.bar", "foo.1.0.bar"]
            );

            let indexed = doc! { foo: [[1, 2], [1]] };
            assert_eq!(paths("foo.$[].0", &indexed)?, vec!["foo.0.0", "foo.1.0"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_paths_without_operators_ignore_the_document() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            assert_eq!(paths("foo", &docs[0])?, vec!["foo"]);
            assert_eq!(paths("foo.2.bar.7.baz", &docs[0])?, vec!["foo.2.bar.7.baz"]);
            assert_eq!(paths("arr.5", &docs[0])?, vec!["arr.5"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_error_messages() {
    run_test(
        create_test_context,
        |_ctx| {
            let cases = vec![
                ("$[]", doc! {}, ErrorKind::RootPositionalOperator, "unsupported root positional operator \"$[]\""),
                ("bar.$[]", doc! { bar: 1 }, ErrorKind::NonArrayTarget, "expected array at \"bar\" to match against positional operator"),
                ("bar.$", doc! { bar: [] }, ErrorKind::ImplicitPositionalOperator, "the implicit positional operator is not yet supported"),
                ("bar.$foo", doc! { bar: [] }, ErrorKind::UnknownPositionalOperator, "unknown positional operator \"$foo\""),
                ("bar.$[1x]", doc! { bar: [] }, ErrorKind::UnknownPositionalOperator, "unknown positional operator \"$[1x]\""),
            ];

            for (path, doc, kind, message) in cases {
                let err = paths(path, &doc).unwrap_err();
                assert_eq!(err.kind(), &kind, "{}", path);
                assert_eq!(err.to_string(), message);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_error_after_partial_results() {
    run_test(
        create_test_context,
        |_ctx| {
            let doc = doc! { foo: [[1], 2, [3]] };
            let results: Vec<KestrelResult<String>> =
                resolve("foo.$[].$[]", &doc, &[], &BasicMatcher).collect();

            assert_eq!(results.len(), 2);
            assert_eq!(results[0].as_ref().ok().map(String::as_str), Some("foo.0.0"));
            let err = results[1].as_ref().unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::NonArrayTarget);
            assert_eq!(
                err.message(),
                "expected array at \"foo.1\" to match against positional operator"
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_resolve_each_propagates_callback_errors() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            let mut seen = Vec::new();
            let result = resolve_each("arr.$[]", &docs[1], &[], &BasicMatcher, |path| {
                if path.ends_with(".1") {
                    return Err(KestrelError::new("path rejected", ErrorKind::InvalidOperation));
                }
                seen.push(path.to_string());
                Ok(())
            });

            let err = result.unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidOperation);
            assert_eq!(seen, vec!["arr.0"]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_resolution_leaves_document_unchanged() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            let before = (*docs[0]).clone();
            let _ = paths("arr.$[]", &docs[0])?;
            let _ = paths("body.$[]", &docs[0]);
            assert_eq!(*docs[0], before);
            Ok(())
        },
        cleanup,
    )
}
