use kestrel::collection::Doc;
use kestrel::common::Column;
use kestrel::errors::ErrorKind;
use kestrel::index::{non_unique_index, unique_index, Index, IndexOptions};
use kestrel::{doc, val};
use kestrel_int_test::test_util::{cleanup, create_test_context, run_test, values_at};
use std::sync::Arc;

#[test]
fn test_unique_index_on_fixtures() {
    run_test(
        create_test_context,
        |ctx| {
            let options = unique_index(vec![Column::ascending("first_name")]);
            let index = Index::with_config(&options, &ctx.config());
            for doc in ctx.docs() {
                index.try_add(&doc)?;
            }
            assert_eq!(index.len(), 3);

            let clash: Doc = Arc::new(doc! { first_name: "fn2" });
            assert!(!index.add(&clash));
            // key lookup only, the clashing handle counts as present
            assert!(index.has(&clash));

            let err = index.try_add(&clash).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UniqueConstraintViolation);
            assert_eq!(err.message(), "Unique constraint violated for index [first_name: 1]");
            assert_eq!(index.len(), 3);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_non_unique_index_groups_by_key() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            let options = non_unique_index(vec![Column::ascending("last_name")]);
            let index = Index::with_config(&options, &ctx.config());
            for doc in &docs {
                assert!(index.add(doc));
            }
            assert_eq!(index.len(), 2);
            assert!(docs.iter().all(|doc| index.has(doc)));

            let lookalike: Doc = Arc::new(doc! { last_name: "ln2" });
            assert!(!index.has(&lookalike));
            assert!(!index.remove(&lookalike));

            let mut sizes = Vec::new();
            index.ascend(|entry| {
                sizes.push(entry.len());
                true
            });
            assert_eq!(sizes, vec![1, 2]);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_remove_drops_empty_entries() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            let index = Index::new(false, vec![Column::ascending("last_name")]);
            for doc in &docs {
                index.add(doc);
            }

            assert!(index.remove(&docs[1]));
            assert!(!index.has(&docs[1]));
            assert!(index.has(&docs[2]));
            assert_eq!(index.len(), 2);

            assert!(index.remove(&docs[2]));
            assert_eq!(index.len(), 1);
            assert!(!index.remove(&docs[2]));

            assert!(index.remove(&docs[0]));
            assert!(index.is_empty());
            assert!(index.documents().is_empty());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_clone_is_an_independent_snapshot() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            let index = Index::new(true, vec![Column::ascending("_id")]);
            for doc in &docs {
                index.add(doc);
            }

            let snapshot = index.clone();
            assert!(index.remove(&docs[0]));
            let extra: Doc = Arc::new(doc! { _id: 42 });
            assert!(snapshot.add(&extra));

            assert!(snapshot.has(&docs[0]));
            assert!(!index.has(&extra));
            assert_eq!(index.len(), 2);
            assert_eq!(snapshot.len(), 4);
            assert!(Arc::ptr_eq(&snapshot.documents()[1], &docs[0]));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_index_from_definition() {
    run_test(
        create_test_context,
        |ctx| {
            let options = IndexOptions::from_definition(&doc! { last_name: 1, birth_day: (-1) }, false)?;
            let index = Index::with_config(&options, &ctx.config());
            for doc in ctx.docs() {
                index.add(&doc);
            }

            // ln1 first, then the two ln2 documents with the later birth day first
            assert_eq!(
                values_at(&index.documents(), "first_name"),
                vec![val!("fn1"), val!("fn3"), val!("fn2")]
            );

            let err = IndexOptions::from_definition(&doc! { last_name: "asc" }, false).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::ValidationError);
            assert!(IndexOptions::from_definition(&doc! {}, true).is_err());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_documents_with_missing_key_sort_first() {
    run_test(
        create_test_context,
        |ctx| {
            let index = Index::new(false, vec![Column::ascending("list")]);
            for doc in ctx.docs() {
                index.add(&doc);
            }

            let documents = index.documents();
            assert_eq!(documents.len(), 3);
            assert!(documents[0].get("list").is_missing());
            assert_eq!(documents[0].get("first_name"), val!("fn3"));
            Ok(())
        },
        cleanup,
    )
}
