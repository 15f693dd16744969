use kestrel::collection::{sort_by_columns, Doc};
use kestrel::common::{order, Column};
use kestrel::index::{non_unique_index, unique_index, Index};
use kestrel::val;
use kestrel_int_test::test_util::{
    cleanup, create_test_context, numbered_docs, run_test, values_at,
};
use std::cmp::Ordering;
use std::sync::Arc;

fn columns() -> Vec<Column> {
    vec![Column::ascending("group"), Column::descending("seq")]
}

#[test]
fn test_compound_order_matches_sort() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = numbered_docs(40, 3);
            let index = Index::with_config(&unique_index(columns()), &ctx.config());
            for doc in docs.iter().rev() {
                index.try_add(doc)?;
            }

            let indexed = index.documents();
            let mut sorted = docs.clone();
            sort_by_columns(&mut sorted, &columns());

            assert_eq!(indexed.len(), 40);
            for (a, b) in indexed.iter().zip(sorted.iter()) {
                assert!(Arc::ptr_eq(a, b));
            }
            for pair in indexed.windows(2) {
                assert_eq!(order(&pair[0], &pair[1], &columns()), Ordering::Less);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_descending_column_within_group() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = numbered_docs(9, 3);
            let index = Index::with_config(&unique_index(columns()), &ctx.config());
            for doc in &docs {
                index.add(doc);
            }

            assert_eq!(
                values_at(&index.documents(), "seq"),
                vec![
                    val!(6i64),
                    val!(3i64),
                    val!(0i64),
                    val!(7i64),
                    val!(4i64),
                    val!(1i64),
                    val!(8i64),
                    val!(5i64),
                    val!(2i64),
                ]
            );
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_many_entries_survive_node_splits_and_merges() {
    run_test(
        create_test_context,
        |ctx| {
            // capacity 4 forces many splits
            assert_eq!(ctx.config().index_node_capacity(), 4);
            let docs = numbered_docs(200, 200);
            let index = Index::with_config(&unique_index(vec![Column::ascending("seq")]), &ctx.config());

            // insert in an interleaved order
            for doc in docs.iter().step_by(2).chain(docs.iter().skip(1).step_by(2)) {
                assert!(index.add(doc));
            }
            assert_eq!(index.len(), 200);
            assert!(docs.iter().all(|doc| index.has(doc)));

            let seqs: Vec<i64> = index
                .documents()
                .iter()
                .filter_map(|doc| doc.get("seq").as_i64())
                .collect();
            assert_eq!(seqs, (0..200).collect::<Vec<i64>>());

            for doc in docs.iter().filter(|doc| doc.get("seq").as_i64().unwrap_or(0) % 3 != 0) {
                assert!(index.remove(doc));
            }
            assert_eq!(index.len(), 67);

            let mut visited = 0;
            index.ascend(|entry| {
                visited += entry.len();
                visited < 10
            });
            assert_eq!(visited, 10);
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_non_unique_compound_entries() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = numbered_docs(12, 4);
            let index = Index::with_config(
                &non_unique_index(vec![Column::descending("group")]),
                &ctx.config(),
            );
            for doc in &docs {
                assert!(index.add(doc));
                // adding the same handle twice is a no-op
                assert!(index.add(doc));
            }

            assert_eq!(index.len(), 4);
            let mut groups = Vec::new();
            index.ascend(|entry: &[Doc]| {
                assert_eq!(entry.len(), 3);
                groups.push(entry[0].get("group"));
                true
            });
            assert_eq!(groups, vec![val!(3i64), val!(2i64), val!(1i64), val!(0i64)]);
            Ok(())
        },
        cleanup,
    )
}
