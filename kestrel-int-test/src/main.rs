use kestrel::collection::{collect, select, sort, Doc};
use kestrel::common::Column;
use kestrel::config::KestrelConfig;
use kestrel::{doc, val};
use kestrel::errors::KestrelResult;
use kestrel::filter::BasicMatcher;
use kestrel::index::{non_unique_index, Index};
use kestrel::path::resolve_each;
use kestrel_int_test::test_util::numbered_docs;
use std::time::Instant;

fn main() -> KestrelResult<()> {
    colog::init();
    println!("Starting stress test...");

    let count = 200_000;
    let docs: Vec<Doc> = numbered_docs(count, 1_000);

    let config = KestrelConfig::new();
    config.set_index_node_capacity(128)?;
    config.freeze();

    let options = non_unique_index(vec![Column::ascending("group"), Column::descending("seq")]);
    let index = Index::with_config(&options, &config);

    let start = Instant::now();
    for doc in &docs {
        index.add(doc);
    }
    let duration = start.elapsed();
    println!(
        "Indexed {} documents in {} keys in {:?}",
        count,
        index.len(),
        duration
    );

    let start = Instant::now();
    let (mut selected, _) = select(&docs, 0, |d| (d.get("group") == val!(7i64), false));
    sort(&mut selected, "seq", true);
    let distinct = collect(&docs, "group", true, true);
    println!(
        "Selected {} documents and {} distinct groups in {:?}",
        selected.len(),
        distinct.len(),
        start.elapsed()
    );

    let start = Instant::now();
    for doc in &docs {
        index.remove(doc);
    }
    println!("Removed all documents in {:?}, {} keys left", start.elapsed(), index.len());

    let nested = doc! {
        rows: [
            { cells: [1, 2, 3, 4, 5] },
            { cells: [1, 2, 3, 4, 5] },
            { cells: [1, 2, 3, 4, 5] },
        ],
    };
    let start = Instant::now();
    let mut resolved = 0usize;
    for _ in 0..100_000 {
        resolve_each("rows.$[].cells.$[]", &nested, &[], &BasicMatcher, |_| {
            resolved += 1;
            Ok(())
        })?;
    }
    println!("Resolved {} paths in {:?}", resolved, start.elapsed());

    Ok(())
}
