use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use kestrel::collection::{Doc, Document, List};
use kestrel::common::Value;
use kestrel::config::KestrelConfig;
use kestrel::doc;
use kestrel::errors::{ErrorKind, KestrelError, KestrelResult};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

/// Runs `test` between `before` and `after`.
///
/// `after` runs even when the test fails or panics, and the failure is
/// reported with the error's debug form, including its cause chain.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> KestrelResult<()>,
    B: Fn() -> KestrelResult<TestContext>,
    A: Fn(TestContext) -> KestrelResult<()>,
{
    let start_time = Instant::now();

    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let result = catch_unwind(AssertUnwindSafe(|| test(ctx.clone())));
    let after_result = after(ctx);
    let elapsed = start_time.elapsed();

    match result {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => {
            eprintln!("\n==================== TEST FAILED ({:?}) ====================", elapsed);
            panic!("Test failed: {:?}", e);
        }
        Err(panic_err) => {
            let err_msg = if let Some(s) = panic_err.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_err.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            eprintln!("\n==================== TEST PANICKED ({:?}) ====================", elapsed);
            panic!("Test panicked: {}", err_msg);
        }
    }

    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    config: KestrelConfig,
    docs: List,
}

impl TestContext {
    pub fn new(config: KestrelConfig, docs: List) -> Self {
        Self { config, docs }
    }

    pub fn config(&self) -> KestrelConfig {
        self.config.clone()
    }

    pub fn docs(&self) -> List {
        self.docs.clone()
    }
}

/// A frozen configuration with small index nodes, so that a handful of
/// documents already spreads over several nodes.
pub fn create_test_context() -> KestrelResult<TestContext> {
    let config = KestrelConfig::new();
    config.set_index_node_capacity(4)?;
    config.freeze();

    let docs = create_test_docs()?.into_iter().map(Arc::new).collect();
    Ok(TestContext::new(config, docs))
}

pub fn cleanup(ctx: TestContext) -> KestrelResult<()> {
    // every fixture must still be shared, never mutated in place
    for doc in &ctx.docs {
        if doc.is_empty() {
            log::error!("Fixture document was emptied during the test");
            return Err(KestrelError::new(
                "Fixture document was emptied during the test",
                ErrorKind::InternalError,
            ));
        }
    }
    Ok(())
}

pub fn parse_datetime(s: &str) -> KestrelResult<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(e) => {
            log::error!("Invalid test date {}: {}", s, e);
            Err(KestrelError::new(
                &format!("Invalid test date {}: {}", s, e),
                ErrorKind::ValidationError,
            ))
        }
    }
}

pub fn create_test_docs() -> KestrelResult<Vec<Document>> {
    let dt1 = parse_datetime("2012-07-01T02:15:22+02:00")?;
    let dt2 = parse_datetime("2010-06-12T12:05:35+05:30")?;
    let dt3 = parse_datetime("2014-04-17T22:25:44-04:00")?;

    let doc1 = doc! {
        _id: (ObjectId::from_bytes([1; 12])),
        first_name: "fn1",
        last_name: "ln1",
        birth_day: dt1,
        data: (Value::binary(vec![1u8, 2u8, 3u8])),
        arr: [1, 2, 3],
        list: (vec!["one", "two", "three"]),
        body: "a quick brown fox jump over the lazy dog",
    };

    let doc2 = doc! {
        _id: (ObjectId::from_bytes([2; 12])),
        first_name: "fn2",
        last_name: "ln2",
        birth_day: dt2,
        data: (Value::binary(vec![3u8, 4u8, 3u8])),
        arr: [3, 4, 3],
        list: (vec!["three", "four", "five"]),
        body: "quick hello world from kestrel",
    };

    let doc3 = doc! {
        _id: (ObjectId::from_bytes([3; 12])),
        first_name: "fn3",
        last_name: "ln2",
        birth_day: dt3,
        data: (Value::binary(vec![9u8, 4u8, 8u8])),
        arr: [9, 4, 8],
        body: "Lorem ipsum dolor sit amet, consectetur \
        adipiscing elit. Sed nunc mi, mattis ullamcorper \
        dignissim vitae, condimentum non lorem.",
    };

    Ok(vec![doc1, doc2, doc3])
}

/// Builds `count` documents `{ seq, group, tags }` with `group = seq % groups`.
pub fn numbered_docs(count: usize, groups: usize) -> List {
    (0..count)
        .map(|seq| {
            let seq = seq as i64;
            let group = seq % groups.max(1) as i64;
            Arc::new(doc! {
                seq: seq,
                group: group,
                tags: [(format!("t{}", group)), "all"],
            })
        })
        .collect()
}

pub fn values_at(list: &[Doc], path: &str) -> Vec<Value> {
    list.iter().map(|doc| doc.get(path)).collect()
}

pub fn is_sorted<T: Ord>(iterable: impl IntoIterator<Item = T>, ascending: bool) -> bool {
    let mut iter = iterable.into_iter();
    if let Some(mut prev) = iter.next() {
        for current in iter {
            if ascending {
                if prev > current {
                    return false;
                }
            } else if prev < current {
                return false;
            }
            prev = current;
        }
    }
    true
}
