use bson::oid::ObjectId;
use chrono::{TimeZone, Utc};
use kestrel::common::{compare, type_class, Decimal, TypeClass, Value};
use kestrel::{doc, val};
use kestrel_int_test::test_util::{cleanup, create_test_context, is_sorted, run_test};
use std::cmp::Ordering;

fn ladder() -> Vec<Value> {
    vec![
        Value::Missing,
        Value::Null,
        val!(f64::NAN),
        val!(f64::NEG_INFINITY),
        val!(i64::MIN),
        val!(-1.5),
        Value::Decimal(Decimal::new(-1, 0)),
        val!(0),
        val!(0.5),
        val!(1i64),
        val!(i64::MAX),
        val!(f64::INFINITY),
        val!(""),
        val!("A"),
        val!("a"),
        val!("ab"),
        Value::Document(doc! {}),
        Value::Document(doc! { a: 1 }),
        Value::Document(doc! { a: 1, b: 1 }),
        Value::Document(doc! { b: 0 }),
        val!(Vec::<i32>::new()),
        val!(vec![1]),
        val!(vec![1, 1]),
        val!(vec![2]),
        Value::Binary { subtype: 9, bytes: vec![9] },
        Value::Binary { subtype: 0, bytes: vec![0, 0] },
        Value::ObjectId(ObjectId::from_bytes([0; 12])),
        Value::ObjectId(ObjectId::from_bytes([1; 12])),
        Value::Bool(false),
        Value::Bool(true),
        Value::DateTime(Utc.timestamp_opt(-10, 0).unwrap()),
        Value::DateTime(Utc.timestamp_opt(10, 0).unwrap()),
        Value::regex("a", "i"),
        Value::regex("b", ""),
    ]
}

#[test]
fn test_ladder_is_strictly_ascending() {
    run_test(
        create_test_context,
        |_ctx| {
            let values = ladder();
            for (i, a) in values.iter().enumerate() {
                for (j, b) in values.iter().enumerate() {
                    assert_eq!(compare(a, b), i.cmp(&j), "{:?} vs {:?}", a, b);
                }
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_type_classes_follow_precedence() {
    run_test(
        create_test_context,
        |_ctx| {
            let classes: Vec<TypeClass> = ladder().iter().map(type_class).collect();
            assert!(is_sorted(classes.iter(), true));
            assert_eq!(classes.first(), Some(&TypeClass::Missing));
            assert_eq!(classes.last(), Some(&TypeClass::Regex));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_std_sort_agrees_with_compare() {
    run_test(
        create_test_context,
        |_ctx| {
            let mut values = ladder();
            values.reverse();
            values.sort();
            for (sorted, expected) in values.iter().zip(ladder().iter()) {
                assert_eq!(compare(sorted, expected), Ordering::Equal);
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_cross_type_numbers_are_equal() {
    run_test(
        create_test_context,
        |_ctx| {
            let twos = vec![
                val!(2),
                val!(2i64),
                val!(2.0),
                Value::Decimal(Decimal::new(200, 2)),
            ];
            for a in &twos {
                for b in &twos {
                    assert_eq!(compare(a, b), Ordering::Equal);
                }
            }
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_fixture_documents_compare_by_content() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            let first = Value::Document((*docs[0]).clone());
            let second = Value::Document((*docs[1]).clone());
            // the first differing pair is the _id
            assert_eq!(compare(&first, &second), Ordering::Less);
            assert_eq!(compare(&first, &first.clone()), Ordering::Equal);
            Ok(())
        },
        cleanup,
    )
}
