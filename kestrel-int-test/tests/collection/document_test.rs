use kestrel::collection::{get, Document};
use kestrel::common::Value;
use kestrel::{doc, val};
use kestrel_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_get_fixture_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let docs = ctx.docs();
            assert_eq!(docs[0].get("first_name"), val!("fn1"));
            assert_eq!(docs[1].get("arr.1"), val!(4));
            assert_eq!(docs[1].get("list.2"), val!("five"));
            assert!(docs[2].get("list").is_missing());
            assert!(docs[2].get("list.0").is_missing());
            assert!(matches!(docs[0].get("data"), Value::Binary { .. }));
            assert!(matches!(docs[0].get("birth_day"), Value::DateTime(_)));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_lookup_through_mixed_nesting() {
    run_test(
        create_test_context,
        |_ctx| {
            let doc = doc! {
                orders: [
                    { items: [{ sku: "a", qty: 1 }, { sku: "b", qty: 2 }] },
                    { items: [] },
                ],
                meta: { "dotted.key": 1, matrix: [[1, 2], [3, 4]] },
            };

            assert_eq!(get(&doc, "orders.0.items.1.sku"), &val!("b"));
            assert_eq!(get(&doc, "meta.matrix.1.1"), &val!(4));
            assert!(get(&doc, "orders.1.items.0").is_missing());
            assert!(get(&doc, "orders.2").is_missing());
            assert!(get(&doc, "orders.items").is_missing());
            assert!(get(&doc, "orders.-1").is_missing());
            assert!(get(&doc, "orders.0.items.0.sku.x").is_missing());
            // a dotted field name cannot be reached through a path
            assert!(get(&doc, "meta.dotted.key").is_missing());
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_missing_is_not_null() {
    run_test(
        create_test_context,
        |_ctx| {
            let mut doc = Document::new();
            doc.put("present", Value::Null);
            assert!(doc.get("present").is_null());
            assert!(doc.get("absent").is_missing());
            assert_ne!(doc.get("present"), doc.get("absent"));
            Ok(())
        },
        cleanup,
    )
}

#[test]
fn test_documents_with_same_fields_in_other_order_differ() {
    run_test(
        create_test_context,
        |_ctx| {
            let a = doc! { x: 1, y: 2 };
            let mut b = Document::new();
            b.put("y", 2);
            b.put("x", 1);
            assert_ne!(a, b);

            b.remove("y");
            b.put("y", 2);
            assert_eq!(a, b);
            Ok(())
        },
        cleanup,
    )
}
