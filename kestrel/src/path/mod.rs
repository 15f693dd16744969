//! Positional path resolution.
//!
//! Update operators address array elements through positional segments:
//! `items.$[].qty` touches the `qty` of every element of `items`, and
//! `items.$[big].qty` only those elements accepted by the array filter
//! named `big`. [resolve] turns such a path into the concrete paths it
//! addresses in a given document, such as `items.0.qty` and `items.2.qty`.
//!
//! ```rust
//! use kestrel::doc;
//! use kestrel::filter::BasicMatcher;
//! use kestrel::path::resolve_all;
//!
//! let doc = doc! { items: [{ qty: 5 }, { qty: 50 }, { qty: 500 }] };
//! let filters = vec![doc! { "big.qty": { "$gte": 50 } }];
//!
//! let paths = resolve_all("items.$[big].qty", &doc, &filters, &BasicMatcher).unwrap();
//! assert_eq!(paths, vec!["items.1.qty", "items.2.qty"]);
//! ```

mod resolver;
mod segment;

pub use resolver::*;
pub use segment::*;
