//! Documents and the list primitives built on them.
//!
//! A [Document] is an ordered map of field names to [crate::common::Value]s.
//! Lists, sets and indexes never own documents: they hold [Doc] handles,
//! and a document is updated by replacing its handle.
//!
//! ```rust
//! use std::sync::Arc;
//! use kestrel::collection::{collect, sort, Doc};
//! use kestrel::{doc, val};
//!
//! let mut list: Vec<Doc> = vec![
//!     Arc::new(doc! { name: "b", age: 30 }),
//!     Arc::new(doc! { name: "a", age: 20 }),
//! ];
//! sort(&mut list, "name", false);
//! assert_eq!(collect(&list, "age", false, false), vec![val!(20), val!(30)]);
//! ```

mod document;
mod list;
mod set;

pub use document::*;
pub use list::*;
pub use set::*;

use std::sync::Arc;

/// A shared, immutable document handle. Identity is the `Arc` pointer.
pub type Doc = Arc<Document>;

/// An ordered sequence of document handles.
pub type List = Vec<Doc>;
