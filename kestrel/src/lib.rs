//! # Kestrel - embeddable document engine core
//!
//! Kestrel is the read/write core of an embedded document database. It does
//! not store anything by itself; a storage layer hands it documents and it
//! provides the pieces needed to query, sort and index them consistently.
//!
//! ## Components
//!
//! - [common]: the [common::Value] model and the total order over values
//!   ([common::compare]) that every other component uses
//! - [collection]: documents, dotted path access, and the list primitives
//!   select, sort, collect and difference
//! - [index]: concurrency-safe secondary indexes over compound keys
//! - [path]: expansion of `$[]` and `$[identifier]` positional operators
//!   into concrete paths
//! - [filter]: the [filter::Matcher] seam used for array filters, and a
//!   basic operator evaluator
//! - [config]: tunables shared by the components
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use kestrel::collection::{select, sort, Doc};
//! use kestrel::common::Column;
//! use kestrel::filter::{BasicMatcher, Matcher};
//! use kestrel::index::Index;
//! use kestrel::{doc, val};
//!
//! let docs: Vec<Doc> = vec![
//!     Arc::new(doc! { name: "ada", age: 36 }),
//!     Arc::new(doc! { name: "bob", age: 17 }),
//!     Arc::new(doc! { name: "cyd", age: 52 }),
//! ];
//!
//! let index = Index::new(true, vec![Column::ascending("name")]);
//! for doc in &docs {
//!     assert!(index.add(doc));
//! }
//!
//! let adult = doc! { age: { "$gte": 18 } };
//! let (mut adults, _) = select(&docs, 0, |d| (BasicMatcher.matches(d, &adult).unwrap_or(false), false));
//! sort(&mut adults, "age", true);
//! assert_eq!(adults[0].get("name"), val!("cyd"));
//! ```
//!
//! ## Errors
//!
//! Fallible operations return [errors::KestrelResult]. Each
//! [errors::KestrelError] carries an [errors::ErrorKind] to branch on.

pub mod collection;
pub mod common;
pub mod config;
pub mod errors;
pub mod filter;
pub mod index;
pub mod path;
