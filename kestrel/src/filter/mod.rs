//! Filter evaluation.
//!
//! Query evaluation proper lives outside this crate; the path resolver only
//! needs to ask whether an array element satisfies an array filter. The
//! [Matcher] trait is that seam, and [BasicMatcher] is a ready-made
//! implementation covering the common operators.

mod matcher;

pub use matcher::*;
