mod ordered_tree;

pub use ordered_tree::*;
