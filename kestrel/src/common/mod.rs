//! Values and the total order over them.

pub mod util;

mod decimal;
mod order;
mod sort_order;
pub(crate) mod value;

pub use decimal::*;
pub use order::*;
pub use sort_order::*;
pub use value::Value;
