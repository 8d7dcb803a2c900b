//! Common types shared across the crate: the [Value] model, well-known
//! field names and sort orders.

mod constants;
mod sort_order;
mod value;

pub use constants::*;
pub use sort_order::*;
pub use value::*;
