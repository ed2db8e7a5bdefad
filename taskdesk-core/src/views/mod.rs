//! Pure projections over already-fetched lists.
//!
//! Nothing here does I/O or keeps state; every function is a function of
//! its arguments (including `now`, which callers pass in).

mod catalog;
mod filter;
mod selection;
mod stats;
mod vital;

pub use catalog::*;
pub use filter::*;
pub use selection::*;
pub use stats::*;
pub use vital::*;
