//! Records exchanged with the taskdesk API.
//!
//! The client never owns these; they are transient copies of server state.

mod account;
mod category;
pub mod datetime;
mod event;
mod todo;
mod upload;

pub use account::*;
pub use category::*;
pub use event::*;
pub use todo::*;
pub use upload::*;
