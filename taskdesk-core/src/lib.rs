//! Core library for taskdesk.
//!
//! - `http` / `api`: authenticated REST client with single-flight token refresh
//! - `session`: sign-in state on top of the client
//! - `views` / `calendar`: pure projections over fetched lists
//! - `batch`: concurrent page loads and bulk edits

pub mod api;
pub mod batch;
pub mod calendar;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod image;
pub mod model;
pub mod session;
pub mod token_store;
pub mod views;

pub use config::Settings;
pub use error::{TaskdeskError, TaskdeskResult};
pub use http::{ApiClient, ApiRequest, AuthStatus};
pub use session::{AuthOutcome, Session};
pub use token_store::{FileTokenStore, MemoryTokenStore, StoredTokens, TokenStore};
