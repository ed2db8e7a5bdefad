//! Defaults shared across the crate.

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_ASSET_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// How many active/completed tasks the dashboard shows.
pub const DASHBOARD_ACTIVE_LIMIT: usize = 3;
pub const DASHBOARD_COMPLETED_LIMIT: usize = 2;

/// Events rendered per calendar cell before "+N more".
pub const DEFAULT_EVENTS_PER_CELL: usize = 3;

/// Minimum length accepted for a new password.
pub const MIN_PASSWORD_LEN: usize = 8;
