//! Repository functions over the single SQLite schema (see `db.rs`).
//!
//! Every function takes the pool; connections are acquired per statement and
//! released on every exit path. Multi-statement writes use a transaction.

pub mod history;
pub mod profile;

pub use history::{append_email, list_history};
pub use profile::{clear_all, get_profile, save_profile, PROFILE_ID};
