//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `account.rs` — login/register/logout/whoami/profile.
//! - `catalog.rs` — browse/search/show/favorite/categories/refresh/sell.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod account;
pub mod catalog;

pub use account::handle_account_commands;
pub use catalog::handle_catalog_commands;
