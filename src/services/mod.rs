//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `catalog.rs` — pure filter/sort engine over the listing catalog.
//! - `search.rs` — local/remote result sourcing with stale-but-valid fallback.
//! - `favorites.rs` — favorites set toggling and state conversion.
//! - `auth.rs` — bearer-token session state machine.
//! - `storage.rs` — config, state, session token, cache paths, audit log.
//! - `output.rs` — JSON/text output helpers and the error envelope.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Read-path network failures degrade to cached data, never to errors.

pub mod auth;
pub mod catalog;
pub mod favorites;
pub mod output;
pub mod search;
pub mod storage;
