//! Shared domain types.
//!
//! Everything that crosses a layer boundary (CLI output, persisted state,
//! service results) lives in `models.rs` so the command handlers and the
//! service layer agree on one schema.

pub mod models;
