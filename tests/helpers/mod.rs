//! Shared test helpers for bridge integration tests.
//!
//! Note: `helpers/mod.rs` instead of `helpers.rs` because Cargo treats
//! top-level `.rs` files in `tests/` as standalone integration tests.

pub mod recording_sink;
pub mod scripted_remote;
