//! ttris (workspace facade crate).
//!
//! Exposes the rules engine as `ttris::{core, types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use ttris_core as core;
pub use ttris_types as types;
