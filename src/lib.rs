//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so drivers and tests can
//! write `blockfall::{core, engine, types}`, and hosts the pieces of the
//! headless simulation driver.

pub mod autoplay;
pub mod cli;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;
