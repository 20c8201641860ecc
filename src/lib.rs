//! Polyominohs (workspace facade crate).
//!
//! Re-exports the engine crates under `polyominohs::{core,types}` so drivers depend on
//! one package while the implementation lives in dedicated crates under `crates/`.

pub use polyominohs_core as core;
pub use polyominohs_types as types;
