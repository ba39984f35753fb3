//! Boundary to the procedural content generator.
//!
//! The engine never talks to a [`ContentGenerator`] directly: every request
//! goes through the [`ContentGateway`], which bounds it with a timeout,
//! sanitizes the answer, and falls back to a deterministic
//! [`ContentOracle`](rpg_core::ContentOracle) when anything goes wrong.

mod gateway;
mod generator;
mod sanitize;

pub use gateway::ContentGateway;
pub use generator::{ContentGenerator, GeneratorError, OfflineGenerator, OracleGenerator};
