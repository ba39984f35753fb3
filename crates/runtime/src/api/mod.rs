//! Public runtime API surface.
//!
//! Types handed to hosts: the per-session handle and the error type every
//! runtime call reports.

pub mod errors;
pub mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::SessionHandle;
