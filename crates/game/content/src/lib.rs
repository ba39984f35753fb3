//! Content for the role-playing game.
//!
//! - [`FallbackContent`]: deterministic answers used when the generator fails
//! - [`ProceduralContent`]: seeded content for running without a generator
//! - [`StoryCatalog`]: built-in milestone events, overridable from RON
//! - [`loaders`]: TOML game configuration and RON story catalogs
//!
//! Both content sources implement [`rpg_core::ContentOracle`].

pub mod catalog;
pub mod fallback;
pub mod procedural;
pub mod starter;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::StoryCatalog;
pub use fallback::{FallbackContent, fallback_enemy};
pub use procedural::ProceduralContent;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, StoryCatalogLoader};
