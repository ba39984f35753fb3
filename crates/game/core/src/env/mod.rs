//! Collaborators the rules consult but do not own.
//!
//! [`rng`] provides the deterministic dice every roll goes through, and
//! [`content`] defines the request/response contract for procedural content
//! together with the [`ContentOracle`] trait implemented by fallback sources.
mod content;
mod rng;

pub use content::{
    AreaRequest, CombatActionRequest, ContentOracle, EnemyMove, EnemyRequest,
    GeneratedCombatAction, Loot, LootRequest, LootSource, PlayerStats, StoryEventRequest,
};
pub use rng::{Dice, PcgRng, RngOracle, Roll, compute_seed};
