//! Asynchronous content source abstraction.
//!
//! Runtime users plug in [`ContentGenerator`] implementations so the engine
//! can run against a language model, a seeded procedural source, or scripted
//! fixtures.
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use rpg_core::{
    Area, AreaRequest, CombatActionRequest, ContentOracle, Enemy, EnemyRequest,
    GeneratedCombatAction, Loot, LootRequest, StoryEvent, StoryEventRequest,
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("content generator is not available")]
    Unavailable,

    #[error("content generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("generated content rejected: {0}")]
    Invalid(String),

    #[error("content backend failed: {0}")]
    Backend(String),
}

/// Source of procedurally generated content.
///
/// Answers may be slow, fail, or be malformed; the gateway copes with all
/// three.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate_area(&self, request: &AreaRequest) -> Result<Area, GeneratorError>;

    async fn generate_enemy(&self, request: &EnemyRequest) -> Result<Enemy, GeneratorError>;

    async fn generate_combat_action(
        &self,
        request: &CombatActionRequest,
    ) -> Result<GeneratedCombatAction, GeneratorError>;

    async fn generate_loot(&self, request: &LootRequest) -> Result<Loot, GeneratorError>;

    async fn generate_story_event(
        &self,
        request: &StoryEventRequest,
    ) -> Result<StoryEvent, GeneratorError>;
}

/// Serves every request from a synchronous [`ContentOracle`].
pub struct OracleGenerator<O> {
    oracle: O,
}

impl<O: ContentOracle> OracleGenerator<O> {
    pub fn new(oracle: O) -> Self {
        Self { oracle }
    }
}

#[async_trait]
impl<O: ContentOracle> ContentGenerator for OracleGenerator<O> {
    async fn generate_area(&self, request: &AreaRequest) -> Result<Area, GeneratorError> {
        Ok(self.oracle.area(request))
    }

    async fn generate_enemy(&self, request: &EnemyRequest) -> Result<Enemy, GeneratorError> {
        Ok(self.oracle.enemy(request))
    }

    async fn generate_combat_action(
        &self,
        request: &CombatActionRequest,
    ) -> Result<GeneratedCombatAction, GeneratorError> {
        Ok(self.oracle.combat_action(request))
    }

    async fn generate_loot(&self, request: &LootRequest) -> Result<Loot, GeneratorError> {
        Ok(self.oracle.loot(request))
    }

    async fn generate_story_event(
        &self,
        request: &StoryEventRequest,
    ) -> Result<StoryEvent, GeneratorError> {
        Ok(self.oracle.story_event(request))
    }
}

/// A generator that is never reachable; every request ends in the fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineGenerator;

#[async_trait]
impl ContentGenerator for OfflineGenerator {
    async fn generate_area(&self, _request: &AreaRequest) -> Result<Area, GeneratorError> {
        Err(GeneratorError::Unavailable)
    }

    async fn generate_enemy(&self, _request: &EnemyRequest) -> Result<Enemy, GeneratorError> {
        Err(GeneratorError::Unavailable)
    }

    async fn generate_combat_action(
        &self,
        _request: &CombatActionRequest,
    ) -> Result<GeneratedCombatAction, GeneratorError> {
        Err(GeneratorError::Unavailable)
    }

    async fn generate_loot(&self, _request: &LootRequest) -> Result<Loot, GeneratorError> {
        Err(GeneratorError::Unavailable)
    }

    async fn generate_story_event(
        &self,
        _request: &StoryEventRequest,
    ) -> Result<StoryEvent, GeneratorError> {
        Err(GeneratorError::Unavailable)
    }
}
