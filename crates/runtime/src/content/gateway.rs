use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use rpg_core::{
    Area, AreaRequest, CombatActionRequest, ContentOracle, Enemy, EnemyRequest,
    GeneratedCombatAction, Item, Loot, LootRequest, Quest, StoryEvent, StoryEventRequest,
};

use super::{ContentGenerator, GeneratorError, sanitize};

/// Bounded, validated access to generated content with deterministic
/// fallbacks. Generation failures are logged and never surfaced.
#[derive(Clone)]
pub struct ContentGateway {
    generator: Arc<dyn ContentGenerator>,
    fallback: Arc<dyn ContentOracle>,
    timeout: Duration,
}

impl ContentGateway {
    pub fn new(
        generator: Arc<dyn ContentGenerator>,
        fallback: Arc<dyn ContentOracle>,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            fallback,
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn starting_area(&self) -> Area {
        self.fallback.starting_area()
    }

    pub fn starting_items(&self) -> Vec<Item> {
        self.fallback.starting_items()
    }

    pub fn starting_quests(&self) -> Vec<Quest> {
        self.fallback.starting_quests()
    }

    pub async fn area(&self, request: &AreaRequest) -> Area {
        let generated = self
            .bounded("area", self.generator.generate_area(request))
            .await
            .and_then(|area| sanitize::area(area, request));
        self.settle("area", generated, || self.fallback.area(request))
    }

    pub async fn enemy(&self, request: &EnemyRequest) -> Enemy {
        let generated = self
            .bounded("enemy", self.generator.generate_enemy(request))
            .await
            .and_then(sanitize::enemy);
        self.settle("enemy", generated, || self.fallback.enemy(request))
    }

    pub async fn combat_action(&self, request: &CombatActionRequest) -> GeneratedCombatAction {
        let generated = self
            .bounded(
                "combat_action",
                self.generator.generate_combat_action(request),
            )
            .await
            .map(|action| sanitize::combat_action(action, request));
        self.settle("combat_action", generated, || {
            self.fallback.combat_action(request)
        })
    }

    pub async fn loot(&self, request: &LootRequest) -> Loot {
        let generated = self
            .bounded("loot", self.generator.generate_loot(request))
            .await
            .map(sanitize::loot);
        self.settle("loot", generated, || self.fallback.loot(request))
    }

    pub async fn story_event(&self, request: &StoryEventRequest) -> StoryEvent {
        let generated = self
            .bounded("story_event", self.generator.generate_story_event(request))
            .await
            .and_then(|event| sanitize::story_event(event, request));
        self.settle("story_event", generated, || {
            let mut event = self.fallback.story_event(request);
            event.id = request.event_id.clone();
            event
        })
    }

    async fn bounded<T>(
        &self,
        kind: &'static str,
        request: impl Future<Output = Result<T, GeneratorError>>,
    ) -> Result<T, GeneratorError> {
        debug!(kind, "requesting generated content");
        tokio::time::timeout(self.timeout, request)
            .await
            .map_err(|_| GeneratorError::Timeout(self.timeout))?
    }

    fn settle<T>(
        &self,
        kind: &'static str,
        generated: Result<T, GeneratorError>,
        fallback: impl FnOnce() -> T,
    ) -> T {
        match generated {
            Ok(content) => content,
            Err(error) => {
                warn!(kind, %error, "content generation failed; using fallback");
                fallback()
            }
        }
    }
}
