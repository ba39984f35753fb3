//! Scripted content generators and session helpers shared by the
//! integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use rpg_content::FallbackContent;
use rpg_core::{
    Action, ActionOutcome, Area, AreaRequest, CombatActionRequest, DangerLevel, Direction, Enemy,
    EnemyRequest, Exit, GameConfig, GeneratedCombatAction, Loot, LootRequest, Rewards, Session,
    StoryEvent, StoryEventRequest,
};
use rpg_runtime::{ContentGateway, ContentGenerator, GameEngine, GeneratorError};

pub const HOST: &str = "alice";
pub const SESSION: &str = "channel-1";
pub const SEED: u64 = 42;
pub const CONTENT_TIMEOUT: Duration = Duration::from_millis(50);

/// Answers the engine would otherwise leave to chance.
#[derive(Clone, Default)]
pub struct Script {
    /// Enemy chance of every generated area; zero keeps arrivals quiet.
    pub area_enemy_chance: u32,
    pub area_name: Option<String>,
    pub enemy: Option<Enemy>,
    pub enemy_move: Option<GeneratedCombatAction>,
    /// Delay before every answer.
    pub delay: Option<Duration>,
}

/// Generator driven by a [`Script`]. Anything left unscripted fails, so the
/// gateway serves it from the fallback.
#[derive(Clone, Default)]
pub struct ScriptedGenerator {
    script: Script,
    calls: Arc<AtomicUsize>,
}

impl ScriptedGenerator {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Arc::default(),
        }
    }

    /// Generated areas are safe glades with no encounters.
    pub fn quiet() -> Self {
        Self::new(Script::default())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.script.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_area(&self, request: &AreaRequest) -> Result<Area, GeneratorError> {
        self.pause().await;
        let name = self
            .script
            .area_name
            .clone()
            .unwrap_or_else(|| "Quiet Glade".to_string());
        Ok(Area::new(request.target_area.clone(), name, DangerLevel::Safe)
            .with_description("Soft grass and birdsong.")
            .with_exit(Exit::open(
                Direction::North,
                format!("{}_north", request.target_area),
            ))
            .with_encounters(self.script.area_enemy_chance, 0))
    }

    async fn generate_enemy(&self, _request: &EnemyRequest) -> Result<Enemy, GeneratorError> {
        self.pause().await;
        self.script.enemy.clone().ok_or(GeneratorError::Unavailable)
    }

    async fn generate_combat_action(
        &self,
        _request: &CombatActionRequest,
    ) -> Result<GeneratedCombatAction, GeneratorError> {
        self.pause().await;
        self.script
            .enemy_move
            .clone()
            .ok_or(GeneratorError::Unavailable)
    }

    async fn generate_loot(&self, _request: &LootRequest) -> Result<Loot, GeneratorError> {
        self.pause().await;
        Ok(Loot {
            items: Vec::new(),
            credits: 0,
            experience: 0,
            narrative: String::new(),
        })
    }

    async fn generate_story_event(
        &self,
        _request: &StoryEventRequest,
    ) -> Result<StoryEvent, GeneratorError> {
        self.pause().await;
        Err(GeneratorError::Unavailable)
    }
}

pub fn engine(generator: impl ContentGenerator + 'static) -> GameEngine {
    engine_with(generator, GameConfig::default())
}

pub fn engine_with(generator: impl ContentGenerator + 'static, config: GameConfig) -> GameEngine {
    let gateway = ContentGateway::new(
        Arc::new(generator),
        Arc::new(FallbackContent::new()),
        CONTENT_TIMEOUT,
    );
    GameEngine::new(gateway, config)
}

pub fn new_session(engine: &GameEngine) -> Session {
    engine
        .start_game_seeded(HOST.into(), SESSION.into(), None, SEED)
        .session
}

/// Parses `input` as the host's command and applies it.
pub async fn act(engine: &GameEngine, session: &Session, input: &str) -> ActionOutcome {
    let action = Action::parse(HOST, input).expect("test commands are well-formed");
    engine.process_action(session, &action).await
}

/// A started session standing in the town square.
pub async fn exploring(engine: &GameEngine) -> Session {
    let outcome = act(engine, &new_session(engine), "begin").await;
    assert!(outcome.success, "begin should succeed: {:?}", outcome.message);
    outcome.session
}

pub fn enemy(health: u32, attack: u32, defense: u32) -> Enemy {
    Enemy {
        id: "gloom_wolf".into(),
        name: "Gloom Wolf".into(),
        level: 1,
        health,
        max_health: health,
        attack,
        defense,
        abilities: Default::default(),
        rewards: Rewards {
            experience: 20,
            credits: 10,
            items: Vec::new(),
        },
    }
}

/// Drops the session into a fight against `foe`.
pub fn in_combat(mut session: Session, foe: Enemy) -> Session {
    rpg_core::combat::begin(&mut session, foe);
    session
}
