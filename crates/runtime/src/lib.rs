//! Async orchestration for the chat-bot role-playing game.
//!
//! [`engine::GameEngine`] is the phase state machine: it applies one action to
//! a copy of a session, consulting the content generator through a
//! [`content::ContentGateway`] that bounds every call and falls back to
//! deterministic content. [`Runtime`] keeps one worker per session so actions
//! on the same session are applied strictly one after another, carries out
//! timer effects, and broadcasts what happened on an [`events::EventBus`].
//!
//! Hosts that manage sessions themselves can call the engine directly and
//! ignore the runtime.
pub mod api;
pub mod content;
pub mod engine;
pub mod events;
pub mod repository;
pub mod runtime;

mod workers;

pub use api::{Result, RuntimeError, SessionHandle};
pub use content::{
    ContentGateway, ContentGenerator, GeneratorError, OfflineGenerator, OracleGenerator,
};
pub use engine::{GameEngine, GameStart};
pub use events::{ActionEvent, Event, EventBus, LifecycleEvent, Topic};
pub use repository::{FileSessionRepository, RepositoryError, SessionSnapshot};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, SessionStart};
