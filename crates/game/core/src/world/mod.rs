//! World graph traversal.
//!
//! Movement happens in three steps so the runtime can consult the content
//! generator in between:
//!
//! 1. [`resolve_move`] checks the exit (and its lock) and names the target.
//! 2. If the target is unknown, the caller obtains an [`Area`] and hands it to
//!    [`insert_area`], which pins its id and guarantees a way back.
//! 3. [`arrive`] moves the player in, marks discovery, and advances progress.
//!
//! Encounter and search rolls live in [`encounter`].

mod encounter;

pub use encounter::{
    Encounter, Recovery, SearchOutcome, consolation_reward, encounter_bonus, rest, roll_encounter,
    roll_search,
};

use crate::config::GameConfig;
use crate::env::AreaRequest;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Area, AreaId, Direction, Exit, ItemId, Quest, QuestProgress, Session, World};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("there is no exit to the {0}")]
    NoExit(Direction),

    #[error("the way {direction} is locked; you need {key} to pass")]
    Locked { direction: Direction, key: ItemId },

    #[error("the way {0} is sealed")]
    Sealed(Direction),

    #[error("area {0} is not part of the world")]
    UnknownArea(AreaId),
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoExit(_) | Self::Locked { .. } | Self::Sealed(_) => ErrorSeverity::Validation,
            Self::UnknownArea(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NoExit(_) => "MOVE_NO_EXIT",
            Self::Locked { .. } => "MOVE_LOCKED",
            Self::Sealed(_) => "MOVE_SEALED",
            Self::UnknownArea(_) => "MOVE_UNKNOWN_AREA",
        }
    }
}

/// Target of a validated move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub direction: Direction,
    pub target: AreaId,
    /// Whether the target already exists in the world graph.
    pub known: bool,
    /// Key that opened the exit during this move.
    pub unlocked_with: Option<ItemId>,
}

/// Result of entering an area.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arrival {
    pub area: AreaId,
    pub first_visit: bool,
    pub story_progress: u8,
    pub completed_quests: Vec<Quest>,
}

/// Resolves the exit in `direction` from the current area.
///
/// A locked exit opens permanently when the player carries its key; the key is
/// kept. Without the key nothing is changed.
pub fn resolve_move(session: &mut Session, direction: Direction) -> Result<Destination, MoveError> {
    let current = session.current_area.clone();
    let area = session
        .world
        .area(&current)
        .ok_or_else(|| MoveError::UnknownArea(current.clone()))?;
    let exit = area.exit(direction).ok_or(MoveError::NoExit(direction))?;

    let mut unlocked_with = None;
    if exit.locked {
        let key = exit.required_item.clone().ok_or(MoveError::Sealed(direction))?;
        if !session.inventory.contains(&key) {
            return Err(MoveError::Locked { direction, key });
        }
        unlocked_with = Some(key);
    }
    let target = exit.target.clone();

    if unlocked_with.is_some() {
        unlock(&mut session.world, &current, direction);
    }

    Ok(Destination {
        direction,
        known: session.world.contains(&target),
        target,
        unlocked_with,
    })
}

fn unlock(world: &mut World, area: &AreaId, direction: Direction) {
    if let Some(exit) = world.area_mut(area).and_then(|area| area.exit_mut(direction)) {
        exit.locked = false;
    }
    for exit in world
        .available_exits
        .iter_mut()
        .filter(|exit| exit.direction == direction)
    {
        exit.locked = false;
    }
}

/// Builds the generation request for an area that does not exist yet.
pub fn area_request(
    session: &Session,
    target: &AreaId,
    direction: Option<Direction>,
    seed: u64,
) -> AreaRequest {
    AreaRequest {
        current_area: session.current_area.clone(),
        target_area: target.clone(),
        player_level: session.player.level,
        story_progress: session.story_progress,
        explored_areas: session.world.explored.clone(),
        direction,
        seed,
    }
}

/// Id for an area reached without a named exit (story travel).
pub fn travel_target(session: &Session) -> AreaId {
    AreaId::new(format!("area_{}_{}", session.world.areas.len(), session.nonce))
}

/// Adds a freshly obtained area to the graph.
///
/// The area is stored under `id` regardless of the id it carries, and gets a
/// return exit to `origin` if it has none. Existing areas are never replaced.
pub fn insert_area(
    world: &mut World,
    id: &AreaId,
    mut area: Area,
    origin: &AreaId,
    travelled: Option<Direction>,
) {
    if world.contains(id) {
        return;
    }
    area.id = id.clone();
    area.discovered = false;
    area.encounters = area.encounters.clamped();

    if origin != id && !area.exits.iter().any(|exit| &exit.target == origin) {
        add_return_exit(&mut area, origin, travelled.map(Direction::opposite));
    }

    world.areas.insert(id.clone(), area);
}

fn add_return_exit(area: &mut Area, origin: &AreaId, preferred: Option<Direction>) {
    let direction = preferred
        .filter(|direction| !area.has_exit(*direction))
        .or_else(|| {
            Direction::ALL
                .into_iter()
                .find(|direction| !area.has_exit(*direction))
        });

    match direction {
        Some(direction) if !area.exits.is_full() => {
            area.exits.push(Exit::open(direction, origin.clone()));
        }
        _ => {
            // Every direction is taken: the preferred (or last) exit leads back.
            let back = preferred.unwrap_or(Direction::Down);
            let slot = area.exits.iter().position(|exit| exit.direction == back);
            let index = slot.unwrap_or(area.exits.len().saturating_sub(1));
            if let Some(exit) = area.exits.get_mut(index) {
                *exit = Exit::open(exit.direction, origin.clone());
            }
        }
    }
}

/// Moves the player into an existing area.
pub fn arrive(session: &mut Session, id: &AreaId) -> Result<Arrival, MoveError> {
    let area = session
        .world
        .area_mut(id)
        .ok_or_else(|| MoveError::UnknownArea(id.clone()))?;

    let first_visit = !area.discovered;
    area.discovered = true;
    let exits = area.exits.iter().cloned().collect();

    session.current_area = id.clone();
    session.world.available_exits = exits;

    let mut completed_quests = Vec::new();
    if first_visit {
        session.world.explored.push(id.clone());
        completed_quests = session.quests.record(QuestProgress::AreaDiscovered(id));
    }

    let story_progress = session.advance_progress(GameConfig::PROGRESS_PER_AREA);

    Ok(Arrival {
        area: id.clone(),
        first_visit,
        story_progress,
        completed_quests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DangerLevel, Item};
    use crate::testing::session_with;

    fn crossroads_session() -> Session {
        let start = Area::new("start", "Start", DangerLevel::Safe)
            .with_exit(Exit::open(Direction::North, "meadow"))
            .with_exit(Exit::locked(Direction::East, "vault", "rusty_key"));
        session_with(start, Vec::new())
    }

    #[test]
    fn missing_exit_is_rejected() {
        let mut session = crossroads_session();
        let error = resolve_move(&mut session, Direction::West).unwrap_err();
        assert_eq!(error, MoveError::NoExit(Direction::West));
    }

    #[test]
    fn locked_exit_without_key_changes_nothing() {
        let mut session = crossroads_session();
        let before = session.clone();

        let error = resolve_move(&mut session, Direction::East).unwrap_err();
        assert!(matches!(error, MoveError::Locked { .. }));
        assert_eq!(session, before);
    }

    #[test]
    fn key_unlocks_permanently_and_is_kept() {
        let mut session = crossroads_session();
        session.inventory.items.push(Item::key("rusty_key", "Rusty Key"));

        let destination = resolve_move(&mut session, Direction::East).unwrap();
        assert_eq!(destination.unlocked_with, Some(ItemId::from("rusty_key")));
        assert!(!destination.known);
        assert!(session.inventory.contains(&"rusty_key".into()));

        let exit = session.area().and_then(|a| a.exit(Direction::East)).unwrap();
        assert!(!exit.locked);
        assert!(session.world.available_exits.iter().all(|e| !e.locked));
    }

    #[test]
    fn inserted_area_is_pinned_and_linked_back() {
        let mut session = crossroads_session();
        let generated = Area::new("whatever", "Meadow", DangerLevel::Dangerous);
        let origin = session.current_area.clone();

        insert_area(
            &mut session.world,
            &"meadow".into(),
            generated,
            &origin,
            Some(Direction::North),
        );

        let meadow = session.world.area(&"meadow".into()).unwrap();
        assert_eq!(meadow.id.as_str(), "meadow");
        let back = meadow.exit(Direction::South).unwrap();
        assert_eq!(back.target, origin);
    }

    #[test]
    fn existing_areas_are_never_replaced() {
        let mut session = crossroads_session();
        let origin = session.current_area.clone();
        insert_area(
            &mut session.world,
            &origin.clone(),
            Area::new("x", "Impostor", DangerLevel::Boss),
            &origin,
            None,
        );
        assert_eq!(session.area().unwrap().name, "Start");
    }

    #[test]
    fn arrival_discovers_once_and_always_advances_progress() {
        let mut session = crossroads_session();
        let origin = session.current_area.clone();
        insert_area(
            &mut session.world,
            &"meadow".into(),
            Area::new("meadow", "Meadow", DangerLevel::Safe),
            &origin,
            Some(Direction::North),
        );

        let first = arrive(&mut session, &"meadow".into()).unwrap();
        assert!(first.first_visit);
        assert_eq!(first.story_progress, GameConfig::PROGRESS_PER_AREA);
        assert_eq!(session.world.explored.len(), 2);
        assert_eq!(session.world.available_exits.len(), 1);

        arrive(&mut session, &origin).unwrap();
        let again = arrive(&mut session, &"meadow".into()).unwrap();
        assert!(!again.first_visit);
        assert_eq!(again.story_progress, 3 * GameConfig::PROGRESS_PER_AREA);
        assert_eq!(session.world.explored.len(), 2);
    }
}
