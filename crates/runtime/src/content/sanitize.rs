//! Structural checks applied to generated content before the engine uses it.
//!
//! Content quality is not judged here; only shapes the rules cannot work with
//! are repaired or rejected. A rejection sends the request to the fallback.

use std::collections::BTreeSet;

use rpg_core::{
    Area, AreaRequest, CombatActionRequest, Enemy, GeneratedCombatAction, Loot, StoryEvent,
    StoryEventRequest,
};

use super::GeneratorError;

fn invalid(reason: &str) -> GeneratorError {
    GeneratorError::Invalid(reason.to_string())
}

/// Forces the requested id, clamps encounter chances, and drops exits that
/// loop back onto the area or repeat a direction.
pub(crate) fn area(mut area: Area, request: &AreaRequest) -> Result<Area, GeneratorError> {
    if area.name.trim().is_empty() {
        return Err(invalid("area without a name"));
    }
    area.id = request.target_area.clone();
    area.encounters = area.encounters.clamped();

    let mut seen = BTreeSet::new();
    area.exits.retain(|exit| {
        !exit.target.is_empty()
            && exit.target != request.target_area
            && seen.insert(exit.direction)
    });
    Ok(area)
}

/// Enemies start at full health unless the generator says otherwise, but
/// never above their maximum or at zero.
pub(crate) fn enemy(mut enemy: Enemy) -> Result<Enemy, GeneratorError> {
    enemy.level = enemy.level.max(1);
    if !enemy.is_well_formed() {
        return Err(invalid("enemy without a name or health"));
    }
    enemy.health = enemy.health.clamp(1, enemy.max_health);
    enemy.rewards.items.retain(|item| item.is_well_formed());
    Ok(enemy)
}

/// Abilities the enemy cannot use right now are downgraded later by the
/// combat rules; only the request's list is consulted here.
pub(crate) fn combat_action(
    mut action: GeneratedCombatAction,
    request: &CombatActionRequest,
) -> GeneratedCombatAction {
    if let Some(id) = &action.ability
        && !request.available_abilities.contains(id)
    {
        action.ability = None;
    }
    action.narrative = action.narrative.trim().to_string();
    action
}

/// Zero-quantity and nameless items are dropped.
pub(crate) fn loot(mut loot: Loot) -> Loot {
    loot.items.retain(|item| item.is_well_formed());
    loot
}

/// Stores the event under the milestone id it was requested for.
pub(crate) fn story_event(
    mut event: StoryEvent,
    request: &StoryEventRequest,
) -> Result<StoryEvent, GeneratorError> {
    if !event.is_well_formed() {
        return Err(invalid("story event without a title or usable choices"));
    }
    event.id = request.event_id.clone();
    Ok(event)
}

#[cfg(test)]
mod tests {
    use rpg_core::{DangerLevel, Direction, Exit, Item, Rewards};

    use super::*;

    fn request() -> AreaRequest {
        AreaRequest {
            current_area: "town_square".into(),
            target_area: "grove".into(),
            player_level: 1,
            story_progress: 0,
            explored_areas: Vec::new(),
            direction: Some(Direction::North),
            seed: 1,
        }
    }

    #[test]
    fn area_is_forced_to_the_requested_id() {
        let raw = Area::new("something_else", "Grove", DangerLevel::Safe)
            .with_exit(Exit::open(Direction::South, "town_square"))
            .with_exit(Exit::open(Direction::South, "elsewhere"))
            .with_exit(Exit::open(Direction::East, "grove"));
        let area = area(raw, &request()).unwrap();

        assert_eq!(area.id.as_str(), "grove");
        assert_eq!(area.exits.len(), 1);
        assert_eq!(area.exits[0].target.as_str(), "town_square");
    }

    #[test]
    fn nameless_area_is_rejected() {
        let raw = Area::new("grove", "  ", DangerLevel::Safe);
        assert!(matches!(area(raw, &request()), Err(GeneratorError::Invalid(_))));
    }

    #[test]
    fn enemy_health_is_clamped() {
        let raw = Enemy {
            id: "troll".into(),
            name: "Troll".into(),
            level: 0,
            health: 500,
            max_health: 40,
            attack: 5,
            defense: 1,
            abilities: Default::default(),
            rewards: Rewards {
                items: vec![Item::key("", "Nothing")],
                ..Default::default()
            },
        };
        let enemy = enemy(raw).unwrap();
        assert_eq!(enemy.health, 40);
        assert_eq!(enemy.level, 1);
        assert!(enemy.rewards.items.is_empty());
    }

    #[test]
    fn enemy_without_max_health_is_rejected() {
        let raw = Enemy {
            id: "ghost".into(),
            name: "Ghost".into(),
            level: 1,
            health: 0,
            max_health: 0,
            attack: 1,
            defense: 0,
            abilities: Default::default(),
            rewards: Default::default(),
        };
        assert!(enemy(raw).is_err());
    }

    #[test]
    fn zero_quantity_loot_is_dropped() {
        let mut potion = Item::key("key", "Key");
        potion.quantity = 0;
        let loot = loot(Loot {
            items: vec![potion, Item::key("other", "Other Key")],
            ..Default::default()
        });
        assert_eq!(loot.items.len(), 1);
        assert_eq!(loot.items[0].id.as_str(), "other");
    }
}
