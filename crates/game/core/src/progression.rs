//! Experience, levels, quest rewards, and story milestones.

use crate::config::GameConfig;
use crate::state::{EventId, Player, Quest, Session, Story};

/// Levels gained from one experience grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

impl LevelUp {
    pub fn levels(&self) -> u32 {
        self.to - self.from
    }
}

/// Adds experience and runs the level-up loop.
///
/// Every level gained raises max health and max energy and fully restores
/// both pools. Afterwards `experience < experience_to_next` and
/// `experience_to_next == level * EXPERIENCE_PER_LEVEL`. Levels stop at
/// [`GameConfig::MAX_LEVEL`].
pub fn add_experience(player: &mut Player, amount: u32) -> Option<LevelUp> {
    player.experience = player.experience.saturating_add(amount);
    let from = player.level;

    while player.experience >= player.experience_to_next {
        let gained = player.experience / player.experience_to_next;
        player.experience %= player.experience_to_next;
        player.level = player.level.saturating_add(gained).min(GameConfig::MAX_LEVEL);
        player.experience_to_next = player.level * GameConfig::EXPERIENCE_PER_LEVEL;
    }

    let levels = player.level - from;
    if levels == 0 {
        return None;
    }

    player.adjust_maximums(
        i64::from(levels) * i64::from(GameConfig::HEALTH_PER_LEVEL),
        i64::from(levels) * i64::from(GameConfig::ENERGY_PER_LEVEL),
    );
    player.restore_fully();
    Some(LevelUp {
        from,
        to: player.level,
    })
}

/// Flat credit and experience grant.
pub fn grant(player: &mut Player, credits: u32, experience: u32) -> Option<LevelUp> {
    player.add_credits(credits);
    add_experience(player, experience)
}

/// Pays out completed quests, returning one message line per quest (plus a
/// level-up line when one happened).
pub fn reward_quests(session: &mut Session, completed: &[Quest]) -> Vec<String> {
    let mut lines = Vec::new();
    for quest in completed {
        lines.push(format!(
            "Quest complete: {} (+{} credits, +{} XP).",
            quest.title, quest.reward_credits, quest.reward_experience
        ));
        if let Some(level_up) = grant(
            &mut session.player,
            quest.reward_credits,
            quest.reward_experience,
        ) {
            lines.push(level_up_message(&level_up));
        }
    }
    lines
}

pub fn level_up_message(level_up: &LevelUp) -> String {
    format!("Level up! You are now level {}.", level_up.to)
}

/// A story-progress threshold tied to a one-time event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Milestone {
    pub threshold: u8,
    pub event_id: &'static str,
    /// The terminal milestone: its event always ends the game in victory.
    pub finale: bool,
}

impl Milestone {
    pub fn event_id(&self) -> EventId {
        EventId::new(self.event_id)
    }
}

pub const MILESTONES: [Milestone; 5] = [
    Milestone {
        threshold: 25,
        event_id: "milestone_awakening",
        finale: false,
    },
    Milestone {
        threshold: 50,
        event_id: "milestone_crossroads",
        finale: false,
    },
    Milestone {
        threshold: 75,
        event_id: "milestone_reckoning",
        finale: false,
    },
    Milestone {
        threshold: 90,
        event_id: "milestone_threshold",
        finale: false,
    },
    Milestone {
        threshold: 100,
        event_id: "milestone_finale",
        finale: true,
    },
];

/// Lowest crossed milestone whose event has not been completed yet.
pub fn pending_milestone(progress: u8, story: &Story) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|milestone| {
        progress >= milestone.threshold && !story.is_completed(&milestone.event_id())
    })
}

pub fn milestone_for(event_id: &EventId) -> Option<&'static Milestone> {
    MILESTONES
        .iter()
        .find(|milestone| milestone.event_id == event_id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_grants_do_not_level() {
        let mut player = Player::default();
        assert!(add_experience(&mut player, 99).is_none());
        assert_eq!(player.experience, 99);
        assert_eq!(player.level, 1);
    }

    #[test]
    fn level_up_grows_and_restores() {
        let mut player = Player::default();
        player.take_damage(60);

        let level_up = add_experience(&mut player, 130).unwrap();
        assert_eq!(level_up, LevelUp { from: 1, to: 2 });
        assert_eq!(player.experience, 30);
        assert_eq!(player.experience_to_next, 200);
        assert_eq!(player.max_health, 110);
        assert_eq!(player.health, 110);
        assert_eq!(player.max_energy, 55);
        assert_eq!(player.energy, 55);
    }

    #[test]
    fn experience_invariant_holds_for_large_grants() {
        for amount in [0, 1, 99, 100, 250, 999, 10_000, u32::MAX] {
            let mut player = Player::default();
            add_experience(&mut player, amount);
            assert!(player.experience < player.experience_to_next);
            assert_eq!(
                player.experience_to_next,
                player.level * GameConfig::EXPERIENCE_PER_LEVEL
            );
        }
    }

    #[test]
    fn level_stops_at_the_cap() {
        let mut player = Player::default();
        let level_up = add_experience(&mut player, u32::MAX).unwrap();
        assert_eq!(level_up.to, GameConfig::MAX_LEVEL);
        assert_eq!(player.experience_to_next, GameConfig::MAX_LEVEL * 100);
        assert!(player.resources_within_bounds());

        assert_eq!(add_experience(&mut player, u32::MAX), None);
        assert_eq!(player.level, GameConfig::MAX_LEVEL);
        assert!(player.experience < player.experience_to_next);
    }

    #[test]
    fn lowest_uncompleted_milestone_wins() {
        let mut story = Story::default();
        assert_eq!(pending_milestone(24, &story), None);
        assert_eq!(pending_milestone(60, &story).map(|m| m.threshold), Some(25));

        story.completed_events.insert("milestone_awakening".into());
        assert_eq!(pending_milestone(60, &story).map(|m| m.threshold), Some(50));

        story.completed_events.insert("milestone_crossroads".into());
        assert_eq!(pending_milestone(60, &story), None);
    }

    #[test]
    fn only_the_last_milestone_is_terminal() {
        let finales: Vec<_> = MILESTONES.iter().filter(|m| m.finale).collect();
        assert_eq!(finales.len(), 1);
        assert_eq!(finales[0].threshold, 100);
    }
}
