//! Quest tracking.
//!
//! Quests are read-mostly: the rules only advance objective counters when the
//! player discovers an area or defeats an enemy.

use super::{AreaId, ItemId};

/// What an objective counts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveTarget {
    Area(AreaId),
    AnyArea,
    Enemy(String),
    AnyEnemy,
    Item(ItemId),
}

impl ObjectiveTarget {
    fn matches(&self, progress: &QuestProgress<'_>) -> bool {
        match (self, progress) {
            (Self::AnyArea, QuestProgress::AreaDiscovered(_)) => true,
            (Self::Area(target), QuestProgress::AreaDiscovered(id)) => target == *id,
            (Self::AnyEnemy, QuestProgress::EnemyDefeated(_)) => true,
            (Self::Enemy(target), QuestProgress::EnemyDefeated(id)) => target == id,
            (Self::Item(target), QuestProgress::ItemAcquired(id)) => target == *id,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Objective {
    pub description: String,
    pub target: ObjectiveTarget,
    pub required: u32,
    pub current: u32,
}

impl Objective {
    pub fn is_met(&self) -> bool {
        self.current >= self.required
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub objectives: Vec<Objective>,
    pub reward_credits: u32,
    pub reward_experience: u32,
    pub completed: bool,
}

impl Quest {
    pub fn objectives_met(&self) -> bool {
        self.objectives.iter().all(Objective::is_met)
    }
}

/// Gameplay fact that may advance objectives.
#[derive(Clone, Copy, Debug)]
pub enum QuestProgress<'a> {
    AreaDiscovered(&'a AreaId),
    EnemyDefeated(&'a str),
    ItemAcquired(&'a ItemId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuestLog {
    pub quests: Vec<Quest>,
}

impl QuestLog {
    pub fn new(quests: Vec<Quest>) -> Self {
        Self { quests }
    }

    /// Advances matching objectives and returns quests completed by this fact.
    ///
    /// Counters never exceed `required`, and a quest completes exactly once.
    pub fn record(&mut self, progress: QuestProgress<'_>) -> Vec<Quest> {
        let mut finished = Vec::new();
        for quest in self.quests.iter_mut().filter(|quest| !quest.completed) {
            for objective in quest.objectives.iter_mut() {
                if !objective.is_met() && objective.target.matches(&progress) {
                    objective.current += 1;
                }
            }
            if quest.objectives_met() {
                quest.completed = true;
                finished.push(quest.clone());
            }
        }
        finished
    }

    pub fn active(&self) -> impl Iterator<Item = &Quest> {
        self.quests.iter().filter(|quest| !quest.completed)
    }
}
