use tracing::info;

use rpg_core::combat::{self, CombatOutcome};
use rpg_core::progression::reward_quests;
use rpg_core::{
    ActionError, EndReason, EnemyRequest, GameConfig, LootRequest, LootSource, MoveError,
    QuestProgress, Roll, Session,
};

use super::{GameEngine, Turn, grant, take_item};

impl GameEngine {
    pub(super) async fn start_encounter(
        &self,
        session: &mut Session,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        let area = session
            .area()
            .ok_or_else(|| MoveError::UnknownArea(session.current_area.clone()))?;
        let request = EnemyRequest {
            player_level: session.player.level,
            danger: area.danger,
            story_progress: session.story_progress,
            difficulty: session.settings.difficulty,
            area_name: area.name.clone(),
            seed: session.dice().seed_for(Roll::EnemyContent),
        };
        let enemy = self.gateway.enemy(&request).await;

        info!(session = %session.id, enemy = %enemy.name, level = enemy.level, "combat started");
        turn.say(format!(
            "A {} (level {}) blocks your path! [{} HP]",
            enemy.name, enemy.level, enemy.health
        ));
        combat::begin(session, enemy);
        Ok(())
    }

    pub(super) async fn attack(
        &self,
        session: &mut Session,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        let dice = session.dice();
        let hit = combat::player_attack(session, &dice).ok_or(ActionError::NoCombat)?;
        turn.say(format!(
            "You strike for {} damage. The enemy has {} HP left.",
            hit.damage, hit.enemy_health
        ));
        self.resolve_round(session, turn).await
    }

    pub(super) async fn defend(
        &self,
        session: &mut Session,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        if !combat::player_defend(session) {
            return Err(ActionError::NoCombat);
        }
        turn.say("You raise your guard.");
        self.resolve_round(session, turn).await
    }

    /// A failed attempt costs the turn.
    pub(super) async fn flee(
        &self,
        session: &mut Session,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        if session.combat.is_none() {
            return Err(ActionError::NoCombat);
        }
        if combat::flee_succeeds(&session.dice()) {
            combat::disengage(session);
            info!(session = %session.id, "player fled");
            turn.say("You slip away and escape!");
            return Ok(());
        }
        turn.say("You fail to get away!");
        self.enemy_turn(session, turn).await
    }

    /// Settles the player's half-round: victory, or the enemy replies.
    async fn resolve_round(
        &self,
        session: &mut Session,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        match combat::outcome(session) {
            CombatOutcome::Victory => {
                self.victory(session, turn).await;
                Ok(())
            }
            CombatOutcome::Defeat => {
                defeat(session, turn);
                Ok(())
            }
            CombatOutcome::Ongoing => self.enemy_turn(session, turn).await,
        }
    }

    pub(super) async fn enemy_turn(
        &self,
        session: &mut Session,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        let request = combat::combat_action_request(session).ok_or(ActionError::NoCombat)?;
        let action = self.gateway.combat_action(&request).await;
        let strike = combat::apply_enemy_move(session, &action).ok_or(ActionError::NoCombat)?;
        turn.say(strike.narrative);

        match combat::outcome(session) {
            CombatOutcome::Defeat => defeat(session, turn),
            CombatOutcome::Victory | CombatOutcome::Ongoing => turn.say(format!(
                "You have {}/{} HP.",
                session.player.health, session.player.max_health
            )),
        }
        Ok(())
    }

    /// Base rewards, drops, bonus loot, quests, progress, then milestones.
    async fn victory(&self, session: &mut Session, turn: &mut Turn) {
        let Some((enemy, rewards)) = combat::conclude_victory(session) else {
            return;
        };
        info!(session = %session.id, enemy = %enemy.name, "enemy defeated");

        turn.say(format!(
            "You defeated {}! (+{} credits, +{} XP)",
            enemy.name, rewards.credits, rewards.experience
        ));
        grant(session, rewards.credits, rewards.experience, turn);
        for item in rewards.items {
            take_item(session, item, turn);
        }
        self.grant_loot(session, LootSource::Combat, Roll::BonusLootContent, turn)
            .await;

        let completed = session
            .quests
            .record(QuestProgress::EnemyDefeated(&enemy.id));
        turn.say_all(reward_quests(session, &completed));

        session.advance_progress(GameConfig::PROGRESS_PER_VICTORY);
        self.check_milestone(session, turn).await;
    }

    pub(super) async fn grant_loot(
        &self,
        session: &mut Session,
        source: LootSource,
        roll: Roll,
        turn: &mut Turn,
    ) {
        let request = LootRequest {
            player_level: session.player.level,
            danger: session.danger(),
            source,
            difficulty: session.settings.difficulty,
            seed: session.dice().seed_for(roll),
        };
        let loot = self.gateway.loot(&request).await;

        if !loot.narrative.is_empty() {
            turn.say(loot.narrative);
        }
        if loot.credits > 0 || loot.experience > 0 {
            turn.say(format!(
                "You gain {} credits and {} XP.",
                loot.credits, loot.experience
            ));
            grant(session, loot.credits, loot.experience, turn);
        }
        for item in loot.items {
            take_item(session, item, turn);
        }
    }
}

fn defeat(session: &mut Session, turn: &mut Turn) {
    turn.say("You collapse. Your journey ends here.");
    turn.end(session, EndReason::Defeat);
}
