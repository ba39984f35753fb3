use tracing::{debug, info};

use rpg_core::progression::{self, reward_quests};
use rpg_core::world::{self, Encounter, SearchOutcome};
use rpg_core::{
    ActionError, AreaId, Direction, GamePhase, LootSource, MoveError, Roll, Session,
    StoryEventRequest,
};

use super::{GameEngine, Turn, grant, narrate};

impl GameEngine {
    pub(super) fn begin(&self, session: &mut Session, turn: &mut Turn) -> Result<(), ActionError> {
        let area = session
            .area()
            .ok_or_else(|| MoveError::UnknownArea(session.current_area.clone()))?;
        turn.say("Your adventure begins.");
        turn.say(narrate::area(area));
        session.phase = GamePhase::Exploring;
        Ok(())
    }

    pub(super) async fn move_to(
        &self,
        session: &mut Session,
        direction: Direction,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        let destination = world::resolve_move(session, direction)?;
        if let Some(key) = &destination.unlocked_with {
            turn.say(format!("You unlock the way {direction} with your {key}."));
        }
        self.enter(session, destination.target, Some(direction), turn)
            .await
    }

    pub(super) async fn travel(
        &self,
        session: &mut Session,
        destination: Option<AreaId>,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        let target = destination.unwrap_or_else(|| world::travel_target(session));
        turn.say("The road carries you somewhere new.");
        self.enter(session, target, None, turn).await
    }

    /// Generates the target if needed, arrives, then checks milestones and
    /// finally encounters. A milestone suppresses the encounter roll.
    async fn enter(
        &self,
        session: &mut Session,
        target: AreaId,
        direction: Option<Direction>,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        let dice = session.dice();
        if !session.world.contains(&target) {
            let request =
                world::area_request(session, &target, direction, dice.seed_for(Roll::AreaContent));
            let area = self.gateway.area(&request).await;
            let origin = session.current_area.clone();
            world::insert_area(&mut session.world, &target, area, &origin, direction);
            debug!(session = %session.id, area = %target, "area generated");
        }

        let arrival = world::arrive(session, &target)?;
        let area = session
            .area()
            .cloned()
            .ok_or_else(|| MoveError::UnknownArea(target.clone()))?;
        turn.say(narrate::area(&area));
        if arrival.first_visit {
            info!(session = %session.id, area = %area.id, progress = arrival.story_progress, "area discovered");
        }
        turn.say_all(reward_quests(session, &arrival.completed_quests));

        if self.check_milestone(session, turn).await {
            return Ok(());
        }

        match world::roll_encounter(&area, &dice) {
            Encounter::Enemy => self.start_encounter(session, turn).await,
            Encounter::Treasure => {
                turn.say("Something glints among the debris.");
                self.grant_loot(session, LootSource::Treasure, Roll::LootContent, turn)
                    .await;
                Ok(())
            }
            Encounter::Nothing => Ok(()),
        }
    }

    pub(super) async fn search(
        &self,
        session: &mut Session,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        let area = session
            .area()
            .cloned()
            .ok_or_else(|| MoveError::UnknownArea(session.current_area.clone()))?;
        let dice = session.dice();

        match world::roll_search(&area, session.player.level, &dice) {
            SearchOutcome::Loot(source) => {
                turn.say("Your search turns something up.");
                self.grant_loot(session, source, Roll::LootContent, turn)
                    .await;
            }
            SearchOutcome::Enemy => {
                turn.say("Your search draws unwanted attention.");
                self.start_encounter(session, turn).await?;
            }
            SearchOutcome::Consolation {
                credits,
                experience,
            } => {
                turn.say(format!(
                    "You scrape together {credits} credits and learn a little (+{experience} XP)."
                ));
                grant(session, credits, experience, turn);
            }
            SearchOutcome::Nothing => turn.say("You find nothing of interest."),
        }
        Ok(())
    }

    /// Opens the story event of the lowest crossed, uncompleted milestone.
    /// Returns whether one was opened.
    pub(super) async fn check_milestone(&self, session: &mut Session, turn: &mut Turn) -> bool {
        let Some(milestone) = progression::pending_milestone(session.story_progress, &session.story)
        else {
            return false;
        };

        let request = StoryEventRequest {
            event_id: milestone.event_id(),
            current_area: session.current_area.clone(),
            player_level: session.player.level,
            story_progress: session.story_progress,
            completed_events: session.story.completed_events.iter().cloned().collect(),
            recent_actions: session.story.recent_actions.iter().cloned().collect(),
            finale: milestone.finale,
            seed: session.dice().seed_for(Roll::StoryContent),
        };
        let event = self.gateway.story_event(&request).await;

        info!(
            session = %session.id,
            event = %event.id,
            threshold = milestone.threshold,
            "milestone reached"
        );
        turn.say(narrate::event(&event));
        rpg_core::story::present(session, event);
        true
    }
}

pub(super) fn rest(session: &mut Session, turn: &mut Turn) -> Result<(), ActionError> {
    let danger = session.danger();
    let recovery = world::rest(&mut session.player, danger).ok_or(ActionError::UnsafeRest)?;
    turn.say(format!(
        "You rest and recover {} health and {} energy.",
        recovery.health, recovery.energy
    ));
    Ok(())
}
