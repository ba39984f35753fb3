use tracing::info;

use rpg_core::{ActionError, Effect, Session};

use super::{GameEngine, Turn};

impl GameEngine {
    /// Resolves a story choice. Combat and travel outcomes come back to the
    /// host as delayed follow-up actions.
    pub(super) async fn choose(
        &self,
        session: &mut Session,
        index: usize,
        turn: &mut Turn,
    ) -> Result<(), ActionError> {
        let resolution = rpg_core::story::resolve_choice(session, index)?;
        info!(session = %session.id, event = %resolution.event, choice = index, "story choice resolved");
        turn.say_all(resolution.lines);

        if let Some(reason) = resolution.ended {
            info!(session = %session.id, %reason, "game over");
            turn.schedule(Effect::EndGame { reason });
            return Ok(());
        }
        match resolution.follow_up {
            Some(action) => turn.schedule(Effect::ScheduleFollowUp {
                action,
                delay_ms: session.settings.follow_up_delay_ms,
            }),
            None => {
                self.check_milestone(session, turn).await;
            }
        }
        Ok(())
    }
}
