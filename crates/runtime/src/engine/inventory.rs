use tracing::debug;

use rpg_core::inventory::{equip_from_inventory, use_consumable};
use rpg_core::{ActionError, ConsumableEffect, GamePhase, ItemId, Session};

use super::{Turn, narrate};

/// Opens the pack, remembering where to return to.
pub(super) fn open(session: &mut Session, turn: &mut Turn) -> Result<(), ActionError> {
    session.return_phase = Some(session.phase);
    session.phase = GamePhase::Inventory;
    turn.say(narrate::inventory(session));
    Ok(())
}

pub(super) fn close(session: &mut Session, turn: &mut Turn) -> Result<(), ActionError> {
    session.phase = session.return_phase.take().unwrap_or(GamePhase::Exploring);
    turn.say("You close your pack.");
    Ok(())
}

pub(super) fn equip(session: &mut Session, item: &ItemId, turn: &mut Turn) -> Result<(), ActionError> {
    let outcome = equip_from_inventory(session, item)?;
    debug!(session = %session.id, %item, slot = %outcome.slot, "manual equip");
    turn.say(outcome.describe());
    Ok(())
}

/// Uses one consumable and goes back to whatever was open before the pack.
/// Inside a fight the player still holds the turn.
pub(super) fn use_item(
    session: &mut Session,
    item: &ItemId,
    turn: &mut Turn,
) -> Result<(), ActionError> {
    let used = use_consumable(session, item)?;
    let pool = match used.effect {
        ConsumableEffect::Heal(_) => "health",
        ConsumableEffect::RestoreEnergy(_) => "energy",
    };
    turn.say(format!(
        "You use the {} and recover {} {pool}. ({} left)",
        used.name, used.restored, used.remaining
    ));

    session.phase = session.return_phase.take().unwrap_or(GamePhase::Exploring);
    Ok(())
}
