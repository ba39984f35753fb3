//! Phase/action matrix.

use crate::state::{GamePhase, Session};

use super::{Action, ActionKind, SystemAction};

/// Whether the action's category is accepted in the session's current phase.
///
/// Payload checks (which exit, which item, which choice) happen later in the
/// handlers; this only gates the category.
pub fn is_allowed(session: &Session, action: &Action) -> bool {
    let phase = session.phase;
    match action {
        Action::System { kind } => match kind {
            SystemAction::IdleTimeout => !phase.is_terminal(),
            SystemAction::StartEncounter | SystemAction::Travel { .. } => {
                phase == GamePhase::Exploring
            }
        },
        Action::Player { kind, .. } => match phase {
            GamePhase::Intro => matches!(kind, ActionKind::Begin | ActionKind::Quit),
            GamePhase::Exploring => matches!(
                kind,
                ActionKind::Move { .. }
                    | ActionKind::Search
                    | ActionKind::Rest
                    | ActionKind::OpenInventory
                    | ActionKind::Quit
            ),
            GamePhase::Combat => matches!(
                kind,
                ActionKind::Attack
                    | ActionKind::Defend
                    | ActionKind::Flee
                    | ActionKind::OpenInventory
                    | ActionKind::Quit
            ),
            GamePhase::Inventory => match kind {
                ActionKind::UseItem { .. } | ActionKind::CloseInventory | ActionKind::Quit => true,
                ActionKind::Equip { .. } => session.return_phase != Some(GamePhase::Combat),
                _ => false,
            },
            GamePhase::StoryEvent => matches!(kind, ActionKind::Choose { .. } | ActionKind::Quit),
            GamePhase::GameOver => false,
        },
    }
}

/// Concrete player actions that make sense right now.
pub fn available_actions(session: &Session) -> Vec<ActionKind> {
    let mut actions = Vec::new();
    match session.phase {
        GamePhase::Intro => actions.push(ActionKind::Begin),
        GamePhase::Exploring => {
            actions.extend(
                session
                    .world
                    .available_exits
                    .iter()
                    .map(|exit| ActionKind::Move {
                        direction: exit.direction,
                    }),
            );
            actions.push(ActionKind::Search);
            if session.danger().is_safe() {
                actions.push(ActionKind::Rest);
            }
            actions.push(ActionKind::OpenInventory);
        }
        GamePhase::Combat => actions.extend([
            ActionKind::Attack,
            ActionKind::Defend,
            ActionKind::OpenInventory,
            ActionKind::Flee,
        ]),
        GamePhase::Inventory => {
            actions.extend(
                session
                    .inventory
                    .consumables()
                    .map(|item| ActionKind::UseItem {
                        item: item.id.clone(),
                    }),
            );
            if session.return_phase != Some(GamePhase::Combat) {
                actions.extend(
                    session
                        .inventory
                        .equippable()
                        .map(|item| ActionKind::Equip {
                            item: item.id.clone(),
                        }),
                );
            }
            actions.push(ActionKind::CloseInventory);
        }
        GamePhase::StoryEvent => {
            let choices = session
                .story
                .current_event
                .as_ref()
                .map_or(0, |event| event.choices.len());
            actions.extend((0..choices).map(|index| ActionKind::Choose { index }));
        }
        GamePhase::GameOver => return actions,
    }
    actions.push(ActionKind::Quit);
    actions
}

/// String forms of [`available_actions`]; the combat inventory detour is
/// labelled `use_item`.
pub fn available_labels(session: &Session) -> Vec<String> {
    available_actions(session)
        .into_iter()
        .map(|kind| match (session.phase, &kind) {
            (GamePhase::Combat, ActionKind::OpenInventory) => "use_item".to_string(),
            _ => kind.to_string(),
        })
        .collect()
}
