//! Player-facing text.

use std::fmt::Write;

use rpg_core::{Area, Session, StoryEvent};

pub(super) fn intro(session: &Session) -> String {
    let area = session
        .area()
        .map_or_else(|| session.current_area.to_string(), |area| area.name.clone());
    format!(
        "A new adventure awaits in {area}. You carry {} credits and {} items. Type `begin` to set out.",
        session.player.credits,
        session.inventory.len()
    )
}

pub(super) fn area(area: &Area) -> String {
    let mut text = format!("{} [{}]", area.name, area.danger);
    if !area.description.is_empty() {
        let _ = write!(text, "\n{}", area.description);
    }
    let exits: Vec<String> = area
        .exits
        .iter()
        .map(|exit| {
            if exit.locked {
                format!("{} (locked)", exit.direction)
            } else {
                exit.direction.to_string()
            }
        })
        .collect();
    if exits.is_empty() {
        text.push_str("\nThere is no obvious way out.");
    } else {
        let _ = write!(text, "\nExits: {}", exits.join(", "));
    }
    text
}

pub(super) fn event(event: &StoryEvent) -> String {
    let mut text = format!("{}\n{}", event.title, event.description);
    for (index, choice) in event.choices.iter().enumerate() {
        let _ = write!(text, "\n  choice:{index}  {}", choice.text);
    }
    text
}

pub(super) fn inventory(session: &Session) -> String {
    if session.inventory.is_empty() {
        return "Your pack is empty.".to_string();
    }
    let mut text = format!(
        "Pack ({}/{}):",
        session.inventory.len(),
        session.inventory.max_slots
    );
    for item in &session.inventory.items {
        let _ = write!(text, "\n  {} x{} [{}]", item.name, item.quantity, item.id);
    }
    text
}
