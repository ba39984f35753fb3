use crate::env::{EnemyMove, GeneratedCombatAction};
use crate::state::Session;

use super::enemy_hit_damage;

/// What the enemy did on its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyStrike {
    pub action: EnemyMove,
    pub ability: Option<String>,
    /// Damage the player actually lost.
    pub damage: u32,
    pub narrative: String,
}

/// Applies one enemy move to the session.
///
/// An ability that is unknown or still cooling down degrades to a plain
/// attack. A used ability's cooldown is set to its declared value, then every
/// cooldown ticks down by one (floor 0) and the round counter advances.
pub fn apply_enemy_move(session: &mut Session, action: &GeneratedCombatAction) -> Option<EnemyStrike> {
    let armor = session.equipment.armor_defense();
    let combat = session.combat.as_mut()?;
    let ready = match (action.action, action.ability.as_ref()) {
        (EnemyMove::Ability, Some(id)) => combat
            .enemy
            .abilities
            .iter()
            .position(|ability| &ability.id == id && ability.is_ready()),
        _ => None,
    };

    let (kind, ability_name, raw) = match (action.action, ready) {
        (EnemyMove::Defend, _) => (EnemyMove::Defend, None, None),
        (EnemyMove::Ability, Some(index)) => {
            let ability = &mut combat.enemy.abilities[index];
            ability.current_cooldown = ability.cooldown;
            let bonus = ability.power;
            let name = ability.name.clone();
            let raw = action
                .damage
                .unwrap_or(combat.enemy.attack.saturating_add(bonus));
            (EnemyMove::Ability, Some(name), Some(raw))
        }
        (EnemyMove::Attack | EnemyMove::Ability, _) => (
            EnemyMove::Attack,
            None,
            Some(action.damage.unwrap_or(combat.enemy.attack)),
        ),
    };

    let damage = match raw {
        Some(raw) => {
            let hit = enemy_hit_damage(raw, armor, combat.player_defending);
            combat.player_defending = false;
            session.player.take_damage(hit)
        }
        None => {
            combat.enemy_defending = true;
            0
        }
    };

    for ability in combat.enemy.abilities.iter_mut() {
        ability.current_cooldown = ability.current_cooldown.saturating_sub(1);
    }
    combat.round += 1;

    let narrative = if action.narrative.trim().is_empty() {
        default_narrative(&combat.enemy.name, kind, ability_name.as_deref(), damage)
    } else {
        action.narrative.clone()
    };
    combat.record(narrative.clone());

    Some(EnemyStrike {
        action: kind,
        ability: ability_name,
        damage,
        narrative,
    })
}

fn default_narrative(enemy: &str, kind: EnemyMove, ability: Option<&str>, damage: u32) -> String {
    match (kind, ability) {
        (EnemyMove::Defend, _) => format!("{enemy} braces for your next blow."),
        (EnemyMove::Ability, Some(name)) => {
            format!("{enemy} uses {name} and deals {damage} damage.")
        }
        _ => format!("{enemy} attacks and deals {damage} damage."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::begin;
    use crate::state::Abilities;
    use crate::testing::{ability, basic_session, enemy};

    fn fight(attack: u32) -> Session {
        let mut session = basic_session();
        let mut foe = enemy(50, attack, 0);
        let mut abilities = Abilities::new();
        let mut slam = ability("slam", 0);
        slam.power = 6;
        slam.cooldown = 3;
        abilities.push(slam);
        abilities.push(ability("roar", 2));
        foe.abilities = abilities;
        begin(&mut session, foe);
        session
    }

    fn ability_move(id: &str) -> GeneratedCombatAction {
        GeneratedCombatAction {
            action: EnemyMove::Ability,
            ability: Some(id.into()),
            damage: None,
            narrative: String::new(),
        }
    }

    #[test]
    fn plain_attack_uses_base_attack() {
        let mut session = fight(8);
        let strike = apply_enemy_move(&mut session, &GeneratedCombatAction::attack("")).unwrap();
        assert_eq!(strike.damage, 8);
        assert_eq!(session.player.health, 92);
        assert_eq!(session.combat.as_ref().unwrap().round, 2);
    }

    #[test]
    fn ability_sets_cooldown_before_the_tick() {
        let mut session = fight(8);
        let strike = apply_enemy_move(&mut session, &ability_move("slam")).unwrap();

        assert_eq!(strike.action, EnemyMove::Ability);
        assert_eq!(strike.damage, 14);
        let abilities = &session.combat.as_ref().unwrap().enemy.abilities;
        assert_eq!(abilities[0].current_cooldown, 2);
        assert_eq!(abilities[1].current_cooldown, 1);
    }

    #[test]
    fn cooling_ability_degrades_to_attack() {
        let mut session = fight(8);
        let strike = apply_enemy_move(&mut session, &ability_move("roar")).unwrap();
        assert_eq!(strike.action, EnemyMove::Attack);
        assert_eq!(strike.damage, 8);
    }

    #[test]
    fn player_stance_halves_and_is_consumed() {
        let mut session = fight(10);
        session.combat.as_mut().unwrap().player_defending = true;

        let strike = apply_enemy_move(&mut session, &GeneratedCombatAction::attack("")).unwrap();
        assert_eq!(strike.damage, 5);
        assert!(!session.combat.as_ref().unwrap().player_defending);
    }

    #[test]
    fn enemy_defend_sets_stance_without_damage() {
        let mut session = fight(10);
        let defend = GeneratedCombatAction {
            action: EnemyMove::Defend,
            ability: None,
            damage: None,
            narrative: "It hunkers down.".into(),
        };
        let strike = apply_enemy_move(&mut session, &defend).unwrap();
        assert_eq!(strike.damage, 0);
        let combat = session.combat.as_ref().unwrap();
        assert!(combat.enemy_defending);
        assert_eq!(combat.history.back().map(String::as_str), Some("It hunkers down."));
    }

    #[test]
    fn generated_damage_overrides_base_attack() {
        let mut session = fight(10);
        let mut action = GeneratedCombatAction::attack("");
        action.damage = Some(200);
        apply_enemy_move(&mut session, &action).unwrap();
        assert_eq!(session.player.health, 0);
    }
}
