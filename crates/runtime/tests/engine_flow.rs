//! End-to-end behaviour of the phase state machine against scripted content.
mod common;

use rpg_content::ProceduralContent;
use rpg_core::{
    Action, ActionKind, Direction, Effect, EndReason, GameConfig, GamePhase, SystemAction,
};
use rpg_runtime::{GameEngine, OracleGenerator};

use common::{ScriptedGenerator, act, engine, enemy, exploring, in_combat, new_session};

#[test]
fn new_game_starts_in_intro_with_full_resources() {
    let engine = engine(ScriptedGenerator::quiet());
    let start = engine.start_game_seeded("alice".into(), "channel-1".into(), None, 7);
    let session = &start.session;

    assert_eq!(session.phase, GamePhase::Intro);
    assert!(session.is_active);
    assert_eq!(session.player.health, 100);
    assert_eq!(session.player.max_health, 100);
    assert_eq!(session.player.energy, 50);
    assert_eq!(session.player.max_energy, 50);
    assert_eq!(session.player.credits, 100);
    assert_eq!(session.nonce, 0);

    assert!(matches!(start.effects[0], Effect::SendMessage { .. }));
    assert_eq!(
        start.effects[1],
        Effect::ScheduleTimeout {
            after_ms: GameConfig::DEFAULT_IDLE_TIMEOUT_MS
        }
    );
    assert_eq!(
        GameEngine::get_available_actions(session),
        vec!["begin", "quit"]
    );
}

#[tokio::test]
async fn begin_enters_exploring_and_rearms_the_idle_timer() {
    let engine = engine(ScriptedGenerator::quiet());
    let session = new_session(&engine);

    let outcome = act(&engine, &session, "begin").await;

    assert!(outcome.success);
    assert_eq!(outcome.session.phase, GamePhase::Exploring);
    assert_eq!(outcome.session.nonce, 1);
    assert!(outcome.message.is_some());
    assert!(matches!(outcome.effects[0], Effect::SendMessage { .. }));
    assert!(
        outcome
            .effects
            .iter()
            .any(|effect| matches!(effect, Effect::ScheduleTimeout { .. }))
    );
}

#[tokio::test]
async fn locked_exit_without_key_leaves_the_session_untouched() {
    let engine = engine(ScriptedGenerator::quiet());
    let session = exploring(&engine).await;

    let outcome = act(&engine, &session, "move:down").await;

    assert!(!outcome.success);
    assert_eq!(outcome.error_code, Some("MOVE_LOCKED"));
    assert!(outcome.effects.is_empty());
    assert_eq!(outcome.session, session);
    let cellar = session.area().unwrap().exit(Direction::Down).unwrap();
    assert!(cellar.locked);
}

#[tokio::test]
async fn carried_key_opens_the_exit_and_is_kept() {
    let engine = engine(ScriptedGenerator::quiet());
    let mut session = exploring(&engine).await;
    session.inventory.items.push(rpg_content::starter::cellar_key());

    let outcome = act(&engine, &session, "move:down").await;

    assert!(outcome.success, "{:?}", outcome.message);
    let next = outcome.session;
    assert_eq!(next.current_area.as_str(), "sealed_cellar");
    assert!(next.inventory.contains(&"cellar_key".into()));
    let square = next.world.area(&"town_square".into()).unwrap();
    assert!(!square.exit(Direction::Down).unwrap().locked);
}

#[tokio::test]
async fn killing_blow_returns_to_exploring_with_rewards() {
    let engine = engine(ScriptedGenerator::quiet());
    let session = in_combat(exploring(&engine).await, enemy(1, 5, 0));
    let credits = session.player.credits;

    let outcome = act(&engine, &session, "attack").await;

    assert!(outcome.success);
    let next = outcome.session;
    assert_eq!(next.phase, GamePhase::Exploring);
    assert!(next.combat.is_none());
    assert!(next.player.credits >= credits + 10);
    assert!(next.player.experience >= 20);
    assert_eq!(next.story_progress, GameConfig::PROGRESS_PER_VICTORY);
}

#[tokio::test]
async fn enemy_reply_can_end_the_game() {
    let engine = engine(ScriptedGenerator::quiet());
    let mut session = in_combat(exploring(&engine).await, enemy(500, 50, 0));
    session.player.health = 1;

    let outcome = act(&engine, &session, "attack").await;

    assert!(outcome.success);
    let next = &outcome.session;
    assert_eq!(next.phase, GamePhase::GameOver);
    assert!(!next.is_active);
    assert_eq!(next.player.health, 0);
    assert!(next.combat.is_none());
    assert_eq!(
        outcome.effects.last(),
        Some(&Effect::EndGame {
            reason: EndReason::Defeat
        })
    );
    assert!(
        !outcome
            .effects
            .iter()
            .any(|effect| matches!(effect, Effect::ScheduleTimeout { .. }))
    );

    let check = GameEngine::check_end_conditions(next);
    assert!(check.should_end);
    assert_eq!(check.reason, Some(EndReason::Defeat));
    assert_eq!(check.winner, None);
}

#[tokio::test]
async fn combat_item_use_keeps_the_turn() {
    let engine = engine(ScriptedGenerator::quiet());
    let mut session = in_combat(exploring(&engine).await, enemy(500, 5, 0));
    session.player.health = 50;

    let opened = act(&engine, &session, "use_item").await;
    assert!(opened.success);
    assert_eq!(opened.session.phase, GamePhase::Inventory);
    let labels = GameEngine::get_available_actions(&opened.session);
    assert!(labels.contains(&"use:health_potion".to_string()));
    assert!(!labels.iter().any(|label| label.starts_with("equip:")));

    let used = act(&engine, &opened.session, "use:health_potion").await;
    assert!(used.success, "{:?}", used.message);
    let next = used.session;
    assert_eq!(next.phase, GamePhase::Combat);
    assert_eq!(next.player.health, 80);
    assert_eq!(next.inventory.quantity_of(&"health_potion".into()), 1);
    let combat = next.combat.as_ref().unwrap();
    assert_eq!(combat.round, session.combat.as_ref().unwrap().round);

    let struck = act(&engine, &next, "attack").await;
    assert!(struck.success);
    assert_eq!(struck.session.player.health, 75);
}

#[tokio::test]
async fn crossing_the_first_milestone_opens_its_event_once() {
    let engine = engine(ScriptedGenerator::quiet());
    let mut session = exploring(&engine).await;
    session.story_progress = 24;

    let arrived = act(&engine, &session, "move:north").await;
    assert!(arrived.success);
    let session = arrived.session;
    assert_eq!(session.story_progress, 26);
    assert_eq!(session.phase, GamePhase::StoryEvent);
    let event = session.story.current_event.as_ref().unwrap();
    assert_eq!(event.id.as_str(), "milestone_awakening");
    assert!(
        GameEngine::get_available_actions(&session).contains(&"choice:2".to_string())
    );

    let chosen = act(&engine, &session, "choice:2").await;
    assert!(chosen.success, "{:?}", chosen.message);
    let session = chosen.session;
    assert_eq!(session.phase, GamePhase::Exploring);
    assert!(session.story.is_completed(&"milestone_awakening".into()));

    let back = act(&engine, &session, "move:south").await;
    assert!(back.success);
    assert_eq!(back.session.current_area.as_str(), "town_square");
    assert_eq!(back.session.story_progress, 28);
    assert_ne!(back.session.phase, GamePhase::StoryEvent);
    assert!(back.session.story.current_event.is_none());
}

#[tokio::test]
async fn combat_choice_schedules_an_encounter() {
    let engine = engine(ScriptedGenerator::quiet());
    let mut session = exploring(&engine).await;
    session.story_progress = 24;
    let session = act(&engine, &session, "move:north").await.session;

    let chosen = act(&engine, &session, "choice:0").await;

    assert!(chosen.success);
    assert!(chosen.effects.contains(&Effect::ScheduleFollowUp {
        action: SystemAction::StartEncounter,
        delay_ms: GameConfig::DEFAULT_FOLLOW_UP_DELAY_MS,
    }));

    let follow_up = engine
        .process_action(
            &chosen.session,
            &Action::system(SystemAction::StartEncounter),
        )
        .await;
    assert!(follow_up.success);
    assert_eq!(follow_up.session.phase, GamePhase::Combat);
    // Unscripted enemies come from the fallback formula.
    let foe = &follow_up.session.combat.as_ref().unwrap().enemy;
    assert_eq!(foe.max_health, 20);
}

#[tokio::test]
async fn resting_is_refused_outside_safe_areas() {
    let engine = engine(ScriptedGenerator::quiet());
    let mut session = exploring(&engine).await;
    session.player.health = 40;

    let rested = act(&engine, &session, "rest").await;
    assert!(rested.success);
    assert_eq!(rested.session.player.health, 90);

    let mut danger = session.clone();
    danger
        .world
        .area_mut(&"town_square".into())
        .unwrap()
        .danger = rpg_core::DangerLevel::Dangerous;
    let refused = act(&engine, &danger, "rest").await;
    assert!(!refused.success);
    assert_eq!(refused.error_code, Some("ACTION_UNSAFE_REST"));
    assert!(!GameEngine::get_available_actions(&danger).contains(&"rest".to_string()));
}

#[tokio::test]
async fn outsiders_and_finished_sessions_are_rejected() {
    let engine = engine(ScriptedGenerator::quiet());
    let session = exploring(&engine).await;

    let outsider = engine
        .process_action(&session, &Action::player("mallory", ActionKind::Search))
        .await;
    assert!(!outsider.success);
    assert_eq!(outsider.error_code, Some("ACTION_NOT_MEMBER"));

    let wrong_phase = act(&engine, &session, "attack").await;
    assert_eq!(wrong_phase.error_code, Some("ACTION_NOT_ALLOWED"));
    assert_eq!(wrong_phase.session.nonce, session.nonce);

    let quit = act(&engine, &session, "quit").await;
    assert!(quit.success);
    assert!(quit.effects.contains(&Effect::EndGame {
        reason: EndReason::Quit
    }));
    assert!(GameEngine::get_available_actions(&quit.session).is_empty());

    let late = act(&engine, &quit.session, "search").await;
    assert!(!late.success);
    assert_eq!(late.error_code, Some("ACTION_SESSION_INACTIVE"));
    assert_eq!(late.session, quit.session);
}

#[tokio::test]
async fn idle_timeout_ends_the_session() {
    let engine = engine(ScriptedGenerator::quiet());
    let session = in_combat(exploring(&engine).await, enemy(30, 5, 0));

    let outcome = engine
        .process_action(&session, &Action::system(SystemAction::IdleTimeout))
        .await;

    assert!(outcome.success);
    assert_eq!(outcome.session.end_reason, Some(EndReason::Timeout));
    assert!(outcome.session.combat.is_none());
}

#[tokio::test]
async fn random_walks_keep_every_invariant() {
    let engine = engine(OracleGenerator::new(ProceduralContent::new()));

    for seed in 0..12u64 {
        let mut session = engine
            .start_game_seeded("alice".into(), format!("walk-{seed}").into(), None, seed)
            .session;
        let mut pick = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);

        for _ in 0..200 {
            let labels: Vec<_> = GameEngine::get_available_actions(&session)
                .into_iter()
                .filter(|label| label != "quit")
                .collect();
            if labels.is_empty() {
                break;
            }
            pick = pick
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let label = &labels[(pick >> 33) as usize % labels.len()];

            let mut outcome = act(&engine, &session, label).await;
            if !outcome.success {
                assert_eq!(outcome.session, session, "rejected {label} changed state");
            }
            for effect in outcome.effects.clone() {
                if let Effect::ScheduleFollowUp { action, .. } = effect {
                    outcome = engine
                        .process_action(&outcome.session, &Action::system(action))
                        .await;
                }
            }

            session = outcome.session;
            let player = &session.player;
            assert!(session.invariants_hold(), "seed {seed} after {label}");
            assert!(player.health <= player.max_health);
            assert!(player.energy <= player.max_energy);
            assert!(player.experience < player.experience_to_next);
            assert_eq!(player.experience_to_next, player.level * 100);
            assert!(session.inventory.len() <= session.inventory.max_slots);
            if !session.is_active {
                break;
            }
        }
    }
}
