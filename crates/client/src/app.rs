//! Console game loop.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use rpg_core::{Effect, EndReason, SessionId};
use rpg_runtime::{Event, FileSessionRepository, Runtime, SessionHandle, Topic};

use crate::config::CliConfig;
use crate::logging;

const HELP: &str = "\
Commands are sent to the game as typed, for example:
  begin, move:north, search, rest, inventory, use:<item>, equip:<item>,
  close, attack, defend, use_item, flee, choice:<n>, quit
Console commands:
  help     show this text
  actions  list what you can do right now
  status   show your health, energy, credits, and level
  save     store the session so it can be resumed later
  exit     leave without ending the game";

/// Starts (or resumes) the configured session and plays it from stdin.
pub async fn run(config: CliConfig) -> Result<()> {
    let runtime = config.build_runtime()?;
    let repository = FileSessionRepository::new(save_dir(&config))
        .context("opening the save directory")?;
    let session_id = SessionId::new(config.session_id.clone());

    let handle = match repository.load(&session_id) {
        Ok(Some(saved)) if saved.is_active => {
            info!(session = %session_id, "resuming saved session");
            println!("Resuming your saved adventure.");
            runtime.resume_session(saved).await?
        }
        Ok(_) => start(&runtime, &config, session_id.clone()).await?,
        Err(error) => {
            warn!(session = %session_id, %error, "saved session unreadable, starting over");
            start(&runtime, &config, session_id.clone()).await?
        }
    };

    tokio::spawn(print_background_events(handle.clone()));
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => continue,
            "help" => println!("{HELP}"),
            "actions" => println!("{}", handle.available_actions().await?.join(", ")),
            "status" => {
                let session = handle.snapshot().await?;
                let player = &session.player;
                println!(
                    "Level {} | HP {}/{} | Energy {}/{} | XP {}/{} | {} credits | Story {}%",
                    player.level,
                    player.health,
                    player.max_health,
                    player.energy,
                    player.max_energy,
                    player.experience,
                    player.experience_to_next,
                    player.credits,
                    session.story_progress
                );
            }
            "save" => {
                repository.save(&handle.snapshot().await?)?;
                println!("Saved.");
            }
            "exit" => break,
            command => match handle.act(command).await {
                Ok(outcome) => {
                    print_effects(&outcome.effects);
                    if !outcome.success
                        && let Some(message) = &outcome.message
                    {
                        println!("{message}");
                    }
                    if let Some(reason) = ended(&outcome.effects) {
                        finish(&repository, &session_id, reason)?;
                        break;
                    }
                }
                Err(rpg_runtime::RuntimeError::Parse(error)) => {
                    println!("{error}. Type `help` for commands.");
                }
                Err(error) => return Err(error.into()),
            },
        }
    }

    let last = runtime.end_session(&session_id).await?;
    if last.is_active {
        repository.save(&last)?;
        info!(session = %session_id, "session saved on exit");
    }
    runtime.shutdown().await?;
    Ok(())
}

async fn start(runtime: &Runtime, config: &CliConfig, id: SessionId) -> Result<SessionHandle> {
    let start = runtime
        .start_session(config.player_id.clone().into(), id, config.difficulty)
        .await?;
    print_effects(&start.effects);
    Ok(start.handle)
}

fn save_dir(config: &CliConfig) -> PathBuf {
    config
        .save_dir
        .clone()
        .unwrap_or_else(|| logging::data_dir().join("sessions"))
}

fn print_effects(effects: &[Effect]) {
    for effect in effects {
        if let Effect::SendMessage { text } = effect {
            println!("{text}");
        }
    }
}

fn ended(effects: &[Effect]) -> Option<EndReason> {
    effects.iter().find_map(|effect| match effect {
        Effect::EndGame { reason } => Some(*reason),
        _ => None,
    })
}

fn finish(repository: &FileSessionRepository, id: &SessionId, reason: EndReason) -> Result<()> {
    println!("Game over ({reason}).");
    repository.delete(id)?;
    Ok(())
}

/// Prints what follow-ups and the idle timer did while the player was typing.
async fn print_background_events(handle: SessionHandle) {
    let mut events = handle.subscribe(Topic::Action);
    loop {
        let event = match events.recv().await {
            Ok(Event::Action(event)) => event,
            Ok(_) => continue,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "console fell behind the event stream");
                continue;
            }
            Err(RecvError::Closed) => break,
        };
        if &event.session != handle.id() || !event.action.is_system() || !event.success {
            continue;
        }
        print_effects(&event.effects);
        if ended(&event.effects).is_some() {
            println!("Game over. Type `exit` to leave.");
        }
    }
}
