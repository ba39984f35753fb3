//! Actions accepted by the state machine.
//!
//! Players submit [`ActionKind`]s; the host submits [`SystemAction`]s when a
//! scheduled follow-up or idle timer fires. Both have a compact string form
//! (`move:north`, `use:potion`, `choice:1`, ...) for chat front ends.

mod available;
mod effect;
mod error;

pub use available::{available_actions, available_labels, is_allowed};
pub use effect::{ActionOutcome, Effect};
pub use error::{ActionError, ParseActionError};

use std::fmt;
use std::str::FromStr;

use crate::state::{AreaId, Direction, ItemId, PlayerId};

/// A request to advance a session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Player { actor: PlayerId, kind: ActionKind },
    System { kind: SystemAction },
}

impl Action {
    pub fn player(actor: impl Into<PlayerId>, kind: ActionKind) -> Self {
        Self::Player {
            actor: actor.into(),
            kind,
        }
    }

    pub fn system(kind: SystemAction) -> Self {
        Self::System { kind }
    }

    /// Parses a player's command string.
    pub fn parse(actor: impl Into<PlayerId>, input: &str) -> Result<Self, ParseActionError> {
        Ok(Self::player(actor, input.parse()?))
    }

    pub fn is_system(&self) -> bool {
        matches!(self, Self::System { .. })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player { kind, .. } => kind.fmt(f),
            Self::System { kind } => kind.fmt(f),
        }
    }
}

/// Player-initiated actions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionKind {
    Begin,
    Move { direction: Direction },
    Search,
    Rest,
    /// Opens the inventory; in combat this is the item-use detour.
    OpenInventory,
    CloseInventory,
    UseItem { item: ItemId },
    Equip { item: ItemId },
    Attack,
    Defend,
    Flee,
    /// Zero-based index into the current story event's choices.
    Choose { index: usize },
    Quit,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => f.write_str("begin"),
            Self::Move { direction } => write!(f, "move:{direction}"),
            Self::Search => f.write_str("search"),
            Self::Rest => f.write_str("rest"),
            Self::OpenInventory => f.write_str("inventory"),
            Self::CloseInventory => f.write_str("close"),
            Self::UseItem { item } => write!(f, "use:{item}"),
            Self::Equip { item } => write!(f, "equip:{item}"),
            Self::Attack => f.write_str("attack"),
            Self::Defend => f.write_str("defend"),
            Self::Flee => f.write_str("flee"),
            Self::Choose { index } => write!(f, "choice:{index}"),
            Self::Quit => f.write_str("quit"),
        }
    }
}

impl FromStr for ActionKind {
    type Err = ParseActionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ParseActionError::Empty);
        }
        let (verb, argument) = match input.split_once(':') {
            Some((verb, argument)) => (verb.trim(), Some(argument.trim())),
            None => (input, None),
        };
        let verb = verb.to_ascii_lowercase();

        let required = |name: &'static str| {
            argument
                .filter(|value| !value.is_empty())
                .ok_or(ParseActionError::MissingArgument(name))
        };

        let kind = match verb.as_str() {
            "begin" | "start" => Self::Begin,
            "move" | "go" => {
                let raw = required("direction")?;
                let direction = raw
                    .parse()
                    .map_err(|_| ParseActionError::InvalidDirection(raw.to_string()))?;
                Self::Move { direction }
            }
            "search" => Self::Search,
            "rest" => Self::Rest,
            "inventory" | "use_item" => Self::OpenInventory,
            "close" => Self::CloseInventory,
            "use" => Self::UseItem {
                item: ItemId::new(required("item")?),
            },
            "equip" => Self::Equip {
                item: ItemId::new(required("item")?),
            },
            "attack" => Self::Attack,
            "defend" => Self::Defend,
            "flee" => Self::Flee,
            "choice" | "choose" => {
                let raw = required("index")?;
                let index = raw
                    .parse()
                    .map_err(|_| ParseActionError::InvalidIndex(raw.to_string()))?;
                Self::Choose { index }
            }
            "quit" => Self::Quit,
            _ => return Err(ParseActionError::Unknown(input.to_string())),
        };
        Ok(kind)
    }
}

/// Non-player work the host schedules and submits later.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SystemAction {
    /// Start a fight in the current area.
    StartEncounter,
    /// Move to `destination`, or to a freshly generated area when `None`.
    Travel { destination: Option<AreaId> },
    /// The player has been idle for too long.
    IdleTimeout,
}

impl fmt::Display for SystemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartEncounter => f.write_str("start_encounter"),
            Self::Travel { destination: None } => f.write_str("travel"),
            Self::Travel {
                destination: Some(area),
            } => write!(f, "travel:{area}"),
            Self::IdleTimeout => f.write_str("idle_timeout"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command_form() {
        let cases = [
            ("begin", ActionKind::Begin),
            ("move:north", ActionKind::Move { direction: Direction::North }),
            ("MOVE: Up", ActionKind::Move { direction: Direction::Up }),
            ("search", ActionKind::Search),
            ("rest", ActionKind::Rest),
            ("inventory", ActionKind::OpenInventory),
            ("use_item", ActionKind::OpenInventory),
            ("close", ActionKind::CloseInventory),
            ("use:health_potion", ActionKind::UseItem { item: "health_potion".into() }),
            ("equip:iron_sword", ActionKind::Equip { item: "iron_sword".into() }),
            ("attack", ActionKind::Attack),
            ("defend", ActionKind::Defend),
            ("flee", ActionKind::Flee),
            ("choice:2", ActionKind::Choose { index: 2 }),
            ("quit", ActionKind::Quit),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<ActionKind>(), Ok(expected), "{input}");
        }
    }

    #[test]
    fn display_parses_back() {
        let kind = ActionKind::Move { direction: Direction::West };
        assert_eq!(kind.to_string(), "move:west");
        assert_eq!(kind.to_string().parse::<ActionKind>(), Ok(kind));
    }

    #[test]
    fn malformed_payloads_are_reported() {
        assert_eq!("".parse::<ActionKind>(), Err(ParseActionError::Empty));
        assert_eq!(
            "move".parse::<ActionKind>(),
            Err(ParseActionError::MissingArgument("direction"))
        );
        assert_eq!(
            "move:sideways".parse::<ActionKind>(),
            Err(ParseActionError::InvalidDirection("sideways".into()))
        );
        assert_eq!(
            "choice:first".parse::<ActionKind>(),
            Err(ParseActionError::InvalidIndex("first".into()))
        );
        assert!(matches!("dance".parse::<ActionKind>(), Err(ParseActionError::Unknown(_))));
    }
}
