use crate::PlayerId;
use thiserror::Error;

/// errors the engine distinguishes. invalid actions and strategy
/// failures are recoverable (the player is re-prompted up to the
/// invalid-action limit); state-transition errors abort the hand;
/// config errors surface at session construction; store errors are
/// logged and the hand result still stands.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid action from player {player}: {reason}")]
    InvalidAction { player: PlayerId, reason: String },
    #[error("invalid state transition: {0}")]
    InvalidStateTransition(String),
    #[error("invalid game configuration: {0}")]
    Config(String),
    #[error("statistics store failure: {0}")]
    StorePersistence(String),
    #[error("strategy failure for player {player}: {reason}")]
    Strategy { player: PlayerId, reason: String },
}
