use serde_json::{json, Value};
use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game] or [Session].
///
/// [Game]: crate::game::Game
/// [Session]: crate::session::Session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("player count must be between 6 and 16, got {0}")]
    InvalidPlayerCount(usize),
    #[error("invalid combination of game options")]
    InvalidGameOptions,
    #[error("unknown AI strategy: {0}")]
    InvalidStrategy(String),
    #[error("game does not exist")]
    GameNotFound,
    #[error("no player exists with the given name")]
    PlayerNotFound,
    #[error("this player cannot be chosen for this action")]
    InvalidPlayerChoice,
    #[error("invalid player index")]
    InvalidPlayerIndex,
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
    #[error("an invalid card was chosen")]
    InvalidCard,
    #[error("the game is already over")]
    GameOver,
}

impl GameError {
    /// The structured error payload handed back across the API boundary.
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.to_string(),
        })
    }
}
