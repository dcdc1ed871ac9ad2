//! A Secret Hitler XL game engine: roles, policy deck, board, game state and the
//! election / legislative / executive state machine, with pluggable AI strategies.

pub mod error;
pub mod game;
pub mod session;
pub mod time;

pub use error::GameError;
pub use game::{Game, GameOptions, StrategyMode, Winner};
