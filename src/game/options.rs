use super::player::PlayerId;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Options for customising a game of Secret Hitler XL.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct GameOptions {
    /// Whether to include the communists in the game.
    pub communists: bool,
    /// Whether to shuffle anti-policies and the social democratic policy into the deck.
    /// Only takes effect with communists.
    pub anti_policies: bool,
    /// Whether to shuffle Article 48 and Enabling Act cards into the deck.
    pub emergency_powers: bool,
    /// How the computer players decide.
    pub ai_strategy: StrategyMode,
    /// Seats controlled by a person rather than the computer.
    pub human_players: Vec<PlayerId>,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            communists: true,
            anti_policies: false,
            emergency_powers: false,
            ai_strategy: StrategyMode::Role,
            human_players: vec![],
        }
    }
}

impl GameOptions {
    /// Checks the options against a table of `num_players`.
    /// Anti-policies are switched off when there are no communists to play them against.
    pub fn validate(mut self, num_players: usize) -> Result<Self, GameError> {
        if self.human_players.iter().any(|id| *id >= num_players) {
            return Err(GameError::InvalidGameOptions);
        }
        if !self.communists {
            self.anti_policies = false;
        }
        self.human_players.sort_unstable();
        self.human_players.dedup();
        Ok(self)
    }
}

/// Selects which strategy the computer players use.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyMode {
    /// Every bot plays randomly.
    Random,
    /// Each bot plays the strategy matching its role.
    #[default]
    Role,
    /// Every bot plays the role-aware smart strategy.
    Smart,
}

impl FromStr for StrategyMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(StrategyMode::Random),
            "role" => Ok(StrategyMode::Role),
            "smart" => Ok(StrategyMode::Smart),
            _ => Err(GameError::InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for StrategyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyMode::Random => "random",
            StrategyMode::Role => "role",
            StrategyMode::Smart => "smart",
        })
    }
}
