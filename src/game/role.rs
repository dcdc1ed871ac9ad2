use super::party::Party;
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::repeat;

pub const MIN_PLAYERS: usize = 6;
pub const MAX_PLAYERS: usize = 16;

/// A player's secret role.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Liberal,
    Fascist,
    Hitler,
    Communist,
}

impl Role {
    /// The party this role belongs to; Hitler is a member of the fascist party.
    pub fn party(&self) -> Party {
        match self {
            Role::Liberal => Party::Liberal,
            Role::Fascist | Role::Hitler => Party::Fascist,
            Role::Communist => Party::Communist,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Liberal => "liberal",
            Role::Fascist => "fascist",
            Role::Hitler => "hitler",
            Role::Communist => "communist",
        })
    }
}

/// How many of each role are dealt for a given table.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct RoleCounts {
    pub liberal: usize,
    pub fascist: usize,
    pub communist: usize,
    pub hitler: usize,
}

impl RoleCounts {
    pub fn total(&self) -> usize {
        self.liberal + self.fascist + self.communist + self.hitler
    }
}

/// Checks the player count is one the role table covers.
pub fn check_player_count(num_players: usize) -> Result<(), GameError> {
    if (MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
        Ok(())
    } else {
        Err(GameError::InvalidPlayerCount(num_players))
    }
}

/// Looks up the role distribution for a table of `num_players`.
pub fn role_counts(num_players: usize, communists: bool) -> Result<RoleCounts, GameError> {
    check_player_count(num_players)?;

    let (liberal, fascist, communist) = match (num_players, communists) {
        (6, true) => (3, 1, 1),
        (7, true) => (4, 1, 1),
        (8, true) => (4, 2, 1),
        (9, true) => (4, 2, 2),
        (10, true) => (5, 2, 2),
        (11, true) => (5, 3, 2),
        (12, true) => (6, 3, 2),
        (13, true) => (6, 3, 3),
        (14, true) => (7, 3, 3),
        (15, true) => (7, 4, 3),
        (16, true) => (7, 4, 4),
        (6, false) => (4, 1, 0),
        (7, false) => (4, 2, 0),
        (8, false) => (5, 2, 0),
        (9, false) => (5, 3, 0),
        (10, false) => (6, 3, 0),
        (11, false) => (6, 4, 0),
        (12, false) => (7, 4, 0),
        (13, false) => (7, 5, 0),
        (14, false) => (8, 5, 0),
        (15, false) => (8, 6, 0),
        (16, false) => (9, 6, 0),
        _ => return Err(GameError::InvalidPlayerCount(num_players)),
    };

    Ok(RoleCounts { liberal, fascist, communist, hitler: 1 })
}

/// Deals a shuffled set of roles, one per player.
pub fn create_roles(num_players: usize, communists: bool, rng: &mut impl Rng) -> Result<Vec<Role>, GameError> {
    let counts = role_counts(num_players, communists)?;

    let mut roles = Vec::with_capacity(counts.total());
    roles.extend(repeat(Role::Liberal).take(counts.liberal));
    roles.extend(repeat(Role::Fascist).take(counts.fascist));
    roles.extend(repeat(Role::Communist).take(counts.communist));
    roles.push(Role::Hitler);
    roles.shuffle(rng);

    Ok(roles)
}
