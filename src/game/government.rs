use super::player::{Player, PlayerId};
use super::policy::Policy;
use serde::{Deserialize, Serialize};

/// A president and chancellor pair.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Government {
    pub president: PlayerId,
    pub chancellor: PlayerId,
}

/// A player as they were when a record was written.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct PlayerRef {
    pub id: PlayerId,
    pub name: String,
}

impl From<&Player> for PlayerRef {
    fn from(player: &Player) -> Self {
        Self { id: player.id, name: player.name.clone() }
    }
}

/// A government that won its election.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GovernmentRecord {
    pub president: PlayerRef,
    pub chancellor: PlayerRef,
    pub round: usize,
    pub votes: Vec<(PlayerId, bool)>,
}

/// An enacted policy and the board it produced.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PolicyRecord {
    pub policy: Policy,
    pub president: Option<PlayerRef>,
    pub chancellor: Option<PlayerRef>,
    pub round: usize,
    pub liberal_track: usize,
    pub fascist_track: usize,
    pub communist_track: usize,
}
