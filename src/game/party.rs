use serde::{Deserialize, Serialize};
use std::fmt;

/// The three political parties of the game.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Party {
    Liberal,
    Fascist,
    Communist,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Party::Liberal => "liberal",
            Party::Fascist => "fascist",
            Party::Communist => "communist",
        })
    }
}
