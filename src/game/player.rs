use super::{party::Party, policy::Policy, role::Role};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Players are identified by their seat, `0..num_players`.
pub type PlayerId = usize;

/// A game player.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub is_dead: bool,
    /// Set once the player has been elected chancellor after the third fascist policy.
    pub confirmed_not_hitler: bool,
    pub knowledge: Knowledge,
}

/// What a player privately knows about the other players.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Knowledge {
    /// Who Hitler is; only ever known to fascists.
    pub hitler: Option<PlayerId>,
    /// Fellow fascists (excluding Hitler).
    pub fascists: Vec<PlayerId>,
    /// Communists this player knows about.
    pub known_communists: Vec<PlayerId>,
    /// Results of this player's own loyalty investigations.
    pub inspected_players: BTreeMap<PlayerId, Party>,
    /// Party memberships learned any other way (bugging, impeachment).
    pub known_affiliations: BTreeMap<PlayerId, Party>,
    /// The most recent cards this player has peeked at.
    pub peeked_policies: Vec<Policy>,
}

impl Player {
    pub fn new(id: PlayerId, name: String, role: Role) -> Self {
        Self {
            id,
            name,
            role,
            is_dead: false,
            confirmed_not_hitler: false,
            knowledge: Knowledge::default(),
        }
    }

    pub fn party(&self) -> Party {
        self.role.party()
    }

    pub fn is_hitler(&self) -> bool {
        self.role == Role::Hitler
    }

    pub fn is_fascist(&self) -> bool {
        self.party() == Party::Fascist
    }

    pub fn is_communist(&self) -> bool {
        self.role == Role::Communist
    }

    pub fn is_liberal(&self) -> bool {
        self.role == Role::Liberal
    }
}

impl Knowledge {
    /// The party this player found when investigating `other`.
    pub fn inspected(&self, other: PlayerId) -> Option<Party> {
        self.inspected_players.get(&other).copied()
    }

    /// The party this player learned for `other` outside of an investigation.
    pub fn affiliation(&self, other: PlayerId) -> Option<Party> {
        self.known_affiliations.get(&other).copied()
    }

    /// Whether this player knows `other` to be a member of the fascist team.
    pub fn knows_fascist(&self, other: PlayerId) -> bool {
        self.hitler == Some(other)
            || self.fascists.contains(&other)
            || self.inspected(other) == Some(Party::Fascist)
            || self.affiliation(other) == Some(Party::Fascist)
    }

    /// Whether this player knows `other` to be a communist.
    pub fn knows_communist(&self, other: PlayerId) -> bool {
        self.known_communists.contains(&other)
            || self.inspected(other) == Some(Party::Communist)
            || self.affiliation(other) == Some(Party::Communist)
    }

    /// Whether this player knows `other` to be a liberal.
    pub fn knows_liberal(&self, other: PlayerId) -> bool {
        self.inspected(other) == Some(Party::Liberal) || self.affiliation(other) == Some(Party::Liberal)
    }
}
