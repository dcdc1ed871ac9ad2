use super::party::Party;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::repeat;

/// A policy card.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    Liberal,
    Fascist,
    Communist,
    /// Placed on the communist track; removes a fascist policy.
    AntiFascist,
    /// Placed on the fascist track; removes a communist policy.
    AntiCommunist,
    /// Placed on the liberal track; the chancellor removes a fascist or communist policy.
    SocialDemocratic,
    /// Grants the president an emergency power.
    Article48,
    /// Grants the chancellor an emergency power.
    EnablingAct,
}

impl Policy {
    /// The party whose track a plain policy advances.
    pub fn party(&self) -> Option<Party> {
        match self {
            Policy::Liberal => Some(Party::Liberal),
            Policy::Fascist => Some(Party::Fascist),
            Policy::Communist => Some(Party::Communist),
            _ => None,
        }
    }

    pub fn is_emergency(&self) -> bool {
        matches!(self, Policy::Article48 | Policy::EnablingAct)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Policy::Liberal => "liberal",
            Policy::Fascist => "fascist",
            Policy::Communist => "communist",
            Policy::AntiFascist => "antifascist",
            Policy::AntiCommunist => "anticommunist",
            Policy::SocialDemocratic => "socialdemocratic",
            Policy::Article48 => "article48",
            Policy::EnablingAct => "enablingact",
        })
    }
}

/// The number of emergency power cards dealt into the deck.
pub fn emergency_card_count(num_players: usize, communists: bool) -> usize {
    if num_players <= 10 {
        return 0;
    }
    if communists && num_players > 13 {
        ((num_players - 13) * 2).min(6)
    } else {
        (num_players - 10).min(6)
    }
}

/// Builds and shuffles the policy deck for a table of `num_players`.
pub fn create_policy_deck(
    num_players: usize,
    communists: bool,
    anti_policies: bool,
    emergency_powers: bool,
    rng: &mut impl Rng,
) -> Vec<Policy> {
    let (mut liberal, mut fascist) = if num_players < 8 { (5, 10) } else { (6, 9) };
    let mut communist = if communists { 8 } else { 0 };

    let mut deck = vec![];

    // Each anti-policy takes the place of one ordinary card
    if anti_policies && communists {
        fascist -= 1;
        communist -= 1;
        liberal -= 1;
        deck.extend([Policy::AntiCommunist, Policy::AntiFascist, Policy::SocialDemocratic]);
    }

    deck.extend(repeat(Policy::Liberal).take(liberal));
    deck.extend(repeat(Policy::Fascist).take(fascist));
    deck.extend(repeat(Policy::Communist).take(communist));

    if emergency_powers {
        let count = emergency_card_count(num_players, communists);
        deck.extend(repeat(Policy::Article48).take((count + 1) / 2));
        deck.extend(repeat(Policy::EnablingAct).take(count / 2));
    }

    deck.shuffle(rng);
    deck
}
