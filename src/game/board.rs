use super::deck::Deck;
use super::executive_power::{ExecutivePower, ARTICLE48_POWERS, ENABLING_ACT_POWERS};
use super::government::{PlayerRef, PolicyRecord};
use super::party::Party;
use super::policy::Policy;
use super::state::GameState;
use super::{WinCondition, Winner};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

const LIBERAL_TRACK_SIZE: usize = 5;
const FASCIST_TRACK_SIZE: usize = 6;
pub const VETO_POWER_THRESHOLD: usize = 5;

/// How a policy reached the board.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub struct EnactOptions {
    /// Enacted from the top of the deck by the election tracker; grants no power.
    pub chaos: bool,
    /// Article 48 / Enabling Act cards grant emergency powers.
    pub emergency: bool,
    /// Anti-policies and the social democratic policy move the other tracks.
    pub anti_policies: bool,
}

/// Which track the chancellor strips a policy from when a social democratic policy passes.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum TrackRemoval {
    Fascist,
    Communist,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Board {
    pub num_players: usize,
    pub communists: bool,
    pub liberal_track: usize,
    pub fascist_track: usize,
    pub communist_track: usize,
    pub liberal_track_size: usize,
    pub fascist_track_size: usize,
    pub communist_track_size: usize,
    /// The power granted by the n-th fascist policy is at index n - 1.
    pub fascist_powers: Vec<Option<ExecutivePower>>,
    pub communist_powers: Vec<Option<ExecutivePower>>,
    pub deck: Deck,
    pub veto_available: bool,
}

impl Board {
    /// Creates a new board with an empty deck.
    pub fn new(num_players: usize, communists: bool) -> Self {
        Board {
            num_players,
            communists,
            liberal_track: 0,
            fascist_track: 0,
            communist_track: 0,
            liberal_track_size: LIBERAL_TRACK_SIZE,
            fascist_track_size: FASCIST_TRACK_SIZE,
            communist_track_size: match (communists, num_players) {
                (false, _) => 0,
                (true, 0..=8) => 5,
                (true, _) => 6,
            },
            fascist_powers: Self::fascist_schedule(num_players),
            communist_powers: if communists {
                Self::communist_schedule(num_players)
            } else {
                vec![]
            },
            deck: Deck::default(),
            veto_available: false,
        }
    }

    fn fascist_schedule(num_players: usize) -> Vec<Option<ExecutivePower>> {
        use ExecutivePower::*;
        match num_players {
            0..=7 => vec![None, None, Some(PolicyPeek), Some(Execution), Some(Execution)],
            8..=10 => vec![
                None,
                Some(InvestigateLoyalty),
                Some(SpecialElection),
                Some(Execution),
                Some(Execution),
            ],
            _ => vec![
                Some(InvestigateLoyalty),
                Some(InvestigateLoyalty),
                Some(SpecialElection),
                Some(Execution),
                Some(Execution),
            ],
        }
    }

    fn communist_schedule(num_players: usize) -> Vec<Option<ExecutivePower>> {
        use ExecutivePower::*;
        match num_players {
            0..=8 => vec![
                Some(Bugging),
                Some(Radicalization),
                Some(FiveYearPlan),
                Some(Congress),
            ],
            9..=10 => vec![
                Some(Bugging),
                Some(Radicalization),
                Some(FiveYearPlan),
                Some(Congress),
                Some(Confession),
            ],
            _ => vec![
                None,
                Some(Radicalization),
                Some(FiveYearPlan),
                Some(Radicalization),
                Some(Confession),
            ],
        }
    }

    /// Draws from the top of the deck, reshuffling the discards in if the deck runs short.
    pub fn draw_policy(&mut self, count: usize, rng: &mut impl Rng) -> Vec<Policy> {
        self.deck.draw(count, rng)
    }

    pub fn discard(&mut self, policies: impl IntoIterator<Item = Policy>) {
        self.deck.discard(policies);
    }

    /// Places a policy on the board and applies its effects.
    /// Returns the executive power it grants, if any.
    pub fn enact_policy(
        &mut self,
        policy: Policy,
        state: &mut GameState,
        opts: EnactOptions,
        removal: Option<TrackRemoval>,
        rng: &mut impl Rng,
    ) -> Option<ExecutivePower> {
        let mut power = None;

        match policy {
            Policy::Liberal => {
                self.liberal_track += 1;
            }
            Policy::Fascist => {
                self.fascist_track += 1;
                if !opts.chaos {
                    power = self.get_fascist_power(state);
                }
            }
            Policy::Communist => {
                self.communist_track += 1;
                if !opts.chaos {
                    power = self.get_communist_power(state);
                }
            }
            Policy::AntiFascist if opts.anti_policies => {
                self.communist_track += 1;
                self.remove_fascist(state);
            }
            Policy::AntiCommunist if opts.anti_policies => {
                self.fascist_track += 1;
                self.remove_communist(state);
            }
            Policy::SocialDemocratic if opts.anti_policies => {
                self.liberal_track += 1;
                match removal.unwrap_or(TrackRemoval::Fascist) {
                    TrackRemoval::Fascist => self.remove_fascist(state),
                    TrackRemoval::Communist => self.remove_communist(state),
                }
            }
            Policy::Article48 if opts.emergency => {
                power = ARTICLE48_POWERS.choose(rng).copied();
            }
            Policy::EnablingAct if opts.emergency => {
                power = ENABLING_ACT_POWERS.choose(rng).copied();
            }
            _ => {}
        }

        self.veto_available = self.fascist_track >= VETO_POWER_THRESHOLD;

        if let Some(party) = self.check_tracks() {
            let (condition, winner) = track_victory(party);
            state.end_game(condition, winner);
        }

        let snapshot = |id: Option<usize>| id.and_then(|id| state.players.get(id)).map(PlayerRef::from);
        let record = PolicyRecord {
            policy,
            president: snapshot(state.president),
            chancellor: snapshot(state.chancellor),
            round: state.round_number,
            liberal_track: self.liberal_track,
            fascist_track: self.fascist_track,
            communist_track: if self.communists { self.communist_track } else { 0 },
        };
        state.policy_history.push(record);
        state.enacted_policies += 1;

        power
    }

    fn remove_fascist(&mut self, state: &mut GameState) {
        self.fascist_track = self.fascist_track.saturating_sub(1);
        state.block_next_fascist_power = true;
    }

    fn remove_communist(&mut self, state: &mut GameState) {
        self.communist_track = self.communist_track.saturating_sub(1);
        state.block_next_communist_power = true;
    }

    /// Gets the power unlocked by the fascist policy just placed, unless it has been blocked.
    pub fn get_fascist_power(&self, state: &mut GameState) -> Option<ExecutivePower> {
        if state.block_next_fascist_power {
            state.block_next_fascist_power = false;
            return None;
        }
        self.get_power_for_track_position(Party::Fascist, self.fascist_track)
    }

    /// Gets the power unlocked by the communist policy just placed, unless it has been blocked.
    pub fn get_communist_power(&self, state: &mut GameState) -> Option<ExecutivePower> {
        if state.block_next_communist_power {
            state.block_next_communist_power = false;
            return None;
        }
        self.get_power_for_track_position(Party::Communist, self.communist_track)
    }

    /// Looks up the power at a 1-indexed track position.
    pub fn get_power_for_track_position(&self, track: Party, position: usize) -> Option<ExecutivePower> {
        let schedule = match track {
            Party::Fascist => &self.fascist_powers,
            Party::Communist => &self.communist_powers,
            Party::Liberal => return None,
        };
        position.checked_sub(1).and_then(|idx| schedule.get(idx).copied().flatten())
    }

    /// Checks whether any party has completed their policy track.
    pub fn check_tracks(&self) -> Option<Party> {
        if self.liberal_track >= self.liberal_track_size {
            return Some(Party::Liberal);
        }
        if self.fascist_track >= self.fascist_track_size {
            return Some(Party::Fascist);
        }
        if self.communist_track_size > 0 && self.communist_track >= self.communist_track_size {
            return Some(Party::Communist);
        }
        None
    }
}

/// The outcome of a party completing its track.
pub fn track_victory(party: Party) -> (WinCondition, Winner) {
    match party {
        Party::Liberal => (WinCondition::LiberalPolicyTrack, Winner::Liberal),
        Party::Fascist => (WinCondition::FascistPolicyTrack, Winner::Fascist),
        Party::Communist => (WinCondition::CommunistPolicyTrack, Winner::Communist),
    }
}
