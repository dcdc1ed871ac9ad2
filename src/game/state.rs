use super::government::{Government, GovernmentRecord, PolicyRecord};
use super::party::Party;
use super::player::{Player, PlayerId};
use super::policy::Policy;
use super::{Outcome, WinCondition, Winner};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const OKTOBERFEST_MONTH: u8 = 10;

/// Represents the current phase in the game loop.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Setup,
    Election,
    Voting,
    Legislative,
    ExecutivePower,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Setup => "setup",
            Phase::Election => "election",
            Phase::Voting => "voting",
            Phase::Legislative => "legislative",
            Phase::ExecutivePower => "executive_power",
            Phase::GameOver => "game_over",
        })
    }
}

/// A change in the Oktoberfest status caused by the calendar moving on.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Oktoberfest {
    Started,
    Ended,
}

/// The mutable aggregate of a single game.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct GameState {
    pub phase: Phase,
    pub round_number: usize,

    /// Every player, indexed by id; never shrinks.
    pub players: Vec<Player>,
    /// Living players, in seating order.
    pub active_players: Vec<PlayerId>,

    pub president: Option<PlayerId>,
    pub chancellor: Option<PlayerId>,
    pub president_candidate: Option<PlayerId>,
    pub chancellor_candidate: Option<PlayerId>,
    pub previous_government: Option<Government>,

    pub election_tracker: usize,
    pub last_votes: Vec<(PlayerId, bool)>,
    pub term_limited_players: Vec<PlayerId>,

    pub special_election: bool,
    /// The active-player index of the president who called the special election.
    pub special_election_return_index: Option<usize>,
    /// The player chosen to hold the next presidency out of turn.
    pub special_president: Option<PlayerId>,

    pub marked_for_execution: Option<PlayerId>,
    /// The fascist track when the mark was placed.
    pub marked_for_execution_tracker: Option<usize>,

    pub revealed_affiliations: BTreeMap<PlayerId, Party>,
    pub investigated_players: Vec<PlayerId>,

    pub government_history: Vec<GovernmentRecord>,
    pub policy_history: Vec<PolicyRecord>,
    pub enacted_policies: usize,
    pub last_discarded: Option<Policy>,

    /// The president's hand during a legislative session.
    pub presidential_policies: Option<Vec<Policy>>,
    /// The chancellor's hand during a legislative session.
    pub chancellor_policies: Option<Vec<Policy>>,

    pub block_next_fascist_power: bool,
    pub block_next_communist_power: bool,

    /// 1..=12
    pub month_counter: u8,
    pub oktoberfest_active: bool,

    pub outcome: Option<Outcome>,
}

impl GameState {
    pub fn new(players: Vec<Player>, month_counter: u8) -> Self {
        let active_players = players.iter().map(|p| p.id).collect();
        Self {
            phase: Phase::Setup,
            round_number: 0,
            players,
            active_players,
            president: None,
            chancellor: None,
            president_candidate: None,
            chancellor_candidate: None,
            previous_government: None,
            election_tracker: 0,
            last_votes: vec![],
            term_limited_players: vec![],
            special_election: false,
            special_election_return_index: None,
            special_president: None,
            marked_for_execution: None,
            marked_for_execution_tracker: None,
            revealed_affiliations: BTreeMap::new(),
            investigated_players: vec![],
            government_history: vec![],
            policy_history: vec![],
            enacted_policies: 0,
            last_discarded: None,
            presidential_policies: None,
            chancellor_policies: None,
            block_next_fascist_power: false,
            block_next_communist_power: false,
            month_counter: month_counter.clamp(1, 12),
            oktoberfest_active: false,
            outcome: None,
        }
    }

    /// Gets a player by id.
    pub fn player(&self, id: PlayerId) -> Result<&Player, GameError> {
        self.players.get(id).ok_or(GameError::InvalidPlayerIndex)
    }

    /// Gets a player by id, mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, GameError> {
        self.players.get_mut(id).ok_or(GameError::InvalidPlayerIndex)
    }

    pub fn is_active(&self, id: PlayerId) -> bool {
        self.active_players.contains(&id)
    }

    pub fn game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.outcome.map(|o| o.winner)
    }

    /// Ends the game; the first recorded outcome stands.
    pub fn end_game(&mut self, condition: WinCondition, winner: Winner) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome { condition, winner });
        }
        self.phase = Phase::GameOver;
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[usize::from(self.month_counter.clamp(1, 12)) - 1]
    }

    /// Players who may be nominated chancellor by the current president candidate.
    pub fn get_eligible_chancellors(&self) -> Vec<PlayerId> {
        self.eligible_players()
            .exclude_opt(self.president_candidate)
            .not_term_limited()
            .make()
    }

    /// The active-player index of the next president in the rotation.
    pub fn get_next_president_index(&mut self) -> usize {
        let len = self.active_players.len().max(1);
        if self.special_election {
            self.special_election = false;
            if let Some(index) = self.special_election_return_index.take() {
                return (index + 1) % len;
            }
        }
        let Some(president) = self.president else {
            return 0;
        };
        match self.active_players.iter().position(|p| *p == president) {
            Some(index) => (index + 1) % len,
            None => 0,
        }
    }

    /// Hands the presidential candidacy to the next player and ticks the calendar.
    pub fn set_next_president(&mut self) -> Option<Oktoberfest> {
        if let Some(special) = self.special_president.take() {
            self.president_candidate = Some(special);
        } else if !self.active_players.is_empty() {
            let index = self.get_next_president_index();
            self.president_candidate = self.active_players.get(index).copied();
        }
        self.advance_month_counter()
    }

    /// Removes a dead player from the rotation, passing on the candidacy if they held it.
    /// A candidate already lined up, such as a special president, keeps their turn.
    pub fn handle_player_death(&mut self, id: PlayerId) {
        if let Some(player) = self.players.get_mut(id) {
            player.is_dead = true;
        }

        let index = self.active_players.iter().position(|p| *p == id);
        self.active_players.retain(|p| *p != id);
        self.term_limited_players.retain(|p| *p != id);

        let (Some(index), false) = (index, self.active_players.is_empty()) else {
            return;
        };
        let replacement = self.active_players[index % self.active_players.len()];
        if self.president == Some(id) {
            self.president = None;
        }
        if self.president_candidate == Some(id) || (self.president.is_none() && self.president_candidate.is_none()) {
            self.president_candidate = Some(replacement);
        }
        if let Some(ret) = self.special_election_return_index {
            if index <= ret {
                let len = self.active_players.len();
                self.special_election_return_index = Some(ret.checked_sub(1).unwrap_or(len - 1));
            }
        }
        if self.special_president == Some(id) {
            self.special_president = None;
        }
    }

    /// Moves the calendar on by one month.
    pub fn advance_month_counter(&mut self) -> Option<Oktoberfest> {
        self.month_counter = if self.month_counter >= 12 { 1 } else { self.month_counter + 1 };

        if self.month_counter == OKTOBERFEST_MONTH {
            self.start_oktoberfest()
        } else if self.month_counter == OKTOBERFEST_MONTH + 1 {
            self.end_oktoberfest()
        } else {
            None
        }
    }

    /// Every bot plays randomly while Oktoberfest is on.
    pub fn start_oktoberfest(&mut self) -> Option<Oktoberfest> {
        if self.oktoberfest_active {
            return None;
        }
        self.oktoberfest_active = true;
        Some(Oktoberfest::Started)
    }

    pub fn end_oktoberfest(&mut self) -> Option<Oktoberfest> {
        if !self.oktoberfest_active {
            return None;
        }
        self.oktoberfest_active = false;
        Some(Oktoberfest::Ended)
    }

    /// Works out which players are term-limited after a government has served.
    pub fn set_term_limits(&mut self) {
        self.term_limited_players.clear();
        if let Some(chancellor) = self.chancellor {
            self.term_limited_players.push(chancellor);
        }
        if self.active_players.len() <= 5 {
            if let Some(president) = self.president.filter(|p| Some(*p) != self.chancellor) {
                self.term_limited_players.push(president);
            }
        }
    }

    /// The ids of the players matching `pred`, in id order.
    pub fn ids_where(&self, pred: impl Fn(&Player) -> bool) -> Vec<PlayerId> {
        self.players.iter().filter(|p| pred(p)).map(|p| p.id).collect()
    }
}
