//! The election half of a round, split into steps that can be driven one at a time.
//!
//! Every step returns a plain result structure describing what happened.

use super::player::PlayerId;
use super::policy::Policy;
use super::state::Phase;
use super::{Game, WinCondition, Winner};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The election tracker value that forces a chaos policy.
pub const CHAOS_THRESHOLD: usize = 3;

/// The top policy was enacted because no government could be formed.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct ChaosResult {
    pub policy: Policy,
    pub game_over: bool,
}

/// A delayed execution that came due.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct MarkedExecution {
    pub target: PlayerId,
    pub was_hitler: bool,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct NominationResult {
    pub president: PlayerId,
    /// `None` if nobody could be nominated, in which case chaos followed.
    pub chancellor: Option<PlayerId>,
    pub chaos: Option<ChaosResult>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct ElectionResult {
    pub president: PlayerId,
    pub chancellor: PlayerId,
    pub passed: bool,
    pub ja: usize,
    pub nein: usize,
    pub election_tracker: usize,
    pub chaos: Option<ChaosResult>,
    pub hitler_elected: bool,
    pub game_over: bool,
}

/// Everything that happened between the end of one legislative session and the start of the next.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug, Default)]
pub struct ElectionCycle {
    pub marked_execution: Option<MarkedExecution>,
    pub nomination: Option<NominationResult>,
    pub election: Option<ElectionResult>,
    /// Whether a government was installed and a legislative session should follow.
    pub passed: bool,
}

impl Game {
    /// Executes the marked player once three more fascist policies have been enacted since the mark.
    pub fn check_marked_for_execution(&mut self) -> Result<Option<MarkedExecution>, GameError> {
        let (Some(target), Some(tracker)) = (self.state.marked_for_execution, self.state.marked_for_execution_tracker)
        else {
            return Ok(None);
        };
        if self.board.fascist_track.saturating_sub(tracker) < 3 {
            return Ok(None);
        }

        self.state.marked_for_execution = None;
        self.state.marked_for_execution_tracker = None;
        if !self.state.is_active(target) {
            return Ok(None);
        }
        let was_hitler = self.kill_player(target)?;
        Ok(Some(MarkedExecution { target, was_hitler }))
    }

    /// Nominates a chancellor, either the given one or the presidential candidate's choice.
    /// If nobody is eligible, a chaos policy is enacted and the candidacy moves on.
    pub fn nominate_chancellor_safe(&mut self, chancellor: Option<PlayerId>) -> Result<NominationResult, GameError> {
        self.check_not_over()?;
        if self.state.phase != Phase::Election {
            return Err(GameError::InvalidAction);
        }
        let Some(president) = self.state.president_candidate else {
            return Err(GameError::InvalidAction);
        };

        let nominee = match chancellor {
            Some(chancellor) => {
                if !self.state.get_eligible_chancellors().contains(&chancellor) {
                    return Err(GameError::InvalidPlayerChoice);
                }
                self.state.chancellor_candidate = Some(chancellor);
                Some(chancellor)
            }
            None => self.nominate_chancellor()?,
        };

        if nominee.is_some() {
            self.state.phase = Phase::Voting;
            return Ok(NominationResult { president, chancellor: nominee, chaos: None });
        }

        let chaos = self.trigger_chaos()?;
        if !self.state.game_over() {
            self.state.president = Some(president);
            self.state.chancellor = None;
            self.advance_to_next_president();
        }
        Ok(NominationResult { president, chancellor: None, chaos: Some(chaos) })
    }

    /// Resolves the election from a set of votes cast outside the engine.
    pub fn resolve_election(&mut self, votes: &BTreeMap<PlayerId, bool>) -> Result<ElectionResult, GameError> {
        self.check_not_over()?;
        let Phase::Voting = self.state.phase else {
            return Err(GameError::InvalidAction);
        };
        let passed = self.tally_votes(votes)?;
        self.after_vote(passed)
    }

    /// Seats the nominated government. Returns whether Hitler was elected and won the game.
    pub fn install_government(&mut self) -> Result<bool, GameError> {
        let (Some(president), Some(chancellor)) = (self.state.president_candidate, self.state.chancellor_candidate)
        else {
            return Err(GameError::InvalidAction);
        };
        self.state.president = Some(president);
        self.state.chancellor = Some(chancellor);
        self.state.election_tracker = 0;

        if self.board.fascist_track >= 3 {
            let player = self.state.player_mut(chancellor)?;
            if player.is_hitler() {
                self.state.end_game(WinCondition::HitlerChancellor, Winner::Fascist);
                return Ok(true);
            }
            player.confirmed_not_hitler = true;
        }

        self.state.phase = Phase::Legislative;
        Ok(false)
    }

    /// Hands the presidential candidacy to the next player.
    pub fn advance_to_next_president(&mut self) {
        self.state.chancellor_candidate = None;
        self.advance_turn();
        self.state.phase = Phase::Election;
    }

    /// Runs an election from start to finish, asking the players for every decision.
    pub fn run_full_election_cycle(&mut self) -> Result<ElectionCycle, GameError> {
        self.check_not_over()?;
        self.state.phase = Phase::Election;

        let mut cycle = ElectionCycle {
            marked_execution: self.check_marked_for_execution()?,
            ..Default::default()
        };
        if self.state.game_over() {
            return Ok(cycle);
        }

        let nomination = self.nominate_chancellor_safe(None)?;
        let nominated = nomination.chancellor.is_some();
        cycle.nomination = Some(nomination);
        if !nominated {
            return Ok(cycle);
        }

        let passed = self.vote_on_government()?;
        let election = self.after_vote(passed)?;
        cycle.passed = election.passed && !election.game_over;
        cycle.election = Some(election);
        Ok(cycle)
    }

    /// Installs the government, or deals with the failed election.
    fn after_vote(&mut self, passed: bool) -> Result<ElectionResult, GameError> {
        let (Some(president), Some(chancellor)) = (self.state.president_candidate, self.state.chancellor_candidate)
        else {
            return Err(GameError::InvalidAction);
        };
        let ja = self.state.last_votes.iter().filter(|(_, vote)| *vote).count();
        let nein = self.state.last_votes.len() - ja;

        let mut chaos = None;
        let mut hitler_elected = false;
        if passed {
            hitler_elected = self.install_government()?;
        } else {
            // The rotation carries on from the failed candidate
            self.state.president = Some(president);
            self.state.chancellor = None;
            if self.state.election_tracker >= CHAOS_THRESHOLD {
                chaos = Some(self.trigger_chaos()?);
            }
            if !self.state.game_over() {
                self.advance_to_next_president();
            }
        }

        Ok(ElectionResult {
            president,
            chancellor,
            passed,
            ja,
            nein,
            election_tracker: self.state.election_tracker,
            chaos,
            hitler_elected,
            game_over: self.state.game_over(),
        })
    }

    /// Enacts the top policy and lifts all term limits.
    pub(crate) fn trigger_chaos(&mut self) -> Result<ChaosResult, GameError> {
        let policy = self.enact_chaos_policy()?;
        self.state.term_limited_players.clear();
        Ok(ChaosResult { policy, game_over: self.state.game_over() })
    }
}
