//! The legislative session: the president discards one of three cards,
//! the chancellor enacts one of the remaining two or proposes a veto.

use super::election::{ChaosResult, CHAOS_THRESHOLD};
use super::executive_power::{ExecutivePower, PowerOutcome};
use super::government::Government;
use super::policy::Policy;
use super::state::Phase;
use super::Game;
use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// The number of cards the president draws.
pub const HAND_SIZE: usize = 3;

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct VetoResult {
    pub accepted: bool,
    pub election_tracker: usize,
    pub chaos: Option<ChaosResult>,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct EnactmentResult {
    pub policy: Policy,
    pub power: Option<ExecutivePower>,
    pub game_over: bool,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct PowerResult {
    pub power: ExecutivePower,
    pub outcome: Option<PowerOutcome>,
}

/// Everything that happened during one legislative session.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct LegislativeSession {
    pub presidential_policies: Vec<Policy>,
    pub discarded: Policy,
    pub chancellor_policies: Vec<Policy>,
    pub veto: Option<VetoResult>,
    pub enacted: Option<EnactmentResult>,
    pub power: Option<PowerResult>,
}

impl Game {
    /// Draws the president's hand.
    pub fn draw_presidential_policies(&mut self) -> Result<Vec<Policy>, GameError> {
        self.check_legislative()?;
        if self.state.presidential_policies.is_some() || self.state.chancellor_policies.is_some() {
            return Err(GameError::InvalidAction);
        }
        let policies = self.board.draw_policy(HAND_SIZE, &mut self.rng);
        if policies.len() < HAND_SIZE {
            self.board.discard(policies);
            return Err(GameError::InvalidCard);
        }
        self.state.presidential_policies = Some(policies.clone());
        Ok(policies)
    }

    /// Discards the chosen card from the president's hand and passes the rest to the chancellor.
    pub fn handle_presidential_choice(&mut self, discard: usize) -> Result<Vec<Policy>, GameError> {
        self.check_legislative()?;
        let Some(mut hand) = self.state.presidential_policies.take() else {
            return Err(GameError::InvalidAction);
        };
        if discard >= hand.len() {
            self.state.presidential_policies = Some(hand);
            return Err(GameError::InvalidCard);
        }
        let discarded = hand.remove(discard);
        self.board.discard([discarded]);
        self.state.last_discarded = Some(discarded);
        self.state.chancellor_policies = Some(hand.clone());
        Ok(hand)
    }

    /// Asks the chancellor whether they want to veto their hand.
    pub fn check_veto_proposal(&mut self) -> Result<bool, GameError> {
        self.check_legislative()?;
        let Some(hand) = self.state.chancellor_policies.clone() else {
            return Err(GameError::InvalidAction);
        };
        self.chancellor_propose_veto(&hand)
    }

    /// Applies the president's answer to a veto proposal.
    ///
    /// An accepted veto throws away the chancellor's hand and ends the session;
    /// a rejected one leaves the chancellor to enact a card as usual.
    pub fn handle_veto_decision(&mut self, accepted: bool) -> Result<VetoResult, GameError> {
        self.check_legislative()?;
        if !self.board.veto_available {
            return Err(GameError::InvalidAction);
        }
        if self.state.chancellor_policies.is_none() {
            return Err(GameError::InvalidAction);
        }
        if !accepted {
            return Ok(VetoResult {
                accepted,
                election_tracker: self.state.election_tracker,
                chaos: None,
            });
        }

        if let Some(hand) = self.state.chancellor_policies.take() {
            self.board.discard(hand);
        }
        self.state.election_tracker += 1;
        let chaos = if self.state.election_tracker >= CHAOS_THRESHOLD {
            Some(self.trigger_chaos()?)
        } else {
            None
        };
        if !self.state.game_over() {
            // Chaos has already lifted the term limits
            self.close_session(chaos.is_none())?;
        }
        Ok(VetoResult {
            accepted,
            election_tracker: self.state.election_tracker,
            chaos,
        })
    }

    /// Enacts the chosen card from the chancellor's hand and discards the other.
    pub fn handle_chancellor_choice(&mut self, enact: usize) -> Result<EnactmentResult, GameError> {
        self.check_legislative()?;
        let Some(mut hand) = self.state.chancellor_policies.take() else {
            return Err(GameError::InvalidAction);
        };
        if enact >= hand.len() {
            self.state.chancellor_policies = Some(hand);
            return Err(GameError::InvalidCard);
        }
        let policy = hand.remove(enact);
        if let Some(discarded) = hand.first() {
            self.state.last_discarded = Some(*discarded);
        }
        self.board.discard(hand);

        let power = self.enact_policy(policy, self.session_enact_options())?;
        let game_over = self.check_policy_win();
        Ok(EnactmentResult { policy, power, game_over })
    }

    /// Uses the power granted by the policy that was just enacted.
    pub fn execute_granted_power(&mut self, power: ExecutivePower) -> Result<PowerResult, GameError> {
        self.check_not_over()?;
        let outcome = self.execute_power(power)?;
        Ok(PowerResult { power, outcome })
    }

    /// Wraps up the government's term and hands the candidacy on.
    pub fn end_legislative_session(&mut self) -> Result<(), GameError> {
        self.close_session(true)
    }

    fn close_session(&mut self, term_limits: bool) -> Result<(), GameError> {
        self.check_not_over()?;
        self.state.presidential_policies = None;
        self.state.chancellor_policies = None;

        if term_limits {
            self.state.set_term_limits();
        }
        if let (Some(president), Some(chancellor)) = (self.state.president, self.state.chancellor) {
            self.state.previous_government = Some(Government { president, chancellor });
        }
        self.state.chancellor_candidate = None;
        self.advance_turn();
        self.state.chancellor = None;
        self.state.phase = Phase::Election;
        Ok(())
    }

    /// Runs a legislative session from start to finish, asking the players for every decision.
    pub fn run_full_legislative_cycle(&mut self) -> Result<LegislativeSession, GameError> {
        let presidential_policies = self.draw_presidential_policies()?;
        let discard = self.presidential_policy_choice(&presidential_policies)?;
        let chancellor_policies = self.handle_presidential_choice(discard)?;
        let mut session = LegislativeSession {
            discarded: presidential_policies[discard],
            presidential_policies,
            chancellor_policies: chancellor_policies.clone(),
            veto: None,
            enacted: None,
            power: None,
        };

        if self.check_veto_proposal()? {
            let accepted = self.president_veto_accepted(&chancellor_policies)?;
            let veto = self.handle_veto_decision(accepted)?;
            session.veto = Some(veto);
            if accepted {
                return Ok(session);
            }
        }

        let enact = self.chancellor_policy_choice(&chancellor_policies)?;
        let enacted = self.handle_chancellor_choice(enact)?;
        if let (Some(power), false) = (enacted.power, enacted.game_over) {
            session.power = Some(self.execute_granted_power(power)?);
        }
        session.enacted = Some(enacted);

        if !self.state.game_over() {
            self.end_legislative_session()?;
        }
        Ok(session)
    }

    fn check_legislative(&self) -> Result<(), GameError> {
        self.check_not_over()?;
        if self.state.phase != Phase::Legislative || self.state.president.is_none() || self.state.chancellor.is_none()
        {
            return Err(GameError::InvalidAction);
        }
        Ok(())
    }
}
