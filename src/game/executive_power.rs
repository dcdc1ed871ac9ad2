use super::actor::{Actor, Context};
use super::party::Party;
use super::player::PlayerId;
use super::policy::Policy;
use super::role::Role;
use super::state::Phase;
use super::Game;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A power granted by an enacted policy.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ExecutivePower {
    /// The president learns a player's party membership.
    InvestigateLoyalty,
    /// The president picks the next president.
    SpecialElection,
    /// The president looks at the top three cards of the deck.
    PolicyPeek,
    /// The president executes a player.
    Execution,
    /// The president reveals their party membership to everyone.
    Confession,
    /// The communists learn the party membership of one player.
    Bugging,
    /// Two communist and one liberal policy are shuffled into the deck.
    FiveYearPlan,
    /// The communists learn who their allies are.
    Congress,
    /// A player is converted to the communist team, unless they are Hitler.
    Radicalization,
    Propaganda,
    Impeachment,
    MarkedForExecution,
    PolicyPeekEmergency,
    ExecutionEmergency,
    Pardon,
    ChancellorPropaganda,
    ChancellorPolicyPeek,
    ChancellorImpeachment,
    ChancellorMarkedForExecution,
    ChancellorExecution,
    /// The chancellor may enact the policy the president discarded.
    VoteOfNoConfidence,
}

/// Powers an Article 48 policy may grant the president.
pub const ARTICLE48_POWERS: [ExecutivePower; 6] = [
    ExecutivePower::Propaganda,
    ExecutivePower::Impeachment,
    ExecutivePower::MarkedForExecution,
    ExecutivePower::PolicyPeekEmergency,
    ExecutivePower::ExecutionEmergency,
    ExecutivePower::Pardon,
];

/// Powers an Enabling Act policy may grant the chancellor.
pub const ENABLING_ACT_POWERS: [ExecutivePower; 6] = [
    ExecutivePower::ChancellorPropaganda,
    ExecutivePower::ChancellorPolicyPeek,
    ExecutivePower::ChancellorImpeachment,
    ExecutivePower::ChancellorMarkedForExecution,
    ExecutivePower::ChancellorExecution,
    ExecutivePower::VoteOfNoConfidence,
];

/// Who wields a power.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum PowerOwner {
    President,
    Chancellor,
}

impl ExecutivePower {
    pub fn owner(&self) -> PowerOwner {
        if ENABLING_ACT_POWERS.contains(self) {
            PowerOwner::Chancellor
        } else {
            PowerOwner::President
        }
    }
}

impl fmt::Display for ExecutivePower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ExecutivePower::*;
        f.write_str(match self {
            InvestigateLoyalty => "investigate_loyalty",
            SpecialElection => "special_election",
            PolicyPeek => "policy_peek",
            Execution => "execution",
            Confession => "confession",
            Bugging => "bugging",
            FiveYearPlan => "five_year_plan",
            Congress => "congress",
            Radicalization => "radicalization",
            Propaganda => "propaganda",
            Impeachment => "impeachment",
            MarkedForExecution => "marked_for_execution",
            PolicyPeekEmergency => "policy_peek_emergency",
            ExecutionEmergency => "execution_emergency",
            Pardon => "pardon",
            ChancellorPropaganda => "chancellor_propaganda",
            ChancellorPolicyPeek => "chancellor_policy_peek",
            ChancellorImpeachment => "chancellor_impeachment",
            ChancellorMarkedForExecution => "chancellor_marked_for_execution",
            ChancellorExecution => "chancellor_execution",
            VoteOfNoConfidence => "vote_of_no_confidence",
        })
    }
}

/// What happened when a power was used.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PowerOutcome {
    Investigated { target: PlayerId, party: Party },
    SpecialElection { president: PlayerId },
    Peeked { policies: Vec<Policy> },
    Executed { target: PlayerId, was_hitler: bool },
    Confessed { player: PlayerId, party: Party },
    Bugged { target: PlayerId, party: Party },
    FiveYearPlan,
    Congress { communists: Vec<PlayerId> },
    Radicalized { target: PlayerId, converted: bool },
    Propaganda { policy: Policy, discarded: bool },
    Impeached { target: PlayerId, revealer: PlayerId },
    Marked { target: PlayerId, tracker: usize },
    Pardoned { target: PlayerId },
    NoConfidence { policy: Policy },
}

impl Game {
    /// Uses a power, handing it to whichever member of the government owns it.
    pub fn execute_power(&mut self, power: ExecutivePower) -> Result<Option<PowerOutcome>, GameError> {
        match power.owner() {
            PowerOwner::President => self.execute_presidential_power(power, None),
            PowerOwner::Chancellor => self.execute_chancellor_power(power, None),
        }
    }

    /// Uses a president-owned power.
    ///
    /// `target` overrides the president's own choice of player; it must be one they could have chosen.
    /// Returns `None` when the power had no effect, e.g. because nobody could be targeted.
    pub fn execute_presidential_power(
        &mut self,
        power: ExecutivePower,
        target: Option<PlayerId>,
    ) -> Result<Option<PowerOutcome>, GameError> {
        use ExecutivePower::*;

        if power.owner() != PowerOwner::President {
            return Err(GameError::InvalidAction);
        }
        let president = self.begin_power()?.0;
        let others = self.state.eligible_players().exclude(president).make();

        let outcome = match power {
            InvestigateLoyalty => {
                let chosen = self.pick_target(president, target, &others, |a, ctx, pool| a.inspect_player(ctx, pool))?;
                chosen.map(|t| self.investigate(president, t)).transpose()?
            }
            SpecialElection => {
                let chosen = self.pick_target(president, target, &others, |a, ctx, pool| a.choose_next(ctx, pool))?;
                chosen.map(|t| self.call_special_election(president, t))
            }
            PolicyPeek | PolicyPeekEmergency => Some(self.peek(president)?),
            Execution | ExecutionEmergency => {
                let chosen = self.pick_target(president, target, &others, |a, ctx, pool| a.kill(ctx, pool))?;
                chosen.map(|t| self.execute(t)).transpose()?
            }
            Confession => {
                let party = self.state.player(president)?.party();
                self.state.revealed_affiliations.insert(president, party);
                Some(PowerOutcome::Confessed { player: president, party })
            }
            Bugging => {
                let chosen =
                    self.pick_target(president, target, &others, |a, ctx, pool| a.choose_player_to_bug(ctx, pool))?;
                chosen.map(|t| self.bug(t)).transpose()?
            }
            FiveYearPlan => {
                self.board.deck.five_year_plan(&mut self.rng);
                Some(PowerOutcome::FiveYearPlan)
            }
            Congress => Some(self.hold_congress()),
            Radicalization => {
                let chosen = self.pick_target(president, target, &others, |a, ctx, pool| {
                    a.choose_player_to_radicalize(ctx, pool)
                })?;
                chosen.map(|t| self.radicalize(t)).transpose()?
            }
            Propaganda => self.propaganda(president)?,
            Impeachment => self.impeach(president, target)?,
            MarkedForExecution => {
                let chosen =
                    self.pick_target(president, target, &others, |a, ctx, pool| a.choose_player_to_mark(ctx, pool))?;
                chosen.map(|t| self.mark_for_execution(t))
            }
            Pardon => self.pardon(president)?,
            _ => return Err(GameError::InvalidAction),
        };

        self.observer.log_power_used(president, power, outcome.as_ref());
        Ok(outcome)
    }

    /// Uses a chancellor-owned power. See [Game::execute_presidential_power].
    pub fn execute_chancellor_power(
        &mut self,
        power: ExecutivePower,
        target: Option<PlayerId>,
    ) -> Result<Option<PowerOutcome>, GameError> {
        use ExecutivePower::*;

        if power.owner() != PowerOwner::Chancellor {
            return Err(GameError::InvalidAction);
        }
        let (president, Some(chancellor)) = self.begin_power()? else {
            return Err(GameError::InvalidAction);
        };
        let others = self.state.eligible_players().exclude(chancellor).make();

        let outcome = match power {
            ChancellorPropaganda => self.propaganda(chancellor)?,
            ChancellorPolicyPeek => Some(self.peek(chancellor)?),
            ChancellorImpeachment => self.impeach(president, target)?,
            ChancellorMarkedForExecution => {
                let chosen =
                    self.pick_target(chancellor, target, &others, |a, ctx, pool| a.choose_player_to_mark(ctx, pool))?;
                chosen.map(|t| self.mark_for_execution(t))
            }
            ChancellorExecution => {
                let chosen = self.pick_target(chancellor, target, &others, |a, ctx, pool| a.kill(ctx, pool))?;
                chosen.map(|t| self.execute(t)).transpose()?
            }
            VoteOfNoConfidence => self.vote_of_no_confidence(chancellor)?,
            _ => return Err(GameError::InvalidAction),
        };

        self.observer.log_power_used(chancellor, power, outcome.as_ref());
        Ok(outcome)
    }

    /// Checks there is a sitting government and moves into the executive phase.
    fn begin_power(&mut self) -> Result<(PlayerId, Option<PlayerId>), GameError> {
        if self.state.game_over() {
            return Err(GameError::GameOver);
        }
        let Some(president) = self.state.president else {
            return Err(GameError::InvalidAction);
        };
        self.state.phase = Phase::ExecutivePower;
        Ok((president, self.state.chancellor))
    }

    /// Settles the target of a power: the forced choice if there is one, otherwise the executor's.
    fn pick_target(
        &mut self,
        executor: PlayerId,
        forced: Option<PlayerId>,
        pool: &[PlayerId],
        choose: impl FnOnce(&mut (dyn Actor + 'static), &mut Context<'_>, &[PlayerId]) -> PlayerId,
    ) -> Result<Option<PlayerId>, GameError> {
        if pool.is_empty() {
            return Ok(None);
        }
        let target = match forced {
            Some(target) => target,
            None => self.decide(executor, |actor, ctx| choose(actor, ctx, pool))?,
        };
        if !pool.contains(&target) {
            return Err(GameError::InvalidPlayerChoice);
        }
        Ok(Some(target))
    }

    fn investigate(&mut self, president: PlayerId, target: PlayerId) -> Result<PowerOutcome, GameError> {
        let party = self.state.player(target)?.party();
        self.state.investigated_players.push(target);
        self.state.player_mut(president)?.knowledge.inspected_players.insert(target, party);
        Ok(PowerOutcome::Investigated { target, party })
    }

    fn call_special_election(&mut self, president: PlayerId, target: PlayerId) -> PowerOutcome {
        self.state.special_election = true;
        self.state.special_election_return_index = self.state.active_players.iter().position(|p| *p == president);
        self.state.special_president = Some(target);
        PowerOutcome::SpecialElection { president: target }
    }

    fn peek(&mut self, viewer: PlayerId) -> Result<PowerOutcome, GameError> {
        let policies = self.board.deck.peek(3).to_vec();
        self.decide(viewer, |actor, ctx| actor.view_policies(ctx, &policies))?;
        self.state.player_mut(viewer)?.knowledge.peeked_policies = policies.clone();
        Ok(PowerOutcome::Peeked { policies })
    }

    fn execute(&mut self, target: PlayerId) -> Result<PowerOutcome, GameError> {
        let was_hitler = self.kill_player(target)?;
        Ok(PowerOutcome::Executed { target, was_hitler })
    }

    fn bug(&mut self, target: PlayerId) -> Result<PowerOutcome, GameError> {
        let party = self.state.player(target)?.party();
        for player in self.state.players.iter_mut().filter(|p| p.is_communist()) {
            player.knowledge.known_affiliations.insert(target, party);
        }
        Ok(PowerOutcome::Bugged { target, party })
    }

    fn hold_congress(&mut self) -> PowerOutcome {
        let communists = self.state.ids_where(|p| p.is_communist());
        for player in self.state.players.iter_mut().filter(|p| p.is_communist()) {
            let id = player.id;
            player.knowledge.known_communists = communists.iter().copied().filter(|c| *c != id).collect();
        }
        PowerOutcome::Congress { communists }
    }

    fn radicalize(&mut self, target: PlayerId) -> Result<PowerOutcome, GameError> {
        let player = self.state.player_mut(target)?;
        let converted = matches!(player.role, Role::Liberal | Role::Fascist);
        if converted {
            player.role = Role::Communist;
            if let Some(actor) = self.actors.get_mut(target) {
                actor.on_radicalized();
            }
        }
        Ok(PowerOutcome::Radicalized { target, converted })
    }

    fn propaganda(&mut self, executor: PlayerId) -> Result<Option<PowerOutcome>, GameError> {
        let Some(policy) = self.board.deck.peek(1).first().copied() else {
            return Ok(None);
        };
        let discard = self.decide(executor, |actor, ctx| actor.propaganda_decision(ctx, policy))?;
        if discard {
            self.board.deck.discard_top();
        }
        Ok(Some(PowerOutcome::Propaganda { policy, discarded: discard }))
    }

    /// The president picks someone other than the government to learn the chancellor's party.
    fn impeach(&mut self, president: PlayerId, forced: Option<PlayerId>) -> Result<Option<PowerOutcome>, GameError> {
        let Some(chancellor) = self.state.chancellor else {
            return Ok(None);
        };
        let pool = self.state.eligible_players().exclude(president).exclude(chancellor).make();
        let Some(revealer) = self.pick_target(president, forced, &pool, |a, ctx, pool| a.choose_revealer(ctx, pool))?
        else {
            return Ok(None);
        };
        let party = self.state.player(chancellor)?.party();
        self.state.player_mut(revealer)?.knowledge.known_affiliations.insert(chancellor, party);
        Ok(Some(PowerOutcome::Impeached { target: chancellor, revealer }))
    }

    fn mark_for_execution(&mut self, target: PlayerId) -> PowerOutcome {
        let tracker = self.board.fascist_track;
        self.state.marked_for_execution = Some(target);
        self.state.marked_for_execution_tracker = Some(tracker);
        PowerOutcome::Marked { target, tracker }
    }

    fn pardon(&mut self, president: PlayerId) -> Result<Option<PowerOutcome>, GameError> {
        let Some(marked) = self.state.marked_for_execution else {
            return Ok(None);
        };
        if !self.decide(president, |actor, ctx| actor.pardon_player(ctx))? {
            return Ok(None);
        }
        self.state.marked_for_execution = None;
        self.state.marked_for_execution_tracker = None;
        Ok(Some(PowerOutcome::Pardoned { target: marked }))
    }

    /// The chancellor may enact the card the president discarded. Any power it grants is forfeit.
    fn vote_of_no_confidence(&mut self, chancellor: PlayerId) -> Result<Option<PowerOutcome>, GameError> {
        let Some(policy) = self.state.last_discarded else {
            return Ok(None);
        };
        if !self.decide(chancellor, |actor, ctx| actor.vote_of_no_confidence(ctx))? {
            return Ok(None);
        }
        if !self.board.deck.take_discard(policy) {
            return Ok(None);
        }
        self.state.last_discarded = None;
        self.enact_policy(policy, self.session_enact_options())?;
        self.check_policy_win();
        Ok(Some(PowerOutcome::NoConfidence { policy }))
    }
}
