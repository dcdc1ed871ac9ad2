use self::actor::{Actor, AiPlayer, Context};
use self::board::{track_victory, Board, EnactOptions};
use self::deck::Deck;
use self::executive_power::ExecutivePower;
use self::government::{Government, GovernmentRecord, PlayerRef};
use self::human::HumanPlayer;
use self::observer::{GameObserver, LogObserver};
pub use self::options::{GameOptions, StrategyMode};
use self::player::{Player, PlayerId};
use self::policy::{create_policy_deck, Policy};
use self::role::{check_player_count, create_roles, Role};
use self::state::{GameState, Phase, OKTOBERFEST_MONTH};
use self::strategy::StrategyKind;
use crate::error::GameError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub mod actor;
pub mod board;
pub mod deck;
pub mod election;
pub mod eligible;
pub mod executive_power;
pub mod government;
pub mod human;
mod json;
pub mod legislative;
pub mod observer;
pub mod options;
pub mod party;
pub mod player;
pub mod policy;
pub mod role;
pub mod state;
pub mod strategy;
mod test;

/// How a game was won.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// The liberals completed their policy track.
    LiberalPolicyTrack,
    /// The fascists completed their policy track.
    FascistPolicyTrack,
    /// The communists completed their policy track.
    CommunistPolicyTrack,
    /// Hitler was elected chancellor after the third fascist policy.
    HitlerChancellor,
    /// Hitler was executed.
    HitlerExecuted,
}

/// The team or teams that won.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Liberal,
    Fascist,
    Communist,
    LiberalAndCommunist,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Winner::Liberal => "liberal",
            Winner::Fascist => "fascist",
            Winner::Communist => "communist",
            Winner::LiberalAndCommunist => "liberal_and_communist",
        })
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub struct Outcome {
    pub condition: WinCondition,
    pub winner: Winner,
}

/// A game of Secret Hitler XL.
pub struct Game {
    opts: GameOptions,
    state: GameState,
    board: Board,
    /// Indexed by player id.
    actors: Vec<Box<dyn Actor>>,
    observer: Box<dyn GameObserver>,
    rng: ChaCha8Rng,
}

impl Game {
    /// Creates a new game; every seat not listed in `opts.human_players` is a bot.
    pub fn new(opts: GameOptions, player_names: &[String], seed: u64) -> Result<Self, GameError> {
        let num_players = player_names.len();
        check_player_count(num_players)?;
        let opts = opts.validate(num_players)?;

        // Generate the players and their roles
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let roles = create_roles(num_players, opts.communists, &mut rng)?;
        let mut players = player_names
            .iter()
            .zip(roles)
            .enumerate()
            .map(|(id, (name, role))| Player::new(id, name.clone(), role))
            .collect::<Vec<_>>();
        inform_players(&mut players);

        let actors = players
            .iter()
            .map(|player| -> Box<dyn Actor> {
                if opts.human_players.contains(&player.id) {
                    Box::new(HumanPlayer::console())
                } else {
                    Box::new(AiPlayer::new(StrategyKind::for_role(opts.ai_strategy, player.role)))
                }
            })
            .collect();

        // Create the board; shuffle the deck
        let mut board = Board::new(num_players, opts.communists);
        board.deck = Deck::new(create_policy_deck(
            num_players,
            opts.communists,
            opts.anti_policies,
            opts.emergency_powers,
            &mut rng,
        ));

        let month = rng.gen_range(1..=12);
        let mut state = GameState::new(players, month);
        if month == OKTOBERFEST_MONTH {
            state.start_oktoberfest();
        }
        state.president_candidate = Some(rng.gen_range(0..num_players));
        state.phase = Phase::Election;

        let mut game = Game {
            opts,
            state,
            board,
            actors,
            observer: Box::new(LogObserver::default()),
            rng,
        };
        game.observer.log_setup(&game.state);
        Ok(game)
    }

    /// Creates a game with generated player names.
    pub fn setup(num_players: usize, opts: GameOptions, seed: u64) -> Result<Self, GameError> {
        let names = (1..=num_players).map(|i| format!("Player {}", i)).collect::<Vec<_>>();
        Self::new(opts, &names, seed)
    }

    /// Replaces the observer notified about game events.
    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = observer;
    }

    /// Replaces whoever makes the decisions for a seat.
    pub fn set_actor(&mut self, player: PlayerId, actor: Box<dyn Actor>) -> Result<(), GameError> {
        let slot = self.actors.get_mut(player).ok_or(GameError::InvalidPlayerIndex)?;
        *slot = actor;
        Ok(())
    }

    pub fn options(&self) -> &GameOptions {
        &self.opts
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn num_players(&self) -> usize {
        self.state.players.len()
    }

    /// Gets the player names.
    pub fn player_names(&self) -> impl Iterator<Item = &'_ str> {
        self.state.players.iter().map(|p| &p.name[..])
    }

    /// Finds a player with the given name.
    pub fn find_player(&self, name: &str) -> Result<PlayerId, GameError> {
        self.state
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or(GameError::PlayerNotFound)
    }

    /// Whether a seat is played by the computer.
    pub fn is_bot(&self, player: PlayerId) -> bool {
        self.actors.get(player).map(|a| a.is_bot()).unwrap_or(false)
    }

    /// The strategy a bot plays outside of Oktoberfest.
    pub fn strategy_of(&self, player: PlayerId) -> Option<StrategyKind> {
        self.actors.get(player).and_then(|a| a.strategy_kind())
    }

    pub fn game_over(&self) -> bool {
        self.state.game_over()
    }

    pub fn winner(&self) -> Option<Winner> {
        self.state.winner()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome
    }

    /// Plays the game to the end and returns the winner.
    pub fn start_game(&mut self) -> Result<Winner, GameError> {
        if self.state.phase == Phase::Setup {
            self.state.phase = Phase::Election;
        }
        while !self.state.game_over() {
            let election = self.run_full_election_cycle()?;
            if election.passed && !self.state.game_over() {
                self.run_full_legislative_cycle()?;
            }
        }
        let outcome = self.state.outcome.ok_or(GameError::InvalidAction)?;
        self.observer.log_game_end(&self.state, outcome);
        Ok(outcome.winner)
    }

    /// Asks the presidential candidate to nominate a chancellor.
    /// Returns `None` if nobody is eligible.
    pub fn nominate_chancellor(&mut self) -> Result<Option<PlayerId>, GameError> {
        self.check_not_over()?;
        let Some(president) = self.state.president_candidate else {
            return Err(GameError::InvalidAction);
        };
        let eligible = self.state.get_eligible_chancellors();
        if eligible.is_empty() {
            return Ok(None);
        }
        let chancellor = self.decide(president, |actor, ctx| actor.nominate_chancellor(ctx, &eligible))?;
        if !eligible.contains(&chancellor) {
            return Err(GameError::InvalidPlayerChoice);
        }
        self.state.chancellor_candidate = Some(chancellor);
        Ok(Some(chancellor))
    }

    /// Polls every living player on the nominated government and counts the votes.
    pub fn vote_on_government(&mut self) -> Result<bool, GameError> {
        self.check_not_over()?;
        let (Some(president), Some(chancellor)) = (self.state.president_candidate, self.state.chancellor_candidate)
        else {
            return Err(GameError::InvalidAction);
        };
        self.state.phase = Phase::Voting;

        let mut votes = BTreeMap::new();
        for voter in self.state.active_players.clone() {
            let vote = self.decide(voter, |actor, ctx| actor.vote(ctx, president, chancellor))?;
            votes.insert(voter, vote);
        }
        self.tally_votes(&votes)
    }

    /// Counts a set of votes; a strict majority of the living players voting ja passes.
    /// On a failure the election tracker moves on, but chaos is left to the caller.
    pub fn tally_votes(&mut self, votes: &BTreeMap<PlayerId, bool>) -> Result<bool, GameError> {
        let (Some(president), Some(chancellor)) = (self.state.president_candidate, self.state.chancellor_candidate)
        else {
            return Err(GameError::InvalidAction);
        };
        if votes.keys().any(|voter| !self.state.is_active(*voter)) {
            return Err(GameError::InvalidPlayerIndex);
        }

        // Every living player is counted; a missing vote is a nein
        self.state.last_votes = self
            .state
            .active_players
            .iter()
            .map(|voter| (*voter, votes.get(voter).copied().unwrap_or(false)))
            .collect();
        let ja = self.state.last_votes.iter().filter(|(_, vote)| *vote).count();
        let passed = ja > self.state.last_votes.len() - ja;

        if passed {
            if let (Some(president), Some(chancellor)) = (self.state.president, self.state.chancellor) {
                self.state.previous_government = Some(Government { president, chancellor });
            }
            let record = GovernmentRecord {
                president: PlayerRef::from(self.state.player(president)?),
                chancellor: PlayerRef::from(self.state.player(chancellor)?),
                round: self.state.round_number,
                votes: self.state.last_votes.clone(),
            };
            self.state.government_history.push(record);
        } else {
            self.state.election_tracker += 1;
        }

        self.observer.log_election(&self.state, passed);
        Ok(passed)
    }

    /// Enacts the top policy of the deck without granting any power.
    pub fn enact_chaos_policy(&mut self) -> Result<Policy, GameError> {
        self.check_not_over()?;
        let Some(policy) = self.board.deck.draw_one(&mut self.rng) else {
            return Err(GameError::InvalidCard);
        };
        let opts = EnactOptions { chaos: true, ..Default::default() };
        self.enact_policy(policy, opts)?;
        self.state.election_tracker = 0;
        self.state.enacted_policies += 1;
        self.observer.log_chaos(policy);
        self.check_policy_win();
        Ok(policy)
    }

    /// Ends the game if any track is complete. Returns whether the game is over.
    pub fn check_policy_win(&mut self) -> bool {
        if let Some(party) = self.board.check_tracks() {
            let (condition, winner) = track_victory(party);
            self.state.end_game(condition, winner);
        }
        self.state.game_over()
    }

    /// Asks the president which card to discard from their hand. Returns its index.
    pub fn presidential_policy_choice(&mut self, policies: &[Policy]) -> Result<usize, GameError> {
        let president = self.state.president.ok_or(GameError::InvalidAction)?;
        let idx = self.decide(president, |actor, ctx| actor.filter_policies(ctx, policies))?;
        let discarded = *policies.get(idx).ok_or(GameError::InvalidCard)?;
        self.state.last_discarded = Some(discarded);
        self.observer.log_policy_selection(president, policies, discarded);
        Ok(idx)
    }

    /// Asks the chancellor which card to enact from their hand. Returns its index.
    pub fn chancellor_policy_choice(&mut self, policies: &[Policy]) -> Result<usize, GameError> {
        let chancellor = self.state.chancellor.ok_or(GameError::InvalidAction)?;
        let idx = self.decide(chancellor, |actor, ctx| actor.choose_policy(ctx, policies))?;
        if idx >= policies.len() {
            return Err(GameError::InvalidCard);
        }
        if let Some(discarded) = policies.iter().enumerate().find(|(i, _)| *i != idx).map(|(_, p)| *p) {
            self.state.last_discarded = Some(discarded);
            self.observer.log_policy_selection(chancellor, policies, discarded);
        }
        Ok(idx)
    }

    /// Whether the chancellor wants to veto their hand. Always `false` before veto power is unlocked.
    pub fn chancellor_propose_veto(&mut self, policies: &[Policy]) -> Result<bool, GameError> {
        if !self.board.veto_available {
            return Ok(false);
        }
        let chancellor = self.state.chancellor.ok_or(GameError::InvalidAction)?;
        self.decide(chancellor, |actor, ctx| actor.chancellor_veto_proposal(ctx, policies))
    }

    /// Whether the president agrees to the chancellor's veto.
    pub fn president_veto_accepted(&mut self, policies: &[Policy]) -> Result<bool, GameError> {
        let president = self.state.president.ok_or(GameError::InvalidAction)?;
        self.decide(president, |actor, ctx| actor.accept_veto(ctx, policies))
    }

    /// Moves to the next round, handing the candidacy on and ticking the calendar.
    pub fn advance_turn(&mut self) {
        self.state.round_number += 1;
        let oktoberfest = if self.state.president.is_none() && self.state.president_candidate.is_some() {
            // The president died in office; their successor is already lined up
            self.state.advance_month_counter()
        } else {
            self.state.set_next_president()
        };
        self.observer.log_month_change(&self.state, oktoberfest);
    }

    /// Places a policy on the board, asking the chancellor which track to strip
    /// if it is a social democratic policy.
    pub(crate) fn enact_policy(
        &mut self,
        policy: Policy,
        opts: EnactOptions,
    ) -> Result<Option<ExecutivePower>, GameError> {
        let removal = match self.state.chancellor {
            Some(chancellor) if policy == Policy::SocialDemocratic && opts.anti_policies && !opts.chaos => {
                Some(self.decide(chancellor, |actor, ctx| actor.social_democratic_removal_choice(ctx))?)
            }
            _ => None,
        };
        let power = self.board.enact_policy(policy, &mut self.state, opts, removal, &mut self.rng);
        self.observer.log_policy_enacted(&self.state, policy, power);
        Ok(power)
    }

    /// The enactment options for policies passed by a government.
    pub(crate) fn session_enact_options(&self) -> EnactOptions {
        EnactOptions {
            chaos: false,
            emergency: self.opts.emergency_powers,
            anti_policies: self.opts.anti_policies,
        }
    }

    /// Kills a player. Returns whether they were Hitler, which ends the game.
    pub(crate) fn kill_player(&mut self, target: PlayerId) -> Result<bool, GameError> {
        if !self.state.is_active(target) {
            return Err(GameError::InvalidPlayerChoice);
        }
        let was_hitler = self.state.player(target)?.is_hitler();
        self.state.handle_player_death(target);
        if self.state.marked_for_execution == Some(target) {
            self.state.marked_for_execution = None;
            self.state.marked_for_execution_tracker = None;
        }
        self.observer.log_player_death(&self.state, target);

        if was_hitler {
            let winner = if self.opts.communists {
                Winner::LiberalAndCommunist
            } else {
                Winner::Liberal
            };
            self.state.end_game(WinCondition::HitlerExecuted, winner);
        }
        Ok(was_hitler)
    }

    /// Hands a decision to the player's actor along with what they can see.
    pub(crate) fn decide<T>(
        &mut self,
        player: PlayerId,
        f: impl FnOnce(&mut (dyn Actor + 'static), &mut Context<'_>) -> T,
    ) -> Result<T, GameError> {
        let Game { state, board, actors, rng, .. } = self;
        let me = state.players.get(player).ok_or(GameError::InvalidPlayerIndex)?;
        let actor = actors.get_mut(player).ok_or(GameError::InvalidPlayerIndex)?;
        let mut ctx = Context {
            me,
            state: &*state,
            board: &*board,
            rng,
        };
        Ok(f(actor.as_mut(), &mut ctx))
    }

    fn check_not_over(&self) -> Result<(), GameError> {
        if self.state.game_over() {
            return Err(GameError::GameOver);
        }
        Ok(())
    }
}

/// Tells each player what their role lets them know at the start of the game.
fn inform_players(players: &mut [Player]) {
    let num_players = players.len();
    let hitler = players.iter().find(|p| p.role == Role::Hitler).map(|p| p.id);
    let fascists = players.iter().filter(|p| p.role == Role::Fascist).map(|p| p.id).collect::<Vec<_>>();
    let communists = players.iter().filter(|p| p.role == Role::Communist).map(|p| p.id).collect::<Vec<_>>();

    for player in players.iter_mut() {
        let id = player.id;
        let others = |ids: &[PlayerId]| ids.iter().copied().filter(|other| *other != id).collect::<Vec<_>>();
        match player.role {
            Role::Fascist => {
                player.knowledge.hitler = hitler;
                player.knowledge.fascists = others(&fascists);
            }
            Role::Hitler if num_players < 8 => {
                player.knowledge.fascists = others(&fascists);
            }
            Role::Communist if num_players < 11 => {
                player.knowledge.known_communists = others(&communists);
            }
            _ => {}
        }
    }
}
