use super::board::{Board, TrackRemoval};
use super::party::Party;
use super::player::{Player, PlayerId};
use super::policy::Policy;
use super::state::GameState;
use super::strategy::{Strategy, StrategyKind};
use rand_chacha::ChaCha8Rng;

/// Everything a player may consult when making a decision.
///
/// The state and board are read-only: decisions are returned to the game,
/// which applies their effects.
pub struct Context<'a> {
    pub me: &'a Player,
    pub state: &'a GameState,
    pub board: &'a Board,
    pub rng: &'a mut ChaCha8Rng,
}

impl<'a> Context<'a> {
    pub fn player(&self, id: PlayerId) -> Option<&'a Player> {
        self.state.players.get(id)
    }

    /// Whether this player knows `other` to be on the fascist team (themselves included).
    pub fn knows_fascist(&self, other: PlayerId) -> bool {
        (other == self.me.id && self.me.is_fascist()) || self.me.knowledge.knows_fascist(other)
    }

    /// Whether this player knows `other` to be Hitler.
    pub fn knows_hitler(&self, other: PlayerId) -> bool {
        (other == self.me.id && self.me.is_hitler()) || self.me.knowledge.hitler == Some(other)
    }

    /// Whether this player knows `other` to be a communist (themselves included).
    pub fn knows_communist(&self, other: PlayerId) -> bool {
        (other == self.me.id && self.me.is_communist())
            || self.me.knowledge.knows_communist(other)
            || self.state.revealed_affiliations.get(&other) == Some(&Party::Communist)
    }

    pub fn knows_liberal(&self, other: PlayerId) -> bool {
        self.me.knowledge.knows_liberal(other)
            || self.state.revealed_affiliations.get(&other) == Some(&Party::Liberal)
    }

    pub fn fascist_track(&self) -> usize {
        self.board.fascist_track
    }
}

/// The decisions a player makes over the course of a game.
///
/// Every method returns a choice; none of them mutate the game.
/// Player choices must come from the offered pool, policy choices are indices into the offered hand.
pub trait Actor: Send {
    /// Whether this player is controlled by the computer.
    fn is_bot(&self) -> bool;

    /// The strategy a bot normally plays, ignoring Oktoberfest.
    fn strategy_kind(&self) -> Option<StrategyKind> {
        None
    }

    /// Called after the player has been converted to a communist.
    fn on_radicalized(&mut self) {}

    fn nominate_chancellor(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    /// Returns the index of the card to discard from the president's hand.
    fn filter_policies(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize;
    /// Returns the index of the card to enact from the chancellor's hand.
    fn choose_policy(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize;
    fn vote(&mut self, ctx: &mut Context<'_>, president: PlayerId, chancellor: PlayerId) -> bool;
    fn veto(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool;
    fn accept_veto(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool;
    /// Shows the player cards they have peeked at.
    fn view_policies(&mut self, _ctx: &mut Context<'_>, _policies: &[Policy]) {}
    fn kill(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn choose_player_to_mark(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn inspect_player(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn choose_next(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn choose_player_to_radicalize(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn choose_player_to_bug(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    /// Whether to discard the top card of the deck.
    fn propaganda_decision(&mut self, ctx: &mut Context<'_>, policy: Policy) -> bool;
    fn choose_revealer(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn social_democratic_removal_choice(&mut self, ctx: &mut Context<'_>) -> TrackRemoval;
    fn pardon_player(&mut self, ctx: &mut Context<'_>) -> bool;
    fn chancellor_veto_proposal(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.veto(ctx, policies)
    }
    /// Whether to enact the last discarded policy.
    fn vote_of_no_confidence(&mut self, ctx: &mut Context<'_>) -> bool;
}

/// A computer player that hands every decision to its strategy.
#[derive(Clone, Copy, Debug)]
pub struct AiPlayer {
    kind: StrategyKind,
}

impl AiPlayer {
    pub fn new(kind: StrategyKind) -> Self {
        Self { kind }
    }

    /// Oktoberfest overrides the normal strategy with a random one.
    fn strategy(&self, ctx: &Context<'_>) -> &'static dyn Strategy {
        if ctx.state.oktoberfest_active {
            StrategyKind::Random.strategy()
        } else {
            self.kind.strategy()
        }
    }
}

impl Actor for AiPlayer {
    fn is_bot(&self) -> bool {
        true
    }

    fn strategy_kind(&self) -> Option<StrategyKind> {
        Some(self.kind)
    }

    fn on_radicalized(&mut self) {
        self.kind = self.kind.radicalized();
    }

    fn nominate_chancellor(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.strategy(ctx).nominate_chancellor(ctx, eligible)
    }

    fn filter_policies(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        self.strategy(ctx).filter_policies(ctx, policies)
    }

    fn choose_policy(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        self.strategy(ctx).choose_policy(ctx, policies)
    }

    fn vote(&mut self, ctx: &mut Context<'_>, president: PlayerId, chancellor: PlayerId) -> bool {
        self.strategy(ctx).vote(ctx, president, chancellor)
    }

    fn veto(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.strategy(ctx).veto(ctx, policies)
    }

    fn accept_veto(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.strategy(ctx).accept_veto(ctx, policies)
    }

    fn kill(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.strategy(ctx).choose_player_to_kill(ctx, eligible)
    }

    fn choose_player_to_mark(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.strategy(ctx).choose_player_to_mark(ctx, eligible)
    }

    fn inspect_player(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.strategy(ctx).choose_player_to_inspect(ctx, eligible)
    }

    fn choose_next(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.strategy(ctx).choose_next_president(ctx, eligible)
    }

    fn choose_player_to_radicalize(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.strategy(ctx).choose_player_to_radicalize(ctx, eligible)
    }

    fn choose_player_to_bug(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.strategy(ctx).choose_player_to_bug(ctx, eligible)
    }

    fn propaganda_decision(&mut self, ctx: &mut Context<'_>, policy: Policy) -> bool {
        self.strategy(ctx).propaganda_decision(ctx, policy)
    }

    fn choose_revealer(&mut self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.strategy(ctx).choose_revealer(ctx, eligible)
    }

    fn social_democratic_removal_choice(&mut self, ctx: &mut Context<'_>) -> TrackRemoval {
        self.strategy(ctx).social_democratic_removal_choice(ctx)
    }

    fn pardon_player(&mut self, ctx: &mut Context<'_>) -> bool {
        self.strategy(ctx).pardon_player(ctx)
    }

    fn chancellor_veto_proposal(&mut self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.strategy(ctx).chancellor_veto_proposal(ctx, policies)
    }

    fn vote_of_no_confidence(&mut self, ctx: &mut Context<'_>) -> bool {
        self.strategy(ctx).vote_of_no_confidence(ctx)
    }
}
