//! Decision heuristics for computer players.
//!
//! A strategy only ever looks at what its player is allowed to know: the public game state,
//! the board and the player's own [Knowledge](super::player::Knowledge).

use super::actor::Context;
use super::board::TrackRemoval;
use super::options::StrategyMode;
use super::player::PlayerId;
use super::policy::Policy;
use super::role::Role;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

mod communist;
mod fascist;
mod liberal;
mod random;
mod smart;

pub use communist::CommunistStrategy;
pub use fascist::FascistStrategy;
pub use liberal::LiberalStrategy;
pub use random::RandomStrategy;
pub use smart::SmartStrategy;

/// The decision contract shared by every computer strategy.
///
/// Player choices must come from `eligible`, which is never empty.
/// Policy choices are indices into `policies`.
pub trait Strategy: Sync {
    fn nominate_chancellor(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    /// Returns the index of the policy to discard.
    fn filter_policies(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize;
    /// Returns the index of the policy to enact.
    fn choose_policy(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize;
    fn vote(&self, ctx: &mut Context<'_>, president: PlayerId, chancellor: PlayerId) -> bool;
    fn veto(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool;
    fn accept_veto(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool;
    fn choose_player_to_kill(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn choose_player_to_inspect(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn choose_next_president(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn choose_player_to_radicalize(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;

    fn choose_player_to_mark(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player_to_kill(ctx, eligible)
    }

    fn choose_player_to_bug(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player_to_inspect(ctx, eligible)
    }

    fn propaganda_decision(&self, ctx: &mut Context<'_>, policy: Policy) -> bool;
    fn choose_revealer(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId;
    fn social_democratic_removal_choice(&self, ctx: &mut Context<'_>) -> TrackRemoval;

    /// Pardons the marked player only if they are a fascist's own Hitler.
    fn pardon_player(&self, ctx: &mut Context<'_>) -> bool {
        match ctx.state.marked_for_execution {
            Some(marked) => ctx.me.is_fascist() && ctx.knows_hitler(marked),
            None => false,
        }
    }

    fn chancellor_veto_proposal(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.veto(ctx, policies)
    }

    fn vote_of_no_confidence(&self, ctx: &mut Context<'_>) -> bool;
}

/// Identifies one of the built-in strategies.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Random,
    Liberal,
    Fascist,
    Communist,
    Smart,
}

impl StrategyKind {
    /// Picks the strategy a bot with the given role plays under the configured mode.
    pub fn for_role(mode: StrategyMode, role: Role) -> Self {
        match (mode, role) {
            (StrategyMode::Random, _) => StrategyKind::Random,
            (StrategyMode::Smart, _) => StrategyKind::Smart,
            (StrategyMode::Role, Role::Liberal) => StrategyKind::Liberal,
            (StrategyMode::Role, Role::Fascist | Role::Hitler) => StrategyKind::Fascist,
            (StrategyMode::Role, Role::Communist) => StrategyKind::Communist,
        }
    }

    /// The strategy played after being converted to a communist.
    pub fn radicalized(self) -> Self {
        match self {
            StrategyKind::Liberal | StrategyKind::Fascist => StrategyKind::Communist,
            other => other,
        }
    }

    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            StrategyKind::Random => &RandomStrategy,
            StrategyKind::Liberal => &LiberalStrategy,
            StrategyKind::Fascist => &FascistStrategy,
            StrategyKind::Communist => &CommunistStrategy,
            StrategyKind::Smart => &SmartStrategy,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::Random => "random",
            StrategyKind::Liberal => "liberal",
            StrategyKind::Fascist => "fascist",
            StrategyKind::Communist => "communist",
            StrategyKind::Smart => "smart",
        })
    }
}

/// Picks uniformly from the first non-empty pool.
pub(crate) fn choose_first(rng: &mut ChaCha8Rng, pools: &[&[PlayerId]]) -> PlayerId {
    pools
        .iter()
        .find(|pool| !pool.is_empty())
        .and_then(|pool| pool.choose(rng).copied())
        .unwrap_or_default()
}

/// The players in `pool` matching `pred`, in pool order.
pub(crate) fn filtered(pool: &[PlayerId], pred: impl Fn(PlayerId) -> bool) -> Vec<PlayerId> {
    pool.iter().copied().filter(|id| pred(*id)).collect()
}

/// `true` with probability `p`.
pub(crate) fn chance(rng: &mut ChaCha8Rng, p: f64) -> bool {
    rng.gen::<f64>() <= p
}

pub(crate) fn coin_flip(rng: &mut ChaCha8Rng) -> bool {
    rng.gen_bool(0.5)
}

/// Orders policy indices from most to least preferred; ties keep hand order.
fn ranked(policies: &[Policy], score: impl Fn(Policy) -> u8) -> Vec<usize> {
    let mut order: Vec<usize> = (0..policies.len()).collect();
    order.sort_by_key(|idx| std::cmp::Reverse(score(policies[*idx])));
    order
}

/// The index of the least preferred policy.
pub(crate) fn least_preferred(policies: &[Policy], score: impl Fn(Policy) -> u8) -> usize {
    ranked(policies, score).last().copied().unwrap_or_default()
}

/// The index of the most preferred policy.
pub(crate) fn most_preferred(policies: &[Policy], score: impl Fn(Policy) -> u8) -> usize {
    ranked(policies, score).first().copied().unwrap_or_default()
}

pub(crate) fn count(policies: &[Policy], policy: Policy) -> usize {
    policies.iter().filter(|p| **p == policy).count()
}

/// Players who sat in a government that enacted a fascist policy.
pub(crate) fn implicated_in_fascist_policies(ctx: &Context<'_>) -> Vec<PlayerId> {
    let mut ids: Vec<PlayerId> = ctx
        .state
        .policy_history
        .iter()
        .filter(|record| record.policy == Policy::Fascist)
        .flat_map(|record| [&record.president, &record.chancellor])
        .flatten()
        .map(|player| player.id)
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
