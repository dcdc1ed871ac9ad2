use super::{chance, choose_first, coin_flip, Strategy};
use crate::game::actor::Context;
use crate::game::board::TrackRemoval;
use crate::game::player::PlayerId;
use crate::game::policy::Policy;
use rand::Rng;

/// Makes every choice uniformly at random.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomStrategy;

impl Strategy for RandomStrategy {
    fn nominate_chancellor(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        choose_first(ctx.rng, &[eligible])
    }

    fn filter_policies(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        ctx.rng.gen_range(0..policies.len().max(1))
    }

    fn choose_policy(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        ctx.rng.gen_range(0..policies.len().max(1))
    }

    fn vote(&self, ctx: &mut Context<'_>, _president: PlayerId, _chancellor: PlayerId) -> bool {
        ctx.rng.gen::<f64>() >= 0.5
    }

    fn veto(&self, ctx: &mut Context<'_>, _policies: &[Policy]) -> bool {
        chance(ctx.rng, 0.2)
    }

    fn accept_veto(&self, ctx: &mut Context<'_>, _policies: &[Policy]) -> bool {
        chance(ctx.rng, 0.2)
    }

    fn choose_player_to_kill(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        choose_first(ctx.rng, &[eligible])
    }

    fn choose_player_to_inspect(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        choose_first(ctx.rng, &[eligible])
    }

    fn choose_next_president(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        choose_first(ctx.rng, &[eligible])
    }

    fn choose_player_to_radicalize(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        choose_first(ctx.rng, &[eligible])
    }

    fn propaganda_decision(&self, ctx: &mut Context<'_>, _policy: Policy) -> bool {
        chance(ctx.rng, 0.5)
    }

    fn choose_revealer(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        choose_first(ctx.rng, &[eligible])
    }

    fn social_democratic_removal_choice(&self, ctx: &mut Context<'_>) -> TrackRemoval {
        if coin_flip(ctx.rng) {
            TrackRemoval::Fascist
        } else {
            TrackRemoval::Communist
        }
    }

    fn pardon_player(&self, ctx: &mut Context<'_>) -> bool {
        chance(ctx.rng, 0.5)
    }

    fn chancellor_veto_proposal(&self, ctx: &mut Context<'_>, _policies: &[Policy]) -> bool {
        chance(ctx.rng, 0.2)
    }

    fn vote_of_no_confidence(&self, ctx: &mut Context<'_>) -> bool {
        chance(ctx.rng, 0.5)
    }
}
