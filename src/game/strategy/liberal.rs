use super::{chance, choose_first, coin_flip, filtered, least_preferred, most_preferred, Strategy};
use crate::game::actor::Context;
use crate::game::board::TrackRemoval;
use crate::game::party::Party;
use crate::game::player::PlayerId;
use crate::game::policy::Policy;
use rand::seq::SliceRandom;

/// Plays for the liberal team using the results of its own investigations.
#[derive(Clone, Copy, Debug, Default)]
pub struct LiberalStrategy;

fn score(policy: Policy) -> u8 {
    match policy {
        Policy::Liberal => 2,
        Policy::Communist => 1,
        _ => 0,
    }
}

fn inspected_as(ctx: &Context<'_>, pool: &[PlayerId], party: Party) -> Vec<PlayerId> {
    filtered(pool, |id| ctx.me.knowledge.inspected(id) == Some(party))
}

fn uninspected(ctx: &Context<'_>, pool: &[PlayerId]) -> Vec<PlayerId> {
    filtered(pool, |id| ctx.me.knowledge.inspected(id).is_none())
}

impl Strategy for LiberalStrategy {
    fn nominate_chancellor(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let trusted = inspected_as(ctx, eligible, Party::Liberal);
        let not_suspected = filtered(eligible, |id| ctx.me.knowledge.inspected(id) != Some(Party::Fascist));
        choose_first(ctx.rng, &[&trusted, &not_suspected, eligible])
    }

    fn filter_policies(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        least_preferred(policies, score)
    }

    fn choose_policy(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        most_preferred(policies, score)
    }

    fn vote(&self, ctx: &mut Context<'_>, president: PlayerId, chancellor: PlayerId) -> bool {
        let knowledge = &ctx.me.knowledge;
        if knowledge.inspected(president) == Some(Party::Liberal)
            && knowledge.inspected(chancellor) == Some(Party::Liberal)
        {
            return true;
        }
        if knowledge.inspected(chancellor) == Some(Party::Fascist) {
            return false;
        }
        // The chancellor could be Hitler
        let p = if ctx.fascist_track() >= 3 {
            if knowledge.inspected(chancellor).is_none() {
                0.3
            } else {
                0.5
            }
        } else {
            0.7
        };
        chance(ctx.rng, p)
    }

    fn veto(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        policies.iter().all(|p| *p == Policy::Fascist)
    }

    fn accept_veto(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        policies.iter().all(|p| *p == Policy::Fascist)
    }

    fn choose_player_to_kill(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let fascists = inspected_as(ctx, eligible, Party::Fascist);
        let unknown = uninspected(ctx, eligible);
        choose_first(ctx.rng, &[&fascists, &unknown, eligible])
    }

    fn choose_player_to_inspect(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let unknown = uninspected(ctx, eligible);
        choose_first(ctx.rng, &[&unknown, eligible])
    }

    fn choose_next_president(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.nominate_chancellor(ctx, eligible)
    }

    fn choose_player_to_radicalize(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        // Hitler cannot be converted, so only confirmed non-Hitlers are worth the power
        let fascists = filtered(eligible, |id| {
            ctx.me.knowledge.inspected(id) == Some(Party::Fascist)
                && ctx.player(id).map(|p| p.confirmed_not_hitler).unwrap_or(false)
        });
        choose_first(ctx.rng, &[&fascists, eligible])
    }

    fn choose_player_to_bug(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player_to_inspect(ctx, eligible)
    }

    fn propaganda_decision(&self, ctx: &mut Context<'_>, policy: Policy) -> bool {
        match policy {
            Policy::Fascist => true,
            Policy::Liberal => false,
            _ => coin_flip(ctx.rng),
        }
    }

    fn choose_revealer(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let trusted = inspected_as(ctx, eligible, Party::Liberal);
        choose_first(ctx.rng, &[&trusted, eligible])
    }

    fn social_democratic_removal_choice(&self, ctx: &mut Context<'_>) -> TrackRemoval {
        if ctx.board.fascist_track > 0 {
            TrackRemoval::Fascist
        } else if ctx.board.communist_track > 0 {
            TrackRemoval::Communist
        } else if coin_flip(ctx.rng) {
            TrackRemoval::Fascist
        } else {
            TrackRemoval::Communist
        }
    }

    fn pardon_player(&self, ctx: &mut Context<'_>) -> bool {
        let Some(marked) = ctx.state.marked_for_execution else {
            return false;
        };
        match ctx.me.knowledge.inspected(marked) {
            Some(Party::Liberal) => true,
            Some(Party::Fascist) => false,
            // Leans towards mercy
            _ => [true, true, false].choose(ctx.rng).copied().unwrap_or(false),
        }
    }

    fn chancellor_veto_proposal(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.veto(ctx, policies)
    }

    fn vote_of_no_confidence(&self, ctx: &mut Context<'_>) -> bool {
        match ctx.state.last_discarded {
            None => false,
            Some(Policy::Liberal) => true,
            Some(Policy::Fascist) => false,
            Some(_) => coin_flip(ctx.rng),
        }
    }
}
