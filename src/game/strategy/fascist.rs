use super::{chance, choose_first, coin_flip, count, filtered, least_preferred, most_preferred, Strategy};
use crate::game::actor::Context;
use crate::game::board::TrackRemoval;
use crate::game::party::Party;
use crate::game::player::PlayerId;
use crate::game::policy::Policy;

/// Plays for the fascist team, steering Hitler into the chancellery once it wins the game.
#[derive(Clone, Copy, Debug, Default)]
pub struct FascistStrategy;

fn score(policy: Policy) -> u8 {
    match policy {
        Policy::Fascist => 2,
        Policy::Communist => 1,
        _ => 0,
    }
}

/// What this player knows of `id`'s party, from any source.
fn known_party(ctx: &Context<'_>, id: PlayerId) -> Option<Party> {
    ctx.me.knowledge.inspected(id).or_else(|| ctx.me.knowledge.affiliation(id))
}

fn non_allies(ctx: &Context<'_>, pool: &[PlayerId]) -> Vec<PlayerId> {
    filtered(pool, |id| !ctx.knows_fascist(id))
}

impl Strategy for FascistStrategy {
    fn nominate_chancellor(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        if ctx.fascist_track() >= 3 {
            if let Some(hitler) = eligible.iter().copied().find(|id| ctx.knows_hitler(*id)) {
                return hitler;
            }
        }
        let fascists = filtered(eligible, |id| ctx.knows_fascist(id) && !ctx.knows_hitler(id));
        choose_first(ctx.rng, &[&fascists, eligible])
    }

    fn filter_policies(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        least_preferred(policies, score)
    }

    fn choose_policy(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        most_preferred(policies, score)
    }

    fn vote(&self, ctx: &mut Context<'_>, president: PlayerId, chancellor: PlayerId) -> bool {
        if ctx.knows_fascist(chancellor) {
            return true;
        }
        let knowledge = &ctx.me.knowledge;
        let p = if knowledge.inspected(president) == Some(Party::Liberal)
            && knowledge.inspected(chancellor) == Some(Party::Liberal)
        {
            0.3
        } else if matches!(ctx.fascist_track(), 2 | 4) {
            // The next fascist policy unlocks a power
            0.8
        } else {
            0.7
        };
        chance(ctx.rng, p)
    }

    fn veto(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        count(policies, Policy::Fascist) == 0
    }

    fn accept_veto(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        count(policies, Policy::Fascist) == 0
    }

    fn choose_player_to_kill(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let targets = non_allies(ctx, eligible);
        let liberals = filtered(&targets, |id| known_party(ctx, id) == Some(Party::Liberal));
        let communists = filtered(&targets, |id| known_party(ctx, id) == Some(Party::Communist));
        let unknown = filtered(&targets, |id| known_party(ctx, id).is_none());
        choose_first(ctx.rng, &[&liberals, &communists, &unknown, &targets, eligible])
    }

    fn choose_player_to_inspect(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let targets = non_allies(ctx, eligible);
        let unknown = filtered(&targets, |id| ctx.me.knowledge.inspected(id).is_none());
        choose_first(ctx.rng, &[&unknown, &targets, eligible])
    }

    fn choose_next_president(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let fascists = filtered(eligible, |id| ctx.knows_fascist(id) && !ctx.knows_hitler(id));
        let not_liberal = filtered(eligible, |id| ctx.me.knowledge.inspected(id) != Some(Party::Liberal));
        choose_first(ctx.rng, &[&fascists, &not_liberal, eligible])
    }

    fn choose_player_to_radicalize(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let liberals = filtered(eligible, |id| ctx.me.knowledge.inspected(id) == Some(Party::Liberal));
        let targets = non_allies(ctx, eligible);
        choose_first(ctx.rng, &[&liberals, &targets, eligible])
    }

    fn choose_player_to_bug(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player_to_inspect(ctx, eligible)
    }

    fn propaganda_decision(&self, ctx: &mut Context<'_>, policy: Policy) -> bool {
        match policy {
            Policy::Liberal => true,
            Policy::Fascist => false,
            _ => coin_flip(ctx.rng),
        }
    }

    fn choose_revealer(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let fascists = filtered(eligible, |id| ctx.knows_fascist(id));
        choose_first(ctx.rng, &[&fascists, eligible])
    }

    fn social_democratic_removal_choice(&self, _ctx: &mut Context<'_>) -> TrackRemoval {
        TrackRemoval::Communist
    }

    fn pardon_player(&self, ctx: &mut Context<'_>) -> bool {
        match ctx.state.marked_for_execution {
            Some(marked) => ctx.knows_fascist(marked),
            None => false,
        }
    }

    fn chancellor_veto_proposal(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.veto(ctx, policies)
    }

    fn vote_of_no_confidence(&self, ctx: &mut Context<'_>) -> bool {
        match ctx.state.last_discarded {
            None => false,
            Some(Policy::Fascist) => true,
            Some(Policy::Liberal) => false,
            Some(_) => coin_flip(ctx.rng),
        }
    }
}
