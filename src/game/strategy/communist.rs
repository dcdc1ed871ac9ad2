use super::{chance, choose_first, coin_flip, count, filtered, least_preferred, most_preferred, Strategy};
use crate::game::actor::Context;
use crate::game::board::TrackRemoval;
use crate::game::party::Party;
use crate::game::player::PlayerId;
use crate::game::policy::Policy;
use rand::seq::SliceRandom;

/// Plays for the communist team, pushing harder as its track nears completion.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommunistStrategy;

fn score(policy: Policy) -> u8 {
    match policy {
        Policy::Communist => 2,
        Policy::Liberal => 1,
        _ => 0,
    }
}

/// What this player knows of `id`'s party, from their own investigations or otherwise.
fn known_party(ctx: &Context<'_>, id: PlayerId) -> Option<Party> {
    ctx.me.knowledge.inspected(id).or_else(|| ctx.me.knowledge.affiliation(id))
}

fn known_fascist(ctx: &Context<'_>, id: PlayerId) -> bool {
    known_party(ctx, id) == Some(Party::Fascist)
}

fn not_known_fascist(ctx: &Context<'_>, pool: &[PlayerId]) -> Vec<PlayerId> {
    filtered(pool, |id| !known_fascist(ctx, id))
}

fn comrades(ctx: &Context<'_>, pool: &[PlayerId]) -> Vec<PlayerId> {
    filtered(pool, |id| ctx.knows_communist(id))
}

impl Strategy for CommunistStrategy {
    fn nominate_chancellor(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let comrades = comrades(ctx, eligible);
        let safe = not_known_fascist(ctx, eligible);
        choose_first(ctx.rng, &[&comrades, &safe, eligible])
    }

    fn filter_policies(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        least_preferred(policies, score)
    }

    fn choose_policy(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        most_preferred(policies, score)
    }

    fn vote(&self, ctx: &mut Context<'_>, president: PlayerId, chancellor: PlayerId) -> bool {
        if ctx.knows_communist(president) || ctx.knows_communist(chancellor) {
            return true;
        }
        if known_fascist(ctx, chancellor) {
            return false;
        }
        let p = if ctx.fascist_track() >= 3 && known_party(ctx, chancellor).is_none() {
            0.3
        } else if ctx.board.communist_track + 2 >= ctx.board.communist_track_size {
            0.8
        } else {
            0.6
        };
        chance(ctx.rng, p)
    }

    fn veto(&self, _ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        count(policies, Policy::Communist) == 0 && count(policies, Policy::Fascist) > 0
    }

    fn accept_veto(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.veto(ctx, policies)
    }

    fn choose_player_to_kill(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        if let Some(hitler) = eligible.iter().copied().find(|id| ctx.knows_hitler(*id)) {
            return hitler;
        }
        let fascists = filtered(eligible, |id| known_fascist(ctx, id));
        let hostile = filtered(eligible, |id| !ctx.knows_communist(id) && !ctx.knows_liberal(id));
        choose_first(ctx.rng, &[&fascists, &hostile, eligible])
    }

    fn choose_player_to_inspect(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let others = filtered(eligible, |id| !ctx.knows_communist(id));
        let unknown = filtered(&others, |id| known_party(ctx, id).is_none());
        let not_liberal = filtered(&others, |id| !ctx.knows_liberal(id));
        choose_first(ctx.rng, &[&unknown, &not_liberal, &others, eligible])
    }

    fn choose_next_president(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.nominate_chancellor(ctx, eligible)
    }

    fn choose_player_to_radicalize(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let liberals = filtered(eligible, |id| ctx.knows_liberal(id));
        let convertible =
            filtered(eligible, |id| !ctx.knows_communist(id) && !known_fascist(ctx, id) && !ctx.knows_hitler(id));
        choose_first(ctx.rng, &[&liberals, &convertible, eligible])
    }

    fn choose_player_to_bug(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.choose_player_to_inspect(ctx, eligible)
    }

    fn propaganda_decision(&self, ctx: &mut Context<'_>, policy: Policy) -> bool {
        match policy {
            Policy::Fascist => true,
            Policy::Communist => false,
            _ => coin_flip(ctx.rng),
        }
    }

    fn choose_revealer(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        self.nominate_chancellor(ctx, eligible)
    }

    fn social_democratic_removal_choice(&self, _ctx: &mut Context<'_>) -> TrackRemoval {
        // Even on an empty track this blocks the next fascist power
        TrackRemoval::Fascist
    }

    fn pardon_player(&self, ctx: &mut Context<'_>) -> bool {
        let Some(marked) = ctx.state.marked_for_execution else {
            return false;
        };
        if ctx.knows_communist(marked) {
            return true;
        }
        match known_party(ctx, marked) {
            Some(Party::Communist) => true,
            Some(Party::Fascist) | None => false,
            Some(Party::Liberal) => [true, true, false].choose(ctx.rng).copied().unwrap_or(false),
        }
    }

    fn chancellor_veto_proposal(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        self.veto(ctx, policies)
    }

    fn vote_of_no_confidence(&self, ctx: &mut Context<'_>) -> bool {
        ctx.state.last_discarded.is_some() && coin_flip(ctx.rng)
    }
}
