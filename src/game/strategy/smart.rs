use super::{chance, choose_first, count, filtered, implicated_in_fascist_policies, least_preferred, Strategy};
use crate::game::actor::Context;
use crate::game::board::TrackRemoval;
use crate::game::party::Party;
use crate::game::player::PlayerId;
use crate::game::policy::Policy;

/// A role-aware strategy that also reads the policy history.
///
/// Liberals distrust anyone who sat in a government that passed a fascist policy.
/// Fascists hold Hitler back until a Hitler chancellery wins the game.
#[derive(Clone, Copy, Debug, Default)]
pub struct SmartStrategy;

fn priority(me: Party, policy: Policy) -> u8 {
    use Policy::*;
    match (me, policy) {
        (_, Article48 | EnablingAct) => 4,
        (Party::Fascist, Fascist) => 3,
        (Party::Fascist, Communist | AntiCommunist) => 2,
        (Party::Fascist, Liberal | SocialDemocratic) => 1,
        (Party::Fascist, AntiFascist) => 0,
        (Party::Liberal, Liberal | AntiFascist | SocialDemocratic) => 3,
        (Party::Liberal, Communist | AntiCommunist) => 2,
        (Party::Liberal, Fascist) => 1,
        (Party::Communist, Communist | AntiFascist) => 3,
        (Party::Communist, Fascist) => 2,
        (Party::Communist, Liberal | SocialDemocratic) => 1,
        (Party::Communist, AntiCommunist) => 0,
    }
}

/// The policy types this role wants to enact, best first.
fn enact_order(me: Party) -> &'static [Policy] {
    match me {
        Party::Fascist => &[Policy::Fascist, Policy::Communist],
        Party::Liberal => &[Policy::Liberal],
        Party::Communist => &[Policy::Communist, Policy::Fascist],
    }
}

fn inspected_as(ctx: &Context<'_>, pool: &[PlayerId], party: Party) -> Vec<PlayerId> {
    filtered(pool, |id| ctx.me.knowledge.inspected(id) == Some(party))
}

fn fellow_fascists(ctx: &Context<'_>, pool: &[PlayerId]) -> Vec<PlayerId> {
    filtered(pool, |id| id != ctx.me.id && ctx.knows_fascist(id))
}

fn comrades(ctx: &Context<'_>, pool: &[PlayerId]) -> Vec<PlayerId> {
    filtered(pool, |id| ctx.me.knowledge.known_communists.contains(&id))
}

/// Whether every card in the hand is of the given type.
fn all_of(policies: &[Policy], policy: Policy) -> bool {
    count(policies, policy) == policies.len()
}

/// Whether this role would rather nothing from the hand was enacted.
fn hand_is_hopeless(me: Party, policies: &[Policy]) -> bool {
    match me {
        Party::Liberal => all_of(policies, Policy::Fascist),
        Party::Fascist => all_of(policies, Policy::Liberal),
        Party::Communist => all_of(policies, Policy::Liberal),
    }
}

impl Strategy for SmartStrategy {
    fn nominate_chancellor(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        match ctx.me.party() {
            Party::Fascist => {
                if ctx.fascist_track() >= 3 && !ctx.me.is_hitler() {
                    if let Some(hitler) = eligible.iter().copied().find(|id| ctx.knows_hitler(*id)) {
                        return hitler;
                    }
                }
                let fascists = fellow_fascists(ctx, eligible);
                let not_hitler = filtered(&fascists, |id| !ctx.knows_hitler(id));
                if ctx.me.is_hitler() && ctx.fascist_track() >= 3 {
                    choose_first(ctx.rng, &[&not_hitler, &fascists, eligible])
                } else {
                    choose_first(ctx.rng, &[&fascists, eligible])
                }
            }
            Party::Liberal => {
                let trusted = inspected_as(ctx, eligible, Party::Liberal);
                let suspicious = implicated_in_fascist_policies(ctx);
                let clean = filtered(eligible, |id| !suspicious.contains(&id));
                choose_first(ctx.rng, &[&trusted, &clean, eligible])
            }
            Party::Communist => {
                let comrades = comrades(ctx, eligible);
                let not_liberal = filtered(eligible, |id| ctx.me.knowledge.inspected(id) != Some(Party::Liberal));
                choose_first(ctx.rng, &[&comrades, &not_liberal, eligible])
            }
        }
    }

    fn filter_policies(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        let me = ctx.me.party();
        let score = |policy| priority(me, policy);

        // With a pair in hand, keep the pair unless the odd card is worth more
        let pair = policies.iter().copied().find(|p| count(policies, *p) == 2);
        if let (Some(pair), 3) = (pair, policies.len()) {
            let solo = policies.iter().position(|p| *p != pair).unwrap_or_default();
            return if score(pair) < score(policies[solo]) {
                policies.iter().rposition(|p| *p == pair).unwrap_or_default()
            } else {
                solo
            };
        }
        least_preferred(policies, score)
    }

    fn choose_policy(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> usize {
        enact_order(ctx.me.party())
            .iter()
            .find_map(|wanted| policies.iter().position(|p| p == wanted))
            .unwrap_or_default()
    }

    fn vote(&self, ctx: &mut Context<'_>, _president: PlayerId, chancellor: PlayerId) -> bool {
        let p = match ctx.me.party() {
            Party::Fascist => {
                if ctx.knows_fascist(chancellor) {
                    return true;
                }
                0.7
            }
            Party::Liberal => match ctx.me.knowledge.inspected(chancellor) {
                Some(Party::Liberal) => return true,
                Some(Party::Fascist) => return false,
                _ if ctx.fascist_track() >= 4 => 0.4,
                _ => 0.6,
            },
            Party::Communist => {
                if ctx.me.knowledge.known_communists.contains(&chancellor) {
                    return true;
                }
                match ctx.me.knowledge.inspected(chancellor) {
                    Some(Party::Fascist) => 0.7,
                    Some(Party::Liberal) => 0.3,
                    _ => 0.5,
                }
            }
        };
        chance(ctx.rng, p)
    }

    fn veto(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        hand_is_hopeless(ctx.me.party(), policies) || chance(ctx.rng, 0.1)
    }

    fn accept_veto(&self, ctx: &mut Context<'_>, policies: &[Policy]) -> bool {
        let me = ctx.me.party();
        if ctx.state.election_tracker == 2 {
            // Another failure means a chaos policy
            return me != Party::Communist && hand_is_hopeless(me, policies);
        }
        hand_is_hopeless(me, policies) || chance(ctx.rng, 0.2)
    }

    fn choose_player_to_kill(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let fascists = inspected_as(ctx, eligible, Party::Fascist);
        let liberals = inspected_as(ctx, eligible, Party::Liberal);
        match ctx.me.party() {
            Party::Liberal => {
                let suspicious = implicated_in_fascist_policies(ctx);
                let implicated = filtered(eligible, |id| suspicious.contains(&id));
                choose_first(ctx.rng, &[&fascists, &implicated, eligible])
            }
            Party::Fascist => choose_first(ctx.rng, &[&liberals, eligible]),
            Party::Communist => choose_first(ctx.rng, &[&fascists, &liberals, eligible]),
        }
    }

    fn choose_player_to_inspect(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let unknown = filtered(eligible, |id| ctx.me.knowledge.inspected(id).is_none());
        choose_first(ctx.rng, &[&unknown, eligible])
    }

    fn choose_next_president(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let preferred = match ctx.me.party() {
            Party::Fascist => filtered(eligible, |id| ctx.knows_fascist(id)),
            Party::Liberal => inspected_as(ctx, eligible, Party::Liberal),
            Party::Communist => comrades(ctx, eligible),
        };
        choose_first(ctx.rng, &[&preferred, eligible])
    }

    fn choose_player_to_radicalize(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        if !ctx.me.is_communist() {
            return choose_first(ctx.rng, &[eligible]);
        }
        let fascists = filtered(eligible, |id| {
            ctx.me.knowledge.inspected(id) == Some(Party::Fascist)
                && ctx.player(id).map(|p| p.confirmed_not_hitler).unwrap_or(false)
        });
        let liberals = inspected_as(ctx, eligible, Party::Liberal);
        choose_first(ctx.rng, &[&fascists, &liberals, eligible])
    }

    fn choose_player_to_mark(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let fascists = inspected_as(ctx, eligible, Party::Fascist);
        match ctx.me.party() {
            Party::Liberal => {
                let hitler = filtered(&fascists, |id| ctx.knows_hitler(id));
                choose_first(ctx.rng, &[&hitler, &fascists, eligible])
            }
            Party::Fascist => {
                let enemies = filtered(eligible, |id| !ctx.knows_fascist(id));
                choose_first(ctx.rng, &[&enemies, eligible])
            }
            Party::Communist => {
                let liberals = inspected_as(ctx, eligible, Party::Liberal);
                choose_first(ctx.rng, &[&fascists, &liberals, eligible])
            }
        }
    }

    fn propaganda_decision(&self, ctx: &mut Context<'_>, policy: Policy) -> bool {
        match (ctx.me.party(), policy) {
            (Party::Fascist, Policy::Liberal) => true,
            (Party::Liberal, Policy::Fascist) => true,
            (Party::Communist, Policy::Fascist) => true,
            (Party::Communist, Policy::Liberal) => chance(ctx.rng, 0.5),
            (_, Policy::Article48 | Policy::EnablingAct) => false,
            (Party::Fascist, Policy::Fascist)
            | (Party::Liberal, Policy::Liberal)
            | (Party::Communist, Policy::Communist) => false,
            _ => chance(ctx.rng, 0.2),
        }
    }

    fn choose_revealer(&self, ctx: &mut Context<'_>, eligible: &[PlayerId]) -> PlayerId {
        let allies = match ctx.me.party() {
            Party::Fascist => filtered(eligible, |id| ctx.knows_fascist(id)),
            Party::Liberal => inspected_as(ctx, eligible, Party::Liberal),
            Party::Communist => comrades(ctx, eligible),
        };
        choose_first(ctx.rng, &[&allies, eligible])
    }

    fn social_democratic_removal_choice(&self, ctx: &mut Context<'_>) -> TrackRemoval {
        match ctx.me.party() {
            Party::Fascist => TrackRemoval::Communist,
            Party::Liberal => TrackRemoval::Fascist,
            Party::Communist if chance(ctx.rng, 0.7) => TrackRemoval::Fascist,
            Party::Communist => TrackRemoval::Communist,
        }
    }

    fn pardon_player(&self, ctx: &mut Context<'_>) -> bool {
        let Some(marked) = ctx.state.marked_for_execution else {
            return false;
        };
        match ctx.me.party() {
            Party::Fascist if ctx.knows_hitler(marked) => return true,
            Party::Fascist if ctx.knows_fascist(marked) => return chance(ctx.rng, 0.9),
            Party::Liberal if ctx.me.knowledge.inspected(marked) == Some(Party::Liberal) => return true,
            Party::Communist if ctx.me.knowledge.known_communists.contains(&marked) => return true,
            _ => {}
        }
        chance(ctx.rng, 0.2)
    }

    fn vote_of_no_confidence(&self, ctx: &mut Context<'_>) -> bool {
        let Some(policy) = ctx.state.last_discarded else {
            return false;
        };
        policy.party() == Some(ctx.me.party()) || chance(ctx.rng, 0.2)
    }
}
