//! Policy tracks, power schedules and the effects of enacting each kind of policy

use super::test_utils::*;
use crate::game::board::{Board, EnactOptions, TrackRemoval};
use crate::game::executive_power::{ExecutivePower, ARTICLE48_POWERS, ENABLING_ACT_POWERS};
use crate::game::party::Party;
use crate::game::policy::Policy;
use crate::game::role::Role;
use crate::game::state::GameState;
use crate::game::{WinCondition, Winner};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn setup(num_players: usize) -> (Board, GameState, ChaCha8Rng) {
    let mut roles = vec![Role::Liberal; num_players];
    roles[0] = Role::Hitler;
    roles[1] = Role::Fascist;
    roles[2] = Role::Communist;
    (Board::new(num_players, true), test_state(&roles), ChaCha8Rng::seed_from_u64(0))
}

const SESSION: EnactOptions = EnactOptions { chaos: false, emergency: true, anti_policies: true };

#[test]
fn test_track_sizes() {
    assert_eq!(Board::new(6, true).communist_track_size, 5);
    assert_eq!(Board::new(8, true).communist_track_size, 5);
    assert_eq!(Board::new(9, true).communist_track_size, 6);
    assert_eq!(Board::new(9, false).communist_track_size, 0);

    let board = Board::new(12, true);
    assert_eq!(board.liberal_track_size, 5);
    assert_eq!(board.fascist_track_size, 6);
}

#[test]
fn test_power_schedules() {
    use ExecutivePower::*;
    let board = Board::new(6, true);
    assert_eq!(board.get_power_for_track_position(Party::Fascist, 1), None);
    assert_eq!(board.get_power_for_track_position(Party::Fascist, 3), Some(PolicyPeek));
    assert_eq!(board.get_power_for_track_position(Party::Fascist, 4), Some(Execution));
    assert_eq!(board.get_power_for_track_position(Party::Communist, 1), Some(Bugging));
    assert_eq!(board.get_power_for_track_position(Party::Communist, 0), None);
    assert_eq!(board.get_power_for_track_position(Party::Liberal, 1), None);

    let board = Board::new(9, true);
    assert_eq!(board.get_power_for_track_position(Party::Fascist, 2), Some(InvestigateLoyalty));
    assert_eq!(board.get_power_for_track_position(Party::Fascist, 3), Some(SpecialElection));
    assert_eq!(board.get_power_for_track_position(Party::Communist, 5), Some(Confession));

    let board = Board::new(14, true);
    assert_eq!(board.get_power_for_track_position(Party::Fascist, 1), Some(InvestigateLoyalty));
    assert_eq!(board.get_power_for_track_position(Party::Communist, 1), None);
    assert_eq!(board.get_power_for_track_position(Party::Communist, 4), Some(Radicalization));
}

#[test]
fn test_enacting_records_history() {
    let (mut board, mut state, mut rng) = setup(8);
    board.enact_policy(Policy::Liberal, &mut state, SESSION, None, &mut rng);
    board.enact_policy(Policy::Communist, &mut state, SESSION, None, &mut rng);

    assert_eq!(board.liberal_track, 1);
    assert_eq!(board.communist_track, 1);
    assert_eq!(state.enacted_policies, 2);
    assert_eq!(state.policy_history.len(), 2);
    let last = state.policy_history.last().unwrap();
    assert_eq!(last.policy, Policy::Communist);
    assert_eq!((last.liberal_track, last.fascist_track, last.communist_track), (1, 0, 1));
}

#[test]
fn test_fascist_policy_grants_scheduled_power() {
    let (mut board, mut state, mut rng) = setup(8);
    assert_eq!(board.enact_policy(Policy::Fascist, &mut state, SESSION, None, &mut rng), None);
    assert_eq!(
        board.enact_policy(Policy::Fascist, &mut state, SESSION, None, &mut rng),
        Some(ExecutivePower::InvestigateLoyalty)
    );
}

#[test]
fn test_chaos_grants_no_power() {
    let (mut board, mut state, mut rng) = setup(8);
    board.fascist_track = 1;
    let chaos = EnactOptions { chaos: true, ..SESSION };
    assert_eq!(board.enact_policy(Policy::Fascist, &mut state, chaos, None, &mut rng), None);
    assert_eq!(board.fascist_track, 2);
    assert_eq!(board.enact_policy(Policy::Article48, &mut state, chaos, None, &mut rng), None);
}

#[test]
fn test_veto_unlocks_at_five_fascist_policies() {
    let (mut board, mut state, mut rng) = setup(8);
    board.fascist_track = 3;
    board.enact_policy(Policy::Fascist, &mut state, SESSION, None, &mut rng);
    assert!(!board.veto_available);
    board.enact_policy(Policy::Fascist, &mut state, SESSION, None, &mut rng);
    assert!(board.veto_available);
}

#[test]
fn test_veto_is_lost_when_the_fascist_track_drops_below_five() {
    let (mut board, mut state, mut rng) = setup(8);
    board.fascist_track = 4;
    board.enact_policy(Policy::Fascist, &mut state, SESSION, None, &mut rng);
    assert!(board.veto_available);

    board.enact_policy(Policy::AntiFascist, &mut state, SESSION, None, &mut rng);
    assert_eq!(board.fascist_track, 4);
    assert!(!board.veto_available);

    board.fascist_track = 5;
    board.veto_available = true;
    board.enact_policy(Policy::SocialDemocratic, &mut state, SESSION, Some(TrackRemoval::Fascist), &mut rng);
    assert_eq!(board.fascist_track, 4);
    assert!(!board.veto_available);
}

#[test]
fn test_antifascist_removes_a_fascist_policy_and_blocks_its_power() {
    let (mut board, mut state, mut rng) = setup(8);
    board.fascist_track = 2;
    board.enact_policy(Policy::AntiFascist, &mut state, SESSION, None, &mut rng);
    assert_eq!(board.fascist_track, 1);
    assert_eq!(board.communist_track, 1);
    assert!(state.block_next_fascist_power);

    // Position 2 would normally grant an investigation
    assert_eq!(board.enact_policy(Policy::Fascist, &mut state, SESSION, None, &mut rng), None);
    assert!(!state.block_next_fascist_power);
}

#[test]
fn test_anticommunist_removes_a_communist_policy() {
    let (mut board, mut state, mut rng) = setup(8);
    board.communist_track = 0;
    board.enact_policy(Policy::AntiCommunist, &mut state, SESSION, None, &mut rng);
    assert_eq!(board.communist_track, 0);
    assert_eq!(board.fascist_track, 1);
    assert!(state.block_next_communist_power);
}

#[test]
fn test_social_democratic_policy_uses_removal_choice() {
    let (mut board, mut state, mut rng) = setup(8);
    board.fascist_track = 2;
    board.communist_track = 2;
    board.enact_policy(Policy::SocialDemocratic, &mut state, SESSION, Some(TrackRemoval::Communist), &mut rng);
    assert_eq!(board.liberal_track, 1);
    assert_eq!(board.communist_track, 1);
    assert_eq!(board.fascist_track, 2);
}

#[test]
fn test_anti_policies_do_nothing_when_disabled() {
    let (mut board, mut state, mut rng) = setup(8);
    board.fascist_track = 2;
    let opts = EnactOptions { anti_policies: false, ..SESSION };
    board.enact_policy(Policy::AntiFascist, &mut state, opts, None, &mut rng);
    assert_eq!((board.fascist_track, board.communist_track), (2, 0));
}

#[test]
fn test_emergency_cards_grant_a_power_from_their_registry() {
    let (mut board, mut state, mut rng) = setup(12);
    for _ in 0..10 {
        let power = board.enact_policy(Policy::Article48, &mut state, SESSION, None, &mut rng).unwrap();
        assert!(ARTICLE48_POWERS.contains(&power));
        let power = board.enact_policy(Policy::EnablingAct, &mut state, SESSION, None, &mut rng).unwrap();
        assert!(ENABLING_ACT_POWERS.contains(&power));
    }
    assert_eq!((board.liberal_track, board.fascist_track, board.communist_track), (0, 0, 0));

    let opts = EnactOptions { emergency: false, ..SESSION };
    assert_eq!(board.enact_policy(Policy::Article48, &mut state, opts, None, &mut rng), None);
}

#[test]
fn test_completing_a_track_ends_the_game() {
    let (mut board, mut state, mut rng) = setup(8);
    board.liberal_track = 4;
    board.enact_policy(Policy::Liberal, &mut state, SESSION, None, &mut rng);
    let outcome = state.outcome.unwrap();
    assert_eq!(outcome.condition, WinCondition::LiberalPolicyTrack);
    assert_eq!(outcome.winner, Winner::Liberal);

    let (mut board, mut state, mut rng) = setup(8);
    board.communist_track = 4;
    board.enact_policy(Policy::Communist, &mut state, SESSION, None, &mut rng);
    assert_eq!(state.winner(), Some(Winner::Communist));
    assert_eq!(board.check_tracks(), Some(Party::Communist));
}

#[test]
fn test_eight_players_without_communists() {
    use ExecutivePower::*;
    let mut board = Board::new(8, false);
    let mut state = test_state(&[Role::Liberal; 8]);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    assert_eq!(
        board.fascist_powers,
        vec![None, Some(InvestigateLoyalty), Some(SpecialElection), Some(Execution), Some(Execution)]
    );
    assert!(board.communist_powers.is_empty());

    let opts = EnactOptions { anti_policies: false, ..SESSION };
    board.enact_policy(Policy::Fascist, &mut state, opts, None, &mut rng);
    board.enact_policy(Policy::Fascist, &mut state, opts, None, &mut rng);
    assert_eq!(board.enact_policy(Policy::Fascist, &mut state, opts, None, &mut rng), Some(SpecialElection));
}
