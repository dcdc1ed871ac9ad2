use super::test_utils::*;
use crate::game::role::Role;
use crate::game::state::{GameState, Oktoberfest};
use crate::game::{WinCondition, Winner};

fn state(num_players: usize) -> GameState {
    let mut roles = vec![Role::Liberal; num_players];
    roles[0] = Role::Hitler;
    roles[1] = Role::Fascist;
    test_state(&roles)
}

#[test]
fn test_term_limits_with_more_than_five_players() {
    let mut state = state(7);
    state.president = Some(1);
    state.chancellor = Some(2);
    state.set_term_limits();
    assert_eq!(state.term_limited_players, vec![2]);
}

#[test]
fn test_term_limits_with_five_players_left() {
    let mut state = state(7);
    state.handle_player_death(5);
    state.handle_player_death(6);
    state.president = Some(1);
    state.chancellor = Some(2);
    state.set_term_limits();
    assert_eq!(state.term_limited_players, vec![2, 1]);
}

#[test]
fn test_eligible_chancellors() {
    let mut state = state(7);
    state.president_candidate = Some(0);
    state.term_limited_players = vec![3];
    state.handle_player_death(5);
    assert_eq!(state.get_eligible_chancellors(), vec![1, 2, 4, 6]);
}

#[test]
fn test_presidency_rotates_in_seating_order() {
    let mut state = state(6);
    state.president = Some(2);
    state.set_next_president();
    assert_eq!(state.president_candidate, Some(3));

    state.president = Some(5);
    state.set_next_president();
    assert_eq!(state.president_candidate, Some(0));
}

#[test]
fn test_rotation_skips_dead_players() {
    let mut state = state(6);
    state.handle_player_death(3);
    state.president = Some(2);
    state.set_next_president();
    assert_eq!(state.president_candidate, Some(4));
}

#[test]
fn test_special_election_returns_to_rotation() {
    let mut state = state(8);
    state.president = Some(1);
    state.special_election = true;
    state.special_election_return_index = Some(1);
    state.special_president = Some(5);

    state.set_next_president();
    assert_eq!(state.president_candidate, Some(5));

    // The special president serves, then the seat after the caller is next
    state.president = Some(5);
    state.set_next_president();
    assert_eq!(state.president_candidate, Some(2));
    assert!(!state.special_election);
}

#[test]
fn test_death_of_president_hands_over_candidacy() {
    let mut state = state(6);
    state.president = Some(2);
    state.president_candidate = Some(2);
    state.term_limited_players = vec![2];
    state.handle_player_death(2);

    assert!(state.players[2].is_dead);
    assert_eq!(state.president, None);
    assert_eq!(state.president_candidate, Some(3));
    assert!(!state.active_players.contains(&2));
    assert!(state.term_limited_players.is_empty());
}

#[test]
fn test_death_of_last_seat_wraps_candidacy() {
    let mut state = state(6);
    state.president_candidate = Some(5);
    state.handle_player_death(5);
    assert_eq!(state.president_candidate, Some(0));
}

#[test]
fn test_death_of_caller_keeps_special_president() {
    let mut state = state(8);
    state.president = Some(1);
    state.special_election = true;
    state.special_election_return_index = Some(1);
    state.president_candidate = Some(5);

    // The caller of the special election is executed before the special president serves
    state.handle_player_death(1);
    assert_eq!(state.president, None);
    assert_eq!(state.president_candidate, Some(5));

    // Rotation then resumes with the seat after the dead caller
    state.president = Some(5);
    state.set_next_president();
    assert_eq!(state.president_candidate, Some(2));
}

#[test]
fn test_death_before_return_seat_keeps_rotation_in_place() {
    let mut state = state(8);
    state.special_election = true;
    state.special_election_return_index = Some(4);
    state.president = Some(6);
    state.president_candidate = Some(6);

    state.handle_player_death(0);
    state.set_next_president();
    assert_eq!(state.president_candidate, Some(5));
}

#[test]
fn test_month_counter_wraps_and_tracks_oktoberfest() {
    let mut state = GameState::new(state(6).players, 9);
    assert_eq!(state.month_name(), "September");
    assert_eq!(state.advance_month_counter(), Some(Oktoberfest::Started));
    assert!(state.oktoberfest_active);
    assert_eq!(state.advance_month_counter(), Some(Oktoberfest::Ended));
    assert!(!state.oktoberfest_active);

    let mut state = GameState::new(state.players, 12);
    assert_eq!(state.advance_month_counter(), None);
    assert_eq!(state.month_counter, 1);
}

#[test]
fn test_first_outcome_stands() {
    let mut state = state(6);
    state.end_game(WinCondition::HitlerExecuted, Winner::LiberalAndCommunist);
    state.end_game(WinCondition::FascistPolicyTrack, Winner::Fascist);
    assert!(state.game_over());
    assert_eq!(state.winner(), Some(Winner::LiberalAndCommunist));
}
