//! Drawing, discarding, vetoing and enacting policies

use super::test_utils::*;
use crate::error::GameError;
use crate::game::deck::Deck;
use crate::game::executive_power::ExecutivePower;
use crate::game::government::Government;
use crate::game::policy::Policy;
use crate::game::state::Phase;
use crate::game::{Game, GameOptions};

const HAND: [Policy; 3] = [Policy::Fascist, Policy::Liberal, Policy::Communist];

/// A six player game with player 0 as president, player 1 as chancellor, and `HAND` on top of the deck.
fn in_session(script: ScriptedActor) -> Game {
    let mut game = create_scripted_game(6, GameOptions::default(), script);
    let mut cards = HAND.to_vec();
    cards.extend([Policy::Liberal; 6]);
    game.board.deck = Deck::new(cards);
    elect(&mut game, 0, 1);
    game
}

#[test]
fn test_drawing_requires_a_government() {
    let mut game = create_test_game(6, GameOptions::default(), 1);
    assert_eq!(game.draw_presidential_policies().err(), Some(GameError::InvalidAction));
}

#[test]
fn test_president_discards_one_card() {
    let mut game = in_session(ScriptedActor::default());
    assert_eq!(game.draw_presidential_policies().unwrap(), HAND.to_vec());
    assert_eq!(game.draw_presidential_policies().err(), Some(GameError::InvalidAction));

    let hand = game.handle_presidential_choice(0).unwrap();
    assert_eq!(hand, vec![Policy::Liberal, Policy::Communist]);
    assert_eq!(game.state.last_discarded, Some(Policy::Fascist));
    assert_eq!(game.state.presidential_policies, None);
    assert_eq!(game.board.deck.discards(), &[Policy::Fascist]);
}

#[test]
fn test_invalid_card_index_keeps_the_hand() {
    let mut game = in_session(ScriptedActor::default());
    game.draw_presidential_policies().unwrap();
    assert_eq!(game.handle_presidential_choice(3).err(), Some(GameError::InvalidCard));
    assert_eq!(game.state.presidential_policies, Some(HAND.to_vec()));

    game.handle_presidential_choice(2).unwrap();
    assert_eq!(game.handle_chancellor_choice(2).err(), Some(GameError::InvalidCard));
    assert_eq!(game.state.chancellor_policies, Some(vec![Policy::Fascist, Policy::Liberal]));
}

#[test]
fn test_chancellor_enacts_and_session_ends() {
    let mut game = in_session(ScriptedActor::default());
    game.draw_presidential_policies().unwrap();
    game.handle_presidential_choice(0).unwrap();

    let enacted = game.handle_chancellor_choice(0).unwrap();
    assert_eq!(enacted.policy, Policy::Liberal);
    assert_eq!(enacted.power, None);
    assert_eq!(game.board.liberal_track, 1);
    assert_eq!(game.state.last_discarded, Some(Policy::Communist));
    assert_eq!(game.board.deck.discard_count(), 2);

    game.end_legislative_session().unwrap();
    assert_eq!(game.state.phase, Phase::Election);
    assert_eq!(game.state.term_limited_players, vec![1]);
    assert_eq!(game.state.previous_government, Some(Government { president: 0, chancellor: 1 }));
    assert_eq!(game.state.president_candidate, Some(1));
    assert_eq!(game.state.chancellor, None);
}

#[test]
fn test_rejected_veto_leaves_the_hand() {
    let mut game = in_session(ScriptedActor::default());
    game.board.veto_available = true;
    game.draw_presidential_policies().unwrap();
    game.handle_presidential_choice(1).unwrap();

    let veto = game.handle_veto_decision(false).unwrap();
    assert!(!veto.accepted);
    assert_eq!(game.state.chancellor_policies, Some(vec![Policy::Fascist, Policy::Communist]));
    assert_eq!(game.state.phase, Phase::Legislative);
}

#[test]
fn test_accepted_veto_discards_hand_and_moves_tracker() {
    let mut game = in_session(ScriptedActor::default());
    game.board.veto_available = true;
    game.draw_presidential_policies().unwrap();
    game.handle_presidential_choice(1).unwrap();

    let veto = game.handle_veto_decision(true).unwrap();
    assert!(veto.accepted);
    assert_eq!(veto.election_tracker, 1);
    assert_eq!(veto.chaos, None);
    assert_eq!(game.board.deck.discard_count(), 3);
    assert_eq!(game.state.phase, Phase::Election);
    assert_eq!(game.state.president_candidate, Some(1));
}

#[test]
fn test_accepted_veto_can_cause_chaos() {
    let mut game = in_session(ScriptedActor::default());
    game.board.veto_available = true;
    game.state.election_tracker = 2;
    game.draw_presidential_policies().unwrap();
    game.handle_presidential_choice(0).unwrap();

    let veto = game.handle_veto_decision(true).unwrap();
    assert_eq!(veto.chaos.unwrap().policy, Policy::Liberal);
    assert_eq!(veto.election_tracker, 0);
    assert_eq!(game.board.liberal_track, 1);
    assert!(game.state.term_limited_players.is_empty());
    assert_eq!(game.state.phase, Phase::Election);
}

#[test]
fn test_veto_requires_five_fascist_policies() {
    let mut game = in_session(ScriptedActor { veto: true, ..Default::default() });
    game.draw_presidential_policies().unwrap();
    game.handle_presidential_choice(0).unwrap();
    assert!(!game.check_veto_proposal().unwrap());
    assert_eq!(game.handle_veto_decision(true).err(), Some(GameError::InvalidAction));
}

#[test]
fn test_short_deck_is_an_error() {
    let mut game = in_session(ScriptedActor::default());
    game.board.deck = Deck::new(vec![Policy::Liberal]);
    assert_eq!(game.draw_presidential_policies().err(), Some(GameError::InvalidCard));
}

#[test]
fn test_full_legislative_cycle() {
    let script = ScriptedActor { discard: 1, enact: 1, ..Default::default() };
    let mut game = in_session(script);

    let session = game.run_full_legislative_cycle().unwrap();
    assert_eq!(session.discarded, Policy::Liberal);
    assert_eq!(session.chancellor_policies, vec![Policy::Fascist, Policy::Communist]);
    assert_eq!(session.enacted.unwrap().policy, Policy::Communist);
    assert_eq!(game.board.communist_track, 1);
    assert_eq!(game.state.phase, Phase::Election);
    assert_eq!(game.state.round_number, 1);
}

#[test]
fn test_full_legislative_cycle_uses_granted_power() {
    let script = ScriptedActor { discard: 1, enact: 1, ..Default::default() };
    let mut game = in_session(script);

    // The first communist policy at six players grants bugging
    let session = game.run_full_legislative_cycle().unwrap();
    let power = session.power.unwrap();
    assert_eq!(power.power, ExecutivePower::Bugging);
    assert!(power.outcome.is_some());
}

#[test]
fn test_full_legislative_cycle_with_veto() {
    let script = ScriptedActor { veto: true, accept_veto: true, ..Default::default() };
    let mut game = in_session(script);
    game.board.veto_available = true;

    let session = game.run_full_legislative_cycle().unwrap();
    assert!(session.veto.unwrap().accepted);
    assert_eq!(session.enacted, None);
    assert_eq!(game.state.election_tracker, 1);
    assert_eq!(game.board.liberal_track, 0);
}
