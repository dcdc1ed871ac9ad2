//! Every executive power, used through the public dispatch

use super::test_utils::*;
use crate::error::GameError;
use crate::game::deck::Deck;
use crate::game::executive_power::{ExecutivePower, PowerOutcome, PowerOwner};
use crate::game::party::Party;
use crate::game::policy::Policy;
use crate::game::role::Role;
use crate::game::strategy::StrategyKind;
use crate::game::{Game, GameOptions, Winner};

/// A ten player game in its first legislative session, with a liberal president and chancellor.
fn with_government(script: ScriptedActor) -> (Game, usize, usize) {
    let mut game = create_scripted_game(10, GameOptions::default(), script);
    let liberals = players_with_role(&game, Role::Liberal);
    let (president, chancellor) = (liberals[0], liberals[1]);
    elect(&mut game, president, chancellor);
    (game, president, chancellor)
}

#[test]
fn test_powers_belong_to_their_owner() {
    assert_eq!(ExecutivePower::Execution.owner(), PowerOwner::President);
    assert_eq!(ExecutivePower::Pardon.owner(), PowerOwner::President);
    assert_eq!(ExecutivePower::ChancellorExecution.owner(), PowerOwner::Chancellor);
    assert_eq!(ExecutivePower::VoteOfNoConfidence.owner(), PowerOwner::Chancellor);

    let (mut game, _, _) = with_government(ScriptedActor::default());
    assert_eq!(
        game.execute_presidential_power(ExecutivePower::VoteOfNoConfidence, None).err(),
        Some(GameError::InvalidAction)
    );
    assert_eq!(
        game.execute_chancellor_power(ExecutivePower::Execution, None).err(),
        Some(GameError::InvalidAction)
    );
}

#[test]
fn test_powers_need_a_government() {
    let mut game = create_test_game(10, GameOptions::default(), 3);
    assert_eq!(game.execute_power(ExecutivePower::Confession).err(), Some(GameError::InvalidAction));
}

#[test]
fn test_target_must_be_eligible() {
    let (mut game, president, _) = with_government(ScriptedActor::default());
    let result = game.execute_presidential_power(ExecutivePower::InvestigateLoyalty, Some(president));
    assert_eq!(result.err(), Some(GameError::InvalidPlayerChoice));
}

#[test]
fn test_investigate_loyalty() {
    let (mut game, president, _) = with_government(ScriptedActor::default());
    let hitler = find_role(&game, Role::Hitler);
    let outcome = game.execute_presidential_power(ExecutivePower::InvestigateLoyalty, Some(hitler)).unwrap();

    assert_eq!(outcome, Some(PowerOutcome::Investigated { target: hitler, party: Party::Fascist }));
    assert!(game.state.investigated_players.contains(&hitler));
    assert_eq!(game.state.players[president].knowledge.inspected(hitler), Some(Party::Fascist));
}

#[test]
fn test_special_election() {
    let (mut game, president, _) = with_government(ScriptedActor::default());
    let target = other_than(&game, &[president]);
    game.execute_power(ExecutivePower::SpecialElection).unwrap();
    assert_eq!(game.state.special_president, Some(target));

    game.end_legislative_session().unwrap();
    assert_eq!(game.state.president_candidate, Some(target));

    // After the special president's term the rotation resumes after the caller
    game.state.president = Some(target);
    game.advance_turn();
    let caller_index = game.state.active_players.iter().position(|p| *p == president).unwrap();
    let expected = game.state.active_players[(caller_index + 1) % 10];
    assert_eq!(game.state.president_candidate, Some(expected));
}

#[test]
fn test_policy_peek_does_not_draw() {
    let (mut game, president, _) = with_government(ScriptedActor::default());
    game.board.deck = Deck::new(vec![Policy::Communist, Policy::Liberal, Policy::Fascist, Policy::Fascist]);
    let outcome = game.execute_power(ExecutivePower::PolicyPeek).unwrap();

    let seen = vec![Policy::Communist, Policy::Liberal, Policy::Fascist];
    assert_eq!(outcome, Some(PowerOutcome::Peeked { policies: seen.clone() }));
    assert_eq!(game.state.players[president].knowledge.peeked_policies, seen);
    assert_eq!(game.board.deck.count(), 4);
}

#[test]
fn test_chancellor_policy_peek() {
    let (mut game, _, chancellor) = with_government(ScriptedActor::default());
    game.execute_power(ExecutivePower::ChancellorPolicyPeek).unwrap();
    assert_eq!(game.state.players[chancellor].knowledge.peeked_policies.len(), 3);
}

#[test]
fn test_execution() {
    let (mut game, president, chancellor) = with_government(ScriptedActor::default());
    let victim = players_with_role(&game, Role::Liberal)[2];
    let outcome = game.execute_presidential_power(ExecutivePower::Execution, Some(victim)).unwrap();

    assert_eq!(outcome, Some(PowerOutcome::Executed { target: victim, was_hitler: false }));
    assert!(game.state.players[victim].is_dead);
    assert!(!game.state.is_active(victim));
    assert!(!game.game_over());
    assert_eq!((game.state.president, game.state.chancellor), (Some(president), Some(chancellor)));
}

#[test]
fn test_executing_hitler_wins_for_liberals_and_communists() {
    let (mut game, _, _) = with_government(ScriptedActor::default());
    let hitler = find_role(&game, Role::Hitler);
    game.execute_chancellor_power(ExecutivePower::ChancellorExecution, Some(hitler)).unwrap();
    assert_eq!(game.winner(), Some(Winner::LiberalAndCommunist));
    assert_eq!(game.execute_power(ExecutivePower::Confession).err(), Some(GameError::GameOver));
}

#[test]
fn test_executing_hitler_without_communists() {
    let opts = GameOptions { communists: false, ..Default::default() };
    let mut game = create_scripted_game(10, opts, ScriptedActor::default());
    let liberals = players_with_role(&game, Role::Liberal);
    elect(&mut game, liberals[0], liberals[1]);
    let hitler = find_role(&game, Role::Hitler);
    game.execute_presidential_power(ExecutivePower::ExecutionEmergency, Some(hitler)).unwrap();
    assert_eq!(game.winner(), Some(Winner::Liberal));
}

#[test]
fn test_confession() {
    let (mut game, president, _) = with_government(ScriptedActor::default());
    let outcome = game.execute_power(ExecutivePower::Confession).unwrap();
    assert_eq!(outcome, Some(PowerOutcome::Confessed { player: president, party: Party::Liberal }));
    assert_eq!(game.state.revealed_affiliations.get(&president), Some(&Party::Liberal));
}

#[test]
fn test_bugging_informs_every_communist() {
    let (mut game, _, _) = with_government(ScriptedActor::default());
    let hitler = find_role(&game, Role::Hitler);
    game.execute_presidential_power(ExecutivePower::Bugging, Some(hitler)).unwrap();
    for id in players_with_role(&game, Role::Communist) {
        assert_eq!(game.state.players[id].knowledge.affiliation(hitler), Some(Party::Fascist));
    }
}

#[test]
fn test_five_year_plan() {
    let (mut game, _, _) = with_government(ScriptedActor::default());
    let before = game.board.deck.count();
    game.execute_power(ExecutivePower::FiveYearPlan).unwrap();
    assert_eq!(game.board.deck.count(), before + 3);
}

#[test]
fn test_congress_reveals_communists_to_each_other() {
    let mut game = create_scripted_game(12, GameOptions::default(), ScriptedActor::default());
    let liberals = players_with_role(&game, Role::Liberal);
    elect(&mut game, liberals[0], liberals[1]);
    let communists = players_with_role(&game, Role::Communist);
    assert!(game.state.players[communists[0]].knowledge.known_communists.is_empty());

    game.execute_power(ExecutivePower::Congress).unwrap();
    assert_eq!(game.state.players[communists[0]].knowledge.known_communists, vec![communists[1]]);
}

#[test]
fn test_radicalization_converts_and_changes_strategy() {
    let (mut game, _, _) = with_government(ScriptedActor::default());
    let liberal = players_with_role(&game, Role::Liberal)[3];
    game.set_actor(liberal, Box::new(crate::game::actor::AiPlayer::new(StrategyKind::Liberal))).unwrap();

    let outcome = game.execute_presidential_power(ExecutivePower::Radicalization, Some(liberal)).unwrap();
    assert_eq!(outcome, Some(PowerOutcome::Radicalized { target: liberal, converted: true }));
    assert_eq!(game.state.players[liberal].role, Role::Communist);
    assert_eq!(game.strategy_of(liberal), Some(StrategyKind::Communist));
}

#[test]
fn test_radicalization_fails_on_hitler() {
    let (mut game, _, _) = with_government(ScriptedActor::default());
    let hitler = find_role(&game, Role::Hitler);
    let outcome = game.execute_presidential_power(ExecutivePower::Radicalization, Some(hitler)).unwrap();
    assert_eq!(outcome, Some(PowerOutcome::Radicalized { target: hitler, converted: false }));
    assert_eq!(game.state.players[hitler].role, Role::Hitler);
}

#[test]
fn test_propaganda_discards_top_card() {
    let (mut game, _, _) = with_government(ScriptedActor { propaganda: true, ..Default::default() });
    game.board.deck = Deck::new(vec![Policy::Fascist, Policy::Liberal]);
    let outcome = game.execute_power(ExecutivePower::Propaganda).unwrap();
    assert_eq!(outcome, Some(PowerOutcome::Propaganda { policy: Policy::Fascist, discarded: true }));
    assert_eq!(game.board.deck.cards(), &[Policy::Liberal]);
    assert_eq!(game.board.deck.discards(), &[Policy::Fascist]);
}

#[test]
fn test_propaganda_can_keep_top_card() {
    let (mut game, _, _) = with_government(ScriptedActor::default());
    game.board.deck = Deck::new(vec![Policy::Fascist, Policy::Liberal]);
    game.execute_power(ExecutivePower::ChancellorPropaganda).unwrap();
    assert_eq!(game.board.deck.count(), 2);
}

#[test]
fn test_impeachment_reveals_chancellor_party() {
    let (mut game, president, chancellor) = with_government(ScriptedActor::default());
    let revealer = find_role(&game, Role::Hitler);
    let outcome = game.execute_presidential_power(ExecutivePower::Impeachment, Some(revealer)).unwrap();
    assert_eq!(outcome, Some(PowerOutcome::Impeached { target: chancellor, revealer }));
    assert_eq!(game.state.players[revealer].knowledge.affiliation(chancellor), Some(Party::Liberal));

    let result = game.execute_chancellor_power(ExecutivePower::ChancellorImpeachment, Some(president));
    assert_eq!(result.err(), Some(GameError::InvalidPlayerChoice));
}

#[test]
fn test_mark_and_pardon() {
    let (mut game, _, _) = with_government(ScriptedActor { pardon: true, ..Default::default() });
    assert_eq!(game.execute_power(ExecutivePower::Pardon).unwrap(), None);

    let target = find_role(&game, Role::Hitler);
    game.board.fascist_track = 2;
    let outcome = game.execute_presidential_power(ExecutivePower::MarkedForExecution, Some(target)).unwrap();
    assert_eq!(outcome, Some(PowerOutcome::Marked { target, tracker: 2 }));
    assert_eq!(game.state.marked_for_execution, Some(target));

    let outcome = game.execute_power(ExecutivePower::Pardon).unwrap();
    assert_eq!(outcome, Some(PowerOutcome::Pardoned { target }));
    assert_eq!(game.state.marked_for_execution, None);
    assert_eq!(game.state.marked_for_execution_tracker, None);
}

#[test]
fn test_vote_of_no_confidence_enacts_last_discard() {
    let (mut game, _, _) = with_government(ScriptedActor { no_confidence: true, ..Default::default() });
    game.board.deck.discard([Policy::Liberal]);
    game.state.last_discarded = Some(Policy::Liberal);

    let outcome = game.execute_power(ExecutivePower::VoteOfNoConfidence).unwrap();
    assert_eq!(outcome, Some(PowerOutcome::NoConfidence { policy: Policy::Liberal }));
    assert_eq!(game.board.liberal_track, 1);
    assert_eq!(game.state.last_discarded, None);
    assert!(game.board.deck.discards().is_empty());
}

#[test]
fn test_vote_of_no_confidence_can_be_declined() {
    let (mut game, _, _) = with_government(ScriptedActor::default());
    game.board.deck.discard([Policy::Fascist]);
    game.state.last_discarded = Some(Policy::Fascist);
    assert_eq!(game.execute_power(ExecutivePower::VoteOfNoConfidence).unwrap(), None);
    assert_eq!(game.board.fascist_track, 0);
}
