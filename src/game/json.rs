use super::party::Party;
use super::player::PlayerId;
use super::Game;
use serde_json::{json, Value};

impl Game {
    /// The public state of the board, as shown to every player.
    pub fn get_board_json(&self) -> Value {
        let state = &self.state;
        let board = &self.board;
        json!({
            "players": self.get_players_json(None),
            "phase": state.phase.to_string(),
            "round": state.round_number,
            "month": state.month_name(),
            "oktoberfest": state.oktoberfest_active,
            "electionTracker": state.election_tracker,
            "numLiberalCards": board.liberal_track,
            "numFascistCards": board.fascist_track,
            "numCommunistCards": board.communist_track,
            "liberalTrackSize": board.liberal_track_size,
            "fascistTrackSize": board.fascist_track_size,
            "communistTrackSize": board.communist_track_size,
            "drawPile": board.deck.count(),
            "discardPile": board.deck.discard_count(),
            "vetoAvailable": board.veto_available,
            "president": state.president,
            "chancellor": state.chancellor,
            "presidentElect": state.president_candidate,
            "chancellorElect": state.chancellor_candidate,
            "lastPresident": state.previous_government.map(|g| g.president as i32).unwrap_or(-1),
            "lastChancellor": state.previous_government.map(|g| g.chancellor as i32).unwrap_or(-1),
            "markedForExecution": state.marked_for_execution,
            "votes": state.last_votes,
            "outcome": self.get_outcome_json(),
        })
    }

    /// The state of the game from one player's point of view.
    pub fn get_player_json(&self, player: PlayerId) -> Option<Value> {
        let me = self.state.players.get(player)?;
        Some(json!({
            "id": me.id,
            "name": me.name,
            "role": me.role.to_string(),
            "isDead": me.is_dead,
            "isBot": self.is_bot(player),
            "hand": self.hand_of(player),
            "peekedPolicies": me.knowledge.peeked_policies,
            "players": self.get_players_json(Some(player)),
        }))
    }

    /// Every player, with roles and parties filled in only where `viewer` is entitled to them.
    pub fn get_players_json(&self, viewer: Option<PlayerId>) -> Value {
        self.state
            .players
            .iter()
            .map(|player| {
                let (role, party) = match viewer {
                    Some(viewer) => (
                        self.can_view_role(viewer, player.id).then_some(player.role),
                        self.known_party(viewer, player.id),
                    ),
                    None if self.state.game_over() => (Some(player.role), Some(player.party())),
                    None => (None, self.state.revealed_affiliations.get(&player.id).copied()),
                };
                json!({
                    "id": player.id,
                    "name": player.name,
                    "isDead": player.is_dead,
                    "isConfirmedNotHitler": player.confirmed_not_hitler,
                    "hasBeenInvestigated": self.state.investigated_players.contains(&player.id),
                    "role": role,
                    "party": party,
                })
            })
            .collect()
    }

    /// Whether `viewer` knows the exact role of `other`.
    pub fn can_view_role(&self, viewer: PlayerId, other: PlayerId) -> bool {
        if viewer == other || self.state.game_over() {
            return true;
        }
        let Some(knowledge) = self.state.players.get(viewer).map(|p| &p.knowledge) else {
            return false;
        };
        knowledge.hitler == Some(other) || knowledge.fascists.contains(&other) || knowledge.known_communists.contains(&other)
    }

    pub fn get_outcome_json(&self) -> Value {
        let Some(outcome) = self.state.outcome else {
            return json!({ "finished": false });
        };
        json!({
            "finished": true,
            "outcome": outcome.winner.to_string(),
            "condition": outcome.condition,
        })
    }

    fn known_party(&self, viewer: PlayerId, other: PlayerId) -> Option<Party> {
        if self.can_view_role(viewer, other) {
            return self.state.players.get(other).map(|p| p.party());
        }
        let knowledge = &self.state.players.get(viewer)?.knowledge;
        knowledge
            .inspected(other)
            .or_else(|| knowledge.affiliation(other))
            .or_else(|| self.state.revealed_affiliations.get(&other).copied())
    }

    /// The cards `player` is currently holding.
    fn hand_of(&self, player: PlayerId) -> Value {
        if self.state.president == Some(player) {
            if let Some(hand) = &self.state.presidential_policies {
                return json!(hand);
            }
        }
        if self.state.chancellor == Some(player) {
            if let Some(hand) = &self.state.chancellor_policies {
                return json!(hand);
            }
        }
        Value::Null
    }
}
