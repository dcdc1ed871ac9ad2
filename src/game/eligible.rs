use super::player::PlayerId;
use super::state::GameState;

/// Builds the pool of players that may be chosen for an action, preserving seating order.
pub struct EligiblePlayersBuilder<'a> {
    state: &'a GameState,
    eligible: Vec<PlayerId>,
}

impl GameState {
    /// Starts from every living player still in the rotation.
    pub fn eligible_players(&self) -> EligiblePlayersBuilder<'_> {
        EligiblePlayersBuilder {
            state: self,
            eligible: self
                .active_players
                .iter()
                .copied()
                .filter(|id| self.players.get(*id).map(|p| !p.is_dead).unwrap_or(false))
                .collect(),
        }
    }
}

impl<'a> EligiblePlayersBuilder<'a> {
    pub fn exclude(mut self, player: PlayerId) -> Self {
        self.eligible.retain(|id| *id != player);
        self
    }

    pub fn exclude_opt(self, player: Option<PlayerId>) -> Self {
        match player {
            Some(player) => self.exclude(player),
            None => self,
        }
    }

    pub fn not_term_limited(mut self) -> Self {
        let limited = &self.state.term_limited_players;
        self.eligible.retain(|id| !limited.contains(id));
        self
    }

    pub fn make(self) -> Vec<PlayerId> {
        self.eligible
    }
}
