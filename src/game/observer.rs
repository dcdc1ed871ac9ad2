use super::executive_power::{ExecutivePower, PowerOutcome};
use super::player::PlayerId;
use super::policy::Policy;
use super::state::{GameState, Oktoberfest};
use super::Outcome;

/// Receives notifications about what happens in a game.
///
/// Hooks are fire-and-forget; the game never depends on what an observer does with them.
pub trait GameObserver: Send {
    fn log_setup(&mut self, _state: &GameState) {}
    fn log_election(&mut self, _state: &GameState, _passed: bool) {}
    fn log_chaos(&mut self, _policy: Policy) {}
    /// A president or chancellor discarded a policy from their hand.
    fn log_policy_selection(&mut self, _player: PlayerId, _hand: &[Policy], _discarded: Policy) {}
    fn log_policy_enacted(&mut self, _state: &GameState, _policy: Policy, _power: Option<ExecutivePower>) {}
    fn log_power_used(&mut self, _player: PlayerId, _power: ExecutivePower, _outcome: Option<&PowerOutcome>) {}
    fn log_player_death(&mut self, _state: &GameState, _player: PlayerId) {}
    fn log_month_change(&mut self, _state: &GameState, _oktoberfest: Option<Oktoberfest>) {}
    fn log_game_end(&mut self, _state: &GameState, _outcome: Outcome) {}
}

/// Discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}

/// Forwards notifications to the `log` crate.
#[derive(Clone, Debug, Default)]
pub struct LogObserver {
    /// Prefixed to every message, usually the game id.
    pub tag: String,
}

impl LogObserver {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    fn name<'a>(state: &'a GameState, id: PlayerId) -> &'a str {
        state.players.get(id).map(|p| p.name.as_str()).unwrap_or("?")
    }
}

impl GameObserver for LogObserver {
    fn log_setup(&mut self, state: &GameState) {
        log::info!("[{}] Game started with {} players", self.tag, state.players.len());
        for player in &state.players {
            log::debug!("[{}] {} is {}", self.tag, player.name, player.role);
        }
    }

    fn log_election(&mut self, state: &GameState, passed: bool) {
        let (Some(president), Some(chancellor)) = (state.president_candidate, state.chancellor_candidate) else {
            return;
        };
        let ja = state.last_votes.iter().filter(|(_, vote)| *vote).count();
        log::info!(
            "[{}] Election of {} and {} {} ({} ja, {} nein), tracker at {}",
            self.tag,
            Self::name(state, president),
            Self::name(state, chancellor),
            if passed { "passed" } else { "failed" },
            ja,
            state.last_votes.len() - ja,
            state.election_tracker,
        );
    }

    fn log_chaos(&mut self, policy: Policy) {
        log::info!("[{}] Chaos! The top policy ({}) was enacted", self.tag, policy);
    }

    fn log_policy_selection(&mut self, player: PlayerId, hand: &[Policy], discarded: Policy) {
        log::debug!("[{}] Player {} held {:?} and discarded {}", self.tag, player, hand, discarded);
    }

    fn log_policy_enacted(&mut self, state: &GameState, policy: Policy, power: Option<ExecutivePower>) {
        match power {
            Some(power) => log::info!("[{}] A {} policy was enacted, granting {}", self.tag, policy, power),
            None => log::info!("[{}] A {} policy was enacted", self.tag, policy),
        }
        if let Some(record) = state.policy_history.last() {
            log::debug!(
                "[{}] Tracks: liberal {}, fascist {}, communist {}",
                self.tag,
                record.liberal_track,
                record.fascist_track,
                record.communist_track
            );
        }
    }

    fn log_power_used(&mut self, player: PlayerId, power: ExecutivePower, outcome: Option<&PowerOutcome>) {
        match outcome {
            Some(outcome) => log::info!("[{}] Player {} used {}: {:?}", self.tag, player, power, outcome),
            None => log::info!("[{}] Player {} could not use {}", self.tag, player, power),
        }
    }

    fn log_player_death(&mut self, state: &GameState, player: PlayerId) {
        log::info!("[{}] {} was executed", self.tag, Self::name(state, player));
    }

    fn log_month_change(&mut self, state: &GameState, oktoberfest: Option<Oktoberfest>) {
        log::debug!("[{}] It is now {}", self.tag, state.month_name());
        match oktoberfest {
            Some(Oktoberfest::Started) => log::info!("[{}] Oktoberfest has begun", self.tag),
            Some(Oktoberfest::Ended) => log::info!("[{}] Oktoberfest is over", self.tag),
            None => {}
        }
    }

    fn log_game_end(&mut self, state: &GameState, outcome: Outcome) {
        log::info!("[{}] Game over: {} win ({:?})", self.tag, outcome.winner, outcome.condition);
        for player in &state.players {
            log::info!(
                "[{}] {} was {}{}",
                self.tag,
                player.name,
                player.role,
                if player.is_dead { " (dead)" } else { "" }
            );
        }
    }
}
