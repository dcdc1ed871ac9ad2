use crate::error::GameError;
use crate::game::{Game, GameOptions};
use crate::time::iso8601;
use dashmap::{mapref::entry::Entry, DashMap};
use rand::Rng;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime};

/// How long a session may sit untouched before it is purged.
const SESSION_TIMEOUT: Duration = Duration::from_secs(3600);

/// Keeps track of every running game, keyed by a short random id.
///
/// Each game sits behind its own lock, so operations on one game are serialized
/// while different games proceed independently.
#[derive(Default)]
pub struct SessionManager {
    sessions: DashMap<String, SessionHandle>,
    archive: Mutex<Vec<Value>>,
}

/// A single game session.
pub struct Session {
    /// The game ID.
    id: String,
    /// The game itself.
    game: Game,
    /// Timestamp that the game was created.
    started_ts: SystemTime,
    /// Timestamp of the last time this session was interacted with.
    last_ts: Instant,
    /// Whether this game has been archived.
    archived: bool,
}

pub type SessionHandle = Arc<Mutex<Session>>;

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game under a fresh id.
    pub fn create_game(&self, options: GameOptions, names: &[String], seed: u64) -> Result<SessionHandle, GameError> {
        let game = Game::new(options, names, seed)?;
        loop {
            let Entry::Vacant(entry) = self.sessions.entry(Self::random_id()) else {
                continue;
            };
            log::info!("Created game {} with {} players", entry.key(), game.num_players());
            let session = Arc::new(Mutex::new(Session::new(entry.key().clone(), game)));
            entry.insert(session.clone());
            break Ok(session);
        }
    }

    pub fn find_game(&self, game_id: &str) -> Result<SessionHandle, GameError> {
        self.sessions
            .get(game_id)
            .map(|session| session.clone())
            .ok_or(GameError::GameNotFound)
    }

    pub fn num_games(&self) -> usize {
        self.sessions.len()
    }

    /// Removes the session and returns its archive record; the game must be over.
    pub fn end_game(&self, game_id: &str) -> Result<Value, GameError> {
        let session = self.find_game(game_id)?;
        let record = {
            let Ok(mut session) = session.lock() else {
                log::error!("Found poisoned session: {}", game_id);
                self.sessions.remove(game_id);
                return Err(GameError::GameNotFound);
            };
            if !session.game.game_over() {
                return Err(GameError::InvalidAction);
            }
            session.archive_record()
        };
        self.store_archive(&record);
        self.sessions.remove(game_id);
        Ok(record)
    }

    /// Archive records of every finished game seen so far.
    pub fn archived_games(&self) -> Vec<Value> {
        match self.archive.lock() {
            Ok(archive) => archive.clone(),
            Err(_) => vec![],
        }
    }

    /// Drops sessions that have expired, archiving any that finished.
    pub fn purge_games(&self) {
        self.purge_older_than(SESSION_TIMEOUT);
    }

    pub(crate) fn purge_older_than(&self, timeout: Duration) {
        let mut ids_to_delete = vec![];

        // Find expired sessions
        for session in self.sessions.iter() {
            let game_id = session.key();
            let Ok(mut session) = session.lock() else {
                log::error!("Found poisoned session: {}", game_id);
                ids_to_delete.push(game_id.clone());
                continue;
            };
            if Instant::now().duration_since(session.last_ts) > timeout {
                if session.game.game_over() && !session.archived {
                    let record = session.archive_record();
                    self.store_archive(&record);
                }
                ids_to_delete.push(game_id.clone());
            }
        }

        for game_id in ids_to_delete.into_iter() {
            log::debug!("Purging game {}", game_id);
            self.sessions.remove(&game_id);
        }
    }

    fn store_archive(&self, record: &Value) {
        match self.archive.lock() {
            Ok(mut archive) => archive.push(record.clone()),
            Err(_) => log::error!("Archive lock poisoned, dropping record"),
        }
    }

    fn random_id() -> String {
        let mut rng = rand::thread_rng();
        (0..4)
            .map(|_| match rng.gen_range('A'..='Z') {
                // Avoid U and V because the "hitler font" can't distinguish them
                'U' => 'A',
                'V' => 'B',
                other => other,
            })
            .collect()
    }
}

impl Session {
    fn new(id: String, game: Game) -> Self {
        Self {
            id,
            game,
            started_ts: SystemTime::now(),
            last_ts: Instant::now(),
            archived: false,
        }
    }

    /// Gets the unique game ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Performs an action on the game.
    pub fn mutate_game<F, T>(&mut self, mutation: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Game) -> Result<T, GameError>,
    {
        let result = mutation(&mut self.game)?;
        self.heartbeat();
        Ok(result)
    }

    /// Keeps the game session alive.
    pub fn heartbeat(&mut self) {
        self.last_ts = Instant::now();
    }

    fn archive_record(&mut self) -> Value {
        self.archived = true;
        json!({
            "game_id": self.id,
            "players": self.game.player_names().collect::<Value>(),
            "started": iso8601(self.started_ts),
            "finished": iso8601(SystemTime::now()),
            "outcome": self.game.get_outcome_json()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names() -> Vec<String> {
        ["Ann", "Bea", "Cal", "Dee", "Eve", "Fay", "Gus"].iter().map(|n| n.to_string()).collect()
    }

    fn finished_game(manager: &SessionManager) -> String {
        let handle = manager.create_game(GameOptions::default(), &names(), 3).unwrap();
        let mut session = handle.lock().unwrap();
        session.mutate_game(|game| game.start_game()).unwrap();
        session.id().to_string()
    }

    #[test]
    fn creates_and_finds_games() {
        let manager = SessionManager::new();
        let handle = manager.create_game(GameOptions::default(), &names(), 1).unwrap();
        let id = handle.lock().unwrap().id().to_string();
        assert_eq!(id.len(), 4);
        assert!(id.chars().all(|c| c.is_ascii_uppercase() && c != 'U' && c != 'V'));
        assert_eq!(manager.num_games(), 1);
        assert!(manager.find_game(&id).is_ok());
        assert_eq!(manager.find_game("ZZZZZ").err(), Some(GameError::GameNotFound));
    }

    #[test]
    fn rejects_bad_player_counts() {
        let manager = SessionManager::new();
        let result = manager.create_game(GameOptions::default(), &names()[..5], 1);
        assert_eq!(result.err(), Some(GameError::InvalidPlayerCount(5)));
        assert_eq!(manager.num_games(), 0);
    }

    #[test]
    fn only_finished_games_can_be_ended() {
        let manager = SessionManager::new();
        let handle = manager.create_game(GameOptions::default(), &names(), 1).unwrap();
        let id = handle.lock().unwrap().id().to_string();
        assert_eq!(manager.end_game(&id).err(), Some(GameError::InvalidAction));

        let id = finished_game(&manager);
        let record = manager.end_game(&id).unwrap();
        assert_eq!(record["game_id"], id.as_str());
        assert_eq!(record["outcome"]["finished"], true);
        assert_eq!(record["players"][0], "Ann");
        assert_eq!(manager.archived_games().len(), 1);
        assert!(manager.find_game(&id).is_err());
    }

    #[test]
    fn purge_archives_finished_games() {
        let manager = SessionManager::new();
        manager.create_game(GameOptions::default(), &names(), 1).unwrap();
        finished_game(&manager);
        assert_eq!(manager.num_games(), 2);

        manager.purge_games();
        assert_eq!(manager.num_games(), 2);

        std::thread::sleep(Duration::from_millis(5));
        manager.purge_older_than(Duration::ZERO);
        assert_eq!(manager.num_games(), 0);
        assert_eq!(manager.archived_games().len(), 1);
    }
}
