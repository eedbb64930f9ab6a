use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::action::GameId;
use crate::sheet::ScoreSheet;

pub const FIRST_ROUND: u8 = 1;
pub const MAX_ROUNDS: u8 = 10;

/// Frozen per-player totals of an ended game.
pub type GameSummary = BTreeMap<String, i64>;

/// Member of the shared roster. The name is the identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// One game being played, or already played, by the roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub scores: BTreeMap<String, ScoreSheet>,
    /// Index into the global roster of the player whose turn it is.
    pub current_player_index: usize,
    /// Advisory round counter, capped at [`MAX_ROUNDS`].
    pub current_round: u8,
}

impl Game {
    pub fn new(id: GameId, players: &[Player]) -> Self {
        Self {
            id,
            scores: players
                .iter()
                .map(|player| (player.name.clone(), ScoreSheet::new()))
                .collect(),
            current_player_index: 0,
            current_round: FIRST_ROUND,
        }
    }

    pub fn sheet(&self, player: &str) -> Option<&ScoreSheet> {
        self.scores.get(player)
    }

    pub fn has_player(&self, player: &str) -> bool {
        self.scores.contains_key(player)
    }

    /// Players with a sheet in this game, in roster order first, then any
    /// whose roster entry has since been removed.
    pub fn participants<'a>(&'a self, roster: &'a [Player]) -> Vec<&'a str> {
        let mut names: Vec<&str> = roster
            .iter()
            .map(|player| player.name.as_str())
            .filter(|name| self.has_player(name))
            .collect();
        for name in self.scores.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }
        names
    }

    pub fn summarize(&self) -> GameSummary {
        self.scores
            .iter()
            .map(|(name, sheet)| (name.clone(), sheet.recorded_total()))
            .collect()
    }

    /// Whether every participant has filled every box.
    pub fn all_sheets_complete(&self) -> bool {
        self.scores.values().all(ScoreSheet::is_complete)
    }
}

/// Root of everything the tracker knows. Hosts persist it as one blob.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    /// Games in creation order.
    pub games: Vec<Game>,
    pub current_game_id: Option<GameId>,
    pub game_summaries: BTreeMap<GameId, GameSummary>,
    /// Highest id ever handed out, so deleted ids stay retired.
    pub last_game_id: GameId,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_player(&self, name: &str) -> bool {
        self.players.iter().any(|player| player.name == name)
    }

    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    pub(crate) fn game_mut(&mut self, id: GameId) -> Option<&mut Game> {
        self.games.iter_mut().find(|game| game.id == id)
    }

    pub fn current_game(&self) -> Option<&Game> {
        self.current_game_id.and_then(|id| self.game(id))
    }

    /// Roster entry whose turn it is in `game`.
    pub fn current_player(&self, game: &Game) -> Option<&Player> {
        self.players.get(game.current_player_index)
    }

    pub fn summary(&self, id: GameId) -> Option<&GameSummary> {
        self.game_summaries.get(&id)
    }

    pub fn is_finished(&self, id: GameId) -> bool {
        self.game_summaries.contains_key(&id)
    }

    /// Id the next started game will receive.
    pub fn next_game_id(&self) -> GameId {
        let highest_open = self.games.iter().map(|game| game.id).max().unwrap_or(0);
        highest_open.max(self.last_game_id) + 1
    }

    /// Most recently created game still present.
    pub fn latest_game_id(&self) -> Option<GameId> {
        self.games.last().map(|game| game.id)
    }
}
