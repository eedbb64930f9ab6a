use crate::action::{Action, GameId};
use crate::category::{Category, Rules, YAHTZEE_SCORE};
use crate::error::{Rejection, TrackerError};
use crate::state::{Game, GameState, MAX_ROUNDS, Player};

/// Domain checks performed inside a transition.
///
/// The lenient policy records whatever it is given, the way a paper scorecard
/// would; the strict policy is the default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enforcement {
    /// Only the player holding the turn may score.
    pub turn_order: bool,
    /// Scores must pass the rule table, and a bonus needs a Yahtzee of 50.
    pub score_legality: bool,
    /// A filled box may be written again (last write wins).
    pub allow_overwrite: bool,
    /// Ended games reject further turn, round and score changes.
    pub freeze_finished: bool,
}

impl Enforcement {
    pub fn strict() -> Self {
        Self {
            turn_order: true,
            score_legality: true,
            allow_overwrite: false,
            freeze_finished: true,
        }
    }

    pub fn lenient() -> Self {
        Self {
            turn_order: false,
            score_legality: false,
            allow_overwrite: true,
            freeze_finished: false,
        }
    }
}

impl Default for Enforcement {
    fn default() -> Self {
        Self::strict()
    }
}

/// Configuration of a tracker instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackerConfig {
    pub rules: Rules,
    pub enforcement: Enforcement,
}

/// Builder for trackers with non-default rules or policy.
#[derive(Clone, Debug, Default)]
pub struct TrackerBuilder {
    config: TrackerConfig,
}

impl TrackerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: Rules) -> Self {
        self.config.rules = rules;
        self
    }

    /// Override the ceiling of 3 of a Kind and 4 of a Kind.
    pub fn with_kind_max(mut self, kind_max: i32) -> Result<Self, TrackerError> {
        self.config.rules = Rules::with_kind_max(kind_max)?;
        Ok(self)
    }

    pub fn with_enforcement(mut self, enforcement: Enforcement) -> Self {
        self.config.enforcement = enforcement;
        self
    }

    pub fn lenient(self) -> Self {
        self.with_enforcement(Enforcement::lenient())
    }

    pub fn build(self) -> Tracker {
        Tracker::new(self.config)
    }
}

/// Pure transition function over [`GameState`].
///
/// `apply` never mutates its input. A rejected action leaves no partial
/// change behind because all work happens on a copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tracker {
    config: TrackerConfig,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self { config }
    }

    pub fn builder() -> TrackerBuilder {
        TrackerBuilder::new()
    }

    pub fn config(&self) -> TrackerConfig {
        self.config
    }

    pub fn rules(&self) -> Rules {
        self.config.rules
    }

    pub fn apply(&self, state: &GameState, action: &Action) -> Result<GameState, Rejection> {
        let mut next = state.clone();
        self.transition(&mut next, action)?;
        Ok(next)
    }

    /// Total variant of [`Tracker::apply`]: rejected actions yield the input state.
    pub fn reduce(&self, state: &GameState, action: &Action) -> GameState {
        self.apply(state, action).unwrap_or_else(|_| state.clone())
    }

    fn transition(&self, state: &mut GameState, action: &Action) -> Result<(), Rejection> {
        match action {
            Action::AddPlayer { name } => add_player(state, name),
            Action::RemovePlayer { name } => {
                remove_player(state, name, self.config.enforcement.freeze_finished);
                Ok(())
            }
            Action::StartNewGame => {
                start_new_game(state);
                Ok(())
            }
            Action::SetCurrentGame { game_id } => {
                if state.game(*game_id).is_none() {
                    return Err(Rejection::UnknownGame(*game_id));
                }
                state.current_game_id = Some(*game_id);
                Ok(())
            }
            Action::UpdateScore {
                game_id,
                player,
                category,
                value,
            } => self.update_score(state, *game_id, player, *category, *value),
            Action::AddYahtzeeBonus { game_id, player } => {
                self.add_yahtzee_bonus(state, *game_id, player)
            }
            Action::NextTurn { game_id } => {
                let roster_len = state.players.len();
                let game = self.open_game_mut(state, *game_id)?;
                rotate_turn(game, roster_len);
                Ok(())
            }
            Action::NextRound { game_id } => {
                let game = self.open_game_mut(state, *game_id)?;
                game.current_round = game.current_round.saturating_add(1).min(MAX_ROUNDS);
                Ok(())
            }
            Action::EndGame { game_id } => end_game(state, *game_id),
            Action::DeleteGame { game_id } => {
                delete_game(state, *game_id);
                Ok(())
            }
            Action::ResetAll => {
                *state = GameState::default();
                Ok(())
            }
        }
    }

    fn update_score(
        &self,
        state: &mut GameState,
        game_id: GameId,
        player: &str,
        category: Category,
        value: i32,
    ) -> Result<(), Rejection> {
        self.check_scorer(state, game_id, player)?;
        let enforcement = self.config.enforcement;
        if enforcement.score_legality && !self.config.rules.is_legal(category, value) {
            return Err(Rejection::IllegalScore {
                category,
                score: value,
            });
        }
        let roster_len = state.players.len();
        let game = self.open_game_mut(state, game_id)?;
        let sheet = game
            .scores
            .get_mut(player)
            .ok_or_else(|| Rejection::PlayerNotInGame {
                game: game_id,
                player: player.to_string(),
            })?;
        if !enforcement.allow_overwrite && sheet.is_filled(category) {
            return Err(Rejection::CategoryFilled(category));
        }
        sheet.set(category, value);
        rotate_turn(game, roster_len);
        Ok(())
    }

    fn add_yahtzee_bonus(
        &self,
        state: &mut GameState,
        game_id: GameId,
        player: &str,
    ) -> Result<(), Rejection> {
        self.check_scorer(state, game_id, player)?;
        let score_legality = self.config.enforcement.score_legality;
        let game = self.open_game_mut(state, game_id)?;
        let sheet = game
            .scores
            .get_mut(player)
            .ok_or_else(|| Rejection::PlayerNotInGame {
                game: game_id,
                player: player.to_string(),
            })?;
        if score_legality && sheet.get(Category::Yahtzee) != Some(YAHTZEE_SCORE) {
            return Err(Rejection::BonusWithoutYahtzee);
        }
        sheet.add_yahtzee_bonus()?;
        Ok(())
    }

    /// Checks that `player` may write to `game_id` right now.
    fn check_scorer(
        &self,
        state: &GameState,
        game_id: GameId,
        player: &str,
    ) -> Result<(), Rejection> {
        let game = self.open_game(state, game_id)?;
        if !game.has_player(player) {
            return Err(Rejection::PlayerNotInGame {
                game: game_id,
                player: player.to_string(),
            });
        }
        if self.config.enforcement.turn_order {
            let expected = state
                .current_player(game)
                .ok_or(Rejection::NoCurrentPlayer(game_id))?;
            if expected.name != player {
                return Err(Rejection::NotPlayersTurn {
                    player: player.to_string(),
                    expected: expected.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn open_game<'a>(
        &self,
        state: &'a GameState,
        game_id: GameId,
    ) -> Result<&'a Game, Rejection> {
        if self.config.enforcement.freeze_finished && state.is_finished(game_id) {
            return Err(Rejection::GameEnded(game_id));
        }
        state.game(game_id).ok_or(Rejection::UnknownGame(game_id))
    }

    fn open_game_mut<'a>(
        &self,
        state: &'a mut GameState,
        game_id: GameId,
    ) -> Result<&'a mut Game, Rejection> {
        if self.config.enforcement.freeze_finished && state.is_finished(game_id) {
            return Err(Rejection::GameEnded(game_id));
        }
        state
            .game_mut(game_id)
            .ok_or(Rejection::UnknownGame(game_id))
    }
}

/// Applies `action` with the default (strict) tracker.
pub fn apply(state: &GameState, action: &Action) -> Result<GameState, Rejection> {
    Tracker::default().apply(state, action)
}

/// Applies `action` with the default tracker, returning `state` unchanged on rejection.
pub fn reduce(state: &GameState, action: &Action) -> GameState {
    Tracker::default().reduce(state, action)
}

fn add_player(state: &mut GameState, name: &str) -> Result<(), Rejection> {
    if name.trim().is_empty() {
        return Err(Rejection::BlankName);
    }
    if state.has_player(name) {
        return Err(Rejection::DuplicatePlayer(name.to_string()));
    }
    state.players.push(Player::new(name));
    Ok(())
}

/// Ended games are left alone only while they are frozen; otherwise their
/// turn index is kept in range like any open game.
fn remove_player(state: &mut GameState, name: &str, skip_finished: bool) {
    let Some(position) = state.players.iter().position(|player| player.name == name) else {
        return;
    };
    state.players.retain(|player| player.name != name);
    let roster_len = state.players.len();
    let finished = &state.game_summaries;
    // Keep the turn on the same person in every game still in play.
    for game in state
        .games
        .iter_mut()
        .filter(|g| !skip_finished || !finished.contains_key(&g.id))
    {
        if game.current_player_index > position {
            game.current_player_index -= 1;
        }
        if game.current_player_index >= roster_len {
            game.current_player_index = 0;
        }
    }
}

fn start_new_game(state: &mut GameState) {
    let id = state.next_game_id();
    state.games.push(Game::new(id, &state.players));
    state.current_game_id = Some(id);
    state.last_game_id = id;
}

fn end_game(state: &mut GameState, game_id: GameId) -> Result<(), Rejection> {
    let summary = state
        .game(game_id)
        .ok_or(Rejection::UnknownGame(game_id))?
        .summarize();
    state.game_summaries.insert(game_id, summary);
    state.current_game_id = state
        .games
        .iter()
        .rev()
        .map(|game| game.id)
        .find(|id| *id != game_id);
    Ok(())
}

fn delete_game(state: &mut GameState, game_id: GameId) {
    state.games.retain(|game| game.id != game_id);
    state.game_summaries.remove(&game_id);
    if state.current_game_id == Some(game_id) {
        state.current_game_id = state.latest_game_id();
    }
}

fn rotate_turn(game: &mut Game, roster_len: usize) {
    game.current_player_index = if roster_len == 0 {
        0
    } else {
        (game.current_player_index + 1) % roster_len
    };
}
