use log::{debug, info, warn};

use crate::action::Action;
use crate::error::TrackerError;
use crate::state::GameState;
use crate::store::{STATE_KEY, StateStore};
use crate::tracker::Tracker;

pub const MAX_PLAYERS: usize = 10;
pub const MIN_PLAYERS_TO_START: usize = 2;

/// Single owner of the tracker state.
///
/// Every action goes through [`Session::dispatch`], one at a time. Accepted
/// actions are saved immediately; a failed save is logged and the in-memory
/// state keeps the transition.
pub struct Session<S: StateStore> {
    tracker: Tracker,
    store: S,
    state: GameState,
}

impl<S: StateStore> Session<S> {
    /// Restores the saved state, or starts empty when there is none or it
    /// cannot be read.
    pub fn open(tracker: Tracker, store: S) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => {
                debug!(
                    "restored {STATE_KEY}: {} players, {} games",
                    state.players.len(),
                    state.games.len()
                );
                state
            }
            Ok(None) => {
                info!("no saved {STATE_KEY}, starting fresh");
                GameState::default()
            }
            Err(err) => {
                warn!("discarding unreadable {STATE_KEY}: {err}");
                GameState::default()
            }
        };
        Self {
            tracker,
            store,
            state,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn dispatch(&mut self, action: Action) -> Result<&GameState, TrackerError> {
        self.check_roster_limits(&action)?;
        let next = match self.tracker.apply(&self.state, &action) {
            Ok(next) => next,
            Err(rejection) => {
                info!("{} rejected: {rejection}", action.kind());
                return Err(rejection.into());
            }
        };
        match action.game_id() {
            Some(game_id) => debug!("{} applied to game {game_id}", action.kind()),
            None => debug!("{} applied", action.kind()),
        }
        self.state = next;
        if let Err(err) = self.store.save(&self.state) {
            warn!("could not save {STATE_KEY} after {}: {err}", action.kind());
        }
        Ok(&self.state)
    }

    fn check_roster_limits(&self, action: &Action) -> Result<(), TrackerError> {
        let players = self.state.players.len();
        match action {
            Action::AddPlayer { .. } if players >= MAX_PLAYERS => {
                Err(TrackerError::RosterFull(MAX_PLAYERS))
            }
            Action::StartNewGame if players < MIN_PLAYERS_TO_START => {
                Err(TrackerError::NotEnoughPlayers {
                    required: MIN_PLAYERS_TO_START,
                    found: players,
                })
            }
            _ => Ok(()),
        }
    }
}
