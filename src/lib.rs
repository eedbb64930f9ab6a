//! Score keeping for Yahtzee games played by a shared roster of players.
//!
//! The core is [`Tracker`], a pure transition function over [`GameState`]
//! backed by the scoring rule table in [`category`]. [`Session`] hosts a
//! tracker, serializes actions and persists a snapshot after each one.

pub mod action;
pub mod category;
pub mod error;
pub mod input;
pub mod session;
pub mod sheet;
pub mod state;
pub mod store;
pub mod tracker;
pub mod visualize;

pub use crate::action::{Action, GameId};
pub use crate::category::{Category, Rules, Section};
pub use crate::error::{InputError, Rejection, StoreError, TrackerError};
pub use crate::session::{MAX_PLAYERS, MIN_PLAYERS_TO_START, Session};
pub use crate::sheet::ScoreSheet;
pub use crate::state::{Game, GameState, GameSummary, Player};
pub use crate::store::{FileStore, MemoryStore, STATE_KEY, StateStore};
pub use crate::tracker::{Enforcement, Tracker, TrackerBuilder, TrackerConfig, apply, reduce};
pub use crate::visualize::{
    VisualOptions, describe_action, render_categories, render_game, render_roster, render_state,
    render_summaries,
};
