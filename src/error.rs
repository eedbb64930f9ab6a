use std::io;

use thiserror::Error;

use crate::action::GameId;
use crate::category::{Category, MAX_YAHTZEE_BONUSES};

/// Errors surfaced by the tracker and the hosts built around it.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("action rejected: {0}")]
    Rejected(#[from] Rejection),
    #[error("invalid input: {0}")]
    Input(#[from] InputError),
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
    #[error("roster is full ({0} players maximum)")]
    RosterFull(usize),
    #[error("at least {required} players are needed to start a game, found {found}")]
    NotEnoughPlayers { required: usize, found: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),
}

/// Reasons a transition left the state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("game {0} does not exist")]
    UnknownGame(GameId),
    #[error("game {0} has already ended")]
    GameEnded(GameId),
    #[error("player name must not be blank")]
    BlankName,
    #[error("player '{0}' is already on the roster")]
    DuplicatePlayer(String),
    #[error("player '{player}' is not part of game {game}")]
    PlayerNotInGame { game: GameId, player: String },
    #[error("it is {expected}'s turn, not {player}'s")]
    NotPlayersTurn { player: String, expected: String },
    #[error("no rostered player holds the turn in game {0}")]
    NoCurrentPlayer(GameId),
    #[error("{score} is not a legal score for {category}")]
    IllegalScore { category: Category, score: i32 },
    #[error("{0} has already been scored")]
    CategoryFilled(Category),
    #[error("Yahtzee bonus limit reached ({} per game)", MAX_YAHTZEE_BONUSES)]
    BonusLimitReached,
    #[error("a Yahtzee bonus needs a YAHTZEE of 50 on the sheet first")]
    BonusWithoutYahtzee,
}

/// Failures of the snapshot store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("could not decode snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

/// Raw operator input that cannot become an action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("no value entered")]
    Empty,
    #[error("'{0}' is not a whole number")]
    NotANumber(String),
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
}
