use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Identifier of a game, allocated in increasing order starting at 1.
pub type GameId = u32;

/// Transition requested by a host against the tracker state.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Append a player to the shared roster.
    AddPlayer { name: String },
    /// Drop a player from the roster. Existing score sheets are kept.
    RemovePlayer { name: String },
    /// Open a game for everyone currently on the roster and make it active.
    StartNewGame,
    /// Point the active-game marker at another open or finished game.
    SetCurrentGame { game_id: GameId },
    /// Record a score and pass the turn on.
    UpdateScore {
        game_id: GameId,
        player: String,
        category: Category,
        value: i32,
    },
    /// Credit one extra Yahtzee to a player. The turn does not pass.
    AddYahtzeeBonus { game_id: GameId, player: String },
    /// Pass the turn without scoring.
    NextTurn { game_id: GameId },
    NextRound { game_id: GameId },
    /// Freeze the game's totals into a summary.
    EndGame { game_id: GameId },
    DeleteGame { game_id: GameId },
    ResetAll,
}

impl Action {
    /// Returns the game targeted by the action, if any.
    pub fn game_id(&self) -> Option<GameId> {
        match self {
            Action::SetCurrentGame { game_id }
            | Action::UpdateScore { game_id, .. }
            | Action::AddYahtzeeBonus { game_id, .. }
            | Action::NextTurn { game_id }
            | Action::NextRound { game_id }
            | Action::EndGame { game_id }
            | Action::DeleteGame { game_id } => Some(*game_id),
            Action::AddPlayer { .. }
            | Action::RemovePlayer { .. }
            | Action::StartNewGame
            | Action::ResetAll => None,
        }
    }

    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddPlayer { .. } => "add-player",
            Action::RemovePlayer { .. } => "remove-player",
            Action::StartNewGame => "start-new-game",
            Action::SetCurrentGame { .. } => "set-current-game",
            Action::UpdateScore { .. } => "update-score",
            Action::AddYahtzeeBonus { .. } => "add-yahtzee-bonus",
            Action::NextTurn { .. } => "next-turn",
            Action::NextRound { .. } => "next-round",
            Action::EndGame { .. } => "end-game",
            Action::DeleteGame { .. } => "delete-game",
            Action::ResetAll => "reset-all",
        }
    }
}
