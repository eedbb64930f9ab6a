//! Turns raw operator text into actions. Nothing that fails here reaches the tracker.

use crate::action::{Action, GameId};
use crate::category::Category;
use crate::error::InputError;

pub fn parse_score(raw: &str) -> Result<i32, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    trimmed
        .parse::<i32>()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))
}

pub fn parse_category(raw: &str) -> Result<Category, InputError> {
    raw.parse()
}

pub fn player_name(raw: &str) -> Result<String, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(trimmed.to_string())
}

/// Builds an [`Action::UpdateScore`] from the three prompted values.
pub fn score_entry(
    game_id: GameId,
    player: &str,
    category: &str,
    value: &str,
) -> Result<Action, InputError> {
    Ok(Action::UpdateScore {
        game_id,
        player: player_name(player)?,
        category: parse_category(category)?,
        value: parse_score(value)?,
    })
}

/// Splits a command line into words, keeping double-quoted runs together.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut pending = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                pending = true;
            }
            c if c.is_whitespace() && !quoted => {
                if pending {
                    words.push(std::mem::take(&mut current));
                    pending = false;
                }
            }
            c => {
                current.push(c);
                pending = true;
            }
        }
    }
    if pending {
        words.push(current);
    }
    words
}
