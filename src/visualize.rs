use std::fmt::Write;

use crate::action::Action;
use crate::category::{BONUS_LABEL, Category, MAX_YAHTZEE_BONUSES, Rules, UPPER_BONUS_THRESHOLD};
use crate::sheet::ScoreSheet;
use crate::state::{Game, GameState};

const LABEL_WIDTH: usize = 14;
const MIN_COLUMN_WIDTH: usize = 5;

/// Customize scorecard rendering for CLI output.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_descriptions: bool,
    pub show_totals: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_descriptions: false,
            show_totals: true,
        }
    }
}

/// Renders the active game's scorecard, or a hint when no game is active.
pub fn render_state(state: &GameState) -> String {
    match state.current_game() {
        Some(game) => render_game(state, game),
        None => String::from("No active game. Start a new game to see the scorecard.\n"),
    }
}

pub fn render_game(state: &GameState, game: &Game) -> String {
    render_game_with_options(state, game, VisualOptions::default())
}

pub fn render_game_with_options(
    state: &GameState,
    game: &Game,
    options: VisualOptions,
) -> String {
    let mut out = String::new();
    let status = if state.is_finished(game.id) {
        "finished"
    } else if !game.scores.is_empty() && game.all_sheets_complete() {
        "every box filled"
    } else {
        "in progress"
    };
    let _ = writeln!(out, "Game {} ({status}), round {}", game.id, game.current_round);

    let names = game.participants(&state.players);
    let current = state.current_player(game).map(|player| player.name.as_str());
    let widths: Vec<usize> = names
        .iter()
        .map(|name| name.chars().count().max(MIN_COLUMN_WIDTH) + 1)
        .collect();
    let sheets: Vec<&ScoreSheet> = names.iter().filter_map(|name| game.sheet(name)).collect();

    let mut header = format!("{:<LABEL_WIDTH$}", "Category");
    for (name, &width) in names.iter().zip(&widths) {
        let marked = if Some(*name) == current {
            format!("*{name}")
        } else {
            name.to_string()
        };
        let _ = write!(header, " {marked:>width$}");
    }
    let _ = writeln!(out, "{header}");

    let mut row = |label: &str, cell: &dyn Fn(&ScoreSheet) -> String, note: Option<&str>| {
        let mut line = format!("{label:<LABEL_WIDTH$}");
        for (sheet, &width) in sheets.iter().zip(&widths) {
            let _ = write!(line, " {:>width$}", cell(sheet));
        }
        if let Some(note) = note {
            let _ = write!(line, "  {note}");
        }
        let _ = writeln!(out, "{line}");
    };

    let describe = |category: Category| options.show_descriptions.then(|| category.description());
    for category in Category::upper() {
        row(
            category.label(),
            &|sheet: &ScoreSheet| format_entry(sheet.get(category)),
            describe(category),
        );
    }
    if options.show_totals {
        row("Upper total", &|sheet: &ScoreSheet| sheet.upper_total().to_string(), None);
        let bonus_note = format!("if upper total is {UPPER_BONUS_THRESHOLD} or over");
        row(
            "Upper bonus",
            &|sheet: &ScoreSheet| sheet.upper_bonus().to_string(),
            options.show_descriptions.then_some(bonus_note.as_str()),
        );
    }
    for category in Category::lower() {
        row(
            category.label(),
            &|sheet: &ScoreSheet| format_entry(sheet.get(category)),
            describe(category),
        );
    }
    row(
        BONUS_LABEL,
        &|sheet: &ScoreSheet| match sheet.yahtzee_bonus() {
            0 => String::from("-"),
            count => format!("{count}x"),
        },
        options.show_descriptions.then_some("100 per extra Yahtzee"),
    );
    if options.show_totals {
        row("Lower total", &|sheet: &ScoreSheet| sheet.lower_total().to_string(), None);
        row("GRAND TOTAL", &|sheet: &ScoreSheet| sheet.grand_total().to_string(), None);
    }

    if let Some(name) = current {
        let _ = writeln!(out, "Next up: {name}");
    }
    out
}

/// Lists every game with its summary, or "Game in progress" for open ones.
pub fn render_summaries(state: &GameState) -> String {
    let mut out = String::new();
    if state.games.is_empty() {
        let _ = writeln!(out, "No games yet.");
        return out;
    }
    for game in &state.games {
        let active = if state.current_game_id == Some(game.id) {
            " (active)"
        } else {
            ""
        };
        let _ = writeln!(out, "Game {}{active}", game.id);
        match state.summary(game.id) {
            Some(summary) => {
                let mut ranked: Vec<(&String, &i64)> = summary.iter().collect();
                ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
                for (name, total) in ranked {
                    let _ = writeln!(out, "  {name:<16} {total:>5}");
                }
            }
            None => {
                let _ = writeln!(out, "  Game in progress");
            }
        }
    }
    out
}

pub fn render_roster(state: &GameState) -> String {
    if state.players.is_empty() {
        return String::from("Roster is empty.\n");
    }
    let mut out = String::new();
    for (index, player) in state.players.iter().enumerate() {
        let _ = writeln!(out, "  [{index}] {}", player.name);
    }
    out
}

/// The rule table as a reference card.
pub fn render_categories(rules: &Rules) -> String {
    let mut out = String::new();
    for category in Category::ALL {
        let legal = rules.legal_scores(category);
        let range = match (legal.as_slice(), category.face()) {
            ([], _) => String::from("none"),
            ([only], _) => format!("{only}"),
            ([0, last], _) => format!("0 or {last}"),
            ([first, .., last], Some(face)) if face > 1 => {
                format!("{first}..={last} in steps of {face}")
            }
            ([first, .., last], _) => format!("{first}..={last}"),
        };
        let _ = writeln!(
            out,
            "{:<LABEL_WIDTH$} {:<26} {range}",
            category.label(),
            category.description()
        );
    }
    let _ = writeln!(
        out,
        "{BONUS_LABEL:<LABEL_WIDTH$} {:<26} +1 each, max {MAX_YAHTZEE_BONUSES}",
        "100 per extra Yahtzee"
    );
    out
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::AddPlayer { name } => format!("add {name} to the roster"),
        Action::RemovePlayer { name } => format!("remove {name} from the roster"),
        Action::StartNewGame => String::from("start a new game"),
        Action::SetCurrentGame { game_id } => format!("switch to game {game_id}"),
        Action::UpdateScore {
            game_id,
            player,
            category,
            value,
        } => format!("{player} scores {value} in {category} (game {game_id})"),
        Action::AddYahtzeeBonus { game_id, player } => {
            format!("{player} takes a Yahtzee bonus (game {game_id})")
        }
        Action::NextTurn { game_id } => format!("pass the turn in game {game_id}"),
        Action::NextRound { game_id } => format!("advance the round in game {game_id}"),
        Action::EndGame { game_id } => format!("end game {game_id}"),
        Action::DeleteGame { game_id } => format!("delete game {game_id}"),
        Action::ResetAll => String::from("reset everything"),
    }
}

fn format_entry(entry: Option<i32>) -> String {
    entry.map_or_else(|| String::from("-"), |score| score.to_string())
}
