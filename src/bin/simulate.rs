use std::collections::HashMap;
use std::error::Error;
use std::process;

use clap::{ArgAction, Parser};
use log::{LevelFilter, debug};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use yahtzee_tracker::category::{
    CATEGORY_COUNT, DEFAULT_KIND_MAX, MAX_YAHTZEE_BONUSES, YAHTZEE_SCORE,
};
use yahtzee_tracker::{
    Action, Category, GameId, MAX_PLAYERS, MIN_PLAYERS_TO_START, MemoryStore, Rules, Session,
    StateStore, Tracker, describe_action, render_game, render_summaries,
};

const DEFAULT_SEED: u64 = 0xD1CE_5EED_0000_0005;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play complete Yahtzee games with random legal scores and report the totals."
)]
struct Args {
    /// Number of games to play
    #[arg(short = 'g', long = "games", default_value_t = 1)]
    games: usize,

    /// RNG seed for category and score choices
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Highest score accepted for 3 of a Kind and 4 of a Kind
    #[arg(long = "kind-max", default_value_t = DEFAULT_KIND_MAX)]
    kind_max: i32,

    /// Chance that a player holding a YAHTZEE of 50 takes a bonus on their turn
    #[arg(long = "bonus-rate", default_value_t = 0.1)]
    bonus_rate: f64,

    /// Print every scorecard before the game is ended
    #[arg(long, action = ArgAction::SetTrue)]
    visualize: bool,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Player names (2-10 total)
    players: Vec<String>,
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    let players = if args.players.is_empty() {
        vec![String::from("Alice"), String::from("Bob")]
    } else {
        args.players.clone()
    };
    if !(MIN_PLAYERS_TO_START..=MAX_PLAYERS).contains(&players.len()) {
        return Err(format!(
            "expected between {MIN_PLAYERS_TO_START} and {MAX_PLAYERS} players, received {}",
            players.len()
        )
        .into());
    }
    if !(0.0..=1.0).contains(&args.bonus_rate) {
        return Err("bonus rate must be between 0 and 1".into());
    }

    let tracker = Tracker::builder().with_kind_max(args.kind_max)?.build();
    let rules = tracker.rules();
    let mut session = Session::open(tracker, MemoryStore::new());
    for name in &players {
        session.dispatch(Action::AddPlayer { name: name.clone() })?;
    }

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut wins: HashMap<String, usize> = HashMap::new();
    let mut points: HashMap<String, i64> = HashMap::new();
    println!(
        "Simulating {} game(s) with {} players.\n",
        args.games,
        players.len()
    );
    for _ in 0..args.games {
        let game_id = play_game(&mut session, rules, args.bonus_rate, &mut rng)?;
        if args.visualize {
            if let Some(game) = session.state().game(game_id) {
                println!("{}", render_game(session.state(), game));
            }
        }
        let state = session.dispatch(Action::EndGame { game_id })?;
        let summary = state
            .summary(game_id)
            .ok_or("ended game has no summary")?;
        for (name, total) in summary {
            *points.entry(name.clone()).or_default() += *total;
        }
        let best = summary.values().copied().max().unwrap_or(0);
        for (name, total) in summary {
            if *total == best {
                *wins.entry(name.clone()).or_default() += 1;
            }
        }
    }

    print!("{}", render_summaries(session.state()));
    println!("\nPlayer            wins   avg points");
    for name in &players {
        let won = wins.get(name).copied().unwrap_or(0);
        let average = points.get(name).copied().unwrap_or(0) as f64 / args.games.max(1) as f64;
        println!("{name:<16} {won:>5}   {average:>10.1}");
    }
    println!("\n{} snapshots written.", session.store().saves());
    Ok(())
}

/// Plays one full game: thirteen rounds in which every seat fills one box.
fn play_game<S: StateStore>(
    session: &mut Session<S>,
    rules: Rules,
    bonus_rate: f64,
    rng: &mut StdRng,
) -> Result<GameId, Box<dyn Error>> {
    let game_id = session
        .dispatch(Action::StartNewGame)?
        .current_game_id
        .ok_or("new game was not activated")?;
    let seats = session.state().players.len();
    for _ in 0..CATEGORY_COUNT {
        for _ in 0..seats {
            let (player, open, bonus_ready) = {
                let state = session.state();
                let game = state.game(game_id).ok_or("game disappeared mid-play")?;
                let player = state
                    .current_player(game)
                    .ok_or("no player holds the turn")?
                    .name
                    .clone();
                let sheet = game.sheet(&player).ok_or("turn holder has no sheet")?;
                let open: Vec<Category> = sheet.open_categories().collect();
                let bonus_ready = sheet.get(Category::Yahtzee) == Some(YAHTZEE_SCORE)
                    && sheet.yahtzee_bonus() < MAX_YAHTZEE_BONUSES;
                (player, open, bonus_ready)
            };
            if bonus_ready && rng.gen_bool(bonus_rate) {
                session.dispatch(Action::AddYahtzeeBonus {
                    game_id,
                    player: player.clone(),
                })?;
            }
            let category = *open.choose(rng).ok_or("sheet is already full")?;
            let value = *rules
                .legal_scores(category)
                .choose(rng)
                .ok_or("category has no legal score")?;
            let action = Action::UpdateScore {
                game_id,
                player,
                category,
                value,
            };
            debug!("{}", describe_action(&action));
            session.dispatch(action)?;
        }
        session.dispatch(Action::NextRound { game_id })?;
    }
    let complete = session
        .state()
        .game(game_id)
        .is_some_and(|game| game.all_sheets_complete());
    if !complete {
        return Err(format!("game {game_id} finished with open boxes").into());
    }
    Ok(game_id)
}
