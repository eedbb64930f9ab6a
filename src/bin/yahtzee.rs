use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, debug};

use yahtzee_tracker::category::DEFAULT_KIND_MAX;
use yahtzee_tracker::input::{player_name, score_entry, split_words};
use yahtzee_tracker::visualize::render_game_with_options;
use yahtzee_tracker::{
    Action, FileStore, GameId, GameState, Session, StateStore, Tracker, VisualOptions,
    describe_action, render_categories, render_game, render_roster, render_state,
    render_summaries,
};

#[derive(Parser, Debug)]
#[command(
    name = "yahtzee",
    about = "Keep score for Yahtzee games shared by a roster of players.",
    version
)]
struct Cli {
    /// Directory holding the saved tracker state.
    #[arg(long = "state-dir", default_value = ".yahtzee")]
    state_dir: PathBuf,

    /// Accept any whole-number score from anyone, like a paper scorecard.
    #[arg(long, action = ArgAction::SetTrue)]
    lenient: bool,

    /// Highest score accepted for 3 of a Kind and 4 of a Kind.
    #[arg(long = "kind-max", default_value_t = DEFAULT_KIND_MAX)]
    kind_max: i32,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the shared roster.
    #[command(subcommand)]
    Players(PlayersCommand),
    /// Start a new game with everyone on the roster.
    New,
    /// Make another game the active one.
    Switch { game: GameId },
    /// Record a score for the player whose turn it is.
    Score {
        player: String,
        category: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Target game (defaults to the active one).
        #[arg(long)]
        game: Option<GameId>,
    },
    /// Credit an extra Yahtzee (100 points, at most 3 per game).
    Bonus {
        player: String,
        #[arg(long)]
        game: Option<GameId>,
    },
    /// Pass the turn without scoring.
    NextTurn {
        #[arg(long)]
        game: Option<GameId>,
    },
    /// Advance the round counter.
    NextRound {
        #[arg(long)]
        game: Option<GameId>,
    },
    /// End a game and freeze its totals.
    End { game: Option<GameId> },
    /// Delete a game and its summary.
    Delete { game: GameId },
    /// Forget every player and game.
    Reset,
    /// Print a scorecard (the active game by default).
    Show {
        game: Option<GameId>,
        /// Print how each box is scored.
        #[arg(long, action = ArgAction::SetTrue)]
        descriptions: bool,
    },
    /// List every game with its final totals.
    Summary,
    /// Print the scoring rules.
    Categories,
    /// Read commands from standard input until `quit`.
    Play,
}

#[derive(Subcommand, Debug)]
enum PlayersCommand {
    Add { name: String },
    Remove { name: String },
    List,
}

/// One line typed in `play` mode.
#[derive(Parser, Debug)]
#[command(name = "play", no_binary_name = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_logging(cli.verbose);
    let mut builder = Tracker::builder().with_kind_max(cli.kind_max)?;
    if cli.lenient {
        builder = builder.lenient();
    }
    let store = FileStore::in_dir(&cli.state_dir);
    debug!("state file: {}", store.path().display());
    let tracker = builder.build();
    debug!("tracker config: {:?}", tracker.config());
    let mut session = Session::open(tracker, store);

    let command = cli.command.unwrap_or(Command::Show {
        game: None,
        descriptions: false,
    });
    match command {
        Command::Play => play(&mut session),
        command => execute(&mut session, command),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn execute<S: StateStore>(
    session: &mut Session<S>,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Players(PlayersCommand::Add { name }) => {
            let name = player_name(&name)?;
            session.dispatch(Action::AddPlayer { name: name.clone() })?;
            println!("Added {name} to the roster.");
        }
        Command::Players(PlayersCommand::Remove { name }) => {
            let name = player_name(&name)?;
            if !session.state().has_player(&name) {
                println!("{name} is not on the roster.");
                return Ok(());
            }
            session.dispatch(Action::RemovePlayer { name: name.clone() })?;
            println!("Removed {name} from the roster.");
        }
        Command::Players(PlayersCommand::List) => print!("{}", render_roster(session.state())),
        Command::New => {
            let state = session.dispatch(Action::StartNewGame)?;
            print!("{}", render_state(state));
        }
        Command::Switch { game } => {
            let state = session.dispatch(Action::SetCurrentGame { game_id: game })?;
            print!("{}", render_state(state));
        }
        Command::Score {
            player,
            category,
            value,
            game,
        } => {
            let game_id = resolve_game(session.state(), game)?;
            let action = score_entry(game_id, &player, &category, &value)?;
            let description = describe_action(&action);
            let state = session.dispatch(action)?;
            println!("{description}");
            print_game(state, game_id);
        }
        Command::Bonus { player, game } => {
            let game_id = resolve_game(session.state(), game)?;
            let action = Action::AddYahtzeeBonus {
                game_id,
                player: player_name(&player)?,
            };
            let description = describe_action(&action);
            session.dispatch(action)?;
            println!("{description}");
        }
        Command::NextTurn { game } => {
            let game_id = resolve_game(session.state(), game)?;
            let state = session.dispatch(Action::NextTurn { game_id })?;
            let holder = state
                .game(game_id)
                .and_then(|game| state.current_player(game))
                .map(|player| player.name.as_str())
                .unwrap_or("nobody");
            println!("Next up: {holder}");
        }
        Command::NextRound { game } => {
            let game_id = resolve_game(session.state(), game)?;
            let state = session.dispatch(Action::NextRound { game_id })?;
            if let Some(game) = state.game(game_id) {
                println!("Game {game_id} is in round {}.", game.current_round);
            }
        }
        Command::End { game } => {
            let game_id = resolve_game(session.state(), game)?;
            let state = session.dispatch(Action::EndGame { game_id })?;
            println!("Game {game_id} ended.");
            if let Some(summary) = state.summary(game_id) {
                for (name, total) in summary {
                    println!("  {name:<16} {total:>5}");
                }
            }
        }
        Command::Delete { game } => {
            session.dispatch(Action::DeleteGame { game_id: game })?;
            println!("Deleted game {game}.");
        }
        Command::Reset => {
            session.dispatch(Action::ResetAll)?;
            println!("All players and games cleared.");
        }
        Command::Show { game, descriptions } => {
            let state = session.state();
            let Some(game_id) = game.or(state.current_game_id) else {
                print!("{}", render_state(state));
                return Ok(());
            };
            let game = state
                .game(game_id)
                .ok_or_else(|| format!("game {game_id} does not exist"))?;
            let options = VisualOptions {
                show_descriptions: descriptions,
                ..VisualOptions::default()
            };
            print!("{}", render_game_with_options(state, game, options));
        }
        Command::Summary => print!("{}", render_summaries(session.state())),
        Command::Categories => print!("{}", render_categories(&session.tracker().rules())),
        Command::Play => return Err("already reading commands interactively".into()),
    }
    Ok(())
}

fn play<S: StateStore>(session: &mut Session<S>) -> Result<(), Box<dyn Error>> {
    println!("Enter commands such as `score Alice aces 3` or `next-turn`.");
    println!("Quote names with spaces. Type 'help' for the list, 'q' to quit.");
    print!("{}", render_state(session.state()));
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }
        let words = split_words(&input);
        match words.first().map(String::as_str) {
            None => continue,
            Some("q" | "quit" | "exit") => break,
            Some(_) => {}
        }
        let line = match Line::try_parse_from(&words) {
            Ok(line) => line,
            Err(err) => {
                let _ = err.print();
                continue;
            }
        };
        if let Err(err) = execute(session, line.command) {
            println!("{err}");
        }
    }
    Ok(())
}

fn resolve_game(state: &GameState, game: Option<GameId>) -> Result<GameId, Box<dyn Error>> {
    game.or(state.current_game_id)
        .ok_or_else(|| "no active game; start one with `new`".into())
}

fn print_game(state: &GameState, game_id: GameId) {
    if let Some(game) = state.game(game_id) {
        print!("{}", render_game(state, game));
    }
}
