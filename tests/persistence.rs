use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use yahtzee_tracker::store::{decode_state, encode_state};
use yahtzee_tracker::{
    Action, Category, FileStore, GameState, MAX_PLAYERS, MemoryStore, Rejection, STATE_KEY,
    Session, StateStore, Tracker, TrackerError,
};

fn scratch_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("yahtzee-{tag}-{}-{nanos}", std::process::id()))
}

fn session_with(names: &[&str]) -> Result<Session<MemoryStore>, TrackerError> {
    let mut session = Session::open(Tracker::default(), MemoryStore::new());
    for name in names {
        session.dispatch(Action::AddPlayer {
            name: name.to_string(),
        })?;
    }
    Ok(session)
}

#[test]
fn snapshot_round_trips_a_played_state() -> Result<(), TrackerError> {
    let mut session = session_with(&["Alice", "Bob"])?;
    session.dispatch(Action::StartNewGame)?;
    session.dispatch(Action::UpdateScore {
        game_id: 1,
        player: "Alice".into(),
        category: Category::Yahtzee,
        value: 50,
    })?;
    session.dispatch(Action::StartNewGame)?;
    session.dispatch(Action::EndGame { game_id: 1 })?;

    let bytes = encode_state(session.state())?;
    let restored = decode_state(&bytes)?;
    assert_eq!(&restored, session.state());
    assert_eq!(restored.last_game_id, 2);
    Ok(())
}

#[test]
fn every_accepted_action_is_saved() -> Result<(), TrackerError> {
    let mut session = session_with(&["Alice", "Bob"])?;
    session.dispatch(Action::StartNewGame)?;
    assert_eq!(session.store().saves(), 3);

    let rejected = session.dispatch(Action::SetCurrentGame { game_id: 4 });
    assert!(matches!(
        rejected,
        Err(TrackerError::Rejected(Rejection::UnknownGame(4)))
    ));
    assert_eq!(session.store().saves(), 3);

    let store = session.into_store();
    let reopened = Session::open(Tracker::default(), store);
    assert_eq!(reopened.state().games.len(), 1);
    assert_eq!(reopened.state().current_game_id, Some(1));
    Ok(())
}

#[test]
fn roster_is_capped() -> Result<(), TrackerError> {
    let names: Vec<String> = (0..MAX_PLAYERS).map(|seat| format!("P{seat}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let mut session = session_with(&refs)?;
    let result = session.dispatch(Action::AddPlayer {
        name: "Extra".into(),
    });
    assert!(matches!(result, Err(TrackerError::RosterFull(MAX_PLAYERS))));
    assert_eq!(session.state().players.len(), MAX_PLAYERS);
    Ok(())
}

#[test]
fn starting_needs_two_players() -> Result<(), TrackerError> {
    let mut session = session_with(&["Solo"])?;
    let result = session.dispatch(Action::StartNewGame);
    assert!(matches!(
        result,
        Err(TrackerError::NotEnoughPlayers {
            required: 2,
            found: 1
        })
    ));
    assert!(session.state().games.is_empty());
    Ok(())
}

#[test]
fn failed_save_keeps_the_transition() -> Result<(), TrackerError> {
    let mut session = Session::open(Tracker::default(), MemoryStore::unavailable());
    session.dispatch(Action::AddPlayer {
        name: "Alice".into(),
    })?;
    assert_eq!(session.state().players.len(), 1);
    assert_eq!(session.store().saves(), 0);
    assert!(session.store().snapshot().is_none());
    Ok(())
}

#[test]
fn corrupt_snapshot_starts_fresh() {
    let store = MemoryStore::with_snapshot(vec![0xff; 7]);
    assert!(store.load().is_err());
    let session = Session::open(Tracker::default(), store);
    assert_eq!(session.state(), &GameState::default());
}

#[test]
fn file_store_survives_reopen() -> Result<(), TrackerError> {
    let dir = scratch_dir("reopen");
    let store = FileStore::in_dir(&dir);
    assert!(store.path().ends_with(format!("{STATE_KEY}.bin")));
    assert!(store.load()?.is_none());

    let mut session = Session::open(Tracker::default(), store);
    for name in ["Alice", "Bob"] {
        session.dispatch(Action::AddPlayer { name: name.into() })?;
    }
    session.dispatch(Action::StartNewGame)?;
    session.dispatch(Action::UpdateScore {
        game_id: 1,
        player: "Alice".into(),
        category: Category::Sixes,
        value: 24,
    })?;

    let reopened = Session::open(Tracker::default(), FileStore::in_dir(&dir));
    assert_eq!(reopened.state(), session.state());
    let sheet = reopened
        .state()
        .game(1)
        .and_then(|game| game.sheet("Alice"))
        .expect("Alice has a sheet");
    assert_eq!(sheet.get(Category::Sixes), Some(24));

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
