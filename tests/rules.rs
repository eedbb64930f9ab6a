use yahtzee_tracker::{
    Action, Category, Enforcement, GameState, Player, Rejection, Tracker, apply, reduce,
};

fn with_players(names: &[&str]) -> Result<GameState, Rejection> {
    let mut state = GameState::new();
    for name in names {
        state = apply(
            &state,
            &Action::AddPlayer {
                name: name.to_string(),
            },
        )?;
    }
    Ok(state)
}

fn started(names: &[&str]) -> Result<GameState, Rejection> {
    apply(&with_players(names)?, &Action::StartNewGame)
}

fn score(game_id: u32, player: &str, category: Category, value: i32) -> Action {
    Action::UpdateScore {
        game_id,
        player: player.to_string(),
        category,
        value,
    }
}

#[test]
fn add_player_appends_once() -> Result<(), Rejection> {
    let state = apply(
        &GameState::new(),
        &Action::AddPlayer {
            name: "Alice".into(),
        },
    )?;
    assert_eq!(state.players, vec![Player::new("Alice")]);

    let again = Action::AddPlayer {
        name: "Alice".into(),
    };
    assert_eq!(
        apply(&state, &again),
        Err(Rejection::DuplicatePlayer("Alice".into()))
    );
    assert_eq!(reduce(&state, &again).players.len(), 1);
    Ok(())
}

#[test]
fn player_names_are_case_sensitive() -> Result<(), Rejection> {
    let state = with_players(&["alice", "Alice"])?;
    assert_eq!(state.players.len(), 2);
    Ok(())
}

#[test]
fn blank_player_name_is_rejected() {
    let result = apply(
        &GameState::new(),
        &Action::AddPlayer {
            name: "   ".into(),
        },
    );
    assert_eq!(result, Err(Rejection::BlankName));
}

#[test]
fn remove_player_keeps_order_and_ignores_absent_names() -> Result<(), Rejection> {
    let state = with_players(&["Alice", "Bob", "Cara"])?;
    let state = apply(&state, &Action::RemovePlayer { name: "Bob".into() })?;
    assert_eq!(state.players, vec![Player::new("Alice"), Player::new("Cara")]);
    let unchanged = apply(&state, &Action::RemovePlayer { name: "Zed".into() })?;
    assert_eq!(unchanged, state);
    Ok(())
}

#[test]
fn start_new_game_creates_empty_sheets() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    assert_eq!(state.games.len(), 1);
    let game = &state.games[0];
    assert_eq!(game.id, 1);
    assert_eq!(game.current_player_index, 0);
    assert_eq!(game.current_round, 1);
    assert_eq!(game.scores.len(), 2);
    assert!(game.scores.values().all(|sheet| sheet.filled_count() == 0));
    assert_eq!(state.current_game_id, Some(1));
    Ok(())
}

#[test]
fn start_new_game_succeeds_without_players() -> Result<(), Rejection> {
    let state = apply(&GameState::new(), &Action::StartNewGame)?;
    assert_eq!(state.games[0].scores.len(), 0);
    assert_eq!(state.current_game_id, Some(1));
    Ok(())
}

#[test]
fn update_score_records_and_rotates() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &score(1, "Alice", Category::Aces, 3))?;
    let game = state.game(1).expect("game 1");
    assert_eq!(game.sheet("Alice").and_then(|s| s.get(Category::Aces)), Some(3));
    assert_eq!(game.current_player_index, 1);

    let state = apply(&state, &score(1, "Bob", Category::Chance, 21))?;
    assert_eq!(state.game(1).map(|g| g.current_player_index), Some(0));
    Ok(())
}

#[test]
fn scoring_out_of_turn_is_rejected() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    assert_eq!(
        apply(&state, &score(1, "Bob", Category::Aces, 2)),
        Err(Rejection::NotPlayersTurn {
            player: "Bob".into(),
            expected: "Alice".into(),
        })
    );
    Ok(())
}

#[test]
fn illegal_scores_are_rejected_under_strict_policy() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    assert_eq!(
        apply(&state, &score(1, "Alice", Category::Aces, 7)),
        Err(Rejection::IllegalScore {
            category: Category::Aces,
            score: 7,
        })
    );
    assert_eq!(
        apply(&state, &score(1, "Alice", Category::FullHouse, 20)),
        Err(Rejection::IllegalScore {
            category: Category::FullHouse,
            score: 20,
        })
    );
    Ok(())
}

#[test]
fn lenient_policy_records_anything() -> Result<(), Rejection> {
    let tracker = Tracker::builder().lenient().build();
    let state = started(&["Alice", "Bob"])?;
    // Bob out of turn, with an impossible Aces score.
    let state = tracker.apply(&state, &score(1, "Bob", Category::Aces, 7))?;
    let state = tracker.apply(&state, &score(1, "Bob", Category::Aces, 9))?;
    let game = state.game(1).expect("game 1");
    assert_eq!(game.sheet("Bob").and_then(|s| s.get(Category::Aces)), Some(9));
    assert_eq!(game.current_player_index, 0);
    Ok(())
}

#[test]
fn filled_category_cannot_be_overwritten() -> Result<(), Rejection> {
    let state = started(&["Solo"])?;
    let state = apply(&state, &score(1, "Solo", Category::Chance, 20))?;
    assert_eq!(
        apply(&state, &score(1, "Solo", Category::Chance, 25)),
        Err(Rejection::CategoryFilled(Category::Chance))
    );

    let overwriting = Tracker::builder()
        .with_enforcement(Enforcement {
            allow_overwrite: true,
            ..Enforcement::strict()
        })
        .build();
    let state = overwriting.apply(&state, &score(1, "Solo", Category::Chance, 25))?;
    let sheet = state.game(1).and_then(|g| g.sheet("Solo")).expect("sheet");
    assert_eq!(sheet.get(Category::Chance), Some(25));
    Ok(())
}

#[test]
fn unknown_game_and_player_are_reported() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    assert_eq!(
        apply(&state, &score(9, "Alice", Category::Aces, 1)),
        Err(Rejection::UnknownGame(9))
    );
    assert_eq!(
        apply(&state, &Action::NextTurn { game_id: 9 }),
        Err(Rejection::UnknownGame(9))
    );
    assert_eq!(
        apply(&state, &score(1, "Mallory", Category::Aces, 1)),
        Err(Rejection::PlayerNotInGame {
            game: 1,
            player: "Mallory".into(),
        })
    );
    assert_eq!(reduce(&state, &Action::EndGame { game_id: 9 }), state);
    Ok(())
}

#[test]
fn players_added_after_start_are_not_in_the_game() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &Action::AddPlayer { name: "Cara".into() })?;
    let state = apply(&state, &score(1, "Alice", Category::Twos, 4))?;
    let state = apply(&state, &score(1, "Bob", Category::Twos, 4))?;
    // Rotation runs over the whole roster, so Cara now holds the turn.
    assert_eq!(state.game(1).map(|g| g.current_player_index), Some(2));
    assert_eq!(
        apply(&state, &score(1, "Cara", Category::Twos, 4)),
        Err(Rejection::PlayerNotInGame {
            game: 1,
            player: "Cara".into(),
        })
    );
    let state = apply(&state, &Action::NextTurn { game_id: 1 })?;
    assert_eq!(state.game(1).map(|g| g.current_player_index), Some(0));
    Ok(())
}

#[test]
fn next_round_caps_at_ten() -> Result<(), Rejection> {
    let mut state = started(&["Alice", "Bob"])?;
    for _ in 0..15 {
        state = apply(&state, &Action::NextRound { game_id: 1 })?;
    }
    assert_eq!(state.game(1).map(|g| g.current_round), Some(10));
    Ok(())
}

#[test]
fn end_game_freezes_summary() -> Result<(), Rejection> {
    let mut state = started(&["Alice", "Bob"])?;
    for action in [
        score(1, "Alice", Category::Aces, 3),
        score(1, "Bob", Category::Aces, 2),
        score(1, "Alice", Category::Twos, 6),
        score(1, "Bob", Category::Twos, 4),
    ] {
        state = apply(&state, &action)?;
    }
    let state = apply(&state, &Action::EndGame { game_id: 1 })?;
    let summary = state.summary(1).expect("summary");
    assert_eq!(summary.get("Alice"), Some(&9));
    assert_eq!(summary.get("Bob"), Some(&6));
    assert_eq!(state.current_game_id, None);
    assert_eq!(state.games.len(), 1);

    assert_eq!(
        apply(&state, &score(1, "Alice", Category::Threes, 9)),
        Err(Rejection::GameEnded(1))
    );
    assert_eq!(
        apply(&state, &Action::NextRound { game_id: 1 }),
        Err(Rejection::GameEnded(1))
    );

    let again = apply(&state, &Action::EndGame { game_id: 1 })?;
    assert_eq!(again.summary(1), state.summary(1));
    Ok(())
}

#[test]
fn end_game_moves_active_pointer_to_latest_other_game() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &Action::StartNewGame)?;
    let state = apply(&state, &Action::StartNewGame)?;
    let state = apply(&state, &Action::SetCurrentGame { game_id: 2 })?;
    let state = apply(&state, &Action::EndGame { game_id: 2 })?;
    assert_eq!(state.current_game_id, Some(3));
    let state = apply(&state, &Action::EndGame { game_id: 3 })?;
    assert_eq!(state.current_game_id, Some(2));
    Ok(())
}

#[test]
fn set_current_game_requires_existing_game() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &Action::StartNewGame)?;
    let state = apply(&state, &Action::SetCurrentGame { game_id: 1 })?;
    assert_eq!(state.current_game_id, Some(1));
    assert_eq!(
        apply(&state, &Action::SetCurrentGame { game_id: 7 }),
        Err(Rejection::UnknownGame(7))
    );
    Ok(())
}

#[test]
fn delete_game_purges_summary_and_falls_back() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &Action::StartNewGame)?;
    let state = apply(&state, &Action::EndGame { game_id: 1 })?;
    assert!(state.summary(1).is_some());

    let state = apply(&state, &Action::DeleteGame { game_id: 1 })?;
    assert!(state.summary(1).is_none());
    assert_eq!(state.games.len(), 1);
    assert_eq!(state.current_game_id, Some(2));

    let state = apply(&state, &Action::DeleteGame { game_id: 2 })?;
    assert!(state.games.is_empty());
    assert_eq!(state.current_game_id, None);
    Ok(())
}

#[test]
fn deleting_an_inactive_game_keeps_the_pointer() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &Action::StartNewGame)?;
    let state = apply(&state, &Action::DeleteGame { game_id: 1 })?;
    assert_eq!(state.current_game_id, Some(2));
    Ok(())
}

#[test]
fn game_ids_are_never_reused() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &Action::StartNewGame)?;
    let state = apply(&state, &Action::DeleteGame { game_id: 2 })?;
    let state = apply(&state, &Action::StartNewGame)?;
    assert_eq!(state.current_game_id, Some(3));
    let ids: Vec<u32> = state.games.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![1, 3]);
    Ok(())
}

#[test]
fn yahtzee_bonus_requires_yahtzee_and_stops_at_three() -> Result<(), Rejection> {
    let state = started(&["Solo"])?;
    let bonus = Action::AddYahtzeeBonus {
        game_id: 1,
        player: "Solo".into(),
    };
    assert_eq!(apply(&state, &bonus), Err(Rejection::BonusWithoutYahtzee));

    let mut state = apply(&state, &score(1, "Solo", Category::Yahtzee, 50))?;
    for _ in 0..3 {
        state = apply(&state, &bonus)?;
    }
    assert_eq!(apply(&state, &bonus), Err(Rejection::BonusLimitReached));
    let sheet = state.game(1).and_then(|g| g.sheet("Solo")).expect("sheet");
    assert_eq!(sheet.yahtzee_bonus(), 3);

    let state = apply(&state, &Action::EndGame { game_id: 1 })?;
    assert_eq!(state.summary(1).and_then(|s| s.get("Solo")), Some(&350));
    Ok(())
}

#[test]
fn scratched_yahtzee_is_enterable() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &score(1, "Alice", Category::Yahtzee, 0))?;
    let sheet = state.game(1).and_then(|g| g.sheet("Alice")).expect("sheet");
    assert_eq!(sheet.get(Category::Yahtzee), Some(0));
    Ok(())
}

#[test]
fn reset_all_returns_to_empty_state() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let state = apply(&state, &Action::EndGame { game_id: 1 })?;
    let state = apply(&state, &Action::ResetAll)?;
    assert_eq!(state, GameState::default());
    Ok(())
}

#[test]
fn apply_does_not_touch_input() -> Result<(), Rejection> {
    let state = started(&["Alice", "Bob"])?;
    let before = state.clone();
    let _ = apply(&state, &score(1, "Alice", Category::Fives, 15))?;
    let _ = apply(&state, &score(1, "Alice", Category::Fives, 16));
    assert_eq!(state, before);
    Ok(())
}

#[test]
fn lenient_extreme_scores_end_without_overflow() -> Result<(), Rejection> {
    let tracker = Tracker::builder().lenient().build();
    let mut state = started(&["Alice", "Bob"])?;
    for category in [Category::Aces, Category::Twos] {
        state = tracker.apply(&state, &score(1, "Alice", category, i32::MAX))?;
    }
    let state = tracker.apply(&state, &Action::EndGame { game_id: 1 })?;
    assert_eq!(
        state.summary(1).and_then(|s| s.get("Alice")).copied(),
        Some(2 * i64::from(i32::MAX))
    );
    let sheet = state.game(1).and_then(|g| g.sheet("Alice")).expect("sheet");
    assert_eq!(sheet.grand_total(), 2 * i64::from(i32::MAX) + 35);
    Ok(())
}

#[test]
fn lenient_removal_keeps_ended_game_turn_in_range() -> Result<(), Rejection> {
    let tracker = Tracker::builder().lenient().build();
    let mut state = started(&["Ann", "Ben", "Cy"])?;
    for action in [
        Action::NextTurn { game_id: 1 },
        Action::NextTurn { game_id: 1 },
        Action::EndGame { game_id: 1 },
        Action::RemovePlayer { name: "Ann".into() },
    ] {
        state = tracker.apply(&state, &action)?;
    }
    let game = state.game(1).expect("game 1");
    assert_eq!(state.players.len(), 2);
    assert_eq!(game.current_player_index, 1);
    assert_eq!(state.current_player(game).map(|p| p.name.as_str()), Some("Cy"));
    Ok(())
}

#[test]
fn strict_removal_leaves_ended_game_untouched() -> Result<(), Rejection> {
    let mut state = started(&["Ann", "Ben", "Cy"])?;
    for action in [
        Action::NextTurn { game_id: 1 },
        Action::NextTurn { game_id: 1 },
        Action::EndGame { game_id: 1 },
        Action::RemovePlayer { name: "Ann".into() },
    ] {
        state = apply(&state, &action)?;
    }
    assert_eq!(state.game(1).map(|g| g.current_player_index), Some(2));
    Ok(())
}
