//! Integration tests for the reference 7x9 maze and the move gates.

use trailmaze::{
    Cell, CellKind, Facing, GameConfig, GameEvent, GamePhase, GameState, Lane, MoveOutcome, Outcome,
    RejectReason, ScriptedSource,
};

const SETTLE: f64 = 0.5;
const OUTCOME: f64 = 1.5;

/// Draws for a straight path along `row` on a 9-column grid.
fn straight_path(row: usize) -> Vec<usize> {
    let mut draws = vec![row];
    draws.extend(std::iter::repeat(2).take(6));
    draws
}

/// Draws for (3,1) (3,2) (2,2) (2,3) .. (2,7).
fn reference_path() -> Vec<usize> {
    vec![3, 2, 0, 2, 2, 2, 2, 2]
}

/// A session whose third level uses the reference path.
fn session_reaching_level_three() -> GameState<ScriptedSource> {
    let mut draws = straight_path(0);
    draws.extend(straight_path(5));
    draws.extend(reference_path());

    let mut game = GameState::new(GameConfig::default(), ScriptedSource::new(draws))
        .expect("Failed to start session");
    clear_level(&mut game);
    clear_level(&mut game);
    assert_eq!(game.progress().level(), 3);
    assert_eq!(game.player().position, Cell::new(3, 1));
    game.drain_events();
    game
}

/// Walks the hinted route to the exit lane and waits out the outcome screen.
fn clear_level(game: &mut GameState<ScriptedSource>) {
    while game.phase() == GamePhase::Playing {
        let target = game.hint().expect("Generated levels always have a route");
        game.request_move(target).expect("Hinted move was rejected");
        game.advance(SETTLE).expect("Failed to advance");
    }
    assert_eq!(game.phase(), GamePhase::ShowingOutcome(Outcome::Won));
    game.advance(OUTCOME).expect("Failed to advance");
    assert_eq!(game.phase(), GamePhase::Playing);
}

fn move_and_settle(game: &mut GameState<ScriptedSource>, target: Cell) -> Vec<GameEvent> {
    game.request_move(target).expect("Move was rejected");
    game.advance(SETTLE).expect("Failed to advance")
}

#[test]
fn test_reference_path_is_generated() {
    let game = GameState::new(GameConfig::default(), ScriptedSource::new(reference_path()))
        .expect("Failed to start session");

    let cells: Vec<Cell> = game.grid().path().cells().collect();
    assert_eq!(
        cells,
        vec![
            Cell::new(3, 1),
            Cell::new(3, 2),
            Cell::new(2, 2),
            Cell::new(2, 3),
            Cell::new(2, 4),
            Cell::new(2, 5),
            Cell::new(2, 6),
            Cell::new(2, 7),
        ]
    );
    assert_eq!(game.grid().classify(Cell::new(4, 2)), CellKind::DeadCell);
    assert_eq!(
        game.grid().classify(Cell::new(5, 8)),
        CellKind::BoundaryLane(Lane::Exit)
    );
}

#[test]
fn test_traverse_reveals_target_and_hides_rest() {
    let mut game = session_reaching_level_three();

    let events = move_and_settle(&mut game, Cell::new(3, 2));
    assert!(events.contains(&GameEvent::PlayerMoved {
        from: Cell::new(3, 1),
        to: Cell::new(3, 2),
        facing: Facing::Right,
    }));

    let visibility = game.visibility();
    assert_eq!(visibility.trail(), vec![Cell::new(3, 1), Cell::new(3, 2)]);
    for cell in game.grid().path().cells() {
        let expected = cell == Cell::new(3, 1) || cell == Cell::new(3, 2);
        assert_eq!(visibility.is_visible(cell), expected, "{}", cell);
    }
}

#[test]
fn test_death_resets_level_and_reports_height() {
    let mut game = session_reaching_level_three();
    move_and_settle(&mut game, Cell::new(3, 2));
    let trail_before = game.visibility().clone();

    let pending = game.request_move(Cell::new(4, 2)).expect("Move was rejected");
    assert_eq!(pending.outcome, MoveOutcome::Die);

    let events = game.advance(SETTLE).expect("Failed to advance");
    assert_eq!(
        events,
        vec![
            GameEvent::MoveStarted {
                from: Cell::new(3, 2),
                to: Cell::new(4, 2),
                facing: Facing::Down,
            },
            GameEvent::PlayerDied { at: Cell::new(4, 2) },
            GameEvent::HeightReached { level: 3 },
            GameEvent::LevelChanged { level: 1 },
        ]
    );
    assert_eq!(game.progress().level(), 1);
    assert_eq!(game.progress().best_height(), 3);
    assert_eq!(game.visibility(), &trail_before);
    assert_eq!(game.phase(), GamePhase::ShowingOutcome(Outcome::Died));

    game.advance(OUTCOME).expect("Failed to advance");
    assert_eq!(game.phase(), GamePhase::GameOver);
}

#[test]
fn test_exit_lane_wins_and_clears_trail() {
    let mut game = session_reaching_level_three();
    for cell in [
        Cell::new(3, 2),
        Cell::new(2, 2),
        Cell::new(2, 3),
        Cell::new(2, 4),
        Cell::new(2, 5),
        Cell::new(2, 6),
        Cell::new(2, 7),
    ] {
        move_and_settle(&mut game, cell);
    }
    assert_eq!(game.visibility().trail_len(), 8);

    let events = move_and_settle(&mut game, Cell::new(2, 8));
    assert_eq!(
        events,
        vec![
            GameEvent::MoveStarted {
                from: Cell::new(2, 7),
                to: Cell::new(2, 8),
                facing: Facing::Right,
            },
            GameEvent::TrailCleared {
                cells: vec![
                    Cell::new(2, 2),
                    Cell::new(2, 3),
                    Cell::new(2, 4),
                    Cell::new(2, 5),
                    Cell::new(2, 6),
                    Cell::new(2, 7),
                    Cell::new(3, 1),
                    Cell::new(3, 2),
                ],
            },
            GameEvent::PlayerWon { at: Cell::new(2, 8) },
            GameEvent::LevelChanged { level: 4 },
        ]
    );
    assert_eq!(game.progress().level(), 4);
    assert_eq!(game.visibility().trail_len(), 0);
    assert_eq!(game.visibility().hidden_len(), 0);
}

#[test]
fn test_entry_lane_is_neutral_on_any_row() {
    let mut game = GameState::new(GameConfig::default(), ScriptedSource::new(reference_path()))
        .expect("Failed to start session");

    move_and_settle(&mut game, Cell::new(3, 0));
    for row in (0..3).rev() {
        let events = move_and_settle(&mut game, Cell::new(row, 0));
        assert!(!events.iter().any(|event| matches!(
            event,
            GameEvent::PlayerDied { .. } | GameEvent::CellRevealed { .. }
        )));
    }
    assert_eq!(game.player().position, Cell::new(0, 0));
    assert!(game.player().is_alive());
    assert_eq!(game.visibility().trail(), vec![Cell::new(3, 1)]);
    assert_eq!(game.visibility().hidden_len(), 0);
}

#[test]
fn test_non_adjacent_request_changes_nothing() {
    let mut game = GameState::new(GameConfig::default(), ScriptedSource::new(reference_path()))
        .expect("Failed to start session");
    game.drain_events();
    let before = game.snapshot();

    for target in [Cell::new(2, 2), Cell::new(3, 3), Cell::new(3, 1), Cell::new(-1, 1)] {
        assert!(game.request_move(target).is_err());
    }
    assert!(game.advance(5.0).expect("Failed to advance").is_empty());

    let mut after = game.snapshot();
    assert_eq!(after.statistics.rejected_moves, 4);
    after.statistics.rejected_moves = 0;
    assert_eq!(after, before);
}

#[test]
fn test_second_request_during_transition_keeps_first() {
    let mut game = GameState::new(GameConfig::default(), ScriptedSource::new(reference_path()))
        .expect("Failed to start session");

    let first = game.request_move(Cell::new(3, 2)).expect("Move was rejected");
    let second = game
        .request_move(Cell::new(4, 1))
        .expect_err("Second request should be rejected");
    assert_eq!(second.reason, RejectReason::InTransition);
    assert_eq!(game.pending_move(), Some(first));

    game.advance(SETTLE).expect("Failed to advance");
    assert_eq!(game.player().position, Cell::new(3, 2));
    assert!(game.player().is_alive());
}
