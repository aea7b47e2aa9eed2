//! Property tests for path generation and the visibility rules that depend on
//! it.

use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::BTreeSet;
use trailmaze::{
    solve_route, validate_path, GameConfig, GamePhase, GameState, GenerationConfig, Generator,
    GridModel, PathGenerator,
};

fn generation_config() -> impl Strategy<Value = GenerationConfig> {
    (any::<u64>(), 1i32..=20, 3i32..=24)
        .prop_map(|(seed, rows, cols)| GenerationConfig::with_size(seed, rows, cols))
}

proptest! {
    /// Generated paths start in column 1, end in the last interior column and
    /// only ever step one row or one column to the right.
    #[test]
    fn prop_generated_paths_are_valid(config in generation_config()) {
        let size = config.grid_size().unwrap();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let path = PathGenerator::new().generate(&config, &mut rng).unwrap();

        prop_assert!(validate_path(&path, size).is_ok());
        prop_assert_eq!(path.first().map(|cell| cell.col), Some(1));
        prop_assert_eq!(path.last().map(|cell| cell.col), Some(config.cols - 2));

        for pair in path.steps().windows(2) {
            let col_delta = pair[1].col - pair[0].col;
            let row_delta = pair[1].row - pair[0].row;
            prop_assert!(col_delta == 0 || col_delta == 1);
            prop_assert!((-1..=1).contains(&row_delta));
            prop_assert!(col_delta == 0 || row_delta == 0);
        }
        for cell in path.steps() {
            prop_assert!(cell.row >= 0 && cell.row < config.rows);
        }
    }

    /// Every interior column holds at least one path cell.
    #[test]
    fn prop_path_spans_every_interior_column(config in generation_config()) {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let path = PathGenerator::new().generate(&config, &mut rng).unwrap();

        let columns: BTreeSet<i32> = path.cells().map(|cell| cell.col).collect();
        let expected: BTreeSet<i32> = (1..=config.cols - 2).collect();
        prop_assert_eq!(columns, expected);
    }

    /// A safe route to the exit lane exists from the spawn cell.
    #[test]
    fn prop_spawn_has_safe_route_to_exit(config in generation_config()) {
        let size = config.grid_size().unwrap();
        let mut rng = StdRng::seed_from_u64(config.seed);
        let path = PathGenerator::new().generate(&config, &mut rng).unwrap();
        let start = path.first().unwrap();
        let grid = GridModel::new(size, path);

        let route = solve_route(&grid, start);
        prop_assert!(route.is_some());
        for cell in route.unwrap() {
            prop_assert!(grid.classify(cell).is_safe());
        }
    }

    /// After any number of traverses only the trail is visible on the path.
    #[test]
    fn prop_only_trail_visible_after_traverse(seed in any::<u64>(), steps in 1usize..12) {
        let mut game = GameState::new(GameConfig::default(), StdRng::seed_from_u64(seed)).unwrap();

        for _ in 0..steps {
            if game.phase() != GamePhase::Playing {
                break;
            }
            let target = game.hint().unwrap();
            let is_exit = target.col == game.grid().size().exit_col();
            game.request_move(target).unwrap();
            game.advance(0.5).unwrap();
            if is_exit {
                break;
            }

            for cell in game.grid().path().cells() {
                prop_assert_eq!(
                    game.visibility().is_visible(cell),
                    game.visibility().is_revealed(cell)
                );
            }
            prop_assert!(game.visibility().is_revealed(game.player().position));
        }
    }
}
