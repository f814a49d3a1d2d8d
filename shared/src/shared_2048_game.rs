use serde::{Serialize, Deserialize};
use rand::Rng;
use log::info;

use crate::error::GameError;
use crate::grid::{Direction, Grid, MoveResult, SpawnedTile};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Game2048 {
    grid: Grid,
    score: u32,
    status: GameStatus,
    moves_made: u32,
    // Tiles placed by the last restart, kept for the renderer's first frame.
    initial_spawns: Vec<SpawnedTile>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PublicGame2048 {
    pub board: Vec<Vec<Option<u32>>>,
    pub score: u32,
    pub game_over: bool,
}

/// Everything the renderer needs to present one accepted move.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Turn {
    pub movement: MoveResult,
    pub spawned: Option<SpawnedTile>,
    pub status: GameStatus,
}

impl Turn {
    pub fn changed(&self) -> bool {
        self.movement.changed
    }
}

impl Default for Game2048 {
    fn default() -> Self {
        Self::new()
    }
}

impl Game2048 {
    /// Creates a new game seeded from the thread-local generator.
    pub fn new() -> Self {
        Self::with_rng(&mut rand::thread_rng())
    }

    /// Creates a new game, drawing the two starting tiles from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Self {
            grid: Grid::empty(),
            score: 0,
            status: GameStatus::Playing,
            moves_made: 0,
            initial_spawns: Vec::new(),
        };
        game.restart_with_rng(rng);
        game
    }

    /// Resumes play from an existing grid; the status is derived from it.
    pub fn from_grid(grid: Grid, score: u32) -> Self {
        let status = if grid.has_available_moves() {
            GameStatus::Playing
        } else {
            GameStatus::GameOver
        };
        Self {
            grid,
            score,
            status,
            moves_made: 0,
            initial_spawns: Vec::new(),
        }
    }

    pub fn restart(&mut self) {
        self.restart_with_rng(&mut rand::thread_rng());
    }

    /// Discards the current grid and score and deals a fresh board.
    pub fn restart_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut grid = Grid::empty();
        self.initial_spawns = grid.populate(rng);
        self.grid = grid;
        self.score = 0;
        self.moves_made = 0;
        self.status = GameStatus::Playing;
        info!("new game started");
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn moves_made(&self) -> u32 {
        self.moves_made
    }

    pub fn initial_spawns(&self) -> &[SpawnedTile] {
        &self.initial_spawns
    }

    /// Returns a public representation of the game state for the renderer.
    pub fn to_public(&self) -> PublicGame2048 {
        PublicGame2048 {
            board: self.grid.rows().iter().map(|row| row.to_vec()).collect(),
            score: self.score,
            game_over: self.is_over(),
        }
    }

    pub fn make_move(&mut self, direction: Direction) -> Result<Turn, GameError> {
        self.make_move_with_rng(direction, &mut rand::thread_rng())
    }

    /// Processes a move in the given direction.
    /// A move that changes nothing leaves the grid and score untouched and spawns
    /// nothing. Otherwise a tile is spawned and the game over state is checked.
    pub fn make_move_with_rng<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<Turn, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let movement = self.grid.slide(direction);
        if !movement.changed {
            return Ok(Turn {
                movement,
                spawned: None,
                status: self.status,
            });
        }

        self.score = self.score.saturating_add(movement.score_delta);
        self.moves_made += 1;
        let spawned = self.grid.spawn_tile(rng);
        if !self.grid.has_available_moves() {
            self.status = GameStatus::GameOver;
            info!(
                "game over after {} moves, final score {}, best tile {}",
                self.moves_made,
                self.score,
                self.grid.highest_tile().unwrap_or(0)
            );
        }

        Ok(Turn {
            movement,
            spawned,
            status: self.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_new_game_spawns_two_tiles() {
        let game = Game2048::with_rng(&mut rng());
        assert_eq!(game.grid().tile_count(), 2);
        assert_eq!(game.initial_spawns().len(), 2);
        assert_eq!(game.score(), 0);
        assert_eq!(game.status(), GameStatus::Playing);
        for spawn in game.initial_spawns() {
            assert_eq!(game.grid().cell(spawn.position), Some(spawn.value));
        }
    }

    #[test]
    fn test_move_left_merge_scores_and_spawns() {
        let grid: Grid = "2 2 . . / . . . . / . . . . / . . . .".parse().unwrap();
        let mut game = Game2048::from_grid(grid, 0);
        let turn = game.make_move_with_rng(Direction::Left, &mut rng()).unwrap();

        assert!(turn.changed());
        assert_eq!(game.score(), 4);
        assert_eq!(game.moves_made(), 1);
        assert_eq!(game.grid().cell(crate::grid::Position::new(0, 0)), Some(4));
        let spawned = turn.spawned.unwrap();
        assert_ne!(spawned.position, crate::grid::Position::new(0, 0));
        assert_eq!(game.grid().tile_count(), 2);
    }

    #[test]
    fn test_no_op_move_changes_nothing() {
        let grid: Grid = "2 4 . . / . . . . / . . . . / . . . .".parse().unwrap();
        let mut game = Game2048::from_grid(grid, 12);
        let turn = game.make_move_with_rng(Direction::Left, &mut rng()).unwrap();

        assert!(!turn.changed());
        assert_eq!(turn.spawned, None);
        assert_eq!(game.score(), 12);
        assert_eq!(game.moves_made(), 0);
        assert_eq!(*game.grid(), grid);
    }

    #[test]
    fn test_last_move_ends_game() {
        // Sliding left turns the top row into 4 8 16 and opens (3, 0). Whatever
        // spawns there matches neither the 16 beside it nor the 64 below it.
        let grid: Grid = "2 2 8 16 / 8 16 32 64 / 16 32 64 128 / 32 64 128 256".parse().unwrap();
        let mut game = Game2048::from_grid(grid, 0);
        assert_eq!(game.status(), GameStatus::Playing);

        let turn = game.make_move_with_rng(Direction::Left, &mut rng()).unwrap();

        assert!(turn.changed());
        assert_eq!(turn.movement.score_delta, 4);
        assert_eq!(turn.spawned.map(|tile| tile.position), Some(crate::grid::Position::new(3, 0)));
        assert!(game.grid().is_full());
        assert!(game.is_over());
        assert_eq!(turn.status, GameStatus::GameOver);
        assert!(game.to_public().game_over);
        assert!(matches!(game.make_move(Direction::Right), Err(GameError::GameOver)));
    }

    #[test]
    fn test_score_saturates() {
        let grid: Grid = "2 2 . . / . . . . / . . . . / . . . .".parse().unwrap();
        let mut game = Game2048::from_grid(grid, u32::MAX - 1);
        game.make_move_with_rng(Direction::Left, &mut rng()).unwrap();
        assert_eq!(game.score(), u32::MAX);
    }

    #[test]
    fn test_moves_rejected_after_game_over() {
        let grid: Grid = "2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 2".parse().unwrap();
        let mut game = Game2048::from_grid(grid, 100);
        assert!(game.is_over());
        assert!(game.to_public().game_over);
        assert!(matches!(game.make_move(Direction::Up), Err(GameError::GameOver)));
    }

    #[test]
    fn test_restart_clears_game_over() {
        let grid: Grid = "2 4 2 4 / 4 2 4 2 / 2 4 2 4 / 4 2 4 2".parse().unwrap();
        let mut game = Game2048::from_grid(grid, 100);
        game.restart_with_rng(&mut rng());

        assert_eq!(game.status(), GameStatus::Playing);
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid().tile_count(), 2);
        assert!(!game.to_public().game_over);
    }

    #[test]
    fn test_public_board_matches_grid() {
        let grid: Grid = "2 . . . / . 4 . . / . . 8 . / . . . 16".parse().unwrap();
        let game = Game2048::from_grid(grid, 28);
        let public = game.to_public();
        assert_eq!(public.score, 28);
        assert_eq!(public.board.len(), 4);
        assert_eq!(public.board[1], vec![None, Some(4), None, None]);
        assert_eq!(public.board[3][3], Some(16));
    }

    #[test]
    fn test_random_play_keeps_invariants() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut game = Game2048::with_rng(&mut rng);
        let mut expected_score = 0;
        for i in 0..2000 {
            if game.is_over() {
                break;
            }
            let direction = Direction::ALL[i % 4];
            let turn = game.make_move_with_rng(direction, &mut rng).unwrap();
            if turn.changed() {
                expected_score += turn.movement.score_delta;
                assert!(turn.spawned.is_some());
            }
            assert_eq!(game.score(), expected_score);
        }
        assert!(game.is_over() || game.grid().has_available_moves());
    }
}
