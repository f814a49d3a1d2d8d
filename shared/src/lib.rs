pub mod constants;
pub mod error;
pub mod grid;
pub mod input;
pub mod settings;
pub mod shared_2048_game;
pub mod validation;

pub use error::GameError;
pub use grid::{Direction, Grid, MoveResult, Position, SpawnedTile, Transition};
pub use shared_2048_game::{Game2048, GameStatus, PublicGame2048, Turn};
