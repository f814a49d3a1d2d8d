pub const GRID_SIZE: usize = 4;
pub const INITIAL_TILES: usize = 2;

pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;
pub const SPAWN_LOW_VALUE: u32 = 2;
pub const SPAWN_HIGH_VALUE: u32 = 4;
pub const MIN_TILE_VALUE: u32 = 2;
// Largest tile a 4x4 board can build from spawned 4s.
pub const MAX_TILE_VALUE: u32 = 1 << 17;

pub const DEFAULT_ANIMATION_MS: u32 = 100;
pub const DEFAULT_MIN_MOVE_INTERVAL_MS: u32 = 0;
pub const MAX_ANIMATION_MS: u32 = 2000;

pub const MIN_SWIPE_DISTANCE: f64 = 30.0;

pub const GAME_OVER_MESSAGE: &str = "Game Over!";
pub const SCORE_LABEL: &str = "Score";
