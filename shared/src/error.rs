use std::fmt;

use validator::ValidationError;

#[derive(Debug)]
pub enum GameError {
    GameOver,
    InvalidTile {
        x: usize,
        y: usize,
        source: ValidationError,
    },
    MalformedGrid(String),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameOver => write!(f, "the game is over, start a new game to keep playing"),
            GameError::InvalidTile { x, y, source } => {
                write!(f, "invalid tile at ({}, {}): {}", x, y, source.code)
            }
            GameError::MalformedGrid(reason) => write!(f, "malformed grid: {}", reason),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::InvalidTile { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::num::ParseIntError> for GameError {
    fn from(err: std::num::ParseIntError) -> Self {
        GameError::MalformedGrid(err.to_string())
    }
}
