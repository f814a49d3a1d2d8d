use log::warn;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ANIMATION_MS, DEFAULT_MIN_MOVE_INTERVAL_MS, MAX_ANIMATION_MS};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Slide tiles between cells instead of redrawing the board in place.
    pub animate: bool,
    pub animation_ms: u32,
    pub min_move_interval_ms: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            animate: true,
            animation_ms: DEFAULT_ANIMATION_MS,
            min_move_interval_ms: DEFAULT_MIN_MOVE_INTERVAL_MS,
        }
    }
}

impl GameSettings {
    /// Applies overrides read from the page URL, e.g. `?animate=0&animation_ms=150`.
    /// Each argument is the decoded value of its query parameter, if present;
    /// unparsable values keep their defaults.
    pub fn from_params(
        animate: Option<&str>,
        animation_ms: Option<&str>,
        min_interval_ms: Option<&str>,
    ) -> Self {
        let mut settings = Self::default();

        if let Some(value) = animate {
            match parse_flag(value) {
                Some(flag) => settings.animate = flag,
                None => warn!("ignoring animate={:?}", value),
            }
        }
        if let Some(value) = animation_ms {
            match value.parse::<u32>() {
                Ok(ms) => settings.animation_ms = ms.min(MAX_ANIMATION_MS),
                Err(_) => warn!("ignoring animation_ms={:?}", value),
            }
        }
        if let Some(value) = min_interval_ms {
            match value.parse::<u32>() {
                Ok(ms) => settings.min_move_interval_ms = ms,
                Err(_) => warn!("ignoring min_interval_ms={:?}", value),
            }
        }
        settings
    }

    /// How long the renderer holds the move gate after applying a move.
    pub fn settle_ms(&self) -> u32 {
        if self.animate {
            self.animation_ms
        } else {
            0
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "" | "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
