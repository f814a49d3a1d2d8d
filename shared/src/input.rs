use std::collections::HashMap;
use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_SWIPE_DISTANCE;
use crate::grid::Direction;

static KEY_BINDINGS: Lazy<HashMap<&'static str, Direction>> = Lazy::new(|| {
    let bindings: [(&[&'static str], Direction); 4] = [
        (&["ArrowUp", "w", "W", "i", "I", "8", "Numpad8"], Direction::Up),
        (&["ArrowDown", "s", "S", "k", "K", "2", "Numpad2"], Direction::Down),
        (&["ArrowLeft", "a", "A", "j", "J", "4", "Numpad4"], Direction::Left),
        (&["ArrowRight", "d", "D", "l", "L", "6", "Numpad6"], Direction::Right),
    ];
    bindings
        .iter()
        .flat_map(|(keys, direction)| keys.iter().map(move |key| (*key, *direction)))
        .collect()
});

/// Maps a `KeyboardEvent.key` value to a direction. Anything else is ignored.
pub fn direction_for_key(key: &str) -> Option<Direction> {
    KEY_BINDINGS.get(key).copied()
}

/// Classifies a touch gesture by its dominant axis. Short gestures yield `None`.
pub fn direction_for_swipe(delta_x: f64, delta_y: f64) -> Option<Direction> {
    if delta_x.abs() > delta_y.abs() {
        if delta_x > MIN_SWIPE_DISTANCE {
            Some(Direction::Right)
        } else if delta_x < -MIN_SWIPE_DISTANCE {
            Some(Direction::Left)
        } else {
            None
        }
    } else if delta_y > MIN_SWIPE_DISTANCE {
        Some(Direction::Down)
    } else if delta_y < -MIN_SWIPE_DISTANCE {
        Some(Direction::Up)
    } else {
        None
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    Busy,
    TooSoon,
}

impl fmt::Display for GateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateError::Busy => write!(f, "previous move is still being applied"),
            GateError::TooSoon => write!(f, "moves are coming in too fast"),
        }
    }
}

impl std::error::Error for GateError {}

/// Admits one move at a time.
///
/// The dispatcher asks for a ticket before calling into the engine and the
/// renderer hands it back once the move is fully on screen. While a ticket is
/// outstanding every further request is refused, so the renderer never sees a
/// grid that is ahead of what it is animating.
#[derive(Debug, Clone, Default)]
pub struct MoveGate {
    in_flight: Option<MoveTicket>,
    next_ticket: u64,
    last_started_ms: Option<f64>,
    min_interval_ms: f64,
}

impl MoveGate {
    pub fn new(min_interval_ms: u32) -> Self {
        Self {
            min_interval_ms: f64::from(min_interval_ms),
            ..Self::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn try_begin(&mut self, now_ms: f64) -> Result<MoveTicket, GateError> {
        if self.in_flight.is_some() {
            return Err(GateError::Busy);
        }
        if let Some(last) = self.last_started_ms {
            if now_ms - last < self.min_interval_ms {
                return Err(GateError::TooSoon);
            }
        }

        let ticket = MoveTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.last_started_ms = Some(now_ms);
        Ok(ticket)
    }

    /// Releases the gate. Returns false for a ticket that is no longer current,
    /// e.g. one issued before `reset`.
    pub fn finish(&mut self, ticket: MoveTicket) -> bool {
        if self.in_flight == Some(ticket) {
            self.in_flight = None;
            true
        } else {
            debug!("ignoring stale move ticket {:?}", ticket);
            false
        }
    }

    /// Drops any outstanding ticket; used when a new game replaces the board.
    pub fn reset(&mut self) {
        self.in_flight = None;
        self.last_started_ms = None;
    }
}
