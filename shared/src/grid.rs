use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{GRID_SIZE, INITIAL_TILES, SPAWN_HIGH_VALUE, SPAWN_LOW_VALUE, SPAWN_TWO_PROBABILITY};
use crate::error::GameError;
use crate::validation::validate_tile_value;

type Cells = [[Option<u32>; GRID_SIZE]; GRID_SIZE];

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Up, Direction::Right, Direction::Down];

    /// Unit vector `(dx, dy)`; `y` grows downwards.
    pub fn vector(self) -> (isize, isize) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `direction`, or `None` past the edge of the grid.
    pub fn step(self, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.vector();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        if x >= GRID_SIZE || y >= GRID_SIZE {
            return None;
        }
        Some(Position { x, y })
    }
}

/// One tile movement produced by a slide, in the order it was resolved.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// The tile at `from` slid to the empty cell `to`.
    Translate { from: Position, to: Position, value: u32 },
    /// The tile at `from` was absorbed by the equal tile at `into`, which now holds `value`.
    Merge { from: Position, into: Position, value: u32 },
}

impl Transition {
    pub fn destination(&self) -> Position {
        match *self {
            Transition::Translate { to, .. } => to,
            Transition::Merge { into, .. } => into,
        }
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Transition::Merge { .. })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub direction: Direction,
    pub transitions: Vec<Transition>,
    pub score_delta: u32,
    pub changed: bool,
}

impl MoveResult {
    pub fn merges(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(|t| t.is_merge())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedTile {
    pub position: Position,
    pub value: u32,
}

/// The 4x4 board. Cells are stored row-major, `cells[y][x]`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Grid {
    cells: Cells,
}

impl Grid {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an empty grid and spawns the two starting tiles.
    pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut grid = Self::empty();
        grid.populate(rng);
        grid
    }

    pub(crate) fn populate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<SpawnedTile> {
        (0..INITIAL_TILES).filter_map(|_| self.spawn_tile(rng)).collect()
    }

    /// Builds a grid from raw row values where `0` marks an empty cell.
    pub fn from_rows(rows: [[u32; GRID_SIZE]; GRID_SIZE]) -> Result<Self, GameError> {
        let mut cells: Cells = [[None; GRID_SIZE]; GRID_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                validate_tile_value(value).map_err(|source| GameError::InvalidTile { x, y, source })?;
                cells[y][x] = Some(value);
            }
        }
        Ok(Self { cells })
    }

    pub fn rows(&self) -> Cells {
        self.cells
    }

    /// Row values with `0` in empty cells.
    pub fn values(&self) -> [[u32; GRID_SIZE]; GRID_SIZE] {
        self.cells.map(|row| row.map(|cell| cell.unwrap_or(0)))
    }

    pub fn cell(&self, position: Position) -> Option<u32> {
        self.cells[position.y][position.x]
    }

    fn set(&mut self, position: Position, value: Option<u32>) {
        self.cells[position.y][position.x] = value;
    }

    pub fn empty_cells(&self) -> Vec<Position> {
        let mut empties = Vec::new();
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                if self.cells[y][x].is_none() {
                    empties.push(Position::new(x, y));
                }
            }
        }
        empties
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn highest_tile(&self) -> Option<u32> {
        self.cells.iter().flatten().flatten().copied().max()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Places a 2 (90%) or a 4 (10%) in a uniformly chosen empty cell.
    /// Returns `None` and leaves the grid untouched when it is full.
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<SpawnedTile> {
        let empties = self.empty_cells();
        let &position = empties.choose(rng)?;
        let value = if rng.gen_bool(SPAWN_TWO_PROBABILITY) {
            SPAWN_LOW_VALUE
        } else {
            SPAWN_HIGH_VALUE
        };
        self.set(position, Some(value));
        Some(SpawnedTile { position, value })
    }

    /// True while at least one slide could change the grid: an empty cell exists,
    /// or some tile equals its right or lower neighbour.
    pub fn has_available_moves(&self) -> bool {
        for y in 0..GRID_SIZE {
            for x in 0..GRID_SIZE {
                let Some(value) = self.cells[y][x] else {
                    return true;
                };
                if x + 1 < GRID_SIZE && self.cells[y][x + 1] == Some(value) {
                    return true;
                }
                if y + 1 < GRID_SIZE && self.cells[y + 1][x] == Some(value) {
                    return true;
                }
            }
        }
        false
    }

    /// Slides every tile towards `direction`, merging equal neighbours.
    ///
    /// Cells nearest the destination edge are resolved first so a tile never
    /// overtakes one that has not moved yet. A cell that received a merge during
    /// this slide will not merge again until the next one.
    pub fn slide(&mut self, direction: Direction) -> MoveResult {
        let (columns, rows) = traversal(direction);
        let mut merged = [[false; GRID_SIZE]; GRID_SIZE];
        let mut transitions = Vec::new();
        let mut score_delta = 0;

        for &y in &rows {
            for &x in &columns {
                let origin = Position::new(x, y);
                let Some(value) = self.cell(origin) else {
                    continue;
                };

                let farthest = self.farthest_position(origin, direction);
                match farthest.step(direction) {
                    Some(next) if self.cell(next) == Some(value) && !merged[next.y][next.x] => {
                        let doubled = value * 2;
                        self.set(next, Some(doubled));
                        self.set(origin, None);
                        merged[next.y][next.x] = true;
                        score_delta += doubled;
                        transitions.push(Transition::Merge {
                            from: origin,
                            into: next,
                            value: doubled,
                        });
                    }
                    _ if farthest != origin => {
                        self.set(farthest, Some(value));
                        self.set(origin, None);
                        transitions.push(Transition::Translate {
                            from: origin,
                            to: farthest,
                            value,
                        });
                    }
                    _ => {}
                }
            }
        }

        let changed = !transitions.is_empty();
        debug!(
            "slide {}: {} transitions, score delta {}",
            direction,
            transitions.len(),
            score_delta
        );
        MoveResult {
            direction,
            transitions,
            score_delta,
            changed,
        }
    }

    fn farthest_position(&self, origin: Position, direction: Direction) -> Position {
        let mut current = origin;
        while let Some(next) = current.step(direction) {
            if self.cell(next).is_some() {
                break;
            }
            current = next;
        }
        current
    }
}

/// Column and row visiting order for a slide in `direction`.
fn traversal(direction: Direction) -> (Vec<usize>, Vec<usize>) {
    let (dx, dy) = direction.vector();
    let mut columns: Vec<usize> = (0..GRID_SIZE).collect();
    let mut rows: Vec<usize> = (0..GRID_SIZE).collect();
    if dx == 1 {
        columns.reverse();
    }
    if dy == 1 {
        rows.reverse();
    }
    (columns, rows)
}

impl FromStr for Grid {
    type Err = GameError;

    /// Parses rows separated by `/` or newlines; `.`, `-` and `0` mark empty cells.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .split(|c| c == '/' || c == '\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != GRID_SIZE {
            return Err(GameError::MalformedGrid(format!(
                "expected {} rows, found {}",
                GRID_SIZE,
                lines.len()
            )));
        }

        let mut rows = [[0u32; GRID_SIZE]; GRID_SIZE];
        for (y, line) in lines.iter().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() != GRID_SIZE {
                return Err(GameError::MalformedGrid(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    tokens.len(),
                    GRID_SIZE
                )));
            }
            for (x, token) in tokens.iter().enumerate() {
                rows[y][x] = match *token {
                    "." | "-" => 0,
                    number => number.parse()?,
                };
            }
        }
        Self::from_rows(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, cell) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                match cell {
                    Some(value) => write!(f, "{:>5}", value)?,
                    None => write!(f, "{:>5}", ".")?,
                }
            }
        }
        Ok(())
    }
}
