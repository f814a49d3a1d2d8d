use shared::grid::{Grid, Position, SpawnedTile, Transition};
use shared::shared_2048_game::Turn;

pub type TileId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    Idle,
    /// Spawned by the last move or deal.
    New,
    /// Received a merge in the last move and shows the doubled value.
    Merged,
    /// Slid into a merge target; removed once the move settles.
    Absorbed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayTile {
    pub id: TileId,
    pub position: Position,
    pub value: u32,
    pub state: TileState,
}

/// Renderer-side tiles keyed by a stable id, driven only by engine output.
#[derive(Debug, Default)]
pub struct TileLayer {
    tiles: Vec<DisplayTile>,
    next_id: TileId,
}

impl TileLayer {
    pub fn from_grid(grid: &Grid) -> Self {
        let mut layer = Self::default();
        layer.reset(grid);
        layer
    }

    /// Forgets every tile and deals fresh ids for the occupied cells.
    pub fn reset(&mut self, grid: &Grid) {
        self.tiles.clear();
        for (y, row) in grid.rows().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(value) = *cell {
                    self.push(Position::new(x, y), value, TileState::New);
                }
            }
        }
    }

    pub fn tiles(&self) -> &[DisplayTile] {
        &self.tiles
    }

    pub fn apply(&mut self, turn: &Turn) {
        self.settle();
        for transition in &turn.movement.transitions {
            match *transition {
                Transition::Translate { from, to, .. } => {
                    if let Some(tile) = self.live_at_mut(from) {
                        tile.position = to;
                    }
                }
                Transition::Merge { from, into, value } => {
                    if let Some(target) = self.live_at_mut(into) {
                        target.value = value;
                        target.state = TileState::Merged;
                    }
                    if let Some(moving) = self.live_at_mut(from) {
                        moving.position = into;
                        moving.state = TileState::Absorbed;
                    }
                }
            }
        }
        if let Some(SpawnedTile { position, value }) = turn.spawned {
            self.push(position, value, TileState::New);
        }
    }

    /// Drops absorbed tiles and clears per-move states.
    pub fn settle(&mut self) {
        self.tiles.retain(|tile| tile.state != TileState::Absorbed);
        for tile in &mut self.tiles {
            tile.state = TileState::Idle;
        }
    }

    fn push(&mut self, position: Position, value: u32, state: TileState) {
        self.tiles.push(DisplayTile {
            id: self.next_id,
            position,
            value,
            state,
        });
        self.next_id += 1;
    }

    fn live_at_mut(&mut self, position: Position) -> Option<&mut DisplayTile> {
        self.tiles
            .iter_mut()
            .find(|tile| tile.position == position && tile.state != TileState::Absorbed)
    }

    fn live_at(&self, position: Position) -> Option<&DisplayTile> {
        self.tiles
            .iter()
            .find(|tile| tile.position == position && tile.state != TileState::Absorbed)
    }

    /// True when the live tiles sit exactly on the grid's occupied cells.
    pub fn matches(&self, grid: &Grid) -> bool {
        let live: Vec<&DisplayTile> = self
            .tiles
            .iter()
            .filter(|tile| tile.state != TileState::Absorbed)
            .collect();
        let mut positions: Vec<Position> = live.iter().map(|tile| tile.position).collect();
        positions.sort();
        positions.dedup();

        positions.len() == live.len()
            && live.len() == grid.tile_count()
            && live.iter().all(|tile| grid.cell(tile.position) == Some(tile.value))
    }

    pub fn id_at(&self, position: Position) -> Option<TileId> {
        self.live_at(position).map(|tile| tile.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use shared::grid::Direction;
    use shared::shared_2048_game::Game2048;

    fn game(s: &str) -> Game2048 {
        Game2048::from_grid(s.parse().unwrap(), 0)
    }

    #[test]
    fn translate_keeps_identity() {
        let mut game = game(". . . 2 / . . . . / . . . . / . . . .");
        let mut layer = TileLayer::from_grid(game.grid());
        let id = layer.id_at(Position::new(3, 0)).unwrap();

        let turn = game.make_move_with_rng(Direction::Left, &mut StdRng::seed_from_u64(1)).unwrap();
        layer.apply(&turn);

        assert_eq!(layer.id_at(Position::new(0, 0)), Some(id));
        assert!(layer.matches(game.grid()));
    }

    #[test]
    fn merge_relabels_target_and_absorbs_mover() {
        let mut game = game("2 2 4 . / . . . . / . . . . / . . . .");
        let mut layer = TileLayer::from_grid(game.grid());
        let target = layer.id_at(Position::new(0, 0)).unwrap();
        let mover = layer.id_at(Position::new(1, 0)).unwrap();
        let four = layer.id_at(Position::new(2, 0)).unwrap();

        let turn = game.make_move_with_rng(Direction::Left, &mut StdRng::seed_from_u64(5)).unwrap();
        layer.apply(&turn);

        let absorbed = layer.tiles().iter().find(|t| t.id == mover).unwrap();
        assert_eq!(absorbed.state, TileState::Absorbed);
        assert_eq!(absorbed.position, Position::new(0, 0));
        let merged = layer.tiles().iter().find(|t| t.id == target).unwrap();
        assert_eq!(merged.value, 4);
        assert_eq!(merged.state, TileState::Merged);
        assert_eq!(layer.id_at(Position::new(1, 0)), Some(four));
        assert!(layer.matches(game.grid()));

        layer.settle();
        assert!(layer.tiles().iter().all(|t| t.id != mover));
        assert!(layer.tiles().iter().all(|t| t.state == TileState::Idle));
        assert!(layer.matches(game.grid()));
    }

    #[test]
    fn spawned_tile_gets_fresh_id() {
        let mut game = game("2 . . . / . . . . / . . . . / . . . .");
        let mut layer = TileLayer::from_grid(game.grid());
        let turn = game.make_move_with_rng(Direction::Right, &mut StdRng::seed_from_u64(9)).unwrap();
        layer.apply(&turn);

        let spawned = turn.spawned.unwrap();
        let tile = layer.tiles().iter().find(|t| t.position == spawned.position).unwrap();
        assert_eq!(tile.state, TileState::New);
        assert_eq!(layer.tiles().len(), 2);
        assert_ne!(layer.tiles()[0].id, layer.tiles()[1].id);
    }

    #[test]
    fn layer_tracks_a_long_random_game() {
        let mut rng = StdRng::seed_from_u64(2024);
        let mut game = Game2048::with_rng(&mut rng);
        let mut layer = TileLayer::from_grid(game.grid());

        for i in 0..500 {
            if game.is_over() {
                break;
            }
            let turn = game.make_move_with_rng(Direction::ALL[(i * 7) % 4], &mut rng).unwrap();
            if turn.changed() {
                layer.apply(&turn);
                assert!(layer.matches(game.grid()), "diverged at move {i}");
                layer.settle();
            }
        }
        assert!(layer.matches(game.grid()));
    }
}
