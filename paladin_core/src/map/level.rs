//! Level - A fixed-size grid of tiles

use super::tile::{Tile, TileKind};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Walk steps allowed per tile the carver still has to dig
const WALK_STEPS_PER_TILE: usize = 50;

const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Rectangular tile grid indexed by (row, column)
///
/// Dimensions are fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    height: usize,
    width: usize,
    tiles: Vec<Tile>,
}

impl Level {
    /// Create a level of uncarved tiles
    pub fn new(height: usize, width: usize) -> Self {
        Level {
            height,
            width,
            tiles: vec![Tile::default(); height * width],
        }
    }

    /// Carve a random-walk hallway network enclosed by walls
    ///
    /// The walk starts at the centre and stays off the outer border, stopping
    /// once `density` of the interior is hallway (or its step budget runs
    /// out). Every uncarved tile touching a hallway, diagonals included,
    /// becomes a wall.
    pub fn generate(height: usize, width: usize, density: f64, rng: &mut impl Rng) -> Self {
        let mut level = Level::new(height, width);
        if height < 3 || width < 3 {
            return level;
        }

        let interior = (height - 2) * (width - 2);
        let target = ((interior as f64 * density.clamp(0.0, 1.0)).round() as usize).max(1);

        let (mut row, mut col) = (height / 2, width / 2);
        level.set_kind(row, col, TileKind::Hallway);
        let mut carved = 1;
        let mut steps = 0;
        let max_steps = target * WALK_STEPS_PER_TILE;

        while carved < target && steps < max_steps {
            steps += 1;
            let (dr, dc) = DIRECTIONS[rng.gen_range(0..DIRECTIONS.len())];
            let next_row = row.saturating_add_signed(dr).clamp(1, height - 2);
            let next_col = col.saturating_add_signed(dc).clamp(1, width - 2);
            (row, col) = (next_row, next_col);

            if level.tiles[level.index(row, col)].kind != TileKind::Hallway {
                level.set_kind(row, col, TileKind::Hallway);
                carved += 1;
            }
        }

        level.enclose_hallways();
        tracing::debug!(height, width, carved, steps, "level generated");
        level
    }

    fn enclose_hallways(&mut self) {
        let mut walls = Vec::new();
        for row in 0..self.height {
            for col in 0..self.width {
                if self.tiles[self.index(row, col)].kind == TileKind::Empty
                    && self.touches_hallway(row, col)
                {
                    walls.push((row, col));
                }
            }
        }
        for (row, col) in walls {
            self.set_kind(row, col, TileKind::Wall);
        }
    }

    fn touches_hallway(&self, row: usize, col: usize) -> bool {
        (-1isize..=1).any(|dr| {
            (-1isize..=1).any(|dc| {
                let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
                    return false;
                };
                self.get(r, c).is_some_and(|t| t.kind == TileKind::Hallway)
            })
        })
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// (height, width)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        if !self.in_bounds(row, col) {
            return None;
        }
        self.tiles.get(self.index(row, col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Tile> {
        if !self.in_bounds(row, col) {
            return None;
        }
        let index = self.index(row, col);
        self.tiles.get_mut(index)
    }

    /// Out-of-bounds positions are impassable
    pub fn passable(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Tile::passable)
    }

    /// Change a tile's kind; returns false when out of bounds
    pub fn set_kind(&mut self, row: usize, col: usize, kind: TileKind) -> bool {
        match self.get_mut(row, col) {
            Some(tile) => {
                tile.kind = kind;
                true
            }
            None => false,
        }
    }

    pub fn mark_visited(&mut self, row: usize, col: usize) -> bool {
        match self.get_mut(row, col) {
            Some(tile) => {
                tile.visited = true;
                true
            }
            None => false,
        }
    }

    /// Positions of every passable tile, row-major
    pub fn hallway_tiles(&self) -> Vec<(usize, usize)> {
        (0..self.height)
            .flat_map(|row| (0..self.width).map(move |col| (row, col)))
            .filter(|(row, col)| self.passable(*row, *col))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GameRng;

    #[test]
    fn test_new_is_empty() {
        let level = Level::new(4, 6);
        assert_eq!(level.dimensions(), (4, 6));
        assert!(level.hallway_tiles().is_empty());
        assert_eq!(level.get(3, 5).unwrap().kind, TileKind::Empty);
        assert!(level.get(4, 0).is_none());
        assert!(level.get(0, 6).is_none());
    }

    #[test]
    fn test_generate_respects_border() {
        let mut rng = GameRng::new(21);
        let level = Level::generate(20, 40, 0.4, &mut rng);

        assert_eq!(level.dimensions(), (20, 40));
        let hallways = level.hallway_tiles();
        assert!(!hallways.is_empty());
        for (row, col) in hallways {
            assert!(row > 0 && row < 19, "hallway on border row {}", row);
            assert!(col > 0 && col < 39, "hallway on border col {}", col);
        }
    }

    #[test]
    fn test_hallways_are_enclosed() {
        let mut rng = GameRng::new(22);
        let level = Level::generate(15, 30, 0.3, &mut rng);

        for (row, col) in level.hallway_tiles() {
            for (dr, dc) in DIRECTIONS {
                let r = row.checked_add_signed(dr).unwrap();
                let c = col.checked_add_signed(dc).unwrap();
                let kind = level.get(r, c).unwrap().kind;
                assert_ne!(kind, TileKind::Empty, "hallway at ({}, {}) leaks", row, col);
            }
        }
    }

    #[test]
    fn test_density_target() {
        let mut rng = GameRng::new(23);
        let level = Level::generate(12, 12, 0.5, &mut rng);
        // 10x10 interior, half carved
        assert_eq!(level.hallway_tiles().len(), 50);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = Level::generate(10, 20, 0.3, &mut GameRng::new(5));
        let b = Level::generate(10, 20, 0.3, &mut GameRng::new(5));
        assert_eq!(a.hallway_tiles(), b.hallway_tiles());
    }

    #[test]
    fn test_tiny_level_stays_empty() {
        let level = Level::generate(2, 10, 0.5, &mut GameRng::new(1));
        assert!(level.hallway_tiles().is_empty());
    }

    #[test]
    fn test_set_kind_and_visit() {
        let mut level = Level::new(3, 3);
        assert!(level.set_kind(1, 1, TileKind::Hallway));
        assert!(level.passable(1, 1));
        assert!(!level.passable(5, 5));
        assert!(!level.set_kind(3, 0, TileKind::Wall));
        assert!(level.mark_visited(1, 1));
        assert!(level.get(1, 1).unwrap().visited);
    }
}
