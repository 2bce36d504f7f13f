//! Map tiles

use crate::types::{EntityId, ItemId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Uncarved rock outside the level
    #[default]
    Empty,
    Wall,
    Hallway,
}

impl TileKind {
    pub fn passable(&self) -> bool {
        matches!(self, TileKind::Hallway)
    }

    /// Default display glyph; renderers may substitute their own
    pub fn glyph(&self) -> char {
        match self {
            TileKind::Empty => ' ',
            TileKind::Wall => '#',
            TileKind::Hallway => '.',
        }
    }
}

/// One grid cell; occupants and items are handles, not owned values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    /// Whether the player has seen this tile
    pub visited: bool,
    pub occupants: Vec<EntityId>,
    pub items: Vec<ItemId>,
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Tile {
            kind,
            ..Default::default()
        }
    }

    pub fn passable(&self) -> bool {
        self.kind.passable()
    }

    pub fn glyph(&self) -> char {
        self.kind.glyph()
    }

    pub fn has_occupants(&self) -> bool {
        !self.occupants.is_empty()
    }

    pub fn remove_occupant(&mut self, id: EntityId) -> bool {
        let before = self.occupants.len();
        self.occupants.retain(|o| *o != id);
        self.occupants.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_hallways_pass() {
        assert!(!Tile::new(TileKind::Empty).passable());
        assert!(!Tile::new(TileKind::Wall).passable());
        assert!(Tile::new(TileKind::Hallway).passable());
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(Tile::new(TileKind::Wall).glyph(), '#');
        assert_eq!(Tile::default().glyph(), ' ');
    }

    #[test]
    fn test_occupants() {
        let mut tile = Tile::new(TileKind::Hallway);
        assert!(!tile.has_occupants());
        tile.occupants.push(EntityId(1));
        assert!(tile.has_occupants());
        assert!(tile.remove_occupant(EntityId(1)));
        assert!(!tile.remove_occupant(EntityId(1)));
    }
}
