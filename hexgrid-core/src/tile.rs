//! Tile type definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical role of a tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TileType {
    #[default]
    Empty,
    Player,
    Enemy,
    Obstacle,
    Exit,
}

/// All tile types, in declaration order
pub const TILE_TYPES: [TileType; 5] = [
    TileType::Empty,
    TileType::Player,
    TileType::Enemy,
    TileType::Obstacle,
    TileType::Exit,
];

/// Selection keys, '1' through '4'
const KEY_BINDINGS: [(char, TileType); 4] = [
    ('1', TileType::Player),
    ('2', TileType::Enemy),
    ('3', TileType::Obstacle),
    ('4', TileType::Exit),
];

impl TileType {
    /// Tile type selected by a key press, if the key is bound
    pub fn from_key(key: char) -> Option<TileType> {
        KEY_BINDINGS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, tile)| tile)
    }

    /// Key that selects this type (Empty has none)
    pub fn key(self) -> Option<char> {
        KEY_BINDINGS
            .iter()
            .find(|(_, t)| *t == self)
            .map(|&(k, _)| k)
    }

    /// Single character used by text front ends
    pub fn glyph(self) -> char {
        match self {
            TileType::Empty => '.',
            TileType::Player => 'P',
            TileType::Enemy => 'E',
            TileType::Obstacle => '#',
            TileType::Exit => 'X',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TileType::Empty => "EMPTY",
            TileType::Player => "PLAYER",
            TileType::Enemy => "ENEMY",
            TileType::Obstacle => "OBSTACLE",
            TileType::Exit => "EXIT",
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown tile type name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tile type: {0}")]
pub struct ParseTileTypeError(pub String);

impl FromStr for TileType {
    type Err = ParseTileTypeError;

    /// Accepts names in any case, or the selection key digit
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(tile) = TileType::from_key(c) {
                return Ok(tile);
            }
        }

        TILE_TYPES
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseTileTypeError(trimmed.to_string()))
    }
}
