//! Tile classification

use serde::{Serialize, Deserialize};

/// Kind of a map tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    /// Outside the level
    #[default]
    None,
    /// Walkable floor
    Floor,
    /// Solid wall
    Wall,
    /// Door; blocks movement until triggered
    Door,
    /// Glass pane; blocks movement but not sight
    Glass,
}

impl TileType {
    /// Decode a raw tile value (unknown values are `None`)
    pub fn from_value(value: i32) -> Self {
        match value {
            1 => Self::Floor,
            2 => Self::Wall,
            3 => Self::Door,
            4 => Self::Glass,
            _ => Self::None,
        }
    }

    /// Raw tile value
    pub fn value(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Floor => 1,
            Self::Wall => 2,
            Self::Door => 3,
            Self::Glass => 4,
        }
    }

    /// Decode an ASCII layout character
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            ' ' => Some(Self::None),
            '.' => Some(Self::Floor),
            '#' => Some(Self::Wall),
            'D' => Some(Self::Door),
            'G' => Some(Self::Glass),
            _ => None,
        }
    }

    /// ASCII layout character
    pub fn to_char(self) -> char {
        match self {
            Self::None => ' ',
            Self::Floor => '.',
            Self::Wall => '#',
            Self::Door => 'D',
            Self::Glass => 'G',
        }
    }

    /// Walls and empty space
    pub fn is_solid_or_none(self) -> bool {
        matches!(self, Self::None | Self::Wall)
    }

    /// Doors and glass
    pub fn is_semi_solid(self) -> bool {
        matches!(self, Self::Door | Self::Glass)
    }

    /// Neither solid, empty nor semi-solid
    pub fn is_walkable(self) -> bool {
        !(self.is_solid_or_none() || self.is_semi_solid())
    }
}
