//! Room and tile-map grids queried by the pathfinder
//!
//! A [`TileMap`] is the whole level. A [`TileRoom`] is one connected area
//! of it: the floor cells reachable from a seed without crossing walls,
//! doors or glass, plus the blocking cells that border them.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use crate::foundation::math::Vec2i;

use super::tile::TileType;

/// Grid query capability consumed by the pathfinder
pub trait RoomGrid {
    /// True if `cell` belongs to this room
    fn contains(&self, cell: Vec2i) -> bool;

    /// Tile at `cell`
    fn tile_value(&self, cell: Vec2i) -> TileType;

    /// Cell is in the room and its tile is neither solid, empty nor semi-solid
    ///
    /// Doors count as impassable; they must be triggered, not planned through.
    fn is_passable(&self, cell: Vec2i) -> bool {
        self.contains(cell) && self.tile_value(cell).is_walkable()
    }
}

/// Errors from parsing an ASCII layout
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Character with no tile meaning
    #[error("unknown tile character {ch:?} at column {column}, row {row}")]
    UnknownTile {
        /// Offending character
        ch: char,
        /// Zero-based column
        column: usize,
        /// Zero-based row
        row: usize,
    },
    /// Layout has no rows or only empty rows
    #[error("map layout is empty")]
    Empty,
}

const AXIAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const SURROUNDING: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Rectangular tile map; `x` is the column and `y` the row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    width: i32,
    height: i32,
    tiles: Vec<TileType>,
}

impl TileMap {
    /// Map of the given size filled with `fill`
    pub fn new(width: usize, height: usize, fill: TileType) -> Self {
        Self {
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
            tiles: vec![fill; width * height],
        }
    }

    /// Parse rows of layout characters; short rows are padded with `None`
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, MapError> {
        let width = rows.iter().map(|row| row.as_ref().chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }
        let mut map = Self::new(width, rows.len(), TileType::None);
        for (row, line) in rows.iter().enumerate() {
            for (column, ch) in line.as_ref().chars().enumerate() {
                let tile =
                    TileType::from_char(ch).ok_or(MapError::UnknownTile { ch, column, row })?;
                map.tiles[row * width + column] = tile;
            }
        }
        Ok(map)
    }

    /// Width in cells
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in cells
    pub fn height(&self) -> i32 {
        self.height
    }

    /// True if `cell` lies inside the map rectangle
    pub fn in_bounds(&self, cell: Vec2i) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    fn index(&self, cell: Vec2i) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        usize::try_from(cell.y * self.width + cell.x).ok()
    }

    /// Tile at `cell`; out of bounds is `None`
    pub fn get(&self, cell: Vec2i) -> TileType {
        self.index(cell).map_or(TileType::None, |i| self.tiles[i])
    }

    /// Replace the tile at `cell`; returns false when out of bounds
    pub fn set(&mut self, cell: Vec2i, tile: TileType) -> bool {
        match self.index(cell) {
            Some(i) => {
                self.tiles[i] = tile;
                true
            }
            None => false,
        }
    }

    /// Every in-bounds cell with its tile, row by row
    pub fn cells(&self) -> impl Iterator<Item = (Vec2i, TileType)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| {
                let cell = Vec2i::new(x, y);
                (cell, self.get(cell))
            })
        })
    }

    /// Connected room around a walkable `seed` cell
    pub fn room_at(&self, seed: Vec2i) -> Option<TileRoom> {
        if !self.get(seed).is_walkable() {
            return None;
        }
        let mut tiles = HashMap::new();
        let mut queue = VecDeque::from([seed]);
        tiles.insert(seed, TileType::Floor);

        while let Some(cell) = queue.pop_front() {
            for (dx, dy) in AXIAL {
                let next = cell + Vec2i::new(dx, dy);
                if !tiles.contains_key(&next) && self.get(next).is_walkable() {
                    tiles.insert(next, TileType::Floor);
                    queue.push_back(next);
                }
            }
        }

        let floor: Vec<Vec2i> = tiles.keys().copied().collect();
        for cell in floor {
            for (dx, dy) in SURROUNDING {
                let next = cell + Vec2i::new(dx, dy);
                let tile = self.get(next);
                if tile != TileType::None && !tile.is_walkable() {
                    tiles.insert(next, tile);
                }
            }
        }
        Some(TileRoom { tiles })
    }

    /// All rooms of the map, ordered by their first floor cell row by row
    pub fn rooms(&self) -> Vec<TileRoom> {
        let mut rooms: Vec<TileRoom> = Vec::new();
        for (cell, tile) in self.cells() {
            if tile.is_walkable() && !rooms.iter().any(|room| room.contains(cell)) {
                rooms.extend(self.room_at(cell));
            }
        }
        rooms
    }
}

impl RoomGrid for TileMap {
    fn contains(&self, cell: Vec2i) -> bool {
        self.get(cell) != TileType::None
    }

    fn tile_value(&self, cell: Vec2i) -> TileType {
        self.get(cell)
    }
}

impl FromStr for TileMap {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.lines().collect();
        Self::from_rows(&rows)
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row: String =
                (0..self.width).map(|x| self.get(Vec2i::new(x, y)).to_char()).collect();
            writeln!(f, "{}", row.trim_end())?;
        }
        Ok(())
    }
}

/// One connected area of a [`TileMap`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileRoom {
    tiles: HashMap<Vec2i, TileType>,
}

impl TileRoom {
    /// Number of cells, border included
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for rooms produced by [`TileMap::room_at`]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Walkable cells of the room, in no particular order
    pub fn floor_cells(&self) -> impl Iterator<Item = Vec2i> + '_ {
        self.tiles
            .iter()
            .filter(|(_, tile)| tile.is_walkable())
            .map(|(cell, _)| *cell)
    }

    /// Doors bordering the room
    pub fn doors(&self) -> impl Iterator<Item = Vec2i> + '_ {
        self.tiles
            .iter()
            .filter(|(_, tile)| **tile == TileType::Door)
            .map(|(cell, _)| *cell)
    }
}

impl RoomGrid for TileRoom {
    fn contains(&self, cell: Vec2i) -> bool {
        self.tiles.contains_key(&cell)
    }

    fn tile_value(&self, cell: Vec2i) -> TileType {
        self.tiles.get(&cell).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ROOMS: &str = "\
#######
#..#..#
#..D..#
#######";

    fn map() -> TileMap {
        TWO_ROOMS.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let map = map();
        assert_eq!(map.width(), 7);
        assert_eq!(map.height(), 4);
        assert_eq!(map.get(Vec2i::new(3, 2)), TileType::Door);
        assert_eq!(map.get(Vec2i::new(-1, 0)), TileType::None);
        assert_eq!(map.to_string().trim_end(), TWO_ROOMS);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            TileMap::from_rows(&["#.#", "#x#"]),
            Err(MapError::UnknownTile { ch: 'x', column: 1, row: 1 })
        );
        assert_eq!(TileMap::from_rows::<&str>(&[]), Err(MapError::Empty));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let map = TileMap::from_rows(&["###", "#"]).unwrap();
        assert_eq!(map.get(Vec2i::new(2, 1)), TileType::None);
        assert!(!map.contains(Vec2i::new(2, 1)));
    }

    #[test]
    fn test_room_stops_at_doors() {
        let map = map();
        let room = map.room_at(Vec2i::new(1, 1)).unwrap();
        let mut floor: Vec<(i32, i32)> = room.floor_cells().map(|c| (c.x, c.y)).collect();
        floor.sort_unstable();
        assert_eq!(floor, vec![(1, 1), (1, 2), (2, 1), (2, 2)]);

        assert!(room.contains(Vec2i::new(0, 0)));
        assert!(room.contains(Vec2i::new(3, 2)));
        assert!(!room.contains(Vec2i::new(4, 1)));
        assert_eq!(room.doors().collect::<Vec<_>>(), vec![Vec2i::new(3, 2)]);
        assert!(!room.is_passable(Vec2i::new(3, 2)));
        assert!(room.is_passable(Vec2i::new(2, 2)));
    }

    #[test]
    fn test_room_at_requires_walkable_seed() {
        assert!(map().room_at(Vec2i::new(0, 0)).is_none());
        assert!(map().room_at(Vec2i::new(3, 2)).is_none());
    }

    #[test]
    fn test_rooms_partition_floor() {
        let rooms = map().rooms();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].floor_cells().count(), 4);
        assert_eq!(rooms[1].floor_cells().count(), 4);
        assert!(rooms[1].contains(Vec2i::new(5, 2)));
        // The door borders both rooms
        assert!(rooms.iter().all(|room| room.contains(Vec2i::new(3, 2))));
    }

    #[test]
    fn test_set_tile() {
        let mut map = map();
        assert!(map.set(Vec2i::new(3, 2), TileType::Floor));
        assert!(!map.set(Vec2i::new(30, 2), TileType::Floor));
        assert_eq!(map.rooms().len(), 1);
    }
}
