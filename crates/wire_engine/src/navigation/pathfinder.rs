//! A* pathfinding on a room grid
//!
//! Eight-directional search: axis steps cost `1.0`, diagonal steps cost
//! `√2` and are only allowed when both cells forming the cut corner are
//! passable. The heuristic is the straight-line distance to the goal, which
//! never overestimates on this grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::{Serialize, Deserialize};

use crate::foundation::math::{constants::SQRT_2, utils, Vec2, Vec2i};

use super::grid::RoomGrid;

/// Pathfinding configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfinderConfig {
    /// Allow the four diagonal moves
    pub allow_diagonal: bool,
    /// Most nodes whose neighbours are expanded before the search gives up
    pub max_expanded_nodes: usize,
    /// World-space size of one cell, used for waypoints
    pub tile_size: f64,
}

impl Default for PathfinderConfig {
    fn default() -> Self {
        Self {
            allow_diagonal: true,
            max_expanded_nodes: 16384,
            tile_size: 1.0,
        }
    }
}

/// One cell of a solved path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathNode {
    /// Grid cell
    pub cell: Vec2i,
    /// Cost from the start
    pub g: f64,
    /// Heuristic estimate to the goal
    pub h: f64,
}

impl PathNode {
    /// Total estimated cost `g + h`
    pub fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Ordered path from start to end, both inclusive
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    nodes: Vec<PathNode>,
}

impl Path {
    /// Nodes from start to end
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }

    /// Cells from start to end
    pub fn cells(&self) -> impl Iterator<Item = Vec2i> + '_ {
        self.nodes.iter().map(|node| node.cell)
    }

    /// Number of nodes, endpoints included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; a path holds at least its start node
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Accumulated cost of the whole path
    pub fn cost(&self) -> f64 {
        self.nodes.last().map_or(0.0, |node| node.g)
    }

    /// First cell
    pub fn start(&self) -> Option<Vec2i> {
        self.nodes.first().map(|node| node.cell)
    }

    /// Last cell
    pub fn end(&self) -> Option<Vec2i> {
        self.nodes.last().map(|node| node.cell)
    }

    /// World-space centers of every cell
    pub fn waypoints(&self, tile_size: f64) -> Vec<Vec2> {
        self.cells().map(|cell| utils::cell_center(cell, tile_size)).collect()
    }

    /// Cell following `cell` on the path, if `cell` is on it and not the end
    pub fn next_waypoint_after(&self, cell: Vec2i) -> Option<Vec2i> {
        let index = self.nodes.iter().position(|node| node.cell == cell)?;
        self.nodes.get(index + 1).map(|node| node.cell)
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    offset: (i32, i32),
    cost: f64,
}

static AXIAL_STEPS: [Step; 4] = [
    Step { offset: (1, 0), cost: 1.0 },
    Step { offset: (-1, 0), cost: 1.0 },
    Step { offset: (0, 1), cost: 1.0 },
    Step { offset: (0, -1), cost: 1.0 },
];

static DIAGONAL_STEPS: [Step; 4] = [
    Step { offset: (1, 1), cost: SQRT_2 },
    Step { offset: (1, -1), cost: SQRT_2 },
    Step { offset: (-1, 1), cost: SQRT_2 },
    Step { offset: (-1, -1), cost: SQRT_2 },
];

/// Search bookkeeping for one cell; `parent` indexes the node arena
#[derive(Debug)]
struct SearchNode {
    node: PathNode,
    parent: Option<usize>,
    closed: bool,
}

/// Open-set entry; the heap pops the lowest `f`, then the earliest push
#[derive(Debug, PartialEq)]
struct OpenEntry {
    f: f64,
    sequence: u64,
    index: usize,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// State of a single solve; dropped when the solve returns
struct Search {
    nodes: Vec<SearchNode>,
    index: HashMap<Vec2i, usize>,
    open: BinaryHeap<OpenEntry>,
    sequence: u64,
}

impl Search {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            open: BinaryHeap::new(),
            sequence: 0,
        }
    }

    fn push_open(&mut self, index: usize) {
        self.sequence += 1;
        self.open.push(OpenEntry {
            f: self.nodes[index].node.f(),
            sequence: self.sequence,
            index,
        });
    }

    fn discover(&mut self, node: PathNode, parent: Option<usize>) {
        let index = self.nodes.len();
        self.nodes.push(SearchNode { node, parent, closed: false });
        self.index.insert(node.cell, index);
        self.push_open(index);
    }

    /// Record a path to `cell` through `parent` costing `g`
    ///
    /// Known open nodes are only updated when strictly cheaper.
    fn relax(&mut self, cell: Vec2i, g: f64, h: f64, parent: usize) {
        match self.index.get(&cell).copied() {
            Some(existing) => {
                let known = &mut self.nodes[existing];
                if known.closed || g >= known.node.g {
                    return;
                }
                known.node.g = g;
                known.parent = Some(parent);
                self.push_open(existing);
            }
            None => self.discover(PathNode { cell, g, h }, Some(parent)),
        }
    }

    fn reconstruct(&self, end: usize) -> Path {
        let mut nodes = Vec::new();
        let mut cursor = Some(end);
        while let Some(index) = cursor {
            nodes.push(self.nodes[index].node);
            cursor = self.nodes[index].parent;
        }
        nodes.reverse();
        Path { nodes }
    }
}

/// A* solver
#[derive(Debug, Clone, Default)]
pub struct Pathfinder {
    config: PathfinderConfig,
}

impl Pathfinder {
    /// Create a solver with the given configuration
    pub fn new(config: PathfinderConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// Shortest walkable path from `start` to `end`
    ///
    /// Returns `None` when either endpoint is outside the room, when the goal
    /// is unreachable, or when the expansion limit is hit. None of these are
    /// errors; callers treat them as "no route this frame".
    pub fn solve_path<R: RoomGrid + ?Sized>(
        &self,
        start: Vec2i,
        end: Vec2i,
        room: &R,
    ) -> Option<Path> {
        if !room.contains(start) || !room.contains(end) {
            log::debug!(
                "no path: endpoint outside room ({}, {}) -> ({}, {})",
                start.x,
                start.y,
                end.x,
                end.y
            );
            return None;
        }

        let mut search = Search::new();
        search.discover(PathNode { cell: start, g: 0.0, h: heuristic(start, end) }, None);
        let mut expanded = 0usize;

        while let Some(entry) = search.open.pop() {
            let current = entry.index;
            if search.nodes[current].closed {
                continue;
            }
            search.nodes[current].closed = true;
            let PathNode { cell, g, .. } = search.nodes[current].node;

            if cell == end {
                let path = search.reconstruct(current);
                log::trace!(
                    "path found: {} nodes, cost {:.3}, {} expanded",
                    path.len(),
                    path.cost(),
                    expanded
                );
                return Some(path);
            }

            if expanded >= self.config.max_expanded_nodes {
                log::warn!(
                    "pathfinding gave up after {} expansions ({}, {}) -> ({}, {})",
                    expanded,
                    start.x,
                    start.y,
                    end.x,
                    end.y
                );
                return None;
            }
            expanded += 1;

            for step in self.steps() {
                let next = cell + Vec2i::new(step.offset.0, step.offset.1);
                if !can_step(room, cell, step.offset) {
                    continue;
                }
                search.relax(next, g + step.cost, heuristic(next, end), current);
            }
        }

        log::debug!(
            "no path: open set exhausted ({}, {}) -> ({}, {})",
            start.x,
            start.y,
            end.x,
            end.y
        );
        None
    }

    fn steps(&self) -> impl Iterator<Item = &'static Step> {
        let diagonal: &'static [Step] = if self.config.allow_diagonal {
            &DIAGONAL_STEPS
        } else {
            &[]
        };
        AXIAL_STEPS.iter().chain(diagonal.iter())
    }
}

/// Solve with the default configuration
pub fn solve_path<R: RoomGrid + ?Sized>(start: Vec2i, end: Vec2i, room: &R) -> Option<Path> {
    Pathfinder::default().solve_path(start, end, room)
}

fn heuristic(cell: Vec2i, end: Vec2i) -> f64 {
    let delta = end - cell;
    f64::from(delta.x).hypot(f64::from(delta.y))
}

/// Axis steps need a passable target; diagonal steps also need both
/// orthogonal neighbours so movement never squeezes through a corner.
fn can_step<R: RoomGrid + ?Sized>(room: &R, from: Vec2i, (dx, dy): (i32, i32)) -> bool {
    let target = from + Vec2i::new(dx, dy);
    if !room.is_passable(target) {
        return false;
    }
    if dx == 0 || dy == 0 {
        return true;
    }
    room.is_passable(from + Vec2i::new(dx, 0)) && room.is_passable(from + Vec2i::new(0, dy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::grid::TileMap;
    use crate::navigation::tile::TileType;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn open_grid(size: usize) -> TileMap {
        TileMap::new(size, size, TileType::Floor)
    }

    fn limited_to(max_expanded_nodes: usize) -> Pathfinder {
        Pathfinder::new(PathfinderConfig { max_expanded_nodes, ..PathfinderConfig::default() })
    }

    /// Unbounded-coordinate room: a square of floor with some walls
    struct SquareRoom {
        min: i32,
        max: i32,
        walls: HashSet<Vec2i>,
    }

    impl RoomGrid for SquareRoom {
        fn contains(&self, cell: Vec2i) -> bool {
            (self.min..=self.max).contains(&cell.x) && (self.min..=self.max).contains(&cell.y)
        }

        fn tile_value(&self, cell: Vec2i) -> TileType {
            if self.walls.contains(&cell) {
                TileType::Wall
            } else {
                TileType::Floor
            }
        }
    }

    fn assert_steps_are_legal<R: RoomGrid>(path: &Path, room: &R) {
        let cells: Vec<Vec2i> = path.cells().collect();
        for pair in cells.windows(2) {
            let delta = pair[1] - pair[0];
            assert!(delta.x.abs() <= 1 && delta.y.abs() <= 1 && delta != Vec2i::zeros());
            assert!(
                can_step(room, pair[0], (delta.x, delta.y)),
                "illegal step {:?} -> {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_open_grid_takes_the_diagonal() {
        let room = open_grid(5);
        let path = solve_path(Vec2i::new(0, 0), Vec2i::new(4, 4), &room).unwrap();
        assert_eq!(path.len(), 5);
        assert_relative_eq!(path.cost(), 4.0 * SQRT_2, epsilon = 1e-9);
        assert_eq!(path.start(), Some(Vec2i::new(0, 0)));
        assert_eq!(path.end(), Some(Vec2i::new(4, 4)));
        assert_steps_are_legal(&path, &room);
    }

    #[test]
    fn test_costs_accumulate_along_path() {
        let path = solve_path(Vec2i::new(0, 0), Vec2i::new(4, 1), &open_grid(5)).unwrap();
        assert_relative_eq!(path.cost(), 3.0 + SQRT_2, epsilon = 1e-9);
        assert_eq!(path.nodes()[0].g, 0.0);
        for pair in path.nodes().windows(2) {
            assert!(pair[1].g > pair[0].g);
        }
        assert_relative_eq!(path.nodes().last().unwrap().h, 0.0);
    }

    #[test]
    fn test_axis_only_configuration() {
        let config = PathfinderConfig { allow_diagonal: false, ..PathfinderConfig::default() };
        let path = Pathfinder::new(config)
            .solve_path(Vec2i::new(0, 0), Vec2i::new(4, 4), &open_grid(5))
            .unwrap();
        assert_eq!(path.len(), 9);
        assert_relative_eq!(path.cost(), 8.0);
    }

    #[test]
    fn test_corner_cut_is_prevented() {
        let room = SquareRoom {
            min: -3,
            max: 3,
            walls: [Vec2i::new(1, 0), Vec2i::new(0, 1)].into_iter().collect(),
        };
        let path = solve_path(Vec2i::new(0, 0), Vec2i::new(1, 1), &room).unwrap();
        assert!(path.len() > 2);
        assert_ne!(path.nodes()[1].cell, Vec2i::new(1, 1));
        assert!(path.cost() > SQRT_2);
        assert_steps_are_legal(&path, &room);
    }

    #[test]
    fn test_corner_squeeze_without_detour_has_no_path() {
        let room: TileMap = ".#\n#.".parse().unwrap();
        assert!(solve_path(Vec2i::new(0, 0), Vec2i::new(1, 1), &room).is_none());
    }

    #[test]
    fn test_routes_around_wall() {
        let room: TileMap = "\
.....
.###.
...#.
.....".parse().unwrap();
        let path = solve_path(Vec2i::new(2, 2), Vec2i::new(2, 0), &room).unwrap();
        assert_steps_are_legal(&path, &room);
        assert!(path.cells().all(|cell| room.is_passable(cell)));
        // Both wall corners block diagonals, so the shorter left detour is all axis steps
        assert_relative_eq!(path.cost(), 6.0, epsilon = 1e-9);
        assert_eq!(path.next_waypoint_after(Vec2i::new(2, 2)), Some(Vec2i::new(1, 2)));
    }

    #[test]
    fn test_endpoint_outside_room_is_no_path() {
        let room = open_grid(3);
        assert!(solve_path(Vec2i::new(0, 0), Vec2i::new(7, 7), &room).is_none());
        assert!(solve_path(Vec2i::new(-1, 0), Vec2i::new(2, 2), &room).is_none());
    }

    #[test]
    fn test_unreachable_goal_is_no_path() {
        let room: TileMap = "..#..\n..D..\n..#..".parse().unwrap();
        assert!(solve_path(Vec2i::new(0, 1), Vec2i::new(4, 1), &room).is_none());
        assert!(solve_path(Vec2i::new(0, 1), Vec2i::new(2, 1), &room).is_none());
    }

    #[test]
    fn test_start_equals_end() {
        let path = solve_path(Vec2i::new(1, 1), Vec2i::new(1, 1), &open_grid(3)).unwrap();
        assert_eq!(path.len(), 1);
        assert_relative_eq!(path.cost(), 0.0);
    }

    #[test]
    fn test_expansion_limit() {
        let room = open_grid(20);
        assert!(limited_to(3).solve_path(Vec2i::new(0, 0), Vec2i::new(19, 19), &room).is_none());
    }

    #[test]
    fn test_room_restricts_search() {
        let map: TileMap = "\
#######
#..#..#
#..D..#
#######".parse().unwrap();
        let left = map.room_at(Vec2i::new(1, 1)).unwrap();
        assert!(solve_path(Vec2i::new(1, 1), Vec2i::new(5, 1), &left).is_none());
        let path = solve_path(Vec2i::new(1, 1), Vec2i::new(2, 2), &left).unwrap();
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn test_expansion_limit_is_exact() {
        let corridor: TileMap = "...".parse().unwrap();
        let (start, end) = (Vec2i::new(0, 0), Vec2i::new(2, 0));
        // Two cells are expanded before the goal is popped
        assert!(limited_to(2).solve_path(start, end, &corridor).is_some());
        assert!(limited_to(1).solve_path(start, end, &corridor).is_none());
        assert!(limited_to(0).solve_path(start, start, &corridor).is_some());
    }

    #[test]
    fn test_relax_keeps_parent_on_equal_cost() {
        let mut search = Search::new();
        search.discover(PathNode { cell: Vec2i::new(0, 0), g: 0.0, h: 2.0 }, None);
        search.discover(PathNode { cell: Vec2i::new(0, 1), g: 1.0, h: 2.0 }, Some(0));
        search.relax(Vec2i::new(1, 1), 2.0, 1.0, 0);
        let target = search.index[&Vec2i::new(1, 1)];
        let queued = search.open.len();

        search.relax(Vec2i::new(1, 1), 2.0, 1.0, 1);
        assert_eq!(search.nodes[target].parent, Some(0));
        assert_eq!(search.open.len(), queued);

        search.relax(Vec2i::new(1, 1), 1.5, 1.0, 1);
        assert_eq!(search.nodes[target].parent, Some(1));
        assert_relative_eq!(search.nodes[target].node.g, 1.5);
        assert_eq!(search.open.len(), queued + 1);

        search.nodes[target].closed = true;
        search.relax(Vec2i::new(1, 1), 0.5, 1.0, 0);
        assert_eq!(search.nodes[target].parent, Some(1));
    }

    #[test]
    fn test_waypoints_and_next() {
        let path = solve_path(Vec2i::new(0, 0), Vec2i::new(2, 0), &open_grid(3)).unwrap();
        assert_eq!(
            path.waypoints(2.0),
            vec![Vec2::new(1.0, 1.0), Vec2::new(3.0, 1.0), Vec2::new(5.0, 1.0)]
        );
        assert_eq!(path.next_waypoint_after(Vec2i::new(1, 0)), Some(Vec2i::new(2, 0)));
        assert_eq!(path.next_waypoint_after(Vec2i::new(2, 0)), None);
        assert_eq!(path.next_waypoint_after(Vec2i::new(2, 2)), None);
    }

    #[test]
    fn test_open_entry_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { f: 2.0, sequence: 1, index: 0 });
        heap.push(OpenEntry { f: 1.0, sequence: 3, index: 1 });
        heap.push(OpenEntry { f: 1.0, sequence: 2, index: 2 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.index)).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }
}
