//! Perfect-maze generation by randomized iterative backtracking.
//!
//! The maze lives on a `(2w+1) x (2h+1)` cell grid where rooms sit at odd
//! coordinates and the even cells between them are removable walls.
//! Carving starts from the first room and walks a random unvisited
//! neighbor two cells away, opening the wall between; when a room has no
//! unvisited neighbors the stack pops. The carved open cells form a
//! spanning tree over the rooms: exactly one simple route between any two
//! rooms, no cycles, no isolated pockets.

use std::collections::HashSet;

use crate::core::{GameRng, Grid, Position};

/// Carved maze grid: `true` is a wall, `false` is open.
pub type MazeGrid = Grid<bool>;

/// Cell grid dimensions for a maze of `rooms x rooms` rooms.
#[must_use]
pub fn cell_span(rooms: usize) -> usize {
    2 * rooms + 1
}

/// Carve a perfect maze with `rooms x rooms` rooms.
///
/// The start room is `(1, 1)` and the goal room `(span-2, span-2)`; both
/// are odd-coordinate rooms, so the goal is always a node of the carved
/// spanning tree and reachable by construction.
#[must_use]
pub fn carve(rooms: usize, rng: &mut GameRng) -> MazeGrid {
    assert!(rooms >= 2, "a maze needs at least 2x2 rooms");
    let span = cell_span(rooms);
    let mut grid = Grid::filled(span, span, true);

    let start = Position::new(1, 1);
    grid.set(start, false);

    let mut visited: HashSet<Position> = HashSet::new();
    visited.insert(start);
    let mut stack = vec![start];

    while let Some(&room) = stack.last() {
        let neighbors = unvisited_rooms(room, span, &visited);
        if neighbors.is_empty() {
            stack.pop();
            continue;
        }
        let next = neighbors[rng.gen_range_usize(0..neighbors.len())];
        let wall = Position::new((room.x + next.x) / 2, (room.y + next.y) / 2);
        grid.set(wall, false);
        grid.set(next, false);
        visited.insert(next);
        stack.push(next);
    }

    grid
}

/// Rooms two cells away from `room` that have not been carved yet.
fn unvisited_rooms(room: Position, span: usize, visited: &HashSet<Position>) -> Vec<Position> {
    let mut rooms = Vec::with_capacity(4);
    let candidates = [
        (room.x as isize, room.y as isize - 2),
        (room.x as isize, room.y as isize + 2),
        (room.x as isize - 2, room.y as isize),
        (room.x as isize + 2, room.y as isize),
    ];
    for (x, y) in candidates {
        if x < 1 || y < 1 || x >= span as isize || y >= span as isize {
            continue;
        }
        let candidate = Position::new(x as usize, y as usize);
        if !visited.contains(&candidate) {
            rooms.push(candidate);
        }
    }
    rooms
}

/// Open cells reachable from `start` by 4-directional movement.
///
/// Backs the connectivity properties: in a perfect maze the result covers
/// every open cell.
#[must_use]
pub fn flood_fill(grid: &MazeGrid, start: Position) -> HashSet<Position> {
    let mut reached = HashSet::new();
    if grid.get(start).copied() != Some(false) {
        return reached;
    }
    let mut frontier = vec![start];
    reached.insert(start);

    while let Some(pos) = frontier.pop() {
        for direction in crate::core::Direction::all() {
            if let Some(next) = pos.step(direction, grid.width(), grid.height()) {
                if grid.get(next) == Some(&false) && reached.insert(next) {
                    frontier.push(next);
                }
            }
        }
    }
    reached
}

/// Count of open (non-wall) cells.
#[must_use]
pub fn open_cell_count(grid: &MazeGrid) -> usize {
    grid.iter().filter(|(_, wall)| !**wall).count()
}
