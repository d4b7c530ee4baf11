//! Grid primitives shared by every engine.
//!
//! ## Position
//!
//! Integer grid coordinates. Immutable once assigned to a tile or cell;
//! movement produces a new `Position` rather than mutating in place.
//!
//! ## Direction
//!
//! The four axis-aligned movement directions with their unit vectors.
//!
//! ## Grid
//!
//! A bounds-checked 2D array stored row-major. All engine movement and
//! generation logic goes through `Grid`, so out-of-bounds coordinates are
//! unrepresentable in engine state.

use serde::{Deserialize, Serialize};

/// Integer grid coordinates.
///
/// `x` is the column, `y` is the row. Origin is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Step one cell in `direction`, if the result stays inside a
    /// `width` x `height` grid.
    #[must_use]
    pub fn step(self, direction: Direction, width: usize, height: usize) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = self.x as isize + dx;
        let y = self.y as isize + dy;
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            None
        } else {
            Some(Position::new(x as usize, y as usize))
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order.
    #[must_use]
    pub const fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Unit vector as `(dx, dy)`.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Bounds-checked 2D array, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Create a grid filled with copies of `value`.
    #[must_use]
    pub fn filled(width: usize, height: usize, value: T) -> Self {
        assert!(width > 0 && height > 0, "Grid dimensions must be non-zero");
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }
}

impl<T> Grid<T> {
    /// Grid width in cells.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Check whether a position lies inside the grid.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Get the cell at `pos`, or `None` if out of bounds.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<&T> {
        if self.contains(pos) {
            Some(&self.cells[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    /// Get the cell at `pos` mutably, or `None` if out of bounds.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut T> {
        if self.contains(pos) {
            Some(&mut self.cells[pos.y * self.width + pos.x])
        } else {
            None
        }
    }

    /// Replace the cell at `pos`, returning the old value.
    ///
    /// Panics if `pos` is out of bounds; engine logic only ever produces
    /// in-bounds positions, so a panic here is a logic bug.
    pub fn set(&mut self, pos: Position, value: T) -> T {
        assert!(self.contains(pos), "position {pos} out of bounds");
        std::mem::replace(&mut self.cells[pos.y * self.width + pos.x], value)
    }

    /// Iterate over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Iterate over `(position, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.positions()
            .map(move |p| (p, &self.cells[p.y * self.width + p.x]))
    }
}
