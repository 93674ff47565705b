use serde::{Deserialize, Serialize};

/// A point on the board, in logical units. Snake segments and food always sit
/// on multiples of the cell size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step away in `dir`.
    pub fn step(self, dir: Direction, cell: i32) -> Self {
        let (dx, dy) = dir.offset();
        Self { x: self.x + dx * cell, y: self.y + dy * cell }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit offset in grid cells. `y` grows downwards, as on the canvas.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Fixed-size playing field measured in logical units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    pub width: i32,
    pub height: i32,
    pub cell: i32,
}

impl Board {
    pub fn columns(&self) -> i32 { self.width / self.cell }
    pub fn rows(&self) -> i32 { self.height / self.cell }

    /// Half-open bounds: `[0, width) x [0, height)`.
    pub fn contains(&self, p: Position) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    pub fn is_aligned(&self, p: Position) -> bool {
        p.x % self.cell == 0 && p.y % self.cell == 0
    }
}

impl Default for Board {
    fn default() -> Self {
        Self { width: 600, height: 600, cell: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_moves_one_cell() {
        let p = Position::new(200, 200);
        assert_eq!(p.step(Direction::Right, 10), Position::new(210, 200));
        assert_eq!(p.step(Direction::Left, 10), Position::new(190, 200));
        assert_eq!(p.step(Direction::Up, 10), Position::new(200, 190));
        assert_eq!(p.step(Direction::Down, 10), Position::new(200, 210));
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir.opposite(), dir);
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_board_bounds_are_half_open() {
        let board = Board::default();
        assert_eq!(board.columns(), 60);
        assert_eq!(board.rows(), 60);
        assert!(board.contains(Position::new(0, 0)));
        assert!(board.contains(Position::new(590, 590)));
        assert!(!board.contains(Position::new(600, 0)));
        assert!(!board.contains(Position::new(0, 600)));
        assert!(!board.contains(Position::new(-10, 200)));
    }
}
