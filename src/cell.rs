use core::fmt;

/// A single maze cell addressed as (row, col) in matrix convention:
/// rows grow downward, columns grow rightward.
///
/// ```text
/// +-------+-------+---> col
/// | (0,0) | (0,1) |
/// +-------+-------+
/// | (1,0) | (1,1) |
/// +-------+-------+
/// |
/// v
/// row
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// The adjacent cell one step in `dir`. May fall outside the maze.
    pub fn step(&self, dir: Direction) -> Cell {
        let (dr, dc) = dir.offset();
        Cell::new(self.row + dr, self.col + dc)
    }

    pub fn manhattan_distance(&self, other: &Cell) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Direction pointing from `self` towards a grid-adjacent `other`, or
    /// [None] if the cells are not adjacent.
    pub fn dir_to(&self, other: &Cell) -> Option<Direction> {
        match (other.row - self.row, other.col - self.col) {
            (1, 0) => Some(Direction::PosRow),
            (0, 1) => Some(Direction::PosCol),
            (-1, 0) => Some(Direction::NegRow),
            (0, -1) => Some(Direction::NegCol),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four cardinal moves on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    PosRow,
    PosCol,
    NegRow,
    NegCol,
}

/// The canonical enumeration order, used wherever directions are expanded
/// deterministically.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::PosRow,
    Direction::PosCol,
    Direction::NegRow,
    Direction::NegCol,
];

impl Direction {
    /// (row, col) offset of a single step in this direction.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::PosRow => (1, 0),
            Direction::PosCol => (0, 1),
            Direction::NegRow => (-1, 0),
            Direction::NegCol => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::PosRow => Direction::NegRow,
            Direction::PosCol => Direction::NegCol,
            Direction::NegRow => Direction::PosRow,
            Direction::NegCol => Direction::PosCol,
        }
    }

    /// Index of this direction within [DIRECTIONS].
    pub fn num(self) -> usize {
        match self {
            Direction::PosRow => 0,
            Direction::PosCol => 1,
            Direction::NegRow => 2,
            Direction::NegCol => 3,
        }
    }
}
