//! Wall storage for a rectangular maze.
//!
//! Walls sit between grid-adjacent cells; the outer border of the maze is
//! treated as always walled and is never stored. Wall state around a cell
//! is read and written as a unit through [CellWalls].

use crate::bitgrid::BitGrid;
use crate::cell::{Cell, Direction, DIRECTIONS};
use crate::error::{DeserializeError, MazeError};
use core::fmt;
use log::info;
use petgraph::unionfind::UnionFind;
use rand::Rng;
use smallvec::SmallVec;

/// Wall state around a single cell, one flag per [Direction].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellWalls {
    pub pos_row: bool,
    pub pos_col: bool,
    pub neg_row: bool,
    pub neg_col: bool,
}

impl CellWalls {
    /// All four walls present.
    pub const CLOSED: CellWalls = CellWalls {
        pos_row: true,
        pos_col: true,
        neg_row: true,
        neg_col: true,
    };

    /// No walls.
    pub const OPEN: CellWalls = CellWalls {
        pos_row: false,
        pos_col: false,
        neg_row: false,
        neg_col: false,
    };

    pub fn get(&self, dir: Direction) -> bool {
        match dir {
            Direction::PosRow => self.pos_row,
            Direction::PosCol => self.pos_col,
            Direction::NegRow => self.neg_row,
            Direction::NegCol => self.neg_col,
        }
    }

    pub fn set(&mut self, dir: Direction, walled: bool) {
        match dir {
            Direction::PosRow => self.pos_row = walled,
            Direction::PosCol => self.pos_col = walled,
            Direction::NegRow => self.neg_row = walled,
            Direction::NegCol => self.neg_col = walled,
        }
    }
}

/// [MazeGrid] stores the interior walls of a `height` x `width` maze in two
/// bit-packed arrays: a `(height - 1) x width` array of row-separating walls
/// and a `height x (width - 1)` array of column-separating walls. Border
/// edges always read as walled and refuse to be cleared.
///
/// Connected components over the open edges are maintained in a [UnionFind]
/// structure so that searches can reject unreachable goals without
/// flood-filling the grid. Adding walls marks the components as dirty;
/// [update](Self::update) regenerates them on demand.
///
/// A [MazeGrid] is a plain value: clones are independent, and equality
/// compares dimensions and wall bits only.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    height: usize,
    width: usize,
    row_walls: BitGrid,
    col_walls: BitGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl MazeGrid {
    /// Creates a maze with no interior walls. Both dimensions must be at
    /// least 1.
    pub fn new(height: usize, width: usize) -> MazeGrid {
        assert!(
            height >= 1 && width >= 1,
            "maze dimensions must be at least 1x1"
        );
        let mut grid = MazeGrid {
            height,
            width,
            row_walls: BitGrid::new(height - 1, width),
            col_walls: BitGrid::new(height, width - 1),
            components: UnionFind::new(height * width),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.height
            && (cell.col as usize) < self.width
    }

    pub(crate) fn check_bounds(&self, cell: Cell) -> Result<(), MazeError> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(MazeError::OutOfRange {
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }

    /// Reads the wall state around `cell`. Border edges always read as
    /// walled.
    pub fn cell_walls(&self, cell: Cell) -> Result<CellWalls, MazeError> {
        self.check_bounds(cell)?;
        Ok(self.walls_in_bounds(cell))
    }

    pub(crate) fn walls_in_bounds(&self, cell: Cell) -> CellWalls {
        debug_assert!(self.in_bounds(cell));
        let (i, j) = (cell.row as usize, cell.col as usize);
        CellWalls {
            pos_row: i == self.height - 1 || self.row_walls.get(i, j),
            pos_col: j == self.width - 1 || self.col_walls.get(i, j),
            neg_row: i == 0 || self.row_walls.get(i - 1, j),
            neg_col: j == 0 || self.col_walls.get(i, j - 1),
        }
    }

    /// Writes the wall state around `cell`. Border edges cannot be cleared:
    /// if any border edge is requested open, the remaining edges are still
    /// applied and `Ok(false)` is returned to signal the invalid request.
    pub fn set_cell_walls(&mut self, cell: Cell, walls: CellWalls) -> Result<bool, MazeError> {
        self.check_bounds(cell)?;
        Ok(self.set_walls_in_bounds(cell, walls))
    }

    pub(crate) fn set_walls_in_bounds(&mut self, cell: Cell, walls: CellWalls) -> bool {
        debug_assert!(self.in_bounds(cell));
        let mut border_clear = false;
        for dir in DIRECTIONS {
            if self.in_bounds(cell.step(dir)) {
                self.write_edge(cell, dir, walls.get(dir));
            } else if !walls.get(dir) {
                border_clear = true;
            }
        }
        !border_clear
    }

    /// Writes one interior edge bit and keeps the components consistent:
    /// adding a wall flags them dirty, removing one unions the two cells.
    fn write_edge(&mut self, cell: Cell, dir: Direction, walled: bool) {
        let (i, j) = (cell.row as usize, cell.col as usize);
        let (a, b) = (self.cell_ix(cell), self.cell_ix(cell.step(dir)));
        let (grid, r, c) = match dir {
            Direction::PosRow => (&mut self.row_walls, i, j),
            Direction::NegRow => (&mut self.row_walls, i - 1, j),
            Direction::PosCol => (&mut self.col_walls, i, j),
            Direction::NegCol => (&mut self.col_walls, i, j - 1),
        };
        let old = grid.get(r, c);
        grid.set(r, c, walled);
        if walled {
            if !old {
                self.components_dirty = true;
            }
        } else {
            self.components.union(a, b);
        }
    }

    /// Removes every interior wall.
    pub fn clear(&mut self) {
        self.row_walls.fill(false);
        self.col_walls.fill(false);
        self.generate_components();
    }

    /// Adds every interior wall.
    pub fn fill(&mut self) {
        self.row_walls.fill(true);
        self.col_walls.fill(true);
        self.generate_components();
    }

    /// Replaces every interior wall bit with random bytes drawn from `rng`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.row_walls.randomize(rng);
        self.col_walls.randomize(rng);
        self.generate_components();
    }

    /// Serializes the maze as `H:W:<hex row walls>:<hex col walls>`.
    pub fn serialize(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.height,
            self.width,
            self.row_walls.to_hex(),
            self.col_walls.to_hex()
        )
    }

    /// Loads a maze serialized by [serialize](Self::serialize). The encoded
    /// dimensions must match this grid exactly; loading never resizes. On
    /// any failure the grid is left untouched.
    pub fn deserialize(&mut self, text: &str) -> Result<(), MazeError> {
        let fields: Vec<&str> = text.split(':').collect();
        if fields.len() != 4 {
            return Err(DeserializeError::FieldCount(fields.len()).into());
        }
        let height: usize = fields[0]
            .parse()
            .map_err(|_| DeserializeError::BadDimension("height"))?;
        let width: usize = fields[1]
            .parse()
            .map_err(|_| DeserializeError::BadDimension("width"))?;
        if height != self.height || width != self.width {
            return Err(DeserializeError::DimensionMismatch {
                expected: (self.height, self.width),
                found: (height, width),
            }
            .into());
        }
        let row_walls =
            BitGrid::from_hex(self.height - 1, self.width, fields[2]).map_err(|source| {
                DeserializeError::Walls {
                    field: "horizontal",
                    source,
                }
            })?;
        let col_walls =
            BitGrid::from_hex(self.height, self.width - 1, fields[3]).map_err(|source| {
                DeserializeError::Walls {
                    field: "vertical",
                    source,
                }
            })?;
        self.row_walls = row_walls;
        self.col_walls = col_walls;
        self.generate_components();
        Ok(())
    }

    pub(crate) fn cell_ix(&self, cell: Cell) -> usize {
        cell.row as usize * self.width + cell.col as usize
    }

    /// Open grid-adjacent neighbours of `cell` in canonical order.
    pub fn open_neighbors(&self, cell: Cell) -> SmallVec<[Cell; 4]> {
        let walls = self.walls_in_bounds(cell);
        DIRECTIONS
            .iter()
            .filter(|&&dir| !walls.get(dir))
            .map(|&dir| cell.step(dir))
            .collect()
    }

    /// Retrieves the component id a given [Cell] belongs to.
    pub fn get_component(&self, cell: &Cell) -> usize {
        self.components.find(self.cell_ix(*cell))
    }

    /// Checks if start and goal are connected through open edges.
    pub fn reachable(&self, start: &Cell, goal: &Cell) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Cell, goal: &Cell) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self.components.equiv(self.cell_ix(*start), self.cell_ix(*goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links cells joined by open
    /// edges.
    pub fn generate_components(&mut self) {
        self.components = UnionFind::new(self.height * self.width);
        self.components_dirty = false;
        for i in 0..self.height {
            for j in 0..self.width {
                let ix = i * self.width + j;
                if i + 1 < self.height && !self.row_walls.get(i, j) {
                    self.components.union(ix, ix + self.width);
                }
                if j + 1 < self.width && !self.col_walls.get(i, j) {
                    self.components.union(ix, ix + 1);
                }
            }
        }
    }
}

impl PartialEq for MazeGrid {
    fn eq(&self, other: &Self) -> bool {
        self.height == other.height
            && self.width == other.width
            && self.row_walls == other.row_walls
            && self.col_walls == other.col_walls
    }
}

impl Eq for MazeGrid {}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in 0..self.height {
            for j in 0..self.width {
                let walls = self.walls_in_bounds(Cell::new(i as i32, j as i32));
                write!(f, "+{}", if walls.neg_row { "--" } else { "  " })?;
            }
            writeln!(f, "+")?;
            for j in 0..self.width {
                let walls = self.walls_in_bounds(Cell::new(i as i32, j as i32));
                write!(f, "{}  ", if walls.neg_col { "|" } else { " " })?;
            }
            writeln!(f, "|")?;
        }
        for _ in 0..self.width {
            write!(f, "+--")?;
        }
        writeln!(f, "+")
    }
}
