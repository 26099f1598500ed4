//! # maze_pathfinding
//!
//! Shortest paths and incremental exploration for wall-based mazes. A
//! [MazeGrid] stores bit-packed walls between adjacent cells of a
//! rectangular grid; [BfsSolver] runs breadth-first search over the open
//! edges from one start cell to a single goal or a goal set; [Explorer]
//! drives an agent through an unknown maze, sensing walls one cell at a
//! time and replanning after every move. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.

pub mod bitgrid;
pub mod cell;
pub mod error;
pub mod explore;
pub mod maze;
pub mod search;

pub use cell::{Cell, Direction, DIRECTIONS};
pub use error::{DeserializeError, HexError, MazeError};
pub use explore::{ExploreMode, Explorer};
pub use maze::{CellWalls, MazeGrid};
pub use search::{turn_count, BfsSolver, CanonicalOrder, DirectionOrder, ShuffledOrder};
