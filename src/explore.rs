//! Incremental exploration of an unknown maze.
//!
//! Models an agent that learns wall state only at cells it physically
//! occupies. The controller keeps a discovered [MazeGrid] in which unsensed
//! edges are modeled as open, classifies cells as visited, unvisited, or
//! inferred, and replans over the discovered maze after every sense. Ground
//! truth is consulted solely by the caller, which feeds the wall state at
//! the agent's current cell into [tick](Explorer::tick).
//!
//! The caller owns pacing: [tick](Explorer::tick) may run every simulation
//! frame (for display), while [step](Explorer::step) is typically throttled
//! to a fixed wall-clock interval.

use crate::cell::{Cell, DIRECTIONS};
use crate::error::MazeError;
use crate::maze::{CellWalls, MazeGrid};
use crate::search::{bfs, CanonicalOrder, DirectionOrder};
use fxhash::FxHashSet;
use log::{debug, info};

/// What ends an exploration run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExploreMode {
    /// Stop as soon as the goal cell is reached (or proves unreachable).
    GoalDirected,
    /// Keep going until no unvisited cell remains reachable.
    FullCoverage,
}

/// Drives an agent through an unknown maze.
///
/// Each [tick](Self::tick) senses, classifies, and replans; each
/// [step](Self::step) advances the agent one cell along the latest
/// frontier-seeking plan. The first edge of that plan always leaves the
/// current cell, whose walls have just been sensed, so a step never walks
/// through an undiscovered wall.
#[derive(Clone, Debug)]
pub struct Explorer<O: DirectionOrder = CanonicalOrder> {
    discovered: MazeGrid,
    unvisited: FxHashSet<Cell>,
    inferred: FxHashSet<Cell>,
    position: Cell,
    start: Cell,
    goal: Cell,
    mode: ExploreMode,
    order: O,
    frontier_path: Vec<Cell>,
    goal_path: Vec<Cell>,
}

impl Explorer<CanonicalOrder> {
    /// Starts exploring an unknown `height` x `width` maze at `start`.
    pub fn new(
        height: usize,
        width: usize,
        start: Cell,
        goal: Cell,
        mode: ExploreMode,
    ) -> Result<Explorer<CanonicalOrder>, MazeError> {
        Explorer::with_order(height, width, start, goal, mode, CanonicalOrder)
    }
}

impl<O: DirectionOrder> Explorer<O> {
    /// Like [new](Explorer::new) with an injected direction-order provider
    /// for the underlying searches.
    pub fn with_order(
        height: usize,
        width: usize,
        start: Cell,
        goal: Cell,
        mode: ExploreMode,
        order: O,
    ) -> Result<Explorer<O>, MazeError> {
        let discovered = MazeGrid::new(height, width);
        discovered.check_bounds(start)?;
        discovered.check_bounds(goal)?;
        let mut unvisited: FxHashSet<Cell> = (0..height as i32)
            .flat_map(|row| (0..width as i32).map(move |col| Cell::new(row, col)))
            .collect();
        unvisited.remove(&start);
        let mut explorer = Explorer {
            discovered,
            unvisited,
            inferred: FxHashSet::default(),
            position: start,
            start,
            goal,
            mode,
            order,
            frontier_path: Vec::new(),
            goal_path: Vec::new(),
        };
        // Plan once over the all-open discovered maze so that the
        // termination predicate is meaningful before the first tick.
        explorer.classify();
        explorer.plan();
        info!("exploration started at {} towards {}", start, goal);
        Ok(explorer)
    }

    pub fn position(&self) -> Cell {
        self.position
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn mode(&self) -> ExploreMode {
        self.mode
    }

    /// The maze as discovered so far. Unsensed edges read as open.
    pub fn discovered(&self) -> &MazeGrid {
        &self.discovered
    }

    /// Cells not yet sensed and not yet inferable.
    pub fn unvisited(&self) -> &FxHashSet<Cell> {
        &self.unvisited
    }

    /// Cells never sensed but fully enclosed by resolved cells, so their
    /// interior cannot affect any path.
    pub fn inferred(&self) -> &FxHashSet<Cell> {
        &self.inferred
    }

    /// Latest frontier-seeking plan; the agent walks this. Starts at the
    /// current cell, ends at the nearest unvisited cell.
    pub fn frontier_path(&self) -> &[Cell] {
        &self.frontier_path
    }

    /// Best-known start-to-goal path over the discovered maze. An optimistic
    /// estimate: its length can only grow as walls are sensed.
    pub fn goal_path(&self) -> &[Cell] {
        &self.goal_path
    }

    /// One sense / classify / plan pass. `sensed` is the ground-truth wall
    /// state at the current cell; nothing else of the true maze is
    /// consulted. Safe to call more often than [step](Self::step).
    pub fn tick(&mut self, sensed: CellWalls) {
        self.discovered.set_walls_in_bounds(self.position, sensed);
        self.classify();
        self.plan();
    }

    /// Advances the agent one cell along the latest frontier path: the
    /// leading entry (the current cell) is dropped and the agent moves to
    /// the new head. Returns the new position, or [None] when the run is
    /// finished or no plan exists.
    pub fn step(&mut self) -> Option<Cell> {
        if self.finished() || self.frontier_path.len() < 2 {
            return None;
        }
        self.frontier_path.remove(0);
        self.position = self.frontier_path[0];
        debug!("stepped to {}", self.position);
        Some(self.position)
    }

    /// Whether the active mode's stop condition holds: the goal has been
    /// reached in [GoalDirected](ExploreMode::GoalDirected) mode, or the
    /// frontier-seeking plan came back empty (nothing left worth visiting).
    pub fn finished(&self) -> bool {
        match self.mode {
            ExploreMode::GoalDirected => {
                self.position == self.goal || self.frontier_path.is_empty()
            }
            ExploreMode::FullCoverage => self.frontier_path.is_empty(),
        }
    }

    /// Marks the current cell visited, then moves every unvisited cell all
    /// of whose grid-adjacent cells (out-of-grid neighbours counting as
    /// resolved) are no longer unvisited into the inferred set. Runs to a
    /// fixpoint, since resolving one cell can newly enclose a neighbour.
    fn classify(&mut self) {
        if self.unvisited.remove(&self.position) {
            debug!("visited {}", self.position);
        }
        loop {
            let enclosed: Vec<Cell> = self
                .unvisited
                .iter()
                .filter(|cell| {
                    DIRECTIONS
                        .iter()
                        .all(|&dir| !self.unvisited.contains(&cell.step(dir)))
                })
                .copied()
                .collect();
            if enclosed.is_empty() {
                break;
            }
            for cell in enclosed {
                self.unvisited.remove(&cell);
                self.inferred.insert(cell);
                debug!("inferred {}", cell);
            }
        }
    }

    /// Replans both paths over the discovered maze only: a frontier-seeking
    /// path from the current cell to the nearest unvisited cell, and a
    /// best-known path from the exploration start to the true goal.
    fn plan(&mut self) {
        self.frontier_path = bfs(&self.discovered, self.position, &mut self.order, |cell| {
            self.unvisited.contains(cell)
        });
        self.goal_path = bfs(&self.discovered, self.start, &mut self.order, |cell| {
            *cell == self.goal
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeGrid;

    /// Runs the sense/plan/step loop against a ground-truth maze until the
    /// explorer finishes or the step budget runs out.
    fn drive(truth: &MazeGrid, explorer: &mut Explorer, max_steps: usize) -> usize {
        let mut steps = 0;
        loop {
            let sensed = truth.cell_walls(explorer.position()).unwrap();
            explorer.tick(sensed);
            if explorer.finished() {
                return steps;
            }
            assert!(steps < max_steps, "explorer exceeded step budget");
            explorer.step();
            steps += 1;
        }
    }

    #[test]
    fn open_grid_goal_directed() {
        let truth = MazeGrid::new(3, 3);
        let goal = Cell::new(2, 2);
        let mut explorer =
            Explorer::new(3, 3, Cell::new(0, 0), goal, ExploreMode::GoalDirected).unwrap();
        drive(&truth, &mut explorer, 100);
        assert_eq!(explorer.position(), goal);
        // On a fully open maze the discovered grid matches truth along the
        // way, so the goal estimate is exact.
        assert_eq!(explorer.goal_path().len(), 5);
    }

    #[test]
    fn initial_state() {
        let explorer = Explorer::new(
            3,
            3,
            Cell::new(0, 0),
            Cell::new(2, 2),
            ExploreMode::GoalDirected,
        )
        .unwrap();
        assert_eq!(explorer.position(), Cell::new(0, 0));
        assert_eq!(explorer.unvisited().len(), 8);
        assert!(explorer.inferred().is_empty());
        assert!(!explorer.finished());
        assert_eq!(explorer.frontier_path().len(), 2);
    }

    #[test]
    fn out_of_range_start_or_goal() {
        assert!(matches!(
            Explorer::new(2, 2, Cell::new(2, 0), Cell::new(0, 0), ExploreMode::GoalDirected),
            Err(MazeError::OutOfRange { .. })
        ));
        assert!(matches!(
            Explorer::new(2, 2, Cell::new(0, 0), Cell::new(0, -1), ExploreMode::FullCoverage),
            Err(MazeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn walled_interior_cell_is_inferred_not_sensed() {
        // 3x3 maze whose center cell is sealed on all four sides. Full
        // coverage must classify it as inferred without ever standing on it.
        let mut truth = MazeGrid::new(3, 3);
        truth
            .set_cell_walls(Cell::new(1, 1), CellWalls::CLOSED)
            .unwrap();
        let center = Cell::new(1, 1);
        let mut explorer = Explorer::new(
            3,
            3,
            Cell::new(0, 0),
            Cell::new(2, 2),
            ExploreMode::FullCoverage,
        )
        .unwrap();
        let mut visited_center = false;
        loop {
            let sensed = truth.cell_walls(explorer.position()).unwrap();
            explorer.tick(sensed);
            if explorer.finished() {
                break;
            }
            explorer.step();
            visited_center |= explorer.position() == center;
        }
        assert!(!visited_center);
        assert!(explorer.inferred().contains(&center));
        assert!(explorer.unvisited().is_empty());
    }

    #[test]
    fn full_coverage_visits_everything_reachable() {
        let truth = MazeGrid::new(4, 4);
        let mut explorer = Explorer::new(
            4,
            4,
            Cell::new(1, 1),
            Cell::new(0, 0),
            ExploreMode::FullCoverage,
        )
        .unwrap();
        drive(&truth, &mut explorer, 1000);
        // Every cell ends up resolved: visited, or inferred if the walk
        // happened to surround it first.
        assert!(explorer.unvisited().is_empty());
    }

    #[test]
    fn unreachable_goal_terminates() {
        // Seal the goal cell; the goal-directed run must stop once every
        // other cell is resolved, without reaching the goal.
        let mut truth = MazeGrid::new(3, 3);
        let goal = Cell::new(2, 2);
        truth.set_cell_walls(goal, CellWalls::CLOSED).unwrap();
        let mut explorer =
            Explorer::new(3, 3, Cell::new(0, 0), goal, ExploreMode::GoalDirected).unwrap();
        drive(&truth, &mut explorer, 1000);
        assert_ne!(explorer.position(), goal);
        assert!(explorer.finished());
    }

    #[test]
    fn tick_without_step_is_stable() {
        let truth = MazeGrid::new(3, 3);
        let mut explorer = Explorer::new(
            3,
            3,
            Cell::new(0, 0),
            Cell::new(2, 2),
            ExploreMode::GoalDirected,
        )
        .unwrap();
        let sensed = truth.cell_walls(explorer.position()).unwrap();
        explorer.tick(sensed);
        let frontier = explorer.frontier_path().to_vec();
        let unvisited = explorer.unvisited().clone();
        explorer.tick(sensed);
        assert_eq!(explorer.frontier_path(), frontier.as_slice());
        assert_eq!(explorer.unvisited(), &unvisited);
    }
}
