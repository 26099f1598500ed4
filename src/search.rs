//! Breadth-first shortest paths over a [MazeGrid].
//!
//! The maze is an unweighted 4-regular grid graph: an edge exists between
//! two adjacent cells iff the wall between them is absent. Every shortest
//! path is measured in cell-steps, so plain breadth-first traversal finds
//! optimal paths; the only policy choice is the order in which the four
//! directions are expanded, which picks among equal-length paths.

use crate::cell::{Cell, Direction, DIRECTIONS};
use crate::error::MazeError;
use crate::maze::MazeGrid;
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Supplies the order in which the four directions are expanded at each
/// cell. The order never changes path lengths, only which of several
/// equal-length shortest paths is returned.
pub trait DirectionOrder {
    fn next_order(&mut self) -> [Direction; 4];
}

/// Always expands in the fixed canonical order.
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalOrder;

impl DirectionOrder for CanonicalOrder {
    fn next_order(&mut self) -> [Direction; 4] {
        DIRECTIONS
    }
}

/// Draws a fresh uniform permutation of all four directions for every
/// expansion. Inject a seeded [Rng] to make results reproducible.
#[derive(Clone, Debug)]
pub struct ShuffledOrder<R> {
    rng: R,
}

impl<R: Rng> ShuffledOrder<R> {
    pub fn new(rng: R) -> ShuffledOrder<R> {
        ShuffledOrder { rng }
    }
}

impl<R: Rng> DirectionOrder for ShuffledOrder<R> {
    fn next_order(&mut self) -> [Direction; 4] {
        let mut order = DIRECTIONS;
        order.shuffle(&mut self.rng);
        order
    }
}

/// Breadth-first solver over a [MazeGrid]. Paths are cell sequences from
/// start to goal inclusive; the empty sequence means no path exists.
#[derive(Clone, Debug)]
pub struct BfsSolver<O = CanonicalOrder> {
    pub order: O,
}

impl BfsSolver<CanonicalOrder> {
    pub fn new() -> BfsSolver<CanonicalOrder> {
        BfsSolver {
            order: CanonicalOrder,
        }
    }
}

impl Default for BfsSolver<CanonicalOrder> {
    fn default() -> Self {
        BfsSolver::new()
    }
}

impl<O: DirectionOrder> BfsSolver<O> {
    pub fn with_order(order: O) -> BfsSolver<O> {
        BfsSolver { order }
    }

    /// Computes a shortest path from `start` to `goal`. When the grid's
    /// components are current, an unreachable goal is rejected without
    /// searching.
    pub fn path_single_goal(
        &mut self,
        grid: &MazeGrid,
        start: Cell,
        goal: Cell,
    ) -> Result<Vec<Cell>, MazeError> {
        grid.check_bounds(start)?;
        grid.check_bounds(goal)?;
        if !grid.components_dirty && grid.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(Vec::new());
        }
        Ok(bfs(grid, start, &mut self.order, |cell| *cell == goal))
    }

    /// Computes a shortest path from `start` to the nearest cell satisfying
    /// the membership predicate `goal`. The reached goal is the last cell
    /// of the returned path. A predicate that matches nothing reachable
    /// gives the empty path.
    pub fn path_multiple_goals<F>(
        &mut self,
        grid: &MazeGrid,
        start: Cell,
        goal: F,
    ) -> Result<Vec<Cell>, MazeError>
    where
        F: FnMut(&Cell) -> bool,
    {
        grid.check_bounds(start)?;
        Ok(bfs(grid, start, &mut self.order, goal))
    }
}

/// Walks the recorded parent indices backward from the goal entry and
/// reverses the result. The parent map is keyed by insertion index, so each
/// discovered cell has exactly one parent and the walk is unambiguous.
fn reverse_path(parents: &FxIndexMap<Cell, usize>, goal_ix: usize) -> Vec<Cell> {
    let mut path: Vec<Cell> = itertools::unfold(goal_ix, |i| {
        parents.get_index(*i).map(|(node, parent)| {
            let node = *node;
            *i = *parent;
            node
        })
    })
    .collect();
    path.reverse();
    path
}

/// Breadth-first traversal core. Each cell is enqueued at most once; the
/// first discovery is via a shortest path, and the search stops the instant
/// a discovered cell satisfies `goal`.
pub(crate) fn bfs<O, F>(grid: &MazeGrid, start: Cell, order: &mut O, mut goal: F) -> Vec<Cell>
where
    O: DirectionOrder,
    F: FnMut(&Cell) -> bool,
{
    if goal(&start) {
        return vec![start];
    }
    let mut parents: FxIndexMap<Cell, usize> = FxIndexMap::default();
    parents.insert(start, usize::MAX);
    let mut queue: VecDeque<usize> = VecDeque::new();
    queue.push_back(0);
    while let Some(index) = queue.pop_front() {
        let (&cell, _) = parents.get_index(index).unwrap();
        let walls = grid.walls_in_bounds(cell);
        for dir in order.next_order() {
            if walls.get(dir) {
                continue;
            }
            // Border walls are synthesized, so the step stays in bounds.
            let next = cell.step(dir);
            match parents.entry(next) {
                Occupied(_) => {}
                Vacant(e) => {
                    let n = e.index();
                    e.insert(index);
                    if goal(&next) {
                        return reverse_path(&parents, n);
                    }
                    queue.push_back(n);
                }
            }
        }
    }
    Vec::new()
}

/// Scores a path by the number of direction changes along it; lower is
/// better. Not used by the solver itself: it is the ranking half of a
/// "find faster paths" refinement pass that would speculatively wall off
/// the current best path, re-search, and keep the change only if the new
/// path scores better. The refinement itself is left unimplemented.
pub fn turn_count(path: &[Cell]) -> usize {
    path.windows(3)
        .filter(|w| w[0].dir_to(&w[1]) != w[1].dir_to(&w[2]))
        .count()
}
