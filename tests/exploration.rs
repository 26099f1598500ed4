//! End-to-end exploration runs against ground-truth mazes the explorer
//! never sees directly: each tick is fed only the wall state at the
//! agent's current cell.

use maze_pathfinding::{BfsSolver, Cell, ExploreMode, Explorer, MazeGrid};
use rand::prelude::*;

/// Drives the sense/plan/step loop until the explorer finishes. Panics if
/// the step budget is exceeded.
fn drive(truth: &MazeGrid, explorer: &mut Explorer, max_steps: usize) {
    let mut steps = 0;
    loop {
        let sensed = truth.cell_walls(explorer.position()).unwrap();
        explorer.tick(sensed);
        if explorer.finished() {
            return;
        }
        assert!(steps < max_steps, "explorer exceeded step budget");
        explorer.step();
        steps += 1;
    }
}

#[test]
fn fuzz_goal_directed() {
    const N: usize = 6;
    const N_MAZES: usize = 200;
    let mut rng = StdRng::seed_from_u64(10);
    let start = Cell::new(0, 0);
    let goal = Cell::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_MAZES {
        let mut truth = MazeGrid::new(N, N);
        truth.randomize(&mut rng);
        let mut explorer =
            Explorer::new(N, N, start, goal, ExploreMode::GoalDirected).unwrap();
        // Worst case the agent re-crosses the maze once per frontier cell,
        // with slack for replanning detours.
        drive(&truth, &mut explorer, 10_000);
        if truth.reachable(&start, &goal) {
            // The agent either stands on the goal, or classification
            // resolved the goal as inferred once every neighbouring cell
            // had been sensed; either way the run knows a route to it.
            assert!(explorer.position() == goal || explorer.inferred().contains(&goal));
            assert!(!explorer.goal_path().is_empty());
        } else {
            assert_ne!(explorer.position(), goal);
        }
    }
}

#[test]
fn fuzz_full_coverage() {
    const N: usize = 5;
    const N_MAZES: usize = 200;
    let mut rng = StdRng::seed_from_u64(11);
    let start = Cell::new(0, 0);
    for _ in 0..N_MAZES {
        let mut truth = MazeGrid::new(N, N);
        truth.randomize(&mut rng);
        let mut explorer =
            Explorer::new(N, N, start, start, ExploreMode::FullCoverage).unwrap();
        drive(&truth, &mut explorer, 10_000);
        // Everything reachable in truth must have been visited or inferred.
        for row in 0..N as i32 {
            for col in 0..N as i32 {
                let cell = Cell::new(row, col);
                if truth.reachable(&start, &cell) {
                    assert!(
                        !explorer.unvisited().contains(&cell),
                        "reachable cell {cell} left unresolved"
                    );
                }
            }
        }
    }
}

#[test]
fn goal_estimate_is_optimistic() {
    // The discovered maze never contains a wall the truth lacks, so the
    // start-to-goal estimate is never longer than the true shortest path.
    const N: usize = 6;
    let mut rng = StdRng::seed_from_u64(12);
    let start = Cell::new(0, 0);
    let goal = Cell::new(N as i32 - 1, N as i32 - 1);
    let mut checked = 0;
    for _ in 0..100 {
        let mut truth = MazeGrid::new(N, N);
        truth.randomize(&mut rng);
        if !truth.reachable(&start, &goal) {
            continue;
        }
        let mut explorer = Explorer::new(N, N, start, goal, ExploreMode::GoalDirected).unwrap();
        drive(&truth, &mut explorer, 10_000);
        let mut solver = BfsSolver::new();
        let true_path = solver.path_single_goal(&truth, start, goal).unwrap();
        let estimate = explorer.goal_path();
        assert!(!estimate.is_empty());
        // The discovered maze carries a subset of the true walls, so its
        // shortest path never exceeds the true shortest path.
        assert!(estimate.len() <= true_path.len());
        checked += 1;
    }
    assert!(checked > 0);
}
