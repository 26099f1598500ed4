use maze_pathfinding::{Cell, ExploreMode, Explorer, MazeGrid};
use rand::prelude::*;

// Explores a randomized 8x8 maze the agent has never seen. Each iteration
// feeds the explorer the ground-truth walls at its current cell only, then
// lets it take one step along its replanned frontier path.

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut truth = MazeGrid::new(8, 8);
    truth.randomize(&mut rng);
    println!("Ground truth:\n{}", truth);

    let start = Cell::new(0, 0);
    let goal = Cell::new(7, 7);
    let mut explorer = Explorer::new(8, 8, start, goal, ExploreMode::GoalDirected).unwrap();

    let mut steps = 0;
    loop {
        let sensed = truth.cell_walls(explorer.position()).unwrap();
        explorer.tick(sensed);
        if explorer.finished() {
            break;
        }
        explorer.step();
        steps += 1;
    }

    println!("Discovered after {} steps:\n{}", steps, explorer.discovered());
    if explorer.position() == goal || explorer.inferred().contains(&goal) {
        println!("Resolved {} in {} steps", goal, steps);
        println!(
            "Best known start-to-goal path: {} cells",
            explorer.goal_path().len()
        );
    } else {
        println!("Goal {} is unreachable", goal);
    }
}
