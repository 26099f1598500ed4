use maze_pathfinding::{BfsSolver, Cell, CellWalls, MazeGrid};

// In this example a path is found on a 3x3 maze with shape
// +--+--+--+
// |S       |
// +  +--+  +
// |  |C |  |
// +  +--+  +
// |       G|
// +--+--+--+
// where
// - C marks a cell sealed on all four sides
// - S marks the start
// - G marks the goal

fn main() {
    let mut maze = MazeGrid::new(3, 3);
    maze.set_cell_walls(Cell::new(1, 1), CellWalls::CLOSED)
        .unwrap();
    println!("{}", maze);
    let start = Cell::new(0, 0);
    let goal = Cell::new(2, 2);
    let mut solver = BfsSolver::new();
    let path = solver.path_single_goal(&maze, start, goal).unwrap();
    println!("Path:");
    for cell in path {
        println!("{}", cell);
    }
}
