use criterion::{criterion_group, criterion_main, Criterion};
use maze_pathfinding::{BfsSolver, Cell, MazeGrid};
use rand::prelude::*;
use std::hint::black_box;

fn bfs_random_mazes(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mazes: Vec<MazeGrid> = (0..100)
        .map(|_| {
            let mut maze = MazeGrid::new(16, 16);
            maze.randomize(&mut rng);
            maze
        })
        .collect();
    let mut solver = BfsSolver::new();
    let start = Cell::new(0, 0);
    let goal = Cell::new(15, 15);

    c.bench_function("bfs 16x16 random", |b| {
        b.iter(|| {
            for maze in &mazes {
                black_box(solver.path_single_goal(maze, start, goal).unwrap());
            }
        })
    });
}

fn bfs_open_maze(c: &mut Criterion) {
    let maze = MazeGrid::new(64, 64);
    let mut solver = BfsSolver::new();
    let start = Cell::new(0, 0);
    let goal = Cell::new(63, 63);

    c.bench_function("bfs 64x64 open", |b| {
        b.iter(|| black_box(solver.path_single_goal(&maze, start, goal).unwrap()))
    });
}

criterion_group!(benches, bfs_random_mazes, bfs_open_maze);
criterion_main!(benches);
