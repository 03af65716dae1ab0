mod bfs;
mod dfs;
pub mod path;
mod random_dfs;
pub mod visited;
pub mod walker;

pub use bfs::BreadthFirstSolver;
pub use dfs::DepthFirstSolver;
pub use random_dfs::RandomDepthFirstSolver;

use crate::{
    maze::{Maze, MazeError, TileObserver},
    progress::Progress,
};

/// Tiles from start to exit, each one adjacent to the next through an open fence.
pub type MazePath = Vec<usize>;

/// Callback invoked after each unit of visible solver progress.
pub type SolverCallback<'a> = &'a mut dyn FnMut() -> Progress;

pub trait MazeSolver {
    fn name(&self) -> &'static str;

    /// Looks for a path from `start` to `exit`, reporting tile statuses to `observer`.
    ///
    /// Returns `Ok(None)` when there is no path or the callback cancelled the run,
    /// and `Err` when `start` or `exit` is not a tile of `maze`.
    fn solve(
        &self,
        maze: &Maze,
        start: usize,
        exit: usize,
        observer: &mut dyn TileObserver,
        on_progress: Option<SolverCallback<'_>>,
    ) -> Result<Option<MazePath>, MazeError>;
}

pub(crate) fn check_tile(maze: &Maze, tile: usize) -> Result<(), MazeError> {
    if tile < maze.tile_count() {
        Ok(())
    } else {
        Err(MazeError::TileOutOfRange {
            tile,
            tile_count: maze.tile_count(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SolverKind {
    /// Depth-first, fixed neighbor order
    Dfs,
    /// Depth-first, random neighbor order
    RandomDfs,
    /// Breadth-first, shortest path
    Bfs,
}

impl SolverKind {
    /// Available maze solvers
    pub const ALL: [SolverKind; 3] = [SolverKind::Dfs, SolverKind::RandomDfs, SolverKind::Bfs];

    pub fn build(self, seed: Option<u32>) -> Box<dyn MazeSolver + Send> {
        match self {
            SolverKind::Dfs => Box::new(DepthFirstSolver),
            SolverKind::RandomDfs => Box::new(RandomDepthFirstSolver::new(seed)),
            SolverKind::Bfs => Box::new(BreadthFirstSolver),
        }
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverKind::Dfs => write!(f, "Depth-First Search (DFS)"),
            SolverKind::RandomDfs => write!(f, "Random Depth-First Search"),
            SolverKind::Bfs => write!(f, "Breadth-First Search (BFS)"),
        }
    }
}

/// Default endpoints of a maze: the first tile and the last one.
pub fn default_endpoints(maze: &Maze) -> (usize, usize) {
    (0, maze.tile_count() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        generators::{GeneratorKind, generate_maze},
        maze::{Direction, Size, TileEvent, TileStatus},
    };

    fn solvers() -> Vec<Box<dyn MazeSolver + Send>> {
        SolverKind::ALL.iter().map(|kind| kind.build(Some(99))).collect()
    }

    fn assert_valid_path(maze: &Maze, path: &[usize], start: usize, exit: usize) {
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&exit));
        for pair in path.windows(2) {
            let connected = Direction::ALL
                .into_iter()
                .any(|dir| maze.passage(pair[0], dir) == Some(pair[1]));
            assert!(connected, "{} and {} are not connected", pair[0], pair[1]);
        }
        let mut seen = path.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), path.len(), "path revisits a tile");
    }

    #[test]
    fn test_generated_maze_is_solved() {
        let maze = generate_maze(GeneratorKind::Dfs, Size::new(10, 10), Some(42), None)
            .unwrap()
            .unwrap()
            .maze;
        assert_eq!(maze.open_fence_count(), 99);
        for solver in solvers() {
            let path = solver.solve(&maze, 0, 99, &mut (), None).unwrap().unwrap();
            assert_valid_path(&maze, &path, 0, 99);
        }
    }

    #[test]
    fn test_perfect_maze_has_one_path() {
        let maze = generate_maze(GeneratorKind::Wilson, Size::new(12, 8), Some(7), None)
            .unwrap()
            .unwrap()
            .maze;
        let (start, exit) = default_endpoints(&maze);
        let paths = solvers()
            .iter()
            .map(|solver| solver.solve(&maze, start, exit, &mut (), None).unwrap())
            .collect::<Vec<_>>();
        assert!(paths[0].is_some());
        assert!(paths.iter().all(|p| *p == paths[0]));
    }

    #[test]
    fn test_breadth_first_is_shortest() {
        for seed in 0..20 {
            let maze = generate_maze(GeneratorKind::Test, Size::new(9, 9), Some(seed), None)
                .unwrap()
                .unwrap()
                .maze;
            let (start, exit) = default_endpoints(&maze);
            let lengths = solvers()
                .iter()
                .map(|solver| {
                    solver
                        .solve(&maze, start, exit, &mut (), None)
                        .unwrap()
                        .map(|path| path.len())
                })
                .collect::<Vec<_>>();
            // All solvers agree on reachability
            assert!(lengths.iter().all(|l| l.is_some() == lengths[2].is_some()));
            if let Some(shortest) = lengths[2] {
                assert!(lengths.iter().flatten().all(|&l| shortest <= l));
            }
        }
    }

    #[test]
    fn test_open_grid_shortest_path() {
        let maze = Maze::new(Size::new(6, 4)).unwrap();
        let path = BreadthFirstSolver
            .solve(&maze, 0, 23, &mut (), None)
            .unwrap()
            .unwrap();
        // Manhattan distance 5 + 3
        assert_eq!(path.len() - 1, 8);
        assert_valid_path(&maze, &path, 0, 23);
    }

    #[test]
    fn test_all_blocked_has_no_path() {
        let mut maze = Maze::new(Size::new(10, 10)).unwrap();
        maze.block_all();
        for solver in solvers() {
            for (start, exit) in [(0, 99), (45, 46), (99, 0)] {
                assert_eq!(solver.solve(&maze, start, exit, &mut (), None), Ok(None));
            }
        }
    }

    #[test]
    fn test_walled_off_exit() {
        // Exit at 8 is closed off by its two interior fences
        let mut maze = Maze::new(Size::new(3, 3)).unwrap();
        maze.set_blocked(2, 2, Direction::Down, true).unwrap();
        maze.set_blocked(2, 2, Direction::Left, true).unwrap();
        for solver in solvers() {
            let mut events: Vec<TileEvent> = Vec::new();
            assert_eq!(solver.solve(&maze, 0, 8, &mut events, None), Ok(None));
            assert!(events.iter().all(|e| e.tile != 0 && e.tile != 8));
        }
    }

    #[test]
    fn test_start_equals_exit() {
        let maze = Maze::new(Size::new(3, 3)).unwrap();
        for solver in solvers() {
            assert_eq!(solver.solve(&maze, 4, 4, &mut (), None), Ok(Some(vec![4])));
        }
    }

    #[test]
    fn test_tiles_outside_maze_are_errors() {
        let maze = Maze::new(Size::new(3, 3)).unwrap();
        for solver in solvers() {
            assert_eq!(
                solver.solve(&maze, 0, 9, &mut (), None),
                Err(MazeError::TileOutOfRange {
                    tile: 9,
                    tile_count: 9
                })
            );
        }
    }

    #[test]
    fn test_same_seed_same_path_and_events() {
        let maze = generate_maze(GeneratorKind::Test, Size::new(15, 15), Some(3), None)
            .unwrap()
            .unwrap()
            .maze;
        let run = |seed| {
            let mut events: Vec<TileEvent> = Vec::new();
            let path = RandomDepthFirstSolver::new(Some(seed))
                .solve(&maze, 0, 224, &mut events, None)
                .unwrap();
            (path, events)
        };
        assert_eq!(run(5), run(5));
        let solver = RandomDepthFirstSolver::new(None);
        let first = solver.solve(&maze, 0, 224, &mut (), None);
        assert_eq!(first, solver.solve(&maze, 0, 224, &mut (), None));
        assert_eq!(
            first,
            RandomDepthFirstSolver::new(Some(solver.seed())).solve(&maze, 0, 224, &mut (), None)
        );
    }

    #[test]
    fn test_cancel_and_finish() {
        let maze = generate_maze(GeneratorKind::Dfs, Size::new(10, 10), Some(1), None)
            .unwrap()
            .unwrap()
            .maze;
        for solver in solvers() {
            let mut calls = 0;
            let mut cancel = || {
                calls += 1;
                Progress::Cancel
            };
            assert_eq!(solver.solve(&maze, 0, 99, &mut (), Some(&mut cancel)), Ok(None));
            assert_eq!(calls, 1);

            let mut calls = 0;
            let mut finish = || {
                calls += 1;
                Progress::Finish
            };
            let finished = solver.solve(&maze, 0, 99, &mut (), Some(&mut finish));
            assert_eq!(calls, 1);
            assert_eq!(finished, solver.solve(&maze, 0, 99, &mut (), None));
        }
    }

    #[test]
    fn test_depth_first_event_protocol() {
        // Every move reports the tile moved onto as visiting; dead ends report
        // blocked before the walk goes back
        let maze = generate_maze(GeneratorKind::Wilson, Size::new(8, 8), Some(12), None)
            .unwrap()
            .unwrap()
            .maze;
        let mut events: Vec<TileEvent> = Vec::new();
        DepthFirstSolver.solve(&maze, 0, 63, &mut events, None).unwrap();
        for pair in events.windows(2) {
            if pair[0].status == TileStatus::Blocked {
                assert_ne!(pair[1].status, TileStatus::Visited);
            }
        }
        assert!(events.iter().all(|e| matches!(
            e.status,
            TileStatus::Visiting | TileStatus::Visited | TileStatus::Blocked
        )));
    }
}
