use crate::{
    maze::{Maze, MazeError, TileObserver},
    prng::Mulberry32,
    solvers::{
        MazePath, MazeSolver, SolverCallback,
        walker::{Shuffled, Walker},
    },
};

/// Depth-first search choosing a random open neighbor at every step.
///
/// The seed is fixed when the solver is built, so every solve with the same
/// solver replays the same walk.
pub struct RandomDepthFirstSolver {
    seed: u32,
}

impl RandomDepthFirstSolver {
    pub fn new(seed: Option<u32>) -> Self {
        RandomDepthFirstSolver {
            seed: Mulberry32::new(seed).seed(),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl MazeSolver for RandomDepthFirstSolver {
    fn name(&self) -> &'static str {
        "RandomDepthFirst"
    }

    fn solve(
        &self,
        maze: &Maze,
        start: usize,
        exit: usize,
        observer: &mut dyn TileObserver,
        on_progress: Option<SolverCallback<'_>>,
    ) -> Result<Option<MazePath>, MazeError> {
        tracing::debug!(
            "[{}] solving {} -> {} with seed {}",
            self.name(),
            start,
            exit,
            self.seed
        );
        let policy = Shuffled::new(Mulberry32::new(Some(self.seed)));
        let path = Walker::new(maze, start, exit, policy)?.run(observer, on_progress)?;
        tracing::debug!(
            "[{}] path length: {:?}",
            self.name(),
            path.as_ref().map(Vec::len)
        );
        Ok(path)
    }
}
