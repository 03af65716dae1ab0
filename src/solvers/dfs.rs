use crate::{
    maze::{Maze, MazeError, TileObserver},
    solvers::{
        MazePath, MazeSolver, SolverCallback,
        walker::{FixedOrder, Walker},
    },
};

/// Depth-first search trying neighbors in a fixed order. Deterministic, but the
/// path it finds is not necessarily the shortest one.
pub struct DepthFirstSolver;

impl MazeSolver for DepthFirstSolver {
    fn name(&self) -> &'static str {
        "DepthFirst"
    }

    fn solve(
        &self,
        maze: &Maze,
        start: usize,
        exit: usize,
        observer: &mut dyn TileObserver,
        on_progress: Option<SolverCallback<'_>>,
    ) -> Result<Option<MazePath>, MazeError> {
        tracing::debug!("[{}] solving {} -> {}", self.name(), start, exit);
        let path = Walker::new(maze, start, exit, FixedOrder)?.run(observer, on_progress)?;
        tracing::debug!(
            "[{}] path length: {:?}",
            self.name(),
            path.as_ref().map(Vec::len)
        );
        Ok(path)
    }
}
