use crate::{
    maze::{Direction, Maze, MazeError, TileObserver, TileStatus},
    prng::Mulberry32,
    progress::Reporter,
    solvers::{MazePath, SolverCallback, check_tile, path::Path, visited::VisitedTiles},
};

/// Picks the next tile of a depth-first walk: an unvisited neighbor of `tile`
/// behind an open fence, or `None` at a dead end.
pub trait NeighborPolicy {
    fn next_tile(&mut self, maze: &Maze, visited: &VisitedTiles, tile: usize) -> Option<usize>;
}

impl<F> NeighborPolicy for F
where
    F: FnMut(&Maze, &VisitedTiles, usize) -> Option<usize>,
{
    fn next_tile(&mut self, maze: &Maze, visited: &VisitedTiles, tile: usize) -> Option<usize> {
        self(maze, visited, tile)
    }
}

/// Tries up, right, down, left, in that order.
pub struct FixedOrder;

impl NeighborPolicy for FixedOrder {
    fn next_tile(&mut self, maze: &Maze, visited: &VisitedTiles, tile: usize) -> Option<usize> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| maze.passage(tile, dir))
            .find(|&next| !visited.is_visited(next))
    }
}

/// Picks uniformly among the candidate neighbors.
pub struct Shuffled {
    prng: Mulberry32,
    candidates: Vec<usize>,
}

impl Shuffled {
    pub fn new(prng: Mulberry32) -> Self {
        Shuffled {
            prng,
            candidates: Vec::with_capacity(Direction::ALL.len()),
        }
    }
}

impl NeighborPolicy for Shuffled {
    fn next_tile(&mut self, maze: &Maze, visited: &VisitedTiles, tile: usize) -> Option<usize> {
        self.candidates.clear();
        self.candidates.extend(
            Direction::ALL
                .into_iter()
                .filter_map(|dir| maze.passage(tile, dir))
                .filter(|&next| !visited.is_visited(next)),
        );
        if self.candidates.is_empty() {
            return None;
        }
        Some(self.candidates[self.prng.random_index(self.candidates.len())])
    }
}

/// Outcome of one [`Walker::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The walk moved forward onto this tile.
    Advanced(usize),
    /// Dead end: the walk went back to this tile.
    Backtracked(usize),
    /// The walk stands on the exit.
    Arrived,
    /// Every reachable tile was explored without finding the exit.
    Exhausted,
}

/// Depth-first stepping engine: one cursor walking a backtracking [`Path`],
/// moving wherever its [`NeighborPolicy`] says.
///
/// Each call to [`Walker::step`] performs exactly one move and leaves the walk
/// in a consistent state, so the caller may stop between any two steps.
pub struct Walker<'m, P> {
    maze: &'m Maze,
    policy: P,
    path: Path,
    visited: VisitedTiles,
    exit: usize,
}

impl<'m, P: NeighborPolicy> Walker<'m, P> {
    pub fn new(maze: &'m Maze, start: usize, exit: usize, policy: P) -> Result<Self, MazeError> {
        check_tile(maze, start)?;
        check_tile(maze, exit)?;
        let mut visited = VisitedTiles::new(maze.tile_count());
        visited.set_visited(start);
        Ok(Walker {
            maze,
            policy,
            path: Path::new(maze.tile_count(), start),
            visited,
            exit,
        })
    }

    #[cfg(test)]
    fn path(&self) -> &Path {
        &self.path
    }

    /// Advances the walk by one move, reporting tile statuses to `observer`.
    pub fn step(&mut self, observer: &mut dyn TileObserver) -> Step {
        if self.path.position() == self.exit {
            return Step::Arrived;
        }
        if self.visited.is_exhausted() {
            return Step::Exhausted;
        }

        let current = self.path.position();
        self.set_status(observer, current, TileStatus::Visited);
        match self.policy.next_tile(self.maze, &self.visited, current) {
            Some(next) => {
                self.path.move_to(next);
                self.visited.set_visited(next);
                self.set_status(observer, next, TileStatus::Visiting);
                Step::Advanced(next)
            }
            None => {
                self.set_status(observer, current, TileStatus::Blocked);
                match self.path.move_back() {
                    Some(back) => {
                        self.set_status(observer, back, TileStatus::Visiting);
                        Step::Backtracked(back)
                    }
                    // Back at the start with nothing left to try
                    None => Step::Exhausted,
                }
            }
        }
    }

    /// Steps until the exit is reached, the walk is exhausted, or the callback cancels.
    pub fn run(
        mut self,
        observer: &mut dyn TileObserver,
        on_progress: Option<SolverCallback<'_>>,
    ) -> Result<Option<MazePath>, MazeError> {
        let mut reporter = Reporter::new(on_progress);
        loop {
            match self.step(observer) {
                Step::Arrived => {
                    tracing::trace!(
                        "walk arrived with {} tiles on the path, {} visited",
                        self.path.length(),
                        self.visited.count()
                    );
                    return self.path.tiles().map(Some);
                }
                Step::Exhausted => return Ok(None),
                Step::Advanced(_) | Step::Backtracked(_) => {
                    if !reporter.report(|cb| cb()) {
                        return Ok(None);
                    }
                }
            }
        }
    }

    // Endpoints keep their own status
    fn set_status(&self, observer: &mut dyn TileObserver, tile: usize, status: TileStatus) {
        if tile != self.path.start() && tile != self.exit {
            observer.set_tile_status(tile, status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::{Size, TileEvent};

    /// 3x1 corridor: 0 - 1 - 2
    fn corridor() -> Maze {
        Maze::new(Size::new(3, 1)).unwrap()
    }

    #[test]
    fn test_steps_down_a_corridor() {
        let maze = corridor();
        let mut walker = Walker::new(&maze, 0, 2, FixedOrder).unwrap();
        let mut events: Vec<TileEvent> = Vec::new();
        assert_eq!(walker.step(&mut events), Step::Advanced(1));
        assert_eq!(walker.step(&mut events), Step::Advanced(2));
        assert_eq!(walker.step(&mut events), Step::Arrived);
        assert_eq!(walker.path().tiles(), Ok(vec![0, 1, 2]));
        let statuses = events.iter().map(|e| (e.tile, e.status)).collect::<Vec<_>>();
        assert_eq!(
            statuses,
            vec![(1, TileStatus::Visiting), (1, TileStatus::Visited)]
        );
    }

    #[test]
    fn test_backtracking_events() {
        // 2x2, exit at 3 reachable only through 1: 0-1 open, 1-3 open, 0-2 open
        let mut maze = Maze::new(Size::new(2, 2)).unwrap();
        maze.set_blocked(0, 1, Direction::Right, true).unwrap();
        let mut walker = Walker::new(&maze, 0, 3, FixedOrder).unwrap();
        let mut events: Vec<TileEvent> = Vec::new();
        // Up first: 0 -> 2, a dead end
        assert_eq!(walker.step(&mut events), Step::Advanced(2));
        assert_eq!(walker.step(&mut events), Step::Backtracked(0));
        assert_eq!(walker.step(&mut events), Step::Advanced(1));
        assert_eq!(walker.step(&mut events), Step::Advanced(3));
        assert_eq!(walker.step(&mut events), Step::Arrived);
        assert_eq!(walker.path().tiles(), Ok(vec![0, 1, 3]));
        let statuses = events.iter().map(|e| (e.tile, e.status)).collect::<Vec<_>>();
        assert_eq!(
            statuses,
            vec![
                (2, TileStatus::Visiting),
                (2, TileStatus::Visited),
                (2, TileStatus::Blocked),
                (1, TileStatus::Visiting),
                (1, TileStatus::Visited),
            ]
        );
    }

    #[test]
    fn test_isolated_start_is_exhausted() {
        let mut maze = Maze::new(Size::new(3, 3)).unwrap();
        maze.block_all();
        let mut walker = Walker::new(&maze, 4, 0, FixedOrder).unwrap();
        assert_eq!(walker.step(&mut ()), Step::Exhausted);
        assert_eq!(walker.step(&mut ()), Step::Exhausted);
    }

    #[test]
    fn test_closure_policy() {
        let maze = Maze::new(Size::new(3, 3)).unwrap();
        // Always go right, never anywhere else
        let right_only = |maze: &Maze, visited: &VisitedTiles, tile: usize| {
            maze.passage(tile, Direction::Right)
                .filter(|&next| !visited.is_visited(next))
        };
        let path = Walker::new(&maze, 0, 2, right_only)
            .unwrap()
            .run(&mut (), None)
            .unwrap();
        assert_eq!(path, Some(vec![0, 1, 2]));
        let unreachable = Walker::new(&maze, 0, 8, right_only)
            .unwrap()
            .run(&mut (), None)
            .unwrap();
        assert_eq!(unreachable, None);
    }

    #[test]
    fn test_rejects_tiles_outside_maze() {
        let maze = corridor();
        assert_eq!(
            Walker::new(&maze, 0, 3, FixedOrder).err(),
            Some(MazeError::TileOutOfRange {
                tile: 3,
                tile_count: 3
            })
        );
    }
}
