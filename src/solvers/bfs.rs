use crate::{
    maze::{Direction, Maze, MazeError, TileObserver, TileStatus},
    progress::Reporter,
    solvers::{MazePath, MazeSolver, SolverCallback, check_tile},
};

/// Marks a tile no frontier has reached yet.
const UNREACHED: usize = usize::MAX;

/// Breadth-first search expanding one whole frontier layer per progress point.
///
/// The exit is discovered on the layer of its minimal distance, so the returned
/// path always has the fewest possible moves.
pub struct BreadthFirstSolver;

impl MazeSolver for BreadthFirstSolver {
    fn name(&self) -> &'static str {
        "BreadthFirst"
    }

    fn solve(
        &self,
        maze: &Maze,
        start: usize,
        exit: usize,
        observer: &mut dyn TileObserver,
        on_progress: Option<SolverCallback<'_>>,
    ) -> Result<Option<MazePath>, MazeError> {
        check_tile(maze, start)?;
        check_tile(maze, exit)?;
        tracing::debug!("[{}] solving {} -> {}", self.name(), start, exit);
        if start == exit {
            return Ok(Some(vec![start]));
        }

        let mut set_status = |tile: usize, status: TileStatus| {
            if tile != start && tile != exit {
                observer.set_tile_status(tile, status);
            }
        };
        let mut reporter = Reporter::new(on_progress);

        // Predecessor of every reached tile; the start points to itself
        let mut previous = vec![UNREACHED; maze.tile_count()];
        let mut current = Vec::with_capacity(maze.tile_count());
        let mut next = Vec::with_capacity(maze.tile_count());
        let mut neighbors = Vec::with_capacity(Direction::ALL.len());

        previous[start] = start;
        current.push(start);
        // Number of tiles on a path reaching the current frontier
        let mut length = 1;

        while !current.is_empty() {
            next.clear();
            for &tile in &current {
                set_status(tile, TileStatus::Visited);

                neighbors.clear();
                neighbors.extend(
                    Direction::ALL
                        .into_iter()
                        .filter_map(|dir| maze.passage(tile, dir))
                        .filter(|&neighbor| previous[neighbor] == UNREACHED),
                );
                if neighbors.is_empty() {
                    set_status(tile, TileStatus::Blocked);
                }

                for &neighbor in &neighbors {
                    previous[neighbor] = tile;
                    if neighbor == exit {
                        let path = reconstruct(&previous, start, exit, length + 1)?;
                        tracing::debug!("[{}] path length: {}", self.name(), path.len());
                        return Ok(Some(path));
                    }
                    next.push(neighbor);
                    set_status(neighbor, TileStatus::Visiting);
                }
            }
            length += 1;
            std::mem::swap(&mut current, &mut next);

            if !reporter.report(|cb| cb()) {
                tracing::debug!("[{}] cancelled at layer {}", self.name(), length);
                return Ok(None);
            }
        }

        tracing::debug!("[{}] no path after {} layers", self.name(), length);
        Ok(None)
    }
}

/// Walks the predecessor links back from `exit`, expecting to land on `start`
/// after exactly `length` tiles.
fn reconstruct(
    previous: &[usize],
    start: usize,
    exit: usize,
    length: usize,
) -> Result<MazePath, MazeError> {
    let mut path = vec![0; length];
    let mut tile = exit;
    for slot in path.iter_mut().rev() {
        *slot = tile;
        tile = previous[tile];
    }
    if tile != start {
        return Err(MazeError::UnexpectedPathStart {
            found: tile,
            expected: start,
        });
    }
    Ok(path)
}
