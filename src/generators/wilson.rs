use crate::{
    generators::{GeneratorCallback, GeneratorReporter, Generated, MazeGenerator},
    maze::{Direction, Maze, MazeError, Size},
    prng::Mulberry32,
};

/// Marks a tile that is not part of the current walk.
const NOT_IN_WALK: usize = usize::MAX;

/// Wilson's algorithm: grows a uniform spanning tree out of loop-erased random walks.
///
/// Every walk starts from the lowest-indexed tile not yet in the maze and wanders
/// until it hits the maze. Whenever the walk crosses itself the loop is erased,
/// so what gets committed is always a simple path.
pub struct WilsonGenerator {
    seed: Option<u32>,
}

impl WilsonGenerator {
    pub fn new(seed: Option<u32>) -> Self {
        WilsonGenerator { seed }
    }
}

impl MazeGenerator for WilsonGenerator {
    fn name(&self) -> &'static str {
        "Wilson"
    }

    fn generate(
        &self,
        size: Size,
        on_progress: Option<GeneratorCallback<'_>>,
    ) -> Result<Option<Generated>, MazeError> {
        let mut maze = Maze::new(size)?;
        maze.block_all();

        let mut reporter = GeneratorReporter::new(on_progress);
        if !reporter.report(|cb| cb(&maze)) {
            return Ok(None);
        }

        let mut prng = Mulberry32::new(self.seed);
        let seed = prng.seed();
        tracing::debug!("[{}] generating {} maze with seed {}", self.name(), size, seed);

        let mut walk = Walk::new(maze.tile_count());
        // The tree is seeded with the first tile; every later tile is reached by a walk
        walk.in_maze[0] = true;
        let mut remaining = 1..maze.tile_count();
        let mut walks = 0usize;

        while let Some(origin) = remaining.by_ref().find(|&tile| !walk.in_maze[tile]) {
            walk.run(&mut maze, &mut prng, origin)?;
            walks += 1;
            if !reporter.report(|cb| cb(&maze)) {
                tracing::debug!("[{}] cancelled after {} walks", self.name(), walks);
                return Ok(None);
            }
        }

        tracing::debug!("[{}] done after {} walks", self.name(), walks);
        Ok(Some(Generated { maze, seed }))
    }
}

/// Bookkeeping shared by all walks of one generation, indexed by tile.
struct Walk {
    /// Tiles already committed to the maze.
    in_maze: Vec<bool>,
    /// Predecessor of each tile on the current walk, [`NOT_IN_WALK`] otherwise.
    /// The walk origin points to itself.
    previous: Vec<usize>,
}

impl Walk {
    fn new(tile_count: usize) -> Self {
        Walk {
            in_maze: vec![false; tile_count],
            previous: vec![NOT_IN_WALK; tile_count],
        }
    }

    /// Walks randomly from `origin` until reaching the maze, then carves the
    /// loop-erased walk into it.
    fn run(&mut self, maze: &mut Maze, prng: &mut Mulberry32, origin: usize) -> Result<(), MazeError> {
        self.previous[origin] = origin;
        let mut current = origin;
        let mut steps = 0usize;
        loop {
            let next = random_successor(maze, prng, current);
            steps += 1;
            if self.previous[next] != NOT_IN_WALK {
                // The walk crossed itself: drop the loop back to `next`
                self.erase_loop(current, next);
            } else {
                self.previous[next] = current;
            }
            if self.in_maze[next] {
                tracing::trace!("walk from {} reached the maze at {} after {} steps", origin, next, steps);
                return self.commit(maze, next);
            }
            current = next;
        }
    }

    /// Unlinks the walk from `from` back to (not including) `to`.
    fn erase_loop(&mut self, mut from: usize, to: usize) {
        while from != to {
            let before = self.previous[from];
            self.previous[from] = NOT_IN_WALK;
            from = before;
        }
    }

    /// Opens the fences along the walk ending at `end`, marking its tiles as part
    /// of the maze and clearing the walk so the next one starts fresh.
    fn commit(&mut self, maze: &mut Maze, end: usize) -> Result<(), MazeError> {
        let mut tile = end;
        loop {
            let before = self.previous[tile];
            if before == tile {
                break;
            }
            let dir = direction_between(maze, before, tile);
            let (x, y) = maze.tile_coords(before);
            maze.set_blocked(x, y, dir, false)?;
            self.in_maze[tile] = true;
            self.previous[tile] = NOT_IN_WALK;
            tile = before;
        }
        // `tile` is now the walk origin
        self.in_maze[tile] = true;
        self.previous[tile] = NOT_IN_WALK;
        Ok(())
    }
}

/// Random grid neighbor of `tile`, retrying directions that leave the grid.
fn random_successor(maze: &Maze, prng: &mut Mulberry32, tile: usize) -> usize {
    loop {
        let dir = Direction::ALL[prng.random_index(Direction::ALL.len())];
        if let Some(next) = maze.neighbor(tile, dir) {
            return next;
        }
    }
}

/// Direction from `from` to the adjacent tile `to`.
fn direction_between(maze: &Maze, from: usize, to: usize) -> Direction {
    Direction::ALL
        .into_iter()
        .find(|&dir| maze.neighbor(from, dir) == Some(to))
        .unwrap_or_else(|| unreachable!("tiles {} and {} are not adjacent", from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Progress;

    #[test]
    fn test_erase_loop_keeps_walk_simple() {
        // Walk 0 -> 1 -> 2 -> 5 -> 4 -> 1 on a 3x3 grid
        let mut walk = Walk::new(9);
        walk.previous[0] = 0;
        walk.previous[1] = 0;
        walk.previous[2] = 1;
        walk.previous[5] = 2;
        walk.previous[4] = 5;
        walk.erase_loop(4, 1);
        assert_eq!(walk.previous[4], NOT_IN_WALK);
        assert_eq!(walk.previous[5], NOT_IN_WALK);
        assert_eq!(walk.previous[2], NOT_IN_WALK);
        assert_eq!(walk.previous[1], 0);
        assert_eq!(walk.previous[0], 0);
    }

    #[test]
    fn test_commit_opens_walk_and_resets_it() {
        let mut maze = Maze::new(Size::new(3, 1)).unwrap();
        maze.block_all();
        let mut walk = Walk::new(3);
        walk.in_maze[0] = true;
        // Walk from 2 to the maze at 0
        walk.previous[2] = 2;
        walk.previous[1] = 2;
        walk.previous[0] = 1;
        walk.commit(&mut maze, 0).unwrap();
        assert_eq!(maze.open_fence_count(), 2);
        assert!(walk.in_maze.iter().all(|&b| b));
        assert!(walk.previous.iter().all(|&p| p == NOT_IN_WALK));
    }

    #[test]
    fn test_one_report_per_walk() {
        let mut reports = 0;
        let mut callback = |_: &Maze| {
            reports += 1;
            Progress::Continue
        };
        let generated = WilsonGenerator::new(Some(11))
            .generate(Size::new(9, 9), Some(&mut callback))
            .unwrap()
            .unwrap();
        assert_eq!(generated.maze.open_fence_count(), 80);
        // Each walk commits at least one tile
        assert!(reports >= 2 && reports <= 81);
    }

    #[test]
    fn test_differs_from_depth_first() {
        let size = Size::new(16, 16);
        let wilson = WilsonGenerator::new(Some(5)).generate(size, None).unwrap().unwrap();
        let dfs = crate::generators::RandomizedDepthFirstGenerator::new(Some(5))
            .generate(size, None)
            .unwrap()
            .unwrap();
        assert_ne!(wilson.maze, dfs.maze);
    }
}
