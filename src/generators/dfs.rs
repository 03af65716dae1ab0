use crate::{
    generators::{GeneratorCallback, GeneratorReporter, Generated, MazeGenerator},
    maze::{Direction, Maze, MazeError, Size},
    prng::Mulberry32,
};

/// Randomized depth-first search ("recursive backtracker") with an explicit stack.
pub struct RandomizedDepthFirstGenerator {
    seed: Option<u32>,
}

impl RandomizedDepthFirstGenerator {
    pub fn new(seed: Option<u32>) -> Self {
        RandomizedDepthFirstGenerator { seed }
    }
}

impl MazeGenerator for RandomizedDepthFirstGenerator {
    fn name(&self) -> &'static str {
        "RandomizedDepthFirst"
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

        let mut visited = vec![false; maze.tile_count()];
        let mut stack = Vec::with_capacity(maze.tile_count());
        let mut choices = Vec::with_capacity(Direction::ALL.len());

        // Start the carving from a random tile
        let start = prng.random_index(maze.tile_count());
        visited[start] = true;
        stack.push(start);

        // Look at the top of the stack without popping it, so the tile stays
        // available for its other neighbors once the chosen branch is done
        while let Some(&current) = stack.last() {
            choices.clear();
            choices.extend(Direction::ALL.into_iter().filter_map(|dir| {
                maze.neighbor(current, dir)
                    .filter(|&next| !visited[next])
                    .map(|next| (dir, next))
            }));

            if choices.is_empty() {
                // Dead end, backtrack
                stack.pop();
                continue;
            }

            let (dir, next) = choices[prng.random_index(choices.len())];
            let (x, y) = maze.tile_coords(current);
            maze.set_blocked(x, y, dir, false)?;
            visited[next] = true;
            stack.push(next);

            if !reporter.report(|cb| cb(&maze)) {
                tracing::debug!("[{}] cancelled", self.name());
                return Ok(None);
            }
        }

        Ok(Some(Generated { maze, seed }))
    }
}
