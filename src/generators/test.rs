use crate::{
    generators::{GeneratorCallback, GeneratorReporter, Generated, MazeGenerator},
    maze::{Direction, Maze, MazeError, Size},
    prng::Mulberry32,
};

/// Number of random fence closures applied to the open grid.
const CLOSURES: usize = 100;

/// Fixture generator: an open grid with a handful of randomly closed fences.
///
/// Mostly useful to exercise progress reporting; the result is neither a perfect
/// maze nor guaranteed to be connected.
pub struct TestGenerator {
    seed: Option<u32>,
}

impl TestGenerator {
    pub fn new(seed: Option<u32>) -> Self {
        TestGenerator { seed }
    }
}

impl MazeGenerator for TestGenerator {
    fn name(&self) -> &'static str {
        "Test"
    }

    fn generate(
        &self,
        size: Size,
        on_progress: Option<GeneratorCallback<'_>>,
    ) -> Result<Option<Generated>, MazeError> {
        let mut maze = Maze::new(size)?;

        let mut reporter = GeneratorReporter::new(on_progress);
        if !reporter.report(|cb| cb(&maze)) {
            return Ok(None);
        }

        let mut prng = Mulberry32::new(self.seed);
        let seed = prng.seed();
        tracing::debug!("[{}] generating {} maze with seed {}", self.name(), size, seed);

        // Only fences that exist can be closed: no UP fence in a single row,
        // no RIGHT fence in a single column
        let directions: &[Direction] = match (size.width > 1, size.height > 1) {
            (true, true) => &[Direction::Up, Direction::Right],
            (true, false) => &[Direction::Right],
            _ => &[Direction::Up],
        };

        for _ in 0..CLOSURES {
            let x = prng.random_index(size.width.max(2) - 1);
            let y = prng.random_index(size.height.max(2) - 1);
            let dir = directions[prng.random_index(directions.len())];
            maze.set_blocked(x, y, dir, true)?;
            if !reporter.report(|cb| cb(&maze)) {
                return Ok(None);
            }
        }

        Ok(Some(Generated { maze, seed }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Progress;

    #[test]
    fn test_reports_every_closure() {
        let mut reports = 0;
        let mut callback = |_: &Maze| {
            reports += 1;
            Progress::Continue
        };
        TestGenerator::new(Some(4))
            .generate(Size::new(10, 10), Some(&mut callback))
            .unwrap()
            .unwrap();
        assert_eq!(reports, 1 + CLOSURES);
    }

    #[test]
    fn test_only_closes_fences() {
        let size = Size::new(10, 10);
        let maze = TestGenerator::new(Some(4))
            .generate(size, None)
            .unwrap()
            .unwrap()
            .maze;
        let all_open = Maze::new(size).unwrap().open_fence_count();
        let open = maze.open_fence_count();
        assert!(open < all_open);
        assert!(open >= all_open - CLOSURES);
    }

    #[test]
    fn test_thin_grids() {
        for size in [Size::new(1, 6), Size::new(6, 1), Size::new(2, 1)] {
            let generated = TestGenerator::new(Some(17)).generate(size, None).unwrap();
            assert!(generated.is_some(), "{} failed", size);
        }
    }
}
