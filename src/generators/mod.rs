mod dfs;
mod test;
mod wilson;

pub use dfs::RandomizedDepthFirstGenerator;
pub use test::TestGenerator;
pub use wilson::WilsonGenerator;

use crate::{
    maze::{Maze, MazeError, Size},
    progress::{Progress, Reporter},
};

/// Callback invoked with the in-progress maze after each meaningful mutation.
pub type GeneratorCallback<'a> = &'a mut dyn FnMut(&Maze) -> Progress;

/// A finished maze together with the seed that reproduces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub maze: Maze,
    pub seed: u32,
}

pub trait MazeGenerator {
    fn name(&self) -> &'static str;

    /// Builds a maze of the given size.
    ///
    /// Returns `Ok(None)` when the progress callback cancelled the run and
    /// `Err` only for an invalid size.
    fn generate(
        &self,
        size: Size,
        on_progress: Option<GeneratorCallback<'_>>,
    ) -> Result<Option<Generated>, MazeError>;
}

/// Reporter for generator callbacks.
type GeneratorReporter<'a> = Reporter<GeneratorCallback<'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum GeneratorKind {
    /// Randomized depth-first carving
    Dfs,
    /// Loop-erased random walks (uniform spanning tree)
    Wilson,
    /// Open grid with random closed fences
    Test,
}

impl GeneratorKind {
    /// Available maze generators
    pub const ALL: [GeneratorKind; 3] = [
        GeneratorKind::Dfs,
        GeneratorKind::Wilson,
        GeneratorKind::Test,
    ];

    pub fn build(self, seed: Option<u32>) -> Box<dyn MazeGenerator + Send> {
        match self {
            GeneratorKind::Dfs => Box::new(RandomizedDepthFirstGenerator::new(seed)),
            GeneratorKind::Wilson => Box::new(WilsonGenerator::new(seed)),
            GeneratorKind::Test => Box::new(TestGenerator::new(seed)),
        }
    }
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorKind::Dfs => write!(f, "Randomized Depth-First Search"),
            GeneratorKind::Wilson => write!(f, "Wilson's Algorithm"),
            GeneratorKind::Test => write!(f, "Test Pattern"),
        }
    }
}

/// Generate a maze with the selected algorithm, optionally seeded for reproducibility.
pub fn generate_maze(
    kind: GeneratorKind,
    size: Size,
    seed: Option<u32>,
    on_progress: Option<GeneratorCallback<'_>>,
) -> Result<Option<Generated>, MazeError> {
    kind.build(seed).generate(size, on_progress)
}
