use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{generators::GeneratorKind, maze::Size, solvers::SolverKind};

#[derive(Parser, Debug, Clone)]
#[clap(version, about, name = "tilemaze")]
pub struct Args {
    #[clap(long, default_value_t = 20, help = "Maze width in tiles")]
    pub width: usize,
    #[clap(long, default_value_t = 20, help = "Maze height in tiles")]
    pub height: usize,
    #[clap(short, long, value_enum, default_value = "dfs", help = "Maze generation algorithm")]
    pub generator: GeneratorKind,
    #[clap(short, long, value_enum, default_value = "bfs", help = "Maze solving algorithm")]
    pub solver: SolverKind,
    #[clap(long, help = "Seed for reproducible generation and random solving")]
    pub seed: Option<u32>,
    #[clap(long, help = "Start tile index [default: 0]")]
    pub start: Option<usize>,
    #[clap(long, help = "Exit tile index [default: last tile]")]
    pub exit: Option<usize>,
    #[clap(long, help = "Animate generation and solving with this delay per step")]
    pub delay_ms: Option<u64>,
    #[clap(long, default_value_t = 10000, help = "Number of tile events kept for browsing")]
    pub history: usize,
    #[clap(long, help = "Write logs to this file instead of stderr")]
    pub log_file: Option<PathBuf>,
    #[clap(short, long, action, help = "Log debug output")]
    pub verbose: bool,
}

impl Args {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Start and exit tiles, defaulting to the first and the last tile.
    pub fn endpoints(&self, tile_count: usize) -> (usize, usize) {
        (
            self.start.unwrap_or(0),
            self.exit.unwrap_or(tile_count.saturating_sub(1)),
        )
    }

    /// Per-step delay, `None` when the run is not animated.
    pub fn delay(&self) -> Option<Duration> {
        self.delay_ms.map(Duration::from_millis)
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
