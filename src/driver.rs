use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, SyncSender},
    },
    thread::JoinHandle,
};

use crate::{
    generators::{Generated, GeneratorKind},
    maze::{Maze, MazeError, Size, TileEvent, mark_path, reset_tiles},
    progress::{Pacer, Progress},
    solvers::{MazePath, SolverKind},
};

/// Maximum number of tile events to buffer in the channel between the solve thread and its reader
const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;

fn join_worker<T>(handle: JoinHandle<T>) -> T {
    match handle.join() {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// A maze being generated on its own thread.
pub struct GenerationTask {
    snapshots: Receiver<Maze>,
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<Result<Option<Generated>, MazeError>>,
}

impl GenerationTask {
    /// In-progress mazes, one per progress point. The generator waits until
    /// each snapshot is taken before it goes on.
    pub fn snapshots(&self) -> &Receiver<Maze> {
        &self.snapshots
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Waits for the generator. Snapshots not taken yet are dropped and the
    /// generator completes without reporting any more of them.
    pub fn join(self) -> Result<Option<Generated>, MazeError> {
        drop(self.snapshots);
        join_worker(self.handle)
    }
}

/// Runs a generator on a worker thread, handing over a snapshot at every progress point.
pub fn spawn_generation(kind: GeneratorKind, size: Size, seed: Option<u32>) -> GenerationTask {
    let (snapshot_tx, snapshot_rx) = std::sync::mpsc::sync_channel::<Maze>(1);
    let cancelled = Arc::new(AtomicBool::new(false));
    let cancelled_for_compute = cancelled.clone();
    let handle = std::thread::spawn(move || {
        let generator = kind.build(seed);
        tracing::info!("[generate] {} {} started", generator.name(), size);
        let mut on_progress = |maze: &Maze| {
            snapshot_progress(&snapshot_tx, &cancelled_for_compute, maze)
        };
        let result = generator.generate(size, Some(&mut on_progress));
        tracing::info!(
            "[generate] {} finished, completed: {}",
            generator.name(),
            matches!(result, Ok(Some(_)))
        );
        result
    });
    GenerationTask {
        snapshots: snapshot_rx,
        cancelled,
        handle,
    }
}

fn snapshot_progress(tx: &SyncSender<Maze>, cancelled: &AtomicBool, maze: &Maze) -> Progress {
    if cancelled.load(Ordering::Relaxed) {
        return Progress::Cancel;
    }
    match tx.send(maze.clone()) {
        Ok(()) => Progress::Continue,
        // Nobody is watching any more, unless that is because of a cancel
        Err(_) if cancelled.load(Ordering::Relaxed) => Progress::Cancel,
        Err(_) => Progress::Finish,
    }
}

/// A maze being solved on its own thread.
pub struct SolveTask {
    events: Receiver<TileEvent>,
    pacer: Pacer,
    handle: JoinHandle<Result<Option<MazePath>, MazeError>>,
}

impl SolveTask {
    /// Tile statuses in the order they change: a reset of every tile, the
    /// solver's own events, then the found path, if any.
    pub fn events(&self) -> &Receiver<TileEvent> {
        &self.events
    }

    pub fn pacer(&self) -> &Pacer {
        &self.pacer
    }

    pub fn cancel(&self) {
        self.pacer.cancel();
    }

    /// Waits for the solver. Events not read yet are dropped.
    pub fn join(self) -> Result<Option<MazePath>, MazeError> {
        drop(self.events);
        join_worker(self.handle)
    }
}

/// Runs a solver on a worker thread, streaming tile events and pausing at every
/// progress point for as long as `pacer` says.
pub fn spawn_solve(
    kind: SolverKind,
    maze: Maze,
    start: usize,
    exit: usize,
    seed: Option<u32>,
    pacer: Pacer,
) -> SolveTask {
    let (event_tx, event_rx) =
        std::sync::mpsc::sync_channel::<TileEvent>(MAX_EVENTS_IN_CHANNEL_BUFFER);
    let pacer_for_compute = pacer.clone();
    let handle = std::thread::spawn(move || {
        let solver = kind.build(seed);
        tracing::info!("[solve] {} from {} to {} started", solver.name(), start, exit);
        let mut observer = event_tx;
        if start < maze.tile_count() && exit < maze.tile_count() {
            reset_tiles(maze.tile_count(), start, exit, &mut observer);
        }
        let mut on_progress = || pacer_for_compute.tick();
        let result = solver.solve(&maze, start, exit, &mut observer, Some(&mut on_progress));
        if let Ok(Some(path)) = &result {
            mark_path(path, &mut observer);
        }
        tracing::info!(
            "[solve] {} finished, path length: {:?}",
            solver.name(),
            result.as_ref().ok().and_then(|p| p.as_ref().map(|p| p.len() - 1))
        );
        result
        // The event sender is dropped here, ending the event stream
    });
    SolveTask {
        events: event_rx,
        pacer,
        handle,
    }
}
