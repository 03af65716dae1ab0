use std::{
    io::{Stdout, Write},
    sync::mpsc::RecvTimeoutError,
    time::Duration,
};

use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use tilemaze::{
    config::Args,
    driver,
    generators::{Generated, generate_maze},
    logging,
    maze::{Maze, TileEventHistory, TileObserver, TileStatus, mark_path, reset_tiles},
    progress::{Pacer, Progress},
    render,
    solvers::MazePath,
};

/// How often the animation loops check for key presses
const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(50);

/// Tile statuses of the maze on screen, along with the most recent changes.
struct Board {
    statuses: Vec<TileStatus>,
    history: TileEventHistory,
}

impl Board {
    fn new(tile_count: usize, max_history_events: usize) -> Self {
        Board {
            statuses: vec![TileStatus::None; tile_count],
            history: TileEventHistory::new(max_history_events),
        }
    }
}

impl TileObserver for Board {
    fn set_tile_status(&mut self, tile: usize, status: TileStatus) {
        if let Some(slot) = self.statuses.get_mut(tile) {
            *slot = status;
        }
        self.history.set_tile_status(tile, status);
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(args.log_level(), args.log_file.as_deref())?;
    let mut stdout = std::io::stdout();
    if args.delay().is_some() {
        set_panic_hook();
    }
    tracing::info!(
        "[main] {} maze, generator {:?}, solver {:?}, seed {:?}",
        args.size(),
        args.generator,
        args.solver,
        args.seed
    );

    let generated = match args.delay() {
        Some(delay) => animate_generation(&mut stdout, &args, delay)?,
        None => generate_maze(args.generator, args.size(), args.seed, None)
            .map_err(std::io::Error::other)?,
    };
    let Some(Generated { maze, seed }) = generated else {
        stdout.execute(style::PrintStyledContent(
            "Generation was cancelled.\n"
                .with(Color::Red)
                .attribute(Attribute::Bold),
        ))?;
        return Ok(());
    };
    stdout.execute(style::PrintStyledContent(
        format!(
            "Generated {} maze with {} (seed {}), {} open fences\n",
            maze.size(),
            args.generator,
            seed,
            maze.open_fence_count()
        )
        .with(Color::Green)
        .attribute(Attribute::Bold),
    ))?;

    // The maze seed also drives random solvers, so one seed replays the whole run
    let (start, exit) = args.endpoints(maze.tile_count());
    let mut board = Board::new(maze.tile_count(), args.history);
    let path = match args.delay() {
        Some(delay) => animate_solve(
            &mut stdout,
            &args,
            &maze,
            (start, exit),
            seed,
            delay,
            &mut board,
        )?,
        None => {
            reset_tiles(maze.tile_count(), start, exit, &mut board);
            let path = args
                .solver
                .build(Some(seed))
                .solve(&maze, start, exit, &mut board, None)
                .map_err(std::io::Error::other)?;
            if let Some(path) = &path {
                mark_path(path, &mut board);
            }
            path
        }
    };

    let fits = terminal::size()
        .map(|(columns, _)| render::line_width(&maze) <= columns as usize)
        .unwrap_or(true);
    if fits {
        render::draw(&mut stdout, &maze, &board.statuses)?;
    }
    tracing::debug!("[main] maze walls:\n{}", render::plain(&maze));

    let msg = match &path {
        Some(path) => format!("Path found with {}! {} moves. ", args.solver, path.len() - 1),
        None => format!("No path found with {}. ", args.solver),
    };
    stdout.execute(style::PrintStyledContent(
        msg.with(Color::Green).attribute(Attribute::Bold),
    ))?;
    stdout.execute(style::PrintStyledContent(
        format!("{} tile events\n", board.history.total_events()).with(Color::Blue),
    ))?;
    tracing::debug!(
        "[main] latest tile events: {:?}",
        board.history.recent().take(8).collect::<Vec<_>>()
    );
    Ok(())
}

/// Set a panic hook to restore the terminal on panic, even if the panic
/// occurs while raw mode is enabled for an animation
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode(); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Runs `animation` with the terminal in raw mode so single key presses reach it
fn with_raw_mode<T>(animation: impl FnOnce() -> std::io::Result<T>) -> std::io::Result<T> {
    terminal::enable_raw_mode()?;
    let result = animation();
    terminal::disable_raw_mode()?;
    result
}

/// Applies pending key presses to `pacer`: ↑/↓ change the speed, Enter skips
/// to the end and Esc cancels.
fn handle_keys(pacer: &Pacer) -> std::io::Result<()> {
    while event::poll(Duration::ZERO)? {
        if let event::Event::Key(event::KeyEvent {
            code,
            kind: event::KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            match code {
                KeyCode::Up => pacer.faster(),
                KeyCode::Down => pacer.slower(),
                KeyCode::Enter => pacer.skip(),
                KeyCode::Esc => {
                    tracing::debug!("[input] Esc key pressed, cancelling");
                    pacer.cancel()
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn print_status_line(stdout: &mut Stdout, line: String) -> std::io::Result<()> {
    queue!(
        stdout,
        cursor::MoveToColumn(0),
        terminal::Clear(ClearType::CurrentLine),
        style::PrintStyledContent(line.with(Color::Cyan))
    )?;
    stdout.flush()
}

fn animate_generation(
    stdout: &mut Stdout,
    args: &Args,
    delay: Duration,
) -> std::io::Result<Option<Generated>> {
    let pacer = Pacer::new(delay);
    let task = driver::spawn_generation(args.generator, args.size(), args.seed);
    with_raw_mode(|| {
        for snapshot in task.snapshots().iter() {
            print_status_line(
                stdout,
                format!(
                    "Generating {} maze: {} open fences (↑/↓ speed, Enter skip, Esc cancel)",
                    snapshot.size(),
                    snapshot.open_fence_count()
                ),
            )?;
            handle_keys(&pacer)?;
            if pacer.tick() != Progress::Continue {
                break;
            }
        }
        stdout.execute(style::Print("\r\n"))?;
        Ok(())
    })?;
    if pacer.is_cancelled() {
        task.cancel();
    }
    task.join().map_err(std::io::Error::other)
}

fn animate_solve(
    stdout: &mut Stdout,
    args: &Args,
    maze: &Maze,
    (start, exit): (usize, usize),
    seed: u32,
    delay: Duration,
    board: &mut Board,
) -> std::io::Result<Option<MazePath>> {
    let task = driver::spawn_solve(
        args.solver,
        maze.clone(),
        start,
        exit,
        Some(seed),
        Pacer::new(delay),
    );
    with_raw_mode(|| {
        let mut explored = 0;
        loop {
            handle_keys(task.pacer())?;
            match task.events().recv_timeout(INPUT_POLL_TIMEOUT) {
                Ok(event) => {
                    board.set_tile_status(event.tile, event.status);
                    if event.status == TileStatus::Visited {
                        explored += 1;
                        print_status_line(stdout, format!("Solving: {} tiles explored", explored))?;
                    }
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        stdout.execute(style::Print("\r\n"))?;
        Ok(())
    })?;
    task.join().map_err(std::io::Error::other)
}
