use std::time::Instant;

use tilemaze::{
    generators::{GeneratorKind, generate_maze},
    maze::Size,
    solvers::{SolverKind, default_endpoints},
};

fn main() -> std::io::Result<()> {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(1);
    let size = Size::new(255, 255);

    for generator in GeneratorKind::ALL {
        for solver in SolverKind::ALL {
            let started = Instant::now();
            let mut moves = 0;
            for seed in 0..num_iters as u32 {
                let Some(generated) = generate_maze(generator, size, Some(seed), None)
                    .map_err(std::io::Error::other)?
                else {
                    continue;
                };
                let (start, exit) = default_endpoints(&generated.maze);
                let path = solver
                    .build(Some(seed))
                    .solve(&generated.maze, start, exit, &mut (), None)
                    .map_err(std::io::Error::other)?;
                moves += path.map_or(0, |path| path.len() - 1);
            }
            println!(
                "{:<32} {:<28} {:>6} runs {:>10.2?} ({} moves)",
                generator.to_string(),
                solver.to_string(),
                num_iters,
                started.elapsed(),
                moves
            );
        }
    }
    Ok(())
}
