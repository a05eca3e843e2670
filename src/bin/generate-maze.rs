//! CLI for maze generation

use anyhow::Context;
use clap::Parser;
use perfect_maze::{Glyphs, Maze, MazeGenerator, Strategy};

/// Perfect maze generator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of path rows
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Number of path columns
    #[arg(long, default_value_t = 20)]
    cols: usize,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Backtracking strategy for carving and solving
    #[arg(long, value_enum, default_value_t = Strategy::Iterative)]
    strategy: Strategy,

    /// Overlay the solution
    #[arg(long)]
    solve: bool,

    /// Draw with emoji glyphs
    #[arg(long)]
    emoji: bool,
}

/// Generate maze, print output
fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(
        env_logger::Env::new()
            .filter("MAZE_LOG")
            .write_style("MAZE_LOG_STYLE"),
    );
    let args = Args::parse();

    let mut gen = MazeGenerator::new(args.seed);
    let mut maze = Maze::generate(&mut gen, args.rows, args.cols, args.strategy)
        .context("Number of path rows and columns must be at least 1")?;
    if args.solve {
        maze.solve(args.strategy)?;
    }

    let glyphs = if args.emoji {
        Glyphs::emoji()
    } else {
        Glyphs::ascii()
    };
    println!("{}", maze.render(&glyphs, args.solve));
    Ok(())
}
