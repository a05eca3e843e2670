//! CLI for maze solving

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use perfect_maze::{Direction, Glyphs, Maze, MoveOutcome, Player, Strategy};

/// Solve a maze printed by `generate-maze`
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Backtracking strategy of the solver
    #[arg(short, long, value_enum, default_value_t = Strategy::Iterative)]
    strategy: Strategy,

    /// Maze is drawn with emoji glyphs
    #[arg(short, long)]
    emoji: bool,

    /// Walk these moves (U, D, L, R) from the start instead of solving
    #[arg(short, long)]
    moves: Option<String>,

    /// File, where to read the maze. Use `-` for stdin.
    file: PathBuf,
}

/// Read maze from file, print output
fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(
        env_logger::Env::new()
            .filter("MAZE_LOG")
            .write_style("MAZE_LOG_STYLE"),
    );
    let args = Args::parse();
    let glyphs = if args.emoji {
        Glyphs::emoji()
    } else {
        Glyphs::ascii()
    };

    let text = if args.file.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&args.file)
            .with_context(|| format!("Could not read maze from {}", args.file.display()))?
    };
    let mut maze = Maze::parse(text.trim_matches('\n'), &glyphs)?;

    if let Some(moves) = args.moves {
        let mut player = Player::new(maze.start());
        for direction in Direction::parse_moves(&moves)? {
            if player.try_move(maze.grid(), direction) == MoveOutcome::Solved {
                println!("Maze solved in {} steps.", player.steps());
                return Ok(());
            }
        }
        let p = player.position();
        println!(
            "Stopped at row={}, col={} after {} steps.",
            p.row,
            p.col,
            player.steps()
        );
        return Ok(());
    }

    let trail = maze
        .solve(args.strategy)
        .context("Maze has no route from start to end")?;
    println!("{}", maze.render(&glyphs, true));
    println!("The solution is {} steps.", trail.len() + 1);
    Ok(())
}
