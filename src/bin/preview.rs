use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tile_merge::engine::{Direction, Grid};
use tile_merge::utils::grid_from_text;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Show what each move would do to a board", long_about = None)]
struct Args {
    /// Only preview this direction (up, down, left, right)
    #[clap(short, long)]
    direction: Option<Direction>,

    /// Path to the board file (one row per line, whitespace-separated values)
    board_file: PathBuf,
}

fn read_board_file(path: &Path) -> Result<Grid> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    grid_from_text(&content).with_context(|| format!("invalid board in {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut grid = read_board_file(&args.board_file)?;
    info!(path = %args.board_file.display(), size = grid.size(), "loaded board");

    println!("Current board:\n{}", grid);

    let directions = match args.direction {
        Some(direction) => vec![direction],
        None => Direction::ALL.to_vec(),
    };

    let current = grid.to_string();
    for direction in directions {
        let preview = grid.render_preview(direction)?;
        if preview == current {
            println!("{}: cannot move\n", direction);
        } else {
            println!("{}:\n{}", direction, preview);
        }
    }

    Ok(())
}
