use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use tile_merge::engine::{Direction, Snapshot, DEFAULT_GRID_SIZE};
use tile_merge::spawn::TileSpawner;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play the sliding-tile merge puzzle in the terminal", long_about = None)]
struct Args {
    /// Side length of the board
    #[clap(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    size: usize,

    /// Seed for tile placement; random if omitted
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut spawner = match args.seed {
        Some(seed) => TileSpawner::new(seed),
        None => TileSpawner::from_entropy(),
    };
    let mut grid = spawner
        .new_grid(args.size)
        .with_context(|| format!("cannot create a {0}x{0} board", args.size))?;
    // Single level of undo: the board as it was before the last move.
    let mut undo: Option<Snapshot> = None;

    println!("Welcome to Tile Merge!");

    loop {
        println!("---------------------");
        print!("{}", grid);

        print!("Enter a direction (up/down/left/right or w/a/s/d), 'u' to undo, 'q' to quit: ");
        io::stdout().flush().context("cannot flush stdout")?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input).context("cannot read input")? == 0 {
            break;
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => match undo.take() {
                Some(saved) => {
                    grid.restore(&saved)?;
                    println!("Move undone.");
                }
                None => println!("Nothing to undo."),
            },
            other => match other.parse::<Direction>() {
                Ok(direction) => {
                    let saved = grid.snapshot();
                    if grid.slide(direction) {
                        undo = Some(saved);
                        spawner.spawn(&mut grid);
                    } else {
                        println!("Cannot move {}.", direction);
                    }
                }
                Err(e) => println!("Invalid input: {}", e),
            },
        }
    }

    Ok(())
}
