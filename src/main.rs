use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use tictactoe_ai::*;

mod console;

#[derive(Parser)]
#[command(name = "tictactoe")]
#[command(version, about = "Play m-in-a-row against a perfect opponent", long_about = None)]
struct Cli {
    /// Width and height of the board
    #[arg(short = 'n', long, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// Marks in a row needed to win
    #[arg(short = 'm', long, default_value_t = DEFAULT_RUN)]
    run: usize,

    /// The agent (O) moves first
    #[arg(short = 'a', long)]
    agent_first: bool,

    /// The agent plays both sides
    #[arg(long)]
    self_play: bool,

    /// Score the agent's candidate moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Plies searched before a position is called a draw (default 4 per board side)
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tictactoe_ai=warn")))
        .init();

    let cli = Cli::parse();

    let lines = Arc::new(WinningLines::generate(cli.size, cli.run)?);
    let mut config = SearchConfig::for_size(cli.size);
    if let Some(max_depth) = cli.max_depth {
        config = config.with_max_depth(max_depth)?;
    }
    let mut agent_x = Solver::with_config(lines.clone(), Player::X, config);
    let mut agent_o = Solver::with_config(lines.clone(), Player::O, config);

    let mut board = Board::new(cli.size);
    let mut to_move = if cli.agent_first { Player::O } else { Player::X };

    println!(
        "Welcome to {} in a row on a {}x{} board",
        cli.run, cli.size, cli.size
    );

    // game loop
    loop {
        console::display(&board)?;

        match lines.state(&board) {
            GameState::Playing => {}
            GameState::PlayerXWin => {
                println!("Player X wins!");
                break;
            }
            GameState::PlayerOWin => {
                println!("Player O wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }

        // AI player
        if to_move == Player::O || cli.self_play {
            let solver = match to_move {
                Player::X => &mut agent_x,
                Player::O => &mut agent_o,
            };

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
            spinner.set_message(&format!("Player {} is thinking...", to_move));
            spinner.enable_steady_tick(100);

            let start = Instant::now();
            let (score, best_move) = if cli.parallel {
                solver.best_move_parallel(&mut board)?
            } else {
                solver.best_move(&mut board)?
            };
            let elapsed = start.elapsed();
            spinner.finish_and_clear();

            match (score.cmp(&0), solver.plies_to_result(score)) {
                (Ordering::Greater, Some(plies)) => println!(
                    "Player {} can force a win in at most {} {}.",
                    to_move,
                    plies,
                    if plies == 1 { "ply" } else { "plies" }
                ),
                (Ordering::Less, Some(plies)) => println!(
                    "Player {} can force a win in at most {} {}.",
                    to_move.opponent(),
                    plies,
                    if plies == 1 { "ply" } else { "plies" }
                ),
                _ => println!("Player {} can at best force a draw.", to_move),
            }
            println!("Best move: {}", best_move);
            println!("Time to think: {:.3}s", elapsed.as_secs_f64());

        // human player
        } else {
            let index = console::read_move(&board, to_move)?;
            board.play_checked(index, to_move)?;
        }

        to_move = to_move.opponent();
    }
    Ok(())
}
