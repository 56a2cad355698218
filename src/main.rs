use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::Rng;

use std::time::Duration;

use connect4_minimax::board::Piece;
use connect4_minimax::session::{GameSession, GameState, Mode};
use connect4_minimax::solver::Solver;

mod display;
use display::*;

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum ModeArg {
    /// Two humans share the terminal
    Local,
    /// A human plays against the minimax opponent
    Computer,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum FirstArg {
    Human,
    Computer,
    Random,
}

/// Play Connect 4 in the terminal
#[derive(Parser, Debug)]
#[command(name = "connect4", about = "Play Connect 4 against a friend or a minimax opponent")]
struct Cli {
    /// Who plays
    #[arg(long, value_enum, default_value = "computer")]
    mode: ModeArg,

    /// Who drops the first tile against the computer
    #[arg(long, value_enum, default_value = "random")]
    first: FirstArg,

    /// Seed the computer's tie-breaks for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Search the computer's candidate moves on all cores
    #[arg(long)]
    parallel: bool,

    /// Print search statistics for every computer move
    #[arg(long)]
    verbose: bool,

    /// Print the board as plain text instead of drawing it
    #[arg(long)]
    plain: bool,

    /// Pause before showing the computer's move, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    println!("Welcome to Connect 4\n");

    let (mode, first) = match cli.mode {
        ModeArg::Local => (Mode::HumanVsHuman, Piece::PlayerOne),
        ModeArg::Computer => {
            let computer_first = match cli.first {
                FirstArg::Human => false,
                FirstArg::Computer => true,
                FirstArg::Random => rand::thread_rng().gen(),
            };
            if computer_first {
                println!("The computer moves first");
                (Mode::HumanVsComputer, Piece::PlayerTwo)
            } else {
                println!("You move first");
                (Mode::HumanVsComputer, Piece::PlayerOne)
            }
        }
    };

    let solver = match cli.seed {
        Some(seed) => Solver::seeded(seed),
        None => Solver::new(),
    };
    let mut solver = solver.with_parallel_search(cli.parallel);

    let mut host = TerminalHost {
        plain: cli.plain,
        delay: Duration::from_millis(cli.delay_ms),
    };

    let mut session = GameSession::new(mode, first);
    match session.run(&mut host, &mut solver, cli.verbose)? {
        GameState::Won(Piece::PlayerTwo) if mode == Mode::HumanVsComputer => {
            println!("The computer wins!")
        }
        GameState::Won(piece) => println!("{} wins!", piece),
        GameState::Draw => println!("Draw!"),
        GameState::Playing => {}
    }
    Ok(())
}
