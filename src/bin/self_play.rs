//! Plays batches of games between move selection strategies

use anyhow::Result;
use clap::{Parser, ValueEnum};
use indicatif::*;
use rayon::prelude::*;

use std::time::Instant;

use connect4_minimax::arena::{play_match, MatchOutcome, Strategy, Tally};
use connect4_minimax::WIDTH;

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum StrategyArg {
    Random,
    Greedy,
    Minimax,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Strategy::Random,
            StrategyArg::Greedy => Strategy::Greedy,
            StrategyArg::Minimax => Strategy::Minimax,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "self_play", about = "Pit Connect 4 strategies against each other")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: u64,

    /// Strategy of the first player
    #[arg(long, value_enum, default_value = "greedy")]
    player_one: StrategyArg,

    /// Strategy of the second player
    #[arg(long, value_enum, default_value = "minimax")]
    player_two: StrategyArg,

    /// Seed of the first game, later games use the following seeds
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (player_one, player_two) = (Strategy::from(cli.player_one), Strategy::from(cli.player_two));

    println!(
        "Playing {} games, {:?} (player 1) against {:?} (player 2)",
        cli.games, player_one, player_two
    );

    let progress = ProgressBar::new(cli.games);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let start = Instant::now();
    let outcomes = (0..cli.games)
        .into_par_iter()
        .map(|i| {
            let outcome = play_match(player_one, player_two, cli.seed + i);
            progress.inc(1);
            outcome
        })
        .collect::<Result<Vec<MatchOutcome>>>()?;
    progress.finish();

    let mut tally = Tally::default();
    let mut openings = [0usize; WIDTH];
    let mut nodes = 0;
    for outcome in outcomes.iter() {
        tally.record(outcome.state);
        // player two's reply to the first tile
        if let Some(&column) = outcome.moves.get(1) {
            openings[column] += 1;
        }
        nodes += outcome.nodes;
    }

    println!(
        "Finished {} games in {}",
        tally.games(),
        HumanDuration(start.elapsed())
    );
    println!(
        "Player 2 wins: {}, draws: {}, losses: {}",
        tally.wins, tally.draws, tally.losses
    );
    println!("Positions searched: {}", nodes);
    println!("Player 2 first replies by column:");
    for (column, count) in openings.iter().enumerate() {
        println!("  {}: {}", column + 1, count);
    }
    Ok(())
}
