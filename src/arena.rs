//! Self-play between move selection strategies

use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Piece;
use crate::session::{GameSession, GameState, Mode};
use crate::solver::Solver;

/// A way of choosing moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Strategy {
    /// Any open column
    Random,
    /// The best scoring column one move ahead
    Greedy,
    /// Full-depth minimax search
    Minimax,
}

impl Strategy {
    fn choose(self, session: &GameSession, solver: &mut Solver) -> Option<usize> {
        let piece = session.to_move();
        match self {
            Strategy::Random => solver.random_move(session.board()),
            Strategy::Greedy => solver.greedy_move(session.board(), piece),
            Strategy::Minimax => solver.choose_move_for(session.board(), piece),
        }
    }
}

/// The result of one self-play game
#[derive(Clone, Debug)]
pub struct MatchOutcome {
    pub state: GameState,
    /// Columns played, zero-indexed, starting with player one
    pub moves: Vec<usize>,
    pub nodes: usize,
}

/// Plays one game between two strategies, player one moving first
pub fn play_match(player_one: Strategy, player_two: Strategy, seed: u64) -> Result<MatchOutcome> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut solvers = (Solver::seeded(rng.gen()), Solver::seeded(rng.gen()));
    let mut session = GameSession::new(Mode::HumanVsHuman, Piece::PlayerOne);

    while !session.state().is_over() {
        let (strategy, solver) = match session.to_move() {
            Piece::PlayerOne => (player_one, &mut solvers.0),
            Piece::PlayerTwo => (player_two, &mut solvers.1),
        };
        let column = strategy
            .choose(&session, solver)
            .ok_or_else(|| anyhow!("{:?} found no move in an unfinished game", strategy))?;
        session.play(column)?;
    }

    Ok(MatchOutcome {
        state: session.state(),
        moves: session.moves().to_vec(),
        nodes: solvers.0.node_count + solvers.1.node_count,
    })
}

/// Win, draw and loss counts from player two's point of view
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct Tally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl Tally {
    pub fn record(&mut self, state: GameState) {
        match state {
            GameState::Won(Piece::PlayerTwo) => self.wins += 1,
            GameState::Won(Piece::PlayerOne) => self.losses += 1,
            GameState::Draw => self.draws += 1,
            GameState::Playing => {}
        }
    }

    pub fn games(&self) -> usize {
        self.wins + self.draws + self.losses
    }
}
