//! A depth-limited minimax agent for Connect 4

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use std::time::Instant;

use crate::board::{Board, Piece};
use crate::evaluation::score_position;
use crate::{SEARCH_DEPTH, WIN_SCORE};

/// Value of a finished game for the maximizing player
///
/// Player two is always the maximizing player: a win for them is worth
/// [`WIN_SCORE`], a win for player one is worth `-WIN_SCORE` and a draw is 0.
pub fn terminal_value(board: &Board) -> i64 {
    match board.winner() {
        Some(Piece::PlayerTwo) => WIN_SCORE,
        Some(Piece::PlayerOne) => -WIN_SCORE,
        None => 0,
    }
}

/// Picks a move from `(column, value)` pairs listed left to right
///
/// The randomly drawn `seed` column is kept unless some column is strictly
/// better, in which case the first strictly better column found wins.
fn select_move(seed: usize, values: &[(usize, i64)], maximizing: bool) -> (usize, i64) {
    let worst = if maximizing { i64::MIN } else { i64::MAX };
    let mut best = values
        .iter()
        .find(|&&(column, _)| column == seed)
        .copied()
        .unwrap_or((seed, worst));

    for &(column, value) in values.iter() {
        let improves = if maximizing {
            value > best.1
        } else {
            value < best.1
        };
        if improves {
            best = (column, value);
        }
    }
    best
}

/// An agent choosing moves with plain fixed-depth minimax
///
/// # Notes
/// Player two is the maximizing (computer) side and player one the minimizing
/// side. Positions at the depth cutoff are scored with
/// [`score_position`](crate::evaluation::score_position) from player two's point
/// of view. When several columns are equally good the choice between them is
/// random, so the agent does not always answer a position the same way.
#[derive(Clone)]
pub struct Solver {
    rng: StdRng,
    parallel: bool,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates a new `Solver` whose tie-breaks are reproducible
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            parallel: false,
            node_count: 0,
        }
    }

    /// Evaluates the root columns on the rayon thread pool
    pub fn with_parallel_search(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Performs the game tree search
    ///
    /// Returns the best column (`None` when no move is searched) and the value
    /// of the position for the maximizing player.
    pub fn minimax(&mut self, board: &Board, depth: u32, maximizing: bool) -> (Option<usize>, i64) {
        self.node_count += 1;

        if board.is_terminal() {
            return (None, terminal_value(board));
        }
        if depth == 0 {
            return (None, score_position(board, Piece::PlayerTwo));
        }

        let moves: Vec<(usize, usize)> = board.open_moves().collect();
        // a board that is not terminal always has an open column
        let seed = match moves.choose(&mut self.rng) {
            Some(&(column, _)) => column,
            None => return (None, 0),
        };

        let mover = if maximizing {
            Piece::PlayerTwo
        } else {
            Piece::PlayerOne
        };

        let values: Vec<(usize, i64)> = if self.parallel {
            self.parallel_values(board, &moves, mover, depth - 1, !maximizing)
        } else {
            moves
                .iter()
                .map(|&(column, row)| {
                    let mut next = *board;
                    next.place(row, column, mover);
                    (column, self.minimax(&next, depth - 1, !maximizing).1)
                })
                .collect()
        };

        let (column, value) = select_move(seed, &values, maximizing);
        (Some(column), value)
    }

    /// Searches each child position on its own thread
    ///
    /// Every branch gets a generator seeded from this one, so the choice of
    /// move is distributed exactly as in a sequential search.
    fn parallel_values(
        &mut self,
        board: &Board,
        moves: &[(usize, usize)],
        mover: Piece,
        depth: u32,
        maximizing: bool,
    ) -> Vec<(usize, i64)> {
        let seeds: Vec<u64> = moves.iter().map(|_| self.rng.gen()).collect();

        let results: Vec<(usize, i64, usize)> = moves
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(&(column, row), &seed)| {
                let mut next = *board;
                next.place(row, column, mover);

                let mut branch = Solver::seeded(seed);
                let (_, value) = branch.minimax(&next, depth, maximizing);
                (column, value, branch.node_count)
            })
            .collect();

        self.node_count += results.iter().map(|&(_, _, nodes)| nodes).sum::<usize>();
        results
            .into_iter()
            .map(|(column, value, _)| (column, value))
            .collect()
    }

    /// Chooses the computer's (player two's) move with a full-depth search
    ///
    /// Returns `None` for a finished game.
    pub fn choose_move(&mut self, board: &Board) -> Option<usize> {
        self._choose_move(board, true)
    }

    /// Chooses the computer's move, logging the search to stdout
    pub fn choose_move_verbose(&mut self, board: &Board) -> Option<usize> {
        self._choose_move(board, false)
    }

    /// Chooses a move for either player
    ///
    /// The search always maximizes for player two, so player one's moves are
    /// searched on the board with the tiles exchanged.
    pub fn choose_move_for(&mut self, board: &Board, piece: Piece) -> Option<usize> {
        self._choose_move_for(board, piece, true)
    }

    /// Chooses a move for either player, logging the search to stdout
    pub fn choose_move_for_verbose(&mut self, board: &Board, piece: Piece) -> Option<usize> {
        self._choose_move_for(board, piece, false)
    }

    fn _choose_move_for(&mut self, board: &Board, piece: Piece, silent: bool) -> Option<usize> {
        match piece {
            Piece::PlayerTwo => self._choose_move(board, silent),
            Piece::PlayerOne => self._choose_move(&board.swapped(), silent),
        }
    }

    fn _choose_move(&mut self, board: &Board, silent: bool) -> Option<usize> {
        let start_time = Instant::now();
        let start_nodes = self.node_count;

        let (best_move, value) = self.minimax(board, SEARCH_DEPTH, true);

        if !silent {
            println!(
                "Search depth: {}, positions: {}, value: {}, time: {:.3}ms",
                SEARCH_DEPTH,
                self.node_count - start_nodes,
                value,
                start_time.elapsed().as_secs_f64() * 1000.0
            );
        }
        best_move
    }

    /// Chooses the column whose resulting position scores best for `piece`,
    /// looking a single move ahead
    pub fn greedy_move(&mut self, board: &Board, piece: Piece) -> Option<usize> {
        let moves: Vec<(usize, usize)> = board.open_moves().collect();
        let &(seed, _) = moves.choose(&mut self.rng)?;

        let values: Vec<(usize, i64)> = moves
            .iter()
            .map(|&(column, row)| {
                let mut next = *board;
                next.place(row, column, piece);
                (column, score_position(&next, piece))
            })
            .collect();

        Some(select_move(seed, &values, true).0)
    }

    /// Chooses any open column uniformly at random
    pub fn random_move(&mut self, board: &Board) -> Option<usize> {
        let columns: Vec<usize> = board.open_columns().collect();
        columns.choose(&mut self.rng).copied()
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}
