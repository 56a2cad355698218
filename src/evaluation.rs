//! Static evaluation of non-terminal positions

use crate::board::{Board, Cell, Piece};
use crate::{CENTER_COLUMN, HEIGHT, WINDOW};

/// Bonus for each of the player's tiles in the centre column
pub const CENTER_BONUS: i64 = 3;
/// A complete line of the player's tiles
pub const FOUR_SCORE: i64 = 100;
/// Three of the player's tiles and an empty cell
pub const THREE_SCORE: i64 = 5;
/// Two of the player's tiles and two empty cells
pub const TWO_SCORE: i64 = 2;
/// Three of the opponent's tiles and an empty cell
pub const OPPONENT_THREE_PENALTY: i64 = -4;

/// Scores a single window of four cells for `piece`
///
/// The opponent penalty is checked independently of the player's own count.
pub fn score_window(window: &[Cell; WINDOW], piece: Piece) -> i64 {
    let own = Cell::from(piece);
    let opponent = Cell::from(piece.opponent());

    let count = |target: Cell| window.iter().filter(|&&cell| cell == target).count();
    let (own_count, opponent_count, empty_count) = (count(own), count(opponent), count(Cell::Empty));

    let mut score = match (own_count, empty_count) {
        (4, _) => FOUR_SCORE,
        (3, 1) => THREE_SCORE,
        (2, 2) => TWO_SCORE,
        _ => 0,
    };
    if opponent_count == 3 && empty_count == 1 {
        score += OPPONENT_THREE_PENALTY;
    }
    score
}

/// Heuristic value of a position from the point of view of `piece`
///
/// Higher is better for `piece`. The score is not antisymmetric: scoring the
/// same board for the opponent does not simply negate it.
pub fn score_position(board: &Board, piece: Piece) -> i64 {
    let own = Cell::from(piece);
    let center = (0..HEIGHT)
        .filter(|&row| board.cell(row, CENTER_COLUMN) == own)
        .count() as i64;

    CENTER_BONUS * center
        + board
            .windows()
            .map(|window| score_window(&window, piece))
            .sum::<i64>()
}
