//! Static position evaluation.
//!
//! Scores are integer centipawns from White's point of view: positive means
//! White is better. The evaluation is material plus a piece-square bonus,
//! with terminal positions handled first.

use chess_core::{GameStatus, Piece, Position, Side, Square};

/// Centipawn score, positive for White.
pub type Score = i32;

/// Magnitude of a checkmate score.
pub const MATE_SCORE: Score = 100_000;

/// Piece values in centipawns
pub const PAWN_VALUE: Score = 100;
pub const KNIGHT_VALUE: Score = 320;
pub const BISHOP_VALUE: Score = 330;
pub const ROOK_VALUE: Score = 500;
pub const QUEEN_VALUE: Score = 900;

// Piece-square tables, written from White's side of the board: the first
// row is rank 8, the last row is rank 1, files run a..h left to right.
// Black reads the same tables flipped vertically.

#[rustfmt::skip]
const PAWN_PST: [Score; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [Score; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_PST: [Score; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_PST: [Score; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_PST: [Score; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_PST: [Score; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

const PIECES: [Piece; 6] = [
    Piece::Pawn,
    Piece::Knight,
    Piece::Bishop,
    Piece::Rook,
    Piece::Queen,
    Piece::King,
];

/// Material value of a piece. The king has no material value.
pub const fn piece_value(piece: Piece) -> Score {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => KNIGHT_VALUE,
        Piece::Bishop => BISHOP_VALUE,
        Piece::Rook => ROOK_VALUE,
        Piece::Queen => QUEEN_VALUE,
        Piece::King => 0,
    }
}

fn piece_square_table(piece: Piece) -> &'static [Score; 64] {
    match piece {
        Piece::Pawn => &PAWN_PST,
        Piece::Knight => &KNIGHT_PST,
        Piece::Bishop => &BISHOP_PST,
        Piece::Rook => &ROOK_PST,
        Piece::Queen => &QUEEN_PST,
        Piece::King => &KING_PST,
    }
}

/// Index into a piece-square table for a piece of `side` on `square`.
fn table_index(square: Square, side: Side) -> usize {
    let file = square.file() as usize;
    let rank = square.rank() as usize;
    match side {
        Side::White => (7 - rank) * 8 + file,
        Side::Black => rank * 8 + file,
    }
}

/// Evaluates a position from White's point of view.
///
/// Checkmate scores [`MATE_SCORE`] against the side to move, any drawn
/// position scores exactly 0, and everything else gets
/// [`material_and_position`]. Deterministic and side-effect free.
pub fn evaluate(position: &Position) -> Score {
    match position.status() {
        GameStatus::Checkmate => -MATE_SCORE * position.side_to_move().sign(),
        GameStatus::Draw(_) => 0,
        GameStatus::Ongoing => material_and_position(position),
    }
}

/// Material plus piece-square bonus, White minus Black.
///
/// Ignores whether the position is terminal.
pub fn material_and_position(position: &Position) -> Score {
    let mut score = 0;
    for side in [Side::White, Side::Black] {
        for piece in PIECES {
            let table = piece_square_table(piece);
            for square in position.pieces(piece, side) {
                score += side.sign() * (piece_value(piece) + table[table_index(square, side)]);
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn eval_fen(fen: &str) -> Score {
        evaluate(&Position::from_fen(fen).unwrap())
    }

    #[test]
    fn startpos_is_balanced() {
        assert_eq!(evaluate(&Position::startpos()), 0);
    }

    #[test]
    fn table_orientation() {
        // A white pawn about to promote and a black pawn about to promote
        // both read the 50 row.
        assert_eq!(table_index(Square::A7, Side::White), 8);
        assert_eq!(table_index(Square::A2, Side::Black), 8);
        assert_eq!(table_index(Square::E1, Side::White), 60);
        assert_eq!(table_index(Square::E8, Side::Black), 60);
    }

    #[test]
    fn extra_queen_is_worth_about_nine_pawns() {
        // Black is missing the queen.
        let score = eval_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(score, QUEEN_VALUE + QUEEN_PST[59]);
    }

    #[test]
    fn white_advanced_pawn_bonus() {
        // Lone kings on their home squares plus one white pawn on e7.
        let score = eval_fen("8/4P2k/8/8/8/8/8/4K3 w - - 0 1");
        let kings = KING_PST[table_index(Square::E1, Side::White)]
            - KING_PST[table_index(Square::H7, Side::Black)];
        assert_eq!(score, PAWN_VALUE + 50 + kings);
    }

    #[test]
    fn checkmate_scores_against_side_to_move() {
        // Fool's mate: White to move and mated.
        assert_eq!(
            eval_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
            -MATE_SCORE
        );
        // Back-rank mate: Black to move and mated.
        assert_eq!(eval_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1"), MATE_SCORE);
    }

    #[test]
    fn draws_score_zero() {
        // Stalemate with White a queen up.
        assert_eq!(eval_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), 0);
        // Fifty-move rule with White a rook up.
        assert_eq!(eval_fen("8/8/4k3/8/8/3K4/8/6R1 w - - 100 80"), 0);
        // King and knight against king.
        assert_eq!(eval_fen("8/8/4k3/8/8/3K4/8/6N1 w - - 0 1"), 0);
    }

    #[test]
    fn mirror_symmetry_on_fixed_positions() {
        for fen in [
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "r3k2r/pp3ppp/2n5/3q4/8/2N5/PP3PPP/R3K2R w KQkq - 4 12",
            "8/P6k/8/8/8/8/6p1/K7 b - - 0 40",
        ] {
            let pos = Position::from_fen(fen).unwrap();
            let mirrored = pos.mirrored().unwrap();
            assert_eq!(evaluate(&pos), -evaluate(&mirrored), "{}", fen);
        }
    }

    proptest! {
        #[test]
        fn evaluation_is_color_symmetric(choices in prop::collection::vec(any::<u16>(), 0..40)) {
            let mut pos = Position::startpos();
            for choice in choices {
                let moves = pos.legal_moves();
                if moves.is_empty() {
                    break;
                }
                pos.play(moves[choice as usize % moves.len()]).unwrap();
            }
            let mirrored = pos.mirrored().unwrap();
            prop_assert_eq!(evaluate(&pos), -evaluate(&mirrored));
        }

        #[test]
        fn evaluation_is_deterministic(choices in prop::collection::vec(any::<u16>(), 0..20)) {
            let mut pos = Position::startpos();
            for choice in choices {
                let moves = pos.legal_moves();
                if moves.is_empty() {
                    break;
                }
                pos.play(moves[choice as usize % moves.len()]).unwrap();
            }
            let snapshot = pos.clone();
            prop_assert_eq!(evaluate(&pos), evaluate(&pos));
            prop_assert_eq!(pos, snapshot);
        }
    }
}
