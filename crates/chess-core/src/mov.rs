//! Coordinate move notation.
//!
//! The rules library encodes castling as the king capturing its own rook
//! (`e1h1`). Outside this crate moves are written the conventional way, with
//! castling as the king's two-square step (`e1g1`).

use cozy_chess::{File, Move, Piece, Square};

use crate::{Position, RulesError};

/// Returns true if `text` has the shape of coordinate notation.
pub(crate) fn looks_like_uci(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return false;
    }
    let is_file = |b: u8| (b'a'..=b'h').contains(&b);
    let is_rank = |b: u8| (b'1'..=b'8').contains(&b);
    is_file(bytes[0])
        && is_rank(bytes[1])
        && is_file(bytes[2])
        && is_rank(bytes[3])
        && bytes
            .get(4)
            .map_or(true, |b| matches!(b.to_ascii_lowercase(), b'n' | b'b' | b'r' | b'q'))
}

/// Formats a legal move as coordinate notation.
pub(crate) fn to_uci(position: &Position, mv: Move) -> String {
    let to = if position.is_castling(mv) {
        let file = if (mv.to.file() as usize) > (mv.from.file() as usize) {
            File::G
        } else {
            File::C
        };
        Square::new(file, mv.from.rank())
    } else {
        mv.to
    };

    let mut out = format!("{}{}", mv.from, to);
    if let Some(piece) = mv.promotion {
        out.push(promotion_char(piece));
    }
    out
}

/// Resolves coordinate notation against the legal moves of `position`.
///
/// Castling is accepted both as the king's two-square step and in the rules
/// library's king-takes-rook form.
pub(crate) fn parse_uci(position: &Position, text: &str) -> Result<Move, RulesError> {
    if !looks_like_uci(text) {
        return Err(RulesError::InvalidMove(text.to_string()));
    }
    let wanted = text.to_ascii_lowercase();
    position
        .legal_moves()
        .into_iter()
        .find(|&mv| to_uci(position, mv) == wanted || mv.to_string() == wanted)
        .ok_or_else(|| RulesError::IllegalMove(text.to_string()))
}

fn promotion_char(piece: Piece) -> char {
    match piece {
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        _ => 'q',
    }
}
