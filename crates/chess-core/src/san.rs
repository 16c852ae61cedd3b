//! Standard Algebraic Notation (SAN) parsing and generation.
//!
//! SAN is the standard way to record chess moves in human-readable form.
//! Examples: "e4", "Nf3", "Bxc6", "O-O", "e8=Q", "Nbd2", "R1e1"

use cozy_chess::{File, Move, Piece, Rank, Square};

use crate::{Position, RulesError};

/// Converts a legal move to SAN.
///
/// The position must be the state BEFORE the move is made.
pub fn move_to_san(position: &Position, mv: Move) -> String {
    let mut san = String::new();

    if position.is_castling(mv) {
        if (mv.to.file() as usize) > (mv.from.file() as usize) {
            san.push_str("O-O");
        } else {
            san.push_str("O-O-O");
        }
        return add_check_suffix(position, mv, san);
    }

    let piece = match position.piece_at(mv.from) {
        Some((piece, _)) => piece,
        None => return position.to_uci(mv),
    };

    if piece != Piece::Pawn {
        san.push(piece_to_san_char(piece));
        san.push_str(&disambiguation(position, mv, piece));
    }

    // A pawn changing file without landing on a piece is en passant.
    let is_capture = position.color_on(mv.to).is_some()
        || (piece == Piece::Pawn && mv.from.file() != mv.to.file());
    if is_capture {
        if piece == Piece::Pawn {
            san.push(file_to_char(mv.from.file()));
        }
        san.push('x');
    }

    san.push_str(&mv.to.to_string());

    if let Some(promotion) = mv.promotion {
        san.push('=');
        san.push(piece_to_san_char(promotion));
    }

    add_check_suffix(position, mv, san)
}

/// Parses a SAN string and returns the corresponding legal move.
pub fn san_to_move(position: &Position, san: &str) -> Result<Move, RulesError> {
    let san = san.trim();
    if san.is_empty() {
        return Err(RulesError::InvalidMove("empty SAN string".to_string()));
    }

    // Annotations and check markers carry no information for matching.
    let stripped = san.trim_end_matches(['#', '+', '!', '?']);

    match stripped {
        "O-O" | "0-0" => return find_castling_move(position, true, san),
        "O-O-O" | "0-0-0" => return find_castling_move(position, false, san),
        _ => {}
    }

    let parsed = parse_san_components(stripped)?;
    find_matching_move(position, &parsed, san)
}

/// Parsed components of a SAN string.
#[derive(Debug)]
struct ParsedSan {
    piece: Piece,
    from_file: Option<File>,
    from_rank: Option<Rank>,
    to_square: Square,
    promotion: Option<Piece>,
}

fn parse_san_components(san: &str) -> Result<ParsedSan, RulesError> {
    let invalid = |what: &str| RulesError::InvalidMove(format!("{}: {}", what, san));

    let mut rest = san;
    let piece = match rest.chars().next() {
        Some(c) if c.is_ascii_uppercase() => {
            let piece = san_char_to_piece(c).ok_or_else(|| invalid("invalid piece character"))?;
            rest = &rest[1..];
            piece
        }
        Some(_) => Piece::Pawn,
        None => return Err(invalid("empty SAN string")),
    };

    let (rest, promotion) = match rest.split_once('=') {
        Some((head, promo)) => {
            let mut chars = promo.chars();
            let piece = match (chars.next(), chars.next()) {
                (Some(c), None) => san_char_to_piece(c),
                _ => None,
            };
            match piece {
                Some(p) if p != Piece::Pawn && p != Piece::King => (head, Some(p)),
                _ => return Err(invalid("invalid promotion")),
            }
        }
        None => (rest, None),
    };

    let chars: Vec<char> = rest.chars().filter(|&c| c != 'x' && c != ':').collect();
    if chars.len() < 2 {
        return Err(invalid("too short"));
    }

    let to_file = char_to_file(chars[chars.len() - 2]).ok_or_else(|| invalid("invalid file"))?;
    let to_rank = char_to_rank(chars[chars.len() - 1]).ok_or_else(|| invalid("invalid rank"))?;

    let (from_file, from_rank) = match &chars[..chars.len() - 2] {
        [] => (None, None),
        [c] => match (char_to_file(*c), char_to_rank(*c)) {
            (Some(f), _) => (Some(f), None),
            (None, Some(r)) => (None, Some(r)),
            _ => return Err(invalid("invalid disambiguation")),
        },
        [f, r] => (
            Some(char_to_file(*f).ok_or_else(|| invalid("invalid disambiguation file"))?),
            Some(char_to_rank(*r).ok_or_else(|| invalid("invalid disambiguation rank"))?),
        ),
        _ => return Err(invalid("disambiguation too long")),
    };

    Ok(ParsedSan {
        piece,
        from_file,
        from_rank,
        to_square: Square::new(to_file, to_rank),
        promotion,
    })
}

fn find_castling_move(position: &Position, kingside: bool, san: &str) -> Result<Move, RulesError> {
    position
        .legal_moves()
        .into_iter()
        .find(|&mv| {
            position.is_castling(mv)
                && ((mv.to.file() as usize) > (mv.from.file() as usize)) == kingside
        })
        .ok_or_else(|| RulesError::IllegalMove(san.to_string()))
}

fn find_matching_move(
    position: &Position,
    parsed: &ParsedSan,
    san: &str,
) -> Result<Move, RulesError> {
    let matching: Vec<Move> = position
        .legal_moves()
        .into_iter()
        .filter(|&mv| {
            !position.is_castling(mv)
                && mv.to == parsed.to_square
                && position.piece_at(mv.from).map(|(p, _)| p) == Some(parsed.piece)
                && parsed.from_file.map_or(true, |f| mv.from.file() == f)
                && parsed.from_rank.map_or(true, |r| mv.from.rank() == r)
                && mv.promotion == parsed.promotion
        })
        .collect();

    match matching.as_slice() {
        [] => Err(RulesError::IllegalMove(san.to_string())),
        [mv] => Ok(*mv),
        _ => Err(RulesError::AmbiguousMove(san.to_string())),
    }
}

fn disambiguation(position: &Position, mv: Move, piece: Piece) -> String {
    let rivals: Vec<Move> = position
        .legal_moves()
        .into_iter()
        .filter(|&other| {
            other.to == mv.to
                && other.from != mv.from
                && !position.is_castling(other)
                && position.piece_at(other.from).map(|(p, _)| p) == Some(piece)
        })
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    let same_file = rivals.iter().any(|o| o.from.file() == mv.from.file());
    let same_rank = rivals.iter().any(|o| o.from.rank() == mv.from.rank());

    if !same_file {
        file_to_char(mv.from.file()).to_string()
    } else if !same_rank {
        rank_to_char(mv.from.rank()).to_string()
    } else {
        mv.from.to_string()
    }
}

fn add_check_suffix(position: &Position, mv: Move, mut san: String) -> String {
    let mut after = position.clone();
    let child = after.make_move(mv);
    if child.in_check() {
        san.push(if child.has_legal_moves() { '+' } else { '#' });
    }
    san
}

fn piece_to_san_char(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

fn san_char_to_piece(c: char) -> Option<Piece> {
    match c {
        'P' => Some(Piece::Pawn),
        'N' => Some(Piece::Knight),
        'B' => Some(Piece::Bishop),
        'R' => Some(Piece::Rook),
        'Q' => Some(Piece::Queen),
        'K' => Some(Piece::King),
        _ => None,
    }
}

fn file_to_char(file: File) -> char {
    (b'a' + file as u8) as char
}

fn rank_to_char(rank: Rank) -> char {
    (b'1' + rank as u8) as char
}

fn char_to_file(c: char) -> Option<File> {
    match c {
        'a'..='h' => Some(File::index(c as usize - 'a' as usize)),
        _ => None,
    }
}

fn char_to_rank(c: char) -> Option<Rank> {
    match c {
        '1'..='8' => Some(Rank::index(c as usize - '1' as usize)),
        _ => None,
    }
}
