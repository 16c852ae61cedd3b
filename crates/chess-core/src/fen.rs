//! FEN helpers that the rules library does not provide.

use crate::RulesError;

/// The standard starting position FEN.
pub const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Returns the FEN of the color-mirrored position.
///
/// Ranks are flipped top to bottom, piece colors are swapped, and the side
/// to move, castling rights and en passant target follow. Move counters are
/// kept as they are.
pub fn mirror_fen(fen: &str) -> Result<String, RulesError> {
    let invalid = |reason: &str| RulesError::InvalidFen {
        fen: fen.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(invalid("expected at least 4 fields"));
    }

    let ranks: Vec<&str> = parts[0].split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("expected 8 ranks"));
    }
    let placement = ranks
        .iter()
        .rev()
        .map(|rank| rank.chars().map(swap_case).collect::<String>())
        .collect::<Vec<_>>()
        .join("/");

    let side = match parts[1] {
        "w" => "b",
        "b" => "w",
        _ => return Err(invalid("active color must be 'w' or 'b'")),
    };

    let castling = if parts[2] == "-" {
        "-".to_string()
    } else {
        let swapped: Vec<char> = parts[2].chars().map(swap_case).collect();
        swapped
            .iter()
            .filter(|c| c.is_ascii_uppercase())
            .chain(swapped.iter().filter(|c| c.is_ascii_lowercase()))
            .collect()
    };

    let en_passant = match parts[3] {
        "-" => "-".to_string(),
        square => {
            let mut chars = square.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(file), Some(rank @ '1'..='8'), None) => {
                    let mirrored = (b'1' + b'8' - rank as u8) as char;
                    format!("{}{}", file, mirrored)
                }
                _ => return Err(invalid("malformed en passant square")),
            }
        }
    };

    let mut fields = vec![placement, side.to_string(), castling, en_passant];
    fields.extend(parts[4..].iter().map(|s| s.to_string()));
    Ok(fields.join(" "))
}

fn swap_case(c: char) -> char {
    if c.is_ascii_uppercase() {
        c.to_ascii_lowercase()
    } else {
        c.to_ascii_uppercase()
    }
}
