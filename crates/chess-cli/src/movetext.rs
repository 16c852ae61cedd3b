//! Move list extraction from PGN-style movetext.

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// Splits movetext into move tokens.
///
/// Tag pair lines (`[Event "..."]`), `{...}` and `;` comments, `(...)`
/// variations, NAGs (`$1`), move numbers (`1.`, `12...`, also when glued to
/// the move as in `1.e4`) and game results are dropped. What remains is
/// handed to the analyzer unchanged.
pub fn extract_moves(text: &str) -> Vec<String> {
    strip_commentary(text)
        .split_whitespace()
        .filter(|token| !token.starts_with('$') && !RESULT_TOKENS.contains(token))
        .map(strip_move_number)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Removes tag lines, comments and variations, keeping the main line.
fn strip_commentary(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_brace = false;
    let mut variation_depth = 0usize;

    for line in text.lines() {
        if !in_brace && variation_depth == 0 && line.trim_start().starts_with('[') {
            continue;
        }
        for c in line.chars() {
            if in_brace {
                in_brace = c != '}';
                continue;
            }
            match c {
                '{' => in_brace = true,
                // Rest-of-line comment.
                ';' => break,
                '(' => variation_depth += 1,
                ')' => variation_depth = variation_depth.saturating_sub(1),
                _ if variation_depth > 0 => continue,
                _ => {
                    out.push(c);
                    continue;
                }
            }
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

fn strip_move_number(token: &str) -> &str {
    let digits = token.len() - token.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return token;
    }
    let rest = &token[digits..];
    if rest.starts_with('.') {
        rest.trim_start_matches('.')
    } else {
        token
    }
}
