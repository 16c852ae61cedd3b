//! Fixed-depth minimax search with alpha-beta pruning.
//!
//! White maximizes and Black minimizes the White-relative score from
//! [`evaluate`]. The search walks a single [`Position`], applying each move
//! through a [`MoveGuard`](chess_core::MoveGuard) so the position is restored
//! whenever a subtree is left, including on a pruning cutoff.
//!
//! Ties are broken by move order: among moves with the same score, the one
//! that comes first in [`Position::legal_moves`] wins.
//!
//! There is no transposition table and no move ordering. Cost grows roughly
//! as `branching_factor ^ depth`, so keep `depth` at 4 or below.

use chess_core::{Move, Position, Side};
use tracing::debug;

use crate::eval::{evaluate, Score, MATE_SCORE};

/// Bound wider than any reachable score.
const INFINITY: Score = MATE_SCORE * 2;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move.
    pub best_move: Move,
    /// Score of `best_move` from the side to move's point of view.
    pub score: Score,
    /// Depth searched, in plies.
    pub depth: u8,
    /// Nodes visited.
    pub nodes: u64,
}

/// Search state.
#[derive(Debug, Default)]
pub struct Searcher {
    nodes: u64,
}

impl Searcher {
    /// Creates a searcher with a zeroed node counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Nodes visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `position` to exactly `depth` plies.
    ///
    /// A depth of 0 is treated as 1. Returns `None` only when the side to
    /// move has no legal moves. `position` is left as it was passed in.
    pub fn search(&mut self, position: &mut Position, depth: u8) -> Option<SearchResult> {
        self.search_root(position, depth, None::<fn() -> Score>)
    }

    /// Like [`Searcher::search`], but adds `noise()` to each root move's
    /// score before the moves are compared.
    ///
    /// Root moves are searched with a full window so that every candidate
    /// gets an exact score to perturb. The reported score is the unperturbed
    /// score of the chosen move.
    pub fn search_perturbed<F>(
        &mut self,
        position: &mut Position,
        depth: u8,
        noise: F,
    ) -> Option<SearchResult>
    where
        F: FnMut() -> Score,
    {
        self.search_root(position, depth, Some(noise))
    }

    fn search_root<F>(
        &mut self,
        position: &mut Position,
        depth: u8,
        mut noise: Option<F>,
    ) -> Option<SearchResult>
    where
        F: FnMut() -> Score,
    {
        self.nodes = 1;
        let depth = depth.max(1);
        let side = position.side_to_move();
        let moves = position.legal_moves();

        // (move, compared score, raw score), scores from the mover's view.
        let mut best: Option<(Move, Score, Score)> = None;

        for mv in moves {
            let (alpha, beta) = match (&noise, best) {
                (None, Some((_, _, raw))) => match side {
                    Side::White => (raw, INFINITY),
                    Side::Black => (-INFINITY, -raw),
                },
                _ => (-INFINITY, INFINITY),
            };

            let white_score = {
                let mut child = position.make_move(mv);
                self.minimax(&mut child, depth - 1, 1, alpha, beta)
            };
            let raw = white_score * side.sign();
            let compared = match noise.as_mut() {
                Some(noise) => raw + noise(),
                None => raw,
            };

            if best.map_or(true, |(_, best_compared, _)| compared > best_compared) {
                best = Some((mv, compared, raw));
            }
        }

        let (best_move, _, score) = best?;
        debug!(
            depth,
            nodes = self.nodes,
            score,
            best_move = %position.to_uci(best_move),
            "search finished"
        );
        Some(SearchResult {
            best_move,
            score,
            depth,
            nodes: self.nodes,
        })
    }

    /// Returns the White-relative minimax value of `position`.
    fn minimax(
        &mut self,
        position: &mut Position,
        depth: u8,
        ply: u8,
        mut alpha: Score,
        mut beta: Score,
    ) -> Score {
        self.nodes += 1;

        if depth == 0 {
            return leaf_score(position, ply);
        }
        let moves = position.legal_moves();
        if moves.is_empty() || position.is_draw_by_rule() {
            return leaf_score(position, ply);
        }

        let maximizing = position.side_to_move() == Side::White;
        let mut best = if maximizing { -INFINITY } else { INFINITY };

        for mv in moves {
            let score = {
                let mut child = position.make_move(mv);
                self.minimax(&mut child, depth - 1, ply + 1, alpha, beta)
            };

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(best);
            } else {
                best = best.min(score);
                beta = beta.min(best);
            }
            if beta <= alpha {
                break;
            }
        }

        best
    }
}

/// Searches `position` to `depth` plies with a fresh [`Searcher`].
pub fn search(position: &mut Position, depth: u8) -> Option<SearchResult> {
    Searcher::new().search(position, depth)
}

/// Evaluator score at a leaf, with mate scores pulled toward zero by the
/// number of plies from the root so that shorter mates rank higher.
pub(crate) fn leaf_score(position: &Position, ply: u8) -> Score {
    let score = evaluate(position);
    let ply = Score::from(ply);
    if score >= MATE_SCORE {
        score - ply
    } else if score <= -MATE_SCORE {
        score + ply
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain minimax without pruning, for checking the pruned search.
    fn brute_force(position: &mut Position, depth: u8, ply: u8) -> Score {
        if depth == 0 {
            return leaf_score(position, ply);
        }
        let moves = position.legal_moves();
        if moves.is_empty() || position.is_draw_by_rule() {
            return leaf_score(position, ply);
        }
        let maximizing = position.side_to_move() == Side::White;
        let scores = moves.into_iter().map(|mv| {
            let mut child = position.make_move(mv);
            brute_force(&mut child, depth - 1, ply + 1)
        });
        let scores: Vec<Score> = scores.collect();
        if maximizing {
            scores.into_iter().max().unwrap()
        } else {
            scores.into_iter().min().unwrap()
        }
    }

    fn brute_force_root(position: &mut Position, depth: u8) -> (Move, Score) {
        let side = position.side_to_move();
        let mut best: Option<(Move, Score)> = None;
        for mv in position.legal_moves() {
            let score = {
                let mut child = position.make_move(mv);
                brute_force(&mut child, depth - 1, 1) * side.sign()
            };
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((mv, score));
            }
        }
        best.unwrap()
    }

    const POSITIONS: [&str; 5] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        "4k3/8/8/8/3q4/8/PP5P/3RK3 b - - 0 1",
        "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1",
    ];

    #[test]
    fn pruning_matches_brute_force() {
        for fen in POSITIONS {
            for depth in 1..=3 {
                let mut pos = Position::from_fen(fen).unwrap();
                let expected = brute_force_root(&mut pos, depth);
                let result = search(&mut pos, depth).unwrap();
                assert_eq!(
                    (result.best_move, result.score),
                    expected,
                    "{} at depth {}",
                    fen,
                    depth
                );
            }
        }
    }

    #[test]
    fn position_is_restored_after_search() {
        for fen in POSITIONS {
            let mut pos = Position::from_fen(fen).unwrap();
            let before = pos.clone();
            search(&mut pos, 3);
            assert_eq!(pos, before);
        }
    }

    #[test]
    fn startpos_returns_legal_move() {
        let mut pos = Position::startpos();
        let result = search(&mut pos, 3).unwrap();
        assert!(pos.legal_moves().contains(&result.best_move));
        assert_eq!(result.depth, 3);
        assert!(result.nodes > 20);
    }

    #[test]
    fn finds_mate_in_one_at_every_depth() {
        let fen = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";
        for depth in 1..=3 {
            let mut pos = Position::from_fen(fen).unwrap();
            let result = search(&mut pos, depth).unwrap();
            assert_eq!(pos.to_uci(result.best_move), "a1a8", "depth {}", depth);
            assert_eq!(result.score, MATE_SCORE - 1);

            let mut after = pos.clone();
            after.play(result.best_move).unwrap();
            assert_eq!(evaluate(&after), MATE_SCORE);
        }
    }

    #[test]
    fn black_to_move_finds_mate_too() {
        let fen = "r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1";
        let mut pos = Position::from_fen(fen).unwrap();
        let result = search(&mut pos, 2).unwrap();
        assert_eq!(pos.to_uci(result.best_move), "a8a1");
        assert_eq!(result.score, MATE_SCORE - 1);
    }

    #[test]
    fn takes_hanging_queen() {
        let mut pos = Position::from_fen("4k3/8/8/8/3q4/8/PP5P/3RK3 w - - 0 1").unwrap();
        let result = search(&mut pos, 1).unwrap();
        assert_eq!(pos.to_uci(result.best_move), "d1d4");
        assert!(result.score > 0);
    }

    #[test]
    fn terminal_position_has_no_move() {
        let mut mated = Position::from_fen(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert!(search(&mut mated, 2).is_none());

        let mut stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(search(&mut stalemate, 2).is_none());
    }

    #[test]
    fn ties_go_to_first_move() {
        // Bare kings: every move evaluates to a draw.
        let mut pos = Position::from_fen("8/8/4k3/8/8/3K4/8/8 w - - 0 1").unwrap();
        let first = pos.legal_moves()[0];
        let result = search(&mut pos, 2).unwrap();
        assert_eq!(result.best_move, first);
        assert_eq!(result.score, 0);
    }

    #[test]
    fn zero_depth_searches_one_ply() {
        let mut pos = Position::startpos();
        let result = search(&mut pos, 0).unwrap();
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn constant_noise_does_not_change_choice() {
        let mut pos = Position::from_fen(POSITIONS[1]).unwrap();
        let plain = search(&mut pos, 2).unwrap();
        let perturbed = Searcher::new()
            .search_perturbed(&mut pos, 2, || 17)
            .unwrap();
        assert_eq!(plain.best_move, perturbed.best_move);
        assert_eq!(plain.score, perturbed.score);
    }

    #[test]
    fn noise_can_override_small_differences() {
        // The first root move gets a large bonus, every other move none.
        let mut pos = Position::startpos();
        let first = pos.legal_moves()[0];
        let mut calls = 0;
        let result = Searcher::new()
            .search_perturbed(&mut pos, 1, || {
                calls += 1;
                if calls == 1 {
                    1_000
                } else {
                    0
                }
            })
            .unwrap();
        assert_eq!(result.best_move, first);
        assert_eq!(calls, 20);
    }
}
