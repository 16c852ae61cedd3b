//! Game analysis with move quality classification.
//!
//! This module provides the [`GameAnalyzer`] for replaying complete chess
//! games and grading each move.

use chess_core::{Position, RulesError, Side};
use chess_engine::{evaluate, Score, Searcher};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::quality::{ClassificationThresholds, MoveClassification, SideSummary};

/// Default search depth for analysis, in plies.
pub const DEFAULT_ANALYSIS_DEPTH: u8 = 2;

/// Errors that can occur during game analysis.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A move in the history cannot be played in the position reached so far.
    #[error("move {index} ('{notation}') cannot be played: {source}")]
    IllegalMove {
        /// 0-based index of the offending move.
        index: usize,
        /// The move as it was supplied.
        notation: String,
        #[source]
        source: RulesError,
    },
    /// The game was already over before the move at `index`.
    #[error("move {index}: the game is already over")]
    GameOver { index: usize },
}

/// Configuration for game analysis.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Search depth for each position, independent of any skill setting.
    pub depth: u8,
    /// Tier boundaries.
    pub thresholds: ClassificationThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_ANALYSIS_DEPTH,
            thresholds: ClassificationThresholds::STANDARD,
        }
    }
}

impl AnalysisConfig {
    /// Default configuration at a specific depth.
    pub fn with_depth(depth: u8) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }
}

/// Analysis result for a single move.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveRecord {
    /// 0-based position of the move in the game.
    pub index: usize,
    /// Fullmove number the move was played at.
    pub move_number: u16,
    /// The side that played it.
    pub side: Side,
    /// The move that was played, in coordinate notation.
    pub played_move: String,
    /// The move that was played, in SAN.
    pub played_san: String,
    /// The engine's choice in the same position, in coordinate notation.
    pub recommended_move: String,
    /// The engine's choice, in SAN.
    pub recommended_san: String,
    /// Centipawn evaluation before the move, from the mover's view.
    pub eval_before: Score,
    /// Centipawn evaluation after the move, from the mover's view.
    pub eval_after: Score,
    /// `(eval_after - eval_before) / 100`, in pawns.
    pub delta: f64,
    /// Whether the move checkmates.
    pub is_checkmate: bool,
    /// Quality tier.
    pub classification: MoveClassification,
}

/// Complete analysis of a chess game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameAnalysisReport {
    /// FEN of the position the game started from.
    pub start_fen: String,
    /// Search depth used.
    pub depth: u8,
    /// One record per move, in game order.
    pub moves: Vec<MoveRecord>,
    /// Statistics for White.
    pub white: SideSummary,
    /// Statistics for Black.
    pub black: SideSummary,
}

impl GameAnalysisReport {
    /// Statistics for `side`.
    pub fn summary(&self, side: Side) -> &SideSummary {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }
}

/// Replays games and grades every move against the built-in search.
#[derive(Debug, Default)]
pub struct GameAnalyzer {
    config: AnalysisConfig,
    searcher: Searcher,
}

impl GameAnalyzer {
    /// Creates a new game analyzer with the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            searcher: Searcher::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes a game from the standard starting position.
    pub fn analyze_game<S: AsRef<str>>(
        &mut self,
        moves: &[S],
    ) -> Result<GameAnalysisReport, AnalyzerError> {
        self.analyze(&Position::startpos(), moves)
    }

    /// Analyzes a game from `start`.
    ///
    /// Moves may be given in coordinate notation or SAN. For each move:
    /// 1. search the position before it (`eval_before`, recommended move),
    ///    stopping with [`AnalyzerError::GameOver`] if the game has ended by
    ///    mate, stalemate or a draw rule;
    /// 2. play it, stopping with [`AnalyzerError::IllegalMove`] if it is
    ///    not legal there;
    /// 3. search the position after it and turn the score back to the
    ///    mover's view (`eval_after`), or score it directly if the move
    ///    ended the game;
    /// 4. classify `eval_after - eval_before`.
    ///
    /// # Errors
    ///
    /// Fails on the first move that cannot be resolved or played; no partial
    /// report is produced.
    pub fn analyze<S: AsRef<str>>(
        &mut self,
        start: &Position,
        moves: &[S],
    ) -> Result<GameAnalysisReport, AnalyzerError> {
        let depth = self.config.depth.max(1);
        let mut position = start.clone();
        let mut records: Vec<MoveRecord> = Vec::with_capacity(moves.len());

        for (index, notation) in moves.iter().enumerate() {
            let notation = notation.as_ref();
            let mover = position.side_to_move();

            if position.status().is_terminal() {
                return Err(AnalyzerError::GameOver { index });
            }
            let move_number = position.fullmove_number();

            // The search reports from the side to move, which is the mover.
            let before = self
                .searcher
                .search(&mut position, depth)
                .ok_or(AnalyzerError::GameOver { index })?;

            let played =
                position
                    .parse_move(notation)
                    .map_err(|source| AnalyzerError::IllegalMove {
                        index,
                        notation: notation.to_string(),
                        source,
                    })?;

            let played_move = position.to_uci(played);
            let played_san = position.to_san(played);
            let recommended_move = position.to_uci(before.best_move);
            let recommended_san = position.to_san(before.best_move);

            position
                .play(played)
                .map_err(|source| AnalyzerError::IllegalMove {
                    index,
                    notation: notation.to_string(),
                    source,
                })?;

            // A finished game is scored as it stands; otherwise the opponent
            // is to move, so flip the search score back.
            let eval_after = if position.status().is_terminal() {
                evaluate(&position) * mover.sign()
            } else {
                match self.searcher.search(&mut position, depth) {
                    Some(after) => -after.score,
                    None => evaluate(&position) * mover.sign(),
                }
            };
            let eval_before = before.score;
            let delta = f64::from(eval_after - eval_before) / 100.0;
            let is_checkmate = position.is_checkmate();
            let classification = self.config.thresholds.classify(
                delta,
                played == before.best_move,
                is_checkmate,
            );

            debug!(
                index,
                side = %mover,
                played = %played_san,
                recommended = %recommended_san,
                eval_before,
                eval_after,
                delta,
                %classification,
                "move analyzed"
            );

            records.push(MoveRecord {
                index,
                move_number,
                side: mover,
                played_move,
                played_san,
                recommended_move,
                recommended_san,
                eval_before,
                eval_after,
                delta,
                is_checkmate,
                classification,
            });
        }

        let summarize = |side: Side| {
            SideSummary::from_moves(
                records
                    .iter()
                    .filter(|r| r.side == side)
                    .map(|r| (r.delta, r.classification)),
            )
        };
        let white = summarize(Side::White);
        let black = summarize(Side::Black);

        info!(
            moves = records.len(),
            depth,
            white_accuracy = white.accuracy,
            black_accuracy = black.accuracy,
            "game analysis complete"
        );

        Ok(GameAnalysisReport {
            start_fen: start.to_fen(),
            depth,
            moves: records,
            white,
            black,
        })
    }
}
