//! Game review on top of the built-in search.
//!
//! This crate replays a finished game move by move, compares every move
//! with what the engine would have played, and grades it.
//!
//! # Overview
//!
//! - [`MoveClassification`] - quality tier of a move (Brilliant, Best, ... Blunder)
//! - [`ClassificationThresholds`] - tier boundaries in pawns
//! - [`GameAnalyzer`] - replays a game and builds a [`GameAnalysisReport`]
//! - [`SideSummary`] - per-side accuracy and tier counts
//!
//! # Example
//!
//! ```
//! use chess_analysis::{AnalysisConfig, GameAnalyzer, MoveClassification};
//!
//! let mut analyzer = GameAnalyzer::new(AnalysisConfig::with_depth(2));
//! let report = analyzer.analyze_game(&["e4", "d5", "Qg4", "Bxg4"]).unwrap();
//! assert_eq!(report.moves[2].classification, MoveClassification::Blunder);
//! assert!(report.white.accuracy < 70.0);
//! ```

pub mod analyzer;
pub mod quality;

pub use analyzer::{
    AnalysisConfig, AnalyzerError, GameAnalysisReport, GameAnalyzer, MoveRecord,
    DEFAULT_ANALYSIS_DEPTH,
};
pub use quality::{
    move_accuracy, ClassificationThresholds, MoveClassification, SideSummary, TierCounts,
};
