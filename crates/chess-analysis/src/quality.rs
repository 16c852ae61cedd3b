//! Move quality classification and per-side statistics.
//!
//! Deltas here are in pawns: `(eval_after - eval_before) / 100`, both
//! evaluations taken from the mover's point of view. A positive delta means
//! the mover's prospects improved.

use serde::Serialize;

/// Quality tier of a single move, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveClassification {
    Brilliant,
    Best,
    Great,
    Good,
    Inaccuracy,
    Mistake,
    Blunder,
}

impl MoveClassification {
    /// All tiers, best first.
    pub const ALL: [MoveClassification; 7] = [
        MoveClassification::Brilliant,
        MoveClassification::Best,
        MoveClassification::Great,
        MoveClassification::Good,
        MoveClassification::Inaccuracy,
        MoveClassification::Mistake,
        MoveClassification::Blunder,
    ];

    /// Classifies with the [`ClassificationThresholds::STANDARD`] table.
    pub fn classify(delta: f64, matched_engine: bool, delivers_mate: bool) -> Self {
        ClassificationThresholds::STANDARD.classify(delta, matched_engine, delivers_mate)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MoveClassification::Brilliant => "brilliant",
            MoveClassification::Best => "best",
            MoveClassification::Great => "great",
            MoveClassification::Good => "good",
            MoveClassification::Inaccuracy => "inaccuracy",
            MoveClassification::Mistake => "mistake",
            MoveClassification::Blunder => "blunder",
        }
    }
}

impl std::fmt::Display for MoveClassification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Boundaries between tiers, in pawns.
///
/// Upper tiers use `>=`, lower tiers use strict `>`, so a delta sitting
/// exactly on a lower boundary falls into the worse tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationThresholds {
    /// A move counts as an improvement at or above this delta, even when it
    /// is not the engine's choice.
    pub improvement: f64,
    /// Minimum delta for [`MoveClassification::Brilliant`].
    pub brilliant: f64,
    /// Minimum delta for [`MoveClassification::Best`].
    pub best: f64,
    /// Minimum delta for [`MoveClassification::Great`].
    pub great: f64,
    /// A non-engine move is still good above this delta.
    pub good: f64,
    /// Inaccuracy above this delta.
    pub inaccuracy: f64,
    /// Mistake above this delta; blunder at or below it.
    pub mistake: f64,
}

impl ClassificationThresholds {
    pub const STANDARD: ClassificationThresholds = ClassificationThresholds {
        improvement: 0.1,
        brilliant: 2.0,
        best: 0.5,
        great: 0.2,
        good: -0.3,
        inaccuracy: -0.7,
        mistake: -1.5,
    };

    /// Assigns a tier.
    ///
    /// Priority order:
    /// 1. a mating move is `Best`;
    /// 2. the engine's own move, or any move gaining at least
    ///    `improvement`, is graded on the upper scale;
    /// 3. anything else is graded on the lower scale.
    pub fn classify(
        &self,
        delta: f64,
        matched_engine: bool,
        delivers_mate: bool,
    ) -> MoveClassification {
        if delivers_mate {
            return MoveClassification::Best;
        }

        if matched_engine || delta >= self.improvement {
            return if delta >= self.brilliant {
                MoveClassification::Brilliant
            } else if delta >= self.best {
                MoveClassification::Best
            } else if delta >= self.great {
                MoveClassification::Great
            } else {
                MoveClassification::Good
            };
        }

        if delta > self.good {
            MoveClassification::Good
        } else if delta > self.inaccuracy {
            MoveClassification::Inaccuracy
        } else if delta > self.mistake {
            MoveClassification::Mistake
        } else {
            MoveClassification::Blunder
        }
    }
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Accuracy of one move: `100 + 20 * delta`, clamped to `0..=100`.
pub fn move_accuracy(delta: f64) -> f64 {
    (100.0 + delta * 20.0).clamp(0.0, 100.0)
}

/// Number of moves in each tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub brilliant: u32,
    pub best: u32,
    pub great: u32,
    pub good: u32,
    pub inaccuracy: u32,
    pub mistake: u32,
    pub blunder: u32,
}

impl TierCounts {
    pub fn record(&mut self, classification: MoveClassification) {
        *self.slot(classification) += 1;
    }

    pub fn get(&self, classification: MoveClassification) -> u32 {
        match classification {
            MoveClassification::Brilliant => self.brilliant,
            MoveClassification::Best => self.best,
            MoveClassification::Great => self.great,
            MoveClassification::Good => self.good,
            MoveClassification::Inaccuracy => self.inaccuracy,
            MoveClassification::Mistake => self.mistake,
            MoveClassification::Blunder => self.blunder,
        }
    }

    pub fn total(&self) -> u32 {
        MoveClassification::ALL.iter().map(|&c| self.get(c)).sum()
    }

    fn slot(&mut self, classification: MoveClassification) -> &mut u32 {
        match classification {
            MoveClassification::Brilliant => &mut self.brilliant,
            MoveClassification::Best => &mut self.best,
            MoveClassification::Great => &mut self.great,
            MoveClassification::Good => &mut self.good,
            MoveClassification::Inaccuracy => &mut self.inaccuracy,
            MoveClassification::Mistake => &mut self.mistake,
            MoveClassification::Blunder => &mut self.blunder,
        }
    }
}

/// Aggregate statistics for one side of a game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SideSummary {
    /// Moves played by this side.
    pub moves: u32,
    /// Mean per-move accuracy, 0 to 100. 100 when the side made no moves.
    pub accuracy: f64,
    /// Mean delta in pawns. 0 when the side made no moves.
    pub average_delta: f64,
    /// Tier counts.
    pub tiers: TierCounts,
}

impl Default for SideSummary {
    fn default() -> Self {
        Self {
            moves: 0,
            accuracy: 100.0,
            average_delta: 0.0,
            tiers: TierCounts::default(),
        }
    }
}

impl SideSummary {
    /// Builds a summary from `(delta, classification)` pairs.
    pub fn from_moves<I>(moves: I) -> Self
    where
        I: IntoIterator<Item = (f64, MoveClassification)>,
    {
        let mut summary = Self::default();
        let mut accuracy_sum = 0.0;
        let mut delta_sum = 0.0;

        for (delta, classification) in moves {
            summary.moves += 1;
            summary.tiers.record(classification);
            accuracy_sum += move_accuracy(delta);
            delta_sum += delta;
        }

        if summary.moves > 0 {
            let n = f64::from(summary.moves);
            summary.accuracy = (accuracy_sum / n).clamp(0.0, 100.0);
            summary.average_delta = delta_sum / n;
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use MoveClassification::*;

    fn classify(delta: f64, matched: bool) -> MoveClassification {
        MoveClassification::classify(delta, matched, false)
    }

    #[test]
    fn mate_is_always_best() {
        for delta in [-10.0, -1.5, 0.0, 0.5, 2.0, 1000.0] {
            assert_eq!(MoveClassification::classify(delta, true, true), Best);
            assert_eq!(MoveClassification::classify(delta, false, true), Best);
        }
    }

    #[test]
    fn upper_boundaries() {
        assert_eq!(classify(2.0, false), Brilliant);
        assert_eq!(classify(1.99, false), Best);
        assert_eq!(classify(0.5, false), Best);
        assert_eq!(classify(0.49, false), Great);
        assert_eq!(classify(0.2, false), Great);
        assert_eq!(classify(0.19, false), Good);
        assert_eq!(classify(0.1, false), Good);
    }

    #[test]
    fn lower_boundaries() {
        assert_eq!(classify(0.09, false), Good);
        assert_eq!(classify(-0.29, false), Good);
        assert_eq!(classify(-0.3, false), Inaccuracy);
        assert_eq!(classify(-0.69, false), Inaccuracy);
        assert_eq!(classify(-0.7, false), Mistake);
        assert_eq!(classify(-1.49, false), Mistake);
        assert_eq!(classify(-1.5, false), Blunder);
        assert_eq!(classify(-9.0, false), Blunder);
    }

    #[test]
    fn engine_move_uses_upper_scale_regardless_of_delta() {
        assert_eq!(classify(-5.0, true), Good);
        assert_eq!(classify(-0.3, true), Good);
        assert_eq!(classify(0.2, true), Great);
        assert_eq!(classify(0.5, true), Best);
        assert_eq!(classify(2.0, true), Brilliant);
    }

    #[test]
    fn boundaries_from_centipawn_division() {
        // Deltas are produced as centipawns / 100 and must land on the
        // same side of each boundary as the literal.
        assert_eq!(classify(10.0 / 100.0, false), Good);
        assert_eq!(classify(-30.0 / 100.0, false), Inaccuracy);
        assert_eq!(classify(-70.0 / 100.0, false), Mistake);
        assert_eq!(classify(-150.0 / 100.0, false), Blunder);
        assert_eq!(classify(20.0 / 100.0, false), Great);
        assert_eq!(classify(50.0 / 100.0, false), Best);
        assert_eq!(classify(200.0 / 100.0, false), Brilliant);
    }

    #[test]
    fn accuracy_transform() {
        assert_eq!(move_accuracy(0.0), 100.0);
        assert_eq!(move_accuracy(1.0), 100.0);
        assert_eq!(move_accuracy(-1.0), 80.0);
        assert_eq!(move_accuracy(-2.5), 50.0);
        assert_eq!(move_accuracy(-5.0), 0.0);
        assert_eq!(move_accuracy(-1000.0), 0.0);
    }

    #[test]
    fn empty_side_is_fully_accurate() {
        let summary = SideSummary::from_moves(std::iter::empty());
        assert_eq!(summary.moves, 0);
        assert_eq!(summary.accuracy, 100.0);
        assert_eq!(summary.tiers.total(), 0);
    }

    #[test]
    fn summary_averages_and_counts() {
        let summary =
            SideSummary::from_moves([(0.0, Good), (-1.0, Mistake), (-9.0, Blunder), (0.6, Best)]);
        assert_eq!(summary.moves, 4);
        assert_eq!(summary.accuracy, (100.0 + 80.0 + 0.0 + 100.0) / 4.0);
        assert_eq!(summary.tiers.good, 1);
        assert_eq!(summary.tiers.mistake, 1);
        assert_eq!(summary.tiers.blunder, 1);
        assert_eq!(summary.tiers.best, 1);
        assert_eq!(summary.tiers.total(), 4);
    }

    #[test]
    fn tier_names_serialize_lowercase() {
        for tier in MoveClassification::ALL {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier));
        }
    }

    proptest! {
        #[test]
        fn accuracy_is_bounded(deltas in prop::collection::vec(-1.0e6f64..1.0e6, 0..64)) {
            let summary = SideSummary::from_moves(
                deltas.iter().map(|&d| (d, MoveClassification::classify(d, false, false))),
            );
            prop_assert!((0.0..=100.0).contains(&summary.accuracy));
            for d in deltas {
                prop_assert!((0.0..=100.0).contains(&move_accuracy(d)));
            }
        }

        #[test]
        fn classification_is_monotone_off_engine(a in -20.0f64..20.0, b in -20.0f64..20.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let rank = |c: MoveClassification| MoveClassification::ALL.iter().position(|&x| x == c);
            prop_assert!(rank(classify(hi, false)) <= rank(classify(lo, false)));
        }
    }
}
