//! Strength scaling for the artificial opponent.
//!
//! A [`SkillLevel`] from 1 to 10 controls three things:
//! - at level 2 and below, a 70% chance of playing a uniformly random move;
//! - at level 5 and below, a further 30% chance of a random move;
//! - otherwise a search at `level / 4` plies (at least 1, at most the
//!   configured maximum) with uniform noise of `±(10 - level) * 25`
//!   centipawns added to each root move before comparison.
//!
//! Whatever path is taken, the returned move is one of the position's
//! legal moves. The random source is injected, so a seeded generator gives
//! reproducible play.

use chess_core::{Move, Position};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::eval::Score;
use crate::search::Searcher;

/// Highest level that gets the strong random fallback.
pub const WILD_LEVEL: u8 = 2;
/// Probability of a random move at or below [`WILD_LEVEL`].
pub const WILD_RANDOM_CHANCE: f64 = 0.7;
/// Highest level that gets the weak random fallback.
pub const CASUAL_LEVEL: u8 = 5;
/// Probability of a random move at or below [`CASUAL_LEVEL`].
pub const CASUAL_RANDOM_CHANCE: f64 = 0.3;
/// Noise width per level below the maximum, in centipawns.
pub const NOISE_PER_LEVEL: Score = 50;

/// Requested playing strength, always within `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MIN: SkillLevel = SkillLevel(1);
    pub const MAX: SkillLevel = SkillLevel(10);

    /// Creates a skill level, clamping out-of-range values into `1..=10`.
    pub fn new(level: i64) -> Self {
        Self(level.clamp(1, 10) as u8)
    }

    /// Returns the level as a number in `1..=10`.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Search depth used at this level: `level / 4`, clamped to
    /// `1..=max_depth`.
    pub fn effective_depth(self, max_depth: u8) -> u8 {
        (self.0 / 4).clamp(1, max_depth.max(1))
    }

    /// Half of the root noise range, `(10 - level) * 25`.
    pub fn noise_half_width(self) -> Score {
        let random_factor = (Score::from(Self::MAX.0) - Score::from(self.0)) * NOISE_PER_LEVEL;
        random_factor.max(0) / 2
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::MAX
    }
}

impl From<i64> for SkillLevel {
    fn from(level: i64) -> Self {
        Self::new(level)
    }
}

/// How a move was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    /// Uniformly random legal move.
    Random,
    /// Search result at `depth` plies; `score` is from the mover's view.
    Search { depth: u8, score: Score },
}

/// A move picked by the [`SkillModulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillMove {
    pub mv: Move,
    pub source: MoveSource,
}

/// Chooses moves at a requested strength.
///
/// Owns its random source; nothing here touches a global generator.
#[derive(Debug)]
pub struct SkillModulator<R = StdRng> {
    rng: R,
    max_depth: u8,
    searcher: Searcher,
}

impl SkillModulator<StdRng> {
    /// A modulator with a reproducible generator.
    pub fn seeded(seed: u64, max_depth: u8) -> Self {
        Self::new(StdRng::seed_from_u64(seed), max_depth)
    }

    /// A modulator seeded from operating system entropy.
    pub fn from_entropy(max_depth: u8) -> Self {
        Self::new(StdRng::from_entropy(), max_depth)
    }
}

impl<R: Rng> SkillModulator<R> {
    pub fn new(rng: R, max_depth: u8) -> Self {
        Self {
            rng,
            max_depth: max_depth.max(1),
            searcher: Searcher::new(),
        }
    }

    /// Upper bound on the search depth.
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    /// Picks a legal move for the side to move at `skill`.
    ///
    /// Returns `None` only when the position has no legal moves. `position`
    /// is left unchanged.
    pub fn choose_move(&mut self, position: &mut Position, skill: SkillLevel) -> Option<SkillMove> {
        let moves = position.legal_moves();
        if moves.is_empty() {
            return None;
        }

        let level = skill.get();
        let wild = level <= WILD_LEVEL && self.rng.gen_bool(WILD_RANDOM_CHANCE);
        if wild || (level <= CASUAL_LEVEL && self.rng.gen_bool(CASUAL_RANDOM_CHANCE)) {
            let mv = *moves.choose(&mut self.rng)?;
            trace!(level, mv = %position.to_uci(mv), "random move");
            return Some(SkillMove {
                mv,
                source: MoveSource::Random,
            });
        }

        let depth = skill.effective_depth(self.max_depth);
        let half = skill.noise_half_width();
        let result = if half > 0 {
            let rng = &mut self.rng;
            self.searcher
                .search_perturbed(position, depth, || rng.gen_range(-half..=half))?
        } else {
            self.searcher.search(position, depth)?
        };

        trace!(
            level,
            depth,
            score = result.score,
            mv = %position.to_uci(result.best_move),
            "searched move"
        );
        Some(SkillMove {
            mv: result.best_move,
            source: MoveSource::Search {
                depth,
                score: result.score,
            },
        })
    }
}
