//! Move selection for the artificial opponent.
//!
//! This crate provides:
//! - [`evaluate`] - static evaluation (material + piece-square tables)
//! - [`Searcher`] / [`search`] - fixed-depth minimax with alpha-beta pruning
//! - [`SkillModulator`] - weaker play through random moves, shallow search
//!   and root noise, driven by a [`SkillLevel`]
//!
//! Every call works on a caller-owned [`Position`](chess_core::Position);
//! there is no shared engine state, so independent positions can be searched
//! from different threads.
//!
//! # Example
//!
//! ```
//! use chess_core::Position;
//! use chess_engine::{search, SkillLevel, SkillModulator};
//!
//! let mut position = Position::startpos();
//! let best = search(&mut position, 2).unwrap();
//! assert!(position.legal_moves().contains(&best.best_move));
//!
//! let mut bot = SkillModulator::seeded(1, 3);
//! let reply = bot.choose_move(&mut position, SkillLevel::new(4)).unwrap();
//! assert!(position.legal_moves().contains(&reply.mv));
//! ```

pub mod eval;
pub mod search;
pub mod skill;

pub use eval::{evaluate, piece_value, Score, MATE_SCORE};
pub use search::{search, SearchResult, Searcher};
pub use skill::{MoveSource, SkillLevel, SkillModulator, SkillMove};
