//! Core game-state types for the engine.
//!
//! This crate is the boundary to the rules library (`cozy-chess`), which
//! owns move generation, legality and FEN parsing. On top of it we provide:
//! - [`Position`] with scoped make/unmake through [`MoveGuard`]
//! - [`GameStatus`] terminal detection (mate, stalemate, draw rules)
//! - coordinate notation with conventional castling, and SAN
//! - [`Side`] for perspective-aware scoring
//!
//! # Example
//!
//! ```
//! use chess_core::Position;
//!
//! let mut position = Position::startpos();
//! let mv = position.parse_move("e4").unwrap();
//! {
//!     let after = position.make_move(mv);
//!     assert_eq!(after.legal_moves().len(), 20);
//! }
//! assert_eq!(position, Position::startpos());
//! ```

mod error;
pub mod fen;
mod mov;
mod position;
pub mod san;
mod side;

pub use cozy_chess::{Move, Piece, Square};
pub use error::RulesError;
pub use fen::STARTPOS;
pub use position::{DrawReason, GameStatus, MoveGuard, Position};
pub use side::Side;
