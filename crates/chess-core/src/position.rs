//! Game state wrapper around the rules library board.

use std::fmt;
use std::ops::{Deref, DerefMut};

use cozy_chess::{BitBoard, Board, Color, Move, Piece, Square};

use crate::fen::{mirror_fen, STARTPOS};
use crate::{mov, san, RulesError, Side};

/// Why a finished game was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves and not in check.
    Stalemate,
    /// 100 half-moves without a capture or pawn move.
    FiftyMoveRule,
    /// Neither side can possibly deliver mate.
    InsufficientMaterial,
}

/// Terminal state of a position, as far as a single position can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The side to move has at least one legal move and no draw rule applies.
    Ongoing,
    /// The side to move is checkmated.
    Checkmate,
    /// The game is drawn.
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true if the game cannot continue.
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// A full chess position: pieces, side to move, castling rights, en passant
/// target and move counters.
///
/// Legality, FEN parsing and move generation are delegated to `cozy-chess`.
/// Search code mutates a single `Position` through [`Position::make_move`],
/// which hands back a guard that restores the previous state when dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: Board,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        Self {
            board: Board::default(),
        }
    }

    /// Parses a position from FEN.
    pub fn from_fen(fen: &str) -> Result<Self, RulesError> {
        let board = Board::from_fen(fen.trim(), false).map_err(|e| RulesError::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{:?}", e),
        })?;
        Ok(Self { board })
    }

    /// Serializes the position to FEN.
    pub fn to_fen(&self) -> String {
        self.board.to_string()
    }

    /// Returns the side whose turn it is.
    pub fn side_to_move(&self) -> Side {
        self.board.side_to_move().into()
    }

    /// Returns the piece and its owner on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<(Piece, Side)> {
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        Some((piece, color.into()))
    }

    /// Returns the squares holding `piece` for `side`.
    pub fn pieces(&self, piece: Piece, side: Side) -> BitBoard {
        self.board.colored_pieces(side.into(), piece)
    }

    /// Returns the half-move clock used by the fifty-move rule.
    pub fn halfmove_clock(&self) -> u8 {
        self.board.halfmove_clock()
    }

    /// Returns the fullmove number, starting at 1 and incremented after
    /// each Black move.
    pub fn fullmove_number(&self) -> u16 {
        self.board.fullmove_number()
    }

    /// All legal moves, in the rules library's enumeration order.
    ///
    /// The order is deterministic for a given position, and search
    /// tie-breaking relies on it.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    /// Returns true if the side to move has any legal move.
    pub fn has_legal_moves(&self) -> bool {
        self.board.generate_moves(|_| true)
    }

    /// Returns true if `mv` is legal in this position.
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal_moves().contains(&mv)
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        !self.board.checkers().is_empty()
    }

    /// Returns true if the side to move is checkmated.
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_moves()
    }

    /// Classifies the position as ongoing, checkmate or drawn.
    pub fn status(&self) -> GameStatus {
        if !self.has_legal_moves() {
            return if self.in_check() {
                GameStatus::Checkmate
            } else {
                GameStatus::Draw(DrawReason::Stalemate)
            };
        }
        if self.board.halfmove_clock() >= 100 {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if self.is_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        GameStatus::Ongoing
    }

    /// Returns true if the fifty-move rule or insufficient material ends
    /// the game regardless of the legal moves available.
    pub fn is_draw_by_rule(&self) -> bool {
        self.board.halfmove_clock() >= 100 || self.is_insufficient_material()
    }

    /// Returns true for bare kings, or a single minor piece against a bare king.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = self.board.pieces(Piece::Pawn)
            | self.board.pieces(Piece::Rook)
            | self.board.pieces(Piece::Queen);
        if !heavy.is_empty() {
            return false;
        }
        let minors = self.board.pieces(Piece::Knight) | self.board.pieces(Piece::Bishop);
        minors.into_iter().count() <= 1
    }

    /// Applies a legal move in place and returns a guard that undoes it.
    ///
    /// `mv` must come from [`Position::legal_moves`] for this position.
    /// The guard dereferences to the updated position; dropping it restores
    /// the state this position had before the call, whichever way the
    /// caller's scope is left.
    pub fn make_move(&mut self, mv: Move) -> MoveGuard<'_> {
        let undo = self.board.clone();
        self.board.play_unchecked(mv);
        MoveGuard {
            position: self,
            undo,
        }
    }

    /// Applies a move permanently after checking that it is legal.
    pub fn play(&mut self, mv: Move) -> Result<(), RulesError> {
        if !self.is_legal(mv) {
            return Err(RulesError::IllegalMove(self.to_uci(mv)));
        }
        self.board.play_unchecked(mv);
        Ok(())
    }

    /// Returns the color-mirrored position.
    ///
    /// White pieces become Black pieces on the vertically reflected square
    /// and vice versa, and the side to move flips.
    pub fn mirrored(&self) -> Result<Self, RulesError> {
        Self::from_fen(&mirror_fen(&self.to_fen())?)
    }

    /// Resolves coordinate notation (`e2e4`, `e7e8q`, `e1g1`) or SAN
    /// (`Nf3`, `exd5`, `O-O`) to a legal move.
    pub fn parse_move(&self, text: &str) -> Result<Move, RulesError> {
        let text = text.trim();
        if mov::looks_like_uci(text) {
            return mov::parse_uci(self, text);
        }
        san::san_to_move(self, text)
    }

    /// Formats a legal move in coordinate notation, with castling written
    /// as the king's two-square move.
    pub fn to_uci(&self, mv: Move) -> String {
        mov::to_uci(self, mv)
    }

    /// Formats a legal move in SAN, including the check or mate suffix.
    pub fn to_san(&self, mv: Move) -> String {
        san::move_to_san(self, mv)
    }

    /// Returns true if `mv` is a castling move in the rules library's
    /// king-takes-own-rook encoding.
    pub(crate) fn is_castling(&self, mv: Move) -> bool {
        self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.color_on(mv.to) == Some(self.board.side_to_move())
    }

    pub(crate) fn color_on(&self, square: Square) -> Option<Color> {
        self.board.color_on(square)
    }
}

impl std::str::FromStr for Position {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "startpos" {
            return Self::from_fen(STARTPOS);
        }
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}

/// Undo guard returned by [`Position::make_move`].
///
/// Restores the pre-move board on drop.
pub struct MoveGuard<'a> {
    position: &'a mut Position,
    undo: Board,
}

impl Deref for MoveGuard<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        self.position
    }
}

impl DerefMut for MoveGuard<'_> {
    fn deref_mut(&mut self) -> &mut Position {
        self.position
    }
}

impl Drop for MoveGuard<'_> {
    fn drop(&mut self) {
        std::mem::swap(&mut self.position.board, &mut self.undo);
    }
}
