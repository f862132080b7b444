//! Fluent builder for constructing chess positions without going through
//! FEN text (spec.md §9's adopted Open Question answer: direct mutation
//! is only well-defined before any legal-move query, which a builder
//! structurally enforces by finishing all placement before `build()`).
//!
//! # Example
//! ```
//! use chess_core::board::{BoardBuilder, Color, Piece, PieceKind, Square};
//!
//! let pos = BoardBuilder::new()
//!     .piece(Square::new(4, 0), Piece::new(PieceKind::King, Color::White))
//!     .piece(Square::new(4, 7), Piece::new(PieceKind::King, Color::Black))
//!     .piece(Square::new(0, 1), Piece::new(PieceKind::Pawn, Color::White))
//!     .turn(Color::White)
//!     .build();
//! ```

use super::state::Position;
use super::types::{CastleRights, Color, Piece, PieceKind, Square};

/// A fluent builder for constructing [`Position`] values, including
/// arbitrary Chess960 starting layouts, without parsing FEN text.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    pieces: Vec<(Square, Piece)>,
    turn: Color,
    castles: CastleRights,
    ep: Square,
    clock: u32,
    move_num: u32,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardBuilder {
    #[must_use]
    pub fn new() -> Self {
        BoardBuilder {
            pieces: Vec::new(),
            turn: Color::White,
            castles: CastleRights::none(),
            ep: Square::NONE,
            clock: 0,
            move_num: 1,
        }
    }

    /// A builder pre-loaded with the standard chess starting layout and
    /// full castling rights.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            builder = builder
                .piece(Square::new(file, 0), Piece::new(kind, Color::White))
                .piece(Square::new(file, 7), Piece::new(kind, Color::Black))
                .piece(Square::new(file, 1), Piece::new(PieceKind::Pawn, Color::White))
                .piece(Square::new(file, 6), Piece::new(PieceKind::Pawn, Color::Black));
        }
        builder.castles.set_rook_file(Color::White, true, 7);
        builder.castles.set_rook_file(Color::White, false, 0);
        builder.castles.set_rook_file(Color::Black, true, 7);
        builder.castles.set_rook_file(Color::Black, false, 0);
        builder
    }

    /// Place a piece on a square, replacing whatever was there.
    #[must_use]
    pub fn piece(mut self, square: Square, piece: Piece) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self.pieces.push((square, piece));
        self
    }

    /// Remove any piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.pieces.retain(|(sq, _)| *sq != square);
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn turn(mut self, color: Color) -> Self {
        self.turn = color;
        self
    }

    /// Set castle rights directly, e.g. for a Chess960 layout.
    #[must_use]
    pub const fn castle_rights(mut self, rights: CastleRights) -> Self {
        self.castles = rights;
        self
    }

    /// Record a rook file as eligible to castle on one side.
    #[must_use]
    pub fn castle_rook_file(mut self, color: Color, kingside: bool, file: u8) -> Self {
        self.castles.set_rook_file(color, kingside, file);
        self
    }

    /// Set the en-passant target square.
    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.ep = target;
        self
    }

    /// Set the halfmove clock (fifty-move rule counter).
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.clock = clock;
        self
    }

    /// Set the fullmove number.
    #[must_use]
    pub const fn fullmove_number(mut self, n: u32) -> Self {
        self.move_num = n;
        self
    }

    /// Finish construction, returning the assembled [`Position`].
    #[must_use]
    pub fn build(self) -> Position {
        let mut pos = Position::empty();
        for (square, piece) in self.pieces {
            pos.set_piece(square, piece);
        }
        pos.set_turn(self.turn);
        pos.set_castle_rights(self.castles);
        pos.set_en_passant(self.ep);
        pos.set_halfmove_clock(self.clock);
        pos.set_fullmove_number(self.move_num);
        let hash = pos.hash_key();
        pos.put_hash(&hash);
        pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_matches_new() {
        let built = BoardBuilder::starting_position().build();
        assert_eq!(built.to_fen(), Position::new().to_fen());
    }

    #[test]
    fn empty_board_has_only_placed_pieces() {
        let pos = BoardBuilder::new()
            .piece(Square::new(4, 0), Piece::new(PieceKind::King, Color::White))
            .piece(Square::new(4, 7), Piece::new(PieceKind::King, Color::Black))
            .build();
        assert!(pos.piece_at(Square::new(4, 0)).is_some());
        assert!(pos.piece_at(Square::new(0, 0)).is_none());
    }

    #[test]
    fn clear_removes_a_placed_piece() {
        let pos = BoardBuilder::starting_position()
            .clear(Square::new(0, 0))
            .build();
        assert!(pos.piece_at(Square::new(0, 0)).is_none());
        assert!(pos.piece_at(Square::new(1, 0)).is_some());
    }

    #[test]
    fn turn_and_clock_are_applied() {
        let pos = BoardBuilder::new()
            .piece(Square::new(4, 0), Piece::new(PieceKind::King, Color::White))
            .piece(Square::new(4, 7), Piece::new(PieceKind::King, Color::Black))
            .turn(Color::Black)
            .halfmove_clock(12)
            .build();
        assert_eq!(pos.turn(), Color::Black);
        assert_eq!(pos.halfmove_clock(), 12);
    }

    #[test]
    fn chess960_castle_rights_are_applied() {
        let pos = BoardBuilder::new()
            .piece(Square::new(3, 0), Piece::new(PieceKind::King, Color::White))
            .piece(Square::new(0, 0), Piece::new(PieceKind::Rook, Color::White))
            .piece(Square::new(4, 7), Piece::new(PieceKind::King, Color::Black))
            .castle_rook_file(Color::White, false, 0)
            .build();
        assert_eq!(pos.castle_rights().rook_file(Color::White, false), Some(0));
    }
}
