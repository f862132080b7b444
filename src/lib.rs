//! A chess rules engine: position representation, legal move generation
//! (Chess960 castling, en passant, promotion), move apply/revert, outcome
//! classification, and FEN/SAN codecs (spec.md §1).
//!
//! The public surface lives in [`board`]; [`prelude`] re-exports the
//! pieces most callers need.

pub mod board;

pub use board::prelude;
pub use board::{
    parse_uci, resolve_move, BoardBuilder, CastleRights, ChessError, Color, Move, MoveList, Piece,
    PieceKind, Position, Square, Status,
};
