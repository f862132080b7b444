//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! # Example
//! ```
//! use chess_core::board::prelude::*;
//! ```

pub use super::{
    parse_uci, resolve_move, BoardBuilder, CastleRights, ChessError, Color, Move, MoveList, Piece,
    PieceKind, Position, Square, Status,
};
