//! Error type for chess board operations (spec.md §7).

use std::fmt;

/// The four error kinds spec.md §7 calls for, as one tagged enum rather
/// than a class hierarchy (spec.md DESIGN NOTES, "Inheritance of error
/// classes"). `GameOver` is not produced by this crate — it is raised by
/// the external game facade (spec.md §1) and is out of scope here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Malformed FEN, malformed SAN/UCI, unknown promotion letter, or
    /// invalid square algebraic notation.
    BadInput(String),
    /// Well-formed input that matches no legal move.
    BadMove(String),
    /// Matched more than one legal move and the ambiguity is not solely
    /// over the promotion piece.
    Ambiguous(String),
    /// Matched multiple candidates differing only by promotion piece,
    /// and no promotion was supplied.
    NeedsPromotion(String),
}

impl ChessError {
    pub(crate) fn bad_input(msg: impl Into<String>) -> Self {
        ChessError::BadInput(msg.into())
    }

    pub(crate) fn bad_move(msg: impl Into<String>) -> Self {
        ChessError::BadMove(msg.into())
    }

    pub(crate) fn ambiguous(msg: impl Into<String>) -> Self {
        ChessError::Ambiguous(msg.into())
    }

    pub(crate) fn needs_promotion(msg: impl Into<String>) -> Self {
        ChessError::NeedsPromotion(msg.into())
    }
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::BadInput(msg) => write!(f, "bad input: {msg}"),
            ChessError::BadMove(msg) => write!(f, "not a legal move: {msg}"),
            ChessError::Ambiguous(msg) => write!(f, "ambiguous move: {msg}"),
            ChessError::NeedsPromotion(msg) => write!(f, "needs promotion piece: {msg}"),
        }
    }
}

impl std::error::Error for ChessError {}
