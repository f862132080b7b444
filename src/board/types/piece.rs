//! Piece, color, and the packed square-occupant byte.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess piece kinds, numbered to match the packed `Piece` byte encoding
/// (low 3 bits of a square's occupant byte).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub enum PieceKind {
    Pawn = 1,
    Bishop = 2,
    Knight = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

impl PieceKind {
    /// Parse a piece kind from a case-insensitive letter (p, n, b, r, q, k).
    #[must_use]
    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase letter for this piece kind.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Letter for this piece kind, uppercased for white.
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        let c = self.to_char();
        if color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

/// Promotion pieces in SAN/perft tie-break order: queen, rook, knight,
/// bishop (spec.md §4.2).
pub(crate) const PROMOTION_PIECES: [PieceKind; 4] =
    [PieceKind::Queen, PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop];

/// Chess colors. `opponent()` is the involution `enemy = 8 - color` of
/// spec.md §3.2 expressed over an enum instead of a bit flip.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Color bit used to index `attacks[2*square + color_bit]` (spec.md §3.4).
    #[inline]
    #[must_use]
    pub const fn bit(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Packed square-occupant byte (spec.md §3.2): low 3 bits piece kind,
/// bit `0x08` color, bit `0x10` "has moved" flag. `0` means empty and is
/// never a valid `Piece` value — squares hold `Option<Piece>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece(u8);

const KIND_MASK: u8 = 0x07;
const COLOR_BIT: u8 = 0x08;
const MOVED_BIT: u8 = 0x10;

impl Piece {
    /// Build a fresh (not-yet-moved) piece.
    #[inline]
    #[must_use]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece::with_moved(kind, color, false)
    }

    /// Build a piece with an explicit moved-flag, e.g. when restoring one
    /// from a `Move`'s `what` field during revert (spec.md §4.5).
    #[inline]
    #[must_use]
    pub const fn with_moved(kind: PieceKind, color: Color, moved: bool) -> Self {
        let mut byte = kind as u8;
        if matches!(color, Color::Black) {
            byte |= COLOR_BIT;
        }
        if moved {
            byte |= MOVED_BIT;
        }
        Piece(byte)
    }

    #[inline]
    #[must_use]
    pub const fn kind(self) -> PieceKind {
        match self.0 & KIND_MASK {
            1 => PieceKind::Pawn,
            2 => PieceKind::Bishop,
            3 => PieceKind::Knight,
            4 => PieceKind::Rook,
            5 => PieceKind::Queen,
            _ => PieceKind::King,
        }
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Color {
        if self.0 & COLOR_BIT == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    /// Whether this piece has ever left its square. Gates castling
    /// eligibility on the king/rook themselves (spec.md §4.3), separate
    /// from the file-tracked `CastleRights` map.
    #[inline]
    #[must_use]
    pub const fn has_moved(self) -> bool {
        self.0 & MOVED_BIT != 0
    }

    /// The same piece with the moved-flag set.
    #[inline]
    #[must_use]
    pub const fn moved(self) -> Self {
        Piece(self.0 | MOVED_BIT)
    }

    /// Reinterpret this piece as a different kind, keeping color and the
    /// moved flag (used to turn a pawn into its promoted piece, spec.md §4.4).
    #[inline]
    #[must_use]
    pub const fn retype(self, kind: PieceKind) -> Self {
        Piece::with_moved(kind, self.color(), self.has_moved())
    }

    #[inline]
    #[must_use]
    pub fn to_fen_char(self) -> char {
        self.kind().to_fen_char(self.color())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Piece({:?}, {:?})", self.kind(), self.color())
    }
}
