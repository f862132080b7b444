//! Game status (spec.md §3.8).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Game status, ordered so that `status >= Status::Draw` means "drawn"
/// and `status != Status::Active` means "game over" (spec.md §3.8). The
/// ordering is load-bearing: `derive(PartialOrd, Ord)` on a C-like enum
/// follows declaration order, so variants must not be reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    Active,
    Checkmate,
    /// Set by the external game facade (spec.md §1); never produced by
    /// this crate directly.
    Resigned,
    Draw,
    DrawStalemate,
    DrawRepetition,
    DrawFiftyMoves,
    DrawNoMaterial,
}

impl Status {
    /// `status != Active`.
    #[inline]
    #[must_use]
    pub const fn is_game_over(self) -> bool {
        !matches!(self, Status::Active)
    }

    /// `status >= Draw`.
    #[inline]
    #[must_use]
    pub fn is_draw(self) -> bool {
        self >= Status::Draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_spec() {
        assert!(Status::Active < Status::Checkmate);
        assert!(Status::Checkmate < Status::Resigned);
        assert!(Status::Resigned < Status::Draw);
        assert!(Status::Draw < Status::DrawStalemate);
        assert!(Status::DrawStalemate < Status::DrawRepetition);
        assert!(Status::DrawRepetition < Status::DrawFiftyMoves);
        assert!(Status::DrawFiftyMoves < Status::DrawNoMaterial);
    }

    #[test]
    fn is_game_over_and_is_draw() {
        assert!(!Status::Active.is_game_over());
        assert!(Status::Checkmate.is_game_over());
        assert!(!Status::Checkmate.is_draw());
        assert!(Status::DrawStalemate.is_draw());
    }
}
