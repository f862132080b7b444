//! Incremental per-square attack-count table (spec.md §4.1, C4).
//!
//! The subtle part: adding or removing a piece at square `sq` changes
//! occupancy at `sq`, so every slider whose ray passes *through* `sq`
//! must have its contribution to squares *beyond* `sq` updated too. A
//! naive "only update the moved piece's own attacks" implementation is
//! incorrect and will eventually desync `is_attacked` around sliders
//! (spec.md DESIGN NOTES).

use super::tables::{pawn_attack_offsets, slides_on, DIRS};
use super::types::{Color, Piece, PieceKind, Square};

pub(crate) type Board = [Option<Piece>; 128];

/// Per (square, color) attacker counts, indexed `2*square + color_bit`.
#[derive(Clone)]
pub(crate) struct AttackMap {
    counts: [u8; 256],
}

impl AttackMap {
    pub(crate) fn new() -> Self {
        AttackMap { counts: [0; 256] }
    }

    #[inline]
    fn cell(sq: Square, color: Color) -> usize {
        2 * sq.index() as usize + color.bit()
    }

    pub(crate) fn is_attacked(&self, sq: Square, by_color: Color) -> bool {
        self.counts[Self::cell(sq, by_color)] > 0
    }

    fn bump(&mut self, sq: Square, color: Color, delta: i8) {
        let cell = Self::cell(sq, color);
        if delta > 0 {
            self.counts[cell] = self.counts[cell].saturating_add(delta as u8);
        } else {
            self.counts[cell] = self.counts[cell].saturating_sub((-delta) as u8);
        }
    }

    /// Walk from `from` (exclusive) in direction `dir`, applying `delta`
    /// to every square reached, stopping after the first occupied square
    /// (inclusive) or leaving the board. This both (a) lays down a
    /// fresh slider's own ray, and (b) extends/retracts another slider's
    /// ray past a square that was just vacated/occupied.
    fn walk(&mut self, board: &Board, from: Square, dir: i8, color: Color, delta: i8) {
        let mut cur = from;
        loop {
            match cur.offset(dir) {
                Some(next) => {
                    cur = next;
                    self.bump(cur, color, delta);
                    if board[cur.index() as usize].is_some() {
                        break;
                    }
                }
                None => break,
            }
        }
    }

    /// The nearest occupied square walking from `from` in direction
    /// `dir`, not including `from` itself.
    fn nearest_blocker(board: &Board, from: Square, dir: i8) -> Option<Square> {
        let mut cur = from;
        loop {
            cur = cur.offset(dir)?;
            if board[cur.index() as usize].is_some() {
                return Some(cur);
            }
        }
    }

    fn own_attacks(&mut self, board: &Board, sq: Square, piece: Piece, delta: i8) {
        let color = piece.color();
        match piece.kind() {
            PieceKind::Pawn => {
                for offset in pawn_attack_offsets(color) {
                    if let Some(to) = sq.offset(offset) {
                        self.bump(to, color, delta);
                    }
                }
            }
            PieceKind::Knight => {
                for &offset in &super::tables::KNIGHT_OFFSETS {
                    if let Some(to) = sq.offset(offset) {
                        self.bump(to, color, delta);
                    }
                }
            }
            PieceKind::King => {
                for &offset in &DIRS {
                    if let Some(to) = sq.offset(offset) {
                        self.bump(to, color, delta);
                    }
                }
            }
            kind @ (PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen) => {
                for (dir_index, &dir) in DIRS.iter().enumerate() {
                    if slides_on(kind, dir_index) {
                        self.walk(board, sq, dir, color, delta);
                    }
                }
            }
        }
    }

    /// Update the attack map for a slider whose ray passes through `sq`
    /// after a piece was added to or removed from it (spec.md §4.1). For
    /// every direction `dir`, if the nearest occupied square beyond `sq`
    /// in direction `dir` is a slider capable of moving along that axis,
    /// its contribution to the squares beyond `sq` in the *opposite*
    /// direction is extended (piece removed, `delta = +1`) or retracted
    /// (piece added, `delta = -1`).
    fn rescan_through(&mut self, board: &Board, sq: Square, delta: i8) {
        for (dir_index, &dir) in DIRS.iter().enumerate() {
            if let Some(blocker_sq) = Self::nearest_blocker(board, sq, dir) {
                let blocker = board[blocker_sq.index() as usize].expect("occupied by construction");
                if slides_on(blocker.kind(), dir_index) {
                    self.walk(board, sq, -dir, blocker.color(), delta);
                }
            }
        }
    }

    /// Call after placing `piece` on `sq` in `board`.
    pub(crate) fn add_piece(&mut self, board: &Board, sq: Square, piece: Piece) {
        self.own_attacks(board, sq, piece, 1);
        self.rescan_through(board, sq, -1);
    }

    /// Call with `piece` still (logically) present to account for its
    /// removal from `sq`; the board occupancy squares beyond `sq` must
    /// already reflect the final state.
    pub(crate) fn remove_piece(&mut self, board: &Board, sq: Square, piece: Piece) {
        self.own_attacks(board, sq, piece, -1);
        self.rescan_through(board, sq, 1);
    }
}
