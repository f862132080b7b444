//! Move application and reversion (spec.md §4.4-§4.5, C6).
//!
//! `apply_raw`/`revert_raw` are the bare board/metadata mutation, shared
//! by the public `Position::apply` (which layers outcome classification
//! on top) and by the move generator's in-check trial push, which needs
//! the mutation without paying for a recursive `legal_moves` call on
//! every candidate.

use super::outcome;
use super::state::Position;
use super::types::{Move, PriorState, Status};

/// Mutate `pos` according to `mv`, per spec.md §4.4, without computing
/// the resulting game status.
pub(crate) fn apply_raw(pos: &mut Position, mv: &Move) {
    let mover = mv.what.color();

    pos.clear_piece(mv.from);
    if mv.capture.is_some() {
        pos.clear_piece(mv.capture_coord);
    }
    pos.set_piece(mv.to, mv.what.moved());
    if let Some(promote) = mv.promote {
        let placed = pos.piece_at(mv.to).expect("just placed");
        pos.set_piece(mv.to, placed.retype(promote));
    }
    if let Some(rook) = mv.castle_rook {
        pos.clear_piece(mv.castle_rook_from);
        pos.set_piece(mv.castle_rook_to, rook.moved());
    }

    pos.set_en_passant(mv.mark_ep);

    let is_pawn_move = mv.what.kind() == super::types::PieceKind::Pawn;
    if is_pawn_move || mv.is_capture() {
        pos.set_halfmove_clock(0);
    } else {
        pos.set_halfmove_clock(pos.halfmove_clock() + 1);
    }

    let mut castles = pos.castle_rights();
    if mv.what.kind() == super::types::PieceKind::King {
        castles.king_moved(mover);
    } else if mv.what.kind() == super::types::PieceKind::Rook {
        castles.rook_moved(mover, mv.from.file() as u8);
    }
    if let Some(captured) = mv.capture {
        if captured.kind() == super::types::PieceKind::Rook {
            castles.rook_moved(captured.color(), mv.capture_coord.file() as u8);
        }
    }
    pos.set_castle_rights(castles);

    if mover == super::types::Color::Black {
        pos.set_fullmove_number(pos.fullmove_number() + 1);
    }
    pos.set_turn(mover.opponent());

    let hash = pos.hash_key();
    pos.put_hash(&hash);
}

/// Undo `mv`, restoring `pos` to exactly what it was before `apply_raw`
/// (spec.md §4.5). `mv.what` is the pre-move piece byte, moved-bit
/// included, so restoring it verbatim is correct even for a piece
/// moving for the first time.
pub(crate) fn revert_raw(pos: &mut Position, mv: &Move) {
    let hash = pos.hash_key();
    pos.remove_hash(&hash);

    pos.clear_piece(mv.to);
    pos.set_piece(mv.from, mv.what);
    if let Some(captured) = mv.capture {
        pos.set_piece(mv.capture_coord, captured);
    }
    if let Some(rook) = mv.castle_rook {
        pos.clear_piece(mv.castle_rook_to);
        pos.set_piece(mv.castle_rook_from, rook);
    }

    let prior: PriorState = mv.prior;
    pos.set_halfmove_clock(prior.clock);
    pos.set_fullmove_number(prior.move_num);
    pos.set_en_passant(prior.ep);
    pos.set_status(prior.status);
    pos.set_castle_rights(prior.castles);
    pos.set_turn(mv.what.color());
}

/// Public `Position::apply`: raw mutation plus outcome classification
/// (spec.md §4.6, fused per the resolution recorded in DESIGN.md — the
/// classifier reads the repetition count `apply_raw`'s `put_hash` call
/// just recorded rather than computing it a second time).
pub(crate) fn apply(pos: &mut Position, mv: &Move) -> Status {
    let mover = mv.what.color();
    apply_raw(pos, mv);
    let status = outcome::classify(pos, mover);
    pos.set_status(status);
    status
}

pub(crate) fn revert(pos: &mut Position, mv: &Move) {
    revert_raw(pos, mv);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::types::{Color, Piece, PieceKind, Square};

    #[test]
    fn apply_then_revert_restores_position() {
        let mut pos = Position::new();
        let before = pos.to_fen();
        let mv = pos
            .legal_moves()
            .iter()
            .find(|m| m.from == Square::new(4, 1) && m.to == Square::new(4, 3))
            .copied()
            .expect("e2e4 is legal from start");
        pos.apply(&mv);
        assert_ne!(pos.to_fen(), before);
        pos.revert(&mv);
        assert_eq!(pos.to_fen(), before);
    }

    #[test]
    fn capture_removes_piece_at_capture_coord() {
        let mut pos = Position::empty();
        pos.set_piece(Square::new(4, 0), Piece::new(PieceKind::King, Color::White));
        pos.set_piece(Square::new(4, 7), Piece::new(PieceKind::King, Color::Black));
        pos.set_piece(Square::new(3, 3), Piece::new(PieceKind::Rook, Color::White));
        pos.set_piece(Square::new(3, 6), Piece::new(PieceKind::Rook, Color::Black));
        let mv = pos
            .legal_moves()
            .iter()
            .find(|m| m.from == Square::new(3, 3) && m.to == Square::new(3, 6))
            .copied()
            .expect("rook capture available");
        assert!(mv.is_capture());
        pos.apply(&mv);
        assert_eq!(pos.piece_at(Square::new(3, 6)).unwrap().color(), Color::White);
        pos.revert(&mv);
        assert_eq!(pos.piece_at(Square::new(3, 6)).unwrap().color(), Color::Black);
    }
}
