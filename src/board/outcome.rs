//! Outcome classification after a move (spec.md §4.6-§4.7, C7).

use super::state::Position;
use super::types::{Color, PieceKind, Status};

/// Decide the new status after `mover` has just moved (spec.md §4.6).
/// Called once, by `make_unmake::apply`, after the raw mutation has
/// already happened and `Position::put_hash` has already recorded this
/// position's repetition count.
pub(crate) fn classify(pos: &mut Position, mover: Color) -> Status {
    // Read before `legal_moves()`: move generation trial-applies every
    // pseudo-legal candidate, and each trial `apply_raw` overwrites
    // `last_repetition_count` with the trial position's count.
    let times_seen = pos.last_repetition_count();
    let enemy = mover.opponent();
    let enemy_in_check = pos.king_in_danger(enemy);
    let enemy_can_move = !pos.legal_moves().is_empty();

    if !enemy_can_move {
        return if enemy_in_check {
            Status::Checkmate
        } else {
            Status::DrawStalemate
        };
    }
    if pos.halfmove_clock() >= 100 {
        return Status::DrawFiftyMoves;
    }
    if times_seen >= 3 {
        return Status::DrawRepetition;
    }
    if insufficient_material(pos) {
        return Status::DrawNoMaterial;
    }
    Status::Active
}

/// Spec.md §4.7: draw when the only material left is kings, a lone
/// minor against a lone king, or each side down to a lone
/// same-color-square bishop. Any pawn, rook, or queen disqualifies. Two
/// knights against a lone king is deliberately *not* covered by this
/// rule, and neither is one side holding two same-colored bishops
/// against a lone king — spec.md names exactly one bishop per side.
fn insufficient_material(pos: &Position) -> bool {
    let mut knights = [0u32, 0];
    let mut bishops_mask = [0u64, 0];
    let mut bishop_count = [0u32, 0];

    for &sq in pos.piece_list() {
        let piece = pos.piece_at(sq).expect("piece_list entries are occupied");
        match piece.kind() {
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
            PieceKind::Knight => knights[piece.color().bit()] += 1,
            PieceKind::Bishop => {
                let idx = piece.color().bit();
                bishop_count[idx] += 1;
                let dark = (sq.file() + sq.rank()) % 2 == 1;
                bishops_mask[idx] |= if dark { 0b10 } else { 0b01 };
            }
            PieceKind::King => {}
        }
    }

    let total_minors = knights[0] + knights[1] + bishop_count[0] + bishop_count[1];
    if total_minors <= 1 {
        return true;
    }

    let total_knights = knights[0] + knights[1];
    if total_knights == 0 && bishop_count[0] == 1 && bishop_count[1] == 1 {
        let combined = bishops_mask[0] | bishops_mask[1];
        return combined == 0b01 || combined == 0b10;
    }

    false
}
