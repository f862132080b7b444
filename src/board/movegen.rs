//! Legal move generation (spec.md §4.2-§4.3, C5).
//!
//! Pseudo-legal moves are generated per piece, then filtered by trial
//! application: each candidate is played on the position with the cheap
//! `apply_raw`/`revert_raw` pair (skipping outcome classification, which
//! would otherwise recurse into this very function for the opponent's
//! move count), and kept only if the moving side's king is not left in
//! check. This single filter handles pins and discovered checks without
//! a separate pin analysis (spec.md §4.2).

use super::make_unmake::{apply_raw, revert_raw};
use super::state::Position;
use super::tables::{pawn_attack_offsets, pawn_forward, DIAGONAL, DIRS, KNIGHT_OFFSETS, ORTHOGONAL};
use super::types::{Color, Move, MoveList, Piece, PieceKind, PriorState, Square, PROMOTION_PIECES};

fn captured_prior(pos: &Position) -> PriorState {
    PriorState {
        clock: pos.halfmove_clock(),
        move_num: pos.fullmove_number(),
        ep: pos.en_passant(),
        status: pos.status(),
        castles: pos.castle_rights(),
    }
}

fn new_move(what: Piece, from: Square, to: Square, prior: PriorState) -> Move {
    Move {
        what,
        from,
        to,
        capture: None,
        capture_coord: Square::NONE,
        castle_rook: None,
        castle_rook_from: Square::NONE,
        castle_rook_to: Square::NONE,
        promote: None,
        mark_ep: Square::NONE,
        prior,
    }
}

fn capture_move(what: Piece, from: Square, to: Square, captured: Piece, prior: PriorState) -> Move {
    let mut mv = new_move(what, from, to, prior);
    mv.capture = Some(captured);
    mv.capture_coord = to;
    mv
}

/// All legal moves for the side to move in `pos` (spec.md §4.2). Takes
/// `&mut Position` because in-check filtering trial-applies and reverts
/// each candidate.
pub(crate) fn generate_legal_moves(pos: &mut Position) -> MoveList {
    let color = pos.turn();
    let prior = captured_prior(pos);
    let occupied_squares: Vec<Square> = pos.piece_list().to_vec();

    let mut pseudo = Vec::new();
    for sq in occupied_squares {
        let piece = match pos.piece_at(sq) {
            Some(p) if p.color() == color => p,
            _ => continue,
        };
        match piece.kind() {
            PieceKind::Pawn => pawn_moves(pos, sq, piece, prior, &mut pseudo),
            PieceKind::Knight => step_moves(pos, sq, piece, &KNIGHT_OFFSETS, prior, &mut pseudo),
            PieceKind::King => {
                step_moves(pos, sq, piece, &DIRS, prior, &mut pseudo);
                castle_moves(pos, sq, piece, prior, &mut pseudo);
            }
            PieceKind::Bishop => slide_moves(pos, sq, piece, DIAGONAL, prior, &mut pseudo),
            PieceKind::Rook => slide_moves(pos, sq, piece, ORTHOGONAL, prior, &mut pseudo),
            PieceKind::Queen => slide_moves(pos, sq, piece, 0..8, prior, &mut pseudo),
        }
    }

    let mut legal = MoveList::new();
    for mv in pseudo {
        apply_raw(pos, &mv);
        let safe = !pos.king_in_danger(color);
        revert_raw(pos, &mv);
        if safe {
            legal.push(mv);
        }
    }
    legal
}

fn step_moves(
    pos: &Position,
    from: Square,
    piece: Piece,
    offsets: &[i8],
    prior: PriorState,
    out: &mut Vec<Move>,
) {
    for &delta in offsets {
        let Some(to) = from.offset(delta) else { continue };
        match pos.piece_at(to) {
            None => out.push(new_move(piece, from, to, prior)),
            Some(occ) if occ.color() != piece.color() => {
                out.push(capture_move(piece, from, to, occ, prior));
            }
            Some(_) => {}
        }
    }
}

fn slide_moves(
    pos: &Position,
    from: Square,
    piece: Piece,
    dir_indices: impl IntoIterator<Item = usize>,
    prior: PriorState,
    out: &mut Vec<Move>,
) {
    for dir_index in dir_indices {
        let dir = DIRS[dir_index];
        let mut cur = from;
        loop {
            let Some(next) = cur.offset(dir) else { break };
            cur = next;
            match pos.piece_at(cur) {
                None => out.push(new_move(piece, from, cur, prior)),
                Some(occ) => {
                    if occ.color() != piece.color() {
                        out.push(capture_move(piece, from, cur, occ, prior));
                    }
                    break;
                }
            }
        }
    }
}

fn pawn_moves(pos: &Position, from: Square, piece: Piece, prior: PriorState, out: &mut Vec<Move>) {
    let color = piece.color();
    let forward = pawn_forward(color);
    let start_rank = if color == Color::White { 1 } else { 6 };
    let promo_rank = if color == Color::White { 7 } else { 0 };

    if let Some(one) = from.offset(forward) {
        if pos.piece_at(one).is_none() {
            push_pawn_destination(piece, from, one, None, promo_rank, prior, out);
            if from.rank() == start_rank {
                if let Some(two) = one.offset(forward) {
                    if pos.piece_at(two).is_none() {
                        let mut mv = new_move(piece, from, two, prior);
                        mv.mark_ep = one;
                        out.push(mv);
                    }
                }
            }
        }
    }

    for &delta in &pawn_attack_offsets(color) {
        let Some(to) = from.offset(delta) else { continue };
        if let Some(occ) = pos.piece_at(to) {
            if occ.color() != color {
                push_pawn_destination(piece, from, to, Some(occ), promo_rank, prior, out);
            }
        } else if to == pos.en_passant() {
            let capture_coord = to.offset(-forward).expect("ep target has a pawn behind it");
            if let Some(captured) = pos.piece_at(capture_coord) {
                let mut mv = new_move(piece, from, to, prior);
                mv.capture = Some(captured);
                mv.capture_coord = capture_coord;
                out.push(mv);
            }
        }
    }
}

/// Push one pawn destination, expanding into the four promotion moves
/// (Q, R, N, B order — spec.md §4.2) when it lands on the last rank.
fn push_pawn_destination(
    piece: Piece,
    from: Square,
    to: Square,
    captured: Option<Piece>,
    promo_rank: usize,
    prior: PriorState,
    out: &mut Vec<Move>,
) {
    let base = match captured {
        Some(cap) => capture_move(piece, from, to, cap, prior),
        None => new_move(piece, from, to, prior),
    };
    if to.rank() == promo_rank {
        for &kind in &PROMOTION_PIECES {
            let mut mv = base;
            mv.promote = Some(kind);
            out.push(mv);
        }
    } else {
        out.push(base);
    }
}

/// Chess960-aware castling (spec.md §4.3). The resulting move, if any,
/// still passes through the generic in-check trial filter in
/// `generate_legal_moves`, matching the three-step legality check the
/// spec describes.
fn castle_moves(pos: &mut Position, king_sq: Square, king: Piece, prior: PriorState, out: &mut Vec<Move>) {
    if king.has_moved() {
        return;
    }
    let color = king.color();
    let back_rank = king_sq.rank();

    for kingside in [true, false] {
        let rook_file = match pos.castle_rights().rook_file(color, kingside) {
            Some(f) => f as usize,
            None => continue,
        };
        let rook_from = Square::new(rook_file, back_rank);
        let rook = match pos.piece_at(rook_from) {
            Some(p) if p.kind() == PieceKind::Rook && p.color() == color => p,
            _ => continue,
        };

        let king_to = Square::new(if kingside { 6 } else { 2 }, back_rank);
        let rook_to = Square::new(if kingside { 5 } else { 3 }, back_rank);

        let files = [king_sq.file(), king_to.file(), rook_from.file(), rook_to.file()];
        let lo = *files.iter().min().unwrap();
        let hi = *files.iter().max().unwrap();
        let path_clear = (lo..=hi).all(|file| {
            let sq = Square::new(file, back_rank);
            sq == king_sq || sq == rook_from || pos.piece_at(sq).is_none()
        });
        if !path_clear {
            continue;
        }

        // Squares the king crosses must not be attacked once the king
        // and rook are (temporarily) off the board. Testing `is_attacked`
        // per square directly is equivalent to the phantom-king walk
        // described in spec.md §4.3, since both read the same attack-map
        // cell for the enemy color.
        let enemy = color.opponent();
        let (klo, khi) = (
            king_sq.file().min(king_to.file()),
            king_sq.file().max(king_to.file()),
        );
        pos.save();
        pos.clear_piece(king_sq);
        pos.clear_piece(rook_from);
        let path_safe = (klo..=khi).all(|file| !pos.is_attacked(Square::new(file, back_rank), enemy));
        pos.restore();
        if !path_safe {
            continue;
        }

        let mut mv = new_move(king, king_sq, king_to, prior);
        mv.castle_rook = Some(rook);
        mv.castle_rook_from = rook_from;
        mv.castle_rook_to = rook_to;
        out.push(mv);
    }
}
