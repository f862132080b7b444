//! Standard Algebraic Notation (spec.md §4.8-§4.9, C9).
//!
//! SAN is the standard human-readable chess notation used in scoresheets,
//! books, and GUIs. Examples: "e4", "Nf3", "Bxc6+", "O-O", "e8=Q#".
//!
//! # Examples
//! ```
//! use chess_core::board::Position;
//!
//! let mut pos = Position::new();
//! let legal = pos.legal_moves();
//! let mv = legal.iter().find(|m| m.to.to_string() == "e4").unwrap();
//! assert_eq!(pos.move_to_san(mv, &legal), "e4");
//! ```

use super::error::ChessError;
use super::make_unmake::{apply_raw, revert_raw};
use super::state::Position;
use super::types::{Move, MoveList, PieceKind, Square};

impl Position {
    /// Format `mv` in SAN, disambiguated against the other moves in
    /// `legal` (spec.md §4.8). Trial-applies `mv` to determine the
    /// trailing `+`/`#` annotation, then reverts.
    pub fn move_to_san(&mut self, mv: &Move, legal: &MoveList) -> String {
        let mut san = String::new();
        if mv.is_castle() {
            san.push_str(if mv.is_castle_kingside() { "O-O" } else { "O-O-O" });
        } else {
            san.push_str(piece_letter(mv.what.kind()));
            san.push_str(&disambiguation(mv, legal));
            if mv.is_capture() {
                san.push('x');
            }
            san.push_str(&mv.to.to_string());
            if let Some(promote) = mv.promote {
                san.push('=');
                san.push(promote.to_char().to_ascii_uppercase());
            }
        }
        san.push_str(&self.check_suffix(mv));
        san
    }

    /// Resolve a SAN string against `legal` (spec.md §4.9).
    pub fn parse_san(&self, san: &str, legal: &MoveList) -> Result<Move, ChessError> {
        let core = strip_annotations(san);
        if core.is_empty() {
            return Err(ChessError::bad_input("empty SAN move"));
        }
        if core == "O-O" || core == "0-0" {
            return pick_castle(legal, true);
        }
        if core == "O-O-O" || core == "0-0-0" {
            return pick_castle(legal, false);
        }

        let (body, promotion) = split_promotion(&core)?;
        let mut chars: Vec<char> = body.chars().collect();

        let piece_kind = if !chars.is_empty() && matches!(chars[0], 'N' | 'B' | 'R' | 'Q' | 'K') {
            let kind = PieceKind::from_char(chars[0]).expect("matched above");
            chars.remove(0);
            kind
        } else {
            PieceKind::Pawn
        };

        let is_capture = match chars.iter().position(|&c| c == 'x') {
            Some(idx) => {
                chars.remove(idx);
                true
            }
            None => false,
        };

        if chars.len() < 2 {
            return Err(ChessError::bad_input(format!("malformed SAN '{san}'")));
        }
        let dest_rank_char = chars.pop().expect("len >= 2");
        let dest_file_char = chars.pop().expect("len >= 2");
        if !('a'..='h').contains(&dest_file_char) || !('1'..='8').contains(&dest_rank_char) {
            return Err(ChessError::bad_input(format!("malformed SAN '{san}'")));
        }
        let dest = Square::new(
            (dest_file_char as u8 - b'a') as usize,
            (dest_rank_char as u8 - b'1') as usize,
        );

        let mut from_file = None;
        let mut from_rank = None;
        for c in chars {
            match c {
                'a'..='h' => from_file = Some((c as u8 - b'a') as usize),
                '1'..='8' => from_rank = Some((c as u8 - b'1') as usize),
                _ => return Err(ChessError::bad_input(format!("malformed SAN '{san}'"))),
            }
        }

        let candidates: Vec<Move> = legal
            .iter()
            .copied()
            .filter(|m| {
                m.what.kind() == piece_kind
                    && m.to == dest
                    && m.is_capture() == is_capture
                    && from_file.map_or(true, |f| m.from.file() == f)
                    && from_rank.map_or(true, |r| m.from.rank() == r)
                    && promotion.map_or(true, |p| m.promote == Some(p))
            })
            .collect();

        select_candidate(candidates, promotion.is_some(), san)
    }

    fn check_suffix(&mut self, mv: &Move) -> String {
        let mover = mv.what.color();
        apply_raw(self, mv);
        let enemy = mover.opponent();
        let in_check = self.king_in_danger(enemy);
        let can_move = !self.legal_moves().is_empty();
        revert_raw(self, mv);
        if in_check && !can_move {
            "#".to_string()
        } else if in_check {
            "+".to_string()
        } else {
            String::new()
        }
    }
}

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::Pawn => "",
        PieceKind::Knight => "N",
        PieceKind::Bishop => "B",
        PieceKind::Rook => "R",
        PieceKind::Queen => "Q",
        PieceKind::King => "K",
    }
}

/// Departure disambiguation (spec.md §4.8): empty, file, rank, or full
/// square, the shortest that uniquely identifies `mv` among same-kind
/// moves to the same destination. Pawn captures always carry the file.
fn disambiguation(mv: &Move, legal: &MoveList) -> String {
    if mv.what.kind() == PieceKind::Pawn {
        return if mv.is_capture() {
            file_letter(mv.from.file()).to_string()
        } else {
            String::new()
        };
    }

    let twins: Vec<&Move> = legal
        .iter()
        .filter(|m| m.what.kind() == mv.what.kind() && m.to == mv.to && m.from != mv.from)
        .collect();
    if twins.is_empty() {
        return String::new();
    }

    let same_file = twins.iter().any(|m| m.from.file() == mv.from.file());
    let same_rank = twins.iter().any(|m| m.from.rank() == mv.from.rank());
    if !same_file {
        file_letter(mv.from.file()).to_string()
    } else if !same_rank {
        (mv.from.rank() + 1).to_string()
    } else {
        mv.from.to_string()
    }
}

fn file_letter(file: usize) -> char {
    (b'a' + file as u8) as char
}

fn pick_castle(legal: &MoveList, kingside: bool) -> Result<Move, ChessError> {
    let matches: Vec<Move> = legal
        .iter()
        .copied()
        .filter(|m| m.is_castle() && m.is_castle_kingside() == kingside)
        .collect();
    match matches.len() {
        0 => Err(ChessError::bad_move("castling is not legal here")),
        1 => Ok(matches[0]),
        _ => Err(ChessError::ambiguous("multiple castling moves match")),
    }
}

/// Strip trailing check/mate marks and game-result/annotation suffixes
/// (spec.md §4.9): one or more of `!`, `?`, `+`, `#`, `e.p.`, `ep`,
/// `1-0`, `0-1`, `1/2-1/2`, `½-½`, or whitespace.
fn strip_annotations(input: &str) -> String {
    const SUFFIXES: [&str; 9] = ["1/2-1/2", "½-½", "1-0", "0-1", "e.p.", "ep", "!", "?", "+"];
    let mut s = input.trim().trim_end_matches('#').trim().to_string();
    loop {
        let before = s.clone();
        for suf in SUFFIXES {
            if s.ends_with(suf) {
                s.truncate(s.len() - suf.len());
                s = s.trim_end().to_string();
            }
        }
        if s == before {
            break;
        }
    }
    s
}

/// Split off a trailing promotion marker, either `=Q` form or the bare
/// `Q` form some SAN writers use.
fn split_promotion(core: &str) -> Result<(String, Option<PieceKind>), ChessError> {
    if let Some(eq_idx) = core.find('=') {
        let head = &core[..eq_idx];
        let tail = &core[eq_idx + 1..];
        let promo = parse_promotion_letter(tail)?;
        return Ok((head.to_string(), Some(promo)));
    }
    if core.len() >= 3 {
        let without_last = &core[..core.len() - 1];
        let last = core.chars().last().expect("len >= 3");
        if matches!(last, 'N' | 'B' | 'R' | 'Q') && ends_with_square(without_last) {
            return Ok((without_last.to_string(), Some(parse_promotion_letter(&last.to_string())?)));
        }
    }
    Ok((core.to_string(), None))
}

fn parse_promotion_letter(s: &str) -> Result<PieceKind, ChessError> {
    match s {
        "Q" => Ok(PieceKind::Queen),
        "R" => Ok(PieceKind::Rook),
        "N" => Ok(PieceKind::Knight),
        "B" => Ok(PieceKind::Bishop),
        other => Err(ChessError::bad_input(format!("invalid promotion piece '{other}'"))),
    }
}

fn ends_with_square(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    n >= 2 && matches!(chars[n - 2], 'a'..='h') && matches!(chars[n - 1], '1'..='8')
}

/// Apply spec.md §4.9's three-way split: exactly one match succeeds,
/// zero is `BadMove`, more than one is `Ambiguous` unless the only
/// ambiguity is over the promotion piece, in which case `NeedsPromotion`.
fn select_candidate(
    mut candidates: Vec<Move>,
    promotion_given: bool,
    san: &str,
) -> Result<Move, ChessError> {
    match candidates.len() {
        0 => Err(ChessError::bad_move(format!("no legal move matches '{san}'"))),
        1 => Ok(candidates.remove(0)),
        _ => {
            if !promotion_given {
                let first = candidates[0];
                let differ_only_by_promotion = candidates
                    .iter()
                    .all(|m| m.from == first.from && m.to == first.to)
                    && candidates.iter().any(|m| m.promote.is_some());
                if differ_only_by_promotion {
                    return Err(ChessError::needs_promotion(format!(
                        "'{san}' requires a promotion piece"
                    )));
                }
            }
            Err(ChessError::ambiguous(format!("'{san}' matches multiple legal moves")))
        }
    }
}
