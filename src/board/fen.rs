//! FEN codec (spec.md §6.1, C8).
//!
//! Parse and render the six whitespace-separated FEN fields. Castling
//! accepts both standard `KQkq` and Shredder-FEN file letters on input;
//! rendering prefers the standard letters and only falls back to a file
//! letter when a rook sits on a non-standard file (spec.md §6.1).

use std::str::FromStr;

use super::error::ChessError;
use super::state::Position;
use super::types::{CastleRights, Color, PieceKind, Square};

impl Position {
    /// Parse a position from a FEN string (spec.md §6.1).
    pub fn from_fen(fen: &str) -> Result<Position, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(ChessError::bad_input(format!(
                "FEN needs at least 4 fields, found {}",
                parts.len()
            )));
        }

        let mut pos = Position::empty();
        parse_placement(&mut pos, parts[0])?;

        pos.set_turn(match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(ChessError::bad_input(format!(
                    "invalid active color '{other}'"
                )))
            }
        });

        let castles = parse_castling(&pos, parts[2])?;
        pos.set_castle_rights(castles);

        let ep = if parts[3] == "-" {
            Square::NONE
        } else {
            Square::from_str(parts[3])?
        };
        pos.set_en_passant(ep);

        if let Some(clock_str) = parts.get(4) {
            let clock: u32 = clock_str
                .parse()
                .map_err(|_| ChessError::bad_input(format!("invalid halfmove clock '{clock_str}'")))?;
            pos.set_halfmove_clock(clock);
        }
        if let Some(num_str) = parts.get(5) {
            let num: u32 = num_str
                .parse()
                .map_err(|_| ChessError::bad_input(format!("invalid fullmove number '{num_str}'")))?;
            pos.set_fullmove_number(num.max(1));
        }

        #[cfg(feature = "logging")]
        log::debug!("parsed FEN: {fen}");

        let hash = pos.hash_key();
        pos.put_hash(&hash);
        Ok(pos)
    }

    /// Render this position as a FEN string (spec.md §6.1).
    #[must_use]
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.fen_placement_field(),
            if self.turn() == Color::White { "w" } else { "b" },
            self.fen_castling_field(),
            self.fen_ep_field(),
            self.halfmove_clock(),
            self.fullmove_number(),
        )
    }

    /// Piece-placement field: 8 rank records, rank 8 down to rank 1
    /// (spec.md §6.1, §6.4).
    pub(crate) fn fen_placement_field(&self) -> String {
        let mut ranks = Vec::with_capacity(8);
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0u32;
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            ranks.push(row);
        }
        ranks.join("/")
    }

    /// Castling field, Shredder-FEN aware: standard `KQkq` letters where
    /// the rook sits on its standard file, a file letter otherwise
    /// (spec.md §6.1).
    pub(crate) fn fen_castling_field(&self) -> String {
        let rights = self.castle_rights();
        let mut out = String::new();
        for (color, upper) in [(Color::White, true), (Color::Black, false)] {
            if let Some(file) = rights.rook_file(color, true) {
                out.push(castle_letter(file, true, upper));
            }
            if let Some(file) = rights.rook_file(color, false) {
                out.push(castle_letter(file, false, upper));
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }

    /// En-passant field: `-` or the algebraic target square (spec.md §6.1).
    pub(crate) fn fen_ep_field(&self) -> String {
        let ep = self.en_passant();
        if ep.is_on_board() {
            ep.to_string()
        } else {
            "-".to_string()
        }
    }
}

fn castle_letter(file: u8, kingside: bool, white: bool) -> char {
    let standard_file = if kingside { 7 } else { 0 };
    let c = if file == standard_file {
        if kingside { 'k' } else { 'q' }
    } else {
        (b'a' + file) as char
    };
    if white {
        c.to_ascii_uppercase()
    } else {
        c
    }
}

fn parse_placement(pos: &mut Position, field: &str) -> Result<(), ChessError> {
    let rank_records: Vec<&str> = field.split('/').collect();
    if rank_records.len() != 8 {
        return Err(ChessError::bad_input(format!(
            "piece placement must have 8 ranks, found {}",
            rank_records.len()
        )));
    }
    for (rank_idx, rank_str) in rank_records.iter().enumerate() {
        let rank = 7 - rank_idx;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as usize;
            } else {
                let kind = PieceKind::from_char(c)
                    .ok_or_else(|| ChessError::bad_input(format!("invalid piece char '{c}'")))?;
                let color = if c.is_uppercase() { Color::White } else { Color::Black };
                if file >= 8 {
                    return Err(ChessError::bad_input(format!(
                        "rank {} has more than 8 files",
                        rank_idx + 1
                    )));
                }
                pos.set_piece(Square::new(file, rank), super::types::Piece::new(kind, color));
                file += 1;
            }
        }
        if file != 8 {
            return Err(ChessError::bad_input(format!(
                "rank {} does not sum to 8 files",
                rank_idx + 1
            )));
        }
    }
    Ok(())
}

fn parse_castling(pos: &Position, field: &str) -> Result<CastleRights, ChessError> {
    let mut rights = CastleRights::none();
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let color = if c.is_uppercase() { Color::White } else { Color::Black };
        match c.to_ascii_lowercase() {
            'k' => rights.set_rook_file(color, true, 7),
            'q' => rights.set_rook_file(color, false, 0),
            letter @ 'a'..='h' => {
                let file = letter as u8 - b'a';
                let king_file = pos
                    .king_square(color)
                    .map(|sq| sq.file() as u8)
                    .unwrap_or(4);
                let kingside = file > king_file;
                rights.set_rook_file(color, kingside, file);
            }
            _ => return Err(ChessError::bad_input(format!("invalid castling char '{c}'"))),
        }
    }
    Ok(rights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_round_trips() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn en_passant_field_round_trips() {
        let fen = "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn rejects_malformed_placement() {
        assert!(Position::from_fen("bad fen string here").is_err());
    }

    #[test]
    fn shredder_fen_round_trips_to_file_letters() {
        let fen = "r3k2r/8/8/8/8/8/8/1R2K1R1 w GBgb - 0 1";
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.castle_rights().rook_file(Color::White, true), Some(6));
        assert_eq!(pos.castle_rights().rook_file(Color::White, false), Some(1));
        assert_eq!(pos.to_fen(), fen);
    }

    #[test]
    fn halfmove_and_fullmove_default_when_absent() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/K1k5 w - -").unwrap();
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
    }
}
