//! Position representation (spec.md §3.4, C3): the board, its incremental
//! attack map, layered history, and per-color legal-move memoization.

use super::layer::{History, Layer};
use super::tables::DIRS;
use super::types::{CastleRights, Color, Move, MoveList, Piece, PieceKind, Square, Status};

/// A chess position: board, metadata, layered undo history, and a
/// per-color legal-move cache.
///
/// Direct mutation outside `apply`/`revert` (`set_piece`/`clear_piece`) is
/// only well-defined before any legal-move query has been made — this
/// crate's adopted answer to spec.md §9's Open Question on construction.
/// Use [`crate::board::BoardBuilder`] or [`Position::from_fen`] to
/// assemble a position rather than poking one mid-game.
#[derive(Clone)]
pub struct Position {
    pub(crate) history: History,
    /// Legal moves for `[White, Black]`, memoized and invalidated on
    /// every mutation (spec.md §3.4, §9).
    pub(crate) move_cache: [Option<MoveList>; 2],
    pub(crate) last_repetition_count: u32,
}

impl Position {
    /// An empty board, white to move, no castling rights: the building
    /// block for `BoardBuilder` and `from_fen`.
    #[must_use]
    pub fn empty() -> Self {
        Position {
            history: History::new(Layer::empty()),
            move_cache: [None, None],
            last_repetition_count: 0,
        }
    }

    /// The standard chess starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut pos = Position::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            pos.set_piece(Square::new(file, 0), Piece::new(kind, Color::White));
            pos.set_piece(Square::new(file, 7), Piece::new(kind, Color::Black));
            pos.set_piece(Square::new(file, 1), Piece::new(PieceKind::Pawn, Color::White));
            pos.set_piece(Square::new(file, 6), Piece::new(PieceKind::Pawn, Color::Black));
        }
        let mut castles = CastleRights::none();
        castles.set_rook_file(Color::White, true, 7);
        castles.set_rook_file(Color::White, false, 0);
        castles.set_rook_file(Color::Black, true, 7);
        castles.set_rook_file(Color::Black, false, 0);
        pos.history.current_mut().castles = castles;
        let hash = pos.hash_key();
        pos.history.put_hash(&hash);
        pos
    }

    #[inline]
    pub(crate) fn board(&self) -> &[Option<Piece>; 128] {
        &self.history.current().board
    }

    #[inline]
    pub(crate) fn piece_list(&self) -> &[Square] {
        &self.history.current().piece_list
    }

    #[must_use]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board()[sq.index() as usize]
    }

    #[must_use]
    pub fn turn(&self) -> Color {
        self.history.current().turn
    }

    pub(crate) fn set_turn(&mut self, color: Color) {
        self.history.current_mut().turn = color;
    }

    #[must_use]
    pub fn en_passant(&self) -> Square {
        self.history.current().ep
    }

    pub(crate) fn set_en_passant(&mut self, sq: Square) {
        self.history.current_mut().ep = sq;
    }

    #[must_use]
    pub fn castle_rights(&self) -> CastleRights {
        self.history.current().castles
    }

    pub(crate) fn set_castle_rights(&mut self, rights: CastleRights) {
        self.history.current_mut().castles = rights;
    }

    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.history.current().clock
    }

    pub(crate) fn set_halfmove_clock(&mut self, clock: u32) {
        self.history.current_mut().clock = clock;
    }

    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.history.current().move_num
    }

    pub(crate) fn set_fullmove_number(&mut self, n: u32) {
        self.history.current_mut().move_num = n;
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.history.current().status
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.history.current_mut().status = status;
    }

    /// `is_attacked(sq, by_color)` in O(1) via the incremental attack map.
    #[must_use]
    pub fn is_attacked(&self, sq: Square, by_color: Color) -> bool {
        self.history.current().attacks.is_attacked(sq, by_color)
    }

    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.piece_list().iter().copied().find(|&sq| {
            self.piece_at(sq)
                .map(|p| p.kind() == PieceKind::King && p.color() == color)
                .unwrap_or(false)
        })
    }

    /// Whether `color`'s king is currently attacked.
    #[must_use]
    pub fn king_in_danger(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(sq) => self.is_attacked(sq, color.opponent()),
            None => false,
        }
    }

    /// Place `piece` on `sq`, maintaining the piece list and attack map.
    ///
    /// See the struct doc comment for when direct mutation like this is
    /// safe to call.
    pub fn set_piece(&mut self, sq: Square, piece: Piece) {
        self.clear_piece(sq);
        #[cfg(feature = "logging")]
        log::trace!("set_piece {sq} <- {piece:?}");
        let layer = self.history.current_mut();
        layer.board[sq.index() as usize] = Some(piece);
        layer.piece_list.push(sq);
        layer.attacks.add_piece(&layer.board, sq, piece);
        self.invalidate_cache();
    }

    /// Remove whatever piece sits on `sq`, if any.
    pub fn clear_piece(&mut self, sq: Square) {
        let layer = self.history.current_mut();
        if let Some(piece) = layer.board[sq.index() as usize] {
            layer.attacks.remove_piece(&layer.board, sq, piece);
            layer.board[sq.index() as usize] = None;
            layer.piece_list.retain(|&s| s != sq);
            self.invalidate_cache();
        }
    }

    pub(crate) fn invalidate_cache(&mut self) {
        self.move_cache = [None, None];
    }

    pub(crate) fn save(&mut self) {
        self.history.save();
    }

    pub(crate) fn restore(&mut self) {
        self.history.restore();
        self.invalidate_cache();
    }

    pub(crate) fn put_hash(&mut self, hash: &str) -> u32 {
        let count = self.history.put_hash(hash);
        self.last_repetition_count = count;
        count
    }

    pub(crate) fn remove_hash(&mut self, hash: &str) {
        self.history.remove_hash(hash);
    }

    /// Occurrence count of the current position's hash, as last recorded
    /// by `apply` (spec.md §4.4, §4.6 — see `ChessError` module docs for
    /// why this is read, not recomputed, by the outcome classifier).
    #[must_use]
    pub(crate) fn last_repetition_count(&self) -> u32 {
        self.last_repetition_count
    }

    /// The 8 principal 0x88 deltas the move generator and attack map share.
    pub(crate) fn directions() -> &'static [i8; 8] {
        &DIRS
    }

    /// All legal moves for the current side to move (memoized; spec.md
    /// §3.4, §9). The returned list is a defensive copy the caller may
    /// freely iterate while mutating the position further.
    pub fn legal_moves(&mut self) -> MoveList {
        let idx = self.turn().bit();
        if self.move_cache[idx].is_none() {
            let moves = super::movegen::generate_legal_moves(self);
            self.move_cache[idx] = Some(moves);
        }
        self.move_cache[idx].clone().unwrap()
    }

    /// Format every legal move in the current position as SAN.
    pub fn san_list(&mut self) -> Vec<String> {
        let moves = self.legal_moves();
        moves.iter().map(|mv| self.move_to_san(mv, &moves)).collect()
    }

    /// Apply `mv`, returning the updated game status (spec.md §4.4 fused
    /// with §4.6: the classifier reads the repetition count `apply`
    /// itself just recorded, rather than recomputing it).
    pub fn apply(&mut self, mv: &Move) -> Status {
        super::make_unmake::apply(self, mv)
    }

    /// Undo `mv`, restoring the position to exactly what it was before
    /// `apply` (spec.md §4.5).
    pub fn revert(&mut self, mv: &Move) {
        super::make_unmake::revert(self, mv);
    }

    /// Count leaf nodes at `depth` plies (spec.md §8 S7, the perft oracle).
    pub fn perft(&mut self, depth: u32) -> u64 {
        super::perft::perft(self, depth)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}
