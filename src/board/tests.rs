//! End-to-end scenarios from spec.md §8.

use super::*;

fn apply_san(pos: &mut Position, san: &str) {
    let legal = pos.legal_moves();
    let mv = pos.parse_san(san, &legal).expect("san should be legal");
    pos.apply(&mv);
}

/// S1: after the Ruy Lopez opening through castling, white's king and
/// rook have landed on g1/f1 and the game is still active.
#[test]
fn s1_ruy_lopez_through_castling() {
    let mut pos = Position::new();
    for san in ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6", "O-O"] {
        apply_san(&mut pos, san);
    }
    assert_eq!(pos.status(), Status::Active);
    assert_eq!(
        pos.piece_at(Square::new(6, 0)).map(|p| p.kind()),
        Some(PieceKind::King)
    );
    assert_eq!(
        pos.piece_at(Square::new(5, 0)).map(|p| p.kind()),
        Some(PieceKind::Rook)
    );
}

/// S2: Fool's mate — black delivers checkmate on move 2.
#[test]
fn s2_fools_mate() {
    let mut pos = Position::new();
    for san in ["f3", "e5", "g4", "Qh4"] {
        apply_san(&mut pos, san);
    }
    assert_eq!(pos.status(), Status::Checkmate);
    assert_eq!(pos.turn(), Color::White);
}

/// S3: shuffling kings with no pawn move or capture reaches the fifty-move
/// draw exactly on the hundredth halfmove.
#[test]
fn s3_fifty_move_rule_triggers_at_100_halfmoves() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
    // The pawn on e2 would reset the clock, so keep both kings shuffling
    // on squares that never threaten or block each other.
    let white_moves = ["Kd1", "Kd2", "Ke1", "Ke2"];
    let black_moves = ["Kd8", "Kd7", "Ke8", "Ke7"];
    let mut last_status = Status::Active;
    for halfmove in 0..100 {
        let san = if halfmove % 2 == 0 {
            white_moves[(halfmove / 2) % white_moves.len()]
        } else {
            black_moves[(halfmove / 2) % black_moves.len()]
        };
        let legal = pos.legal_moves();
        let mv = pos.parse_san(san, &legal).expect("shuffle move is legal");
        last_status = pos.apply(&mv);
    }
    assert_eq!(pos.halfmove_clock(), 100);
    assert_eq!(last_status, Status::DrawFiftyMoves);
}

/// S4: a lone king and pawn against a lone king is not insufficient
/// material (a pawn can still promote).
#[test]
fn s4_king_and_pawn_vs_king_is_not_insufficient_material() {
    let mut pos = Position::from_fen("8/8/8/4k3/4P3/4K3/8/8 b - - 0 1").unwrap();
    let legal = pos.legal_moves();
    let mv = legal.get(0).expect("black has a legal move");
    let status = pos.apply(&mv);
    assert_eq!(status, Status::Active);
}

/// S5: lone kings is an immediate insufficient-material draw.
#[test]
fn s5_lone_kings_is_insufficient_material() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    // Insufficient material is only classified by the outcome classifier,
    // which runs after a move; apply a waiting king move to trigger it.
    let mut pos = pos;
    let legal = pos.legal_moves();
    let mv = legal
        .iter()
        .find(|m| m.what.kind() == PieceKind::King)
        .copied()
        .unwrap();
    let status = pos.apply(&mv);
    assert_eq!(status, Status::DrawNoMaterial);
}

/// S6: an en-passant capture removes the captured pawn and clears the ep
/// field.
#[test]
fn s6_en_passant_capture() {
    let mut pos = Position::from_fen(
        "rnbqkbnr/ppp2ppp/8/3pp3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq d6 0 3",
    )
    .unwrap();
    apply_san(&mut pos, "exd5");
    assert_eq!(
        pos.piece_at(Square::new(3, 4)).map(|p| p.kind()),
        Some(PieceKind::Pawn)
    );
    assert!(pos.piece_at(Square::new(3, 4)).map(|p| p.color()) == Some(Color::White));
    assert_eq!(pos.en_passant(), Square::NONE);
}

/// S7: perft from the standard start at depth 4 is the well-known oracle
/// value.
#[test]
fn s7_perft_depth_4_standard_start() {
    let mut pos = Position::new();
    assert_eq!(pos.perft(4), 197_281);
}

/// S8: Chess960 queenside castling with the rook starting on a1.
#[test]
fn s8_chess960_queenside_castle() {
    let pos = BoardBuilder::new()
        .piece(Square::new(1, 0), Piece::new(PieceKind::King, Color::White))
        .piece(Square::new(0, 0), Piece::new(PieceKind::Rook, Color::White))
        .piece(Square::new(7, 0), Piece::new(PieceKind::Rook, Color::White))
        .piece(Square::new(1, 7), Piece::new(PieceKind::King, Color::Black))
        .piece(Square::new(0, 7), Piece::new(PieceKind::Rook, Color::Black))
        .piece(Square::new(7, 7), Piece::new(PieceKind::Rook, Color::Black))
        .castle_rook_file(Color::White, true, 7)
        .castle_rook_file(Color::White, false, 0)
        .castle_rook_file(Color::Black, true, 7)
        .castle_rook_file(Color::Black, false, 0);
    let mut pos = pos.build();
    let legal = pos.legal_moves();
    let castle = legal
        .iter()
        .find(|m| m.is_castle() && !m.is_castle_kingside())
        .copied()
        .expect("queenside castle is legal");
    pos.apply(&castle);
    assert_eq!(pos.piece_at(Square::new(2, 0)).map(|p| p.kind()), Some(PieceKind::King));
    assert_eq!(pos.piece_at(Square::new(3, 0)).map(|p| p.kind()), Some(PieceKind::Rook));
}

#[test]
fn threefold_repetition_triggers_on_third_occurrence() {
    let mut pos = Position::new();
    let mut last_status = Status::Active;
    for _ in 0..2 {
        for san in ["Nf3", "Nf6", "Ng1", "Ng8"] {
            let legal = pos.legal_moves();
            let mv = pos.parse_san(san, &legal).unwrap();
            last_status = pos.apply(&mv);
        }
    }
    assert_eq!(last_status, Status::DrawRepetition);
}

#[test]
fn castling_rejected_while_in_check() {
    let mut pos = Position::from_fen("r3k2r/4r3/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let legal = pos.legal_moves();
    assert!(!legal.iter().any(|m| m.is_castle()));
}

#[test]
fn castling_rejected_through_attacked_square() {
    let mut pos = Position::from_fen("r3k2r/5r2/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let legal = pos.legal_moves();
    assert!(!legal.iter().any(|m| m.is_castle() && m.is_castle_kingside()));
}

#[test]
fn apply_then_revert_is_a_no_op_on_the_fen() {
    let mut pos = Position::new();
    let before = pos.to_fen();
    let legal = pos.legal_moves();
    for mv in legal.iter() {
        pos.apply(mv);
        pos.revert(mv);
        assert_eq!(pos.to_fen(), before);
    }
}

#[test]
fn san_round_trips_through_parse_and_render() {
    let mut pos = Position::new();
    let legal = pos.legal_moves();
    for mv in legal.iter() {
        let san = pos.move_to_san(mv, &legal);
        let parsed = pos.parse_san(&san, &legal).unwrap();
        assert_eq!(&parsed, mv);
    }
}

#[test]
fn fen_round_trips_through_parse_and_render() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    ];
    for fen in fens {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen);
    }
}
