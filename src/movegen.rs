#![allow(non_upper_case_globals)]
use crate::bitboard::{self, Bitboard};
use crate::state::{
    enemy_of, file_of, make_piece, rank_of, Move, Position, BISHOP, BOTH, KING, KNIGHT,
    MF_CAPTURE, MF_ENPASSANT, MF_KSCASTLE, MF_PROMO, MF_QSCASTLE, NO_EP, PAWN, QUEEN, ROOK, WHITE,
};
use std::sync::OnceLock;

// --- LEAPER TABLES ---
static KNIGHT_TABLE: OnceLock<[Bitboard; 64]> = OnceLock::new();
static KING_TABLE: OnceLock<[Bitboard; 64]> = OnceLock::new();

pub fn init_move_tables() {
    knight_table();
    king_table();
}

fn knight_table() -> &'static [Bitboard; 64] {
    KNIGHT_TABLE.get_or_init(|| {
        let mut table = [Bitboard(0); 64];
        for (square, entry) in table.iter_mut().enumerate() {
            *entry = bitboard::mask_knight_attacks(square as u8);
        }
        table
    })
}

fn king_table() -> &'static [Bitboard; 64] {
    KING_TABLE.get_or_init(|| {
        let mut table = [Bitboard(0); 64];
        for (square, entry) in table.iter_mut().enumerate() {
            *entry = bitboard::mask_king_attacks(square as u8);
        }
        table
    })
}

#[inline(always)]
pub fn get_knight_attacks(sq: u8) -> Bitboard {
    knight_table()[sq as usize]
}

#[inline(always)]
pub fn get_king_attacks(sq: u8) -> Bitboard {
    king_table()[sq as usize]
}

// --- MOVE LIST ---

#[derive(Clone, Copy)]
pub struct MoveList {
    pub moves: [Move; 256],
    pub count: usize,
}

impl MoveList {
    pub fn new() -> Self {
        Self {
            moves: [Move::new(0, 0, 0, 0); 256],
            count: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, m: Move) {
        if self.count < 256 {
            self.moves[self.count] = m;
            self.count += 1;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.moves[..self.count].iter()
    }
}

impl Default for MoveList {
    fn default() -> Self {
        MoveList::new()
    }
}

pub struct MoveGenerator {
    pub list: MoveList,
}

impl MoveGenerator {
    pub fn new() -> Self {
        Self {
            list: MoveList::new(),
        }
    }

    #[inline(always)]
    fn add_move(&mut self, source: u8, target: u8, promotion: usize, flags: u32) {
        self.list.push(Move::new(source, target, promotion, flags));
    }

    #[inline(always)]
    fn add_promotions(&mut self, source: u8, target: u8, flags: u32) {
        self.add_move(source, target, QUEEN, flags | MF_PROMO);
        self.add_move(source, target, ROOK, flags | MF_PROMO);
        self.add_move(source, target, BISHOP, flags | MF_PROMO);
        self.add_move(source, target, KNIGHT, flags | MF_PROMO);
    }

    /// Pseudo-legal generation for the side to move. In captures-only mode
    /// quiet moves, quiet promotions and castles are suppressed; pawn
    /// captures, capture-promotions and en passant are kept.
    pub fn generate_moves(&mut self, pos: &Position, captures_only: bool) {
        self.list.count = 0;

        let us = pos.side_to_move;
        let them = enemy_of(us);
        let own = pos.occupancies[us];
        let opp = pos.occupancies[them];
        let occ = pos.occupancies[BOTH];

        let pawn_dir: i8 = if us == WHITE { 1 } else { -1 };
        let start_rank: u8 = if us == WHITE { 1 } else { 6 };
        let promo_rank: u8 = if us == WHITE { 6 } else { 1 };
        let ep_rank: u8 = if us == WHITE { 4 } else { 3 };

        // PAWNS
        let mut pawns = pos.bitboards[make_piece(us, PAWN)];
        while pawns.0 != 0 {
            let src = pawns.pop_lsb() as u8;
            let rank = rank_of(src);
            let file = file_of(src);
            let forward_rank = rank as i8 + pawn_dir;
            if !(0..8).contains(&forward_rank) {
                continue;
            }
            let forward = (forward_rank as u8) * 8 + file;

            if !captures_only && !occ.get_bit(forward) {
                if rank == promo_rank {
                    self.add_promotions(src, forward, 0);
                } else {
                    self.add_move(src, forward, 0, 0);
                    if rank == start_rank {
                        let double = (forward as i8 + 8 * pawn_dir) as u8;
                        if !occ.get_bit(double) {
                            self.add_move(src, double, 0, 0);
                        }
                    }
                }
            }

            // Captures and en passant, kept in quiescence too
            for df in [-1i8, 1] {
                let target_file = file as i8 + df;
                if !(0..8).contains(&target_file) {
                    continue;
                }
                let target = (forward_rank as u8) * 8 + target_file as u8;
                if opp.get_bit(target) {
                    if rank == promo_rank {
                        self.add_promotions(src, target, MF_CAPTURE);
                    } else {
                        self.add_move(src, target, 0, MF_CAPTURE);
                    }
                } else if pos.en_passant != NO_EP && pos.en_passant == target && rank == ep_rank {
                    self.add_move(src, target, 0, MF_CAPTURE | MF_ENPASSANT);
                }
            }
        }

        // KNIGHTS
        let mut knights = pos.bitboards[make_piece(us, KNIGHT)];
        while knights.0 != 0 {
            let src = knights.pop_lsb() as u8;
            let targets = if captures_only {
                get_knight_attacks(src) & opp
            } else {
                get_knight_attacks(src) & !own
            };
            self.push_piece_moves(src, targets, opp);
        }

        // BISHOPS
        let mut bishops = pos.bitboards[make_piece(us, BISHOP)];
        while bishops.0 != 0 {
            let src = bishops.pop_lsb() as u8;
            let attacks = bitboard::get_bishop_attacks(src, occ);
            let targets = if captures_only { attacks & opp } else { attacks & !own };
            self.push_piece_moves(src, targets, opp);
        }

        // ROOKS
        let mut rooks = pos.bitboards[make_piece(us, ROOK)];
        while rooks.0 != 0 {
            let src = rooks.pop_lsb() as u8;
            let attacks = bitboard::get_rook_attacks(src, occ);
            let targets = if captures_only { attacks & opp } else { attacks & !own };
            self.push_piece_moves(src, targets, opp);
        }

        // QUEENS
        let mut queens = pos.bitboards[make_piece(us, QUEEN)];
        while queens.0 != 0 {
            let src = queens.pop_lsb() as u8;
            let attacks = bitboard::get_queen_attacks(src, occ);
            let targets = if captures_only { attacks & opp } else { attacks & !own };
            self.push_piece_moves(src, targets, opp);
        }

        // KING
        let king = pos.bitboards[make_piece(us, KING)];
        if king.0 != 0 {
            let src = king.get_lsb_index() as u8;
            let attacks = get_king_attacks(src);
            let targets = if captures_only { attacks & opp } else { attacks & !own };
            self.push_piece_moves(src, targets, opp);

            if !captures_only {
                self.generate_castles(pos, src, us, them, occ);
            }
        }
    }

    #[inline(always)]
    fn push_piece_moves(&mut self, src: u8, mut targets: Bitboard, opp: Bitboard) {
        while targets.0 != 0 {
            let t = targets.pop_lsb() as u8;
            let flags = if opp.get_bit(t) { MF_CAPTURE } else { 0 };
            self.add_move(src, t, 0, flags);
        }
    }

    /// Requires the right, empty transit squares, and that neither the
    /// king's square, the transit square, nor the destination is attacked.
    fn generate_castles(&mut self, pos: &Position, king_sq: u8, us: usize, them: usize, occ: Bitboard) {
        use crate::state::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ};
        if us == WHITE {
            if pos.castling_rights & CASTLE_WK != 0
                && !occ.get_bit(5)
                && !occ.get_bit(6)
                && !is_square_attacked(pos, king_sq, them)
                && !is_square_attacked(pos, 5, them)
                && !is_square_attacked(pos, 6, them)
            {
                self.add_move(king_sq, 6, 0, MF_KSCASTLE);
            }
            if pos.castling_rights & CASTLE_WQ != 0
                && !occ.get_bit(1)
                && !occ.get_bit(2)
                && !occ.get_bit(3)
                && !is_square_attacked(pos, king_sq, them)
                && !is_square_attacked(pos, 3, them)
                && !is_square_attacked(pos, 2, them)
            {
                self.add_move(king_sq, 2, 0, MF_QSCASTLE);
            }
        } else {
            if pos.castling_rights & CASTLE_BK != 0
                && !occ.get_bit(61)
                && !occ.get_bit(62)
                && !is_square_attacked(pos, king_sq, them)
                && !is_square_attacked(pos, 61, them)
                && !is_square_attacked(pos, 62, them)
            {
                self.add_move(king_sq, 62, 0, MF_KSCASTLE);
            }
            if pos.castling_rights & CASTLE_BQ != 0
                && !occ.get_bit(57)
                && !occ.get_bit(58)
                && !occ.get_bit(59)
                && !is_square_attacked(pos, king_sq, them)
                && !is_square_attacked(pos, 59, them)
                && !is_square_attacked(pos, 58, them)
            {
                self.add_move(king_sq, 58, 0, MF_QSCASTLE);
            }
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        MoveGenerator::new()
    }
}

/// True iff `by` attacks `sq`. Checks pawns, knights, king, then the two
/// slider families; any hit short-circuits.
pub fn is_square_attacked(pos: &Position, sq: u8, by: usize) -> bool {
    if bitboard::pawn_attacks(pos.bitboards[make_piece(by, PAWN)], by).get_bit(sq) {
        return true;
    }

    if (get_knight_attacks(sq) & pos.bitboards[make_piece(by, KNIGHT)]).0 != 0 {
        return true;
    }
    if (get_king_attacks(sq) & pos.bitboards[make_piece(by, KING)]).0 != 0 {
        return true;
    }

    let occ = pos.occupancies[BOTH];
    let diag = pos.bitboards[make_piece(by, BISHOP)] | pos.bitboards[make_piece(by, QUEEN)];
    if (bitboard::get_bishop_attacks(sq, occ) & diag).0 != 0 {
        return true;
    }
    let ortho = pos.bitboards[make_piece(by, ROOK)] | pos.bitboards[make_piece(by, QUEEN)];
    if (bitboard::get_rook_attacks(sq, occ) & ortho).0 != 0 {
        return true;
    }

    false
}

pub fn in_check(pos: &Position, side: usize) -> bool {
    match pos.king_square(side) {
        Some(king_sq) => is_square_attacked(pos, king_sq, enemy_of(side)),
        None => false,
    }
}
