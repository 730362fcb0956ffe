// src/zobrist.rs
//
// Deterministic 64-bit keys for every (colour, piece-type, square), each
// castling-rights mask, each en-passant file, and the side-to-move toggle.
// A fixed seed keeps hashes stable across runs, which matters for tests.

use std::sync::OnceLock;

static PIECE_KEYS: OnceLock<[[[u64; 64]; 6]; 2]> = OnceLock::new();
static CASTLING_KEYS: OnceLock<[u64; 16]> = OnceLock::new();
static EN_PASSANT_KEYS: OnceLock<[u64; 8]> = OnceLock::new();
static SIDE_KEY: OnceLock<u64> = OnceLock::new();

// Simple xorshift PRNG local to this module
struct Prng {
    state: u64,
}

impl Prng {
    fn new(seed: u64) -> Self {
        Prng { state: seed }
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 7;
        x ^= x >> 9;
        self.state = x;
        x
    }
}

const ZOBRIST_SEED: u64 = 88172645463393265;

pub fn init_zobrist() {
    piece_keys();
    castling_keys();
    en_passant_keys();
    side_key();
}

fn piece_keys() -> &'static [[[u64; 64]; 6]; 2] {
    PIECE_KEYS.get_or_init(|| {
        let mut rng = Prng::new(ZOBRIST_SEED);
        let mut keys = [[[0u64; 64]; 6]; 2];
        for colour in keys.iter_mut() {
            for piece in colour.iter_mut() {
                for sq in piece.iter_mut() {
                    *sq = rng.next_u64();
                }
            }
        }
        keys
    })
}

fn castling_keys() -> &'static [u64; 16] {
    CASTLING_KEYS.get_or_init(|| {
        // Continue the same stream: skip the piece keys ahead of us.
        let mut rng = Prng::new(ZOBRIST_SEED);
        for _ in 0..2 * 6 * 64 {
            rng.next_u64();
        }
        let mut keys = [0u64; 16];
        for key in keys.iter_mut() {
            *key = rng.next_u64();
        }
        keys
    })
}

fn en_passant_keys() -> &'static [u64; 8] {
    EN_PASSANT_KEYS.get_or_init(|| {
        let mut rng = Prng::new(ZOBRIST_SEED);
        for _ in 0..2 * 6 * 64 + 16 {
            rng.next_u64();
        }
        let mut keys = [0u64; 8];
        for key in keys.iter_mut() {
            *key = rng.next_u64();
        }
        keys
    })
}

// --- ACCESSORS ---

#[inline(always)]
pub fn piece_key(colour: usize, piece_type: usize, sq: usize) -> u64 {
    piece_keys()[colour][piece_type][sq]
}

#[inline(always)]
pub fn castling_key(rights: u8) -> u64 {
    castling_keys()[(rights & 15) as usize]
}

#[inline(always)]
pub fn en_passant_key(file: u8) -> u64 {
    en_passant_keys()[file as usize]
}

#[inline(always)]
pub fn side_key() -> u64 {
    *SIDE_KEY.get_or_init(|| {
        let mut rng = Prng::new(ZOBRIST_SEED);
        for _ in 0..2 * 6 * 64 + 16 + 8 {
            rng.next_u64();
        }
        rng.next_u64()
    })
}
