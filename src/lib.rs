pub mod bitboard;
pub mod eval;
pub mod logging;
pub mod movegen;
pub mod perft;
pub mod search;
pub mod state;
pub mod time;
pub mod tt;
pub mod zobrist;

pub use search::Engine;
pub use state::{Move, Position};

/// One-time initialisation of the Zobrist keys and leaper attack tables.
/// Idempotent; `Engine::new` calls it as well.
pub fn init_all() {
    zobrist::init_zobrist();
    movegen::init_move_tables();
}
