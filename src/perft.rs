// src/perft.rs
//
// Legal-move tree counts for validating the generator and make/unmake
// against published node totals.

use crate::movegen::{in_check, MoveGenerator};
use crate::state::Position;
use std::time::Instant;

pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    let mut generator = MoveGenerator::new();
    generator.generate_moves(pos, false);

    for i in 0..generator.list.count {
        let mv = generator.list.moves[i];
        let mover = pos.side_to_move;
        let undo = pos.make_move(mv);
        if !in_check(pos, mover) {
            nodes += perft(pos, depth - 1);
        }
        pos.unmake_move(&undo);
    }
    nodes
}

/// Per-root-move node counts, for pinpointing generator bugs.
pub fn perft_divide(pos: &mut Position, depth: u32) -> u64 {
    let mut total = 0;
    let mut generator = MoveGenerator::new();
    generator.generate_moves(pos, false);

    for i in 0..generator.list.count {
        let mv = generator.list.moves[i];
        let mover = pos.side_to_move;
        let undo = pos.make_move(mv);
        if !in_check(pos, mover) {
            let count = perft(pos, depth - 1);
            log::info!("{}: {}", mv, count);
            total += count;
        }
        pos.unmake_move(&undo);
    }
    log::info!("total: {}", total);
    total
}

pub fn run_perft_suite() {
    crate::init_all();
    crate::logging::init_logging();
    let mut pos = Position::startpos();
    let expected: [u64; 6] = [1, 20, 400, 8902, 197281, 4865609];

    for (depth, want) in expected.iter().enumerate() {
        let start = Instant::now();
        let nodes = perft(&mut pos, depth as u32);
        log::info!(
            "perft({}) = {} ({}ms) {}",
            depth,
            nodes,
            start.elapsed().as_millis(),
            if nodes == *want { "ok" } else { "MISMATCH" }
        );
    }
}
