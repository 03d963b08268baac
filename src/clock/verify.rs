//! Solvability checks for generated scrambles.

use std::ops::Range;

use rayon::prelude::*;
use tracing::warn;

use super::puzzle::RubiksClock;
use super::scramble::{play_forward, Move};
use crate::config::PuzzleConfig;
use crate::error::Result;
use crate::host::{BombInfo, NoopHooks};
use crate::state::PuzzleState;

/// Play every move forward from `start`, in solve order.
pub fn replay_solution(start: &PuzzleState, moves: &[Move]) -> PuzzleState {
    let mut state = start.clone();
    for m in moves {
        play_forward(&mut state, &m.physical());
    }
    state
}

/// Whether the moves lead from `start` to the solved state, passing through
/// every recorded snapshot on the way.
pub fn verify_scramble(start: &PuzzleState, moves: &[Move]) -> bool {
    let mut state = start.clone();
    for m in moves {
        if !state.matches(&m.clocks_at_start, &m.pins_at_start) {
            return false;
        }
        play_forward(&mut state, &m.physical());
    }
    state.is_solved()
}

/// Generate one puzzle per seed on a thread pool and return the seeds whose
/// hints do not solve it. An empty result means every scramble checked out.
pub fn verify_seeds(
    seeds: Range<u64>,
    info: &BombInfo,
    config: &PuzzleConfig,
    num_threads: u8,
) -> Result<Vec<u64>> {
    let num_threads = if num_threads == 0 {
        1
    } else {
        num_threads as usize
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?;

    let outcomes: Vec<Option<u64>> = pool.install(|| {
        seeds
            .into_par_iter()
            .map(|seed| -> Result<Option<u64>> {
                let config = PuzzleConfig {
                    seed: Some(seed),
                    ..config.clone()
                };
                let puzzle = RubiksClock::new(0, info, &config, Box::new(NoopHooks))?;
                if verify_scramble(puzzle.state(), puzzle.moves()) {
                    Ok(None)
                } else {
                    warn!(seed, "scramble does not replay to the solved state");
                    Ok(Some(seed))
                }
            })
            .collect::<Result<Vec<_>>>()
    })?;

    let mut failures: Vec<u64> = outcomes.into_iter().flatten().collect();
    failures.sort_unstable();
    Ok(failures)
}
