//! Reference move policies
//!
//! | Policy           | Behaviour                                            |
//! |------------------|------------------------------------------------------|
//! | [`RandomPolicy`] | uniform over the candidates                          |
//! | [`GreedyPolicy`] | biggest capture, then promotion, then check, else first |
//!
//! Neither searches ahead. They exist so AI players can be wired up and
//! exercised end to end; stronger strategies plug in through
//! [`MovePolicy`].

use super::{CandidateMove, MovePolicy};
use crate::game::components::GameState;
use crate::game::types::Cell;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Picks a uniformly random candidate
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible policy for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl MovePolicy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn select_move(
        &mut self,
        _state: &GameState,
        candidates: &[CandidateMove],
    ) -> Option<(Cell, Cell)> {
        candidates
            .choose(&mut self.rng)
            .map(|candidate| (candidate.from, candidate.to))
    }
}

/// Takes the most valuable piece it can, preferring promotions and checks
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    fn score(candidate: &CandidateMove) -> i32 {
        let mut score = candidate.material_gain() * 100;
        if candidate.promotes {
            score += 800;
        }
        if candidate.gives_check {
            score += 50;
        }
        score
    }
}

impl MovePolicy for GreedyPolicy {
    fn name(&self) -> &str {
        "greedy"
    }

    fn select_move(
        &mut self,
        _state: &GameState,
        candidates: &[CandidateMove],
    ) -> Option<(Cell, Cell)> {
        // First candidate wins ties so the choice is deterministic
        let mut best: Option<(&CandidateMove, i32)> = None;
        for candidate in candidates {
            let score = Self::score(candidate);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }
        best.map(|(candidate, _)| (candidate.from, candidate.to))
    }
}
