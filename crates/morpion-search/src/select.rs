//! Policy-weighted move selection.

use morpion_core::{Candidate, CandidateList, Priority};
use rand::Rng;
use tracing::error;

use crate::error::SearchError;
use crate::policy::Policy;

/// Selection weight of `candidate`: `exp(policy)` scaled by its priority class.
///
/// Forced moves keep their full weight, neutral ones are divided by 34 and
/// weak ones by 1000.
#[inline]
pub fn scaled_weight(policy: &Policy, candidate: &Candidate) -> f64 {
    let w = policy.weight(candidate.code);
    match candidate.priority {
        Priority::Weak => w / 1000.0,
        Priority::Neutral => w / 34.0,
        Priority::Forced => w,
    }
}

/// Probability of each candidate under [`select_move`], in list order.
pub fn selection_probabilities(candidates: &CandidateList, policy: &Policy) -> Vec<f64> {
    let total: f64 = candidates.iter().map(|c| scaled_weight(policy, c)).sum();
    candidates
        .iter()
        .map(|c| scaled_weight(policy, c) / total)
        .collect()
}

/// Draw a candidate index with probability proportional to its scaled weight.
///
/// Consumes exactly one `f64` from `rng`. Returns the first index whose
/// cumulative normalized weight reaches the draw.
pub fn select_move<R: Rng>(
    candidates: &CandidateList,
    policy: &Policy,
    rng: &mut R,
) -> Result<usize, SearchError> {
    let total: f64 = candidates.iter().map(|c| scaled_weight(policy, c)).sum();
    let draw: f64 = rng.random();
    let mut cumulative = 0.0;
    for (i, c) in candidates.iter().enumerate() {
        cumulative += scaled_weight(policy, c) / total;
        if cumulative >= draw {
            return Ok(i);
        }
    }

    error!(draw, total, candidates = candidates.len(), "move selection exhausted");
    for (i, c) in candidates.iter().enumerate() {
        error!(
            index = i,
            mv = %c.mv,
            priority = %c.priority,
            code = c.code,
            weight = policy.weight(c.code) / total,
            "candidate"
        );
    }
    Err(SearchError::SelectionExhausted {
        draw,
        candidates: candidates.len(),
        total,
    })
}
