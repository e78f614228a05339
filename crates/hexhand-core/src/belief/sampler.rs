//! Hand sampling for determinized search in the decision layer.

use super::set::BeliefSet;
use crate::model::vector::ResourceVector;
use rand::Rng;
use rand::seq::SliceRandom;

/// Draws concrete hands uniformly from a [`BeliefSet`].
#[derive(Debug, Default)]
pub struct HandSampler;

impl HandSampler {
    pub fn sample_hand<R: Rng + ?Sized>(beliefs: &BeliefSet, rng: &mut R) -> ResourceVector {
        beliefs
            .as_slice()
            .choose(rng)
            .copied()
            .unwrap_or(ResourceVector::ZERO)
    }

    /// Draws `count` hands with replacement.
    pub fn sample_hands<R: Rng + ?Sized>(
        beliefs: &BeliefSet,
        count: usize,
        rng: &mut R,
    ) -> Vec<ResourceVector> {
        (0..count)
            .map(|_| Self::sample_hand(beliefs, rng))
            .collect()
    }
}
