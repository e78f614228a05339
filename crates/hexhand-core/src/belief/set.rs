//! The deduplicated hypothesis set held for one opponent.

use crate::config::DEFAULT_MAX_HYPOTHESES;
use crate::model::vector::ResourceVector;
use std::collections::HashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Insertion-ordered hypotheses with O(1) duplicate rejection.
#[derive(Debug, Clone, Default)]
pub(crate) struct Hypotheses {
    order: Vec<ResourceVector>,
    seen: HashSet<ResourceVector>,
}

impl Hypotheses {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            order: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    pub(crate) fn insert_if_new(&mut self, hypothesis: ResourceVector) -> bool {
        if !self.seen.insert(hypothesis) {
            return false;
        }
        self.order.push(hypothesis);
        true
    }

    /// Inserts the feasible candidates; `None` marks an infeasible one.
    pub(crate) fn extend_feasible<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = Option<ResourceVector>>,
    {
        for candidate in candidates.into_iter().flatten() {
            self.insert_if_new(candidate);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn canonical() -> Self {
        let mut hypotheses = Self::with_capacity(1);
        hypotheses.insert_if_new(ResourceVector::ZERO);
        hypotheses
    }
}

/// Result of swapping a freshly computed hypothesis set into place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The new set replaced the old one.
    Applied { size: usize },
    /// The new set exceeded the cap; the belief fell back to the empty hand.
    Overflow { attempted: usize },
    /// Every hypothesis was ruled out; the previous set was kept.
    Exhausted,
}

impl CommitOutcome {
    pub const fn as_str(self) -> &'static str {
        match self {
            CommitOutcome::Applied { .. } => "applied",
            CommitOutcome::Overflow { .. } => "overflow",
            CommitOutcome::Exhausted => "exhausted",
        }
    }
}

/// Every resource hand still considered possible for one opponent.
///
/// Never empty and never larger than its cap. Updates build a new set from the
/// current one and swap it in through [`BeliefSet::commit`].
#[derive(Debug, Clone)]
pub struct BeliefSet {
    hypotheses: Hypotheses,
    max_hypotheses: usize,
}

impl Default for BeliefSet {
    fn default() -> Self {
        Self::new()
    }
}

impl BeliefSet {
    /// Creates the canonical set `{[0,0,0,0,0]}` with the default cap.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_MAX_HYPOTHESES)
    }

    pub fn with_limit(max_hypotheses: usize) -> Self {
        Self {
            hypotheses: Hypotheses::canonical(),
            max_hypotheses: max_hypotheses.max(1),
        }
    }

    /// Builds a set from explicit hypotheses, deduplicating them.
    ///
    /// An empty or oversized input yields the canonical set.
    pub fn from_hypotheses<I>(hypotheses: I) -> Self
    where
        I: IntoIterator<Item = ResourceVector>,
    {
        let mut set = Self::new();
        let mut next = Hypotheses::default();
        for hypothesis in hypotheses {
            next.insert_if_new(hypothesis);
        }
        if !next.is_empty() {
            set.commit(next);
        }
        set
    }

    /// Replaces the cap, resetting the set if it already exceeds the new one.
    pub fn set_limit(&mut self, max_hypotheses: usize) {
        self.max_hypotheses = max_hypotheses.max(1);
        self.enforce_limit();
    }

    pub fn reset(&mut self) {
        self.hypotheses = Hypotheses::canonical();
    }

    /// Adds `hypothesis` unless an equal one is present. Returns whether it was added.
    pub fn insert_if_new(&mut self, hypothesis: ResourceVector) -> bool {
        let inserted = self.hypotheses.insert_if_new(hypothesis);
        self.enforce_limit();
        inserted
    }

    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    /// Always false; kept for API symmetry with [`BeliefSet::len`].
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    pub fn max_hypotheses(&self) -> usize {
        self.max_hypotheses
    }

    pub fn contains(&self, hypothesis: &ResourceVector) -> bool {
        self.hypotheses.seen.contains(hypothesis)
    }

    pub fn is_canonical(&self) -> bool {
        self.len() == 1 && self.hypotheses.order[0].is_zero()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceVector> {
        self.hypotheses.order.iter()
    }

    pub fn as_slice(&self) -> &[ResourceVector] {
        &self.hypotheses.order
    }

    /// Owned copy for callers that need the hypotheses beyond the next update.
    pub fn snapshot(&self) -> Vec<ResourceVector> {
        self.hypotheses.order.clone()
    }

    /// Order-independent digest of the set, for logs and change detection.
    pub fn summary_hash(&self) -> u64 {
        let combined = self.iter().fold(0u64, |acc, hypothesis| {
            let mut hasher = DefaultHasher::new();
            hypothesis.hash(&mut hasher);
            acc ^ hasher.finish()
        });
        let mut hasher = DefaultHasher::new();
        combined.hash(&mut hasher);
        self.len().hash(&mut hasher);
        hasher.finish()
    }

    /// Resets an oversized set before the next update builds on it.
    pub(crate) fn enforce_limit(&mut self) -> bool {
        if self.len() <= self.max_hypotheses {
            return false;
        }
        tracing::warn!(
            target: "hexhand_core::belief",
            size = self.len(),
            cap = self.max_hypotheses,
            "hypothesis cap exceeded; resetting to empty hand"
        );
        self.reset();
        true
    }

    /// Swaps `next` in, guarding against an empty or oversized result.
    pub(crate) fn commit(&mut self, next: Hypotheses) -> CommitOutcome {
        if next.is_empty() {
            tracing::debug!(
                target: "hexhand_core::belief",
                size = self.len(),
                "update ruled out every hypothesis; keeping previous set"
            );
            return CommitOutcome::Exhausted;
        }
        if next.len() > self.max_hypotheses {
            let attempted = next.len();
            tracing::warn!(
                target: "hexhand_core::belief",
                attempted,
                cap = self.max_hypotheses,
                "hypothesis cap exceeded; resetting to empty hand"
            );
            self.reset();
            return CommitOutcome::Overflow { attempted };
        }
        self.hypotheses = next;
        tracing::trace!(
            target: "hexhand_core::belief",
            size = self.len(),
            "committed hypothesis set"
        );
        CommitOutcome::Applied { size: self.len() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_set_is_canonical() {
        let set = BeliefSet::new();
        assert!(set.is_canonical());
        assert_eq!(set.snapshot(), vec![ResourceVector::ZERO]);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut set = BeliefSet::from_hypotheses([ResourceVector::CITY, ResourceVector::ROAD]);
        set.reset();
        let once = set.snapshot();
        set.reset();
        assert_eq!(set.snapshot(), once);
        assert!(set.is_canonical());
    }

    #[test]
    fn insert_if_new_rejects_equal_vectors() {
        let mut set = BeliefSet::new();
        assert!(set.insert_if_new(ResourceVector::ROAD));
        assert!(!set.insert_if_new(ResourceVector::new([1, 0, 0, 1, 0])));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insert_past_cap_resets() {
        let mut set = BeliefSet::with_limit(2);
        set.insert_if_new(ResourceVector::ROAD);
        assert_eq!(set.len(), 2);
        set.insert_if_new(ResourceVector::CITY);
        assert!(set.is_canonical());
    }

    #[test]
    fn lowering_the_limit_resets_an_oversized_set() {
        let mut set = BeliefSet::from_hypotheses([ResourceVector::ROAD, ResourceVector::CITY]);
        set.set_limit(5);
        assert_eq!(set.max_hypotheses(), 5);
        assert_eq!(set.len(), 2);
        set.set_limit(1);
        assert!(set.is_canonical());
    }

    #[test]
    fn empty_commit_keeps_previous_set() {
        let mut set = BeliefSet::from_hypotheses([ResourceVector::CITY]);
        let outcome = set.commit(Hypotheses::default());
        assert_eq!(outcome, CommitOutcome::Exhausted);
        assert_eq!(set.snapshot(), vec![ResourceVector::CITY]);
    }

    #[test]
    fn extend_feasible_skips_infeasible_candidates() {
        let mut next = Hypotheses::default();
        next.extend_feasible([
            ResourceVector::CITY.checked_sub(ResourceVector::ROAD),
            Some(ResourceVector::ROAD),
            Some(ResourceVector::ROAD),
        ]);
        assert_eq!(next.len(), 1);
        assert_eq!(next.order, vec![ResourceVector::ROAD]);
    }

    #[test]
    fn oversized_commit_resets() {
        let mut set = BeliefSet::with_limit(1);
        let mut next = Hypotheses::default();
        next.insert_if_new(ResourceVector::ROAD);
        next.insert_if_new(ResourceVector::CITY);
        assert_eq!(set.commit(next), CommitOutcome::Overflow { attempted: 2 });
        assert!(set.is_canonical());
    }

    #[test]
    fn from_hypotheses_deduplicates_and_never_empties() {
        let set = BeliefSet::from_hypotheses([ResourceVector::ROAD, ResourceVector::ROAD]);
        assert_eq!(set.len(), 1);
        let empty = BeliefSet::from_hypotheses(Vec::new());
        assert!(empty.is_canonical());
    }

    #[test]
    fn summary_hash_ignores_insertion_order() {
        let a = BeliefSet::from_hypotheses([ResourceVector::ROAD, ResourceVector::CITY]);
        let b = BeliefSet::from_hypotheses([ResourceVector::CITY, ResourceVector::ROAD]);
        assert_eq!(a.summary_hash(), b.summary_hash());
        assert_ne!(a.summary_hash(), BeliefSet::new().summary_hash());
    }
}
