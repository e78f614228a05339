//! Event-driven transformations of a [`BeliefSet`].

use super::set::{BeliefSet, CommitOutcome, Hypotheses};
use super::split::SplitGenerator;
use crate::config::TrackerConfig;
use crate::model::resource::ResourceCategory;
use crate::model::vector::{Direction, ResourceVector};

/// Applies public game events to the hypotheses of one opponent.
#[derive(Debug, Clone)]
pub struct UpdateEngine {
    beliefs: BeliefSet,
    unit_splits: [ResourceVector; ResourceCategory::COUNT],
    discard_threshold: u32,
}

impl Default for UpdateEngine {
    fn default() -> Self {
        Self::new(&TrackerConfig::default())
    }
}

impl UpdateEngine {
    pub fn new(config: &TrackerConfig) -> Self {
        Self::with_beliefs(config, BeliefSet::with_limit(config.max_hypotheses))
    }

    /// Starts from `beliefs`, capped at the configured limit.
    pub fn with_beliefs(config: &TrackerConfig, mut beliefs: BeliefSet) -> Self {
        beliefs.set_limit(config.max_hypotheses);
        Self {
            beliefs,
            unit_splits: SplitGenerator::unit_splits(),
            discard_threshold: config.discard_threshold,
        }
    }

    pub fn beliefs(&self) -> &BeliefSet {
        &self.beliefs
    }

    /// Adds produced resources to every hypothesis.
    ///
    /// A hypothesis pushed above the discard threshold is replaced by every
    /// hand reachable by shedding half of it (rounded down).
    pub fn apply_known_production(
        &mut self,
        category: ResourceCategory,
        amount: u8,
    ) -> CommitOutcome {
        let threshold = self.discard_threshold;
        self.transform(|hypothesis, next| {
            let produced = hypothesis.with_added(category, amount);
            let total = produced.total();
            if total <= threshold {
                next.insert_if_new(produced);
                return;
            }
            let discard = u8::try_from(total / 2).unwrap_or(u8::MAX);
            next.extend_feasible(
                SplitGenerator::generate(discard, None)
                    .into_iter()
                    .map(|split| produced.checked_sub(split)),
            );
        })
    }

    /// Adds or removes an exactly known set of resources.
    pub fn apply_known_delta(
        &mut self,
        delta: ResourceVector,
        direction: Direction,
    ) -> CommitOutcome {
        match direction {
            Direction::Gaining => self.transform(|hypothesis, next| {
                next.insert_if_new(hypothesis + delta);
            }),
            Direction::Losing => self.transform(|hypothesis, next| {
                next.extend_feasible([hypothesis.checked_sub(delta)]);
            }),
        }
    }

    /// Expands every hypothesis by each way `amount` unseen cards could have arrived.
    pub fn apply_unknown_gain(&mut self, amount: u8) -> CommitOutcome {
        let splits = self.splits_for(amount);
        self.transform(|hypothesis, next| {
            for split in &splits {
                next.insert_if_new(hypothesis + *split);
            }
        })
    }

    /// Expands every hypothesis by each way `amount` unseen cards could have left.
    ///
    /// A hypothesis that cannot cover any split contributes nothing.
    pub fn apply_unknown_loss(&mut self, amount: u8) -> CommitOutcome {
        let splits = self.splits_for(amount);
        self.transform(|hypothesis, next| {
            next.extend_feasible(splits.iter().map(|split| hypothesis.checked_sub(*split)));
        })
    }

    /// The opponent is known to hold nothing.
    pub fn zero_out(&mut self) {
        self.beliefs.reset();
    }

    /// Splits used for unknown gains and losses of `amount` cards.
    pub(crate) fn splits_for(&self, amount: u8) -> Vec<ResourceVector> {
        if amount == 1 {
            self.unit_splits.to_vec()
        } else {
            SplitGenerator::generate(amount, None)
        }
    }

    /// Builds the next set from the current one and commits it.
    pub(crate) fn transform<F>(&mut self, mut expand: F) -> CommitOutcome
    where
        F: FnMut(ResourceVector, &mut Hypotheses),
    {
        self.beliefs.enforce_limit();
        let mut next = Hypotheses::with_capacity(self.beliefs.len());
        for &hypothesis in self.beliefs.iter() {
            expand(hypothesis, &mut next);
        }
        self.beliefs.commit(next)
    }
}
