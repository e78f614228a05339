//! Probability and affordability queries over a [`BeliefSet`].

use super::set::BeliefSet;
use crate::model::harbor::HarborAccess;
use crate::model::resource::ResourceCategory;
use crate::model::vector::ResourceVector;

/// Read-only view answering decision-layer queries for one opponent.
#[derive(Debug, Clone, Copy)]
pub struct AffordabilityEstimator<'a, H: HarborAccess + ?Sized> {
    beliefs: &'a BeliefSet,
    harbors: &'a H,
}

impl<'a, H: HarborAccess + ?Sized> AffordabilityEstimator<'a, H> {
    pub fn new(beliefs: &'a BeliefSet, harbors: &'a H) -> Self {
        Self { beliefs, harbors }
    }

    /// Fraction of hypotheses holding at least one card of `category`.
    pub fn probability_has_category(&self, category: ResourceCategory) -> f64 {
        let holding = self
            .beliefs
            .iter()
            .filter(|hypothesis| hypothesis.get(category) > 0)
            .count();
        ratio(holding, self.beliefs.len())
    }

    /// Mean count of `category` across hypotheses.
    pub fn expected_count(&self, category: ResourceCategory) -> f64 {
        let total: u64 = self
            .beliefs
            .iter()
            .map(|hypothesis| hypothesis.get(category) as u64)
            .sum();
        if self.beliefs.is_empty() {
            0.0
        } else {
            total as f64 / self.beliefs.len() as f64
        }
    }

    /// Number of hypotheses that can pay `cost`, directly or through exchanges.
    ///
    /// This is a raw count, not a probability; see [`Self::affordability_ratio`].
    pub fn affordability_score(&self, cost: &ResourceVector) -> usize {
        self.beliefs
            .iter()
            .filter(|hypothesis| {
                hypothesis.covers(cost) || try_exchange(hypothesis, cost, self.harbors)
            })
            .count()
    }

    pub fn affordability_ratio(&self, cost: &ResourceVector) -> f64 {
        ratio(self.affordability_score(cost), self.beliefs.len())
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Greedily covers the shortfall of `hand` against `cost` with harbor or bank exchanges.
///
/// The largest remaining deficit is resolved completely before the next one. Each
/// exchange spends surplus of one category at its best rate for a single unit,
/// preferring the cheapest rate and then the largest surplus.
pub fn try_exchange<H: HarborAccess + ?Sized>(
    hand: &ResourceVector,
    cost: &ResourceVector,
    harbors: &H,
) -> bool {
    let mut deficit = hand.deficit(cost).counts();
    let mut surplus = hand.surplus(cost).counts();
    let rates = ResourceCategory::ALL.map(|category| harbors.exchange_rate(category));

    loop {
        let Some(target) = largest_deficit(&deficit) else {
            return true;
        };
        while deficit[target] > 0 {
            let Some(source) = cheapest_source(&surplus, &rates, target) else {
                return false;
            };
            surplus[source] -= rates[source];
            deficit[target] -= 1;
        }
    }
}

fn largest_deficit(deficit: &[u8; ResourceCategory::COUNT]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, &amount) in deficit.iter().enumerate() {
        if amount == 0 {
            continue;
        }
        if best.is_none_or(|current| amount > deficit[current]) {
            best = Some(index);
        }
    }
    best
}

fn cheapest_source(
    surplus: &[u8; ResourceCategory::COUNT],
    rates: &[u8; ResourceCategory::COUNT],
    target: usize,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for index in 0..ResourceCategory::COUNT {
        if index == target || surplus[index] < rates[index] {
            continue;
        }
        let better = match best {
            None => true,
            Some(current) => {
                rates[index] < rates[current]
                    || (rates[index] == rates[current] && surplus[index] > surplus[current])
            }
        };
        if better {
            best = Some(index);
        }
    }
    best
}
