//! Candidate splits of an amount across resource categories.

use crate::model::resource::ResourceCategory;
use crate::model::vector::ResourceVector;
use std::collections::HashSet;

/// Enumerates the ways an unknown amount may be distributed across categories.
///
/// Only one- and two-category splits are produced: one category carries the
/// majority, at most one other carries the remainder. Three-way splits are never
/// generated, so the result is a deliberately bounded subset of all compositions.
#[derive(Debug, Default)]
pub struct SplitGenerator;

impl SplitGenerator {
    /// Returns every split of `amount`, leaving `excluded` at zero when given.
    ///
    /// Output order is deterministic and free of duplicates.
    pub fn generate(amount: u8, excluded: Option<ResourceCategory>) -> Vec<ResourceVector> {
        let mut seen = HashSet::new();
        let mut splits = Vec::new();
        let mut push = |split: ResourceVector| {
            if seen.insert(split) {
                splits.push(split);
            }
        };

        for major in ResourceCategory::ALL {
            if Some(major) == excluded {
                continue;
            }
            for minor_amount in 0..amount {
                for minor in ResourceCategory::ALL {
                    if minor == major || Some(minor) == excluded {
                        continue;
                    }
                    let split = ResourceVector::single(major, amount - minor_amount)
                        .with_added(minor, minor_amount);
                    push(split);
                }
            }
            push(ResourceVector::single(major, amount));
        }

        splits
    }

    /// The five one-hot vectors, in category order.
    pub fn unit_splits() -> [ResourceVector; ResourceCategory::COUNT] {
        ResourceCategory::ALL.map(ResourceVector::unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_amount_yields_only_the_empty_hand() {
        assert_eq!(SplitGenerator::generate(0, None), vec![ResourceVector::ZERO]);
    }

    #[test]
    fn single_unit_matches_one_hot_vectors() {
        let splits = SplitGenerator::generate(1, None);
        assert_eq!(splits.len(), ResourceCategory::COUNT);
        for unit in SplitGenerator::unit_splits() {
            assert!(splits.contains(&unit));
        }
    }

    #[test]
    fn every_split_sums_to_amount() {
        for amount in 0..=9u8 {
            for split in SplitGenerator::generate(amount, None) {
                assert_eq!(split.total(), amount as u32, "split {split} for {amount}");
            }
        }
    }

    #[test]
    fn two_units_cover_pairs_and_pure_vectors() {
        let splits = SplitGenerator::generate(2, None);
        // 5 pure vectors + C(5,2) one-and-one splits.
        assert_eq!(splits.len(), 15);
        assert!(splits.contains(&ResourceVector::new([1, 0, 0, 1, 0])));
        assert!(splits.contains(&ResourceVector::new([0, 0, 2, 0, 0])));
    }

    #[test]
    fn never_spreads_over_three_categories() {
        let splits = SplitGenerator::generate(3, None);
        assert!(!splits.contains(&ResourceVector::new([1, 1, 1, 0, 0])));
        assert!(splits.iter().all(|split| {
            split.counts().iter().filter(|&&count| count > 0).count() <= 2
        }));
    }

    #[test]
    fn excluded_category_stays_empty() {
        let splits = SplitGenerator::generate(4, Some(ResourceCategory::Ore));
        assert!(!splits.is_empty());
        assert!(splits.iter().all(|split| split.get(ResourceCategory::Ore) == 0));
        assert!(splits.iter().all(|split| split.total() == 4));
    }

    #[test]
    fn output_has_no_duplicates() {
        let splits = SplitGenerator::generate(5, None);
        let unique: HashSet<_> = splits.iter().copied().collect();
        assert_eq!(unique.len(), splits.len());
    }
}
