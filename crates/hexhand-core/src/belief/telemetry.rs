use super::set::BeliefSet;
use crate::model::resource::ResourceCategory;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
pub struct BeliefMetrics {
    pub hypotheses: usize,
    pub summary_hash: u64,
    pub expected_per_category: [f32; ResourceCategory::COUNT],
    pub presence_per_category: [f32; ResourceCategory::COUNT],
    /// Shannon entropy of each category's marginal count distribution.
    pub entropy_per_category: [f32; ResourceCategory::COUNT],
}

impl BeliefMetrics {
    pub fn from_beliefs(beliefs: &BeliefSet) -> Self {
        let size = beliefs.len().max(1) as f32;
        let mut expected_per_category = [0.0; ResourceCategory::COUNT];
        let mut presence_per_category = [0.0; ResourceCategory::COUNT];
        let mut entropy_per_category = [0.0; ResourceCategory::COUNT];

        for category in ResourceCategory::ALL {
            let mut marginal: BTreeMap<u8, usize> = BTreeMap::new();
            let mut sum = 0u32;
            let mut present = 0usize;
            for hypothesis in beliefs.iter() {
                let count = hypothesis.get(category);
                *marginal.entry(count).or_default() += 1;
                sum += count as u32;
                if count > 0 {
                    present += 1;
                }
            }

            let mut entropy = 0.0;
            for &occurrences in marginal.values() {
                let p = occurrences as f32 / size;
                entropy -= p * p.ln();
            }

            expected_per_category[category.index()] = sum as f32 / size;
            presence_per_category[category.index()] = present as f32 / size;
            entropy_per_category[category.index()] = entropy;
        }

        Self {
            hypotheses: beliefs.len(),
            summary_hash: beliefs.summary_hash(),
            expected_per_category,
            presence_per_category,
            entropy_per_category,
        }
    }

    pub fn total_entropy(&self) -> f32 {
        self.entropy_per_category.iter().sum()
    }
}
