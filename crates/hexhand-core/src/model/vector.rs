use super::resource::ResourceCategory;
use core::fmt;
use core::ops::Add;
use serde::{Deserialize, Serialize};

/// Whether a tracked opponent is receiving or surrendering resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Gaining,
    Losing,
}

/// One count per [`ResourceCategory`], indexed by category order.
///
/// Components never go negative: subtraction is checked and an infeasible
/// result comes back as `None`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceVector([u8; ResourceCategory::COUNT]);

impl ResourceVector {
    pub const ZERO: Self = Self([0; ResourceCategory::COUNT]);
    pub const ROAD: Self = Self([1, 0, 0, 1, 0]);
    pub const SETTLEMENT: Self = Self([1, 1, 1, 1, 0]);
    pub const CITY: Self = Self([0, 0, 2, 0, 3]);
    pub const DEVELOPMENT_CARD: Self = Self([0, 1, 1, 0, 1]);

    pub const fn new(counts: [u8; ResourceCategory::COUNT]) -> Self {
        Self(counts)
    }

    /// Vector holding `amount` of `category` and nothing else.
    pub const fn single(category: ResourceCategory, amount: u8) -> Self {
        let mut counts = [0; ResourceCategory::COUNT];
        counts[category as usize] = amount;
        Self(counts)
    }

    pub const fn unit(category: ResourceCategory) -> Self {
        Self::single(category, 1)
    }

    pub const fn counts(&self) -> [u8; ResourceCategory::COUNT] {
        self.0
    }

    pub const fn get(&self, category: ResourceCategory) -> u8 {
        self.0[category as usize]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().map(|&count| count as u32).sum()
    }

    pub fn max_count(&self) -> u8 {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&count| count == 0)
    }

    pub fn with_added(mut self, category: ResourceCategory, amount: u8) -> Self {
        let slot = &mut self.0[category.index()];
        *slot = slot.saturating_add(amount);
        self
    }

    pub fn with_zeroed(mut self, category: ResourceCategory) -> Self {
        self.0[category.index()] = 0;
        self
    }

    /// Componentwise difference, or `None` when any component would go negative.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        let mut counts = self.0;
        for (slot, &take) in counts.iter_mut().zip(other.0.iter()) {
            *slot = slot.checked_sub(take)?;
        }
        Some(Self(counts))
    }

    /// True when every component is at least the matching component of `cost`.
    pub fn covers(&self, cost: &Self) -> bool {
        self.0.iter().zip(cost.0.iter()).all(|(have, need)| have >= need)
    }

    /// Per-category shortfall against `cost`, floored at zero.
    pub fn deficit(&self, cost: &Self) -> Self {
        cost.saturating_sub(*self)
    }

    /// Per-category excess over `cost`, floored at zero.
    pub fn surplus(&self, cost: &Self) -> Self {
        self.saturating_sub(*cost)
    }

    fn saturating_sub(self, other: Self) -> Self {
        let mut counts = self.0;
        for (slot, &take) in counts.iter_mut().zip(other.0.iter()) {
            *slot = slot.saturating_sub(take);
        }
        Self(counts)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceCategory, u8)> + '_ {
        ResourceCategory::ALL
            .iter()
            .map(move |&category| (category, self.get(category)))
    }
}

impl Add for ResourceVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut counts = self.0;
        for (slot, &extra) in counts.iter_mut().zip(rhs.0.iter()) {
            *slot = slot.saturating_add(extra);
        }
        Self(counts)
    }
}

impl From<[u8; ResourceCategory::COUNT]> for ResourceVector {
    fn from(counts: [u8; ResourceCategory::COUNT]) -> Self {
        Self(counts)
    }
}

impl fmt::Display for ResourceVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [lumber, wool, grain, brick, ore] = self.0;
        write!(f, "[{lumber},{wool},{grain},{brick},{ore}]")
    }
}
