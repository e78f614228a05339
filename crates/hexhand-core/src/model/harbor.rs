use super::resource::ResourceCategory;
use serde::{Deserialize, Serialize};

pub const BANK_RATE: u8 = 4;
pub const UNIVERSAL_HARBOR_RATE: u8 = 3;
pub const SPECIFIC_HARBOR_RATE: u8 = 2;

/// Harbor ownership queries for one opponent.
pub trait HarborAccess {
    fn owns_harbor(&self, category: ResourceCategory) -> bool;
    fn owns_universal_harbor(&self) -> bool;

    /// Units of `category` the opponent must surrender for one unit of anything else.
    fn exchange_rate(&self, category: ResourceCategory) -> u8 {
        if self.owns_harbor(category) {
            SPECIFIC_HARBOR_RATE
        } else if self.owns_universal_harbor() {
            UNIVERSAL_HARBOR_RATE
        } else {
            BANK_RATE
        }
    }
}

/// Bit-mask of owned harbors: one bit per category plus the universal harbor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "HarborSpec", into = "HarborSpec")]
pub struct HarborSet(u8);

const UNIVERSAL_BIT: u8 = 1 << ResourceCategory::COUNT;

impl HarborSet {
    pub const EMPTY: Self = Self(0);

    pub fn contains(self, category: ResourceCategory) -> bool {
        let bit = 1 << category as u8;
        self.0 & bit != 0
    }

    pub fn with(mut self, category: ResourceCategory) -> Self {
        let bit = 1 << category as u8;
        self.0 |= bit;
        self
    }

    pub fn has_universal(self) -> bool {
        self.0 & UNIVERSAL_BIT != 0
    }

    pub fn with_universal(mut self) -> Self {
        self.0 |= UNIVERSAL_BIT;
        self
    }
}

impl HarborAccess for HarborSet {
    fn owns_harbor(&self, category: ResourceCategory) -> bool {
        self.contains(category)
    }

    fn owns_universal_harbor(&self) -> bool {
        self.has_universal()
    }
}

/// Human-readable form used in configuration files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct HarborSpec {
    #[serde(default)]
    universal: bool,
    #[serde(default)]
    resources: Vec<ResourceCategory>,
}

impl From<HarborSpec> for HarborSet {
    fn from(spec: HarborSpec) -> Self {
        let base = if spec.universal {
            HarborSet::EMPTY.with_universal()
        } else {
            HarborSet::EMPTY
        };
        spec.resources
            .into_iter()
            .fold(base, |set, category| set.with(category))
    }
}

impl From<HarborSet> for HarborSpec {
    fn from(set: HarborSet) -> Self {
        HarborSpec {
            universal: set.has_universal(),
            resources: ResourceCategory::ALL
                .into_iter()
                .filter(|category| set.contains(*category))
                .collect(),
        }
    }
}
