use super::resource::ResourceCategory;
use serde::{Deserialize, Serialize};

/// Dice total that triggers the robber instead of production.
pub const ROBBER_ROLL: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Building {
    Settlement,
    City,
}

impl Building {
    pub const fn multiplier(self) -> u8 {
        match self {
            Building::Settlement => 1,
            Building::City => 2,
        }
    }
}

/// One building of the tracked opponent paired with an adjacent hex.
///
/// A building touching three hexes appears as three localities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locality {
    pub token: u8,
    /// `None` for the desert.
    pub resource: Option<ResourceCategory>,
    pub building: Building,
    #[serde(default)]
    pub robbed: bool,
}

impl Locality {
    pub const fn new(token: u8, resource: ResourceCategory, building: Building) -> Self {
        Self {
            token,
            resource: Some(resource),
            building,
            robbed: false,
        }
    }

    pub const fn with_robber(mut self) -> Self {
        self.robbed = true;
        self
    }

    /// Resource and amount this locality yields for `roll`, if any.
    pub fn yield_for(&self, roll: u8) -> Option<(ResourceCategory, u8)> {
        if roll == ROBBER_ROLL || self.robbed || self.token != roll {
            return None;
        }
        self.resource
            .map(|category| (category, self.building.multiplier()))
    }
}
