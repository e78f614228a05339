use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ResourceCategory {
    Lumber = 0,
    Wool = 1,
    Grain = 2,
    Brick = 3,
    Ore = 4,
}

impl ResourceCategory {
    pub const COUNT: usize = 5;

    pub const ALL: [ResourceCategory; 5] = [
        ResourceCategory::Lumber,
        ResourceCategory::Wool,
        ResourceCategory::Grain,
        ResourceCategory::Brick,
        ResourceCategory::Ore,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ResourceCategory::Lumber => "lumber",
            ResourceCategory::Wool => "wool",
            ResourceCategory::Grain => "grain",
            ResourceCategory::Brick => "brick",
            ResourceCategory::Ore => "ore",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
