use super::vector::ResourceVector;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Purchasable items with a fixed resource cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Piece {
    Road,
    Settlement,
    City,
    DevelopmentCard,
}

impl Piece {
    pub const ALL: [Piece; 4] = [
        Piece::Road,
        Piece::Settlement,
        Piece::City,
        Piece::DevelopmentCard,
    ];

    pub const fn cost(self) -> ResourceVector {
        match self {
            Piece::Road => ResourceVector::ROAD,
            Piece::Settlement => ResourceVector::SETTLEMENT,
            Piece::City => ResourceVector::CITY,
            Piece::DevelopmentCard => ResourceVector::DEVELOPMENT_CARD,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Piece::Road => "road",
            Piece::Settlement => "settlement",
            Piece::City => "city",
            Piece::DevelopmentCard => "development_card",
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Piece;

    #[test]
    fn costs_match_building_table() {
        assert_eq!(Piece::Road.cost().total(), 2);
        assert_eq!(Piece::Settlement.cost().total(), 4);
        assert_eq!(Piece::City.cost().total(), 5);
        assert_eq!(Piece::DevelopmentCard.cost().total(), 3);
    }

    #[test]
    fn deserializes_snake_case_names() {
        let piece: Piece = serde_json::from_str("\"development_card\"").unwrap();
        assert_eq!(piece, Piece::DevelopmentCard);
    }
}
