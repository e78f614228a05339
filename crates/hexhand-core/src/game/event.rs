use crate::model::piece::Piece;
use crate::model::resource::ResourceCategory;
use crate::model::vector::{Direction, ResourceVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Public observation about one tracked opponent, in the order it was seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameEvent {
    /// Dice total; production is derived from the opponent's localities.
    Roll { value: u8 },
    /// Production already attributed to a category.
    Produced {
        resource: ResourceCategory,
        amount: u8,
    },
    /// Exactly known gain (year of plenty, road building refunds, bank payouts).
    Gained { resources: ResourceVector },
    /// Exactly known loss.
    Lost { resources: ResourceVector },
    Built { piece: Piece },
    GainedUnknown { amount: u8 },
    LostUnknown { amount: u8 },
    /// Forced discard after a robber roll.
    Discarded { amount: u8 },
    /// A single card of unknown type was stolen by or from the opponent.
    Robbed { direction: Direction },
    MonopolyAnnounced {
        resource: ResourceCategory,
        direction: Direction,
    },
    MonopolyLost { amount: u8 },
    MonopolyGained { amount: u8 },
    SeaTradeScalar { cost: u8 },
    SeaTradeExact { cost: ResourceVector },
    SeaTradeResolved { gain: ResourceVector },
    PlayerTrade {
        gave: ResourceVector,
        received: ResourceVector,
    },
    HandEmptied,
}

impl GameEvent {
    pub const fn label(&self) -> &'static str {
        match self {
            GameEvent::Roll { .. } => "roll",
            GameEvent::Produced { .. } => "produced",
            GameEvent::Gained { .. } => "gained",
            GameEvent::Lost { .. } => "lost",
            GameEvent::Built { .. } => "built",
            GameEvent::GainedUnknown { .. } => "gained_unknown",
            GameEvent::LostUnknown { .. } => "lost_unknown",
            GameEvent::Discarded { .. } => "discarded",
            GameEvent::Robbed { .. } => "robbed",
            GameEvent::MonopolyAnnounced { .. } => "monopoly_announced",
            GameEvent::MonopolyLost { .. } => "monopoly_lost",
            GameEvent::MonopolyGained { .. } => "monopoly_gained",
            GameEvent::SeaTradeScalar { .. } => "sea_trade_scalar",
            GameEvent::SeaTradeExact { .. } => "sea_trade_exact",
            GameEvent::SeaTradeResolved { .. } => "sea_trade_resolved",
            GameEvent::PlayerTrade { .. } => "player_trade",
            GameEvent::HandEmptied => "hand_emptied",
        }
    }

    pub fn to_json(&self) -> Result<String, EventError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses one event per non-empty line.
    pub fn parse_lines(input: &str) -> Result<Vec<Self>, EventError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                Self::from_json(line).map_err(|source| EventError::Line {
                    line: index + 1,
                    source: Box::new(source),
                })
            })
            .collect()
    }
}

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to decode event: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<EventError>,
    },
}
