//! Pending monopoly announcements.

use super::set::CommitOutcome;
use super::update::UpdateEngine;
use crate::model::resource::ResourceCategory;
use crate::model::vector::Direction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MonopolyState {
    #[default]
    Idle,
    Armed {
        category: ResourceCategory,
        direction: Direction,
    },
}

/// Turns the amount revealed after a monopoly announcement into an exact update.
#[derive(Debug, Clone, Default)]
pub struct MonopolyHandler {
    state: MonopolyState,
}

impl MonopolyHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MonopolyState {
        self.state
    }

    pub fn announce(&mut self, category: ResourceCategory, direction: Direction) {
        self.state = MonopolyState::Armed {
            category,
            direction,
        };
    }

    /// The opponent surrendered exactly `amount` of the announced category.
    ///
    /// Hypotheses holding any other amount are ruled out; the rest lose the whole
    /// category. Returns `None` unless armed for a loss.
    pub fn decrease(&mut self, engine: &mut UpdateEngine, amount: u8) -> Option<CommitOutcome> {
        let MonopolyState::Armed {
            category,
            direction: Direction::Losing,
        } = self.state
        else {
            return None;
        };
        self.state = MonopolyState::Idle;
        tracing::debug!(
            target: "hexhand_core::belief",
            %category,
            amount,
            "monopoly loss resolved"
        );
        Some(engine.transform(|hypothesis, next| {
            if hypothesis.get(category) == amount {
                next.insert_if_new(hypothesis.with_zeroed(category));
            }
        }))
    }

    /// The opponent collected `amount` of the announced category.
    pub fn increase(&mut self, engine: &mut UpdateEngine, amount: u8) -> Option<CommitOutcome> {
        let MonopolyState::Armed {
            category,
            direction: Direction::Gaining,
        } = self.state
        else {
            return None;
        };
        self.state = MonopolyState::Idle;
        tracing::debug!(
            target: "hexhand_core::belief",
            %category,
            amount,
            "monopoly gain resolved"
        );
        Some(engine.transform(|hypothesis, next| {
            next.insert_if_new(hypothesis.with_added(category, amount));
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::set::BeliefSet;
    use crate::config::TrackerConfig;
    use crate::model::vector::ResourceVector;

    fn engine_with(hypotheses: &[ResourceVector]) -> UpdateEngine {
        UpdateEngine::with_beliefs(
            &TrackerConfig::default(),
            BeliefSet::from_hypotheses(hypotheses.iter().copied()),
        )
    }

    #[test]
    fn loss_keeps_only_exact_amount_and_zeroes_it() {
        let mut engine = engine_with(&[
            ResourceVector::new([1, 3, 0, 0, 0]),
            ResourceVector::new([0, 2, 0, 0, 1]),
        ]);
        let mut handler = MonopolyHandler::new();
        handler.announce(ResourceCategory::Wool, Direction::Losing);
        let outcome = handler.decrease(&mut engine, 3);
        assert_eq!(outcome, Some(CommitOutcome::Applied { size: 1 }));
        assert_eq!(engine.beliefs().snapshot(), vec![ResourceVector::new([1, 0, 0, 0, 0])]);
        assert_eq!(handler.state(), MonopolyState::Idle);
    }

    #[test]
    fn gain_adds_to_every_hypothesis() {
        let mut engine =
            engine_with(&[ResourceVector::ZERO, ResourceVector::unit(ResourceCategory::Ore)]);
        let mut handler = MonopolyHandler::new();
        handler.announce(ResourceCategory::Ore, Direction::Gaining);
        handler.increase(&mut engine, 4);
        let mut hypotheses = engine.beliefs().snapshot();
        hypotheses.sort();
        assert_eq!(
            hypotheses,
            vec![
                ResourceVector::single(ResourceCategory::Ore, 4),
                ResourceVector::single(ResourceCategory::Ore, 5),
            ]
        );
    }

    #[test]
    fn idle_calls_are_ignored() {
        let mut engine = engine_with(&[ResourceVector::CITY]);
        let mut handler = MonopolyHandler::new();
        assert_eq!(handler.decrease(&mut engine, 3), None);
        assert_eq!(handler.increase(&mut engine, 3), None);
        assert_eq!(engine.beliefs().snapshot(), vec![ResourceVector::CITY]);
    }

    #[test]
    fn mismatched_direction_stays_armed() {
        let mut engine = engine_with(&[ResourceVector::CITY]);
        let mut handler = MonopolyHandler::new();
        handler.announce(ResourceCategory::Grain, Direction::Gaining);
        assert_eq!(handler.decrease(&mut engine, 2), None);
        assert!(matches!(handler.state(), MonopolyState::Armed { .. }));
        assert!(handler.increase(&mut engine, 2).is_some());
        assert_eq!(handler.state(), MonopolyState::Idle);
    }

    #[test]
    fn consumed_once() {
        let mut engine = engine_with(&[ResourceVector::ZERO]);
        let mut handler = MonopolyHandler::new();
        handler.announce(ResourceCategory::Brick, Direction::Gaining);
        handler.increase(&mut engine, 2);
        assert_eq!(handler.increase(&mut engine, 2), None);
        assert_eq!(
            engine.beliefs().snapshot(),
            vec![ResourceVector::single(ResourceCategory::Brick, 2)]
        );
    }
}
