//! Sea trades with partially or fully known amounts.

use super::set::CommitOutcome;
use super::update::UpdateEngine;
use crate::model::vector::ResourceVector;

/// What the opponent is about to surrender in a pending sea trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingTradeCost {
    /// Only the card count is known.
    Scalar(u8),
    /// The surrendered resources are known exactly.
    Exact(ResourceVector),
}

#[derive(Debug, Clone, Default)]
pub struct TradeUpdateHandler {
    pending: Option<PendingTradeCost>,
}

impl TradeUpdateHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<PendingTradeCost> {
        self.pending
    }

    pub fn begin_scalar(&mut self, cost: u8) {
        self.pending = Some(PendingTradeCost::Scalar(cost));
    }

    pub fn begin_exact(&mut self, cost: ResourceVector) {
        self.pending = Some(PendingTradeCost::Exact(cost));
    }

    /// Settles the pending trade with the resources the opponent received.
    ///
    /// Returns `None` when no trade was pending.
    pub fn resolve(
        &mut self,
        engine: &mut UpdateEngine,
        gain: ResourceVector,
    ) -> Option<CommitOutcome> {
        let pending = self.pending.take()?;
        tracing::debug!(
            target: "hexhand_core::belief",
            ?pending,
            %gain,
            "sea trade resolved"
        );
        Some(match pending {
            PendingTradeCost::Scalar(cost) => Self::trade_scalar(engine, cost, gain),
            PendingTradeCost::Exact(cost) => Self::trade_exact(engine, cost, gain),
        })
    }

    /// `cost` cards of a single unknown category were exchanged for `gain`.
    pub fn trade_scalar(
        engine: &mut UpdateEngine,
        cost: u8,
        gain: ResourceVector,
    ) -> CommitOutcome {
        let splits = engine.splits_for(cost);
        engine.transform(|hypothesis, next| {
            if hypothesis.max_count() < cost {
                return;
            }
            for split in &splits {
                if let Some(remaining) = hypothesis.checked_sub(*split) {
                    next.insert_if_new(remaining + gain);
                }
            }
        })
    }

    /// Both sides of the exchange are known.
    pub fn trade_exact(
        engine: &mut UpdateEngine,
        cost: ResourceVector,
        gain: ResourceVector,
    ) -> CommitOutcome {
        engine.transform(|hypothesis, next| {
            if let Some(remaining) = hypothesis.checked_sub(cost) {
                next.insert_if_new(remaining + gain);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::set::BeliefSet;
    use crate::config::TrackerConfig;
    use crate::model::resource::ResourceCategory::*;

    fn engine_with(hypotheses: &[ResourceVector]) -> UpdateEngine {
        UpdateEngine::with_beliefs(
            &TrackerConfig::default(),
            BeliefSet::from_hypotheses(hypotheses.iter().copied()),
        )
    }

    fn sorted(engine: &UpdateEngine) -> Vec<ResourceVector> {
        let mut hypotheses = engine.beliefs().snapshot();
        hypotheses.sort();
        hypotheses
    }

    #[test]
    fn exact_trade_subtracts_then_adds() {
        let mut engine = engine_with(&[
            ResourceVector::new([4, 0, 0, 0, 1]),
            ResourceVector::new([3, 0, 0, 0, 0]),
        ]);
        let outcome = TradeUpdateHandler::trade_exact(
            &mut engine,
            ResourceVector::single(Lumber, 4),
            ResourceVector::unit(Ore),
        );
        assert_eq!(outcome, CommitOutcome::Applied { size: 1 });
        assert_eq!(sorted(&engine), vec![ResourceVector::single(Ore, 2)]);
    }

    #[test]
    fn scalar_trade_requires_enough_of_one_category() {
        let mut engine = engine_with(&[
            ResourceVector::new([2, 2, 0, 0, 0]),
            ResourceVector::new([0, 0, 4, 0, 0]),
        ]);
        TradeUpdateHandler::trade_scalar(&mut engine, 4, ResourceVector::unit(Brick));
        // [2,2,0,0,0] cannot supply four of any single category.
        assert_eq!(sorted(&engine), vec![ResourceVector::unit(Brick)]);
    }

    #[test]
    fn scalar_trade_keeps_every_feasible_split() {
        let mut engine = engine_with(&[ResourceVector::new([3, 1, 0, 0, 0])]);
        TradeUpdateHandler::trade_scalar(&mut engine, 3, ResourceVector::unit(Ore));
        assert_eq!(
            sorted(&engine),
            vec![
                ResourceVector::new([0, 1, 0, 0, 1]),
                ResourceVector::new([1, 0, 0, 0, 1]),
            ]
        );
    }

    #[test]
    fn pending_cost_is_consumed_on_resolve() {
        let mut engine = engine_with(&[ResourceVector::single(Wool, 2)]);
        let mut handler = TradeUpdateHandler::new();
        handler.begin_exact(ResourceVector::single(Wool, 2));
        assert_eq!(
            handler.pending(),
            Some(PendingTradeCost::Exact(ResourceVector::single(Wool, 2)))
        );
        let outcome = handler.resolve(&mut engine, ResourceVector::unit(Grain));
        assert!(outcome.is_some());
        assert_eq!(handler.pending(), None);
        assert_eq!(sorted(&engine), vec![ResourceVector::unit(Grain)]);
        assert_eq!(handler.resolve(&mut engine, ResourceVector::unit(Grain)), None);
    }

    #[test]
    fn scalar_pending_routes_through_scalar_mode() {
        let mut engine = engine_with(&[ResourceVector::single(Ore, 3)]);
        let mut handler = TradeUpdateHandler::new();
        handler.begin_scalar(3);
        handler.resolve(&mut engine, ResourceVector::unit(Lumber));
        assert_eq!(sorted(&engine), vec![ResourceVector::unit(Lumber)]);
    }
}
