//! Per-opponent façade routing game events into the belief engine.

use crate::belief::telemetry::BeliefMetrics;
use crate::belief::{
    AffordabilityEstimator, BeliefSet, CommitOutcome, HandSampler, MonopolyHandler, MonopolyState,
    PendingTradeCost, TradeUpdateHandler, UpdateEngine,
};
use crate::config::TrackerConfig;
use crate::game::event::GameEvent;
use crate::model::harbor::HarborSet;
use crate::model::production::Locality;
use crate::model::resource::ResourceCategory;
use crate::model::vector::{Direction, ResourceVector};
use rand::Rng;

/// Everything known about one opponent's hidden hand.
#[derive(Debug, Clone)]
pub struct OpponentTracker {
    engine: UpdateEngine,
    monopoly: MonopolyHandler,
    trade: TradeUpdateHandler,
    harbors: HarborSet,
}

impl Default for OpponentTracker {
    fn default() -> Self {
        Self::new(&TrackerConfig::default())
    }
}

impl OpponentTracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            engine: UpdateEngine::new(config),
            monopoly: MonopolyHandler::new(),
            trade: TradeUpdateHandler::new(),
            harbors: HarborSet::EMPTY,
        }
    }

    pub fn with_harbors(mut self, harbors: HarborSet) -> Self {
        self.harbors = harbors;
        self
    }

    pub fn set_harbors(&mut self, harbors: HarborSet) {
        self.harbors = harbors;
    }

    pub fn harbors(&self) -> HarborSet {
        self.harbors
    }

    pub fn beliefs(&self) -> &BeliefSet {
        self.engine.beliefs()
    }

    pub fn snapshot(&self) -> Vec<ResourceVector> {
        self.engine.beliefs().snapshot()
    }

    pub fn monopoly_state(&self) -> MonopolyState {
        self.monopoly.state()
    }

    pub fn pending_trade(&self) -> Option<PendingTradeCost> {
        self.trade.pending()
    }

    pub fn metrics(&self) -> BeliefMetrics {
        BeliefMetrics::from_beliefs(self.engine.beliefs())
    }

    pub fn estimator(&self) -> AffordabilityEstimator<'_, HarborSet> {
        AffordabilityEstimator::new(self.engine.beliefs(), &self.harbors)
    }

    pub fn probability_has_category(&self, category: ResourceCategory) -> f64 {
        self.estimator().probability_has_category(category)
    }

    pub fn affordability_score(&self, cost: &ResourceVector) -> usize {
        self.estimator().affordability_score(cost)
    }

    pub fn affordability_ratio(&self, cost: &ResourceVector) -> f64 {
        self.estimator().affordability_ratio(cost)
    }

    /// Concrete hands drawn uniformly from the current hypotheses.
    pub fn sample_hands<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<ResourceVector> {
        HandSampler::sample_hands(self.engine.beliefs(), count, rng)
    }

    /// Credits production from every locality matching `roll`.
    pub fn apply_roll(&mut self, roll: u8, localities: &[Locality]) -> Vec<CommitOutcome> {
        localities
            .iter()
            .filter_map(|locality| locality.yield_for(roll))
            .map(|(category, amount)| self.engine.apply_known_production(category, amount))
            .collect()
    }

    pub fn apply_known_production(
        &mut self,
        category: ResourceCategory,
        amount: u8,
    ) -> CommitOutcome {
        self.engine.apply_known_production(category, amount)
    }

    pub fn apply_known_delta(
        &mut self,
        delta: ResourceVector,
        direction: Direction,
    ) -> CommitOutcome {
        self.engine.apply_known_delta(delta, direction)
    }

    pub fn apply_unknown_gain(&mut self, amount: u8) -> CommitOutcome {
        self.engine.apply_unknown_gain(amount)
    }

    pub fn apply_unknown_loss(&mut self, amount: u8) -> CommitOutcome {
        self.engine.apply_unknown_loss(amount)
    }

    pub fn zero_out(&mut self) {
        self.engine.zero_out();
    }

    pub fn announce_monopoly(&mut self, category: ResourceCategory, direction: Direction) {
        self.monopoly.announce(category, direction);
    }

    pub fn decrease_monopoly(&mut self, amount: u8) -> Option<CommitOutcome> {
        self.monopoly.decrease(&mut self.engine, amount)
    }

    pub fn increase_monopoly(&mut self, amount: u8) -> Option<CommitOutcome> {
        self.monopoly.increase(&mut self.engine, amount)
    }

    pub fn begin_sea_trade_scalar(&mut self, cost: u8) {
        self.trade.begin_scalar(cost);
    }

    pub fn begin_sea_trade_exact(&mut self, cost: ResourceVector) {
        self.trade.begin_exact(cost);
    }

    pub fn resolve_sea_trade(&mut self, gain: ResourceVector) -> Option<CommitOutcome> {
        self.trade.resolve(&mut self.engine, gain)
    }

    /// Routes one observation to the matching update. `localities` is only read for rolls.
    pub fn apply_event(
        &mut self,
        event: &GameEvent,
        localities: &[Locality],
    ) -> Vec<CommitOutcome> {
        match *event {
            GameEvent::Roll { value } => self.apply_roll(value, localities),
            GameEvent::Produced { resource, amount } => {
                vec![self.apply_known_production(resource, amount)]
            }
            GameEvent::Gained { resources } => {
                vec![self.apply_known_delta(resources, Direction::Gaining)]
            }
            GameEvent::Lost { resources } => {
                vec![self.apply_known_delta(resources, Direction::Losing)]
            }
            GameEvent::Built { piece } => {
                vec![self.apply_known_delta(piece.cost(), Direction::Losing)]
            }
            GameEvent::GainedUnknown { amount } => vec![self.apply_unknown_gain(amount)],
            GameEvent::LostUnknown { amount } | GameEvent::Discarded { amount } => {
                vec![self.apply_unknown_loss(amount)]
            }
            GameEvent::Robbed { direction } => match direction {
                Direction::Gaining => vec![self.apply_unknown_gain(1)],
                Direction::Losing => vec![self.apply_unknown_loss(1)],
            },
            GameEvent::MonopolyAnnounced {
                resource,
                direction,
            } => {
                self.announce_monopoly(resource, direction);
                Vec::new()
            }
            GameEvent::MonopolyLost { amount } => {
                self.decrease_monopoly(amount).into_iter().collect()
            }
            GameEvent::MonopolyGained { amount } => {
                self.increase_monopoly(amount).into_iter().collect()
            }
            GameEvent::SeaTradeScalar { cost } => {
                self.begin_sea_trade_scalar(cost);
                Vec::new()
            }
            GameEvent::SeaTradeExact { cost } => {
                self.begin_sea_trade_exact(cost);
                Vec::new()
            }
            GameEvent::SeaTradeResolved { gain } => {
                self.resolve_sea_trade(gain).into_iter().collect()
            }
            GameEvent::PlayerTrade { gave, received } => {
                vec![TradeUpdateHandler::trade_exact(&mut self.engine, gave, received)]
            }
            GameEvent::HandEmptied => {
                self.zero_out();
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::piece::Piece;
    use crate::model::production::Building;
    use ResourceCategory::*;

    #[test]
    fn roll_credits_matching_unrobbed_localities() {
        let localities = [
            Locality::new(6, Grain, Building::City),
            Locality::new(6, Brick, Building::Settlement),
            Locality::new(6, Ore, Building::Settlement).with_robber(),
            Locality::new(9, Wool, Building::Settlement),
        ];
        let mut tracker = OpponentTracker::default();
        let outcomes = tracker.apply_event(&GameEvent::Roll { value: 6 }, &localities);
        assert_eq!(outcomes.len(), 2);
        assert_eq!(tracker.snapshot(), vec![ResourceVector::new([0, 0, 2, 1, 0])]);
    }

    #[test]
    fn building_spends_exact_cost() {
        let mut tracker = OpponentTracker::default();
        tracker.apply_known_delta(ResourceVector::new([1, 1, 1, 1, 1]), Direction::Gaining);
        tracker.apply_event(&GameEvent::Built { piece: Piece::Settlement }, &[]);
        assert_eq!(tracker.snapshot(), vec![ResourceVector::unit(Ore)]);
    }

    #[test]
    fn monopoly_and_trade_events_round_trip_through_pending_state() {
        let mut tracker = OpponentTracker::default();
        tracker.apply_event(
            &GameEvent::MonopolyAnnounced {
                resource: Wool,
                direction: Direction::Gaining,
            },
            &[],
        );
        assert!(matches!(tracker.monopoly_state(), MonopolyState::Armed { .. }));
        tracker.apply_event(&GameEvent::MonopolyGained { amount: 4 }, &[]);
        assert_eq!(tracker.monopoly_state(), MonopolyState::Idle);

        tracker.apply_event(&GameEvent::SeaTradeScalar { cost: 4 }, &[]);
        assert_eq!(tracker.pending_trade(), Some(PendingTradeCost::Scalar(4)));
        tracker.apply_event(
            &GameEvent::SeaTradeResolved {
                gain: ResourceVector::unit(Ore),
            },
            &[],
        );
        assert_eq!(tracker.pending_trade(), None);
        assert_eq!(tracker.snapshot(), vec![ResourceVector::unit(Ore)]);
    }

    #[test]
    fn hand_emptied_resets_beliefs() {
        let mut tracker = OpponentTracker::default();
        tracker.apply_event(&GameEvent::GainedUnknown { amount: 3 }, &[]);
        assert!(tracker.beliefs().len() > 1);
        tracker.apply_event(&GameEvent::HandEmptied, &[]);
        assert!(tracker.beliefs().is_canonical());
    }

    #[test]
    fn sampled_hands_come_from_the_belief_set() {
        use rand::SeedableRng;
        use rand::rngs::SmallRng;

        let mut tracker = OpponentTracker::default();
        tracker.apply_unknown_gain(2);
        let mut rng = SmallRng::seed_from_u64(3);
        let hands = tracker.sample_hands(16, &mut rng);
        assert_eq!(hands.len(), 16);
        assert!(hands.iter().all(|hand| tracker.beliefs().contains(hand)));
    }

    #[test]
    fn queries_use_owned_harbors() {
        let mut tracker = OpponentTracker::default().with_harbors(HarborSet::EMPTY.with(Ore));
        tracker.apply_known_delta(ResourceVector::single(Ore, 4), Direction::Gaining);
        assert_eq!(tracker.affordability_score(&ResourceVector::ROAD), 1);
        tracker.set_harbors(HarborSet::EMPTY);
        assert_eq!(tracker.affordability_score(&ResourceVector::ROAD), 0);
        assert_eq!(tracker.probability_has_category(Ore), 1.0);
    }
}
