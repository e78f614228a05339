//! Seeded random opponents whose true hand is known.

use hexhand_core::game::event::GameEvent;
use hexhand_core::model::harbor::{HarborAccess, HarborSet};
use hexhand_core::model::piece::Piece;
use hexhand_core::model::production::{Building, Locality, ROBBER_ROLL};
use hexhand_core::model::resource::ResourceCategory;
use hexhand_core::model::vector::{Direction, ResourceVector};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::config::SyntheticConfig;

const LOCALITIES_PER_OPPONENT: usize = 6;
const DISCARD_LIMIT: u32 = 7;

/// One generated opponent: board, observations, and the hand after each observation.
#[derive(Debug, Clone)]
pub struct SyntheticOpponent {
    pub name: String,
    pub harbors: HarborSet,
    pub localities: Vec<Locality>,
    pub events: Vec<GameEvent>,
    pub truth: Vec<ResourceVector>,
}

pub fn generate(config: &SyntheticConfig) -> Vec<SyntheticOpponent> {
    let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or(0));
    (0..config.opponents)
        .map(|index| {
            let seed = rng.next_u64();
            generate_opponent(format!("synthetic_{index:02}"), seed, config.events)
        })
        .collect()
}

fn generate_opponent(name: String, seed: u64, events: usize) -> SyntheticOpponent {
    let mut rng = StdRng::seed_from_u64(seed);
    let harbors = random_harbors(&mut rng);
    let localities = (0..LOCALITIES_PER_OPPONENT)
        .map(|_| random_locality(&mut rng))
        .collect::<Vec<_>>();

    let mut generator = Generator {
        rng,
        hand: ResourceVector::ZERO,
        harbors,
        pending: Vec::new(),
    };
    let mut observed = Vec::with_capacity(events);
    let mut truth = Vec::with_capacity(events);
    while observed.len() < events {
        for (event, hand) in generator.step(&localities) {
            if observed.len() == events {
                break;
            }
            observed.push(event);
            truth.push(hand);
        }
    }

    SyntheticOpponent {
        name,
        harbors,
        localities,
        events: observed,
        truth,
    }
}

struct Generator {
    rng: StdRng,
    hand: ResourceVector,
    harbors: HarborSet,
    pending: Vec<(GameEvent, ResourceVector)>,
}

impl Generator {
    /// Emits the events of one turn-sized action with the true hand after each.
    fn step(&mut self, localities: &[Locality]) -> Vec<(GameEvent, ResourceVector)> {
        self.pending.clear();
        match self.rng.gen_range(0..10) {
            0..=3 => self.roll(localities),
            4 => self.build(),
            5 => self.robbery(),
            6 => self.monopoly(),
            7 => self.sea_trade(),
            8 => self.player_trade(),
            _ => self.year_of_plenty(),
        }
        std::mem::take(&mut self.pending)
    }

    fn emit(&mut self, event: GameEvent) {
        self.pending.push((event, self.hand));
    }

    fn roll(&mut self, localities: &[Locality]) {
        let value = self.rng.gen_range(1..=6) + self.rng.gen_range(1..=6);
        if value == ROBBER_ROLL {
            self.emit(GameEvent::Roll { value });
            let total = self.hand.total();
            if total > DISCARD_LIMIT {
                let amount = (total / 2) as u8;
                for _ in 0..amount {
                    self.remove_random_card();
                }
                self.emit(GameEvent::Discarded { amount });
            }
            return;
        }
        for (category, amount) in localities.iter().filter_map(|l| l.yield_for(value)) {
            self.hand = self.hand.with_added(category, amount);
        }
        self.emit(GameEvent::Roll { value });
    }

    fn build(&mut self) {
        let affordable: Vec<Piece> = Piece::ALL
            .into_iter()
            .filter(|piece| self.hand.covers(&piece.cost()))
            .collect();
        if affordable.is_empty() {
            return;
        }
        let piece = affordable[self.rng.gen_range(0..affordable.len())];
        if let Some(rest) = self.hand.checked_sub(piece.cost()) {
            self.hand = rest;
            self.emit(GameEvent::Built { piece });
        }
    }

    fn robbery(&mut self) {
        if self.rng.gen_bool(0.5) {
            let category = self.random_category();
            self.hand = self.hand.with_added(category, 1);
            self.emit(GameEvent::Robbed {
                direction: Direction::Gaining,
            });
        } else if self.remove_random_card() {
            self.emit(GameEvent::Robbed {
                direction: Direction::Losing,
            });
        }
    }

    fn monopoly(&mut self) {
        let resource = self.random_category();
        if self.rng.gen_bool(0.5) {
            let amount = self.hand.get(resource);
            self.emit(GameEvent::MonopolyAnnounced {
                resource,
                direction: Direction::Losing,
            });
            self.hand = self.hand.with_zeroed(resource);
            self.emit(GameEvent::MonopolyLost { amount });
        } else {
            let amount = self.rng.gen_range(0..=4);
            self.emit(GameEvent::MonopolyAnnounced {
                resource,
                direction: Direction::Gaining,
            });
            self.hand = self.hand.with_added(resource, amount);
            self.emit(GameEvent::MonopolyGained { amount });
        }
    }

    fn sea_trade(&mut self) {
        let Some(source) = ResourceCategory::ALL
            .into_iter()
            .find(|&category| self.hand.get(category) >= self.harbors.exchange_rate(category))
        else {
            return;
        };
        let rate = self.harbors.exchange_rate(source);
        let cost = ResourceVector::single(source, rate);
        let target = self.random_category_except(source);
        let gain = ResourceVector::unit(target);
        if self.rng.gen_bool(0.5) {
            self.emit(GameEvent::SeaTradeScalar { cost: rate });
        } else {
            self.emit(GameEvent::SeaTradeExact { cost });
        }
        if let Some(rest) = self.hand.checked_sub(cost) {
            self.hand = rest + gain;
        }
        self.emit(GameEvent::SeaTradeResolved { gain });
    }

    fn player_trade(&mut self) {
        let held: Vec<ResourceCategory> = self
            .hand
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(category, _)| category)
            .collect();
        if held.is_empty() {
            return;
        }
        let given = held[self.rng.gen_range(0..held.len())];
        let received = self.random_category_except(given);
        let gave = ResourceVector::unit(given);
        let received = ResourceVector::unit(received);
        if let Some(rest) = self.hand.checked_sub(gave) {
            self.hand = rest + received;
            self.emit(GameEvent::PlayerTrade { gave, received });
        }
    }

    fn year_of_plenty(&mut self) {
        let first = self.random_category();
        let second = self.random_category();
        let resources = ResourceVector::unit(first).with_added(second, 1);
        self.hand = self.hand + resources;
        self.emit(GameEvent::Gained { resources });
    }

    fn remove_random_card(&mut self) -> bool {
        let total = self.hand.total();
        if total == 0 {
            return false;
        }
        let mut pick = self.rng.gen_range(0..total);
        let hand = self.hand;
        for (category, count) in hand.iter() {
            if pick < count as u32 {
                if let Some(rest) = hand.checked_sub(ResourceVector::unit(category)) {
                    self.hand = rest;
                }
                return true;
            }
            pick -= count as u32;
        }
        false
    }

    fn random_category(&mut self) -> ResourceCategory {
        ResourceCategory::ALL[self.rng.gen_range(0..ResourceCategory::COUNT)]
    }

    fn random_category_except(&mut self, excluded: ResourceCategory) -> ResourceCategory {
        let offset = self.rng.gen_range(1..ResourceCategory::COUNT);
        ResourceCategory::ALL[(excluded.index() + offset) % ResourceCategory::COUNT]
    }
}

fn random_harbors(rng: &mut StdRng) -> HarborSet {
    let mut harbors = HarborSet::EMPTY;
    if rng.gen_bool(0.4) {
        harbors = harbors.with_universal();
    }
    if rng.gen_bool(0.3) {
        harbors = harbors.with(ResourceCategory::ALL[rng.gen_range(0..ResourceCategory::COUNT)]);
    }
    harbors
}

fn random_locality(rng: &mut StdRng) -> Locality {
    const TOKENS: [u8; 10] = [2, 3, 4, 5, 6, 8, 9, 10, 11, 12];
    let token = TOKENS[rng.gen_range(0..TOKENS.len())];
    let resource = ResourceCategory::ALL[rng.gen_range(0..ResourceCategory::COUNT)];
    let building = if rng.gen_bool(0.25) {
        Building::City
    } else {
        Building::Settlement
    };
    Locality::new(token, resource, building)
}
