//! Hypothesis tracking for one opponent's hidden resource hand.
//!
//! This module is composed of:
//! - `split`: candidate splits of an unknown amount across categories.
//! - `set`: the deduplicated, capped hypothesis set and its commit rules.
//! - `update`: production, known and unknown gains and losses.
//! - `monopoly` / `trade`: pending announcements resolved by a later event.
//! - `afford`: probability and affordability queries.
//! - `sampler`: uniform hand draws for determinized search.

mod afford;
mod monopoly;
mod sampler;
mod set;
mod split;
pub mod telemetry;
mod trade;
mod update;

pub use afford::{AffordabilityEstimator, try_exchange};
pub use monopoly::{MonopolyHandler, MonopolyState};
pub use sampler::HandSampler;
pub use set::{BeliefSet, CommitOutcome};
pub use split::SplitGenerator;
pub use trade::{PendingTradeCost, TradeUpdateHandler};
pub use update::UpdateEngine;
