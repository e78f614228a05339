pub mod belief;
pub mod config;
pub mod game;
pub mod model;
pub mod tracker;

pub use belief::{BeliefSet, CommitOutcome};
pub use config::TrackerConfig;
pub use game::event::GameEvent;
pub use tracker::OpponentTracker;

pub struct AppInfo;

impl AppInfo {
    pub const fn name() -> &'static str {
        "hexhand"
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
