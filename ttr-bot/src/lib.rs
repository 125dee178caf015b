//! Decision making for a Ticket to Ride player: route planning under a finite
//! card supply, endgame timing, and the strategies that turn both into moves.

mod accessibility;
mod config;
mod endgame;
mod planner;
mod policy;
mod simulate;
mod view;
mod wishlist;

pub use accessibility::{unseen_pool, Accessibility};
pub use config::{ConfigError, PolicyConfig};
pub use endgame::{min_draws, EndgameEstimator, NO_THREAT_TURNS};
pub use planner::{Plan, Planner, DEFAULT_MAX_EXPANSIONS};
pub use policy::{
    decide, min_keep, normalise_draws, Decision, DrawChoice, PlannerBot, RandomBot, Strategy,
    TurnAction,
};
pub use simulate::{CollectionSimulator, TurnEstimate};
pub use view::{goal_cities, Affordable, GameView};
pub use wishlist::{Signature, Wishlist};
