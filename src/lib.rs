//! Harvest ranked League of Legends matches into MongoDB, flatten them into
//! per-participant records and roll those up into per-champion statistics.

pub use client::{RiotApi, RiotClient};
pub use dashboard::RollupTable;
pub use error::{Result, StatsError};
pub use harvester::{HarvestConfig, HarvestReport, Harvester};
pub use model::*;
pub use store::{MemoryStore, MongoStore, Store};

pub mod aggregation;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod harvester;
pub mod model;
pub(crate) mod riot_api;
pub mod store;
