//! Command-line and environment configuration.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::TimeDelta;
use clap::{Args, Parser, Subcommand};

use crate::harvester::HarvestConfig;
use crate::model::{MatchType, Platform, RankedQueue, RegionalRoute, Tier};

#[derive(Debug, Parser)]
#[command(version, about = "Harvest ranked matches and serve per-champion statistics")]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the ranked roster, match ids and match details into the raw collections.
    Harvest(HarvestArgs),
    /// Flatten match details into participant records.
    Reshape(DatabaseArgs),
    /// Print the per-champion rollup as JSON.
    Rollup(DatabaseArgs),
    /// Serve the dashboard over HTTP.
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// MongoDB connection string.
    #[arg(long = "mongo-uri", env = "CONNECTION_STRING_URI", hide_env_values = true)]
    pub uri: String,

    #[arg(long = "db-name", env = "DB_NAME", default_value = "riot_db")]
    pub db_name: String,
}

#[derive(Debug, Clone, Args)]
pub struct HarvestArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,

    #[arg(long, env = "RIOT_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value_t = Platform::Vn2)]
    pub platform: Platform,

    #[arg(long, default_value_t = RegionalRoute::Sea)]
    pub region: RegionalRoute,

    #[arg(long, default_value_t = Tier::Challenger)]
    pub tier: Tier,

    #[arg(long, default_value_t = RankedQueue::RankedSolo5x5)]
    pub queue: RankedQueue,

    #[arg(long, default_value_t = MatchType::Ranked)]
    pub match_type: MatchType,

    /// Length of the trailing window, in days.
    #[arg(long, default_value_t = 30)]
    pub window_days: i64,

    /// Match ids requested per player.
    #[arg(long, default_value_t = 50)]
    pub count: u32,

    #[arg(long, default_value_t = 0)]
    pub start: u32,

    /// Pause before every match request, in milliseconds.
    #[arg(long, default_value_t = 1500)]
    pub delay_ms: u64,
}

impl HarvestArgs {
    pub fn harvest_config(&self) -> HarvestConfig {
        HarvestConfig {
            tier: self.tier,
            queue: self.queue,
            match_type: self.match_type,
            platform: self.platform,
            region: self.region,
            window: TimeDelta::days(self.window_days),
            count: self.count,
            start: self.start,
            delay: Duration::from_millis(self.delay_ms),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,

    #[arg(long, default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,
}
