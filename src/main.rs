use std::process::ExitCode;

use champion_stats::config::{Cli, Command};
use champion_stats::{Harvester, MongoStore, RiotClient, RollupTable, Store};
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(move |meta| {
            meta.target().starts_with("champion_stats") && *meta.level() <= level
        }));
    if let Err(e) = tracing::subscriber::set_global_default(registry) {
        eprintln!("failed to install logger: {e}");
    }

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "fatal");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> champion_stats::Result<()> {
    match command {
        Command::Harvest(args) => {
            let store = MongoStore::connect(&args.database.uri, &args.database.db_name).await?;
            let client = RiotClient::new(args.api_key.clone());
            let result = Harvester::new(&client, &store, args.harvest_config())
                .run()
                .await;
            store.close().await;
            let report = result?;
            tracing::info!(?report, "harvest complete");
        }
        Command::Reshape(args) => {
            let store = MongoStore::connect(&args.uri, &args.db_name).await?;
            let result = store.reshape().await;
            store.close().await;
            let report = result?;
            tracing::info!(
                materialized = report.materialized,
                excluded = report.excluded,
                "reshape complete"
            );
        }
        Command::Rollup(args) => {
            let store = MongoStore::connect(&args.uri, &args.db_name).await?;
            let result = store.rollup().await;
            store.close().await;
            let rows = result?;
            match serde_json::to_string_pretty(&rows) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!(error = %e, "failed to encode rollup"),
            }
        }
        Command::Serve(args) => {
            let store = MongoStore::connect(&args.database.uri, &args.database.db_name).await?;
            let table = RollupTable::load(&store).await;
            store.close().await;
            champion_stats::dashboard::serve(table?, args.bind).await?;
        }
    }
    Ok(())
}
