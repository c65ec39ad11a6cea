use anyhow::{Context, Result};
use clap::Parser;

use bike_events::cli::Cli;
use bike_events::feed::{BcnClient, LocalFeed};
use bike_events::finder::Finder;
use bike_events::query::parse_query;
use bike_events::report::write_report;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    // Fail on a bad query before touching the network
    let query = parse_query(&cli.key).context("CLI: invalid --key query")?;
    let mode = cli.search_mode();
    let config = cli.finder_config();

    let events = match &cli.data_dir {
        Some(dir) => Finder::new(LocalFeed::new(dir), config)
            .run(&query, mode)
            .await
            .with_context(|| format!("Feed: failed to read feeds from {}", dir.display()))?,
        None => {
            let client = BcnClient::new(cli.feed_config()).context("Feed: failed to create client")?;
            Finder::new(client, config)
                .run(&query, mode)
                .await
                .context("Feed: failed to fetch feeds")?
        }
    };

    tracing::info!("Found {} matching events", events.len());

    let path = write_report(&events, cli.format, &cli.output).context("Report: failed to write")?;
    println!("Results saved into {}", path.display());

    Ok(())
}
