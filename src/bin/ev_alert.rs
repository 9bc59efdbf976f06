use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use expertvoice_automation::config::Config;
use expertvoice_automation::logger;
use expertvoice_automation::orchestrator::run_alerts;
use expertvoice_automation::services::SeenListings;
use expertvoice_automation::utils::logging::log_startup;
use expertvoice_automation::ExpertVoiceClient;

/// Alert on ExpertVoice listings not seen in the previous run
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// The name of the query to execute
    #[arg(
        short,
        long,
        conflicts_with = "all",
        required_unless_present_any = ["all", "list_queries"]
    )]
    query_name: Option<String>,

    /// Execute all saved queries
    #[arg(long)]
    all: bool,

    /// List all saved queries and exit
    #[arg(short, long)]
    list_queries: bool,

    /// Log URLs in markdown format (for gotify)
    #[arg(long)]
    markdown: bool,

    /// The path to a configuration file to use
    #[arg(long, default_value = "./config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args.config)?;

    if args.list_queries {
        println!("Saved queries: {}", config.query_names().join(", "));
        return Ok(());
    }

    logger::init(&config.logging)?;
    log_startup("ev-alert");

    let queries = config.select_queries(args.query_name.as_deref(), args.all)?;
    let mut seen = SeenListings::load(&config.seen_listings_filename)?;

    let client = ExpertVoiceClient::connect(&config).await?;
    run_alerts(&client, &queries, &mut seen, args.markdown).await?;

    Ok(())
}
