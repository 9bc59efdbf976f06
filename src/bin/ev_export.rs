use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use expertvoice_automation::config::Config;
use expertvoice_automation::logger;
use expertvoice_automation::orchestrator::export_products;
use expertvoice_automation::utils::logging::log_startup;
use expertvoice_automation::ExpertVoiceClient;

/// Export every ExpertVoice product, by category, to CSV
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// The path to a configuration file to use
    #[arg(long, default_value = "./config.json")]
    config: PathBuf,

    /// The path at which to save the products CSV
    #[arg(short, long, default_value = "./out.csv")]
    out_path: PathBuf,

    /// Write the full category path ("Apparel > Jackets > Rain") as the category
    #[arg(long)]
    prefix_path: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args.config)?;
    logger::init(&config.logging)?;
    log_startup("ev-export");

    let client = ExpertVoiceClient::connect(&config).await?;
    export_products(&client, &args.out_path, args.prefix_path).await?;

    Ok(())
}
