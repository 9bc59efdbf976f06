use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;

use expertvoice_automation::config::Config;
use expertvoice_automation::logger;
use expertvoice_automation::orchestrator::CampaignDriver;
use expertvoice_automation::services::cheat_sheet::{ensure_distinct_paths, CheatSheet};
use expertvoice_automation::utils::logging::log_startup;
use expertvoice_automation::ExpertVoiceClient;

/// Pass ExpertVoice training quizzes by trial and error
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// A local "cheat sheet" JSON to use for answer lookup
    #[arg(long)]
    cheat_sheet: Option<PathBuf>,

    /// Save the computed cheat sheet here after passing quizzes
    #[arg(long)]
    save_cheat_sheet: Option<PathBuf>,

    /// Work on this campaign instead of the active ones (repeatable)
    #[arg(long = "campaign")]
    campaigns: Vec<String>,

    /// The path to a configuration file to use
    #[arg(long, default_value = "./config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(&args.config)?;
    logger::init(&config.logging)?;

    if let (Some(read), Some(write)) = (&args.cheat_sheet, &args.save_cheat_sheet) {
        if let Err(e) = ensure_distinct_paths(read, write) {
            error!("{} - exiting", e);
            std::process::exit(1);
        }
    }

    log_startup("ev-quiz");

    let cheat_sheet = args
        .cheat_sheet
        .as_deref()
        .map(CheatSheet::load_best_effort)
        .unwrap_or_default();

    let client = ExpertVoiceClient::connect(&config).await?;
    let mut driver = CampaignDriver::new(&client, cheat_sheet, args.save_cheat_sheet.clone());

    let campaign_ids = driver.resolve_campaigns(&args.campaigns).await?;
    driver.run(&campaign_ids).await?;

    Ok(())
}
