/// Log formatting helpers
use tracing::info;

/// Startup banner
///
/// # Arguments
/// - `tool`: name of the running command
pub fn log_startup(tool: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 {} started - {}",
        tool,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}

/// Banner for one campaign attempt
pub fn log_campaign_attempt(campaign_id: &str, attempt: usize) {
    info!("\n{}", "─".repeat(60));
    info!("📦 campaign {} - attempt {}", campaign_id, attempt);
    info!("{}", "─".repeat(60));
}

/// Final campaign statistics
///
/// # Arguments
/// - `certified`: campaigns that reached full module completion
/// - `skipped`: campaigns not attempted because tries are limited
/// - `abandoned`: campaigns given up on after an error
/// - `total`: campaigns processed
pub fn print_final_stats(certified: usize, skipped: usize, abandoned: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📊 all campaigns processed");
    info!(
        "finished at: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ certified: {}/{}", certified, total);
    info!("⏭️ skipped: {}", skipped);
    info!("❌ abandoned: {}", abandoned);
    info!("{}", "=".repeat(60));
}

/// Truncate long text for log display
///
/// # Arguments
/// - `text`: original text
/// - `max_len`: maximum number of characters kept
///
/// # Returns
/// the truncated text, with `...` appended when cut
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
