//! Orchestration layer
//!
//! Drives the services and workflow for each command:
//!
//! ```text
//! alert_runner   (saved queries → new listings → alerts)
//! csv_exporter   (leaf categories → products → CSV)
//! campaign_driver (campaigns → repeated QuizFlow attempts → cheat sheet)
//!     ↓
//! workflow / services
//!     ↓
//! clients (ExpertVoiceClient)
//! ```

pub mod alert_runner;
pub mod campaign_driver;
pub mod csv_exporter;

pub use alert_runner::{run_alerts, QueryAlerts};
pub use campaign_driver::{CampaignDriver, CampaignOutcome, CampaignReport, DriverStats};
pub use csv_exporter::export_products;
