//! # ExpertVoice automation
//!
//! Tools for the ExpertVoice platform: new-listing alerts, product CSV
//! export, and training quiz automation.
//!
//! ## Layers
//!
//! ### ① Clients
//! - `clients/` - the HTTP session; the only code that talks to the network
//! - `ExpertVoiceClient` - login, cookies, API error flags
//! - `LearningApi` - the learning endpoints the quiz flow depends on
//!
//! ### ② Services
//! - `services/` - one capability each: categories, search, seen listings,
//!   cheat sheet, CSV output, alert text
//!
//! ### ③ Workflow
//! - `workflow/` - one quiz attempt (`QuizFlow`) and its context (`QuizCtx`)
//!
//! ### ④ Orchestration
//! - `orchestrator/` - what each command runs end to end
//!
//! The binaries in `src/bin/` only parse arguments, load the config and call
//! into the orchestrator.

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use clients::{ExpertVoiceClient, LearningApi};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{AnswerCache, ModuleProgress, Product, SearchQuery};
pub use orchestrator::{CampaignDriver, CampaignOutcome};
pub use workflow::{AttemptOutcome, QuizCtx, QuizFlow};
