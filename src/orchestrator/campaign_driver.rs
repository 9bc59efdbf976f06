//! Campaign driver
//!
//! Repeats quiz attempts per campaign until the server reports every module
//! passed. Errors abandon the campaign and move on to the next one.

use std::path::PathBuf;
use tracing::{error, info};

use crate::clients::LearningApi;
use crate::error::AppResult;
use crate::models::AnswerCache;
use crate::services::CheatSheet;
use crate::utils::logging::{log_campaign_attempt, print_final_stats};
use crate::workflow::{AttemptOutcome, QuizFlow};

/// How a campaign ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CampaignOutcome {
    Certified { attempts: usize },
    /// Tries are limited; not attempted
    Skipped,
    Abandoned { attempts: usize, reason: String },
}

#[derive(Debug, Clone)]
pub struct CampaignReport {
    pub campaign_id: String,
    pub outcome: CampaignOutcome,
    pub cache: AnswerCache,
}

/// Totals over all campaigns
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DriverStats {
    pub certified: usize,
    pub skipped: usize,
    pub abandoned: usize,
    pub total: usize,
}

pub struct CampaignDriver<'a, A: LearningApi> {
    api: &'a A,
    cheat_sheet: CheatSheet,
    save_path: Option<PathBuf>,
}

impl<'a, A: LearningApi> CampaignDriver<'a, A> {
    /// # Arguments
    /// - `api`: learning endpoints
    /// - `cheat_sheet`: known answers used to seed each campaign
    /// - `save_path`: where to write the updated cheat sheet, if anywhere
    pub fn new(api: &'a A, cheat_sheet: CheatSheet, save_path: Option<PathBuf>) -> Self {
        Self {
            api,
            cheat_sheet,
            save_path,
        }
    }

    pub fn cheat_sheet(&self) -> &CheatSheet {
        &self.cheat_sheet
    }

    /// Campaign ids to work on: the given ones, or the active ones
    pub async fn resolve_campaigns(&self, requested: &[String]) -> AppResult<Vec<String>> {
        if !requested.is_empty() {
            return Ok(requested.to_vec());
        }
        let ids = self.api.active_campaigns().await?;
        info!("✓ found {} active campaigns", ids.len());
        Ok(ids)
    }

    /// Work through every campaign in order
    pub async fn run(&mut self, campaign_ids: &[String]) -> AppResult<DriverStats> {
        let mut stats = DriverStats {
            total: campaign_ids.len(),
            ..Default::default()
        };

        for campaign_id in campaign_ids {
            let report = self.run_campaign(campaign_id).await?;
            match report.outcome {
                CampaignOutcome::Certified { .. } => stats.certified += 1,
                CampaignOutcome::Skipped => stats.skipped += 1,
                CampaignOutcome::Abandoned { .. } => stats.abandoned += 1,
            }
        }

        print_final_stats(stats.certified, stats.skipped, stats.abandoned, stats.total);
        Ok(stats)
    }

    /// Attempt one campaign until certified, skipped, or failed.
    ///
    /// Only saving the cheat sheet can fail this call; quiz errors are
    /// reported in the outcome.
    pub async fn run_campaign(&mut self, campaign_id: &str) -> AppResult<CampaignReport> {
        let flow = QuizFlow::new(self.api);
        let mut cache = self.cheat_sheet.answer_cache_for(campaign_id);
        let mut attempts = 0;

        let outcome = loop {
            attempts += 1;
            log_campaign_attempt(campaign_id, attempts);

            match flow.take_quiz(campaign_id, &mut cache).await {
                Ok(AttemptOutcome::Skipped { .. }) => break CampaignOutcome::Skipped,
                Ok(attempt) => {
                    // isCertified is not reliable; compare module counts instead
                    if attempt.progress().is_complete() {
                        info!(
                            "✅ campaign {} certified after {} attempts",
                            campaign_id, attempts
                        );
                        break CampaignOutcome::Certified { attempts };
                    }
                }
                Err(e) => {
                    error!("❌ error in campaign {}, continuing: {}", campaign_id, e);
                    break CampaignOutcome::Abandoned {
                        attempts,
                        reason: e.to_string(),
                    };
                }
            }
        };

        self.save_answers(campaign_id, &cache)?;

        Ok(CampaignReport {
            campaign_id: campaign_id.to_string(),
            outcome,
            cache,
        })
    }

    fn save_answers(&mut self, campaign_id: &str, cache: &AnswerCache) -> AppResult<()> {
        let Some(path) = &self.save_path else {
            return Ok(());
        };

        if self.cheat_sheet.merge_campaign(campaign_id, cache) {
            self.cheat_sheet.save(path)?;
            info!("💾 cheat sheet saved to {}", path.display());
        }
        Ok(())
    }
}
