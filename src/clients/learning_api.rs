//! Learning / edugame endpoints used by the quiz workflow

use serde_json::json;
use tracing::debug;

use super::expertvoice_client::{endpoints, ExpertVoiceClient};
use crate::error::AppResult;
use crate::models::{
    AnswerResult, AnswerSubmission, FeedStructure, FinishModule, ModuleProgress, QuizInfo,
};

/// Calls the quiz workflow needs from the platform
#[allow(async_fn_in_trait)]
pub trait LearningApi {
    /// Ids of the campaigns currently offered to the user
    async fn active_campaigns(&self) -> AppResult<Vec<String>>;

    /// HTML of the campaign's next learning page
    async fn learn_page(&self, campaign_id: &str) -> AppResult<String>;

    /// Start an edugame; fails with HTTP 415 when the module has none
    async fn begin_edugame(&self, training_session_id: &str) -> AppResult<QuizInfo>;

    /// Finish a module that has no edugame
    async fn finish_module(&self, training_session_id: &str) -> AppResult<FinishModule>;

    /// "Next" navigation signal; the response carries nothing useful
    async fn update_edugame(&self, edugame_id: &str) -> AppResult<()>;

    async fn record_answer(&self, submission: &AnswerSubmission) -> AppResult<AnswerResult>;

    async fn end_edugame(
        &self,
        edugame_id: &str,
        training_session_id: &str,
    ) -> AppResult<ModuleProgress>;
}

impl LearningApi for ExpertVoiceClient {
    async fn active_campaigns(&self) -> AppResult<Vec<String>> {
        let feed: FeedStructure = self
            .post_json(endpoints::NEW_TO_YOU_FEED, &[], &json!({}))
            .await?;
        let ids = feed.campaign_ids();
        debug!("found {} active campaigns", ids.len());
        Ok(ids)
    }

    async fn learn_page(&self, campaign_id: &str) -> AppResult<String> {
        self.get_text(endpoints::LEARN_NEXT, &[("campaignId", campaign_id)])
            .await
    }

    async fn begin_edugame(&self, training_session_id: &str) -> AppResult<QuizInfo> {
        let form = [
            ("trainingSessionId", training_session_id),
            ("returnType", "json"),
        ];
        self.post_form(endpoints::EDUGAME_BEGIN, &form).await
    }

    async fn finish_module(&self, training_session_id: &str) -> AppResult<FinishModule> {
        self.post_json(
            endpoints::LEARN_FINISH,
            &[("trainingSessionId", training_session_id)],
            &json!({}),
        )
        .await
    }

    async fn update_edugame(&self, edugame_id: &str) -> AppResult<()> {
        let form = [("edugameId", edugame_id), ("timed", "false")];
        self.post_form_text(endpoints::EDUGAME_UPDATE, &form).await?;
        Ok(())
    }

    async fn record_answer(&self, submission: &AnswerSubmission) -> AppResult<AnswerResult> {
        self.post_form(endpoints::EDUGAME_RECORD_ANSWER, submission)
            .await
    }

    async fn end_edugame(
        &self,
        edugame_id: &str,
        training_session_id: &str,
    ) -> AppResult<ModuleProgress> {
        let form = [
            ("edugameSessionId", edugame_id),
            ("trainingSessionId", training_session_id),
            ("timed", "false"),
            ("returnType", "json"),
        ];
        self.post_form(endpoints::EDUGAME_END, &form).await
    }
}
