//! Identifiers scoping one quiz attempt

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizCtx {
    pub campaign_id: String,

    /// Scraped from the learn page, scopes every quiz call
    pub training_session_id: String,

    /// Edugame session id; empty until the quiz begins
    pub edugame_id: String,
}

impl QuizCtx {
    pub fn new(campaign_id: impl Into<String>, training_session_id: impl Into<String>) -> Self {
        Self {
            campaign_id: campaign_id.into(),
            training_session_id: training_session_id.into(),
            edugame_id: String::new(),
        }
    }

    pub fn with_edugame(self, edugame_id: impl Into<String>) -> Self {
        Self {
            edugame_id: edugame_id.into(),
            ..self
        }
    }
}

impl Display for QuizCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[campaign #{} session #{}]",
            self.campaign_id, self.training_session_id
        )
    }
}
