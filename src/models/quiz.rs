//! Wire types of the learning / edugame endpoints

use serde::{Deserialize, Serialize};

use super::serde_ext::deserialize_id;

/// Metadata returned when an edugame begins
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizInfo {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub limit_tries: bool,
    #[serde(default)]
    pub tries_remaining: Option<i64>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    /// Used as the answer cache key; changes if the wording is edited
    pub text: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Answer {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub value: String,
}

/// Form posted to `recordAnswer`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub begin_time: String,
    pub end_time: String,
    pub edugame_session_id: String,
    pub question_id: String,
    pub training_session_id: String,
    pub question_time: String,
    pub return_type: &'static str,
    pub answer_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AnswerResult {
    #[serde(default)]
    pub correct: bool,
}

/// Response of `learn/finish` for modules without an edugame
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishModule {
    #[serde(default)]
    pub next_module_url: Option<String>,
}

impl FinishModule {
    pub fn has_next_module(&self) -> bool {
        self.next_module_url
            .as_deref()
            .is_some_and(|url| !url.is_empty())
    }
}

/// Module counts reported at the end of an attempt.
///
/// All fields absent is the "empty result" of an attempt that did not
/// reach the end of the quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_modules: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_modules_passed: Option<u64>,
    /// Reported by the server but not trusted for completion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_certified: Option<bool>,
}

impl ModuleProgress {
    pub fn new(total_modules: u64, total_modules_passed: u64) -> Self {
        Self {
            total_modules: Some(total_modules),
            total_modules_passed: Some(total_modules_passed),
            is_certified: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Passed modules cover the total (total defaults to 1)
    pub fn is_complete(&self) -> bool {
        self.total_modules_passed.unwrap_or(0) >= self.total_modules.unwrap_or(1)
    }
}

/// Home feed used to discover active campaigns
#[derive(Debug, Clone, Deserialize)]
pub struct FeedStructure {
    #[serde(default)]
    pub buckets: Vec<FeedBucket>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedBucket {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<FeedContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedContent {
    #[serde(default)]
    pub items: Vec<FeedItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedItem {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
}

impl FeedStructure {
    /// Ids of every item in every `CAMPAIGN` bucket, in feed order
    pub fn campaign_ids(&self) -> Vec<String> {
        self.buckets
            .iter()
            .filter(|bucket| bucket.kind == "CAMPAIGN")
            .filter_map(|bucket| bucket.content.as_ref())
            .flat_map(|content| content.items.iter().map(|item| item.id.clone()))
            .collect()
    }
}
