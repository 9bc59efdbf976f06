//! Quiz solving flow
//!
//! One call to [`QuizFlow::take_quiz`] is one attempt at a campaign's quiz:
//!
//! 1. load the learn page and scrape the training session id
//! 2. begin the edugame (or finish the module directly when it has none)
//! 3. answer each question, best known answer first
//! 4. end the edugame once every question was answered correctly
//!
//! A wrong answer ends the attempt immediately. The answer cache passed in
//! keeps what was learned, so the next attempt gets further.

use rand::Rng;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::clients::LearningApi;
use crate::error::{AppResult, QuizError};
use crate::models::{AnswerCache, AnswerSubmission, ModuleProgress, Question};
use crate::utils::truncate_text;
use crate::workflow::quiz_ctx::QuizCtx;

const TRAINING_SESSION_PATTERN: &str = r#"trainingSessionId['"]?: *["']([0-9]+)["']"#;

/// Bounds of the simulated time spent on a question, in milliseconds
const MIN_QUESTION_MILLIS: i64 = 5_000;
const MAX_QUESTION_MILLIS: i64 = 10_000;

/// Steps of an attempt, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    NotStarted,
    SessionAcquired,
    QuizBegun,
    PerQuestionLoop,
    CampaignModuleResult,
    NoEdugame,
    Done,
}

/// How an attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// All questions answered correctly; module counts from the server
    Completed(ModuleProgress),
    /// The module had no edugame and was finished directly
    NoEdugame(ModuleProgress),
    /// Tries are limited, so nothing was attempted
    Skipped { tries_remaining: Option<i64> },
    /// A wrong answer ended the attempt
    WrongAnswer { question_id: String },
}

impl AttemptOutcome {
    /// Module counts of the attempt; empty unless the quiz or module finished
    pub fn progress(&self) -> ModuleProgress {
        match self {
            AttemptOutcome::Completed(progress) | AttemptOutcome::NoEdugame(progress) => {
                progress.clone()
            }
            _ => ModuleProgress::default(),
        }
    }
}

/// Simulated answering window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerTiming {
    pub begin_ms: i64,
    pub end_ms: i64,
}

impl AnswerTiming {
    /// Ends now, began a random 5 to 10 seconds earlier
    pub fn sample() -> Self {
        let end_ms = chrono::Utc::now().timestamp_millis();
        let offset = rand::thread_rng().gen_range(MIN_QUESTION_MILLIS..=MAX_QUESTION_MILLIS);
        Self {
            begin_ms: end_ms - offset,
            end_ms,
        }
    }

    pub fn question_time(&self) -> i64 {
        self.end_ms - self.begin_ms
    }
}

/// Pull the training session id out of the learn page markup
pub fn extract_training_session_id(html: &str) -> Option<String> {
    let re = Regex::new(TRAINING_SESSION_PATTERN).ok()?;
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

/// Quiz solving flow over any [`LearningApi`]
pub struct QuizFlow<'a, A: LearningApi> {
    api: &'a A,
}

impl<'a, A: LearningApi> QuizFlow<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Make one attempt at `campaign_id`'s quiz, learning into `cache`
    pub async fn take_quiz(
        &self,
        campaign_id: &str,
        cache: &mut AnswerCache,
    ) -> AppResult<AttemptOutcome> {
        trace_state(campaign_id, QuizState::NotStarted);

        // open the campaign page, like a user would
        let html = self.api.learn_page(campaign_id).await?;
        let training_session_id =
            extract_training_session_id(&html).ok_or_else(|| QuizError::SessionNotFound {
                campaign_id: campaign_id.to_string(),
            })?;
        let ctx = QuizCtx::new(campaign_id, training_session_id);
        trace_state(campaign_id, QuizState::SessionAcquired);

        let quiz = match self.api.begin_edugame(&ctx.training_session_id).await {
            Ok(quiz) => quiz,
            Err(e) if e.is_unsupported_media_type() => {
                return self.finish_without_edugame(&ctx).await;
            }
            Err(e) => return Err(e),
        };
        let ctx = ctx.with_edugame(quiz.id.clone());
        trace_state(campaign_id, QuizState::QuizBegun);

        if quiz.limit_tries {
            warn!(
                "{} not attempting quiz - attempts are limited to {:?}",
                ctx, quiz.tries_remaining
            );
            return Ok(AttemptOutcome::Skipped {
                tries_remaining: quiz.tries_remaining,
            });
        }

        trace_state(campaign_id, QuizState::PerQuestionLoop);
        for question in &quiz.questions {
            if !self.answer_question(&ctx, question, cache).await? {
                return Ok(AttemptOutcome::WrongAnswer {
                    question_id: question.id.clone(),
                });
            }
        }

        let progress = self
            .api
            .end_edugame(&ctx.edugame_id, &ctx.training_session_id)
            .await?;
        trace_state(campaign_id, QuizState::CampaignModuleResult);
        info!(
            "{} ✓ quiz completed: {:?}/{:?} modules passed",
            ctx, progress.total_modules_passed, progress.total_modules
        );
        trace_state(campaign_id, QuizState::Done);

        Ok(AttemptOutcome::Completed(progress))
    }

    /// Answer one question; returns whether the server accepted the answer
    async fn answer_question(
        &self,
        ctx: &QuizCtx,
        question: &Question,
        cache: &mut AnswerCache,
    ) -> AppResult<bool> {
        // click "next", like a user would
        self.api.update_edugame(&ctx.edugame_id).await?;

        // TODO: decide how to recover once every answer is known wrong (e.g. reset the entry)
        let answer = cache
            .entry(&question.text)
            .select(question)
            .cloned()
            .ok_or_else(|| QuizError::AnswersExhausted {
                question_id: question.id.clone(),
            })?;

        let timing = AnswerTiming::sample();
        let submission = AnswerSubmission {
            begin_time: timing.begin_ms.to_string(),
            end_time: timing.end_ms.to_string(),
            edugame_session_id: ctx.edugame_id.clone(),
            question_id: question.id.clone(),
            training_session_id: ctx.training_session_id.clone(),
            question_time: timing.question_time().to_string(),
            return_type: "json",
            answer_id: answer.id.clone(),
        };

        let result = self.api.record_answer(&submission).await?;
        let entry = cache.entry(&question.text);

        if result.correct {
            debug!(
                "{} ✓ \"{}\" -> \"{}\"",
                ctx,
                truncate_text(&question.text, 60),
                answer.value
            );
            entry.record_correct(answer.value);
            Ok(true)
        } else {
            info!(
                "{} ✗ wrong answer \"{}\" to \"{}\", restarting",
                ctx,
                answer.value,
                truncate_text(&question.text, 60)
            );
            entry.record_incorrect(answer.value);
            Ok(false)
        }
    }

    /// Module without an edugame: finish it and infer the result.
    ///
    /// No next module URL is taken to mean the module passed.
    async fn finish_without_edugame(&self, ctx: &QuizCtx) -> AppResult<AttemptOutcome> {
        trace_state(&ctx.campaign_id, QuizState::NoEdugame);
        let finish = self.api.finish_module(&ctx.training_session_id).await?;

        let passed = if finish.has_next_module() { 0 } else { 1 };
        info!("{} module has no edugame, finished directly", ctx);
        trace_state(&ctx.campaign_id, QuizState::Done);

        Ok(AttemptOutcome::NoEdugame(ModuleProgress::new(1, passed)))
    }
}

fn trace_state(campaign_id: &str, state: QuizState) {
    debug!("[campaign #{}] -> {:?}", campaign_id, state);
}
