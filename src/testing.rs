//! In-memory learning API for workflow and driver tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};

use crate::clients::LearningApi;
use crate::error::{ApiError, AppResult};
use crate::models::{
    Answer, AnswerResult, AnswerSubmission, FinishModule, ModuleProgress, Question, QuizInfo,
};

pub const LEARN_PAGE: &str =
    r#"<script>window.learnConfig = { trainingSessionId: "9001", returnType: "json" };</script>"#;

/// Question whose answers have ids `<question id>-<value>`
pub fn question(id: &str, text: &str, values: &[&str]) -> Question {
    Question {
        id: id.to_string(),
        text: text.to_string(),
        answers: values
            .iter()
            .map(|value| Answer {
                id: format!("{}-{}", id, value),
                value: value.to_string(),
            })
            .collect(),
    }
}

pub fn quiz(questions: Vec<Question>) -> QuizInfo {
    QuizInfo {
        id: "edu-1".to_string(),
        limit_tries: false,
        tries_remaining: None,
        questions,
    }
}

pub struct FakeLearningApi {
    learn_page: String,
    quiz: Option<QuizInfo>,
    next_module_url: Option<String>,
    /// question id → correct answer id
    correct: HashMap<String, String>,
    campaigns: Vec<String>,
    /// campaigns whose learn page carries no session id
    broken_campaigns: HashSet<String>,
    end_results: RefCell<VecDeque<ModuleProgress>>,
    submissions: RefCell<Vec<AnswerSubmission>>,
    update_calls: Cell<usize>,
    begin_calls: Cell<usize>,
    end_calls: Cell<usize>,
}

impl FakeLearningApi {
    pub fn new(quiz: QuizInfo) -> Self {
        Self {
            learn_page: LEARN_PAGE.to_string(),
            quiz: Some(quiz),
            next_module_url: None,
            correct: HashMap::new(),
            campaigns: Vec::new(),
            broken_campaigns: HashSet::new(),
            end_results: RefCell::new(VecDeque::new()),
            submissions: RefCell::new(Vec::new()),
            update_calls: Cell::new(0),
            begin_calls: Cell::new(0),
            end_calls: Cell::new(0),
        }
    }

    /// Begin answers 415 and the module is finished directly
    pub fn without_edugame(next_module_url: Option<String>) -> Self {
        Self {
            quiz: None,
            next_module_url,
            ..Self::new(quiz(Vec::new()))
        }
    }

    pub fn with_correct(mut self, question_id: &str, value: &str) -> Self {
        self.correct.insert(
            question_id.to_string(),
            format!("{}-{}", question_id, value),
        );
        self
    }

    pub fn with_learn_page(mut self, html: &str) -> Self {
        self.learn_page = html.to_string();
        self
    }

    pub fn with_campaigns(mut self, ids: &[&str]) -> Self {
        self.campaigns = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_broken_campaign(mut self, id: &str) -> Self {
        self.broken_campaigns.insert(id.to_string());
        self
    }

    /// Results returned by successive `end_edugame` calls; 1/1 once drained
    pub fn with_end_results(self, results: Vec<ModuleProgress>) -> Self {
        *self.end_results.borrow_mut() = results.into();
        self
    }

    pub fn submissions(&self) -> Vec<AnswerSubmission> {
        self.submissions.borrow().clone()
    }

    pub fn submitted_answer_ids(&self) -> Vec<String> {
        self.submissions
            .borrow()
            .iter()
            .map(|s| s.answer_id.clone())
            .collect()
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.get()
    }

    pub fn begin_calls(&self) -> usize {
        self.begin_calls.get()
    }

    pub fn end_calls(&self) -> usize {
        self.end_calls.get()
    }
}

impl LearningApi for FakeLearningApi {
    async fn active_campaigns(&self) -> AppResult<Vec<String>> {
        Ok(self.campaigns.clone())
    }

    async fn learn_page(&self, campaign_id: &str) -> AppResult<String> {
        if self.broken_campaigns.contains(campaign_id) {
            return Ok("<html>maintenance</html>".to_string());
        }
        Ok(self.learn_page.clone())
    }

    async fn begin_edugame(&self, _training_session_id: &str) -> AppResult<QuizInfo> {
        self.begin_calls.set(self.begin_calls.get() + 1);
        match &self.quiz {
            Some(quiz) => Ok(quiz.clone()),
            None => Err(ApiError::HttpStatus {
                endpoint: "/learn/edugame/begin".to_string(),
                status: reqwest::StatusCode::UNSUPPORTED_MEDIA_TYPE,
            }
            .into()),
        }
    }

    async fn finish_module(&self, _training_session_id: &str) -> AppResult<FinishModule> {
        Ok(FinishModule {
            next_module_url: self.next_module_url.clone(),
        })
    }

    async fn update_edugame(&self, _edugame_id: &str) -> AppResult<()> {
        self.update_calls.set(self.update_calls.get() + 1);
        Ok(())
    }

    async fn record_answer(&self, submission: &AnswerSubmission) -> AppResult<AnswerResult> {
        self.submissions.borrow_mut().push(submission.clone());
        let correct = self
            .correct
            .get(&submission.question_id)
            .is_some_and(|answer_id| *answer_id == submission.answer_id);
        Ok(AnswerResult { correct })
    }

    async fn end_edugame(
        &self,
        _edugame_id: &str,
        _training_session_id: &str,
    ) -> AppResult<ModuleProgress> {
        self.end_calls.set(self.end_calls.get() + 1);
        Ok(self
            .end_results
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| ModuleProgress::new(1, 1)))
    }
}
