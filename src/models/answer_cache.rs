//! Per-campaign memory of which answers are right and which are wrong

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::quiz::{Answer, Question};

/// What is known about one question.
///
/// Never holds both a correct value and incorrect values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incorrect: Vec<String>,
}

impl QuestionAnswers {
    pub fn record_correct(&mut self, value: impl Into<String>) {
        self.correct = Some(value.into());
        self.incorrect.clear();
    }

    /// Also drops any previously recorded correct value
    pub fn record_incorrect(&mut self, value: impl Into<String>) {
        let value = value.into();
        self.correct = None;
        if !self.incorrect.contains(&value) {
            self.incorrect.push(value);
        }
    }

    pub fn is_known_incorrect(&self, value: &str) -> bool {
        self.incorrect.iter().any(|v| v == value)
    }

    /// Pick the answer to submit for `question`.
    ///
    /// The known-correct value wins when it is among the candidates;
    /// otherwise the first candidate not yet known to be wrong. `None` when
    /// every candidate is known to be wrong.
    pub fn select<'q>(&self, question: &'q Question) -> Option<&'q Answer> {
        if let Some(correct) = &self.correct {
            if let Some(answer) = question.answers.iter().find(|a| &a.value == correct) {
                return Some(answer);
            }
        }

        question
            .answers
            .iter()
            .find(|a| !self.is_known_incorrect(&a.value))
    }
}

/// Answer cache keyed by question text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerCache {
    entries: HashMap<String, QuestionAnswers>,
}

impl AnswerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `question_text`, created empty when missing
    pub fn entry(&mut self, question_text: &str) -> &mut QuestionAnswers {
        self.entries.entry(question_text.to_string()).or_default()
    }

    pub fn get(&self, question_text: &str) -> Option<&QuestionAnswers> {
        self.entries.get(question_text)
    }

    /// Known-correct answers only
    pub fn correct_answers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().filter_map(|(question, answers)| {
            answers
                .correct
                .as_deref()
                .map(|correct| (question.as_str(), correct))
        })
    }

    pub fn has_correct_answers(&self) -> bool {
        self.correct_answers().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for AnswerCache {
    /// Seed from `(question text, correct value)` pairs
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(question, correct)| {
                (
                    question,
                    QuestionAnswers {
                        correct: Some(correct),
                        incorrect: Vec::new(),
                    },
                )
            })
            .collect();
        Self { entries }
    }
}
