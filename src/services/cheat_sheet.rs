//! Cheat sheet: known-correct answers per campaign, persisted across runs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::AnswerCache;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectAnswer {
    /// `null` for questions that were never answered correctly
    #[serde(default)]
    pub correct: Option<String>,
}

/// campaign id → question text → correct answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheatSheet {
    campaigns: BTreeMap<String, BTreeMap<String, CorrectAnswer>>,
}

impl CheatSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let path_str = path.display().to_string();
        let content =
            std::fs::read_to_string(path).map_err(|e| AppError::file_read_failed(&path_str, e))?;
        let sheet = serde_json::from_str(&content).map_err(|source| FileError::JsonParseFailed {
            path: path_str,
            source,
        })?;
        Ok(sheet)
    }

    /// Load, treating any failure as an empty cheat sheet
    pub fn load_best_effort(path: &Path) -> Self {
        match Self::load(path) {
            Ok(sheet) => {
                debug!(
                    "loaded cheat sheet {} with {} campaigns",
                    path.display(),
                    sheet.len()
                );
                sheet
            }
            Err(e) => {
                warn!(
                    "error reading cheat sheet \"{}\" - continuing without it: {}",
                    path.display(),
                    e
                );
                Self::new()
            }
        }
    }

    /// Answer cache seeded with what is known for `campaign_id`
    pub fn answer_cache_for(&self, campaign_id: &str) -> AnswerCache {
        self.campaigns
            .get(campaign_id)
            .map(|questions| {
                questions
                    .iter()
                    .filter_map(|(text, answer)| {
                        answer.correct.clone().map(|correct| (text.clone(), correct))
                    })
                    .collect::<AnswerCache>()
            })
            .unwrap_or_default()
    }

    /// Replace `campaign_id`'s entry with the correct answers of `cache`.
    ///
    /// Returns false, leaving the sheet untouched, when the cache knows no
    /// correct answer.
    pub fn merge_campaign(&mut self, campaign_id: &str, cache: &AnswerCache) -> bool {
        let solved: BTreeMap<String, CorrectAnswer> = cache
            .correct_answers()
            .map(|(text, correct)| {
                (
                    text.to_string(),
                    CorrectAnswer {
                        correct: Some(correct.to_string()),
                    },
                )
            })
            .collect();

        if solved.is_empty() {
            return false;
        }

        self.campaigns.insert(campaign_id.to_string(), solved);
        true
    }

    /// Write as 4-space indented JSON
    pub fn save(&self, path: &Path) -> AppResult<()> {
        let path_str = path.display().to_string();
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)
            .map_err(|source| FileError::JsonParseFailed {
                path: path_str.clone(),
                source,
            })?;
        std::fs::write(path, buf).map_err(|e| AppError::file_write_failed(&path_str, e))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.campaigns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty()
    }
}

/// Reading and writing the same cheat sheet file is refused
pub fn ensure_distinct_paths(read_path: &Path, write_path: &Path) -> AppResult<()> {
    if !write_path.exists() {
        return Ok(());
    }

    let same = match (read_path.canonicalize(), write_path.canonicalize()) {
        (Ok(read), Ok(write)) => read == write,
        _ => false,
    };

    if same {
        return Err(ConfigError::SameCheatSheetPaths.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_keeps_only_correct_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cheat.json");

        let mut cache = AnswerCache::new();
        cache.entry("What is DWR?").record_correct("Durable water repellent");
        cache.entry("Best layer for rain?").record_incorrect("Fleece");

        let mut sheet = CheatSheet::new();
        assert!(sheet.merge_campaign("101", &cache));
        sheet.save(&path).unwrap();

        let reloaded = CheatSheet::load(&path).unwrap();
        let seeded = reloaded.answer_cache_for("101");
        assert_eq!(seeded.len(), 1);
        assert_eq!(
            seeded
                .get("What is DWR?")
                .and_then(|e| e.correct.as_deref()),
            Some("Durable water repellent")
        );
        assert!(seeded.get("Best layer for rain?").is_none());

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("incorrect"));
        assert!(raw.contains("\n    \"101\""));
    }

    #[test]
    fn test_merge_without_correct_answers_is_skipped() {
        let mut cache = AnswerCache::new();
        cache.entry("q").record_incorrect("a");

        let mut sheet = CheatSheet::new();
        assert!(!sheet.merge_campaign("7", &cache));
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_best_effort_swallows_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cheat.json");
        std::fs::write(&path, "{ broken").unwrap();

        assert!(CheatSheet::load_best_effort(&path).is_empty());
        assert!(CheatSheet::load_best_effort(&dir.path().join("missing.json")).is_empty());
    }

    #[test]
    fn test_null_answers_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cheat.json");
        std::fs::write(
            &path,
            r#"{"1": {"Q": {"correct": "A"}}, "2": {"R": {"correct": null}, "S": {"correct": "B"}}}"#,
        )
        .unwrap();

        let sheet = CheatSheet::load_best_effort(&path);
        assert_eq!(sheet.len(), 2);

        let first = sheet.answer_cache_for("1");
        assert_eq!(first.get("Q").and_then(|e| e.correct.as_deref()), Some("A"));

        let second = sheet.answer_cache_for("2");
        assert_eq!(second.len(), 1);
        assert!(second.get("R").is_none());
        assert_eq!(second.get("S").and_then(|e| e.correct.as_deref()), Some("B"));
    }

    #[test]
    fn test_unknown_campaign_gives_empty_cache() {
        let sheet = CheatSheet::new();
        assert!(sheet.answer_cache_for("nope").is_empty());
    }

    #[test]
    fn test_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.json");
        let b = dir.path().join("b.json");
        std::fs::write(&a, "{}").unwrap();

        assert!(ensure_distinct_paths(&a, &b).is_ok());
        assert!(ensure_distinct_paths(&a, &a).is_err());

        std::fs::write(&b, "{}").unwrap();
        assert!(ensure_distinct_paths(&a, &b).is_ok());
    }
}
