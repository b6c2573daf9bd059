//! The answer payload the player builds up while solving.
//!
//! Each completed puzzle section records one answer, the way the platform's
//! exam view does: the crossword stores its final grid as a JSON string,
//! the word search a comma-joined word list. The host merges these into a
//! single submission file for the grading collaborator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// Submission key for the crossword section
pub const SECTION_CROSSWORD: &str = "crucigrama";
/// Submission key for the word-search section
pub const SECTION_WORD_SEARCH: &str = "sopa_letras";

/// Answers collected for one exam sitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub examen: String,
    pub respuestas: BTreeMap<String, String>,
    pub elapsed_secs: u64,
}

impl Submission {
    pub fn new(title: &str) -> Self {
        Self {
            examen: title.to_string(),
            respuestas: BTreeMap::new(),
            elapsed_secs: 0,
        }
    }

    /// Record (or replace) the answer for a section
    pub fn record(&mut self, section: &str, answer: String) {
        self.respuestas.insert(section.to_string(), answer);
    }

    /// Drop the answer for a section (used when the player resets a puzzle)
    pub fn clear(&mut self, section: &str) {
        self.respuestas.remove(section);
    }

    pub fn is_answered(&self, section: &str) -> bool {
        self.respuestas.contains_key(section)
    }

    pub fn answered_count(&self) -> usize {
        self.respuestas.len()
    }

    /// Write the submission as JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, json)
    }

    /// Default submission location in the local data directory
    pub fn default_path() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordgrid_submission.json")
    }
}

/// Format seconds as H:MM:SS, or MM:SS under an hour
pub fn format_time(secs: u64) -> String {
    if secs >= 3600 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        let secs = secs % 60;
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{:02}:{:02}", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_clear() {
        let mut submission = Submission::new("Quiz");
        assert!(!submission.is_answered(SECTION_CROSSWORD));

        submission.record(SECTION_CROSSWORD, "[[\"C\"]]".to_string());
        assert!(submission.is_answered(SECTION_CROSSWORD));
        assert_eq!(submission.answered_count(), 1);

        // Re-recording replaces, not duplicates
        submission.record(SECTION_CROSSWORD, "[[\"D\"]]".to_string());
        assert_eq!(submission.answered_count(), 1);
        assert_eq!(
            submission.respuestas.get(SECTION_CROSSWORD).unwrap(),
            "[[\"D\"]]"
        );

        submission.clear(SECTION_CROSSWORD);
        assert!(!submission.is_answered(SECTION_CROSSWORD));
    }

    #[test]
    fn test_save_round_trips() {
        let mut submission = Submission::new("Quiz");
        submission.record(SECTION_WORD_SEARCH, "CAT, DOG".to_string());
        submission.elapsed_secs = 93;

        let path = std::env::temp_dir().join("wordgrid_submission_test.json");
        submission.save(&path).unwrap();

        let data = std::fs::read_to_string(&path).unwrap();
        let loaded: Submission = serde_json::from_str(&data).unwrap();
        assert_eq!(loaded.examen, "Quiz");
        assert_eq!(loaded.elapsed_secs, 93);
        assert_eq!(
            loaded.respuestas.get(SECTION_WORD_SEARCH).unwrap(),
            "CAT, DOG"
        );

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(75), "01:15");
        assert_eq!(format_time(3725), "1:02:05");
    }
}
