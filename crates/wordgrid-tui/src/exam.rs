//! Exam content as exported by the platform, reduced to its puzzle sections.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use wordgrid_core::Clue;

/// An exam file: title plus the generated puzzle content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamFile {
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub contenido_json: ExamContent,
}

/// The puzzle sections an exam may carry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crucigrama: Option<CrosswordContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sopa_letras: Option<WordSearchContent>,
}

/// Crossword section: solution grid (nulls/blanks are blocked cells) and
/// the two clue lists, each accepting both legacy clue shapes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrosswordContent {
    pub grid: Vec<Vec<Option<String>>>,
    #[serde(default)]
    pub pistas_horizontal: Vec<Clue>,
    #[serde(default)]
    pub pistas_vertical: Vec<Clue>,
}

/// Word-search section: letter grid and target word list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordSearchContent {
    pub grid: Vec<Vec<String>>,
    #[serde(default)]
    pub palabras: Vec<String>,
}

impl ExamFile {
    /// Load an exam from a JSON file
    pub fn load(path: &Path) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Whether the exam carries any puzzle section at all
    pub fn has_puzzles(&self) -> bool {
        self.contenido_json.crucigrama.is_some() || self.contenido_json.sopa_letras.is_some()
    }

    /// Display title, with a fallback for untitled exams
    pub fn title(&self) -> &str {
        if self.titulo.is_empty() {
            "Exam"
        } else {
            &self.titulo
        }
    }
}
