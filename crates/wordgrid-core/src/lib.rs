//! Interactive grid-puzzle engines for exam content.
//!
//! Two sibling engines share a common shape (grid + selection + completion
//! detection) but differ in input model: the [`Crossword`] is cursor-based
//! and keyboard-driven, the [`WordSearch`] is drag-based and pointer-driven.
//! Both own their interaction state for one puzzle session and notify a
//! host-supplied handler exactly once when the puzzle is completed.

mod clue;
mod crossword;
mod letters;
mod position;
mod wordsearch;

pub use clue::{normalize_clues, Clue, ClueEntry};
pub use crossword::{Axis, Crossword, Direction};
pub use letters::{
    fold_accent, is_puzzle_letter, normalize_letter, normalize_word, uppercase_letter,
};
pub use position::Position;
pub use wordsearch::{cells_between, TargetWord, WordSearch};

use std::fmt;

/// Error constructing a puzzle engine from exam content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleError {
    /// The supplied grid has no rows or no columns
    EmptyGrid,
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::EmptyGrid => write!(f, "puzzle grid is empty"),
        }
    }
}

impl std::error::Error for PuzzleError {}
