//! Drag-based, pointer-driven word-search engine.

use crate::letters::{normalize_letter, normalize_word, uppercase_letter};
use crate::{Position, PuzzleError};
use std::collections::HashSet;

/// The straight run of cells between two grid positions.
///
/// Returns the inclusive cell list when `end` is reachable from `start` via
/// a horizontal, vertical, or equal-magnitude diagonal step, and an empty
/// list otherwise: a crooked drag yields no cells and no match attempt.
pub fn cells_between(start: Position, end: Position) -> Vec<Position> {
    let dr = end.row as i64 - start.row as i64;
    let dc = end.col as i64 - start.col as i64;
    if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
        return Vec::new();
    }
    let steps = dr.abs().max(dc.abs());
    let sr = dr.signum();
    let sc = dc.signum();
    (0..=steps)
        .map(|i| {
            Position::new(
                (start.row as i64 + sr * i) as usize,
                (start.col as i64 + sc * i) as usize,
            )
        })
        .collect()
}

/// A word the player is asked to locate
pub struct TargetWord {
    display: String,
    normalized: String,
    found: bool,
}

impl TargetWord {
    /// The word as supplied, for rendering
    pub fn display(&self) -> &str {
        &self.display
    }

    /// The matching form: uppercase, accents folded, non-letters stripped
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn is_found(&self) -> bool {
        self.found
    }
}

type CompleteHandler = Box<dyn FnMut(&[String])>;

/// Interactive word-search state: a letter grid, an in-flight drag
/// selection, and the accumulated found words with their highlighted cells.
///
/// A selection that fails to match simply collapses; finding a word twice
/// is silently ignored. The engine has no failure path after construction.
pub struct WordSearch {
    rows: usize,
    cols: usize,
    letters: Vec<Vec<char>>,
    words: Vec<TargetWord>,
    found: Vec<String>,
    selecting: bool,
    start: Option<Position>,
    end: Option<Position>,
    highlighted: HashSet<Position>,
    on_complete: Option<CompleteHandler>,
}

impl WordSearch {
    /// Build an engine from a letter grid and a target word list.
    ///
    /// Grid letters are uppercased for display; short rows are padded so
    /// every row spans the widest one.
    pub fn new(grid: &[Vec<String>], words: &[String]) -> Result<Self, PuzzleError> {
        let rows = grid.len();
        let cols = grid.iter().map(|row| row.len()).max().unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyGrid);
        }

        let mut letters = vec![vec![' '; cols]; rows];
        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if let Some(ch) = cell.chars().next() {
                    letters[r][c] = uppercase_letter(ch);
                }
            }
        }

        let words = words
            .iter()
            .map(|word| TargetWord {
                display: word.clone(),
                normalized: normalize_word(word),
                found: false,
            })
            .collect();

        Ok(Self {
            rows,
            cols,
            letters,
            words,
            found: Vec::new(),
            selecting: false,
            start: None,
            end: None,
            highlighted: HashSet::new(),
            on_complete: None,
        })
    }

    /// Register the completion handler.
    ///
    /// Fired with the normalized found-word list once every target has been
    /// located. The handler is invoked after all state updates and must not
    /// feed new puzzle data back into this engine synchronously.
    pub fn on_complete<F>(&mut self, handler: F)
    where
        F: FnMut(&[String]) + 'static,
    {
        self.on_complete = Some(Box::new(handler));
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The display letter at a cell
    pub fn letter(&self, pos: Position) -> Option<char> {
        if pos.row >= self.rows || pos.col >= self.cols {
            return None;
        }
        Some(self.letters[pos.row][pos.col])
    }

    pub fn words(&self) -> &[TargetWord] {
        &self.words
    }

    /// Normalized found words, in the order they were located
    pub fn found_words(&self) -> &[String] {
        &self.found
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Whether a cell belongs to an already-found word
    pub fn is_highlighted(&self, pos: Position) -> bool {
        self.highlighted.contains(&pos)
    }

    /// The cells of the in-flight drag, for rendering; empty when the drag
    /// is not a straight line
    pub fn selection_cells(&self) -> Vec<Position> {
        if !self.selecting {
            return Vec::new();
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => cells_between(start, end),
            _ => Vec::new(),
        }
    }

    /// True iff every target word has been found
    pub fn is_complete(&self) -> bool {
        self.found.len() == self.words.len()
    }

    /// Start a drag at a cell (pointer down)
    pub fn begin_selection(&mut self, pos: Position) {
        if pos.row >= self.rows || pos.col >= self.cols {
            return;
        }
        self.selecting = true;
        self.start = Some(pos);
        self.end = Some(pos);
    }

    /// Move the drag endpoint (pointer enters a cell while dragging)
    pub fn extend_selection(&mut self, pos: Position) {
        if !self.selecting || pos.row >= self.rows || pos.col >= self.cols {
            return;
        }
        self.end = Some(pos);
    }

    /// Commit the drag (pointer up, or leaving the grid mid-drag).
    ///
    /// Extracts the letters along the selection line, matches them forward
    /// and reversed against the remaining targets, and accumulates a hit.
    /// Returns the display form of a newly-found word. The selection is
    /// cleared regardless of the outcome.
    pub fn end_selection(&mut self) -> Option<String> {
        let committed = if self.selecting {
            self.commit()
        } else {
            None
        };
        self.selecting = false;
        self.start = None;
        self.end = None;
        committed
    }

    /// Clear the found set and its highlighting
    pub fn reset(&mut self) {
        for word in &mut self.words {
            word.found = false;
        }
        self.found.clear();
        self.highlighted.clear();
    }

    fn commit(&mut self) -> Option<String> {
        let (start, end) = match (self.start, self.end) {
            (Some(start), Some(end)) => (start, end),
            _ => return None,
        };
        let cells = cells_between(start, end);
        if cells.len() <= 1 {
            return None;
        }

        let forward: String = cells
            .iter()
            .filter_map(|pos| normalize_letter(self.letters[pos.row][pos.col]))
            .collect();
        if forward.is_empty() {
            return None;
        }
        let reverse: String = forward.chars().rev().collect();

        let index = self
            .words
            .iter()
            .position(|word| word.normalized == forward || word.normalized == reverse)?;
        if self.words[index].found {
            return None;
        }

        self.words[index].found = true;
        self.found.push(self.words[index].normalized.clone());
        self.highlighted.extend(cells.iter().copied());

        if self.found.len() == self.words.len() {
            let found = self.found.clone();
            if let Some(handler) = self.on_complete.as_mut() {
                handler(&found);
            }
        }
        Some(self.words[index].display.clone())
    }
}
