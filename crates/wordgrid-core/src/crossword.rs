//! Cursor-based, keyboard-driven crossword engine.

use crate::clue::{normalize_clues, Clue, ClueEntry};
use crate::letters::{is_puzzle_letter, uppercase_letter};
use crate::{Position, PuzzleError};
use std::collections::HashMap;

/// The direction the cursor advances along when typing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Across,
    Down,
}

impl Axis {
    /// The other axis
    pub fn toggled(self) -> Self {
        match self {
            Axis::Across => Axis::Down,
            Axis::Down => Axis::Across,
        }
    }
}

/// Arrow-key movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The axis a successful move in this direction selects
    fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Down,
            Direction::Left | Direction::Right => Axis::Across,
        }
    }
}

type CompleteHandler = Box<dyn FnMut(&[Vec<Option<String>>])>;

/// Interactive crossword state: player-entered letters over a blocked/open
/// layout, a cursor, and the active axis.
///
/// All invalid input (out-of-bounds or blocked targets, non-letter keys) is
/// absorbed as a no-op; the engine has no failure path after construction.
pub struct Crossword {
    rows: usize,
    cols: usize,
    blocked: Vec<Vec<bool>>,
    entries: Vec<Vec<Option<char>>>,
    cursor: Option<Position>,
    axis: Axis,
    numbers: HashMap<Position, u32>,
    across: Vec<ClueEntry>,
    down: Vec<ClueEntry>,
    on_complete: Option<CompleteHandler>,
}

impl Crossword {
    /// Build an engine from exam content.
    ///
    /// A grid cell is blocked when it is `None` or blank. Clues may use
    /// either legacy shape; clue-start markers are taken from anchored
    /// clues, across list first, and a cell keeps the first marker
    /// registered for it.
    pub fn new(
        grid: &[Vec<Option<String>>],
        across: &[Clue],
        down: &[Clue],
    ) -> Result<Self, PuzzleError> {
        let rows = grid.len();
        let cols = grid.iter().map(|row| row.len()).max().unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyGrid);
        }

        let mut blocked = vec![vec![true; cols]; rows];
        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                blocked[r][c] = match cell {
                    Some(text) => text.trim().is_empty(),
                    None => true,
                };
            }
        }

        let across = normalize_clues(across);
        let down = normalize_clues(down);
        let mut numbers = HashMap::new();
        for entry in across.iter().chain(down.iter()) {
            if let Some(anchor) = entry.anchor {
                numbers.entry(anchor).or_insert(entry.number);
            }
        }

        Ok(Self {
            rows,
            cols,
            blocked,
            entries: vec![vec![None; cols]; rows],
            cursor: None,
            axis: Axis::Across,
            numbers,
            across,
            down,
            on_complete: None,
        })
    }

    /// Register the completion handler.
    ///
    /// Fired with the final player grid (`None` = blocked cell) once per
    /// incomplete-to-complete transition. The handler receives a snapshot
    /// taken after all state updates and must not feed new puzzle data back
    /// into this engine synchronously.
    pub fn on_complete<F>(&mut self, handler: F)
    where
        F: FnMut(&[Vec<Option<String>>]) + 'static,
    {
        self.on_complete = Some(Box::new(handler));
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cursor(&self) -> Option<Position> {
        self.cursor
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Whether a cell cannot hold a letter; out-of-bounds counts as blocked
    pub fn is_blocked(&self, pos: Position) -> bool {
        pos.row >= self.rows || pos.col >= self.cols || self.blocked[pos.row][pos.col]
    }

    /// The player-entered letter at an open cell
    pub fn letter(&self, pos: Position) -> Option<char> {
        if self.is_blocked(pos) {
            return None;
        }
        self.entries[pos.row][pos.col]
    }

    /// The clue-start marker for a cell, if one was registered
    pub fn cell_number(&self, pos: Position) -> Option<u32> {
        self.numbers.get(&pos).copied()
    }

    pub fn across_clues(&self) -> &[ClueEntry] {
        &self.across
    }

    pub fn down_clues(&self) -> &[ClueEntry] {
        &self.down
    }

    /// Move the cursor to a cell, or toggle the axis when re-selecting the
    /// cell under the cursor. Blocked and out-of-bounds cells are ignored.
    pub fn select_cell(&mut self, pos: Position) {
        if self.is_blocked(pos) {
            return;
        }
        if self.cursor == Some(pos) {
            self.axis = self.axis.toggled();
        } else {
            self.cursor = Some(pos);
        }
    }

    /// Type a letter at the cursor and advance along the active axis.
    ///
    /// The letter is stored uppercased. The cursor stays on the just-filled
    /// cell when the next cell along the axis is blocked or off-grid.
    pub fn type_letter(&mut self, ch: char) {
        if !is_puzzle_letter(ch) {
            return;
        }
        let pos = match self.cursor {
            Some(p) => p,
            None => return,
        };
        let was_complete = self.is_complete();
        self.entries[pos.row][pos.col] = Some(uppercase_letter(ch));
        if let Some(next) = self.step(pos, self.axis, 1) {
            self.cursor = Some(next);
        }
        if !was_complete && self.is_complete() {
            self.notify_complete();
        }
    }

    /// Clear the cell at the cursor and retreat along the active axis.
    ///
    /// The cursor stays put when the previous cell is blocked or off-grid.
    pub fn backspace(&mut self) {
        let pos = match self.cursor {
            Some(p) => p,
            None => return,
        };
        self.entries[pos.row][pos.col] = None;
        if let Some(prev) = self.step(pos, self.axis, -1) {
            self.cursor = Some(prev);
        }
    }

    /// Arrow-key navigation. A successful move also selects the axis the
    /// arrow travels along; a blocked or off-grid target is a total no-op.
    pub fn navigate(&mut self, direction: Direction) {
        let pos = match self.cursor {
            Some(p) => p,
            None => return,
        };
        let (dr, dc) = direction.delta();
        let row = pos.row as i32 + dr;
        let col = pos.col as i32 + dc;
        if row < 0 || col < 0 {
            return;
        }
        let target = Position::new(row as usize, col as usize);
        if self.is_blocked(target) {
            return;
        }
        self.cursor = Some(target);
        self.axis = direction.axis();
    }

    /// The inclusive extent of the word containing `pos` along `axis`,
    /// scanning past open cells in both directions.
    pub fn word_bounds(&self, pos: Position, axis: Axis) -> (Position, Position) {
        let mut start = pos;
        while let Some(prev) = self.step(start, axis, -1) {
            start = prev;
        }
        let mut end = pos;
        while let Some(next) = self.step(end, axis, 1) {
            end = next;
        }
        (start, end)
    }

    /// Whether a cell belongs to the word under the cursor, for highlighting
    pub fn in_active_word(&self, pos: Position) -> bool {
        let cursor = match self.cursor {
            Some(c) => c,
            None => return false,
        };
        if self.is_blocked(pos) {
            return false;
        }
        let (start, end) = self.word_bounds(cursor, self.axis);
        match self.axis {
            Axis::Across => {
                pos.row == cursor.row && pos.col >= start.col && pos.col <= end.col
            }
            Axis::Down => pos.col == cursor.col && pos.row >= start.row && pos.row <= end.row,
        }
    }

    /// True iff every open cell holds a letter
    pub fn is_complete(&self) -> bool {
        for r in 0..self.rows {
            for c in 0..self.cols {
                if !self.blocked[r][c] && self.entries[r][c].is_none() {
                    return false;
                }
            }
        }
        true
    }

    /// Clear all player letters and the cursor. The blocked/open layout is
    /// rebuilt from the original puzzle, so a later fill fires the
    /// completion handler again.
    pub fn reset(&mut self) {
        self.entries = vec![vec![None; self.cols]; self.rows];
        self.cursor = None;
    }

    /// The player grid: `None` for blocked cells, the entered letter (or an
    /// empty string) for open cells
    pub fn snapshot(&self) -> Vec<Vec<Option<String>>> {
        (0..self.rows)
            .map(|r| {
                (0..self.cols)
                    .map(|c| {
                        if self.blocked[r][c] {
                            None
                        } else {
                            Some(
                                self.entries[r][c]
                                    .map(|ch| ch.to_string())
                                    .unwrap_or_default(),
                            )
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn step(&self, pos: Position, axis: Axis, delta: i32) -> Option<Position> {
        let (dr, dc) = match axis {
            Axis::Across => (0, delta),
            Axis::Down => (delta, 0),
        };
        let row = pos.row as i32 + dr;
        let col = pos.col as i32 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        let next = Position::new(row as usize, col as usize);
        if self.is_blocked(next) {
            None
        } else {
            Some(next)
        }
    }

    fn notify_complete(&mut self) {
        let snapshot = self.snapshot();
        if let Some(handler) = self.on_complete.as_mut() {
            handler(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn open(text: &str) -> Option<String> {
        Some(text.to_string())
    }

    fn cat_row() -> Vec<Vec<Option<String>>> {
        vec![vec![open("C"), open("A"), open("T")]]
    }

    fn engine(grid: Vec<Vec<Option<String>>>) -> Crossword {
        Crossword::new(&grid, &[], &[]).unwrap()
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(
            Crossword::new(&[], &[], &[]).err(),
            Some(PuzzleError::EmptyGrid)
        );
        let no_cols: Vec<Vec<Option<String>>> = vec![vec![], vec![]];
        assert_eq!(
            Crossword::new(&no_cols, &[], &[]).err(),
            Some(PuzzleError::EmptyGrid)
        );
    }

    #[test]
    fn test_blank_and_null_cells_are_blocked() {
        let grid = vec![vec![open("A"), open(" "), None]];
        let cw = engine(grid);

        assert!(!cw.is_blocked(Position::new(0, 0)));
        assert!(cw.is_blocked(Position::new(0, 1)));
        assert!(cw.is_blocked(Position::new(0, 2)));
        assert!(cw.is_blocked(Position::new(5, 5)));
    }

    #[test]
    fn test_select_blocked_cell_is_ignored() {
        let grid = vec![vec![open("A"), None]];
        let mut cw = engine(grid);

        cw.select_cell(Position::new(0, 1));
        assert_eq!(cw.cursor(), None);

        cw.select_cell(Position::new(0, 0));
        assert_eq!(cw.cursor(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_reselect_toggles_axis_without_moving() {
        let mut cw = engine(cat_row());
        cw.select_cell(Position::new(0, 1));
        assert_eq!(cw.axis(), Axis::Across);

        cw.select_cell(Position::new(0, 1));
        assert_eq!(cw.axis(), Axis::Down);
        assert_eq!(cw.cursor(), Some(Position::new(0, 1)));

        cw.select_cell(Position::new(0, 1));
        assert_eq!(cw.axis(), Axis::Across);
    }

    #[test]
    fn test_typing_fills_and_advances() {
        let mut cw = engine(cat_row());
        cw.select_cell(Position::new(0, 0));

        cw.type_letter('c');
        assert_eq!(cw.letter(Position::new(0, 0)), Some('C'));
        assert_eq!(cw.cursor(), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_typing_at_edge_keeps_cursor() {
        let mut cw = engine(cat_row());
        cw.select_cell(Position::new(0, 2));

        cw.type_letter('t');
        assert_eq!(cw.cursor(), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_typing_without_cursor_is_ignored() {
        let mut cw = engine(cat_row());
        cw.type_letter('x');
        assert_eq!(cw.letter(Position::new(0, 0)), None);
    }

    #[test]
    fn test_non_letters_are_ignored() {
        let mut cw = engine(cat_row());
        cw.select_cell(Position::new(0, 0));

        cw.type_letter('3');
        cw.type_letter('!');
        assert_eq!(cw.letter(Position::new(0, 0)), None);
        assert_eq!(cw.cursor(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_accented_letters_accepted_and_uppercased() {
        let mut cw = engine(cat_row());
        cw.select_cell(Position::new(0, 0));

        cw.type_letter('á');
        assert_eq!(cw.letter(Position::new(0, 0)), Some('Á'));

        cw.type_letter('ñ');
        assert_eq!(cw.letter(Position::new(0, 1)), Some('Ñ'));
    }

    #[test]
    fn test_backspace_clears_and_retreats() {
        let mut cw = engine(cat_row());
        cw.select_cell(Position::new(0, 0));
        cw.type_letter('c');
        cw.type_letter('a');
        assert_eq!(cw.cursor(), Some(Position::new(0, 2)));

        cw.select_cell(Position::new(0, 1));
        cw.backspace();
        assert_eq!(cw.letter(Position::new(0, 1)), None);
        assert_eq!(cw.cursor(), Some(Position::new(0, 0)));

        // At the grid edge the cursor stays put
        cw.backspace();
        assert_eq!(cw.letter(Position::new(0, 0)), None);
        assert_eq!(cw.cursor(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_navigate_moves_and_sets_axis() {
        let grid = vec![
            vec![open("A"), open("B")],
            vec![open("C"), open("D")],
        ];
        let mut cw = engine(grid);
        cw.select_cell(Position::new(0, 0));

        cw.navigate(Direction::Down);
        assert_eq!(cw.cursor(), Some(Position::new(1, 0)));
        assert_eq!(cw.axis(), Axis::Down);

        cw.navigate(Direction::Right);
        assert_eq!(cw.cursor(), Some(Position::new(1, 1)));
        assert_eq!(cw.axis(), Axis::Across);
    }

    #[test]
    fn test_navigate_into_blocked_cell_is_total_noop() {
        let grid = vec![
            vec![open("A"), None],
            vec![open("C"), open("D")],
        ];
        let mut cw = engine(grid);
        cw.select_cell(Position::new(0, 0));
        cw.navigate(Direction::Down);
        assert_eq!(cw.axis(), Axis::Down);

        // Target (1, 1) is open but (0, 1) is blocked; moving right from
        // (1, 0) works, moving right from (0, 0) must not change the axis.
        cw.select_cell(Position::new(0, 0));
        cw.navigate(Direction::Right);
        assert_eq!(cw.cursor(), Some(Position::new(0, 0)));
        assert_eq!(cw.axis(), Axis::Down);
    }

    #[test]
    fn test_navigate_off_grid_is_noop() {
        let mut cw = engine(cat_row());
        cw.select_cell(Position::new(0, 0));

        cw.navigate(Direction::Up);
        cw.navigate(Direction::Left);
        assert_eq!(cw.cursor(), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_word_bounds_stop_at_blocked_cells() {
        let grid = vec![vec![open("A"), open("B"), None, open("C"), open("D")]];
        let cw = engine(grid);

        let (start, end) = cw.word_bounds(Position::new(0, 1), Axis::Across);
        assert_eq!(start, Position::new(0, 0));
        assert_eq!(end, Position::new(0, 1));

        let (start, end) = cw.word_bounds(Position::new(0, 3), Axis::Across);
        assert_eq!(start, Position::new(0, 3));
        assert_eq!(end, Position::new(0, 4));
    }

    #[test]
    fn test_in_active_word_follows_axis() {
        let grid = vec![
            vec![open("A"), open("B")],
            vec![open("C"), open("D")],
        ];
        let mut cw = engine(grid);
        cw.select_cell(Position::new(0, 0));

        assert!(cw.in_active_word(Position::new(0, 1)));
        assert!(!cw.in_active_word(Position::new(1, 0)));

        cw.select_cell(Position::new(0, 0)); // toggle to Down
        assert!(cw.in_active_word(Position::new(1, 0)));
        assert!(!cw.in_active_word(Position::new(0, 1)));
    }

    #[test]
    fn test_completion_fires_once_with_final_grid() {
        let fired: Rc<RefCell<Vec<Vec<Vec<Option<String>>>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&fired);

        let mut cw = engine(cat_row());
        cw.on_complete(move |grid| sink.borrow_mut().push(grid.to_vec()));

        cw.select_cell(Position::new(0, 0));
        cw.type_letter('c');
        cw.type_letter('a');
        assert!(fired.borrow().is_empty());

        cw.type_letter('t');
        assert!(cw.is_complete());
        assert_eq!(
            fired.borrow().as_slice(),
            &[vec![vec![open("C"), open("A"), open("T")]]]
        );

        // Overwriting a letter keeps the grid complete and must not re-fire
        cw.type_letter('x');
        assert_eq!(fired.borrow().len(), 1);
    }

    #[test]
    fn test_completion_refires_after_reset() {
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut cw = engine(cat_row());
        cw.on_complete(move |_| *sink.borrow_mut() += 1);

        cw.select_cell(Position::new(0, 0));
        for ch in ['c', 'a', 't'] {
            cw.type_letter(ch);
        }
        assert_eq!(*count.borrow(), 1);

        cw.reset();
        assert!(!cw.is_complete());
        assert_eq!(cw.cursor(), None);

        cw.select_cell(Position::new(0, 0));
        for ch in ['d', 'o', 'g'] {
            cw.type_letter(ch);
        }
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_completion_ignores_blocked_cells() {
        let grid = vec![vec![open("A"), None, open("B")]];
        let mut cw = engine(grid);
        assert!(!cw.is_complete());

        cw.select_cell(Position::new(0, 0));
        cw.type_letter('a');
        cw.select_cell(Position::new(0, 2));
        cw.type_letter('b');
        assert!(cw.is_complete());
    }

    #[test]
    fn test_first_registered_clue_wins_shared_anchor() {
        let across = vec![Clue::Numbered {
            numero: Some(1),
            fila: Some(0),
            columna: Some(0),
            pista: "across".to_string(),
        }];
        let down = vec![Clue::Numbered {
            numero: Some(5),
            fila: Some(0),
            columna: Some(0),
            pista: "down".to_string(),
        }];
        let cw = Crossword::new(&cat_row(), &across, &down).unwrap();

        assert_eq!(cw.cell_number(Position::new(0, 0)), Some(1));
    }

    #[test]
    fn test_snapshot_distinguishes_blocked_from_empty() {
        let grid = vec![vec![open("A"), None]];
        let cw = engine(grid);

        assert_eq!(cw.snapshot(), vec![vec![Some(String::new()), None]]);
    }
}
