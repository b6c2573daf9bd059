use crate::animations::WinScreen;
use crate::exam::ExamFile;
use crate::focus::{InputFocus, Section};
use crate::submission::{format_time, Submission, SECTION_CROSSWORD, SECTION_WORD_SEARCH};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::cell::{Ref, RefCell};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};
use wordgrid_core::{Crossword, Direction, PuzzleError, Position, WordSearch};

/// Result of handling an input event
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Solving the puzzles
    Playing,
    /// Every section answered, submission written
    Finished,
}

/// Screen-space footprint of a rendered puzzle grid, for mouse hit-testing.
///
/// Matches the renderer's geometry: cells are 3 characters wide between
/// 1-character borders, and cell rows alternate with separator rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub x: u16,
    pub y: u16,
    pub rows: u16,
    pub cols: u16,
}

impl GridRect {
    pub fn width(&self) -> u16 {
        self.cols * 4 + 1
    }

    pub fn height(&self) -> u16 {
        self.rows * 2 + 1
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.width() && y >= self.y && y < self.y + self.height()
    }

    /// The cell under a screen coordinate; borders and separators miss
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Position> {
        if !self.contains(x, y) {
            return None;
        }
        let dx = x - self.x;
        let dy = y - self.y;
        if dx % 4 == 0 || dy % 2 == 0 {
            return None;
        }
        Some(Position::new(((dy - 1) / 2) as usize, (dx / 4) as usize))
    }
}

/// The main application state
pub struct App {
    /// Exam title
    pub title: String,
    /// Crossword engine, when the exam has that section
    pub crossword: Option<Crossword>,
    /// Word-search engine, when the exam has that section
    pub word_search: Option<WordSearch>,
    /// Scoped input subscription: events go only to the holder
    pub focus: InputFocus,
    /// Color theme
    pub theme: Theme,
    /// Current screen state
    pub screen_state: ScreenState,
    /// Message to display
    pub message: Option<String>,
    /// Message timer
    message_timer: u32,
    /// Win screen animation
    pub win_screen: WinScreen,
    /// Where the submission is written
    pub output_path: PathBuf,
    /// Footprint of the active grid, set by the renderer each frame
    pub grid_rect: Option<GridRect>,
    /// Last known terminal size, for animations
    pub term_size: (u16, u16),
    /// Answers collected so far; engine completion handlers write here
    submission: Rc<RefCell<Submission>>,
    start_time: Instant,
    /// Sections answered the last time we looked, for announcements
    announced: usize,
    /// Whether the current full answer set has been submitted
    submitted: bool,
}

impl App {
    /// Build the app from exam content, wiring each engine's completion
    /// handler into the shared submission
    pub fn new(exam: &ExamFile, output_path: PathBuf, theme: Theme) -> Result<Self, PuzzleError> {
        let submission = Rc::new(RefCell::new(Submission::new(exam.title())));

        let mut crossword = None;
        if let Some(content) = &exam.contenido_json.crucigrama {
            let mut engine = Crossword::new(
                &content.grid,
                &content.pistas_horizontal,
                &content.pistas_vertical,
            )?;
            let sink = Rc::clone(&submission);
            engine.on_complete(move |grid| {
                let answer = serde_json::to_string(grid).unwrap_or_default();
                sink.borrow_mut().record(SECTION_CROSSWORD, answer);
            });
            crossword = Some(engine);
        }

        let mut word_search = None;
        if let Some(content) = &exam.contenido_json.sopa_letras {
            let mut engine = WordSearch::new(&content.grid, &content.palabras)?;
            let sink = Rc::clone(&submission);
            engine.on_complete(move |words| {
                sink.borrow_mut().record(SECTION_WORD_SEARCH, words.join(", "));
            });
            word_search = Some(engine);
        }

        let mut focus = InputFocus::new();
        if crossword.is_some() {
            focus.acquire(Section::Crossword);
        } else if word_search.is_some() {
            focus.acquire(Section::WordSearch);
        }

        Ok(Self {
            title: exam.title().to_string(),
            crossword,
            word_search,
            focus,
            theme,
            screen_state: ScreenState::Playing,
            message: None,
            message_timer: 0,
            win_screen: WinScreen::new(),
            output_path,
            grid_rect: None,
            term_size: (80, 24),
            submission,
            start_time: Instant::now(),
            announced: 0,
            submitted: false,
        })
    }

    /// The answers collected so far
    pub fn answers(&self) -> Ref<'_, Submission> {
        self.submission.borrow()
    }

    /// Formatted time since the exam was opened
    pub fn elapsed_string(&self) -> String {
        format_time(self.start_time.elapsed().as_secs())
    }

    /// How many puzzle sections this exam hosts
    pub fn section_total(&self) -> usize {
        self.crossword.is_some() as usize + self.word_search.is_some() as usize
    }

    /// Tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Finished => Duration::from_millis(33),
            ScreenState::Playing => Duration::from_millis(100),
        }
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }
        if self.screen_state == ScreenState::Finished {
            let (w, h) = self.term_size;
            self.win_screen.update(w, h);
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30;
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Finished => self.handle_finished_key(key),
            ScreenState::Playing => self.handle_playing_key(key),
        }
    }

    /// Handle a mouse event
    pub fn handle_mouse(&mut self, event: MouseEvent) -> AppAction {
        if self.screen_state != ScreenState::Playing {
            return AppAction::Continue;
        }
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(event.column, event.row),
            MouseEventKind::Drag(MouseButton::Left) => self.pointer_move(event.column, event.row),
            MouseEventKind::Up(MouseButton::Left) => self.commit_selection(),
            _ => {}
        }
        self.check_completion();
        AppAction::Continue
    }

    fn handle_playing_key(&mut self, key: KeyEvent) -> AppAction {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return AppAction::Quit,
            KeyCode::Tab => self.switch_section(),
            KeyCode::Char('s') if ctrl => self.save_submission(),
            KeyCode::Char('r') if ctrl => self.reset_active_section(),
            _ => {
                self.dispatch_key(key);
                self.check_completion();
            }
        }
        AppAction::Continue
    }

    fn handle_finished_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Esc => {
                // Back to the (finished) puzzles for review
                self.screen_state = ScreenState::Playing;
                if self.crossword.is_some() {
                    self.focus.acquire(Section::Crossword);
                } else if self.word_search.is_some() {
                    self.focus.acquire(Section::WordSearch);
                }
            }
            _ => {}
        }
        AppAction::Continue
    }

    /// Route a key to the section holding the input subscription
    fn dispatch_key(&mut self, key: KeyEvent) {
        if !self.focus.is_held_by(Section::Crossword) {
            return;
        }
        let crossword = match self.crossword.as_mut() {
            Some(c) => c,
            None => return,
        };
        match key.code {
            KeyCode::Up => crossword.navigate(Direction::Up),
            KeyCode::Down => crossword.navigate(Direction::Down),
            KeyCode::Left => crossword.navigate(Direction::Left),
            KeyCode::Right => crossword.navigate(Direction::Right),
            KeyCode::Backspace | KeyCode::Delete => crossword.backspace(),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                crossword.type_letter(ch);
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, x: u16, y: u16) {
        let rect = match self.grid_rect {
            Some(r) => r,
            None => return,
        };
        let cell = rect.cell_at(x, y);
        match self.focus.holder() {
            Some(Section::Crossword) => {
                if let (Some(cell), Some(crossword)) = (cell, self.crossword.as_mut()) {
                    crossword.select_cell(cell);
                }
            }
            Some(Section::WordSearch) => {
                if let (Some(cell), Some(word_search)) = (cell, self.word_search.as_mut()) {
                    word_search.begin_selection(cell);
                }
            }
            None => {}
        }
    }

    fn pointer_move(&mut self, x: u16, y: u16) {
        if !self.focus.is_held_by(Section::WordSearch) {
            return;
        }
        let rect = match self.grid_rect {
            Some(r) => r,
            None => return,
        };
        let selecting = self
            .word_search
            .as_ref()
            .map(|w| w.is_selecting())
            .unwrap_or(false);
        if !selecting {
            return;
        }
        if rect.contains(x, y) {
            if let (Some(cell), Some(word_search)) = (rect.cell_at(x, y), self.word_search.as_mut())
            {
                word_search.extend_selection(cell);
            }
        } else {
            // Dragging off the grid commits, so no stuck selection
            self.commit_selection();
        }
    }

    fn commit_selection(&mut self) {
        let hit = match self.word_search.as_mut() {
            Some(word_search) => word_search.end_selection(),
            None => None,
        };
        if let Some(word) = hit {
            self.show_message(&format!("Found {}!", word));
        }
    }

    fn switch_section(&mut self) {
        let next = match self.focus.holder() {
            Some(Section::Crossword) if self.word_search.is_some() => Some(Section::WordSearch),
            Some(Section::WordSearch) if self.crossword.is_some() => Some(Section::Crossword),
            other => other,
        };
        if next != self.focus.holder() {
            if let Some(current) = self.focus.holder() {
                self.focus.release(current);
            }
            if let Some(section) = next {
                self.focus.acquire(section);
            }
            self.grid_rect = None;
        }
    }

    fn reset_active_section(&mut self) {
        match self.focus.holder() {
            Some(Section::Crossword) => {
                if let Some(crossword) = self.crossword.as_mut() {
                    crossword.reset();
                }
                self.submission.borrow_mut().clear(SECTION_CROSSWORD);
            }
            Some(Section::WordSearch) => {
                if let Some(word_search) = self.word_search.as_mut() {
                    word_search.reset();
                }
                self.submission.borrow_mut().clear(SECTION_WORD_SEARCH);
            }
            None => return,
        }
        self.announced = self.submission.borrow().answered_count();
        self.show_message("Puzzle reset");
    }

    /// React to answers recorded by the engines' completion handlers
    fn check_completion(&mut self) {
        let answered = self.submission.borrow().answered_count();
        if answered > self.announced {
            self.show_message("Section complete!");
        }
        self.announced = answered;

        if answered < self.section_total() {
            self.submitted = false;
        } else if !self.submitted {
            self.finish();
        }
    }

    fn finish(&mut self) {
        self.submitted = true;
        self.focus.release_all();
        self.save_submission();
        self.screen_state = ScreenState::Finished;
        self.win_screen.reset();
    }

    fn save_submission(&mut self) {
        self.submission.borrow_mut().elapsed_secs = self.start_time.elapsed().as_secs();
        let result = self.submission.borrow().save(&self.output_path);
        match result {
            Ok(_) => self.show_message("Submission saved"),
            Err(_) => self.show_message("Failed to save submission"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam(json: &str) -> ExamFile {
        serde_json::from_str(json).unwrap()
    }

    fn app_for(json: &str, file: &str) -> App {
        App::new(&exam(json), std::env::temp_dir().join(file), Theme::dark()).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    const CROSSWORD_ONLY: &str = r#"{
        "titulo": "Test",
        "contenido_json": {
            "crucigrama": {
                "grid": [["C", "A", "T"]],
                "pistas_horizontal": ["a feline"],
                "pistas_vertical": []
            }
        }
    }"#;

    const WORD_SEARCH_ONLY: &str = r#"{
        "titulo": "Test",
        "contenido_json": {
            "sopa_letras": {
                "grid": [["C", "A", "T"], ["X", "X", "X"], ["X", "X", "X"]],
                "palabras": ["CAT"]
            }
        }
    }"#;

    const BOTH_SECTIONS: &str = r#"{
        "titulo": "Test",
        "contenido_json": {
            "crucigrama": {
                "grid": [["C", "A", "T"]],
                "pistas_horizontal": ["a feline"],
                "pistas_vertical": []
            },
            "sopa_letras": {
                "grid": [["C", "A", "T"], ["X", "X", "X"], ["X", "X", "X"]],
                "palabras": ["CAT"]
            }
        }
    }"#;

    #[test]
    fn test_grid_rect_hit_testing() {
        let rect = GridRect {
            x: 0,
            y: 0,
            rows: 3,
            cols: 3,
        };

        // Borders and separator rows miss
        assert_eq!(rect.cell_at(0, 1), None);
        assert_eq!(rect.cell_at(4, 1), None);
        assert_eq!(rect.cell_at(1, 0), None);
        assert_eq!(rect.cell_at(1, 2), None);

        assert_eq!(rect.cell_at(1, 1), Some(Position::new(0, 0)));
        assert_eq!(rect.cell_at(5, 3), Some(Position::new(1, 1)));
        assert_eq!(rect.cell_at(9, 5), Some(Position::new(2, 2)));

        // Outside the footprint
        assert_eq!(rect.cell_at(13, 1), None);
        assert!(!rect.contains(0, 7));
    }

    #[test]
    fn test_crossword_completion_writes_submission() {
        let mut app = app_for(CROSSWORD_ONLY, "wordgrid_test_crossword.json");
        assert!(app.focus.is_held_by(Section::Crossword));

        app.grid_rect = Some(GridRect {
            x: 0,
            y: 0,
            rows: 1,
            cols: 3,
        });
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));

        for ch in ['c', 'a', 't'] {
            app.handle_key(key(KeyCode::Char(ch)));
        }

        assert_eq!(app.screen_state, ScreenState::Finished);
        assert_eq!(app.focus.holder(), None);
        assert!(app.answers().is_answered(SECTION_CROSSWORD));
        assert_eq!(
            app.answers().respuestas.get(SECTION_CROSSWORD).unwrap(),
            r#"[["C","A","T"]]"#
        );
        assert!(app.output_path.exists());
        std::fs::remove_file(&app.output_path).ok();
    }

    #[test]
    fn test_word_search_drag_completes_exam() {
        let mut app = app_for(WORD_SEARCH_ONLY, "wordgrid_test_wordsearch.json");
        assert!(app.focus.is_held_by(Section::WordSearch));

        app.grid_rect = Some(GridRect {
            x: 0,
            y: 0,
            rows: 3,
            cols: 3,
        });
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 9, 1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 9, 1));

        assert_eq!(app.screen_state, ScreenState::Finished);
        assert_eq!(
            app.answers().respuestas.get(SECTION_WORD_SEARCH).unwrap(),
            "CAT"
        );
        std::fs::remove_file(&app.output_path).ok();
    }

    #[test]
    fn test_drag_leaving_grid_commits() {
        let mut app = app_for(WORD_SEARCH_ONLY, "wordgrid_test_leave.json");
        app.grid_rect = Some(GridRect {
            x: 0,
            y: 0,
            rows: 3,
            cols: 3,
        });

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 9, 1));
        // Pointer leaves the grid: implicit commit, no stuck drag
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 50, 20));

        let word_search = app.word_search.as_ref().unwrap();
        assert!(!word_search.is_selecting());
        assert_eq!(word_search.found_count(), 1);
        std::fs::remove_file(&app.output_path).ok();
    }

    #[test]
    fn test_keys_only_reach_focused_section() {
        let mut app = app_for(BOTH_SECTIONS, "wordgrid_test_focus.json");
        assert!(app.focus.is_held_by(Section::Crossword));

        app.handle_key(key(KeyCode::Tab));
        assert!(app.focus.is_held_by(Section::WordSearch));

        // Typing while the word search holds the subscription must not
        // touch the crossword grid
        app.grid_rect = Some(GridRect {
            x: 0,
            y: 0,
            rows: 3,
            cols: 3,
        });
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        app.handle_key(key(KeyCode::Char('c')));
        let crossword = app.crossword.as_ref().unwrap();
        assert_eq!(crossword.letter(Position::new(0, 0)), None);

        app.handle_key(key(KeyCode::Tab));
        assert!(app.focus.is_held_by(Section::Crossword));
    }

    #[test]
    fn test_reset_clears_section_answer() {
        let mut app = app_for(BOTH_SECTIONS, "wordgrid_test_reset.json");
        app.handle_key(key(KeyCode::Tab));
        app.grid_rect = Some(GridRect {
            x: 0,
            y: 0,
            rows: 3,
            cols: 3,
        });

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 9, 1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 9, 1));
        assert!(app.answers().is_answered(SECTION_WORD_SEARCH));
        assert_eq!(app.screen_state, ScreenState::Playing);

        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(!app.answers().is_answered(SECTION_WORD_SEARCH));
        assert_eq!(app.word_search.as_ref().unwrap().found_count(), 0);
    }

    #[test]
    fn test_word_search_only_exam_gets_initial_focus() {
        let app = app_for(WORD_SEARCH_ONLY, "wordgrid_test_initial.json");
        assert!(app.focus.is_held_by(Section::WordSearch));
        assert_eq!(app.section_total(), 1);
    }

    #[test]
    fn test_finished_screen_ignores_puzzle_input() {
        let mut app = app_for(CROSSWORD_ONLY, "wordgrid_test_finished.json");
        app.grid_rect = Some(GridRect {
            x: 0,
            y: 0,
            rows: 1,
            cols: 3,
        });
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 1, 1));
        for ch in ['c', 'a', 't'] {
            app.handle_key(key(KeyCode::Char(ch)));
        }
        assert_eq!(app.screen_state, ScreenState::Finished);

        // Keys no longer reach the torn-down puzzle
        app.handle_key(key(KeyCode::Char('x')));
        let crossword = app.crossword.as_ref().unwrap();
        assert_eq!(crossword.letter(Position::new(0, 0)), Some('C'));

        // Esc returns for review, q quits
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert!(matches!(
            app.handle_key(key(KeyCode::Esc)),
            AppAction::Quit
        ));
        std::fs::remove_file(&app.output_path).ok();
    }
}
