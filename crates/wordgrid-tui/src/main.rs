mod animations;
mod app;
mod exam;
mod focus;
mod render;
mod submission;
mod theme;

use app::{App, AppAction};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use exam::ExamFile;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use submission::Submission;
use theme::Theme;

/// Play the crossword and word-search sections of an exam
#[derive(Parser)]
#[command(name = "wordgrid", version)]
struct Args {
    /// Exam content JSON file
    exam: PathBuf,

    /// Where to write the submission (defaults to the local data directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Color theme: dark, light or high-contrast
    #[arg(long, default_value = "dark")]
    theme: String,
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let exam = match ExamFile::load(&args.exam) {
        Ok(exam) => exam,
        Err(e) => {
            eprintln!("Could not load exam {}: {}", args.exam.display(), e);
            std::process::exit(1);
        }
    };
    if !exam.has_puzzles() {
        eprintln!("No puzzles available: this exam has no crossword or word-search content.");
        std::process::exit(1);
    }

    let theme = match Theme::by_name(&args.theme) {
        Some(theme) => theme,
        None => {
            eprintln!("Unknown theme '{}', using dark.", args.theme);
            Theme::dark()
        }
    };
    let output = args.output.unwrap_or_else(Submission::default_path);

    let mut app = match App::new(&exam, output, theme) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Could not open exam puzzles: {}", e);
            std::process::exit(1);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for animation updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    match app.handle_key(key) {
                        AppAction::Continue => {}
                        AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => match app.handle_mouse(mouse) {
                    AppAction::Continue => {}
                    AppAction::Quit => break,
                },
                _ => {}
            }
        }

        // Tick animations and timers
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
