use crate::app::{App, GridRect, ScreenState};
use crate::focus::Section;
use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use std::io;
use wordgrid_core::{Axis, ClueEntry, Position};

const GRID_X: u16 = 2;
const GRID_Y: u16 = 3;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;
    app.term_size = (term_width, term_height);

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    match app.screen_state {
        ScreenState::Playing => render_playing(stdout, app, term_width, term_height)?,
        ScreenState::Finished => render_finished(stdout, app, term_width, term_height)?,
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_playing(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    render_header(stdout, app)?;

    match app.focus.holder() {
        Some(Section::Crossword) => render_crossword(stdout, app, term_height)?,
        Some(Section::WordSearch) => render_word_search(stdout, app, term_height)?,
        None => {}
    }

    render_controls(stdout, app, term_height)?;
    if let Some(msg) = app.message.clone() {
        render_message(stdout, app, &msg, term_width, term_height)?;
    }
    Ok(())
}

fn render_header(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let theme = &app.theme;
    execute!(
        stdout,
        MoveTo(GRID_X, 1),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.fg),
        SetAttribute(Attribute::Bold),
        Print(&app.title),
        SetAttribute(Attribute::NormalIntensity)
    )?;

    let has_both = app.crossword.is_some() && app.word_search.is_some();
    let section = match app.focus.holder() {
        Some(Section::Crossword) => "Crossword",
        Some(Section::WordSearch) => "Word search",
        None => "",
    };
    let tabs = if has_both {
        format!("[{}]  (Tab to switch)", section)
    } else {
        format!("[{}]", section)
    };
    execute!(
        stdout,
        Print("  "),
        SetForegroundColor(theme.info),
        Print(tabs),
        Print("  "),
        SetForegroundColor(theme.key),
        Print(app.elapsed_string())
    )?;
    Ok(())
}

fn grid_frame_line(cols: u16) -> String {
    let mut line = String::from("+");
    for _ in 0..cols {
        line.push_str("---+");
    }
    line
}

fn render_crossword(stdout: &mut io::Stdout, app: &mut App, term_height: u16) -> io::Result<()> {
    let theme = app.theme.clone();
    let crossword = match app.crossword.as_ref() {
        Some(c) => c,
        None => return Ok(()),
    };
    let rect = GridRect {
        x: GRID_X,
        y: GRID_Y,
        rows: crossword.rows() as u16,
        cols: crossword.cols() as u16,
    };
    let frame = grid_frame_line(rect.cols);

    execute!(
        stdout,
        MoveTo(rect.x, rect.y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(&frame)
    )?;

    for row in 0..rect.rows {
        let cell_y = rect.y + 1 + row * 2;
        execute!(
            stdout,
            MoveTo(rect.x, cell_y),
            SetForegroundColor(theme.border),
            Print("|")
        )?;

        for col in 0..rect.cols {
            let pos = Position::new(row as usize, col as usize);
            if crossword.is_blocked(pos) {
                execute!(
                    stdout,
                    SetBackgroundColor(theme.blocked),
                    Print("   "),
                    SetBackgroundColor(theme.bg)
                )?;
            } else {
                let bg = if crossword.cursor() == Some(pos) {
                    theme.selected_bg
                } else if crossword.in_active_word(pos) {
                    theme.word_bg
                } else {
                    theme.bg
                };
                let (text, color) = match crossword.letter(pos) {
                    Some(ch) => (format!(" {} ", ch), theme.letter),
                    None => match crossword.cell_number(pos) {
                        Some(number) => (format!("{:<3}", number), theme.clue_number),
                        None => ("   ".to_string(), theme.fg),
                    },
                };
                execute!(
                    stdout,
                    SetBackgroundColor(bg),
                    SetForegroundColor(color),
                    Print(text),
                    SetBackgroundColor(theme.bg)
                )?;
            }
            execute!(stdout, SetForegroundColor(theme.border), Print("|"))?;
        }

        execute!(
            stdout,
            MoveTo(rect.x, cell_y + 1),
            SetForegroundColor(theme.border),
            Print(&frame)
        )?;
    }

    let panel_x = rect.x + rect.width() + 3;
    let mut line = rect.y;
    line = render_clue_list(
        stdout,
        &theme,
        panel_x,
        line,
        term_height,
        "Across",
        crossword.across_clues(),
        crossword.axis() == Axis::Across,
    )?;
    line += 1;
    render_clue_list(
        stdout,
        &theme,
        panel_x,
        line,
        term_height,
        "Down",
        crossword.down_clues(),
        crossword.axis() == Axis::Down,
    )?;

    app.grid_rect = Some(rect);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn render_clue_list(
    stdout: &mut io::Stdout,
    theme: &Theme,
    x: u16,
    mut y: u16,
    term_height: u16,
    label: &str,
    clues: &[ClueEntry],
    active: bool,
) -> io::Result<u16> {
    if y + 1 >= term_height {
        return Ok(y);
    }
    let label_color = if active { theme.key } else { theme.info };
    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(label_color),
        Print(label)
    )?;
    y += 1;

    for clue in clues {
        if y + 2 >= term_height {
            break;
        }
        execute!(
            stdout,
            MoveTo(x, y),
            SetForegroundColor(theme.fg),
            Print(format!("{:>2}. {}", clue.number, clue.text))
        )?;
        y += 1;
    }
    Ok(y)
}

fn render_word_search(stdout: &mut io::Stdout, app: &mut App, term_height: u16) -> io::Result<()> {
    let theme = app.theme.clone();
    let word_search = match app.word_search.as_ref() {
        Some(w) => w,
        None => return Ok(()),
    };
    let rect = GridRect {
        x: GRID_X,
        y: GRID_Y,
        rows: word_search.rows() as u16,
        cols: word_search.cols() as u16,
    };
    let frame = grid_frame_line(rect.cols);
    let selection = word_search.selection_cells();

    execute!(
        stdout,
        MoveTo(rect.x, rect.y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.border),
        Print(&frame)
    )?;

    for row in 0..rect.rows {
        let cell_y = rect.y + 1 + row * 2;
        execute!(
            stdout,
            MoveTo(rect.x, cell_y),
            SetForegroundColor(theme.border),
            Print("|")
        )?;

        for col in 0..rect.cols {
            let pos = Position::new(row as usize, col as usize);
            let (bg, fg) = if word_search.is_highlighted(pos) {
                (theme.found_bg, theme.found_fg)
            } else if selection.contains(&pos) {
                (theme.selection_bg, theme.fg)
            } else {
                (theme.bg, theme.fg)
            };
            let letter = word_search.letter(pos).unwrap_or(' ');
            execute!(
                stdout,
                SetBackgroundColor(bg),
                SetForegroundColor(fg),
                Print(format!(" {} ", letter)),
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|")
            )?;
        }

        execute!(
            stdout,
            MoveTo(rect.x, cell_y + 1),
            SetForegroundColor(theme.border),
            Print(&frame)
        )?;
    }

    let panel_x = rect.x + rect.width() + 3;
    let mut y = rect.y;
    execute!(
        stdout,
        MoveTo(panel_x, y),
        SetForegroundColor(theme.info),
        Print(format!(
            "Words ({}/{})",
            word_search.found_count(),
            word_search.words().len()
        ))
    )?;
    y += 1;

    for word in word_search.words() {
        if y + 2 >= term_height {
            break;
        }
        if word.is_found() {
            execute!(
                stdout,
                MoveTo(panel_x, y),
                SetForegroundColor(theme.found_fg),
                SetAttribute(Attribute::CrossedOut),
                Print(word.display()),
                SetAttribute(Attribute::NotCrossedOut)
            )?;
        } else {
            execute!(
                stdout,
                MoveTo(panel_x, y),
                SetForegroundColor(theme.fg),
                Print(word.display())
            )?;
        }
        y += 1;
    }

    app.grid_rect = Some(rect);
    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, term_height: u16) -> io::Result<()> {
    let theme = &app.theme;
    let controls = match app.focus.holder() {
        Some(Section::Crossword) => {
            "click select · type letters · arrows move · Ctrl+R reset · Ctrl+S save · Esc quit"
        }
        _ => "drag across letters to select · Ctrl+R reset · Ctrl+S save · Esc quit",
    };
    execute!(
        stdout,
        MoveTo(GRID_X, term_height.saturating_sub(2)),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.info),
        Print(controls)
    )?;
    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let x = (term_width.saturating_sub(msg.len() as u16)) / 2;
    execute!(
        stdout,
        MoveTo(x, term_height.saturating_sub(4)),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.success),
        Print(msg)
    )?;
    Ok(())
}

fn render_finished(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    for (x, y, ch, color) in app.win_screen.glyphs() {
        if x < term_width && y < term_height {
            execute!(
                stdout,
                MoveTo(x, y),
                SetBackgroundColor(theme.bg),
                SetForegroundColor(color),
                Print(ch)
            )?;
        }
    }

    let center_y = term_height / 2;
    let lines = [
        (
            "Exam complete!".to_string(),
            theme.success,
            true,
        ),
        (
            format!(
                "Time: {}   Sections answered: {}",
                crate::submission::format_time(app.answers().elapsed_secs),
                app.answers().answered_count()
            ),
            theme.fg,
            false,
        ),
        (
            format!("Submission written to {}", app.output_path.display()),
            theme.info,
            false,
        ),
        ("Esc review · q quit".to_string(), theme.key, false),
    ];

    for (i, (text, color, bold)) in lines.iter().enumerate() {
        let x = (term_width.saturating_sub(text.len() as u16)) / 2;
        let y = center_y.saturating_sub(2) + i as u16 * 2;
        if *bold {
            execute!(
                stdout,
                MoveTo(x, y),
                SetBackgroundColor(theme.bg),
                SetForegroundColor(*color),
                SetAttribute(Attribute::Bold),
                Print(text),
                SetAttribute(Attribute::NormalIntensity)
            )?;
        } else {
            execute!(
                stdout,
                MoveTo(x, y),
                SetBackgroundColor(theme.bg),
                SetForegroundColor(*color),
                Print(text)
            )?;
        }
    }
    Ok(())
}
