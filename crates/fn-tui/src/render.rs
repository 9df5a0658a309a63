use crate::app::{App, Screen, FUNCTIONS};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use fn_core::{Board, SIDE};
use std::io;

/// Grid dimensions: 9 cells of 3 chars plus 10 borders, 9 cell rows plus
/// 10 separator rows.
const GRID_WIDTH: u16 = 37;
const GRID_HEIGHT: u16 = 19;

pub fn render(stdout: &mut io::Stdout, app: &App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    match app.screen {
        Screen::Home => render_home(stdout, app, term_width)?,
        Screen::Sudoku => render_sudoku(stdout, app, term_width)?,
        Screen::Letters => render_letters(stdout, app, term_width, term_height)?,
    }

    render_status(stdout, app, term_width, term_height)?;

    execute!(stdout, Show)?;
    Ok(())
}

fn render_home(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let x = margin(term_width, 60);

    execute!(
        stdout,
        MoveTo(x, 1),
        SetForegroundColor(theme.title),
        Print("Fn"),
        MoveTo(x, 2),
        SetForegroundColor(theme.info),
        Print(app.api_base())
    )?;

    for (i, function) in FUNCTIONS.iter().enumerate() {
        let y = 4 + i as u16 * 3;
        let selected = i == app.home_selection;
        if selected {
            execute!(stdout, SetBackgroundColor(theme.selected_bg))?;
        }
        execute!(
            stdout,
            MoveTo(x, y),
            SetForegroundColor(theme.fg),
            Print(format!(" {:<10}", function.name)),
            SetForegroundColor(theme.info),
            Print(format!("{:<24}", function.endpoint))
        )?;
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            MoveTo(x + 1, y + 1),
            SetForegroundColor(theme.info),
            Print(function.description)
        )?;
    }

    let controls_y = 4 + FUNCTIONS.len() as u16 * 3 + 1;
    render_controls(
        stdout,
        app,
        x,
        controls_y,
        &[("j/k", "select"), ("Enter", "open"), ("q", "quit")],
    )
}

fn render_sudoku(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let total_width = GRID_WIDTH + 28; // grid + gap + info panel
    let start_x = margin(term_width, total_width);
    let start_y = 1;

    render_grid(stdout, app, start_x, start_y)?;

    let info_x = start_x + GRID_WIDTH + 3;
    execute!(
        stdout,
        MoveTo(info_x, start_y),
        SetForegroundColor(theme.title),
        Print("Sudoku Solver"),
        MoveTo(info_x, start_y + 1),
        SetForegroundColor(theme.info),
        Print("/api/sudoku-solver")
    )?;
    if app.solving() {
        execute!(
            stdout,
            MoveTo(info_x, start_y + 3),
            SetForegroundColor(theme.pending),
            Print("Solving...")
        )?;
    }

    let controls_y = start_y + GRID_HEIGHT + 1;
    render_controls(
        stdout,
        app,
        start_x,
        controls_y,
        &[
            ("0-9", "fill"),
            ("arrows", "move"),
            ("Enter", "solve"),
            ("S-X", "clear"),
            ("Esc", "back"),
        ],
    )
}

fn render_grid(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let thick = "+===+===+===+===+===+===+===+===+===+";
    let thin = "+---+---+---+---+---+---+---+---+---+";

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.box_border),
        Print(thick)
    )?;

    for row in 0..SIDE {
        let cell_y = y + 1 + row as u16 * 2;
        execute!(stdout, MoveTo(x, cell_y))?;

        for col in 0..SIDE {
            // Thick borders at 3x3 boundaries
            let (border, color) = if col % 3 == 0 {
                ("\u{2551}", theme.box_border)
            } else {
                ("\u{2502}", theme.border)
            };
            execute!(stdout, SetForegroundColor(color), Print(border))?;
            render_cell(stdout, app, Board::index(row, col))?;
        }
        execute!(
            stdout,
            SetForegroundColor(theme.box_border),
            Print("\u{2551}")
        )?;

        let sep = if (row + 1) % 3 == 0 { thick } else { thin };
        let sep_color = if (row + 1) % 3 == 0 {
            theme.box_border
        } else {
            theme.border
        };
        execute!(
            stdout,
            MoveTo(x, cell_y + 1),
            SetForegroundColor(sep_color),
            Print(sep)
        )?;
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, index: usize) -> io::Result<()> {
    let theme = &app.theme;
    let is_cursor = index == app.cursor;
    let in_cursor_line = Board::row(index) == Board::row(app.cursor)
        || Board::col(index) == Board::col(app.cursor);

    let bg = if is_cursor {
        theme.selected_bg
    } else if in_cursor_line {
        theme.highlight_bg
    } else {
        theme.bg
    };

    let digit = app.board.get(index).unwrap_or(0);
    let (text, fg) = if digit == 0 {
        (" . ".to_string(), theme.empty)
    } else {
        (format!(" {} ", digit), theme.filled)
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(text),
        SetBackgroundColor(theme.bg)
    )?;
    Ok(())
}

fn render_letters(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let x = margin(term_width, 60);

    execute!(
        stdout,
        MoveTo(x, 1),
        SetForegroundColor(theme.title),
        Print("Letters to Words"),
        MoveTo(x, 2),
        SetForegroundColor(theme.info),
        Print("/api/letters-to-words")
    )?;

    execute!(
        stdout,
        MoveTo(x, 4),
        SetForegroundColor(theme.info),
        Print("Letters: "),
        SetForegroundColor(theme.fg),
        Print(app.query.letters()),
        SetForegroundColor(theme.key),
        Print("_")
    )?;
    execute!(
        stdout,
        MoveTo(x, 5),
        SetForegroundColor(theme.info),
        Print(format!("Minimum word size: {}", app.query.min().as_u8()))
    )?;
    if app.generating() {
        execute!(
            stdout,
            MoveTo(x, 7),
            SetForegroundColor(theme.pending),
            Print("Generating...")
        )?;
    }

    // Words flow down three columns, fully replaced on each response.
    let words_y = 9;
    let col_width = 18;
    for (i, word) in app.words.iter().enumerate() {
        let col = (i % 3) as u16;
        let row = (i / 3) as u16;
        let y = words_y + row;
        if y >= term_height.saturating_sub(3) {
            execute!(
                stdout,
                MoveTo(x, y),
                SetForegroundColor(theme.info),
                Print(format!("... {} more", app.words.len() - i))
            )?;
            break;
        }
        execute!(
            stdout,
            MoveTo(x + col * col_width, y),
            SetForegroundColor(theme.fg),
            Print(word)
        )?;
    }

    let controls_y = term_height.saturating_sub(2);
    render_controls(
        stdout,
        app,
        x,
        controls_y,
        &[
            ("a-z", "type"),
            ("Tab", "min size"),
            ("Enter", "generate"),
            ("Esc", "back"),
        ],
    )
}

fn render_controls(
    stdout: &mut io::Stdout,
    app: &App,
    x: u16,
    y: u16,
    bindings: &[(&str, &str)],
) -> io::Result<()> {
    let theme = &app.theme;
    execute!(stdout, MoveTo(x, y))?;
    for (key, action) in bindings {
        execute!(
            stdout,
            SetForegroundColor(theme.key),
            Print(format!("[{}] ", key)),
            SetForegroundColor(theme.info),
            Print(format!("{}  ", action))
        )?;
    }
    Ok(())
}

fn render_status(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let Some(ref message) = app.message else {
        return Ok(());
    };
    let theme = &app.theme;
    let color = if message.error {
        theme.error
    } else {
        theme.info
    };
    let x = margin(term_width, message.text.len() as u16);
    execute!(
        stdout,
        MoveTo(x, term_height.saturating_sub(1)),
        SetForegroundColor(color),
        Print(&message.text)
    )?;
    Ok(())
}

fn margin(term_width: u16, content_width: u16) -> u16 {
    if term_width > content_width {
        (term_width - content_width) / 2
    } else {
        1
    }
}
