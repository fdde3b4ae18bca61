use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use matchday_terminal::commentary_store::{self, CommentaryStore};
use matchday_terminal::dashboard::{Dashboard, MatchupView, SaveError};
use matchday_terminal::fixture_dataset::{NeighborSummary, load_fixtures};
use matchday_terminal::persist;
use matchday_terminal::state::{AppState, Focus};

const DEFAULT_FIXTURES_PATH: &str = "data/epl-2025-GMTStandardTime.csv";

struct App {
    dashboard: Dashboard,
    state: AppState,
    should_quit: bool,
    notes_count: i64,
}

impl App {
    fn new(dashboard: Dashboard) -> Self {
        let teams = dashboard.teams().to_vec();
        let notes_count = dashboard.commentary_count();
        Self {
            dashboard,
            state: AppState::new(teams),
            should_quit: false,
            notes_count,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            self.save_commentary();
            return;
        }
        match self.state.focus {
            Focus::Commentary => match key.code {
                KeyCode::Esc => self.state.focus = Focus::HomeList,
                KeyCode::Tab => self.state.cycle_focus_next(),
                KeyCode::BackTab => self.state.cycle_focus_prev(),
                KeyCode::Enter => self.state.commentary_newline(),
                KeyCode::Backspace => self.state.commentary_backspace(),
                KeyCode::Char(ch) => self.state.commentary_insert(ch),
                _ => {}
            },
            Focus::HomeList | Focus::AwayList => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Tab => self.state.cycle_focus_next(),
                KeyCode::BackTab => self.state.cycle_focus_prev(),
                KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
                KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
                KeyCode::Enter => {
                    if self.state.commit_selection() {
                        self.state.status = None;
                        self.refresh_matchup();
                    }
                }
                KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
                _ => {}
            },
        }
    }

    fn selected_pair(&self) -> Option<(String, String)> {
        match (self.state.selected_home(), self.state.selected_away()) {
            (Some(home), Some(away)) => Some((home.to_string(), away.to_string())),
            _ => None,
        }
    }

    fn refresh_matchup(&mut self) {
        let Some((home, away)) = self.selected_pair() else {
            self.state.matchup = None;
            self.state.validation = None;
            return;
        };

        match self.dashboard.select_matchup(&home, &away) {
            Ok(view) => {
                self.state.validation = None;
                match &view {
                    MatchupView::Found(detail) => {
                        self.state.commentary_buffer = detail.commentary.clone();
                        if let Some(note) = &detail.commentary_note {
                            self.state
                                .push_log(format!("[WARN] Commentary load failed: {note}"));
                        }
                    }
                    MatchupView::NotFound { .. } => {
                        self.state.commentary_buffer.clear();
                    }
                }
                self.state.commentary_dirty = false;
                self.state.matchup = Some(view);
            }
            Err(err) => {
                self.state.validation = Some(err.to_string());
                self.state.matchup = None;
                self.state.commentary_buffer.clear();
                self.state.commentary_dirty = false;
            }
        }
    }

    fn save_commentary(&mut self) {
        let Some((home, away)) = self.selected_pair() else {
            self.state.validation =
                Some("both a home and an away team must be selected".to_string());
            return;
        };

        match self
            .dashboard
            .save_commentary(&home, &away, &self.state.commentary_buffer)
        {
            Ok(()) => {
                self.state.commentary_dirty = false;
                self.state.status = Some("Commentary saved".to_string());
                self.state
                    .push_log(format!("[INFO] Saved commentary for {home} vs {away}"));
                self.notes_count = self.dashboard.commentary_count();
            }
            Err(SaveError::Selection(err)) => {
                self.state.validation = Some(err.to_string());
            }
            Err(SaveError::Store(err)) => {
                self.state.status = Some(format!("Save failed: {err}"));
                self.state.push_log(format!("[WARN] Save failed: {err}"));
            }
        }
    }
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let fixtures_path = parse_path_arg("--fixtures")
        .or_else(|| path_from_env("FIXTURES_CSV"))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES_PATH));
    let dataset = load_fixtures(&fixtures_path)
        .with_context(|| format!("load fixtures from {}", fixtures_path.display()))?;

    let db_path = parse_path_arg("--db")
        .or_else(|| path_from_env("COMMENTARY_DB"))
        .or_else(commentary_store::default_db_path)
        .context("unable to resolve commentary db path")?;
    let store = CommentaryStore::open(&db_path)
        .with_context(|| format!("open commentary db {}", db_path.display()))?;

    let dashboard = Dashboard::new(dataset, store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(dashboard);
    persist::load_into_state(&mut app.state);
    app.refresh_matchup();

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    persist::save_from_state(&app.state);

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_body(frame, chunks[1], app);

    frame.render_widget(status_line(&app.state), chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let title = format!(
        "MATCHDAY TERMINAL | {} teams | {} fixtures | {} saved notes",
        app.state.teams.len(),
        app.dashboard.fixtures().fixtures().len(),
        app.notes_count
    );
    let line1 = format!("  ,-.  {title}");
    let line2 = " (   )".to_string();
    let line3 = "  `-'".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    match state.focus {
        Focus::HomeList | Focus::AwayList => {
            "Tab Focus | j/k/↑/↓ Move | Enter Select | Ctrl-S Save | ? Help | q Quit".to_string()
        }
        Focus::Commentary => {
            "Type to edit | Enter Newline | Backspace Delete | Ctrl-S Save | Esc/Tab Leave"
                .to_string()
        }
    }
}

fn status_line(state: &AppState) -> Paragraph<'_> {
    if let Some(validation) = &state.validation {
        return Paragraph::new(validation.as_str()).style(Style::default().fg(Color::Red));
    }
    if let Some(status) = &state.status {
        return Paragraph::new(status.as_str()).style(Style::default().fg(Color::Green));
    }
    let last_log = state.logs.back().map(String::as_str).unwrap_or("");
    Paragraph::new(last_log).style(Style::default().fg(Color::DarkGray))
}

fn render_body(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26),
            Constraint::Min(34),
            Constraint::Length(40),
        ])
        .split(area);

    let pickers = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    render_team_list(
        frame,
        pickers[0],
        "Home Team",
        &app.state,
        app.state.home_cursor,
        app.state.home_selected,
        app.state.focus == Focus::HomeList,
    );
    render_team_list(
        frame,
        pickers[1],
        "Away Team",
        &app.state,
        app.state.away_cursor,
        app.state.away_selected,
        app.state.focus == Focus::AwayList,
    );

    let matchup = Paragraph::new(matchup_text(&app.state))
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Matchup").borders(Borders::ALL));
    frame.render_widget(matchup, columns[1]);

    render_commentary(frame, columns[2], &app.state);
}

fn render_team_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    state: &AppState,
    cursor: usize,
    selected: Option<usize>,
    focused: bool,
) {
    let title = if focused {
        format!("{title} •")
    } else {
        title.to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.teams.is_empty() {
        let empty =
            Paragraph::new("No teams loaded").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }
    if inner.height == 0 {
        return;
    }

    let visible = inner.height as usize;
    let (start, end) = visible_range(cursor, state.teams.len(), visible);

    for (row, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: inner.x,
            y: inner.y + row as u16,
            width: inner.width,
            height: 1,
        };
        let marker = if selected == Some(idx) { "*" } else { " " };
        let line = format!("{marker} {}", state.teams[idx]);
        let style = if focused && idx == cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else if selected == Some(idx) {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        frame.render_widget(Paragraph::new(line).style(style), row_area);
    }
}

fn matchup_text(state: &AppState) -> String {
    let Some(view) = &state.matchup else {
        return match (state.selected_home(), state.selected_away()) {
            (None, None) => "Select a home and an away team.".to_string(),
            (Some(_), None) => "Now select an away team.".to_string(),
            (None, Some(_)) => "Now select a home team.".to_string(),
            (Some(_), Some(_)) => String::new(),
        };
    };

    match view {
        MatchupView::NotFound {
            home_team,
            away_team,
        } => format!("No fixture found for {home_team} vs {away_team}."),
        MatchupView::Found(detail) => {
            let fixture = &detail.fixture;
            let mut lines = vec![
                format!("{} vs {}", fixture.home_team, fixture.away_team),
                String::new(),
                format!("Date:  {}", fixture.kickoff.format("%d/%m/%Y")),
                format!("Time:  {}", fixture.kickoff.format("%H:%M")),
                format!("Venue: {}", fixture.location),
                String::new(),
                fixture.home_team.clone(),
                neighbor_line("prev", detail.home_context.previous.as_ref()),
                neighbor_line("next", detail.home_context.next.as_ref()),
                String::new(),
                fixture.away_team.clone(),
                neighbor_line("prev", detail.away_context.previous.as_ref()),
                neighbor_line("next", detail.away_context.next.as_ref()),
            ];
            if state.commentary_dirty {
                lines.push(String::new());
                lines.push("Unsaved commentary edits (Ctrl-S to save).".to_string());
            }
            lines.join("\n")
        }
    }
}

fn neighbor_line(label: &str, neighbor: Option<&NeighborSummary>) -> String {
    match neighbor {
        Some(summary) => format!("  {label}: {}", summary.line()),
        None => format!("  {label}: no fixture found"),
    }
}

fn render_commentary(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.focus == Focus::Commentary;
    let title = match (focused, state.commentary_dirty) {
        (true, true) => "Commentary • (unsaved)",
        (true, false) => "Commentary •",
        (false, true) => "Commentary (unsaved)",
        (false, false) => "Commentary",
    };
    let mut text = state.commentary_buffer.clone();
    if focused {
        text.push('▌');
    }
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Matchday Terminal - Help",
        "",
        "Pickers:",
        "  Tab / Shift-Tab   Cycle focus",
        "  j/k or ↑/↓        Move cursor",
        "  Enter             Select team",
        "  ?                 Toggle help",
        "  q / Esc           Quit",
        "",
        "Commentary:",
        "  Type              Edit text",
        "  Enter             New line",
        "  Ctrl-S            Save",
        "  Esc               Back to pickers",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

fn parse_path_arg(flag: &str) -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}

fn path_from_env(name: &str) -> Option<PathBuf> {
    let value = std::env::var(name).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(PathBuf::from(trimmed))
}
