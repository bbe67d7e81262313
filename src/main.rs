use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use academy_board::board::{DisplayRecord, SortKey};
use academy_board::config::{Settings, source_label};
use academy_board::countdown::spawn_countdown;
use academy_board::models::queue_label;
use academy_board::provider::spawn_provider;
use academy_board::state::{AppState, Delta, LoadStatus, ProviderCommand, apply_delta};

struct App {
    state: AppState,
    settings: Settings,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(settings: Settings, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(settings.default_queue),
            settings,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            match key.code {
                KeyCode::Enter => self.state.finish_search(),
                KeyCode::Esc => self.state.clear_search(),
                KeyCode::Backspace => self.state.search_pop(),
                KeyCode::Char(ch) => self.state.search_push(ch),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('f') => self.state.toggle_queue(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('s') => {
                let next = next_sort_key(self.state.sort.key);
                self.state.select_sort(next);
            }
            KeyCode::Char(ch @ '1'..='8') => {
                let idx = (ch as usize) - ('1' as usize);
                if let Some(key) = SortKey::ALL.get(idx) {
                    self.state.select_sort(*key);
                }
            }
            KeyCode::Char('/') => self.state.start_search(),
            KeyCode::Char('d') | KeyCode::Enter => self.state.toggle_detail(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_players(true),
            KeyCode::Esc => {
                if self.state.help_overlay {
                    self.state.help_overlay = false;
                } else if self.state.detail_open {
                    self.state.detail_open = false;
                } else {
                    self.state.clear_search();
                }
            }
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn request_players(&mut self, announce: bool) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Players fetch unavailable");
            return;
        };
        let request_id = self.state.begin_fetch();
        if tx
            .send(ProviderCommand::FetchPlayers { request_id })
            .is_err()
        {
            self.state.status = LoadStatus::Failed("provider stopped".to_string());
            self.state.push_log("[WARN] Players request failed");
        } else if announce {
            self.state
                .push_log(format!("[INFO] Players request #{request_id} sent"));
        }
    }
}

fn next_sort_key(current: SortKey) -> SortKey {
    let pos = SortKey::ALL.iter().position(|k| *k == current).unwrap_or(0);
    SortKey::ALL[(pos + 1) % SortKey::ALL.len()]
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let settings = Settings::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let mut countdown = spawn_countdown(tx.clone());
    let _provider = spawn_provider(settings.clone(), tx, cmd_rx);

    let mut app = App::new(settings, Some(cmd_tx));
    app.state.push_log(format!(
        "[INFO] Source: {} ({})",
        source_label(app.settings.source),
        app.settings.players_url()
    ));
    app.request_players(false);
    let res = run_app(&mut terminal, &mut app, rx);

    countdown.stop();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
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
    let state = &app.state;
    let detail_height = if state.detail_open { 7 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(detail_height),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    render_board(frame, chunks[1], state);

    if state.detail_open {
        let detail = Paragraph::new(detail_text(state)).block(
            Block::default()
                .title("Main Champions")
                .borders(Borders::ALL),
        );
        frame.render_widget(detail, chunks[2]);
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(footer_text(state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[4]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let state = &app.state;
    let line1 = "\\_/  PUZZLES ACADEMY  \\_/".to_string();
    let line2 = "\"Why is it called Puzzles? That's the puzzle!\"".to_string();
    let meta = if state.meta.total > 0 {
        format!(
            " | Page {}/{} ({} total)",
            state.meta.page, state.meta.last_page, state.meta.total
        )
    } else {
        String::new()
    };
    let line3 = format!(
        "Next snapshot in {} | {} | Sort: {} | {}{}",
        state.countdown.display(),
        queue_label(state.queue),
        state.sort_label(),
        source_label(app.settings.source),
        meta
    );
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return format!("Search: {}_ | Enter Apply | Esc Clear", state.search);
    }
    "Tab Queue | 1-8 Sort | s Next sort | / Search | Enter Champions | r Reload | ? Help | q Quit"
        .to_string()
}

fn board_columns() -> [Constraint; 10] {
    [
        Constraint::Length(4),
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(3),
    ]
}

fn render_board(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = board_columns();
    render_board_header(frame, sections[0], &widths, state.sort.key);

    let list_area = sections[1];
    let rows = state.visible_rows();
    if rows.is_empty() {
        let (text, color) = empty_board_message(state);
        let empty = Paragraph::new(text).style(Style::default().fg(color));
        frame.render_widget(empty, list_area);
        return;
    }
    if list_area.height == 0 {
        return;
    }

    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let r = rows[idx];
        let rank_style = if r.rank_position == 1 {
            row_style.fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            row_style
        };
        let wr_style = if r.win_rate >= 50 {
            row_style.fg(Color::Green)
        } else {
            row_style.fg(Color::Red)
        };
        let delta_style = match r.pdl_change {
            d if d > 0 => row_style.fg(Color::Green),
            d if d < 0 => row_style.fg(Color::Red),
            _ => row_style.fg(Color::DarkGray),
        };

        render_cell_text(frame, cols[0], &r.rank_position.to_string(), rank_style);
        render_cell_text(frame, cols[1], &format!("{} #{}", r.name, r.tagline), row_style);
        render_cell_text(frame, cols[2], &tier_text(r), row_style);
        render_cell_text(frame, cols[3], &r.league_points.to_string(), row_style);
        render_cell_text(frame, cols[4], &format_change(r.pdl_change), delta_style);
        render_cell_text(frame, cols[5], &format!("{}%", r.win_rate), wr_style);
        render_cell_text(frame, cols[6], &format!("{:.2}", r.season_kda), row_style);
        render_cell_text(frame, cols[7], &format!("{:.1}", r.best_match_kda), row_style);
        render_cell_text(
            frame,
            cols[8],
            &dynamic_stat_value(r, state.sort.key).to_string(),
            row_style.fg(Color::Cyan),
        );
        let streak = if r.hot_streak { "*" } else { "" };
        render_cell_text(frame, cols[9], streak, row_style.fg(Color::LightRed));
    }
}

fn render_board_header(frame: &mut Frame, area: Rect, widths: &[Constraint], sort_key: SortKey) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.iter().copied())
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "#", style);
    render_cell_text(frame, cols[1], "Player", style);
    render_cell_text(frame, cols[2], "Tier", style);
    render_cell_text(frame, cols[3], "PDL", style);
    render_cell_text(frame, cols[4], "+/-", style);
    render_cell_text(frame, cols[5], "WR", style);
    render_cell_text(frame, cols[6], "KDA", style);
    render_cell_text(frame, cols[7], "Best", style);
    render_cell_text(frame, cols[8], dynamic_stat_label(sort_key), style);
    render_cell_text(frame, cols[9], "HS", style);
}

fn empty_board_message(state: &AppState) -> (String, Color) {
    match &state.status {
        LoadStatus::Loading if state.rows.is_empty() => {
            ("Loading players...".to_string(), Color::DarkGray)
        }
        LoadStatus::Failed(err) if state.rows.is_empty() => {
            (format!("Failed to load players: {err}"), Color::Red)
        }
        _ if !state.rows.is_empty() => (
            format!("No players match \"{}\"", state.search),
            Color::DarkGray,
        ),
        _ => ("No players yet".to_string(), Color::DarkGray),
    }
}

fn tier_text(r: &DisplayRecord) -> String {
    if r.division.is_empty() {
        r.tier.clone()
    } else {
        format!("{} {}", r.tier, r.division)
    }
}

fn format_change(change: i64) -> String {
    if change > 0 {
        format!("+{change}")
    } else {
        change.to_string()
    }
}

fn dynamic_stat_label(sort_key: SortKey) -> &'static str {
    match sort_key {
        SortKey::SeasonKills => "KILLS",
        SortKey::SeasonDeaths => "DEATHS",
        SortKey::SeasonAssists => "ASSISTS",
        _ => "LVL",
    }
}

fn dynamic_stat_value(r: &DisplayRecord, sort_key: SortKey) -> u32 {
    match sort_key {
        SortKey::SeasonKills => r.season_kills,
        SortKey::SeasonDeaths => r.season_deaths,
        SortKey::SeasonAssists => r.season_assists,
        _ => r.summoner_level,
    }
}

fn detail_text(state: &AppState) -> String {
    let Some(r) = state.selected_record() else {
        return "No player selected".to_string();
    };
    let mut lines = vec![format!(
        "{} #{} | {} | {}W {}L | Lvl {}",
        r.name,
        r.tagline,
        tier_text(r),
        r.wins,
        r.losses,
        r.summoner_level
    )];
    if r.champion_masteries.is_empty() {
        lines.push("No champion masteries".to_string());
    }
    for mastery in r.champion_masteries.iter().take(4) {
        let line = match (&mastery.champion_name, &mastery.champion_image) {
            (Some(name), Some(url)) => {
                format!("M{} {name}  {url}", mastery.champion_level)
            }
            (Some(name), None) => format!("M{} {name}", mastery.champion_level),
            _ => format!("M{} #{}", mastery.champion_level, mastery.champion_id),
        };
        lines.push(line);
    }
    lines.join("\n")
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
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
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Puzzles Academy Leaderboard - Help",
        "",
        "Board:",
        "  Tab / f      Toggle SOLO / FLEX",
        "  j/k or ↑/↓   Move",
        "  Enter / d    Champion masteries",
        "  /            Search by name or tag",
        "  r            Reload players",
        "",
        "Sort (same key again flips direction):",
        "  1 Rank  2 Winrate  3 Level  4 Kills",
        "  5 Deaths  6 Assists  7 Season KDA  8 Best KDA",
        "  s            Next sort key",
        "",
        "  ?            Toggle help",
        "  q            Quit",
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
