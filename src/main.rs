use std::env;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use cricket_terminal::state::{
    apply_delta, AppState, BallKind, Delta, LiveOverBall, MatchDetailData, MatchInnings,
    MatchListItem, MatchLiveState, MatchStatusType, MatchTab, ProviderCommand, Screen,
    TeamSnapshot,
};
use cricket_terminal::status::derive_status_type;
use cricket_terminal::team_flags::get_team_flag_emoji;
use cricket_terminal::{fake_feed, feed};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: mpsc::Sender<ProviderCommand>,
}

impl App {
    fn new(cmd_tx: mpsc::Sender<ProviderCommand>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.help_overlay {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
            ) {
                self.state.help_overlay = false;
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = true,
            KeyCode::Char('r') => self.request_matches(),
            _ => match self.state.screen {
                Screen::MatchList => self.on_list_key(key),
                Screen::MatchDetail { .. } => self.on_detail_key(key),
            },
        }
    }

    fn on_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => {
                self.state.tab = self.state.tab.next();
                self.state.selected = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let total = self.state.visible_matches().len();
                if self.state.selected + 1 < total {
                    self.state.selected += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.selected = self.state.selected.saturating_sub(1);
            }
            KeyCode::Enter | KeyCode::Char('d') => self.open_detail(),
            KeyCode::Esc => self.should_quit = true,
            _ => {}
        }
    }

    fn on_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('b') | KeyCode::Esc => {
                self.state.screen = Screen::MatchList;
                self.state.detail_scroll = 0;
                self.state.detail_innings_selected = 0;
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.detail_scroll = self.state.detail_scroll.saturating_add(1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.detail_scroll = self.state.detail_scroll.saturating_sub(1);
            }
            KeyCode::PageDown => {
                self.state.detail_scroll = self.state.detail_scroll.saturating_add(10);
            }
            KeyCode::PageUp => {
                self.state.detail_scroll = self.state.detail_scroll.saturating_sub(10);
            }
            KeyCode::Char('h') | KeyCode::Left => {
                if self.state.detail_innings_selected > 0 {
                    self.state.detail_innings_selected -= 1;
                    self.state.detail_scroll = 0;
                }
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
                if self.state.detail_innings_selected + 1 < self.innings_count() {
                    self.state.detail_innings_selected += 1;
                    self.state.detail_scroll = 0;
                }
            }
            _ => {}
        }
    }

    fn innings_count(&self) -> usize {
        let Screen::MatchDetail { match_id } = self.state.screen else {
            return 0;
        };
        self.state
            .match_detail
            .get(&match_id)
            .map(|detail| detail.innings.len())
            .unwrap_or(0)
    }

    fn open_detail(&mut self) {
        let Some(match_id) = self.state.selected_match().map(|m| m.id) else {
            self.state.push_log("[INFO] No match selected".to_string());
            return;
        };
        self.state.screen = Screen::MatchDetail { match_id };
        self.state.detail_scroll = 0;
        self.state.detail_innings_selected = 0;
        self.request_detail(match_id);
    }

    fn request_matches(&mut self) {
        if self.cmd_tx.send(ProviderCommand::FetchMatches).is_err() {
            self.state
                .push_log("[WARN] Matches refresh request failed".to_string());
        }
    }

    fn request_detail(&mut self, match_id: u64) {
        if self
            .cmd_tx
            .send(ProviderCommand::FetchMatchDetail { match_id })
            .is_err()
        {
            self.state
                .push_log("[WARN] Match detail request failed".to_string());
        }
    }

    // The provider throttles per-id, so re-requesting every tick keeps the
    // open detail fresh without extra fetches.
    fn on_tick(&mut self) {
        if let Screen::MatchDetail { match_id } = self.state.screen {
            self.request_detail(match_id);
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    if env::var("FAKE_FEED").is_ok_and(|val| val == "1") {
        fake_feed::spawn_fake_provider(tx, cmd_rx);
    } else {
        feed::spawn_provider(tx, cmd_rx);
    }

    let mut app = App::new(cmd_tx);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
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
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
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
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::MatchList => render_match_list(frame, chunks[1], &app.state),
        Screen::MatchDetail { .. } => render_match_detail(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer =
        Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    match state.screen {
        Screen::MatchList => {
            let updated = match state.matches_cached_at.and_then(|at| at.elapsed().ok()) {
                Some(age) => format!("updated {}s ago", age.as_secs()),
                None => "waiting for first refresh".to_string(),
            };
            format!("CRICKET TERMINAL | {} | {updated}", state.tab.label())
        }
        Screen::MatchDetail { match_id } => {
            let title = state
                .match_detail
                .get(&match_id)
                .map(|detail| detail.title.clone())
                .unwrap_or_else(|| format!("Match {match_id}"));
            format!("CRICKET TERMINAL | {title}")
        }
    }
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::MatchList => {
            "Tab Switch tab | j/k/↑/↓ Move | Enter/d Detail | r Refresh | ? Help | q Quit"
                .to_string()
        }
        Screen::MatchDetail { .. } => {
            "b/Esc Back | h/l Innings | j/k Scroll | r Refresh | ? Help | q Quit".to_string()
        }
    }
}

fn render_match_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    frame.render_widget(Paragraph::new(tabs_line(state)), sections[0]);

    let list_area = sections[1];
    let items = state.visible_matches();
    if items.is_empty() {
        let hint = match state.matches_cached_at {
            Some(_) => format!("No {} matches right now", state.tab.label().to_lowercase()),
            None => "Fetching matches from Cricbuzz...".to_string(),
        };
        let empty = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    const ROW_HEIGHT: u16 = 3;
    if list_area.height < ROW_HEIGHT {
        return;
    }

    let visible = (list_area.height / ROW_HEIGHT) as usize;
    let (start, end) = visible_range(state.selected, items.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + (i as u16) * ROW_HEIGHT,
            width: list_area.width,
            height: ROW_HEIGHT,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let row = Paragraph::new(match_row_lines(&items[idx], selected)).style(row_style);
        frame.render_widget(row, row_area);
    }
}

fn tabs_line(state: &AppState) -> Line<'static> {
    let mut spans = Vec::new();
    for tab in [MatchTab::Live, MatchTab::Upcoming, MatchTab::Recent] {
        let count = match tab {
            MatchTab::Live => state.matches.live.len(),
            MatchTab::Upcoming => state.matches.upcoming.len(),
            MatchTab::Recent => state.matches.recent.len(),
        };
        let style = if tab == state.tab {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ({count}) ", tab.label()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn match_row_lines(item: &MatchListItem, selected: bool) -> Vec<Line<'static>> {
    let marker = if selected { ">" } else { " " };
    let mut title_spans = vec![Span::styled(
        format!("{marker} {}", item.title),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if !item.series.is_empty() {
        title_spans.push(Span::styled(
            format!("  {}", item.series),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let score_line = Line::from(format!(
        "   {}  |  {}",
        team_score_text(&item.team1),
        team_score_text(&item.team2)
    ));
    let status_line = Line::from(Span::styled(
        format!("   {}", item.status),
        status_style(item.status_type),
    ));

    vec![Line::from(title_spans), score_line, status_line]
}

fn team_score_text(team: &TeamSnapshot) -> String {
    let name = if team.short_name.is_empty() {
        team.name.clone()
    } else {
        team.short_name.clone()
    };
    let score = if team.score.is_empty() {
        "-".to_string()
    } else {
        team.score.clone()
    };
    match get_team_flag_emoji(&team.name, &team.short_name) {
        Some(flag) => format!("{flag} {name} {score}"),
        None => format!("{name} {score}"),
    }
}

fn status_style(status_type: MatchStatusType) -> Style {
    match status_type {
        MatchStatusType::Live => Style::default().fg(Color::Green),
        MatchStatusType::Upcoming => Style::default().fg(Color::Yellow),
        MatchStatusType::Complete => Style::default().fg(Color::Gray),
    }
}

fn render_match_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Screen::MatchDetail { match_id } = state.screen else {
        return;
    };
    let Some(detail) = state.match_detail.get(&match_id) else {
        let waiting =
            Paragraph::new("Fetching match detail...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(waiting, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(1)])
        .split(area);

    render_detail_summary(frame, rows[0], detail);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(44), Constraint::Length(38)])
        .split(rows[1]);

    render_innings(frame, columns[0], detail, state);
    render_live_panel(frame, columns[1], detail);
}

fn render_detail_summary(frame: &mut Frame, area: Rect, detail: &MatchDetailData) {
    let mut context = Vec::new();
    for part in [&detail.series, &detail.match_desc, &detail.format] {
        if !part.is_empty() {
            context.push(part.clone());
        }
    }
    let mut place = Vec::new();
    for part in [&detail.venue, &detail.start_time] {
        if !part.is_empty() {
            place.push(part.clone());
        }
    }

    let has_score = !detail.team1.score.is_empty() || !detail.team2.score.is_empty();
    let status_type =
        derive_status_type(&detail.status, &detail.state, &detail.title, has_score);

    let mut lines = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            context.join(" | "),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(place.join(" | ")),
        Line::from(format!(
            "{}  vs  {}",
            team_score_text(&detail.team1),
            team_score_text(&detail.team2)
        )),
    ];
    if !detail.toss.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Toss: {}", detail.toss),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(Span::styled(
        detail.status.clone(),
        status_style(status_type),
    )));

    let summary =
        Paragraph::new(lines).block(Block::default().title("Match").borders(Borders::ALL));
    frame.render_widget(summary, area);
}

fn render_innings(frame: &mut Frame, area: Rect, detail: &MatchDetailData, state: &AppState) {
    if detail.innings.is_empty() {
        let empty = Paragraph::new("No scorecard yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Scorecard").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let selected = state
        .detail_innings_selected
        .min(detail.innings.len() - 1);
    let innings = &detail.innings[selected];
    let title = format!("Scorecard | Innings {}/{}", selected + 1, detail.innings.len());

    let body = Paragraph::new(innings_lines(innings))
        .block(Block::default().title(title).borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((state.detail_scroll, 0));
    frame.render_widget(body, area);
}

fn innings_lines(innings: &MatchInnings) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut heading = format!("{} {}", innings.batting_team, innings.score_line);
    if !innings.run_rate.is_empty() {
        heading.push_str(&format!("  RR {}", innings.run_rate));
    }
    lines.push(Line::from(Span::styled(
        heading,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if !innings.bowling_team.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("vs {}", innings.bowling_team),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!(
            "{:<22} {:>4} {:>4} {:>3} {:>3} {:>7}",
            "Batter", "R", "B", "4s", "6s", "SR"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for batter in &innings.batsmen {
        lines.push(Line::from(format!(
            "{:<22} {:>4} {:>4} {:>3} {:>3} {:>7}",
            batter.name, batter.runs, batter.balls, batter.fours, batter.sixes, batter.strike_rate
        )));
        if !batter.dismissal.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", batter.dismissal),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    if !innings.extras_line.is_empty() {
        lines.push(Line::from(Span::styled(
            innings.extras_line.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !innings.yet_to_bat.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!(
            "Yet to bat: {}",
            innings.yet_to_bat.join(", ")
        )));
    }

    if !innings.bowlers.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{:<22} {:>5} {:>3} {:>4} {:>3} {:>6}",
                "Bowler", "O", "M", "R", "W", "Econ"
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for bowler in &innings.bowlers {
            lines.push(Line::from(format!(
                "{:<22} {:>5} {:>3} {:>4} {:>3} {:>6}",
                bowler.name, bowler.overs, bowler.maidens, bowler.runs, bowler.wickets,
                bowler.economy
            )));
        }
    }

    if !innings.fall_of_wickets.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Fall of wickets".to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(innings.fall_of_wickets.join(", ")));
    }

    lines
}

fn render_live_panel(frame: &mut Frame, area: Rect, detail: &MatchDetailData) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(4)])
        .split(area);

    let live = Paragraph::new(live_lines(detail.live_state.as_ref()))
        .block(Block::default().title("Live").borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    frame.render_widget(live, sections[0]);

    let prediction = Paragraph::new(prediction_lines(detail))
        .block(Block::default().title("Win %").borders(Borders::ALL));
    frame.render_widget(prediction, sections[1]);
}

fn live_lines(live: Option<&MatchLiveState>) -> Vec<Line<'static>> {
    let Some(live) = live else {
        return vec![Line::from(Span::styled(
            "No live data".to_string(),
            Style::default().fg(Color::DarkGray),
        ))];
    };

    let mut lines = Vec::new();
    for batter in &live.batters {
        let marker = if batter.on_strike { "*" } else { " " };
        lines.push(Line::from(format!(
            "{marker}{:<16} {:>4} ({}) SR {}",
            batter.name, batter.runs, batter.balls, batter.strike_rate
        )));
    }
    if let Some(bowler) = &live.bowler {
        lines.push(Line::from(format!(
            " {:<16} {}-{}-{}-{}",
            bowler.name, bowler.overs, bowler.maidens, bowler.runs, bowler.wickets
        )));
    }

    if !live.current_over_balls.is_empty() {
        lines.push(Line::from(""));
        let label = if live.current_over_label.is_empty() {
            "This over".to_string()
        } else {
            live.current_over_label.clone()
        };
        lines.push(Line::from(Span::styled(
            label,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(balls_line(&live.current_over_balls));
    }
    if !live.recent_balls.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            live.recent_balls_label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(balls_line(&live.recent_balls));
    }

    let mut rates = Vec::new();
    if !live.current_run_rate.is_empty() && live.current_run_rate != "-" {
        rates.push(format!("CRR {}", live.current_run_rate));
    }
    if !live.required_run_rate.is_empty() && live.required_run_rate != "-" {
        rates.push(format!("RRR {}", live.required_run_rate));
    }
    if !rates.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(rates.join("  ")));
    }

    lines
}

fn balls_line(balls: &[LiveOverBall]) -> Line<'static> {
    let spans: Vec<Span<'static>> = balls.iter().map(ball_span).collect();
    Line::from(spans)
}

fn ball_span(ball: &LiveOverBall) -> Span<'static> {
    let style = match ball.kind {
        BallKind::Wicket => Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
        BallKind::Four => Style::default().fg(Color::Green),
        BallKind::Six => Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD),
        BallKind::Extra => Style::default().fg(Color::Yellow),
        BallKind::Dot => Style::default().fg(Color::DarkGray),
        BallKind::Run => Style::default().fg(Color::White),
        BallKind::Other => Style::default().fg(Color::Gray),
    };
    Span::styled(format!("{} ", ball.value), style)
}

fn prediction_lines(detail: &MatchDetailData) -> Vec<Line<'static>> {
    let Some(prediction) = &detail.win_prediction else {
        return vec![Line::from(Span::styled(
            "No prediction".to_string(),
            Style::default().fg(Color::DarkGray),
        ))];
    };
    vec![
        Line::from(format!(
            "{:<12} {:>4}%",
            short_or_name(&detail.team1),
            prediction.team1_percent
        )),
        Line::from(format!(
            "{:<12} {:>4}%",
            short_or_name(&detail.team2),
            prediction.team2_percent
        )),
    ]
}

fn short_or_name(team: &TeamSnapshot) -> String {
    if team.short_name.is_empty() {
        team.name.clone()
    } else {
        team.short_name.clone()
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
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
        "Cricket Terminal - Help",
        "",
        "Global:",
        "  r            Refresh match list",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Match list:",
        "  Tab          Switch Live/Upcoming/Recent",
        "  j/k or ↑/↓   Move selection",
        "  Enter / d    Open match detail",
        "",
        "Match detail:",
        "  h/l or ←/→   Switch innings",
        "  j/k or ↑/↓   Scroll scorecard",
        "  PgUp/PgDn    Scroll faster",
        "  b / Esc      Back to list",
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
