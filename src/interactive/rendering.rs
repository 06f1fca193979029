//! TUI rendering with ratatui
//!
//! Guess board, keyboard, messages and the popup overlays.

use super::app::{App, MessageStyle};
use crate::core::{Classification, WORD_LENGTH};
use crate::game::MAX_GUESSES;
use crate::game::keyboard::Key;
use crate::output::formatters::{create_progress_bar, statistics_lines};
use crate::stats::StatsStore;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui<S: StatsStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(14),   // Board and side panel
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_side_panel(f, app, main_chunks[1]);
    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);

    if app.show_stats {
        render_statistics(f, app);
    }
    if app.popup.is_some() {
        render_popup(f, app);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("WORDLE")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn tile_style(status: Option<Classification>) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match status {
        Some(Classification::Exact) => style.fg(Color::Black).bg(Color::Green),
        Some(Classification::Present) => style.fg(Color::Black).bg(Color::Yellow),
        Some(Classification::Absent) => style.fg(Color::White).bg(Color::DarkGray),
        None => style.fg(Color::White),
    }
}

fn tile(letter: char, status: Option<Classification>) -> Span<'static> {
    Span::styled(format!(" {letter} "), tile_style(status))
}

/// Board rows: scored guesses, then the row being typed, then blanks
fn board_lines<S: StatsStore>(app: &App<S>) -> Vec<Line<'static>> {
    let round = app.game.round();
    let mut lines = Vec::with_capacity(MAX_GUESSES * 2);

    for guess in round.guesses() {
        let mut spans = Vec::with_capacity(WORD_LENGTH * 2);
        for (letter, class) in guess.letters() {
            spans.push(tile(letter as char, Some(class)));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    for row in round.guesses().len()..MAX_GUESSES {
        let typed = if row == round.guesses().len() && round.is_active() {
            app.input_buffer.as_str()
        } else {
            ""
        };
        let mut letters = typed.chars();
        let mut spans = Vec::with_capacity(WORD_LENGTH * 2);
        for _ in 0..WORD_LENGTH {
            let cell = match letters.next() {
                Some(c) => tile(c, None),
                None => Span::styled(" · ", Style::default().fg(Color::DarkGray)),
            };
            spans.push(cell);
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::default());
    }

    lines
}

fn render_board<S: StatsStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let board = Paragraph::new(board_lines(app))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(" Guesses ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(board, area);
}

fn render_side_panel<S: StatsStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    render_keyboard(f, app, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn keyboard_lines<S: StatsStore>(app: &App<S>) -> Vec<Line<'static>> {
    let letters = app.game.round().letters();
    app.layout
        .keys()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .flat_map(|key| match key {
                    Key::Spacer => vec![Span::raw("  ")],
                    Key::Letter(l) => vec![tile(l as char, letters.status(l)), Span::raw(" ")],
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_keyboard<S: StatsStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let keyboard = Paragraph::new(keyboard_lines(app)).block(
        Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(keyboard, area);
}

fn message_style(style: MessageStyle) -> Style {
    match style {
        MessageStyle::Info => Style::default().fg(Color::White),
        MessageStyle::Success => Style::default().fg(Color::Green),
        MessageStyle::Error => Style::default().fg(Color::Red),
    }
}

fn render_messages<S: StatsStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| ListItem::new(msg.text.clone()).style(message_style(msg.style)))
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input<S: StatsStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let (title, color) = if app.is_checking() {
        (" Checking word... ", Color::Cyan)
    } else if app.game.round().is_active() {
        (" Your guess | Enter to submit ", Color::Yellow)
    } else {
        (" Round over | n: new game  q: quit ", Color::Green)
    };

    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status<S: StatsStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(30),
            Constraint::Percentage(40),
        ])
        .split(area);

    let round = app.game.round();
    let round_text = format!(
        "Round {} | {}/{MAX_GUESSES}",
        app.game.round_number(),
        round.guesses().len()
    );
    f.render_widget(
        Paragraph::new(round_text).alignment(Alignment::Center),
        chunks[0],
    );

    let stats = app.game.stats();
    let stats_text = format!(
        "Played: {} | Win Rate: {:.0}%",
        stats.played(),
        stats.win_rate() * 100.0
    );
    f.render_widget(
        Paragraph::new(stats_text).alignment(Alignment::Center),
        chunks[1],
    );

    let help = Paragraph::new("Esc: Quit | Tab: Stats | Ctrl+N: New Game")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

fn render_statistics<S: StatsStore>(f: &mut Frame, app: &App<S>) {
    let stats = app.game.stats();
    let max = stats.counts().iter().copied().max().unwrap_or(0) as f64;

    let mut lines = Vec::new();
    for guesses in 1..stats.counts().len() {
        let count = stats.won_in(guesses);
        lines.push(Line::from(vec![
            Span::raw(format!("{guesses} ")),
            Span::styled(
                create_progress_bar(count as f64, max, 20),
                Style::default().fg(Color::Green),
            ),
            Span::raw(format!(" {count}")),
        ]));
    }
    lines.push(Line::from(vec![
        Span::raw("X "),
        Span::styled(
            create_progress_bar(stats.losses() as f64, max, 20),
            Style::default().fg(Color::Red),
        ),
        Span::raw(format!(" {}", stats.losses())),
    ]));
    lines.push(Line::default());
    lines.extend(statistics_lines(&stats).into_iter().map(Line::from));

    let area = centered_rect(50, 70, f.area());
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics | Tab to close ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn render_popup<S: StatsStore>(f: &mut Frame, app: &App<S>) {
    let Some(popup) = &app.popup else {
        return;
    };

    let area = centered_rect(60, 25, f.area());
    let paragraph = Paragraph::new(vec![
        Line::from(popup.text.clone()),
        Line::default(),
        Line::styled("Press Enter to continue", Style::default().fg(Color::DarkGray)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(format!(" {} ", popup.title))
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(message_style(popup.style).add_modifier(Modifier::BOLD)),
    );
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// A rectangle of the given percentages centred in `area`
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
