use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Tabs};

use crate::output::{format_delta, format_points, truncate_name};
use crate::scoring::{parse_card_count, Counter, ScoreType};
use crate::session::PendingInput;
use crate::tui::app::{App, FlashKind, InputMode, View};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 6 || area.width < 30 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Tabs(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Length(1), // Tab bar
        Constraint::Fill(1),   // Players table or line form
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app);
    match app.current_view {
        View::Players => render_players(frame, chunks[2], app),
        View::Lines => render_line_form(frame, chunks[2], app),
    }
    render_status_bar(frame, chunks[3], app);

    match app.input_mode() {
        InputMode::Dialog => render_dialog(frame, app),
        InputMode::Help => render_help_popup(frame, app),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = "Tetris Hold'em Scorer";
    let mut spans = vec![Span::styled(
        title,
        Style::default().fg(app.colors.title_color).bold(),
    )];

    let count = format!("{} players", app.session.len());
    let padding_len = (area.width as usize).saturating_sub(title.len() + count.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(count, Style::default().fg(app.colors.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, app: &App) {
    let selected = match app.current_view {
        View::Players => 0,
        View::Lines => 1,
    };

    let tabs = Tabs::new(vec!["Players", "Line Calculator"])
        .select(selected)
        .style(app.colors.tab_inactive_style)
        .highlight_style(app.colors.tab_active_style.reversed())
        .divider(" | ");

    frame.render_widget(tabs, area);
}

fn render_players(frame: &mut Frame, area: Rect, app: &mut App) {
    if app.session.is_empty() {
        let empty_msg = Paragraph::new("No players yet. Press 'a' to add one.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(app.colors.muted))
            .block(Block::default());
        frame.render_widget(empty_msg, area);
        return;
    }

    let colors = &app.colors;
    let max_score = app.max_score();
    let has_leader = max_score > 0;

    let rows: Vec<Row> = app
        .session
        .players()
        .iter()
        .enumerate()
        .map(|(idx, player)| {
            let index = format!("{}.", idx + 1);

            let mut score_spans = vec![Span::styled(
                format!("{:>9} ", format_points(player.total_score)),
                Style::default().fg(colors.score_color(player.total_score)),
            )];
            score_spans.extend(score_bar(player.total_score, max_score, 10, app).spans);

            let mut name_spans = vec![Span::raw(truncate_name(&player.name, 40))];
            if has_leader && player.total_score == max_score {
                name_spans.push(Span::styled(" ★", Style::default().fg(colors.leader)));
            }

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(colors.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(index).style(Style::default().fg(colors.index_color)),
                Cell::from(Line::from(name_spans)),
                Cell::from(Line::from(score_spans)),
            ])
            .style(row_style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),  // Index: "99."
        Constraint::Fill(1),    // Name
        Constraint::Length(21), // Total + bar: "    1,240 ██████░░░░"
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Player", "Total Score"])
                .style(colors.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(colors.row_selected);

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

/// Bar scaled against the leader. Zero and negative totals show empty.
fn score_bar(score: i64, max_score: i64, width: usize, app: &App) -> Line<'static> {
    let ratio = if max_score > 0 && score > 0 {
        (score as f64 / max_score as f64).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled(
            "█".repeat(filled),
            Style::default().fg(app.colors.bar_filled),
        ));
    }
    if empty > 0 {
        spans.push(Span::styled(
            "░".repeat(empty),
            Style::default().fg(app.colors.bar_empty),
        ));
    }

    Line::from(spans)
}

fn render_line_form(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let weights = &app.scoring.lines;
    let selected = app.selected_counter();

    let mut lines: Vec<Line> = vec![Line::from("")];
    for counter in Counter::ALL {
        let weight = weights.weight(counter);
        let label = if counter.is_penalty() {
            format!("{} (-{} each)", counter.label(), weight)
        } else {
            format!("{} ({} each)", counter.label(), weight)
        };
        let value = app.line_form.field(counter);
        let is_selected = counter == selected;

        let value_text = if is_selected {
            format!("{}|", value)
        } else {
            value.to_string()
        };
        let marker = if is_selected { "> " } else { "  " };
        let label_style = if is_selected {
            Style::default().fg(colors.title_color).bold()
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(colors.title_color)),
            Span::styled(format!("{:<32}", label), label_style),
            Span::raw(value_text),
        ]));
    }

    lines.push(Line::from(""));
    let total_text = match app.line_form.total() {
        Some(total) => format_points(total),
        None => "-".to_string(),
    };
    let total_style = match app.line_form.total() {
        Some(total) => Style::default().fg(colors.score_color(total)).bold(),
        None => Style::default().fg(colors.muted),
    };
    lines.push(Line::from(vec![
        Span::styled("  Score: ", Style::default().bold()),
        Span::styled(total_text, total_style),
    ]));

    if let Some(score) = &app.last_line_score {
        lines.push(Line::from(Span::styled(
            format!(
                "  base {}  bonus {}  penalty {}",
                format_points(score.breakdown.base),
                format_points(score.breakdown.bonus),
                format_points(score.breakdown.penalty)
            ),
            Style::default().fg(colors.muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let colors = &app.colors;
    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let msg_color = match kind {
            FlashKind::Success => colors.flash_success,
            FlashKind::Error => colors.flash_error,
            FlashKind::Info => colors.muted,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: Vec<(&str, &str)> = match app.current_view {
            View::Players => vec![
                ("j/k", ":nav "),
                ("a", ":add player "),
                ("Enter", ":add score "),
                ("Tab", ":lines "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::Lines => vec![
                ("j/k", ":field "),
                ("0-9", ":edit "),
                ("Enter", ":calculate "),
                ("x", ":reset "),
                ("Tab", ":players "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                *key,
                Style::default().fg(colors.status_key_color),
            ));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(colors.status_bar_bg)),
        area,
    );
}

fn render_dialog(frame: &mut Frame, app: &App) {
    match app.dialog.pending() {
        Some(PendingInput::AddPlayer { name }) => render_add_player_popup(frame, app, name),
        Some(PendingInput::AddScore {
            player,
            score_type,
            card_count,
        }) => render_add_score_popup(frame, app, *player, *score_type, card_count),
        None => {}
    }
}

fn popup_block(title: &str, app: &App) -> Block<'static> {
    Block::bordered()
        .title(format!(" {} ", title))
        .title_style(app.colors.popup_title)
        .border_style(Style::default().fg(app.colors.popup_border))
        .style(Style::default().bg(app.colors.popup_bg))
}

fn render_add_player_popup(frame: &mut Frame, app: &App, name: &str) {
    let popup_area = centered_rect_fixed(44, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block("Add New Player", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Input line
        Constraint::Length(1), // Spacer
        Constraint::Length(1), // Help text
    ])
    .split(inner);

    let input = Paragraph::new(format!("Name: {}|", name));
    frame.render_widget(input, chunks[0]);

    let submit_style = if app.dialog.can_submit() {
        Style::default().fg(app.colors.status_key_color)
    } else {
        Style::default().fg(app.colors.input_disabled)
    };
    let help = Line::from(vec![
        Span::styled("Enter", submit_style),
        Span::styled(": add | Esc: cancel", Style::default().fg(app.colors.muted)),
    ]);
    frame.render_widget(Paragraph::new(help), chunks[2]);
}

fn render_add_score_popup(
    frame: &mut Frame,
    app: &App,
    player: usize,
    score_type: ScoreType,
    card_count: &str,
) {
    let popup_area = centered_rect_fixed(48, 8, frame.area());
    frame.render_widget(Clear, popup_area);

    let name = app
        .session
        .player(player)
        .map(|p| p.name.as_str())
        .unwrap_or("?");
    let block = popup_block(&format!("Add Score: {}", truncate_name(name, 24)), app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let chunks = Layout::vertical([
        Constraint::Length(1), // Score type selector
        Constraint::Length(1), // Card count
        Constraint::Length(1), // Preview
        Constraint::Length(1), // Spacer
        Constraint::Length(1), // Help
        Constraint::Length(1), // Help
    ])
    .split(inner);

    let mut type_spans = vec![Span::raw("Score Type: ")];
    for (i, t) in ScoreType::ALL.iter().enumerate() {
        if i > 0 {
            type_spans.push(Span::raw(" "));
        }
        let style = if *t == score_type {
            app.colors.tab_active_style.reversed()
        } else {
            app.colors.tab_inactive_style
        };
        type_spans.push(Span::styled(format!(" {} ", t), style));
    }
    frame.render_widget(Paragraph::new(Line::from(type_spans)), chunks[0]);

    let range = &app.scoring.hands.card_count;
    frame.render_widget(
        Paragraph::new(format!(
            "Number of Cards ({}-{}): {}|",
            range.min, range.max, card_count
        )),
        chunks[1],
    );

    let cards = parse_card_count(card_count, range.default);
    let delta = app.scoring.hands.formula(score_type).delta(cards);
    frame.render_widget(
        Paragraph::new(format!("Points: {}", format_delta(delta)))
            .style(Style::default().fg(app.colors.score_color(delta))),
        chunks[2],
    );

    let muted = Style::default().fg(app.colors.muted);
    frame.render_widget(
        Paragraph::new("Left/Right: type | Up/Down: cards").style(muted),
        chunks[4],
    );
    frame.render_widget(
        Paragraph::new("Enter: add score | Esc: cancel").style(muted),
        chunks[5],
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, app: &App) {
    let popup_area = centered_rect_fixed(52, 17, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = popup_block("Keyboard Shortcuts", app);
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(app.colors.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Next player / field"),
        ("k / Up        ", "Previous player / field"),
        ("a             ", "Add player"),
        ("Enter / s     ", "Add score for selected player"),
        ("Tab           ", "Toggle Players / Line Calculator"),
        ("0-9           ", "Edit field (Line Calculator)"),
        ("Enter / c     ", "Calculate (Line Calculator)"),
        ("x             ", "Reset form (Line Calculator)"),
        ("Esc           ", "Close dialog"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(app.colors.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
