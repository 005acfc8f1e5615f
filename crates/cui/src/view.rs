use crate::app::{App, PromptMode, Screen, Session, MENU_ROWS};
use minikers_core::{
    round_rules, winning_team, Card, Difficulty, DrawState, MatchState, QuickSession, TurnRecord,
    TurnTimer, ROUNDS_PER_MATCH,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        Screen::Menu => draw_menu(frame, app),
        Screen::Cards => draw_cards(frame, app),
        Screen::Playing => draw_playing(frame, app),
        Screen::TurnBreak => draw_turn_break(frame, app),
        Screen::RoundBreak => draw_round_break(frame, app),
        Screen::Final => draw_final(frame, app),
    }
    if app.show_help {
        draw_help_popup(frame);
    }
    if app.prompt_mode.is_some() {
        draw_prompt(frame, app);
    }
}

fn draw_menu(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let title = vec![
        Line::from("MINIKERS".bold()),
        Line::from("Describe, shout, and mime your way through three rounds."),
        Line::from(format!(
            "{} catalog cards loaded, {} custom",
            app.family_cards.len() + app.standard_cards.len(),
            app.store.total()
        )),
        Line::from(format!("seed {}", app.seed)),
    ];
    frame.render_widget(
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(pane_block("Welcome")),
        root[0],
    );

    let items: Vec<ListItem<'_>> = MENU_ROWS
        .iter()
        .map(|row| {
            let value = app.menu_value(*row);
            let label = if value.is_empty() {
                row.label().to_string()
            } else {
                format!("{:<12} {value}", row.label())
            };
            ListItem::new(label)
        })
        .collect();
    let list = List::new(items)
        .block(pane_block("Setup"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    state.select(Some(app.menu_cursor.min(MENU_ROWS.len() - 1)));
    frame.render_stateful_widget(list, root[1], &mut state);

    draw_status(frame, root[2], app);
}

fn draw_cards(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let keys = app.studio_keys();
    let mut tabs: Vec<Span<'_>> = Vec::new();
    for (index, key) in keys.iter().enumerate() {
        if index > 0 {
            tabs.push(Span::raw("  "));
        }
        let label = format!("{key} ({})", app.store.collection(key).len());
        if index == app.studio_tab {
            tabs.push(Span::styled(
                label,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            tabs.push(Span::raw(label));
        }
    }
    let header = vec![
        Line::from(tabs),
        Line::from(format!(
            "new cards: {} {}  (left/right changes, tab switches collection)",
            app.studio_difficulty.stars(),
            app.studio_difficulty.label()
        )),
    ];
    frame.render_widget(
        Paragraph::new(header).block(pane_block("Card studio")),
        root[0],
    );

    let cards = app.store.collection(&app.active_studio_key());
    let items: Vec<ListItem<'_>> = if cards.is_empty() {
        vec![ListItem::new("no cards here yet (a adds one)")]
    } else {
        cards
            .iter()
            .map(|card| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<4}", card.difficulty.stars()),
                        Style::default().fg(difficulty_color(card.difficulty)),
                    ),
                    Span::raw(format!("{}  ", card.name)),
                    Span::styled(
                        card.definition.clone(),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect()
    };
    let list = List::new(items)
        .block(pane_block("Cards"))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    if !cards.is_empty() {
        state.select(Some(app.card_cursor.min(cards.len() - 1)));
    }
    frame.render_stateful_widget(list, root[1], &mut state);

    draw_status(frame, root[2], app);
}

fn draw_playing(frame: &mut Frame, app: &App) {
    match app.session.as_ref() {
        Some(Session::Quick(session)) => draw_quick(frame, app, session),
        Some(Session::Match(state)) => draw_match(frame, app, state),
        None => draw_menu(frame, app),
    }
}

fn draw_quick(frame: &mut Frame, app: &App, session: &QuickSession) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = vec![
        Line::from(vec![
            Span::styled("Quick Play", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("   difficulty {}", session.filter.label())),
        ]),
        Line::from(vec![
            timer_span(&session.timer),
            Span::raw(format!(
                "   cards completed {}",
                session.cards_completed
            )),
        ]),
        Line::from("space next card  d hint  t clock  r reset  esc menu"),
    ];
    frame.render_widget(Paragraph::new(header).block(pane_block("Minikers")), root[0]);

    draw_card_face(
        frame,
        root[1],
        session.current.as_ref(),
        app.show_hint,
        "space deals the first card",
    );

    draw_status(frame, root[2], app);
}

fn draw_match(frame: &mut Frame, app: &App, state: &MatchState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Min(9),
            Constraint::Length(8),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let rules = round_rules(state.round);
    let header = vec![
        Line::from(vec![
            Span::styled(
                format!(
                    "Round {} of {}: {}",
                    state.round, ROUNDS_PER_MATCH, rules.title
                ),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}", rules.description)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("team {}", state.team),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  turn {} pts  deck {} left   ",
                state.turn.points,
                state.cards_left()
            )),
            timer_span(&state.timer),
        ]),
        Line::from("g got it  s skip  d hint  t clock  r reset  e end turn  esc quit"),
    ];
    frame.render_widget(Paragraph::new(header).block(pane_block("Minikers")), root[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(root[1]);

    match state.draw_state {
        DrawState::Showing => draw_card_face(
            frame,
            body[0],
            state.current.as_ref(),
            app.show_hint,
            "dealing...",
        ),
        DrawState::RamboOffer => draw_rambo_offer(frame, body[0], state),
        DrawState::Exhausted => {
            frame.render_widget(
                Paragraph::new(vec![
                    Line::from(""),
                    Line::from("Every card is spent.".bold()),
                    Line::from("e ends the turn"),
                ])
                .alignment(Alignment::Center)
                .block(pane_block("Card")),
                body[0],
            );
        }
    }

    draw_turn_panel(frame, body[1], state);
    draw_events(frame, root[2], app);
    draw_status(frame, root[3], app);
}

fn draw_card_face(
    frame: &mut Frame,
    area: Rect,
    card: Option<&Card>,
    show_hint: bool,
    empty_text: &str,
) {
    let Some(card) = card else {
        frame.render_widget(
            Paragraph::new(empty_text)
                .alignment(Alignment::Center)
                .block(pane_block("Card")),
            area,
        );
        return;
    };
    let color = difficulty_color(card.difficulty);
    let hint = if show_hint {
        if card.definition.is_empty() {
            "(no hint on this card)".to_string()
        } else {
            card.definition.clone()
        }
    } else {
        "d shows a hint".to_string()
    };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            card.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} {}", card.difficulty.stars(), card.difficulty.label()),
            Style::default().fg(color),
        )),
        Line::from(""),
        Line::from(hint),
    ];
    if card.custom {
        if let Some(team) = card.team.as_deref() {
            lines.push(Line::from(Span::styled(
                format!("custom card from {team}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    let block = Block::default()
        .title("Card")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn draw_rambo_offer(frame: &mut Frame, area: Rect, state: &MatchState) {
    let skips = state.rambo_skip_pool().len();
    let cuts = state.rambo_cut_pool().len();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "The deck ran dry for this turn.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if state.rambo_level == 0 {
        if skips > 0 {
            lines.push(Line::from(format!(
                "Rambo puts your {skips} skipped cards back in play."
            )));
        } else {
            lines.push(Line::from(format!(
                "No skips to replay, so Rambo goes straight to the {cuts} cards cut from this round."
            )));
        }
    } else {
        lines.push(Line::from(format!(
            "Double Rambo brings back {cuts} cards cut from this round's deck."
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("b = go rambo   e = end turn"));
    let block = Block::default()
        .title("Rambo")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn draw_turn_panel(frame: &mut Frame, area: Rect, state: &MatchState) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(4)])
        .split(area);

    let summary = vec![
        Line::from(format!("points   {}", state.turn.points)),
        Line::from(format!("got      {}", state.turn.scored.len())),
        Line::from(format!("skipped  {}", state.turn.skipped.len())),
    ];
    frame.render_widget(
        Paragraph::new(summary).block(pane_block("This turn")),
        parts[0],
    );

    let items: Vec<ListItem<'_>> = if state.turn.skipped.is_empty() {
        vec![ListItem::new("nothing skipped")]
    } else {
        state
            .turn
            .skipped
            .iter()
            .map(|card| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<4}", card.difficulty.stars()),
                        Style::default().fg(difficulty_color(card.difficulty)),
                    ),
                    Span::raw(card.name.clone()),
                ]))
            })
            .collect()
    };
    frame.render_widget(List::new(items).block(pane_block("Skipped")), parts[1]);
}

fn draw_turn_break(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(frame.area());

    let mut lines = vec![Line::from("")];
    if let Some(Session::Match(state)) = app.session.as_ref() {
        if let Some(record) = last_turn(state) {
            lines.push(Line::from(
                format!("Team {} turn over: {} pts", record.team, record.points).bold(),
            ));
            lines.push(Line::from(format!(
                "{} got, {} skipped",
                record.scored.len(),
                record.skipped.len()
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Pass the device to team {}!", state.team),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
        lines.push(Line::from("enter starts their turn; the clock waits for t"));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(pane_block("Turn over")),
        root[0],
    );
    draw_status(frame, root[1], app);
}

fn draw_round_break(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(frame.area());

    let mut lines = vec![Line::from("")];
    if let Some(Session::Match(state)) = app.session.as_ref() {
        if let Some(record) = state.rounds.last() {
            lines.push(Line::from(
                format!("Round {} Complete!", record.round).bold(),
            ));
            lines.push(Line::from(format!(
                "{}/{} pts, {}% of the deck",
                record.points(),
                record.possible,
                record.percent()
            )));
            lines.push(Line::from(""));
            for team in 1..=state.config.teams {
                lines.push(Line::from(format!(
                    "team {team}: {} pts",
                    record.team_points(team)
                )));
            }
            lines.push(Line::from(""));
            let carried = record.carryover().len();
            if carried == 0 {
                lines.push(Line::from("No cards were scored, so the game ends here."));
                lines.push(Line::from("enter shows the final standings"));
            } else if record.round >= ROUNDS_PER_MATCH {
                lines.push(Line::from("That was the last round."));
                lines.push(Line::from("enter shows the final standings"));
            } else {
                let next = round_rules(record.round + 1);
                lines.push(Line::from(format!(
                    "{carried} scored cards move on to round {}",
                    record.round + 1
                )));
                lines.push(Line::from(format!(
                    "Next: {} ({})",
                    next.title, next.description
                )));
                lines.push(Line::from("enter reshuffles them, team 1 starts"));
            }
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(pane_block("Round over")),
        root[0],
    );
    draw_status(frame, root[1], app);
}

fn draw_final(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(3)])
        .split(frame.area());

    let mut lines = vec![
        Line::from(""),
        Line::from("Game Complete!".bold()),
        Line::from(""),
    ];
    if let Some(Session::Match(state)) = app.session.as_ref() {
        let entries = state.standings();
        let top = entries.first().map(|entry| entry.points).unwrap_or(0);
        match winning_team(&entries) {
            Some(team) => lines.push(Line::from(Span::styled(
                format!("Team {team} wins with {top} pts!"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ))),
            None => lines.push(Line::from(format!("It's a {top}-point tie!"))),
        }
        lines.push(Line::from(""));
        for (rank, entry) in entries.iter().enumerate() {
            let rounds: Vec<String> = entry
                .by_round
                .iter()
                .map(|(_, points)| points.to_string())
                .collect();
            lines.push(Line::from(format!(
                "{}. team {}   {} pts of {}   rounds: {}",
                rank + 1,
                entry.team,
                entry.points,
                entry.possible,
                rounds.join(" + ")
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("enter returns to the menu"));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(pane_block("Final score")),
        root[0],
    );
    draw_status(frame, root[1], app);
}

fn draw_events(frame: &mut Frame, area: Rect, app: &App) {
    let capacity = area.height.saturating_sub(2) as usize;
    let start = app.event_log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = app
        .event_log
        .iter()
        .skip(start)
        .map(|line| Line::from(line.clone()))
        .collect();
    frame.render_widget(Paragraph::new(lines).block(pane_block("Events")), area);
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(
        Paragraph::new(app.status_line.clone()).block(pane_block("Status")),
        area,
    );
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(72, 80, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from("How to play".bold()),
        Line::from(
            "One player holds the device and describes the card; their team shouts guesses.",
        ),
        Line::from("g scores the card, s skips it. Harder cards are worth more points."),
        Line::from(""),
        Line::from("Round 1: Anything Goes. Any words, sounds, or gestures except the name."),
        Line::from("Round 2: One Word Only. The same cards come back; you get a single word."),
        Line::from("Round 3: Just Charades. Act it out. No words allowed."),
        Line::from("Only scored cards carry over, so every round gets smaller and stranger."),
        Line::from(""),
        Line::from("When your deck runs dry mid-turn, b goes Rambo: replay your own skips,"),
        Line::from("then raid the cards that were cut from the round."),
        Line::from(""),
        Line::from("keys".bold()),
        Line::from("arrows/jk move  enter select  tab collections  q quit  ? this help"),
        Line::from("g got it  s skip  space next (quick)  d hint  t clock  r reset  e end turn"),
        Line::from("studio: a add  x delete  i import  e export  left/right difficulty"),
    ];
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_prompt(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 28, frame.area());
    frame.render_widget(Clear, area);
    let Some(mode) = app.prompt_mode else {
        return;
    };
    let title = match mode {
        PromptMode::CardName => "New card: name",
        PromptMode::CardDefinition => "New card: hint",
        PromptMode::ImportPath => "Import cards",
        PromptMode::ExportPath => "Export cards",
    };
    let mut lines = vec![Line::from("Enter=confirm  Esc=cancel")];
    match mode {
        PromptMode::CardName => {
            lines.push(Line::from(format!(
                "Name for the new {} card ({} {})",
                app.active_studio_key(),
                app.studio_difficulty.stars(),
                app.studio_difficulty.label()
            )));
        }
        PromptMode::CardDefinition => {
            lines.push(Line::from(
                "Hint shown with d; leave empty for the default",
            ));
        }
        PromptMode::ImportPath | PromptMode::ExportPath => {
            lines.push(Line::from("Leave empty to use the default path:"));
            lines.push(Line::from(format!(
                "  {}",
                crate::persistence::default_exchange_path().display()
            )));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(format!("> {}", app.prompt_input)));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn last_turn(state: &MatchState) -> Option<&TurnRecord> {
    state.rounds.last().and_then(|round| round.turns.last())
}

fn timer_span(timer: &TurnTimer) -> Span<'static> {
    let text = if timer.running {
        format!("time {}:{:02}", timer.remaining / 60, timer.remaining % 60)
    } else {
        format!(
            "time {}:{:02} (stopped)",
            timer.remaining / 60,
            timer.remaining % 60
        )
    };
    let mut style = Style::default();
    if timer.remaining <= 10 {
        style = style.fg(Color::Red).add_modifier(Modifier::BOLD);
    } else if timer.running {
        style = style.fg(Color::Green);
    }
    Span::styled(text, style)
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Cyan,
        Difficulty::Medium => Color::Magenta,
        Difficulty::Hard => Color::LightMagenta,
    }
}

fn pane_block(title: &str) -> Block<'_> {
    Block::default().title(title).borders(Borders::ALL)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}
