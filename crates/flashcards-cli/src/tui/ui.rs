//! UI rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use flashcards_core::Face;

use super::app::{App, PendingConfirm};
use crate::output::truncate_line;

/// Main UI rendering function
pub fn draw(frame: &mut Frame, app: &App) {
    // Create vertical layout for status bar at the bottom
    let outer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    if app.deck.is_empty() {
        draw_empty_state(frame, outer_chunks[0]);
    } else {
        let pane_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(outer_chunks[0]);

        draw_list_pane(frame, app, pane_chunks[0]);
        draw_card_pane(frame, app, pane_chunks[1]);
    }

    draw_status_bar(frame, app, outer_chunks[1]);

    if app.show_help {
        draw_help_overlay(frame);
    }

    if let Some(message) = &app.error_message {
        draw_error_modal(frame, message);
    }
}

/// Draw the card list (left)
fn draw_list_pane(frame: &mut Frame, app: &App, area: Rect) {
    let max_len = area.width.saturating_sub(6) as usize;

    let items: Vec<ListItem> = app
        .deck
        .cards
        .iter()
        .map(|card| {
            let (marker, style) = match card.face {
                Face::Question => ("Q ", Style::default().fg(Color::Cyan)),
                Face::Answer => ("A ", Style::default().fg(Color::Green)),
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::raw(truncate_line(&card.question, max_len)),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(format!(" Cards ({}) ", app.deck.len()))
        .borders(Borders::ALL);

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .add_modifier(Modifier::BOLD)
            .add_modifier(Modifier::REVERSED),
    );

    let mut state = ListState::default();
    state.select(Some(app.index));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw the selected card (right), showing only the face that is up
fn draw_card_pane(frame: &mut Frame, app: &App, area: Rect) {
    let Some(card) = app.current_card() else {
        return;
    };

    let (title, border) = match card.face {
        Face::Question => (" Question ", Style::default().fg(Color::Cyan)),
        Face::Answer => (" Answer ", Style::default().fg(Color::Green)),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border.add_modifier(Modifier::BOLD));

    let mut lines: Vec<Line> = Vec::new();
    let text = card.visible_text();
    if text.is_empty() {
        lines.push(Line::from(Span::styled(
            "(empty)",
            Style::default().add_modifier(Modifier::DIM),
        )));
    } else {
        lines.extend(text.lines().map(|l| Line::from(l.to_string())));
    }

    lines.push(Line::from(""));
    let hint = match card.face {
        Face::Question => "space: show answer",
        Face::Answer => "space: show question",
    };
    lines.push(Line::from(Span::styled(
        hint,
        Style::default().add_modifier(Modifier::DIM),
    )));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Placeholder shown when the collection is empty
fn draw_empty_state(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No flashcards yet",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press a to add one, or ? for help",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Cards (0) ").borders(Borders::ALL))
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Draw the status bar at the bottom
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(pending) = app.pending_confirm {
        let prompt = match pending {
            PendingConfirm::Delete(id) => format!("Delete card {}? (y/n)", id),
            PendingConfirm::ClearAll => "Delete ALL cards? (y/n)".to_string(),
        };
        let paragraph = Paragraph::new(Span::styled(
            prompt,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(paragraph, area);
        return;
    }

    if let Some(input) = &app.import_input {
        let line = Line::from(vec![
            Span::styled("Import from: ", Style::default().fg(Color::Yellow)),
            Span::raw(input.as_str()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled(
                "  (enter: import, esc: cancel)",
                Style::default().add_modifier(Modifier::DIM),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let content = if let Some(msg) = &app.status_message {
        msg.clone()
    } else {
        "space:flip  a:add  e:edit  d:del  x:export  i:import  c:clear  ?:help  q:quit".to_string()
    };

    let paragraph = Paragraph::new(content).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Centered popup area inside the frame
fn popup_area(frame: &Frame, width: u16, height: u16) -> Rect {
    let area = frame.area();
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Draw help overlay
fn draw_help_overlay(frame: &mut Frame) {
    let area = popup_area(frame, 46, 20);
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from("  j/k, ↑/↓      Move up/down"),
        Line::from("  g/G           First/last card"),
        Line::from("  space/Enter   Flip card"),
        Line::from("  r             Reveal answer"),
        Line::from(""),
        Line::from("  a             Add card"),
        Line::from("  e             Edit card"),
        Line::from("  d             Delete card"),
        Line::from("  x             Export to file"),
        Line::from("  i             Import from file"),
        Line::from("  c             Delete all cards"),
        Line::from(""),
        Line::from("  q             Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

/// Draw error modal
fn draw_error_modal(frame: &mut Frame, message: &str) {
    let area = popup_area(frame, 60, 10);
    frame.render_widget(Clear, area);

    let mut lines = vec![Line::from("")];
    lines.extend(message.lines().map(|l| Line::from(l.to_string())));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to continue",
        Style::default().add_modifier(Modifier::DIM),
    )));

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
