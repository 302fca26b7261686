// ui/error.rs

use super::title::{render_header, render_status};
use super::utils::center_rect;
use crate::game_state::GameState;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::*,
};

pub fn draw_error(f: &mut Frame, state: &GameState) {
    let [header, body, status] = Layout::vertical([
        Constraint::Max(1),
        Constraint::Fill(1),
        Constraint::Max(1),
    ])
    .areas(f.area());
    render_header(f, header);

    let action = if state.can_return_to_game() {
        "Return to Game"
    } else {
        "Try Again"
    };

    let text = vec![
        Line::from(Span::styled(
            "An Error Occurred",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(state.error.as_deref().unwrap_or("Something went wrong.")),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
            Span::styled(action, Style::default().add_modifier(Modifier::BOLD)),
        ]),
    ];

    let area = center_rect(body, Constraint::Percentage(70), Constraint::Length(9));
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red));
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block.padding(Padding::vertical(1))),
        area,
    );

    render_status(f, status, "Press q to quit");
}
