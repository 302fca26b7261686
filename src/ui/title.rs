// src/ui/title.rs

use super::{
    constants::{PREMISE, SKYLINE, SUBTITLE, TITLE},
    utils::center_rect,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::*,
};

pub fn draw_title(f: &mut Frame) {
    let [header, art, title, premise, prompt, status] = Layout::vertical([
        Constraint::Max(1),
        Constraint::Min(8),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Max(1),
    ])
    .areas(f.area());

    render_header(f, header);

    let art_area = center_rect(art, Constraint::Length(70), Constraint::Length(8));
    f.render_widget(
        Paragraph::new(SKYLINE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::LightRed)),
        art_area,
    );

    let title_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(Color::LightRed));
    f.render_widget(
        Paragraph::new(TITLE)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(title_block),
        center_rect(title, Constraint::Length(41), Constraint::Length(3)),
    );

    f.render_widget(
        Paragraph::new(PREMISE)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true }),
        center_rect(premise, Constraint::Percentage(70), Constraint::Length(5)),
    );

    let enter = Line::from(vec![
        Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
        Span::styled(
            "Enter the Grind",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(enter).alignment(Alignment::Center),
        center_rect(prompt, Constraint::Percentage(100), Constraint::Length(1)),
    );

    render_status(f, status, "Press q to quit");
}

pub fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(format!(
        "Times Square Noir v{}  |  {SUBTITLE}",
        env!("CARGO_PKG_VERSION")
    ))
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

pub fn render_status(f: &mut Frame, area: Rect, message: &str) {
    let status = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(status, area);
}
