use super::Screen;
use super::constants::CHARACTER_DETAILS;
use super::spinner::{Spinner, spinner_frame};
use super::title::{render_header, render_status};
use super::utils::center_rect;
use crate::game_state::GameState;
use crate::scene_image::SceneImage;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::*,
};
use ratatui_image::StatefulImage;

// Shown before the first scene exists: there is nothing else to draw yet.
pub fn draw_opening_wait(f: &mut Frame, spinner: &Spinner) {
    let area = center_rect(f.area(), Constraint::Percentage(100), Constraint::Length(1));
    f.render_widget(
        Paragraph::new(spinner_frame(spinner))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::LightRed)),
        area,
    );
}

pub fn draw_in_game(f: &mut Frame, state: &GameState, screen: &mut Screen) {
    let [header, main, status] = Layout::vertical([
        Constraint::Max(1),
        Constraint::Fill(1),
        Constraint::Max(1),
    ])
    .areas(f.area());
    render_header(f, header);

    let [sheet_area, scene_area] =
        Layout::horizontal([Constraint::Percentage(33), Constraint::Percentage(67)]).areas(main);

    draw_character_sheet(f, &state.character_bio, sheet_area);

    let [image_area, description_area, choices_area] = Layout::vertical([
        Constraint::Percentage(50),
        Constraint::Fill(1),
        Constraint::Length(state.choices.len() as u16 + 2),
    ])
    .areas(scene_area);

    draw_scene_image(f, &state.scene_image, screen, image_area);
    draw_description(f, &state.scene_description, description_area);
    draw_choices(f, &state.choices, screen.selected_choice, state.is_loading(), choices_area);

    if state.is_loading() {
        let overlay = center_rect(scene_area, Constraint::Length(34), Constraint::Length(3));
        f.render_widget(Clear, overlay);
        f.render_widget(
            Paragraph::new(spinner_frame(&screen.spinner))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::LightRed))
                .block(Block::bordered().border_type(BorderType::Rounded)),
            overlay,
        );
    }

    let hint = if state.is_loading() {
        "Waiting for the story... q to quit"
    } else {
        "↑↓/jk select, Enter or 1-9 to choose, q to quit"
    };
    render_status(f, status, hint);
}

fn draw_character_sheet(f: &mut Frame, bio: &str, area: Rect) {
    let [bio_area, details_area] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(7)]).areas(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightRed))
        .title(" Character: Brock ");
    let bio = if bio.trim().is_empty() {
        Paragraph::new("Loading bio...").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(bio).style(Style::default().fg(Color::White))
    };
    f.render_widget(
        bio.wrap(Wrap { trim: true })
            .block(block.padding(Padding::horizontal(1))),
        bio_area,
    );

    let details: Vec<Line> = CHARACTER_DETAILS
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label}: "),
                    Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*value, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightRed))
        .title(" Details ");
    f.render_widget(
        Paragraph::new(details)
            .wrap(Wrap { trim: true })
            .block(block.padding(Padding::horizontal(1))),
        details_area,
    );
}

fn draw_scene_image(f: &mut Frame, image: &SceneImage, screen: &mut Screen, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match screen.image.as_mut() {
        Some(protocol) => f.render_stateful_widget(StatefulImage::new(), inner, protocol),
        None => {
            // Data URIs are too long to be useful as text.
            let label = match image {
                SceneImage::None => String::new(),
                SceneImage::DataUri { mime_type, .. } => format!("[{mime_type} loading]"),
                SceneImage::Url(url) => format!("[{url}]"),
            };
            f.render_widget(
                Paragraph::new(label)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                center_rect(inner, Constraint::Percentage(100), Constraint::Length(1)),
            );
        }
    }
}

fn draw_description(f: &mut Frame, description: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray));
    f.render_widget(
        Paragraph::new(description)
            .wrap(Wrap { trim: true })
            .block(block.padding(Padding::horizontal(1))),
        area,
    );
}

fn draw_choices(f: &mut Frame, choices: &[String], selected: usize, disabled: bool, area: Rect) {
    let lines: Vec<Line> = choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let number = format!("{}. ", i + 1);
            if disabled {
                Line::from(vec![Span::raw(number), Span::raw(choice.as_str())])
                    .style(Style::default().fg(Color::DarkGray))
            } else if i == selected {
                Line::from(vec![
                    Span::styled(number, Style::default().fg(Color::Yellow)),
                    Span::styled(
                        choice.as_str(),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(vec![Span::raw(number), Span::raw(choice.as_str())])
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightRed))
        .title(" What do you do? ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameStatus;
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(state: &GameState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut screen = Screen::default();
        terminal
            .draw(|f| crate::ui::draw(f, state, &mut screen))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn scene() -> GameState {
        GameState {
            status: GameStatus::InProgress,
            character_bio: "Twenty-six and scared.".into(),
            scene_description: "Neon bleeds through the blinds.".into(),
            scene_image: SceneImage::fallback(),
            choices: vec!["Hide".into(), "Call Leo".into(), "Run".into()],
            history: vec!["Neon bleeds through the blinds.".into()],
            error: None,
        }
    }

    #[test]
    fn game_screen_shows_bio_scene_and_choices() {
        let screen = rendered(&scene());
        assert!(screen.contains("Twenty-six and scared."));
        assert!(screen.contains("Neon bleeds through the blinds."));
        assert!(screen.contains("2. Call Leo"));
        assert!(screen.contains("picsum.photos"));
    }

    #[test]
    fn character_panel_lists_the_fixed_details() {
        let screen = rendered(&scene());
        assert!(screen.contains("Character: Brock"));
        assert!(screen.contains("Details"));
        assert!(screen.contains("Age: 26"));
        assert!(screen.contains("Occupation:"));
        assert!(screen.contains("Residence:"));
        assert!(screen.contains("An Interactive Fiction - NYC, 1986"));
    }

    #[test]
    fn missing_bio_shows_a_placeholder() {
        let state = GameState {
            character_bio: String::new(),
            ..scene()
        };
        assert!(rendered(&state).contains("Loading bio..."));
    }

    #[test]
    fn loading_shows_the_spinner() {
        let state = GameState {
            status: GameStatus::Loading,
            ..scene()
        };
        assert!(rendered(&state).contains("The city is thinking"));
    }

    #[test]
    fn tiny_terminal_gets_a_warning() {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        let mut screen = Screen::default();
        terminal
            .draw(|f| crate::ui::draw(f, &scene(), &mut screen))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("Terminal too small"));
    }
}
