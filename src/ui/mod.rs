// ui/mod.rs

mod constants;
mod error;
pub mod game;
pub mod spinner;
mod title;
pub mod utils;

pub use utils::{MIN_HEIGHT, MIN_WIDTH};

use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Style},
    widgets::Paragraph,
};
use ratatui_image::protocol::StatefulProtocol;

use crate::game_state::{GameState, GameStatus};
use spinner::Spinner;

/// View-only state that never reaches the game logic.
#[derive(Default)]
pub struct Screen {
    pub selected_choice: usize,
    pub spinner: Spinner,
    pub image: Option<StatefulProtocol>,
}

impl Screen {
    pub fn select_next(&mut self, choice_count: usize) {
        if choice_count > 0 {
            self.selected_choice = (self.selected_choice + 1) % choice_count;
        }
    }

    pub fn select_previous(&mut self, choice_count: usize) {
        if choice_count > 0 {
            self.selected_choice = (self.selected_choice + choice_count - 1) % choice_count;
        }
    }
}

pub fn draw(f: &mut Frame, state: &GameState, screen: &mut Screen) {
    let size = f.area();
    if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
        let warning = Paragraph::new("Terminal too small. Please resize.")
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(warning, size);
        return;
    }

    match state.status {
        GameStatus::NotStarted => title::draw_title(f),
        GameStatus::Loading if state.character_bio.is_empty() => {
            game::draw_opening_wait(f, &screen.spinner)
        }
        GameStatus::Loading | GameStatus::InProgress => game::draw_in_game(f, state, screen),
        GameStatus::Error => error::draw_error(f, state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        let mut screen = Screen::default();
        screen.select_previous(3);
        assert_eq!(screen.selected_choice, 2);
        screen.select_next(3);
        assert_eq!(screen.selected_choice, 0);
        screen.select_next(0);
        assert_eq!(screen.selected_choice, 0);
    }
}
