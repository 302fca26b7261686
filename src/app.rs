// /app.rs
use crate::ai::{Backend, GenerativeBackend};
use crate::game_state::{Action, GameState, GameStatus, reduce};
use crate::orchestrator::Orchestrator;
use crate::scene_image::SceneImage;
use crate::tui::{Tui, TuiEvent};
use crate::ui::{self, Screen};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use image::DynamicImage;
use ratatui_image::picker::Picker;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Single writer of the game state: key presses and finished orchestrations
/// both arrive here and go through `reduce`.
pub struct App<B = Backend> {
    running: bool,
    state: GameState,
    screen: Screen,

    orchestrator: Orchestrator<B>,
    action_receiver: mpsc::UnboundedReceiver<Action>,

    http: reqwest::Client,
    image_sender: mpsc::UnboundedSender<(SceneImage, DynamicImage)>,
    image_receiver: mpsc::UnboundedReceiver<(SceneImage, DynamicImage)>,
}

impl<B: GenerativeBackend + 'static> App<B> {
    pub fn new(backend: B) -> Self {
        let (action_sender, action_receiver) = mpsc::unbounded_channel::<Action>();
        let (image_sender, image_receiver) = mpsc::unbounded_channel();

        Self {
            running: true,
            state: GameState::new(),
            screen: Screen::default(),

            orchestrator: Orchestrator::new(Arc::new(backend), action_sender),
            action_receiver,

            http: reqwest::Client::new(),
            image_sender,
            image_receiver,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?.tick_rate(8.0).frame_rate(30.0);
        tui.enter()?;

        while self.running {
            tokio::select! {
                Some(event) = tui.next() => self.handle_tui_event(event, &mut tui)?,
                Some(action) = self.action_receiver.recv() => self.dispatch(action),
                Some((image, decoded)) = self.image_receiver.recv() => {
                    self.show_scene_image(image, decoded, &tui.picker)
                }
            }
        }

        tui.exit()?;
        Ok(())
    }

    fn handle_tui_event(&mut self, event: TuiEvent, tui: &mut Tui) -> Result<()> {
        match event {
            TuiEvent::Key(key_event) => self.on_key(key_event),
            TuiEvent::Tick => {
                if self.state.is_loading() {
                    self.screen.spinner.tick();
                }
            }
            TuiEvent::Render | TuiEvent::Resize(_, _) => {
                tui.draw(|frame| ui::draw(frame, &self.state, &mut self.screen))?;
            }
            TuiEvent::Error => log::warn!("Terminal event stream reported an error"),
            TuiEvent::Init => {}
        }
        Ok(())
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('q')
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.running = false;
            return;
        }

        match self.state.status {
            GameStatus::NotStarted => {
                if key.code == KeyCode::Enter {
                    self.start_game();
                }
            }
            // Input stays disabled until the outstanding scene lands.
            GameStatus::Loading => {}
            GameStatus::InProgress => self.on_game_key(key),
            GameStatus::Error => {
                if key.code == KeyCode::Enter {
                    if self.state.can_return_to_game() {
                        self.dispatch(Action::ReturnToGame);
                    } else {
                        self.start_game();
                    }
                }
            }
        }
    }

    fn on_game_key(&mut self, key: KeyEvent) {
        let choice_count = self.state.choices.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.screen.select_previous(choice_count),
            KeyCode::Down | KeyCode::Char('j') => self.screen.select_next(choice_count),
            KeyCode::Enter => self.choose(self.screen.selected_choice),
            KeyCode::Char(c) => {
                if let Some(digit) = c.to_digit(10).filter(|d| *d >= 1) {
                    self.choose(digit as usize - 1);
                }
            }
            _ => {}
        }
    }

    /// Waits for the outstanding orchestration to report back and applies its result.
    pub async fn settle(&mut self) -> bool {
        match self.action_receiver.recv().await {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    pub fn start_game(&mut self) {
        if !self.state.can_start() {
            return;
        }
        self.dispatch(Action::StartRequested);
        self.orchestrator.start();
    }

    pub fn choose(&mut self, index: usize) {
        if !self.state.can_choose() {
            return;
        }
        let Some(choice) = self.state.choices.get(index).cloned() else {
            return;
        };
        let context = self.state.story_context();
        self.dispatch(Action::ChoiceSelected(choice.clone()));
        self.screen.selected_choice = 0;
        self.orchestrator.advance(context, choice);
    }

    pub fn dispatch(&mut self, action: Action) {
        let previous_image = self.state.scene_image.clone();
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, &action);
        log::debug!("{} -> {}", action_name(&action), self.state.status);

        if self.state.scene_image != previous_image {
            self.screen.image = None;
            self.load_scene_image();
        }
    }

    // Decoding happens off the event loop; the result is matched against the
    // current scene when it comes back.
    fn load_scene_image(&self) {
        let image = self.state.scene_image.clone();
        if image.is_none() {
            return;
        }
        let http = self.http.clone();
        let sender = self.image_sender.clone();
        tokio::spawn(async move {
            match image.load(&http).await {
                Ok(Some(decoded)) => {
                    let _ = sender.send((image, decoded));
                }
                Ok(None) => {}
                Err(e) => log::warn!("Could not load scene image: {e}"),
            }
        });
    }

    fn show_scene_image(&mut self, image: SceneImage, decoded: DynamicImage, picker: &Picker) {
        if image == self.state.scene_image {
            self.screen.image = Some(picker.new_resize_protocol(decoded));
        }
    }
}

// Scene payloads are long, keep the log line short.
fn action_name(action: &Action) -> &'static str {
    match action {
        Action::StartRequested => "StartRequested",
        Action::InitialSceneReady { .. } => "InitialSceneReady",
        Action::StartFailed => "StartFailed",
        Action::ChoiceSelected(_) => "ChoiceSelected",
        Action::NextSceneReady { .. } => "NextSceneReady",
        Action::AdvanceFailed => "AdvanceFailed",
        Action::ReturnToGame => "ReturnToGame",
    }
}
