use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::ai_response::{InitialSceneResponse, NextSceneResponse};
use crate::scene_image::SceneImage;

/// How many past scenes are sent back to the storyteller.
pub const CONTEXT_WINDOW: usize = 3;
pub const CONTEXT_SEPARATOR: &str = "\n---\n";

pub const START_FAILED_MESSAGE: &str =
    "Failed to start the adventure. The city is unforgiving. Please try again.";
pub const ADVANCE_FAILED_MESSAGE: &str =
    "The narrative faltered. Some stories are not meant to be told. Try again.";
pub const FALLBACK_CHOICE: &str = "Try again from previous step";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
pub enum GameStatus {
    #[default]
    NotStarted,
    Loading,
    InProgress,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameState {
    pub status: GameStatus,
    pub character_bio: String,
    pub scene_description: String,
    pub scene_image: SceneImage,
    pub choices: Vec<String>,
    /// Every scene description shown so far. Only ever appended to.
    pub history: Vec<String>,
    pub error: Option<String>,
}

/// Everything that can change the game state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StartRequested,
    InitialSceneReady {
        scene: InitialSceneResponse,
        image: SceneImage,
    },
    StartFailed,
    ChoiceSelected(String),
    NextSceneReady {
        scene: NextSceneResponse,
        image: SceneImage,
    },
    AdvanceFailed,
    ReturnToGame,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.status == GameStatus::Loading
    }

    /// A choice may only be made while a scene is on screen and nothing is in flight.
    pub fn can_choose(&self) -> bool {
        self.status == GameStatus::InProgress && !self.choices.is_empty()
    }

    pub fn can_start(&self) -> bool {
        match self.status {
            GameStatus::NotStarted => true,
            GameStatus::Error => self.history.is_empty(),
            GameStatus::Loading | GameStatus::InProgress => false,
        }
    }

    pub fn can_return_to_game(&self) -> bool {
        self.status == GameStatus::Error && !self.history.is_empty()
    }

    /// The last few scene descriptions, oldest first, joined by the separator.
    pub fn story_context(&self) -> String {
        let start = self.history.len().saturating_sub(CONTEXT_WINDOW);
        self.history[start..].join(CONTEXT_SEPARATOR)
    }
}

/// Applies one action. Actions that make no sense in the current status leave it untouched.
pub fn reduce(state: GameState, action: &Action) -> GameState {
    match action {
        Action::StartRequested if state.can_start() => GameState {
            status: GameStatus::Loading,
            error: None,
            ..state
        },
        Action::InitialSceneReady { scene, image } if state.is_loading() => GameState {
            status: GameStatus::InProgress,
            character_bio: scene.character_bio.clone(),
            scene_description: scene.scene_description.clone(),
            scene_image: image.clone(),
            choices: scene.choices.clone(),
            history: vec![scene.scene_description.clone()],
            error: None,
        },
        Action::StartFailed if state.is_loading() => GameState {
            status: GameStatus::Error,
            error: Some(START_FAILED_MESSAGE.to_string()),
            ..state
        },
        Action::ChoiceSelected(_) if state.can_choose() => GameState {
            status: GameStatus::Loading,
            error: None,
            ..state
        },
        Action::NextSceneReady { scene, image } if state.is_loading() => {
            let mut history = state.history;
            history.push(scene.scene_description.clone());
            GameState {
                status: GameStatus::InProgress,
                scene_description: scene.scene_description.clone(),
                scene_image: image.clone(),
                choices: scene.choices.clone(),
                history,
                error: None,
                ..state
            }
        }
        Action::AdvanceFailed if state.is_loading() => {
            let choices = if state.choices.is_empty() {
                vec![FALLBACK_CHOICE.to_string()]
            } else {
                state.choices
            };
            GameState {
                status: GameStatus::Error,
                error: Some(ADVANCE_FAILED_MESSAGE.to_string()),
                choices,
                ..state
            }
        }
        Action::ReturnToGame if state.can_return_to_game() => GameState {
            status: GameStatus::InProgress,
            ..state
        },
        _ => {
            log::debug!("Ignoring {:?} while {}", action, state.status);
            state
        }
    }
}
