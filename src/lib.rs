pub mod ai;
pub mod ai_response;
pub mod app;
pub mod error;
pub mod game_state;
pub mod imager;
pub mod logging;
pub mod narrator;
pub mod orchestrator;
pub mod scene_image;
pub mod settings;
pub mod tui;
pub mod ui;

// Re-export commonly used items for easier access
pub use ai::{Backend, GeneratedImage, GenerativeBackend, ImageRequest, TextRequest};
pub use ai_response::{InitialSceneResponse, NextSceneResponse};
pub use app::App;
pub use error::{AIError, AppError, OrchestrationError};
pub use game_state::{Action, GameState, GameStatus, reduce};
pub use scene_image::{FALLBACK_IMAGE_URL, SceneImage};
pub use settings::{Provider, Settings};
