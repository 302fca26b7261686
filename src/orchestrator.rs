// Text first, then the picture. Either step failing fails the whole transition.
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::ai::GenerativeBackend;
use crate::ai_response::{InitialSceneResponse, NextSceneResponse};
use crate::error::OrchestrationError;
use crate::game_state::Action;
use crate::imager::{self, OPENING_IMAGE_PROMPT};
use crate::narrator;
use crate::scene_image::SceneImage;

pub async fn start_story<B: GenerativeBackend>(
    backend: &B,
) -> Result<(InitialSceneResponse, SceneImage), OrchestrationError> {
    let scene = narrator::generate_initial_scene(backend)
        .await
        .map_err(OrchestrationError::Start)?;
    let image = imager::generate_image(backend, OPENING_IMAGE_PROMPT)
        .await
        .map_err(OrchestrationError::Start)?;
    Ok((scene, image))
}

/// `context` is the story so far as built by `GameState::story_context`.
pub async fn advance_story<B: GenerativeBackend>(
    backend: &B,
    context: &str,
    choice: &str,
) -> Result<(NextSceneResponse, SceneImage), OrchestrationError> {
    let scene = narrator::generate_next_scene(backend, context, choice)
        .await
        .map_err(OrchestrationError::Advance)?;
    let image_prompt = imager::scene_image_prompt(&scene.scene_description);
    let image = imager::generate_image(backend, &image_prompt)
        .await
        .map_err(OrchestrationError::Advance)?;
    Ok((scene, image))
}

/// Runs the start workflow and folds its outcome into a single action.
pub async fn start_action<B: GenerativeBackend>(backend: &B) -> Action {
    match start_story(backend).await {
        Ok((scene, image)) => Action::InitialSceneReady { scene, image },
        Err(e) => {
            log::error!("{e}");
            Action::StartFailed
        }
    }
}

pub async fn advance_action<B: GenerativeBackend>(
    backend: &B,
    context: &str,
    choice: &str,
) -> Action {
    match advance_story(backend, context, choice).await {
        Ok((scene, image)) => Action::NextSceneReady { scene, image },
        Err(e) => {
            log::error!("{e}");
            Action::AdvanceFailed
        }
    }
}

/// Spawns orchestrations and hands their result back to the event loop.
#[derive(Debug)]
pub struct Orchestrator<B> {
    backend: Arc<B>,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl<B> Clone for Orchestrator<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            action_sender: self.action_sender.clone(),
        }
    }
}

impl<B: GenerativeBackend + 'static> Orchestrator<B> {
    pub fn new(backend: Arc<B>, action_sender: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            backend,
            action_sender,
        }
    }

    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let sender = self.action_sender.clone();
        tokio::spawn(async move {
            log::info!("Generating the opening scene");
            let action = start_action(backend.as_ref()).await;
            let _ = sender.send(action);
        })
    }

    pub fn advance(&self, context: String, choice: String) -> tokio::task::JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let sender = self.action_sender.clone();
        tokio::spawn(async move {
            log::info!("Player chose: {choice}");
            let action = advance_action(backend.as_ref(), &context, &choice).await;
            let _ = sender.send(action);
        })
    }
}
