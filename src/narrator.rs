// Text side of a scene: persona, schemas and prompts for the storyteller model.
use serde_json::{Value, json};

use crate::ai::{GenerativeBackend, TextRequest};
use crate::ai_response::{InitialSceneResponse, NextSceneResponse};
use crate::error::AIError;

pub const NARRATOR_PREAMBLE: &str = r#"You are a master storyteller and game master for a gritty text-based adventure game set in mid-1980s New York City. The year is 1986. Your tone is descriptive, noir-inspired, and immersive.

The central plot is that the player character, Brock, has recently witnessed a murder in an alley. The killers saw him, and now his life is in danger. The story should revolve around this event, his fear, and his decisions on how to handle the situation (go to the police, hide, investigate, etc.).

Key Characters in Brock's life:
- Dino: Brock's boss at the pizza place. In his late 50s, world-weary but has a soft spot for Brock.
- Min-jun: Brock's neighbor, a Korean woman his age. She is sharp, observant, and perhaps a student or artist.
- Sarah: Brock's on-again, off-again girlfriend. She's a bit of a wild card, maybe involved in the downtown art or music scene.
- Leo: Brock's best friend from back home. He might call for updates, representing the "normal" life Brock left behind.

You will generate scene descriptions and choices for the player. Keep descriptions to a concise paragraph. Ensure choices are distinct and lead to interesting outcomes related to the central plot. Never break character."#;

pub const OPENING_PROMPT: &str = "Generate the starting scenario for our text adventure game. The main character is Brock, a man in his mid-twenties who moved to NYC from upstate a few months ago. He works as a waiter. The year is 1986. Please provide his bio, the initial scene in his apartment, and three starting choices, keeping in mind the central plot where he just witnessed a murder.";

pub fn initial_scene_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "characterBio": {
                "type": "string",
                "description": "A detailed, two-paragraph character biography for Brock, a 26-year-old. Mention he's from upstate NY, works at Dino's Pizza-Pies, and lives in Hell's Kitchen. Describe his personality and aspirations, hinting at the recent traumatic event he witnessed."
            },
            "sceneDescription": {
                "type": "string",
                "description": "A descriptive paragraph about Brock's small, cheap studio apartment in Hell's Kitchen. Set a gritty, lonely, and now fearful mood, as he's hiding out after witnessing a crime."
            },
            "choices": {
                "type": "array",
                "items": { "type": "string" },
                "description": "An array of three distinct, short action choices for Brock to make in his apartment, reflecting his current predicament."
            }
        },
        "required": ["characterBio", "sceneDescription", "choices"]
    })
}

pub fn next_scene_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sceneDescription": {
                "type": "string",
                "description": "A descriptive paragraph continuing the story based on the player's choice. Maintain the gritty, 1986 NYC noir tone and focus on the central murder plot."
            },
            "choices": {
                "type": "array",
                "items": { "type": "string" },
                "description": "An array of three new, distinct, short action choices for the player that relate to the ongoing narrative."
            }
        },
        "required": ["sceneDescription", "choices"]
    })
}

pub fn next_scene_prompt(context: &str, choice: &str) -> String {
    format!(
        "Here is the story so far:\n{context}\n\nThe player chose to: \"{choice}\".\n\nGenerate the next part of the story."
    )
}

pub fn initial_scene_request() -> TextRequest {
    TextRequest {
        system_instruction: NARRATOR_PREAMBLE.to_string(),
        prompt: OPENING_PROMPT.to_string(),
        schema_name: "initial_scene",
        schema: initial_scene_schema(),
    }
}

pub fn next_scene_request(context: &str, choice: &str) -> TextRequest {
    TextRequest {
        system_instruction: NARRATOR_PREAMBLE.to_string(),
        prompt: next_scene_prompt(context, choice),
        schema_name: "next_scene",
        schema: next_scene_schema(),
    }
}

pub async fn generate_initial_scene<B: GenerativeBackend>(
    backend: &B,
) -> Result<InitialSceneResponse, AIError> {
    let json = backend.generate_json(&initial_scene_request()).await?;
    log::debug!("Initial scene response: {json}");
    InitialSceneResponse::from_json(&json)
}

pub async fn generate_next_scene<B: GenerativeBackend>(
    backend: &B,
    context: &str,
    choice: &str,
) -> Result<NextSceneResponse, AIError> {
    let json = backend.generate_json(&next_scene_request(context, choice)).await?;
    log::debug!("Next scene response: {json}");
    NextSceneResponse::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_prompt_quotes_the_choice_after_the_context() {
        let prompt = next_scene_prompt("A\n---\nB", "Call the police");
        assert_eq!(
            prompt,
            "Here is the story so far:\nA\n---\nB\n\nThe player chose to: \"Call the police\".\n\nGenerate the next part of the story."
        );
    }

    #[test]
    fn schemas_require_their_fields() {
        assert_eq!(
            initial_scene_schema()["required"],
            json!(["characterBio", "sceneDescription", "choices"])
        );
        assert_eq!(
            next_scene_schema()["required"],
            json!(["sceneDescription", "choices"])
        );
    }

    #[test]
    fn both_requests_share_the_persona() {
        assert_eq!(initial_scene_request().system_instruction, NARRATOR_PREAMBLE);
        assert_eq!(
            next_scene_request("ctx", "run").system_instruction,
            NARRATOR_PREAMBLE
        );
    }
}
