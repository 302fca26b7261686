// src/ai_response.rs
use serde::{Deserialize, Serialize};

use crate::error::AIError;

pub const EXPECTED_CHOICES: usize = 3;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InitialSceneResponse {
    pub character_bio: String,
    pub scene_description: String,
    pub choices: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NextSceneResponse {
    pub scene_description: String,
    pub choices: Vec<String>,
}

impl InitialSceneResponse {
    pub fn from_json(json: &str) -> Result<Self, AIError> {
        let mut scene: Self = serde_json::from_str(json.trim())?;
        scene.choices = check_scene(&scene.scene_description, scene.choices)?;
        if scene.character_bio.trim().is_empty() {
            return Err(AIError::Schema("characterBio is empty".into()));
        }
        Ok(scene)
    }
}

impl NextSceneResponse {
    pub fn from_json(json: &str) -> Result<Self, AIError> {
        let mut scene: Self = serde_json::from_str(json.trim())?;
        scene.choices = check_scene(&scene.scene_description, scene.choices)?;
        Ok(scene)
    }
}

// Blank scenes fail. Blank choices are dropped; a count other than three only warns.
fn check_scene(description: &str, choices: Vec<String>) -> Result<Vec<String>, AIError> {
    if description.trim().is_empty() {
        return Err(AIError::Schema("sceneDescription is empty".into()));
    }
    let choices: Vec<String> = choices
        .into_iter()
        .map(|choice| choice.trim().to_string())
        .filter(|choice| !choice.is_empty())
        .collect();
    if choices.is_empty() {
        return Err(AIError::Schema("no choices were returned".into()));
    }
    if choices.len() != EXPECTED_CHOICES {
        log::warn!(
            "Expected {} choices, got {}: {:?}",
            EXPECTED_CHOICES,
            choices.len(),
            choices
        );
    }
    Ok(choices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_initial_scene_with_surrounding_whitespace() {
        let json = r#"
            {"characterBio": "Brock.", "sceneDescription": "Rain.", "choices": ["a", "b", "c"]}
        "#;
        let scene = InitialSceneResponse::from_json(json).unwrap();
        assert_eq!(scene.character_bio, "Brock.");
        assert_eq!(scene.choices.len(), 3);
    }

    #[test]
    fn missing_field_is_a_parse_error() {
        let json = r#"{"sceneDescription": "Rain.", "choices": ["a"]}"#;
        assert!(matches!(
            InitialSceneResponse::from_json(json),
            Err(AIError::Parse(_))
        ));
    }

    #[test]
    fn empty_choices_are_rejected() {
        let json = r#"{"sceneDescription": "Rain.", "choices": []}"#;
        assert!(matches!(
            NextSceneResponse::from_json(json),
            Err(AIError::Schema(_))
        ));
    }

    #[test]
    fn two_choices_are_kept() {
        let json = r#"{"sceneDescription": "Rain.", "choices": ["run", "hide"]}"#;
        let scene = NextSceneResponse::from_json(json).unwrap();
        assert_eq!(scene.choices, vec!["run", "hide"]);
    }

    #[test]
    fn blank_choices_are_dropped() {
        let json = r#"{"sceneDescription": "Rain.", "choices": ["Run", "", "  Hide ", "   "]}"#;
        let scene = NextSceneResponse::from_json(json).unwrap();
        assert_eq!(scene.choices, vec!["Run", "Hide"]);
    }

    #[test]
    fn only_blank_choices_are_rejected() {
        let json = r#"{"characterBio": "Brock.", "sceneDescription": "Rain.", "choices": ["", " "]}"#;
        assert!(matches!(
            InitialSceneResponse::from_json(json),
            Err(AIError::Schema(_))
        ));
    }

    #[test]
    fn malformed_json_fails() {
        assert!(NextSceneResponse::from_json("Sure! Here is the scene").is_err());
    }
}
