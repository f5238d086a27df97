use crate::api::{strip_code_fence, GeminiClient};
use crate::error::{Result, StudioError};
use crate::storyboard::{GenerationOptions, ProjectSettings, Scene, SceneDuration, TransitionType};
use crate::styles::{texture_guidance, VisualStyle};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

const TEMPERATURE: f64 = 0.8;

#[derive(Debug, Deserialize)]
struct SceneListResponse {
    scenes: Vec<Scene>,
}

/// Segments an existing script into an ordered scene breakdown with full
/// structured visual prompts. Stage 2 of the pipeline.
pub async fn generate_scenes(
    client: &GeminiClient,
    script_content: &str,
    project_settings: &ProjectSettings,
    options: &GenerationOptions,
    style: &VisualStyle,
) -> Result<Vec<Scene>> {
    let scene_count = options.duration.scene_count();
    info!("Generating {} scenes from script...", scene_count);

    let instruction =
        build_scene_instruction(script_content, project_settings, options.duration, style);
    let schema = scene_response_schema();

    let text = client
        .generate_content(
            &instruction,
            "ACTION! Segment the script and generate the scenes JSON now.",
            Some(schema),
            TEMPERATURE,
        )
        .await?;

    let json_text = strip_code_fence(&text);

    // Reject a top-level shape without a scenes array before the element-level
    // parse so the two failure modes stay distinguishable in the message.
    let top: Value = serde_json::from_str(json_text)
        .map_err(|e| StudioError::InvalidSceneFormat(format!("scenes JSON: {}", e)))?;
    if !top.get("scenes").map(Value::is_array).unwrap_or(false) {
        return Err(StudioError::InvalidSceneFormat(
            "missing 'scenes' array in response".to_string(),
        ));
    }

    let parsed: SceneListResponse = serde_json::from_value(top)
        .map_err(|e| StudioError::InvalidSceneFormat(format!("scene element: {}", e)))?;

    // Scenes are returned in received order; ids are advisory. Deviations are
    // logged, not rejected.
    if parsed.scenes.len() != scene_count {
        warn!(
            "Model returned {} scenes, requested {}",
            parsed.scenes.len(),
            scene_count
        );
    }
    for (i, scene) in parsed.scenes.iter().enumerate() {
        let expected = (i + 1) as u32;
        if scene.scene_id != expected {
            warn!("Scene at position {} carries id {}", expected, scene.scene_id);
        }
    }

    info!("Successfully generated {} scenes", parsed.scenes.len());
    Ok(parsed.scenes)
}

pub fn build_scene_instruction(
    script_content: &str,
    project_settings: &ProjectSettings,
    duration: SceneDuration,
    style: &VisualStyle,
) -> String {
    let scene_count = duration.scene_count();
    let pacing_guide = match duration {
        SceneDuration::Short => {
            "FAST-PACED SPRINT. Every 3 seconds must have a new visual hook. Structure: \
             HOOK (Sc 1-2) -> PROBLEM (Sc 3-4) -> SOLUTION/FACT (Sc 5-8) -> PUNCHLINE (Sc 9-10)."
        }
        SceneDuration::Long => {
            "CINEMATIC JOURNEY. Allow shots to breathe. Use the 'Establish -> Isolate -> Detail' \
             visual pattern. Build emotional connection before delivering facts."
        }
    };
    let transitions = TransitionType::ALL
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"YOU ARE A WORLD-CLASS ANIMATION DIRECTOR (Pixar/Aardman Alumni).
Segment the narration script below into a storyboard of exactly {scene_count} scenes.

=== CONFIGURATION ===
- PROJECT: {project_name}
- MODE: {aspect_ratio}
- VISUAL STYLE: {style_label}
- KEYWORD PROMPT: "{style_keyword}"
- GLOBAL AESTHETIC: {global_aesthetic}
- TOTAL SCENES: exactly {scene_count}
- PACING: {pacing_guide}

=== STRICT RULES ===
1. CHARACTER CONSISTENCY (CRUCIAL): establish a definitive character lock in
   scene 1 with extremely detailed identity_physique, costume_details and
   material_texture, and repeat that exact description in every scene the
   character appears in.
2. {texture_notes}
3. CINEMATOGRAPHY: flat, static camera angles are FORBIDDEN. Every scene must
   use specific framing vocabulary (close-up macro, low-angle hero shot,
   top-down establishing, over-the-shoulder) and a named camera movement
   (dolly in, crane up, whip pan, slow push, orbital).
4. NARRATION COVERAGE: the narration_script fields must partition the input
   script in order: concatenating them scene 1 through scene {scene_count}
   must reconstruct the original narration.
5. NUMBERING: scene_id starts at 1 and increments by 1 in story order.
6. TRANSITIONS: transition_type must be one of: {transitions}.

=== SCRIPT TO SEGMENT ===
{script_content}"#,
        scene_count = scene_count,
        project_name = project_settings.project_name,
        aspect_ratio = project_settings.aspect_ratio,
        style_label = style.label,
        style_keyword = style.prompt_keyword,
        global_aesthetic = project_settings.global_aesthetic,
        pacing_guide = pacing_guide,
        texture_notes = texture_guidance(style.family),
        transitions = transitions,
        script_content = script_content,
    )
}

/// Formal output schema for stage 2: `{ "scenes": [ ... ] }` with every
/// sub-object field required.
fn scene_response_schema() -> Value {
    fn string() -> Value {
        json!({ "type": "STRING" })
    }
    json!({
        "type": "OBJECT",
        "properties": {
            "scenes": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "scene_id": { "type": "INTEGER" },
                        "duration_sec": { "type": "NUMBER" },
                        "narration_script": string(),
                        "visual_style_override": string(),
                        "character_design": {
                            "type": "OBJECT",
                            "properties": {
                                "identity_physique": string(),
                                "costume_details": string(),
                                "material_texture": string()
                            },
                            "required": ["identity_physique", "costume_details", "material_texture"]
                        },
                        "character_performance": {
                            "type": "OBJECT",
                            "properties": {
                                "primary_action_verb": string(),
                                "movement_quality": string(),
                                "facial_expression_change": string(),
                                "interaction_physics": string()
                            },
                            "required": [
                                "primary_action_verb",
                                "movement_quality",
                                "facial_expression_change",
                                "interaction_physics"
                            ]
                        },
                        "environment_atmosphere": {
                            "type": "OBJECT",
                            "properties": {
                                "location_setting": string(),
                                "lighting_mood": string(),
                                "background_dynamics": string()
                            },
                            "required": ["location_setting", "lighting_mood", "background_dynamics"]
                        },
                        "visual_effects_vfx": {
                            "type": "OBJECT",
                            "properties": {
                                "particles_atmosphere": string(),
                                "simulation_fx": string()
                            },
                            "required": ["particles_atmosphere", "simulation_fx"]
                        },
                        "camera_work": {
                            "type": "OBJECT",
                            "properties": {
                                "vertical_framing": string(),
                                "camera_movement": string(),
                                "lens_focus": string()
                            },
                            "required": ["vertical_framing", "camera_movement", "lens_focus"]
                        },
                        "audio_sound_design": {
                            "type": "OBJECT",
                            "properties": {
                                "ambience_env": string(),
                                "action_foley": string(),
                                "music_mood": string()
                            },
                            "required": ["ambience_env", "action_foley", "music_mood"]
                        },
                        "transition": {
                            "type": "OBJECT",
                            "properties": {
                                "transition_type": {
                                    "type": "STRING",
                                    "enum": ["HardCut", "Dissolve", "Wipe", "MatchCut", "ZoomTransition"]
                                },
                                "description": string()
                            },
                            "required": ["transition_type", "description"]
                        }
                    },
                    "required": [
                        "scene_id",
                        "duration_sec",
                        "narration_script",
                        "visual_style_override",
                        "character_design",
                        "character_performance",
                        "environment_atmosphere",
                        "visual_effects_vfx",
                        "camera_work",
                        "audio_sound_design",
                        "transition"
                    ]
                }
            }
        },
        "required": ["scenes"]
    })
}
