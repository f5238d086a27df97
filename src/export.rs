use crate::error::Result;
use crate::storyboard::{ProjectSettings, Scene, StoryboardProject};
use serde_json::{json, Value};
use tracing::info;

/// Builds the hand-off JSON for one scene, ready to paste into a downstream
/// video generator. Resolution is forced to 4k for final renders regardless
/// of the preview resolution; narration is deliberately excluded since it is
/// voice-over, not visual input.
pub fn scene_video_prompt(project_settings: &ProjectSettings, scene: &Scene) -> Value {
    json!({
        "project_settings": {
            "project_name": project_settings.project_name,
            "aspect_ratio": project_settings.aspect_ratio,
            "resolution": "4k",
            "global_aesthetic": project_settings.global_aesthetic,
        },
        "scenes": [
            {
                "scene_id": scene.scene_id,
                "duration_sec": scene.duration_sec,
                "visual_style_override": scene.visual_style_override,
                "character_design": scene.character_design,
                "character_performance": scene.character_performance,
                "environment_atmosphere": scene.environment_atmosphere,
                "visual_effects_vfx": scene.visual_effects_vfx,
                "camera_work": scene.camera_work,
                "audio_sound_design": scene.audio_sound_design,
                "transition": scene.transition,
            }
        ]
    })
}

/// Writes the full project (script, metadata, scenes, stale flag) as pretty
/// JSON.
pub async fn write_storyboard(path: &str, project: &StoryboardProject) -> Result<()> {
    let body = serde_json::to_string_pretty(project)?;
    tokio::fs::write(path, body).await?;
    info!("Storyboard written to {}", path);
    Ok(())
}

/// Writes one `scene_<id>_prompt.json` per scene into the work directory.
pub async fn write_scene_prompts(work_dir: &str, project: &StoryboardProject) -> Result<()> {
    let Some(scenes) = &project.scenes else {
        return Ok(());
    };
    for scene in scenes {
        let prompt = scene_video_prompt(&project.script.project_settings, scene);
        let path = format!("{}/scene_{}_prompt.json", work_dir, scene.scene_id);
        tokio::fs::write(&path, serde_json::to_string_pretty(&prompt)?).await?;
    }
    info!("Wrote {} scene prompt files to {}", scenes.len(), work_dir);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storyboard::{
        AudioSoundDesign, CameraWork, CharacterDesign, CharacterPerformance,
        EnvironmentAtmosphere, Transition, TransitionType, VisualEffects,
    };

    fn settings() -> ProjectSettings {
        ProjectSettings {
            project_name: "Crab Migration".into(),
            aspect_ratio: "9:16".into(),
            resolution: "1080p".into(),
            global_aesthetic: "claymation".into(),
        }
    }

    fn scene() -> Scene {
        Scene {
            scene_id: 3,
            duration_sec: 5.5,
            narration_script: "He pauses at the cliff edge.".into(),
            visual_style_override: "claymation, golden hour".into(),
            character_design: CharacterDesign {
                identity_physique: "small red clay crab".into(),
                costume_details: "tiny yellow backpack".into(),
                material_texture: "matte clay".into(),
            },
            character_performance: CharacterPerformance {
                primary_action_verb: "pauses".into(),
                movement_quality: "tentative".into(),
                facial_expression_change: "awe".into(),
                interaction_physics: "pebbles shift underfoot".into(),
            },
            environment_atmosphere: EnvironmentAtmosphere {
                location_setting: "cliff edge".into(),
                lighting_mood: "golden hour".into(),
                background_dynamics: "crashing waves below".into(),
            },
            visual_effects_vfx: VisualEffects {
                particles_atmosphere: "sea spray".into(),
                simulation_fx: "none".into(),
            },
            camera_work: CameraWork {
                vertical_framing: "low-angle hero shot".into(),
                camera_movement: "crane up".into(),
                lens_focus: "sharp on character".into(),
            },
            audio_sound_design: AudioSoundDesign {
                ambience_env: "wind and surf".into(),
                action_foley: "pebble clicks".into(),
                music_mood: "swelling strings".into(),
            },
            transition: Transition {
                transition_type: TransitionType::Dissolve,
                description: "dissolve into the waves".into(),
            },
        }
    }

    #[test]
    fn prompt_forces_4k_and_excludes_narration() {
        let prompt = scene_video_prompt(&settings(), &scene());
        assert_eq!(prompt["project_settings"]["resolution"], "4k");
        assert_eq!(prompt["scenes"][0]["scene_id"], 3);
        assert!(prompt["scenes"][0].get("narration_script").is_none());
        assert_eq!(
            prompt["scenes"][0]["transition"]["transition_type"],
            "Dissolve"
        );
    }

    #[test]
    fn prompt_wraps_a_single_scene() {
        let prompt = scene_video_prompt(&settings(), &scene());
        assert_eq!(prompt["scenes"].as_array().unwrap().len(), 1);
    }
}
