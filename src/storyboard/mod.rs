use serde::{Deserialize, Serialize};

/// Target duration format. Drives word count, scene count, aspect ratio
/// and pacing for both generation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneDuration {
    Short,
    Long,
}

impl SceneDuration {
    /// Number of scenes the scene generator asks for.
    pub fn scene_count(&self) -> usize {
        match self {
            SceneDuration::Short => 10,
            SceneDuration::Long => 25,
        }
    }

    /// Inclusive word-count window for the narration script.
    pub fn word_range(&self) -> (usize, usize) {
        match self {
            SceneDuration::Short => (130, 150),
            SceneDuration::Long => (300, 400),
        }
    }

    pub fn aspect_ratio(&self) -> &'static str {
        match self {
            SceneDuration::Short => "9:16",
            SceneDuration::Long => "16:9",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneDuration::Short => "short",
            SceneDuration::Long => "long",
        }
    }
}

impl std::str::FromStr for SceneDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "short" => Ok(SceneDuration::Short),
            "long" => Ok(SceneDuration::Long),
            other => Err(format!("unknown duration '{other}', expected 'short' or 'long'")),
        }
    }
}

/// Parameters for one generation run. Immutable once passed into a call.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub style_id: String,
    pub duration: SceneDuration,
    /// Explicit API key; falls back to the ZUMBI_API_KEY environment
    /// variable when absent.
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub project_name: String,
    pub aspect_ratio: String,
    pub resolution: String,
    pub global_aesthetic: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketingMetadata {
    pub title: String,
    pub description: String,
    pub hashtags: Vec<String>,
}

/// Stage-1 output: project settings, the narration script, marketing
/// metadata and a voice-over direction guide. Replaced wholesale on
/// regeneration; only `script_content` is user-editable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptResult {
    pub project_settings: ProjectSettings,
    pub script_content: String,
    pub marketing_metadata: MarketingMetadata,
    pub voice_over_guide: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDesign {
    pub identity_physique: String,
    pub costume_details: String,
    pub material_texture: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterPerformance {
    pub primary_action_verb: String,
    pub movement_quality: String,
    pub facial_expression_change: String,
    pub interaction_physics: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentAtmosphere {
    pub location_setting: String,
    pub lighting_mood: String,
    pub background_dynamics: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualEffects {
    pub particles_atmosphere: String,
    pub simulation_fx: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraWork {
    pub vertical_framing: String,
    pub camera_movement: String,
    pub lens_focus: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSoundDesign {
    pub ambience_env: String,
    pub action_foley: String,
    pub music_mood: String,
}

/// Closed set of scene-to-scene transitions the model may pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionType {
    HardCut,
    Dissolve,
    Wipe,
    MatchCut,
    ZoomTransition,
}

impl TransitionType {
    pub const ALL: [TransitionType; 5] = [
        TransitionType::HardCut,
        TransitionType::Dissolve,
        TransitionType::Wipe,
        TransitionType::MatchCut,
        TransitionType::ZoomTransition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::HardCut => "HardCut",
            TransitionType::Dissolve => "Dissolve",
            TransitionType::Wipe => "Wipe",
            TransitionType::MatchCut => "MatchCut",
            TransitionType::ZoomTransition => "ZoomTransition",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transition {
    pub transition_type: TransitionType,
    pub description: String,
}

/// One narrative/visual unit of the storyboard. Field names are the wire
/// contract the model is prompted to emit and the export format consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub scene_id: u32,
    pub duration_sec: f64,
    /// The segment of the narration script covered by this scene.
    pub narration_script: String,
    pub visual_style_override: String,
    pub character_design: CharacterDesign,
    pub character_performance: CharacterPerformance,
    pub environment_atmosphere: EnvironmentAtmosphere,
    pub visual_effects_vfx: VisualEffects,
    pub camera_work: CameraWork,
    pub audio_sound_design: AudioSoundDesign,
    pub transition: Transition,
}

/// Result store: one script plus zero-or-one generated scene sequence.
/// Editing the script while scenes exist marks them stale instead of
/// discarding them; a fresh scene generation clears the flag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryboardProject {
    pub script: ScriptResult,
    pub scenes: Option<Vec<Scene>>,
    #[serde(default)]
    pub scenes_stale: bool,
}

impl StoryboardProject {
    pub fn new(script: ScriptResult) -> Self {
        Self {
            script,
            scenes: None,
            scenes_stale: false,
        }
    }

    /// Replaces any prior scene sequence wholesale.
    pub fn merge_scenes(&mut self, scenes: Vec<Scene>) {
        self.scenes = Some(scenes);
        self.scenes_stale = false;
    }

    pub fn edit_script(&mut self, new_text: String) {
        if self.script.script_content != new_text {
            self.script.script_content = new_text;
            if self.scenes.is_some() {
                self.scenes_stale = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_script() -> ScriptResult {
        ScriptResult {
            project_settings: ProjectSettings {
                project_name: "Crab Migration".into(),
                aspect_ratio: "9:16".into(),
                resolution: "1080p".into(),
                global_aesthetic: "claymation".into(),
            },
            script_content: "A small red crab sets out alone.".into(),
            marketing_metadata: MarketingMetadata {
                title: "Lost Crab!".into(),
                description: "A tiny crab's big journey.".into(),
                hashtags: vec!["#crab".into(), "#claymation".into()],
            },
            voice_over_guide: "Warm storytelling timbre.".into(),
        }
    }

    fn sample_scene(id: u32) -> Scene {
        Scene {
            scene_id: id,
            duration_sec: 4.0,
            narration_script: "A small red crab sets out alone.".into(),
            visual_style_override: "claymation".into(),
            character_design: CharacterDesign {
                identity_physique: "small red clay crab".into(),
                costume_details: "tiny yellow backpack".into(),
                material_texture: "matte clay, fingerprints visible".into(),
            },
            character_performance: CharacterPerformance {
                primary_action_verb: "scuttles".into(),
                movement_quality: "hesitant, stop-start".into(),
                facial_expression_change: "wide eyes narrowing to resolve".into(),
                interaction_physics: "claws click on wet asphalt".into(),
            },
            environment_atmosphere: EnvironmentAtmosphere {
                location_setting: "coastal road at dawn".into(),
                lighting_mood: "golden hour".into(),
                background_dynamics: "distant wave of migrating crabs".into(),
            },
            visual_effects_vfx: VisualEffects {
                particles_atmosphere: "sea mist".into(),
                simulation_fx: "none".into(),
            },
            camera_work: CameraWork {
                vertical_framing: "low angle close-up".into(),
                camera_movement: "slow dolly in".into(),
                lens_focus: "sharp on character, soft background".into(),
            },
            audio_sound_design: AudioSoundDesign {
                ambience_env: "waves, gulls".into(),
                action_foley: "clay-on-stone clicks".into(),
                music_mood: "gentle marimba".into(),
            },
            transition: Transition {
                transition_type: TransitionType::HardCut,
                description: "cut on claw step".into(),
            },
        }
    }

    #[test]
    fn edit_script_is_idempotent_and_keeps_scenes() {
        let mut project = StoryboardProject::new(sample_script());
        project.merge_scenes(vec![sample_scene(1), sample_scene(2)]);

        project.edit_script("New narration.".into());
        project.edit_script("New narration.".into());

        assert_eq!(project.script.script_content, "New narration.");
        assert_eq!(project.scenes.as_ref().map(Vec::len), Some(2));
        assert!(project.scenes_stale);
    }

    #[test]
    fn edit_without_scenes_does_not_mark_stale() {
        let mut project = StoryboardProject::new(sample_script());
        project.edit_script("New narration.".into());
        assert!(!project.scenes_stale);
    }

    #[test]
    fn merge_scenes_clears_stale_flag_and_replaces_wholesale() {
        let mut project = StoryboardProject::new(sample_script());
        project.merge_scenes(vec![sample_scene(1), sample_scene(2), sample_scene(3)]);
        project.edit_script("Edited.".into());
        assert!(project.scenes_stale);

        project.merge_scenes(vec![sample_scene(1)]);
        assert!(!project.scenes_stale);
        assert_eq!(project.scenes.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn transition_type_round_trips_through_serde() {
        let json = serde_json::to_string(&TransitionType::MatchCut).unwrap();
        assert_eq!(json, "\"MatchCut\"");
        let back: TransitionType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TransitionType::MatchCut);
    }

    #[test]
    fn scene_deserializes_from_wire_shape() {
        let raw = serde_json::to_string(&sample_scene(7)).unwrap();
        let scene: Scene = serde_json::from_str(&raw).unwrap();
        assert_eq!(scene.scene_id, 7);
        assert_eq!(scene.transition.transition_type, TransitionType::HardCut);
    }
}
