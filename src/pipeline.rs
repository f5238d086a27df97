use crate::api::GeminiClient;
use crate::error::{Result, StudioError};
use crate::generate::{generate_scenes, generate_script};
use crate::storyboard::{GenerationOptions, Scene, ScriptResult, StoryboardProject};
use crate::styles::resolve_style;
use tracing::{error, info};

/// Environment fallback for the API key when no explicit key is supplied.
pub const API_KEY_ENV: &str = "ZUMBI_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    ScriptGenerating,
    ScriptReady,
    SceneGenerating,
    Complete,
}

/// Drives the two generation stages in sequence and owns the result store.
///
/// Single-threaded cooperative model: one controller, one writer. Both
/// generation operations take `&mut self`, so a second call cannot start
/// while one is suspended on the network; `is_generating` exists so callers
/// that observe the controller across tasks can gate their own affordances.
#[derive(Debug)]
pub struct PipelineController {
    stage: PipelineStage,
    project: Option<StoryboardProject>,
    last_options: Option<GenerationOptions>,
    last_error: Option<String>,
    base_url: Option<String>,
    model: Option<String>,
}

impl Default for PipelineController {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineController {
    pub fn new() -> Self {
        Self {
            stage: PipelineStage::Idle,
            project: None,
            last_options: None,
            last_error: None,
            base_url: None,
            model: None,
        }
    }

    /// Points generation calls at an alternative API endpoint. Used by tests.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    pub fn is_generating(&self) -> bool {
        matches!(
            self.stage,
            PipelineStage::ScriptGenerating | PipelineStage::SceneGenerating
        )
    }

    pub fn project(&self) -> Option<&StoryboardProject> {
        self.project.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Stage 1: topic -> script, metadata, voice-over guide.
    ///
    /// Replaces any prior project wholesale on success (scenes included).
    /// On failure the previous project and stage are left untouched, with
    /// the message recorded in `last_error`.
    pub async fn start_script_generation(
        &mut self,
        topic: &str,
        options: GenerationOptions,
    ) -> Result<ScriptResult> {
        if topic.trim().is_empty() {
            return self.fail(StudioError::EmptyTopic, "Script generation failed");
        }
        let api_key = match resolve_api_key(&options) {
            Some(key) => key,
            None => return self.fail(StudioError::MissingCredential, "Script generation failed"),
        };

        let prior_stage = self.stage;
        self.stage = PipelineStage::ScriptGenerating;
        self.last_error = None;

        let client = self.client(api_key);
        let style = resolve_style(&options.style_id);
        match generate_script(&client, topic, &options, style).await {
            Ok(result) => {
                self.project = Some(StoryboardProject::new(result.clone()));
                self.last_options = Some(options);
                self.stage = PipelineStage::ScriptReady;
                info!("Script ready, pipeline advanced to ScriptReady");
                Ok(result)
            }
            Err(e) => {
                self.stage = prior_stage;
                self.fail(e, "Script generation failed")
            }
        }
    }

    /// Stage 2: segments the current script into scenes and merges them into
    /// the result store. Requires a completed stage 1.
    pub async fn start_scene_generation(&mut self) -> Result<Vec<Scene>> {
        let (options, script_content, project_settings) = match (&self.project, &self.last_options)
        {
            (Some(project), Some(options))
                if !project.script.script_content.trim().is_empty() =>
            {
                (
                    options.clone(),
                    project.script.script_content.clone(),
                    project.script.project_settings.clone(),
                )
            }
            _ => {
                return self.fail(
                    StudioError::MissingPrerequisite(
                        "missing script or configuration".to_string(),
                    ),
                    "Scene generation failed",
                )
            }
        };
        let api_key = match resolve_api_key(&options) {
            Some(key) => key,
            None => return self.fail(StudioError::MissingCredential, "Scene generation failed"),
        };

        let prior_stage = self.stage;
        self.stage = PipelineStage::SceneGenerating;
        self.last_error = None;

        let client = self.client(api_key);
        let style = resolve_style(&options.style_id);

        match generate_scenes(&client, &script_content, &project_settings, &options, style).await {
            Ok(scenes) => {
                if let Some(project) = self.project.as_mut() {
                    project.merge_scenes(scenes.clone());
                }
                self.stage = PipelineStage::Complete;
                info!("Scenes merged, pipeline advanced to Complete");
                Ok(scenes)
            }
            Err(e) => {
                self.stage = prior_stage;
                self.fail(e, "Scene generation failed")
            }
        }
    }

    /// Replaces the script text in place. A no-op when no project exists.
    /// Existing scenes are kept but marked stale.
    pub fn edit_script(&mut self, new_text: &str) {
        if let Some(project) = self.project.as_mut() {
            project.edit_script(new_text.to_string());
        }
    }

    fn client(&self, api_key: String) -> GeminiClient {
        let mut client = GeminiClient::new(api_key);
        if let Some(base_url) = &self.base_url {
            client = client.with_base_url(base_url);
        }
        if let Some(model) = &self.model {
            client = client.with_model(model);
        }
        client
    }

    fn fail<T>(&mut self, err: StudioError, prefix: &str) -> Result<T> {
        let message = format!("{}: {}", prefix, err);
        error!("{}", message);
        self.last_error = Some(message);
        Err(err)
    }
}

/// Explicit option value first, then the process-level fallback. Resolved at
/// call time, never at startup.
fn resolve_api_key(options: &GenerationOptions) -> Option<String> {
    options
        .api_key
        .clone()
        .filter(|k| !k.trim().is_empty())
        .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storyboard::SceneDuration;

    fn options(api_key: Option<&str>) -> GenerationOptions {
        GenerationOptions {
            style_id: "clay".to_string(),
            duration: SceneDuration::Short,
            api_key: api_key.map(String::from),
        }
    }

    #[test]
    fn new_controller_starts_idle_with_no_project() {
        let controller = PipelineController::new();
        assert_eq!(controller.stage(), PipelineStage::Idle);
        assert!(!controller.is_generating());
        assert!(controller.project().is_none());
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn blank_topic_is_rejected_before_credential_check() {
        let mut controller = PipelineController::new();
        let err = controller
            .start_script_generation("   ", options(Some("key")))
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::EmptyTopic));
        assert_eq!(controller.stage(), PipelineStage::Idle);
        assert!(controller.last_error().unwrap().starts_with("Script generation failed"));
    }

    #[tokio::test]
    async fn scene_generation_without_script_is_a_precondition_error() {
        let mut controller = PipelineController::new();
        let err = controller.start_scene_generation().await.unwrap_err();
        assert!(matches!(err, StudioError::MissingPrerequisite(_)));
        assert_eq!(controller.stage(), PipelineStage::Idle);
    }

    #[test]
    fn edit_script_without_project_is_a_noop() {
        let mut controller = PipelineController::new();
        controller.edit_script("anything");
        assert!(controller.project().is_none());
    }

    #[test]
    fn explicit_key_wins_over_environment() {
        let opts = options(Some("explicit"));
        assert_eq!(resolve_api_key(&opts).as_deref(), Some("explicit"));
    }

    #[test]
    fn blank_explicit_key_counts_as_absent() {
        let opts = options(Some("   "));
        // No env fallback set in the test environment.
        if std::env::var(API_KEY_ENV).is_err() {
            assert_eq!(resolve_api_key(&opts), None);
        }
    }
}
