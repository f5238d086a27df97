use crate::api::{strip_code_fence, GeminiClient};
use crate::error::{Result, StudioError};
use crate::storyboard::{GenerationOptions, SceneDuration, ScriptResult};
use crate::styles::VisualStyle;
use serde_json::{json, Value};
use tracing::info;

const TEMPERATURE: f64 = 0.8;

/// Generates the narration script, project settings, marketing metadata and
/// voice-over guide for a topic. Stage 1 of the pipeline.
pub async fn generate_script(
    client: &GeminiClient,
    topic: &str,
    options: &GenerationOptions,
    style: &VisualStyle,
) -> Result<ScriptResult> {
    info!("Generating script and metadata for topic: {}", topic);

    let instruction = build_script_instruction(topic, options.duration, style);
    let schema = script_response_schema();

    let text = client
        .generate_content(
            &instruction,
            "ACTION! Generate the script and metadata JSON now.",
            Some(schema),
            TEMPERATURE,
        )
        .await?;

    let json_text = strip_code_fence(&text);
    let result: ScriptResult = serde_json::from_str(json_text)
        .map_err(|e| StudioError::MalformedResponse(format!("script JSON: {}", e)))?;

    if result.script_content.trim().is_empty() {
        return Err(StudioError::MalformedResponse(
            "empty script in response".to_string(),
        ));
    }

    info!(
        "Generated script: {} words, title '{}'",
        result.script_content.split_whitespace().count(),
        result.marketing_metadata.title
    );
    Ok(result)
}

pub fn build_script_instruction(
    topic: &str,
    duration: SceneDuration,
    style: &VisualStyle,
) -> String {
    let (min_words, max_words) = duration.word_range();
    let aspect_ratio = duration.aspect_ratio();
    let (format_label, pacing_guide) = match duration {
        SceneDuration::Short => (
            "Short Form (TikTok/Reels, ~60 seconds)",
            "FAST-PACED SPRINT. Hook the viewer in the first sentence, deliver the payoff \
             before attention drops. Structure: HOOK -> PROBLEM -> SOLUTION/FACT -> PUNCHLINE.",
        ),
        SceneDuration::Long => (
            "Long Form (YouTube, ~3 minutes)",
            "CINEMATIC JOURNEY. Let the story breathe. Build emotional connection before \
             delivering facts, then close with a resonant payoff.",
        ),
    };

    format!(
        r#"YOU ARE A WORLD-CLASS ANIMATION DIRECTOR (Pixar/Aardman Alumni).
Write a viral video narration script and its marketing package for: "{topic}"

=== CONFIGURATION ===
- MODE: {aspect_ratio}
- DURATION TYPE: {format_label}
- VISUAL STYLE: {style_label}
- SCRIPT LENGTH: between {min_words} and {max_words} words. Stay inside this window.
- PACING: {pacing_guide}

=== RULES ===
1. AUTO-TONE ANALYSIS: analyze the topic and pick the best narrative tone
   (Fun Educational, Dramatic Epic, Warm Bedtime, Suspenseful). Script and
   metadata must align with it.
2. SCRIPT IS PURE SPEECH: colloquial, natural spoken words only. Never include
   sound effects or stage directions in brackets like [waves crashing] or
   (laughs). SFX belongs in the later visual breakdown, not the script.
3. TITLE: high-CTR, SEO optimized. Example register: "REVEALED! The Dark
   Secret Behind the Great Crab Migration..."
4. VOICE OVER GUIDE: specific and actionable, not just a mood word. Example:
   "Start with a whisper to build mystery, shift to high-energy excitement at
   the midpoint, close on a warm storytelling timbre."
5. PROJECT SETTINGS: pick a short memorable project_name, set aspect_ratio to
   "{aspect_ratio}", resolution to "1080p", and global_aesthetic to a one-line
   summary of the visual style ("{style_keyword}").

Respond with a single JSON object containing exactly these fields:
project_settings (project_name, aspect_ratio, resolution, global_aesthetic),
script_content, marketing_metadata (title, description, hashtags), and
voice_over_guide."#,
        topic = topic,
        aspect_ratio = aspect_ratio,
        format_label = format_label,
        style_label = style.label,
        min_words = min_words,
        max_words = max_words,
        pacing_guide = pacing_guide,
        style_keyword = style.prompt_keyword,
    )
}

/// Formal output schema for stage 1, in the generation API's schema dialect.
fn script_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "project_settings": {
                "type": "OBJECT",
                "properties": {
                    "project_name": { "type": "STRING" },
                    "aspect_ratio": { "type": "STRING" },
                    "resolution": { "type": "STRING" },
                    "global_aesthetic": { "type": "STRING" }
                },
                "required": ["project_name", "aspect_ratio", "resolution", "global_aesthetic"]
            },
            "script_content": { "type": "STRING" },
            "marketing_metadata": {
                "type": "OBJECT",
                "properties": {
                    "title": { "type": "STRING" },
                    "description": { "type": "STRING" },
                    "hashtags": {
                        "type": "ARRAY",
                        "items": { "type": "STRING" }
                    }
                },
                "required": ["title", "description", "hashtags"]
            },
            "voice_over_guide": { "type": "STRING" }
        },
        "required": [
            "project_settings",
            "script_content",
            "marketing_metadata",
            "voice_over_guide"
        ]
    })
}
