use anyhow::Context;
use clap::Parser;
use tracing::{error, info, warn};
use zumbi_studio::pipeline::PipelineController;
use zumbi_studio::storyboard::{GenerationOptions, SceneDuration};
use zumbi_studio::styles::VISUAL_STYLES;
use zumbi_studio::{error::Result, export};

#[derive(Parser, Debug)]
#[command(name = "zumbi")]
#[command(about = "AI storyboard studio: topic -> script -> structured scene prompts", long_about = None)]
struct Args {
    /// Topic or story idea to turn into a storyboard
    #[arg(short, long)]
    topic: String,

    /// Visual style preset id (clay, felt, toon3d, papercraft)
    #[arg(short, long, default_value = "clay")]
    style: String,

    /// Target format: short (~60s, 10 scenes) or long (~3min, 25 scenes)
    #[arg(short, long, default_value = "short")]
    duration: SceneDuration,

    /// API key for the generative service
    #[arg(long)]
    api_key: Option<String>,

    /// Working directory for generated files
    #[arg(short = 'w', long, default_value = "./output")]
    work_dir: String,

    /// Replace the generated script with this file's contents before scene
    /// generation (the "edit the script first" step)
    #[arg(long)]
    edited_script: Option<String>,

    /// Stop after script/metadata generation
    #[arg(long)]
    skip_scenes: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    if !VISUAL_STYLES.iter().any(|s| s.id == args.style) {
        warn!(
            "Unknown style '{}', falling back to '{}'",
            args.style, VISUAL_STYLES[0].id
        );
    }

    let edited_script = match &args.edited_script {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .context(format!("Failed to read edited script: {}", path))?,
        ),
        None => None,
    };

    tokio::fs::create_dir_all(&args.work_dir)
        .await
        .context("Failed to create work directory")?;

    if let Err(e) = run_pipeline(args, edited_script).await {
        error!("Storyboard generation failed: {}", e);
        std::process::exit(1);
    }

    info!("Storyboard generation completed successfully!");
    Ok(())
}

async fn run_pipeline(args: Args, edited_script: Option<String>) -> Result<()> {
    let mut controller = PipelineController::new();
    let options = GenerationOptions {
        style_id: args.style.clone(),
        duration: args.duration,
        api_key: args.api_key.clone(),
    };

    // Stage 1: script and metadata
    info!("Step 1/2: Generating script and metadata...");
    let script = controller
        .start_script_generation(&args.topic, options)
        .await?;

    let script_path = format!("{}/script.txt", args.work_dir);
    tokio::fs::write(&script_path, &script.script_content).await?;
    let metadata_path = format!("{}/metadata.json", args.work_dir);
    tokio::fs::write(
        &metadata_path,
        serde_json::to_string_pretty(&script.marketing_metadata)?,
    )
    .await?;
    info!("Script written to {}, metadata to {}", script_path, metadata_path);
    info!("Title: {}", script.marketing_metadata.title);

    // User edit step: swap in the reviewed script before scene generation
    if let Some(new_text) = edited_script {
        info!("Applying edited script ({} characters)", new_text.len());
        controller.edit_script(&new_text);
    }

    if args.skip_scenes {
        info!("Step 2/2: Skipped scene generation");
    } else {
        info!("Step 2/2: Generating visual scenes...");
        let scenes = controller.start_scene_generation().await?;
        info!("Generated {} scenes", scenes.len());
    }

    if let Some(project) = controller.project() {
        let storyboard_path = format!("{}/storyboard.json", args.work_dir);
        export::write_storyboard(&storyboard_path, project).await?;
        export::write_scene_prompts(&args.work_dir, project).await?;
    }

    Ok(())
}
