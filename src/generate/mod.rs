mod scenes;
mod script;

pub use scenes::{build_scene_instruction, generate_scenes};
pub use script::{build_script_instruction, generate_script};
