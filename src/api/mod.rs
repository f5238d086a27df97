mod gemini;

pub use gemini::{strip_code_fence, GeminiClient};
