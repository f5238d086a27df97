pub mod api;
pub mod error;
pub mod export;
pub mod generate;
pub mod pipeline;
pub mod storyboard;
pub mod styles;
