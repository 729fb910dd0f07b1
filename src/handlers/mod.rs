//! Handler implementations

pub mod json;
pub mod level_prefix;
pub mod text;

pub use json::JsonHandler;
pub use level_prefix::LevelPrefixHandler;
pub use text::TextHandler;

pub use crate::core::Handler;
