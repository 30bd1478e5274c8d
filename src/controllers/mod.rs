pub mod dependencies;
pub mod input;
pub mod tts;
