pub mod chunker;
pub mod combiner;
pub mod dto;
pub mod error;
pub mod format;
pub mod language;
pub mod service;

pub use combiner::{AudioCombiner, CombineOutcome};
pub use dto::{ConversionOutcome, ConversionRequest, PartialOutputWarning, SynthesisPath};
pub use error::TtsServiceError;
pub use format::AudioFormat;
pub use language::{detect_language, LanguageCode, LanguageSelection};
pub use service::{ConversionSettings, NoProgress, SynthesisProgress, TtsService, TtsServiceApi};
