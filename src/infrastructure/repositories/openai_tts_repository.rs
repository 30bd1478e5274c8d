use super::tts_repository::{split_into_requests, TtsRepository};
use crate::domain::tts::LanguageCode;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, SpeechResponseFormat, Voice},
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// The speech endpoint accepts at most 4096 characters of input
const MAX_REQUEST_CHARS: usize = 4096;

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    default_voice: String,
}

impl OpenAiTtsRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String, default_voice: String) -> Self {
        Self {
            client,
            model,
            default_voice,
        }
    }

    /// Select the appropriate OpenAI voice for a language
    /// Based on voice characteristics that suit each language
    fn get_voice_for_language(language: &LanguageCode) -> &'static str {
        match language.primary().as_str() {
            "es" => "echo",    // Warm, clear for Spanish
            "fr" => "nova",    // Soft, suitable for French
            "de" => "onyx",    // Clear, authoritative
            "it" => "fable",   // Expressive for Italian
            "pt" => "shimmer", // Clear articulation
            _ => "alloy",      // Neutral, used for English and everything else
        }
    }

    fn voice(&self, language: &LanguageCode) -> String {
        if self.default_voice.is_empty() {
            Self::get_voice_for_language(language).to_string()
        } else {
            self.default_voice.clone()
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }

    fn parse_voice(voice: &str) -> Voice {
        match voice.to_lowercase().as_str() {
            "alloy" => Voice::Alloy,
            "echo" => Voice::Echo,
            "fable" => Voice::Fable,
            "onyx" => Voice::Onyx,
            "nova" => Voice::Nova,
            "shimmer" => Voice::Shimmer,
            _ => Voice::Alloy, // Default fallback
        }
    }

    /// Call the speech endpoint for a single request-sized piece
    async fn call_openai(&self, text: &str, voice: &str) -> Result<Vec<u8>, String> {
        tracing::debug!(
            model = %self.model,
            voice = %voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice: Self::parse_voice(voice),
            response_format: Some(SpeechResponseFormat::Mp3),
            speed: None, // Defaults to 1.0
        };

        let response = self.client.audio().speech(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                voice = %voice,
                text_length = text.len(),
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS error: {}", e)
        })?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "OpenAI TTS audio received successfully"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    fn provider_name(&self) -> &'static str {
        "openai"
    }

    async fn synthesize(&self, text: &str, language: &LanguageCode) -> Result<Vec<u8>, String> {
        let voice = self.voice(language);
        let requests = split_into_requests(text, MAX_REQUEST_CHARS);

        let mut merged_audio = Vec::new();
        for piece in &requests {
            let audio_data = self.call_openai(piece, &voice).await?;
            merged_audio.extend(audio_data);
        }

        tracing::debug!(
            provider = "openai",
            language = %language,
            request_count = requests.len(),
            audio_size_bytes = merged_audio.len(),
            "Fragment synthesized"
        );

        Ok(merged_audio)
    }
}
