use super::tts_repository::{split_into_requests, TtsRepository};
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// Polly rejects synthesize_speech requests longer than 3000 characters
const MAX_REQUEST_CHARS: usize = 3000;

/// AWS Polly implementation of TTS repository
pub struct PollyTtsRepository {
    polly_client: Arc<PollyClient>,
}

impl PollyTtsRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Select the appropriate Polly voice for a language
    fn get_voice_for_language(language: &LanguageCode) -> Option<&'static str> {
        if language.as_str().eq_ignore_ascii_case("pt-BR") {
            return Some("Camila");
        }

        let voice = match language.primary().as_str() {
            "en" => "Joanna",
            "es" => "Lupe",
            "fr" => "Lea",
            "de" => "Vicki",
            "it" => "Bianca",
            "pt" => "Ines",
            "ja" => "Takumi",
            "ko" => "Seoyeon",
            "zh" => "Zhiyu",
            "ar" => "Hala",
            _ => return None,
        };
        Some(voice)
    }

    /// Check if a voice supports neural engine
    fn is_voice_neural_compatible(voice: &str) -> bool {
        // Based on AWS Polly documentation
        const NEURAL_VOICES: &[&str] = &[
            // English
            "Joanna", "Matthew", "Ivy", "Kendra", "Kimberly", "Salli", "Joey", "Justin", "Kevin",
            // Spanish
            "Lupe", "Pedro", "Sergio", // French
            "Lea", "Remi", // German
            "Vicki", "Daniel", // Italian
            "Bianca", "Adriano", // Portuguese
            "Ines", "Camila", "Vitoria", "Thiago", // Japanese
            "Takumi", "Kazuha", "Tomoko",  // Korean
            "Seoyeon", // Mandarin Chinese
            "Zhiyu",   // Arabic
            "Hala", "Zayd",
        ];

        NEURAL_VOICES.contains(&voice)
    }

    /// Call Polly for a single request-sized piece
    async fn call_polly(
        &self,
        text: &str,
        language: &LanguageCode,
        voice_name: &'static str,
    ) -> Result<Vec<u8>, String> {
        let voice_id = VoiceId::from(voice_name);
        let engine = if Self::is_voice_neural_compatible(voice_name) {
            Engine::Neural
        } else {
            Engine::Standard
        };

        tracing::debug!(
            language = %language,
            voice = voice_name,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    language = %language,
                    voice = voice_name,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        let audio_bytes = audio_stream.into_bytes().to_vec();
        tracing::debug!(
            audio_size = audio_bytes.len(),
            "Audio stream collected successfully"
        );

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for PollyTtsRepository {
    fn provider_name(&self) -> &'static str {
        "polly"
    }

    async fn synthesize(&self, text: &str, language: &LanguageCode) -> Result<Vec<u8>, String> {
        let voice_name = Self::get_voice_for_language(language)
            .ok_or_else(|| format!("AWS Polly has no voice for language '{}'", language))?;
        let requests = split_into_requests(text, MAX_REQUEST_CHARS);

        let mut merged_audio = Vec::new();
        for piece in &requests {
            let audio_data = self.call_polly(piece, language, voice_name).await?;
            merged_audio.extend(audio_data);
        }

        tracing::debug!(
            provider = "polly",
            request_count = requests.len(),
            audio_size_bytes = merged_audio.len(),
            "Fragment synthesized"
        );

        Ok(merged_audio)
    }
}
