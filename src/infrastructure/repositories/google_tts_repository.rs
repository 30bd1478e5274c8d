use super::tts_repository::{split_into_requests, TtsRepository};
use crate::domain::tts::LanguageCode;
use async_trait::async_trait;
use std::time::Duration;

/// The translate_tts endpoint rejects requests longer than 200 characters
const MAX_REQUEST_CHARS: usize = 200;

pub const DEFAULT_GOOGLE_TTS_URL: &str = "https://translate.google.com/translate_tts";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTtsRepository {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Call the Google endpoint for a single request-sized piece
    async fn call_google(
        &self,
        text: &str,
        language: &LanguageCode,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, String> {
        tracing::debug!(
            language = %language,
            text_length = text.len(),
            request_index = index,
            "Calling Google TTS"
        );

        let text_len = text.chars().count().to_string();
        let idx = index.to_string();
        let total = total.to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("q", text),
                ("tl", language.as_str()),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", text_len.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = %language, "Google TTS request failed");
                format!("Google TTS request failed: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                language = %language,
                "Google TTS returned an error status"
            );
            return Err(format!(
                "Google TTS returned status {} (language '{}')",
                status.as_u16(),
                language
            ));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Google TTS response: {}", e))?
            .to_vec();

        if audio_bytes.is_empty() {
            return Err("Google TTS returned an empty response".to_string());
        }

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    fn provider_name(&self) -> &'static str {
        "google"
    }

    async fn synthesize(&self, text: &str, language: &LanguageCode) -> Result<Vec<u8>, String> {
        let requests = split_into_requests(text, MAX_REQUEST_CHARS);

        // MP3 frames are self-delimiting, so the pieces can be appended as-is
        let mut merged_audio = Vec::new();
        for (index, piece) in requests.iter().enumerate() {
            let audio_data = self
                .call_google(piece, language, index, requests.len())
                .await?;
            merged_audio.extend(audio_data);
        }

        tracing::debug!(
            provider = "google",
            request_count = requests.len(),
            audio_size_bytes = merged_audio.len(),
            "Fragment synthesized"
        );

        Ok(merged_audio)
    }
}
