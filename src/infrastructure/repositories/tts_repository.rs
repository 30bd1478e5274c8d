use crate::domain::tts::LanguageCode;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (Google Translate, AWS Polly, OpenAI)
///
/// Splitting long input into sentence fragments is done by the caller.
/// Implementations only split further when a fragment exceeds the provider's
/// per-request limit, and merge the resulting MP3 data in order.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Short provider name for logs
    fn provider_name(&self) -> &'static str;

    /// Synthesize text to speech for a given language
    ///
    /// Returns audio data in MP3 format
    ///
    /// # Arguments
    /// * `text` - One fragment of the input text
    /// * `language` - The target language for synthesis
    ///
    /// # Errors
    /// Returns error if synthesis fails, the language is not supported or the
    /// provider is unavailable
    async fn synthesize(&self, text: &str, language: &LanguageCode) -> Result<Vec<u8>, String>;
}

/// Split a fragment into pieces of at most `max_chars` characters on word
/// boundaries. A single word longer than the limit is split by characters.
pub(crate) fn split_into_requests(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut requests = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                requests.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max_chars) {
                requests.push(piece.iter().collect());
            }
            continue;
        }

        if current_len > 0 && current_len + 1 + word_len > max_chars {
            requests.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        requests.push(current);
    }

    requests
}
