use super::error::TtsServiceError;
use lingua::{Language, LanguageDetectorBuilder};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Language used when nothing else is configured
pub const DEFAULT_LANGUAGE: &str = "de";

static LANGUAGE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{2,3}(-[A-Za-z0-9]{2,8})*$").expect("valid regex"));

/// Language tag passed to the synthesis provider (`de`, `en`, `pt-BR`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(tag: &str) -> Result<Self, TtsServiceError> {
        let tag = tag.trim();
        if !LANGUAGE_TAG.is_match(tag) {
            return Err(TtsServiceError::Validation(format!(
                "Invalid language code: '{}'",
                tag
            )));
        }
        Ok(Self(tag.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased primary subtag, e.g. `pt` for `pt-BR`
    pub fn primary(&self) -> String {
        self.0
            .split('-')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// Convert lingua Language to LanguageCode
    pub fn from_lingua(language: Language) -> Self {
        let tag = match language {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Portuguese => "pt",
        };
        Self(tag.to_string())
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = TtsServiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Language requested on the command line: a fixed tag or `auto`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageSelection {
    Auto,
    Fixed(LanguageCode),
}

impl LanguageSelection {
    /// Resolve to a concrete code, detecting from `text` when set to `auto`
    pub fn resolve(&self, text: &str, fallback: &LanguageCode) -> LanguageCode {
        match self {
            LanguageSelection::Fixed(code) => code.clone(),
            LanguageSelection::Auto => match detect_language(text) {
                Some(code) => {
                    tracing::info!(language_detected = %code, "Language detected");
                    code
                }
                None => {
                    tracing::warn!(
                        fallback = %fallback,
                        "Could not detect language, falling back to default"
                    );
                    fallback.clone()
                }
            },
        }
    }
}

impl FromStr for LanguageSelection {
    type Err = TtsServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("auto") {
            Ok(LanguageSelection::Auto)
        } else {
            LanguageCode::parse(s).map(LanguageSelection::Fixed)
        }
    }
}

/// Detect the language of the given text among the supported languages
pub fn detect_language(text: &str) -> Option<LanguageCode> {
    let languages = vec![
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
    ];

    let detector = LanguageDetectorBuilder::from_languages(&languages).build();

    detector
        .detect_language_of(text)
        .map(LanguageCode::from_lingua)
}
