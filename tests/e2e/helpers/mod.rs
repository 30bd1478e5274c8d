use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tts_cli::domain::tts::{
    AudioCombiner, AudioFormat, ConversionRequest, ConversionSettings, LanguageCode, TtsService,
};
use tts_cli::infrastructure::audio::AudioTranscoder;


pub use fakes::{FakeTranscoder, FakeTtsRepository, UNDECODABLE};

/// Service wired with fakes plus a scratch directory for outputs
pub struct TestContext {
    pub repo: Arc<FakeTtsRepository>,
    pub transcoder: Option<Arc<FakeTranscoder>>,
    pub service: TtsService,
    pub dir: TempDir,
}

impl TestContext {
    /// `with_transcoder` decides whether the decode/encode provider is available
    pub fn new(with_transcoder: bool) -> Self {
        Self::build(FakeTtsRepository::new(), with_transcoder, false)
    }

    pub fn strict() -> Self {
        Self::build(FakeTtsRepository::new(), false, true)
    }

    pub fn with_repo(repo: FakeTtsRepository, with_transcoder: bool) -> Self {
        Self::build(repo, with_transcoder, false)
    }

    fn build(repo: FakeTtsRepository, with_transcoder: bool, strict_output: bool) -> Self {
        let repo = Arc::new(repo);
        let transcoder = with_transcoder.then(|| Arc::new(FakeTranscoder::new()));
        let combiner = AudioCombiner::new(
            transcoder
                .clone()
                .map(|t| t as Arc<dyn AudioTranscoder>),
            strict_output,
        );
        let service = TtsService::new(repo.clone(), combiner, ConversionSettings::default());

        Self {
            repo,
            transcoder,
            service,
            dir: tempfile::tempdir().expect("Failed to create scratch dir"),
        }
    }

    pub fn output_path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn request(&self, text: &str, format: AudioFormat) -> ConversionRequest {
        ConversionRequest {
            text: text.to_string(),
            output_path: self.output_path(&format.default_output_name()),
            format,
            language: LanguageCode::default(),
        }
    }

    /// Names of everything left in the scratch directory
    pub fn leftovers(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.dir.path())
            .expect("Failed to list scratch dir")
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// `count` sentences, each starting with a distinct marker and roughly `len` chars long
pub fn marked_sentences(count: usize, len: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let marker = format!("Marker{:02}", i);
            let filler_len = len.saturating_sub(marker.len() + 2);
            format!("{} {}.", marker, "x".repeat(filler_len))
        })
        .collect()
}
