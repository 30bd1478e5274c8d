use crate::{
    cli::ConvertArgs,
    controllers::input::{read_text, InputSource},
    domain::tts::{
        AudioFormat, ConversionOutcome, ConversionRequest, LanguageSelection, SynthesisProgress,
        TtsServiceApi,
    },
    error::{AppError, AppResult},
    infrastructure::config::Config,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

pub struct TtsController {
    tts_service: Arc<dyn TtsServiceApi>,
    config: Arc<Config>,
}

impl TtsController {
    pub fn new(tts_service: Arc<dyn TtsServiceApi>, config: Arc<Config>) -> Self {
        Self {
            tts_service,
            config,
        }
    }

    /// Read the input text, run the conversion and report the result
    pub async fn convert(&self, args: &ConvertArgs) -> AppResult<ConversionOutcome> {
        let (text, source) = read_text(args.text.clone(), &args.input_file)?;
        if let InputSource::File(path) = &source {
            tracing::info!(path = %path.display(), "Reading text from input file");
        }

        let request = self.build_request(args, text)?;
        let progress = ProgressReporter::new(args.json);

        let outcome = self.tts_service.convert(request, &progress).await?;

        self.report(&outcome, args.json)?;
        Ok(outcome)
    }

    fn build_request(&self, args: &ConvertArgs, text: String) -> AppResult<ConversionRequest> {
        let format = match &args.format {
            Some(format) => format.parse::<AudioFormat>()?,
            None => self.config.default_format,
        };

        let selection = match &args.lang {
            Some(lang) => lang.parse::<LanguageSelection>()?,
            None => LanguageSelection::Fixed(self.config.default_language.clone()),
        };
        let language = selection.resolve(&text, &self.config.default_language);

        let output_path = args
            .output
            .clone()
            .unwrap_or_else(|| format.default_output_name().into());

        Ok(ConversionRequest {
            text,
            output_path,
            format,
            language,
        })
    }

    fn report(&self, outcome: &ConversionOutcome, json: bool) -> AppResult<()> {
        if let Some(warning) = &outcome.warning {
            eprintln!("Warning: {}", warning);
        }

        if json {
            let rendered = serde_json::to_string_pretty(outcome)
                .map_err(|e| AppError::Audio(format!("could not render result: {}", e)))?;
            println!("{}", rendered);
        } else {
            println!("Created: {}", outcome.output_path.display());
        }
        Ok(())
    }
}

/// Terminal progress bar over the synthesis calls
struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    fn new(hidden: bool) -> Self {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {msg}: [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        bar.set_message("Synthesizing");
        Self { bar }
    }
}

impl SynthesisProgress for ProgressReporter {
    fn started(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn fragment_done(&self, _index: usize, _total: usize) {
        self.bar.inc(1);
    }

    fn finished(&self) {
        self.bar.finish_and_clear();
    }
}
