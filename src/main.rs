use async_openai::{config::OpenAIConfig, Client as OpenAiClient};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tts_cli::cli::Cli;
use tts_cli::controllers::{dependencies, tts::TtsController};
use tts_cli::domain::tts::{AudioCombiner, ConversionSettings, TtsService};
use tts_cli::error::{AppError, AppResult};
use tts_cli::infrastructure::audio::{check_dependencies, AudioTranscoder};
use tts_cli::infrastructure::config::{Config, LogFormat, Provider};
use tts_cli::infrastructure::repositories::{
    GoogleTtsRepository, OpenAiTtsRepository, PollyTtsRepository, TtsRepository,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            e.report();
            return e.exit_code();
        }
    };

    // Initialize logging
    init_logging(&config);

    let Some(args) = cli.convert_args() else {
        return dependencies::check(&config);
    };

    let strict_output = config.strict_output || args.strict;
    let config = Arc::new(config);

    let controller = match build_controller(config, strict_output).await {
        Ok(controller) => controller,
        Err(e) => {
            e.report();
            return e.exit_code();
        }
    };

    match controller.convert(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            e.exit_code()
        }
    }
}

async fn build_controller(config: Arc<Config>, strict_output: bool) -> AppResult<TtsController> {
    // === DEPENDENCY INJECTION SETUP ===
    // 1. Synthesis provider
    let tts_repo = build_tts_repository(&config).await?;

    // 2. Decode/encode provider, optional
    let report = check_dependencies(config.ffmpeg_path.as_deref(), config.ffprobe_path.as_deref());
    let transcoder = report
        .transcoder()
        .map(|t| Arc::new(t) as Arc<dyn AudioTranscoder>);
    if transcoder.is_none() {
        tracing::warn!("ffmpeg/ffprobe not found, only MP3 output is available");
    }

    // 3. Service and controller
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        AudioCombiner::new(transcoder, strict_output),
        ConversionSettings {
            max_chunk_chars: config.max_chunk_chars,
            single_shot_threshold: config.single_shot_threshold,
        },
    ));

    Ok(TtsController::new(tts_service, config))
}

async fn build_tts_repository(config: &Config) -> AppResult<Arc<dyn TtsRepository>> {
    tracing::info!(provider = ?config.provider, "Initializing TTS provider");

    let repo: Arc<dyn TtsRepository> = match config.provider {
        Provider::Google => Arc::new(
            GoogleTtsRepository::new(
                config.google_tts_url.clone(),
                Duration::from_secs(config.request_timeout_secs),
            )
            .map_err(|e| AppError::Config(format!("HTTP client: {}", e)))?,
        ),
        Provider::Polly => {
            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            tracing::info!(region = ?aws_config.region(), "AWS configuration loaded");
            let polly_client = aws_sdk_polly::Client::new(&aws_config);
            Arc::new(PollyTtsRepository::new(Arc::new(polly_client)))
        }
        Provider::OpenAi => {
            if std::env::var("OPENAI_API_KEY").is_err() {
                return Err(AppError::Config(
                    "OPENAI_API_KEY must be set for the openai provider".to_string(),
                ));
            }
            let client = OpenAiClient::with_config(OpenAIConfig::new());
            Arc::new(OpenAiTtsRepository::new(
                Arc::new(client),
                config.openai_model.clone(),
                config.openai_voice.clone(),
            ))
        }
    };

    Ok(repo)
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tts_cli=warn".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
