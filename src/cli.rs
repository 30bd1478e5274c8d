use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tts-cli", version)]
#[command(about = "Convert text to an audio file. Reads `input.txt` when no text is given.")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub convert: ConvertArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert text to speech (the default)
    Convert(ConvertArgs),
    /// Check that ffmpeg and ffprobe are installed
    CheckDeps,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConvertArgs {
    /// Text to speak (falls back to stdin, then the input file, then a prompt)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Output file name (default: output.<format>)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Target audio format: mp3, wav or ogg
    #[arg(short, long)]
    pub format: Option<String>,

    /// Language code for synthesis (e.g. 'de' or 'en'), or 'auto'
    #[arg(short, long)]
    pub lang: Option<String>,

    /// File read when neither --text nor stdin provide text
    #[arg(long, default_value = "input.txt")]
    pub input_file: PathBuf,

    /// Fail instead of writing a partial file when ffmpeg is missing
    #[arg(long)]
    pub strict: bool,

    /// Print the conversion result as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Arguments of the conversion, whether given via `convert` or directly
    pub fn convert_args(&self) -> Option<&ConvertArgs> {
        match &self.command {
            None => Some(&self.convert),
            Some(Command::Convert(args)) => Some(args),
            Some(Command::CheckDeps) => None,
        }
    }
}
