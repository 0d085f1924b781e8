//! pdf-narrate - Narrate a page range of a PDF to audio using Chatterbox TTS

mod audio;
mod config;
mod error;
mod extract;
mod pipeline;
mod text;
mod tts;
mod voice;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::NarrateConfig;
use extract::PageRange;
use indicatif::{ProgressBar, ProgressStyle};
use pipeline::{NarrationRequest, Narrator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pdf-narrate")]
#[command(about = "Narrate a page range of a PDF to audio using Chatterbox TTS", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the PDF file
    pdf_file: Option<PathBuf>,

    /// Page range to narrate, e.g. "3-10" or "7"
    #[arg(short, long)]
    pages: Option<String>,

    /// Reference voice: a clip name from the voices directory or a file path
    #[arg(long)]
    voice: Option<String>,

    /// Output directory for the audio artifacts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Device to use (cuda, cpu); default auto-detects
    #[arg(long)]
    device: Option<String>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List selectable reference voices
    Voices,
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the default reference voice
    SetVoice {
        /// Clip name or path
        name: String,
    },
    /// Set the maximum chunk length in characters
    SetChunkSize {
        /// Value in characters
        value: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = NarrateConfig::load().context("Failed to load configuration")?;

    match &args.command {
        Some(Commands::Config { action }) => {
            return handle_config_command(action);
        }
        Some(Commands::Voices) => {
            let voices = voice::list_voices(&config.voices_dir);
            if voices.is_empty() {
                println!(
                    "No voices found. Add .wav clips to {}",
                    config.voices_dir.display()
                );
            } else {
                for name in voices {
                    println!("{name}");
                }
            }
            return Ok(());
        }
        None => {}
    }

    // CLI overrides on top of the config file
    if let Some(dir) = args.output_dir.clone() {
        config.output_dir = dir;
    }
    if let Some(device) = args.device.clone() {
        config.device = Some(device);
    }

    let pdf_path = args.pdf_file.clone().ok_or_else(|| {
        anyhow::anyhow!("PDF file path is required. Run 'pdf-narrate --help' for usage.")
    })?;

    if !pdf_path.exists() {
        anyhow::bail!("PDF file not found: {}", pdf_path.display());
    }

    let pages_arg = args
        .pages
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("Page range is required, e.g. --pages 3-10"))?;
    let pages = PageRange::parse(pages_arg)?;

    let voice_option = args
        .voice
        .clone()
        .or_else(|| config.default_voice.clone())
        .unwrap_or_else(|| "default.wav".to_string());

    let book_name = pdf_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "book".to_string());

    eprintln!("Extracting pages {pages} from {}", pdf_path.display());
    let extracted = extract::extract_pages(&pdf_path, &pages)?;
    if extracted.trim().is_empty() {
        anyhow::bail!("No text could be extracted from pages {pages}");
    }

    let engine =
        tts::create_engine(config.device.as_deref()).context("Failed to create TTS engine")?;
    let narrator = Narrator::new(engine, config);

    let request = NarrationRequest {
        book_name,
        pages,
        voice_option,
    };

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let output = narrator
        .narrate(&extracted, &request, |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        })
        .await
        .context("Audio generation failed")?;

    pb.finish_and_clear();

    if output.chunks_failed > 0 {
        eprintln!(
            "Warning: {}/{} chunks produced no audio and were skipped",
            output.chunks_failed, output.chunks_total
        );
    }

    let metadata = std::fs::metadata(&output.artifacts.wav)?;
    let size_mb = metadata.len() as f64 / (1024.0 * 1024.0);

    eprintln!(
        "Generated {} chunks in {:.1}s",
        output.chunks_total - output.chunks_failed,
        output.elapsed.as_secs_f64()
    );
    eprintln!("Lossless: {} ({:.1} MB)", output.artifacts.wav.display(), size_mb);
    match &output.artifacts.mp3 {
        Some(mp3) => eprintln!("Compressed: {}", mp3.display()),
        None => eprintln!("Compressed copy unavailable (encoding failed)"),
    }

    Ok(())
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = NarrateConfig::load()?;
            println!("Configuration file: {:?}", NarrateConfig::config_path()?);
            println!();
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::SetVoice { name } => {
            let mut config = NarrateConfig::load()?;
            config.default_voice = Some(name.clone());
            config.save()?;
            println!("Default voice set to: {name}");
        }
        ConfigAction::SetChunkSize { value } => {
            let mut config = NarrateConfig::load()?;
            config.max_chunk_len = *value;
            config.save()?;
            println!("Maximum chunk length set to: {value}");
        }
    }
    Ok(())
}
