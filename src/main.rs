use anyhow::Result;
use clap::Parser;
use recap::cli::{Cli, Commands, ModelsAction};
use recap::config::{Config, SummarizerBackend, TranscriptionConfig};
use recap::defaults;
use recap::models::catalog;
use recap::pipeline::AnalysisPipeline;
use recap::stt::{Transcriber, WhisperConfig, WhisperTranscriber};
use recap::summarize::{ChatSummarizer, ExtractiveSummarizer, Seq2SeqSummarizer, Summarizer};
use recap::version_string;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?.with_env_overrides();

    match cli.command {
        None => run_serve(config, None, cli.no_download).await?,
        Some(Commands::Serve { listen }) => run_serve(config, listen, cli.no_download).await?,
        Some(Commands::Analyze { file, pretty }) => {
            run_analyze(config, &file, pretty, cli.no_download).await?;
        }
        Some(Commands::Models { action }) => handle_models_command(action).await?,
        Some(Commands::Check) => run_check(&config),
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "recap=info,tower_http=warn",
        1 => "recap=debug,tower_http=info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(&Config::default_path()),
    }
}

async fn run_serve(config: Config, listen: Option<String>, no_download: bool) -> Result<()> {
    let pipeline = build_pipeline(&config, no_download).await?;
    let addr = listen.unwrap_or_else(|| config.server.listen_addr.clone());
    recap::server::run(&addr, Arc::new(pipeline), config.max_upload_bytes()).await?;
    Ok(())
}

async fn run_analyze(
    config: Config,
    file: &Path,
    pretty: bool,
    no_download: bool,
) -> Result<()> {
    let pipeline = build_pipeline(&config, no_download).await?;
    let result = pipeline.analyze_file(file).await?;

    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");

    Ok(())
}

async fn build_pipeline(config: &Config, no_download: bool) -> Result<AnalysisPipeline> {
    let transcriber = build_transcriber(&config.transcription, no_download).await?;
    let summarizer = build_summarizer(config)?;
    Ok(AnalysisPipeline::new(
        transcriber,
        summarizer,
        config.extraction.clone(),
    ))
}

async fn build_transcriber(
    config: &TranscriptionConfig,
    no_download: bool,
) -> Result<Arc<dyn Transcriber>> {
    let model_path = resolve_model_path(config, no_download).await?;

    let transcriber = WhisperTranscriber::new(WhisperConfig {
        model_path,
        language: config.language.clone(),
        threads: config.threads,
    })?;
    eprintln!("Loaded transcription model '{}'.", config.model);

    Ok(Arc::new(transcriber))
}

async fn resolve_model_path(config: &TranscriptionConfig, no_download: bool) -> Result<PathBuf> {
    let path = catalog::model_path(&config.model);
    if path.exists() {
        return Ok(path);
    }

    #[cfg(feature = "model-download")]
    if !no_download {
        eprintln!("Downloading model '{}'...", config.model);
        let path = recap::models::download::download_model(&config.model, true).await?;
        return Ok(path);
    }

    #[cfg(not(feature = "model-download"))]
    let _ = no_download;

    anyhow::bail!(
        "Model '{}' is not installed. Run `recap models install {}` first.",
        config.model,
        config.model
    )
}

fn build_summarizer(config: &Config) -> Result<Arc<dyn Summarizer>> {
    let summarization = &config.summarization;
    let summarizer: Arc<dyn Summarizer> = match summarization.backend {
        SummarizerBackend::Chat => {
            if summarization.chat.api_key.is_empty() {
                anyhow::bail!(
                    "The chat summarization backend needs an API key. \
                     Set RECAP_OPENAI_API_KEY or summarization.chat.api_key."
                );
            }
            Arc::new(ChatSummarizer::new(summarization.chat.clone()))
        }
        SummarizerBackend::Seq2seq => Arc::new(Seq2SeqSummarizer::load(&summarization.seq2seq)?),
        SummarizerBackend::Extractive => {
            Arc::new(ExtractiveSummarizer::new(&summarization.extractive))
        }
    };
    eprintln!("Using summarization backend '{}'.", summarizer.name());
    Ok(summarizer)
}

async fn handle_models_command(action: ModelsAction) -> Result<()> {
    match action {
        ModelsAction::List => {
            println!("Available models:");
            for model in catalog::list_models() {
                println!("  {}", catalog::format_model_info(model));
            }
        }
        ModelsAction::Install { name } => {
            #[cfg(feature = "model-download")]
            {
                let path = recap::models::download::download_model(&name, true).await?;
                println!("Model '{}' installed successfully", name);
                println!("Location: {}", path.display());
            }
            #[cfg(not(feature = "model-download"))]
            {
                let _ = name;
                anyhow::bail!(
                    "This build does not include model downloads. \
                     Rebuild with the `model-download` feature."
                );
            }
        }
    }
    Ok(())
}

fn run_check(config: &Config) {
    println!("recap {}", version_string());
    println!("Compute backend: {}", defaults::gpu_backend());
    println!(
        "Whisper transcription: {}",
        if cfg!(feature = "whisper") {
            "compiled in"
        } else {
            "not compiled (feature `whisper`)"
        }
    );
    println!(
        "Local seq2seq summarization: {}",
        if cfg!(feature = "seq2seq") {
            "compiled in"
        } else {
            "not compiled (feature `seq2seq`)"
        }
    );
    println!(
        "Model downloads: {}",
        if cfg!(feature = "model-download") {
            "compiled in"
        } else {
            "not compiled (feature `model-download`)"
        }
    );
    println!();

    let model = &config.transcription.model;
    println!(
        "Transcription model: {} ({})",
        model,
        if catalog::is_model_installed(model) {
            "installed"
        } else {
            "not installed"
        }
    );

    let backend = match config.summarization.backend {
        SummarizerBackend::Chat => "chat",
        SummarizerBackend::Seq2seq => "seq2seq",
        SummarizerBackend::Extractive => "extractive",
    };
    println!("Summarization backend: {backend}");
    if config.summarization.backend == SummarizerBackend::Chat {
        println!(
            "Chat API key: {}",
            if config.summarization.chat.api_key.is_empty() {
                "missing (set RECAP_OPENAI_API_KEY)"
            } else {
                "configured"
            }
        );
    }

    println!("Listen address: {}", config.server.listen_addr);
    println!("Config file: {}", Config::default_path().display());
}
