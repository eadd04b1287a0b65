use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use kiritori_config::Config;
use kiritori_core::{Corrector, Error, OcrEngine};
use kiritori_ocr::TesseractRecognizer;
use kiritori_types::OcrOutput;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

pub mod cli;

use self::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let recognizer = TesseractRecognizer::new(&config.tesseract);
    match recognizer.version() {
        Ok(version) => tracing::info!(%version, "recognition engine ready"),
        Err(e) => tracing::warn!(error = %e, "recognition engine probe failed"),
    }
    tracing::info!(
        lang_primary = %config.engine.lang_primary.tag,
        lang_secondary = %config.engine.lang_secondary.tag,
        floor_strict = config.engine.confidence_floor_strict,
        floor_relaxed = config.engine.confidence_floor_relaxed,
        early_accept = config.engine.early_accept_confidence,
        line_reocr = config.engine.line_reocr_enabled,
        "configuration"
    );

    let engine = Arc::new(OcrEngine::new(
        config.engine.clone(),
        Corrector::new(&config.corrections),
        Arc::new(recognizer),
    ));

    // All-or-nothing cancellation between cycles (Ctrl+C).
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            signal_token.cancel();
        }
    });

    let mut failures = 0usize;
    for path in &cli.images {
        if cancel.is_cancelled() {
            tracing::info!("aborted by user");
            break;
        }
        match run_one(engine.clone(), path, &cancel).await {
            Ok(Some(output)) => {
                println!("{}", output.text);
                tracing::info!(
                    file = %path.display(),
                    conf = output.mean_confidence,
                    mode = ?output.mode,
                    language = ?output.language,
                    len = output.len(),
                    "ocr done"
                );
            }
            Ok(None) => break,
            Err(e) => {
                failures += 1;
                tracing::error!(file = %path.display(), error = %e, "ocr failed");
            }
        }
    }

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Run one recognition cycle on the blocking pool; `None` means cancelled.
async fn run_one(
    engine: Arc<OcrEngine>,
    path: &Path,
    cancel: &CancellationToken,
) -> anyhow::Result<Option<OcrOutput>> {
    let image = image::open(path)
        .map_err(|e| {
            tracing::debug!(error = %e, "image load failed");
            Error::NoImage
        })
        .with_context(|| format!("loading {}", path.display()))?;

    let cycle = tokio::task::spawn_blocking(move || engine.run(&image));
    tokio::select! {
        _ = cancel.cancelled() => {
            tracing::info!("cycle abandoned");
            Ok(None)
        }
        result = cycle => {
            let output = result.context("ocr task panicked")??;
            Ok(Some(output))
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            let mut config: Config =
                serde_json::from_str(&raw).context("parsing config file")?;
            config.apply_env();
            config
        }
        None => Config::new(),
    };
    if let Some(lang) = &cli.lang {
        config.engine.lang_primary.tag = lang.clone();
    }
    if cli.line_reocr {
        config.engine.line_reocr_enabled = true;
    }
    Ok(config)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if atty::is(atty::Stream::Stderr) {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
