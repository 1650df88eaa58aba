use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use eyre::{Result, bail};
use log::{debug, info};

mod cli;

use cli::{Cli, Command};
use ytnotes::config::{self, Config};
use ytnotes::pipeline::Pipeline;
use ytnotes::session::AccountStore;
use ytnotes::summarize::LlmClient;
use ytnotes::web::{self, AppState};
use ytnotes::youtube::YouTubeProvider;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytnotes.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytnotes")
        .join("logs")
}

/// Build the pipeline; the API key is read here, once per process
fn build_pipeline(config: &Config, model: &str, verbose: bool) -> Pipeline {
    let client = reqwest::Client::new();
    let llm = LlmClient::from_env(client.clone(), model);

    if verbose {
        let key_var = llm.backend().api_key_var();
        let key_state = if llm.has_api_key() { "set" } else { "NOT set" };
        eprintln!("Model: {model} ({}), {key_var} {key_state}", llm.backend().name());
    }

    let provider = YouTubeProvider::new(client, config.languages());
    Pipeline::new(Arc::new(provider), Arc::new(llm))
}

async fn run_notes(
    pipeline: &Pipeline,
    urls: &[String],
    word_bound: u32,
    with_transcript: bool,
    output: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut rendered = Vec::new();
    let mut failed = 0;

    for url in urls {
        let url = url.trim();
        if url.is_empty() {
            continue;
        }

        match pipeline.run(url, word_bound).await {
            Ok(outcome) => {
                if verbose {
                    eprintln!(
                        "Video: {}\nTranscript: {} chars\nSummary: {} chars",
                        outcome.video,
                        outcome.transcript.len(),
                        outcome.summary.len(),
                    );
                }
                rendered.push(ytnotes::output::render_notes(&outcome, with_transcript));
            }
            Err(e) => {
                eprintln!("{url}: {e}");
                failed += 1;
            }
        }
    }

    if !rendered.is_empty() {
        let text = rendered.join("\n");
        if let Some(path) = output {
            std::fs::write(path, &text)?;
            if verbose {
                eprintln!("Output written to: {}", path.display());
            }
        } else {
            print!("{text}");
        }
    }

    if failed > 0 {
        bail!("{failed} of {} video(s) failed", failed + rendered.len());
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging()?;

    let cli = Cli::parse();

    // Load config file (non-fatal if missing/invalid)
    let config = Config::load().unwrap_or_default();

    if cli.verbose {
        let config_path = config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!("Logs: {}", log_dir().join("ytnotes.log").display());
    }

    match cli.command {
        Command::Notes {
            url,
            words,
            model,
            transcript,
            output,
        } => {
            let model = model.as_deref().unwrap_or(config.model());
            let word_bound = words.unwrap_or(config.word_bound());
            debug!("Notes: model={model} word_bound={word_bound}");

            // Collect URLs: from arg or stdin
            let urls = if let Some(url) = url {
                vec![url]
            } else {
                io::stdin().lock().lines().collect::<Result<Vec<_>, _>>()?
            };

            if urls.iter().all(|u| u.trim().is_empty()) {
                bail!("no URL provided\n\nUsage: ytnotes notes <URL>\n       echo <URL> | ytnotes notes");
            }

            let pipeline = build_pipeline(&config, model, cli.verbose);
            run_notes(&pipeline, &urls, word_bound, transcript, output.as_deref(), cli.verbose).await
        }
        Command::Serve {
            bind,
            login,
            words,
            model,
        } => {
            let model = model.as_deref().unwrap_or(config.model());
            let word_bound = words.unwrap_or(config.word_bound());
            let addr = match bind {
                Some(addr) => addr,
                None => config.bind()?,
            };

            let pipeline = build_pipeline(&config, model, cli.verbose);
            let state = if login || config.require_login() {
                AppState::gated(pipeline, word_bound, AccountStore::new())
            } else {
                AppState::new(pipeline, word_bound)
            };

            eprintln!("Listening on http://{addr}");
            web::serve(addr, state).await
        }
    }
}
