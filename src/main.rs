use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::watch;

use procurement_analyzer::analysis::{
    AnalysisOrchestrator, AnalysisResult, AnalysisState, OperationState,
};
use procurement_analyzer::client::HttpAnalysisClient;
use procurement_analyzer::config::Config;
use procurement_analyzer::logging;
use procurement_analyzer::notify::TracingNotifier;
use procurement_analyzer::shutdown::ShutdownHandle;
use procurement_analyzer::ui;

const PROGRESS_BAR_WIDTH: usize = 20;

#[derive(Parser, Debug)]
#[command(
    name = "procurement-analyzer",
    version,
    about = "Analisador de Licitações - Lei 14.133/2021"
)]
struct Cli {
    /// Path to the config file (default: ~/.config/procurement-analyzer/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the backend base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze a single question and print the answer
    Ask {
        /// The question, words are joined with spaces
        #[arg(required = true)]
        question: Vec<String>,

        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,

        /// Also print the model's thinking process
        #[arg(long)]
        thinking: bool,
    },
    /// Check the backend health endpoint
    Health,
    /// List the backend's example questions
    Examples,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        None => logging::init_file_tracing(),
        Some(_) => logging::init_stderr_tracing(),
    }

    let config = load_config(&cli)?;
    let client = HttpAnalysisClient::new(&config.backend)?;

    match cli.command {
        None => ui::run(config, client).await?,
        Some(Command::Ask {
            question,
            json,
            thinking,
        }) => ask(config, client, question.join(" "), json, thinking).await?,
        Some(Command::Health) => {
            let status = client
                .health()
                .await
                .with_context(|| format!("backend at {} is unreachable", client.base_url()))?;
            println!(
                "{} {}",
                status.status,
                status.timestamp.as_deref().unwrap_or_default()
            );
            if !status.is_healthy() {
                bail!("backend reported status '{}'", status.status);
            }
        }
        Some(Command::Examples) => {
            let examples = match client.examples().await {
                Ok(examples) => examples,
                Err(err) => {
                    tracing::warn!(error = %err, "Using built-in examples");
                    config.ui.examples.clone()
                }
            };
            for example in examples {
                println!("{}", example);
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
        config.validate()?;
    }
    Ok(config)
}

async fn ask(
    config: Config,
    client: HttpAnalysisClient,
    question: String,
    json: bool,
    thinking: bool,
) -> anyhow::Result<()> {
    let orchestrator = AnalysisOrchestrator::new(
        Arc::new(client),
        Arc::new(TracingNotifier),
        config.progress.schedule(),
    );
    let progress = tokio::spawn(render_progress(orchestrator.subscribe()));

    let shutdown = ShutdownHandle::new();
    shutdown.listen_for_signals();

    let outcome = tokio::select! {
        outcome = orchestrator.submit(&question) => outcome,
        _ = shutdown.wait() => {
            progress.abort();
            eprintln!();
            bail!("interrupted");
        }
    };
    progress.abort();
    eprintln!();

    match outcome? {
        OperationState::Succeeded(result) if json => {
            println!("{}", serde_json::to_string_pretty(result.as_ref())?);
        }
        OperationState::Succeeded(result) => print_result(&result, thinking)?,
        OperationState::Failed(reason) => bail!("analysis failed: {}", reason),
        other => bail!("analysis did not settle: {:?}", other),
    }
    Ok(())
}

async fn render_progress(mut rx: watch::Receiver<AnalysisState>) {
    while rx.changed().await.is_ok() {
        let state = rx.borrow_and_update().clone();
        if !state.shows_progress() {
            continue;
        }
        let filled = usize::from(state.progress.percent) * PROGRESS_BAR_WIDTH / 100;
        eprint!(
            "\r[{}{}] {:>3}% {:<60}",
            "#".repeat(filled),
            " ".repeat(PROGRESS_BAR_WIDTH - filled),
            state.progress.percent,
            state.progress.step_label
        );
    }
}

fn print_result(result: &AnalysisResult, thinking: bool) -> std::io::Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "Pergunta: {}", result.question)?;
    writeln!(out, "Gerado em: {}", result.display_timestamp())?;
    writeln!(out)?;
    writeln!(out, "{}", result.analysis)?;
    if let Some(references) = &result.references {
        writeln!(out)?;
        writeln!(out, "Referências:")?;
        writeln!(out, "{}", references)?;
    }
    if thinking {
        if let Some(process) = &result.thinking_process {
            writeln!(out)?;
            writeln!(out, "Processo de raciocínio:")?;
            writeln!(out, "{}", process)?;
        }
    }
    Ok(())
}
