//! CLI entrypoint for compass
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use compass_application::{
    AssessmentController, AutoConfirm, ChatController, ChatOutcome, ChatRenderer,
    ConfirmationPort, NoTranscript, TranscriptLogger, Transport,
};
use compass_domain::ConfigIssue;
use compass_infrastructure::{
    ConfigLoader, FileConfig, FileServerConfig, HttpSettings, HttpTransport,
    JsonlTranscriptLogger, RandomResponseTime,
};
use compass_presentation::{
    AssessmentRunner, ChatRepl, Cli, Command, HtmlTranscript, InteractiveConfirmation,
    OutputConfig, ReplConfig, RunOutcome, TeeChatRenderer, TerminalAssessmentRenderer,
    TerminalChatRenderer,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    // CLI flags override every config source
    if let Some(base_url) = &cli.base_url {
        config.server.base_url = base_url.clone();
    }
    if cli.no_color {
        config.output.color = false;
    }

    let log_dir = cli
        .log_file
        .clone()
        .or_else(|| config.logging.dir.as_ref().map(PathBuf::from));
    let _log_guard = init_logging(cli.verbose, log_dir.as_deref())?;

    info!("Starting compass against {}", config.server.base_url);

    check_config(&config)?;

    OutputConfig {
        color: config.output.color,
    }
    .apply();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    // === Dependency Injection ===
    let transport: Arc<dyn Transport> = Arc::new(
        HttpTransport::new(http_settings(&config.server))
            .context("Failed to create HTTP client")?,
    );
    let transcript = transcript_logger(&config)?;

    match command {
        Command::Chat { html_transcript } => {
            run_chat(&config, transport, transcript, html_transcript).await
        }
        Command::Ask { message } => run_ask(&config, transport, transcript, &message).await,
        Command::Assess { yes } => run_assess(&config, transport, transcript, yes).await,
    }
}

/// Install the tracing subscriber.
///
/// `-v` count picks the level unless `RUST_LOG` is set. With a log
/// directory, output goes to a daily-rotated file instead of stderr so it
/// does not interleave with the interactive UI.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let Some(dir) = log_dir else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(dir, "compass.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Stop on configuration errors after reporting every issue
fn check_config(config: &FileConfig) -> Result<()> {
    let errors = report_config_issues(&config.validate(), &mut std::io::stderr());
    if errors > 0 {
        bail!("{} configuration error(s); see above", errors);
    }
    Ok(())
}

/// Write each issue once to `out` and return the error count.
///
/// Issues go to the terminal rather than through `tracing`, which may be
/// writing to a log file.
fn report_config_issues(issues: &[ConfigIssue], out: &mut impl Write) -> usize {
    for issue in issues {
        let _ = writeln!(out, "{}", issue);
    }
    issues.iter().filter(|issue| issue.is_error()).count()
}

fn http_settings(server: &FileServerConfig) -> HttpSettings {
    let mut settings = HttpSettings::new(server.base_url.trim()).with_csrf_page(&server.csrf_page);
    if let Some(timeout) = server.request_timeout() {
        settings = settings.with_timeout(timeout);
    }
    if let Some(user_agent) = &server.user_agent {
        settings = settings.with_user_agent(user_agent);
    }
    for (name, value) in &server.cookies {
        settings = settings.with_cookie(name, value);
    }
    settings
}

fn transcript_logger(config: &FileConfig) -> Result<Arc<dyn TranscriptLogger>> {
    let Some(path) = config.logging.transcript.as_ref() else {
        return Ok(Arc::new(NoTranscript));
    };
    let logger = JsonlTranscriptLogger::open(path)
        .with_context(|| format!("Failed to open transcript {}", path))?;
    info!("Writing transcript to {}", logger.path().display());
    Ok(Arc::new(logger))
}

fn chat_controller(
    config: &FileConfig,
    transport: Arc<dyn Transport>,
    renderer: Arc<dyn ChatRenderer>,
    transcript: Arc<dyn TranscriptLogger>,
) -> ChatController {
    ChatController::new(transport, renderer, config.endpoints.chat.clone())
        .with_quick_questions(config.chat.quick_questions.clone())
        .with_transcript(transcript)
}

async fn run_chat(
    config: &FileConfig,
    transport: Arc<dyn Transport>,
    transcript: Arc<dyn TranscriptLogger>,
    html_transcript: Option<PathBuf>,
) -> Result<()> {
    let terminal: Arc<dyn ChatRenderer> = Arc::new(TerminalChatRenderer::new().without_user_echo());
    let renderer: Arc<dyn ChatRenderer> = match html_transcript {
        Some(path) => {
            info!("Writing HTML transcript to {}", path.display());
            Arc::new(TeeChatRenderer::new(vec![
                terminal,
                Arc::new(HtmlTranscript::to_file(path)),
            ]))
        }
        None => terminal,
    };

    let repl_config = ReplConfig {
        history_file: config.repl.history_file.clone(),
    };
    let mut repl = ChatRepl::new(chat_controller(config, transport, renderer, transcript))
        .with_history_file(repl_config.history_path());
    repl.run().await.context("Chat input failed")?;
    Ok(())
}

async fn run_ask(
    config: &FileConfig,
    transport: Arc<dyn Transport>,
    transcript: Arc<dyn TranscriptLogger>,
    message: &str,
) -> Result<()> {
    let renderer = Arc::new(TerminalChatRenderer::new().without_user_echo());
    let mut controller = chat_controller(config, transport, renderer, transcript);

    match controller.submit(message).await {
        ChatOutcome::Replied(_) => Ok(()),
        ChatOutcome::Ignored => bail!("Message is empty"),
        ChatOutcome::Fallback => bail!("The coach could not answer; run with -v for details"),
    }
}

async fn run_assess(
    config: &FileConfig,
    transport: Arc<dyn Transport>,
    transcript: Arc<dyn TranscriptLogger>,
    auto_confirm: bool,
) -> Result<()> {
    let confirmation: Arc<dyn ConfirmationPort> = if auto_confirm {
        Arc::new(AutoConfirm)
    } else {
        Arc::new(InteractiveConfirmation::new())
    };

    let controller = AssessmentController::new(
        transport,
        Arc::new(TerminalAssessmentRenderer::new()),
        confirmation,
        Arc::new(RandomResponseTime::new()),
    )
    .with_endpoints(config.endpoints.clone())
    .with_params(config.assessment.to_params())
    .with_transcript(transcript);

    let mut runner = AssessmentRunner::new(controller);
    match runner.run().await? {
        RunOutcome::Completed(_) => info!("Assessment completed"),
        RunOutcome::Quit => {
            let pending = runner.controller().pending_saves();
            if pending > 0 {
                warn!("Leaving with {} unsaved answer(s)", pending);
                eprintln!("{} answer(s) could not be saved before quitting.", pending);
            }
            println!("Assessment not finished.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use compass_domain::ConfigIssueCode;

    #[test]
    fn test_config_issues_reported_once() {
        let issues = vec![
            ConfigIssue::warning(
                ConfigIssueCode::EmptyValue {
                    field: "chat.quick_questions".to_string(),
                },
                "no quick questions configured",
            ),
            ConfigIssue::error(
                ConfigIssueCode::InvalidBaseUrl {
                    value: "localhost".to_string(),
                },
                "server.base_url must start with http:// or https://",
            ),
        ];

        let mut out = Vec::new();
        let errors = report_config_issues(&issues, &mut out);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(errors, 1);
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.matches("no quick questions configured").count(), 1);
        assert!(text.starts_with("warning: "));
    }
}
