//! CLI entrypoint for the Mog Agent
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use mog_application::{
    AgentController, AttachmentSource, ClientAdapter, ExchangeProgress, SubmitOutcome,
};
use mog_domain::Mode;
use mog_infrastructure::{
    ConfigLoader, FileConfig, FsAttachmentSource, GeminiClientAdapter, JsonlConversationLogger,
    Severity, resolve_api_key,
};
use mog_presentation::{
    ChatRepl, Cli, OutputConfig, ProgressReporter, ReplConfig, ReplyPrinter, SimpleProgress,
};
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered file logs are flushed
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    info!("Starting Mog Agent");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };
    report_config_issues(&config);

    let output = OutputConfig {
        color: config.output.color,
        image_dir: config.output.image_dir.clone(),
    };
    output.apply();

    let mut params = config.agent.to_exchange_params();
    if let Some(mode) = cli.mode {
        params = params.with_initial_mode(Mode::from(mode));
    }

    // === Dependency Injection ===
    let mut controller = AgentController::new(build_adapter(&config), params);

    if let Some(path) = &config.logging.conversation_log
        && let Some(logger) = JsonlConversationLogger::new(path)
    {
        info!(path = %logger.path().display(), "Conversation transcript enabled");
        controller = controller.with_conversation_logger(Arc::new(logger));
    }

    if !cli.quiet {
        let progress: Arc<dyn ExchangeProgress> = if std::io::stderr().is_terminal() {
            Arc::new(ProgressReporter::new())
        } else {
            Arc::new(SimpleProgress)
        };
        controller = controller.with_progress(progress);
    }

    let controller = Arc::new(controller);
    let attachments: Arc<dyn AttachmentSource> = Arc::new(FsAttachmentSource);
    let printer = ReplyPrinter::new(&output);

    if !cli.attach.is_empty() {
        let image = attachments.load(&cli.attach).await?;
        controller.attach_image(image)?;
        // Attaching switches to image generation; an explicit --mode still wins
        if let Some(mode) = cli.mode {
            controller.set_mode(Mode::from(mode));
        }
    }

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(controller, attachments, printer).with_config(ReplConfig::default());
        repl.run().await?;
        return Ok(());
    }

    // Single prompt mode
    let prompt = cli.prompt.unwrap_or_default();
    if prompt.trim().is_empty() && cli.attach.is_empty() {
        bail!("Prompt is required. Use --chat for interactive mode.");
    }

    let before = controller.snapshot().messages.len();
    match controller.submit(&prompt).await {
        SubmitOutcome::Rejected(rejection) => return Err(rejection.into()),
        SubmitOutcome::Failed { reason } => warn!(%reason, "Exchange failed"),
        SubmitOutcome::Completed { appended } => info!(appended, "Exchange completed"),
    }

    let messages = controller.snapshot().messages;
    printer.print(&messages[before..]);

    Ok(())
}

/// Initialize logging based on verbosity level, to stderr or a file.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let Some(path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("--log-file must name a file: {}", path.display()))?;

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

fn report_config_issues(config: &FileConfig) {
    for issue in config.validate() {
        match issue.severity {
            Severity::Error => warn!(code = ?issue.code, "Config error: {}", issue.message),
            Severity::Warning => warn!(code = ?issue.code, "Config warning: {}", issue.message),
        }
    }
}

/// The Gemini adapter, or `None` when no API key can be found.
fn build_adapter(config: &FileConfig) -> Option<Arc<dyn ClientAdapter>> {
    let Some(key) = resolve_api_key(&config.provider) else {
        warn!(
            env = %config.provider.api_key_env,
            "No API key found; every message will receive the fallback reply"
        );
        return None;
    };

    info!(
        source = %key.source(),
        chat_model = config.chat_model(),
        image_model = config.image_model(),
        "Gemini adapter configured"
    );
    let adapter = GeminiClientAdapter::new(key.expose())
        .with_base_url(config.base_url())
        .with_chat_model(config.chat_model())
        .with_image_model(config.image_model());
    Some(Arc::new(adapter))
}
