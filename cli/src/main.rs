//! CLI entrypoint for diag-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use diagchat_application::{
    ChatController, ConversationLogger, HandleUserQueryUseCase, NoConversationLogger, NoProgress,
    ProgressNotifier, PromptSource, SessionCatalogUseCase, StaticPrompt,
};
use diagchat_domain::{SessionId, SessionMetadata, SystemPrompt};
use diagchat_infrastructure::{
    ConfigLoader, FileConfig, FilePromptSource, JsonMetadataStore, JsonSessionStore,
    JsonlConversationLogger, OpenAiCompatGateway,
};
use diagchat_presentation::{ChatRepl, Cli, ConsoleFormatter, ProgressReporter};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log file prefix inside `[logging] dir`.
const LOG_FILE_PREFIX: &str = "diag-chat.log";

fn verbosity_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    }
}

/// Install the stderr subscriber plus an optional daily log file.
///
/// The returned guard must stay alive for the file writer to flush.
fn init_logging(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::new(verbosity_filter(verbose));
    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match &config.logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    };
    config.context("Failed to load configuration")
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    if !config.logging.conversation_log {
        return Arc::new(NoConversationLogger);
    }
    let Some(dir) = &config.logging.dir else {
        warn!("logging.conversation_log is set but logging.dir is not; transcript log disabled");
        return Arc::new(NoConversationLogger);
    };
    match JsonlConversationLogger::in_dir(dir) {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    }
}

fn parse_session(raw: Option<&str>) -> Result<Option<SessionId>> {
    raw.map(SessionId::new)
        .transpose()
        .context("Invalid --session value")
}

/// `--rename ID NAME`: the identifier is taken literally, never matched
/// against display names.
fn rename_session(
    catalog: &SessionCatalogUseCase,
    raw_id: &str,
    name: &str,
) -> Result<SessionMetadata> {
    let id = SessionId::new(raw_id).context("Invalid session id")?;
    Ok(catalog.rename_id(&id, name)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli)?;
    let _log_guard = init_logging(cli.verbose, &config);

    info!("Starting diag-chat");

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    for issue in config.validate() {
        warn!("Config: {}", issue);
    }

    if !config.repl.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let sessions = Arc::new(JsonSessionStore::new(&config.storage.sessions_dir));
    let metadata = Arc::new(JsonMetadataStore::new(&config.storage.metadata_dir));
    let prompt: Arc<dyn PromptSource> = if cli.no_prompt {
        Arc::new(StaticPrompt(SystemPrompt::new("")))
    } else {
        Arc::new(FilePromptSource::new(&config.prompt.system_prompt_path))
    };
    let gateway = Arc::new(OpenAiCompatGateway::from_config(&config.llm));
    if !gateway.is_configured() {
        warn!("LLM endpoint, key or model missing; replies will report the problem");
    }
    let logger = conversation_logger(&config);

    let query = HandleUserQueryUseCase::new(gateway, sessions.clone(), prompt)
        .with_params(config.llm.generation_params())
        .with_conversation_logger(logger.clone());
    let catalog =
        SessionCatalogUseCase::new(sessions, metadata).with_conversation_logger(logger);

    if cli.list {
        let listing = catalog.listing()?;
        print!("{}", ConsoleFormatter::listing(&listing, None));
        return Ok(());
    }

    if let Some((id, name)) = cli.rename_args() {
        rename_session(&catalog, id, name)?;
        println!("Chat renamed successfully!");
        return Ok(());
    }
    if cli.rename.is_some() {
        bail!("--rename needs an ID and a NAME");
    }

    let session = parse_session(cli.session.as_deref())?;

    // Chat mode
    if cli.is_interactive() {
        let controller = ChatController::new(query, catalog);
        let repl = ChatRepl::new(controller)
            .with_progress(!cli.quiet && config.repl.show_progress)
            .with_history_file(config.repl.history_file.as_ref().map(PathBuf::from));

        repl.run(session).await?;
        return Ok(());
    }

    // Single question mode
    let Some(question) = cli.question.as_deref() else {
        bail!("Question is required. Use --chat for interactive mode.");
    };
    let session = session.unwrap_or_else(SessionId::generate);

    let progress: Box<dyn ProgressNotifier> = if cli.quiet || !config.repl.show_progress {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let outcome = query
        .execute_with_progress(question, &session, progress.as_ref())
        .await?;

    println!("{}", outcome.reply);
    if !cli.quiet {
        eprintln!("{}", ConsoleFormatter::session_line(&session, session.as_str()));
    }

    Ok(())
}
