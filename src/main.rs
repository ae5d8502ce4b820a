// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use doc_translate::app_config::{self, Config, TranslationProvider};
use doc_translate::database::Repository;
use doc_translate::server::{self, AppState};
use doc_translate::{providers, AclAccessGate, ExtractorRegistry, TranslationOrchestrator};

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Baidu,
    Mock,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Baidu => TranslationProvider::Baidu,
            CliTranslationProvider::Mock => TranslationProvider::Mock,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP translation endpoint
    Serve {
        /// Address to listen on, overrides the config file
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Translate one document from the command line and print the JSON result
    Translate {
        /// User the request is made as
        #[arg(short, long)]
        user: String,

        /// Document id
        #[arg(short, long)]
        document: String,

        /// Target language code (e.g., 'en', 'fr', 'zh')
        #[arg(short, long)]
        target_language: String,

        /// What to translate: 'description' or 'file'
        #[arg(short, long, default_value = "description")]
        content: String,
    },

    /// Send a one-word request to check the provider credentials
    CheckProvider,

    /// Generate shell completions for doc-translate
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// doc-translate - translate stored documents on demand
#[derive(Parser, Debug)]
#[command(name = "doc-translate")]
#[command(version)]
#[command(about = "On-demand translation of stored documents")]
#[command(long_about = "Translates the description or main file (PDF, DOCX) of a stored document \
through the Baidu Translate API, after checking the caller's read access.

EXAMPLES:
    doc-translate serve                                  # Run the HTTP endpoint
    doc-translate translate -u alice -d doc1 -t fr       # Translate a description
    doc-translate translate -u alice -d doc1 -t zh -c file
    doc-translate check-provider                         # Verify Baidu credentials
    doc-translate completions bash > doc-translate.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one is created. Baidu credentials may also come from the
    BAIDU_TRANSLATE_APP_ID and BAIDU_TRANSLATE_SECRET_KEY environment variables.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true, default_value = "conf.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Translation provider to use
    #[arg(short, long, global = true, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Baidu app id
    #[arg(long, global = true, env = "BAIDU_TRANSLATE_APP_ID")]
    baidu_app_id: Option<String>,

    /// Baidu secret key
    #[arg(long, global = true, env = "BAIDU_TRANSLATE_SECRET_KEY", hide_env_values = true)]
    baidu_secret_key: Option<String>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and label for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything here; the effective level is set once the config is loaded
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "doc-translate", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Serve { bind } => {
            let bind_address = bind.unwrap_or_else(|| config.server.bind_address.clone());
            let repository = open_repository(&config)?;
            let orchestrator = build_orchestrator(&config, repository.clone())?;
            let state = AppState::new(orchestrator, Arc::new(repository));
            server::serve(&bind_address, state).await
        }
        Commands::Translate {
            user,
            document,
            target_language,
            content,
        } => {
            let repository = open_repository(&config)?;
            let requester = repository.get_requester(&user).await?;
            let orchestrator = build_orchestrator(&config, repository)?;

            let result = orchestrator
                .translate(&requester, &document, &target_language, &content)
                .await?;

            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        Commands::CheckProvider => {
            let provider = providers::create_provider(&config.translation)?;
            provider.test_connection().await?;
            info!("Provider {} is reachable and accepted the credentials", provider.name());
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load the config file, apply command line overrides and validate
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(provider) = &cli.provider {
        config.translation.provider = provider.clone().into();
    }
    if let Some(app_id) = &cli.baidu_app_id {
        config.translation.baidu.app_id = app_id.clone();
    }
    if let Some(secret_key) = &cli.baidu_secret_key {
        config.translation.baidu.secret_key = secret_key.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone().into();
    }

    config.validate().context("Configuration validation failed")?;

    log::set_max_level(config.log_level.to_level_filter());
    Ok(config)
}

fn open_repository(config: &Config) -> Result<Repository> {
    match &config.database.path {
        Some(path) => Ok(Repository::new(doc_translate::database::DatabaseConnection::new(path)?)),
        None => Repository::new_default(),
    }
}

fn build_orchestrator(config: &Config, repository: Repository) -> Result<TranslationOrchestrator> {
    let provider = providers::create_provider(&config.translation)?;
    Ok(TranslationOrchestrator::new(
        Arc::new(repository),
        Arc::new(AclAccessGate),
        ExtractorRegistry::with_defaults(),
        provider,
    ))
}
