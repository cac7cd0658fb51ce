use anyhow::{Context, Result};
use chrono::{FixedOffset, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use mood_analytics::{
    analyze_emotional_patterns, analyze_session_trends_at, analyze_theme_patterns,
    analyze_time_patterns_at, analyze_tool_usage_patterns, generate_full_report_at,
    training_report, FullReport, ReportRenderer,
};
use mood_core::config::{offset_from_minutes, AppConfig, ReportFormat};
use mood_core::{history, seed, SessionRecord};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mood-patterns",
    about = "Behavioral pattern analysis over wellness tool session histories",
    version,
    author
)]
struct Cli {
    /// Path to config file (default: ~/.config/mood-patterns/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full pattern report
    Report {
        /// Session history (.json array or .jsonl); defaults to the configured history file
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Output format (default from config)
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
        /// Offset from UTC in minutes for hour/weekday/date values
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<i32>,
    },

    /// Run a single analyzer and print its JSON output
    Analyze {
        #[arg(value_enum)]
        analyzer: Analyzer,
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(long, allow_hyphen_values = true)]
        utc_offset: Option<i32>,
    },

    /// Print the training-data analysis report for a file of annotations
    Training {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Write a seed persona's session history
    Seed {
        #[arg(short, long)]
        persona: String,
        /// Destination file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the HTTP server
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,
        /// Bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Markdown,
    Text,
}

impl From<FormatArg> for ReportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Json => ReportFormat::Json,
            FormatArg::Markdown => ReportFormat::Markdown,
            FormatArg::Text => ReportFormat::Text,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Analyzer {
    Time,
    Themes,
    Emotions,
    Tools,
    Trends,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize default configuration file
    Init,
    /// Print config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries report output.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "mood_patterns=info,warn".into()),
        )
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Commands::Report {
            input,
            format,
            utc_offset,
        } => {
            let records = load_input(input.as_deref(), &config)?;
            let offset = resolve_offset(utc_offset, &config)?;
            let format = format.map(ReportFormat::from).unwrap_or(config.report.format);
            let report = generate_full_report_at(&records, offset);
            println!("{}", render_report(&report, format, offset, &config)?);
        }
        Commands::Analyze {
            analyzer,
            input,
            utc_offset,
        } => {
            let records = load_input(input.as_deref(), &config)?;
            let offset = resolve_offset(utc_offset, &config)?;
            let pretty = config.report.pretty;
            let out = match analyzer {
                Analyzer::Time => to_json(&analyze_time_patterns_at(&records, offset), pretty)?,
                Analyzer::Themes => to_json(&analyze_theme_patterns(&records), pretty)?,
                Analyzer::Emotions => to_json(&analyze_emotional_patterns(&records), pretty)?,
                Analyzer::Tools => to_json(&analyze_tool_usage_patterns(&records), pretty)?,
                Analyzer::Trends => to_json(&analyze_session_trends_at(&records, offset), pretty)?,
            };
            println!("{}", out);
        }
        Commands::Training { input } => {
            let annotations = history::load_annotations(&input)
                .with_context(|| format!("Failed to read annotations from {}", input.display()))?;
            println!("{}", training_report(&annotations, Utc::now()));
        }
        Commands::Seed { persona, output } => {
            let persona = seed::persona(&persona)?;
            match output {
                Some(path) => {
                    history::save_records(&path, &persona.records)?;
                    tracing::info!(
                        "Wrote {} records for {} to {}",
                        persona.records.len(),
                        persona.name,
                        path.display()
                    );
                }
                None => println!("{}", to_json(&persona.records, config.report.pretty)?),
            }
        }
        Commands::Serve { host, port } => {
            if let Some(h) = host {
                config.server.host = h;
            }
            if let Some(p) = port {
                config.server.port = p;
            }
            mood_server::serve(config).await?;
        }
        Commands::Config { action } => {
            handle_config_command(action, &config, cli.config.as_deref())?;
        }
    }

    Ok(())
}

fn load_input(input: Option<&Path>, config: &AppConfig) -> Result<Vec<SessionRecord>> {
    let path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.history_path());
    let records = history::load_records(&path)
        .with_context(|| format!("Failed to read session history from {}", path.display()))?;
    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

fn resolve_offset(cli_minutes: Option<i32>, config: &AppConfig) -> Result<FixedOffset> {
    let offset = match cli_minutes {
        Some(minutes) => offset_from_minutes(minutes)?,
        None => config.analysis.utc_offset()?,
    };
    Ok(offset)
}

fn render_report(
    report: &FullReport,
    format: ReportFormat,
    offset: FixedOffset,
    config: &AppConfig,
) -> Result<String> {
    Ok(match format {
        ReportFormat::Json => to_json(report, config.report.pretty)?,
        ReportFormat::Markdown => ReportRenderer::markdown(report, offset),
        ReportFormat::Text => {
            ReportRenderer::text_summary(report, config.analysis.min_sessions_for_insights)
        }
    })
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

fn handle_config_command(
    action: Option<ConfigAction>,
    config: &AppConfig,
    explicit_path: Option<&Path>,
) -> Result<()> {
    let path = explicit_path
        .map(Path::to_path_buf)
        .unwrap_or_else(AppConfig::default_path);
    match action {
        Some(ConfigAction::Show) | None => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
        }
        Some(ConfigAction::Init) => {
            if path.exists() {
                println!("Config already exists at: {}", path.display());
            } else {
                config.save_to(&path)?;
                println!("Created default config at: {}", path.display());
            }
        }
        Some(ConfigAction::Path) => {
            println!("{}", path.display());
        }
    }
    Ok(())
}
