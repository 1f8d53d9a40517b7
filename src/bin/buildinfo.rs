use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use buildinfo::config::{AppConfig, OutputFormat};
use buildinfo::{BuildInfo, MalformedPolicy, RawBuildInfo, health};
use clap::{Args, Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Show the build metadata embedded in a binary
#[derive(Parser)]
#[command(name = "buildinfo", version, about, long_about = None)]
struct Cli {
    /// Configuration profile to load (config/{profile}.toml)
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print build information (default)
    Show(ShowArgs),

    /// Run health checks over the embedded metadata
    Check,
}

#[derive(Args, Default)]
struct ShowArgs {
    /// Output format, overriding the configured one
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Read a raw JSON dump (e.g. `go version -m -json`) instead of this binary's metadata
    #[arg(long, value_name = "FILE")]
    raw: Option<PathBuf>,

    /// Keep unparseable vcs.time / vcs.modified values in the settings
    #[arg(long)]
    preserve_malformed: bool,
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so rendered output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.profile.as_deref());

    match cli.command.unwrap_or(Command::Show(ShowArgs::default())) {
        Command::Show(args) => cmd_show(&config, args),
        Command::Check => Ok(cmd_check(&config)),
    }
}

fn load_config(profile: Option<&str>) -> AppConfig {
    let loaded = match profile {
        Some(profile) => AppConfig::load(profile),
        None => AppConfig::load_from_env(),
    };

    loaded.unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using default configuration");
        AppConfig::default()
    })
}

fn cmd_show(config: &AppConfig, args: ShowArgs) -> Result<ExitCode> {
    let policy = if args.preserve_malformed {
        MalformedPolicy::Preserve
    } else {
        config.parse.malformed
    };

    let info = match &args.raw {
        Some(path) => {
            let raw = RawBuildInfo::from_path(path)
                .with_context(|| format!("Failed to load raw build info from {}", path.display()))?;
            debug!(path = %path.display(), settings = raw.settings.len(), "Loaded raw build info");
            BuildInfo::from_raw_with(&raw, policy)
        }
        None => buildinfo::info_with(policy).ok_or(buildinfo::Error::NotEmbedded)?,
    };

    match args.format.unwrap_or(config.output.format) {
        OutputFormat::Text => print!("{}", info),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&info).context("Failed to serialize to JSON")?;
            println!("{}", json);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_check(config: &AppConfig) -> ExitCode {
    if !config.output.color {
        colored::control::set_override(false);
    }

    let report = health::run_all_checks();
    health::print_report(&report);

    ExitCode::from(report.exit_code())
}
