use chrono::Utc;
use clap::{Parser, Subcommand};
use libregclean::logging::default_logger;
use libregclean::{Cleaner, Client};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod config;
mod context;
mod format;
mod version;

use context::{AppContext, VerbosityLevel};
use format::OutputFormat;

/// regclean - Container Registry Retention Cleaner
///
/// Deletes tags from a Docker Registry (HTTP API v2) that fall outside a
/// retention policy.
#[derive(Parser, Debug)]
#[command(name = "regclean")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control colored output: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    color: String,

    /// Output format: pretty, json
    #[arg(short, long, global = true, default_value = "pretty")]
    format: String,

    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Registry host
    #[arg(long, global = true)]
    host: Option<String>,

    /// Registry port
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Username for basic authentication
    #[arg(short, long, global = true, env = "REGCLEAN_USER")]
    user: Option<String>,

    /// Password for basic authentication
    #[arg(
        short,
        long,
        global = true,
        env = "REGCLEAN_PASSWORD",
        hide_env_values = true
    )]
    password: Option<String>,

    /// Delete tags created before this date (DD.MM.YYYY[ HH:MM[:SS]])
    #[arg(long, conflicts_with = "keep_last")]
    older_than: Option<String>,

    /// Keep the N most recent tags of every image
    #[arg(long)]
    keep_last: Option<usize>,

    /// Report what would be deleted without deleting
    #[arg(long, global = true)]
    dry_run: bool,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Display version information
    Version,
    /// Show the resolved configuration
    ShowConfig,
}

fn init_tracing(verbosity: VerbosityLevel) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| verbosity.filter_directive().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(VerbosityLevel::from_count(cli.verbose));

    if let Some(Commands::Version) = cli.command {
        version::print_version();
        return;
    }

    // Build context with precedence: defaults > config file > env vars > CLI flags
    let ctx = match AppContext::build(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            format::create_formatter(format::ColorChoice::from(cli.color.as_str()))
                .error(&e.to_string());
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::ShowConfig) => handle_show_config(&ctx),
        _ => handle_clean(&ctx),
    }
}

/// Print the resolved configuration with the password masked
fn handle_show_config(ctx: &AppContext) {
    let out = format::create_formatter(ctx.color);
    match ctx.format {
        OutputFormat::Json => match format::to_json(&format::redacted(&ctx.config)) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                out.error(&e);
                std::process::exit(1);
            }
        },
        OutputFormat::Pretty => {
            for line in format::config_lines(&ctx.config) {
                out.plain(&line);
            }
        }
    }
}

/// Run the retention policy against the whole registry
fn handle_clean(ctx: &AppContext) {
    let out = format::create_formatter(ctx.color);

    let resolved = ctx
        .registry()
        .and_then(|registry| ctx.policy().map(|policy| (registry, policy)));
    let (registry, policy) = match resolved {
        Ok(resolved) => resolved,
        Err(e) => {
            out.error(&e.to_string());
            std::process::exit(1);
        }
    };

    let logger = default_logger();
    let client = match Client::new(registry, logger.clone()) {
        Ok(client) => client,
        Err(e) => {
            out.error(&format!("Failed to create registry client: {}", e));
            std::process::exit(1);
        }
    };

    if ctx.verbosity >= VerbosityLevel::Verbose && ctx.format == OutputFormat::Pretty {
        out.heading(&format!(
            "Applying '{}' to {}",
            policy.describe(),
            client.base_url()
        ));
    }
    tracing::info!(
        registry = %client.base_url(),
        policy = %policy.describe(),
        dry_run = client.registry().dry_run(),
        "starting cleanup"
    );

    let report = match Cleaner::new(client, logger).run(policy.as_ref()) {
        Ok(report) => report,
        Err(e) => {
            out.error(&format!("Cleanup aborted: {}", e));
            std::process::exit(1);
        }
    };

    match ctx.format {
        OutputFormat::Json => match format::to_json(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                out.error(&e);
                std::process::exit(1);
            }
        },
        OutputFormat::Pretty => format::print_report(out.as_ref(), &report, Utc::now()),
    }

    if !report.is_success() {
        std::process::exit(1);
    }
}
