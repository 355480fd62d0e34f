//! aclshow - ACL table and rule status viewer
//!
//! Entry point for the `aclshow` command.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use sonic_aclshow::{AclShow, AclShowConfig, DEFAULT_CONFIG_PATH};

/// Show ACL tables and rules across all ASIC instances
#[derive(Parser, Debug)]
#[command(name = "aclshow")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short = 'c', long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Database dump, as INSTANCE=PATH or PATH for a single-ASIC switch
    #[arg(short = 'd', long = "dump", value_name = "[INSTANCE=]PATH")]
    dumps: Vec<String>,

    /// ASIC instance to report on (repeatable); overrides the config file
    #[arg(short = 'n', long = "instance")]
    instances: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show ACL state
    #[command(subcommand)]
    Show(ShowCommand),
}

#[derive(Subcommand, Debug)]
enum ShowCommand {
    /// Show ACL tables
    Table {
        /// Table name
        name: Option<String>,
    },
    /// Show ACL rules
    Rule {
        /// Table name
        table: Option<String>,
        /// Rule name
        rule: Option<String>,
    },
}

/// Initializes tracing/logging subsystem; logs go to stderr so the
/// rendered tables on stdout stay clean.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: Args) -> anyhow::Result<String> {
    let mut config = AclShowConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if !args.instances.is_empty() {
        config.topology.instances = args.instances.clone();
    }
    for dump in &args.dumps {
        config.apply_dump_override(dump)?;
    }
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let show = AclShow::from_config(&config)?;
    let output = match &args.command {
        Command::Show(ShowCommand::Table { name }) => show.show_table(name.as_deref()).await?,
        Command::Show(ShowCommand::Rule { table, rule }) => {
            show.show_rule(table.as_deref(), rule.as_deref()).await?
        }
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(args).await {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("aclshow failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
