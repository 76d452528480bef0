//! Lintstack CLI
//!
//! Command-line interface for inspecting the composed linter configuration

mod commands;
mod output;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use lintstack_core::init_tracing;
use std::io;
use std::path::PathBuf;
use tracing::error;

#[derive(Parser)]
#[command(name = "lintstack")]
#[command(about = "lintstack: layered linter configuration, composed from per-domain presets")]
#[command(version = lintstack_core::VERSION)]
#[command(
    long_about = "lintstack builds one ordered list of configuration fragments from a small\n\
options file, enabling language domains from the packages your project installs.\n\
\n\
Examples:\n  \
lintstack print                  # Show the composed fragments\n  \
lintstack print --json           # Emit the composition as JSON\n  \
lintstack resolve typescript     # Explain how one domain resolves\n  \
lintstack resolve                # Show every domain"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        help = "Path to configuration file (lintstack.json/.jsonc/.yaml/.toml)"
    )]
    config: Option<PathBuf>,

    /// Project directory used for config discovery and package detection
    #[arg(long, global = true, env = "LINTSTACK_CWD")]
    cwd: Option<PathBuf>,

    /// Verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Generate shell completion script
    #[arg(
        long,
        value_enum,
        help = "Generate completion script for specified shell"
    )]
    generate_completion: Option<Shell>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose the configuration and print the fragment sequence
    Print {
        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,

        /// Shorthand for `--format json`
        #[arg(long, conflicts_with_all = ["names", "format"])]
        json: bool,

        /// Shorthand for `--format names`
        #[arg(long, conflicts_with = "format")]
        names: bool,
    },

    /// Show how domains resolve against the options
    Resolve {
        /// Domain key, every domain when omitted
        domain: Option<String>,
    },

    /// Show version information
    Version {
        /// Show detailed version information
        #[arg(long)]
        detailed: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// One block per fragment
    Human,
    /// The fragment sequence as JSON
    Json,
    /// Fragment names only, one per line
    Names,
}

fn main() -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completion {
        generate_completion_script(shell);
        return Ok(());
    }

    if !cli.no_color && std::env::var("NO_COLOR").is_err() {
        colored::control::set_override(true);
    } else {
        colored::control::set_override(false);
    }

    let log_level = match cli.verbose {
        0 => "lintstack=error",
        1 => "lintstack=warn",
        2 => "lintstack=info",
        3 => "lintstack=debug",
        _ => "lintstack=trace",
    };
    // SAFETY: set before any task reads the environment
    unsafe {
        std::env::set_var("RUST_LOG", log_level);
    }
    init_tracing();

    match run_command(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("lintstack failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn generate_completion_script(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Print {
            format,
            json,
            names,
        }) => {
            let format = if json {
                OutputFormat::Json
            } else if names {
                OutputFormat::Names
            } else {
                format
            };
            commands::print_command(format, cli.config, cli.cwd).await?;
        }

        Some(Commands::Resolve { domain }) => {
            commands::resolve_command(domain, cli.config, cli.cwd).await?;
        }

        Some(Commands::Version { detailed }) => {
            if detailed {
                println!("lintstack {}", lintstack_core::VERSION);
                println!("Build information:");
                println!("  Target: {}", std::env::consts::ARCH);
                println!("  OS: {}", std::env::consts::OS);
                println!("  Domains: {}", lintstack_presets::DOMAINS.len());
            } else {
                println!("{}", lintstack_core::VERSION);
            }
        }

        None => {
            let mut cmd = Cli::command();
            cmd.print_help()?;
        }
    }
    Ok(())
}
