mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use commands::{EXIT_FAILURE, EXIT_TEMPLATE_ERROR};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "packsmith",
    version,
    about = "Schema-checked builder for Packer templates"
)]
struct Cli {
    /// Output results as structured JSON.
    #[arg(long, default_value_t = false, global = true)]
    json: bool,

    /// Enable verbose (debug) logging output.
    #[arg(short, long, default_value_t = false, global = true)]
    verbose: bool,

    /// Enable trace-level logging (more detailed than --verbose).
    #[arg(long, default_value_t = false, global = true)]
    trace: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render a template description to a Packer JSON document.
    Render {
        /// Path to the template description (TOML, or JSON with a .json extension).
        #[arg(default_value = "packsmith.toml")]
        template: PathBuf,
        /// Write the document to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a template description without writing anything.
    Check {
        /// Path to the template description.
        #[arg(default_value = "packsmith.toml")]
        template: PathBuf,
    },
    /// List the provisioner kinds in the catalog.
    Kinds,
    /// Show the fields and rules of a provisioner kind.
    Describe {
        /// Resource type tag, e.g. "shell" or "salt-masterless".
        resource_type: String,
    },
    /// Generate shell completions for bash, zsh, fish, elvish, or powershell.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
    /// Generate man pages in the specified directory.
    ManPages {
        /// Output directory for man pages.
        #[arg(default_value = "man")]
        dir: PathBuf,
    },
}

/// Level used when `PACKSMITH_LOG` is unset or unparsable.
fn default_log_level(verbose: bool, trace: bool) -> &'static str {
    match (verbose, trace) {
        (_, true) => "trace",
        (true, false) => "debug",
        (false, false) => "warn",
    }
}

fn init_logging(verbose: bool, trace: bool) {
    let filter = EnvFilter::try_from_env("PACKSMITH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose, trace)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let msg = info.to_string();
        if msg.contains("Broken pipe")
            || msg.contains("broken pipe")
            || msg.contains("os error 32")
            || msg.contains("failed printing to stdout")
        {
            std::process::exit(0);
        }
        default_hook(info);
    }));

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.trace);

    let json_output = cli.json;

    let result = match cli.command {
        Commands::Render { template, output } => {
            commands::render::run(&template, output.as_deref(), json_output)
        }
        Commands::Check { template } => commands::check::run(&template, json_output),
        Commands::Kinds => commands::kinds::run(json_output),
        Commands::Describe { resource_type } => {
            commands::describe::run(&resource_type, json_output)
        }
        Commands::Completions { shell } => commands::completions::run::<Cli>(shell),
        Commands::ManPages { dir } => commands::man_pages::run::<Cli>(&dir),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(msg) => {
            eprintln!("error: {msg}");
            let code = if msg.starts_with("template error:") {
                EXIT_TEMPLATE_ERROR
            } else {
                EXIT_FAILURE
            };
            ExitCode::from(code)
        }
    }
}
