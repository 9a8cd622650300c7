use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::logging::{init_logging_with_config, LogConfig};
use crate::manifest::load_router;
use crate::params::RouteParams;

/// Command-line interface for routeway
///
/// Inspects, matches against and generates paths from a route manifest.
#[derive(Parser, Debug)]
#[command(name = "routeway")]
#[command(about = "routeway CLI", long_about = None)]
pub struct Cli {
    /// Log level for diagnostics (overrides ROUTEWAY_LOG_LEVEL)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the routing table
    Routes {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,
    },
    /// Match a request path and print the route key and parameters
    Match {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// HTTP method of the request
        #[arg(long, default_value = "GET")]
        method: String,

        /// Value sent in the method-override header
        #[arg(long = "override")]
        method_override: Option<String>,

        /// Request path, including any query string
        path: String,
    },
    /// Generate the path for a named route
    Generate {
        /// Path to the route manifest (YAML or JSON)
        #[arg(short, long)]
        manifest: PathBuf,

        /// Route key
        name: String,

        /// Route argument as name=value (repeatable)
        #[arg(long = "arg", value_parser = parse_key_val)]
        args: Vec<(String, String)>,

        /// Leave placeholders without a value in place instead of failing
        #[arg(long, default_value_t = false)]
        partial: bool,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{s}'"))
}

/// Parse arguments, set up logging and run the selected command against stdout.
///
/// # Errors
///
/// Returns an error if:
/// - Logging cannot be initialized
/// - The manifest cannot be read, parsed or sealed
/// - Generation fails for the requested route
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging_with_config(&LogConfig {
        log_level: cli.log_level.clone(),
        async_logging: false,
        ..LogConfig::from_env()
    })?;

    let stdout = std::io::stdout();
    execute(&cli.command, &mut stdout.lock())
}

/// Run a parsed command, writing its output to `out`.
///
/// A `match` that finds no route prints `no route` and still succeeds.
///
/// # Errors
///
/// Manifest, request-building and generation failures.
pub fn execute(command: &Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Routes { manifest } => {
            let router = load_router(manifest)?;
            for line in router.route_table() {
                writeln!(out, "{line}")?;
            }
            Ok(())
        }
        Commands::Match {
            manifest,
            method,
            method_override,
            path,
        } => {
            let router = load_router(manifest)?;
            let mut builder = http::Request::builder()
                .method(method.to_ascii_uppercase().as_str())
                .uri(path.as_str());
            if let Some(value) = method_override {
                builder = builder.header(router.config().method_override_header.as_str(), value);
            }
            let request = builder
                .body(())
                .with_context(|| format!("Invalid request {method} {path}"))?;

            match router.parse(&request) {
                Some(matched) => {
                    writeln!(out, "{}", matched.key())?;
                    for (name, value) in matched.params.iter() {
                        writeln!(out, "  {name} = {value}")?;
                    }
                }
                None => writeln!(out, "no route")?,
            }
            Ok(())
        }
        Commands::Generate {
            manifest,
            name,
            args,
            partial,
        } => {
            let router = load_router(manifest)?;
            let args: RouteParams = args.iter().map(|(k, v)| (k, v)).collect();
            let path = router
                .generate_path(name, &args, !*partial)
                .with_context(|| format!("Failed to generate path for '{name}'"))?;
            writeln!(out, "{path}")?;
            Ok(())
        }
    }
}
