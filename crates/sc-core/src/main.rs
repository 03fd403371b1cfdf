//! stylecfg - style content and theme configuration resolver
//!
//! The main entry point, handling:
//! - Config discovery and loading
//! - Validation with field-path errors
//! - Resolved settings, snapshots and default theme output
//! - Content glob checks for the class scanner

use clap::{Args, Parser, Subcommand};
use sc_config::theme::default_theme;
use sc_config::{
    discover_config, load_discovered, LoadError, LoadedConfig, Settings, SettingsSnapshot,
};
use sc_core::exit_codes::ExitCode;
use sc_core::logging::{init_logging, LogConfig, LogFormat, LogLevel, LogOverrides};
use sc_core::output::{render, OutputFormat};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};

/// stylecfg - resolve and validate style content/theme configuration
#[derive(Parser)]
#[command(name = "stylecfg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Explicit config file (.json, .toml, .yaml, .yml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Project root to search for style.config.* (defaults to cwd)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log format on stderr (human, jsonl)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Omit timestamps from human log lines
    #[arg(long, global = true)]
    no_log_timestamps: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the resolved settings
    Resolve,

    /// Validate the configuration without printing settings
    Validate,

    /// Print a settings snapshot (hashes, provenance, summary)
    Snapshot,

    /// Print the built-in default theme
    Defaults,

    /// Report which paths the content globs select
    Match(MatchArgs),
}

#[derive(Args, Debug)]
struct MatchArgs {
    /// Paths to test: relative to the project root, or absolute under it
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            use clap::error::ErrorKind;
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            // Usage errors map onto the stable exit-code contract, not clap's 2.
            let _ = err.print();
            std::process::exit(ExitCode::ArgsError.as_i32());
        }
    };

    let cli_level = if cli.global.quiet {
        Some(LogLevel::Error)
    } else {
        match cli.global.verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    };
    init_logging(&LogConfig::from_env(LogOverrides {
        level: cli_level,
        format: cli.global.log_format,
        timestamps: cli.global.no_log_timestamps.then_some(false),
    }));

    let exit_code = match cli.command {
        Commands::Resolve => run_resolve(&cli.global),
        Commands::Validate => run_validate(&cli.global),
        Commands::Snapshot => run_snapshot(&cli.global),
        Commands::Defaults => run_defaults(&cli.global),
        Commands::Match(args) => run_match(&cli.global, &args),
    };

    std::process::exit(exit_code.as_i32());
}

fn load(global: &GlobalOpts) -> Result<LoadedConfig, LoadError> {
    let discovered = discover_config(global.config.as_deref(), global.root.as_deref());
    load_discovered(&discovered)
}

/// Log a load failure and map it to an exit code.
fn report_load_error(err: &LoadError) -> ExitCode {
    let code = ExitCode::from(err);
    tracing::error!(code = code.code_name(), "{}", err);
    eprintln!("error: {}", err);
    code
}

fn emit<T: Serialize>(value: &T, format: OutputFormat) -> ExitCode {
    match render(value, format) {
        Ok(text) => {
            println!("{}", text.trim_end());
            ExitCode::Clean
        }
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::InternalError
        }
    }
}

fn summary_lines(settings: &Settings) -> Vec<String> {
    let mut lines = vec![
        format!("mode: {}", settings.mode),
        format!("darkMode: {}", settings.dark_mode_strategy),
        format!("content: {}", settings.content_globs.join(", ")),
        format!(
            "screens: {}",
            settings
                .theme
                .screens()
                .iter()
                .map(|b| b.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ),
    ];
    if !settings.plugins.is_empty() {
        lines.push(format!(
            "plugins: {}",
            settings
                .plugins
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }
    lines
}

fn run_resolve(global: &GlobalOpts) -> ExitCode {
    let loaded = match load(global) {
        Ok(loaded) => loaded,
        Err(err) => return report_load_error(&err),
    };
    if global.format == OutputFormat::Summary {
        for line in summary_lines(&loaded.settings) {
            println!("{}", line);
        }
        return ExitCode::Clean;
    }
    emit(&loaded.settings, global.format)
}

fn run_validate(global: &GlobalOpts) -> ExitCode {
    let discovered = discover_config(global.config.as_deref(), global.root.as_deref());
    let path = discovered.path.as_ref().map(|p| p.display().to_string());
    match load_discovered(&discovered) {
        Ok(loaded) => {
            if global.format == OutputFormat::Summary {
                println!(
                    "ok: {} ({})",
                    path.as_deref().unwrap_or("builtin defaults"),
                    loaded.source
                );
                return ExitCode::Clean;
            }
            emit(
                &json!({
                    "valid": true,
                    "path": path,
                    "source": loaded.source.to_string(),
                }),
                global.format,
            )
        }
        Err(err) => {
            let code = report_load_error(&err);
            if global.format != OutputFormat::Summary {
                let field = match &err {
                    LoadError::ValidationError(inner) => Some(inner.field().to_string()),
                    _ => None,
                };
                emit(
                    &json!({
                        "valid": false,
                        "path": path,
                        "error": {
                            "code": err.code(),
                            "kind": code.code_name(),
                            "field": field,
                            "message": err.to_string(),
                        },
                    }),
                    global.format,
                );
            }
            code
        }
    }
}

fn run_snapshot(global: &GlobalOpts) -> ExitCode {
    let loaded = match load(global) {
        Ok(loaded) => loaded,
        Err(err) => return report_load_error(&err),
    };
    match SettingsSnapshot::new(&loaded) {
        Ok(snapshot) => {
            tracing::debug!(id = snapshot.short_id(), "snapshot taken");
            emit(&snapshot, global.format)
        }
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::InternalError
        }
    }
}

fn run_defaults(global: &GlobalOpts) -> ExitCode {
    if global.format == OutputFormat::Summary {
        for (category, tokens) in default_theme() {
            let count = tokens.as_object().map_or(0, |t| t.len());
            println!("{}: {} tokens", category, count);
        }
        return ExitCode::Clean;
    }
    emit(default_theme(), global.format)
}

/// Absolute project root: `--root` (resolved against cwd) or cwd.
fn project_root(global: &GlobalOpts) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok();
    match (&global.root, cwd) {
        (Some(root), _) if root.is_absolute() => Some(root.clone()),
        (Some(root), Some(cwd)) => Some(cwd.join(root)),
        (None, cwd) => cwd,
        (Some(root), None) => Some(root.clone()),
    }
}

/// Strip the project root from absolute paths; relative paths pass through.
fn relative_to_root<'a>(path: &'a Path, root: Option<&Path>) -> &'a Path {
    let Some(root) = root.filter(|_| path.is_absolute()) else {
        return path;
    };
    if let Ok(rest) = path.strip_prefix(root) {
        return rest;
    }
    // Tolerate symlinked roots (e.g. /tmp on macOS).
    std::fs::canonicalize(root)
        .ok()
        .and_then(|canonical| path.strip_prefix(canonical).ok())
        .unwrap_or(path)
}

fn run_match(global: &GlobalOpts, args: &MatchArgs) -> ExitCode {
    let loaded = match load(global) {
        Ok(loaded) => loaded,
        Err(err) => return report_load_error(&err),
    };
    let matcher = match loaded.settings.content_matcher() {
        Ok(matcher) => matcher,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("error: {}", err);
            return ExitCode::InternalError;
        }
    };
    if matcher.is_empty() {
        tracing::warn!("no content globs configured; nothing will be scanned");
    }

    let root = project_root(global);
    let results: Vec<(String, bool)> = args
        .paths
        .iter()
        .map(|p| {
            let relative = relative_to_root(p, root.as_deref());
            (p.display().to_string(), matcher.is_match(relative))
        })
        .collect();

    if global.format == OutputFormat::Summary {
        for (path, matched) in &results {
            println!("{} {}", if *matched { "+" } else { "-" }, path);
        }
        return ExitCode::Clean;
    }
    let payload: Vec<_> = results
        .iter()
        .map(|(path, matched)| json!({"path": path, "matched": matched}))
        .collect();
    emit(&payload, global.format)
}
