//! Switchboard demo console
//!
//! A small host around `switchboard-core`: owns a registry, registers the
//! sample command tree, and drives dispatch and tab completion from
//! console lines. Lines are split with `shell-words`; a line whose last
//! token is `?` asks for completion candidates instead of dispatching.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use switchboard_core::logging::{init, Profile};
use switchboard_core::{CommandRegistry, InMemoryRegistry, IssuerKind};

mod console;
mod demo;

use console::{ConsoleIssuer, KnownNameSuggestions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    /// Human-readable output
    Pretty,
    /// JSON structured output
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "switchboard")]
#[command(about = "Switchboard - command dispatch demo console", long_about = None)]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Run as an interactive issuer instead of the console
    #[arg(long)]
    interactive: bool,

    /// Read lines from a script file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let kind = if cli.interactive {
        IssuerKind::Interactive
    } else {
        IssuerKind::Console
    };
    let issuer = ConsoleIssuer::new("operator", kind);
    let suggestions = KnownNameSuggestions::new(["north", "spawn", "operator"]);

    let mut registry = InMemoryRegistry::new();
    registry
        .register(demo::sample_tree().context("building demo command tree")?)
        .context("registering demo command tree")?;

    match &cli.script {
        Some(path) => {
            let script = fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            for line in script.lines() {
                handle_line(&registry, &issuer, &suggestions, line)?;
            }
        }
        None => {
            let stdin = io::stdin();
            print_prompt()?;
            for line in stdin.lock().lines() {
                let line = line.context("reading console input")?;
                handle_line(&registry, &issuer, &suggestions, &line)?;
                print_prompt()?;
            }
        }
    }
    Ok(())
}

fn print_prompt() -> Result<()> {
    print!("> ");
    io::stdout().flush().context("flushing prompt")
}

fn handle_line(
    registry: &InMemoryRegistry,
    issuer: &ConsoleIssuer,
    suggestions: &KnownNameSuggestions,
    line: &str,
) -> Result<()> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }

    let mut tokens =
        shell_words::split(line).with_context(|| format!("parsing input line '{}'", line))?;
    if tokens.is_empty() {
        return Ok(());
    }

    if tokens[0] == "commands" {
        return print_descriptors(registry, tokens.get(1).map(String::as_str));
    }

    // Trailing `?` token turns the line into a completion request
    if tokens.last().map(String::as_str) == Some("?") {
        tokens.pop();
        if tokens.is_empty() {
            return Ok(());
        }
        let alias = tokens.remove(0);
        let candidates = registry.complete(issuer, &alias, &tokens, suggestions);
        if candidates.is_empty() {
            println!("(no completions)");
        } else {
            println!("{}", candidates.join("  "));
        }
        return Ok(());
    }

    let label = tokens.remove(0);
    if !registry.dispatch(issuer, &label, &tokens) {
        println!("Unknown command: {}", label);
    }
    Ok(())
}

fn print_descriptors(registry: &InMemoryRegistry, mode: Option<&str>) -> Result<()> {
    let descriptors = registry.descriptors();
    if mode == Some("--json") {
        let rendered =
            serde_json::to_string_pretty(&descriptors).context("rendering command descriptors")?;
        println!("{}", rendered);
        return Ok(());
    }
    for descriptor in descriptors {
        let aliases = if descriptor.aliases.is_empty() {
            String::new()
        } else {
            format!(" ({})", descriptor.aliases.join(", "))
        };
        println!("{}{} - {}", descriptor.name, aliases, descriptor.description);
    }
    Ok(())
}
