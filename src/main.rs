//! Zenlint CLI - ZenUML diagram linter
//!
//! Lints a ZenUML document against a syntax tree exported by an external
//! parser as JSON.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::{Path, PathBuf};
use zenlint::{
    extract_participants, to_publish_diagnostics, Config, Diagnostic, Engine, LineIndex,
    LintResult, RuleRegistry, Severity, TreeNode,
};

#[derive(Parser)]
#[command(
    name = "zenlint",
    version,
    about = "ZenUML Diagram Linter",
    long_about = "Semantic diagnostics for ZenUML sequence diagrams parsed by an external parser."
)]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint a document
    Check {
        /// ZenUML document
        document: PathBuf,

        /// Syntax tree of the document as JSON
        #[arg(short, long)]
        tree: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Disable specific rules (comma-separated)
        #[arg(long, value_delimiter = ',')]
        disable: Option<Vec<String>>,

        /// Only enable specific rules (comma-separated)
        #[arg(long, value_delimiter = ',')]
        select: Option<Vec<String>>,

        /// Exit with 0 even if errors are found
        #[arg(long)]
        exit_zero: bool,
    },

    /// List available rules
    Rules,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Lsp,
}

fn severity_label(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::Error => "error".red(),
        Severity::Warning => "warning".yellow(),
        Severity::Info => "info".blue(),
    }
}

fn print_rules() {
    let registry = RuleRegistry::builtin();
    println!("{}", "Available rules".bold());
    for rule in registry.iter() {
        println!(
            "    {} [{}] ({})",
            rule.id().cyan(),
            severity_label(rule.severity()),
            rule.category()
        );
        println!("      {}", rule.description());
    }
}

fn print_text(path: &Path, text: &str, result: &LintResult) {
    let index = LineIndex::new(text);
    for diag in &result.diagnostics {
        let pos = index.position(diag.range.from);
        println!(
            "{}:{}:{}: {} [{}] {}",
            path.display(),
            pos.line + 1,
            pos.character + 1,
            severity_label(diag.severity),
            diag.rule_id.cyan(),
            diag.message
        );
    }

    if result.diagnostics.is_empty() {
        println!("{}", "No problems found".green());
    } else {
        println!();
        println!(
            "Found {} error(s), {} warning(s), {} info",
            result.error_count.to_string().red().bold(),
            result.warning_count.to_string().yellow().bold(),
            result.info_count
        );
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(Config::load_default().unwrap_or_else(|e| {
            log::warn!("ignoring default config: {}", e);
            Config::default()
        })),
    }
}

fn run_check(
    document: &Path,
    tree: &Path,
    format: Format,
    config: Option<&Path>,
    disable: Option<Vec<String>>,
    select: Option<Vec<String>>,
    exit_zero: bool,
) -> Result<i32> {
    let mut config = load_config(config)?;
    config.merge_cli(disable, select);

    let text = std::fs::read_to_string(document)
        .with_context(|| format!("Failed to read {}", document.display()))?;
    let root = TreeNode::load(tree)
        .with_context(|| format!("Failed to load syntax tree {}", tree.display()))?;
    if root.to > text.len() {
        log::warn!(
            "syntax tree spans {} bytes but the document has {}",
            root.to,
            text.len()
        );
    }

    let participants = extract_participants(&text, &root);
    log::info!(
        "{} declares {} participant(s)",
        document.display(),
        participants.len()
    );

    let result = Engine::new(config).lint(&root, &text, &participants);
    log::debug!("lint finished in {:?}", result.duration);

    match format {
        Format::Text => print_text(document, &text, &result),
        Format::Json => {
            let diagnostics: &[Diagnostic] = &result.diagnostics;
            println!("{}", serde_json::to_string_pretty(diagnostics)?);
        }
        Format::Lsp => {
            let uri = format!("file://{}", document.display());
            let params = to_publish_diagnostics(&uri, &text, &result.diagnostics);
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
    }

    Ok(if exit_zero { 0 } else { result.exit_code() })
}

fn main() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let outcome = match cli.command {
        Commands::Check {
            document,
            tree,
            format,
            config,
            disable,
            select,
            exit_zero,
        } => run_check(
            &document,
            &tree,
            format,
            config.as_deref(),
            disable,
            select,
            exit_zero,
        ),
        Commands::Rules => {
            print_rules();
            Ok(0)
        }
    };

    match outcome {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {:#}", "error".red().bold(), e);
            std::process::exit(2);
        }
    }
}
