#![allow(missing_docs)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use connexus_wiki::{WikiEngine, resolve_wiki_runtime};
use serde::Serialize;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "connexus",
    about = "Connexus wiki link graph and todo index",
    arg_required_else_help = true
)]
struct Cli {
    /// Wiki corpus root directory.
    #[arg(
        long,
        short = 'r',
        value_name = "DIR",
        default_value = ".",
        global = true
    )]
    root: PathBuf,

    /// Explicit wiki config file (YAML), layered over `<root>/.connexus/wiki.yaml`.
    #[arg(long = "conf", short = 'c', value_name = "FILE", global = true)]
    config_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Json, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Return link-graph and todo counters.
    Stats,
    /// Return outgoing and incoming links for a topic.
    Links { topic: String },
    /// Return todos grouped by priority.
    Todos,
    /// Return every known page name (documents and link targets).
    Pages,
    /// Print the generated todo summary page body.
    Summary,
    /// Save a page body read from a file or stdin.
    Save {
        topic: String,
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Report whether saving a body would trigger a rebuild, without writing.
    Check {
        topic: String,
        #[arg(long, value_name = "FILE")]
        file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

fn emit<T: Serialize>(value: &T, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
    }
    .context("failed to serialize CLI output as JSON")?;
    println!("{rendered}");
    Ok(())
}

fn read_body(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read page body from {}", path.display())),
        None => {
            let mut body = String::new();
            std::io::stdin()
                .read_to_string(&mut body)
                .context("failed to read page body from stdin")?;
            Ok(body)
        }
    }
}

fn execute(cli: &Cli, engine: &WikiEngine) -> Result<()> {
    match &cli.command {
        Command::Stats => emit(&engine.stats(), cli.output),
        Command::Links { topic } => emit(&engine.topic_links(topic), cli.output),
        Command::Todos => {
            let index = engine.todo_index();
            let payload = json!({
                "total": index.len(),
                "groups": index.groups(),
            });
            emit(&payload, cli.output)
        }
        Command::Pages => {
            let pages = engine.page_list();
            let payload = json!({
                "home": engine.config().home_topic,
                "total": pages.len(),
                "pages": pages,
            });
            emit(&payload, cli.output)
        }
        Command::Summary => {
            print!("{}", engine.summary_body());
            Ok(())
        }
        Command::Save { topic, file } => {
            let body = read_body(file.as_deref())?;
            let outcome = engine
                .save_page(topic, &body)
                .with_context(|| format!("failed to save page '{topic}'"))?;
            emit(&outcome, cli.output)
        }
        Command::Check { topic, file } => {
            let body = read_body(file.as_deref())?;
            let report = engine.check_change(topic, &body);
            let payload = json!({
                "topic": topic,
                "links_changed": report.links_changed,
                "todos_changed": report.todos_changed,
                "requires_rebuild": report.requires_rebuild(),
            });
            emit(&payload, cli.output)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("connexus_wiki=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let root = cli
        .root
        .canonicalize()
        .with_context(|| format!("invalid wiki root '{}'", cli.root.display()))?;
    let config = resolve_wiki_runtime(&root, cli.config_file.as_deref())?;
    log::info!(
        "starting with root: '{}' and home: '{}'",
        config.root.display(),
        config.home_topic
    );
    let engine = WikiEngine::open(config).context("initial link graph build failed")?;
    execute(&cli, &engine)
}
