//! tagbot CLI: chat with the demo dialogue script in a terminal loop, or
//! tag a single message against a tag table. Config from env and .env.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tag_matcher::{TagMatcher, TagTable};
use tagbot_cli::{repl, script};
use tagbot_core::{init_tracing, ValidationMode};

#[derive(Parser)]
#[command(name = "tagbot")]
#[command(about = "Tag-driven dialogue bot CLI: chat, tag", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the demo negotiation script (exit/quit to stop).
    Chat {
        /// Fail construction on validation warnings instead of logging them.
        #[arg(long)]
        strict: bool,
        /// Append logs to this file in addition to stdout.
        #[arg(long)]
        log_file: Option<String>,
    },
    /// Tag one message and print the tag counts.
    Tag {
        message: String,
        /// JSON tag table (phrase -> tag or [tags]); defaults to the demo table.
        #[arg(short, long)]
        table: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { strict, log_file } => {
            init_tracing(log_file.as_deref())?;
            let mode = if strict {
                ValidationMode::Strict
            } else {
                ValidationMode::Permissive
            };
            let engine =
                script::negotiation_bot(mode).context("Build the demo dialogue script")?;
            repl::run(engine)
        }
        Commands::Tag { message, table } => handle_tag(&message, table.as_deref()),
    }
}

/// Handle the tag command.
///
/// Loads the table (JSON file, or the demo table when none is given),
/// compiles it, tags the message, and prints the counts sorted by tag.
fn handle_tag(message: &str, table_path: Option<&str>) -> Result<()> {
    let table: TagTable = match table_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Read tag table {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("Parse tag table {path}"))?
        }
        None => script::negotiation_tags(),
    };

    let matcher = TagMatcher::compile(&table).context("Compile tag table")?;
    let tags = matcher.tag(message);

    if tags.is_empty() {
        println!("No tags matched.");
        return Ok(());
    }

    let mut rows: Vec<_> = tags.iter().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));

    println!("{:<20} count", "tag");
    for (tag, count) in rows {
        println!("{:<20} {}", tag, count);
    }

    Ok(())
}
