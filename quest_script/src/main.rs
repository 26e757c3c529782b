//! CLI entry point for quest_script.
//! Usage: quest_script [--protocol <file>]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::info;

use quest_script::{QUEST_SCRIPT_VERSION, QuestEditor, load_protocol, resolve_protocol_path, run_repl};

#[derive(Parser)]
#[command(author, version = QUEST_SCRIPT_VERSION, about = "Author quest steps and compile them to quest script.")]
struct Cli {
    /// Protocol file (JSON, or TOML by extension) describing step types and npcs.
    #[arg(long, short)]
    protocol: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let path = resolve_protocol_path(cli.protocol.as_deref());
    info!("quest_script {QUEST_SCRIPT_VERSION}: loading protocol from {}", path.display());
    let protocol = load_protocol(&path).context("while loading quest protocol")?;

    println!("{}", "QUEST EDITOR".bright_yellow().underline());
    println!("Type {} for the list of commands.\n", "help".bold());

    let mut editor = QuestEditor::new(protocol);
    run_repl(&mut editor)
}
