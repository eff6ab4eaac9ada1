//! CLI argument parsing for trendcard.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use trendcard::card::DEFAULT_WORD_LIMIT;
use trendcard::config::DEFAULT_CONFIG_DIR;

/// Trendcard: generate and edit STEEL trend cards with LLM agents.
///
/// Agent settings come from `trend_card_agent.yaml` (generator) and
/// `trend_card_editor.yaml` (editor), found by searching upward from the
/// current directory for the config directory.
#[derive(Parser, Debug)]
#[command(name = "trendcard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Name (or relative path) of the directory holding agent configs.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_DIR)]
    pub config_dir: String,

    /// Override the configured model. Requires --temperature.
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Override the configured temperature. Requires --model.
    #[arg(long, global = true)]
    pub temperature: Option<f64>,

    /// Log request details and print per-section word counts.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands for trendcard.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a single trend card.
    ///
    /// The card is printed as Markdown and written to the output directory.
    Generate(GenerateArgs),

    /// Generate one trend card per topic listed in a YAML file.
    ///
    /// The file is an ordered mapping of topic to STEEL component; a null
    /// component lets the model choose.
    GenerateBatch(GenerateBatchArgs),

    /// Edit every card file in a directory.
    ///
    /// Edited cards are written with a suffix appended to their file name.
    EditBatch(EditBatchArgs),
}

/// Arguments for the `generate` command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Industry segment the card is written for (e.g., "Fintech").
    #[arg(long)]
    pub industry_segment: String,

    /// Topic of the card (e.g., "Embedded Finance").
    #[arg(long)]
    pub topic: String,

    /// STEEL component. If omitted, the model picks the most relevant one.
    #[arg(long)]
    pub component: Option<String>,

    /// Target word count per section.
    #[arg(long, default_value_t = DEFAULT_WORD_LIMIT)]
    pub word_limit: u32,

    /// Directory for the card file. Defaults to cards/<model>.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `generate-batch` command.
#[derive(Parser, Debug)]
pub struct GenerateBatchArgs {
    /// Industry segment shared by every card in the batch.
    #[arg(long)]
    pub industry_segment: String,

    /// YAML file mapping topic to component.
    #[arg(long)]
    pub topics: PathBuf,

    /// Target word count per section.
    #[arg(long, default_value_t = DEFAULT_WORD_LIMIT)]
    pub word_limit: u32,

    /// Directory for the card files. Defaults to cards/<model>.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

/// Arguments for the `edit-batch` command.
#[derive(Parser, Debug)]
pub struct EditBatchArgs {
    /// Directory searched recursively for card files.
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Extension of the files to edit (leading dot optional).
    #[arg(long, default_value = "md")]
    pub extension: String,

    /// Suffix appended to each edited card's file name.
    #[arg(long, default_value = "edited")]
    pub suffix: String,

    /// Target word count per section.
    #[arg(long, default_value_t = DEFAULT_WORD_LIMIT)]
    pub word_limit: u32,

    /// Directory for the edited files. Defaults to cards/<model>.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
