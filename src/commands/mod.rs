//! Command implementations for trendcard.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command builds the HTTP provider from the
//! environment; the `run_*` functions take any provider so they can be
//! exercised with a scripted one.

use crate::cli::{Command, EditBatchArgs, GenerateArgs, GenerateBatchArgs, GlobalArgs};
use std::path::{Path, PathBuf};
use trendcard::agent::{CompletionProvider, HttpProvider};
use trendcard::config::AgentConfiguration;
use trendcard::fs::{directory_safe_model_name, get_file_list};
use trendcard::{
    BatchItem, CardEditor, CardGenerator, PersistOptions, Result, TrendCardError, TrendCardInput,
    edit_batch, generate_batch, load_topic_map, persist,
};

/// Root under which per-model output directories are created.
pub const DEFAULT_OUTPUT_ROOT: &str = "cards";

/// Dispatch a command to its implementation.
pub async fn dispatch(global: GlobalArgs, command: Command) -> Result<()> {
    let provider = HttpProvider::from_env()?;
    match command {
        Command::Generate(args) => run_generate(&global, args, provider).await,
        Command::GenerateBatch(args) => run_generate_batch(&global, args, provider).await,
        Command::EditBatch(args) => run_edit_batch(&global, args, provider).await,
    }
}

/// Build the model/temperature override from the global options.
///
/// Both options must be given together, or neither.
pub fn overrides(global: &GlobalArgs) -> Result<Option<AgentConfiguration>> {
    match (&global.model, global.temperature) {
        (Some(model), Some(temperature)) => {
            Ok(Some(AgentConfiguration::new(model.as_str(), temperature)?))
        }
        (None, None) => Ok(None),
        (Some(_), None) => Err(TrendCardError::UserError(
            "--model requires --temperature".to_string(),
        )),
        (None, Some(_)) => Err(TrendCardError::UserError(
            "--temperature requires --model".to_string(),
        )),
    }
}

/// The explicit output directory, or `cards/<model>` with the model name
/// made directory-safe.
pub fn output_dir(explicit: Option<PathBuf>, model: &str) -> PathBuf {
    explicit.unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_ROOT).join(directory_safe_model_name(model)))
}

pub async fn run_generate<P: CompletionProvider>(
    global: &GlobalArgs,
    args: GenerateArgs,
    provider: P,
) -> Result<()> {
    let overrides = overrides(global)?;
    let generator = CardGenerator::load(&global.config_dir, overrides.as_ref(), provider)?;
    let dir = output_dir(args.output_dir, generator.model());

    let mut inputs =
        TrendCardInput::new(args.industry_segment, args.topic).with_word_limit(args.word_limit);
    inputs.component = args.component;

    let card = generator.generate(&inputs).await?;
    let file_name = persist(&card, &dir, &PersistOptions::default())?;

    println!("{}", card.to_markdown());
    println!();
    if global.verbose {
        println!("Word counts:");
        println!("{}", card.word_counts());
        println!();
    }
    println!("Saved: {}", dir.join(file_name).display());
    Ok(())
}

pub async fn run_generate_batch<P: CompletionProvider>(
    global: &GlobalArgs,
    args: GenerateBatchArgs,
    provider: P,
) -> Result<()> {
    let topics = load_topic_map(&args.topics)?;
    let overrides = overrides(global)?;
    let generator = CardGenerator::load(&global.config_dir, overrides.as_ref(), provider)?;
    let dir = output_dir(args.output_dir, generator.model());

    println!(
        "Generating {} card(s) for '{}' with {} into {}",
        topics.len(),
        args.industry_segment,
        generator.model(),
        dir.display()
    );

    let total = topics.len();
    let items = generate_batch(
        &generator,
        &args.industry_segment,
        &topics,
        args.word_limit,
        &dir,
        |item| print_progress(item, total, global.verbose),
    )
    .await?;

    println!("Done: {} card(s) written to {}", items.len(), dir.display());
    Ok(())
}

pub async fn run_edit_batch<P: CompletionProvider>(
    global: &GlobalArgs,
    args: EditBatchArgs,
    provider: P,
) -> Result<()> {
    let files = get_file_list(&args.input_dir, &args.extension)?;
    if files.is_empty() {
        println!(
            "No '{}' files found in {}",
            args.extension,
            args.input_dir.display()
        );
        return Ok(());
    }

    let overrides = overrides(global)?;
    let editor = CardEditor::load(
        &global.config_dir,
        overrides.as_ref(),
        args.word_limit,
        provider,
    )?;
    let dir = output_dir(args.output_dir, editor.model());

    println!(
        "Editing {} card(s) with {} into {}",
        files.len(),
        editor.model(),
        dir.display()
    );

    let total = files.len();
    let items = edit_batch(&editor, &files, &dir, &args.suffix, |item| {
        print_progress(item, total, global.verbose)
    })
    .await?;

    println!("Done: {} card(s) written to {}", items.len(), dir.display());
    Ok(())
}

fn print_progress(item: &BatchItem, total: usize, verbose: bool) {
    match &item.source {
        Some(source) => println!(
            "[{}/{}] {} -> {}",
            item.sequence,
            total,
            source.display(),
            item.file_name
        ),
        None => println!(
            "[{}/{}] {} -> {}",
            item.sequence, total, item.card_identifier, item.file_name
        ),
    }
    if verbose {
        for (field, count) in item.word_counts.iter() {
            println!("    {:<16} {}", field, count);
        }
    }
}
