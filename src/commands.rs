//! Subcommand handlers.
//!
//! Each handler loads configuration, builds a [`DedupEngine`], runs one mode
//! and renders the result on stdout in the requested format.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use bytesize::ByteSize;
use dialoguer::Confirm;

use crate::actions::{delete_duplicates, BatchDeleteResult, DeleteConfig, DeleteError, DeletionPlan};
use crate::cli::{AcrossArgs, Cli, Commands, DeleteOptions, MergeArgs, OutputFormat, ScanOptions, WithinArgs};
use crate::config::Config;
use crate::duplicates::{CopyReport, DedupEngine, DedupReport, DuplicatePair, FinderError};
use crate::error::ExitCode;
use crate::output::{CsvOutput, JsonOutput, TextOutput};
use crate::progress::Progress;
use crate::signal::install_handler;

/// Run the selected subcommand.
///
/// # Errors
///
/// Returns an error if configuration is invalid, a folder cannot be
/// listed, the run is interrupted, or output cannot be written.
pub fn run(cli: &Cli) -> Result<ExitCode> {
    if cli.no_color {
        yansi::disable();
    }

    match &cli.command {
        Commands::Within(args) => run_within(cli, args),
        Commands::Across(args) => run_across(cli, args),
        Commands::Merge(args) => run_merge(cli, args),
    }
}

fn run_within(cli: &Cli, args: &WithinArgs) -> Result<ExitCode> {
    run_dedup(cli, &args.scan, &args.delete, |engine| {
        engine.dedup_within_folder(&args.folder)
    })
    .with_context(|| format!("Failed to scan {}", args.folder.display()))
}

fn run_across(cli: &Cli, args: &AcrossArgs) -> Result<ExitCode> {
    run_dedup(cli, &args.scan, &args.delete, |engine| {
        engine.dedup_across_folders(&args.folders)
    })
}

fn run_merge(cli: &Cli, args: &MergeArgs) -> Result<ExitCode> {
    let mut config = load_config(cli, &args.scan)?;
    if let Some(prefix) = &args.prefix {
        config.output_prefix.clone_from(prefix);
    }
    config.validate()?;

    let progress = progress_for(cli, args.scan.format);
    let engine = build_engine(&config, progress.clone())?;
    let report = engine
        .copy_uniques(&args.source, &args.existing, &args.output)
        .with_context(|| format!("Failed to merge {} into {}", args.source.display(), args.output.display()))?;

    // Only source files already present in `existing` are candidates.
    let permanent = args.delete.permanent || config.permanent_delete;
    let deletion = if args.delete.delete {
        run_deletion(&report.pairs, permanent, args.delete.yes, progress.as_deref())?
    } else {
        None
    };

    let delete_failed = deletion.as_ref().is_some_and(|d| !d.all_succeeded());
    let problems = !report.warnings.is_empty() || !report.copy_failures.is_empty() || delete_failed;
    let exit_code = ExitCode::for_outcome(true, problems);
    render_copy(&report, deletion.as_ref(), permanent, args.scan.format, exit_code)?;
    Ok(exit_code)
}

fn run_dedup<F>(cli: &Cli, scan: &ScanOptions, delete: &DeleteOptions, mode: F) -> Result<ExitCode>
where
    F: FnOnce(&DedupEngine) -> Result<DedupReport, FinderError>,
{
    let config = load_config(cli, scan)?;
    let progress = progress_for(cli, scan.format);
    let engine = build_engine(&config, progress.clone())?;
    let report = mode(&engine)?;

    let permanent = delete.permanent || config.permanent_delete;
    let deletion = if delete.delete {
        run_deletion(&report.pairs, permanent, delete.yes, progress.as_deref())?
    } else {
        None
    };

    let delete_failed = deletion.as_ref().is_some_and(|d| !d.all_succeeded());
    let exit_code = ExitCode::for_outcome(!report.pairs.is_empty(), !report.warnings.is_empty() || delete_failed);
    render_dedup(&report, deletion.as_ref(), permanent, scan.format, exit_code)?;
    Ok(exit_code)
}

fn load_config(cli: &Cli, scan: &ScanOptions) -> Result<Config> {
    let mut config = Config::load_from(cli.config.as_deref())?;
    scan.apply_to(&mut config);
    config.validate()?;
    log::debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn progress_for(cli: &Cli, format: OutputFormat) -> Option<Arc<Progress>> {
    if cli.quiet || format.is_machine_readable() {
        None
    } else {
        Some(Arc::new(Progress::new(false)))
    }
}

fn build_engine(config: &Config, progress: Option<Arc<Progress>>) -> Result<DedupEngine> {
    let handler = install_handler()?;
    let mut engine_config = config.engine_config().with_shutdown_flag(handler.get_flag());
    if let Some(progress) = progress {
        engine_config = engine_config.with_progress_callback(progress);
    }
    Ok(DedupEngine::new(engine_config))
}

/// Delete the duplicate side of `pairs`, asking first unless `assume_yes`.
///
/// A declined prompt is not an error: nothing is deleted and `None` is
/// returned.
fn run_deletion(
    pairs: &[DuplicatePair],
    permanent: bool,
    assume_yes: bool,
    progress: Option<&Progress>,
) -> Result<Option<BatchDeleteResult>> {
    let config = if permanent {
        DeleteConfig::permanent()
    } else {
        DeleteConfig::trash()
    };

    let gate = |plan: &DeletionPlan| assume_yes || prompt_delete(plan, permanent);
    match delete_duplicates(pairs, &config, &gate, progress) {
        Ok(result) => Ok(Some(result)),
        Err(DeleteError::NotConfirmed { count }) => {
            eprintln!("Deletion cancelled, {count} file(s) kept");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn prompt_delete(plan: &DeletionPlan, permanent: bool) -> bool {
    let action = if permanent {
        "Permanently delete"
    } else {
        "Move to trash"
    };
    let prompt = format!("{action} {} duplicate file(s) ({})?", plan.len(), ByteSize(plan.bytes));
    match Confirm::new().with_prompt(prompt).default(false).interact() {
        Ok(answer) => answer,
        Err(e) => {
            log::warn!("Cannot prompt for confirmation: {}", e);
            false
        }
    }
}

fn render_dedup(
    report: &DedupReport,
    deletion: Option<&BatchDeleteResult>,
    permanent: bool,
    format: OutputFormat,
    exit_code: ExitCode,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            let mut text = TextOutput::from_dedup(report);
            if let Some(result) = deletion {
                text = text.with_deletion(result);
            }
            text.write_to(&mut out)?;
        }
        OutputFormat::Json => {
            let mut json = JsonOutput::from_dedup(report, exit_code);
            if let Some(result) = deletion {
                json = json.with_deletion(result, permanent);
            }
            json.write_to(&mut out, true)?;
        }
        OutputFormat::Csv => CsvOutput::new(&report.pairs).write_to(&mut out)?,
    }
    out.flush()?;
    Ok(())
}

fn render_copy(
    report: &CopyReport,
    deletion: Option<&BatchDeleteResult>,
    permanent: bool,
    format: OutputFormat,
    exit_code: ExitCode,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            let mut text = TextOutput::from_copy(report);
            if let Some(result) = deletion {
                text = text.with_deletion(result);
            }
            text.write_to(&mut out)?;
        }
        OutputFormat::Json => {
            let mut json = JsonOutput::from_copy(report, exit_code);
            if let Some(result) = deletion {
                json = json.with_deletion(result, permanent);
            }
            json.write_to(&mut out, true)?;
        }
        OutputFormat::Csv => CsvOutput::new(&report.pairs).write_to(&mut out)?,
    }
    out.flush()?;
    Ok(())
}
