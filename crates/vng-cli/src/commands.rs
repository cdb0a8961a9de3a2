use std::io::Write;
use std::path::{Path, PathBuf};

use vng_analysis::interpret::{
    INTERPRETATION_SYSTEM_PROMPT, InterpretationSummary, build_interpretation_prompt,
};
use vng_core::models::analysis::AnalysisResults;
use vng_export::render::{ReportMeta, render_markdown};

use crate::cli::{Cli, Command, ConfigAction, OutputFormat};
use crate::config::{self, CliConfig};
use crate::files::{self, LoadedReports};

/// Execute a parsed command line, writing command output to `out`.
pub fn run(cli: &Cli, out: &mut dyn Write) -> eyre::Result<()> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };

    match &cli.command {
        Command::Parse { files } => {
            let config = effective_config(cli, &config_path)?;
            let loaded = load(files, &config)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&loaded.files)?)?;
        }
        Command::Analyze {
            files,
            format,
            title,
            interpretation,
        } => {
            let config = effective_config(cli, &config_path)?;
            let results = analyze(files, &config)?;
            match format {
                OutputFormat::Json => {
                    writeln!(out, "{}", serde_json::to_string_pretty(&results)?)?;
                }
                OutputFormat::Markdown => {
                    let meta = report_meta(title.as_deref(), interpretation.as_deref())?;
                    write!(out, "{}", render_markdown(&results, &meta)?)?;
                }
                OutputFormat::Summary => write_summary(&results, out)?,
            }
        }
        Command::Interpret { files, prompt } => {
            let config = effective_config(cli, &config_path)?;
            let results = analyze(files, &config)?;
            let summary = InterpretationSummary::from_results(&results);
            if *prompt {
                writeln!(out, "{INTERPRETATION_SYSTEM_PROMPT}\n")?;
                write!(out, "{}", build_interpretation_prompt(&summary))?;
            } else {
                writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
            }
        }
        Command::Config { action } => match action {
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    return Err(eyre::eyre!(
                        "config already exists at {}; pass --force to overwrite",
                        config_path.display()
                    ));
                }
                let config = CliConfig {
                    created_at: Some(jiff::Timestamp::now()),
                    ..CliConfig::default()
                };
                config::save_config(&config, &config_path)?;
                writeln!(out, "wrote {}", config_path.display())?;
            }
            ConfigAction::Show => {
                let config = effective_config(cli, &config_path)?;
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            }
        },
    }

    Ok(())
}

/// The config file merged with command-line overrides.
fn effective_config(cli: &Cli, path: &Path) -> eyre::Result<CliConfig> {
    let mut config = config::load_or_default(path)?;
    if let Some(max_files) = cli.max_files {
        config.analysis.max_files = max_files;
    }
    config.validate()?;
    Ok(config)
}

fn load(paths: &[PathBuf], config: &CliConfig) -> eyre::Result<LoadedReports> {
    let loaded = files::load_reports(paths, config);
    for rejected in &loaded.rejected {
        eprintln!("skipped {}: {}", rejected.path.display(), rejected.error);
    }
    if loaded.files.is_empty() {
        return Err(eyre::eyre!("none of the {} file(s) could be used", paths.len()));
    }
    Ok(loaded)
}

fn analyze(paths: &[PathBuf], config: &CliConfig) -> eyre::Result<AnalysisResults> {
    let loaded = load(paths, config)?;
    Ok(vng_analysis::analyze_with(&loaded.files, &config.analysis)?)
}

fn report_meta(title: Option<&str>, interpretation: Option<&Path>) -> eyre::Result<ReportMeta> {
    let interpretation = match interpretation {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|e| {
            eyre::eyre!("failed to read interpretation at {}: {e}", path.display())
        })?),
        None => None,
    };

    let defaults = ReportMeta::default();
    Ok(ReportMeta {
        title: title.map(str::to_string).unwrap_or(defaults.title),
        generated_at: Some(jiff::Timestamp::now().to_string()),
        interpretation,
    })
}

fn write_summary(results: &AnalysisResults, out: &mut dyn Write) -> eyre::Result<()> {
    let s = &results.summary;
    writeln!(
        out,
        "Analyzed {} metrics across {} files ({} present in every file).",
        s.total_metrics, s.total_files, s.metrics_in_all_files
    )?;
    writeln!(
        out,
        "{} flagged, {} significant changes.",
        s.total_flagged, s.total_significant_changes
    )?;
    for result in &results.results {
        writeln!(
            out,
            "  {}: {} metrics, {} with data, {} flagged",
            result.category,
            result.metrics.len(),
            result.metrics_with_data,
            result.flagged_count
        )?;
    }
    Ok(())
}
