//! CLI tool for summarizing PDF and text documents.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use digest_core::{
    DocumentAnalyzer, DocumentSummaryPipeline, ExternalSignals, PipelineConfig, SummaryResult,
    SummaryStrategy,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Summarize documents and list their key points.
#[derive(Parser, Debug)]
#[command(name = "doc-digest")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input document(s) (.pdf, .txt or .md)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit JSON instead of text
    #[arg(short, long)]
    json: bool,

    /// JSON file with entity and category signals from an analysis service
    #[arg(short, long)]
    signals: Option<PathBuf>,

    /// JSON pipeline configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Summary strategy when no signals are available
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Character budget for the budget strategy (default: 500)
    #[arg(short, long)]
    budget: Option<usize>,

    /// Sentence count for the positional strategy (default: 3)
    #[arg(long)]
    sentences: Option<usize>,

    /// Maximum number of key points without signals (default: 5)
    #[arg(short = 'k', long)]
    max_points: Option<usize>,

    /// Fold ligatures and compatibility characters before summarizing
    #[arg(long)]
    fold_unicode: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Leading sentences within a character budget
    Budget,
    /// First, last and evenly spaced sentences
    Positional,
}

/// Analyzer backed by a signals JSON file produced elsewhere.
struct SignalsFile {
    path: PathBuf,
}

impl DocumentAnalyzer for SignalsFile {
    fn analyze(&self, _text: &str) -> digest_core::Result<ExternalSignals> {
        let json = std::fs::read_to_string(&self.path)?;
        ExternalSignals::from_json_str(&json)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let config = build_config(&args)?;
    let pipeline = DocumentSummaryPipeline::with_config(config)
        .context("Invalid pipeline configuration")?;
    let analyzer = args.signals.clone().map(|path| SignalsFile { path });

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &pipeline, analyzer.as_ref()) {
            Ok(result) => {
                let rendered = if args.json {
                    render_json(&result)?
                } else {
                    render_text(&result)
                };

                match &args.output {
                    Some(dir) => {
                        let output_path = get_output_path(input_path, dir, args.json)?;
                        write_output(&output_path, &rendered)?;
                        if args.verbose {
                            eprintln!("Written to: {}", output_path.display());
                        }
                    }
                    None => print!("{}", rendered),
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Load the configuration file (if any) and apply flag overrides.
fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            PipelineConfig::from_json_str(&json)
                .with_context(|| format!("Failed to parse config {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    config.heuristic_strategy = apply_strategy_overrides(
        config.heuristic_strategy,
        args.strategy,
        args.budget,
        args.sentences,
    );
    if let Some(max_points) = args.max_points {
        config.heuristic_max_points = max_points;
    }
    if args.fold_unicode {
        config.fold_unicode = true;
    }

    Ok(config)
}

fn apply_strategy_overrides(
    current: SummaryStrategy,
    strategy: Option<StrategyArg>,
    budget: Option<usize>,
    sentences: Option<usize>,
) -> SummaryStrategy {
    let kind = strategy.unwrap_or(match current {
        SummaryStrategy::Budget { .. } => StrategyArg::Budget,
        SummaryStrategy::Positional { .. } => StrategyArg::Positional,
    });

    match (kind, current) {
        (StrategyArg::Budget, SummaryStrategy::Budget { max_chars }) => SummaryStrategy::Budget {
            max_chars: budget.unwrap_or(max_chars),
        },
        (StrategyArg::Budget, _) => SummaryStrategy::Budget {
            max_chars: budget.unwrap_or(digest_core::summarize::DEFAULT_BUDGET_CHARS),
        },
        (StrategyArg::Positional, SummaryStrategy::Positional { sentences: n }) => {
            SummaryStrategy::Positional {
                sentences: sentences.unwrap_or(n),
            }
        }
        (StrategyArg::Positional, _) => SummaryStrategy::Positional {
            sentences: sentences.unwrap_or(digest_core::summarize::DEFAULT_SUMMARY_SENTENCES),
        },
    }
}

/// Extract and summarize a single document.
fn process_file(
    input_path: &Path,
    pipeline: &DocumentSummaryPipeline,
    analyzer: Option<&SignalsFile>,
) -> Result<SummaryResult> {
    let raw = digest_pdf::extract_file(input_path);
    log::debug!(
        "Extracted {} characters from {}",
        raw.char_len(),
        input_path.display()
    );

    let result = match analyzer {
        Some(analyzer) => pipeline.process_with_analyzer(&raw, analyzer),
        None => pipeline.process(&raw, None),
    }
    .with_context(|| format!("Failed to summarize {}", input_path.display()))?;

    Ok(result)
}

/// Render a result as a plain-text report.
fn render_text(result: &SummaryResult) -> String {
    let mut out = String::from("--- SUMMARY ---\n");
    out.push_str(&result.summary);
    out.push_str("\n\n--- KEY POINTS ---\n");
    for (i, point) in result.key_points.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, point));
    }
    out
}

/// Render a result as pretty-printed JSON with a trailing newline.
fn render_json(result: &SummaryResult) -> Result<String> {
    let json = serde_json::to_string_pretty(result).context("Failed to serialize result")?;
    Ok(format!("{}\n", json))
}

/// Determine the output path for a processed file.
fn get_output_path(input_path: &Path, output_dir: &Path, json: bool) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    let extension = if json { "json" } else { "txt" };

    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    Ok(output_dir.join(format!("{}.summary.{}", stem, extension)))
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
