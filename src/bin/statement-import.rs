//! statement-import - Read problem statements from markdown
//!
//! Usage:
//!   statement-import -f description.md -t "A+B Problem" -o statement.json
//!   statement-import -f description.md --base current.json -o statement.json
//!   statement-import -d ./statements -o ./json --report report.json --report-format json
//!   cat description.md | statement-import > statement.json

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser as ClapParser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

use judge_statement::config::{ReportFormat, StatementConfig};
use judge_statement::form::{apply_import, FormState};
use judge_statement::importer::{ImportOptions, ImportReport, MarkdownImporter, Outcome};
use judge_statement::logging::init_logger;
use judge_statement::statement::ProblemStatement;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportFormatArg {
    /// JSON format
    Json,
    /// Human-readable text
    Text,
}

#[derive(ClapParser)]
#[command(
    version,
    about = "Import a problem statement from markdown",
    long_about = "Parses a markdown problem statement into the judge's JSON description.\n\n\
                  A document with errors is rejected as a whole and nothing is written.\n\
                  Warnings are reported, but the statement is still written.\n\n\
                  If no input file is specified, reads from stdin.\n\
                  If no output file is specified, writes to stdout."
)]
struct Cli {
    /// Input markdown file (reads from stdin if not specified)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output JSON file, or directory in batch mode (stdout if not specified)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Expected problem title
    #[arg(short, long)]
    title: Option<String>,

    /// Current statement JSON the imported fields are applied onto
    #[arg(long, value_name = "JSON")]
    base: Option<PathBuf>,

    /// Batch import directory
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// File pattern for batch import
    #[arg(long, default_value = "*.md")]
    pattern: String,

    /// Write the import report to a file
    #[arg(long, value_name = "REPORT_FILE")]
    report: Option<PathBuf>,

    /// Report format (overrides the config file)
    #[arg(long, value_enum)]
    report_format: Option<ReportFormatArg>,

    /// Config file (default: ./judge-statement.toml if present)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// debug log file
    #[arg(long, value_name = "FILE")]
    debuglogfile: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity<InfoLevel>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logger(args.verbose.log_level_filter(), args.debuglogfile.as_deref())?;

    let config = StatementConfig::load(args.config.as_deref())?;
    let title = args.title.clone().or_else(|| config.title.clone());
    let report_format = match args.report_format {
        Some(ReportFormatArg::Json) => ReportFormat::Json,
        Some(ReportFormatArg::Text) => ReportFormat::Text,
        None => config.report_format,
    };

    let mut options = ImportOptions::new();
    if let Some(title) = &title {
        options = options.with_title(title);
    }
    let importer = MarkdownImporter::new(options);

    let base = match &args.base {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            ProblemStatement::from_json(&json)?
        }
        None => ProblemStatement::default(),
    };

    if let Some(dir) = &args.directory {
        return batch_import(&importer, dir, &base, &args, report_format);
    }

    let (input_content, input_name) = match &args.file {
        Some(path) => (
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            path.display().to_string(),
        ),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            (buffer, "stdin".to_string())
        }
    };

    let start_time = Instant::now();
    let result = importer.import(&input_content);
    let mut report = ImportReport::new(&input_name, title.as_deref(), result.diagnostics.clone());
    report.duration_ms = start_time.elapsed().as_millis() as u64;

    eprint!("{}", report.to_text());
    if let Some(report_path) = &args.report {
        write_report(&report, report_path, report_format)?;
        eprintln!("✓ Report written to {}", report_path.display());
    }

    let mut form = FormState::new(base);
    if apply_import(&result, &mut form) == Outcome::Failed {
        std::process::exit(1);
    }
    let json = form.into_statement().to_json()?;

    match &args.output {
        Some(path) => {
            let mut writer = BufWriter::new(
                fs::File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?,
            );
            writeln!(writer, "{}", json)?;
            writer.flush()?;
            eprintln!("✓ Imported {} to {}", input_name, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn batch_import(
    importer: &MarkdownImporter,
    dir: &Path,
    base: &ProblemStatement,
    args: &Cli,
    report_format: ReportFormat,
) -> anyhow::Result<()> {
    let Some(output_dir) = args.output.as_ref() else {
        bail!("Output directory required for batch import");
    };
    fs::create_dir_all(output_dir)?;

    let start_time = Instant::now();
    let mut failed = 0;
    let mut with_warnings = 0;
    let mut reports = Vec::new();

    let pattern = format!("{}/{}", dir.display(), args.pattern);
    let entries: Vec<_> = glob::glob(&pattern)
        .with_context(|| format!("Invalid pattern: {}", pattern))?
        .filter_map(|e| e.ok())
        .collect();

    for entry in &entries {
        let output_path = output_dir.join(
            entry
                .strip_prefix(dir)
                .unwrap_or(entry.as_path())
                .with_extension("json"),
        );
        log::debug!("Importing {} -> {}", entry.display(), output_path.display());

        let input_content = match fs::read_to_string(entry) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to read {}: {}", entry.display(), e);
                failed += 1;
                continue;
            }
        };

        let file_start = Instant::now();
        let result = importer.import(&input_content);
        let mut report = ImportReport::new(
            &entry.display().to_string(),
            importer.options().title.as_deref(),
            result.diagnostics.clone(),
        );
        report.duration_ms = file_start.elapsed().as_millis() as u64;

        let mut form = FormState::new(base.clone());
        match apply_import(&result, &mut form) {
            Outcome::Failed => {
                eprintln!("✗ {}", entry.display());
                for diagnostic in result.diagnostics.iter() {
                    eprintln!("  {} {}", diagnostic.severity.icon(), diagnostic);
                }
                failed += 1;
            }
            outcome => {
                if outcome == Outcome::PartialSuccess {
                    with_warnings += 1;
                }
                if let Some(parent) = output_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&output_path, form.into_statement().to_json()?)
                    .with_context(|| format!("Failed to write {}", output_path.display()))?;
                eprintln!("{} {}", if outcome == Outcome::Success { "✓" } else { "⚠" }, entry.display());
            }
        }
        reports.push(report);
    }

    eprintln!("\nBatch Import Summary");
    eprintln!("====================");
    eprintln!("Files processed: {}", entries.len());
    eprintln!("Failed:          {}", failed);
    eprintln!("With warnings:   {}", with_warnings);
    eprintln!("Duration:        {:?}", start_time.elapsed());

    if let Some(report_path) = &args.report {
        let content = match report_format {
            ReportFormat::Json => serde_json::to_string_pretty(&reports)?,
            ReportFormat::Text => reports
                .iter()
                .map(ImportReport::to_text)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        fs::write(report_path, content)?;
        eprintln!("✓ Report written to {}", report_path.display());
    }

    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn write_report(report: &ImportReport, path: &Path, format: ReportFormat) -> anyhow::Result<()> {
    let content = match format {
        ReportFormat::Json => report.to_json()?,
        ReportFormat::Text => report.to_text(),
    };
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
