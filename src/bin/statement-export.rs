use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser as ClapParser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use judge_statement::config::StatementConfig;
use judge_statement::exporter::MarkdownExporter;
use judge_statement::logging::init_logger;
use judge_statement::statement::ProblemStatement;

#[derive(ClapParser)]
#[command(
    version,
    about = "Export a problem statement to markdown",
    long_about = "Writes the judge's JSON problem description as a single markdown document\n\
                  that statement-import reads back.\n\n\
                  If no input file is specified, reads from stdin.\n\
                  If no output file is specified, writes to the configured export file name\n\
                  (description.md by default). Use '-o -' for stdout."
)]
struct Cli {
    /// Input statement JSON (reads from stdin if not specified)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Output markdown file, '-' for stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Problem title, written as the level-1 heading
    #[arg(short, long)]
    title: Option<String>,

    /// Name unnamed examples `样例 N` when there is more than one
    #[arg(long)]
    auto_name: bool,

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
    let title = args
        .title
        .clone()
        .or_else(|| config.title.clone())
        .context("No problem title given, pass --title or set it in the config file")?;

    let json = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let mut statement = ProblemStatement::from_json(&json)?;
    if args.auto_name {
        statement.auto_name_examples();
    }

    for diagnostic in statement.check_export().iter() {
        log::warn!("{}", diagnostic);
    }

    let exporter = MarkdownExporter::new();
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export_file_name));

    if output.as_os_str() == "-" {
        let stdout = io::stdout();
        let mut writer = BufWriter::new(stdout.lock());
        exporter.format(&title, &statement, &mut writer)?;
        writer.flush()?;
    } else {
        let mut writer = BufWriter::new(
            fs::File::create(&output)
                .with_context(|| format!("Failed to create {}", output.display()))?,
        );
        exporter.format(&title, &statement, &mut writer)?;
        writer.flush()?;
        eprintln!("✓ Exported '{}' to {}", title, output.display());
    }

    Ok(())
}
