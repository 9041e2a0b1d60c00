//! outpdf CLI - PDF outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use outpdf::{
    process_file, render, BatchOptions, JsonFormat, OutlineConfig, OutlinePipeline,
    PdfSpanExtractor,
};

#[derive(Parser)]
#[command(name = "outpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract structured outlines from PDF documents", long_about = None)]
struct Cli {
    /// Input directory containing PDF files
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory for JSON files
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in a directory, one JSON outline per file
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(value_name = "DIR")]
        output: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Word-count cutoff above which a block is never a heading
        #[arg(long)]
        max_heading_words: Option<usize>,
    },

    /// Extract the outline of a single PDF
    File {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information without writing output
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            compact,
            max_heading_words,
        }) => cmd_batch(&input, &output, compact, max_heading_words),
        Some(Commands::File {
            input,
            output,
            compact,
        }) => cmd_file(&input, output.as_deref(), compact),
        Some(Commands::Info { input }) => cmd_info(&input),
        None => match (cli.input, cli.output) {
            (Some(input), Some(output)) => cmd_batch(&input, &output, cli.compact, None),
            (Some(input), None) if input.is_file() => cmd_file(&input, None, cli.compact),
            _ => {
                println!("{}", "Usage: outpdf <INPUT_DIR> <OUTPUT_DIR>".yellow());
                println!("       outpdf --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    compact: bool,
    max_heading_words: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = OutlineConfig::new();
    if let Some(words) = max_heading_words {
        config = config.with_max_heading_words(words);
    }
    let options = BatchOptions::new()
        .with_format(json_format(compact))
        .with_config(config);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Processing {}...", input.display()));

    let summary = outpdf::process_dir(input, output, &options)?;
    pb.finish_and_clear();

    println!("{}", "Batch complete".green().bold());
    println!(
        "  {} {}/{} files processed",
        "├─".dimmed(),
        summary.processed,
        summary.total
    );
    if summary.skipped > 0 {
        println!(
            "  {} {} skipped (see log for details)",
            "├─".dimmed(),
            summary.skipped
        );
    }
    println!("  {} output: {}", "└─".dimmed(), output.display());

    Ok(())
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = OutlinePipeline::new();
    let outline = process_file(input, &pipeline)?;
    let json = render::to_json(&outline, json_format(compact))?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = PdfSpanExtractor::open(input)?;
    let page_count = extractor.page_count();
    let spans = extractor.extract_spans()?;

    let pipeline = OutlinePipeline::new();
    let outline = pipeline.run(&spans);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), page_count);
    println!("{}: {}", "Text spans".bold(), spans.len());
    println!(
        "{}: {}",
        "Title".bold(),
        if outline.title.is_empty() {
            "(none)"
        } else {
            &outline.title
        }
    );
    println!("{}: {}", "Headings".bold(), outline.outline.len());

    for entry in outline.outline.iter().take(20) {
        println!(
            "  {} {} (p.{})",
            format!("{}", entry.level).dimmed(),
            entry.text,
            entry.page
        );
    }
    if outline.outline.len() > 20 {
        println!("  {} more...", outline.outline.len() - 20);
    }

    Ok(())
}
