//! sosidiff CLI - buffered comparison of SOSI datasets

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use sosidiff::{
    parse_file_with_options, FilterMode, GeometryKind, JsonFormat, ParseOptions, SosiDiff,
    SvgOptions, TextEncoding, WriteOutcome, DEFAULT_BUFFER_DISTANCE,
};

#[derive(Parser)]
#[command(name = "sosidiff")]
#[command(version)]
#[command(about = "Compare SOSI datasets with buffered intersection tests", long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Keep reference records whose buffer misses every candidate buffer
    Diff {
        /// Reference SOSI file (results are drawn from here)
        #[arg(value_name = "REFERENCE")]
        reference: PathBuf,

        /// Candidate SOSI file (buffered and unioned)
        #[arg(value_name = "CANDIDATES")]
        candidates: PathBuf,

        #[command(flatten)]
        compare: CompareArgs,
    },

    /// Keep test records that miss every buffered base record
    Unique {
        /// Base SOSI file (buffered and unioned)
        #[arg(value_name = "BASE")]
        base: PathBuf,

        /// Test SOSI file (results are drawn from here)
        #[arg(value_name = "TEST")]
        test: PathBuf,

        #[command(flatten)]
        compare: CompareArgs,
    },

    /// Show dataset information
    Info {
        /// Input SOSI file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Input text encoding
        #[arg(long, value_enum, default_value = "utf8")]
        encoding: EncodingArg,
    },

    /// Draw a dataset and its buffers as SVG
    Plot {
        /// Input SOSI file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output SVG file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Buffer distance
        #[arg(short, long, env = "SOSIDIFF_BUFFER", default_value_t = DEFAULT_BUFFER_DISTANCE)]
        buffer: f64,

        /// Input text encoding
        #[arg(long, value_enum, default_value = "utf8")]
        encoding: EncodingArg,
    },
}

#[derive(Args)]
struct CompareArgs {
    /// Output SOSI file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Buffer distance, in file units
    #[arg(short, long, env = "SOSIDIFF_BUFFER", default_value_t = DEFAULT_BUFFER_DISTANCE)]
    buffer: f64,

    /// Input text encoding
    #[arg(long, value_enum, default_value = "utf8")]
    encoding: EncodingArg,

    /// Fail on malformed coordinate lines
    #[arg(long)]
    strict: bool,

    /// Compute buffers in parallel
    #[arg(long)]
    parallel: bool,

    /// Also draw the result as SVG
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Also write the result as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EncodingArg {
    /// UTF-8 (BOM tolerated)
    Utf8,
    /// ISO 8859-1
    Latin1,
    /// ISO 8859-10 (Nordic)
    #[value(name = "iso8859-10")]
    Nordic,
    /// Windows-1252
    Ansi,
    /// Use ..TEGNSETT from the file header
    Declared,
}

impl From<EncodingArg> for TextEncoding {
    fn from(arg: EncodingArg) -> Self {
        match arg {
            EncodingArg::Utf8 => TextEncoding::Utf8,
            EncodingArg::Latin1 => TextEncoding::Latin1,
            EncodingArg::Nordic => TextEncoding::nordic(),
            EncodingArg::Ansi => TextEncoding::ansi(),
            EncodingArg::Declared => TextEncoding::Declared,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Diff {
            reference,
            candidates,
            compare,
        } => cmd_compare(FilterMode::NonOverlapping, &reference, &candidates, &compare),
        Commands::Unique {
            base,
            test,
            compare,
        } => cmd_compare(FilterMode::Unique, &test, &base, &compare),
        Commands::Info { input, encoding } => cmd_info(&input, encoding),
        Commands::Plot {
            input,
            output,
            buffer,
            encoding,
        } => cmd_plot(&input, output.as_deref(), buffer, encoding),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_compare(
    mode: FilterMode,
    primary: &Path,
    other: &Path,
    args: &CompareArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let mut parse_options = ParseOptions::new().with_encoding(args.encoding.into());
    if args.strict {
        parse_options = parse_options.strict();
    }

    pb.set_message(format!("Parsing {}...", primary.display()));
    let primary_data = parse_file_with_options(primary, parse_options.clone())?;
    pb.inc(1);

    pb.set_message(format!("Parsing {}...", other.display()));
    let other_data = parse_file_with_options(other, parse_options)?;
    pb.inc(1);

    pb.set_message("Comparing buffers...");
    let result = SosiDiff::new()
        .with_mode(mode)
        .with_buffer_distance(args.buffer)
        .with_parallel(args.parallel)
        .run_datasets(primary_data, other_data)?;
    pb.inc(1);
    pb.finish_and_clear();

    println!(
        "Found {} {} geometries out of {} (buffer {}).",
        result.stats.kept.to_string().cyan().bold(),
        mode,
        result.stats.examined,
        result.stats.buffer_distance
    );

    match result.write_sosi(&args.output)? {
        WriteOutcome::Written { records } => println!(
            "{} {} records to {}",
            "Wrote".green(),
            records,
            args.output.display()
        ),
        WriteOutcome::SkippedEmpty => println!(
            "{} nothing passed the filter, {} not written",
            "Skipped:".yellow(),
            args.output.display()
        ),
    }

    if let Some(ref path) = args.svg {
        fs::write(path, result.to_svg())?;
        println!("{} {}", "Saved to".green(), path.display());
    }
    if let Some(ref path) = args.json {
        fs::write(path, result.to_json(JsonFormat::Pretty)?)?;
        println!("{} {}", "Saved to".green(), path.display());
    }

    Ok(())
}

fn cmd_info(input: &Path, encoding: EncodingArg) -> Result<(), Box<dyn std::error::Error>> {
    let format = sosidiff::detect_format_from_path(input).ok();
    let options = ParseOptions::new().with_encoding(encoding.into());
    let dataset = parse_file_with_options(input, options)?;

    println!("{}", "Dataset Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    match format {
        Some(ref f) => println!("{}: {}", "Format".bold(), f),
        None => println!("{}: {}", "Format".bold(), "no .HODE header".yellow()),
    }
    println!("{}: {}", "Records".bold(), dataset.len());
    for kind in GeometryKind::ALL {
        println!(
            "  {} {}: {}",
            "├─".dimmed(),
            kind.marker(),
            dataset.count_kind(kind)
        );
    }
    match dataset.extent {
        Some(e) => println!(
            "{}: {} {} .. {} {}",
            "Extent".bold(),
            e.min_x,
            e.min_y,
            e.max_x,
            e.max_y
        ),
        None => println!("{}: {}", "Extent".bold(), "empty".yellow()),
    }

    println!();
    println!("{}", "Parse Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Lines".bold(), dataset.stats.line_count);
    println!(
        "{}: {}",
        "Malformed coordinates".bold(),
        dataset.stats.malformed_coordinates
    );
    println!("{}: {}", "Dropped records".bold(), dataset.stats.dropped_records);
    println!("{}: {}", "Ignored groups".bold(), dataset.stats.ignored_groups);

    Ok(())
}

fn cmd_plot(
    input: &Path,
    output: Option<&Path>,
    buffer: f64,
    encoding: EncodingArg,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = ParseOptions::new().with_encoding(encoding.into());
    let dataset = parse_file_with_options(input, options)?;

    let svg_options = SvgOptions::new().with_buffer_distance(buffer);
    let svg = sosidiff::render::to_svg(&dataset, &svg_options);

    if let Some(path) = output {
        fs::write(path, &svg)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", svg);
    }

    Ok(())
}
