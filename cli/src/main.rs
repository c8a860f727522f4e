//! unoffice CLI - Office and HWPX element streams to Markdown, text, and JSON

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unoffice::render::ExtractionStats;
use unoffice::{
    build_document, BuildOptions, CleanupPreset, ConvertOptions, ConverterRegistry, Document,
    JsonFormat, OutputFormat, RenderOptions, SectionSelection, SourceDocument, TableOptions,
};

#[derive(Parser)]
#[command(name = "unoffice")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Render Office and HWPX element streams to Markdown, text, and JSON", long_about = None)]
struct Cli {
    /// Input element-stream file (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Text cleanup preset
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert to all formats (Markdown, text, JSON)
    Convert {
        /// Input element-stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Convert to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input element-stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Render speaker notes after each slide
        #[arg(long)]
        notes: bool,

        /// Omit the outer pipes of table rows
        #[arg(long)]
        no_borders: bool,

        /// Keep cell fill colors as HTML comments
        #[arg(long)]
        colors: bool,

        /// Prefix prepended to image paths
        #[arg(long, default_value = "")]
        image_prefix: String,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Section range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        sections: Option<String>,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Convert to plain text
    Text {
        /// Input element-stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Text cleanup preset
        #[arg(long, value_enum)]
        cleanup: Option<CleanupLevel>,

        /// Section range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        sections: Option<String>,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Convert to the JSON document model
    Json {
        /// Input element-stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        build: BuildArgs,
    },

    /// Show document information
    Info {
        /// Input element-stream file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Options shared by every command that builds a document.
#[derive(Args, Clone, Copy, Default)]
struct BuildArgs {
    /// Vertical tolerance for grouping slide shapes into rows
    #[arg(long, value_name = "UNITS")]
    row_tolerance: Option<i64>,

    /// Fail when a slide cannot be laid out by position
    #[arg(long)]
    strict: bool,

    /// Include hidden worksheets
    #[arg(long)]
    hidden_sheets: bool,
}

impl From<BuildArgs> for BuildOptions {
    fn from(args: BuildArgs) -> Self {
        let mut options = BuildOptions::new().with_hidden_sheets(args.hidden_sheets);
        if let Some(tolerance) = args.row_tolerance {
            options = options.with_row_tolerance(tolerance);
        }
        if args.strict {
            options = options.strict();
        }
        options
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (default)
    Standard,
    /// Aggressive cleanup (private-use glyphs and bullets too)
    Aggressive,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
            CleanupLevel::Aggressive => CleanupPreset::Aggressive,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            cleanup,
            build,
        }) => cmd_convert(&input, output.as_deref(), cleanup, build),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            notes,
            no_borders,
            colors,
            image_prefix,
            cleanup,
            max_heading,
            sections,
            build,
        }) => {
            let table = TableOptions::new()
                .with_borders(!no_borders)
                .with_colors(colors);
            let render_options = RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_notes(notes)
                .with_table_options(table)
                .with_image_prefix(image_prefix)
                .with_max_heading(max_heading);
            cmd_markdown(
                &input,
                output.as_deref(),
                render_options,
                cleanup,
                sections.as_deref(),
                build,
            )
        }
        Some(Commands::Text {
            input,
            output,
            cleanup,
            sections,
            build,
        }) => cmd_text(&input, output.as_deref(), cleanup, sections.as_deref(), build),
        Some(Commands::Json {
            input,
            output,
            compact,
            build,
        }) => cmd_json(&input, output.as_deref(), compact, build),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), cli.cleanup, BuildArgs::default())
            } else {
                println!("{}", "Usage: unoffice <FILE> [OUTPUT]".yellow());
                println!("       unoffice --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load(input: &Path, build: BuildArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let source = SourceDocument::from_path(input)?;
    log::debug!("{}: {} element stream", input.display(), source.format());
    Ok(build_document(&source, &build.into())?)
}

fn parse_sections(sections: Option<&str>) -> Result<SectionSelection, Box<dyn std::error::Error>> {
    match sections {
        Some(s) => Ok(SectionSelection::parse(s)?),
        None => Ok(SectionSelection::All),
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
    build: BuildArgs,
) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading element stream...");
    let source = SourceDocument::from_path(input)?;
    let registry = ConverterRegistry::with_defaults();
    pb.inc(1);

    let mut render_options = RenderOptions::new().with_frontmatter(true);
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }
    let base = ConvertOptions::new()
        .with_render_options(render_options)
        .with_build_options(build.into());

    let outputs = [
        (OutputFormat::Markdown, "extract", "Generating Markdown..."),
        (OutputFormat::Text, "extract", "Generating text..."),
        (OutputFormat::Json, "content", "Generating JSON..."),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (format, stem, message) in outputs {
        pb.set_message(message);
        let result = registry.convert_source(&source, &base.clone().with_format(format))?;
        let name = format!("{}.{}", stem, format.extension());
        fs::write(output_dir.join(&name), &result.content)?;
        written.push(name);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    render_options: RenderOptions,
    cleanup: Option<CleanupLevel>,
    sections: Option<&str>,
    build: BuildArgs,
) -> CliResult {
    let selection = parse_sections(sections)?;
    let doc = load(input, build)?;

    let mut render_options = render_options.with_sections(selection);
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    let markdown = unoffice::render::to_markdown(&doc, &render_options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    cleanup: Option<CleanupLevel>,
    sections: Option<&str>,
    build: BuildArgs,
) -> CliResult {
    let selection = parse_sections(sections)?;
    let doc = load(input, build)?;

    let mut render_options = RenderOptions::new().with_sections(selection);
    if let Some(level) = cleanup {
        render_options = render_options.with_cleanup_preset(level.into());
    }

    let text = unoffice::render::to_text(&doc, &render_options)?;
    write_or_print(output, &text)
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, build: BuildArgs) -> CliResult {
    let doc = load(input, build)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unoffice::render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_info(input: &Path) -> CliResult {
    let source = SourceDocument::from_path(input)?;
    let doc = build_document(&source, &BuildOptions::default())?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), doc.metadata.format);
    println!("{}: {}", "Sections".bold(), doc.section_count());
    println!("{}: {}", "Media files".bold(), source.images.len());

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = doc.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = doc.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = doc.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = ExtractionStats::from_document(&doc);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Charts".bold(), stats.chart_count);
    println!("{}: {}", "Images".bold(), stats.image_count);
    if stats.unresolved_image_count > 0 {
        println!(
            "{}: {}",
            "Unresolved images".bold(),
            stats.unresolved_image_count.to_string().yellow()
        );
    }
    if stats.column_row_count > 0 {
        println!("{}: {}", "Multi-column rows".bold(), stats.column_row_count);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unoffice".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Office and HWPX document to Markdown renderer");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unoffice".dimmed());
    println!("License: MIT");
}
