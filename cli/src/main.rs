//! unpdf-layout CLI - text and paragraph reconstruction from page dumps

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unpdf_layout::text::normalize_runs;
use unpdf_layout::{
    analyze_document, load_document_file, DocumentInput, DocumentLayout, JsonFormat,
    LayoutAnalyzer, LayoutOptions, ProfileRegistry,
};

#[derive(Parser)]
#[command(name = "unpdf-layout")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Reconstruct words, lines and paragraphs from PDF glyph-run dumps", long_about = None)]
struct Cli {
    /// Input page dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Analysis settings shared by every command.
#[derive(Args, Clone)]
struct LayoutArgs {
    /// Text pipeline: legacy, rules or smart
    #[arg(long, global = true, env = "UNPDF_LAYOUT_PIPELINE", default_value = "rules")]
    pipeline: String,

    /// Classifier profile name
    #[arg(long, global = true, env = "UNPDF_LAYOUT_PROFILE", default_value = "auto-default")]
    profile: String,

    /// JSON file with extra classifier profiles
    #[arg(long, global = true, value_name = "FILE")]
    profiles_file: Option<PathBuf>,

    /// Split merged words with the dictionary (smart pipeline only)
    #[arg(long, global = true)]
    fix_merged_words: bool,

    /// Analyze pages one at a time
    #[arg(long, global = true)]
    sequential: bool,
}

impl LayoutArgs {
    fn options(&self) -> Result<LayoutOptions, Box<dyn std::error::Error>> {
        let mut options = LayoutOptions::new()
            .with_pipeline_name(&self.pipeline)
            .with_profile(self.profile.as_str())
            .with_fix_merged_words(self.fix_merged_words)
            .with_parallel(!self.sequential);
        if let Some(registry) = self.registry()? {
            options = options.with_registry(registry);
        }
        Ok(options)
    }

    fn registry(&self) -> Result<Option<Arc<ProfileRegistry>>, Box<dyn std::error::Error>> {
        match &self.profiles_file {
            Some(path) => {
                let json = fs::read_to_string(path)?;
                Ok(Some(Arc::new(ProfileRegistry::from_json(&json)?)))
            }
            None => Ok(None),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct plain text
    Text {
        /// Input page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Only this page (1-indexed)
        #[arg(long)]
        page: Option<u32>,
    },

    /// Write the full layout as JSON
    Json {
        /// Input page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the word-boundary decisions for one line
    Explain {
        /// Input page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-indexed)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Line number on the page (1-indexed, top to bottom)
        #[arg(long, default_value = "1")]
        line: usize,
    },

    /// Show layout statistics
    Info {
        /// Input page dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List classifier profiles
    Profiles,

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let layout = cli.layout;

    let result = match cli.command {
        Some(Commands::Text {
            input,
            output,
            page,
        }) => cmd_text(&input, output.as_deref(), page, &layout),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact, &layout),
        Some(Commands::Explain { input, page, line }) => cmd_explain(&input, page, line, &layout),
        Some(Commands::Info { input }) => cmd_info(&input, &layout),
        Some(Commands::Profiles) => cmd_profiles(&layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: text to stdout if input is provided
            if let Some(input) = cli.input {
                cmd_text(&input, None, None, &layout)
            } else {
                println!("{}", "Usage: unpdf-layout <FILE>".yellow());
                println!("       unpdf-layout --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load and analyze a dump, with a progress bar for multi-page input.
fn analyze(
    input: &Path,
    layout: &LayoutArgs,
) -> Result<(DocumentInput, DocumentLayout), Box<dyn std::error::Error>> {
    let options = layout.options()?;

    let pb = ProgressBar::new(2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading pages...");
    let doc = load_document_file(input)?;
    log::debug!("Loaded {} pages from {}", doc.page_count(), input.display());
    if doc.page_count() < 2 {
        pb.set_draw_target(indicatif::ProgressDrawTarget::hidden());
    }
    pb.inc(1);

    pb.set_message(format!("Analyzing {} pages...", doc.page_count()));
    let result = analyze_document(&doc, &options);
    pb.inc(1);
    pb.finish_and_clear();

    Ok((doc, result))
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    page: Option<u32>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match page {
        Some(number) => {
            let doc = load_document_file(input)?;
            let analyzer = LayoutAnalyzer::new(layout.options()?);
            unpdf_layout::to_text(&analyzer.analyze(doc.page(number)?))
        }
        None => {
            let (_, result) = analyze(input, layout)?;
            unpdf_layout::document_to_text(&result)
        }
    };
    write_output(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let (_, result) = analyze(input, layout)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = unpdf_layout::to_json(&result, format)?;
    write_output(output, &json)
}

fn cmd_explain(
    input: &Path,
    page: u32,
    line: usize,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_document_file(input)?;
    let analyzer = LayoutAnalyzer::new(layout.options()?);
    let lines = analyzer.lines(doc.page(page)?);
    let target = line
        .checked_sub(1)
        .and_then(|i| lines.get(i))
        .ok_or_else(|| format!("Line {} is out of range (page has {} lines)", line, lines.len()))?;

    let pipeline = analyzer.pipeline();
    let glyphs = normalize_runs(&target.items);
    let decisions = pipeline.decisions(&glyphs);

    println!("{}", "Line".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Text".bold(), target.text);
    println!("{}: {}", "Pipeline".bold(), pipeline.kind());
    println!("{}: {}", "Profile".bold(), pipeline.profile().name);
    println!("{}: {}", "Glyphs".bold(), glyphs.len());

    println!();
    println!("{}", "Boundaries".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (pair, decision) in glyphs.windows(2).zip(&decisions) {
        let kind = if decision.is_space() {
            "space".green()
        } else {
            "join".yellow()
        };
        println!(
            "{:>12} | {:<12} {:<6} {:.2}  gap {:>6.2} ({:.2} ch, threshold {:.2})  {:?}",
            pair[0].text,
            pair[1].text,
            kind,
            decision.confidence,
            decision.gap_px,
            decision.gap_by_char,
            decision.threshold_by_char,
            decision.rule
        );
    }

    Ok(())
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (doc, result) = analyze(input, layout)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Pipeline".bold(), layout.pipeline);
    println!("{}: {}", "Profile".bold(), layout.profile);

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for page in &result.pages {
        let stats = &page.stats;
        println!(
            "{} {}: {} lines, {} regions ({} flowing), {} paragraphs, {} obstacles",
            "Page".bold(),
            page.number,
            stats.line_count,
            stats.region_count,
            stats.flow_region_count,
            stats.paragraph_count,
            stats.hard_obstacle_count
        );
    }

    let text = result.plain_text();
    println!();
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    Ok(())
}

fn cmd_profiles(layout: &LayoutArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = layout.registry()?.unwrap_or_else(ProfileRegistry::builtin);

    println!("{}", "Classifier Profiles".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for profile in registry.iter() {
        let mut flags = Vec::new();
        if profile.split_lower_upper {
            flags.push("lower-upper");
        }
        if profile.split_all_caps {
            flags.push("all-caps");
        }
        if profile.split_digit_alpha {
            flags.push("digit-alpha");
        }
        if profile.join_cjk {
            flags.push("join-cjk");
        }
        if profile.script.is_rtl() {
            flags.push("rtl");
        }
        println!(
            "  {:<20} {:<11} scale {:.2}  {}",
            profile.name.bold(),
            profile.script.as_str(),
            profile.clamped_scale(),
            flags.join(", ").dimmed()
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unpdf-layout".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Text reconstruction and layout analysis for PDF glyph runs");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unpdf".dimmed());
}
