//! CLI tool for resolving quarterly-report form data into a slide plan.

use anyhow::{bail, Context, Result};
use clap::Parser;
use slideplan_core::{FormData, OutlineFormatter, ResolverOptions, SlidePlanResolver, Template};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Resolve a report template and its form data into an ordered slide plan.
#[derive(Parser, Debug)]
#[command(name = "slideplan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report template (JSON)
    #[arg(short, long)]
    template: PathBuf,

    /// Form data captured against the template (JSON)
    #[arg(short, long)]
    data: PathBuf,

    /// Output file (default: print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Write a plain-text outline instead of JSON
    #[arg(long)]
    outline: bool,

    /// Fail when the template has structural problems
    #[arg(long)]
    strict: bool,

    /// Resolver options file (JSON); flags below override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// Images per photo-grid slide
    #[arg(long)]
    photos_per_page: Option<usize>,

    /// Largest number of chart points still drawn as a pie
    #[arg(long)]
    pie_max_points: Option<usize>,

    /// Title slide pattern, e.g. "{{title}} - {{quarter}}"
    #[arg(long)]
    title_pattern: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let template = Template::from_json_str(&read_input(&args.template)?)
        .with_context(|| format!("Failed to parse template {}", args.template.display()))?;
    let data = FormData::from_json_str(&read_input(&args.data)?)
        .with_context(|| format!("Failed to parse form data {}", args.data.display()))?;

    if args.strict {
        if let Err(e) = template.validate() {
            bail!("{}: {}", args.template.display(), e);
        }
    }

    let options = load_options(&args)?;
    log::debug!("Resolver options: {:?}", options);

    let plan = SlidePlanResolver::with_options(&options).resolve(&template, &data);

    if args.verbose {
        eprintln!("Resolved {} slides", plan.len());
    }

    let output = if args.outline {
        OutlineFormatter::new()
            .with_prompts(args.verbose)
            .format_with_newline(&plan)
    } else if args.pretty {
        format!("{}\n", serde_json::to_string_pretty(&plan)?)
    } else {
        format!("{}\n", serde_json::to_string(&plan)?)
    };

    match &args.output {
        Some(path) => {
            write_output(path, &output)?;
            if args.verbose {
                eprintln!("Written to: {}", path.display());
            }
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Build resolver options from the options file, then apply flag overrides.
fn load_options(args: &Args) -> Result<ResolverOptions> {
    let mut options = match &args.options {
        Some(path) => serde_json::from_str(&read_input(path)?)
            .with_context(|| format!("Failed to parse options {}", path.display()))?,
        None => ResolverOptions::default(),
    };

    if let Some(photos) = args.photos_per_page {
        options.photos_per_page = photos;
    }
    if let Some(points) = args.pie_max_points {
        options.pie_max_points = points;
    }
    if let Some(pattern) = &args.title_pattern {
        options.title_pattern = pattern.clone();
    }

    Ok(options)
}

/// Read an input file to a string.
fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write output to a file, creating parent directories as needed.
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
