use crate::config::{Config, load_config};
use crate::dataset::{check_sources, load_dataset};
use crate::ir::{Dataset, EnabledSet};
use crate::layout::{LayoutOutcome, ViewState, compute_layout};
use crate::layout_dump::{empty_reason_text, layout_dump_json, write_layout_dump};
use crate::theme::ColorScheme;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{ArgAction, Parser, ValueEnum};
use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "cfpt",
    version,
    about = "Lay out conference submission cycles on a shared timeline"
)]
pub struct Args {
    /// Dataset: a JSON file or a data directory (index.json + <id>.json)
    #[arg(short = 'i', long = "input", default_value = "data")]
    pub input: PathBuf,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file (layout constants, palettes)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Viewport width in pixels; picks the 3 or 12 month initial window
    #[arg(short = 'w', long = "viewportWidth")]
    pub viewport_width: Option<f32>,

    /// Scroll surface width in pixels (defaults to the viewport width)
    #[arg(short = 's', long = "scrollWidth")]
    pub scroll_width: Option<f32>,

    /// Reference date for the initial window and the today marker (YYYY-MM-DD)
    #[arg(long = "today")]
    pub today: Option<NaiveDate>,

    /// Use the dark palette
    #[arg(long = "dark")]
    pub dark: bool,

    /// Only lay out these conferences (short name); repeatable
    #[arg(long = "conference")]
    pub conferences: Vec<String>,

    /// Validate the dataset and exit
    #[arg(long = "check")]
    pub check: bool,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Summary,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if args.check {
        return run_check(&args.input);
    }

    let config = load_config(args.config.as_deref())?;
    let dataset = load_dataset(&args.input)?;
    if dataset.is_empty() {
        tracing::warn!(input = %args.input.display(), "dataset contains no conferences");
    }
    let view = build_view(&args, &config, &dataset);
    let scheme = if args.dark {
        ColorScheme::Dark
    } else {
        config.scheme
    };
    let outcome = compute_layout(&dataset, &view, config.theme(scheme), &config.layout);

    match (args.output_format, args.output.as_deref()) {
        (OutputFormat::Json, Some(path)) => write_layout_dump(path, &outcome),
        (OutputFormat::Json, None) => write_output(&layout_dump_json(&outcome)?, None),
        (OutputFormat::Summary, output) => write_output(&render_summary(&outcome), output),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn build_view(args: &Args, config: &Config, dataset: &Dataset) -> ViewState {
    let viewport_width = args.viewport_width.unwrap_or(config.viewport.width);
    let scroll_width = args
        .scroll_width
        .or(config.viewport.scroll_width)
        .unwrap_or(viewport_width);
    let enabled = if args.conferences.is_empty() {
        EnabledSet::All
    } else {
        for name in &args.conferences {
            if dataset.find(name).is_none() {
                tracing::warn!(conference = %name, "unknown conference in filter");
            }
        }
        EnabledSet::only(args.conferences.iter().map(|name| canonical_name(dataset, name)))
    };
    ViewState {
        enabled,
        viewport_width,
        scroll_width,
        today: args.today.unwrap_or_else(|| Local::now().date_naive()),
    }
}

/// Accepts either the short name or the id on the command line.
fn canonical_name(dataset: &Dataset, name: &str) -> String {
    dataset
        .find(name)
        .map(|conf| conf.name.clone())
        .unwrap_or_else(|| name.to_string())
}

fn run_check(input: &Path) -> Result<()> {
    let reports = check_sources(input)?;
    if reports.is_empty() {
        println!("No conference JSON files found to validate.");
        return Ok(());
    }
    println!("Found {} file(s) to validate.", reports.len());
    let mut failed = 0usize;
    for report in &reports {
        match &report.result {
            Ok(count) => println!("Validating {}... OK ({count} conference(s))", report.source_name),
            Err(err) => {
                failed += 1;
                println!("Validating {}... FAILED", report.source_name);
                eprintln!("  Error: {err}");
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} file(s) failed validation", reports.len());
    }
    println!("All files are valid.");
    Ok(())
}

pub fn render_summary(outcome: &LayoutOutcome) -> String {
    let layout = match outcome {
        LayoutOutcome::Empty(reason) => {
            return format!("Nothing to show: {}\n", empty_reason_text(*reason));
        }
        LayoutOutcome::Ready(layout) => layout,
    };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Timeline {} .. {} ({} days, {}-month window, {:.2} px/day, {:.0} x {:.0} px)",
        layout.min_date,
        layout.max_date,
        layout.total_days,
        layout.window_months,
        layout.pixels_per_day,
        layout.width,
        layout.height,
    );
    if let Some(today) = &layout.today {
        let _ = writeln!(out, "Today {} at x={:.1}", today.date, today.x);
    }
    for conf in &layout.conferences {
        let rows = if conf.row_count == 1 { "row" } else { "rows" };
        let _ = writeln!(
            out,
            "{} - {} ({} {rows}, y={:.0}, h={:.0})",
            conf.name, conf.full_name, conf.row_count, conf.y, conf.height
        );
        for cycle in &conf.cycles {
            let name = if cycle.name.trim().is_empty() {
                "(unnamed)"
            } else {
                cycle.name.as_str()
            };
            let span = match (cycle.segments.first(), cycle.segments.last()) {
                (Some(first), Some(last)) => format!(
                    "{} .. {}",
                    first.start.date.format_short(),
                    last.end.date.format_short()
                ),
                _ => "no visible segments".to_string(),
            };
            let _ = writeln!(
                out,
                "  row {} {} {:<20} [{:.1} .. {:.1}] {span}, {} segment(s)",
                cycle.row,
                cycle.year,
                name,
                cycle.start_x,
                cycle.end_x,
                cycle.segments.len()
            );
        }
    }
    out
}

fn write_output(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
