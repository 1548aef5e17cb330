//! CLI binary for icon-crop.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `CropConfig` and prints the run summary.

use anyhow::{Context, Result};
use clap::Parser;
use icon_crop::{
    crop_directory, CropConfig, CropOutcome, CropProgressCallback, FileReport, ProgressCallback,
    DEFAULT_MARGIN,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a bar anchored at the bottom of the terminal
/// plus one log line per file.
struct CliProgressCallback {
    bar: ProgressBar,
    /// Input root, used to print short relative paths.
    root: PathBuf,
}

impl CliProgressCallback {
    /// Spinner until the scan finishes; `on_run_start` switches to a bar.
    fn new(root: &Path) -> Arc<Self> {
        let bar = ProgressBar::new(0);
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        bar.set_style(spinner_style);
        bar.set_prefix("Scanning");
        bar.set_message(root.display().to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            root: root.canonicalize().unwrap_or_else(|_| root.to_path_buf()),
        })
    }

    fn short<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
    }
}

impl CropProgressCallback for CliProgressCallback {
    fn on_run_start(&self, total_files: usize) {
        let progress_style = ProgressStyle::with_template(
            "{spinner:.cyan} {prefix:.bold}  \
             [{bar:42.green/238}] {pos:>4}/{len} icons  ⏱ {elapsed_precise}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏  ")
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);

        self.bar.set_length(total_files as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Cropping");
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Found {total_files} PNG(s)…"))
        ));
    }

    fn on_file_start(&self, _index: usize, _total: usize, source: &Path) {
        self.bar.set_message(self.short(source).into_owned());
    }

    fn on_file_complete(&self, _index: usize, _total: usize, report: &FileReport) {
        let (w, h) = report.original_size;
        let (cw, ch) = report.output_size;
        let detail = match report.outcome {
            CropOutcome::FullyTransparent => "fully transparent, copied".to_string(),
            CropOutcome::Cropped(_) if report.was_trimmed() => format!("{w}x{h} → {cw}x{ch}"),
            CropOutcome::Cropped(_) => format!("{w}x{h} unchanged"),
        };
        self.bar.println(format!(
            "  {} {}  {}",
            green("✓"),
            self.short(&report.source),
            dim(&detail)
        ));
        self.bar.inc(1);
    }

    fn on_run_complete(&self, _processed: usize) {
        self.bar.finish_and_clear();
    }
}

// An aborted run never reaches `on_run_complete`; the spinner must still be
// gone before the error is printed.
impl Drop for CliProgressCallback {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Crop a local copy of the icon bucket, keeping 4px around each glyph
  icon-crop --in ./icons_raw --out ./icons_cropped

  # Tight crop
  icon-crop --in ./icons_raw --out ./icons_cropped --margin 0

  # Scripted run: no progress bar, only the summary line
  icon-crop --in ./icons_raw --out ./icons_cropped --no-progress

BEHAVIOUR:
  * Every *.png (any letter case) under --in is written to the same relative
    path under --out; intermediate directories are created as needed.
  * PNGs with no alpha channel, or palettes without a tRNS chunk, are treated
    as opaque and keep their size.
  * Fully transparent PNGs are copied through unchanged.
  * The first unreadable or corrupt PNG aborts the run.
"#;

/// Crop transparent padding from PNG icons.
#[derive(Parser, Debug)]
#[command(
    name = "icon-crop",
    version,
    about = "Crop transparent padding from PNG icons",
    long_about = "Recursively crop transparent padding from every PNG under an input directory, \
writing the cropped copies to the same relative paths under an output directory. The original \
PNG color mode (RGBA, gray+alpha, palette with or without transparency) is preserved.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Input directory containing PNGs.
    #[arg(long = "in", value_name = "DIR")]
    input: PathBuf,

    /// Output directory for cropped PNGs.
    #[arg(long = "out", value_name = "DIR")]
    output: PathBuf,

    /// Extra pixels to keep around the glyph (negative values clamp to 0).
    #[arg(long, default_value_t = DEFAULT_MARGIN as i64, allow_negative_numbers = true)]
    margin: i64,

    /// Follow symbolic links to directories while scanning.
    #[arg(long)]
    follow_links: bool,

    /// Disable progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar already reports per-file progress, so library INFO
    // logs are suppressed while it is active.
    let show_progress = !cli.quiet && !cli.no_progress;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress && !cli.verbose {
        Some(CliProgressCallback::new(&cli.input) as Arc<dyn CropProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb);

    // ── Run ──────────────────────────────────────────────────────────────
    let stats = crop_directory(&cli.input, &cli.output, &config).context("Crop run failed")?;

    if !cli.quiet {
        println!(
            "Cropped {} PNG(s). Output: {}",
            stats.processed,
            stats.output_dir.display()
        );
        if show_progress {
            eprintln!(
                "{}  {} trimmed  /  {} fully transparent  —  {}ms",
                green("✔"),
                stats.trimmed,
                stats.fully_transparent,
                stats.duration_ms
            );
        }
    }

    Ok(())
}

/// Map CLI args to `CropConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> CropConfig {
    let mut builder = CropConfig::builder()
        .margin(cli.margin)
        .follow_links(cli.follow_links);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build()
}
