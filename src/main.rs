use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plainspeak::discovery::{self, DiscoveryConfig};
use plainspeak::{
    run_batch, BatchConfig, FileStats, FileStatus, PlainEnglishTranslator, TranslatorConfig,
    REVIEW_THRESHOLD,
};

#[derive(Parser, Debug)]
#[command(name = "plainspeak")]
#[command(about = "Batch translate jargon-heavy documents into plain English")]
#[command(version)]
struct Args {
    /// File pattern, e.g. "documents/*.txt"
    pattern: String,

    /// Delay between files in seconds
    #[arg(short, long, default_value = "0.5", value_parser = parse_delay)]
    delay: Duration,

    /// Maximum number of files to process (0 for no limit)
    #[arg(short, long)]
    max_files: Option<usize>,

    /// Directory HTML reports are written to
    #[arg(short, long, default_value = "translations")]
    output_dir: PathBuf,

    /// Skip files with fewer characters than this
    #[arg(long, default_value_t = 50)]
    min_chars: usize,

    /// Write per-file statistics as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Abort on the first unreadable discovery entry
    #[arg(long)]
    fail_fast: bool,

    /// Suppress the console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn parse_delay(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value.parse().map_err(|e| format!("invalid delay {value:?}: {e}"))?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("delay must be a non-negative number of seconds, got {value}"));
    }
    Ok(Duration::from_secs_f64(seconds))
}

fn init_logging(json: bool) {
    // Logs go to stderr so the summary on stdout stays readable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn describe(index: usize, total: usize, stats: &FileStats) -> String {
    let mut lines = vec![format!("[{index}/{total}] {}", stats.path)];

    match stats.status {
        FileStatus::Success => {
            let report = stats
                .report_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            lines.push(format!(
                "  OK -> {report} ({:.0}% confidence)",
                stats.confidence_score.unwrap_or(0.0) * 100.0
            ));
            if stats.red_flags > 0 {
                lines.push(format!("  !  {} red flags found", stats.red_flags));
            }
            if stats.rights > 0 {
                lines.push(format!("  +  {} rights identified", stats.rights));
            }
            if stats.action_items > 0 {
                lines.push(format!("  >  {} action items", stats.action_items));
            }
        }
        FileStatus::Skipped => {
            lines.push(format!(
                "  Skipping - {}",
                stats.error.as_deref().unwrap_or("too short")
            ));
        }
        FileStatus::Failed => {
            lines.push(format!(
                "  Error processing file: {}",
                stats.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }
    lines.join("\n")
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_json);

    info!("Starting plainspeak");
    info!(?args, "Parsed CLI arguments");

    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
        max_files: args.max_files,
    };
    let files = discovery::discover_files(&args.pattern, &discovery_config)?;

    if files.is_empty() {
        println!("No files found matching pattern: {}", args.pattern);
        return Ok(());
    }

    println!("Processing {} files...", files.len());
    println!("{}", "=".repeat(60));

    let translator = PlainEnglishTranslator::with_config(TranslatorConfig {
        output_dir: args.output_dir.clone(),
        ..TranslatorConfig::default()
    })?;
    let batch_config = BatchConfig {
        min_content_chars: args.min_chars,
        delay: args.delay,
        ..BatchConfig::default()
    };

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new(files.len() as u64);
        bar.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} [{elapsed_precise}]")?);
        bar
    };

    let summary = run_batch(&translator, &files, &batch_config, |index, total, stats| {
        let message = describe(index, total, stats);
        if progress.is_hidden() {
            println!("{message}");
        } else {
            progress.println(message);
        }
        progress.inc(1);
    })
    .await;
    progress.finish_and_clear();

    println!();
    println!("{}", "=".repeat(60));
    println!("Batch processing complete!");
    println!("  {}/{} files processed successfully", summary.succeeded, summary.total());
    if summary.skipped > 0 {
        println!("  {} files skipped", summary.skipped);
    }
    if summary.failed > 0 {
        println!("  {} files failed", summary.failed);
    }
    println!("  Total time: {:.1} seconds", summary.elapsed_ms as f64 / 1000.0);
    println!("  Results in: {}", args.output_dir.display());

    if summary.succeeded > 0 {
        println!();
        println!("Quick tips:");
        println!("  - Open the HTML files in your browser for best viewing");
        println!("  - Look at red flags first, those need attention");
        println!(
            "  - Check confidence scores, below {:.0}% may need human review",
            REVIEW_THRESHOLD * 100.0
        );
        println!("  - Action items tell you what to do next");
    }

    if let Some(stats_path) = &args.stats_out {
        summary.save_json(stats_path).await?;
        info!("Wrote run statistics to {}", stats_path.display());
    }

    Ok(())
}
