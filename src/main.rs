use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgGroup, Parser};
use tracing::{info, warn};

use ocp_doc_checker::config::CheckerConfig;
use ocp_doc_checker::logging;
use ocp_doc_checker::report::{json, text};
use ocp_doc_checker::scan::{UrlScanner, apply_fixes};
use ocp_doc_checker::version::Checker;
use ocp_doc_checker::version::batch::check_all_until;
use ocp_doc_checker::version::cancel::{CancelSignal, cancel_pair};
use ocp_doc_checker::version::checker::CheckReport;

#[derive(Parser)]
#[command(name = "ocp-doc-checker")]
#[command(
    version,
    about = "Detect outdated OpenShift documentation links and point them at the newest version"
)]
#[command(group(ArgGroup::new("target").required(true).args(["url", "dir"])))]
struct Cli {
    /// Documentation URL to check
    #[arg(long)]
    url: Option<String>,

    /// File or directory to scan for documentation URLs
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Rewrite outdated URLs in place
    #[arg(long, requires = "dir", conflicts_with = "json")]
    fix: bool,

    /// Show every checked version
    #[arg(short, long)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// List every newer version instead of only the latest
    #[arg(long)]
    all_available: bool,

    /// Versions to check against, e.g. 4.18,4.19,4.20
    #[arg(long, value_delimiter = ',')]
    versions: Option<Vec<String>>,

    /// Config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write JSON log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn text_options(&self) -> text::TextOptions {
        text::TextOptions {
            verbose: self.verbose,
            all_available: self.all_available,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    let mut config = CheckerConfig::load(cli.config.as_deref())?;
    if let Some(versions) = &cli.versions {
        config.known_versions = versions.iter().map(|v| v.trim().to_string()).collect();
    }

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli, config))
}

async fn run(cli: Cli, config: CheckerConfig) -> anyhow::Result<ExitCode> {
    let checker = Checker::from_config(&config)?;

    let (handle, signal) = cancel_pair();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight checks");
            handle.cancel();
        }
    });

    if let Some(url) = &cli.url {
        return check_url(&cli, &checker, url, signal).await;
    }
    match &cli.dir {
        Some(dir) => check_dir(&cli, &config, &checker, dir, signal).await,
        None => anyhow::bail!("either --url or --dir is required"),
    }
}

async fn check_url(
    cli: &Cli,
    checker: &Checker,
    url: &str,
    signal: CancelSignal,
) -> anyhow::Result<ExitCode> {
    let report = checker.check_until(url, signal.cancelled()).await?;

    if cli.json {
        println!("{}", json::render_single(&report)?);
    } else {
        print!("{}", text::render_single(&report, cli.text_options()));
    }

    Ok(exit_code(report.is_outdated))
}

async fn check_dir(
    cli: &Cli,
    config: &CheckerConfig,
    checker: &Checker,
    dir: &std::path::Path,
    signal: CancelSignal,
) -> anyhow::Result<ExitCode> {
    let scanner = UrlScanner::new(&config.site)?;
    let locations = scanner.scan_path(dir)?;

    if locations.is_empty() {
        if cli.json {
            println!("{}", json::render_batch(&[])?);
        } else {
            println!("No OCP documentation URLs found in {}", dir.display());
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !cli.json {
        println!(
            "Found {} unique OCP documentation URL(s) in {}\n",
            locations.len(),
            dir.display()
        );
    }

    let urls: Vec<String> = locations.iter().map(|l| l.url.clone()).collect();
    let entries = check_all_until(checker, &urls, checker.max_concurrent_probes(), signal).await;
    let reports: Vec<&CheckReport> = entries
        .iter()
        .filter_map(|entry| entry.result.as_ref().ok())
        .collect();
    let outdated = reports.iter().filter(|r| r.is_outdated).count();

    if cli.json {
        println!("{}", json::render_batch(&reports)?);
        return Ok(exit_code(outdated > 0));
    }
    print!("{}", text::render_batch(&reports, cli.text_options()));

    if !cli.fix || outdated == 0 {
        return Ok(exit_code(outdated > 0));
    }

    if reports.iter().any(|r| r.cancelled) {
        warn!("Check was interrupted before every version was probed; no files were changed");
        return Ok(ExitCode::FAILURE);
    }

    let summary = apply_fixes(&reports, &locations);
    print!("{}", text::render_fix_summary(&summary));
    info!(
        "Fixed {} URL(s) in {} file(s), {} failure(s)",
        summary.fixed.len(),
        summary.files_changed(),
        summary.failures.len()
    );

    Ok(exit_code(!summary.failures.is_empty()))
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
