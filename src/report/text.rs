//! Human-readable rendering of check reports

use std::fmt::Write;

use crate::scan::fixer::FixSummary;
use crate::version::checker::{CheckReport, VersionProbeResult};

const RULE_WIDTH: usize = 80;

/// Output switches for text reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Show every probed version and its status
    pub verbose: bool,
    /// List every valid newer version instead of only the latest
    pub all_available: bool,
}

fn rule(c: char) -> String {
    c.to_string().repeat(RULE_WIDTH)
}

fn status_label(result: &VersionProbeResult) -> &'static str {
    match (result.page_exists, result.anchor_exists) {
        (false, _) if result.probe_error.is_some() => "✗ Unreachable",
        (false, _) => "✗ Not found",
        (true, None) => "✓ Found",
        (true, Some(true)) => "✓ Found (page + anchor)",
        (true, Some(false)) => "⚠ Page found, anchor missing",
    }
}

/// Render the report for a single URL check
pub fn render_single(report: &CheckReport, options: TextOptions) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_single(&mut out, report, options);
    out
}

fn write_single(out: &mut String, report: &CheckReport, options: TextOptions) -> std::fmt::Result {
    writeln!(out, "Checking: {}", report.original_url)?;
    writeln!(out, "Current Version: {}", report.original_version)?;
    writeln!(out, "{}", rule('-'))?;

    let valid = report.valid_newer_versions();
    if let Some(latest) = report.latest() {
        writeln!(out, "⚠️  This documentation is OUTDATED!")?;
        writeln!(out, "Latest Version: {}", report.latest_version)?;
        writeln!(out)?;

        if options.all_available {
            writeln!(out, "Available newer versions:")?;
            for result in &valid {
                writeln!(out, "  ✓ Version {}: {}", result.version, result.url)?;
            }
        } else {
            writeln!(out, "Latest available version:")?;
            writeln!(out, "  ✓ Version {}: {}", latest.version, latest.url)?;
            if valid.len() > 1 {
                writeln!(out)?;
                writeln!(
                    out,
                    "(Use --all-available to see all {} newer versions)",
                    valid.len()
                )?;
            }
        }

        if options.verbose {
            writeln!(out)?;
            writeln!(out, "All checked versions:")?;
            for result in &report.all_probed_versions {
                writeln!(
                    out,
                    "  {} Version {}: {}",
                    status_label(result),
                    result.version,
                    result.url
                )?;
            }
        }
    } else {
        writeln!(
            out,
            "✓ This documentation is UP TO DATE (version {})",
            report.latest_version
        )?;

        let missing_anchor: Vec<&VersionProbeResult> = report
            .all_probed_versions
            .iter()
            .filter(|result| result.is_anchor_missing())
            .collect();
        if !missing_anchor.is_empty() {
            writeln!(out)?;
            writeln!(out, "⚠️  Note: Newer versions exist but the anchor is missing:")?;
            for result in missing_anchor {
                writeln!(
                    out,
                    "  - Version {}: page exists but anchor not found",
                    result.version
                )?;
            }
        }

        if options.verbose {
            writeln!(out)?;
            writeln!(out, "Checked versions:")?;
            for result in &report.all_probed_versions {
                writeln!(out, "  {} Version {}", status_label(result), result.version)?;
            }
        }
    }

    if options.verbose {
        for result in &report.all_probed_versions {
            if let Some(error) = &result.probe_error {
                writeln!(out, "  ! Version {}: {}", result.version, error)?;
            }
        }
    }

    if report.cancelled {
        writeln!(out)?;
        writeln!(out, "(Check cancelled before every version was probed)")?;
    }

    Ok(())
}

/// Render the results of a directory scan
pub fn render_batch(reports: &[&CheckReport], options: TextOptions) -> String {
    let mut out = String::new();
    let _ = write_batch(&mut out, reports, options);
    out
}

fn write_batch(
    out: &mut String,
    reports: &[&CheckReport],
    options: TextOptions,
) -> std::fmt::Result {
    writeln!(out, "{}", rule('='))?;
    writeln!(out, "📋 OCP Documentation URL Check Results")?;
    writeln!(out, "{}", rule('='))?;
    writeln!(out)?;

    for (i, report) in reports.iter().enumerate() {
        if report.is_outdated {
            writeln!(out, "[{}] ⚠️  OUTDATED", i + 1)?;
        } else {
            writeln!(out, "[{}] ✅ UP TO DATE", i + 1)?;
        }
        writeln!(out, "    URL: {}", report.original_url)?;
        writeln!(out, "    Current Version: {}", report.original_version)?;
        writeln!(out, "    Latest Version: {}", report.latest_version)?;

        let valid = report.valid_newer_versions();
        if let Some(latest) = report.latest() {
            if options.all_available {
                writeln!(out, "    Available newer versions:")?;
                for result in &valid {
                    writeln!(out, "      - Version {}: {}", result.version, result.url)?;
                }
            } else {
                writeln!(
                    out,
                    "    Latest available: {} ({})",
                    latest.version, latest.url
                )?;
                if valid.len() > 1 {
                    writeln!(
                        out,
                        "    ({} newer versions available, use --all-available to see all)",
                        valid.len()
                    )?;
                }
            }
        }

        if options.verbose {
            for result in &report.all_probed_versions {
                writeln!(
                    out,
                    "      {} Version {}",
                    status_label(result),
                    result.version
                )?;
            }
        }
        writeln!(out)?;
    }

    let outdated = reports.iter().filter(|r| r.is_outdated).count();
    writeln!(out, "{}", rule('='))?;
    writeln!(
        out,
        "Summary: {} total, {} up-to-date, {} outdated",
        reports.len(),
        reports.len() - outdated,
        outdated
    )?;
    writeln!(out, "{}", rule('='))?;

    if outdated > 0 {
        writeln!(out)?;
        writeln!(out, "🔧 Recommended Updates:")?;
        writeln!(out)?;
        for report in reports {
            let Some(latest) = report.latest() else {
                continue;
            };
            writeln!(
                out,
                "- Update from {} to {}:",
                report.original_version, latest.version
            )?;
            writeln!(out, "  Old: {}", report.original_url)?;
            writeln!(out, "  New: {}", latest.url)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Render what `--fix` changed
pub fn render_fix_summary(summary: &FixSummary) -> String {
    let mut out = String::new();
    let _ = write_fix_summary(&mut out, summary);
    out
}

fn write_fix_summary(out: &mut String, summary: &FixSummary) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", rule('='))?;
    writeln!(out, "🔧 Applying Fixes...")?;
    writeln!(out, "{}", rule('='))?;
    writeln!(out)?;

    for fixed in &summary.fixed {
        writeln!(out, "✅ Updated: {}", fixed.file.display())?;
        writeln!(out, "   {} → {}", fixed.from_version, fixed.to_version)?;
        writeln!(out, "   Old: {}", fixed.old_url)?;
        writeln!(out, "   New: {}", fixed.new_url)?;
        writeln!(out)?;
    }

    for failure in &summary.failures {
        writeln!(out, "❌ {}", failure)?;
    }

    writeln!(out, "{}", rule('='))?;
    writeln!(
        out,
        "Summary: Fixed {} URL(s) in {} file(s)",
        summary.fixed.len(),
        summary.files_changed()
    )?;
    writeln!(out, "{}", rule('='))?;

    Ok(())
}
