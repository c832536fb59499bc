//! Formatting functions for UI output.
//!
//! `format_*` functions build plain lines and are unit tested; `display_*`
//! functions style and print them.

use crate::analyzer::{DatasetProfile, Tally};
use crate::boundary::RecordWarning;
use crate::classifier::Classifier;
use crate::domain::{ProductGroup, VersionType};
use crate::merge::{ProductLineStats, Stats, Timeline};
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a per-record warning.
///
/// # Arguments
/// * `warning` - The recovered problem to display
pub fn display_record_warning(warning: &RecordWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

fn heading(title: &str) {
    println!("\n{}", style(title).bold());
}

/// Right-aligned `count  label` rows
pub fn format_count_rows<'a, I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, &'a usize)>,
{
    let rows: Vec<(String, usize)> = rows.into_iter().map(|(k, v)| (k, *v)).collect();
    let width = rows
        .iter()
        .map(|(_, n)| n.to_string().len())
        .max()
        .unwrap_or(1);
    rows.into_iter()
        .map(|(label, n)| format!("  {:>width$}  {}", n, label, width = width))
        .collect()
}

fn tally_rows(tally: &Tally) -> Vec<String> {
    format_count_rows(tally.top.iter().map(|(value, n)| (value.clone(), n)))
}

/// One-line batch summary
pub fn format_stats_line(stats: &Stats, warnings: usize) -> String {
    format!(
        "{} records merged into {} entries ({} folded), {} warnings",
        stats.total_releases,
        stats.merged_releases,
        stats.folded_records(),
        warnings
    )
}

/// Display the per-line, per-type and per-year counters.
pub fn display_stats(stats: &Stats, classifier: &Classifier) {
    heading("By product line:");
    for line in format_count_rows(
        stats
            .product_lines
            .iter()
            .map(|(pl, n)| (classifier.label(*pl).to_string(), n)),
    ) {
        println!("{}", line);
    }

    heading("By version type:");
    for line in format_count_rows(stats.version_types.iter().map(|(vt, n)| (vt.to_string(), n))) {
        println!("{}", line);
    }

    heading("By year:");
    for line in format_count_rows(stats.years.iter().rev().map(|(y, n)| (y.to_string(), n))) {
        println!("{}", line);
    }
}

/// `  total  label (GA 3, RC 1)` for one product line of the matrix
pub fn format_matrix_row(label: &str, total: usize, counts: &[(VersionType, usize)]) -> String {
    let counts: Vec<String> = counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(vtype, n)| format!("{} {}", vtype, n))
        .collect();
    format!("  {:>4}  {} ({})", total, label, counts.join(", "))
}

/// Display the product-line / version-type matrix, grouped like the timeline navigation.
pub fn display_product_line_matrix(matrix: &ProductLineStats, classifier: &Classifier) {
    for group in ProductGroup::ALL {
        let rows: Vec<String> = group
            .members()
            .into_iter()
            .filter(|&line| matrix.line_total(line) > 0)
            .map(|line| {
                let counts: Vec<(VersionType, usize)> = VersionType::ALL
                    .iter()
                    .map(|&vtype| (vtype, matrix.get(line, vtype)))
                    .collect();
                format_matrix_row(classifier.label(line), matrix.line_total(line), &counts)
            })
            .collect();
        if rows.is_empty() {
            continue;
        }
        heading(&format!("{}:", group.label()));
        for row in rows {
            println!("{}", row);
        }
    }
}

/// Display the merge outcome, listing up to 10 merged entries.
///
/// # Arguments
/// * `timeline` - Result of `MergeEngine::process`
/// * `classifier` - Supplies product-line labels
pub fn display_timeline_summary(timeline: &Timeline, classifier: &Classifier) {
    display_status(&format_stats_line(&timeline.stats, timeline.warnings.len()));
    display_stats(&timeline.stats, classifier);
    display_product_line_matrix(&timeline.product_line_stats, classifier);

    let merged: Vec<_> = timeline.entries().filter(|r| r.is_merged).collect();
    if merged.is_empty() {
        return;
    }
    heading(&format!("Merged entries ({}):", merged.len()));
    for entry in merged.iter().take(10) {
        println!(
            "  {} {}",
            style(&entry.date).dim(),
            entry.display_title
        );
    }
    if merged.len() > 10 {
        println!("  ... and {} more merged entries", merged.len() - 10);
    }
}

/// Display a dataset profile.
pub fn display_profile(profile: &DatasetProfile, classifier: &Classifier) {
    println!(
        "{} {} release records",
        style("Dataset profile:").bold(),
        profile.total_releases
    );

    for (field, tally) in &profile.fields {
        heading(&format!("{} ({} distinct):", field, tally.unique));
        for line in tally_rows(tally) {
            println!("{}", line);
        }
    }

    let tags = &profile.tags;
    heading(&format!(
        "Tags: {} distinct, {} total, {} undecodable payloads",
        tags.unique_tags, tags.total_tags, tags.malformed
    ));
    for line in format_count_rows(
        tags.tags_per_release
            .iter()
            .map(|(k, n)| (format!("releases with {} tags", k), n)),
    ) {
        println!("{}", line);
    }
    for line in tally_rows(&tags.most_common) {
        println!("{}", line);
    }

    heading("Tag prefixes:");
    for line in tally_rows(&profile.prefixes.tag_prefixes) {
        println!("{}", line);
    }
    heading("Product name prefixes:");
    for line in tally_rows(&profile.prefixes.product_name_prefixes) {
        println!("{}", line);
    }

    heading(&format!(
        "Versions ({} distinct):",
        profile.versions.versions.unique
    ));
    for line in tally_rows(&profile.versions.versions) {
        println!("{}", line);
    }
    heading("Version patterns:");
    for line in tally_rows(&profile.versions.patterns) {
        println!("{}", line);
    }

    let coverage = &profile.coverage;
    heading(&format!(
        "Classification ({} in catch-all buckets):",
        coverage.unclassified()
    ));
    for line in format_count_rows(
        coverage
            .product_lines
            .iter()
            .map(|(pl, n)| (classifier.label(*pl).to_string(), n)),
    ) {
        println!("{}", line);
    }
    heading("Deciding rules:");
    for line in format_count_rows(coverage.rules.iter().map(|(r, n)| (r.to_string(), n))) {
        println!("{}", line);
    }
}
