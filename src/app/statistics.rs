//! Summary and status statistics printing.

use log::info;

use crate::config::TOO_MANY_REDIRECTS_STATUS;
use crate::error_handling::ErrorBreakdown;
use crate::run::Summary;

/// Logs the metric table of a finished scan and its error categories.
pub fn log_summary(summary: &Summary) {
    info!("Scan Summary");
    info!("   Total domains scanned: {}", summary.total_scanned);
    info!("   New 200 responses: {}", summary.new_200);
    info!("   New 3xx redirects: {}", summary.new_3xx);
    info!("   Too many redirects (999): {}", summary.new_999);
    info!("   Other HTTP statuses: {}", summary.new_other);
    info!("   Domains failed or unreachable: {}", summary.failed);
    info!("   Skipped (already cached): {}", summary.skipped);
    info!("   Time elapsed: {:.2}s", summary.elapsed_seconds);

    print_error_statistics(&summary.error_breakdown);

    info!(
        "✅ Scanned {} domain{} ({} new results, {} failed) in {:.1}s",
        summary.total_scanned,
        if summary.total_scanned == 1 { "" } else { "s" },
        summary.new_outcomes() - summary.failed,
        summary.failed,
        summary.elapsed_seconds
    );
}

/// Logs the non-zero error categories.
pub fn print_error_statistics(breakdown: &ErrorBreakdown) {
    let total = breakdown.total();
    if total == 0 {
        return;
    }
    info!("Error Breakdown ({total} total):");
    for (category, count) in breakdown.iter() {
        if count > 0 {
            info!("   {}: {}", category.as_str(), count);
        }
    }
}

/// Label used when reporting a stored status code.
pub fn status_label(status: Option<u16>) -> String {
    match status {
        None => "ERROR".to_string(),
        Some(TOO_MANY_REDIRECTS_STATUS) => format!("{TOO_MANY_REDIRECTS_STATUS} (too many redirects)"),
        Some(code) if (200..300).contains(&code) => format!("{code} (success)"),
        Some(code) if (300..400).contains(&code) => format!("{code} (redirect)"),
        Some(code) => code.to_string(),
    }
}

/// Logs stored row counts per status code.
pub fn log_status_breakdown(counts: &[(Option<u16>, i64)]) {
    info!("Status code breakdown:");
    for (status, count) in counts {
        info!("   {}: {}", status_label(*status), count);
    }
}
