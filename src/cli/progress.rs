//! Progress bar and summary reporting for CLI transfers.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{TransferStats, format_bytes, format_duration};

/// Creates a progress bar for a single transfer. The length is set once the
/// controller reports the total size.
pub fn make_transfer_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.cyan} [{bar:40.cyan/blue}] {bytes}/{total_bytes} @ {bytes_per_sec} - {msg}",
        )
        .expect("progress template is valid")
        .progress_chars("━━╌"),
    );
    bar
}

/// Prints the one-line result of a completed transfer.
pub fn print_transfer_line(verb: &str, name: &str, stats: &TransferStats) {
    println!(
        "{} {verb} {name} - {} in {} part(s) over {} ({}/s)",
        style("✓").green(),
        format_bytes(stats.bytes),
        stats.parts,
        format_duration(stats.elapsed),
        format_bytes(stats.average_speed()),
    );
}

/// Prints the one-line result of a failed transfer.
pub fn print_error_line(name: &str, error: &crate::Error) {
    eprintln!("{} {name}: {error}", style("✗").red());
}
