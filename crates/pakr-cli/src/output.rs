//! Human-readable summaries printed after an operation.

use console::Term;
use console::style;
use pakr_core::ArchiveReport;
use pakr_core::Direction;
use std::time::Duration;

pub struct Summary {
    use_colors: bool,
    term: Term,
}

impl Summary {
    pub fn new() -> Self {
        Self {
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    /// Writes the report, ignoring terminal write failures.
    pub fn print(&self, report: &ArchiveReport) {
        for line in render(report, self.use_colors) {
            let _ = self.term.write_line(&line);
        }
    }
}

/// Prints the `-b` timing line.
pub fn print_elapsed(elapsed: Duration) {
    println!("{}", format_elapsed(elapsed));
}

pub fn format_elapsed(elapsed: Duration) -> String {
    format!("Elapsed time: {:.3} s", elapsed.as_secs_f64())
}

fn render(report: &ArchiveReport, use_colors: bool) -> Vec<String> {
    let transfer = &report.transfer;
    let heading = match transfer.direction {
        Direction::Compress => format!("Archive created: {}", report.output.display()),
        Direction::Decompress => format!("Extracted to: {}", report.output.display()),
    };
    let heading = if use_colors {
        format!("{} {heading}", style("✓").green().bold())
    } else {
        heading
    };

    let (plain, compressed) = match transfer.direction {
        Direction::Compress => (transfer.bytes_read, transfer.bytes_written),
        Direction::Decompress => (transfer.bytes_written, transfer.total),
    };

    let mut lines = vec![
        heading,
        format!("  Codec:            {}", transfer.codec.name()),
        format!("  Tar bundle:       {}", if report.tar_bundled { "yes" } else { "no" }),
        format!("  Plain size:       {}", format_size(plain)),
        format!("  Compressed size:  {}", format_size(compressed)),
    ];
    if compressed > 0 {
        lines.push(format!("  Ratio:            {:.2}:1", transfer.compression_ratio()));
    }
    lines
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
