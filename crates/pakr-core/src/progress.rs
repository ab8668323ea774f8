//! Textual progress bar rendering.
//!
//! The bar is 50 characters wide, each character standing for 2%:
//!
//! ```text
//! [#########################-------------------------] 50%
//! ```

use std::io::Write;

use crate::ProgressCallback;

/// Width of the bar in characters.
pub const BAR_WIDTH: u64 = 50;

const FILL_CHAR: char = '#';
const EMPTY_CHAR: char = '-';

/// Renders the progress line for `done` out of `total` bytes.
///
/// Returns `None` when `total` is zero, so callers draw nothing instead of
/// dividing by zero. The percentage is floored and capped at 100, which
/// keeps the bar well-formed when the source grows mid-transfer or when
/// `total` is only an estimate.
///
/// # Examples
///
/// ```
/// use pakr_core::progress::render_bar;
///
/// let line = render_bar(0, 100).unwrap();
/// assert_eq!(line, format!("[{}] 0%", "-".repeat(50)));
///
/// let line = render_bar(100, 100).unwrap();
/// assert_eq!(line, format!("[{}] 100%", "#".repeat(50)));
///
/// assert_eq!(render_bar(5, 0), None);
/// ```
#[must_use]
pub fn render_bar(done: u64, total: u64) -> Option<String> {
    if total == 0 {
        return None;
    }

    let percent = percent(done, total);
    let filled = percent / 2;
    let empty = BAR_WIDTH - filled;

    let mut line = String::with_capacity(60);
    line.push('[');
    line.extend(std::iter::repeat_n(FILL_CHAR, to_usize(filled)));
    line.extend(std::iter::repeat_n(EMPTY_CHAR, to_usize(empty)));
    line.push_str("] ");
    line.push_str(&percent.to_string());
    line.push('%');
    Some(line)
}

/// Returns `min(100, floor(done * 100 / total))`, computed without overflow.
///
/// `total` must be non-zero.
fn percent(done: u64, total: u64) -> u64 {
    let scaled = u128::from(done) * 100 / u128::from(total);
    u64::try_from(scaled.min(100)).unwrap_or(100)
}

#[allow(clippy::cast_possible_truncation)]
const fn to_usize(n: u64) -> usize {
    // Bar segments never exceed BAR_WIDTH.
    n as usize
}

/// Progress reporter that redraws a single line on any writer.
///
/// Each update writes a carriage return followed by the rendered bar, so a
/// terminal shows one line being overwritten in place. A single newline is
/// written on completion. Write errors are ignored: progress output never
/// fails a transfer.
///
/// # Examples
///
/// ```
/// use pakr_core::ProgressCallback;
/// use pakr_core::progress::LineProgress;
///
/// let mut progress = LineProgress::new(Vec::new());
/// progress.on_start(4);
/// progress.on_progress(2, 4);
/// progress.on_complete();
///
/// let out = String::from_utf8(progress.into_inner()).unwrap();
/// assert!(out.starts_with('\r'));
/// assert!(out.ends_with("50%\n"));
/// ```
#[derive(Debug)]
pub struct LineProgress<W: Write> {
    out: W,
}

impl<W: Write> LineProgress<W> {
    /// Creates a reporter writing to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reporter and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl LineProgress<std::io::Stdout> {
    /// Creates a reporter drawing on standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ProgressCallback for LineProgress<W> {
    fn on_start(&mut self, _total: u64) {}

    fn on_progress(&mut self, done: u64, total: u64) {
        if let Some(line) = render_bar(done, total) {
            let _ = write!(self.out, "\r{line}");
            let _ = self.out.flush();
        }
    }

    fn on_complete(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();
    }
}
