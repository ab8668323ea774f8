//! Progress bar implementation for CLI operations.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressDrawTarget;
use indicatif::ProgressState;
use indicatif::ProgressStyle;
use pakr_core::LineProgress;
use pakr_core::NoopProgress;
use pakr_core::ProgressCallback;
use pakr_core::render_bar;
use std::fmt::Write;

/// CLI progress bar wrapper implementing `ProgressCallback`.
///
/// Draws the `[####----] NN%` line through indicatif on a terminal, which
/// takes care of redraw throttling and cursor handling. The bar is left on
/// screen if the operation stops early.
pub struct CliProgress {
    bar: ProgressBar,
}

impl CliProgress {
    /// Creates a progress bar drawing on standard output.
    #[must_use]
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stdout())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(None, target);

        bar.set_style(
            ProgressStyle::with_template("{line}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .with_key("line", |state: &ProgressState, w: &mut dyn Write| {
                    if let Some(line) = render_bar(state.pos(), state.len().unwrap_or(0)) {
                        w.write_str(&line).unwrap_or(());
                    }
                }),
        );

        Self { bar }
    }

    /// Checks if we should show progress (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliProgress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
    }
}

impl ProgressCallback for CliProgress {
    fn on_start(&mut self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn on_progress(&mut self, done: u64, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(done);
    }

    fn on_complete(&mut self) {
        self.bar.finish();
    }
}

/// Picks the progress reporter for this run.
///
/// Without `--progress` nothing is drawn. On a terminal the indicatif bar is
/// used; otherwise the line is written with plain carriage returns so piped
/// output still carries every update.
pub fn reporter(enabled: bool) -> Box<dyn ProgressCallback> {
    if !enabled {
        Box::new(NoopProgress)
    } else if CliProgress::should_show() {
        Box::new(CliProgress::new())
    } else {
        Box::new(LineProgress::stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_callback() {
        let mut progress = CliProgress::with_draw_target(ProgressDrawTarget::hidden());

        progress.on_start(4096);
        assert_eq!(progress.bar.length(), Some(4096));
        assert_eq!(progress.bar.position(), 0);

        progress.on_progress(1024, 4096);
        assert_eq!(progress.bar.position(), 1024);

        progress.on_progress(4096, 4096);
        progress.on_complete();
        assert!(progress.bar.is_finished());
        assert_eq!(progress.bar.position(), 4096);
    }

    #[test]
    fn test_progress_abandoned_on_drop() {
        let mut progress = CliProgress::with_draw_target(ProgressDrawTarget::hidden());
        progress.on_start(10);
        progress.on_progress(5, 10);

        let bar = progress.bar.clone();
        drop(progress);
        assert!(bar.is_finished());
        assert_eq!(bar.position(), 5);
    }

    #[test]
    fn test_disabled_reporter_is_silent() {
        let mut progress = reporter(false);
        progress.on_start(10);
        progress.on_progress(10, 10);
        progress.on_complete();
    }
}
