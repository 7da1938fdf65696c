//! Progress reporter implementation
//!
//! Uses indicatif to show what the inventory walk is doing:
//! - Current organization / VDC / vApp being fetched
//! - Running counters for each level of the hierarchy
//! - A row bar while the spreadsheet is written

use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Progress reporter for inventory walks and exports
pub struct ProgressReporter {
    /// Multi-progress container
    multi: MultiProgress,
    /// Current status message
    status: ProgressBar,
    /// Export rows progress bar
    rows_bar: ProgressBar,
    /// Start time
    start_time: Instant,
    /// Organizations visited
    organizations: AtomicU64,
    /// VDCs visited
    vdcs: AtomicU64,
    /// vApps fetched
    servers: AtomicU64,
}

impl ProgressReporter {
    /// Create a new progress reporter drawing to stderr
    pub fn new() -> Self {
        let multi = MultiProgress::new();

        let status = multi.add(ProgressBar::new_spinner());
        status.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} [{elapsed}] {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
        );
        status.enable_steady_tick(Duration::from_millis(120));

        let rows_bar = ProgressBar::hidden();
        rows_bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.bold.dim} [{bar:40.cyan/blue}] {pos}/{len} rows ({percent}%)")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> ")
        );
        rows_bar.set_prefix("Export");

        Self {
            multi,
            status,
            rows_bar,
            start_time: Instant::now(),
            organizations: AtomicU64::new(0),
            vdcs: AtomicU64::new(0),
            servers: AtomicU64::new(0),
        }
    }

    /// Create a disabled progress reporter (for quiet mode and JSON output)
    pub fn disabled() -> Self {
        let reporter = Self::new();
        reporter.status.disable_steady_tick();
        reporter.multi.set_draw_target(ProgressDrawTarget::hidden());
        reporter
    }

    /// An organization is being visited
    pub fn organization(&self, name: &str) {
        self.organizations.fetch_add(1, Ordering::Relaxed);
        self.set_status(&format!("Organization {name}"));
    }

    /// A VDC is being visited
    pub fn vdc(&self, name: &str) {
        self.vdcs.fetch_add(1, Ordering::Relaxed);
        self.set_status(&format!("VDC {name}"));
    }

    /// A vApp has been fetched
    pub fn server(&self, name: &str) {
        let count = self.servers.fetch_add(1, Ordering::Relaxed) + 1;
        self.set_status(&format!("vApp {name} ({count} found)"));
    }

    /// Start the row bar for an export of `total` rows
    pub fn start_rows(&self, total: u64) {
        let bar = self.multi.add(self.rows_bar.clone());
        bar.set_length(total);
        bar.set_position(0);
    }

    /// Rows written so far
    pub fn increment_rows(&self, count: u64) {
        self.rows_bar.inc(count);
    }

    /// All rows are written
    pub fn finish_rows(&self) {
        self.rows_bar.finish();
    }

    #[cfg(test)]
    pub(crate) fn rows_written(&self) -> (u64, bool) {
        (self.rows_bar.position(), self.rows_bar.is_finished())
    }

    /// Set current status message
    pub fn set_status(&self, msg: &str) {
        let display = if msg.chars().count() > 70 {
            let tail: String = msg.chars().rev().take(67).collect::<Vec<_>>().into_iter().rev().collect();
            format!("...{tail}")
        } else {
            msg.to_string()
        };
        self.status.set_message(display);
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Finish the status spinner with a success message
    pub fn finish_success(&self, message: &str) {
        self.status.finish_with_message(format!("✓ {}", message));
    }

    /// Finish progress with error message
    pub fn finish_error(&self, message: &str) {
        self.status.finish_with_message(format!("✗ {}", message));
        self.rows_bar.abandon();
    }

    /// Get progress summary
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            organizations: self.organizations.load(Ordering::Relaxed),
            vdcs: self.vdcs.load(Ordering::Relaxed),
            servers: self.servers.load(Ordering::Relaxed),
            elapsed: self.elapsed(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress summary
#[derive(Debug, Clone)]
pub struct ProgressSummary {
    /// Organizations visited
    pub organizations: u64,
    /// VDCs visited
    pub vdcs: u64,
    /// vApps fetched
    pub servers: u64,
    /// Elapsed time
    pub elapsed: Duration,
}

impl ProgressSummary {
    /// One-line description of the walk
    pub fn line(&self) -> String {
        format!(
            "{} vApp(s) in {} VDC(s) across {} organization(s) in {}",
            self.servers,
            self.vdcs,
            self.organizations,
            humantime::format_duration(Duration::from_millis(self.elapsed.as_millis() as u64)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reporter_counts() {
        let reporter = ProgressReporter::disabled();

        reporter.organization("Acme");
        reporter.vdc("Acme-VDC");
        reporter.server("web-P01");
        reporter.server("db-D01");

        let summary = reporter.summary();
        assert_eq!(summary.organizations, 1);
        assert_eq!(summary.vdcs, 1);
        assert_eq!(summary.servers, 2);
        reporter.finish_success("done");
    }

    #[test]
    fn test_summary_line() {
        let summary = ProgressSummary {
            organizations: 2,
            vdcs: 3,
            servers: 10,
            elapsed: Duration::from_secs(5),
        };
        assert_eq!(summary.line(), "10 vApp(s) in 3 VDC(s) across 2 organization(s) in 5s");
    }

    #[test]
    fn test_walk_finish_leaves_row_bar_open() {
        let reporter = ProgressReporter::disabled();
        reporter.finish_success("walk done");
        assert!(reporter.status.is_finished());
        assert_eq!(reporter.rows_written(), (0, false));

        reporter.start_rows(3);
        reporter.increment_rows(1);
        reporter.increment_rows(2);
        assert_eq!(reporter.rows_written(), (3, false));

        reporter.finish_rows();
        assert_eq!(reporter.rows_written(), (3, true));
    }

    #[test]
    fn test_long_status_is_truncated() {
        let reporter = ProgressReporter::disabled();
        reporter.set_status(&"x".repeat(200));
        assert_eq!(reporter.status.message().chars().count(), 70);
    }
}
