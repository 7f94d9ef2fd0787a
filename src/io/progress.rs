//! Periodic search status display on the diagnostic stream
//!
//! Purely observational: the search's functional contract does not depend
//! on anything reported here. Output goes to stderr so the plan protocol on
//! stdout stays clean.

use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static STATUS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

/// Live status line carrying explored/frontier/generated counts, elapsed
/// time and resident memory
pub struct SearchMonitor {
    bar: ProgressBar,
}

impl SearchMonitor {
    /// Create a monitor announcing the chosen strategy
    pub fn new(strategy: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(STATUS_STYLE.clone());
        bar.set_message(format!("Starting {strategy}."));
        Self { bar }
    }

    /// Refresh the status line with current search counters
    pub fn report(
        &self,
        explored: usize,
        frontier: usize,
        elapsed: Duration,
        memory_mb: Option<f64>,
    ) {
        let memory_text = memory_mb.map_or_else(|| "n/a".to_owned(), |mb| format!("{mb:.2} MB"));
        self.bar.set_message(format!(
            "#Explored: {explored:>9}, #Frontier: {frontier:>9}, #Generated: {:>9}, Time: {:.3} s [Alloc: {memory_text}]",
            explored + frontier,
            elapsed.as_secs_f64(),
        ));
        self.bar.tick();
    }

    /// Freeze the final status line in place
    pub fn finish(&self) {
        self.bar.abandon();
    }
}
