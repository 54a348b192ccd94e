use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

/// Batch progress bar; inert when progress output is disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

fn bar_template() -> &'static str {
    match ui::prefs().term_width {
        Some(cols) if cols >= 110 => "{bar:40.cyan/blue} {msg} [{elapsed_precise}]",
        Some(cols) if cols >= 80 => "{wide_bar:.cyan/blue} {msg}",
        _ => "{wide_bar:.cyan/blue} {percent}% {msg}",
    }
}

/// Bar message after `completed` of `total` records finished.
pub fn processed_message(completed: usize, total: usize) -> String {
    format!("processed {completed}/{total}")
}

impl Progress {
    #[must_use]
    pub fn bar(total: usize) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template(bar_template())
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(processed_message(0, total));
        Self { bar: Some(bar) }
    }

    /// Advance by one finished record.
    pub fn record_done(&self, completed: usize, total: usize) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
            bar.set_message(processed_message(completed, total));
        }
    }

    pub fn finish_ok(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message(message.to_string());
        }
    }

    pub fn finish_err(&self, message: &str) {
        if let Some(bar) = &self.bar {
            bar.abandon_with_message(message.to_string());
        }
    }
}
