//! Loading indicator for the span of an exchange

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use mog_application::ExchangeProgress;
use mog_domain::Mode;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

pub const LOADING_MESSAGE: &str = "STRENGTHENING...";

/// Spinner shown while the session is loading
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    draw_target: fn() -> ProgressDrawTarget,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            draw_target: ProgressDrawTarget::stderr,
        }
    }

    /// Reporter that tracks state but never draws.
    #[cfg(test)]
    fn hidden() -> Self {
        Self {
            spinner: Mutex::new(None),
            draw_target: ProgressDrawTarget::hidden,
        }
    }

    #[cfg(test)]
    fn is_active(&self) -> bool {
        self.spinner().is_some()
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn spinner(&self) -> MutexGuard<'_, Option<ProgressBar>> {
        self.spinner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeProgress for ProgressReporter {
    fn on_exchange_start(&self, mode: Mode) {
        let pb = ProgressBar::with_draw_target(None, (self.draw_target)());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(mode.as_str().to_uppercase());
        pb.set_message(LOADING_MESSAGE);
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Some(previous) = self.spinner().replace(pb) {
            previous.finish_and_clear();
        }
    }

    fn on_exchange_complete(&self, _appended: usize) {
        if let Some(pb) = self.spinner().take() {
            pb.finish_and_clear();
        }
    }

    fn on_exchange_failed(&self, _reason: &str) {
        if let Some(pb) = self.spinner().take() {
            pb.finish_and_clear();
        }
    }
}

/// Plain-text progress for terminals without spinner support
pub struct SimpleProgress;

impl ExchangeProgress for SimpleProgress {
    fn on_exchange_start(&self, mode: Mode) {
        eprintln!("{} {} ({})", "->".yellow(), LOADING_MESSAGE.bold(), mode);
    }

    fn on_exchange_complete(&self, _appended: usize) {}
}
