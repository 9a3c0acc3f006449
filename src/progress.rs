use crate::constants::{PROGRESS_BAR_TEMPLATE, PROGRESS_CHARS};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Receives one tick per processed file.
pub trait ProgressReporter {
    fn begin(&self, total: u64);
    fn advance(&self, current: &Path);
    fn finish(&self, message: &str);
}

/// Used when there is no terminal to draw on.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn begin(&self, _total: u64) {}
    fn advance(&self, _current: &Path) {}
    fn finish(&self, _message: &str) {}
}

pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let style = ProgressStyle::with_template(PROGRESS_BAR_TEMPLATE)
            .map(|style| style.progress_chars(PROGRESS_CHARS))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(0);
        bar.set_style(style);
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for BarProgress {
    fn begin(&self, total: u64) {
        self.bar.set_length(total);
        self.bar.set_position(0);
    }

    fn advance(&self, current: &Path) {
        if let Some(name) = current.file_name() {
            self.bar.set_message(name.to_string_lossy().into_owned());
        }
        self.bar.inc(1);
    }

    fn finish(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

/// Progress bar when asked for and stderr is a terminal, otherwise a no-op.
pub fn detect(enabled: bool) -> Box<dyn ProgressReporter> {
    if enabled && Term::stderr().is_term() {
        Box::new(BarProgress::new())
    } else {
        Box::new(NoProgress)
    }
}
