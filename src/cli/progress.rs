//! Spinner shown while waiting on the recipe webhook

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Indeterminate progress indicator on stderr
pub struct Spinner {
    /// Progress bar (optional, can be disabled)
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Start a spinner
    ///
    /// # Arguments
    /// * `message` - Text shown next to the spinner
    /// * `enabled` - Whether to draw anything at all
    pub fn start(message: &str, enabled: bool) -> Self {
        let bar = enabled.then(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} {msg} {elapsed}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });

        Self { bar }
    }

    /// Stop and clear the spinner
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_is_inert() {
        let spinner = Spinner::start("Generating recipes", false);
        assert!(spinner.bar.is_none());
        spinner.finish();
    }
}
