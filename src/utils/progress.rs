use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal spinner shown while the datasets load and join
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn spinner(message: &str) -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Self { bar: pb }
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    pub fn finish_with_message(&self, message: &str) {
        self.bar.finish_with_message(message.to_string());
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.bar.finish();
    }
}
