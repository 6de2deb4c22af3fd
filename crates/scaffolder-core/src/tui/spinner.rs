//! cliclack-backed progress and log output for the generation pipeline

use crate::builder::{Progress, Reporter};

/// A cliclack spinner that is always stopped, even on early return or panic
pub struct ScopedSpinner {
    bar: cliclack::ProgressBar,
    message: String,
    active: bool,
}

impl ScopedSpinner {
    pub fn start(message: &str) -> Self {
        let bar = cliclack::spinner();
        bar.start(message);
        Self {
            bar,
            message: message.to_string(),
            active: true,
        }
    }
}

impl Progress for ScopedSpinner {
    fn finish(&mut self, message: &str) {
        if self.active {
            self.active = false;
            self.bar.stop(message);
        }
    }
}

impl Drop for ScopedSpinner {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            self.bar.error(format!("{} (interrupted)", self.message));
        }
    }
}

/// Reporter printing through cliclack's log helpers
#[derive(Debug, Default, Clone, Copy)]
pub struct CliclackReporter;

impl Reporter for CliclackReporter {
    fn info(&self, message: &str) {
        let _ = cliclack::log::info(message);
    }

    fn success(&self, message: &str) {
        let _ = cliclack::log::success(message);
    }

    fn warning(&self, message: &str) {
        let _ = cliclack::log::warning(message);
    }

    fn progress(&self, message: &str) -> Box<dyn Progress + '_> {
        Box::new(ScopedSpinner::start(message))
    }
}
