//! Terminal progress for generation runs

use indicatif::{ProgressBar, ProgressStyle};

use crate::engine::Progress;
use crate::types::Stage;

const BAR_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg:12} [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, {eta})";
const SPINNER_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] {msg:12} {pos} lines ({per_sec})";

pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template(BAR_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

/// One progress bar per stage; a spinner when the stage size is unknown
pub struct RunProgress {
    visible: bool,
    stage: Option<Stage>,
    bar: ProgressBar,
}

impl RunProgress {
    pub fn new() -> Self {
        Self {
            visible: true,
            stage: None,
            bar: ProgressBar::hidden(),
        }
    }

    /// Progress that never draws, for machine-readable output
    pub fn hidden() -> Self {
        Self {
            visible: false,
            ..Self::new()
        }
    }

    pub fn update(&mut self, progress: &Progress) {
        if self.stage != Some(progress.stage) {
            self.start_stage(progress);
        }
        self.bar.set_position(progress.stage_written);
    }

    /// Current stage label and position
    pub fn position(&self) -> (Option<Stage>, u64) {
        (self.stage, self.bar.position())
    }

    pub fn finish(&mut self) {
        if self.stage.is_some() {
            self.bar.finish();
        }
    }

    fn start_stage(&mut self, progress: &Progress) {
        self.finish();

        let bar = if !self.visible {
            ProgressBar::hidden()
        } else {
            match progress.stage_total {
                Some(total) => {
                    let bar = ProgressBar::new(total);
                    bar.set_style(bar_style());
                    bar
                }
                None => {
                    let bar = ProgressBar::new_spinner();
                    bar.set_style(spinner_style());
                    bar.enable_steady_tick(std::time::Duration::from_millis(120));
                    bar
                }
            }
        };
        bar.set_message(progress.stage.to_string());

        self.bar = bar;
        self.stage = Some(progress.stage);
    }
}

impl Default for RunProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(stage: Stage, written: u64) -> Progress {
        Progress {
            stage,
            stage_written: written,
            total_written: written,
            stage_total: Some(10),
        }
    }

    #[test]
    fn test_stage_switch_resets_position() {
        let mut progress = RunProgress::hidden();
        progress.update(&event(Stage::Mutation, 3));
        assert_eq!(progress.position(), (Some(Stage::Mutation), 3));

        progress.update(&event(Stage::Enumeration, 1));
        assert_eq!(progress.position(), (Some(Stage::Enumeration), 1));
        progress.finish();
    }
}
