//! Built-in observers: progress bar and metrics tracking

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    Result,
    game::{Player, Status},
    pipeline::evaluation::EvalReport,
    ports::Observer,
};

/// Progress bar observer - shows training progress and running outcomes
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} O:{} D:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_epochs: usize) -> Result<()> {
        let pb = ProgressBar::new(total_epochs as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} epochs (X:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, epoch: usize, outcome: Status) -> Result<()> {
        match outcome {
            Status::Won(Player::X) => self.x_wins += 1,
            Status::Won(Player::O) => self.o_wins += 1,
            _ => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(epoch as u64);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_evaluation(&mut self, epoch: usize, report: &EvalReport) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.println(format!(
                "epoch {epoch}: as first W/D/L {:.0}%/{:.0}%/{:.0}%, as second {:.0}%/{:.0}%/{:.0}%",
                report.as_first.win_rate() * 100.0,
                report.as_first.draw_rate() * 100.0,
                report.as_first.loss_rate() * 100.0,
                report.as_second.win_rate() * 100.0,
                report.as_second.draw_rate() * 100.0,
                report.as_second.loss_rate() * 100.0,
            ));
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - tracks self-play outcomes and the latest evaluation
pub struct MetricsObserver {
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    total_epochs: usize,
    last_evaluation: Option<(usize, EvalReport)>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self {
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            total_epochs: 0,
            last_evaluation: None,
        }
    }

    pub fn draw_rate(&self) -> f64 {
        if self.total_epochs == 0 {
            0.0
        } else {
            self.draws as f64 / self.total_epochs as f64
        }
    }

    pub fn totals(&self) -> (usize, usize, usize) {
        (self.x_wins, self.o_wins, self.draws)
    }

    pub fn last_evaluation(&self) -> Option<&(usize, EvalReport)> {
        self.last_evaluation.as_ref()
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, _epoch: usize, outcome: Status) -> Result<()> {
        match outcome {
            Status::Won(Player::X) => self.x_wins += 1,
            Status::Won(Player::O) => self.o_wins += 1,
            _ => self.draws += 1,
        }
        self.total_epochs += 1;
        Ok(())
    }

    fn on_evaluation(&mut self, epoch: usize, report: &EvalReport) -> Result<()> {
        self.last_evaluation = Some((epoch, *report));
        Ok(())
    }
}
