//! CSV export of evaluation metrics
//!
//! The core only produces per-checkpoint win/draw/loss rates; this adapter
//! formats them as one CSV row per evaluation for downstream plotting.

use std::{fs::File, path::Path};

use crate::{Result, error::Error, pipeline::evaluation::EvalReport, ports::Observer};

/// Observer writing one CSV record per evaluation checkpoint.
pub struct CsvMetricsWriter {
    writer: csv::Writer<File>,
}

impl CsvMetricsWriter {
    /// Create the output file and write the header row.
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create metrics file {path:?}"),
            source,
        })?;

        let mut writer = csv::Writer::from_writer(file);
        writer.write_record([
            "epoch",
            "first_win_rate",
            "first_draw_rate",
            "first_loss_rate",
            "second_win_rate",
            "second_draw_rate",
            "second_loss_rate",
        ])?;
        writer.flush()?;

        Ok(Self { writer })
    }
}

impl Observer for CsvMetricsWriter {
    fn on_evaluation(&mut self, epoch: usize, report: &EvalReport) -> Result<()> {
        self.writer.write_record([
            epoch.to_string(),
            format!("{:.4}", report.as_first.win_rate()),
            format!("{:.4}", report.as_first.draw_rate()),
            format!("{:.4}", report.as_first.loss_rate()),
            format!("{:.4}", report.as_second.win_rate()),
            format!("{:.4}", report.as_second.draw_rate()),
            format!("{:.4}", report.as_second.loss_rate()),
        ])?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
