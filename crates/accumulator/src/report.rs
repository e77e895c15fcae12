//! Final metrics of a calibration run and the append-only results log.

use crate::{CalibrationConfig, RunningStats};
use chrono::{DateTime, SecondsFormat, Utc};
use std::{
    fmt,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

/// The final totals of a calibration run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// When the report was produced.
    pub timestamp: DateTime<Utc>,
    /// The first block height fetched.
    pub starting_block: u64,
    /// The number of blobs the channel was sized for.
    pub blobs: u64,
    /// The configured transaction byte threshold.
    pub min_tx_bytes: u64,
    /// Encoded frame bytes emitted over every epoch.
    pub total_frame_bytes: u64,
    /// Chargeable transaction bytes packed into those frames.
    pub total_tx_bytes: u64,
    /// `total_frame_bytes / total_tx_bytes`, [f64::NAN] if no transaction bytes were processed.
    pub ratio: f64,
    /// The number of blocks packed.
    pub blocks_processed: u64,
    /// The number of channel flushes.
    pub flushes: u64,
    /// The compression algorithm name.
    pub compression_algo: String,
}

impl Report {
    /// Builds a [Report] from the run configuration and the flushed counters.
    pub fn new(cfg: &CalibrationConfig, stats: &RunningStats, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            starting_block: cfg.starting_block,
            blobs: cfg.blobs,
            min_tx_bytes: cfg.min_tx_bytes,
            total_frame_bytes: stats.flushed_frame_bytes,
            total_tx_bytes: stats.flushed_tx_bytes,
            ratio: stats.ratio(),
            blocks_processed: stats.blocks_processed,
            flushes: stats.flushes,
            compression_algo: cfg.compression_algo.clone(),
        }
    }

    /// Renders the record appended to the results log.
    pub fn to_record(&self) -> String {
        format!(
            "[{}] Starting block: {}\nNumber of blobs: {}\nMinimum tx bytes: {}\nTotal frames size: {}\nTotal tx size: {}\nCompression ratio: {:.6}\nNumber block processed: {}\nCompression Algo: {}\n\n",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.starting_block,
            self.blobs,
            self.min_tx_bytes,
            self.total_frame_bytes,
            self.total_tx_bytes,
            self.ratio,
            self.blocks_processed,
            self.compression_algo,
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total frames size: {}, total tx size: {}, compression ratio: {:.6}, blocks processed: {}, flushes: {}",
            self.total_frame_bytes,
            self.total_tx_bytes,
            self.ratio,
            self.blocks_processed,
            self.flushes
        )
    }
}

/// An append-only text log of [Report] records.
#[derive(Debug)]
pub struct ResultsLog {
    file: File,
}

impl ResultsLog {
    /// Opens the log at `path`, creating it if missing. Existing records are kept.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    /// Appends the record of the given [Report].
    pub fn append(&mut self, report: &Report) -> io::Result<()> {
        self.file.write_all(report.to_record().as_bytes())?;
        self.file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        test_utils::{TestBlockSource, TestChannel},
        Accumulator,
    };
    use chrono::TimeZone;

    fn report() -> Report {
        let cfg = CalibrationConfig {
            starting_block: 11_443_817,
            min_tx_bytes: 4_500_000,
            blobs: 3,
            compression_algo: "brotli-10".to_string(),
        };
        let mut stats = RunningStats::default();
        stats.record_block(1_000);
        stats.record_block(1_000);
        stats.record_flush(500);
        Report::new(&cfg, &stats, Utc.with_ymd_and_hms(2024, 3, 14, 0, 0, 1).unwrap())
    }

    #[test]
    fn test_record_format() {
        let expected = "[2024-03-14T00:00:01Z] Starting block: 11443817\n\
                        Number of blobs: 3\n\
                        Minimum tx bytes: 4500000\n\
                        Total frames size: 500\n\
                        Total tx size: 2000\n\
                        Compression ratio: 0.250000\n\
                        Number block processed: 2\n\
                        Compression Algo: brotli-10\n\n";
        assert_eq!(report().to_record(), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            report().to_string(),
            "total frames size: 500, total tx size: 2000, compression ratio: 0.250000, blocks processed: 2, flushes: 1"
        );
    }

    #[test]
    fn test_nan_ratio_is_rendered() {
        let report = Report::new(&CalibrationConfig::default(), &RunningStats::default(), Utc::now());
        assert!(report.ratio.is_nan());
        assert!(report.to_record().contains("Compression ratio: NaN\n"));
    }

    #[test]
    fn test_results_log_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let record = report().to_record();

        let mut log = ResultsLog::open(&path).unwrap();
        log.append(&report()).unwrap();
        drop(log);
        let mut log = ResultsLog::open(&path).unwrap();
        log.append(&report()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("{record}{record}"));
    }

    #[tokio::test]
    async fn test_failed_run_appends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.txt");
        let mut log = ResultsLog::open(&path).unwrap();

        let cfg = CalibrationConfig { starting_block: 0, min_tx_bytes: 100, ..Default::default() };
        let source = TestBlockSource::with_sizes(0, &[40]).fail_at(0);
        let outcome = Accumulator::new(cfg, source, TestChannel::new(100)).run().await;
        if let Ok(report) = &outcome {
            log.append(report).unwrap();
        }

        assert!(outcome.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
