//! Stress tests for SegLog.
//!
//! These helpers drive a log under sustained and concurrent load and report
//! throughput.

use seglog_codec::Record;
use seglog_core::Log;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Result of a stress test run.
#[derive(Debug, Clone)]
pub struct StressTestResult {
    /// Total operations performed.
    pub total_ops: usize,
    /// Successful operations.
    pub successful_ops: usize,
    /// Failed operations.
    pub failed_ops: usize,
    /// Total duration.
    pub duration: Duration,
    /// Operations per second.
    pub ops_per_second: f64,
}

impl StressTestResult {
    /// Creates a new result.
    pub fn new(successful: usize, failed: usize, duration: Duration) -> Self {
        let total = successful + failed;
        let ops_per_second = if duration.as_secs_f64() > 0.0 {
            total as f64 / duration.as_secs_f64()
        } else {
            0.0
        };

        Self {
            total_ops: total,
            successful_ops: successful,
            failed_ops: failed,
            duration,
            ops_per_second,
        }
    }

    /// Combines the results of parallel runs that shared one wall clock.
    fn merge(results: &[StressTestResult], duration: Duration) -> Self {
        let successful = results.iter().map(|r| r.successful_ops).sum();
        let failed = results.iter().map(|r| r.failed_ops).sum();
        Self::new(successful, failed, duration)
    }

    /// Prints a summary of the test.
    pub fn print_summary(&self, name: &str) {
        println!("\n=== {} ===", name);
        println!("Total operations: {}", self.total_ops);
        println!("Successful: {}", self.successful_ops);
        println!("Failed: {}", self.failed_ops);
        println!("Duration: {:?}", self.duration);
        println!("Throughput: {:.2} ops/sec", self.ops_per_second);
    }
}

/// Configuration for stress tests.
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// Number of operations to perform (per thread for concurrent tests).
    pub operations: usize,
    /// Number of concurrent threads (for concurrent tests).
    pub threads: usize,
    /// Size of record values in bytes.
    pub value_size: usize,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            operations: 10_000,
            threads: 4,
            value_size: 256,
        }
    }
}

/// Run a sequential append stress test.
pub fn stress_sequential_appends(log: &Log, config: &StressConfig) -> StressTestResult {
    let value = vec![0xABu8; config.value_size];

    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for _ in 0..config.operations {
        match log.append(Record::new(value.clone())) {
            Ok(_) => successful += 1,
            Err(_) => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Run a sequential read stress test over the offsets already in the log.
pub fn stress_sequential_reads(log: &Log, config: &StressConfig) -> StressTestResult {
    let lowest = log.lowest_offset();
    let span = log.highest_offset().saturating_sub(lowest) + 1;

    let start = Instant::now();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for i in 0..config.operations as u64 {
        match log.read(lowest + i % span) {
            Ok(_) => successful += 1,
            Err(_) => failed += 1,
        }
    }

    StressTestResult::new(successful, failed, start.elapsed())
}

/// Run appends from `config.threads` threads at once.
pub fn stress_concurrent_appends(log: &Arc<Log>, config: &StressConfig) -> StressTestResult {
    let start = Instant::now();

    let handles: Vec<_> = (0..config.threads)
        .map(|_| {
            let log = Arc::clone(log);
            let config = config.clone();
            thread::spawn(move || stress_sequential_appends(&log, &config))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("Stress thread panicked"))
        .collect();

    StressTestResult::merge(&results, start.elapsed())
}

/// Run appends on one thread while the others read the tail.
pub fn stress_append_while_reading(log: &Arc<Log>, config: &StressConfig) -> StressTestResult {
    let start = Instant::now();

    let writer = {
        let log = Arc::clone(log);
        let config = config.clone();
        thread::spawn(move || stress_sequential_appends(&log, &config))
    };

    let readers: Vec<_> = (1..config.threads.max(2))
        .map(|_| {
            let log = Arc::clone(log);
            let operations = config.operations;
            thread::spawn(move || {
                let mut successful = 0usize;
                let mut failed = 0usize;
                let begin = Instant::now();
                for _ in 0..operations {
                    // an empty log has nothing to read yet
                    if log.segments().iter().all(|s| s.base_offset == s.next_offset) {
                        continue;
                    }
                    match log.read(log.highest_offset()) {
                        Ok(_) => successful += 1,
                        Err(_) => failed += 1,
                    }
                }
                StressTestResult::new(successful, failed, begin.elapsed())
            })
        })
        .collect();

    let mut results = vec![writer.join().expect("Writer thread panicked")];
    for reader in readers {
        results.push(reader.join().expect("Reader thread panicked"));
    }

    StressTestResult::merge(&results, start.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::TestLog;
    use seglog_core::LogConfig;

    fn small() -> StressConfig {
        StressConfig {
            operations: 200,
            threads: 4,
            value_size: 32,
        }
    }

    #[test]
    fn sequential_appends_and_reads() {
        let test_log = TestLog::with_config(LogConfig::new().max_store_bytes(512));
        let config = small();

        let result = stress_sequential_appends(&test_log, &config);
        assert_eq!(result.successful_ops, 200);
        assert_eq!(result.failed_ops, 0);

        let result = stress_sequential_reads(&test_log, &config);
        assert_eq!(result.failed_ops, 0);
    }

    #[test]
    fn concurrent_appends_assign_every_offset() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(Log::open(dir.path(), LogConfig::new().max_store_bytes(512)).unwrap());

        let result = stress_concurrent_appends(&log, &small());
        assert_eq!(result.successful_ops, 800);
        assert_eq!(log.highest_offset(), 799);
    }

    #[test]
    fn reads_never_fail_during_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = Arc::new(Log::open(dir.path(), LogConfig::new().max_store_bytes(512)).unwrap());

        let result = stress_append_while_reading(&log, &small());
        assert_eq!(result.failed_ops, 0);
    }
}
