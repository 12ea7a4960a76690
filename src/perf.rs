//! Performance instrumentation for the simulation core.
//!
//! Lightweight named timers record operation durations into a global
//! registry, which can be summarized to the console or dumped to a report
//! file. Instrumentation is enabled in debug builds by default and designed
//! to cost next to nothing when disabled.
//!
//! The registry sits behind a `Mutex` purely so the timers compose from
//! anywhere; no game state lives here.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Local;

/// Configuration for the instrumentation layer.
#[derive(Debug, Clone)]
pub struct PerfConfig {
    /// Whether measurements are recorded at all.
    pub enabled: bool,
    /// Whether each stopped timer also prints its duration.
    pub print_results: bool,
    /// Durations below this threshold are dropped as noise.
    pub min_duration_threshold: Duration,
}

impl Default for PerfConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            print_results: false,
            min_duration_threshold: Duration::from_micros(100),
        }
    }
}

/// Aggregate statistics for one named operation.
#[derive(Debug, Clone)]
pub struct OperationStats {
    /// Number of recorded measurements.
    pub count: usize,
    /// Sum of all recorded durations.
    pub total_duration: Duration,
    /// Shortest recorded duration.
    pub min_duration: Duration,
    /// Longest recorded duration.
    pub max_duration: Duration,
    /// Mean recorded duration.
    pub avg_duration: Duration,
}

impl OperationStats {
    fn new() -> Self {
        Self {
            count: 0,
            total_duration: Duration::ZERO,
            min_duration: Duration::MAX,
            max_duration: Duration::ZERO,
            avg_duration: Duration::ZERO,
        }
    }

    fn update(&mut self, duration: Duration) {
        self.count += 1;
        self.total_duration += duration;
        self.min_duration = self.min_duration.min(duration);
        self.max_duration = self.max_duration.max(duration);
        self.avg_duration = self.total_duration / self.count as u32;
    }
}

lazy_static::lazy_static! {
    /// Global store for all recorded measurements.
    static ref MEASUREMENTS: Arc<Mutex<HashMap<String, OperationStats>>> =
        Arc::new(Mutex::new(HashMap::new()));
}

/// Records one measurement for the named operation.
pub fn record_measurement(name: &str, duration: Duration) {
    MEASUREMENTS
        .lock()
        .unwrap()
        .entry(name.to_string())
        .or_insert_with(OperationStats::new)
        .update(duration);
}

/// Returns a copy of all recorded measurements, keyed by operation name.
pub fn get_measurements() -> HashMap<String, OperationStats> {
    MEASUREMENTS.lock().unwrap().clone()
}

/// Clears all recorded measurements.
pub fn clear_measurements() {
    MEASUREMENTS.lock().unwrap().clear();
}

/// A manual timer for one named operation.
///
/// Starts timing when created; [`stop`](Timer::stop) records the elapsed
/// time into the global registry if it clears the configured threshold.
pub struct Timer {
    name: String,
    started_at: Instant,
    config: PerfConfig,
}

impl Timer {
    /// Starts a timer with the default configuration.
    pub fn new(name: &str) -> Self {
        Self::with_config(name, PerfConfig::default())
    }

    /// Starts a timer with an explicit configuration.
    pub fn with_config(name: &str, config: PerfConfig) -> Self {
        Self {
            name: name.to_string(),
            started_at: Instant::now(),
            config,
        }
    }

    /// Stops the timer, records the measurement, and returns the elapsed
    /// time.
    pub fn stop(self) -> Duration {
        let duration = self.started_at.elapsed();

        if self.config.enabled && duration >= self.config.min_duration_threshold {
            record_measurement(&self.name, duration);

            if self.config.print_results {
                println!("[PERF] {}: {:?}", self.name, duration);
            }
        }

        duration
    }
}

/// A timer that records automatically when it goes out of scope.
pub struct ScopedTimer {
    timer: Option<Timer>,
}

impl ScopedTimer {
    /// Starts a scoped timer with the default configuration.
    pub fn new(name: &str) -> Self {
        Self {
            timer: Some(Timer::new(name)),
        }
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            let _ = timer.stop();
        }
    }
}

/// Times a closure under the given operation name and passes its result
/// through.
pub fn time<F, R>(name: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let timer = Timer::new(name);
    let result = f();
    timer.stop();
    result
}

/// Prints a table of all recorded measurements, most expensive first.
pub fn print_summary() {
    let measurements = get_measurements();
    if measurements.is_empty() {
        println!("[PERF] No measurements recorded");
        return;
    }

    let mut rows: Vec<_> = measurements.into_iter().collect();
    rows.sort_by(|a, b| b.1.total_duration.cmp(&a.1.total_duration));

    println!("\n=== PERFORMANCE SUMMARY ===");
    println!(
        "{:<28} | {:>6} | {:>12} | {:>12} | {:>12} | {:>12}",
        "Operation", "Count", "Total", "Avg", "Min", "Max"
    );
    println!("{}", "-".repeat(96));
    for (name, stats) in &rows {
        println!(
            "{:<28} | {:>6} | {:>12} | {:>12} | {:>12} | {:>12}",
            name,
            stats.count,
            format!("{:?}", stats.total_duration),
            format!("{:?}", stats.avg_duration),
            format!("{:?}", stats.min_duration),
            format!("{:?}", stats.max_duration),
        );
    }
    println!();
}

/// Writes all recorded measurements to a timestamped report file in the
/// `perf-reports` directory and returns its path.
///
/// Failures are reported to stderr and returned; callers that only dump
/// reports opportunistically can ignore the result.
pub fn save_report() -> Result<PathBuf, io::Error> {
    let filename = Local::now().format("perf_%m-%d-%y_%I-%M%p.txt").to_string();
    let report_dir = Path::new("perf-reports");
    let report_path = report_dir.join(filename);

    if let Err(e) = fs::create_dir_all(report_dir) {
        eprintln!("[PERF] Failed to create report directory: {}", e);
        return Err(e);
    }

    let mut report = format!(
        "Performance report - {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let mut rows: Vec<_> = get_measurements().into_iter().collect();
    if rows.is_empty() {
        report.push_str("No measurements recorded.\n");
    } else {
        rows.sort_by(|a, b| b.1.total_duration.cmp(&a.1.total_duration));
        for (name, stats) in &rows {
            report.push_str(&format!(
                "{}: count {}, total {:?}, avg {:?}, min {:?}, max {:?}\n",
                name,
                stats.count,
                stats.total_duration,
                stats.avg_duration,
                stats.min_duration,
                stats.max_duration
            ));
        }
    }

    if let Err(e) = fs::write(&report_path, report) {
        eprintln!("[PERF] Failed to write report: {}", e);
        return Err(e);
    }

    println!("Performance report saved to: {}", report_path.display());
    Ok(report_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    /// Serializes the tests that touch the global registry, since clearing
    /// it mid-test would race against parallel test threads.
    static TEST_GUARD: Mutex<()> = Mutex::new(());

    /// An always-on configuration so the tests behave the same in release
    /// mode.
    fn recording_config() -> PerfConfig {
        PerfConfig {
            enabled: true,
            print_results: false,
            min_duration_threshold: Duration::from_micros(100),
        }
    }

    /// A stopped timer lands in the registry with its duration.
    #[test]
    fn test_timer_records_measurement() {
        let _guard = TEST_GUARD.lock().unwrap();

        let timer = Timer::with_config("perf timer probe", recording_config());
        thread::sleep(Duration::from_millis(10));
        let duration = timer.stop();

        assert!(duration >= Duration::from_millis(10));
        let stats = &get_measurements()["perf timer probe"];
        assert_eq!(stats.count, 1);
        assert!(stats.total_duration >= Duration::from_millis(10));
    }

    /// `time` passes the closure result through and records the run.
    #[test]
    fn test_time_closure_passes_result_through() {
        let _guard = TEST_GUARD.lock().unwrap();

        let value = time("perf closure probe", || {
            thread::sleep(Duration::from_millis(5));
            42
        });

        assert_eq!(value, 42);
        if cfg!(debug_assertions) {
            assert!(get_measurements().contains_key("perf closure probe"));
        }
    }

    /// A scoped timer records when it falls out of scope.
    #[test]
    fn test_scoped_timer_records_on_drop() {
        let _guard = TEST_GUARD.lock().unwrap();

        {
            let _timer = ScopedTimer::new("perf scope probe");
            thread::sleep(Duration::from_millis(6));
        }

        if cfg!(debug_assertions) {
            let stats = &get_measurements()["perf scope probe"];
            assert!(stats.max_duration >= Duration::from_millis(6));
        }
    }

    /// Statistics aggregate count, total, min, max, and average exactly.
    #[test]
    fn test_stats_aggregate_exactly() {
        let _guard = TEST_GUARD.lock().unwrap();

        record_measurement("perf stats probe", Duration::from_millis(10));
        record_measurement("perf stats probe", Duration::from_millis(20));
        record_measurement("perf stats probe", Duration::from_millis(30));

        let stats = &get_measurements()["perf stats probe"];
        assert_eq!(stats.count, 3);
        assert_eq!(stats.total_duration, Duration::from_millis(60));
        assert_eq!(stats.min_duration, Duration::from_millis(10));
        assert_eq!(stats.max_duration, Duration::from_millis(30));
        assert_eq!(stats.avg_duration, Duration::from_millis(20));
    }

    /// Durations under the configured threshold are dropped.
    #[test]
    fn test_below_threshold_not_recorded() {
        let _guard = TEST_GUARD.lock().unwrap();

        let config = PerfConfig {
            enabled: true,
            print_results: false,
            min_duration_threshold: Duration::from_secs(60),
        };
        let timer = Timer::with_config("perf threshold probe", config);
        thread::sleep(Duration::from_millis(5));
        timer.stop();

        assert!(!get_measurements().contains_key("perf threshold probe"));
    }

    /// Clearing empties the registry of previously recorded names.
    #[test]
    fn test_clear_removes_measurements() {
        let _guard = TEST_GUARD.lock().unwrap();

        record_measurement("perf clear probe", Duration::from_millis(7));
        assert!(get_measurements().contains_key("perf clear probe"));

        clear_measurements();
        assert!(!get_measurements().contains_key("perf clear probe"));
    }

    /// Report dumping returns the path it wrote.
    #[test]
    fn test_save_report_writes_file() {
        let _guard = TEST_GUARD.lock().unwrap();

        record_measurement("perf report probe", Duration::from_millis(3));
        let path = save_report().unwrap();
        assert!(path.exists());

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("perf report probe"));
        fs::remove_file(&path).ok();
    }
}
