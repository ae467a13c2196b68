/// Progress/log side channel for long-running file operations
///
/// Scan, save, and rename report one step per item through this observer.
/// It is purely a side channel: nothing ever consults it for control flow,
/// and cancellation is not supported, so an in-flight operation always runs
/// to completion.

use chrono::Local;

/// Synchronous progress observer. Implementations must be cheap and
/// non-blocking; they are invoked once per processed item.
pub trait Progress {
    /// Advance by one completed unit of work
    fn advance(&mut self);

    /// Append one line to the operation log
    fn log(&mut self, line: &str);
}

/// Progress sink that discards everything, for headless callers and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProgress;

impl Progress for NullProgress {
    fn advance(&mut self) {}

    fn log(&mut self, _line: &str) {}
}

/// Collects progress into memory so the UI can render a bar and a log
/// pane once the operation completes.
#[derive(Debug, Clone, Default)]
pub struct ProgressLog {
    total_steps: usize,
    completed: usize,
    lines: Vec<String>,
}

impl ProgressLog {
    pub fn new(total_steps: usize) -> Self {
        ProgressLog {
            total_steps,
            completed: 0,
            lines: Vec::new(),
        }
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl Progress for ProgressLog {
    fn advance(&mut self) {
        self.completed += 1;
    }

    fn log(&mut self, line: &str) {
        let timestamp = Local::now().format("%H:%M:%S");
        self.lines.push(format!("[{}] {}", timestamp, line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_log_counts_steps() {
        let mut log = ProgressLog::new(3);
        log.advance();
        log.advance();

        assert_eq!(log.total_steps(), 3);
        assert_eq!(log.completed(), 2);
    }

    #[test]
    fn test_progress_log_timestamps_lines() {
        let mut log = ProgressLog::new(1);
        log.log("Copied a.jpg");

        assert_eq!(log.lines().len(), 1);
        assert!(log.lines()[0].ends_with("Copied a.jpg"));
        assert!(log.lines()[0].starts_with('['));
    }
}
