//! Run logs for the filter and export pipelines.
//!
//! Every pipeline function takes a `&mut RunLog` and reports through it.
//! A log either echoes to stdout as it goes (CLI) or only records
//! entries (tests, embedding).

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Log level
    pub level: LogLevel,
    /// Log message
    pub message: String,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into() }
    }

    /// Render the entry the way it is echoed to the terminal.
    pub fn render(&self) -> String {
        let prefix = match self.level {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        };
        format!("{} {}", prefix, self.message)
    }
}

/// Collects the log entries of one run.
#[derive(Debug, Default)]
pub struct RunLog {
    entries: Vec<LogEntry>,
    echo: bool,
}

impl RunLog {
    /// Log that prints every entry to stdout as well as recording it.
    pub fn stdout() -> Self {
        Self { entries: Vec::new(), echo: true }
    }

    /// Log that only records entries.
    pub fn quiet() -> Self {
        Self::default()
    }

    /// Record an entry (and print it when echoing).
    pub fn log(&mut self, entry: LogEntry) {
        if self.echo {
            println!("{}", entry.render());
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::info(msg));
    }

    pub fn success(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::success(msg));
    }

    pub fn warning(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::warning(msg));
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.log(LogEntry::error(msg));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Messages logged at `level`, in order.
    pub fn messages(&self, level: LogLevel) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_log_records_entries() {
        let mut log = RunLog::quiet();
        log.info("reading");
        log.warning("only 3 found");
        log.error("bad line");

        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.messages(LogLevel::Warning), vec!["only 3 found"]);
        assert_eq!(log.messages(LogLevel::Error), vec!["bad line"]);
        assert!(log.messages(LogLevel::Success).is_empty());
    }

    #[test]
    fn test_render_prefix() {
        assert_eq!(LogEntry::success("done").render(), "   ✓ done");
        assert_eq!(LogEntry::info("x").render(), "    x");
        assert_eq!(LogEntry::error("bad").render(), "   ❌ bad");
    }
}
