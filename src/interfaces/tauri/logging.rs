use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Oldest entries are dropped past this size
const MAX_LOG_ENTRIES: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub type LogBuffer = Arc<Mutex<Vec<LogEntry>>>;

pub fn new_log_buffer() -> LogBuffer {
    Arc::new(Mutex::new(Vec::new()))
}

/// Append to the in-app log panel and mirror to tracing
pub fn add_log(logs: &LogBuffer, level: &str, source: &str, message: &str) {
    match level {
        "ERROR" => error!(source, "{}", message),
        "WARN" => warn!(source, "{}", message),
        _ => info!(source, "{}", message),
    }

    let entry = LogEntry {
        timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };

    if let Ok(mut guard) = logs.lock() {
        guard.push(entry);
        if guard.len() > MAX_LOG_ENTRIES {
            let overflow = guard.len() - MAX_LOG_ENTRIES;
            guard.drain(..overflow);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_log_appends_entry() {
        let logs = new_log_buffer();
        add_log(&logs, "INFO", "Campaign", "started");

        let guard = logs.lock().unwrap();
        assert_eq!(guard.len(), 1);
        assert_eq!(guard[0].level, "INFO");
        assert_eq!(guard[0].source, "Campaign");
        assert_eq!(guard[0].message, "started");
    }

    #[test]
    fn test_buffer_is_capped() {
        let logs = new_log_buffer();
        for i in 0..(MAX_LOG_ENTRIES + 10) {
            add_log(&logs, "INFO", "Test", &format!("entry {}", i));
        }

        let guard = logs.lock().unwrap();
        assert_eq!(guard.len(), MAX_LOG_ENTRIES);
        assert_eq!(guard[0].message, "entry 10");
    }
}
