//! File logger so log output never lands on the terminal UI.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use khepri_config::Config;
use log::{LevelFilter, Log, Metadata, Record};

const LOG_FILE: &str = "khepri.log";

/// Appends formatted records to a log file.
///
/// Verbosity follows `log::max_level`, so it can change after installation.
struct FileLogger {
    file: Mutex<File>,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(
                file,
                "[{timestamp:.3}] [{:<5}] [{}] {}",
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Location of the log file.
pub fn log_path() -> Option<PathBuf> {
    Config::project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

/// Install the file logger at `level`. Logging stays disabled if the file
/// can't be opened.
pub fn init(level: LevelFilter) {
    let Some(path) = log_path() else {
        return;
    };
    let parent_ready = path
        .parent()
        .is_none_or(|parent| fs::create_dir_all(parent).is_ok());
    if !parent_ready {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let logger = FileLogger {
        file: Mutex::new(file),
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        set_level(level);
    }
}

/// Change verbosity of the installed logger.
pub fn set_level(level: LevelFilter) {
    log::set_max_level(level);
}
