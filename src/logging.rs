use log::{LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::fs::{OpenOptions, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

// The terminal belongs to ratatui, so every record goes to a file.
#[derive(Debug)]
struct FileLogger {
    log_file: PathBuf,
    level: LevelFilter,
}

static LOGGER: OnceCell<FileLogger> = OnceCell::new();

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let log_entry = format!(
                "{} {} - {}\n",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            );

            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.log_file)
            {
                let _ = file.write_all(log_entry.as_bytes());
            }
        }
    }

    fn flush(&self) {}
}

pub fn init(log_dir: &Path, debug: bool) -> Result<(), SetLoggerError> {
    // A missing directory only means records are dropped, the game still runs.
    let _ = create_dir_all(log_dir);
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let logger = LOGGER.get_or_init(|| FileLogger {
        log_file: log_dir.join("log.txt"),
        level,
    });

    log::set_logger(logger).map(|()| log::set_max_level(level))
}
