use std::fs::OpenOptions;
use std::path::Path;

use env_logger::Builder;
use env_logger::Target;
use log::LevelFilter;

use crate::base::ensure_dir;
use crate::config::LogConfig;
use crate::config::LogLevel;
use crate::error::Error;
use crate::error::Result;

static LOG_FILE_NAME: &str = "corpus-prep.log";

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn log_target(log_config: &LogConfig) -> Result<Target> {
    let Some(dir) = &log_config.dir else {
        return Ok(Target::Stdout);
    };

    ensure_dir(dir)?;
    let path = Path::new(dir).join(LOG_FILE_NAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| {
            Error::InitLogError(format!("open log file {} fail", path.display())).set_cause(e)
        })?;
    Ok(Target::Pipe(Box::new(file)))
}

pub fn init_log(log_config: LogConfig) -> Result<()> {
    let target = log_target(&log_config)?;

    Builder::new()
        .filter_level(log_config.level.into())
        .format_timestamp_millis()
        .target(target)
        .try_init()?;

    log::debug!("logger initialized: {log_config}");
    Ok(())
}
