mod arg;
#[allow(clippy::module_inception)]
mod config;

pub use arg::Arg;
pub use arg::ArgCommand;
pub use config::Config;
pub use config::CorpusConfig;
pub use config::DataConfig;
pub use config::LogConfig;
pub use config::LogLevel;
pub use config::SampleConfig;
