use std::fmt::Display;
use std::fmt::Formatter;
use std::fs;

use serde::Deserialize;
use serde::Serialize;

use crate::base::archive_file;
use crate::base::corpus_dir;
use crate::base::path_base;
use crate::base::sample_file;
use crate::error::Error;
use crate::error::Result;

const DEFAULT_DATA_ROOT: &str = "data";
const DEFAULT_CORPUS_NAME: &str = "canterbury";
const DEFAULT_CORPUS_URL: &str = "http://corpus.canterbury.ac.nz/resources/cantrbry.tar.gz";
const DEFAULT_CORPUS_ARCHIVE: &str = "cantrbry.tar.gz";
// some corpus mirrors answer 403 to non-browser clients
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_9_3) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/35.0.1916.47 Safari/537.36";
const DEFAULT_SAMPLE_FILE: &str = "binary_test.bin";
const DEFAULT_SAMPLE_SOURCE: &str = "/bin/ls";
const DEFAULT_SAMPLE_SIZE: usize = 50_000;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub sample: SampleConfig,
}

impl Config {
    pub fn load(config_file: &str) -> Result<Self> {
        let toml_str = match fs::read_to_string(config_file) {
            Ok(toml_str) => toml_str,
            Err(e) => {
                return Err(Error::ReadConfigFail(format!(
                    "read config file {config_file} fail: {e:?}",
                )));
            }
        };

        let config: Config = match toml::from_str(&toml_str) {
            Ok(config) => config,
            Err(e) => {
                return Err(Error::ParseConfigFail(format!(
                    "parse config file {config_file} fail: {e:?}",
                )));
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Load `config_file` when given, otherwise fall back to built-in defaults.
    pub fn load_or_default(config_file: Option<&str>) -> Result<Self> {
        match config_file {
            Some(config_file) => Self::load(config_file),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.data.root.is_empty() {
            return Err(Error::InvalidConfig("data root cannot be empty"));
        }
        self.corpus.validate()?;
        self.sample.validate()?;
        Ok(())
    }

    pub fn corpus_dir(&self) -> String {
        corpus_dir(&self.data.root, &self.corpus.name)
    }

    pub fn archive_file(&self) -> String {
        archive_file(&self.data.root, &self.corpus.archive)
    }

    pub fn sample_file(&self) -> String {
        sample_file(&self.data.root, &self.sample.file)
    }
}

/// Config for logging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    // log file directory, stdout when unset
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl Display for LogConfig {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match &self.dir {
            Some(dir) => write!(f, "level={:?}, dir={}", self.level, dir),
            None => write!(f, "level={:?}, dir=<stdout>", self.level),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    // root dir holding the corpus dir, the transient archive and the sample file
    #[serde(default = "default_data_root")]
    pub root: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_data_root(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    // sub dir of the data root the archive is extracted into
    #[serde(default = "default_corpus_name")]
    pub name: String,

    #[serde(default = "default_corpus_url")]
    pub url: String,

    // file name of the downloaded archive inside the data root
    #[serde(default = "default_corpus_archive")]
    pub archive: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            name: default_corpus_name(),
            url: default_corpus_url(),
            archive: default_corpus_archive(),
            user_agent: default_user_agent(),
        }
    }
}

impl CorpusConfig {
    fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(Error::InvalidConfig("corpus url cannot be empty"));
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "corpus url MUST be http or https: {}",
                self.url
            )));
        }
        validate_file_name("corpus name", &self.name)?;
        validate_file_name("corpus archive", &self.archive)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleConfig {
    // file name of the sample inside the data root
    #[serde(default = "default_sample_file")]
    pub file: String,

    // executable copied as realistic binary data
    #[serde(default = "default_sample_source")]
    pub source: String,

    // byte count of the random fallback
    #[serde(default = "default_sample_size")]
    pub size: usize,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            file: default_sample_file(),
            source: default_sample_source(),
            size: default_sample_size(),
        }
    }
}

impl SampleConfig {
    fn validate(&self) -> Result<()> {
        validate_file_name("sample file", &self.file)?;
        if self.size == 0 {
            return Err(Error::InvalidConfig("sample size cannot be zero"));
        }
        Ok(())
    }
}

// names are joined under the data root and MUST NOT walk out of it
fn validate_file_name(what: &str, name: &str) -> Result<()> {
    match path_base(name) {
        Ok(base) if base == name => Ok(()),
        _ => Err(Error::InvalidConfig(format!(
            "{what} MUST be a plain file name: {name:?}"
        ))),
    }
}

fn default_log_level() -> LogLevel {
    LogLevel::Info
}

fn default_data_root() -> String {
    DEFAULT_DATA_ROOT.to_string()
}

fn default_corpus_name() -> String {
    DEFAULT_CORPUS_NAME.to_string()
}

fn default_corpus_url() -> String {
    DEFAULT_CORPUS_URL.to_string()
}

fn default_corpus_archive() -> String {
    DEFAULT_CORPUS_ARCHIVE.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_sample_file() -> String {
    DEFAULT_SAMPLE_FILE.to_string()
}

fn default_sample_source() -> String {
    DEFAULT_SAMPLE_SOURCE.to_string()
}

fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}
