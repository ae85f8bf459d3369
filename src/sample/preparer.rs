use log::error;
use log::info;
use log::warn;

use super::write_random_file;
use crate::base::ensure_dir;
use crate::base::format_size;
use crate::base::path_exists;
use crate::config::Config;
use crate::error::Error;
use crate::error::Result;

#[derive(Debug)]
pub enum SampleOutcome {
    // sample file was already there, nothing written
    Existing,

    Copied { source: String, bytes: u64 },

    Generated { bytes: u64 },

    Failed { error: Error },
}

/// Creates the binary sample file once: a copy of a real executable when one
/// is available, random bytes otherwise.
pub struct SamplePreparer {
    data_dir: String,
    sample_file: String,
    source: String,
    size: usize,
}

impl SamplePreparer {
    pub fn new(config: &Config) -> Self {
        Self {
            data_dir: config.data.root.clone(),
            sample_file: config.sample_file(),
            source: config.sample.source.clone(),
            size: config.sample.size,
        }
    }

    pub fn sample_file(&self) -> &str {
        &self.sample_file
    }

    pub async fn run(&self) -> SampleOutcome {
        if let Err(e) = ensure_dir(&self.data_dir) {
            error!("prepare data dir {} failed: {e}", self.data_dir);
            return SampleOutcome::Failed { error: e };
        }

        if path_exists(&self.sample_file) {
            info!("binary sample {} already exists", self.sample_file);
            return SampleOutcome::Existing;
        }

        info!("preparing binary sample {}...", self.sample_file);
        if path_exists(&self.source) {
            match self.copy_source().await {
                Ok(bytes) => {
                    info!(
                        "copied {} to {}, {}",
                        self.source,
                        self.sample_file,
                        format_size(bytes)
                    );
                    return SampleOutcome::Copied {
                        source: self.source.clone(),
                        bytes,
                    };
                }
                Err(e) => warn!("could not copy {}: {e}", self.source),
            }
        } else {
            warn!("{} not found", self.source);
        }

        self.generate().await
    }

    async fn copy_source(&self) -> Result<u64> {
        tokio::fs::copy(&self.source, &self.sample_file)
            .await
            .map_err(|e| {
                Error::CopyError(format!("copy {} to {}", self.source, self.sample_file))
                    .set_cause(e)
            })
    }

    async fn generate(&self) -> SampleOutcome {
        info!("generating {} of random binary data", format_size(self.size as u64));
        match write_random_file(&self.sample_file, self.size).await {
            Ok(bytes) => {
                info!("generated random binary sample {}", self.sample_file);
                SampleOutcome::Generated { bytes }
            }
            Err(e) => {
                error!("could not generate random binary sample: {e}");
                SampleOutcome::Failed { error: e }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn config_in(root: &std::path::Path, source: &str) -> Config {
        let mut config = Config::default();
        config.data.root = root.to_string_lossy().to_string();
        config.sample.source = source.to_string();
        config
    }

    #[tokio::test]
    async fn test_source_directory_falls_back_to_random() -> Result<()> {
        let temp = tempdir()?;
        let source_dir = temp.path().join("not-a-binary");
        std::fs::create_dir_all(&source_dir)?;
        let config = config_in(&temp.path().join("data"), &source_dir.to_string_lossy());

        let preparer = SamplePreparer::new(&config);
        let outcome = preparer.run().await;

        assert!(matches!(outcome, SampleOutcome::Generated { bytes: 50_000 }));
        assert_eq!(50_000, std::fs::metadata(preparer.sample_file())?.len());
        Ok(())
    }

    #[tokio::test]
    async fn test_unwritable_data_dir_reports_failure() -> Result<()> {
        let temp = tempdir()?;
        let root = temp.path().join("data");
        std::fs::write(&root, b"")?;
        let config = config_in(&root, "/nonexistent/ls");

        let outcome = SamplePreparer::new(&config).run().await;
        assert!(matches!(outcome, SampleOutcome::Failed { .. }));
        Ok(())
    }
}
