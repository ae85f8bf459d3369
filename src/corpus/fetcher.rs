use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

use log::error;
use log::info;
use log::warn;

use super::HttpDownloader;
use crate::base::ensure_dir;
use crate::base::format_size;
use crate::base::path_exists;
use crate::base::unpack_tar_gz;
use crate::config::Config;
use crate::config::CorpusConfig;
use crate::error::Error;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Prepare,
    Download,
    Extract,
}

impl Display for FetchStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FetchStage::Prepare => write!(f, "prepare"),
            FetchStage::Download => write!(f, "download"),
            FetchStage::Extract => write!(f, "extract"),
        }
    }
}

#[derive(Debug)]
pub enum FetchOutcome {
    Ready { entries: u64 },

    Failed { stage: FetchStage, error: Error },
}

impl FetchOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchOutcome::Ready { .. })
    }

    pub fn failed_stage(&self) -> Option<FetchStage> {
        match self {
            FetchOutcome::Ready { .. } => None,
            FetchOutcome::Failed { stage, .. } => Some(*stage),
        }
    }
}

/// Downloads the corpus archive, unpacks it under the data root and removes
/// the archive afterwards.
pub struct CorpusFetcher {
    config: CorpusConfig,
    corpus_dir: String,
    archive_file: String,
}

impl CorpusFetcher {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.corpus.clone(),
            corpus_dir: config.corpus_dir(),
            archive_file: config.archive_file(),
        }
    }

    pub fn corpus_dir(&self) -> &str {
        &self.corpus_dir
    }

    pub fn archive_file(&self) -> &str {
        &self.archive_file
    }

    /// Run every stage in order. Failures are logged and reported through
    /// the outcome, never returned as errors.
    pub async fn run(&self) -> FetchOutcome {
        if let Err(e) = self.prepare() {
            return self.fail(FetchStage::Prepare, e);
        }

        // only the archive is checked, an already extracted corpus is fetched again
        if path_exists(&self.archive_file) {
            info!(
                "archive {} already present, skip download",
                self.archive_file
            );
        } else {
            info!(
                "downloading {} corpus from {}...",
                self.config.name, self.config.url
            );
            match self.download().await {
                Ok(written) => info!("download complete, {}", format_size(written)),
                Err(e) => return self.fail(FetchStage::Download, e),
            }
        }

        info!("extracting {}...", self.archive_file);
        let entries = match self.extract().await {
            Ok(entries) => entries,
            Err(e) => return self.fail(FetchStage::Extract, e),
        };
        info!("extracted {entries} files to {}", self.corpus_dir);

        self.cleanup().await;

        info!("{} corpus ready", self.config.name);
        FetchOutcome::Ready { entries }
    }

    fn prepare(&self) -> Result<()> {
        if ensure_dir(&self.corpus_dir)? {
            info!("created directory {}", self.corpus_dir);
        }
        Ok(())
    }

    async fn download(&self) -> Result<u64> {
        let downloader = HttpDownloader::try_create(&self.config.user_agent)?;
        downloader
            .download(&self.config.url, &self.archive_file)
            .await
    }

    async fn extract(&self) -> Result<u64> {
        let archive_file = self.archive_file.clone();
        let corpus_dir = self.corpus_dir.clone();
        tokio::task::spawn_blocking(move || unpack_tar_gz(&archive_file, &corpus_dir)).await?
    }

    async fn cleanup(&self) {
        match tokio::fs::remove_file(&self.archive_file).await {
            Ok(()) => info!("removed archive {}", self.archive_file),
            Err(e) => warn!("remove archive {} fail: {e}", self.archive_file),
        }
    }

    fn fail(&self, stage: FetchStage, error: Error) -> FetchOutcome {
        error!("{} corpus {stage} failed: {error}", self.config.name);
        FetchOutcome::Failed { stage, error }
    }
}
