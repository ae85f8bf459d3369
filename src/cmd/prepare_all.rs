use log::info;
use log::warn;

use super::command::Command;
use crate::config::Config;
use crate::corpus::CorpusFetcher;
use crate::error::Result;
use crate::sample::SampleOutcome;
use crate::sample::SamplePreparer;

/// Fetch the corpus, then prepare the binary sample. A failed fetch does not
/// stop the sample step.
pub struct PrepareAll {
    fetcher: CorpusFetcher,
    preparer: SamplePreparer,
}

impl PrepareAll {
    pub fn try_create(config: Config) -> Result<Box<Self>> {
        Ok(Box::new(PrepareAll {
            fetcher: CorpusFetcher::new(&config),
            preparer: SamplePreparer::new(&config),
        }))
    }
}

#[async_trait::async_trait]
impl Command for PrepareAll {
    async fn run(&mut self) -> Result<()> {
        let fetched = self.fetcher.run().await;
        let sample = self.preparer.run().await;

        let sample_ok = !matches!(sample, SampleOutcome::Failed { .. });
        if fetched.is_ready() && sample_ok {
            info!("benchmark data ready");
        } else {
            warn!(
                "benchmark data incomplete: corpus {}, sample {}",
                if fetched.is_ready() { "ready" } else { "failed" },
                if sample_ok { "ready" } else { "failed" }
            );
        }
        Ok(())
    }
}
