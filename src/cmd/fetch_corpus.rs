use super::command::Command;
use crate::config::Config;
use crate::corpus::CorpusFetcher;
use crate::error::Result;

pub struct FetchCorpus {
    fetcher: CorpusFetcher,
}

impl FetchCorpus {
    pub fn try_create(config: Config) -> Result<Box<Self>> {
        Ok(Box::new(FetchCorpus {
            fetcher: CorpusFetcher::new(&config),
        }))
    }
}

#[async_trait::async_trait]
impl Command for FetchCorpus {
    async fn run(&mut self) -> Result<()> {
        let _ = self.fetcher.run().await;
        Ok(())
    }
}
