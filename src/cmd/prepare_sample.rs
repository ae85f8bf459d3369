use super::command::Command;
use crate::config::Config;
use crate::error::Result;
use crate::sample::SamplePreparer;

pub struct PrepareSample {
    preparer: SamplePreparer,
}

impl PrepareSample {
    pub fn try_create(config: Config) -> Result<Box<Self>> {
        Ok(Box::new(PrepareSample {
            preparer: SamplePreparer::new(&config),
        }))
    }
}

#[async_trait::async_trait]
impl Command for PrepareSample {
    async fn run(&mut self) -> Result<()> {
        let _ = self.preparer.run().await;
        Ok(())
    }
}
