use super::FetchCorpus;
use super::PrepareAll;
use super::PrepareSample;
use crate::config::Arg;
use crate::config::ArgCommand;
use crate::config::Config;
use crate::error::Result;
use crate::log::init_log;

#[async_trait::async_trait]
pub trait Command {
    async fn run(&mut self) -> Result<()>;
}

// config and logger errors abort startup, everything after that is only logged
pub fn command(arg: Arg) -> Result<Box<dyn Command>> {
    let config = Config::load_or_default(arg.config.as_deref())?;
    init_log(config.log.clone())?;

    match arg.command_or_default() {
        ArgCommand::Fetch => Ok(FetchCorpus::try_create(config)?),
        ArgCommand::Sample => Ok(PrepareSample::try_create(config)?),
        ArgCommand::All => Ok(PrepareAll::try_create(config)?),
    }
}
