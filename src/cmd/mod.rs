mod command;
mod fetch_corpus;
mod prepare_all;
mod prepare_sample;

pub use command::Command;
pub use command::command;
pub use fetch_corpus::FetchCorpus;
pub use prepare_all::PrepareAll;
pub use prepare_sample::PrepareSample;
