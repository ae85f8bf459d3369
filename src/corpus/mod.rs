mod downloader;
mod fetcher;

pub use downloader::HttpDownloader;
pub use fetcher::CorpusFetcher;
pub use fetcher::FetchOutcome;
pub use fetcher::FetchStage;
