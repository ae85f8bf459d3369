use std::io::ErrorKind;

use log::debug;
use log::warn;
use reqwest::Client;
use tokio::fs;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::base::temp_file;
use crate::error::Error;
use crate::error::Result;

/// HTTP client sending a fixed User-Agent on every request.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn try_create(user_agent: &str) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Stream the body of `url` into `path`, returning the number of bytes written.
    ///
    /// The body is written to `<path>.tmp` and renamed onto `path` only after
    /// the last chunk arrived, so `path` never holds a truncated download.
    pub async fn download(&self, url: &str, path: &str) -> Result<u64> {
        let temp = temp_file(path);

        match self.download_to(url, &temp).await {
            Ok(written) => {
                if let Err(e) = fs::rename(&temp, path).await {
                    remove_partial(&temp).await;
                    return Err(Error::from(e).add_message(format!("rename {temp} to {path}")));
                }
                Ok(written)
            }
            Err(e) => {
                remove_partial(&temp).await;
                Err(e)
            }
        }
    }

    async fn download_to(&self, url: &str, temp: &str) -> Result<u64> {
        let mut response = self.client.get(url).send().await?.error_for_status()?;
        debug!(
            "GET {url}: status {}, content length {:?}",
            response.status(),
            response.content_length()
        );

        let mut file = File::create(temp)
            .await
            .map_err(|e| Error::from(e).add_message(format!("create {temp}")))?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

async fn remove_partial(temp: &str) {
    match fs::remove_file(temp).await {
        Ok(()) => debug!("removed partial download {temp}"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!("remove partial download {temp} fail: {e}"),
    }
}
