use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::Error;
use crate::error::Result;

/// `size` bytes straight from the operating system's secure random source.
pub fn random_bytes(size: usize) -> Result<Vec<u8>> {
    let mut buf = vec![0u8; size];
    OsRng.try_fill_bytes(&mut buf)?;
    Ok(buf)
}

pub async fn write_random_file(path: &str, size: usize) -> Result<u64> {
    let data = random_bytes(size)?;
    tokio::fs::write(path, &data)
        .await
        .map_err(|e| Error::RandomError(format!("write random data to {path} fail")).set_cause(e))?;
    Ok(data.len() as u64)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_random_bytes_size() -> Result<()> {
        assert_eq!(50_000, random_bytes(50_000)?.len());
        assert!(random_bytes(0)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_random_bytes_not_constant() -> Result<()> {
        let a = random_bytes(64)?;
        let b = random_bytes(64)?;
        assert_ne!(a, b);
        assert!(a.iter().any(|byte| *byte != 0));
        Ok(())
    }

    #[tokio::test]
    async fn test_write_random_file() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("binary_test.bin");

        let written = write_random_file(&path.to_string_lossy(), 4096).await?;
        assert_eq!(4096, written);
        assert_eq!(4096, std::fs::metadata(&path)?.len());
        Ok(())
    }

    #[tokio::test]
    async fn test_write_random_file_missing_dir() {
        let err = write_random_file("/nonexistent/dir/binary_test.bin", 16)
            .await
            .expect_err("parent dir missing");
        assert_eq!(Error::RANDOM_ERROR, err.code());
    }
}
