use std::fs::OpenOptions;
use std::io::BufReader;

use flate2::read::GzDecoder;
use log::debug;
use log::warn;
use tar::Archive;

use crate::error::Error;
use crate::error::Result;

fn extract_error(archive_file: &str, e: std::io::Error) -> Error {
    Error::ExtractError(format!("extract {archive_file} fail")).set_cause(e)
}

/// Unpack every member of a gzip-compressed tar into `target_dir`.
///
/// Members whose path would land outside `target_dir` are skipped with a
/// warning. Returns the number of regular files written; directories and
/// other member kinds are unpacked but not counted.
pub fn unpack_tar_gz(archive_file: &str, target_dir: &str) -> Result<u64> {
    let file = OpenOptions::new()
        .read(true)
        .open(archive_file)
        .map_err(|e| extract_error(archive_file, e))?;
    let mut archive = Archive::new(GzDecoder::new(BufReader::new(file)));

    let mut unpacked = 0;
    let entries = archive
        .entries()
        .map_err(|e| extract_error(archive_file, e))?;
    for entry in entries {
        let mut entry = entry.map_err(|e| extract_error(archive_file, e))?;
        let path = entry
            .path()
            .map(|path| path.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_file = entry.header().entry_type().is_file();

        if entry
            .unpack_in(target_dir)
            .map_err(|e| extract_error(archive_file, e))?
        {
            debug!("unpacked {path}");
            if is_file {
                unpacked += 1;
            }
        } else {
            warn!("skip archive member {path:?} outside of {target_dir}");
        }
    }

    Ok(unpacked)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use tempfile::tempdir;

    use super::unpack_tar_gz;
    use crate::error::Error;
    use crate::error::Result;

    fn build_tar_gz(members: &[(&str, &[u8])]) -> Vec<u8> {
        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        for (name, data) in members {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            builder
                .append_data(&mut header, name, *data)
                .expect("append member");
        }
        builder
            .into_inner()
            .expect("finish tar")
            .finish()
            .expect("finish gzip")
    }

    #[test]
    fn test_unpack_all_members() -> Result<()> {
        let temp = tempdir()?;
        let archive = temp.path().join("cantrbry.tar.gz");
        let target = temp.path().join("canterbury");
        fs::create_dir_all(&target)?;
        fs::write(
            &archive,
            build_tar_gz(&[
                ("alice29.txt", &b"Alice was beginning to get very tired"[..]),
                ("fields.c", &b"int main(void) { return 0; }"[..]),
                ("sum", &[0x7f, b'E', b'L', b'F', 0, 1, 2, 3][..]),
            ]),
        )?;

        let unpacked = unpack_tar_gz(&archive.to_string_lossy(), &target.to_string_lossy())?;
        assert_eq!(3, unpacked);
        assert_eq!(
            b"Alice was beginning to get very tired".to_vec(),
            fs::read(target.join("alice29.txt"))?
        );
        assert_eq!(8, fs::read(target.join("sum"))?.len());
        // extraction never removes the archive itself
        assert!(archive.exists());

        Ok(())
    }

    #[test]
    fn test_unpack_skips_member_outside_target() -> Result<()> {
        let temp = tempdir()?;
        let archive = temp.path().join("evil.tar.gz");
        let target = temp.path().join("canterbury");
        fs::create_dir_all(&target)?;

        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let data = b"escaped";
        let mut header = tar::Header::new_old();
        let name = b"../escaped.txt";
        header.as_old_mut().name[..name.len()].copy_from_slice(name);
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append(&header, &data[..]).expect("append raw member");
        let mut good = tar::Header::new_gnu();
        good.set_size(4);
        good.set_mode(0o644);
        builder
            .append_data(&mut good, "kept.txt", &b"kept"[..])
            .expect("append member");
        let bytes = builder
            .into_inner()
            .expect("finish tar")
            .finish()
            .expect("finish gzip");
        fs::write(&archive, bytes)?;

        let unpacked = unpack_tar_gz(&archive.to_string_lossy(), &target.to_string_lossy())?;
        assert_eq!(1, unpacked);
        assert!(target.join("kept.txt").exists());
        assert!(!temp.path().join("escaped.txt").exists());

        Ok(())
    }

    #[test]
    fn test_unpack_counts_only_files() -> Result<()> {
        let temp = tempdir()?;
        let archive = temp.path().join("cantrbry.tar.gz");
        let target = temp.path().join("canterbury");
        fs::create_dir_all(&target)?;

        let encoder = GzEncoder::new(Vec::new(), Compression::default());
        let mut builder = tar::Builder::new(encoder);
        let mut dir = tar::Header::new_gnu();
        dir.set_entry_type(tar::EntryType::Directory);
        dir.set_size(0);
        dir.set_mode(0o755);
        builder
            .append_data(&mut dir, "large/", std::io::empty())
            .expect("append dir");
        let mut file = tar::Header::new_gnu();
        file.set_size(5);
        file.set_mode(0o644);
        builder
            .append_data(&mut file, "large/bible.txt", &b"In th"[..])
            .expect("append file");
        let bytes = builder
            .into_inner()
            .expect("finish tar")
            .finish()
            .expect("finish gzip");
        fs::write(&archive, bytes)?;

        let unpacked = unpack_tar_gz(&archive.to_string_lossy(), &target.to_string_lossy())?;
        assert_eq!(1, unpacked);
        assert!(target.join("large").is_dir());
        assert!(target.join("large").join("bible.txt").exists());

        Ok(())
    }

    #[test]
    fn test_unpack_corrupt_archive() -> Result<()> {
        let temp = tempdir()?;
        let archive = temp.path().join("cantrbry.tar.gz");
        fs::write(&archive, b"<html>403 Forbidden</html>")?;

        let err = unpack_tar_gz(
            &archive.to_string_lossy(),
            &temp.path().join("canterbury").to_string_lossy(),
        )
        .expect_err("not a gzip stream");
        assert_eq!(Error::EXTRACT_ERROR, err.code());

        Ok(())
    }

    #[test]
    fn test_unpack_missing_archive() {
        let err = unpack_tar_gz("/nonexistent/cantrbry.tar.gz", "/nonexistent/canterbury")
            .expect_err("missing archive");
        assert_eq!(Error::EXTRACT_ERROR, err.code());
    }
}
