use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Error;
use crate::error::Result;

static TEMP_EXTENSION: &str = ".tmp";

fn path_to_string(path: PathBuf) -> String {
    path.to_string_lossy().into_owned()
}

// return base name of path
pub fn path_base(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);
    path_buf
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or(Error::InvalidPath(format!("invalid path {path}")))
}

pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

// create dir and all missing parents, return true if anything was created
pub fn ensure_dir(dir: &str) -> Result<bool> {
    if Path::new(dir).is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)
        .map_err(|e| Error::from(e).add_message(format!("create dir {dir}")))?;
    Ok(true)
}

// returns the dir the corpus archive is extracted into.
pub fn corpus_dir(data_root: &str, corpus_name: &str) -> String {
    path_to_string(Path::new(data_root).join(corpus_name))
}

pub fn archive_file(data_root: &str, archive_name: &str) -> String {
    path_to_string(Path::new(data_root).join(archive_name))
}

pub fn sample_file(data_root: &str, sample_name: &str) -> String {
    path_to_string(Path::new(data_root).join(sample_name))
}

// in-flight download path, renamed onto `path` once complete
pub fn temp_file(path: &str) -> String {
    format!("{path}{TEMP_EXTENSION}")
}
