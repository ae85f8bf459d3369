mod compress;
mod file;
mod string;

pub use compress::unpack_tar_gz;
pub use file::archive_file;
pub use file::corpus_dir;
pub use file::ensure_dir;
pub use file::path_base;
pub use file::path_exists;
pub use file::sample_file;
pub use file::temp_file;
pub use string::format_size;
