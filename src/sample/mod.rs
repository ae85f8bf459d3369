mod preparer;
mod random;

pub use preparer::SampleOutcome;
pub use preparer::SamplePreparer;
pub use random::random_bytes;
pub use random::write_random_file;
