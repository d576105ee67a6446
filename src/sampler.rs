use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod cpu;
pub mod memory;

pub use cpu::CpuSampler;
pub use memory::MemorySampler;

/// Why a sampling pass produced no reading.
///
/// Callers report 0.0 for either case; the next scheduled pass re-opens the
/// source and naturally retries.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("could not read {path:?}: {source}")]
    Unreadable { path: PathBuf, source: io::Error },
    #[error("unexpected data in {path:?}")]
    Malformed { path: PathBuf },
}
