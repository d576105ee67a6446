use std::fs;
use std::path::PathBuf;

use log::debug;

use super::SampleError;

/// Key/value memory accounting exposed by the kernel.
const PROC_MEMINFO: &str = "/proc/meminfo";

const TOTAL_KEY: &str = "MemTotal:";
const AVAILABLE_KEY: &str = "MemAvailable:";

/// Samples the used share of physical memory from the kernel memory-info
/// file. Stateless between calls.
pub struct MemorySampler {
    meminfo_path: PathBuf,
}

impl MemorySampler {
    /// Sampler over `/proc/meminfo`.
    pub fn new() -> Self {
        Self::with_source(PROC_MEMINFO)
    }

    /// Sampler over an arbitrary memory-info file.
    pub fn with_source(path: impl Into<PathBuf>) -> Self {
        MemorySampler {
            meminfo_path: path.into(),
        }
    }

    /// Percentage of total memory not currently available.
    ///
    /// An unreadable source or one that never reports a (non-zero) total
    /// reads as 0.0.
    pub fn sample(&self) -> f64 {
        match self.read_usage() {
            Ok(usage) => usage,
            Err(err) => {
                debug!("memory sample unavailable: {err}");
                0.0
            }
        }
    }

    fn read_usage(&self) -> Result<f64, SampleError> {
        let contents = fs::read_to_string(&self.meminfo_path).map_err(|source| {
            SampleError::Unreadable {
                path: self.meminfo_path.clone(),
                source,
            }
        })?;

        let mut total = None;
        let mut available = None;
        for line in contents.lines() {
            let mut parts = line.split_whitespace();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            let Ok(kilobytes) = value.parse::<u64>() else {
                continue;
            };
            match key {
                TOTAL_KEY => total = Some(kilobytes),
                AVAILABLE_KEY => available = Some(kilobytes),
                _ => {}
            }
            if total.is_some() && available.is_some() {
                break; // no other keys are needed
            }
        }

        let total = total.filter(|&kb| kb > 0).ok_or_else(|| SampleError::Malformed {
            path: self.meminfo_path.clone(),
        })?;
        let available = available.unwrap_or(0);
        Ok(100.0 * total.saturating_sub(available) as f64 / total as f64)
    }
}

impl Default for MemorySampler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn meminfo(dir: &TempDir, contents: &str) -> MemorySampler {
        let path = dir.path().join("meminfo");
        fs::write(&path, contents).unwrap();
        MemorySampler::with_source(path)
    }

    #[test]
    fn computes_used_share() {
        let dir = TempDir::new().unwrap();
        let sampler = meminfo(
            &dir,
            "MemTotal:       1000 kB\n\
             MemFree:         300 kB\n\
             MemAvailable:    400 kB\n\
             Buffers:          50 kB\n",
        );
        assert_eq!(sampler.sample(), 60.0);
    }

    #[test]
    fn stops_scanning_once_both_keys_are_seen() {
        let dir = TempDir::new().unwrap();
        // A second MemTotal after both keys must not override the first.
        let sampler = meminfo(
            &dir,
            "MemTotal:       1000 kB\n\
             MemAvailable:    400 kB\n\
             MemTotal:          1 kB\n",
        );
        assert_eq!(sampler.sample(), 60.0);
    }

    #[test]
    fn zero_total_reads_zero() {
        let dir = TempDir::new().unwrap();
        let sampler = meminfo(&dir, "MemTotal: 0 kB\nMemAvailable: 0 kB\n");
        assert_eq!(sampler.sample(), 0.0);
    }

    #[test]
    fn missing_total_reads_zero() {
        let dir = TempDir::new().unwrap();
        let sampler = meminfo(&dir, "MemFree: 300 kB\nMemAvailable: 400 kB\n");
        assert_eq!(sampler.sample(), 0.0);
    }

    #[test]
    fn missing_source_reads_zero() {
        let dir = TempDir::new().unwrap();
        let sampler = MemorySampler::with_source(dir.path().join("absent"));
        assert_eq!(sampler.sample(), 0.0);
    }

    #[test]
    fn missing_available_counts_as_fully_used() {
        let dir = TempDir::new().unwrap();
        let sampler = meminfo(&dir, "MemTotal: 1000 kB\nMemFree: 300 kB\n");
        assert_eq!(sampler.sample(), 100.0);
    }

    #[test]
    fn skips_lines_without_a_numeric_value() {
        let dir = TempDir::new().unwrap();
        let sampler = meminfo(
            &dir,
            "garbage\n\
             MemTotal: not-a-number kB\n\
             MemTotal:       1000 kB\n\
             MemAvailable:    400 kB\n",
        );
        assert_eq!(sampler.sample(), 60.0);
    }
}
