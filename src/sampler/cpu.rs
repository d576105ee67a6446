use std::fs;
use std::path::PathBuf;

use log::debug;

use super::SampleError;

/// Aggregate tick counters exposed by the kernel.
const PROC_STAT: &str = "/proc/stat";

/// Counters read from the first line: user, nice, system, idle, iowait,
/// irq, softirq.
const TICK_FIELDS: usize = 7;

/// Position of the idle counter within those fields.
const IDLE_FIELD: usize = 3;

/// Samples aggregate CPU utilization from the kernel tick counters.
///
/// Carries the previous total/idle tick counts so each call reports busy
/// time since the call before it. Single writer: only the GUI tick touches
/// an instance.
pub struct CpuSampler {
    stat_path: PathBuf,
    prev_total: u64,
    prev_idle: u64,
}

impl CpuSampler {
    /// Sampler over `/proc/stat`.
    pub fn new() -> Self {
        Self::with_source(PROC_STAT)
    }

    /// Sampler over an arbitrary statistics file.
    pub fn with_source(path: impl Into<PathBuf>) -> Self {
        CpuSampler {
            stat_path: path.into(),
            prev_total: 0,
            prev_idle: 0,
        }
    }

    /// Percentage of non-idle CPU time since the previous call.
    ///
    /// An unreadable or malformed source reads as 0.0 and leaves the stored
    /// baseline untouched, so the next successful call still spans the gap.
    /// The first call measures from boot.
    pub fn sample(&mut self) -> f64 {
        let (total, idle) = match self.read_ticks() {
            Ok(ticks) => ticks,
            Err(err) => {
                debug!("cpu sample unavailable: {err}");
                return 0.0;
            }
        };

        let delta_total = total.saturating_sub(self.prev_total);
        let delta_idle = idle.saturating_sub(self.prev_idle);
        let usage = if delta_total > 0 {
            100.0 * delta_total.saturating_sub(delta_idle) as f64 / delta_total as f64
        } else {
            0.0
        };

        self.prev_total = total;
        self.prev_idle = idle;
        usage
    }

    /// Parse the first line of the source into (total, idle) tick counts.
    fn read_ticks(&self) -> Result<(u64, u64), SampleError> {
        let contents = fs::read_to_string(&self.stat_path).map_err(|source| {
            SampleError::Unreadable {
                path: self.stat_path.clone(),
                source,
            }
        })?;

        let malformed = || SampleError::Malformed {
            path: self.stat_path.clone(),
        };

        let line = contents.lines().next().ok_or_else(malformed)?;
        let mut fields = line.split_whitespace();
        fields.next().ok_or_else(malformed)?; // label token, e.g. "cpu"

        let mut ticks = [0u64; TICK_FIELDS];
        for tick in &mut ticks {
            *tick = fields
                .next()
                .and_then(|field| field.parse().ok())
                .ok_or_else(malformed)?;
        }

        Ok((ticks.iter().sum(), ticks[IDLE_FIELD]))
    }
}

impl Default for CpuSampler {
    fn default() -> Self {
        Self::new()
    }
}
