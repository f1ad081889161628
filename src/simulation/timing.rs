//! Explicit wall-clock timing handles.

use std::time::{Duration, Instant};

/// Measures one interval. Each measurement owns its own stopwatch.
///
/// # Examples
///
/// ```
/// use u_delivery::simulation::Stopwatch;
///
/// let watch = Stopwatch::start();
/// let lap = watch.elapsed();
/// assert!(watch.stop() >= lap);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    /// Starts timing now.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Time since start, leaving the stopwatch running.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Ends the measurement.
    pub fn stop(self) -> Duration {
        self.started.elapsed()
    }
}
