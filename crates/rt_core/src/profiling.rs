//! Profiling counters.
//!
//! The renderer only ever *notifies* a [`Counters`] implementation; it never
//! reads the totals back. [`AtomicCounters`] is the implementation used for
//! performance reporting.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Receiver for rendering statistics.
///
/// All methods default to doing nothing. Implementations are called from
/// many worker threads at once.
pub trait Counters: Send + Sync {
    /// A primitive was registered with a renderer.
    fn object_registered(&self) {}

    /// A light was registered, weighted by its internal sample count.
    fn light_registered(&self, _samples: u64) {}

    /// A ray was traced.
    fn trace(&self) {}

    /// A light sample contributed to a surface point.
    fn light_sample(&self) {}
}

/// Counters that discard everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCounters;

impl Counters for NullCounters {}

/// Lock-free counters backed by atomics.
#[derive(Debug, Default)]
pub struct AtomicCounters {
    objects: AtomicU64,
    lights: AtomicU64,
    traces: AtomicU64,
    light_samples: AtomicU64,
}

impl AtomicCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> u64 {
        self.objects.load(Ordering::Relaxed)
    }

    pub fn lights(&self) -> u64 {
        self.lights.load(Ordering::Relaxed)
    }

    pub fn traces(&self) -> u64 {
        self.traces.load(Ordering::Relaxed)
    }

    pub fn light_samples(&self) -> u64 {
        self.light_samples.load(Ordering::Relaxed)
    }
}

impl Counters for AtomicCounters {
    fn object_registered(&self) {
        self.objects.fetch_add(1, Ordering::Relaxed);
    }

    fn light_registered(&self, samples: u64) {
        self.lights.fetch_add(samples, Ordering::Relaxed);
    }

    fn trace(&self) {
        self.traces.fetch_add(1, Ordering::Relaxed);
    }

    fn light_sample(&self) {
        self.light_samples.fetch_add(1, Ordering::Relaxed);
    }
}

/// Throughput summary of a finished render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceReport {
    pub pixels: u64,
    pub traces: u64,
    pub seconds: f64,
    pub rays_per_second: f64,
    pub traces_per_second: f64,
    pub pixels_per_second: f64,
    pub traces_per_pixel: f64,
}

impl PerformanceReport {
    /// Summarise the counters of a render that produced `pixels` pixels.
    pub fn new(counters: &AtomicCounters, pixels: u64, elapsed: Duration) -> Self {
        let seconds = elapsed.as_secs_f64();
        // Guard against a zero-length timer on tiny renders.
        let rate = |n: u64| if seconds > 0.0 { n as f64 / seconds } else { 0.0 };
        let traces = counters.traces();

        Self {
            pixels,
            traces,
            seconds,
            rays_per_second: rate(counters.light_samples()),
            traces_per_second: rate(traces),
            pixels_per_second: rate(pixels),
            traces_per_pixel: if pixels > 0 { traces as f64 / pixels as f64 } else { 0.0 },
        }
    }
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Rendered {} pixels from {} traces in {:.3} seconds.",
            self.pixels, self.traces, self.seconds
        )?;
        writeln!(f, "Render performance:")?;
        writeln!(f, "\tRays per second:\t{:.0}", self.rays_per_second)?;
        writeln!(f, "\tTraces per second:\t{:.0}", self.traces_per_second)?;
        writeln!(f, "\tPixels per second:\t{:.0}", self.pixels_per_second)?;
        write!(f, "\tTraces per pixel:\t{:.2}", self.traces_per_pixel)
    }
}
