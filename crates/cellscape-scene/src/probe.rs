//! Environment probing for tier selection.

use std::hint::black_box;
use std::time::Instant;

use cellscape_core::EnvSignals;
use sysinfo::System;

/// Allocations timed by the micro-benchmark.
pub const BENCHMARK_ITERATIONS: usize = 1000;

/// Host-supplied signals that cannot be detected from inside the process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostSignals {
    pub viewport_width: u32,
    pub coarse_pointer: bool,
    pub device_pixel_ratio: f32,
}

/// Probe cores and run the benchmark, combining them with `host`.
pub fn probe_environment(host: HostSignals) -> EnvSignals {
    let env = EnvSignals {
        viewport_width: host.viewport_width,
        cores: logical_cores(),
        benchmark_ms: allocation_benchmark_ms(),
        coarse_pointer: host.coarse_pointer,
        device_pixel_ratio: host.device_pixel_ratio,
    };
    tracing::debug!(?env, "probed environment");
    env
}

/// Logical core count, at least 1.
pub fn logical_cores() -> usize {
    let mut sys = System::new();
    sys.refresh_cpu_all();
    sys.cpus().len().max(1)
}

/// Time a fixed number of small heap allocations, in milliseconds.
pub fn allocation_benchmark_ms() -> f64 {
    let start = Instant::now();
    for i in 0..BENCHMARK_ITERATIONS {
        black_box(Box::new([i as u64; 4]));
    }
    start.elapsed().as_secs_f64() * 1000.0
}
