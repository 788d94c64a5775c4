//! Wall-clock access that also works on `wasm32-unknown-unknown`.

#[cfg(not(target_arch = "wasm32"))]
pub use std::time::{Instant, SystemTime, UNIX_EPOCH};
#[cfg(target_arch = "wasm32")]
pub use web_time::{Instant, SystemTime, UNIX_EPOCH};

/// Seconds of the current day, for clock-driven distortions.
///
/// Wrapped daily so the `f32` stays within a few milliseconds of the truth.
#[must_use]
pub fn wall_clock_seconds() -> f32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0.0, |since| (since.as_secs_f64() % 86_400.0) as f32)
}
