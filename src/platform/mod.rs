//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time (kill feed timestamps)
//! - Seeding the RNG when no seed is configured

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Fresh seed from the OS entropy source (getrandom on the web)
pub fn random_seed() -> u64 {
    rand::random()
}
