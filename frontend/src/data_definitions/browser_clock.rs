//! Clock for the client-side results cache.

use common::ttl_cache::Clock;

/// Milliseconds since page load in the browser, wall-clock time elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> u64 {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now() as u64)
            .unwrap_or(0)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> u64 {
        common::ttl_cache::SystemClock.now_ms()
    }
}
