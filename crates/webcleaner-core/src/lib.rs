pub mod buffer;
pub mod config;
pub mod enumerate;
pub mod error;
pub mod logging;
pub mod purge;
pub mod store;

#[cfg(all(windows, feature = "windows-native"))]
pub mod native;


pub use config::PurgeConfig;
pub use error::{CoreError, CoreResult};
pub use purge::CachePurger;
pub use store::{CacheStore, GroupId, RawBuffer};

#[cfg(all(windows, feature = "windows-native"))]
pub use native::NativeCacheStore;

/// Deletes every cache group and cache entry of the current user's URL cache.
///
/// Best effort: failures are absorbed and nothing is reported.
pub fn clear_cache() {
    clear_cache_with(&PurgeConfig::default());
}

/// Purges with `config` applied.
#[cfg(all(windows, feature = "windows-native"))]
pub fn clear_cache_with(config: &PurgeConfig) {
    CachePurger::new(NativeCacheStore, config.clone()).run();
}

/// No native URL cache on this target; does nothing.
#[cfg(not(all(windows, feature = "windows-native")))]
pub fn clear_cache_with(_config: &PurgeConfig) {
    tracing::debug!(error = %CoreError::UnsupportedPlatform, "url cache purge skipped");
}
