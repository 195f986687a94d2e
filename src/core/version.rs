//! Build metadata and the plugin API version shared by the registry and
//! externally compiled plugin libraries.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Fallback used when the build script could not read the manifest metadata.
const DEFAULT_API_VERSION: u32 = 20261016;

/// Plugin API version this crate was built with (`YYYYMMDD`).
pub fn get_api_version() -> u32 {
    PLUGIN_API_VERSION.parse().unwrap_or(DEFAULT_API_VERSION)
}

/// Major component (year) of an API version.
pub fn major_version(api_version: u32) -> u32 {
    api_version / 10000
}

/// A plugin built against `plugin_api_version` can be loaded when it shares
/// the host's major version.
pub fn is_api_compatible(plugin_api_version: u32) -> bool {
    major_version(get_api_version()) == major_version(plugin_api_version)
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}
