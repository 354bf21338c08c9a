//! Version information.

#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Version with target platform, shown in verbose benchmark banners.
#[must_use]
pub fn full_version() -> String {
    format!(
        "strassen {} ({}-{})",
        version(),
        std::env::consts::ARCH,
        std::env::consts::OS
    )
}
