//! Build metadata embedded by build.rs

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const RAW_BUILD_NUMBER: Option<&str> = option_env!("NUTRIFIT_BUILD_NUMBER");
const RAW_BUILD_TIMESTAMP: Option<&str> = option_env!("NUTRIFIT_BUILD_TIMESTAMP");

/// Version, build counter and compile time of the running binary
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_number: u64,
    pub build_timestamp: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_raw(RAW_BUILD_NUMBER, RAW_BUILD_TIMESTAMP)
    }

    // Missing or garbled values read as build 0 / "unknown"
    fn from_raw(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.unwrap_or("unknown"),
        }
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    eprintln!("===============================================");
    eprintln!("  NutriFit Engine");
    eprintln!("  Version: {} | Build: {}", info.version, info.build_number);
    eprintln!("  Compiled: {}", info.build_timestamp);
    eprintln!("===============================================");
}
