//! Process memory sampling for the soft search ceiling

/// Assumed page size for `/proc` RSS figures
#[cfg(target_os = "linux")]
const PAGE_SIZE_BYTES: f64 = 4096.0;

/// Resident set size of this process in megabytes
///
/// Returns `None` where the platform exposes no cheap reading; the search
/// driver then skips its ceiling check entirely.
#[cfg(target_os = "linux")]
pub fn resident_megabytes() -> Option<f64> {
    // Second field of /proc/self/statm is resident pages.
    let statm = std::fs::read_to_string("/proc/self/statm").ok()?;
    let pages: f64 = statm.split_whitespace().nth(1)?.parse().ok()?;
    Some(pages * PAGE_SIZE_BYTES / (1024.0 * 1024.0))
}

/// Resident set size of this process in megabytes
///
/// Returns `None` where the platform exposes no cheap reading; the search
/// driver then skips its ceiling check entirely.
#[cfg(not(target_os = "linux"))]
pub const fn resident_megabytes() -> Option<f64> {
    None
}
