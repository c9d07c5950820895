//! Units formatting and conversion utilities
//!
//! Human-readable sizes, durations and throughput for the report and the
//! debug log.

use std::time::Duration;

const MIB: f64 = 1024.0 * 1024.0;

/// Convert a byte count to mebibytes (the report's "MB")
///
/// # Examples
/// ```
/// use arrbench::util::units::bytes_to_mib;
///
/// assert_eq!(bytes_to_mib(1048576), 1.0);
/// assert_eq!(bytes_to_mib(0), 0.0);
/// ```
pub fn bytes_to_mib(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

/// Format bytes into human-readable size with appropriate units
///
/// # Examples
/// ```
/// use arrbench::util::units::format_bytes;
///
/// assert_eq!(format_bytes(1024), "1.0 KiB");
/// assert_eq!(format_bytes(1048576), "1.0 MiB");
/// assert_eq!(format_bytes(1073741824), "1.0 GiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

/// Calculate throughput in MiB/s from bytes and duration
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use arrbench::util::units::calculate_throughput_mbps;
///
/// let throughput = calculate_throughput_mbps(1048576, Duration::from_secs(1));
/// assert!((throughput - 1.0).abs() < 0.01);
/// ```
pub fn calculate_throughput_mbps(bytes: u64, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }

    bytes_to_mib(bytes) / duration.as_secs_f64()
}

/// Format a single iteration's duration with appropriate precision
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use arrbench::util::units::format_latency;
///
/// assert_eq!(format_latency(Duration::from_millis(5)), "5.00ms");
/// assert_eq!(format_latency(Duration::from_millis(2500)), "2.500s");
/// ```
pub fn format_latency(duration: Duration) -> String {
    let micros = duration.as_micros();

    if micros >= 1_000_000 {
        format!("{:.3}s", duration.as_secs_f64())
    } else if micros >= 1000 {
        let millis = micros as f64 / 1000.0;
        format!("{:.2}ms", millis)
    } else {
        format!("{}μs", micros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_bytes_to_mib() {
        assert_eq!(bytes_to_mib(128 * 1024 * 1024), 128.0);
        assert_eq!(bytes_to_mib(512 * 1024), 0.5);
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KiB");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(1048576), "1.0 MiB");
        assert_eq!(format_bytes(1073741824), "1.0 GiB");
        assert_eq!(format_bytes(1099511627776), "1.0 TiB");
    }

    #[test]
    fn test_calculate_throughput_mbps() {
        let throughput = calculate_throughput_mbps(1048576, Duration::from_secs(1));
        assert!((throughput - 1.0).abs() < 0.01);

        let throughput = calculate_throughput_mbps(2097152, Duration::from_secs(2));
        assert!((throughput - 1.0).abs() < 0.01);

        assert_eq!(calculate_throughput_mbps(1000, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_format_latency() {
        assert_eq!(format_latency(Duration::from_millis(5)), "5.00ms");
        assert_eq!(format_latency(Duration::from_micros(500)), "500μs");
        assert_eq!(format_latency(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_latency(Duration::from_secs(3)), "3.000s");
    }
}
