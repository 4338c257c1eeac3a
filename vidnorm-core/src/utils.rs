//! Utility functions for formatting and file names.
//!
//! The formatters render probe values for logs and reports. Each takes an
//! `Option` because the prober may not report the value; absent values render
//! as [`UNKNOWN`].

use std::path::Path;

/// Placeholder rendered for metadata the prober did not report.
pub const UNKNOWN: &str = "unknown";

const BYTES_PER_MB: f64 = 1_048_576.0;

/// Formats seconds as HH:MM:SS.ss (e.g., 3725.5 -> "01:02:05.50").
///
/// Hours are zero-padded to two digits but not capped.
#[must_use]
pub fn format_duration(seconds: Option<f64>) -> String {
    let Some(seconds) = seconds.filter(|s| s.is_finite() && *s >= 0.0) else {
        return UNKNOWN.to_string();
    };

    // Round to hundredths first so 59.999 becomes 00:01:00.00, not 00:00:60.00
    let total_hundredths = (seconds * 100.0).round() as u64;
    let hours = total_hundredths / 360_000;
    let minutes = (total_hundredths % 360_000) / 6_000;
    let hundredths = total_hundredths % 6_000;
    format!(
        "{hours:02}:{minutes:02}:{:02}.{:02}",
        hundredths / 100,
        hundredths % 100
    )
}

/// Formats bits per second as kb/s with two decimals (1_500_000 -> "1500.00 kb/s").
#[must_use]
pub fn format_bitrate(bits_per_second: Option<u64>) -> String {
    match bits_per_second {
        Some(bps) => format!("{:.2} kb/s", bps as f64 / 1000.0),
        None => UNKNOWN.to_string(),
    }
}

/// Formats a byte count as MB (2^20 bytes) with two decimals (2_097_152 -> "2.00 MB").
#[must_use]
pub fn format_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) => format!("{:.2} MB", b as f64 / BYTES_PER_MB),
        None => UNKNOWN.to_string(),
    }
}

/// Replaces every character outside `[A-Za-z0-9._-]` with `_`.
///
/// Runs of `_` collapse to one and leading/trailing `_` are dropped. An input
/// with nothing left becomes "output".
#[must_use]
pub fn sanitize_file_stem(stem: &str) -> String {
    let mut sanitized = String::with_capacity(stem.len());
    for c in stem.chars() {
        let mapped = if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            c
        } else {
            '_'
        };
        if mapped == '_' && sanitized.ends_with('_') {
            continue;
        }
        sanitized.push(mapped);
    }

    let trimmed = sanitized.trim_matches('_');
    if trimmed.is_empty() {
        "output".to_string()
    } else {
        trimmed.to_string()
    }
}

/// File name of `path` for log messages, falling back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(3725.5)), "01:02:05.50");
        assert_eq!(format_duration(Some(0.0)), "00:00:00.00");
        assert_eq!(format_duration(Some(59.999)), "00:01:00.00");
        assert_eq!(format_duration(Some(12.346)), "00:00:12.35");
        assert_eq!(format_duration(Some(360_000.0)), "100:00:00.00");
        assert_eq!(format_duration(None), "unknown");
        assert_eq!(format_duration(Some(-1.0)), "unknown");
        assert_eq!(format_duration(Some(f64::NAN)), "unknown");
    }

    #[test]
    fn test_format_bitrate() {
        assert_eq!(format_bitrate(Some(1_500_000)), "1500.00 kb/s");
        assert_eq!(format_bitrate(Some(128_500)), "128.50 kb/s");
        assert_eq!(format_bitrate(Some(0)), "0.00 kb/s");
        assert_eq!(format_bitrate(None), "unknown");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(Some(2_097_152)), "2.00 MB");
        assert_eq!(format_size(Some(1_572_864)), "1.50 MB");
        assert_eq!(format_size(Some(0)), "0.00 MB");
        assert_eq!(format_size(None), "unknown");
    }

    #[test]
    fn test_sanitize_file_stem() {
        assert_eq!(sanitize_file_stem("Holiday Video (2019)"), "Holiday_Video_2019");
        assert_eq!(sanitize_file_stem("clip-01.final"), "clip-01.final");
        assert_eq!(sanitize_file_stem("été à Paris"), "t_Paris");
        assert_eq!(sanitize_file_stem("???"), "output");
        assert_eq!(sanitize_file_stem("a  &  b"), "a_b");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/videos/a.mkv")), "a.mkv");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
