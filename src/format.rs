use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

pub fn truncate_unicode(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width.saturating_sub(1) {
            result.push('\u{2026}');
            break;
        }
        result.push(ch);
        width += ch_width;
    }
    result
}

/// Bytes to gigabytes (2^30) with two decimals, no unit.
pub fn bytes_to_gb(bytes: f64) -> String {
    fixed2(bytes / GIB)
}

/// `used / total * 100`. A zero total yields NaN or infinity, left to the caller to display.
pub fn percentage(used: f64, total: f64) -> f64 {
    (used / total) * 100.0
}

pub fn format_percent(value: f64) -> String {
    fixed2(value)
}

/// Two decimals, exact ties rounded away from zero. `{:.2}` rounds them to even.
pub fn fixed2(value: f64) -> String {
    if value == 0.0 {
        return "0.00".to_string();
    }
    // A value sits exactly halfway between two cents only when it is an odd
    // multiple of 1/8; below 2^50 the scaled cents are exact.
    let eighths = (value * 8.0).abs();
    if !(eighths.fract() == 0.0 && eighths % 2.0 == 1.0) {
        return format!("{value:.2}");
    }
    let cents = (value.abs() * 100.0).ceil() as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

/// Fraction of a bar to fill for a percent value. Non-finite values draw nothing.
pub fn fill_ratio(percent: f64) -> f64 {
    if percent.is_finite() {
        (percent / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
