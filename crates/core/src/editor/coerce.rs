//! Raw form input to typed field values.
//!
//! Numeric inputs arrive as whatever the user typed. None of these
//! functions fail: invalid or empty input becomes the field's documented
//! fallback so no NaN or garbage ever reaches the configuration.

use super::schema::{DEFAULT_TEMPERATURE, MAX_OPACITY_PERCENTAGE, MAX_TEMPERATURE, MIN_TEMPERATURE};

/// Price: invalid or empty -> 0, negative -> 0.
pub fn price(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

/// Chats per price unit: invalid, empty or below 1 -> 1.
///
/// A fractional entry such as `"2.7"` truncates to 2.
pub fn chats_for_price(raw: &str) -> u32 {
    match parse_whole(raw) {
        Some(v) if v >= 1 => v,
        _ => 1,
    }
}

/// Free chats: empty or invalid -> unset (unlimited). `"0"` is a real zero.
pub fn free_chats(raw: &str) -> Option<u32> {
    parse_whole(raw)
}

/// Opacity percentage: invalid -> 0, clamped to `0..=100`.
pub fn opacity(raw: &str) -> u8 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v.clamp(0.0, f64::from(MAX_OPACITY_PERCENTAGE)) as u8,
        _ => 0,
    }
}

/// Temperature: invalid -> the default (0.8), clamped to `0.0..=1.0`.
pub fn temperature(raw: &str) -> f32 {
    match raw.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v.clamp(MIN_TEMPERATURE, MAX_TEMPERATURE),
        _ => DEFAULT_TEMPERATURE,
    }
}

/// Empty (after trimming) text unsets an optional field.
pub fn optional_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Parse a non-negative whole number, truncating any fractional part.
fn parse_whole(raw: &str) -> Option<u32> {
    let v = raw.trim().parse::<f64>().ok()?;
    if !v.is_finite() || v < 0.0 {
        return None;
    }
    Some(v.trunc().min(f64::from(u32::MAX)) as u32)
}
