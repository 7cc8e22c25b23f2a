//! Military classification and blink state.
//!
//! Both are pure functions: the prefix match so it can be applied to any hex
//! string, the blink state as a function of elapsed time so that the render
//! loop stays free of wall-clock reads and the phase is testable.
//!

/// True when `hex` starts with any of the configured military prefixes,
/// case-insensitive.  An empty prefix list never matches.
///
pub fn is_military(hex: &str, prefixes: &[String]) -> bool {
    let hex = hex.to_lowercase();
    prefixes
        .iter()
        .any(|p| !p.is_empty() && hex.starts_with(&p.to_lowercase()))
}

/// Blink visibility for this instant.
///
/// Civilian aircraft are always visible, military ones are solid when blink
/// is disabled.  When enabled, visibility toggles every half period, the
/// phase depends only on `elapsed_ms` so every military blip blinks in
/// unison.
///
pub fn blink_visible(is_military: bool, enabled: bool, elapsed_ms: u64, period_ms: u64) -> bool {
    if !is_military || !enabled {
        return true;
    }
    let half = (period_ms / 2).max(1);
    (elapsed_ms / half) % 2 == 0
}
