// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Dwell**: How long a notice stays up before it may be dismissed
//! - **Settle**: Pause between one notice leaving and the next arriving
//! - **Fade**: Opacity stepping used when the surface has no native transitions

// ==========================================================================
// Dwell Defaults
// ==========================================================================

/// Default time a notice stays visible before it becomes dismissable (ms).
pub const DEFAULT_DWELL_TIMEOUT_MS: u64 = 2500;

// ==========================================================================
// Settle Defaults
// ==========================================================================

/// Default pause after an exit animation before the next cycle starts (ms).
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 500;

// ==========================================================================
// Fade Defaults
// ==========================================================================

/// Default opacity increment per manual animation step.
pub const DEFAULT_FADE_STEP: f32 = 0.1;

/// Smallest accepted opacity increment.
pub const MIN_FADE_STEP: f32 = 0.01;

/// Largest accepted opacity increment (a single jump).
pub const MAX_FADE_STEP: f32 = 1.0;

/// Default period between manual animation steps (ms).
pub const DEFAULT_FADE_INTERVAL_MS: u64 = 10;

/// Smallest accepted step period (ms).
pub const MIN_FADE_INTERVAL_MS: u64 = 1;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(DEFAULT_DWELL_TIMEOUT_MS > 0);

    assert!(MIN_FADE_STEP > 0.0);
    assert!(MAX_FADE_STEP >= MIN_FADE_STEP);
    assert!(DEFAULT_FADE_STEP >= MIN_FADE_STEP);
    assert!(DEFAULT_FADE_STEP <= MAX_FADE_STEP);

    assert!(MIN_FADE_INTERVAL_MS > 0);
    assert!(DEFAULT_FADE_INTERVAL_MS >= MIN_FADE_INTERVAL_MS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults_match_humanized_feel() {
        assert_eq!(DEFAULT_DWELL_TIMEOUT_MS, 2500);
        assert_eq!(DEFAULT_SETTLE_DELAY_MS, 500);
    }

    #[test]
    fn fade_defaults_are_valid() {
        assert_eq!(DEFAULT_FADE_STEP, 0.1);
        assert_eq!(DEFAULT_FADE_INTERVAL_MS, 10);
        assert!(DEFAULT_FADE_STEP >= MIN_FADE_STEP);
        assert!(DEFAULT_FADE_STEP <= MAX_FADE_STEP);
    }
}
