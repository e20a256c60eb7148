// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Caller-supplied behavior toggles and tuning.

use kurbo::Insets;

/// Interpolation curve the host should use when animating to a new height.
///
/// The sheet never interpolates; it only hands this descriptor along with
/// every settle request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// Constant speed.
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
    /// Physically modelled spring.
    Spring {
        /// Time to reach the target for a critically damped spring, in seconds.
        response: f64,
        /// `1.0` is critically damped; lower values overshoot.
        damping_fraction: f64,
    },
}

/// Animation descriptor handed to the host with every settle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animation {
    /// Interpolation curve.
    pub curve: Curve,
    /// Duration hint in milliseconds. Springs may ignore it.
    pub duration_ms: u32,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            curve: Curve::Spring {
                response: 0.5,
                damping_fraction: 1.0,
            },
            duration_ms: 500,
        }
    }
}

/// Thresholds the snap resolver uses to read release intent.
///
/// Lengths are layout units; positive motion is downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapTuning {
    /// Net recent motion at or below this is treated as "no direction".
    pub deadband: f64,
    /// Net recent motion at or above this is a flick.
    pub flick_distance: f64,
    /// A directional release may pick a position this much farther away than
    /// the nearest one.
    pub bias_margin: f64,
    /// How far back, in milliseconds, release motion is measured.
    pub flick_window_ms: u64,
}

impl Default for SnapTuning {
    fn default() -> Self {
        Self {
            deadband: 4.0,
            flick_distance: 50.0,
            bias_margin: 80.0,
            flick_window_ms: 120,
        }
    }
}

/// Behavior toggles for a sheet.
///
/// The sheet treats its configuration as read-only input. Callers replace it
/// wholesale with [`SheetEvent::SetConfiguration`](crate::SheetEvent::SetConfiguration).
///
/// ```rust
/// use understory_sheet::Configuration;
///
/// let config = Configuration::default()
///     .with_swipe_to_dismiss(true)
///     .with_tap_to_dismiss(true)
///     .with_background_opacity(0.4);
/// assert!(config.is_swipe_to_dismiss_enabled);
/// assert!(config.is_resizable);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Configuration {
    /// Animation descriptor for settles.
    pub animation: Animation,
    /// Blur the content behind the sheet.
    pub background_blur: bool,
    /// Maximum dimming opacity behind the sheet, `0.0..=1.0`.
    pub background_opacity: f64,
    /// Tapping the background dismisses the sheet.
    pub is_tap_to_dismiss_enabled: bool,
    /// Dragging below the lowest position dismisses the sheet.
    pub is_swipe_to_dismiss_enabled: bool,
    /// Hand drags off to an embedded scroll region at the topmost position.
    pub is_apple_scroll_behavior_enabled: bool,
    /// Overrides host-reported safe-area insets.
    pub safe_area_insets: Option<Insets>,
    /// When `false` the sheet ignores drags entirely.
    pub is_resizable: bool,
    /// A flick jumps to the extreme position in its direction instead of the
    /// neighboring one.
    pub is_flick_through_enabled: bool,
    /// Tapping the drag indicator advances to the next switchable position.
    pub is_drag_indicator_cycling_enabled: bool,
    /// Release intent thresholds.
    pub snap: SnapTuning,
    /// Dragging stays disabled this long after an orientation change.
    pub rotation_cooldown_ms: u64,
    /// Delay before an app resignation ends a drag that never received its end.
    pub resign_grace_ms: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            animation: Animation::default(),
            background_blur: false,
            background_opacity: 0.0,
            is_tap_to_dismiss_enabled: false,
            is_swipe_to_dismiss_enabled: false,
            is_apple_scroll_behavior_enabled: false,
            safe_area_insets: None,
            is_resizable: true,
            is_flick_through_enabled: false,
            is_drag_indicator_cycling_enabled: true,
            snap: SnapTuning::default(),
            rotation_cooldown_ms: 300,
            resign_grace_ms: 200,
        }
    }
}

impl Configuration {
    /// Sets the settle animation.
    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self
    }

    /// Enables background blur.
    #[must_use]
    pub fn with_background_blur(mut self, enabled: bool) -> Self {
        self.background_blur = enabled;
        self
    }

    /// Sets the maximum background dimming, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn with_background_opacity(mut self, opacity: f64) -> Self {
        self.background_opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Enables dismissing by tapping the background.
    #[must_use]
    pub fn with_tap_to_dismiss(mut self, enabled: bool) -> Self {
        self.is_tap_to_dismiss_enabled = enabled;
        self
    }

    /// Enables dismissing by dragging down.
    #[must_use]
    pub fn with_swipe_to_dismiss(mut self, enabled: bool) -> Self {
        self.is_swipe_to_dismiss_enabled = enabled;
        self
    }

    /// Enables drag hand-off to an embedded scroll region.
    #[must_use]
    pub fn with_apple_scroll_behavior(mut self, enabled: bool) -> Self {
        self.is_apple_scroll_behavior_enabled = enabled;
        self
    }

    /// Overrides the host safe-area insets.
    #[must_use]
    pub fn with_safe_area_insets(mut self, insets: Option<Insets>) -> Self {
        self.safe_area_insets = insets;
        self
    }

    /// Allows or forbids resizing by drag.
    #[must_use]
    pub fn with_resizable(mut self, enabled: bool) -> Self {
        self.is_resizable = enabled;
        self
    }

    /// Enables flick-through to the extreme position.
    #[must_use]
    pub fn with_flick_through(mut self, enabled: bool) -> Self {
        self.is_flick_through_enabled = enabled;
        self
    }

    /// Enables position cycling from the drag indicator.
    #[must_use]
    pub fn with_drag_indicator_cycling(mut self, enabled: bool) -> Self {
        self.is_drag_indicator_cycling_enabled = enabled;
        self
    }

    /// Replaces the snap thresholds.
    #[must_use]
    pub fn with_snap_tuning(mut self, snap: SnapTuning) -> Self {
        self.snap = snap;
        self
    }

    /// Sets the post-rotation drag cooldown.
    #[must_use]
    pub fn with_rotation_cooldown_ms(mut self, ms: u64) -> Self {
        self.rotation_cooldown_ms = ms;
        self
    }

    /// Sets the grace delay before a resignation ends a drag.
    #[must_use]
    pub fn with_resign_grace_ms(mut self, ms: u64) -> Self {
        self.resign_grace_ms = ms;
        self
    }
}
