// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Height resolution: turn a [`Position`] into a visible height.

use kurbo::Insets;

use crate::config::Configuration;
use crate::inputs::{HeightInputs, SheetEdge, sanitize_insets, sanitize_length};
use crate::position::{Position, SwitchablePositions};

/// Resolves positions to visible heights for one snapshot of layout inputs.
///
/// A resolved height is the distance from the sheet's anchor edge to its
/// leading edge. `0.0` means fully hidden. Every result lies in
/// `0.0..=max_height()`, which itself never exceeds the container height.
///
/// - Docked sheets grow up from the bottom edge; they extend into the bottom
///   safe area and stop below the top inset.
/// - Floating sheets hang from the top edge with the roles of the insets
///   swapped.
/// - A visible keyboard lifts every non-hidden position by its height minus
///   the bottom inset the position already counted.
///
/// ```rust
/// use kurbo::{Insets, Size};
/// use understory_sheet::{Configuration, HeightInputs, HeightResolver, Position};
///
/// let mut inputs = HeightInputs::new(Size::new(400.0, 800.0));
/// inputs.safe_area = Insets::new(0.0, 50.0, 0.0, 30.0);
/// let config = Configuration::default();
///
/// let resolver = HeightResolver::new(&inputs, &config);
/// assert_eq!(resolver.resolve(Position::Hidden), 0.0);
/// assert_eq!(resolver.resolve(Position::Absolute(10_000.0)), 750.0);
/// assert_eq!(resolver.resolve(Position::Relative(0.5)), 360.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct HeightResolver<'a> {
    inputs: &'a HeightInputs,
    config: &'a Configuration,
}

impl<'a> HeightResolver<'a> {
    /// Creates a resolver over the given inputs and configuration.
    #[must_use]
    pub fn new(inputs: &'a HeightInputs, config: &'a Configuration) -> Self {
        Self { inputs, config }
    }

    /// Safe-area insets in effect: the configured override, else the host's.
    #[must_use]
    pub fn effective_insets(&self) -> Insets {
        sanitize_insets(self.config.safe_area_insets.unwrap_or(self.inputs.safe_area))
    }

    /// Largest height any position can resolve to.
    #[must_use]
    pub fn max_height(&self) -> f64 {
        let far = self
            .inputs
            .presentation
            .far_inset(self.effective_insets());
        (self.inputs.container_height() - far).max(0.0)
    }

    /// Extra height contributed by the keyboard.
    #[must_use]
    pub fn keyboard_lift(&self) -> f64 {
        let keyboard = sanitize_length(self.inputs.keyboard_height);
        if keyboard <= 0.0 {
            return 0.0;
        }
        let presentation = self.inputs.presentation;
        let counted_bottom = match presentation.anchor() {
            SheetEdge::Bottom => presentation.anchor_inset(self.effective_insets()),
            SheetEdge::Top => 0.0,
        };
        (keyboard - counted_bottom).max(0.0)
    }

    /// Resolves `position` to a visible height.
    #[must_use]
    pub fn resolve(&self, position: Position) -> f64 {
        let base = match position {
            Position::Hidden => return 0.0,
            Position::Dynamic => self.dynamic_height(),
            Position::Relative(fraction) => self.relative_height(fraction),
            Position::Absolute(height) => sanitize_length(height),
        };
        (base + self.keyboard_lift()).clamp(0.0, self.max_height())
    }

    /// Resolves every switchable position, in declaration order.
    pub fn resolve_all<'p>(
        &self,
        positions: &'p SwitchablePositions,
    ) -> impl Iterator<Item = (Position, f64)> + use<'a, 'p> {
        let resolver = *self;
        positions.iter().map(move |p| (*p, resolver.resolve(*p)))
    }

    /// Tallest switchable position and its height.
    ///
    /// Ties go to the earliest declaration.
    #[must_use]
    pub fn topmost(&self, positions: &SwitchablePositions) -> (Position, f64) {
        self.resolve_all(positions)
            .fold(None, |best: Option<(Position, f64)>, cur| match best {
                Some(b) if b.1 >= cur.1 => Some(b),
                _ => Some(cur),
            })
            .unwrap_or((Position::Hidden, 0.0))
    }

    /// Switchable position whose height is closest to `height`, and its height.
    ///
    /// Ties go to the earliest declaration.
    #[must_use]
    pub fn nearest(&self, positions: &SwitchablePositions, height: f64) -> (Position, f64) {
        self.resolve_all(positions)
            .fold(None, |best: Option<(Position, f64)>, cur| match best {
                Some(b) if (b.1 - height).abs() <= (cur.1 - height).abs() => Some(b),
                _ => Some(cur),
            })
            .unwrap_or((Position::Hidden, 0.0))
    }

    fn dynamic_height(&self) -> f64 {
        let content = sanitize_length(self.inputs.header_content_height)
            + sanitize_length(self.inputs.dynamic_main_content_height);
        let pad = self
            .inputs
            .presentation
            .anchor_inset(self.effective_insets());
        (content + pad).min(self.max_height())
    }

    fn relative_height(&self, fraction: f64) -> f64 {
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let insets = self.effective_insets();
        let presentation = self.inputs.presentation;
        let usable = (self.inputs.container_height()
            - presentation.anchor_inset(insets)
            - presentation.far_inset(insets))
        .max(0.0);
        fraction * usable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::Presentation;
    use kurbo::Size;

    fn phone() -> HeightInputs {
        let mut inputs = HeightInputs::new(Size::new(390.0, 844.0));
        inputs.safe_area = Insets::new(0.0, 47.0, 0.0, 34.0);
        inputs
    }

    #[test]
    fn hidden_is_zero_even_with_keyboard() {
        let mut inputs = phone();
        inputs.keyboard_height = 300.0;
        let config = Configuration::default();
        assert_eq!(
            HeightResolver::new(&inputs, &config).resolve(Position::Hidden),
            0.0
        );
    }

    #[test]
    fn dynamic_counts_header_body_and_bottom_inset() {
        let mut inputs = phone();
        inputs.header_content_height = 60.0;
        inputs.dynamic_main_content_height = 200.0;
        let config = Configuration::default();
        let r = HeightResolver::new(&inputs, &config);
        assert_eq!(r.resolve(Position::Dynamic), 294.0);
    }

    #[test]
    fn dynamic_is_capped_below_top_inset() {
        let mut inputs = phone();
        inputs.dynamic_main_content_height = 5_000.0;
        let config = Configuration::default();
        let r = HeightResolver::new(&inputs, &config);
        assert_eq!(r.resolve(Position::Dynamic), 844.0 - 47.0);
    }

    #[test]
    fn relative_uses_usable_height_and_clamps_fraction() {
        let inputs = phone();
        let config = Configuration::default();
        let r = HeightResolver::new(&inputs, &config);
        let usable = 844.0 - 47.0 - 34.0;
        assert_eq!(r.resolve(Position::Relative(0.5)), 0.5 * usable);
        assert_eq!(r.resolve(Position::Relative(2.0)), usable);
        assert_eq!(r.resolve(Position::Relative(-1.0)), 0.0);
        assert_eq!(r.resolve(Position::Relative(f64::NAN)), 0.0);
    }

    #[test]
    fn absolute_is_clamped_to_container() {
        let inputs = phone();
        let config = Configuration::default();
        let r = HeightResolver::new(&inputs, &config);
        assert_eq!(r.resolve(Position::Absolute(120.0)), 120.0);
        assert_eq!(r.resolve(Position::Absolute(-5.0)), 0.0);
        assert_eq!(r.resolve(Position::Absolute(9_999.0)), r.max_height());
    }

    #[test]
    fn keyboard_lifts_by_height_minus_bottom_inset() {
        let mut inputs = phone();
        inputs.dynamic_main_content_height = 100.0;
        let config = Configuration::default();
        let before = HeightResolver::new(&inputs, &config).resolve(Position::Dynamic);
        inputs.keyboard_height = 260.0;
        let after = HeightResolver::new(&inputs, &config).resolve(Position::Dynamic);
        assert_eq!(after - before, 260.0 - 34.0);
    }

    #[test]
    fn keyboard_shorter_than_inset_adds_nothing() {
        let mut inputs = phone();
        inputs.keyboard_height = 20.0;
        let config = Configuration::default();
        assert_eq!(HeightResolver::new(&inputs, &config).keyboard_lift(), 0.0);
    }

    #[test]
    fn floating_swaps_inset_roles() {
        let mut inputs = phone();
        inputs.presentation = Presentation::Floating;
        inputs.header_content_height = 10.0;
        let config = Configuration::default();
        let r = HeightResolver::new(&inputs, &config);
        assert_eq!(r.max_height(), 844.0 - 34.0);
        assert_eq!(r.resolve(Position::Dynamic), 10.0 + 47.0);
    }

    #[test]
    fn override_insets_win() {
        let inputs = phone();
        let config =
            Configuration::default().with_safe_area_insets(Some(Insets::new(0.0, 0.0, 0.0, 0.0)));
        let r = HeightResolver::new(&inputs, &config);
        assert_eq!(r.max_height(), 844.0);
        assert_eq!(r.resolve(Position::Relative(1.0)), 844.0);
    }

    #[test]
    fn topmost_and_nearest_prefer_first_declaration_on_ties() {
        let inputs = phone();
        let config = Configuration::default();
        let r = HeightResolver::new(&inputs, &config);
        let set = SwitchablePositions::new([
            Position::Absolute(100.0),
            Position::Absolute(5_000.0),
            Position::Relative(1.5),
            Position::Absolute(0.0),
            Position::Hidden,
        ])
        .unwrap();
        assert_eq!(r.topmost(&set).0, Position::Absolute(5_000.0));
        assert_eq!(r.nearest(&set, -20.0).0, Position::Absolute(0.0));
        assert_eq!(r.nearest(&set, 50.0).0, Position::Absolute(100.0));
        assert_eq!(r.nearest(&set, 1e6), (Position::Absolute(5_000.0), 797.0));
    }

    #[test]
    fn degenerate_container_resolves_to_zero() {
        let mut inputs = HeightInputs::new(Size::new(0.0, 10.0));
        inputs.safe_area = Insets::new(0.0, 40.0, 0.0, 40.0);
        let config = Configuration::default();
        let r = HeightResolver::new(&inputs, &config);
        assert_eq!(r.max_height(), 0.0);
        assert_eq!(r.resolve(Position::Dynamic), 0.0);
        assert_eq!(r.resolve(Position::Relative(1.0)), 0.0);
    }
}
