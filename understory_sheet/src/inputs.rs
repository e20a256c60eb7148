// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout inputs the height resolver reads.

use kurbo::{Insets, Size};

/// Physical device orientation as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Not yet reported.
    #[default]
    Unknown,
    /// Upright portrait.
    Portrait,
    /// Upside-down portrait.
    PortraitUpsideDown,
    /// Landscape, device rotated to the left.
    LandscapeLeft,
    /// Landscape, device rotated to the right.
    LandscapeRight,
    /// Lying flat, screen up.
    FaceUp,
    /// Lying flat, screen down.
    FaceDown,
}

impl Orientation {
    /// Returns `true` for either landscape orientation.
    #[must_use]
    pub fn is_landscape(self) -> bool {
        matches!(self, Self::LandscapeLeft | Self::LandscapeRight)
    }
}

/// Vertical container edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SheetEdge {
    /// Top edge of the container.
    Top,
    /// Bottom edge of the container.
    Bottom,
}

impl SheetEdge {
    fn inset(self, insets: Insets) -> f64 {
        match self {
            Self::Top => insets.y0,
            Self::Bottom => insets.y1,
        }
    }

    fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

/// Layout mode of the sheet, resolved once per layout pass by the host.
///
/// Phones (and compact-width tablets) dock the sheet to the bottom edge.
/// Regular-width tablets and desktops show a floating card anchored to the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Presentation {
    /// Docked to the bottom edge; the bottom safe area is ignored.
    #[default]
    Docked,
    /// Floating card anchored to the top edge; the top safe area is ignored.
    Floating,
}

impl Presentation {
    /// Edge the sheet grows from.
    #[must_use]
    pub fn anchor(self) -> SheetEdge {
        match self {
            Self::Docked => SheetEdge::Bottom,
            Self::Floating => SheetEdge::Top,
        }
    }

    /// Safe-area edge the sheet extends into instead of respecting.
    ///
    /// This is always the anchor edge.
    #[must_use]
    pub fn ignored_safe_area_edge(self) -> SheetEdge {
        self.anchor()
    }

    /// Inset on the anchor edge, which sheet content pads itself by.
    #[must_use]
    pub fn anchor_inset(self, insets: Insets) -> f64 {
        self.anchor().inset(insets)
    }

    /// Inset on the edge opposite the anchor, which limits the sheet's height.
    #[must_use]
    pub fn far_inset(self, insets: Insets) -> f64 {
        self.anchor().opposite().inset(insets)
    }
}

/// Mutable layout snapshot owned by a sheet.
///
/// Fields are updated one notification at a time by the
/// [`EnvironmentReconciler`](crate::EnvironmentReconciler); the height resolver
/// only reads them. All lengths are layout units and are kept finite and
/// non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct HeightInputs {
    /// Measured height of the header region.
    pub header_content_height: f64,
    /// Measured height of the main content, used by [`Position::Dynamic`](crate::Position::Dynamic).
    pub dynamic_main_content_height: f64,
    /// Height of the on-screen keyboard, `0.0` when hidden.
    pub keyboard_height: f64,
    /// Safe-area insets supplied by the host.
    pub safe_area: Insets,
    /// Size of the container the sheet is laid out in.
    pub container: Size,
    /// Last reported device orientation.
    pub orientation: Orientation,
    /// Docked or floating layout.
    pub presentation: Presentation,
}

impl HeightInputs {
    /// Creates inputs for a container of the given size.
    #[must_use]
    pub fn new(container: Size) -> Self {
        Self {
            container: sanitize_size(container),
            ..Self::default()
        }
    }

    /// Container height, never negative.
    #[must_use]
    pub fn container_height(&self) -> f64 {
        self.container.height
    }
}

/// Clamps a host-reported length to a finite, non-negative value.
pub(crate) fn sanitize_length(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

pub(crate) fn sanitize_size(size: Size) -> Size {
    Size::new(sanitize_length(size.width), sanitize_length(size.height))
}

pub(crate) fn sanitize_insets(insets: Insets) -> Insets {
    Insets::new(
        sanitize_length(insets.x0),
        sanitize_length(insets.y0),
        sanitize_length(insets.x1),
        sanitize_length(insets.y1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docked_ignores_bottom_and_is_limited_by_top() {
        let insets = Insets::new(0.0, 47.0, 0.0, 34.0);
        let p = Presentation::Docked;
        assert_eq!(p.anchor(), SheetEdge::Bottom);
        assert_eq!(p.ignored_safe_area_edge(), SheetEdge::Bottom);
        assert_eq!(p.anchor_inset(insets), 34.0);
        assert_eq!(p.far_inset(insets), 47.0);
    }

    #[test]
    fn floating_mirrors_docked() {
        let insets = Insets::new(0.0, 24.0, 0.0, 20.0);
        let p = Presentation::Floating;
        assert_eq!(p.anchor(), SheetEdge::Top);
        assert_eq!(p.anchor_inset(insets), 24.0);
        assert_eq!(p.far_inset(insets), 20.0);
    }

    #[test]
    fn sanitize_rejects_garbage() {
        assert_eq!(sanitize_length(f64::NAN), 0.0);
        assert_eq!(sanitize_length(f64::INFINITY), 0.0);
        assert_eq!(sanitize_length(-3.0), 0.0);
        assert_eq!(sanitize_length(12.5), 12.5);
        assert_eq!(
            HeightInputs::new(Size::new(-1.0, 800.0)).container,
            Size::new(0.0, 800.0)
        );
    }

    #[test]
    fn landscape_detection() {
        assert!(Orientation::LandscapeLeft.is_landscape());
        assert!(Orientation::LandscapeRight.is_landscape());
        assert!(!Orientation::Portrait.is_landscape());
        assert!(!Orientation::Unknown.is_landscape());
    }
}
