// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resting positions and the ordered set a sheet may snap between.

use core::slice;

use smallvec::SmallVec;

use crate::error::SheetError;

/// Where a sheet rests.
///
/// Positions are only meaningful once resolved against the current layout
/// inputs (see [`HeightResolver`](crate::HeightResolver)). Two different
/// variants can resolve to the same height, so ordering and snapping always
/// compare resolved heights rather than variants.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Position {
    /// Fully off-screen.
    #[default]
    Hidden,
    /// Header plus measured main content height, clamped to the container.
    Dynamic,
    /// A fraction (`0.0..=1.0`) of the container's usable height.
    ///
    /// Out-of-range fractions are clamped when resolved.
    Relative(f64),
    /// A fixed height in layout units, clamped to the container.
    Absolute(f64),
}

impl Position {
    /// Returns `true` for [`Position::Hidden`].
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }
}

const INLINE_POSITIONS: usize = 4;

/// Ordered, non-empty set of positions a sheet may rest at.
///
/// Declaration order is preserved. It breaks ties when two entries resolve to
/// the same height and it drives drag-indicator cycling.
///
/// ```rust
/// use understory_sheet::{Position, SheetError, SwitchablePositions};
///
/// let positions = SwitchablePositions::new([
///     Position::Relative(0.3),
///     Position::Dynamic,
///     Position::Relative(0.9),
/// ])
/// .unwrap();
/// assert_eq!(positions.len(), 3);
/// assert_eq!(positions.index_of(Position::Dynamic), Some(1));
///
/// assert_eq!(
///     SwitchablePositions::new([]).unwrap_err(),
///     SheetError::NoSwitchablePositions
/// );
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SwitchablePositions {
    positions: SmallVec<[Position; INLINE_POSITIONS]>,
}

impl SwitchablePositions {
    /// Builds a position set, rejecting an empty one.
    pub fn new(positions: impl IntoIterator<Item = Position>) -> Result<Self, SheetError> {
        let positions: SmallVec<[Position; INLINE_POSITIONS]> = positions.into_iter().collect();
        if positions.is_empty() {
            return Err(SheetError::NoSwitchablePositions);
        }
        Ok(Self { positions })
    }

    /// Returns the positions in declaration order.
    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.positions
    }

    /// Iterates the positions in declaration order.
    pub fn iter(&self) -> slice::Iter<'_, Position> {
        self.positions.iter()
    }

    /// Number of positions. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false`; present for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns `true` if `position` was declared.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    /// Index of the first declaration equal to `position`.
    #[must_use]
    pub fn index_of(&self, position: Position) -> Option<usize> {
        self.positions.iter().position(|p| *p == position)
    }

    /// Position following `position` in declaration order, wrapping around.
    ///
    /// Undeclared positions continue from the first entry.
    #[must_use]
    pub fn cycle_after(&self, position: Position) -> Position {
        let next = self
            .index_of(position)
            .map_or(0, |idx| (idx + 1) % self.positions.len());
        self.positions[next]
    }
}

impl<'a> IntoIterator for &'a SwitchablePositions {
    type Item = &'a Position;
    type IntoIter = slice::Iter<'a, Position>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_rejected() {
        assert_eq!(
            SwitchablePositions::new(core::iter::empty()),
            Err(SheetError::NoSwitchablePositions)
        );
    }

    #[test]
    fn declaration_order_is_kept() {
        let set = SwitchablePositions::new([
            Position::Absolute(600.0),
            Position::Hidden,
            Position::Relative(0.5),
        ])
        .unwrap();
        assert_eq!(
            set.as_slice(),
            &[
                Position::Absolute(600.0),
                Position::Hidden,
                Position::Relative(0.5)
            ]
        );
        assert!(!set.is_empty());
    }

    #[test]
    fn duplicates_are_tolerated() {
        let set = SwitchablePositions::new([Position::Dynamic, Position::Dynamic]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.index_of(Position::Dynamic), Some(0));
    }

    #[test]
    fn cycle_wraps_and_recovers_from_undeclared() {
        let set = SwitchablePositions::new([
            Position::Relative(0.2),
            Position::Relative(0.5),
            Position::Relative(0.9),
        ])
        .unwrap();
        assert_eq!(
            set.cycle_after(Position::Relative(0.2)),
            Position::Relative(0.5)
        );
        assert_eq!(
            set.cycle_after(Position::Relative(0.9)),
            Position::Relative(0.2)
        );
        assert_eq!(set.cycle_after(Position::Hidden), Position::Relative(0.2));
    }

    #[test]
    fn default_position_is_hidden() {
        assert!(Position::default().is_hidden());
        assert!(!Position::Dynamic.is_hidden());
    }
}
