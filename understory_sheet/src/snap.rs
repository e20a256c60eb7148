// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snap resolution: pick the resting position after a drag is released.
//!
//! ## Rules
//!
//! Every switchable position is resolved to a height, then, in order:
//!
//! 1. With swipe-to-dismiss enabled, a release at or below the hidden height
//!    always snaps to [`Position::Hidden`].
//! 2. The nearest resolved height is the baseline answer. Equal heights go to
//!    the earliest declaration.
//! 3. A *flick* (recent motion of at least [`SnapTuning::flick_distance`])
//!    moves one step past the nearest position in the flick direction, or all
//!    the way to the extreme position with flick-through enabled.
//! 4. Otherwise, if the total translation has a clear direction (beyond
//!    [`SnapTuning::deadband`]), the next position past the release offset in
//!    that direction wins when it is at most [`SnapTuning::bias_margin`]
//!    farther away than the nearest one.
//!
//! With swipe-to-dismiss enabled, `Hidden` is an implicit lowest candidate even
//! when it was not declared. Apart from that the result is always one of the
//! switchable positions.
//!
//! [`SnapTuning::flick_distance`]: crate::SnapTuning::flick_distance
//! [`SnapTuning::deadband`]: crate::SnapTuning::deadband
//! [`SnapTuning::bias_margin`]: crate::SnapTuning::bias_margin

use smallvec::SmallVec;

use crate::config::Configuration;
use crate::position::{Position, SwitchablePositions};
use crate::resolve::HeightResolver;

/// Vertical direction of motion, in sheet terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Pointer moved up; the sheet grows.
    Up,
    /// Pointer moved down; the sheet shrinks.
    Down,
    /// Motion inside the deadband.
    Neutral,
}

impl Direction {
    /// Classifies a vertical pointer motion (positive is downward).
    #[must_use]
    pub fn from_motion(motion: f64, deadband: f64) -> Self {
        if motion < -deadband {
            Self::Up
        } else if motion > deadband {
            Self::Down
        } else {
            Self::Neutral
        }
    }
}

/// What the gesture looked like when the pointer was released.
///
/// Pointer motion is in screen space: positive values are downward.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Release {
    /// Unclamped height the drag projected to at release.
    pub offset: f64,
    /// Total pointer translation since the drag started.
    pub translation: f64,
    /// Pointer motion over the recent flick window.
    pub flick: f64,
}

type Candidates = SmallVec<[(Position, f64); 5]>;

/// Picks the switchable position a released drag settles to.
#[derive(Clone, Copy, Debug)]
pub struct SnapResolver<'a> {
    positions: &'a SwitchablePositions,
    resolver: HeightResolver<'a>,
    config: &'a Configuration,
}

impl<'a> SnapResolver<'a> {
    /// Creates a snap resolver.
    #[must_use]
    pub fn new(
        positions: &'a SwitchablePositions,
        resolver: HeightResolver<'a>,
        config: &'a Configuration,
    ) -> Self {
        Self {
            positions,
            resolver,
            config,
        }
    }

    /// Resolves the target position for `release`.
    #[must_use]
    pub fn resolve(&self, release: Release) -> Position {
        let dismissable = self.config.is_swipe_to_dismiss_enabled;
        if dismissable && release.offset <= 0.0 {
            return Position::Hidden;
        }

        let candidates = self.candidates();
        let Some(nearest) = nearest(&candidates, release.offset) else {
            return Position::Hidden;
        };

        let tuning = self.config.snap;
        let flick = Direction::from_motion(release.flick, tuning.deadband);
        if flick != Direction::Neutral && release.flick.abs() >= tuning.flick_distance {
            let target = if self.config.is_flick_through_enabled {
                extreme(&candidates, flick)
            } else {
                step_from(&candidates, candidates[nearest].1, flick)
            };
            return target.map_or(candidates[nearest].0, |idx| candidates[idx].0);
        }

        let intent = Direction::from_motion(release.translation, tuning.deadband);
        if intent != Direction::Neutral {
            if let Some(next) = step_from(&candidates, release.offset, intent) {
                let nearest_distance = (candidates[nearest].1 - release.offset).abs();
                let next_distance = (candidates[next].1 - release.offset).abs();
                if next_distance - nearest_distance <= tuning.bias_margin {
                    return candidates[next].0;
                }
            }
        }

        candidates[nearest].0
    }

    /// Resolved candidates sorted by height; equal heights keep declaration order.
    fn candidates(&self) -> Candidates {
        let mut candidates: Candidates = self.resolver.resolve_all(self.positions).collect();
        if self.config.is_swipe_to_dismiss_enabled && !candidates.iter().any(|c| c.0.is_hidden()) {
            candidates.push((Position::Hidden, 0.0));
        }
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        candidates
    }
}

fn nearest(candidates: &Candidates, offset: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, (_, height)) in candidates.iter().enumerate() {
        let distance = (height - offset).abs();
        match best {
            Some((_, d)) if d <= distance => {}
            _ => best = Some((idx, distance)),
        }
    }
    best.map(|(idx, _)| idx)
}

/// First candidate strictly past `from` in `direction`.
fn step_from(candidates: &Candidates, from: f64, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up => candidates.iter().position(|c| c.1 > from),
        Direction::Down => {
            let below = candidates.iter().rposition(|c| c.1 < from)?;
            // Land on the earliest declaration among equal heights.
            let height = candidates[below].1;
            candidates.iter().position(|c| c.1 == height)
        }
        Direction::Neutral => None,
    }
}

fn extreme(candidates: &Candidates, direction: Direction) -> Option<usize> {
    match direction {
        Direction::Up => {
            let height = candidates.last()?.1;
            candidates.iter().position(|c| c.1 == height)
        }
        Direction::Down => (!candidates.is_empty()).then_some(0),
        Direction::Neutral => None,
    }
}
