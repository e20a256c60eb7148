// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: compute movement deltas, total offsets and release motion.
//!
//! ## Usage
//!
//! 1) Start a drag operation by calling [`DragState::start`] with the initial position and time.
//! 2) On each move event, call [`DragState::update`] to get the movement delta since the last update.
//! 3) Optionally call [`DragState::total_offset`] to get the cumulative offset from the start position.
//! 4) Before ending, query [`DragState::recent_offset`] to learn how the pointer was moving just
//!    before release.
//! 5) End the drag operation with [`DragState::end`] to reset state.
//!
//! Timestamps are host milliseconds on any monotonic clock.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Start dragging at (10, 20)
//! drag.start(Point::new(10.0, 20.0), 0);
//! assert!(drag.is_dragging());
//!
//! // Move to (15, 25) - delta is (5, 5)
//! let delta = drag.update(Point::new(15.0, 25.0), 16).unwrap();
//! assert_eq!(delta.x, 5.0);
//! assert_eq!(delta.y, 5.0);
//!
//! // Total offset from start is also (5, 5)
//! let total = drag.total_offset(Point::new(15.0, 25.0)).unwrap();
//! assert_eq!(total.x, 5.0);
//! assert_eq!(total.y, 5.0);
//!
//! // Ending returns the final translation and resets.
//! assert_eq!(drag.end().map(|v| v.y), Some(5.0));
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

/// Number of recent samples kept for release motion queries.
pub const HISTORY_LEN: usize = 8;

/// A recorded pointer position with its host timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedPoint {
    /// Pointer position.
    pub pos: Point,
    /// Host timestamp in milliseconds.
    pub time: u64,
}

/// Tracks drag state for move event processing
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Start position of the drag operation
    pub start_pos: Option<Point>,
    /// Last recorded pointer position during drag
    pub last_pos: Option<Point>,
    history: [Option<TimedPoint>; HISTORY_LEN],
    head: usize,
}

impl DragState {
    /// Start tracking a new drag operation from the given position.
    ///
    /// Any previous drag is discarded.
    pub fn start(&mut self, pos: Point, time: u64) {
        *self = Self::default();
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.record(pos, time);
    }

    /// Update the drag state with a new position, returning the movement delta since last update.
    pub fn update(&mut self, pos: Point, time: u64) -> Option<Vec2> {
        self.start_pos?;
        let delta = self.last_pos.map(|last| pos - last);
        self.last_pos = Some(pos);
        self.record(pos, time);
        delta
    }

    /// Get total offset from drag start position.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start_pos| current_pos - start_pos)
    }

    /// Offset between the start position and the last recorded position.
    pub fn translation(&self) -> Option<Vec2> {
        Some(self.last_pos? - self.start_pos?)
    }

    /// Most recent sample, if any.
    pub fn last_sample(&self) -> Option<TimedPoint> {
        let idx = (self.head + HISTORY_LEN - 1) % HISTORY_LEN;
        self.history[idx]
    }

    /// Net movement over the last `window_ms` milliseconds of samples.
    ///
    /// The oldest retained sample inside the window is the reference point, so
    /// a pointer that paused before release reports a small offset even after a
    /// long drag.
    pub fn recent_offset(&self, window_ms: u64) -> Option<Vec2> {
        let (oldest, last) = self.window_bounds(window_ms)?;
        Some(last.pos - oldest.pos)
    }

    /// End the current drag operation and reset state.
    ///
    /// Returns the final translation if a drag was active.
    pub fn end(&mut self) -> Option<Vec2> {
        let translation = self.translation();
        *self = Self::default();
        translation
    }

    /// Returns `true` while a drag operation is active
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }

    fn record(&mut self, pos: Point, time: u64) {
        self.history[self.head] = Some(TimedPoint { pos, time });
        self.head = (self.head + 1) % HISTORY_LEN;
    }

    fn window_bounds(&self, window_ms: u64) -> Option<(TimedPoint, TimedPoint)> {
        let last = self.last_sample()?;
        let cutoff = last.time.saturating_sub(window_ms);
        let mut oldest = last;
        // Walk backwards from the newest sample until we leave the window.
        for step in 1..HISTORY_LEN {
            let idx = (self.head + HISTORY_LEN - 1 - step) % HISTORY_LEN;
            match self.history[idx] {
                Some(sample) if sample.time >= cutoff && sample.time <= last.time => {
                    oldest = sample;
                }
                _ => break,
            }
        }
        Some((oldest, last))
    }
}
