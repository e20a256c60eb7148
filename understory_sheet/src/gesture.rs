// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture interpretation: raw drag samples to sheet translation.
//!
//! The interpreter is a three-state machine:
//!
//! ```text
//!  Idle ──first sample──▶ Dragging ──end──▶ Settling ──settle finished──▶ Idle
//!                            ▲                  │
//!                            └──first sample────┘
//! ```
//!
//! While dragging, each sample is routed either to the sheet (accumulating
//! translation) or to an embedded scroll region, following the hand-off rule
//! described on [`HandOff`].

use kurbo::Point;
use log::{debug, trace};
use understory_event_state::drag::DragState as PointerDrag;

/// Phase of the gesture state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No gesture and no pending settle.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging,
    /// A target was chosen and the host is animating toward it.
    Settling,
}

/// Which party consumes drag samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DragOwner {
    /// Samples move the sheet.
    #[default]
    Sheet,
    /// Samples scroll the embedded region.
    Scroll,
}

/// Phase tag on a raw drag sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    /// Pointer went down.
    Began,
    /// Pointer moved.
    Changed,
    /// Pointer went up.
    Ended,
}

/// A raw pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSample {
    /// Pointer location in container coordinates (y grows downward).
    pub location: Point,
    /// Host timestamp in milliseconds.
    pub time_ms: u64,
}

impl DragSample {
    /// Creates a sample.
    #[must_use]
    pub fn new(location: Point, time_ms: u64) -> Self {
        Self { location, time_ms }
    }
}

/// Per-gesture record.
///
/// Reset to its neutral value (no translation, not dragging) at the end of
/// every gesture.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DragState {
    /// Sheet translation since the sheet took ownership; positive is downward.
    pub translation: f64,
    /// `true` between the first accepted sample and the end of the gesture.
    pub is_dragging: bool,
    /// Most recent sample routed to the sheet.
    pub last_value: Option<DragSample>,
    /// Most recent sample routed to the scroll region.
    pub last_scroll_value: Option<DragSample>,
    /// Current consumer of samples.
    pub owner: DragOwner,
}

/// Scroll hand-off context for one sample.
///
/// The sheet defers to an embedded scroll region only while it rests at its
/// tallest switchable position. In that state:
///
/// - a drag that starts while the region is scrolled away from its top
///   belongs to the region;
/// - a region-owned drag returns to the sheet once the region reaches its top
///   and the pointer keeps moving down, or when the region releases ownership;
/// - a sheet-owned drag that would push the sheet above its tallest position
///   goes to the region instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct HandOff {
    /// Scroll behavior is configured and a scroll region is present.
    pub enabled: bool,
    /// The sheet rests at its tallest switchable position.
    pub at_topmost: bool,
    /// The region's content is scrolled to its top edge.
    pub content_at_top: bool,
}

impl HandOff {
    /// Returns `true` when the region may take samples at all.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.enabled && self.at_topmost
    }
}

/// Where a sample went.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Routed {
    /// The sheet consumed it; carries the updated translation.
    Sheet(f64),
    /// Forward this vertical delta to the scroll region.
    Scroll(f64),
    /// Dropped (dragging disabled or no gesture).
    Ignored,
}

/// How a gesture ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEnd {
    /// The sheet owned the drag and should snap.
    Sheet {
        /// Total sheet translation (positive is downward).
        translation: f64,
        /// Recent pointer motion within the flick window.
        flick: f64,
    },
    /// The scroll region owned the drag; the sheet stays put.
    Scroll,
}

/// Turns raw drag samples into sheet translation and a terminal release.
#[derive(Clone, Debug, Default)]
pub struct GestureInterpreter {
    phase: GesturePhase,
    drag: DragState,
    pointer: PointerDrag,
}

impl GestureInterpreter {
    /// Creates an idle interpreter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Per-gesture record.
    #[must_use]
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Sheet translation; zero unless the sheet owns an active drag.
    #[must_use]
    pub fn translation(&self) -> f64 {
        self.drag.translation
    }

    /// Returns `true` while a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    /// Feeds a `Began` or `Changed` sample.
    ///
    /// The first sample of a gesture is only accepted when `enabled` is true.
    /// Samples with a non-finite location are dropped.
    pub fn sample(&mut self, sample: DragSample, hand_off: HandOff, enabled: bool) -> Routed {
        if !sample.location.is_finite() {
            debug!("sheet drag: dropped non-finite sample {:?}", sample.location);
            return Routed::Ignored;
        }
        if self.phase != GesturePhase::Dragging {
            return self.begin(sample, hand_off, enabled);
        }

        let previous = match self.drag.owner {
            DragOwner::Sheet => self.drag.last_value,
            DragOwner::Scroll => self.drag.last_scroll_value,
        };
        let delta = previous.map_or(0.0, |p| sample.location.y - p.location.y);

        match self.drag.owner {
            DragOwner::Scroll => {
                if !hand_off.is_active() || (hand_off.content_at_top && delta > 0.0) {
                    // Rebase so the sample that crossed over already counts.
                    let from = previous.unwrap_or(sample);
                    self.take_for_sheet(from);
                    return self.track(sample);
                }
                self.drag.last_scroll_value = Some(sample);
                trace!("sheet drag: routed {delta} to scroll region");
                Routed::Scroll(delta)
            }
            DragOwner::Sheet => {
                let projected = self.drag.translation + delta;
                if hand_off.is_active() && projected < 0.0 {
                    debug!("sheet drag: handing off to scroll region at topmost position");
                    self.pointer.end();
                    self.drag.owner = DragOwner::Scroll;
                    self.drag.translation = 0.0;
                    self.drag.last_value = None;
                    self.drag.last_scroll_value = Some(sample);
                    return Routed::Scroll(projected);
                }
                self.track(sample)
            }
        }
    }

    /// The scroll region gave up the gesture; later samples move the sheet.
    pub fn release_scroll(&mut self) {
        if self.phase != GesturePhase::Dragging || self.drag.owner != DragOwner::Scroll {
            return;
        }
        match self.drag.last_scroll_value {
            Some(last) => self.take_for_sheet(last),
            None => self.drag.owner = DragOwner::Sheet,
        }
        debug!("sheet drag: scroll region released ownership");
    }

    /// Ends the gesture.
    ///
    /// Returns `None` when no drag is in progress, so duplicate or late ends
    /// are no-ops.
    pub fn end(&mut self, flick_window_ms: u64) -> Option<GestureEnd> {
        if self.phase != GesturePhase::Dragging {
            trace!("sheet drag: end ignored in {:?}", self.phase);
            return None;
        }
        let result = match self.drag.owner {
            DragOwner::Sheet => GestureEnd::Sheet {
                translation: self.drag.translation,
                flick: self
                    .pointer
                    .recent_offset(flick_window_ms)
                    .map_or(0.0, |v| v.y),
            },
            DragOwner::Scroll => GestureEnd::Scroll,
        };
        self.reset();
        self.phase = GesturePhase::Settling;
        debug!("sheet drag: ended with {result:?}");
        Some(result)
    }

    /// The host finished animating to the last target.
    pub fn finish_settle(&mut self) {
        if self.phase == GesturePhase::Settling {
            self.phase = GesturePhase::Idle;
        }
    }

    /// Enters `Settling` without a gesture, for programmatic and environment moves.
    pub fn begin_settle(&mut self) {
        if self.phase != GesturePhase::Dragging {
            self.phase = GesturePhase::Settling;
        }
    }

    /// Abandons any gesture and pending settle.
    pub fn cancel(&mut self) {
        if self.phase == GesturePhase::Dragging {
            debug!("sheet drag: cancelled");
        }
        self.reset();
        self.phase = GesturePhase::Idle;
    }

    fn begin(&mut self, sample: DragSample, hand_off: HandOff, enabled: bool) -> Routed {
        if !enabled {
            debug!("sheet drag: sample ignored while dragging is disabled");
            return Routed::Ignored;
        }
        self.reset();
        self.phase = GesturePhase::Dragging;
        self.drag.is_dragging = true;
        if hand_off.is_active() && !hand_off.content_at_top {
            self.drag.owner = DragOwner::Scroll;
            self.drag.last_scroll_value = Some(sample);
            debug!("sheet drag: began, owned by scroll region");
            return Routed::Scroll(0.0);
        }
        self.drag.owner = DragOwner::Sheet;
        self.drag.last_value = Some(sample);
        self.pointer.start(sample.location, sample.time_ms);
        debug!("sheet drag: began at {:?}", sample.location);
        Routed::Sheet(0.0)
    }

    fn take_for_sheet(&mut self, from: DragSample) {
        self.drag.owner = DragOwner::Sheet;
        self.drag.translation = 0.0;
        self.drag.last_value = Some(from);
        self.pointer.start(from.location, from.time_ms);
    }

    fn track(&mut self, sample: DragSample) -> Routed {
        self.pointer.update(sample.location, sample.time_ms);
        self.drag.translation = self.pointer.translation().map_or(0.0, |v| v.y);
        self.drag.last_value = Some(sample);
        trace!("sheet drag: translation {}", self.drag.translation);
        Routed::Sheet(self.drag.translation)
    }

    fn reset(&mut self) {
        self.pointer.end();
        self.drag = DragState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: f64, t: u64) -> DragSample {
        DragSample::new(Point::new(100.0, y), t)
    }

    const NO_SCROLL: HandOff = HandOff {
        enabled: false,
        at_topmost: false,
        content_at_top: true,
    };

    #[test]
    fn first_sample_starts_dragging() {
        let mut g = GestureInterpreter::new();
        assert_eq!(g.sample(at(500.0, 0), NO_SCROLL, true), Routed::Sheet(0.0));
        assert_eq!(g.phase(), GesturePhase::Dragging);
        assert!(g.drag().is_dragging);
    }

    #[test]
    fn disabled_first_sample_is_ignored() {
        let mut g = GestureInterpreter::new();
        assert_eq!(g.sample(at(500.0, 0), NO_SCROLL, false), Routed::Ignored);
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn non_finite_samples_are_dropped() {
        let mut g = GestureInterpreter::new();
        assert_eq!(g.sample(at(f64::NAN, 0), NO_SCROLL, true), Routed::Ignored);
        assert_eq!(g.phase(), GesturePhase::Idle);

        g.sample(at(500.0, 10), NO_SCROLL, true);
        g.sample(at(480.0, 20), NO_SCROLL, true);
        assert_eq!(
            g.sample(at(f64::INFINITY, 30), NO_SCROLL, true),
            Routed::Ignored
        );
        assert_eq!(g.translation(), -20.0);
        assert_eq!(g.sample(at(470.0, 40), NO_SCROLL, true), Routed::Sheet(-30.0));
    }

    #[test]
    fn translation_is_delta_from_start() {
        let mut g = GestureInterpreter::new();
        g.sample(at(500.0, 0), NO_SCROLL, true);
        g.sample(at(520.0, 10), NO_SCROLL, true);
        assert_eq!(g.sample(at(470.0, 20), NO_SCROLL, true), Routed::Sheet(-30.0));
        assert_eq!(g.translation(), -30.0);
    }

    #[test]
    fn end_reports_translation_and_flick_then_resets() {
        let mut g = GestureInterpreter::new();
        g.sample(at(500.0, 0), NO_SCROLL, true);
        g.sample(at(480.0, 300), NO_SCROLL, true);
        g.sample(at(420.0, 350), NO_SCROLL, true);

        let end = g.end(100).unwrap();
        assert_eq!(
            end,
            GestureEnd::Sheet {
                translation: -80.0,
                flick: -60.0
            }
        );
        assert_eq!(g.phase(), GesturePhase::Settling);
        assert_eq!(g.translation(), 0.0);
        assert!(!g.drag().is_dragging);
        assert!(g.drag().last_value.is_none());
    }

    #[test]
    fn duplicate_end_is_noop() {
        let mut g = GestureInterpreter::new();
        g.sample(at(0.0, 0), NO_SCROLL, true);
        assert!(g.end(100).is_some());
        assert!(g.end(100).is_none());
        g.finish_settle();
        assert!(g.end(100).is_none());
        assert_eq!(g.phase(), GesturePhase::Idle);
    }

    #[test]
    fn settling_can_be_interrupted_by_a_new_drag() {
        let mut g = GestureInterpreter::new();
        g.sample(at(0.0, 0), NO_SCROLL, true);
        g.end(100);
        assert_eq!(g.sample(at(10.0, 50), NO_SCROLL, true), Routed::Sheet(0.0));
        assert_eq!(g.phase(), GesturePhase::Dragging);
    }

    #[test]
    fn scroll_owns_drag_when_content_is_scrolled() {
        let hand_off = HandOff {
            enabled: true,
            at_topmost: true,
            content_at_top: false,
        };
        let mut g = GestureInterpreter::new();
        assert_eq!(g.sample(at(300.0, 0), hand_off, true), Routed::Scroll(0.0));
        assert_eq!(g.sample(at(340.0, 10), hand_off, true), Routed::Scroll(40.0));
        assert_eq!(g.sample(at(390.0, 20), hand_off, true), Routed::Scroll(50.0));
        assert_eq!(g.translation(), 0.0);
        assert_eq!(g.drag().owner, DragOwner::Scroll);
        assert_eq!(g.end(100), Some(GestureEnd::Scroll));
    }

    #[test]
    fn scroll_hands_back_once_content_reaches_top() {
        let mut hand_off = HandOff {
            enabled: true,
            at_topmost: true,
            content_at_top: false,
        };
        let mut g = GestureInterpreter::new();
        g.sample(at(300.0, 0), hand_off, true);
        g.sample(at(320.0, 10), hand_off, true);

        hand_off.content_at_top = true;
        assert_eq!(g.sample(at(350.0, 20), hand_off, true), Routed::Sheet(30.0));
        assert_eq!(g.drag().owner, DragOwner::Sheet);
        assert_eq!(g.sample(at(360.0, 30), hand_off, true), Routed::Sheet(40.0));
    }

    #[test]
    fn upward_drag_at_topmost_goes_to_scroll() {
        let hand_off = HandOff {
            enabled: true,
            at_topmost: true,
            content_at_top: true,
        };
        let mut g = GestureInterpreter::new();
        assert_eq!(g.sample(at(300.0, 0), hand_off, true), Routed::Sheet(0.0));
        assert_eq!(g.sample(at(280.0, 10), hand_off, true), Routed::Scroll(-20.0));
        assert_eq!(g.drag().owner, DragOwner::Scroll);
        assert_eq!(g.translation(), 0.0);
    }

    #[test]
    fn release_scroll_returns_ownership() {
        let hand_off = HandOff {
            enabled: true,
            at_topmost: true,
            content_at_top: false,
        };
        let mut g = GestureInterpreter::new();
        g.sample(at(300.0, 0), hand_off, true);
        g.sample(at(310.0, 10), hand_off, true);
        g.release_scroll();
        assert_eq!(g.drag().owner, DragOwner::Sheet);
        // Content is still not at top, but ownership was released.
        let released = HandOff {
            enabled: true,
            at_topmost: false,
            content_at_top: false,
        };
        assert_eq!(g.sample(at(330.0, 20), released, true), Routed::Sheet(20.0));
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut g = GestureInterpreter::new();
        g.sample(at(0.0, 0), NO_SCROLL, true);
        g.sample(at(50.0, 10), NO_SCROLL, true);
        g.cancel();
        assert_eq!(g.phase(), GesturePhase::Idle);
        assert_eq!(g.translation(), 0.0);
        assert!(g.end(100).is_none());
    }
}
