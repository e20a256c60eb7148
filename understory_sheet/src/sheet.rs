// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sheet reducer: one entry point for every host event.

use log::debug;
use understory_timing::TimerQueue;

use crate::config::{Animation, Configuration};
use crate::error::SheetError;
use crate::gesture::{
    DragOwner, DragPhase, DragSample, DragState, GestureEnd, GestureInterpreter, GesturePhase,
    HandOff, Routed,
};
use crate::inputs::HeightInputs;
use crate::position::{Position, SwitchablePositions};
use crate::reconcile::{EnvironmentReconciler, EnvironmentSignal, HEIGHT_EPSILON, InputChanges};
use crate::resolve::HeightResolver;
use crate::snap::{Release, SnapResolver};

/// Who last set the sheet's position.
///
/// The position is shared between the caller and the sheet: the caller may
/// move it programmatically at any time, and gestures or taps move it too.
/// Programmatic moves cancel any gesture in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Provenance {
    /// The position passed to [`BottomSheet::new`].
    #[default]
    Initial,
    /// [`SheetEvent::SetPosition`].
    Caller,
    /// The snap resolver, after a drag.
    Gesture,
    /// Tap-to-dismiss on the background.
    BackgroundTap,
    /// Tap on the drag indicator.
    Indicator,
}

/// Inbound events.
#[derive(Clone, Debug, PartialEq)]
pub enum SheetEvent {
    /// A raw pointer sample on the sheet.
    Drag {
        /// Gesture phase reported by the host.
        phase: DragPhase,
        /// The sample.
        sample: DragSample,
    },
    /// The embedded scroll region reported whether it is scrolled to its top.
    ScrollOffset {
        /// `true` when the region's content is at its top edge.
        at_top: bool,
    },
    /// An embedded scroll region appeared or went away.
    ScrollRegion {
        /// `true` while a scroll region is mounted.
        present: bool,
    },
    /// The embedded scroll region gave up the current gesture.
    ScrollReleased,
    /// A layout environment change.
    Environment(EnvironmentSignal),
    /// The app is about to resign active status.
    ResignActive,
    /// Time passed; fires due deferred work.
    Tick,
    /// The background behind the sheet was tapped.
    BackgroundTap,
    /// The drag indicator was tapped.
    IndicatorTap,
    /// Programmatic move.
    SetPosition(Position),
    /// Replace the configuration.
    SetConfiguration(Configuration),
    /// Replace the switchable position set.
    SetSwitchablePositions(SwitchablePositions),
    /// The host finished animating to the last settle target.
    SettleFinished,
}

/// Request for the host to animate to a new height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Settle {
    /// Target position.
    pub position: Position,
    /// Resolved target height.
    pub height: f64,
    /// How to animate.
    pub animation: Animation,
}

/// Effects produced by one [`BottomSheet::handle`] call.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SheetUpdate {
    /// Animate to this target.
    pub settle: Option<Settle>,
    /// Forward this vertical delta to the embedded scroll region.
    pub scroll_delta: Option<f64>,
    /// The sheet went from visible to hidden.
    pub dismissed: bool,
    /// The observable [`SheetState`] changed.
    pub changed: bool,
}

/// Snapshot for the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SheetState {
    /// Resting position.
    pub position: Position,
    /// Who set [`Self::position`].
    pub provenance: Provenance,
    /// Height to lay the sheet out at right now.
    pub live_height: f64,
    /// Gesture phase.
    pub phase: GesturePhase,
    /// Current sheet translation.
    pub translation: f64,
    /// New drags are accepted.
    pub is_dragging_enabled: bool,
    /// The embedded scroll region should scroll.
    pub is_scroll_enabled: bool,
    /// Background dimming for the current height.
    pub background_opacity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Deferred {
    ReenableDragging,
    ResignDragEnd,
}

/// A headless bottom sheet.
///
/// All state lives here and changes only through [`BottomSheet::handle`]. The
/// environment reconciler owns the layout inputs, the gesture interpreter owns
/// the drag record, and the position is shared with the caller.
///
/// ```rust
/// use kurbo::{Point, Size};
/// use understory_sheet::{
///     BottomSheet, Configuration, DragPhase, DragSample, EnvironmentSignal, Position,
///     SheetEvent,
/// };
///
/// let mut sheet = BottomSheet::new(
///     Position::Absolute(300.0),
///     [Position::Absolute(300.0), Position::Absolute(600.0)],
///     Configuration::default(),
/// )
/// .unwrap();
/// sheet.handle(0, SheetEvent::Environment(EnvironmentSignal::ContainerSize(Size::new(400.0, 900.0))));
///
/// let drag = |phase, y, t| SheetEvent::Drag {
///     phase,
///     sample: DragSample::new(Point::new(200.0, y), t),
/// };
/// sheet.handle(10, drag(DragPhase::Began, 600.0, 10));
/// sheet.handle(20, drag(DragPhase::Changed, 400.0, 200));
/// assert_eq!(sheet.live_height(), 500.0);
///
/// let update = sheet.handle(400, drag(DragPhase::Ended, 400.0, 400));
/// assert_eq!(update.settle.map(|s| s.height), Some(600.0));
/// assert_eq!(sheet.position(), Position::Absolute(600.0));
/// ```
#[derive(Clone, Debug)]
pub struct BottomSheet {
    positions: SwitchablePositions,
    position: Position,
    provenance: Provenance,
    config: Configuration,
    reconciler: EnvironmentReconciler,
    gesture: GestureInterpreter,
    timers: TimerQueue<Deferred>,
    dragging_enabled: bool,
    scroll_present: bool,
    scroll_at_top: bool,
}

impl BottomSheet {
    /// Creates a sheet resting at `initial`.
    ///
    /// Fails when `positions` is empty.
    pub fn new(
        initial: Position,
        positions: impl IntoIterator<Item = Position>,
        config: Configuration,
    ) -> Result<Self, SheetError> {
        let positions = SwitchablePositions::new(positions)?;
        Ok(Self {
            positions,
            position: initial,
            provenance: Provenance::Initial,
            config,
            reconciler: EnvironmentReconciler::default(),
            gesture: GestureInterpreter::new(),
            timers: TimerQueue::new(),
            dragging_enabled: true,
            scroll_present: false,
            scroll_at_top: true,
        })
    }

    /// Seeds the layout inputs.
    #[must_use]
    pub fn with_inputs(mut self, inputs: HeightInputs) -> Self {
        self.reconciler = EnvironmentReconciler::new(inputs);
        self
    }

    /// Resting position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Who last set the position.
    #[must_use]
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Switchable positions.
    #[must_use]
    pub fn positions(&self) -> &SwitchablePositions {
        &self.positions
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Current layout inputs.
    #[must_use]
    pub fn inputs(&self) -> &HeightInputs {
        self.reconciler.inputs()
    }

    /// Gesture phase.
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Per-gesture drag record.
    #[must_use]
    pub fn drag(&self) -> &DragState {
        self.gesture.drag()
    }

    /// Whether new drags are accepted right now.
    #[must_use]
    pub fn is_dragging_enabled(&self) -> bool {
        self.dragging_enabled
    }

    /// Earliest pending deadline; deliver a [`SheetEvent::Tick`] at or after it.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Resolver over the current inputs and configuration.
    #[must_use]
    pub fn resolver(&self) -> HeightResolver<'_> {
        HeightResolver::new(self.reconciler.inputs(), &self.config)
    }

    /// Height the rendering layer should use right now.
    ///
    /// At rest this is the resolved height of the position. While the sheet
    /// owns a drag it follows the pointer, bounded above by the tallest
    /// switchable position and below by the hidden height.
    #[must_use]
    pub fn live_height(&self) -> f64 {
        let resolver = self.resolver();
        let rest = resolver.resolve(self.position);
        let drag = self.gesture.drag();
        if !self.gesture.is_dragging() || drag.owner != DragOwner::Sheet {
            return rest;
        }
        let ceiling = resolver.topmost(&self.positions).1.max(rest);
        (rest - drag.translation).clamp(resolver.resolve(Position::Hidden), ceiling)
    }

    /// Snapshot for the rendering layer.
    #[must_use]
    pub fn state(&self) -> SheetState {
        let live_height = self.live_height();
        let top = self.resolver().topmost(&self.positions).1;
        let background_opacity = if top > 0.0 {
            self.config.background_opacity * (live_height / top).clamp(0.0, 1.0)
        } else {
            0.0
        };
        SheetState {
            position: self.position,
            provenance: self.provenance,
            live_height,
            phase: self.gesture.phase(),
            translation: self.gesture.translation(),
            is_dragging_enabled: self.dragging_enabled,
            is_scroll_enabled: self.config.is_apple_scroll_behavior_enabled && self.is_at_topmost(),
            background_opacity,
        }
    }

    /// Applies one event at host time `now` (milliseconds).
    ///
    /// Deferred work that came due before `now` runs first, so events are
    /// observed in arrival order.
    pub fn handle(&mut self, now: u64, event: SheetEvent) -> SheetUpdate {
        let before = self.state();
        let mut update = SheetUpdate::default();
        self.fire_due(now, &mut update);

        match event {
            SheetEvent::Drag { phase, sample } => self.on_drag(now, phase, sample, &mut update),
            SheetEvent::ScrollOffset { at_top } => self.scroll_at_top = at_top,
            SheetEvent::ScrollRegion { present } => self.scroll_present = present,
            SheetEvent::ScrollReleased => self.gesture.release_scroll(),
            SheetEvent::Environment(signal) => self.on_environment(now, signal, &mut update),
            SheetEvent::ResignActive => {
                if self.gesture.is_dragging() {
                    let deadline = now.saturating_add(self.config.resign_grace_ms);
                    self.timers.schedule(Deferred::ResignDragEnd, deadline);
                    debug!("sheet: resigning active mid-drag, ending at {deadline}");
                }
            }
            SheetEvent::Tick => {}
            SheetEvent::BackgroundTap => {
                if self.config.is_tap_to_dismiss_enabled && !self.position.is_hidden() {
                    self.cancel_gesture();
                    self.settle_to(Position::Hidden, Some(Provenance::BackgroundTap), &mut update);
                }
            }
            SheetEvent::IndicatorTap => {
                if self.config.is_drag_indicator_cycling_enabled
                    && !self.position.is_hidden()
                    && !self.gesture.is_dragging()
                {
                    let next = self.positions.cycle_after(self.position);
                    self.settle_to(next, Some(Provenance::Indicator), &mut update);
                }
            }
            SheetEvent::SetPosition(position) => {
                self.cancel_gesture();
                self.settle_to(position, Some(Provenance::Caller), &mut update);
            }
            SheetEvent::SetConfiguration(config) => self.on_configuration(config, &mut update),
            SheetEvent::SetSwitchablePositions(positions) => {
                self.on_positions(positions, &mut update);
            }
            SheetEvent::SettleFinished => self.gesture.finish_settle(),
        }

        update.changed = self.state() != before;
        update
    }

    fn on_drag(&mut self, now: u64, phase: DragPhase, sample: DragSample, update: &mut SheetUpdate) {
        if !self.config.is_resizable {
            return;
        }
        match phase {
            DragPhase::Began | DragPhase::Changed => {
                if phase == DragPhase::Began && self.gesture.is_dragging() {
                    // A new pointer-down means we missed the previous end.
                    self.cancel_gesture();
                }
                self.route(sample, update);
            }
            DragPhase::Ended => {
                if self.gesture.is_dragging() {
                    self.route(sample, update);
                }
                self.finish_gesture(now, update);
            }
        }
    }

    fn route(&mut self, sample: DragSample, update: &mut SheetUpdate) {
        let hand_off = HandOff {
            enabled: self.config.is_apple_scroll_behavior_enabled && self.scroll_present,
            at_topmost: self.is_at_topmost(),
            content_at_top: self.scroll_at_top,
        };
        match self.gesture.sample(sample, hand_off, self.dragging_enabled) {
            Routed::Scroll(delta) => update.scroll_delta = Some(delta),
            Routed::Sheet(_) | Routed::Ignored => {}
        }
    }

    fn finish_gesture(&mut self, now: u64, update: &mut SheetUpdate) {
        self.timers.cancel(Deferred::ResignDragEnd);
        let rest = self.resolver().resolve(self.position);
        match self.gesture.end(self.config.snap.flick_window_ms) {
            Some(GestureEnd::Sheet { translation, flick }) => {
                let release = Release {
                    offset: rest - translation,
                    translation,
                    flick,
                };
                let target =
                    SnapResolver::new(&self.positions, self.resolver(), &self.config).resolve(release);
                debug!("sheet: released at {now} with {release:?}, snapping to {target:?}");
                self.settle_to(target, Some(Provenance::Gesture), update);
            }
            Some(GestureEnd::Scroll) => self.gesture.finish_settle(),
            None => {}
        }
    }

    fn on_environment(&mut self, now: u64, signal: EnvironmentSignal, update: &mut SheetUpdate) {
        let reconciled = self
            .reconciler
            .reconcile(signal, self.position, &self.config);
        if reconciled.changes.contains(InputChanges::ORIENTATION) {
            let deadline = now.saturating_add(self.config.rotation_cooldown_ms);
            self.dragging_enabled = false;
            self.timers.schedule(Deferred::ReenableDragging, deadline);
            debug!("sheet: rotated, dragging disabled until {deadline}");
            if self.gesture.is_dragging() {
                self.cancel_gesture();
                self.settle_to(self.position, None, update);
                return;
            }
        }
        if reconciled.height_changed() && !self.gesture.is_dragging() {
            self.settle_to(self.position, None, update);
        }
    }

    fn on_configuration(&mut self, config: Configuration, update: &mut SheetUpdate) {
        let previous = self.resolver().resolve(self.position);
        self.config = config;
        if !self.config.is_resizable {
            self.cancel_gesture();
        }
        let height = self.resolver().resolve(self.position);
        if (height - previous).abs() > HEIGHT_EPSILON && !self.gesture.is_dragging() {
            self.settle_to(self.position, None, update);
        }
    }

    fn on_positions(&mut self, positions: SwitchablePositions, update: &mut SheetUpdate) {
        let previous = self.resolver().resolve(self.position);
        self.positions = positions;
        let was_dragging = self.gesture.is_dragging();
        if was_dragging {
            // The drag bounds and hand-off state were derived from the old set.
            self.cancel_gesture();
        }
        if self.position.is_hidden() || self.positions.contains(self.position) {
            if was_dragging {
                self.settle_to(self.position, None, update);
            }
            return;
        }
        let (target, _) = self.resolver().nearest(&self.positions, previous);
        debug!("sheet: {:?} is no longer switchable, moving to {target:?}", self.position);
        self.settle_to(target, Some(Provenance::Caller), update);
    }

    fn fire_due(&mut self, now: u64, update: &mut SheetUpdate) {
        while let Some(token) = self.timers.pop_due(now) {
            match token.key() {
                Deferred::ReenableDragging => {
                    self.dragging_enabled = true;
                    debug!("sheet: dragging re-enabled");
                }
                Deferred::ResignDragEnd => {
                    debug!("sheet: ending drag interrupted by resignation");
                    self.finish_gesture(now, update);
                }
            }
        }
    }

    fn settle_to(
        &mut self,
        target: Position,
        provenance: Option<Provenance>,
        update: &mut SheetUpdate,
    ) {
        let was_visible = !self.position.is_hidden();
        self.position = target;
        if let Some(provenance) = provenance {
            self.provenance = provenance;
        }
        self.gesture.begin_settle();
        let height = self.resolver().resolve(target);
        update.settle = Some(Settle {
            position: target,
            height,
            animation: self.config.animation,
        });
        if was_visible && target.is_hidden() {
            update.dismissed = true;
            debug!("sheet: dismissed");
        }
        debug!("sheet: settling to {target:?} at {height}");
    }

    fn cancel_gesture(&mut self) {
        self.timers.cancel(Deferred::ResignDragEnd);
        self.gesture.cancel();
    }

    fn is_at_topmost(&self) -> bool {
        if self.position.is_hidden() {
            return false;
        }
        let resolver = self.resolver();
        let rest = resolver.resolve(self.position);
        let (_, top) = resolver.topmost(&self.positions);
        (rest - top).abs() <= HEIGHT_EPSILON
    }
}
