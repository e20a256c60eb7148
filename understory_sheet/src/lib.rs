// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sheet --heading-base-level=0

//! Understory Sheet: a headless bottom sheet state machine.
//!
//! A bottom sheet is a draggable panel layered above application content that
//! rests at one of a few declared heights. This crate owns the part of a sheet
//! that is actually stateful:
//!
//! - [`Position`] / [`SwitchablePositions`]: where the sheet may rest.
//! - [`HeightResolver`]: turns a position plus live layout inputs (content
//!   sizes, keyboard, safe area, docked or floating layout) into a height.
//! - [`GestureInterpreter`]: turns raw drag samples into translation and hands
//!   samples off to an embedded scroll region when the sheet is fully open.
//! - [`SnapResolver`]: picks the resting position when a drag is released,
//!   with nearest-neighbor, directional bias and flick rules.
//! - [`EnvironmentReconciler`]: folds keyboard, rotation, content and
//!   safe-area notifications into the layout inputs.
//! - [`BottomSheet`]: a single reducer that wires the pieces together and
//!   schedules deferred work on an [`understory_timing::TimerQueue`].
//!
//! It does **not** render anything or interpolate between heights. The host
//! feeds [`SheetEvent`]s into [`BottomSheet::handle`], lays the sheet out at
//! [`SheetState::live_height`], and animates toward every [`Settle`] it receives
//! using the supplied [`Animation`] descriptor.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Insets, Point, Size};
//! use understory_sheet::{
//!     BottomSheet, Configuration, DragPhase, DragSample, EnvironmentSignal, HeightInputs,
//!     Position, SheetEvent,
//! };
//!
//! let mut inputs = HeightInputs::new(Size::new(390.0, 844.0));
//! inputs.safe_area = Insets::new(0.0, 47.0, 0.0, 34.0);
//! inputs.header_content_height = 44.0;
//! inputs.dynamic_main_content_height = 180.0;
//!
//! let mut sheet = BottomSheet::new(
//!     Position::Dynamic,
//!     [Position::Dynamic, Position::Relative(1.0)],
//!     Configuration::default().with_swipe_to_dismiss(true),
//! )
//! .unwrap()
//! .with_inputs(inputs);
//! assert_eq!(sheet.live_height(), 44.0 + 180.0 + 34.0);
//!
//! // The keyboard appears: the sheet rises above it without a gesture.
//! let update = sheet.handle(0, SheetEvent::Environment(EnvironmentSignal::KeyboardHeight(300.0)));
//! assert_eq!(update.settle.map(|s| s.height), Some(44.0 + 180.0 + 300.0));
//! sheet.handle(400, SheetEvent::SettleFinished);
//!
//! // A long drag down dismisses.
//! let drag = |phase, y, t| SheetEvent::Drag {
//!     phase,
//!     sample: DragSample::new(Point::new(195.0, y), t),
//! };
//! sheet.handle(1_000, drag(DragPhase::Began, 400.0, 1_000));
//! sheet.handle(1_100, drag(DragPhase::Changed, 800.0, 1_100));
//! let update = sheet.handle(1_200, drag(DragPhase::Ended, 1_000.0, 1_200));
//! assert!(update.dismissed);
//! assert_eq!(sheet.position(), Position::Hidden);
//! ```
//!
//! ## Timing
//!
//! Rotation disables dragging for a short cooldown, and an app resignation in
//! the middle of a drag ends it after a grace delay. Both are deferred work
//! keyed in a timer queue; superseding triggers replace pending entries. Hosts
//! deliver [`SheetEvent::Tick`] at [`BottomSheet::next_deadline`], and every
//! other event also runs whatever came due first.
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: forwards to `kurbo/libm` for `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod error;
mod gesture;
mod inputs;
mod position;
mod reconcile;
mod resolve;
mod sheet;
mod snap;

pub use config::{Animation, Configuration, Curve, SnapTuning};
pub use error::SheetError;
pub use gesture::{
    DragOwner, DragPhase, DragSample, DragState, GestureEnd, GestureInterpreter, GesturePhase,
    HandOff, Routed,
};
pub use inputs::{HeightInputs, Orientation, Presentation, SheetEdge};
pub use position::{Position, SwitchablePositions};
pub use reconcile::{
    EnvironmentReconciler, EnvironmentSignal, HEIGHT_EPSILON, InputChanges, Reconciled,
};
pub use resolve::HeightResolver;
pub use sheet::{BottomSheet, Provenance, Settle, SheetEvent, SheetState, SheetUpdate};
pub use snap::{Direction, Release, SnapResolver};
