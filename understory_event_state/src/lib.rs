// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: Common event state managers for UI interactions.
//!
//! This crate provides small, focused state machines for UI interactions that
//! require stateful tracking across multiple events.
//!
//! - [`drag`]: Track drag operations with movement deltas, total offsets and a
//!   short sample history for release direction
//!
//! ## Design Philosophy
//!
//! Each state manager is designed to be:
//!
//! - **Minimal and focused**: Each handles one specific interaction pattern
//! - **Stateful but simple**: Track just enough state to compute transitions
//! - **Integration-friendly**: Work with any event routing or spatial query system
//!
//! The crate does not assume any particular UI framework or event system. The
//! managers accept raw pointer positions and host timestamps and produce queries
//! that higher layers (for example `understory_sheet`) interpret.
//!
//! ## Drag Operations
//!
//! Use [`drag::DragState`] to track pointer drag operations:
//!
//! ```rust
//! # #[cfg(feature = "drag")]
//! # fn example() {
//! use kurbo::Point;
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//!
//! // Start drag at (10, 10) at t = 0 ms
//! drag.start(Point::new(10.0, 10.0), 0);
//!
//! // Move pointer, get delta since last position
//! let delta = drag.update(Point::new(15.0, 12.0), 16).unwrap();
//! // delta is (5.0, 2.0)
//!
//! // Get total offset from start
//! let total = drag.total_offset(Point::new(15.0, 12.0)).unwrap();
//! // total is (5.0, 2.0)
//! # }
//! ```
//!
//! ## Features
//!
//! - `drag`: Enable drag state tracking (requires `kurbo` dependency)
//!
//! This crate is `no_std` compatible.

#![no_std]

#[cfg(feature = "drag")]
pub mod drag;
