// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Environment reconciliation: fold host notifications into [`HeightInputs`].

use kurbo::{Insets, Size};
use log::debug;

use crate::config::Configuration;
use crate::inputs::{
    HeightInputs, Orientation, Presentation, sanitize_insets, sanitize_length, sanitize_size,
};
use crate::position::Position;
use crate::resolve::HeightResolver;

/// Heights closer than this are treated as equal when deciding to re-settle.
pub const HEIGHT_EPSILON: f64 = 1e-6;

bitflags::bitflags! {
    /// Which inputs a notification actually changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct InputChanges: u8 {
        /// Device orientation.
        const ORIENTATION  = 0b0000_0001;
        /// Keyboard height.
        const KEYBOARD     = 0b0000_0010;
        /// Header content height.
        const HEADER       = 0b0000_0100;
        /// Main content height.
        const MAIN_CONTENT = 0b0000_1000;
        /// Safe-area insets.
        const SAFE_AREA    = 0b0001_0000;
        /// Container size.
        const CONTAINER    = 0b0010_0000;
        /// Docked or floating layout.
        const PRESENTATION = 0b0100_0000;
    }
}

/// A host notification about the layout environment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnvironmentSignal {
    /// The device rotated.
    Orientation(Orientation),
    /// The keyboard height changed; `0.0` when hidden.
    KeyboardHeight(f64),
    /// The header region was re-measured.
    HeaderHeight(f64),
    /// The main content region was re-measured.
    MainContentHeight(f64),
    /// Safe-area insets changed.
    SafeArea(Insets),
    /// The container was resized.
    ContainerSize(Size),
    /// The host switched between docked and floating layout.
    Presentation(Presentation),
}

/// Outcome of reconciling one signal against the current position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reconciled {
    /// Inputs that changed.
    pub changes: InputChanges,
    /// Height of the position before the signal.
    pub previous_height: f64,
    /// Height of the position after the signal.
    pub height: f64,
}

impl Reconciled {
    /// Returns `true` when the position now resolves to a different height.
    #[must_use]
    pub fn height_changed(&self) -> bool {
        (self.height - self.previous_height).abs() > HEIGHT_EPSILON
    }
}

/// Sole writer of a sheet's [`HeightInputs`].
#[derive(Clone, Debug, Default)]
pub struct EnvironmentReconciler {
    inputs: HeightInputs,
}

impl EnvironmentReconciler {
    /// Creates a reconciler seeded with `inputs`.
    #[must_use]
    pub fn new(inputs: HeightInputs) -> Self {
        Self { inputs }
    }

    /// Current inputs.
    #[must_use]
    pub fn inputs(&self) -> &HeightInputs {
        &self.inputs
    }

    /// Applies one signal, returning which inputs changed.
    ///
    /// Values are sanitized first; re-reporting the current value changes nothing.
    pub fn apply(&mut self, signal: EnvironmentSignal) -> InputChanges {
        let inputs = &mut self.inputs;
        let changed = match signal {
            EnvironmentSignal::Orientation(o) => {
                replace(&mut inputs.orientation, o).then_some(InputChanges::ORIENTATION)
            }
            EnvironmentSignal::KeyboardHeight(h) => {
                replace(&mut inputs.keyboard_height, sanitize_length(h))
                    .then_some(InputChanges::KEYBOARD)
            }
            EnvironmentSignal::HeaderHeight(h) => {
                replace(&mut inputs.header_content_height, sanitize_length(h))
                    .then_some(InputChanges::HEADER)
            }
            EnvironmentSignal::MainContentHeight(h) => {
                replace(&mut inputs.dynamic_main_content_height, sanitize_length(h))
                    .then_some(InputChanges::MAIN_CONTENT)
            }
            EnvironmentSignal::SafeArea(i) => {
                replace(&mut inputs.safe_area, sanitize_insets(i))
                    .then_some(InputChanges::SAFE_AREA)
            }
            EnvironmentSignal::ContainerSize(s) => {
                replace(&mut inputs.container, sanitize_size(s)).then_some(InputChanges::CONTAINER)
            }
            EnvironmentSignal::Presentation(p) => {
                replace(&mut inputs.presentation, p).then_some(InputChanges::PRESENTATION)
            }
        };
        changed.unwrap_or_default()
    }

    /// Applies `signal` and reports how `position`'s height moved.
    pub fn reconcile(
        &mut self,
        signal: EnvironmentSignal,
        position: Position,
        config: &Configuration,
    ) -> Reconciled {
        let previous_height = HeightResolver::new(&self.inputs, config).resolve(position);
        let changes = self.apply(signal);
        let height = if changes.is_empty() {
            previous_height
        } else {
            HeightResolver::new(&self.inputs, config).resolve(position)
        };
        if !changes.is_empty() {
            debug!("sheet environment: {changes:?} moved {position:?} {previous_height} -> {height}");
        }
        Reconciled {
            changes,
            previous_height,
            height,
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
