// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the sheet demos.
//!
//! [`Timeline`] plays the role of a host event loop: it owns a clock, forwards
//! events to a [`BottomSheet`] and delivers ticks whenever deferred work is due.

use kurbo::Point;
use understory_sheet::{BottomSheet, DragPhase, DragSample, SheetEvent, SheetUpdate};

/// Installs `env_logger`, defaulting to `debug` so sheet transitions are visible.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .try_init();
}

/// A tiny host loop around a sheet.
#[derive(Debug)]
pub struct Timeline {
    sheet: BottomSheet,
    now: u64,
}

impl Timeline {
    /// Wraps `sheet` with a clock starting at zero.
    pub fn new(sheet: BottomSheet) -> Self {
        Self { sheet, now: 0 }
    }

    /// Current host time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// The wrapped sheet.
    pub fn sheet(&self) -> &BottomSheet {
        &self.sheet
    }

    /// Delivers `event` at the current time and reports the outcome.
    pub fn send(&mut self, label: &str, event: SheetEvent) -> SheetUpdate {
        let update = self.sheet.handle(self.now, event);
        report(self.now, label, &self.sheet, &update);
        update
    }

    /// Delivers a drag sample at `y`, one frame after the previous event.
    pub fn drag(&mut self, phase: DragPhase, y: f64) -> SheetUpdate {
        self.now += 16;
        let sample = DragSample::new(Point::new(200.0, y), self.now);
        self.send(&format!("drag {phase:?} y={y}"), SheetEvent::Drag { phase, sample })
    }

    /// Advances the clock by `ms`, ticking at every deadline on the way.
    pub fn wait(&mut self, ms: u64) {
        let end = self.now + ms;
        while let Some(deadline) = self.sheet.next_deadline().filter(|d| *d <= end) {
            self.now = deadline.max(self.now);
            self.send("tick", SheetEvent::Tick);
        }
        self.now = end;
    }

    /// Pretends the host animation finished.
    pub fn finish_settle(&mut self) {
        self.send("settle finished", SheetEvent::SettleFinished);
    }
}

fn report(now: u64, label: &str, sheet: &BottomSheet, update: &SheetUpdate) {
    let state = sheet.state();
    println!(
        "[{now:>5} ms] {label:<28} position={:?} live={:.1} phase={:?}",
        state.position, state.live_height, state.phase
    );
    if let Some(settle) = update.settle {
        println!("            -> settle to {:?} at {:.1}", settle.position, settle.height);
    }
    if let Some(delta) = update.scroll_delta {
        println!("            -> scroll region gets {delta:.1}");
    }
    if update.dismissed {
        log::info!("sheet dismissed");
    }
}
