// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sheet environment handling.
//!
//! Show how a resting sheet follows the keyboard and content changes, how a
//! rotation briefly blocks drags, and how drags are handed to an embedded
//! scroll region when the sheet is fully open.
//!
//! Run:
//! - `cargo run -p understory_demos --example sheet_environment`

use kurbo::{Insets, Size};
use understory_demos::{Timeline, init_logging};
use understory_sheet::{
    BottomSheet, Configuration, DragPhase, EnvironmentSignal, HeightInputs, Orientation, Position,
    SheetEvent,
};

fn main() {
    init_logging();

    let mut inputs = HeightInputs::new(Size::new(390.0, 844.0));
    inputs.safe_area = Insets::new(0.0, 47.0, 0.0, 34.0);
    inputs.header_content_height = 56.0;
    inputs.dynamic_main_content_height = 160.0;

    let sheet = BottomSheet::new(
        Position::Dynamic,
        [Position::Dynamic, Position::Relative(1.0)],
        Configuration::default().with_apple_scroll_behavior(true),
    )
    .expect("positions are not empty")
    .with_inputs(inputs);
    let mut timeline = Timeline::new(sheet);

    println!("-- keyboard and content");
    timeline.send(
        "keyboard shows",
        SheetEvent::Environment(EnvironmentSignal::KeyboardHeight(291.0)),
    );
    timeline.finish_settle();
    timeline.send(
        "content grows",
        SheetEvent::Environment(EnvironmentSignal::MainContentHeight(260.0)),
    );
    timeline.send(
        "keyboard hides",
        SheetEvent::Environment(EnvironmentSignal::KeyboardHeight(0.0)),
    );
    timeline.finish_settle();

    println!("-- rotation cooldown");
    timeline.send(
        "rotate",
        SheetEvent::Environment(EnvironmentSignal::Orientation(Orientation::LandscapeLeft)),
    );
    timeline.send(
        "resize",
        SheetEvent::Environment(EnvironmentSignal::ContainerSize(Size::new(844.0, 390.0))),
    );
    timeline.drag(DragPhase::Began, 200.0);
    timeline.drag(DragPhase::Ended, 150.0);
    timeline.wait(400);
    timeline.send(
        "rotate back",
        SheetEvent::Environment(EnvironmentSignal::Orientation(Orientation::Portrait)),
    );
    timeline.send(
        "resize back",
        SheetEvent::Environment(EnvironmentSignal::ContainerSize(Size::new(390.0, 844.0))),
    );
    timeline.wait(400);
    timeline.finish_settle();

    println!("-- scroll hand-off at the top");
    timeline.send("open fully", SheetEvent::SetPosition(Position::Relative(1.0)));
    timeline.finish_settle();
    timeline.send("scroll region", SheetEvent::ScrollRegion { present: true });
    timeline.send("scrolled down", SheetEvent::ScrollOffset { at_top: false });
    timeline.drag(DragPhase::Began, 300.0);
    timeline.drag(DragPhase::Changed, 360.0);
    timeline.send("reached top", SheetEvent::ScrollOffset { at_top: true });
    timeline.drag(DragPhase::Changed, 420.0);
    timeline.drag(DragPhase::Changed, 520.0);
    timeline.drag(DragPhase::Ended, 540.0);
}
