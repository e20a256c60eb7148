// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sheet basics.
//!
//! Drive a three-stop sheet with drags: a slow drag that snaps to the nearest
//! stop, a flick that skips ahead, and a long drag down that dismisses.
//!
//! Run:
//! - `cargo run -p understory_demos --example sheet_basics`

use kurbo::{Insets, Size};
use understory_demos::{Timeline, init_logging};
use understory_sheet::{BottomSheet, Configuration, DragPhase, HeightInputs, Position, SheetEvent};

fn main() {
    init_logging();

    let mut inputs = HeightInputs::new(Size::new(390.0, 844.0));
    inputs.safe_area = Insets::new(0.0, 47.0, 0.0, 34.0);
    inputs.header_content_height = 56.0;
    inputs.dynamic_main_content_height = 220.0;

    let sheet = BottomSheet::new(
        Position::Dynamic,
        [Position::Relative(0.2), Position::Dynamic, Position::Relative(0.9)],
        Configuration::default()
            .with_swipe_to_dismiss(true)
            .with_background_opacity(0.4),
    )
    .expect("positions are not empty")
    .with_inputs(inputs);
    let mut timeline = Timeline::new(sheet);

    println!("-- slow drag up a little, release near the start");
    timeline.drag(DragPhase::Began, 600.0);
    for y in [590.0, 575.0, 560.0] {
        timeline.drag(DragPhase::Changed, y);
    }
    timeline.wait(300);
    timeline.drag(DragPhase::Ended, 560.0);
    timeline.finish_settle();

    println!("-- flick up");
    timeline.drag(DragPhase::Began, 600.0);
    for y in [570.0, 520.0, 460.0] {
        timeline.drag(DragPhase::Changed, y);
    }
    timeline.drag(DragPhase::Ended, 440.0);
    timeline.finish_settle();

    println!("-- programmatic move");
    timeline.send(
        "set position",
        SheetEvent::SetPosition(Position::Relative(0.2)),
    );
    timeline.finish_settle();

    println!("-- drag down past the bottom");
    timeline.drag(DragPhase::Began, 700.0);
    let mut y = 700.0;
    while y < 900.0 {
        y += 40.0;
        timeline.drag(DragPhase::Changed, y);
    }
    timeline.drag(DragPhase::Ended, y);
    assert_eq!(timeline.sheet().position(), Position::Hidden);
}
