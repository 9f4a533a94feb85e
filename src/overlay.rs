//! Display-only status text describing the current gesture and action.

use crate::{classifier::GestureSignal, dispatcher::Action};

/// Name of the gesture a signal represents
#[must_use]
pub const fn gesture_name(signal: &GestureSignal) -> &'static str {
    if signal.is_pinching {
        "pinch"
    } else if signal.is_palm_open {
        "open palm"
    } else {
        "hand"
    }
}

/// One-line status for a processed frame
#[must_use]
pub fn status_line(signal: &GestureSignal, action: Action) -> String {
    let mut line = format!(
        "{} | pinch {:.3} | fingers {}/5 | index y {} (mid {})",
        gesture_name(signal),
        signal.pinch_distance,
        signal.fingers.count(),
        signal.index_tip_pixel_y,
        signal.mid_y,
    );
    if action.is_some() {
        line.push_str(" | ");
        line.push_str(action.label());
    }
    line
}
