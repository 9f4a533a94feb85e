//! Tests for the gesture action dispatcher: cooldowns, dead zone and latching


use gesture_media_control::{
    constants::{TOGGLE_COOLDOWN_MS, VOLUME_COOLDOWN_MS},
    dispatcher::{dispatch, Action, DispatcherState, GestureDispatcher},
};
use proptest::prelude::*;
use test_helpers::{closed_signal, open_palm_signal, pinch_signal, MID_Y};

#[test]
fn test_scenario_pinch_after_400ms() {
    let state = DispatcherState::with_last_action(1000);

    let (next, action) = dispatch(state, &pinch_signal(MID_Y - 100), 1400);
    assert_eq!(action, Action::VolumeUp);
    assert_eq!(next.last_action_ms, Some(1400));

    let (next, action) = dispatch(state, &pinch_signal(MID_Y + 100), 1400);
    assert_eq!(action, Action::VolumeDown);
    assert_eq!(next.last_action_ms, Some(1400));
}

#[test]
fn test_scenario_pinch_after_100ms() {
    let state = DispatcherState::with_last_action(1000);
    let (next, action) = dispatch(state, &pinch_signal(MID_Y - 100), 1100);
    assert_eq!(action, Action::None);
    assert_eq!(next.last_action_ms, Some(1000));
}

#[test]
fn test_alternating_palm_toggles_once_per_entry() {
    let mut dispatcher = GestureDispatcher::new();
    let mut toggles = 0;
    let mut now = 0;

    for _ in 0..5 {
        // Open for three frames, then closed for three frames, 600 ms apart
        for _ in 0..3 {
            if dispatcher.update(&open_palm_signal(), now) == Action::PlayPauseToggle {
                toggles += 1;
            }
            now += 33;
        }
        now += 600;
        for _ in 0..3 {
            assert_eq!(dispatcher.update(&closed_signal(), now), Action::None);
            now += 33;
        }
        now += 600;
    }

    assert_eq!(toggles, 5);
}

#[test]
fn test_held_palm_fires_once_even_after_cooldown() {
    let mut dispatcher = GestureDispatcher::with_state(DispatcherState::with_last_action(0));

    // Ten frames inside the cooldown window: the edge is consumed silently
    let actions: Vec<Action> = (0..10)
        .map(|i| dispatcher.update(&open_palm_signal(), 100 + i * 30))
        .collect();
    assert!(actions.iter().all(|a| *a == Action::None));
    assert!(dispatcher.state().palm_latched);

    // Cooldown long gone, hand still open
    assert_eq!(dispatcher.update(&open_palm_signal(), 5000), Action::None);

    // Close and reopen
    assert_eq!(dispatcher.update(&closed_signal(), 5100), Action::None);
    assert!(!dispatcher.state().palm_latched);
    assert_eq!(dispatcher.update(&open_palm_signal(), 5200), Action::PlayPauseToggle);
}

#[test]
fn test_held_palm_from_fresh_state_fires_on_first_frame() {
    let mut dispatcher = GestureDispatcher::new();
    let fired: Vec<u64> = (0..10u64)
        .filter(|i| dispatcher.update(&open_palm_signal(), i * 30) == Action::PlayPauseToggle)
        .collect();
    assert_eq!(fired, vec![0]);
    assert!(dispatcher.state().palm_latched);
}

#[test]
fn test_held_pinch_rate_limited() {
    let mut dispatcher = GestureDispatcher::new();
    let mut emitted = Vec::new();

    // 3 seconds at roughly 60 fps
    for now in (0..3000).step_by(16) {
        if dispatcher.update(&pinch_signal(MID_Y - 120), now) == Action::VolumeUp {
            emitted.push(now);
        }
    }

    assert!(emitted.len() > 1);
    for pair in emitted.windows(2) {
        assert!(pair[1] - pair[0] > VOLUME_COOLDOWN_MS, "{pair:?}");
    }
}

#[test]
fn test_midline_never_emits_volume() {
    let mut dispatcher = GestureDispatcher::new();
    for now in (0..5000).step_by(50) {
        assert_eq!(dispatcher.update(&pinch_signal(MID_Y), now), Action::None);
    }
    assert_eq!(dispatcher.state().last_action_ms, None);
}

#[test]
fn test_pinch_then_open_palm_is_fresh_edge() {
    let mut dispatcher = GestureDispatcher::new();

    assert_eq!(dispatcher.update(&open_palm_signal(), 0), Action::PlayPauseToggle);
    assert!(dispatcher.state().palm_latched);

    // Pinch in the dead zone: no action, but the latch is released
    assert_eq!(dispatcher.update(&pinch_signal(MID_Y), 700), Action::None);
    assert!(!dispatcher.state().palm_latched);

    assert_eq!(dispatcher.update(&open_palm_signal(), 733), Action::PlayPauseToggle);
}

#[test]
fn test_volume_action_delays_toggle() {
    let mut dispatcher = GestureDispatcher::new();
    assert_eq!(dispatcher.update(&pinch_signal(MID_Y - 100), 0), Action::VolumeUp);

    // Open palm right after a volume step shares the action timestamp
    assert_eq!(dispatcher.update(&open_palm_signal(), 200), Action::None);
    assert!(dispatcher.state().palm_latched);
}

proptest! {
    #[test]
    fn prop_at_most_one_volume_action_per_window(
        gaps in prop::collection::vec(1u64..200, 1..200),
        rows in prop::collection::vec(0i32..480, 1..200),
    ) {
        let mut dispatcher = GestureDispatcher::new();
        let mut now = 0;
        let mut last_emit: Option<u64> = None;

        for (gap, row) in gaps.iter().zip(rows.iter().cycle()) {
            now += gap;
            let action = dispatcher.update(&pinch_signal(*row), now);
            if action.is_some() {
                if let Some(last) = last_emit {
                    prop_assert!(now - last > VOLUME_COOLDOWN_MS);
                }
                last_emit = Some(now);
            }
        }
    }

    #[test]
    fn prop_latch_tracks_last_signal(frames in prop::collection::vec((any::<bool>(), any::<bool>()), 1..100)) {
        let mut state = DispatcherState::new();
        let mut now = 0;

        for (is_pinching, is_palm_open) in frames {
            now += 40;
            let signal = test_helpers::signal(is_pinching, is_palm_open, MID_Y);
            let (next, _) = dispatch(state, &signal, now);
            prop_assert_eq!(next.palm_latched, is_palm_open && !is_pinching);
            state = next;
        }
    }

    #[test]
    fn prop_toggles_never_closer_than_cooldown(frames in prop::collection::vec(any::<bool>(), 1..200)) {
        let mut dispatcher = GestureDispatcher::new();
        let mut last_toggle: Option<u64> = None;

        for (i, open) in frames.into_iter().enumerate() {
            let now = i as u64 * 100;
            let signal = if open { open_palm_signal() } else { closed_signal() };
            if dispatcher.update(&signal, now) == Action::PlayPauseToggle {
                if let Some(last) = last_toggle {
                    prop_assert!(now - last > TOGGLE_COOLDOWN_MS);
                }
                last_toggle = Some(now);
            }
        }
    }
}
