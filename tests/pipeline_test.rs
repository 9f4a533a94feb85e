//! End-to-end tests: JSON pose stream through classifier and dispatcher to a sink


use gesture_media_control::{
    action_sink::RecordingSink,
    app::{AppOptions, GestureApp},
    config::Config,
    dispatcher::Action,
    pose_source::{JsonLinesSource, PoseSource},
};
use std::io::Cursor;
use test_helpers::{frame_line, HandBuilder};

fn run_lines(lines: &[String]) -> (Vec<Action>, gesture_media_control::app::RunStats) {
    let source = JsonLinesSource::new(Cursor::new(lines.join("\n")));
    let options = AppOptions {
        overlay: true,
        max_frames: None,
    };
    let mut app = GestureApp::new(source, RecordingSink::new(), options);
    let stats = app.run().expect("stream should run to completion");
    (app.sink().actions().to_vec(), stats)
}

#[test]
fn test_pinch_up_then_down() {
    let high = HandBuilder::pinch_at(0.1);
    let low = HandBuilder::pinch_at(0.9);

    let mut lines = Vec::new();
    for i in 0..10u64 {
        lines.push(frame_line(i * 50, Some(&high)));
    }
    for i in 10..20u64 {
        lines.push(frame_line(i * 50, Some(&low)));
    }

    let (actions, stats) = run_lines(&lines);
    // 50 ms frames with a 150 ms cooldown: every fourth frame fires
    assert_eq!(
        actions,
        vec![
            Action::VolumeUp,
            Action::VolumeUp,
            Action::VolumeUp,
            Action::VolumeDown,
            Action::VolumeDown,
        ]
    );
    assert_eq!(stats.volume_up, 3);
    assert_eq!(stats.volume_down, 2);
    assert_eq!(stats.hand_frames, 20);
}

#[test]
fn test_open_palm_with_hand_loss() {
    let palm = HandBuilder::open_palm();
    let fist = HandBuilder::fist();

    let lines = vec![
        frame_line(0, Some(&palm)),
        frame_line(100, None),
        frame_line(200, Some(&palm)),
        frame_line(900, Some(&fist)),
        frame_line(1000, Some(&palm)),
        frame_line(1100, Some(&palm)),
    ];

    let (actions, stats) = run_lines(&lines);
    assert_eq!(actions, vec![Action::PlayPauseToggle, Action::PlayPauseToggle]);
    assert_eq!(stats.frames, 6);
    assert_eq!(stats.hand_frames, 5);
}

#[test]
fn test_malformed_lines_are_skipped() {
    let palm = HandBuilder::open_palm();
    let lines = vec![
        "{not json".to_string(),
        r#"{"width":640,"height":480,"landmarks":[[0.5,0.5,0.0]]}"#.to_string(),
        r#"{"width":640,"height":480,"landmarks":[]}"#.to_string(),
        frame_line(0, Some(&palm)),
    ];

    let (actions, stats) = run_lines(&lines);
    assert_eq!(actions, vec![Action::PlayPauseToggle]);
    assert_eq!(stats.rejected_frames, 3);
    assert_eq!(stats.frames, 1);
}

#[test]
fn test_oversized_frame_is_skipped() {
    let low = HandBuilder::pinch_at(0.9);
    let lines = vec![
        format!(r#"{{"width":640,"height":4294967295,"landmarks":{}}}"#, low.to_json()),
        frame_line(0, Some(&low)),
    ];

    let (actions, stats) = run_lines(&lines);
    assert_eq!(actions, vec![Action::VolumeDown]);
    assert_eq!(stats.rejected_frames, 1);
    assert_eq!(stats.frames, 1);
}

#[test]
fn test_out_of_frame_landmarks_rejected() {
    let json = HandBuilder::open_palm().to_json().replacen("0.45", "1.45", 1);
    let line = format!(r#"{{"width":640,"height":480,"landmarks":{json}}}"#);
    let mut source = JsonLinesSource::new(Cursor::new(line));
    assert!(source.next_frame().is_err());
}

#[test]
fn test_config_file_drives_replay() {
    let dir = std::env::temp_dir().join(format!("gesture-media-control-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let recording = dir.join("poses.jsonl");
    let palm = HandBuilder::open_palm();
    let lines: Vec<String> = (0..5u64).map(|i| frame_line(i * 40, Some(&palm))).collect();
    std::fs::write(&recording, lines.join("\n")).unwrap();

    let mut config = Config::default();
    config.source.kind = "file".to_string();
    config.source.path = Some(recording);
    config.source.max_frames = Some(3);
    config.sink.kind = "record".to_string();

    let config_path = dir.join("config.yaml");
    config.to_file(&config_path).unwrap();

    let loaded = Config::from_file(&config_path).unwrap();
    loaded.validate().unwrap();

    let options = AppOptions {
        overlay: loaded.overlay.enabled,
        max_frames: loaded.source.max_frames,
    };
    let mut app = GestureApp::new(loaded.create_source().unwrap(), loaded.create_sink().unwrap(), options);
    let stats = app.run().unwrap();
    assert_eq!(stats.frames, 3);
    assert_eq!(stats.play_pause, 1);

    std::fs::remove_dir_all(&dir).ok();
}
