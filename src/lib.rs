//! Hand gesture media control.
//!
//! This library turns a stream of hand landmarks into media key commands:
//! - A pinch (thumb tip touching index tip) held above the middle of the frame
//!   raises the volume, held below it lowers the volume, repeating while held
//! - An open palm toggles play/pause once per gesture
//!
//! The pipeline for each frame is:
//! 1. An external hand-pose estimator produces 21 normalized landmarks
//! 2. The [`classifier`] derives pinch and open-palm signals
//! 3. The [`dispatcher`] applies cooldowns and edge latching to emit at most
//!    one [`dispatcher::Action`]
//! 4. An [`action_sink`] injects the matching media key
//!
//! # Examples
//!
//! ## Classifying and dispatching a frame
//!
//! ```
//! use gesture_media_control::{
//!     classifier::classify,
//!     dispatcher::{dispatch, Action, DispatcherState},
//!     hand_pose::{FrameSize, HandPose, Landmark},
//! };
//!
//! // Thumb and index tips touching, high in the frame
//! let mut points = [Landmark::new(0.5, 0.5, 0.0); 21];
//! points[4] = Landmark::new(0.50, 0.20, 0.0);
//! points[8] = Landmark::new(0.51, 0.20, 0.0);
//! let pose = HandPose::new(points);
//!
//! let signal = classify(&pose, FrameSize::new(640, 480));
//! assert!(signal.is_pinching);
//!
//! let (state, action) = dispatch(DispatcherState::new(), &signal, 0);
//! assert_eq!(action, Action::VolumeUp);
//! assert_eq!(state.last_action_ms, Some(0));
//! ```
//!
//! ## Running the application loop
//!
//! ```no_run
//! use gesture_media_control::{
//!     action_sink::LogSink,
//!     app::{AppOptions, GestureApp},
//!     pose_source::SubprocessSource,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SubprocessSource::spawn("python3", &["hand_landmarks.py".to_string()])?;
//! let mut app = GestureApp::new(source, LogSink, AppOptions::default());
//! let stats = app.run()?;
//! println!("{} actions", stats.actions());
//! # Ok(())
//! # }
//! ```

/// Hand landmark types and validation
pub mod hand_pose;

/// Geometry classifier deriving gesture signals from a hand pose
pub mod classifier;

/// Cooldown and edge-latching state machine emitting actions
pub mod dispatcher;

/// Status text for display
pub mod overlay;

/// Pose sources reading estimator output
pub mod pose_source;

/// Action sinks, including X11 media key injection
pub mod action_sink;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
