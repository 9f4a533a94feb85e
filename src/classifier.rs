//! Geometry classifier turning a hand pose into gesture signals.
//!
//! Classification is a pure function of one frame's [`HandPose`] and the frame
//! size. The caller must supply a single tracked hand; the estimator is run with
//! `max_num_hands = 1` so there is never more than one candidate.

use crate::{
    constants::PINCH_THRESHOLD,
    hand_pose::{landmarks, FrameSize, HandPose},
};

/// (tip, PIP joint) index pairs for the four non-thumb fingers
const FINGER_TIP_PIP_PAIRS: [(usize, usize); 4] = [
    (landmarks::INDEX_FINGER_TIP, landmarks::INDEX_FINGER_PIP),
    (landmarks::MIDDLE_FINGER_TIP, landmarks::MIDDLE_FINGER_PIP),
    (landmarks::RING_FINGER_TIP, landmarks::RING_FINGER_PIP),
    (landmarks::PINKY_TIP, landmarks::PINKY_PIP),
];

/// Per-finger extension flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates {
    /// Thumb extended (palm-facing-camera heuristic)
    pub thumb: bool,
    /// Index finger extended
    pub index: bool,
    /// Middle finger extended
    pub middle: bool,
    /// Ring finger extended
    pub ring: bool,
    /// Pinky extended
    pub pinky: bool,
}

impl FingerStates {
    /// True when every finger is extended
    #[must_use]
    pub const fn all_extended(&self) -> bool {
        self.thumb && self.index && self.middle && self.ring && self.pinky
    }

    /// Number of extended fingers
    #[must_use]
    pub fn count(&self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&extended| extended)
            .count()
    }
}

/// Gesture signals derived from a single frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSignal {
    /// Normalized 3D distance between thumb tip and index tip
    pub pinch_distance: f32,
    /// Thumb and index tips are within the pinch threshold
    pub is_pinching: bool,
    /// All five fingers are extended
    pub is_palm_open: bool,
    /// Index tip row in frame pixels
    pub index_tip_pixel_y: i32,
    /// Frame vertical midline in pixels
    pub mid_y: i32,
    /// Individual finger extension flags
    pub fingers: FingerStates,
}

/// Classify a hand pose for a frame of the given pixel size
#[must_use]
pub fn classify(pose: &HandPose, frame: FrameSize) -> GestureSignal {
    let pinch_distance = pinch_distance(pose);
    let fingers = finger_states(pose);

    GestureSignal {
        pinch_distance,
        is_pinching: pinch_distance < PINCH_THRESHOLD,
        is_palm_open: fingers.all_extended(),
        index_tip_pixel_y: index_tip_pixel_y(pose, frame.height),
        mid_y: frame.mid_y(),
        fingers,
    }
}

/// Distance between thumb tip and index tip
#[must_use]
pub fn pinch_distance(pose: &HandPose) -> f32 {
    pose.landmark(landmarks::INDEX_FINGER_TIP)
        .distance(pose.landmark(landmarks::THUMB_TIP))
}

/// Extension state of every finger
#[must_use]
pub fn finger_states(pose: &HandPose) -> FingerStates {
    let [index, middle, ring, pinky] =
        FINGER_TIP_PIP_PAIRS.map(|(tip, pip)| is_finger_extended(pose, tip, pip));

    FingerStates {
        thumb: is_thumb_extended(pose),
        index,
        middle,
        ring,
        pinky,
    }
}

/// A finger is extended when its tip sits above (smaller y than) its PIP joint
#[must_use]
pub fn is_finger_extended(pose: &HandPose, tip: usize, pip: usize) -> bool {
    pose.landmark(tip).y < pose.landmark(pip).y
}

/// Thumb extension compares tip and IP joint along x.
///
/// Only meaningful when the palm faces the camera; a back-facing or mirrored
/// hand inverts the result. This is a known approximation and is kept as is.
#[must_use]
pub fn is_thumb_extended(pose: &HandPose) -> bool {
    pose.landmark(landmarks::THUMB_TIP).x < pose.landmark(landmarks::THUMB_IP).x
}

/// Index tip row truncated to whole pixels
#[must_use]
#[allow(clippy::cast_possible_truncation)] // y is normalized, the product fits in i32
#[allow(clippy::cast_precision_loss)] // Frame heights are far below f32 precision limits
pub fn index_tip_pixel_y(pose: &HandPose, frame_height: u32) -> i32 {
    (pose.landmark(landmarks::INDEX_FINGER_TIP).y * frame_height as f32) as i32
}
